//! Credential file parsing and request decoration

use crate::error::{Error, Result};
use reqwest::RequestBuilder;
use std::path::Path;

/// Names for the four credential lines, in file order.
const LINE_NAMES: [&str; 4] = [
    "consumer key",
    "consumer secret",
    "user token",
    "user token secret",
];

/// The four account secrets read from the credentials file.
///
/// The file format is four newline-separated secret strings: consumer key,
/// consumer secret, user token, user token secret. Any missing or empty
/// line is fatal; the run never reaches the network with bad credentials.
#[derive(Clone)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    token: String,
    token_secret: String,
}

impl Credentials {
    /// Load credentials from a file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::credentials(format!("could not read {}: {e}", path.display()))
        })?;
        Self::parse(&contents)
    }

    /// Parse credentials from the raw file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut lines = contents.lines();
        let mut fields = Vec::with_capacity(4);

        for name in LINE_NAMES {
            let line = lines
                .next()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .ok_or_else(|| Error::credentials(format!("missing {name} line")))?;
            fields.push(line.to_string());
        }

        let mut fields = fields.into_iter();
        Ok(Self {
            consumer_key: fields.next().unwrap_or_default(),
            consumer_secret: fields.next().unwrap_or_default(),
            token: fields.next().unwrap_or_default(),
            token_secret: fields.next().unwrap_or_default(),
        })
    }

    /// Attach the credentials to an outgoing request.
    ///
    /// The user token travels as a bearer token and the consumer key as an
    /// application header. The consumer secret and token secret stay local;
    /// a signing scheme would consume them here.
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.token)
            .header("x-consumer-key", &self.consumer_key)
    }

    /// The consumer key (application identity)
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// The consumer secret
    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    /// The user token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The user token secret
    pub fn token_secret(&self) -> &str {
        &self.token_secret
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"<redacted>")
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}
