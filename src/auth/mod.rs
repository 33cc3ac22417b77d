//! Credential handling
//!
//! Loads the four account secrets from a local file and attaches them to
//! outgoing requests. The signing protocol itself is the server side's
//! concern; `Credentials::apply` is the single seam where a real signer
//! would plug in.

mod credentials;

pub use credentials::Credentials;

#[cfg(test)]
mod tests;
