//! CLI flags and argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Incremental timeline downloader
#[derive(Parser, Debug)]
#[command(name = "timeline-archiver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Account whose timeline to download
    #[arg(short, long, default_value = "sampleuser")]
    pub account: String,

    /// Output path prefix; items land at <prefix>_<id>.json
    #[arg(short, long, default_value = "content/user_timeline")]
    pub out: String,

    /// Page size requested per API call
    #[arg(long, default_value_t = 100)]
    pub count: u32,

    /// Batch size (accepted for compatibility, currently unused)
    #[arg(long, default_value_t = 10)]
    pub batch: u32,

    /// Total number of items to download this run
    #[arg(long, default_value_t = 10)]
    pub total: usize,

    /// Only fetch items newer than this id (empty = resume from cursor)
    #[arg(long, default_value = "")]
    pub since: String,

    /// Credentials file: four newline-separated secrets
    #[arg(long, default_value = "CREDENTIALS")]
    pub credentials: PathBuf,

    /// Cursor file recording the last downloaded item id
    #[arg(long, default_value = "content/last_id")]
    pub cursor_file: PathBuf,

    /// Origin of the timeline API
    #[arg(long, default_value = "https://api.twitter.com")]
    pub base_url: String,

    /// Minimum wait after a rate-limit rejection, in seconds
    #[arg(long, default_value_t = 10)]
    pub min_wait: u64,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod commands_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["timeline-archiver"]);
        assert_eq!(cli.account, "sampleuser");
        assert_eq!(cli.out, "content/user_timeline");
        assert_eq!(cli.count, 100);
        assert_eq!(cli.batch, 10);
        assert_eq!(cli.total, 10);
        assert_eq!(cli.since, "");
        assert_eq!(cli.credentials, PathBuf::from("CREDENTIALS"));
        assert_eq!(cli.cursor_file, PathBuf::from("content/last_id"));
        assert_eq!(cli.min_wait, 10);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "timeline-archiver",
            "--account",
            "someuser",
            "--total",
            "3",
            "--since",
            "850",
            "--min-wait",
            "2",
        ]);
        assert_eq!(cli.account, "someuser");
        assert_eq!(cli.total, 3);
        assert_eq!(cli.since, "850");
        assert_eq!(cli.min_wait, 2);
    }
}
