//! Tests for credential parsing and request decoration

use super::*;
use std::io::Write;

const GOOD: &str = "ck-aaa\ncs-bbb\ntk-ccc\nts-ddd\n";

#[test]
fn test_parse_four_lines() {
    let creds = Credentials::parse(GOOD).unwrap();
    assert_eq!(creds.consumer_key(), "ck-aaa");
    assert_eq!(creds.consumer_secret(), "cs-bbb");
    assert_eq!(creds.token(), "tk-ccc");
    assert_eq!(creds.token_secret(), "ts-ddd");
}

#[test]
fn test_parse_trims_whitespace() {
    let creds = Credentials::parse("  ck  \ncs\ntk\nts\n").unwrap();
    assert_eq!(creds.consumer_key(), "ck");
}

#[test]
fn test_parse_missing_line_is_fatal() {
    let err = Credentials::parse("ck\ncs\ntk\n").unwrap_err();
    assert!(err.is_startup());
    assert!(err.to_string().contains("user token secret"));
}

#[test]
fn test_parse_empty_line_is_fatal() {
    let err = Credentials::parse("ck\n\ntk\nts\n").unwrap_err();
    assert!(err.to_string().contains("consumer secret"));
}

#[test]
fn test_parse_empty_file_is_fatal() {
    let err = Credentials::parse("").unwrap_err();
    assert!(err.to_string().contains("consumer key"));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(GOOD.as_bytes()).unwrap();

    let creds = Credentials::from_file(file.path()).unwrap();
    assert_eq!(creds.token(), "tk-ccc");
}

#[test]
fn test_from_file_missing_path_is_fatal() {
    let err = Credentials::from_file("/nonexistent/CREDENTIALS").unwrap_err();
    assert!(err.is_startup());
}

#[test]
fn test_apply_sets_headers() {
    let creds = Credentials::parse(GOOD).unwrap();
    let client = reqwest::Client::new();
    let req = creds
        .apply(client.get("http://localhost/timeline"))
        .build()
        .unwrap();

    assert_eq!(
        req.headers().get("authorization").unwrap(),
        "Bearer tk-ccc"
    );
    assert_eq!(req.headers().get("x-consumer-key").unwrap(), "ck-aaa");
}

#[test]
fn test_debug_redacts_secrets() {
    let creds = Credentials::parse(GOOD).unwrap();
    let debug = format!("{creds:?}");
    assert!(!debug.contains("cs-bbb"));
    assert!(!debug.contains("ts-ddd"));
}
