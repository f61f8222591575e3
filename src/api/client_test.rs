use super::*;
use crate::config::Timeouts;

fn client(base: &str) -> ApiClient {
    ApiClient::new(&ApiConfig::new(base, None, Timeouts::default()).unwrap()).unwrap()
}

#[test]
fn plain_segments_are_joined() {
    assert_eq!(api_path(&["datasets", "42", "preview"]), "/datasets/42/preview");
    assert_eq!(api_path(&["ai", "status", "3f2c-9a"]), "/ai/status/3f2c-9a");
}

#[test]
fn separators_in_ids_are_escaped() {
    assert_eq!(api_path(&["datasets", "a/b?c"]), "/datasets/a%2Fb%3Fc");
    assert_eq!(api_path(&["datasets", "x#frag"]), "/datasets/x%23frag");
    assert_eq!(api_path(&["datasets", "../admin"]), "/datasets/..%2Fadmin");
}

#[test]
fn escapes_are_not_double_decoded() {
    assert_eq!(api_path(&["datasets", "100%"]), "/datasets/100%25");
    assert_eq!(api_path(&["datasets", "M 31"]), "/datasets/M%2031");
}

#[test]
fn non_ascii_ids_are_utf8_encoded() {
    assert_eq!(api_path(&["datasets", "é"]), "/datasets/%C3%A9");
}

#[test]
fn url_joins_base_and_escaped_path() {
    let c = client("http://localhost:8000/api/");
    assert_eq!(c.url(&api_path(&["datasets", "a/b"])), "http://localhost:8000/api/datasets/a%2Fb");
    assert_eq!(c.url("/analytics/summary"), "http://localhost:8000/api/analytics/summary");
}
