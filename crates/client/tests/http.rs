// ABOUTME: End-to-end tests of the client against a local mock of the extraction service.
// ABOUTME: Covers query construction, forwarded headers, posted markup, and all three error categories.

use std::fs;
use std::time::Duration;

use diffbot_client::{
    Client, DecodeError, Endpoint, Error, ErrorCode, Frontpage, Markup, RequestOptions,
};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    let path = format!(
        "{}/tests/fixtures/{}.json",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path, e))
}

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .server(server.base_url())
        .token("0123456789abcdef")
        .build()
        .unwrap()
}

#[test]
fn article_request_carries_token_url_and_options() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/article")
            .query_param("token", "0123456789abcdef")
            .query_param("url", "http://blog.diffbot.com/post?id=1")
            .query_param("fields", "meta,querystring,images(*)")
            .query_param("timeout", "5000")
            .query_param("callback", "abc");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("article"));
    });

    let opts = RequestOptions::new()
        .with_fields("meta,querystring,images(*)")
        .with_timeout(Duration::from_secs(5))
        .with_callback("abc");
    let article = client_for(&server)
        .article("http://blog.diffbot.com/post?id=1", Some(&opts))
        .unwrap();
    mock.assert();

    assert_eq!(article.author, "John Davi");
    assert_eq!(article.tags.len(), 4);
}

#[test]
fn frontpage_ignores_options_it_does_not_know() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/frontpage")
            .query_param("timeout", "5000")
            .query_param("all", "*");
        then.status(200).body(fixture("frontpage"));
    });

    let opts = RequestOptions::new()
        .with_fields("meta")
        .with_callback("abc")
        .with_timeout(Duration::from_secs(5))
        .with_frontpage_all("*");
    let page = client_for(&server)
        .frontpage("http://blog.diffbot.com/", Some(&opts))
        .unwrap();
    mock.assert();

    assert_eq!(page.title, "Diffblog");
    assert_eq!(page.items.len(), 3);
}

#[test]
fn forwards_header_overrides() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/image")
            .header("X-Forward-User-Agent", "Mozilla/5.0 (robot)")
            .header("X-Forward-Referer", "http://www.google.com/")
            .header("X-Forward-Cookie", "session=1");
        then.status(200).body(fixture("image"));
    });

    let opts = RequestOptions::new()
        .with_user_agent("Mozilla/5.0 (robot)")
        .with_referer("http://www.google.com/")
        .with_cookie("session=1");
    let image = client_for(&server)
        .image("http://www.statesymbolsusa.org/", Some(&opts))
        .unwrap();
    mock.assert();
    assert_eq!(image.images.len(), 2);
}

#[test]
fn posts_markup_for_analysis() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/article")
            .query_param("url", "http://www.diffbot.com/products/automatic/article")
            .header("content-type", "text/html")
            .body("<p>Now is the time for all good robots</p>");
        then.status(200)
            .body(r#"{"type":"article","text":"Now is the time for all good robots"}"#);
    });

    let article: diffbot_client::Article = client_for(&server)
        .extract_markup(
            "http://www.diffbot.com/products/automatic/article",
            &Markup::html("<p>Now is the time for all good robots</p>"),
            None,
        )
        .unwrap();
    mock.assert();
    assert_eq!(article.text, "Now is the time for all good robots");
}

#[test]
fn api_error_body_is_decoded() {
    let server = MockServer::start();
    let body = r#"{"error":"Not authorized API token.","errorCode":401}"#;
    server.mock(|when, then| {
        when.method(GET).path("/article");
        then.status(401).body(body);
    });

    let err = client_for(&server)
        .article("http://example.com/", None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Api);
    let api = err.api_error().unwrap();
    assert_eq!(api.code, 401);
    assert_eq!(api.message, "Not authorized API token.");
    assert_eq!(api.raw, body);
}

#[test]
fn api_error_with_analysis_fields() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/product");
        then.status(500).body(
            r#"{"errorCode":404,"error":"Something went crazy wrong.",
                "errorAnalysis":{"analyzed":"True","blame":"human","reasonCode":817221},
                "suggestedImprovement":"Use a robot."}"#,
        );
    });

    let err = client_for(&server)
        .product("http://example.com/", None)
        .unwrap_err();
    let api = err.api_error().unwrap();
    assert_eq!(api.code, 404);
    assert_eq!(api.message, "Something went crazy wrong.");
    assert!(api.raw.contains("suggestedImprovement"));
}

#[test]
fn non_json_error_body_keeps_status_and_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/image");
        then.status(503).body("Service Unavailable: try later");
    });

    let err = client_for(&server)
        .image("http://example.com/", None)
        .unwrap_err();
    let api = err.api_error().unwrap();
    assert_eq!(api.code, 503);
    assert_eq!(api.message, "Service Unavailable: try later");
}

#[test]
fn empty_error_body_uses_status_line() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/analyze");
        then.status(403);
    });

    let err = client_for(&server)
        .classify("http://example.com/", None)
        .unwrap_err();
    let api = err.api_error().unwrap();
    assert_eq!(api.code, 403);
    assert_eq!(api.message, "403 Forbidden");
}

#[test]
fn frontpage_with_wrong_root_is_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/frontpage");
        then.status(200)
            .body(r#"{"tagName":"html","childNodes":[]}"#);
    });

    let err = client_for(&server)
        .extract::<Frontpage>("http://example.com/", None)
        .unwrap_err();
    match err {
        Error::Decode { endpoint, source } => {
            assert_eq!(endpoint, "frontpage");
            assert!(matches!(source, DecodeError::InvalidRoot { .. }));
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn unreachable_server_is_transport_error() {
    // Port 9 (discard) on localhost is not expected to accept HTTP.
    let client = Client::builder()
        .server("http://127.0.0.1:9")
        .token("tok")
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let err = client
        .fetch(&Endpoint::Article, "http://example.com/", None, None)
        .unwrap_err();
    assert!(err.is_transport());
    assert!(err.api_error().is_none());
}
