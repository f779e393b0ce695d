// crates/ergal-http/tests/transport.rs
// ============================================================================
// Module: Reqwest Transport Tests
// Description: Loopback tests for auth application and response handling.
// Purpose: Validate what reaches the wire for each auth strategy.
// Dependencies: ergal-http, ergal-core, reqwest, serde_json, tiny_http
// ============================================================================

//! ## Overview
//! Each test starts a single-shot `tiny_http` server on loopback, sends one
//! request through [`ReqwestTransport`], and inspects what the server saw.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::thread::JoinHandle;
use std::time::Duration;

use ergal_core::ApiRequest;
use ergal_core::AuthConfig;
use ergal_core::HttpTransport;
use ergal_core::InMemoryProfileRepository;
use ergal_core::ProfileStore;
use ergal_core::TransportError;
use ergal_http::DEFAULT_TIMEOUT;
use ergal_http::MAX_RESPONSE_BYTES;
use ergal_http::ReqwestTransport;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde_json::json;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// What the loopback server observed.
#[derive(Debug)]
struct Seen {
    method: String,
    url: String,
    headers: Vec<(String, String)>,
}

impl Seen {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Serves one request with the given status and body.
fn serve_once(status: u16, body: String) -> (String, JoinHandle<Seen>) {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let addr = server.server_addr();
    let handle = std::thread::spawn(move || {
        let request = server.recv().expect("request");
        let seen = Seen {
            method: request.method().to_string(),
            url: request.url().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|header| (header.field.to_string(), header.value.to_string()))
                .collect(),
        };
        let response = Response::from_string(body).with_status_code(status);
        // The client may hang up early on rejected bodies.
        request.respond(response).ok();
        seen
    });
    (format!("http://{addr}"), handle)
}

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(DEFAULT_TIMEOUT).expect("transport")
}

fn request(url: String, auth: Option<AuthConfig>) -> ApiRequest {
    ApiRequest {
        method: "GET".to_string(),
        url,
        auth,
    }
}

// ============================================================================
// SECTION: Auth Application
// ============================================================================

#[test]
fn basic_auth_is_sent_as_authorization_header() {
    let (base, handle) = serve_once(200, "ok".to_string());
    let auth = AuthConfig::basic("ada", "lovelace").unwrap();
    let response = transport().send(&request(format!("{base}/me"), Some(auth))).unwrap();
    let seen = handle.join().expect("server thread");
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "ok");
    assert_eq!(seen.url, "/me");
    assert_eq!(seen.header("Authorization"), Some("Basic YWRhOmxvdmVsYWNl"));
}

#[test]
fn key_header_uses_configured_header_name() {
    let (base, handle) = serve_once(200, "{}".to_string());
    let auth = AuthConfig::key_header("k-123", "X-Api-Key").unwrap();
    transport().send(&request(format!("{base}/v1/items"), Some(auth))).unwrap();
    let seen = handle.join().expect("server thread");
    assert_eq!(seen.header("X-Api-Key"), Some("k-123"));
    assert_eq!(seen.header("Authorization"), None);
}

#[test]
fn key_query_is_appended_to_existing_query() {
    let (base, handle) = serve_once(200, "{}".to_string());
    let auth = AuthConfig::key_query("s3cret", "appid").unwrap();
    transport().send(&request(format!("{base}/weather?q=oslo"), Some(auth))).unwrap();
    let seen = handle.join().expect("server thread");
    assert_eq!(seen.url, "/weather?q=oslo&appid=s3cret");
}

#[test]
fn no_auth_sends_no_credentials() {
    let (base, handle) = serve_once(200, "{}".to_string());
    transport().send(&request(format!("{base}/public"), None)).unwrap();
    let seen = handle.join().expect("server thread");
    assert_eq!(seen.url, "/public");
    assert_eq!(seen.header("Authorization"), None);
}

// ============================================================================
// SECTION: Responses
// ============================================================================

#[test]
fn stored_method_is_sent_upper_cased() {
    let (base, handle) = serve_once(201, "created".to_string());
    let mut outbound = request(format!("{base}/items"), None);
    outbound.method = "post".to_string();
    let response = transport().send(&outbound).unwrap();
    let seen = handle.join().expect("server thread");
    assert_eq!(seen.method, "POST");
    assert_eq!(response.status, 201);
}

#[test]
fn error_status_is_returned_not_raised() {
    let (base, handle) = serve_once(503, "busy".to_string());
    let response = transport().send(&request(format!("{base}/x"), None)).unwrap();
    handle.join().expect("server thread");
    assert_eq!(response.status, 503);
    assert!(!response.is_success());
}

#[test]
fn oversized_body_is_rejected() {
    let (base, handle) = serve_once(200, "x".repeat(MAX_RESPONSE_BYTES + 1));
    let err = transport().send(&request(format!("{base}/big"), None)).unwrap_err();
    handle.join().expect("server thread");
    assert!(matches!(err, TransportError::TooLarge { .. }));
}

#[test]
fn preconfigured_client_is_used_for_sends() {
    let (base, handle) = serve_once(200, "{}".to_string());
    let mut headers = HeaderMap::new();
    headers.insert("X-Client", HeaderValue::from_static("ergal-test"));
    let client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client");
    let response =
        ReqwestTransport::with_client(client).send(&request(format!("{base}/ping"), None)).unwrap();
    let seen = handle.join().expect("server thread");
    assert_eq!(response.status, 200);
    assert_eq!(seen.header("X-Client"), Some("ergal-test"));
}

#[test]
fn malformed_url_is_an_invalid_request() {
    let err = transport().send(&request("not a url".to_string(), None)).unwrap_err();
    assert!(matches!(err, TransportError::InvalidRequest(_)));
}

// ============================================================================
// SECTION: End To End
// ============================================================================

#[test]
fn stored_endpoint_is_dispatched_and_projected() {
    let body = json!({"user": {"id": 7, "login": "octo"}, "items": [{"id": 1}]}).to_string();
    let (base, handle) = serve_once(200, body);
    let store = ProfileStore::new(InMemoryProfileRepository::new());
    let mut profile = store.open("loopback", "https://placeholder.example").unwrap();
    store.add_endpoint(&mut profile, "me", "/user", "GET").unwrap();
    let mut outbound = ergal_core::build_request(&profile, "me").unwrap();
    outbound.url = outbound.url.replace("https://placeholder.example", &base);

    let response = transport().send(&outbound).unwrap();
    handle.join().expect("server thread");
    let projection = ergal_core::project(&response.body, ["login", "id"]).unwrap();
    assert_eq!(projection.to_json(), json!({"id": 7, "login": "octo"}));
}
