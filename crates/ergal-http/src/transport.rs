// crates/ergal-http/src/transport.rs
// ============================================================================
// Module: Reqwest Transport
// Description: Blocking HttpTransport over a reqwest client.
// Purpose: Send resolved endpoint requests and return capped textual bodies.
// Dependencies: ergal-core, reqwest, tracing, url
// ============================================================================

//! ## Overview
//! Auth strategies map onto the wire as follows:
//! - `basic` sends an `Authorization: Basic` header.
//! - `key-header` sends the key under the configured header name.
//! - `key-query` appends `name=key` to the query string.
//!
//! Invariants:
//! - Redirects are not followed.
//! - Bodies larger than [`MAX_RESPONSE_BYTES`] are rejected.
//! - Status codes are returned as-is; callers decide what counts as failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use ergal_core::ApiRequest;
use ergal_core::ApiResponse;
use ergal_core::AuthConfig;
use ergal_core::HttpTransport;
use ergal_core::TransportError;
use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::redirect::Policy;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum response body size accepted by the transport.
pub const MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// HTTP client used for every request.
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] when the client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::Http(err.to_string()))?;
        Ok(Self {
            client,
        })
    }

    /// Creates a transport with a preconfigured client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
        }
    }

    /// Builds the outbound request with auth applied.
    fn prepare(&self, request: &ApiRequest) -> Result<RequestBuilder, TransportError> {
        let method = Method::from_bytes(request.method.to_ascii_uppercase().as_bytes())
            .map_err(|err| TransportError::InvalidRequest(format!("method: {err}")))?;
        let mut url = Url::parse(&request.url)
            .map_err(|err| TransportError::InvalidRequest(format!("url: {err}")))?;
        if let Some(AuthConfig::KeyQuery {
            key,
            name,
        }) = &request.auth
        {
            url.query_pairs_mut().append_pair(name, key);
        }
        let builder = self.client.request(method, url);
        let builder = match &request.auth {
            Some(AuthConfig::Basic {
                username,
                password,
            }) => builder.basic_auth(username, Some(password)),
            Some(AuthConfig::KeyHeader {
                key,
                name,
            }) => builder.header(name.as_str(), key.as_str()),
            Some(AuthConfig::KeyQuery {
                ..
            })
            | None => builder,
        };
        Ok(builder)
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let response = self
            .prepare(request)?
            .send()
            .map_err(|err| TransportError::Http(err.without_url().to_string()))?;
        let status = response.status().as_u16();
        if let Some(length) = response.content_length() {
            let actual_bytes = usize::try_from(length).unwrap_or(usize::MAX);
            enforce_max_bytes(actual_bytes)?;
        }
        let limit = u64::try_from(MAX_RESPONSE_BYTES)
            .map_err(|_| TransportError::InvalidRequest("response limit overflow".to_string()))?
            .saturating_add(1);
        let mut bytes = Vec::new();
        response
            .take(limit)
            .read_to_end(&mut bytes)
            .map_err(|err| TransportError::Http(err.to_string()))?;
        enforce_max_bytes(bytes.len())?;
        let body = String::from_utf8(bytes)
            .map_err(|err| TransportError::Http(format!("response body is not utf-8: {err}")))?;
        tracing::debug!(method = %request.method, status, bytes = body.len(), "http response");
        Ok(ApiResponse {
            status,
            body,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rejects bodies over the response limit.
const fn enforce_max_bytes(actual_bytes: usize) -> Result<(), TransportError> {
    if actual_bytes > MAX_RESPONSE_BYTES {
        return Err(TransportError::TooLarge {
            max_bytes: MAX_RESPONSE_BYTES,
            actual_bytes,
        });
    }
    Ok(())
}
