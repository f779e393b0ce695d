// crates/ergal-core/src/runtime/handler.rs
// ============================================================================
// Module: Ergal Request Handler
// Description: Dispatches stored endpoints and projects their responses.
// Purpose: Compose a profile, a transport, and the projector into one call.
// Dependencies: crate::{interfaces, projection, runtime::profile_store}, thiserror
// ============================================================================

//! ## Overview
//! [`Handler`] resolves `base + path` for a named endpoint, forwards the
//! profile's auth strategy to the transport, and fails closed on non-2xx
//! statuses. It performs a single attempt: no retries, no rate limiting.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::interfaces::ApiRequest;
use crate::interfaces::ApiResponse;
use crate::interfaces::HttpTransport;
use crate::interfaces::TransportError;
use crate::projection::Projection;
use crate::projection::ProjectionError;
use crate::projection::project;
use crate::runtime::profile_store::Profile;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Endpoint call errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// Profile has no endpoint with the given name.
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),
    /// Profile has no base address to resolve paths against.
    #[error("profile {0} has no base address")]
    MissingBase(String),
    /// Remote returned a non-success status.
    #[error("endpoint {endpoint} returned http status {status}")]
    Status {
        /// Endpoint name.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },
    /// Transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Response body could not be projected.
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

// ============================================================================
// SECTION: Request Building
// ============================================================================

/// Builds the request for a named endpoint.
///
/// # Errors
///
/// Returns [`CallError::UnknownEndpoint`] or [`CallError::MissingBase`].
pub fn build_request(profile: &Profile, endpoint: &str) -> Result<ApiRequest, CallError> {
    let definition = profile
        .endpoint(endpoint)
        .ok_or_else(|| CallError::UnknownEndpoint(endpoint.to_string()))?;
    if profile.base().is_empty() {
        return Err(CallError::MissingBase(profile.name().to_string()));
    }
    Ok(ApiRequest {
        method: definition.method.clone(),
        url: format!("{}{}", profile.base(), definition.path),
        auth: profile.auth().cloned(),
    })
}

// ============================================================================
// SECTION: Handler
// ============================================================================

/// Dispatches profile endpoints through a transport.
#[derive(Debug, Clone)]
pub struct Handler<T> {
    /// Outbound transport.
    transport: T,
}

impl<T: HttpTransport> Handler<T> {
    /// Creates a handler over a transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
        }
    }

    /// Dispatches a named endpoint and returns the successful response.
    ///
    /// # Errors
    ///
    /// Returns [`CallError`] when the request cannot be built, the transport
    /// fails, or the status is not 2xx.
    pub fn call(&self, profile: &Profile, endpoint: &str) -> Result<ApiResponse, CallError> {
        let request = build_request(profile, endpoint)?;
        let response = self.transport.send(&request)?;
        tracing::debug!(
            profile_id = %profile.id(),
            endpoint,
            status = response.status,
            "endpoint called"
        );
        if !response.is_success() {
            return Err(CallError::Status {
                endpoint: endpoint.to_string(),
                status: response.status,
            });
        }
        Ok(response)
    }

    /// Dispatches a named endpoint and projects target fields from the body.
    ///
    /// # Errors
    ///
    /// Returns [`CallError`] when the call fails or the body cannot be parsed.
    pub fn call_and_project<I, S>(
        &self,
        profile: &Profile,
        endpoint: &str,
        targets: I,
    ) -> Result<Projection, CallError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let response = self.call(profile, endpoint)?;
        Ok(project(&response.body, targets)?)
    }
}
