// crates/ergal-core/src/interfaces/mod.rs
// ============================================================================
// Module: Ergal Interfaces
// Description: Backend-agnostic interfaces for profile storage and HTTP transport.
// Purpose: Define the collaborator surfaces used by the Ergal runtime.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Ergal reaches its two external collaborators: a
//! keyed row store for profiles and an HTTP transport for dispatching calls.
//! Implementations are blocking; every call returns only once the backend
//! has finished or failed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::AuthConfig;
use crate::core::EndpointMap;
use crate::core::ProfileId;

// ============================================================================
// SECTION: Profile Repository
// ============================================================================

/// Persisted profile row.
///
/// # Invariants
/// - `auth` and `endpoints` are `None` until first written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Derived primary key.
    pub id: ProfileId,
    /// Profile name.
    pub name: String,
    /// Normalized base address or empty.
    pub base: String,
    /// Stored authentication strategy.
    pub auth: Option<AuthConfig>,
    /// Stored endpoint definitions.
    pub endpoints: Option<EndpointMap>,
}

/// Profile repository errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Repository I/O error.
    #[error("profile repository io error: {0}")]
    Io(String),
    /// Storage engine error.
    #[error("profile repository db error: {0}")]
    Db(String),
    /// Stored row could not be decoded.
    #[error("profile repository corruption: {0}")]
    Corrupt(String),
    /// Request rejected by the repository.
    #[error("profile repository invalid data: {0}")]
    Invalid(String),
}

/// Keyed row store for profiles.
///
/// Each mutating call is committed on its own; there is no cross-call
/// atomicity and no concurrency control beyond the backend's last-writer-wins
/// behaviour.
pub trait ProfileRepository {
    /// Loads a profile row. `None` means no row exists for the id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the row cannot be read or decoded.
    fn load(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError>;

    /// Inserts a new profile row.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the insert fails, including when a row
    /// already exists for the id.
    fn insert(&self, record: &ProfileRecord) -> Result<(), RepositoryError>;

    /// Replaces the stored auth strategy of an existing row.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the update fails or no row exists.
    fn update_auth(&self, id: &ProfileId, auth: &AuthConfig) -> Result<(), RepositoryError>;

    /// Replaces the stored endpoint map of an existing row.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the update fails or no row exists.
    fn update_endpoints(
        &self,
        id: &ProfileId,
        endpoints: &EndpointMap,
    ) -> Result<(), RepositoryError>;

    /// Verifies the repository is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the backend cannot serve requests.
    fn readiness(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Fully resolved outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method as stored on the endpoint.
    pub method: String,
    /// Absolute address formed from the profile base and endpoint path.
    pub url: String,
    /// Auth strategy to apply, if any.
    pub auth: Option<AuthConfig>,
}

/// Response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw textual body.
    pub body: String,
}

impl ApiResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// HTTP transport errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Request failed in flight.
    #[error("http transport error: {0}")]
    Http(String),
    /// Response body exceeded the transport's limit.
    #[error("response too large: {actual_bytes} bytes (max {max_bytes})")]
    TooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Observed size in bytes.
        actual_bytes: usize,
    },
}

/// Blocking HTTP transport.
pub trait HttpTransport {
    /// Dispatches a request and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be sent or read.
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}
