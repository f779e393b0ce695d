// crates/ergal-http/src/lib.rs
// ============================================================================
// Module: Ergal HTTP Transport
// Description: Blocking reqwest-backed HttpTransport.
// Purpose: Dispatch profile endpoint calls with the profile's auth strategy.
// Dependencies: ergal-core, reqwest, url
// ============================================================================

//! ## Overview
//! [`ReqwestTransport`] is the production [`HttpTransport`] collaborator. It
//! applies the request's auth strategy, refuses redirects, and caps response
//! bodies at [`MAX_RESPONSE_BYTES`].
//!
//! [`HttpTransport`]: ergal_core::HttpTransport

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use transport::DEFAULT_TIMEOUT;
pub use transport::MAX_RESPONSE_BYTES;
pub use transport::ReqwestTransport;
