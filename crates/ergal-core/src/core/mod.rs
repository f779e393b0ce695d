// crates/ergal-core/src/core/mod.rs
// ============================================================================
// Module: Ergal Core Types
// Description: Canonical profile identity, auth, endpoint, and address types.
// Purpose: Provide stable, serializable types shared by stores and handlers.
// Dependencies: serde, sha2
// ============================================================================

//! ## Overview
//! Core types define what a stored API profile is made of. Every value that
//! reaches these types has already been validated or normalized; persisted
//! rows are expected to round-trip through them unchanged.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod address;
pub mod auth;
pub mod correction;
pub mod endpoint;
pub mod identifiers;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use address::SECURE_SCHEME_PREFIX;
pub use address::normalize_base;
pub use auth::AuthConfig;
pub use auth::AuthError;
pub use auth::AuthMethod;
pub use auth::AuthParams;
pub use correction::Correction;
pub use correction::Normalized;
pub use endpoint::Endpoint;
pub use endpoint::EndpointError;
pub use endpoint::EndpointMap;
pub use endpoint::normalize_path;
pub use identifiers::ProfileId;
