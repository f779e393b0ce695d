// crates/ergal-core/src/lib.rs
// ============================================================================
// Module: Ergal Core Library
// Description: Public API surface for the Ergal core.
// Purpose: Expose profile types, collaborator interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, projection, runtime}
// ============================================================================

//! ## Overview
//! Ergal core stores reusable descriptions of third-party APIs (base address,
//! authentication strategy, named endpoints) keyed by an identifier derived
//! from the profile name, and projects flat field sets out of the JSON or XML
//! bodies those APIs return. Storage and HTTP are reached only through the
//! interfaces in [`interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod projection;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ApiRequest;
pub use interfaces::ApiResponse;
pub use interfaces::HttpTransport;
pub use interfaces::ProfileRecord;
pub use interfaces::ProfileRepository;
pub use interfaces::RepositoryError;
pub use interfaces::TransportError;
pub use projection::Projection;
pub use projection::ProjectionError;
pub use projection::parse_targets;
pub use projection::project;
pub use runtime::CallError;
pub use runtime::Handler;
pub use runtime::InMemoryProfileRepository;
pub use runtime::Profile;
pub use runtime::ProfileError;
pub use runtime::ProfileStore;
pub use runtime::build_request;
