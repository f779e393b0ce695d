// crates/ergal-core/src/runtime/mod.rs
// ============================================================================
// Module: Ergal Runtime
// Description: Profile lifecycle, auth and endpoint mutation, and request handling.
// Purpose: Drive profiles through an injected repository and transport.
// Dependencies: crate::{core, interfaces, projection}
// ============================================================================

//! ## Overview
//! The runtime is where validation meets persistence. [`ProfileStore`] owns
//! the repository handle and performs every profile mutation; each mutation
//! is committed independently. [`Handler`] turns a stored endpoint into a
//! request, dispatches it, and projects the response.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod auth;
pub mod endpoints;
pub mod handler;
pub mod memory;
pub mod profile_store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use handler::CallError;
pub use handler::Handler;
pub use handler::build_request;
pub use memory::InMemoryProfileRepository;
pub use profile_store::Profile;
pub use profile_store::ProfileError;
pub use profile_store::ProfileStore;
