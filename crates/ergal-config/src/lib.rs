// crates/ergal-config/src/lib.rs
// ============================================================================
// Module: Ergal Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for ergal.toml semantics.
// Dependencies: ergal-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `ergal-config` defines the configuration a host process reads once at
//! startup to build its profile repository and HTTP transport. Validation is
//! strict and fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
