// crates/ergal-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Profile Repository
// Description: Durable ProfileRepository backend using SQLite.
// Purpose: Persist API profiles in a single file-backed table.
// Dependencies: ergal-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`ProfileRepository`] implementation.
//! The database is opened once and the handle is shared by every profile the
//! process works with; each mutation is a single auto-committed statement.
//!
//! [`ProfileRepository`]: ergal_core::ProfileRepository

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::PROFILE_TABLE;
pub use store::SqliteProfileRepository;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
