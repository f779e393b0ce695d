// crates/ergal-core/src/core/identifiers.rs
// ============================================================================
// Module: Ergal Identifiers
// Description: Profile identifiers derived from profile names.
// Purpose: Provide a strongly typed, serializable primary key with a stable string form.
// Dependencies: serde, sha2
// ============================================================================

//! ## Overview
//! A [`ProfileId`] is a pure function of the profile name. The compact form
//! keeps every other hex character of the SHA-256 digest (128 bits of digest
//! material), which is the layout existing stores were written with. Two
//! distinct names may collide; callers needing the stronger guarantee can use
//! [`ProfileId::derive_full`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Primary key of a stored profile.
///
/// # Invariants
/// - Derived identifiers are lowercase hex.
/// - Identifiers read back from storage are taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives the compact identifier for a profile name.
    #[must_use]
    pub fn derive(name: &str) -> Self {
        let digest = sha256_hex(name);
        Self(digest.chars().step_by(2).collect())
    }

    /// Derives the identifier using the full SHA-256 digest.
    #[must_use]
    pub fn derive_full(name: &str) -> Self {
        Self(sha256_hex(name))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ProfileId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProfileId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Hashing Helpers
// ============================================================================

/// Hashes a name with SHA-256 and returns lowercase hex.
fn sha256_hex(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hex_encode(&hasher.finalize())
}

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
