// crates/ergal-core/src/core/endpoint.rs
// ============================================================================
// Module: Ergal Endpoints
// Description: Named (path, method) endpoint definitions and path normalization.
// Purpose: Keep every stored endpoint path rooted, trimmed, and whitespace-free.
// Dependencies: serde, thiserror, crate::core::correction
// ============================================================================

//! ## Overview
//! Endpoint paths are normalized at write time in a fixed order: strip the
//! trailing `/`, add a leading `/` when absent, then drop whitespace. Each
//! step that changes the path yields its own [`Correction`].
//!
//! Invariants:
//! - Stored paths start with `/`, never end with `/`, contain no whitespace.
//! - The bare root `/` cannot satisfy these rules and is rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::correction::Correction;
use crate::core::correction::Normalized;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Endpoint definition scoped to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Normalized path appended to the profile base.
    pub path: String,
    /// HTTP method, stored as supplied.
    pub method: String,
}

/// Endpoints keyed by name.
pub type EndpointMap = BTreeMap<String, Endpoint>;

/// Endpoint validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// A required argument was empty.
    #[error("endpoint requires {0}")]
    IncompleteArgs(&'static str),
    /// An argument could not be stored.
    #[error("invalid endpoint input: {0}")]
    InvalidInput(String),
}

impl Endpoint {
    /// Validates and normalizes an endpoint definition.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::IncompleteArgs`] when `path` or `method` is
    /// empty, and [`EndpointError::InvalidInput`] when the path normalizes to
    /// the bare root.
    pub fn new(path: &str, method: &str) -> Result<Normalized<Self>, EndpointError> {
        if path.is_empty() {
            return Err(EndpointError::IncompleteArgs("path"));
        }
        if method.is_empty() {
            return Err(EndpointError::IncompleteArgs("method"));
        }
        let normalized = normalize_path(path)?;
        Ok(Normalized {
            value: Self {
                path: normalized.value,
                method: method.to_string(),
            },
            corrections: normalized.corrections,
        })
    }
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes an endpoint path.
///
/// # Errors
///
/// Returns [`EndpointError::IncompleteArgs`] for an empty path and
/// [`EndpointError::InvalidInput`] when nothing but the root remains.
pub fn normalize_path(raw: &str) -> Result<Normalized<String>, EndpointError> {
    if raw.is_empty() {
        return Err(EndpointError::IncompleteArgs("path"));
    }
    let mut corrections = Vec::new();
    let mut path = raw.to_string();
    if path.ends_with('/') {
        path.truncate(path.trim_end_matches('/').len());
        corrections.push(Correction::PathTrailingSeparator);
    }
    if !path.starts_with('/') {
        path.insert(0, '/');
        corrections.push(Correction::PathMissingRoot);
    }
    if path.chars().any(char::is_whitespace) {
        path.retain(|ch| !ch.is_whitespace());
        let trimmed = path.trim_end_matches('/').len().max(1);
        path.truncate(trimmed);
        corrections.push(Correction::PathWhitespace);
    }
    if path == "/" {
        return Err(EndpointError::InvalidInput(format!("path '{raw}' has no resource segment")));
    }
    Ok(Normalized {
        value: path,
        corrections,
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        reason = "Test-only assertions use unwrap/expect for clarity."
    )]

    use super::Endpoint;
    use super::EndpointError;
    use super::normalize_path;
    use crate::core::correction::Correction;

    #[test]
    fn relative_path_gains_root() {
        let result = normalize_path("users").unwrap();
        assert_eq!(result.value, "/users");
        assert_eq!(result.corrections, vec![Correction::PathMissingRoot]);
    }

    #[test]
    fn trailing_separator_is_stripped() {
        let result = normalize_path("/users/").unwrap();
        assert_eq!(result.value, "/users");
        assert_eq!(result.corrections, vec![Correction::PathTrailingSeparator]);
    }

    #[test]
    fn every_step_reports_its_own_correction() {
        let result = normalize_path("user s/").unwrap();
        assert_eq!(result.value, "/users");
        assert_eq!(result.corrections, vec![
            Correction::PathTrailingSeparator,
            Correction::PathMissingRoot,
            Correction::PathWhitespace,
        ]);
    }

    #[test]
    fn separator_exposed_by_whitespace_removal_is_stripped() {
        let result = normalize_path("/users/ ").unwrap();
        assert_eq!(result.value, "/users");
    }

    #[test]
    fn bare_root_is_rejected() {
        assert!(matches!(normalize_path("/"), Err(EndpointError::InvalidInput(_))));
        assert!(matches!(normalize_path("  "), Err(EndpointError::InvalidInput(_))));
    }

    #[test]
    fn empty_method_is_incomplete() {
        let err = Endpoint::new("/users", "").unwrap_err();
        assert_eq!(err, EndpointError::IncompleteArgs("method"));
    }
}
