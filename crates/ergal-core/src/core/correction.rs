// crates/ergal-core/src/core/correction.rs
// ============================================================================
// Module: Ergal Soft Corrections
// Description: Warnings raised when caller input is corrected in place.
// Purpose: Make soft corrections observable to callers and to log subscribers.
// Dependencies: serde, tracing
// ============================================================================

//! ## Overview
//! Malformed base addresses and endpoint paths are not errors: the value is
//! fixed and processing continues. Every fix is described by a
//! [`Correction`], logged as a `warn` event, and handed back to the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Corrections
// ============================================================================

/// Soft correction applied to caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correction {
    /// Base address did not use the secure scheme and was cleared.
    InsecureBase,
    /// Base address contained whitespace or no domain separator and was cleared.
    MalformedBase,
    /// Trailing separator stripped from the base address.
    BaseTrailingSeparator,
    /// Trailing separator stripped from an endpoint path.
    PathTrailingSeparator,
    /// Leading separator added to an endpoint path.
    PathMissingRoot,
    /// Whitespace removed from an endpoint path.
    PathWhitespace,
}

impl Correction {
    /// Returns a stable label for logs and serialized reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InsecureBase => "insecure_base",
            Self::MalformedBase => "malformed_base",
            Self::BaseTrailingSeparator => "base_trailing_separator",
            Self::PathTrailingSeparator => "path_trailing_separator",
            Self::PathMissingRoot => "path_missing_root",
            Self::PathWhitespace => "path_whitespace",
        }
    }

    /// Emits the correction as a `warn` event.
    pub(crate) fn emit(self, subject: &str) {
        tracing::warn!(
            target: "ergal::correction",
            correction = self.as_str(),
            subject,
            "{self}"
        );
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::InsecureBase => "base address rejected: scheme must be https",
            Self::MalformedBase => "base address rejected: invalid address",
            Self::BaseTrailingSeparator => "base address altered: trailing /",
            Self::PathTrailingSeparator => "endpoint altered: trailing /",
            Self::PathMissingRoot => "endpoint altered: absent root /",
            Self::PathWhitespace => "endpoint altered: whitespace present",
        };
        f.write_str(message)
    }
}

// ============================================================================
// SECTION: Normalized Values
// ============================================================================

/// Normalized value together with the corrections that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<T> {
    /// Normalized value.
    pub value: T,
    /// Corrections applied, in the order they were applied.
    pub corrections: Vec<Correction>,
}

impl<T> Normalized<T> {
    /// Wraps a value with no corrections.
    #[must_use]
    pub const fn unchanged(value: T) -> Self {
        Self {
            value,
            corrections: Vec::new(),
        }
    }

    /// Returns true when the input was altered.
    #[must_use]
    pub fn was_corrected(&self) -> bool {
        !self.corrections.is_empty()
    }
}
