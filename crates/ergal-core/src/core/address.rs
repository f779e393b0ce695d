// crates/ergal-core/src/core/address.rs
// ============================================================================
// Module: Ergal Base Address
// Description: Validation and normalization of profile base addresses.
// Purpose: Keep stored base addresses absolute, secure, and separator-free at the end.
// Dependencies: crate::core::correction
// ============================================================================

//! ## Overview
//! A base address is either empty or an `https://` address with no
//! whitespace, at least one `.`, and no trailing `/`. Inputs that cannot be
//! repaired are cleared; a trailing separator is stripped. Neither case is an
//! error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::correction::Correction;
use crate::core::correction::Normalized;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Scheme prefix every non-empty base address must start with.
pub const SECURE_SCHEME_PREFIX: &str = "https://";

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes a caller-supplied base address.
///
/// Empty input stays empty without a correction.
#[must_use]
pub fn normalize_base(raw: &str) -> Normalized<String> {
    if raw.is_empty() {
        return Normalized::unchanged(String::new());
    }
    if !raw.starts_with(SECURE_SCHEME_PREFIX) {
        return cleared(Correction::InsecureBase);
    }
    if raw.chars().any(char::is_whitespace) || !raw.contains('.') {
        return cleared(Correction::MalformedBase);
    }
    let trimmed = raw.trim_end_matches('/');
    if trimmed.len() == raw.len() {
        return Normalized::unchanged(raw.to_string());
    }
    Normalized {
        value: trimmed.to_string(),
        corrections: vec![Correction::BaseTrailingSeparator],
    }
}

/// Returns an empty base with the given correction.
fn cleared(correction: Correction) -> Normalized<String> {
    Normalized {
        value: String::new(),
        corrections: vec![correction],
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
