// crates/ergal-core/src/projection/mod.rs
// ============================================================================
// Module: Ergal Response Projector
// Description: Extracts named fields from nested JSON or XML response bodies.
// Purpose: Give callers a flat view over arbitrarily nested API responses.
// Dependencies: serde_json, thiserror, crate::projection::xml
// ============================================================================

//! ## Overview
//! [`project`] parses a body as JSON, falling back to XML, and walks the
//! resulting tree depth-first in document order. At every mapping, each key
//! named in the target set captures its value the first time it is seen;
//! later occurrences of an already captured key are ignored.
//!
//! Invariants:
//! - Projection is pure: identical inputs yield identical output.
//! - A top-level sequence is searched as `{"data": <sequence>}`.
//! - Sequences nested inside mappings are not searched.

// ============================================================================
// SECTION: Submodules
// ============================================================================

mod xml;

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Key a top-level sequence is wrapped under before traversal.
pub const SEQUENCE_WRAPPER_KEY: &str = "data";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Projection errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// Body is neither JSON nor XML.
    #[error("response body is neither json ({json}) nor xml ({xml})")]
    Unparseable {
        /// JSON parse failure.
        json: String,
        /// XML parse failure.
        xml: String,
    },
    /// Target list could not be decoded.
    #[error("invalid projection targets: {0}")]
    InvalidTargets(String),
}

// ============================================================================
// SECTION: Projection
// ============================================================================

/// Flat projection result.
///
/// # Invariants
/// - Contains exactly one entry per distinct requested target.
/// - Found targets come first, in the order they were satisfied; unfound
///   targets follow in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Target names with their captured values.
    entries: Vec<(String, Option<Value>)>,
}

impl Projection {
    /// Returns the captured value for a target.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(name, _)| name == key).and_then(|(_, value)| value.as_ref())
    }

    /// Returns true when the target was found in the body.
    #[must_use]
    pub fn is_found(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns true when the target was requested.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    /// Iterates entries in result order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    /// Returns the number of requested targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no targets were requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the projection as a JSON object; unfound targets become `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(name, value)| (name.clone(), value.clone().unwrap_or(Value::Null)))
            .collect();
        Value::Object(map)
    }
}

/// Projects target fields out of a response body.
///
/// # Errors
///
/// Returns [`ProjectionError::Unparseable`] when the body is neither valid
/// JSON nor valid XML.
pub fn project<I, S>(body: &str, targets: I) -> Result<Projection, ProjectionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let targets = distinct_targets(targets);
    let root = match parse_body(body)? {
        Value::Array(items) => {
            let mut map = Map::new();
            map.insert(SEQUENCE_WRAPPER_KEY.to_string(), Value::Array(items));
            Value::Object(map)
        }
        other => other,
    };
    let mut found = Vec::new();
    if let Value::Object(map) = &root {
        collect_matches(map, &targets, &mut found);
    }
    let mut entries: Vec<(String, Option<Value>)> =
        found.into_iter().map(|(name, value)| (name, Some(value))).collect();
    for target in targets {
        if !entries.iter().any(|(name, _)| *name == target) {
            entries.push((target, None));
        }
    }
    Ok(Projection {
        entries,
    })
}

/// Decodes a JSON array of target names.
///
/// # Errors
///
/// Returns [`ProjectionError::InvalidTargets`] when the text is not a JSON
/// array of strings.
pub fn parse_targets(json: &str) -> Result<Vec<String>, ProjectionError> {
    serde_json::from_str(json).map_err(|err| ProjectionError::InvalidTargets(err.to_string()))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses the body as JSON, falling back to XML.
fn parse_body(body: &str) -> Result<Value, ProjectionError> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => Ok(value),
        Err(json_err) => xml::xml_to_value(body).map_err(|xml_err| ProjectionError::Unparseable {
            json: json_err.to_string(),
            xml: xml_err.to_string(),
        }),
    }
}

/// Deduplicates targets while keeping request order.
fn distinct_targets<I, S>(targets: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut distinct: Vec<String> = Vec::new();
    for target in targets {
        let target = target.as_ref();
        if !distinct.iter().any(|existing| existing == target) {
            distinct.push(target.to_string());
        }
    }
    distinct
}

/// Depth-first search over nested mappings, recording first matches.
fn collect_matches(map: &Map<String, Value>, targets: &[String], found: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        if found.len() == targets.len() {
            return;
        }
        if targets.iter().any(|target| target == key) && !found.iter().any(|(name, _)| name == key)
        {
            found.push((key.clone(), value.clone()));
        }
        if let Value::Object(child) = value {
            collect_matches(child, targets, found);
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
