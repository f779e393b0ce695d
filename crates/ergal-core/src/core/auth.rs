// crates/ergal-core/src/core/auth.rs
// ============================================================================
// Module: Ergal Auth Configuration
// Description: Closed set of authentication strategies stored on a profile.
// Purpose: Guarantee that persisted auth is always one complete strategy.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`AuthConfig`] is a tagged union of the supported strategies. Each variant
//! is validated by its own constructor, so a partially populated strategy
//! cannot be built. The dynamic `method` + parameter-map surface is kept for
//! callers driven by configuration files or user input
//! ([`AuthConfig::from_params`]).
//!
//! Absence of authentication is modelled as `Option::<AuthConfig>::None`, not
//! as a variant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Auth Method
// ============================================================================

/// Supported authentication method names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMethod {
    /// HTTP basic authentication.
    Basic,
    /// API key sent in a named header.
    KeyHeader,
    /// API key sent as a named query parameter.
    KeyQuery,
}

impl AuthMethod {
    /// Returns the wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::KeyHeader => "key-header",
            Self::KeyQuery => "key-query",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = AuthError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "basic" => Ok(Self::Basic),
            "key-header" => Ok(Self::KeyHeader),
            "key-query" => Ok(Self::KeyQuery),
            other => Err(AuthError::UnsupportedAuthMethod(other.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Auth validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Method name is not one of the supported strategies.
    #[error("unsupported auth method: {0}")]
    UnsupportedAuthMethod(String),
    /// A parameter required by the method was absent or empty.
    #[error("auth method {method} requires parameter {parameter}")]
    MissingParameter {
        /// Method being configured.
        method: AuthMethod,
        /// Name of the missing parameter.
        parameter: &'static str,
    },
}

// ============================================================================
// SECTION: Auth Parameters
// ============================================================================

/// Untyped parameter map for the dynamic auth surface.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthParams {
    /// Parameter values keyed by name.
    values: BTreeMap<String, String>,
}

impl AuthParams {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a parameter, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns a parameter value when present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns a required, non-empty parameter.
    fn require(&self, method: AuthMethod, parameter: &'static str) -> Result<String, AuthError> {
        match self.get(parameter) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(AuthError::MissingParameter {
                method,
                parameter,
            }),
        }
    }
}

impl fmt::Debug for AuthParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AuthParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// ============================================================================
// SECTION: Auth Config
// ============================================================================

/// Authentication strategy stored on a profile.
///
/// # Invariants
/// - Every field of the active variant is non-empty.
/// - Serialized as `{"method": "<kebab-name>", ...fields}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum AuthConfig {
    /// HTTP basic authentication.
    Basic {
        /// Account username.
        username: String,
        /// Account password.
        password: String,
    },
    /// API key sent in a header.
    KeyHeader {
        /// Key value.
        key: String,
        /// Header name.
        name: String,
    },
    /// API key sent as a query parameter.
    KeyQuery {
        /// Key value.
        key: String,
        /// Query parameter name.
        name: String,
    },
}

impl AuthConfig {
    /// Builds a basic-auth strategy.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingParameter`] when either value is empty.
    pub fn basic(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let params = AuthParams::new().with("username", username).with("password", password);
        Self::build(AuthMethod::Basic, &params)
    }

    /// Builds a header API-key strategy.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingParameter`] when either value is empty.
    pub fn key_header(key: impl Into<String>, name: impl Into<String>) -> Result<Self, AuthError> {
        let params = AuthParams::new().with("key", key).with("name", name);
        Self::build(AuthMethod::KeyHeader, &params)
    }

    /// Builds a query-parameter API-key strategy.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingParameter`] when either value is empty.
    pub fn key_query(key: impl Into<String>, name: impl Into<String>) -> Result<Self, AuthError> {
        let params = AuthParams::new().with("key", key).with("name", name);
        Self::build(AuthMethod::KeyQuery, &params)
    }

    /// Builds a strategy from a method name and untyped parameters.
    ///
    /// Parameters not used by the method are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnsupportedAuthMethod`] for unknown methods and
    /// [`AuthError::MissingParameter`] for absent or empty required values.
    pub fn from_params(method: &str, params: &AuthParams) -> Result<Self, AuthError> {
        let method = AuthMethod::from_str(method)?;
        Self::build(method, params)
    }

    /// Returns the method of the active variant.
    #[must_use]
    pub const fn method(&self) -> AuthMethod {
        match self {
            Self::Basic {
                ..
            } => AuthMethod::Basic,
            Self::KeyHeader {
                ..
            } => AuthMethod::KeyHeader,
            Self::KeyQuery {
                ..
            } => AuthMethod::KeyQuery,
        }
    }

    /// Validates parameters for a known method and builds the variant.
    fn build(method: AuthMethod, params: &AuthParams) -> Result<Self, AuthError> {
        match method {
            AuthMethod::Basic => Ok(Self::Basic {
                username: params.require(method, "username")?,
                password: params.require(method, "password")?,
            }),
            AuthMethod::KeyHeader => Ok(Self::KeyHeader {
                key: params.require(method, "key")?,
                name: params.require(method, "name")?,
            }),
            AuthMethod::KeyQuery => Ok(Self::KeyQuery {
                key: params.require(method, "key")?,
                name: params.require(method, "name")?,
            }),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic {
                username, ..
            } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::KeyHeader {
                name, ..
            } => {
                f.debug_struct("KeyHeader").field("key", &"<redacted>").field("name", name).finish()
            }
            Self::KeyQuery {
                name, ..
            } => {
                f.debug_struct("KeyQuery").field("key", &"<redacted>").field("name", name).finish()
            }
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
