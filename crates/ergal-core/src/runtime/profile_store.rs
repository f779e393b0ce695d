// crates/ergal-core/src/runtime/profile_store.rs
// ============================================================================
// Module: Ergal Profile Store
// Description: Identity derivation and get-or-create persistence of profiles.
// Purpose: Bring profiles into memory from an injected repository.
// Dependencies: crate::{core, interfaces}, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`ProfileStore::open`] validates the name, normalizes the base address,
//! derives the id, and probes the repository. A stored row wins over every
//! argument: the caller's `base` only takes effect when the row is created.
//!
//! Invariants:
//! - A [`Profile`] can only be mutated through the store, so every field
//!   satisfies its normalization rules when written.
//! - In-memory fields are updated before the persistence call. A failed
//!   mutation leaves memory ahead of storage; reload the profile to
//!   reconcile.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::AuthConfig;
use crate::core::AuthError;
use crate::core::Correction;
use crate::core::Endpoint;
use crate::core::EndpointError;
use crate::core::EndpointMap;
use crate::core::ProfileId;
use crate::core::normalize_base;
use crate::interfaces::ProfileRecord;
use crate::interfaces::ProfileRepository;
use crate::interfaces::RepositoryError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Profile lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Profile name was rejected.
    #[error("invalid profile name: {0}")]
    InvalidName(String),
    /// A row could not be created from the supplied values.
    #[error("insufficient info to create profile: missing {0}")]
    InsufficientInfo(&'static str),
    /// Auth strategy was rejected.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Endpoint definition was rejected.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    /// Repository failed.
    #[error("profile persistence failed: {0}")]
    Persistence(#[from] RepositoryError),
}

// ============================================================================
// SECTION: Profile
// ============================================================================

/// In-memory view of a stored profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Derived primary key.
    pub(crate) id: ProfileId,
    /// Profile name.
    pub(crate) name: String,
    /// Normalized base address or empty.
    pub(crate) base: String,
    /// Current auth strategy.
    pub(crate) auth: Option<AuthConfig>,
    /// Current endpoints by name.
    pub(crate) endpoints: EndpointMap,
    /// Corrections applied to caller input through this instance (not persisted).
    pub(crate) corrections: Vec<Correction>,
}

impl Profile {
    /// Builds a profile from a stored row.
    fn from_record(record: ProfileRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            base: record.base,
            auth: record.auth,
            endpoints: record.endpoints.unwrap_or_default(),
            corrections: Vec::new(),
        }
    }

    /// Returns the derived identifier.
    #[must_use]
    pub const fn id(&self) -> &ProfileId {
        &self.id
    }

    /// Returns the profile name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized base address, empty when unset.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the auth strategy, if one is configured.
    #[must_use]
    pub const fn auth(&self) -> Option<&AuthConfig> {
        self.auth.as_ref()
    }

    /// Returns all endpoints keyed by name.
    #[must_use]
    pub const fn endpoints(&self) -> &EndpointMap {
        &self.endpoints
    }

    /// Returns a named endpoint.
    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.get(name)
    }

    /// Returns corrections applied to input given to this instance.
    #[must_use]
    pub fn corrections(&self) -> &[Correction] {
        &self.corrections
    }

    /// Records and logs corrections against this profile.
    pub(crate) fn note_corrections(&mut self, corrections: &[Correction]) {
        for correction in corrections {
            correction.emit(&self.name);
        }
        self.corrections.extend_from_slice(corrections);
    }
}

// ============================================================================
// SECTION: Profile Store
// ============================================================================

/// Profile lifecycle driver over an injected repository.
#[derive(Debug, Clone)]
pub struct ProfileStore<R> {
    /// Backing repository.
    pub(crate) repository: R,
}

impl<R: ProfileRepository> ProfileStore<R> {
    /// Creates a store over a repository opened by the caller.
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self {
            repository,
        }
    }

    /// Returns the backing repository.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Brings a profile into memory, creating its row when none exists.
    ///
    /// A stored row overrides `base`; the argument only seeds a new row.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidName`] for an empty name and
    /// [`ProfileError::Persistence`] when the repository fails.
    pub fn open(&self, name: &str, base: &str) -> Result<Profile, ProfileError> {
        if name.is_empty() {
            return Err(ProfileError::InvalidName("profile name must be non-empty".to_string()));
        }
        let normalized = normalize_base(base);
        let id = ProfileId::derive(name);
        let mut profile = match self.load(&id)? {
            Some(profile) => profile,
            None => self.create(id, name, &normalized.value)?,
        };
        profile.note_corrections(&normalized.corrections);
        Ok(profile)
    }

    /// Loads a stored profile. `None` means no row exists.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Persistence`] when the row cannot be read.
    pub fn load(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileError> {
        let record = self.repository.load(id)?;
        tracing::debug!(profile_id = %id, found = record.is_some(), "profile lookup");
        Ok(record.map(Profile::from_record))
    }

    /// Inserts a new profile row with no auth and no endpoints.
    ///
    /// `base` is normalized before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InsufficientInfo`] when `id` or `name` is empty
    /// and [`ProfileError::Persistence`] when the insert fails.
    pub fn create(&self, id: ProfileId, name: &str, base: &str) -> Result<Profile, ProfileError> {
        if id.is_empty() {
            return Err(ProfileError::InsufficientInfo("id"));
        }
        if name.is_empty() {
            return Err(ProfileError::InsufficientInfo("name"));
        }
        let normalized = normalize_base(base);
        let record = ProfileRecord {
            id,
            name: name.to_string(),
            base: normalized.value,
            auth: None,
            endpoints: None,
        };
        self.repository.insert(&record)?;
        tracing::info!(profile_id = %record.id, name, "profile created");
        let mut profile = Profile::from_record(record);
        profile.note_corrections(&normalized.corrections);
        Ok(profile)
    }
}
