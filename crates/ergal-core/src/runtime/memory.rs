// crates/ergal-core/src/runtime/memory.rs
// ============================================================================
// Module: Ergal In-Memory Repository
// Description: Simple in-memory profile repository for tests and examples.
// Purpose: Provide a deterministic repository implementation without external deps.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of
//! [`ProfileRepository`] for tests and local demos. It is not intended for
//! production use. Clones share the same rows.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::core::AuthConfig;
use crate::core::EndpointMap;
use crate::core::ProfileId;
use crate::interfaces::ProfileRecord;
use crate::interfaces::ProfileRepository;
use crate::interfaces::RepositoryError;

// ============================================================================
// SECTION: In-Memory Repository
// ============================================================================

/// In-memory profile repository for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileRepository {
    /// Rows keyed by profile id, protected by a mutex.
    rows: Arc<Mutex<BTreeMap<ProfileId, ProfileRecord>>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] when the mutex is poisoned.
    pub fn row_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.rows()?.len())
    }

    /// Removes a row out of band, mirroring external deletion.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] when the mutex is poisoned.
    pub fn remove(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        Ok(self.rows()?.remove(id))
    }

    /// Locks the row map.
    fn rows(&self) -> Result<MutexGuard<'_, BTreeMap<ProfileId, ProfileRecord>>, RepositoryError> {
        self.rows
            .lock()
            .map_err(|_| RepositoryError::Io("profile repository mutex poisoned".to_string()))
    }

    /// Applies a mutation to an existing row.
    fn update_row(
        &self,
        id: &ProfileId,
        apply: impl FnOnce(&mut ProfileRecord),
    ) -> Result<(), RepositoryError> {
        let mut rows = self.rows()?;
        let row = rows
            .get_mut(id)
            .ok_or_else(|| RepositoryError::Invalid(format!("no profile row for id {id}")))?;
        apply(row);
        Ok(())
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn load(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        Ok(self.rows()?.get(id).cloned())
    }

    fn insert(&self, record: &ProfileRecord) -> Result<(), RepositoryError> {
        let mut rows = self.rows()?;
        if rows.contains_key(&record.id) {
            let message = format!("profile row exists for id {}", record.id);
            return Err(RepositoryError::Invalid(message));
        }
        rows.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn update_auth(&self, id: &ProfileId, auth: &AuthConfig) -> Result<(), RepositoryError> {
        self.update_row(id, |row| row.auth = Some(auth.clone()))
    }

    fn update_endpoints(
        &self,
        id: &ProfileId,
        endpoints: &EndpointMap,
    ) -> Result<(), RepositoryError> {
        self.update_row(id, |row| row.endpoints = Some(endpoints.clone()))
    }

    fn readiness(&self) -> Result<(), RepositoryError> {
        self.rows().map(|_| ())
    }
}
