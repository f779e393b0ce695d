// crates/ergal-core/src/runtime/endpoints.rs
// ============================================================================
// Module: Ergal Endpoint Registry
// Description: Adds normalized endpoints to a profile and persists the full map.
// Purpose: Keep stored endpoint definitions normalized at write time.
// Dependencies: crate::{core, interfaces, runtime::profile_store}, tracing
// ============================================================================

//! ## Overview
//! Endpoints are keyed by name; adding an existing name overwrites it. The
//! whole map is written back on every addition. There is no removal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Correction;
use crate::core::Endpoint;
use crate::core::EndpointError;
use crate::interfaces::ProfileRepository;
use crate::runtime::profile_store::Profile;
use crate::runtime::profile_store::ProfileError;
use crate::runtime::profile_store::ProfileStore;

// ============================================================================
// SECTION: Endpoint Registry
// ============================================================================

impl<R: ProfileRepository> ProfileStore<R> {
    /// Adds or replaces a named endpoint and persists the endpoint map.
    ///
    /// Returns the corrections applied to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Endpoint`] when an argument is empty or the
    /// path cannot be normalized (nothing is changed), and
    /// [`ProfileError::Persistence`] when the update fails.
    pub fn add_endpoint(
        &self,
        profile: &mut Profile,
        name: &str,
        path: &str,
        method: &str,
    ) -> Result<Vec<Correction>, ProfileError> {
        if name.is_empty() {
            return Err(EndpointError::IncompleteArgs("name").into());
        }
        let normalized = Endpoint::new(path, method)?;
        profile.note_corrections(&normalized.corrections);
        let stored_path = normalized.value.path.clone();
        profile.endpoints.insert(name.to_string(), normalized.value);
        self.repository.update_endpoints(&profile.id, &profile.endpoints)?;
        tracing::info!(
            profile_id = %profile.id,
            endpoint = name,
            path = %stored_path,
            "endpoint stored"
        );
        Ok(normalized.corrections)
    }
}
