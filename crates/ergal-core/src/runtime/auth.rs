// crates/ergal-core/src/runtime/auth.rs
// ============================================================================
// Module: Ergal Auth Configurator
// Description: Replaces and persists a profile's authentication strategy.
// Purpose: Apply validated auth strategies to live profiles.
// Dependencies: crate::{core, interfaces, runtime::profile_store}, tracing
// ============================================================================

//! ## Overview
//! A new strategy replaces the old one in full; fields are never merged. The
//! in-memory profile is updated first and the row second.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::AuthConfig;
use crate::core::AuthParams;
use crate::interfaces::ProfileRepository;
use crate::runtime::profile_store::Profile;
use crate::runtime::profile_store::ProfileError;
use crate::runtime::profile_store::ProfileStore;

// ============================================================================
// SECTION: Auth Configurator
// ============================================================================

impl<R: ProfileRepository> ProfileStore<R> {
    /// Replaces the profile's auth strategy and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Persistence`] when the update fails. The
    /// in-memory profile already holds `auth` at that point.
    pub fn set_auth(&self, profile: &mut Profile, auth: AuthConfig) -> Result<(), ProfileError> {
        let method = auth.method();
        profile.auth = Some(auth.clone());
        self.repository.update_auth(&profile.id, &auth)?;
        tracing::info!(profile_id = %profile.id, method = method.as_str(), "auth updated");
        Ok(())
    }

    /// Builds a strategy from a method name and parameters, then applies it.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Auth`] when the method is unsupported or a
    /// required parameter is missing (nothing is changed), and
    /// [`ProfileError::Persistence`] when the update fails.
    pub fn set_auth_params(
        &self,
        profile: &mut Profile,
        method: &str,
        params: &AuthParams,
    ) -> Result<(), ProfileError> {
        let auth = AuthConfig::from_params(method, params)?;
        self.set_auth(profile, auth)
    }
}
