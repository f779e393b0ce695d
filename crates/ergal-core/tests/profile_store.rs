// crates/ergal-core/tests/profile_store.rs
// ============================================================================
// Module: Profile Store Tests
// Description: Get-or-create lifecycle, auth replacement, and endpoint storage.
// Purpose: Validate profile invariants against the in-memory repository.
// Dependencies: ergal-core
// ============================================================================

//! ## Overview
//! Lifecycle tests for [`ProfileStore`]:
//! - identity derivation and reload semantics
//! - base address corrections at construction
//! - auth replacement and validation failures
//! - endpoint normalization and overwrite semantics
//! - persistence failures and in-memory drift

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use ergal_core::AuthConfig;
use ergal_core::AuthError;
use ergal_core::AuthMethod;
use ergal_core::AuthParams;
use ergal_core::Correction;
use ergal_core::EndpointError;
use ergal_core::EndpointMap;
use ergal_core::InMemoryProfileRepository;
use ergal_core::ProfileError;
use ergal_core::ProfileId;
use ergal_core::ProfileRecord;
use ergal_core::ProfileRepository;
use ergal_core::ProfileStore;
use ergal_core::RepositoryError;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn store() -> ProfileStore<InMemoryProfileRepository> {
    ProfileStore::new(InMemoryProfileRepository::new())
}

/// Repository that reads from memory but rejects every write after creation.
#[derive(Default)]
struct ReadOnlyAfterInsert {
    inner: InMemoryProfileRepository,
}

impl ProfileRepository for ReadOnlyAfterInsert {
    fn load(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        self.inner.load(id)
    }

    fn insert(&self, record: &ProfileRecord) -> Result<(), RepositoryError> {
        self.inner.insert(record)
    }

    fn update_auth(&self, _id: &ProfileId, _auth: &AuthConfig) -> Result<(), RepositoryError> {
        Err(RepositoryError::Db("disk I/O error".to_string()))
    }

    fn update_endpoints(
        &self,
        _id: &ProfileId,
        _endpoints: &EndpointMap,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Db("disk I/O error".to_string()))
    }
}

/// Repository whose lookups always fail.
struct BrokenLookup;

impl ProfileRepository for BrokenLookup {
    fn load(&self, _id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        Err(RepositoryError::Db("database is locked".to_string()))
    }

    fn insert(&self, _record: &ProfileRecord) -> Result<(), RepositoryError> {
        panic!("insert must not run after a failed lookup");
    }

    fn update_auth(&self, _id: &ProfileId, _auth: &AuthConfig) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn update_endpoints(
        &self,
        _id: &ProfileId,
        _endpoints: &EndpointMap,
    ) -> Result<(), RepositoryError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Construction
// ============================================================================

#[test]
fn open_creates_row_with_derived_id() {
    let store = store();
    let profile = store.open("github", "https://api.github.com").unwrap();
    assert_eq!(profile.id(), &ProfileId::derive("github"));
    assert_eq!(profile.name(), "github");
    assert_eq!(profile.base(), "https://api.github.com");
    assert!(profile.auth().is_none());
    assert!(profile.endpoints().is_empty());

    let row = store.repository().load(profile.id()).unwrap().unwrap();
    assert_eq!(row.auth, None);
    assert_eq!(row.endpoints, None);
}

#[test]
fn empty_name_is_rejected() {
    let err = store().open("", "https://example.com").unwrap_err();
    assert!(matches!(err, ProfileError::InvalidName(_)));
}

#[test]
fn insecure_base_is_cleared_with_warning() {
    let profile = store().open("X", "http://example.com/").unwrap();
    assert_eq!(profile.base(), "");
    assert_eq!(profile.corrections(), &[Correction::InsecureBase]);
}

#[test]
fn trailing_separator_is_stripped_from_base() {
    let profile = store().open("X", "https://example.com/").unwrap();
    assert_eq!(profile.base(), "https://example.com");
    assert_eq!(profile.corrections(), &[Correction::BaseTrailingSeparator]);
}

#[test]
fn reopen_returns_persisted_state_over_arguments() {
    let store = store();
    let mut first = store.open("stripe", "https://api.stripe.com").unwrap();
    let auth = AuthConfig::key_header("sk_test", "Authorization").unwrap();
    store.set_auth(&mut first, auth).unwrap();
    store.add_endpoint(&mut first, "charges", "/v1/charges", "GET").unwrap();

    let second = store.open("stripe", "https://other.example.org").unwrap();
    assert_eq!(second.id(), first.id());
    assert_eq!(second.base(), "https://api.stripe.com");
    assert_eq!(second.auth(), first.auth());
    assert_eq!(second.endpoints(), first.endpoints());
    assert_eq!(store.repository().row_count().unwrap(), 1);
}

#[test]
fn row_removed_out_of_band_is_recreated() {
    let store = store();
    let profile = store.open("gone", "https://gone.example.com").unwrap();
    store.repository().remove(profile.id()).unwrap();
    let again = store.open("gone", "https://new.example.com").unwrap();
    assert_eq!(again.base(), "https://new.example.com");
}

#[test]
fn lookup_failure_is_fatal() {
    let store = ProfileStore::new(BrokenLookup);
    let err = store.open("any", "").unwrap_err();
    let expected = RepositoryError::Db("database is locked".to_string());
    assert_eq!(err, ProfileError::Persistence(expected));
}

#[test]
fn create_requires_id_and_name() {
    let store = store();
    assert_eq!(
        store.create(ProfileId::new(""), "name", "").unwrap_err(),
        ProfileError::InsufficientInfo("id")
    );
    assert_eq!(
        store.create(ProfileId::derive("x"), "", "").unwrap_err(),
        ProfileError::InsufficientInfo("name")
    );
}

#[test]
fn duplicate_create_is_a_persistence_error() {
    let store = store();
    store.open("dup", "").unwrap();
    let err = store.create(ProfileId::derive("dup"), "dup", "").unwrap_err();
    assert!(matches!(err, ProfileError::Persistence(RepositoryError::Invalid(_))));
}

// ============================================================================
// SECTION: Auth
// ============================================================================

#[test]
fn set_auth_replaces_previous_strategy() {
    let store = store();
    let mut profile = store.open("svc", "https://svc.example.com").unwrap();
    store.set_auth(&mut profile, AuthConfig::basic("a", "b").unwrap()).unwrap();
    let params = AuthParams::new().with("key", "k1").with("name", "api_key");
    store.set_auth_params(&mut profile, "key-query", &params).unwrap();

    let expected = AuthConfig::key_query("k1", "api_key").unwrap();
    assert_eq!(profile.auth(), Some(&expected));
    let row = store.repository().load(profile.id()).unwrap().unwrap();
    assert_eq!(row.auth, Some(expected));
}

#[test]
fn missing_parameter_leaves_profile_untouched() {
    let store = store();
    let mut profile = store.open("svc", "").unwrap();
    let params = AuthParams::new().with("username", "a");
    let err = store.set_auth_params(&mut profile, "basic", &params).unwrap_err();
    assert_eq!(
        err,
        ProfileError::Auth(AuthError::MissingParameter {
            method: AuthMethod::Basic,
            parameter: "password",
        })
    );
    assert!(profile.auth().is_none());
}

#[test]
fn unsupported_method_is_rejected() {
    let store = store();
    let mut profile = store.open("svc", "").unwrap();
    let err = store.set_auth_params(&mut profile, "oauth2", &AuthParams::new()).unwrap_err();
    assert_eq!(err, ProfileError::Auth(AuthError::UnsupportedAuthMethod("oauth2".to_string())));
}

#[test]
fn failed_auth_persist_leaves_memory_ahead_of_storage() {
    let store = ProfileStore::new(ReadOnlyAfterInsert::default());
    let mut profile = store.open("drift", "https://drift.example.com").unwrap();
    let auth = AuthConfig::basic("u", "p").unwrap();
    let err = store.set_auth(&mut profile, auth.clone()).unwrap_err();
    assert!(matches!(err, ProfileError::Persistence(_)));
    assert_eq!(profile.auth(), Some(&auth));
    let reloaded = store.open("drift", "").unwrap();
    assert!(reloaded.auth().is_none());
}

// ============================================================================
// SECTION: Endpoints
// ============================================================================

#[test]
fn endpoint_paths_are_normalized_on_write() {
    let store = store();
    let mut profile = store.open("api", "https://api.example.com").unwrap();
    let corrections = store.add_endpoint(&mut profile, "users", "users", "GET").unwrap();
    assert_eq!(corrections, vec![Correction::PathMissingRoot]);
    assert_eq!(profile.endpoint("users").unwrap().path, "/users");

    store.add_endpoint(&mut profile, "users", "/users/", "GET").unwrap();
    assert_eq!(profile.endpoint("users").unwrap().path, "/users");
}

#[test]
fn same_name_overwrites_and_whole_map_is_persisted() {
    let store = store();
    let mut profile = store.open("api", "https://api.example.com").unwrap();
    store.add_endpoint(&mut profile, "list", "/items", "GET").unwrap();
    store.add_endpoint(&mut profile, "create", "/items", "POST").unwrap();
    store.add_endpoint(&mut profile, "list", "/v2/items", "GET").unwrap();

    let row = store.repository().load(profile.id()).unwrap().unwrap();
    let endpoints = row.endpoints.unwrap();
    assert_eq!(endpoints.len(), 2);
    assert_eq!(endpoints["list"].path, "/v2/items");
    assert_eq!(endpoints["create"].method, "POST");
}

#[test]
fn endpoint_arguments_are_required() {
    let store = store();
    let mut profile = store.open("api", "").unwrap();
    assert_eq!(
        store.add_endpoint(&mut profile, "", "/x", "GET").unwrap_err(),
        ProfileError::Endpoint(EndpointError::IncompleteArgs("name"))
    );
    assert_eq!(
        store.add_endpoint(&mut profile, "x", "", "GET").unwrap_err(),
        ProfileError::Endpoint(EndpointError::IncompleteArgs("path"))
    );
    assert_eq!(
        store.add_endpoint(&mut profile, "x", "/x", "").unwrap_err(),
        ProfileError::Endpoint(EndpointError::IncompleteArgs("method"))
    );
    assert!(profile.endpoints().is_empty());
}

#[test]
fn endpoint_update_for_removed_row_fails() {
    let repository = InMemoryProfileRepository::new();
    let store = ProfileStore::new(repository.clone());
    let mut profile = store.open("partial", "https://partial.example.com").unwrap();
    store.set_auth(&mut profile, AuthConfig::basic("u", "p").unwrap()).unwrap();
    repository.remove(profile.id()).unwrap();
    let err = store.add_endpoint(&mut profile, "x", "/x", "GET").unwrap_err();
    assert!(matches!(err, ProfileError::Persistence(RepositoryError::Invalid(_))));
}
