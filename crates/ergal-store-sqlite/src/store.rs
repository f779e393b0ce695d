// crates/ergal-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Profile Repository
// Description: Durable ProfileRepository backed by SQLite.
// Purpose: Persist profile rows with JSON-encoded auth and endpoint columns.
// Dependencies: ergal-core, rusqlite, serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! This module implements [`ProfileRepository`] over one `SQLite` table keyed
//! by the derived profile id. `auth` and `endpoints` are stored as JSON text
//! and stay `NULL` until first written. Rows are decoded on load and fail
//! closed as [`SqliteStoreError::Corrupt`] when their JSON cannot be read.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use ergal_core::AuthConfig;
use ergal_core::EndpointMap;
use ergal_core::ProfileId;
use ergal_core::ProfileRecord;
use ergal_core::ProfileRepository;
use ergal_core::RepositoryError;
use rusqlite::Connection;
use rusqlite::ErrorCode;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name of the profile table.
pub const PROFILE_TABLE: &str = "Profile";
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode.
    #[default]
    Wal,
    /// Delete journal mode.
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode.
    #[default]
    Full,
    /// Normal synchronous mode.
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` profile repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Creates a config for the given path with default pragmas.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }

    /// Checks the database path against emptiness and length limits.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError::Invalid`] when the path is unusable.
    pub fn validate(&self) -> Result<(), SqliteStoreError> {
        validate_store_path(&self.path)
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Stored row could not be decoded.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Invalid store data or request.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for RepositoryError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Db(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
        }
    }
}

/// Maps an engine error, surfacing constraint violations as invalid requests.
fn db_error(err: &rusqlite::Error) -> SqliteStoreError {
    if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
        return SqliteStoreError::Invalid(err.to_string());
    }
    SqliteStoreError::Db(err.to_string())
}

// ============================================================================
// SECTION: Repository
// ============================================================================

/// `SQLite`-backed profile repository.
///
/// Cloning shares the underlying connection.
#[derive(Clone)]
pub struct SqliteProfileRepository {
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteProfileRepository {
    /// Opens an `SQLite`-backed profile repository.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        config.validate()?;
        ensure_parent_dir(&config.path)?;
        let connection = open_connection(config)?;
        initialize_schema(&connection)?;
        tracing::debug!(
            path = %config.path.display(),
            journal_mode = config.journal_mode.pragma_value(),
            sync_mode = config.sync_mode.pragma_value(),
            "sqlite profile repository opened"
        );
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the shared connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection.lock().map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))
    }

    /// Loads and decodes a profile row.
    fn load_row(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, SqliteStoreError> {
        let row = {
            let guard = self.lock()?;
            guard
                .query_row(
                    "SELECT id, name, base, auth, endpoints FROM Profile WHERE id = ?1",
                    params![id.as_str()],
                    |row| {
                        let id: String = row.get(0)?;
                        let name: String = row.get(1)?;
                        let base: String = row.get(2)?;
                        let auth: Option<String> = row.get(3)?;
                        let endpoints: Option<String> = row.get(4)?;
                        Ok((id, name, base, auth, endpoints))
                    },
                )
                .optional()
                .map_err(|err| db_error(&err))?
        };
        let Some((row_id, name, base, auth, endpoints)) = row else {
            return Ok(None);
        };
        let auth = auth
            .map(|text| serde_json::from_str::<AuthConfig>(&text))
            .transpose()
            .map_err(|err| {
                SqliteStoreError::Corrupt(format!("auth column for profile {row_id}: {err}"))
            })?;
        let endpoints = endpoints
            .map(|text| serde_json::from_str::<EndpointMap>(&text))
            .transpose()
            .map_err(|err| {
                SqliteStoreError::Corrupt(format!("endpoints column for profile {row_id}: {err}"))
            })?;
        Ok(Some(ProfileRecord {
            id: ProfileId::from(row_id),
            name,
            base,
            auth,
            endpoints,
        }))
    }

    /// Inserts a new profile row.
    fn insert_row(&self, record: &ProfileRecord) -> Result<(), SqliteStoreError> {
        let auth = record.auth.as_ref().map(encode_json).transpose()?;
        let endpoints = record.endpoints.as_ref().map(encode_json).transpose()?;
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO Profile (id, name, base, auth, endpoints) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![record.id.as_str(), record.name, record.base, auth, endpoints],
            )
            .map_err(|err| db_error(&err))?;
        drop(guard);
        Ok(())
    }

    /// Replaces one JSON column of an existing row.
    fn update_column(
        &self,
        id: &ProfileId,
        column: Column,
        json: &str,
    ) -> Result<(), SqliteStoreError> {
        let statement = match column {
            Column::Auth => "UPDATE Profile SET auth = ?1 WHERE id = ?2",
            Column::Endpoints => "UPDATE Profile SET endpoints = ?1 WHERE id = ?2",
        };
        let guard = self.lock()?;
        let updated =
            guard.execute(statement, params![json, id.as_str()]).map_err(|err| db_error(&err))?;
        drop(guard);
        if updated == 0 {
            return Err(SqliteStoreError::Invalid(format!("no profile row for id {id}")));
        }
        Ok(())
    }
}

/// Updatable JSON columns.
#[derive(Debug, Clone, Copy)]
enum Column {
    /// The `auth` column.
    Auth,
    /// The `endpoints` column.
    Endpoints,
}

impl ProfileRepository for SqliteProfileRepository {
    fn load(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        self.load_row(id).map_err(RepositoryError::from)
    }

    fn insert(&self, record: &ProfileRecord) -> Result<(), RepositoryError> {
        self.insert_row(record).map_err(RepositoryError::from)
    }

    fn update_auth(&self, id: &ProfileId, auth: &AuthConfig) -> Result<(), RepositoryError> {
        let json = encode_json(auth)?;
        self.update_column(id, Column::Auth, &json).map_err(RepositoryError::from)
    }

    fn update_endpoints(
        &self,
        id: &ProfileId,
        endpoints: &EndpointMap,
    ) -> Result<(), RepositoryError> {
        let json = encode_json(endpoints)?;
        self.update_column(id, Column::Endpoints, &json).map_err(RepositoryError::from)
    }

    fn readiness(&self) -> Result<(), RepositoryError> {
        let guard = self.lock()?;
        guard
            .query_row("SELECT 1", params![], |row| row.get::<_, i64>(0))
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        drop(guard);
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serializes a column value to JSON text.
fn encode_json<T: serde::Serialize>(value: &T) -> Result<String, SqliteStoreError> {
    serde_json::to_string(value).map_err(|err| SqliteStoreError::Invalid(err.to_string()))
}

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let path_string = path.display().to_string();
    if path_string.trim().is_empty() {
        return Err(SqliteStoreError::Invalid("store path is empty".to_string()));
    }
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with the configured pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies journal, sync, and busy-timeout settings.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Creates the profile table when missing.
fn initialize_schema(connection: &Connection) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS Profile (
                id TEXT NOT NULL,
                name TEXT NOT NULL,
                base TEXT NOT NULL,
                auth TEXT,
                endpoints TEXT,
                PRIMARY KEY (id)
            );",
        )
        .map_err(|err| SqliteStoreError::Db(err.to_string()))
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

    use std::path::Path;

    use super::SqliteStoreConfig;
    use super::SqliteStoreError;
    use super::validate_store_path;

    #[test]
    fn overlong_component_is_rejected() {
        let long = "a".repeat(300);
        let err = validate_store_path(Path::new(&long)).unwrap_err();
        assert!(matches!(err, SqliteStoreError::Invalid(_)));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(validate_store_path(Path::new("")).is_err());
    }

    #[test]
    fn blank_path_is_rejected() {
        let config = SqliteStoreConfig::new("   ");
        assert!(matches!(config.validate(), Err(SqliteStoreError::Invalid(_))));
    }

    #[test]
    fn relative_file_path_is_accepted() {
        validate_store_path(Path::new("profiles.db")).unwrap();
    }
}
