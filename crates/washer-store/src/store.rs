//! # Snapshot Store
//!
//! Persists a [`Company`] to one JSON file and reads it back.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  persist(&company)                                                      │
//! │       │                                                                 │
//! │       ├── company.snapshot()            ← both blobs, one capture       │
//! │       ├── encode to JSON                                                │
//! │       ├── write .washer_company.json.<uuid>.tmp (same directory)        │
//! │       ├── flush + sync_all                                              │
//! │       ├── rename over washer_company.json                               │
//! │       └── sync the directory (unix)                                     │
//! │                                                                         │
//! │  A crash at any step leaves either the old file or the new one.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read Path
//! ```text
//! restore()
//!    ├── file absent?            → Ok(None)
//!    ├── header schema_version   → UnsupportedVersion if newer than this build
//!    ├── decode full snapshot    → Corrupt on bad JSON
//!    └── Company::restore        → Corrupt on invariant violations
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;
use washer_core::{Company, Snapshot, SnapshotHeader, SNAPSHOT_SCHEMA_VERSION};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Reads and writes the company snapshot file.
///
/// ## Example
/// ```rust,ignore
/// let store = SnapshotStore::new(StoreConfig::load_or_default(None));
/// let mut company = store.restore_or_default();
/// company.add_customer("Jane Doe", "555-1212");
/// store.persist(&company)?;
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    config: StoreConfig,
}

impl SnapshotStore {
    pub fn new(config: StoreConfig) -> Self {
        SnapshotStore { config }
    }

    /// Shorthand for a store at `path` with default settings.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig::new(path))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config.snapshot_path
    }

    /// Whether a snapshot file is present.
    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    // =========================================================================
    // Persist
    // =========================================================================

    /// Writes the full company state, replacing any previous snapshot.
    ///
    /// ## Returns
    /// * `Ok(())` - Snapshot file and its directory entry synced to disk. On
    ///   platforms without directory sync the rename itself is not synced.
    /// * `Err(StoreError::Encode)` - JSON encoding failed
    /// * `Err(StoreError::Io)` - Directory, write, sync or rename failed. A
    ///   failure before the rename leaves the previous snapshot (if any)
    ///   intact; a failed directory sync leaves the new one in place but
    ///   possibly not durable.
    pub fn persist(&self, company: &Company) -> StoreResult<()> {
        let snapshot = company.snapshot();
        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        let path = self.path();
        let dir = parent_dir(path);
        if self.config.create_dirs {
            fs::create_dir_all(&dir)?;
        }

        let tmp_path = dir.join(temp_file_name(path));
        if let Err(e) = write_synced(&tmp_path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        sync_dir(&dir)?;

        info!(
            path = %path.display(),
            bytes = bytes.len(),
            washers = snapshot.company.catalogue.len(),
            customers = snapshot.company.customers.len(),
            next_customer_id = snapshot.identifiers.next_id,
            "Company snapshot saved"
        );
        Ok(())
    }

    // =========================================================================
    // Restore
    // =========================================================================

    /// Reads the snapshot back into a company.
    ///
    /// ## Returns
    /// * `Ok(Some(Company))` - Restored state
    /// * `Ok(None)` - No snapshot file yet
    /// * `Err(StoreError::UnsupportedVersion)` - Written by a newer build
    /// * `Err(StoreError::Corrupt)` - Unreadable JSON or inconsistent content
    /// * `Err(StoreError::Io)` - File exists but could not be read
    pub fn restore(&self) -> StoreResult<Option<Company>> {
        let path = self.path();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No snapshot file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let header: SnapshotHeader = serde_json::from_slice(&bytes).map_err(StoreError::corrupt)?;
        if !header.is_supported() {
            return Err(StoreError::UnsupportedVersion {
                found: header.schema_version,
                supported: SNAPSHOT_SCHEMA_VERSION,
            });
        }

        let snapshot: Snapshot = serde_json::from_slice(&bytes).map_err(StoreError::corrupt)?;
        debug!(
            path = %path.display(),
            schema_version = snapshot.schema_version,
            saved_at = %snapshot.saved_at,
            "Snapshot decoded"
        );

        let company = Company::restore(snapshot)?;
        Ok(Some(company))
    }

    /// Startup helper: restores, or starts empty when that is not possible.
    ///
    /// A missing file is normal on first run; every other failure is logged
    /// as a warning before falling back.
    pub fn restore_or_default(&self) -> Company {
        match self.restore() {
            Ok(Some(company)) => company,
            Ok(None) => {
                info!(path = %self.path().display(), "No saved company, starting empty");
                Company::new()
            }
            Err(e) => {
                warn!(
                    path = %self.path().display(),
                    error = %e,
                    "Failed to restore company. Starting empty."
                );
                Company::new()
            }
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn temp_file_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| crate::config::SNAPSHOT_FILE_NAME.to_string());
    format!(".{}.{}.tmp", base, Uuid::new_v4().simple())
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_all()
}

/// Flushes directory metadata so a completed rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use washer_core::{CustomerId, InventoryOutcome, Money};

    /// Unique scratch directory, removed on drop.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("washer-store-{}", Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            ScratchDir(dir)
        }

        fn store(&self) -> SnapshotStore {
            SnapshotStore::at(self.0.join("company.json"))
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn populated_company() -> Company {
        let mut company = Company::new();
        company
            .add_washer("Acme", "X100", Money::from_major_minor(499, 99))
            .unwrap();
        company
            .add_washer("Zeta", "Z1", Money::from_cents(30000))
            .unwrap();
        assert_eq!(
            company.add_inventory("Acme", "X100", 10),
            InventoryOutcome::OperationCompleted
        );
        company.add_inventory("Zeta", "Z1", 2);
        company.add_customer("Jane Doe", "555-1212");
        company.add_customer("John Roe", "555-3434");
        company.purchase_washer("1", "Acme", "X100", 3).unwrap();
        company
    }

    #[test]
    fn test_persist_restore_round_trip() {
        let scratch = ScratchDir::new();
        let store = scratch.store();
        let company = populated_company();

        store.persist(&company).unwrap();
        assert!(store.exists());

        let restored = store.restore().unwrap().unwrap();
        assert_eq!(restored, company);

        let washer = restored.find_washer("Acme", "X100").unwrap();
        assert_eq!(washer.quantity, 7);
        assert_eq!(washer.price, Money::from_cents(49999));
        let jane = restored.search_customer("1").unwrap();
        assert_eq!(jane.name, "Jane Doe");
        assert_eq!(jane.phone, "555-1212");
        assert_eq!(jane.purchases.len(), 1);
        assert_eq!(restored.next_customer_id(), 3);
    }

    #[test]
    fn test_identifiers_continue_after_restore() {
        let scratch = ScratchDir::new();
        let store = scratch.store();
        let mut company = Company::new();
        let issued: Vec<CustomerId> = (0..4)
            .map(|i| company.add_customer(&format!("C{}", i), "555").id)
            .collect();
        store.persist(&company).unwrap();

        let mut restored = store.restore().unwrap().unwrap();
        let fresh = restored.add_customer("Late", "555").id;
        assert!(issued.iter().all(|id| fresh > *id));
    }

    #[test]
    fn test_restore_absent_file() {
        let scratch = ScratchDir::new();
        let store = scratch.store();
        assert!(!store.exists());
        assert!(store.restore().unwrap().is_none());
        assert_eq!(store.restore_or_default(), Company::new());
    }

    #[test]
    fn test_restore_corrupt_file() {
        let scratch = ScratchDir::new();
        let store = scratch.store();

        fs::write(store.path(), b"{ not json").unwrap();
        assert!(matches!(store.restore(), Err(StoreError::Corrupt(_))));
        assert_eq!(store.restore_or_default(), Company::new());

        fs::write(
            store.path(),
            br#"{"schema_version":1,"saved_at":"not a date","company":{},"identifiers":{"next_id":1}}"#,
        )
        .unwrap();
        assert!(matches!(store.restore(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_restore_inconsistent_content() {
        let scratch = ScratchDir::new();
        let store = scratch.store();

        let mut snapshot = populated_company().snapshot();
        snapshot.company.customers.clear();
        fs::write(store.path(), serde_json::to_vec(&snapshot).unwrap()).unwrap();

        assert!(matches!(store.restore(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_restore_newer_version() {
        let scratch = ScratchDir::new();
        let store = scratch.store();

        let mut snapshot = populated_company().snapshot();
        snapshot.schema_version = SNAPSHOT_SCHEMA_VERSION + 1;
        fs::write(store.path(), serde_json::to_vec(&snapshot).unwrap()).unwrap();

        match store.restore() {
            Err(StoreError::UnsupportedVersion { found, supported }) => {
                assert_eq!(found, SNAPSHOT_SCHEMA_VERSION + 1);
                assert_eq!(supported, SNAPSHOT_SCHEMA_VERSION);
            }
            other => panic!("expected UnsupportedVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_persist_replaces_previous_snapshot() {
        let scratch = ScratchDir::new();
        let store = scratch.store();

        let mut company = populated_company();
        store.persist(&company).unwrap();
        company.add_customer("Third", "555-0003");
        store.persist(&company).unwrap();

        let restored = store.restore().unwrap().unwrap();
        assert_eq!(restored.customers().len(), 3);

        let leftovers: Vec<_> = fs::read_dir(&scratch.0)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_persist_creates_directories() {
        let scratch = ScratchDir::new();
        let store = SnapshotStore::at(scratch.0.join("nested").join("deeper").join("c.json"));
        store.persist(&Company::new()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_persist_without_create_dirs_fails_on_missing_dir() {
        let scratch = ScratchDir::new();
        let config = StoreConfig::new(scratch.0.join("missing").join("c.json")).create_dirs(false);
        let store = SnapshotStore::new(config);

        assert!(matches!(store.persist(&Company::new()), Err(StoreError::Io(_))));
        assert!(!store.exists());
    }

    #[test]
    fn test_sync_dir() {
        let scratch = ScratchDir::new();
        sync_dir(&scratch.0).unwrap();

        #[cfg(unix)]
        assert!(sync_dir(&scratch.0.join("missing")).is_err());
    }

    #[test]
    fn test_snapshot_file_layout() {
        let scratch = ScratchDir::new();
        let store = scratch.store();
        store.persist(&populated_company()).unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(value["schema_version"], SNAPSHOT_SCHEMA_VERSION);
        assert_eq!(value["identifiers"]["next_id"], 3);
        assert_eq!(value["company"]["catalogue"].as_array().unwrap().len(), 2);
        assert_eq!(value["company"]["customers"].as_array().unwrap().len(), 2);
        assert!(value["saved_at"].is_string());
    }
}
