use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use once_cell::sync::OnceCell;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    config::Config,
    core::{
        time::{Clock, SystemClock},
        utils::{ensure_dir, write_atomic, PathResolver},
    },
    errors::StoreError,
    ledger::Database,
};

use super::{Result, StoredRecord};

pub const DEFAULT_DATABASE_FILE: &str = "db.json";

/// JSON-file account store: `db.json` plus standalone record collections.
///
/// The database snapshot is loaded and validated on first use and cached for the
/// lifetime of the store; call [`JsonStore::clear_cache`] after the file changes on disk.
pub struct JsonStore {
    root: PathBuf,
    database_path: PathBuf,
    database: OnceCell<Database>,
    clock: Arc<dyn Clock>,
}

impl JsonStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        let database_path = root.join(DEFAULT_DATABASE_FILE);
        Ok(Self {
            root,
            database_path,
            database: OnceCell::new(),
            clock: Arc::new(SystemClock),
        })
    }

    /// Opens the store at the configured data directory.
    pub fn from_config(config: &Config, base: &Path) -> Result<Self> {
        let root = config
            .data_dir
            .clone()
            .unwrap_or_else(|| PathResolver::data_dir_in(base));
        Ok(Self::new(root)?.with_database_file(&config.database_file))
    }

    pub fn with_database_file(mut self, file_name: &str) -> Self {
        self.database_path = self.root.join(file_name);
        self.database = OnceCell::new();
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Returns the cached database snapshot, loading it on first access.
    pub fn database(&self) -> Result<&Database> {
        self.database
            .get_or_try_init(|| load_database_from_path(&self.database_path))
    }

    pub fn clear_cache(&mut self) {
        self.database = OnceCell::new();
    }

    /// Validates and writes a new snapshot, replacing the cached one.
    pub fn save_database(&mut self, database: Database) -> Result<()> {
        save_database_to_path(&database, &self.database_path)?;
        self.database = OnceCell::with_value(database);
        Ok(())
    }

    pub fn collection_path<T: StoredRecord>(&self) -> PathBuf {
        self.root.join(T::FILE_NAME)
    }

    pub fn all<T: StoredRecord>(&self) -> Result<Vec<T>> {
        read_collection(&self.collection_path::<T>())
    }

    pub fn get<T: StoredRecord>(&self, id: &str) -> Result<Option<T>> {
        Ok(self.all::<T>()?.into_iter().find(|item| item.id() == id))
    }

    /// Stores a new record under a fresh UUID and returns it.
    pub fn create<T: StoredRecord>(&self, draft: T::Draft) -> Result<T> {
        let record = T::from_draft(Uuid::new_v4().to_string(), draft, self.clock.now());
        reject_issues(record.issues())?;
        let mut items = self.all::<T>()?;
        items.push(record.clone());
        write_collection(&self.collection_path::<T>(), &items)?;
        debug!("created {} record {}", T::FILE_NAME, record.id());
        Ok(record)
    }

    /// Applies `patch` to the record with `id`; `Ok(None)` when no such record exists.
    pub fn update<T: StoredRecord>(&self, id: &str, patch: T::Patch) -> Result<Option<T>> {
        let mut items = self.all::<T>()?;
        let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
            return Ok(None);
        };
        item.apply_patch(patch);
        reject_issues(item.issues())?;
        let updated = item.clone();
        write_collection(&self.collection_path::<T>(), &items)?;
        Ok(Some(updated))
    }

    pub fn delete<T: StoredRecord>(&self, id: &str) -> Result<bool> {
        let mut items = self.all::<T>()?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Ok(false);
        }
        write_collection(&self.collection_path::<T>(), &items)?;
        Ok(true)
    }
}

pub fn load_database_from_path(path: &Path) -> Result<Database> {
    let data = fs::read_to_string(path)?;
    let database: Database = serde_json::from_str(&data)?;
    if let Err(issues) = database.validate() {
        warn!(
            "database {} failed validation with {} issue(s)",
            path.display(),
            issues.len()
        );
        return Err(StoreError::Validation(issues));
    }
    debug!(
        "loaded {} bank account(s) from {}",
        database.bank_accounts.len(),
        path.display()
    );
    Ok(database)
}

pub fn save_database_to_path(database: &Database, path: &Path) -> Result<()> {
    database.validate().map_err(StoreError::Validation)?;
    let json = serde_json::to_string_pretty(database)?;
    write_atomic(path, &json)?;
    Ok(())
}

fn read_collection<T: StoredRecord>(path: &Path) -> Result<Vec<T>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&data)?)
}

fn write_collection<T: StoredRecord>(path: &Path, items: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    write_atomic(path, &json)?;
    Ok(())
}

fn reject_issues(issues: Vec<String>) -> Result<()> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation(issues))
    }
}
