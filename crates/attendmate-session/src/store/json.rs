//! Durable key-value store backed by a JSON file.
//!
//! The whole key set lives in one flat JSON object, loaded once at open and
//! rewritten on every commit. The default location is
//! `~/.config/attendmate/login_prefs.json`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use super::{KeyValueStore, Value};

/// Application name used for the preference directory path
const APP_NAME: &str = "attendmate";

/// Preference file name
const PREFS_FILE: &str = "login_prefs.json";

/// Key-value store persisted as a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: HashMap<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing entries if the file exists.
    ///
    /// A file that cannot be read or parsed is logged and treated as empty;
    /// readers then see defaults, and the next commit rewrites it.
    pub fn open(path: PathBuf) -> Self {
        let entries = match Self::load(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load preference file, starting empty");
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    /// Open the store at the platform default location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Self::default_path()?))
    }

    fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(PREFS_FILE))
    }

    fn load(path: &Path) -> Result<HashMap<String, Value>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(path)
            .context("Failed to read preference file")?;
        serde_json::from_str(&contents).context("Failed to parse preference file")
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn commit(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, contents)
            .context("Failed to write preference file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join(PREFS_FILE)
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(store_path(&dir));
        assert_eq!(store.get("cookie"), None);
    }

    #[test]
    fn test_commit_then_reopen_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);

        let mut store = JsonFileStore::open(path.clone());
        store.put_str("cookie", "abc");
        store.put_i64("cookieExpiry", 1000);
        store.put_bool("hasSeenPolicy", true);
        store.commit().unwrap();

        let reopened = JsonFileStore::open(path);
        assert_eq!(reopened.get_str("cookie").as_deref(), Some("abc"));
        assert_eq!(reopened.get_i64("cookieExpiry"), Some(1000));
        assert_eq!(reopened.get_bool("hasSeenPolicy"), Some(true));
    }

    #[test]
    fn test_remove_is_durable() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);

        let mut store = JsonFileStore::open(path.clone());
        store.put_str("email", "scout@example.org");
        store.commit().unwrap();

        store.remove("email");
        store.commit().unwrap();

        let reopened = JsonFileStore::open(path);
        assert_eq!(reopened.get("email"), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(path);
        assert_eq!(store.get("cookie"), None);
    }

    #[test]
    fn test_commit_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join(PREFS_FILE);

        let mut store = JsonFileStore::open(path.clone());
        store.put_bool("dataRetentionAgreed", true);
        store.commit().unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_backing_file_is_flat_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);

        let mut store = JsonFileStore::open(path.clone());
        store.put_str("date", "05-08-2026");
        store.put_i64("cookieExpiry", -1);
        store.commit().unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["date"], "05-08-2026");
        assert_eq!(raw["cookieExpiry"], -1);
    }
}
