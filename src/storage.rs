use std::{collections::HashMap, fs, path::PathBuf};

use parking_lot::Mutex;

/// Durable string-keyed storage the favorites library persists through.
/// Synchronous, survives restarts when backed by disk.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// One file per key under an application directory.  Reads degrade to
/// `None`, write failures are logged and swallowed; persistence is never
/// fatal to the caller.
pub struct DiskStorage {
    base: PathBuf,
}

impl DiskStorage {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl Storage for DiskStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.base) {
            log::error!("failed to create storage dir: {:?}", err);
        }
        if let Err(err) = fs::write(self.key_path(key), value) {
            log::error!("failed to save to storage: {:?}", err);
        }
    }
}

/// In-memory storage for tests and hosts without a writable disk.
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
    }
}
