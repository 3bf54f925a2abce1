//! Server settings read from the environment.

use crate::store::{DocumentStore, FileStore, MemoryStore};
use chrono::TimeDelta;
use std::path::PathBuf;

/// Where documents are kept.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Storage {
    /// JSON files under a data directory.
    Files(PathBuf),
    /// Lost on restart.
    Memory,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: Storage,
    /// Used when a schedule request does not name a duration.
    pub match_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            storage: Storage::Files(PathBuf::from("data")),
            match_minutes: 30,
        }
    }
}

impl Config {
    /// Read `HOST`, `PORT`, `STORAGE` (`file` or `memory`), `DATA_DIR` and `MATCH_MINUTES`.
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = var("HOST").unwrap_or(defaults.host);
        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let storage = match var("STORAGE").as_deref() {
            Some("memory") => Storage::Memory,
            Some(other) if other != "file" => {
                log::warn!("Unknown STORAGE {other:?}, using files");
                Storage::Files(data_dir(&var))
            }
            _ => Storage::Files(data_dir(&var)),
        };
        let match_minutes = var("MATCH_MINUTES")
            .and_then(|m| m.parse().ok())
            .filter(|m| *m > 0)
            .unwrap_or(defaults.match_minutes);
        Self {
            host,
            port,
            storage,
            match_minutes,
        }
    }

    pub fn match_duration(&self) -> TimeDelta {
        TimeDelta::try_minutes(self.match_minutes).unwrap_or_else(|| TimeDelta::minutes(30))
    }

    pub fn open_store(&self) -> Box<dyn DocumentStore> {
        match &self.storage {
            Storage::Files(dir) => Box::new(FileStore::new(dir.clone())),
            Storage::Memory => Box::new(MemoryStore::new()),
        }
    }
}

fn data_dir(var: &impl Fn(&str) -> Option<String>) -> PathBuf {
    var("DATA_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("data"))
}
