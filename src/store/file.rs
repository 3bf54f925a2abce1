//! Flat JSON files on disk: key `a/b` lives at `<root>/a/b.json`.

use super::{validate_key, DocumentStore, StoreError};
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Use `root` as the data directory. It is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(key).with_extension(EXTENSION))
    }

    fn collect_keys(&self, dir: &Path, keys: &mut Vec<String>) -> Result<(), StoreError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                self.collect_keys(&path, keys)?;
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Ok(relative) = path.with_extension("").strip_prefix(&self.root).map(Path::to_path_buf)
            else {
                continue;
            };
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if validate_key(&key).is_ok() {
                keys.push(key);
            }
        }
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl DocumentStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => {
                log::debug!("Read {} ({} bytes)", path.display(), bytes.len());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes a sibling temp file, then renames it over the document.
    fn put(&self, key: &str, document: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        if let Err(e) = write_synced(&tmp, document).and_then(|()| fs::rename(&tmp, &path)) {
            match fs::remove_file(&tmp) {
                Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => {
                    log::warn!("Could not remove {}: {cleanup}", tmp.display());
                }
                _ => {}
            }
            return Err(e.into());
        }
        log::debug!("Wrote {} ({} bytes)", path.display(), document.len());
        Ok(())
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        self.collect_keys(&self.root, &mut keys)?;
        keys.retain(|k| k.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }
}
