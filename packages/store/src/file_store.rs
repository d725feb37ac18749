//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists each key as
//! its own file. It is used by native hosts (desktop, terminal) to retain the
//! catalog across restarts, standing in for the browser's `localStorage`.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── users.json
//! ├── recipes.json
//! ├── favorites.json
//! └── currentUser.json
//! ```
//!
//! Writes go to a temporary sibling file that is renamed over the key file, so a
//! reader sees either the old value or the new one, never a truncated file.
//!
//! ## Platform data directories
//!
//! [`FileStore::default_location`] resolves a base under [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/tarifhane/` |
//! | Linux | `~/.local/share/tarifhane/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\tarifhane\` |

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::kv::KeyValueStore;

const APP_DIR: &str = "tarifhane";

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Platform data directory, optionally scoped to a namespace subfolder.
    ///
    /// Falls back to the current directory when the platform has no data dir.
    pub fn default_location(namespace: Option<&str>) -> PathBuf {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        match namespace {
            Some(ns) => base.join(ns),
            None => base,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_string(),
        source,
    }
}

/// Fill a temp file in `dir` with `fill`, flush it, and rename it onto `target`.
/// On any failure the temp file is dropped and `target` is untouched.
fn write_atomic<F>(dir: &Path, target: &Path, fill: F) -> std::io::Result<()>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    let mut tmp = NamedTempFile::new_in(dir)?;
    fill(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|err| err.error)?;
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(key, err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base).map_err(|err| io_error(key, err))?;
        write_atomic(&self.base, &self.key_path(key), |file| {
            file.write_all(value.as_bytes())
        })
        .map_err(|err| io_error(key, err))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(key, err)),
        }
    }
}
