//! On-disk backend
//!
//! One file per key inside a directory. A write goes to a temporary sibling
//! and is renamed over the target, so readers observe either the old or the
//! new value, never a torn one.

use crate::backend::KeyValueBackend;
use mojibox_core::error::{Error, Result};
use parking_lot::Mutex;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const FILE_EXTENSION: &str = "json";

/// Directory-backed key-value store.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
    /// Serializes writers inside this process
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Open (creating if needed) a backend rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    ///
    /// Keys are percent-encoded so any key maps to a single flat file name.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name = format!("{}.{}", urlencoding::encode(key), FILE_EXTENSION);
        self.dir.join(name)
    }
}

impl KeyValueBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");

        let _guard = self.write_lock.lock();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &target).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            Error::Storage(format!("rename {} failed: {}", target.display(), e))
        })
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let _guard = self.write_lock.lock();
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Io(e)),
        }
    }
}
