use std::{
    fs::File,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use tracing::{debug, trace};

use super::key_value::KeyValueStore;

/// The main realization of [KeyValueStore]. Every key is a file inside `dir`. A value is written
/// into a sibling temporary file and renamed over the old one, so a crash mid write leaves the
/// previous value intact. Writers take an exclusive advisory lock on a `.<key>.lock` file and
/// readers a shared one.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{key}.tmp"))
    }

    fn open_lock(&self, key: &str) -> std::io::Result<File> {
        File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.dir.join(format!(".{key}.lock")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        debug!("Reading {path:?}");

        let lock = self.open_lock(key)?;
        FileExt::lock_shared(&lock)?;
        let result = std::fs::read_to_string(&path);
        FileExt::unlock(&lock)?;

        match result {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {path:?}")),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let temp_path = self.temp_path_for(key);
        debug!("Writing {} bytes into {path:?}", value.len());

        let lock = self.open_lock(key)?;
        FileExt::lock_exclusive(&lock)?;
        let result = (|| -> std::io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.flush()?;
            file.sync_data()?;
            std::fs::rename(&temp_path, &path)
        })();
        FileExt::unlock(&lock)?;
        trace!("Finished writing {path:?}");

        if result.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }
        result.with_context(|| format!("Failed to write {path:?}"))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        debug!("Removing {path:?}");

        let lock = self.open_lock(key)?;
        FileExt::lock_exclusive(&lock)?;
        let result = std::fs::remove_file(&path);
        FileExt::unlock(&lock)?;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {path:?}")),
        }
    }
}
