use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{path:?} is not a usable state directory: {reason}")]
    StateDir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl PersistError {
    fn state_dir(path: &Path, reason: impl ToString) -> Self {
        PersistError::StateDir {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Creates the state directory if missing. Writability is only known once a
/// write lands there.
pub fn ensure_state_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::state_dir(dir, "not a directory")),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|err| PersistError::state_dir(dir, err))
        }
        Err(err) => Err(PersistError::state_dir(dir, err)),
    }
}

/// Reads and replaces whole files under one directory. A write lands via a
/// temp file and rename, so readers see the old or the new content only.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    pub fn write(&self, file_name: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_state_dir(&self.dir)?;

        let target = self.path_of(file_name);
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|err| PersistError::state_dir(&self.dir, err))?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }

    /// `Ok(None)` when the file does not exist.
    pub fn read(&self, file_name: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path_of(file_name)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
