//! Append-only line writer with size-based rotation.
//!
//! When the live file grows past its limit it becomes `<name>.1`, older backups
//! shift up by one, and anything past the retention count is deleted.

use crate::domain::error::{KnowledgeLinkError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Live file size that triggers rotation.
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the live one.
const MAX_BACKUP_FILES: usize = 3;

pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: Mutex::new(None),
        }
    }

    /// Appends one line, rotating first if the file is over its limit.
    pub fn append_line(&self, line: &str) -> Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| KnowledgeLinkError::Io(std::io::Error::other(format!("trace writer poisoned: {e}"))))?;

        let over_limit = fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.max_bytes);
        if over_limit {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }

        if let Some(handle) = file.as_mut() {
            writeln!(handle, "{line}")?;
            handle.flush()?;
        }
        Ok(())
    }

    fn backup(&self, index: usize) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{index}"));
        self.path.with_file_name(name)
    }

    fn rotate(&self) -> Result<()> {
        if self.backups == 0 {
            remove_if_exists(&self.path)?;
            return Ok(());
        }

        remove_if_exists(&self.backup(self.backups))?;
        for index in (1..self.backups).rev() {
            let from = self.backup(index);
            if from.exists() {
                fs::rename(&from, self.backup(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup(1))?;
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}
