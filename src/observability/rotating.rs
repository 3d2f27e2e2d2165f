//! Size-rotated append-only file.
//!
//! When the live file grows past its limit it is shifted to `<name>.1`, older
//! backups move up one slot (`.1` → `.2`, ...), and the oldest beyond the
//! retention count is dropped.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotation threshold for trace files (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept next to the live file.
pub const DEFAULT_BACKUPS: usize = 3;

/// Line-oriented writer with size-based rotation.
///
/// The handle is opened lazily on first write, so construction never touches
/// the filesystem.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS)
    }

    pub fn with_limits(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> Self {
        Self {
            path: path.into(),
            max_bytes,
            backups,
            handle: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if rotating, opening, or writing fails, or if the
    /// handle lock is poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if self.is_full() {
            *handle = None;
            self.rotate()?;
        }

        let file = match handle.as_mut() {
            Some(file) => file,
            None => handle.insert(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            ),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() >= self.max_bytes)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path).or_else(ignore_missing);
        }

        fs::remove_file(self.backup_path(self.backups)).or_else(ignore_missing)?;
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1)).or_else(ignore_missing)
    }
}

fn ignore_missing(e: io::Error) -> io::Result<()> {
    if e.kind() == io::ErrorKind::NotFound {
        Ok(())
    } else {
        Err(e)
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_appends_lines() {
        let dir = TempDir::new().unwrap();
        let file = RotatingFile::new(dir.path().join("trace.json"));

        file.write_line("one").unwrap();
        file.write_line("two").unwrap();

        assert_eq!(read(file.path()), "one\ntwo\n");
    }

    #[test]
    fn test_rotates_when_full() {
        let dir = TempDir::new().unwrap();
        let file = RotatingFile::with_limits(dir.path().join("trace.json"), 8, 2);

        file.write_line("aaaaaaaa").unwrap();
        file.write_line("bbbbbbbb").unwrap();
        file.write_line("cccccccc").unwrap();

        assert_eq!(read(file.path()), "cccccccc\n");
        assert_eq!(read(&file.backup_path(1)), "bbbbbbbb\n");
        assert_eq!(read(&file.backup_path(2)), "aaaaaaaa\n");
    }

    #[test]
    fn test_drops_backups_beyond_retention() {
        let dir = TempDir::new().unwrap();
        let file = RotatingFile::with_limits(dir.path().join("trace.json"), 1, 2);

        for line in ["1", "2", "3", "4", "5"] {
            file.write_line(line).unwrap();
        }

        assert_eq!(read(file.path()), "5\n");
        assert_eq!(read(&file.backup_path(1)), "4\n");
        assert_eq!(read(&file.backup_path(2)), "3\n");
        assert!(!file.backup_path(3).exists());
    }
}
