//! Size-based log rotation
//!
//! `app.log` is renamed to `app.log.1` once writing the next line would
//! push it past `max_bytes`; older backups shift up by one and anything
//! beyond `max_backups` is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File writer that rotates by size
#[derive(Debug)]
pub struct SizeRollingWriter {
    dir: PathBuf,
    file_name: String,
    max_bytes: u64,
    max_backups: usize,
    file: File,
    written: u64,
}

impl SizeRollingWriter {
    /// Open (or create) `dir/file_name`, creating `dir` if needed
    pub fn new(
        dir: impl AsRef<Path>,
        file_name: impl Into<String>,
        max_bytes: u64,
        max_backups: usize,
    ) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let file_name = file_name.into();
        let file = open_append(&dir.join(&file_name))?;
        let written = file.metadata()?.len();

        Ok(Self {
            dir,
            file_name,
            max_bytes,
            max_backups,
            file,
            written,
        })
    }

    /// Path of the active file
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Path of the n-th backup
    pub fn backup_path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("{}.{n}", self.file_name))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let active = self.path();

        if self.max_backups == 0 {
            self.file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(&active)?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.backup_path(self.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.max_backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&active, self.backup_path(1))?;

        self.file = open_append(&active)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for SizeRollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.max_bytes > 0 && self.written > 0 && self.written + buf.len() as u64 > self.max_bytes
        {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
