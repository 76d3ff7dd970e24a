//! Temp-file writer with rename-on-finalize.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::temp_path;

/// Sequential writer for `<final>.part`. Either [`finalize`](Self::finalize)
/// or [`discard`](Self::discard) it; dropping it leaves the temp file behind.
pub struct PartFile {
    file: BufWriter<File>,
    temp_path: PathBuf,
    final_path: PathBuf,
    written: u64,
}

impl PartFile {
    /// Create (or truncate) the temp file for `final_path`. The parent
    /// directory must already exist.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(PartFile {
            file: BufWriter::new(file),
            temp_path,
            final_path: final_path.to_path_buf(),
            written: 0,
        })
    }

    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flush and rename onto the final path. Returns the number of bytes written.
    pub fn finalize(mut self) -> io::Result<u64> {
        self.file.flush()?;
        self.file.get_ref().sync_all()?;
        let PartFile {
            file,
            temp_path,
            final_path,
            written,
        } = self;
        drop(file);
        fs::rename(&temp_path, &final_path)?;
        Ok(written)
    }

    /// Drop the handle and remove the temp file.
    pub fn discard(self) {
        let PartFile { file, temp_path, .. } = self;
        drop(file);
        if let Err(e) = fs::remove_file(&temp_path) {
            tracing::debug!(path = %temp_path.display(), "could not remove temp file: {}", e);
        }
    }
}
