// src/storage/local.rs

//! File output for the feed.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::NormalizedEstate;

use super::write_estates;

/// Writes the feed to a fixed path.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
    pretty: bool,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write atomically (write to temp, then rename).
    pub fn save(&self, estates: &[NormalizedEstate]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        let file = File::create(&tmp)?;
        write_estates(BufWriter::new(file), estates, self.pretty)?;
        fs::rename(&tmp, &self.path)?;

        log::info!("Wrote {} record(s) to {}", estates.len(), self.path.display());
        Ok(())
    }
}
