// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! File-backed record store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

use super::RecordStore;

/// Record store backed by a plain text file, one record per line.
///
/// Loading a missing file fails with [`StorageError::NotFound`]. Save
/// failures are logged at error level and swallowed: a failed save never
/// tears down the caller, the previous file content simply survives.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    /// Creates a store for the given file path. The file is not touched
    /// until the first load or save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FileRecordStore {
    fn load_lines(&self) -> Result<Vec<String>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(content.lines().map(str::to_string).collect())
    }

    fn save_lines(&self, lines: &[String]) -> Result<(), StorageError> {
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        if let Err(error) = fs::write(&self.path, content) {
            tracing::error!(path = %self.path.display(), %error, "failed to save device records");
        }
        Ok(())
    }
}
