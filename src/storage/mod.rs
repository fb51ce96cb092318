// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storage port for record lines.
//!
//! The roster persists through a [`RecordStore`]: a whole-batch
//! "load lines / save lines" contract. The backing medium is irrelevant to
//! the roster - only the record grammar matters. Two backings ship with the
//! crate:
//!
//! - [`FileRecordStore`] - one record per line in a plain text file
//! - [`MemoryRecordStore`] - in-memory lines, for tests and embedding

use crate::error::StorageError;

mod file;
mod memory;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

/// Whole-batch access to record lines.
pub trait RecordStore {
    /// Loads every record line from the backing resource.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when the backing resource does
    /// not exist, or [`StorageError::Io`] for other access failures.
    fn load_lines(&self) -> Result<Vec<String>, StorageError>;

    /// Replaces the backing resource with the given record lines.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the write fails. Implementations
    /// may choose to log and swallow write failures instead.
    fn save_lines(&self, lines: &[String]) -> Result<(), StorageError>;
}
