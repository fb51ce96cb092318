// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory record store.

use parking_lot::Mutex;

use crate::error::StorageError;

use super::RecordStore;

/// Record store backed by an in-memory line buffer.
///
/// Useful for tests and for embedding the roster without touching a
/// filesystem. Unlike [`FileRecordStore`](super::FileRecordStore), an empty
/// store is a valid (empty) resource, not a missing one.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    lines: Mutex<Vec<String>>,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with record lines.
    pub fn with_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            lines: Mutex::new(lines.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns a copy of the currently stored lines.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl RecordStore for MemoryRecordStore {
    fn load_lines(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.snapshot())
    }

    fn save_lines(&self, lines: &[String]) -> Result<(), StorageError> {
        *self.lines.lock() = lines.to_vec();
        Ok(())
    }
}
