// Edit history - linear version list with a cursor and branch-overwrite on edit

use super::types::ImageData;
use std::sync::Arc;

/// Owned image state of one editing session.
///
/// Index 0 of the history is always the uploaded original and index 1, once the
/// automatic transform succeeded, is the auto-transformed baseline. The cursor is
/// `None` exactly when no image is loaded.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    original: Option<Arc<ImageData>>,
    history: Vec<Arc<ImageData>>,
    cursor: Option<usize>,
}

/// Read-only copy of the store at one point in time
#[derive(Debug, Clone, Default)]
pub struct HistorySnapshot {
    pub original: Option<Arc<ImageData>>,
    pub entries: Vec<Arc<ImageData>>,
    pub cursor: Option<usize>,
}

impl HistorySnapshot {
    pub fn current(&self) -> Option<&Arc<ImageData>> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_none() && self.entries.is_empty() && self.cursor.is_none()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear back to the empty state
    pub fn reset(&mut self) {
        self.original = None;
        self.history.clear();
        self.cursor = None;
    }

    /// Load the uploaded original as the first history entry
    pub fn initialize(&mut self, original: Arc<ImageData>) -> Result<(), HistoryError> {
        if !self.is_empty() {
            return Err(HistoryError::AlreadyInitialized);
        }
        self.history.push(original.clone());
        self.original = Some(original);
        self.cursor = Some(0);
        Ok(())
    }

    /// Replace everything after the original with the auto-transform result
    pub fn commit_auto_result(&mut self, result: Arc<ImageData>) -> Result<(), HistoryError> {
        let original = self.original.clone().ok_or(HistoryError::Empty)?;
        self.history = vec![original, result];
        self.cursor = Some(1);
        Ok(())
    }

    /// Push a new state after the cursor, dropping any redo branch.
    ///
    /// Returns the new cursor position.
    pub fn append(&mut self, state: Arc<ImageData>) -> Result<usize, HistoryError> {
        let cursor = self.cursor.ok_or(HistoryError::Empty)?;
        self.history.truncate(cursor + 1);
        self.history.push(state);
        let last = self.history.len() - 1;
        self.cursor = Some(last);
        Ok(last)
    }

    /// Step back one entry; returns false when already at the first entry
    pub fn undo(&mut self) -> bool {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                true
            }
            _ => false,
        }
    }

    /// Step forward one entry; returns false when already at the last entry
    pub fn redo(&mut self) -> bool {
        match self.cursor {
            Some(c) if c + 1 < self.history.len() => {
                self.cursor = Some(c + 1);
                true
            }
            _ => false,
        }
    }

    /// Re-push the original as a new entry so the revert itself can be undone
    pub fn revert_to_original(&mut self) -> bool {
        match self.original.clone() {
            Some(original) => self.append(original).is_ok(),
            None => false,
        }
    }

    /// Re-push the auto-transform result; no-op without one
    pub fn revert_to_auto(&mut self) -> bool {
        match self.auto_result().cloned() {
            Some(auto) => self.append(auto).is_ok(),
            None => false,
        }
    }

    pub fn current(&self) -> Option<&Arc<ImageData>> {
        self.cursor.and_then(|c| self.history.get(c))
    }

    pub fn original(&self) -> Option<&Arc<ImageData>> {
        self.original.as_ref()
    }

    pub fn auto_result(&self) -> Option<&Arc<ImageData>> {
        if self.history.len() > 1 {
            self.history.get(1)
        } else {
            None
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.is_none()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.history.len())
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            original: self.original.clone(),
            entries: self.history.clone(),
            cursor: self.cursor,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("No image loaded")]
    Empty,

    #[error("History already holds an image; reset first")]
    AlreadyInitialized,
}
