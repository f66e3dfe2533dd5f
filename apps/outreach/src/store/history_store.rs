use std::sync::Arc;

use crate::errors::AppError;
use crate::models::ApplicationHistoryEntry;
use crate::store::{load_document, save_document, Storage, HISTORY_KEY};

/// Owns the list of sent applications, most recent first.
pub struct HistoryStore {
    storage: Arc<dyn Storage>,
    entries: Vec<ApplicationHistoryEntry>,
}

impl HistoryStore {
    pub fn load(storage: Arc<dyn Storage>) -> Result<Self, AppError> {
        let entries = load_document(storage.as_ref(), HISTORY_KEY)?.unwrap_or_default();
        Ok(Self { storage, entries })
    }

    pub fn entries(&self) -> &[ApplicationHistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ApplicationHistoryEntry> {
        self.entries.get(index)
    }

    /// Prepends `entry` and rewrites the whole list.
    pub fn record(&mut self, entry: ApplicationHistoryEntry) -> Result<(), AppError> {
        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(entry);
        next.extend(self.entries.iter().cloned());

        save_document(self.storage.as_ref(), HISTORY_KEY, &next)?;
        self.entries = next;
        Ok(())
    }
}
