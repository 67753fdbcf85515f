//! Undo/redo snapshots of the page document.

use crate::section::{PageDocument, SectionId};
use crate::store::Store;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Called after a structural mutation has been committed to the store.
pub trait HistorySink: Send + Sync {
    fn snapshot(&self);
}

struct Timeline {
    entries: Vec<PageDocument>,
    cursor: usize,
}

/// Bounded undo stack over whole-document snapshots.
pub struct UndoHistory {
    store: Arc<dyn Store>,
    timeline: Mutex<Timeline>,
    max_depth: usize,
}

impl UndoHistory {
    /// The store's current document becomes the oldest undo target.
    pub fn new(store: Arc<dyn Store>, max_depth: usize) -> Self {
        let baseline = store.document();
        Self {
            store,
            timeline: Mutex::new(Timeline {
                entries: vec![baseline],
                cursor: 0,
            }),
            max_depth: max_depth.max(1),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.timeline.lock().unwrap_or_else(PoisonError::into_inner).cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        let timeline = self.timeline.lock().unwrap_or_else(PoisonError::into_inner);
        timeline.cursor + 1 < timeline.entries.len()
    }

    /// Restores the previous snapshot. Returns the sections whose settings
    /// changed, or `None` when there is nothing to undo.
    pub fn undo(&self) -> Option<Vec<SectionId>> {
        let mut timeline = self.timeline.lock().unwrap_or_else(PoisonError::into_inner);
        if timeline.cursor == 0 {
            return None;
        }
        timeline.cursor -= 1;
        let changed = self.restore(&timeline.entries[timeline.cursor]);
        debug!(cursor = timeline.cursor, changed = changed.len(), "undo");
        Some(changed)
    }

    pub fn redo(&self) -> Option<Vec<SectionId>> {
        let mut timeline = self.timeline.lock().unwrap_or_else(PoisonError::into_inner);
        if timeline.cursor + 1 >= timeline.entries.len() {
            return None;
        }
        timeline.cursor += 1;
        let changed = self.restore(&timeline.entries[timeline.cursor]);
        debug!(cursor = timeline.cursor, changed = changed.len(), "redo");
        Some(changed)
    }

    fn restore(&self, target: &PageDocument) -> Vec<SectionId> {
        let current = self.store.document();
        let changed = target
            .sections
            .iter()
            .filter(|section| current.section(&section.id) != Some(*section))
            .map(|section| section.id.clone())
            .collect();
        self.store.restore(target.clone());
        changed
    }
}

impl HistorySink for UndoHistory {
    fn snapshot(&self) {
        let document = self.store.document();
        let mut timeline = self.timeline.lock().unwrap_or_else(PoisonError::into_inner);

        let keep = timeline.cursor + 1;
        timeline.entries.truncate(keep);
        timeline.entries.push(document);

        // max_depth undo steps plus the current state
        let overflow = timeline.entries.len().saturating_sub(self.max_depth + 1);
        if overflow > 0 {
            timeline.entries.drain(..overflow);
        }
        timeline.cursor = timeline.entries.len() - 1;
    }
}
