//! Local edit buffer for the open editor panel, reconciled against the store.
//!
//! Every local edit is pushed to the store by the caller in the same action,
//! so buffer and store only diverge when something else writes the section.

pub mod merge;

pub use merge::{merge_defaults, merge_fields};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("Buffer serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// What to do when the store copy changes underneath an open panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcilePolicy {
    /// Overwrite the whole buffer when the serialized values differ.
    #[default]
    WholeObject,
    /// Take only the leaves the store changed since the last sync.
    FieldLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Unchanged,
    Replaced,
    Merged,
}

#[derive(Debug, Clone)]
pub struct EditBuffer<T> {
    value: T,
    baseline: Value,
    policy: ReconcilePolicy,
    dirty: bool,
}

impl<T> EditBuffer<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Buffer starts as `defaults` overlaid with `stored`.
    pub fn mount(defaults: &T, stored: &T, policy: ReconcilePolicy) -> Result<Self, BufferError> {
        let merged = merge_defaults(serde_json::to_value(defaults)?, serde_json::to_value(stored)?);
        let value: T = serde_json::from_value(merged.clone())?;
        Ok(Self {
            value,
            baseline: merged,
            policy,
            dirty: false,
        })
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Applies a local edit and returns the value to push to the store.
    pub fn edit(&mut self, apply: impl FnOnce(&mut T)) -> Result<&T, BufferError> {
        self.stage(apply);
        self.synced()?;
        Ok(&self.value)
    }

    /// Local-only edit that has not reached the store yet.
    pub fn stage(&mut self, apply: impl FnOnce(&mut T)) {
        apply(&mut self.value);
        self.dirty = true;
    }

    /// Records that the store now holds the buffer's value.
    pub fn synced(&mut self) -> Result<(), BufferError> {
        self.baseline = serde_json::to_value(&self.value)?;
        Ok(())
    }

    /// Brings the buffer in line with the store's copy. Leaves it alone
    /// when both serialize identically.
    pub fn reconcile(&mut self, stored: &T) -> Result<Reconciled, BufferError> {
        let local = serde_json::to_value(&self.value)?;
        let incoming = serde_json::to_value(stored)?;

        if local == incoming {
            self.baseline = incoming;
            return Ok(Reconciled::Unchanged);
        }

        let outcome = match self.policy {
            ReconcilePolicy::WholeObject => {
                self.value = stored.clone();
                Reconciled::Replaced
            }
            ReconcilePolicy::FieldLevel => {
                let merged = merge_fields(&self.baseline, &local, &incoming);
                if merged == incoming {
                    self.value = stored.clone();
                    Reconciled::Replaced
                } else {
                    self.value = serde_json::from_value(merged)?;
                    Reconciled::Merged
                }
            }
        };

        debug!(policy = ?self.policy, outcome = ?outcome, "buffer reconciled with store");
        self.baseline = incoming;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests;
