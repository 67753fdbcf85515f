//! What is being edited: a whole section, or one block inside it.
//!
//! The shared "currently selected" slot holds a string. It is decoded here
//! and nowhere else; the rest of the crate works with `SelectionAddress`.

pub mod router;

pub use router::{Panel, PanelRouter};

use crate::blocks::BlockId;
use crate::section::SectionId;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Separates section id and block id in an encoded block address.
pub const CHILD_MARKER: &str = ":child:";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionAddress {
    Section(SectionId),
    Block { section: SectionId, block: BlockId },
}

impl SelectionAddress {
    pub fn section(id: impl Into<SectionId>) -> Self {
        SelectionAddress::Section(id.into())
    }

    pub fn block(section: impl Into<SectionId>, block: impl Into<BlockId>) -> Self {
        SelectionAddress::Block {
            section: section.into(),
            block: block.into(),
        }
    }

    /// `None` for empty input or a marker with an empty side.
    pub fn decode(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        match raw.split_once(CHILD_MARKER) {
            Some((section, block)) if !section.is_empty() && !block.is_empty() => {
                Some(SelectionAddress::block(section, block))
            }
            Some(_) => None,
            None => Some(SelectionAddress::section(raw)),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            SelectionAddress::Section(section) => section.to_string(),
            SelectionAddress::Block { section, block } => format!("{}{}{}", section, CHILD_MARKER, block),
        }
    }

    pub fn section_id(&self) -> &SectionId {
        match self {
            SelectionAddress::Section(section) => section,
            SelectionAddress::Block { section, .. } => section,
        }
    }

    pub fn block_id(&self) -> Option<&BlockId> {
        match self {
            SelectionAddress::Section(_) => None,
            SelectionAddress::Block { block, .. } => Some(block),
        }
    }

    /// The parent section of a block address; sections map to themselves.
    pub fn parent(&self) -> SelectionAddress {
        SelectionAddress::Section(self.section_id().clone())
    }
}

impl fmt::Display for SelectionAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// The single shared "currently selected" slot, in its string encoding.
pub trait SelectionChannel: Send + Sync {
    fn select(&self, address: Option<String>);

    fn current(&self) -> Option<String>;
}

#[derive(Default)]
pub struct SelectionSlot {
    value: Mutex<Option<String>>,
}

impl SelectionChannel for SelectionSlot {
    fn select(&self, address: Option<String>) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = address;
    }

    fn current(&self) -> Option<String> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Structured view over a `SelectionChannel`, handed to the panel router.
#[derive(Clone)]
pub struct SelectionContext {
    channel: Arc<dyn SelectionChannel>,
}

impl SelectionContext {
    pub fn new(channel: Arc<dyn SelectionChannel>) -> Self {
        Self { channel }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(SelectionSlot::default()))
    }

    pub fn address(&self) -> Option<SelectionAddress> {
        self.channel.current().as_deref().and_then(SelectionAddress::decode)
    }

    pub fn set(&self, address: Option<&SelectionAddress>) {
        self.channel.select(address.map(SelectionAddress::encode));
    }

    pub fn select_section(&self, section: &SectionId) {
        self.set(Some(&SelectionAddress::Section(section.clone())));
    }

    pub fn select_block(&self, section: &SectionId, block: &BlockId) {
        self.set(Some(&SelectionAddress::Block {
            section: section.clone(),
            block: block.clone(),
        }));
    }

    /// Back to the parent section, so the sidebar keeps it highlighted.
    pub fn close_block(&self) {
        if let Some(address @ SelectionAddress::Block { .. }) = self.address() {
            self.set(Some(&address.parent()));
        }
    }

    pub fn clear(&self) {
        self.set(None);
    }
}

#[cfg(test)]
mod tests;
