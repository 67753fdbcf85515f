//! Maps the current selection to the editor panel that should be mounted.

use crate::section::{AnyBlock, Section};
use crate::selection::SelectionAddress;
use crate::store::Store;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    None,
    Section(Arc<Section>),
    Block { section: Arc<Section>, block: AnyBlock },
}

impl Panel {
    pub fn is_none(&self) -> bool {
        matches!(self, Panel::None)
    }

    pub fn section(&self) -> Option<&Arc<Section>> {
        match self {
            Panel::None => None,
            Panel::Section(section) => Some(section),
            Panel::Block { section, .. } => Some(section),
        }
    }

    pub fn address(&self) -> Option<SelectionAddress> {
        match self {
            Panel::None => None,
            Panel::Section(section) => Some(SelectionAddress::Section(section.id.clone())),
            Panel::Block { section, block } => Some(SelectionAddress::Block {
                section: section.id.clone(),
                block: block.id().clone(),
            }),
        }
    }
}

pub struct PanelRouter;

impl PanelRouter {
    /// Any lookup that fails routes to `Panel::None`.
    pub fn route(store: &dyn Store, address: Option<&SelectionAddress>) -> Panel {
        let Some(address) = address else {
            return Panel::None;
        };

        let Some(section) = store.get_section(address.section_id()) else {
            debug!(selection = %address, "selected section not found");
            return Panel::None;
        };

        match address {
            SelectionAddress::Section(_) => Panel::Section(section),
            SelectionAddress::Block { block, .. } => match section.settings.block(block) {
                Some(block) => Panel::Block { section, block },
                None => {
                    debug!(selection = %address, "selected block not found");
                    Panel::None
                }
            },
        }
    }
}
