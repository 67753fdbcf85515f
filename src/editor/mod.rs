//! Editor façade: turns user actions into store replacements, then saves
//! and remounts panels around them.

use crate::blocks::{BlockId, BlockListOps, RegistryError};
use crate::buffer::{BufferError, EditBuffer, Reconciled};
use crate::config::{EditingConfig, EditorConfig};
use crate::history::{HistorySink, UndoHistory};
use crate::persistence::{HttpGateway, PersistenceError, SaveDispatcher};
use crate::section::{AnyBlock, DocumentError, PageDocument, SectionId, SectionSettings};
use crate::selection::{Panel, PanelRouter, SelectionAddress, SelectionContext};
use crate::store::{InMemoryStore, Store};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Block registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Edit buffer error: {0}")]
    Buffer(#[from] BufferError),
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// The mounted editor panel and its buffer.
enum OpenPanel {
    Section {
        id: SectionId,
        buffer: EditBuffer<SectionSettings>,
    },
    Block {
        section: SectionId,
        block: BlockId,
        buffer: EditBuffer<AnyBlock>,
    },
}

impl OpenPanel {
    fn address(&self) -> SelectionAddress {
        match self {
            OpenPanel::Section { id, .. } => SelectionAddress::Section(id.clone()),
            OpenPanel::Block { section, block, .. } => SelectionAddress::Block {
                section: section.clone(),
                block: block.clone(),
            },
        }
    }

    fn section_id(&self) -> &SectionId {
        match self {
            OpenPanel::Section { id, .. } => id,
            OpenPanel::Block { section, .. } => section,
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            OpenPanel::Section { buffer, .. } => buffer.is_dirty(),
            OpenPanel::Block { buffer, .. } => buffer.is_dirty(),
        }
    }

    fn mark_saved(&mut self) {
        match self {
            OpenPanel::Section { buffer, .. } => buffer.mark_saved(),
            OpenPanel::Block { buffer, .. } => buffer.mark_saved(),
        }
    }
}

pub struct SectionEditor {
    store: Arc<dyn Store>,
    history: Arc<dyn HistorySink>,
    saves: SaveDispatcher,
    selection: SelectionContext,
    config: EditingConfig,
    open: Option<OpenPanel>,
}

impl SectionEditor {
    pub fn new(
        store: Arc<dyn Store>,
        history: Arc<dyn HistorySink>,
        saves: SaveDispatcher,
        selection: SelectionContext,
        config: EditingConfig,
    ) -> Self {
        Self {
            store,
            history,
            saves,
            selection,
            config,
            open: None,
        }
    }

    /// In-memory store, undo history and the HTTP gateway, wired from config.
    /// Must be called from within a tokio runtime.
    pub fn from_config(
        config: &EditorConfig,
        document: PageDocument,
    ) -> Result<(Self, Arc<UndoHistory>), EditorError> {
        let store: Arc<dyn Store> = Arc::new(InMemoryStore::new(document));
        let history = Arc::new(UndoHistory::new(store.clone(), config.history.max_depth));
        let gateway = Arc::new(HttpGateway::new(&config.persistence)?);
        let saves = SaveDispatcher::current(gateway)?;

        info!(api_url = %config.persistence.api_url, "section editor ready");
        let editor = Self::new(
            store,
            history.clone(),
            saves,
            SelectionContext::in_memory(),
            config.editing.clone(),
        );
        Ok((editor, history))
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub fn saves(&self) -> &SaveDispatcher {
        &self.saves
    }

    pub fn selection(&self) -> Option<SelectionAddress> {
        self.selection.address()
    }

    /// Panel for the current selection, read fresh from the store.
    pub fn panel(&self) -> Panel {
        PanelRouter::route(self.store.as_ref(), self.selection.address().as_ref())
    }

    /// Buffered value of the open section panel.
    pub fn section_buffer(&self) -> Option<&SectionSettings> {
        match &self.open {
            Some(OpenPanel::Section { buffer, .. }) => Some(buffer.value()),
            _ => None,
        }
    }

    /// Buffered value of the open block panel.
    pub fn block_buffer(&self) -> Option<&AnyBlock> {
        match &self.open {
            Some(OpenPanel::Block { buffer, .. }) => Some(buffer.value()),
            _ => None,
        }
    }

    /* ---------- 1.  STRUCTURAL OPERATIONS ---------- */

    /// Appends a block of type `tag`. `Ok(None)` when the section is gone.
    #[instrument(skip(self))]
    pub fn add_block(&mut self, section_id: &SectionId, tag: &str) -> Result<Option<BlockId>, EditorError> {
        if let Some(section) = self.store.get_section(section_id) {
            let section_type = section.section_type();
            if !section_type.holds_blocks() {
                return Err(RegistryError::NotBlockBearing { section: section_type }.into());
            }
        }

        let strategy = self.config.block_ids;
        let added = self.mutate_blocks(section_id, |blocks| blocks.add_tag(tag, strategy).map(Some))?;

        if let Some(block) = &added {
            if self.config.select_new_blocks {
                self.select_block(section_id, block)?;
            }
        }
        Ok(added)
    }

    /// Idempotent; removing a category also ungroups its items.
    #[instrument(skip(self))]
    pub fn remove_block(&mut self, section_id: &SectionId, block: &BlockId) -> Result<bool, EditorError> {
        let removed = self.mutate_blocks(section_id, |blocks| Ok(blocks.remove(block).then_some(())))?;
        Ok(removed.is_some())
    }

    /// Returns the new visibility, `None` when the block is absent.
    #[instrument(skip(self))]
    pub fn toggle_visibility(&mut self, section_id: &SectionId, block: &BlockId) -> Result<Option<bool>, EditorError> {
        self.mutate_blocks(section_id, |blocks| Ok(blocks.toggle(block)))
    }

    /// Stable move of one block; no-op for equal or out-of-range indices.
    #[instrument(skip(self))]
    pub fn reorder(&mut self, section_id: &SectionId, from: usize, to: usize) -> Result<bool, EditorError> {
        let moved = self.mutate_blocks(section_id, |blocks| Ok(blocks.move_block(from, to).then_some(())))?;
        Ok(moved.is_some())
    }

    /// Runs `op` on a copy of the section's blocks and commits the copy as
    /// one replacement. `Ok(None)` from `op` means nothing changed.
    fn mutate_blocks<R>(
        &mut self,
        section_id: &SectionId,
        op: impl FnOnce(&mut dyn BlockListOps) -> Result<Option<R>, RegistryError>,
    ) -> Result<Option<R>, EditorError> {
        let Some(section) = self.store.get_section(section_id) else {
            debug!(section = %section_id, "section not found, nothing to do");
            return Ok(None);
        };

        let mut settings = section.settings.clone();
        let outcome = match settings.blocks_mut() {
            Some(blocks) => op(blocks)?,
            None => None,
        };
        let Some(outcome) = outcome else {
            return Ok(None);
        };

        self.store.replace_section_settings(section_id, settings.clone());
        let seq = self.saves.dispatch(section_id.clone(), settings);
        self.history.snapshot();
        debug!(section = %section_id, seq, "structural change committed");

        self.resync(section_id)?;
        Ok(Some(outcome))
    }

    /* ---------- 2.  SELECTION ---------- */

    pub fn select_section(&mut self, section_id: &SectionId) -> Result<Panel, EditorError> {
        self.selection.select_section(section_id);
        self.remount()
    }

    pub fn select_block(&mut self, section_id: &SectionId, block: &BlockId) -> Result<Panel, EditorError> {
        self.selection.select_block(section_id, block);
        self.remount()
    }

    /// Back to the parent section's panel.
    pub fn close_block_editor(&mut self) -> Result<Panel, EditorError> {
        self.selection.close_block();
        self.remount()
    }

    pub fn clear_selection(&mut self) -> Result<(), EditorError> {
        self.selection.clear();
        self.remount()?;
        Ok(())
    }

    /// Re-reads the shared selection slot, for when someone else wrote it.
    pub fn selection_changed(&mut self) -> Result<Panel, EditorError> {
        self.remount()
    }

    /// Closes the open panel if the selection now points elsewhere and
    /// mounts a buffer for the new target.
    fn remount(&mut self) -> Result<Panel, EditorError> {
        let panel = self.panel();
        let target = panel.address();

        if self.open.as_ref().map(OpenPanel::address) == target {
            return Ok(panel);
        }

        self.close_panel();
        self.open = match &panel {
            Panel::None => None,
            Panel::Section(section) => {
                let defaults = SectionSettings::defaults(section.section_type());
                Some(OpenPanel::Section {
                    id: section.id.clone(),
                    buffer: EditBuffer::mount(&defaults, &section.settings, self.config.reconcile)?,
                })
            }
            Panel::Block { section, block } => Some(OpenPanel::Block {
                section: section.id.clone(),
                block: block.id().clone(),
                buffer: EditBuffer::mount(&block.defaults(), block, self.config.reconcile)?,
            }),
        };
        Ok(panel)
    }

    /* ---------- 3.  FIELD EDITS ---------- */

    /// Edits the open section panel; pushed to the store right away.
    /// Returns false when no section panel is open or the edit would change
    /// the section's type.
    pub fn edit_section(&mut self, apply: impl FnOnce(&mut SectionSettings)) -> Result<bool, EditorError> {
        let Some(OpenPanel::Section { id, buffer }) = &mut self.open else {
            return Ok(false);
        };

        let mut candidate = buffer.value().clone();
        apply(&mut candidate);
        if candidate.section_type() != buffer.value().section_type() {
            warn!(
                section = %id,
                current = %buffer.value().section_type(),
                attempted = %candidate.section_type(),
                "section edit would change its type, ignored"
            );
            return Ok(false);
        }

        let value = buffer.edit(|settings| *settings = candidate)?.clone();
        self.store.replace_section_settings(id, value);
        Ok(true)
    }

    /// Edits the open block panel. The block keeps its id and its type.
    pub fn edit_block(&mut self, apply: impl FnOnce(&mut AnyBlock)) -> Result<bool, EditorError> {
        let Some(OpenPanel::Block { section, block, buffer }) = &mut self.open else {
            return Ok(false);
        };
        let Some(current) = self.store.get_section(section) else {
            return Ok(false);
        };
        let Some(stored) = current.settings.block(block) else {
            return Ok(false);
        };

        let mut candidate = buffer.value().clone();
        apply(&mut candidate);
        candidate.set_id(block.clone());

        if candidate.tag() != stored.tag() {
            warn!(
                section = %section,
                block = %block,
                current = stored.tag(),
                attempted = candidate.tag(),
                "block edit would change its type, ignored"
            );
            return Ok(false);
        }

        let mut settings = current.settings.clone();
        if !settings.replace_block(candidate.clone()) {
            warn!(section = %section, block = %block, "block edit does not fit its section");
            return Ok(false);
        }

        buffer.edit(|value| *value = candidate)?;
        self.store.replace_section_settings(section, settings);
        Ok(true)
    }

    /* ---------- 4.  SAVE & SYNC ---------- */

    /// Persists the open panel's section and records one history entry,
    /// if anything was edited since the last save.
    pub fn save(&mut self) -> Option<u64> {
        let panel = self.open.as_mut()?;
        if !panel.is_dirty() {
            return None;
        }

        let section_id = panel.section_id().clone();
        let section = self.store.get_section(&section_id)?;

        self.history.snapshot();
        let seq = self.saves.dispatch(section_id.clone(), section.settings.clone());
        panel.mark_saved();
        debug!(section = %section_id, seq, "panel edits saved");
        Some(seq)
    }

    /// Saves pending edits and drops the buffer. In-flight saves continue.
    pub fn close_panel(&mut self) {
        self.save();
        self.open = None;
    }

    /// Call when the store's copy of a section changed outside this editor.
    pub fn store_changed(&mut self, section_id: &SectionId) -> Result<Option<Reconciled>, EditorError> {
        self.resync(section_id)
    }

    /// Re-syncs the open panel after an undo/redo or bulk restore.
    pub fn refresh(&mut self) -> Result<Panel, EditorError> {
        if let Some(section_id) = self.open.as_ref().map(|p| p.section_id().clone()) {
            self.resync(&section_id)?;
        }
        self.remount()
    }

    /* ---------- 5.  UNDO & REDO ---------- */

    /// Steps `history` back and persists every section the step touched.
    pub fn undo(&mut self, history: &UndoHistory) -> Result<bool, EditorError> {
        match history.undo() {
            Some(changed) => {
                self.restored(&changed)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn redo(&mut self, history: &UndoHistory) -> Result<bool, EditorError> {
        match history.redo() {
            Some(changed) => {
                self.restored(&changed)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Call after the store was restored wholesale: saves the listed
    /// sections and re-syncs the open panel. Records no history.
    pub fn restored(&mut self, changed: &[SectionId]) -> Result<Panel, EditorError> {
        for section_id in changed {
            if let Some(section) = self.store.get_section(section_id) {
                let seq = self.saves.dispatch(section_id.clone(), section.settings.clone());
                debug!(section = %section_id, seq, "restored section saved");
            }
        }
        self.refresh()
    }

    fn resync(&mut self, section_id: &SectionId) -> Result<Option<Reconciled>, EditorError> {
        let Some(panel) = self.open.as_mut() else {
            return Ok(None);
        };
        if panel.section_id() != section_id {
            return Ok(None);
        }

        let section = self.store.get_section(section_id);
        let outcome = match (panel, section) {
            (OpenPanel::Section { buffer, .. }, Some(section)) => Some(buffer.reconcile(&section.settings)?),
            (OpenPanel::Block { block, buffer, .. }, Some(section)) => match section.settings.block(block) {
                Some(current) => Some(buffer.reconcile(&current)?),
                None => None,
            },
            (_, None) => None,
        };

        if outcome.is_none() {
            // The panel's target is gone; nothing left to save into.
            debug!(section = %section_id, "open panel target removed");
            self.open = None;
            self.selection.close_block();
            self.remount()?;
        }
        Ok(outcome)
    }
}
