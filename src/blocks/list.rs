//! Ordered, typed blocks of one section. Index in the list is render order.

use crate::blocks::integrity::clear_references;
use crate::blocks::{Block, BlockId, BlockKind, BlockPayload, BlockRegistry, IdStrategy, RegistryError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderedBlockList<P> {
    blocks: Vec<Block<P>>,
}

impl<P> Default for OrderedBlockList<P> {
    fn default() -> Self {
        Self { blocks: Vec::new() }
    }
}

impl<P: BlockPayload> OrderedBlockList<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails on duplicate ids.
    pub fn from_blocks(blocks: Vec<Block<P>>) -> Result<Self, BlockId> {
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if !seen.insert(&block.id) {
                return Err(block.id.clone());
            }
        }
        Ok(Self { blocks })
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block<P>> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[Block<P>] {
        &self.blocks
    }

    pub fn ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block<P>> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.position(id).is_some()
    }

    /// Blocks that end up on the page, in render order.
    pub fn visible_blocks(&self) -> impl Iterator<Item = &Block<P>> {
        self.blocks.iter().filter(|b| b.visible)
    }

    pub fn add_block(&mut self, kind: P::Kind) -> BlockId {
        self.add_block_with(kind, IdStrategy::default())
    }

    pub fn add_block_with(&mut self, kind: P::Kind, strategy: IdStrategy) -> BlockId {
        let id = BlockId::generate(kind.tag(), strategy, |candidate| self.contains(candidate));
        self.blocks.push(Block::new(id.clone(), P::defaults(kind)));
        debug!(block = %id, tag = kind.tag(), position = self.blocks.len() - 1, "block added");
        id
    }

    pub fn add_block_tag(&mut self, tag: &str, strategy: IdStrategy) -> Result<BlockId, RegistryError> {
        let kind = BlockRegistry::<P>::kind(tag)?;
        Ok(self.add_block_with(kind, strategy))
    }

    /// Removing a group also clears every reference to it, in one commit.
    /// Absent ids are a no-op.
    pub fn remove_block(&mut self, id: &BlockId) -> Option<Block<P>> {
        let index = self.position(id)?;

        let mut next = self.blocks.clone();
        let removed = next.remove(index);
        if removed.payload.is_group() {
            clear_references(&removed.id, &mut next);
        }
        self.blocks = next;

        debug!(block = %id, index, "block removed");
        Some(removed)
    }

    pub fn toggle_visibility(&mut self, id: &BlockId) -> Option<bool> {
        let block = self.blocks.iter_mut().find(|b| &b.id == id)?;
        block.visible = !block.visible;
        Some(block.visible)
    }

    /// Moves the block at `from` to `to`; everything in between shifts by
    /// one. Equal or out-of-range indices leave the list untouched.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.blocks.len();
        if from == to || from >= len || to >= len {
            return false;
        }

        let mut next = self.blocks.clone();
        let moved = next.remove(from);
        next.insert(to, moved);
        self.blocks = next;

        debug!(from, to, "blocks reordered");
        true
    }

    /// Swaps in a new version of the block with the same id, keeping its position.
    pub fn replace_block(&mut self, block: Block<P>) -> bool {
        match self.position(&block.id) {
            Some(index) => {
                self.blocks[index] = block;
                true
            }
            None => false,
        }
    }
}

impl<P: BlockPayload> Serialize for OrderedBlockList<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.blocks.serialize(serializer)
    }
}

impl<'de, P: BlockPayload> Deserialize<'de> for OrderedBlockList<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let blocks = Vec::<Block<P>>::deserialize(deserializer)?;
        Self::from_blocks(blocks)
            .map_err(|id| serde::de::Error::custom(format!("duplicate block id `{}`", id)))
    }
}

/// Type-erased structural operations, so callers holding a section of
/// any type can drive its block list.
pub trait BlockListOps {
    fn block_ids(&self) -> Vec<BlockId>;

    fn has_block(&self, id: &BlockId) -> bool;

    fn add_tag(&mut self, tag: &str, strategy: IdStrategy) -> Result<BlockId, RegistryError>;

    fn remove(&mut self, id: &BlockId) -> bool;

    fn toggle(&mut self, id: &BlockId) -> Option<bool>;

    fn move_block(&mut self, from: usize, to: usize) -> bool;
}

impl<P: BlockPayload> BlockListOps for OrderedBlockList<P> {
    fn block_ids(&self) -> Vec<BlockId> {
        self.ids()
    }

    fn has_block(&self, id: &BlockId) -> bool {
        self.contains(id)
    }

    fn add_tag(&mut self, tag: &str, strategy: IdStrategy) -> Result<BlockId, RegistryError> {
        self.add_block_tag(tag, strategy)
    }

    fn remove(&mut self, id: &BlockId) -> bool {
        self.remove_block(id).is_some()
    }

    fn toggle(&mut self, id: &BlockId) -> Option<bool> {
        self.toggle_visibility(id)
    }

    fn move_block(&mut self, from: usize, to: usize) -> bool {
        self.reorder(from, to)
    }
}
