//! Clears references to a grouping block that is being deleted.
//!
//! Items pointing at the deleted group are kept and become ungrouped.
//! Callers run this on the same list they commit with the removal.

use crate::blocks::{Block, BlockId, BlockPayload};
use tracing::debug;

/// Returns how many blocks had their reference cleared.
pub fn clear_references<P: BlockPayload>(group: &BlockId, blocks: &mut [Block<P>]) -> usize {
    let mut cleared = 0;
    for block in blocks.iter_mut() {
        if block.payload.group_ref() == Some(group) {
            block.payload.clear_group_ref();
            cleared += 1;
        }
    }

    if cleared > 0 {
        debug!(group = %group, cleared, "cleared dangling group references");
    }
    cleared
}
