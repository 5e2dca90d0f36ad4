use std::collections::HashMap;

use crate::ir::block::{Block, BlockId};

/// The root decoded artifact: every block of the dump, addressable by id.
///
/// Invariants (established by `decode`, relied on everywhere else):
/// - `entry` names a block present in `blocks`.
/// - Block ids are unique; `blocks` is the single owner of every `Block`.
/// - `decls` maps each declaration name the dump defines to its body block.
///   Names the dump merely *references* are absent — that is not an error
///   here, it becomes one only when the user tries to jump to them.
///
/// Immutable after construction. The navigator, resolver, and renderer all
/// share it read-only.
#[derive(Debug)]
pub struct Program {
    entry: BlockId,
    blocks: HashMap<BlockId, Block>,
    decls: HashMap<String, BlockId>,
}

impl Program {
    pub(crate) fn new(
        entry: BlockId,
        blocks: HashMap<BlockId, Block>,
        decls: HashMap<String, BlockId>,
    ) -> Self {
        Self { entry, blocks, decls }
    }

    /// Id of the entry block — where exploration starts.
    pub fn entry(&self) -> BlockId {
        self.entry
    }

    /// The entry block itself. Presence is a decode invariant.
    pub fn entry_block(&self) -> &Block {
        &self.blocks[&self.entry]
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Looks up the body block of a named callable declaration.
    pub fn decl_target(&self, name: &str) -> Option<BlockId> {
        self.decls.get(name).copied()
    }
}
