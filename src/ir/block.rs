use crate::ir::instr::Instr;

/// Stable identifier for a block, assigned by the upstream compiler.
///
/// Ids are unique within a dump but not necessarily dense or ordered —
/// the upstream producer hands them out from a global registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub u32);

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "block {}", self.0)
    }
}

/// A labeled, ordered run of instructions; the unit of jump targets.
///
/// The instruction index used throughout navigation is the 0-based,
/// contiguous position within `instrs`.
#[derive(Debug, Clone)]
pub struct Block {
    pub id: BlockId,
    /// Declaration name when this block is the body of a named callable.
    pub label: Option<String>,
    pub instrs: Vec<Instr>,
}

impl Block {
    pub fn new(id: BlockId, label: Option<String>, instrs: Vec<Instr>) -> Self {
        Self { id, label, instrs }
    }

    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    pub fn instr(&self, index: usize) -> Option<&Instr> {
        self.instrs.get(index)
    }

    /// Title form used by the renderer: `block 3` or `block 3 (main)`.
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => format!("{} ({})", self.id, label),
            None => self.id.to_string(),
        }
    }
}
