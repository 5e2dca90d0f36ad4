//! Reference resolution: deciding whether an operand denotes a jump target.

use crate::ir::block::BlockId;
use crate::ir::instr::{Instr, Operand};
use crate::ir::program::Program;

/// The identity of a jump destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpTarget {
    /// A block referenced by id. Existence within the program is checked by
    /// the navigator at jump time, not here.
    Block(BlockId),
    /// A declaration the dump references but never defines.
    Unresolved(String),
}

/// Resolves operand `operand_index` of `instr` to a jump target, if it has
/// navigational meaning.
///
/// Pure and side-effect-free; the declaration lookup is a single hash probe
/// against the mapping built once at decode, so callers may invoke this per
/// keystroke without caching.
pub fn resolve(program: &Program, instr: &Instr, operand_index: usize) -> Option<JumpTarget> {
    match instr.operand(operand_index)? {
        Operand::Immediate(_) | Operand::Other => None,
        Operand::BlockRef(id) => Some(JumpTarget::Block(*id)),
        Operand::DeclRef(name) => Some(match program.decl_target(name) {
            Some(id) => JumpTarget::Block(id),
            None => JumpTarget::Unresolved(name.clone()),
        }),
    }
}
