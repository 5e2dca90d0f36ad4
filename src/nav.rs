//! Navigation engine: the current position and the jump-history stack.
//!
//! [`Navigator`] owns the only mutable exploration state. Every operation
//! either produces a new consistent position or is a defined no-op; the
//! recoverable failures (`jump_into` on a bad operand) leave position and
//! stack byte-for-byte unchanged.

use tracing::debug;

use crate::error::NavigationError;
use crate::ir::block::BlockId;
use crate::ir::program::Program;
use crate::resolve::{resolve, JumpTarget};

/// A (block id, instruction index) location within the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub block: BlockId,
    pub index: usize,
}

/// One entry of the jump history.
///
/// `from` is where the user was when the jump happened; `to` is the entry
/// position of the target block. Popping a frame restores `from` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpFrame {
    pub from: Position,
    pub to: Position,
}

/// Tracks the current position and the jump stack.
///
/// Invariants:
/// - `current` always names a block present in the program (jump targets
///   are existence-checked before `current` moves).
/// - The stack is strict LIFO: pushed by `jump_into`, popped by
///   `jump_back`, never reordered. Read bottom-to-top it reconstructs the
///   exact path of jumps taken.
/// - `move_up` / `move_down` / `goto_index` never touch the stack.
#[derive(Debug)]
pub struct Navigator {
    current: Position,
    stack: Vec<JumpFrame>,
}

impl Navigator {
    /// Starts at the first instruction of the program's entry block.
    pub fn new(program: &Program) -> Self {
        Self::starting_at(program.entry())
    }

    /// Starts at the first instruction of an arbitrary block. The caller is
    /// responsible for the block's existence.
    pub(crate) fn starting_at(block: BlockId) -> Self {
        Self {
            current: Position { block, index: 0 },
            stack: Vec::new(),
        }
    }

    pub fn current(&self) -> Position {
        self.current
    }

    /// Depth of the jump stack, for breadcrumb rendering.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn frames(&self) -> &[JumpFrame] {
        &self.stack
    }

    fn block_len(&self, program: &Program) -> usize {
        program.block(self.current.block).map_or(0, |b| b.len())
    }

    /// Advances to the next instruction; silent no-op at the last one.
    pub fn move_down(&mut self, program: &Program) {
        if self.current.index + 1 < self.block_len(program) {
            self.current.index += 1;
        }
    }

    /// Retreats to the previous instruction; silent no-op at index 0.
    pub fn move_up(&mut self) {
        if self.current.index > 0 {
            self.current.index -= 1;
        }
    }

    /// Moves to instruction `n` of the current block, clamped into range.
    ///
    /// Always succeeds: user-entered indices are frequently out of range
    /// and should land on the nearest valid instruction, not be rejected.
    pub fn goto_index(&mut self, program: &Program, n: usize) {
        let len = self.block_len(program);
        self.current.index = if len == 0 { 0 } else { n.min(len - 1) };
    }

    /// Follows operand `operand_index` of the current instruction.
    ///
    /// On success, pushes a [`JumpFrame`] and moves to the first
    /// instruction of the target block. On any failure, position and stack
    /// are left unchanged.
    pub fn jump_into(
        &mut self,
        program: &Program,
        operand_index: usize,
    ) -> Result<(), NavigationError> {
        let instr = program
            .block(self.current.block)
            .and_then(|b| b.instr(self.current.index))
            .ok_or(NavigationError::NotNavigable { operand: operand_index })?;

        match resolve(program, instr, operand_index) {
            None => Err(NavigationError::NotNavigable { operand: operand_index }),
            Some(JumpTarget::Unresolved(name)) => Err(NavigationError::UnresolvedTarget {
                what: format!("declaration '{}'", name),
            }),
            Some(JumpTarget::Block(id)) => {
                if !program.contains(id) {
                    return Err(NavigationError::UnresolvedTarget { what: id.to_string() });
                }
                let to = Position { block: id, index: 0 };
                self.stack.push(JumpFrame { from: self.current, to });
                self.current = to;
                debug!(dest = %id, depth = self.stack.len(), "jump into");
                Ok(())
            }
        }
    }

    /// Returns to where the most recent jump came from; silent no-op when
    /// the stack is empty (already at the root of exploration).
    pub fn jump_back(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.current = frame.from;
            debug!(dest = %frame.from.block, depth = self.stack.len(), "jump back");
        }
    }
}
