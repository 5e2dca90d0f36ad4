use std::collections::BTreeMap;

use crate::ir::block::BlockId;

/// Instruction opcode, reduced to the categories the explorer cares about.
///
/// The upstream instruction set is open-ended and versioned; anything the
/// explorer has no special handling for lands in `Other` with its mnemonic
/// preserved for display. Matching on this enum stays exhaustive either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opcode {
    /// Transfers control to another block.
    Branch,
    /// Invokes a named callable declaration.
    Call,
    /// Loads a literal, possibly an embedded block (closure body).
    Literal,
    /// Any other upstream opcode, mnemonic retained verbatim.
    Other(String),
}

impl Opcode {
    pub fn mnemonic(&self) -> &str {
        match self {
            Opcode::Branch => "branch",
            Opcode::Call => "call",
            Opcode::Literal => "literal",
            Opcode::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A typed operand attached to an instruction.
///
/// Only `BlockRef` and `DeclRef` carry navigational meaning; the rest are
/// display-only. Referenced ids are deliberately not validated at decode
/// time — a dangling reference surfaces when the user tries to follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A literal scalar or string, rendered for display.
    Immediate(String),
    /// A reference to another block: branch target or embedded block literal.
    BlockRef(BlockId),
    /// A reference to a named callable declaration.
    DeclRef(String),
    /// Operand kinds without navigational meaning.
    Other,
}

impl Operand {
    /// True for operands the user can jump into.
    pub fn is_navigable(&self) -> bool {
        matches!(self, Operand::BlockRef(_) | Operand::DeclRef(_))
    }

    /// Short display form for the operand panel.
    pub fn describe(&self) -> String {
        match self {
            Operand::Immediate(v) => format!("imm {}", v),
            Operand::BlockRef(id) => id.to_string(),
            Operand::DeclRef(name) => format!("decl '{}'", name),
            Operand::Other => "-".to_owned(),
        }
    }
}

/// A single decoded instruction.
#[derive(Debug, Clone)]
pub struct Instr {
    pub opcode: Opcode,
    /// The upstream's rendered text form, shown verbatim in the list.
    pub text: String,
    pub operands: Vec<Operand>,
    /// Free-form debug metadata, opaque to the engine. Only the inspector
    /// view reads it; ordering is kept stable for display.
    pub meta: BTreeMap<String, String>,
}

impl Instr {
    pub fn operand(&self, index: usize) -> Option<&Operand> {
        self.operands.get(index)
    }

    /// Index of the first operand a jump could follow, if any.
    pub fn first_navigable_operand(&self) -> Option<usize> {
        self.operands.iter().position(Operand::is_navigable)
    }
}
