//! The decoded IR data model: blocks, instructions, operands.
//!
//! Everything in here is immutable after [`crate::decode::decode`] has run.
//! Blocks are addressed by stable integer id in a single owning map rather
//! than by owning links between them, so an instruction in any block may
//! reference any other block (including cycles) without ownership issues.

pub mod block;
pub mod instr;
pub mod program;

pub use block::{Block, BlockId};
pub use instr::{Instr, Opcode, Operand};
pub use program::Program;
