//! Decoding of the upstream IR dump into a [`Program`].
//!
//! ## Wire format
//!
//! The dump is a self-describing JSON document owned by the upstream
//! compiler:
//!
//! ```text
//! { "entry": <block id>,
//!   "blocks": [ { "id": <u32>, "label"?: <str>, "instructions": [instr] } ],
//!   "decls"?: { <name>: <block id> } }
//! instr:   { "opcode": <str>, "text": <str>,
//!            "operands"?: [operand], "meta"?: { <key>: <value> } }
//! operand: { "kind": "immediate", "value": <any> }
//!        | { "kind": "block", "id": <u32> }
//!        | { "kind": "decl", "name": <str> }
//!        | { "kind": <anything else>, ... }
//! ```
//!
//! Decoding is defensive: unknown opcode strings and operand kinds map to
//! the `Other` catch-alls, and block/decl references are *not* validated
//! here. A debug dump routinely contains forward or external references
//! that only matter if the user actually follows them, so dangling ones
//! surface as navigation errors at jump time, never at decode time.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use tracing::debug;

use crate::error::DecodeError;
use crate::ir::block::{Block, BlockId};
use crate::ir::instr::{Instr, Opcode, Operand};
use crate::ir::program::Program;

// ── wire schema (field names owned by the upstream producer) ───────────────

#[derive(Deserialize)]
struct WireDump {
    entry: u32,
    blocks: Vec<WireBlock>,
    #[serde(default)]
    decls: HashMap<String, u32>,
}

#[derive(Deserialize)]
struct WireBlock {
    id: u32,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    instructions: Vec<WireInstr>,
}

#[derive(Deserialize)]
struct WireInstr {
    opcode: String,
    text: String,
    #[serde(default)]
    operands: Vec<WireOperand>,
    #[serde(default)]
    meta: BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct WireOperand {
    kind: String,
    #[serde(default)]
    value: Option<serde_json::Value>,
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    name: Option<String>,
}

// ── conversion into the model ───────────────────────────────────────────────

/// Decodes a JSON dump into an immutable [`Program`].
///
/// Fails only on malformed JSON or structural violations (duplicate block
/// id, missing entry block, empty dump). One pass, no streaming.
pub fn decode(json: &str) -> Result<Program, DecodeError> {
    let dump: WireDump = serde_json::from_str(json)?;

    if dump.blocks.is_empty() {
        return Err(DecodeError::EmptyProgram);
    }

    let mut blocks = HashMap::with_capacity(dump.blocks.len());
    for wire in dump.blocks {
        let id = BlockId(wire.id);
        let instrs = wire.instructions.into_iter().map(convert_instr).collect();
        if blocks.insert(id, Block::new(id, wire.label, instrs)).is_some() {
            return Err(DecodeError::DuplicateBlock { id });
        }
    }

    let entry = BlockId(dump.entry);
    if !blocks.contains_key(&entry) {
        return Err(DecodeError::MissingEntry { entry });
    }

    let decls: HashMap<String, BlockId> = dump
        .decls
        .into_iter()
        .map(|(name, id)| (name, BlockId(id)))
        .collect();

    debug!(blocks = blocks.len(), decls = decls.len(), %entry, "decoded IR dump");
    Ok(Program::new(entry, blocks, decls))
}

fn convert_instr(wire: WireInstr) -> Instr {
    let opcode = match wire.opcode.as_str() {
        "branch" => Opcode::Branch,
        "call" => Opcode::Call,
        "literal" => Opcode::Literal,
        _ => Opcode::Other(wire.opcode),
    };

    let operands = wire.operands.into_iter().map(convert_operand).collect();

    let meta = wire
        .meta
        .into_iter()
        .map(|(key, value)| (key, render_value(value)))
        .collect();

    Instr { opcode, text: wire.text, operands, meta }
}

/// Maps a wire operand to its model variant. A recognized kind missing its
/// payload field is demoted to `Other` rather than rejected.
fn convert_operand(wire: WireOperand) -> Operand {
    match wire.kind.as_str() {
        "immediate" => match wire.value {
            Some(value) => Operand::Immediate(render_value(value)),
            None => Operand::Other,
        },
        "block" => match wire.id {
            Some(id) => Operand::BlockRef(BlockId(id)),
            None => Operand::Other,
        },
        "decl" => match wire.name {
            Some(name) => Operand::DeclRef(name),
            None => Operand::Other,
        },
        _ => Operand::Other,
    }
}

/// Pass-through rendering of an opaque JSON value for display.
fn render_value(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}
