//! irex: interactive explorer for compiler IR dumps.
//!
//! Exploration pipeline:
//!
//! ```text
//! dump (.json) → decode → [Program]
//!                             ↑ read-only
//!   commands → Explorer (mode machine) → Navigator (position + jump stack)
//!                  ↓ snapshots
//!           terminal frontend (ui)
//! ```
//!
//! The `Program` is decoded once at startup and never mutated. All
//! exploration state — the current position, the jump-history stack, and
//! the active interaction mode — lives in [`explore::Explorer`], which
//! processes one command at a time and hands the frontend an immutable
//! snapshot per frame.

pub mod cli;
pub mod decode;
pub mod error;
pub mod explore;
pub mod ir;
pub mod nav;
pub mod resolve;
pub mod ui;

pub use error::Error;
