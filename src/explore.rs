//! Interaction state machine layered over the navigation engine.
//!
//! [`Explorer`] owns the decoded [`Program`], a [`Navigator`], and the
//! active [`Mode`]. A frontend feeds it one [`Command`] at a time; each is
//! processed synchronously to completion, then the frontend pulls a fresh
//! read-only [`View`]. Opening a dialog suspends ordinary navigation until
//! the dialog confirms or cancels — exactly one mode is active at a time,
//! and transitions happen only through `apply`.

use crate::error::{InputError, NavigationError};
use crate::ir::block::{Block, BlockId};
use crate::ir::instr::Instr;
use crate::ir::program::Program;
use crate::nav::{Navigator, Position};

/// The active modal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Ordinary list navigation.
    Browsing,
    /// The go-to-index prompt is open; `draft` holds the digits typed so far.
    GotoPrompt { draft: String },
    /// The read-only instruction inspector is open.
    Inspector { target: Position },
}

/// One discrete user command, as delivered by the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    JumpInto(usize),
    JumpBack,
    OpenGoto,
    GotoDigit(char),
    GotoBackspace,
    GotoConfirm,
    OpenInspector,
    Cancel,
    Quit,
}

/// The exploration engine: program + navigator + modal state.
pub struct Explorer {
    program: Program,
    nav: Navigator,
    mode: Mode,
    /// User-visible message from the last recoverable error, cleared on the
    /// next command.
    notice: Option<String>,
    should_quit: bool,
}

impl Explorer {
    /// Starts browsing at the first instruction of the entry block.
    pub fn new(program: Program) -> Self {
        let nav = Navigator::new(&program);
        Self {
            program,
            nav,
            mode: Mode::Browsing,
            notice: None,
            should_quit: false,
        }
    }

    /// Starts browsing at an arbitrary block instead of the entry block.
    ///
    /// Used by the CLI's `--entry` / `--decl` overrides; the override is
    /// checked here the same way a jump target would be.
    pub fn new_at(program: Program, start: BlockId) -> Result<Self, NavigationError> {
        if !program.contains(start) {
            return Err(NavigationError::UnresolvedTarget { what: start.to_string() });
        }
        Ok(Self {
            nav: Navigator::starting_at(start),
            program,
            mode: Mode::Browsing,
            notice: None,
            should_quit: false,
        })
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Processes one command to completion.
    ///
    /// Commands are atomic with respect to engine state: there is no
    /// internal concurrency and nothing here blocks on I/O.
    pub fn apply(&mut self, cmd: Command) {
        self.notice = None;
        match self.mode {
            Mode::Browsing => self.apply_browsing(cmd),
            Mode::GotoPrompt { .. } => self.apply_goto(cmd),
            Mode::Inspector { .. } => self.apply_inspector(cmd),
        }
    }

    fn apply_browsing(&mut self, cmd: Command) {
        match cmd {
            Command::MoveUp => self.nav.move_up(),
            Command::MoveDown => self.nav.move_down(&self.program),
            Command::JumpInto(operand) => {
                if let Err(e) = self.nav.jump_into(&self.program, operand) {
                    self.notice = Some(e.to_string());
                }
            }
            Command::JumpBack => self.nav.jump_back(),
            Command::OpenGoto => {
                self.mode = Mode::GotoPrompt { draft: String::new() };
            }
            Command::OpenInspector => {
                self.mode = Mode::Inspector { target: self.nav.current() };
            }
            Command::Quit => self.should_quit = true,
            // Nothing open to cancel; dialog keystrokes without a dialog
            // are ignored.
            Command::Cancel
            | Command::GotoDigit(_)
            | Command::GotoBackspace
            | Command::GotoConfirm => {}
        }
    }

    fn apply_goto(&mut self, cmd: Command) {
        match cmd {
            Command::GotoDigit(ch) => {
                if !ch.is_ascii_digit() {
                    self.notice = Some(InputError::InvalidDigit { ch }.to_string());
                    return;
                }
                if let Mode::GotoPrompt { draft } = &mut self.mode {
                    draft.push(ch);
                }
            }
            Command::GotoBackspace => {
                if let Mode::GotoPrompt { draft } = &mut self.mode {
                    draft.pop();
                }
            }
            Command::GotoConfirm => {
                let draft = match std::mem::replace(&mut self.mode, Mode::Browsing) {
                    Mode::GotoPrompt { draft } => draft,
                    other => {
                        // apply_goto is only entered from GotoPrompt.
                        self.mode = other;
                        return;
                    }
                };
                match draft.parse::<usize>() {
                    Ok(n) => self.nav.goto_index(&self.program, n),
                    // The draft is digits-only, so parse fails on an empty
                    // draft or on overflow; overflow still clamps.
                    Err(_) if !draft.is_empty() => {
                        self.nav.goto_index(&self.program, usize::MAX)
                    }
                    Err(_) => self.notice = Some("no index entered".to_owned()),
                }
            }
            Command::Cancel => self.mode = Mode::Browsing,
            Command::Quit => self.should_quit = true,
            // Navigation is suspended while the prompt is open.
            _ => {}
        }
    }

    fn apply_inspector(&mut self, cmd: Command) {
        match cmd {
            Command::Cancel => self.mode = Mode::Browsing,
            Command::Quit => self.should_quit = true,
            // The inspector is read-only; everything else is ignored.
            _ => {}
        }
    }

    /// Read-only snapshot for the renderer.
    pub fn view(&self) -> View<'_> {
        let position = self.nav.current();
        let block = self
            .program
            .block(position.block)
            .expect("navigator position always names a block present in the program");
        View {
            block,
            position,
            mode: &self.mode,
            depth: self.nav.depth(),
            notice: self.notice.as_deref(),
            should_quit: self.should_quit,
        }
    }
}

/// Immutable per-frame snapshot of engine state.
///
/// Everything the renderer needs: the current block's instructions (for the
/// scrollable list), the position (for the highlight), the active mode (for
/// dialogs), and the jump depth (for the breadcrumb indicator).
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub block: &'a Block,
    pub position: Position,
    pub mode: &'a Mode,
    pub depth: usize,
    pub notice: Option<&'a str>,
    pub should_quit: bool,
}

impl View<'_> {
    /// The instruction under the cursor, if the block is non-empty.
    pub fn current_instr(&self) -> Option<&Instr> {
        self.block.instr(self.position.index)
    }

    /// Index of the first operand of the current instruction a jump could
    /// follow. Lets a frontend bind a single "follow" key without knowing
    /// operand layouts.
    pub fn first_navigable_operand(&self) -> Option<usize> {
        self.current_instr()?.first_navigable_operand()
    }
}
