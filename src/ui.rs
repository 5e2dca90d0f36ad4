//! Terminal frontend: renders engine snapshots and maps keys to commands.
//!
//! This module holds no exploration state of its own. Each frame it pulls a
//! read-only [`View`] from the [`Explorer`], draws it, and translates the
//! next key press into a single [`Command`] for the engine to process. The
//! only state kept here is the ratatui `ListState` used for scroll offset.

use std::io::{self, stdout};
use std::time::Duration;

use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};

use crate::explore::{Command, Explorer, Mode, View};
use crate::ir::instr::Operand;

/// Runs the interactive loop until the engine reports `should_quit`.
pub fn run(mut explorer: Explorer) -> io::Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut list_state = ListState::default();
    let mut result = Ok(());

    loop {
        result = result.and(
            terminal
                .draw(|frame| draw(frame, &explorer.view(), &mut list_state))
                .map(|_| ()),
        );
        result = result.and(pump_events(&mut explorer));
        if result.is_err() || explorer.view().should_quit {
            break;
        }
    }

    disable_raw_mode()
        .and(stdout().execute(LeaveAlternateScreen))
        .and(result)
}

fn pump_events(explorer: &mut Explorer) -> io::Result<()> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                let cmd = command_for_key(&explorer.view(), key);
                if let Some(cmd) = cmd {
                    explorer.apply(cmd);
                }
            }
        }
    }
    Ok(())
}

/// Maps a key press to a command, depending on the active mode.
fn command_for_key(view: &View<'_>, key: KeyEvent) -> Option<Command> {
    match view.mode {
        Mode::GotoPrompt { .. } => match key.code {
            KeyCode::Char(c) => Some(Command::GotoDigit(c)),
            KeyCode::Backspace => Some(Command::GotoBackspace),
            KeyCode::Enter => Some(Command::GotoConfirm),
            KeyCode::Esc => Some(Command::Cancel),
            _ => None,
        },
        Mode::Inspector { .. } => match key.code {
            KeyCode::Esc => Some(Command::Cancel),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        },
        Mode::Browsing => match key.code {
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('g') => Some(Command::OpenGoto),
            KeyCode::Char(' ') => Some(Command::OpenInspector),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::MoveDown),
            // Follow the first navigable operand; with none, operand 0
            // surfaces the "not navigable" notice.
            KeyCode::Enter | KeyCode::Char('l') => {
                Some(Command::JumpInto(view.first_navigable_operand().unwrap_or(0)))
            }
            KeyCode::Backspace | KeyCode::Char('h') => Some(Command::JumpBack),
            _ => None,
        },
    }
}

fn draw(frame: &mut Frame, view: &View<'_>, list_state: &mut ListState) {
    let main_layout = Layout::new(
        Direction::Vertical,
        [Constraint::Fill(1), Constraint::Max(1)],
    )
    .split(frame.size());

    statusbar(frame, view, main_layout[1]);

    let layout = Layout::new(
        Direction::Horizontal,
        [Constraint::Fill(2), Constraint::Fill(1)],
    )
    .split(main_layout[0]);

    instruction_list(frame, view, layout[0], list_state);
    operand_panel(frame, view, layout[1]);

    if let Mode::Inspector { target } = view.mode {
        inspector_dialog(frame, view, target.index);
    }
}

fn instruction_list(frame: &mut Frame, view: &View<'_>, area: Rect, list_state: &mut ListState) {
    let items: List = view
        .block
        .instrs
        .iter()
        .enumerate()
        .map(|(index, inst)| {
            Line::from_iter([
                Span::styled(format!("{index:4}: "), Style::new().dim()),
                Span::raw(inst.text.as_str()),
            ])
        })
        .collect();

    list_state.select(Some(view.position.index));

    let title = Span::styled(view.block.display_name(), Style::new().bold());
    frame.render_stateful_widget(
        items
            .block(Block::bordered().title(title))
            .highlight_style(Style::new().reversed()),
        area,
        list_state,
    );
}

/// Operands of the current instruction, with their indices, so the user can
/// see what a jump would follow.
fn operand_panel(frame: &mut Frame, view: &View<'_>, area: Rect) {
    let lines: Vec<Line> = match view.current_instr() {
        Some(inst) if !inst.operands.is_empty() => inst
            .operands
            .iter()
            .enumerate()
            .map(|(i, op)| {
                let marker = if op.is_navigable() { "→ " } else { "  " };
                let style = if op.is_navigable() {
                    Style::new().blue()
                } else {
                    Style::new().dim()
                };
                Line::from_iter([
                    Span::styled(format!("{i:2} {marker}"), style),
                    Span::styled(op.describe(), style),
                ])
            })
            .collect(),
        Some(_) => vec![Line::styled("(no operands)", Style::new().dim())],
        None => vec![Line::styled("(empty block)", Style::new().dim())],
    };

    let title = Span::styled("Operands", Style::new().bold());
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(title)),
        area,
    );
}

fn statusbar(frame: &mut Frame, view: &View<'_>, area: Rect) {
    let key_style = Style::new().blue().bold();
    let desc_style = Style::new().italic();

    if let Some(notice) = view.notice {
        frame.render_widget(
            Line::from_iter([
                Span::styled("Error: ", Style::new().red().bold()),
                Span::styled(notice, Style::new().red()),
            ]),
            area,
        );
        return;
    }

    if let Mode::GotoPrompt { draft } = view.mode {
        let widget = Line::from_iter([
            Span::styled("Go to index: ", desc_style),
            Span::raw(draft.as_str()),
        ]);
        frame.set_cursor(
            u16::try_from(widget.width())
                .map(|width| (area.x + width).min(area.right()))
                .unwrap_or(area.right()),
            area.y,
        );
        frame.render_widget(widget, area);
        return;
    }

    let mut spans = Vec::new();
    if view.depth > 0 {
        spans.push(Span::styled(
            format!("[{} jump{} deep] ", view.depth, if view.depth == 1 { "" } else { "s" }),
            Style::new().yellow(),
        ));
    }
    spans.extend([
        Span::styled("<q>", key_style),
        Span::styled(" quit  ", desc_style),
        Span::styled("<space>", key_style),
        Span::styled(" inspect  ", desc_style),
        Span::styled("<g>", key_style),
        Span::styled(" goto  ", desc_style),
        Span::styled("<enter>", key_style),
        Span::styled(" follow  ", desc_style),
        Span::styled("<backspace>", key_style),
        Span::styled(" back  ", desc_style),
        Span::styled("<up/k down/j>", key_style),
        Span::styled(" move", desc_style),
    ]);
    frame.render_widget(Line::from_iter(spans), area);
}

fn inspector_dialog(frame: &mut Frame, view: &View<'_>, index: usize) {
    // Place the dialog in the center.
    let v_layout = Layout::new(
        Direction::Vertical,
        [
            Constraint::Fill(1),
            Constraint::Max(20),
            Constraint::Fill(1),
        ],
    )
    .split(frame.size());
    let h_layout = Layout::new(
        Direction::Horizontal,
        [
            Constraint::Fill(1),
            Constraint::Max(60),
            Constraint::Fill(1),
        ],
    )
    .split(v_layout[1]);
    let dialog_size = h_layout[1];

    let block = Block::bordered().title(Span::styled("Inspect instruction", Style::new().bold()));
    let block_inner = block.inner(dialog_size);
    frame.render_widget(Clear, dialog_size);
    frame.render_widget(block, dialog_size);

    let block_layout = Layout::new(
        Direction::Vertical,
        [Constraint::Max(2), Constraint::Fill(1), Constraint::Max(2)],
    )
    .split(block_inner);

    let Some(inst) = view.block.instr(index) else {
        return;
    };

    frame.render_widget(
        Paragraph::new(Line::from_iter([
            Span::styled(format!("{index:4}: "), Style::new().dim()),
            Span::raw(inst.text.as_str()),
        ]))
        .block(Block::new().borders(Borders::BOTTOM)),
        block_layout[0],
    );

    let mut lines = vec![Line::from_iter([
        Span::styled("opcode: ", Style::new().dim()),
        Span::raw(inst.opcode.mnemonic()),
    ])];
    for (i, op) in inst.operands.iter().enumerate() {
        lines.push(Line::from_iter([
            Span::styled(format!("operand {i}: "), Style::new().dim()),
            Span::raw(op.describe()),
            Span::raw(match op {
                Operand::BlockRef(_) | Operand::DeclRef(_) => "  (navigable)",
                _ => "",
            }),
        ]));
    }
    if !inst.meta.is_empty() {
        lines.push(Line::raw(""));
        for (key, value) in &inst.meta {
            lines.push(Line::from_iter([
                Span::styled(format!("{key}: "), Style::new().dim()),
                Span::raw(value.as_str()),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(lines), block_layout[1]);

    frame.render_widget(
        Paragraph::new(Line::from_iter([
            Span::styled("<esc>", Style::new().blue().bold()),
            Span::styled(" close inspector", Style::new().italic()),
        ]))
        .block(Block::new().borders(Borders::TOP)),
        block_layout[2],
    );
}
