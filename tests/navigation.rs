//! Tests for the navigation engine: bounded moves, clamped goto, and the
//! jump-into / jump-back stack discipline.

use irex::decode::decode;
use irex::error::NavigationError;
use irex::ir::block::BlockId;
use irex::ir::program::Program;
use irex::nav::{Navigator, Position};
use irex::resolve::{resolve, JumpTarget};

/// A small program exercising every operand kind:
///
/// block 0 (main): branch→1, literal(block 2), call helper (decl, defined),
///                 call extern-cmd (decl, undefined), load-literal (imm),
///                 branch→99 (dangling)
/// block 1: noop, branch→2
/// block 2: return
/// block 3 (helper): helper body
fn sample_program() -> Program {
    decode(
        r#"{
            "entry": 0,
            "blocks": [
                { "id": 0, "label": "main", "instructions": [
                    { "opcode": "branch", "text": "branch block 1",
                      "operands": [ { "kind": "block", "id": 1 } ] },
                    { "opcode": "literal", "text": "load-literal %1, closure(block 2)",
                      "operands": [ { "kind": "block", "id": 2 } ] },
                    { "opcode": "call", "text": "call decl \"helper\"",
                      "operands": [ { "kind": "decl", "name": "helper" } ] },
                    { "opcode": "call", "text": "call decl \"extern-cmd\"",
                      "operands": [ { "kind": "decl", "name": "extern-cmd" } ] },
                    { "opcode": "other", "text": "load-literal %0, int 7",
                      "operands": [ { "kind": "immediate", "value": 7 } ] },
                    { "opcode": "branch", "text": "branch block 99",
                      "operands": [ { "kind": "block", "id": 99 } ] }
                ]},
                { "id": 1, "instructions": [
                    { "opcode": "other", "text": "noop" },
                    { "opcode": "branch", "text": "branch block 2",
                      "operands": [ { "kind": "block", "id": 2 } ] }
                ]},
                { "id": 2, "instructions": [
                    { "opcode": "other", "text": "return" }
                ]},
                { "id": 3, "label": "helper", "instructions": [
                    { "opcode": "other", "text": "helper body" }
                ]}
            ],
            "decls": { "helper": 3 }
        }"#,
    )
    .expect("sample program should decode")
}

fn pos(block: u32, index: usize) -> Position {
    Position { block: BlockId(block), index }
}

#[test]
fn test_starts_at_entry_block_first_instruction() {
    let program = sample_program();
    let nav = Navigator::new(&program);
    assert_eq!(nav.current(), pos(0, 0));
    assert_eq!(nav.depth(), 0);
}

#[test]
fn test_move_down_is_strictly_increasing_then_clamps() {
    let program = sample_program();
    let mut nav = Navigator::new(&program);

    let mut visited = vec![nav.current().index];
    for _ in 0..10 {
        nav.move_down(&program);
        visited.push(nav.current().index);
    }

    // Strictly increasing until the last index, then pinned there.
    assert_eq!(visited[..6], [0, 1, 2, 3, 4, 5]);
    assert!(visited[6..].iter().all(|&i| i == 5), "no wraparound past the end");
    assert_eq!(nav.depth(), 0, "moves never touch the stack");
}

#[test]
fn test_move_up_noop_at_index_zero() {
    let program = sample_program();
    let mut nav = Navigator::new(&program);

    nav.move_up();
    assert_eq!(nav.current(), pos(0, 0));

    nav.move_down(&program);
    nav.move_up();
    assert_eq!(nav.current(), pos(0, 0));
}

#[test]
fn test_goto_index_always_lands_in_range() {
    let program = sample_program();
    let mut nav = Navigator::new(&program);

    nav.goto_index(&program, 3);
    assert_eq!(nav.current(), pos(0, 3));

    nav.goto_index(&program, 0);
    assert_eq!(nav.current(), pos(0, 0));

    // Out of range clamps to the last valid instruction, never errors.
    nav.goto_index(&program, 9_999);
    assert_eq!(nav.current(), pos(0, 5));

    nav.goto_index(&program, usize::MAX);
    assert_eq!(nav.current(), pos(0, 5));
    assert_eq!(nav.depth(), 0);
}

#[test]
fn test_jump_into_block_ref_and_back() {
    let program = sample_program();
    let mut nav = Navigator::new(&program);

    nav.jump_into(&program, 0).expect("branch target exists");
    assert_eq!(nav.current(), pos(1, 0));
    assert_eq!(nav.depth(), 1);
    assert_eq!(nav.frames()[0].from, pos(0, 0));
    assert_eq!(nav.frames()[0].to, pos(1, 0));

    nav.jump_back();
    assert_eq!(nav.current(), pos(0, 0));
    assert_eq!(nav.depth(), 0);
}

#[test]
fn test_nested_jumps_unwind_to_exact_positions() {
    let program = sample_program();
    let mut nav = Navigator::new(&program);

    // (0,1) --literal--> (2,0); back out; (0,0) --branch--> (1,1) --branch--> (2,0).
    nav.move_down(&program);
    nav.jump_into(&program, 0).unwrap();
    assert_eq!(nav.current(), pos(2, 0));
    nav.jump_back();
    assert_eq!(nav.current(), pos(0, 1));

    nav.move_up();
    nav.jump_into(&program, 0).unwrap();
    nav.move_down(&program);
    nav.jump_into(&program, 0).unwrap();
    assert_eq!(nav.current(), pos(2, 0));
    assert_eq!(nav.depth(), 2);

    nav.jump_back();
    assert_eq!(nav.current(), pos(1, 1));
    nav.jump_back();
    assert_eq!(nav.current(), pos(0, 0));
    assert_eq!(nav.depth(), 0, "stack empties exactly when position is restored");
}

#[test]
fn test_jump_into_defined_decl() {
    let program = sample_program();
    let mut nav = Navigator::new(&program);

    nav.goto_index(&program, 2);
    nav.jump_into(&program, 0).expect("helper is defined");
    assert_eq!(nav.current(), pos(3, 0));
}

#[test]
fn test_jump_into_undeclared_decl_reports_unresolved() {
    let program = sample_program();
    let mut nav = Navigator::new(&program);

    nav.goto_index(&program, 3);
    let before = nav.current();

    let err = nav.jump_into(&program, 0).unwrap_err();
    assert!(matches!(err, NavigationError::UnresolvedTarget { .. }));
    assert_eq!(nav.current(), before);
    assert_eq!(nav.depth(), 0);
}

#[test]
fn test_jump_into_dangling_block_ref_reports_unresolved() {
    let program = sample_program();
    let mut nav = Navigator::new(&program);

    nav.goto_index(&program, 5);
    let err = nav.jump_into(&program, 0).unwrap_err();
    assert!(matches!(err, NavigationError::UnresolvedTarget { .. }));
    assert_eq!(nav.current(), pos(0, 5));
}

#[test]
fn test_jump_into_non_navigable_leaves_state_unchanged() {
    let program = sample_program();
    let mut nav = Navigator::new(&program);

    // Build up some state first.
    nav.jump_into(&program, 0).unwrap();
    nav.move_down(&program);
    let before = nav.current();
    let frames_before = nav.frames().to_vec();

    // Operand 1 does not exist on this instruction.
    let err = nav.jump_into(&program, 1).unwrap_err();
    assert_eq!(err, NavigationError::NotNavigable { operand: 1 });
    assert_eq!(nav.current(), before);
    assert_eq!(nav.frames(), frames_before.as_slice());
}

#[test]
fn test_jump_into_immediate_operand_not_navigable() {
    let program = sample_program();
    let mut nav = Navigator::new(&program);

    nav.goto_index(&program, 4);
    let err = nav.jump_into(&program, 0).unwrap_err();
    assert_eq!(err, NavigationError::NotNavigable { operand: 0 });
    assert_eq!(nav.current(), pos(0, 4));
}

#[test]
fn test_jump_back_on_empty_stack_is_silent_noop() {
    let program = sample_program();
    let mut nav = Navigator::new(&program);

    nav.move_down(&program);
    nav.jump_back();
    assert_eq!(nav.current(), pos(0, 1));
    assert_eq!(nav.depth(), 0);
}

#[test]
fn test_two_block_jump_and_walk_sequence() {
    // Program { 0: [A (branch→1), B], 1: [C] }, start at (0,0):
    // jump into → (1,0); back → (0,0); down → (0,1); down again → unchanged.
    let program = decode(
        r#"{ "entry": 0, "blocks": [
            { "id": 0, "instructions": [
                { "opcode": "branch", "text": "A",
                  "operands": [ { "kind": "block", "id": 1 } ] },
                { "opcode": "other", "text": "B" }
            ]},
            { "id": 1, "instructions": [ { "opcode": "other", "text": "C" } ] }
        ]}"#,
    )
    .unwrap();
    let mut nav = Navigator::new(&program);

    nav.jump_into(&program, 0).unwrap();
    assert_eq!(nav.current(), pos(1, 0));
    assert_eq!(nav.depth(), 1);
    assert_eq!(nav.frames()[0].from, pos(0, 0));

    nav.jump_back();
    assert_eq!(nav.current(), pos(0, 0));
    assert_eq!(nav.depth(), 0);

    nav.move_down(&program);
    assert_eq!(nav.current(), pos(0, 1));
    nav.move_down(&program);
    assert_eq!(nav.current(), pos(0, 1), "no more instructions; position unchanged");
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

#[test]
fn test_resolve_operand_kinds() {
    let program = sample_program();
    let main = program.entry_block();

    // branch→1: a block reference, navigable unconditionally.
    assert_eq!(
        resolve(&program, &main.instrs[0], 0),
        Some(JumpTarget::Block(BlockId(1)))
    );
    // call helper: a defined declaration resolves to its body block.
    assert_eq!(
        resolve(&program, &main.instrs[2], 0),
        Some(JumpTarget::Block(BlockId(3)))
    );
    // call extern-cmd: referenced but never defined in this dump.
    assert_eq!(
        resolve(&program, &main.instrs[3], 0),
        Some(JumpTarget::Unresolved("extern-cmd".into()))
    );
    // immediate operand: not navigable.
    assert_eq!(resolve(&program, &main.instrs[4], 0), None);
    // out-of-range operand index: not navigable.
    assert_eq!(resolve(&program, &main.instrs[0], 7), None);
}

#[test]
fn test_resolve_dangling_block_ref_is_still_a_target() {
    // Existence is the navigator's business, not the resolver's.
    let program = sample_program();
    let main = program.entry_block();
    assert_eq!(
        resolve(&program, &main.instrs[5], 0),
        Some(JumpTarget::Block(BlockId(99)))
    );
}
