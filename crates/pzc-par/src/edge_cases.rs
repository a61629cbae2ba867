//! Edge case tests for pzc-par.

use crate::compile_text;
use crate::error::ParseError;
use pzc_util::{Instruction, Op};

// ==================== WHOLE-PROGRAM SHAPES ====================

#[test]
fn test_edge_constant_plus_literal_program() {
    let code = compile_text("const a = 5; var b; begin b := a + 3; write b end.").unwrap();
    assert_eq!(
        code,
        vec![
            Instruction::new(Op::Jmp, 0, 0, 1),
            Instruction::new(Op::Inc, 0, 0, 5),
            Instruction::new(Op::Lit, 0, 0, 5),
            Instruction::new(Op::Lit, 1, 0, 3),
            Instruction::new(Op::Add, 0, 0, 1),
            Instruction::new(Op::Sto, 0, 0, 4),
            Instruction::new(Op::Lod, 0, 0, 4),
            Instruction::new(Op::SioOut, 0, 0, 1),
            Instruction::new(Op::Rtn, 0, 0, 0),
            Instruction::new(Op::SioHalt, 0, 0, 3),
        ]
    );
}

#[test]
fn test_edge_procedure_program_shape() {
    let code = compile_text("procedure p; var a; begin a := 10; write a end; call p.").unwrap();
    assert_eq!(
        code,
        vec![
            Instruction::new(Op::Jmp, 0, 0, 8),
            Instruction::new(Op::Jmp, 0, 0, 2),
            Instruction::new(Op::Inc, 0, 0, 5),
            Instruction::new(Op::Lit, 0, 0, 10),
            Instruction::new(Op::Sto, 0, 0, 4),
            Instruction::new(Op::Lod, 0, 0, 4),
            Instruction::new(Op::SioOut, 0, 0, 1),
            Instruction::new(Op::Rtn, 0, 0, 0),
            Instruction::new(Op::Inc, 0, 0, 4),
            Instruction::new(Op::Cal, 0, 0, 1),
            Instruction::new(Op::Rtn, 0, 0, 0),
            Instruction::new(Op::SioHalt, 0, 0, 3),
        ]
    );
}

#[test]
fn test_edge_three_level_nesting_distances() {
    let source = "\
var g;
procedure outer;
  procedure inner;
    begin g := g + 1 end;
  call inner;
begin call outer; write g end.";
    let code = compile_text(source).unwrap();
    // inner runs at level 2; g is declared at level 0.
    assert!(code.contains(&Instruction::new(Op::Lod, 0, 2, 4)));
    assert!(code.contains(&Instruction::new(Op::Sto, 0, 2, 4)));
    // outer calls inner one level down from its own declaration level.
    assert!(code.contains(&Instruction::new(Op::Cal, 0, 0, 2)));
}

#[test]
fn test_edge_shadowing_uses_innermost() {
    let source = "\
var x;
procedure p;
  var x;
  begin x := 1 end;
begin x := 2 end.";
    let code = compile_text(source).unwrap();
    // Inside p the local x (distance 0) is the store target, outside the
    // global x (also distance 0 there); no store crosses a static link.
    let stores: Vec<_> = code.iter().filter(|i| i.op == Op::Sto).collect();
    assert_eq!(stores.len(), 2);
    assert!(stores.iter().all(|i| i.l == 0 && i.m == 4));
}

// ==================== BACK-PATCH DIRECTION INVARIANTS ====================

fn assert_branch_directions(code: &[Instruction]) {
    // Conditional exits always branch forward; only the while back-edge
    // JMP may point backward.
    for (address, instruction) in code.iter().enumerate() {
        if instruction.op == Op::Jpc {
            assert!(
                instruction.m >= address as i64,
                "JPC at {address} branches backward to {}",
                instruction.m
            );
        }
    }
}

#[test]
fn test_edge_branch_directions() {
    let sources = [
        "var x; begin if x > 0 then x := 1 else x := 2 end.",
        "var i; begin i := 0; while i < 10 do i := i + 1 end.",
        "var a, b; begin while a < 3 do begin if odd a then b := b + 1 else b := b - 1; a := a + 1 end end.",
    ];
    for source in sources {
        let code = compile_text(source).unwrap();
        assert_branch_directions(&code);
    }
}

#[test]
fn test_edge_while_back_edge_is_backward() {
    let code = compile_text("var i; begin while i < 3 do i := i + 1 end.").unwrap();
    let back_edge = code
        .iter()
        .enumerate()
        .find(|(address, i)| i.op == Op::Jmp && i.m < *address as i64)
        .map(|(address, i)| (address, i.m));
    assert_eq!(back_edge, Some((10, 2)));
}

// ==================== NESTED CONTROL FLOW ====================

#[test]
fn test_edge_nested_if_in_while_body() {
    let source = "\
var n, r;
begin
  read n;
  while n > 1 do
    begin
      if odd n then n := 3 * n + 1 else n := n / 2;
      r := r + 1
    end;
  write r
end.";
    let code = compile_text(source).unwrap();
    assert_branch_directions(&code);
    // One loop back-edge, one else-skip jump, plus the block entry jump.
    let jumps = code.iter().filter(|i| i.op == Op::Jmp).count();
    assert_eq!(jumps, 3);
}

#[test]
fn test_edge_deeply_parenthesized() {
    let code = compile_text("var x; begin x := ((((1)))) end.").unwrap();
    assert_eq!(code[2], Instruction::new(Op::Lit, 0, 0, 1));
    assert_eq!(code[3].op, Op::Sto);
}

// ==================== DECLARATION EDGE CASES ====================

#[test]
fn test_edge_variable_addresses_within_declaration() {
    let code = compile_text("var a, b, c; begin c := 1; b := 2; a := 3 end.").unwrap();
    let stores: Vec<i64> = code
        .iter()
        .filter(|i| i.op == Op::Sto)
        .map(|i| i.m)
        .collect();
    // c at offset 6, b at 5, a at 4.
    assert_eq!(stores, vec![6, 5, 4]);
}

#[test]
fn test_edge_procedure_level_recorded_at_declaration() {
    // q is declared inside p, so calling q from p's body is distance 0.
    let source = "\
procedure p;
  procedure q;
    ;
  call q;
call p.";
    let code = compile_text(source).unwrap();
    let calls: Vec<_> = code.iter().filter(|i| i.op == Op::Cal).collect();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|i| i.l == 0));
}

#[test]
fn test_edge_trailing_garbage_after_period() {
    // The period ends the parse; trailing lexemes are not consumed.
    let code = compile_text("begin end. begin end.").unwrap();
    assert_eq!(code.len(), 4);
}

#[test]
fn test_edge_else_without_if_is_error() {
    // "else" starts no statement, so the begin block expects end.
    assert_eq!(
        compile_text("begin else end.").unwrap_err(),
        ParseError::SemicolonOrEndExpected
    );
}
