//! # Assembler Tests
//!
//! Covers cell layout, classification tags, literal defaults, the
//! end-of-memory truncation rule, and agreement with `instruction_size`.

use neander_core::asm::{assemble, instruction_size};
use neander_core::common::Base;
use neander_core::isa::Category;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[test]
fn lays_out_instructions_and_data() {
    let asm = assemble(&["LDA 10", "ADD 11", "STA 12", "HLT"], Base::Dec);
    let m = &asm.memory;
    assert_eq!(&m.cells()[..7], &[32, 10, 48, 11, 16, 12, 240]);
    assert_eq!(m.class(0), Some(Category::Operand));
    assert_eq!(m.class(1), None);
    assert_eq!(m.class(6), Some(Category::Simple));
    assert_eq!(asm.report.cells_used, 7);
    assert_eq!(asm.report.lines_assembled, 4);
    assert!(!asm.report.truncated);
}

#[test]
fn blank_and_comment_lines_take_one_zero_cell() {
    let asm = assemble(&["NOT", "", "   ; note", "HLT"], Base::Dec);
    assert_eq!(&asm.memory.cells()[..4], &[96, 0, 0, 240]);
    assert_eq!(asm.memory.class(1), None);
    assert_eq!(asm.memory.class(3), Some(Category::Simple));
}

#[test]
fn missing_operand_still_reserves_its_cell() {
    let asm = assemble(&["LDA", "7"], Base::Dec);
    assert_eq!(&asm.memory.cells()[..3], &[32, 0, 7]);
    assert_eq!(asm.report.cells_used, 3);
}

#[test]
fn mnemonics_are_case_insensitive_and_commas_separate() {
    let asm = assemble(&["lda,20", "Vadd 30"], Base::Dec);
    assert_eq!(&asm.memory.cells()[..4], &[32, 20, 243, 30]);
    assert_eq!(asm.memory.class(2), Some(Category::Vector));
}

#[test]
fn leading_comma_makes_a_data_line() {
    let asm = assemble(&[",LDA 10"], Base::Dec);
    assert_eq!(asm.memory.read(0), 0);
    assert_eq!(asm.memory.class(0), None);
    assert_eq!(asm.report.cells_used, 1);
}

#[rstest]
#[case("-1", 255)]
#[case("300", 44)]
#[case("hello", 0)]
#[case("5 6", 5)]
#[case("9 ; nine", 9)]
fn data_literals(#[case] line: &str, #[case] value: u8) {
    let asm = assemble(&[line], Base::Dec);
    assert_eq!(asm.memory.read(0), value);
    assert_eq!(asm.memory.class(0), None);
}

#[test]
fn hex_base_applies_to_operands_and_data() {
    let asm = assemble(&["LDA 1F", "0x20", "ff"], Base::Hex);
    assert_eq!(&asm.memory.cells()[..4], &[32, 31, 32, 255]);
}

#[test]
fn operand_instruction_that_overflows_is_omitted() {
    let mut lines = vec!["NOP"; 255];
    lines.push("LDA 1");
    lines.push("HLT");
    let asm = assemble(&lines, Base::Dec);

    assert_eq!(asm.report.cells_used, 255);
    assert_eq!(asm.report.lines_assembled, 255);
    assert!(asm.report.truncated);
    assert_eq!(asm.memory.read(255), 0);
    assert_eq!(asm.memory.class(255), None);
    assert_eq!(asm.memory.class(254), Some(Category::Simple));
}

#[test]
fn simple_instruction_fits_in_last_cell() {
    let mut lines = vec!["NOP"; 255];
    lines.push("HLT");
    let asm = assemble(&lines, Base::Dec);
    assert_eq!(asm.memory.read(255), 240);
    assert_eq!(asm.report.cells_used, 256);
    assert!(!asm.report.truncated);
}

#[test]
fn lines_past_end_of_memory_are_dropped() {
    let lines = vec!["1"; 300];
    let asm = assemble(&lines, Base::Dec);
    assert_eq!(asm.report.cells_used, 256);
    assert_eq!(asm.report.lines_assembled, 256);
    assert!(asm.report.truncated);
}

#[test]
fn assembly_is_deterministic() {
    let src = ["VLD 11", "LDA 15", "VEADD", "VNOT", "VST 20", "HLT"];
    assert_eq!(assemble(&src, Base::Dec), assemble(&src, Base::Dec));
}

fn source_line() -> impl Strategy<Value = String> {
    let mnemonic = prop::sample::select(vec![
        "NOP", "sta", "LDA", "add", "OR", "AND", "NOT", "JMP", "jn", "JZ", "HLT", "VLD", "VST",
        "VADD", "VEADD", "VOR", "VAND", "vnot", "XYZ",
    ]);
    prop_oneof![
        (mnemonic, prop::option::of(0u16..400)).prop_map(|(m, arg)| match arg {
            Some(v) => format!("{m} {v}"),
            None => m.to_string(),
        }),
        (-300i32..300).prop_map(|v| v.to_string()),
        Just(String::new()),
        Just("; comment".to_string()),
        "[ ,;A-Za-z0-9]{0,12}",
    ]
}

proptest! {
    #[test]
    fn instruction_size_agrees_with_assembler(line in source_line()) {
        let asm = assemble(&[line.as_str()], Base::Dec);
        prop_assert_eq!(asm.report.cells_used, instruction_size(&line));
    }
}
