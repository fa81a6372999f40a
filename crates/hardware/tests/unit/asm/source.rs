//! # Program File Format Tests

use neander_core::asm::SourceFile;
use neander_core::common::Base;
use pretty_assertions::assert_eq;

#[test]
fn hex_header_is_consumed() {
    let src = SourceFile::parse("#HEX\nLDA 1F\nHLT", Base::Dec);
    assert_eq!(src.base, Base::Hex);
    assert_eq!(src.lines, vec!["LDA 1F", "HLT"]);
}

#[test]
fn header_is_trimmed_and_case_insensitive() {
    let src = SourceFile::parse("  #dec  \r\nNOT\r\n", Base::Hex);
    assert_eq!(src.base, Base::Dec);
    assert_eq!(src.lines, vec!["NOT"]);
}

#[test]
fn missing_header_keeps_first_line() {
    let src = SourceFile::parse("LDA 10\nHLT", Base::Hex);
    assert_eq!(src.base, Base::Hex);
    assert_eq!(src.lines, vec!["LDA 10", "HLT"]);
}

#[test]
fn render_writes_header_first() {
    let src = SourceFile::new(Base::Dec, ["LDA 10", "HLT"]);
    assert_eq!(src.render(), "#DEC\nLDA 10\nHLT");
    assert_eq!(SourceFile::parse(&src.render(), Base::Hex), src);
}

#[test]
fn only_one_trailing_terminator_is_dropped() {
    let src = SourceFile::parse("NOT\n\n", Base::Dec);
    assert_eq!(src.lines, vec!["NOT", ""]);
    assert_eq!(SourceFile::parse("", Base::Dec).lines, vec![""]);
}
