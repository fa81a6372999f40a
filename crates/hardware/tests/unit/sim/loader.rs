//! # Program File Loader Tests

use std::fs;

use neander_core::asm::SourceFile;
use neander_core::common::{Base, LoadError};
use neander_core::sim::{load_source, save_source};
use pretty_assertions::assert_eq;

#[test]
fn loads_file_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.txt");
    fs::write(&path, "#HEX\nLDA 1F\nHLT\n").unwrap();

    let source = load_source(&path, Base::Dec).unwrap();
    assert_eq!(source.base, Base::Hex);
    assert_eq!(source.lines, vec!["LDA 1F", "HLT"]);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let source = SourceFile::new(Base::Hex, ["VLD A", "HLT"]);

    save_source(&path, &source).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "#HEX\nVLD A\nHLT");
    assert_eq!(load_source(&path, Base::Dec).unwrap(), source);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    let err = load_source(&path, Base::Dec).unwrap_err();
    let LoadError::Io { path: reported, .. } = &err;
    assert_eq!(reported, &path);
    assert!(err.to_string().contains("absent.txt"));
}
