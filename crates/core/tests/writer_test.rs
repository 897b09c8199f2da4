//! Tests for the line-oriented HPGL command writer.

use hpglkit_core::HpglError;
use hpglkit_core::command::Instruction;
use hpglkit_core::writer::CommandWriter;

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_header_and_footer() {
    let mut w = CommandWriter::new(Vec::new());
    w.write_header().unwrap();
    w.write_footer().unwrap();
    assert_eq!(w.lines_written(), 2);
    assert_eq!(text(w.close().unwrap()), "IN;SP1;\nPU0,0;\n");
}

#[test]
fn test_header_only_once() {
    let mut w = CommandWriter::new(Vec::new());
    w.write_header().unwrap();
    assert!(matches!(w.write_header(), Err(HpglError::Precondition(_))));
    assert_eq!(text(w.close().unwrap()), "IN;SP1;\n");
}

#[test]
fn test_write_puts_value_on_next_line() {
    let mut w = CommandWriter::new(Vec::new());
    w.write("VS", 2.5).unwrap();
    w.write("CT", -0.0001).unwrap();
    assert_eq!(text(w.close().unwrap()), "VS\n2.5\nCT\n0\n");
}

#[test]
fn test_emit_line_joins_instructions() {
    let mut w = CommandWriter::new(Vec::new());
    w.emit_line(&[
        Instruction::PenDown(Vec::new()),
        Instruction::ArcAbsolute {
            center: (1.0, 2.0),
            sweep: 45.0,
            chord_angle: 5.0,
        },
    ])
    .unwrap();
    w.emit(&Instruction::SelectPen(3)).unwrap();
    assert_eq!(text(w.close().unwrap()), "PD;AA1,2,45,5;\nSP3;\n");
}

#[test]
fn test_write_after_close_is_rejected() {
    let mut w = CommandWriter::new(Vec::new());
    w.close().unwrap();
    assert!(w.is_closed());
    assert!(matches!(w.write_line("PU;"), Err(HpglError::Precondition(_))));
    assert!(matches!(w.flush(), Err(HpglError::Precondition(_))));
    assert!(matches!(w.close(), Err(HpglError::Precondition(_))));
}

#[test]
fn test_open_without_destination() {
    assert!(matches!(
        CommandWriter::open(None),
        Err(HpglError::Configuration(_))
    ));
}

#[test]
fn test_open_in_missing_directory() {
    let path = std::env::temp_dir()
        .join("hpglkit_writer_missing")
        .join("deeper")
        .join("out.hpgl");
    assert!(matches!(
        CommandWriter::open(Some(path.as_path())),
        Err(HpglError::Io(_))
    ));
}

#[test]
fn test_open_file_round_trip() {
    let path = std::env::temp_dir().join(format!("hpglkit_writer_{}.hpgl", std::process::id()));
    let mut w = CommandWriter::open(Some(path.as_path())).unwrap();
    w.write_header().unwrap();
    w.emit(&Instruction::pen_up_to((12.0, 34.5))).unwrap();
    w.write_footer().unwrap();
    drop(w.close().unwrap());

    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(written, "IN;SP1;\nPU12,34.5;\nPU0,0;\n");
}
