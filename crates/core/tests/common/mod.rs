//! Shared helpers for session-level tests.

#![allow(dead_code)]

use hpglkit_core::config::{SessionBuilder, SessionConfig};
use hpglkit_core::graphics::HpglGraphics;
use hpglkit_core::model::{PaperSize, YAxis};

/// A4 with a canvas matching the device height, so the ratio is exactly 1.
pub fn unit_config(y_axis: YAxis) -> SessionConfig {
    SessionBuilder::new()
        .paper(PaperSize::A4)
        .canvas(11040.0, 7721.0)
        .y_axis(y_axis)
        .build()
}

/// Session writing to memory, already begun.
pub fn open_session(config: SessionConfig) -> HpglGraphics<Vec<u8>> {
    let mut g = HpglGraphics::with_sink(config, Vec::new());
    g.begin_session().unwrap();
    g
}

/// End the session and return the output lines.
pub fn finish(mut g: HpglGraphics<Vec<u8>>) -> Vec<String> {
    let bytes = g.end_session().unwrap();
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Output lines between the header and the footer.
pub fn body(g: HpglGraphics<Vec<u8>>) -> Vec<String> {
    let lines = finish(g);
    assert_eq!(lines.first().map(String::as_str), Some("IN;SP1;"));
    assert_eq!(lines.last().map(String::as_str), Some("PU0,0;"));
    lines[1..lines.len() - 1].to_vec()
}

pub fn count_prefix(lines: &[String], prefix: &str) -> usize {
    lines.iter().filter(|l| l.starts_with(prefix)).count()
}
