//! HPGL instructions.
//!
//! Each [`Instruction`] renders as one semicolon-terminated mnemonic with its
//! parameters. Several instructions may share an output line (the header is
//! `IN;SP1;`, arcs are `PD;AA...;`).

use std::fmt;

use crate::utils::{Point, format_number};

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `IN;` initialize the plotter
    Initialize,
    /// `SP<n>;` select pen
    SelectPen(u32),
    /// `PU[x,y...];` lift the pen, optionally moving through points
    PenUp(Vec<Point>),
    /// `PD[x,y...];` lower the pen, optionally drawing through points
    PenDown(Vec<Point>),
    /// `CI<radius>,<chord>;` circle around the current pen position
    Circle { radius: f64, chord_angle: f64 },
    /// `AA<cx>,<cy>,<sweep>,<chord>;` arc about an absolute center
    ArcAbsolute {
        center: Point,
        sweep: f64,
        chord_angle: f64,
    },
    /// `BZ<x2>,<y2>,<x3>,<y3>,<x4>,<y4>;` cubic curve from the pen position.
    /// Not part of standard HPGL; parameters are truncated to integers.
    Bezier([Point; 3]),
}

impl Instruction {
    /// `PU;` with no coordinates.
    pub fn lift() -> Self {
        Instruction::PenUp(Vec::new())
    }

    pub fn pen_up_to(p: Point) -> Self {
        Instruction::PenUp(vec![p])
    }

    pub fn pen_down_to(p: Point) -> Self {
        Instruction::PenDown(vec![p])
    }

    /// Two-letter mnemonic.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Initialize => "IN",
            Instruction::SelectPen(_) => "SP",
            Instruction::PenUp(_) => "PU",
            Instruction::PenDown(_) => "PD",
            Instruction::Circle { .. } => "CI",
            Instruction::ArcAbsolute { .. } => "AA",
            Instruction::Bezier(_) => "BZ",
        }
    }
}

fn write_points(f: &mut fmt::Formatter<'_>, points: &[Point]) -> fmt::Result {
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{},{}", format_number(*x), format_number(*y))?;
    }
    Ok(())
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())?;
        match self {
            Instruction::Initialize => {}
            Instruction::SelectPen(pen) => write!(f, "{pen}")?,
            Instruction::PenUp(points) | Instruction::PenDown(points) => {
                write_points(f, points)?;
            }
            Instruction::Circle {
                radius,
                chord_angle,
            } => write!(
                f,
                "{},{}",
                format_number(*radius),
                format_number(*chord_angle)
            )?,
            Instruction::ArcAbsolute {
                center,
                sweep,
                chord_angle,
            } => write!(
                f,
                "{},{},{},{}",
                format_number(center.0),
                format_number(center.1),
                format_number(*sweep),
                format_number(*chord_angle)
            )?,
            Instruction::Bezier(points) => {
                for (i, (x, y)) in points.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{},{}", x.trunc() as i64, y.trunc() as i64)?;
                }
            }
        }
        f.write_str(";")
    }
}
