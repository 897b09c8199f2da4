//! sketch2hpgl - Replay a JSON drawing script as an HPGL plot file
//!
//! A script is either a bare array of drawing operations or an object with an
//! optional `config` (see `SessionConfig`) and an `ops` array. Command line
//! options override the script's configuration.
//!
//! ```json
//! {
//!   "config": { "paper": "A4", "canvas_width": 1000, "canvas_height": 700 },
//!   "ops": [
//!     { "op": "rect", "x1": 10, "y1": 10, "x2": 990, "y2": 690 },
//!     { "op": "translate", "x": 500, "y": 350 },
//!     { "op": "circle", "x": 0, "y": 0, "diameter": 200 }
//!   ]
//! }
//! ```

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use hpglkit_core::config::SessionConfig;
use hpglkit_core::graphics::HpglGraphics;
use hpglkit_core::{ArcMode, BezierOutput, DrawingSurface, EndMode, ShapeKind, YAxis};
use serde::Deserialize;
use tracing::{Level, debug};

/// Orientation of the script's y axis.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum AxisArg {
    /// Origin top-left, y grows downward
    Down,
    /// Origin bottom-left, y grows upward
    Up,
}

/// How Bézier vertices are written.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum BezierArg {
    /// Non-standard BZ instruction
    Native,
    /// Flattened into PD segments
    Polyline,
}

/// Replay a JSON drawing script as HPGL pen-plotter commands.
#[derive(Parser, Debug)]
#[command(name = "sketch2hpgl")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON drawing script, or "-" for stdin
    script: String,

    /// Path to the HPGL file to write, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Paper preset (A3 or A4)
    #[arg(short = 'p', long)]
    paper: Option<String>,

    /// Logical canvas width
    #[arg(short = 'W', long)]
    width: Option<f64>,

    /// Logical canvas height
    #[arg(short = 'H', long)]
    height: Option<f64>,

    /// Chord angle in degrees for circles, ellipses and arcs
    #[arg(short = 'a', long = "chord-angle")]
    chord_angle: Option<f64>,

    /// Direction of the canvas y axis
    #[arg(short = 'y', long = "y-axis", value_enum)]
    y_axis: Option<AxisArg>,

    /// Bézier output strategy
    #[arg(short = 'b', long, value_enum)]
    bezier: Option<BezierArg>,

    /// Samples per flattened curve segment
    #[arg(long = "curve-detail")]
    curve_detail: Option<u32>,
}

/// One drawing call.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum DrawOp {
    PushMatrix,
    PopMatrix,
    ResetMatrix,
    Translate {
        x: f64,
        y: f64,
    },
    Rotate {
        angle: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Rect {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Ellipse {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    Circle {
        x: f64,
        y: f64,
        diameter: f64,
    },
    Arc {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        start: f64,
        stop: f64,
        #[serde(default)]
        mode: ArcMode,
    },
    BeginShape {
        #[serde(default)]
        kind: ShapeKind,
    },
    Vertex {
        x: f64,
        y: f64,
    },
    CurveVertex {
        x: f64,
        y: f64,
    },
    BezierVertex {
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        x4: f64,
        y4: f64,
    },
    EndShape {
        #[serde(default)]
        mode: EndMode,
    },
    ChordAngle {
        degrees: f64,
    },
    Pen {
        pen: u32,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Script {
    Ops(Vec<DrawOp>),
    Full {
        #[serde(default)]
        config: SessionConfig,
        ops: Vec<DrawOp>,
    },
}

impl Script {
    fn into_parts(self) -> (SessionConfig, Vec<DrawOp>) {
        match self {
            Script::Full { config, ops } => (config, ops),
            Script::Ops(ops) => (SessionConfig::default(), ops),
        }
    }
}

/// Apply command line overrides on top of the script's configuration.
fn apply_overrides(config: &mut SessionConfig, args: &Args) {
    if let Some(width) = args.width {
        config.canvas_width = width;
    }
    if let Some(height) = args.height {
        config.canvas_height = height;
    }
    if let Some(chord_angle) = args.chord_angle {
        config.chord_angle = chord_angle;
    }
    if let Some(y_axis) = args.y_axis {
        config.y_axis = match y_axis {
            AxisArg::Down => YAxis::Down,
            AxisArg::Up => YAxis::Up,
        };
    }
    if let Some(bezier) = args.bezier {
        config.bezier = match bezier {
            BezierArg::Native => BezierOutput::Native,
            BezierArg::Polyline => BezierOutput::Polyline,
        };
    }
    if let Some(detail) = args.curve_detail {
        config.curve_detail = detail;
    }
}

fn apply(surface: &mut dyn DrawingSurface, op: &DrawOp) -> hpglkit_core::Result<()> {
    match *op {
        DrawOp::PushMatrix => surface.push_matrix(),
        DrawOp::PopMatrix => surface.pop_matrix(),
        DrawOp::ResetMatrix => {
            surface.reset_matrix();
            Ok(())
        }
        DrawOp::Translate { x, y } => {
            surface.translate(x, y);
            Ok(())
        }
        DrawOp::Rotate { angle } => {
            surface.rotate(angle);
            Ok(())
        }
        DrawOp::Line { x1, y1, x2, y2 } => surface.line(x1, y1, x2, y2),
        DrawOp::Rect { x1, y1, x2, y2 } => surface.rect(x1, y1, x2, y2),
        DrawOp::Ellipse { x, y, w, h } => surface.ellipse(x, y, w, h),
        DrawOp::Circle { x, y, diameter } => surface.circle(x, y, diameter),
        DrawOp::Arc {
            x,
            y,
            w,
            h,
            start,
            stop,
            mode,
        } => surface.arc(x, y, w, h, start, stop, mode),
        DrawOp::BeginShape { kind } => surface.begin_shape(kind),
        DrawOp::Vertex { x, y } => surface.vertex(x, y),
        DrawOp::CurveVertex { x, y } => surface.curve_vertex(x, y),
        DrawOp::BezierVertex {
            x2,
            y2,
            x3,
            y3,
            x4,
            y4,
        } => surface.bezier_vertex(x2, y2, x3, y3, x4, y4),
        DrawOp::EndShape { mode } => surface.end_shape(mode),
        DrawOp::ChordAngle { degrees } => surface.set_chord_angle(degrees),
        DrawOp::Pen { pen } => surface.select_pen(pen),
    }
}

/// Run one session over `ops` and flush its output.
fn replay<W: Write>(
    mut graphics: HpglGraphics<W>,
    paper: Option<&str>,
    ops: &[DrawOp],
) -> hpglkit_core::Result<()> {
    if let Some(name) = paper {
        graphics.set_paper_size(name)?;
    }
    graphics.begin_session()?;
    for (index, op) in ops.iter().enumerate() {
        apply(&mut graphics, op)
            .inspect_err(|_| debug!(index, ?op, "drawing operation failed"))?;
    }
    graphics.end_session()?;
    Ok(())
}

fn read_script(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.debug);

    let text = read_script(&args.script)
        .map_err(|e| format!("Failed to read {}: {}", args.script, e))?;
    let script: Script = match serde_json::from_str(&text) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Error: invalid drawing script {}: {}", args.script, e);
            std::process::exit(1);
        }
    };
    let (mut config, ops) = script.into_parts();
    apply_overrides(&mut config, &args);
    debug!(ops = ops.len(), "loaded drawing script");

    let result = if args.outfile == "-" {
        let sink: Box<dyn Write> = Box::new(BufWriter::new(io::stdout()));
        replay(HpglGraphics::with_sink(config, sink), args.paper.as_deref(), &ops)
    } else {
        config.output_path = Some(PathBuf::from(&args.outfile));
        replay(HpglGraphics::new(config), args.paper.as_deref(), &ops)
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
