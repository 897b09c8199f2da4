//! hpglkit - serialize vector drawing calls as HPGL pen-plotter commands.
//!
//! A drawing session ([`graphics::HpglGraphics`]) takes lines, rectangles,
//! ellipses, arcs and shapes in an arbitrary user coordinate space, maps them
//! through an affine transform stack and a paper-size scaler, and writes the
//! resulting `PU`/`PD`/`CI`/`AA` instructions to any [`std::io::Write`] sink.
//!
//! # Example
//!
//! ```ignore
//! use hpglkit_core::config::SessionBuilder;
//! use hpglkit_core::graphics::HpglGraphics;
//! use hpglkit_core::model::PaperSize;
//!
//! let config = SessionBuilder::new().paper(PaperSize::A4).canvas(1000.0, 700.0).build();
//! let mut g = HpglGraphics::with_sink(config, Vec::new());
//! g.begin_session()?;
//! g.line(0.0, 0.0, 100.0, 100.0)?;
//! let hpgl = String::from_utf8(g.end_session()?).unwrap();
//! ```

pub mod command;
pub mod config;
pub mod curve;
pub mod device;
pub mod error;
pub mod graphics;
pub mod model;
pub mod pipeline;
pub mod shape;
pub mod utils;
pub mod writer;

pub use config::{BezierOutput, SessionBuilder, SessionConfig};
pub use device::{ArcMode, DrawingSurface};
pub use error::{HpglError, Result};
pub use graphics::HpglGraphics;
pub use model::{PaperSize, YAxis};
pub use shape::{EndMode, ShapeKind};
