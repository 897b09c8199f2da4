//! Shape accumulation between `begin_shape` and `end_shape`.
//!
//! Vertices arrive already in device space. Plain vertices go straight into
//! the buffer; curve vertices collect separately until the spline is
//! flattened into the buffer. Native Bézier segments are emitted as they
//! arrive, which flips the shape into curve mode so the closing flush does
//! not draw those vertices a second time.

use serde::{Deserialize, Serialize};

use crate::command::Instruction;
use crate::curve::flatten_catmull_rom;
use crate::error::{HpglError, Result};
use crate::utils::Point;

const DEFAULT_VERTICES: usize = 512;

/// Kind of shape requested by the host. Every kind is flushed as a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Polygon,
    Lines,
    Points,
}

/// How `end_shape` finishes the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndMode {
    #[default]
    Open,
    Close,
}

/// Growable vertex storage for one open shape.
#[derive(Debug, Clone)]
pub struct ShapeBuffer {
    kind: ShapeKind,
    vertices: Vec<Point>,
    curve_points: Vec<Point>,
    curve_mode: bool,
}

impl ShapeBuffer {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            vertices: Vec::with_capacity(DEFAULT_VERTICES),
            curve_points: Vec::new(),
            curve_mode: false,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn capacity(&self) -> usize {
        self.vertices.capacity()
    }

    /// True once a native curve has been emitted for this shape.
    pub fn in_curve_mode(&self) -> bool {
        self.curve_mode
    }

    pub fn set_curve_mode(&mut self) {
        self.curve_mode = true;
    }

    /// Append a device-space vertex, doubling storage when full.
    pub fn push(&mut self, p: Point) {
        if self.vertices.len() == self.vertices.capacity() {
            self.vertices.reserve_exact(self.vertices.capacity().max(1));
        }
        self.vertices.push(p);
    }

    /// Most recent vertex, if any.
    pub fn last(&self) -> Option<Point> {
        self.vertices.last().copied()
    }

    pub fn push_curve_point(&mut self, p: Point) {
        self.curve_points.push(p);
    }

    pub fn pending_curve_points(&self) -> usize {
        self.curve_points.len()
    }

    /// Flatten pending curve vertices into the buffer.
    pub fn flush_curve(&mut self, detail: u32) {
        if self.curve_points.is_empty() {
            return;
        }
        let points = std::mem::take(&mut self.curve_points);
        for p in flatten_catmull_rom(&points, detail) {
            self.push(p);
        }
    }

    /// Instructions that draw the buffered outline.
    ///
    /// Curve-mode shapes only get the trailing lift since their geometry was
    /// already written. Empty shapes produce nothing.
    pub fn outline(&self, mode: EndMode) -> Vec<Instruction> {
        if self.curve_mode {
            return vec![Instruction::lift()];
        }
        let Some(&first) = self.vertices.first() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(self.vertices.len() + 2);
        out.push(Instruction::pen_up_to(first));
        out.extend(
            self.vertices[1..]
                .iter()
                .map(|&p| Instruction::pen_down_to(p)),
        );
        if mode == EndMode::Close {
            out.push(Instruction::pen_down_to(first));
        }
        out.push(Instruction::lift());
        out
    }
}

/// Shape lifecycle owned by a drawing session.
#[derive(Debug, Clone, Default)]
pub enum ShapeState {
    #[default]
    Idle,
    Open(ShapeBuffer),
}

impl ShapeState {
    pub fn is_open(&self) -> bool {
        matches!(self, ShapeState::Open(_))
    }

    /// Start a new shape, discarding any unfinished one.
    pub fn open(&mut self, kind: ShapeKind) {
        *self = ShapeState::Open(ShapeBuffer::new(kind));
    }

    /// The open buffer, or a precondition error naming `op`.
    pub fn buffer_mut(&mut self, op: &str) -> Result<&mut ShapeBuffer> {
        match self {
            ShapeState::Open(buffer) => Ok(buffer),
            ShapeState::Idle => Err(HpglError::precondition(format!(
                "{op} called outside begin_shape/end_shape"
            ))),
        }
    }

    /// Leave the open state, returning the finished buffer.
    pub fn close(&mut self) -> Result<ShapeBuffer> {
        match std::mem::take(self) {
            ShapeState::Open(buffer) => Ok(buffer),
            ShapeState::Idle => Err(HpglError::precondition(
                "end_shape called without begin_shape",
            )),
        }
    }
}
