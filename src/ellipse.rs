//! Ellipse point generator.
//!
//! Generates points approximating an ellipse as a regular polygon. Iterate
//! it for the open point sequence, or call [`Ellipse::ring`] for a closed ring.

use crate::basics::{PointD, PI};

/// Ellipse point generator.
///
/// Produces `num_steps` points starting at angle 0 and going
/// counter-clockwise.
#[derive(Debug, Clone)]
pub struct Ellipse {
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    num: u32,
    step: u32,
}

impl Ellipse {
    /// Create a new ellipse centred on (x, y) with radii `rx`, `ry`.
    pub fn new(x: f64, y: f64, rx: f64, ry: f64, num_steps: u32) -> Self {
        Self {
            x,
            y,
            rx,
            ry,
            num: num_steps,
            step: 0,
        }
    }

    /// Ellipse inscribed in a `width` × `height` box centred on (cx, cy).
    pub fn from_bounds(cx: f64, cy: f64, width: f64, height: f64, num_steps: u32) -> Self {
        Self::new(cx, cy, width / 2.0, height / 2.0, num_steps)
    }

    pub fn num_steps(&self) -> u32 {
        self.num
    }

    /// Restart iteration.
    pub fn rewind(&mut self) {
        self.step = 0;
    }

    /// All points, closed by repeating the first one.
    pub fn ring(&self) -> Vec<PointD> {
        let mut gen = self.clone();
        gen.rewind();
        let mut pts: Vec<PointD> = gen.collect();
        if let Some(first) = pts.first().copied() {
            pts.push(first);
        }
        pts
    }
}

impl Iterator for Ellipse {
    type Item = PointD;

    fn next(&mut self) -> Option<PointD> {
        if self.step >= self.num {
            return None;
        }
        let angle = self.step as f64 / self.num as f64 * 2.0 * PI;
        self.step += 1;
        Some(PointD::new(
            self.x + angle.cos() * self.rx,
            self.y + angle.sin() * self.ry,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
