//! Arc point generator.
//!
//! Generates a fixed number of points along an elliptical arc defined by
//! center, radii, start angle and angular extent, and closes arcs into
//! pie-slice sectors.

use crate::basics::{PointD, PI};

/// Arc point generator.
///
/// Produces `num_points` points evenly spaced from `start` to
/// `start + extent` inclusive. An extent that is not positive or exceeds a
/// full turn is treated as a full turn.
#[derive(Debug, Clone)]
pub struct Arc {
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    start: f64,
    da: f64,
    num: u32,
    step: u32,
}

impl Arc {
    /// Create a new arc. Angles are in radians, counter-clockwise.
    #[allow(clippy::too_many_arguments)]
    pub fn new(x: f64, y: f64, rx: f64, ry: f64, start: f64, extent: f64, num_points: u32) -> Self {
        let mut arc = Self {
            x,
            y,
            rx,
            ry,
            start,
            da: 0.0,
            num: num_points,
            step: 0,
        };
        arc.normalize(extent);
        arc
    }

    /// Compute the angular step for the given extent.
    fn normalize(&mut self, extent: f64) {
        let extent = if extent <= 0.0 || extent > 2.0 * PI {
            2.0 * PI
        } else {
            extent
        };
        self.da = if self.num > 1 {
            extent / (self.num - 1) as f64
        } else {
            0.0
        };
    }

    fn center(&self) -> PointD {
        PointD::new(self.x, self.y)
    }

    fn rewind(&mut self) {
        self.step = 0;
    }

    /// Pie-slice ring: center, the arc points, then the center again.
    pub fn sector(&self) -> Vec<PointD> {
        let mut gen = self.clone();
        gen.rewind();
        let mut pts = Vec::with_capacity(self.num as usize + 2);
        pts.push(self.center());
        pts.extend(gen);
        pts.push(self.center());
        pts
    }
}

impl Iterator for Arc {
    type Item = PointD;

    fn next(&mut self) -> Option<PointD> {
        if self.step >= self.num {
            return None;
        }
        let angle = self.start + self.da * self.step as f64;
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
