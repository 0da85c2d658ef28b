//! Piecewise-linear response curves
//!
//! Used wherever a ratio or a benefit is mapped to a score factor.
//! Between anchors the curve interpolates linearly; beyond the first and
//! last anchor it holds the anchor value.

use serde::{Deserialize, Serialize};

/// A single anchor point `(x -> y)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f32,
    pub y: f32,
}

impl CurvePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Curve defined by anchors sorted by `x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimpleCurve {
    points: Vec<CurvePoint>,
}

impl SimpleCurve {
    /// Build a curve from `(x, y)` pairs. Points are sorted by `x`.
    pub fn new(points: &[(f32, f32)]) -> Self {
        let mut points: Vec<CurvePoint> =
            points.iter().map(|&(x, y)| CurvePoint::new(x, y)).collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { points }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// True when every anchor is finite and x values strictly increase
    pub fn is_well_formed(&self) -> bool {
        !self.points.is_empty()
            && self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
            && self.points.windows(2).all(|w| w[0].x < w[1].x)
    }

    /// Evaluate the curve at `x`
    ///
    /// NaN in, NaN out.
    pub fn evaluate(&self, x: f32) -> f32 {
        if x.is_nan() {
            return f32::NAN;
        }
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if x <= b.x {
                let span = b.x - a.x;
                if span <= f32::EPSILON {
                    return b.y;
                }
                let t = (x - a.x) / span;
                return a.y + t * (b.y - a.y);
            }
        }

        last.y
    }
}
