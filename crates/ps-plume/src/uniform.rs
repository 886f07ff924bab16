//! Uniform box and circle plumes.
//!
//! These are the simplest hit-probability shapes: constant inside a region,
//! zero outside.  The circle test keeps an all-or-nothing quirk: over a
//! slice of displacements it returns a single value, `1` only when *every*
//! displacement is inside.

use ps_core::PsError;

use crate::{InfluenceBoundary, PlumeError, PlumeModel, PlumeResult};

#[inline]
fn in_box(dx: f64, dy: f64, dim_x: f64, dim_y: f64) -> bool {
    dx.abs() < dim_x && dy.abs() < dim_y
}

#[inline]
fn in_circle(dx: f64, dy: f64, r: f64) -> bool {
    dx * dx + dy * dy <= r * r
}

fn zip_map<F>(dx: &[f64], dy: &[f64], f: F) -> PlumeResult<Vec<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    if dx.len() != dy.len() {
        return Err(PsError::LengthMismatch { what: "dy", expected: dx.len(), got: dy.len() }.into());
    }
    Ok(dx.iter().zip(dy).map(|(&x, &y)| f(x, y)).collect())
}

/// `1.0` where `|dx| < dim_x` and `|dy| < dim_y`, else `0.0`, elementwise.
pub fn uniform_box_solid(dx: &[f64], dy: &[f64], dim_x: f64, dim_y: f64) -> PlumeResult<Vec<f64>> {
    uniform_box_probabilistic(dx, dy, dim_x, dim_y, 1.0)
}

/// `p` inside the box, `0.0` outside, elementwise.
pub fn uniform_box_probabilistic(
    dx:    &[f64],
    dy:    &[f64],
    dim_x: f64,
    dim_y: f64,
    p:     f64,
) -> PlumeResult<Vec<f64>> {
    zip_map(dx, dy, |x, y| if in_box(x, y, dim_x, dim_y) { p } else { 0.0 })
}

/// `1.0` if every `(dx[i], dy[i])` satisfies `dx² + dy² ≤ r²`, else `0.0`.
///
/// An empty input is vacuously inside.
pub fn uniform_circle_solid(dx: &[f64], dy: &[f64], r: f64) -> PlumeResult<f64> {
    let inside = zip_map(dx, dy, |x, y| uniform_circle_solid_at(x, y, r))?;
    Ok(if inside.iter().all(|&v| v == 1.0) { 1.0 } else { 0.0 })
}

/// Single-displacement form of [`uniform_circle_solid`].
pub fn uniform_circle_solid_at(dx: f64, dy: f64, r: f64) -> f64 {
    if in_circle(dx, dy, r) { 1.0 } else { 0.0 }
}

// ── UniformBox model ──────────────────────────────────────────────────────────

/// Rectangular plume centred on the source with per-step hit probability
/// `p` inside (`p = 1` for a solid box) and `0` outside.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformBox {
    dim_x: f64,
    dim_y: f64,
    p:     f64,
}

impl UniformBox {
    pub fn new(dim_x: f64, dim_y: f64, p: f64) -> PlumeResult<Self> {
        for (name, value) in [("dim_x", dim_x), ("dim_y", dim_y)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PlumeError::InvalidParameter {
                    name,
                    value,
                    reason: "box half-width must be finite and positive",
                });
            }
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(PlumeError::InvalidParameter {
                name:   "p",
                value:  p,
                reason: "hit probability must lie in [0, 1]",
            });
        }
        Ok(Self { dim_x, dim_y, p })
    }

    /// A box that is always detected from inside.
    pub fn solid(dim_x: f64, dim_y: f64) -> PlumeResult<Self> {
        Self::new(dim_x, dim_y, 1.0)
    }
}

impl PlumeModel for UniformBox {
    /// Indicator of the box (dimensionless).
    fn concentration_at(&self, dx: f64, dy: f64) -> f64 {
        if in_box(dx, dy, self.dim_x, self.dim_y) { 1.0 } else { 0.0 }
    }

    fn miss_probability_at(&self, dx: f64, dy: f64, _dt: f64) -> f64 {
        1.0 - self.p * self.concentration_at(dx, dy)
    }

    fn boundary(&self) -> InfluenceBoundary {
        InfluenceBoundary::new(self.dim_x, self.dim_x, self.dim_y, self.dim_y)
    }

    fn support(&self) -> Option<InfluenceBoundary> {
        Some(self.boundary())
    }
}
