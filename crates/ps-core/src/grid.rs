//! Regular sampling grids for rendering probability / concentration fields.
//!
//! A [`Heatmap`] samples a scalar field at `nx × ny` evenly spaced points
//! spanning a region *inclusively* (first and last samples lie on the region
//! edges).  Its [`extent`](Heatmap::extent) is the region padded by half a
//! pixel on every side, so each sample sits at the centre of its pixel when
//! drawn.
//!
//! Values are stored x-major: `values[ix * ny + iy]`.  Row `ix` therefore
//! corresponds to one x coordinate; plotting tools that expect y-rows need a
//! transpose.

use crate::{Extent, PsError, PsResult};

/// Number of samples along each axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub nx: usize,
    pub ny: usize,
}

impl Resolution {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self { nx: 500, ny: 500 }
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// `n == 1` yields `[start]`; `n == 0` yields an empty vec.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// A sampled 2-D scalar field plus the extent it should be drawn over.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heatmap {
    pub resolution: Resolution,
    /// Sample x coordinates (length `nx`).
    pub xs:         Vec<f64>,
    /// Sample y coordinates (length `ny`).
    pub ys:         Vec<f64>,
    /// x-major samples, length `nx * ny`.
    pub values:     Vec<f64>,
    /// `region` padded by half a pixel on each side.
    pub extent:     Extent,
}

impl Heatmap {
    /// Sample `field(x, y)` over `region` at `resolution`.
    ///
    /// Both axes need at least two samples so that a pixel size exists.
    pub fn sample<F>(region: Extent, resolution: Resolution, mut field: F) -> PsResult<Self>
    where
        F: FnMut(f64, f64) -> f64,
    {
        if resolution.nx < 2 || resolution.ny < 2 {
            return Err(PsError::Config(format!(
                "heatmap resolution must be at least 2x2, got {}x{}",
                resolution.nx, resolution.ny
            )));
        }

        let xs = linspace(region.x_min, region.x_max, resolution.nx);
        let ys = linspace(region.y_min, region.y_max, resolution.ny);

        let mut values = Vec::with_capacity(resolution.nx * resolution.ny);
        for &x in &xs {
            for &y in &ys {
                values.push(field(x, y));
            }
        }

        let half_dx = 0.5 * (xs[1] - xs[0]);
        let half_dy = 0.5 * (ys[1] - ys[0]);
        let extent = Extent::new(
            region.x_min - half_dx,
            region.x_max + half_dx,
            region.y_min - half_dy,
            region.y_max + half_dy,
        );

        Ok(Self { resolution, xs, ys, values, extent })
    }

    /// Value at sample `(ix, iy)`, or `None` if out of range.
    #[inline]
    pub fn get(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix < self.resolution.nx && iy < self.resolution.ny {
            Some(self.values[ix * self.resolution.ny + iy])
        } else {
            None
        }
    }

    /// Largest sampled value (`NaN`-free fields only).
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}
