//! Gaussian (advection–diffusion) plume approximation.

use std::f64::consts::{LN_2, PI};

use crate::{BoundaryPolicy, InfluenceBoundary, PlumeError, PlumeModel, PlumeResult};

/// Default probability that a particle diffuses past the computed boundary.
pub const DEFAULT_ESCAPE_PROBABILITY: f64 = 1e-4;

/// Physical parameters of a Gaussian plume.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussianParams {
    /// Source emission rate.
    pub r:   f64,
    /// Turbulent diffusivity.
    pub d:   f64,
    /// Wind speed along `+x`.
    pub w:   f64,
    /// Particle lifetime (s).
    pub tau: f64,
    /// Probability that a particle escapes the computed boundary.
    pub q:   f64,
}

impl GaussianParams {
    /// Parameters with the default escape probability `q = 1e-4`.
    pub fn new(r: f64, d: f64, w: f64, tau: f64) -> Self {
        Self { r, d, w, tau, q: DEFAULT_ESCAPE_PROBABILITY }
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Reject non-physical values before any square root or logarithm sees
    /// them.
    pub fn validate(&self) -> PlumeResult<()> {
        let bad = |name, value, reason| Err(PlumeError::InvalidParameter { name, value, reason });

        if !(self.r.is_finite() && self.r >= 0.0) {
            return bad("r", self.r, "emission rate must be finite and non-negative");
        }
        if !(self.d.is_finite() && self.d > 0.0) {
            return bad("d", self.d, "diffusivity must be finite and positive");
        }
        if !(self.w.is_finite() && self.w >= 0.0) {
            return bad("w", self.w, "wind speed must be finite and non-negative");
        }
        if !(self.tau.is_finite() && self.tau > 0.0) {
            return bad("tau", self.tau, "particle lifetime must be finite and positive");
        }
        if !(self.q > 0.0 && self.q < 1.0) {
            return bad("q", self.q, "escape probability must lie strictly between 0 and 1");
        }
        Ok(())
    }

    /// Boundary outside which fewer than a fraction `q` of particles reach:
    ///
    /// ```text
    /// crosswind = sqrt(-4·d·τ·ln q)
    /// downwind  = w·τ + crosswind
    /// upwind    = 0
    /// ```
    pub fn influence_boundary(&self) -> InfluenceBoundary {
        let crosswind = (-4.0 * self.d * self.tau * self.q.ln()).sqrt();
        let downwind = self.w * self.tau + crosswind;
        InfluenceBoundary::new(0.0, downwind, crosswind, crosswind)
    }
}

/// Gaussian plume concentration at `(dx, dy)`:
///
/// ```text
/// c = r / (2·sqrt(π·d·dx)) · exp(-w·dy² / (4·d·dx))     dx > 0
/// c = +∞                                                 dx = 0, dy = 0
/// c = 0                                                  otherwise
/// ```
///
/// The upwind cutoff is checked before the square root, so `dx ≤ 0` never
/// reaches it.  For `dx` small enough that `π·d·dx` underflows the value is
/// recomputed in log form, so a positive `dx` never yields NaN.
#[inline]
pub fn gaussian_concentration(dx: f64, dy: f64, r: f64, d: f64, w: f64) -> f64 {
    if dx > 0.0 {
        let norm_factor = r / (2.0 * (PI * d * dx).sqrt());
        let exp_factor = (-w * dy * dy / (4.0 * d * dx)).exp();
        let c = norm_factor * exp_factor;
        if c.is_finite() { c } else { log_concentration(dx, dy, r, d, w) }
    } else if dx == 0.0 && dy == 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// `exp(ln r - ln 2 - ½·(ln(π·d) + ln dx) - w·dy²/(4·d·dx))` with each
/// logarithm taken separately.  `dx > 0`.
fn log_concentration(dx: f64, dy: f64, r: f64, d: f64, w: f64) -> f64 {
    let spread = w * dy * dy;
    let exponent = if spread == 0.0 { 0.0 } else { -spread / (4.0 * d) / dx };
    (r.ln() - LN_2 - 0.5 * ((PI * d).ln() + dx.ln()) + exponent).exp()
}

/// Probabilistic Gaussian plume: `miss = exp(-c·dt)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gaussian2D {
    params:   GaussianParams,
    boundary: InfluenceBoundary,
    policy:   BoundaryPolicy,
}

impl Gaussian2D {
    /// Validate `params` and compute the influence boundary.  The boundary
    /// policy defaults to [`BoundaryPolicy::AreaSizing`].
    pub fn new(params: GaussianParams) -> PlumeResult<Self> {
        params.validate()?;
        Ok(Self {
            boundary: params.influence_boundary(),
            params,
            policy: BoundaryPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn params(&self) -> &GaussianParams {
        &self.params
    }

    #[inline]
    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }
}

impl PlumeModel for Gaussian2D {
    fn concentration_at(&self, dx: f64, dy: f64) -> f64 {
        if self.policy == BoundaryPolicy::HardBounded && !self.boundary.contains(dx, dy) {
            return 0.0;
        }
        let p = &self.params;
        gaussian_concentration(dx, dy, p.r, p.d, p.w)
    }

    fn boundary(&self) -> InfluenceBoundary {
        self.boundary
    }

    fn support(&self) -> Option<InfluenceBoundary> {
        match self.policy {
            BoundaryPolicy::HardBounded => Some(self.boundary),
            BoundaryPolicy::AreaSizing => None,
        }
    }
}
