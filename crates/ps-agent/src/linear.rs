use ps_core::{Point2, SimRng};

use crate::error::check_speed;
use crate::{AgentError, AgentResult, SearchAgent};

/// Constant-velocity straight-line motion at heading `theta`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearSearcher {
    theta:    f64,
    speed:    f64,
    velocity: Point2,
    position: Point2,
}

impl LinearSearcher {
    pub fn new(theta: f64, speed: f64) -> AgentResult<Self> {
        if !theta.is_finite() {
            return Err(AgentError::InvalidParameter {
                name:   "theta",
                value:  theta,
                reason: "heading must be finite",
            });
        }
        let speed = check_speed(speed)?;
        Ok(Self {
            theta,
            speed,
            velocity: Point2::from_polar(speed, theta),
            position: Point2::ORIGIN,
        })
    }

    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    #[inline]
    pub fn velocity(&self) -> Point2 {
        self.velocity
    }
}

impl SearchAgent for LinearSearcher {
    fn advance(&mut self, dt: f64, _rng: &mut SimRng) {
        self.position += Point2::new(self.velocity.x * dt, self.velocity.y * dt);
    }

    fn reset(&mut self) {
        self.position = Point2::ORIGIN;
    }

    fn position(&self) -> Point2 {
        self.position
    }

    fn speed(&self) -> f64 {
        self.speed
    }
}
