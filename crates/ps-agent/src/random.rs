use ps_core::{Point2, SimRng};

use crate::error::check_speed;
use crate::{AgentResult, SearchAgent};

/// Uncorrelated random walk: a fresh uniform heading in `(-π, π]` every step.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomSearcher {
    speed:    f64,
    position: Point2,
}

impl RandomSearcher {
    pub fn new(speed: f64) -> AgentResult<Self> {
        Ok(Self { speed: check_speed(speed)?, position: Point2::ORIGIN })
    }
}

impl SearchAgent for RandomSearcher {
    fn advance(&mut self, dt: f64, rng: &mut SimRng) {
        let heading = rng.heading();
        self.position += Point2::from_polar(self.speed * dt, heading);
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
