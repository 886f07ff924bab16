//! `ps-plume` — odor plume models.
//!
//! A plume model maps a displacement `(dx, dy)` from a single source to a
//! concentration, and a concentration plus an exposure interval `dt` to the
//! probability that an agent at that displacement does (hit) or does not
//! (miss) detect odor.  Wind blows from `-x` to `+x`; `dx > 0` is downwind.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`boundary`] | `InfluenceBoundary`, `BoundaryPolicy`                        |
//! | [`model`]    | `PlumeModel` trait, `miss_from_concentration`                |
//! | [`gaussian`] | `GaussianParams`, `Gaussian2D`, `gaussian_concentration`     |
//! | [`solid`]    | `GaussianSolid` (threshold detection)                        |
//! | [`uniform`]  | `UniformBox`, `uniform_box_solid`, `uniform_circle_solid`, … |
//! | [`error`]    | `PlumeError`, `PlumeResult<T>`                               |
//!
//! # Scalars and slices
//!
//! Every model has exactly one per-element kernel (`*_at`).  The slice
//! methods on [`PlumeModel`] map that kernel over zipped inputs, so a scalar
//! query is the single-element case of the same code path.

pub mod boundary;
pub mod error;
pub mod gaussian;
pub mod model;
pub mod solid;
pub mod uniform;


pub use boundary::{BoundaryPolicy, InfluenceBoundary};
pub use error::{PlumeError, PlumeResult};
pub use gaussian::{gaussian_concentration, Gaussian2D, GaussianParams};
pub use model::{miss_from_concentration, PlumeModel};
pub use solid::GaussianSolid;
pub use uniform::{
    uniform_box_probabilistic, uniform_box_solid, uniform_circle_solid, uniform_circle_solid_at,
    UniformBox,
};
