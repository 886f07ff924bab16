//! `ps-env` — multi-source environments.
//!
//! An [`Environment`] owns a shared plume model and a set of source
//! positions, and answers "what is the probability of detecting odor at
//! `(x, y)` over `dt`" for the whole field.  Sources are independent, so the
//! field's miss probability is the product of per-source miss probabilities.
//!
//! # Crate layout
//!
//! | Module          | Contents                                            |
//! |-----------------|-----------------------------------------------------|
//! | [`environment`] | `Environment`, `source_region`                      |
//! | [`sources`]     | `SourceSet` (R-tree indexed), `SourcePositions`     |
//! | [`loader`]      | `load_sources_csv`, `load_sources_reader`           |
//! | [`error`]       | `EnvError`, `EnvResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Propagates serde derives to `ps-core` and `ps-plume`. |

pub mod environment;
pub mod error;
pub mod loader;
pub mod sources;

#[cfg(test)]
mod tests;

pub use environment::{source_region, Environment};
pub use error::{EnvError, EnvResult};
pub use loader::{load_sources_csv, load_sources_reader};
pub use sources::{SourcePositions, SourceSet};
