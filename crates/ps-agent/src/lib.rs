//! `ps-agent` — search-agent motion models.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`agent`]    | `SearchAgent` trait, `detect_odor`, `ResetPolicy`         |
//! | [`linear`]   | `LinearSearcher` — constant heading and speed             |
//! | [`random`]   | `RandomSearcher` — fresh uniform heading every step       |
//! | [`levy`]     | `LevySearcher2D`, `LevyPhase`, `leg_length_pmf`           |
//! | [`searcher`] | `Searcher` enum, `SearcherConfig`                         |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `SearcherConfig`, `ResetPolicy`. |

pub mod agent;
pub mod error;
pub mod levy;
pub mod linear;
pub mod random;
pub mod searcher;


pub use agent::{detect_odor, ResetPolicy, SearchAgent};
pub use error::{AgentError, AgentResult};
pub use levy::{leg_length_pmf, LevyPhase, LevySearcher2D};
pub use linear::LinearSearcher;
pub use random::RandomSearcher;
pub use searcher::{Searcher, SearcherConfig};
