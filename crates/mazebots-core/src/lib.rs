//! Core types and per-tick decision logic shared across the Mazebots workspace.
//!
//! The crate covers the two tightly coupled halves of the agent's decision
//! core: a multi-directional nearest-target search over the maze graph
//! ([`search`]) and the decision loop that turns search output and local
//! mobility into a commanded direction via an external policy ([`behavior`]).
//! Everything else — maze storage, movement, the policy's internals — lives
//! behind traits at the crate boundary.

use serde::{Deserialize, Serialize};

pub mod arena;
pub mod behavior;
pub mod direction;
pub mod maze;
pub mod search;
pub mod sensors;

pub use arena::{AgentId, ArenaError, ArenaTick, TrainingArena};
pub use behavior::{EpisodeConfig, EpisodeSink, Navigator, NullSink, TickInput};
pub use direction::{Direction, RelativeDirection};
pub use maze::{GridMaze, MazeError, MazeView, TileKind, TilePos};
pub use search::{DirectionScan, SearchHit, nearest_in_all_directions};
pub use sensors::encode_features;

/// Number of sensor lanes fed into each agent policy: four mobility flags
/// followed by four pellet proximity scores, all heading-relative.
pub const INPUT_SIZE: usize = 8;
/// Number of policy outputs, one preference score per relative direction.
pub const OUTPUT_SIZE: usize = 4;

/// Monotonic simulation step counter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tick(pub u64);

impl Tick {
    /// Returns the tick following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Thin trait object used to drive policy evaluations without coupling to
/// concrete policy crates.
///
/// Evaluation is a hard blocking call: the decision loop submits one feature
/// vector and waits for exactly one output vector before doing anything else.
/// Implementations may compute on another thread, but must not return until
/// the result for *this* request is available.
pub trait PolicyRunner: Send {
    /// Static identifier of the policy implementation.
    fn kind(&self) -> &'static str;

    /// Evaluate output preferences for the provided sensor features.
    fn evaluate(&mut self, inputs: &[f32; INPUT_SIZE]) -> [f32; OUTPUT_SIZE];
}
