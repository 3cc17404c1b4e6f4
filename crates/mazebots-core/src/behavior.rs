//! Per-tick decision loop: stagnation policy, sensing, policy evaluation,
//! action selection, and fitness reporting.

use crate::direction::{Direction, RelativeDirection};
use crate::maze::{MazeView, TileKind, TilePos};
use crate::search::nearest_in_all_directions;
use crate::sensors::encode_features;
use crate::{OUTPUT_SIZE, PolicyRunner};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Episode policy knobs.
///
/// The stagnation limit is calibrated against the host's fixed tick rate (the
/// historical default of 600 assumes 60 ticks per second), so it is
/// configuration rather than a constant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EpisodeConfig {
    /// Ticks without a score increase before the episode is terminated.
    pub stagnation_limit: u32,
    /// Direction commanded on the termination tick.
    pub fallback_direction: Direction,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            stagnation_limit: 600,
            fallback_direction: Direction::Up,
        }
    }
}

/// Host-facing sink for training signals.
///
/// `set_fitness` is called once per completed decision; `kill` at most once
/// per stagnation timeout. Termination is a designed signal, never an error.
pub trait EpisodeSink {
    /// Report the agent's fitness for this tick.
    fn set_fitness(&mut self, fitness: f32);

    /// Terminate the agent's episode.
    fn kill(&mut self);
}

/// Sink that discards all signals.
#[derive(Debug, Default)]
pub struct NullSink;

impl EpisodeSink for NullSink {
    fn set_fitness(&mut self, _fitness: f32) {}
    fn kill(&mut self) {}
}

/// Everything the decision loop needs for one tick, injected explicitly.
///
/// Nothing is captured across calls: tile, heading, mobility, and score all
/// arrive fresh each tick.
pub struct TickInput<'a> {
    /// Tile the agent currently occupies.
    pub tile: TilePos,
    /// The agent's absolute facing direction.
    pub heading: Direction,
    /// Current game score as reported by the host.
    pub score: i64,
    /// Host-supplied mobility predicate, consistent with the maze view.
    pub can_move: &'a dyn Fn(Direction) -> bool,
}

/// Per-agent decision loop state.
///
/// Owns the three episode-scoped counters and nothing else; everything
/// observable arrives through [`TickInput`]. Initialized at episode start and
/// discarded (or [`reset`](Navigator::reset)) at episode end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Navigator {
    config: EpisodeConfig,
    score_modifier: i64,
    ticks_since_score: u32,
    last_score: i64,
}

impl Navigator {
    #[must_use]
    pub fn new(config: EpisodeConfig) -> Self {
        Self {
            config,
            score_modifier: 0,
            ticks_since_score: 0,
            last_score: 0,
        }
    }

    /// Clear episode state for reuse in a fresh episode.
    pub fn reset(&mut self) {
        self.score_modifier = 0;
        self.ticks_since_score = 0;
        self.last_score = 0;
    }

    /// Adjust the per-episode fitness offset.
    ///
    /// Modifiers maintain separate pools of reward: shaping can add or remove
    /// points without touching the raw game score.
    pub fn add_score_modifier(&mut self, delta: i64) {
        self.score_modifier += delta;
    }

    #[must_use]
    pub const fn score_modifier(&self) -> i64 {
        self.score_modifier
    }

    /// Ticks elapsed since the score last increased.
    #[must_use]
    pub const fn ticks_since_score(&self) -> u32 {
        self.ticks_since_score
    }

    /// Compute the commanded direction for this tick.
    ///
    /// Runs the fixed sequence from the behavior contract: stagnation check,
    /// directional pellet search, sensor encoding, blocking policy
    /// evaluation, argmax action selection (ties to the lowest index), and
    /// the fitness report. On stagnation the sink's `kill` fires and the
    /// configured fallback direction is returned without consulting the
    /// policy; no fitness is reported for that final tick.
    pub fn decide<M>(
        &mut self,
        maze: &M,
        input: TickInput<'_>,
        policy: &mut dyn PolicyRunner,
        sink: &mut dyn EpisodeSink,
    ) -> Direction
    where
        M: MazeView + ?Sized,
    {
        if input.score > self.last_score {
            self.last_score = input.score;
            self.ticks_since_score = 0;
        } else {
            self.ticks_since_score += 1;
            if self.ticks_since_score > self.config.stagnation_limit {
                debug!(
                    ticks = self.ticks_since_score,
                    limit = self.config.stagnation_limit,
                    "no score progress; terminating episode"
                );
                sink.kill();
                return self.config.fallback_direction;
            }
        }

        let scan = nearest_in_all_directions(maze, input.tile, |_, kind| {
            kind == TileKind::Pellet
        });
        let features = encode_features(input.heading, input.can_move, &scan);
        let outputs = policy.evaluate(&features);

        let choice = argmax(&outputs);
        let direction = RelativeDirection::ALL[choice].resolve(input.heading);

        sink.set_fitness((input.score + self.score_modifier) as f32);
        direction
    }
}

/// Index of the largest output; ties go to the first occurrence.
fn argmax(outputs: &[f32; OUTPUT_SIZE]) -> usize {
    let mut best = 0;
    for (index, value) in outputs.iter().enumerate().skip(1) {
        if OrderedFloat(*value) > OrderedFloat(outputs[best]) {
            best = index;
        }
    }
    best
}
