//! Batch episode harness for evaluating many agents against one maze.
//!
//! Each tick runs in two phases, mirroring staged world updates: a decide
//! phase where every live agent senses and evaluates its policy in parallel
//! against the shared read-only maze, then a sequential apply phase that
//! moves agents and consumes pellets. Decisions never observe a half-updated
//! maze.

use crate::behavior::{EpisodeConfig, EpisodeSink, Navigator, TickInput};
use crate::direction::Direction;
use crate::maze::{GridMaze, MazeView, TileKind, TilePos};
use crate::{PolicyRunner, Tick};
use rayon::prelude::*;
use slotmap::SlotMap;
use thiserror::Error;

slotmap::new_key_type! {
    /// Stable handle for agents backed by a generational slot map.
    pub struct AgentId;
}

/// Errors raised by arena operations.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// The requested spawn tile is a wall or off-map.
    #[error("spawn tile ({0}, {1}) is not walkable")]
    BlockedSpawn(i32, i32),
}

/// Summary of one arena tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaTick {
    pub tick: Tick,
    /// Agents still alive after this tick.
    pub alive: usize,
    /// Pellets (of either kind) consumed this tick.
    pub pellets_eaten: usize,
    /// Agents terminated by stagnation this tick.
    pub kills: usize,
}

struct Slot {
    navigator: Navigator,
    policy: Box<dyn PolicyRunner>,
    tile: TilePos,
    heading: Direction,
    score: i64,
    fitness: f32,
    alive: bool,
    pending: Option<Direction>,
}

struct SlotSink<'a> {
    fitness: &'a mut f32,
    alive: &'a mut bool,
}

impl EpisodeSink for SlotSink<'_> {
    fn set_fitness(&mut self, fitness: f32) {
        *self.fitness = fitness;
    }

    fn kill(&mut self) {
        *self.alive = false;
    }
}

/// Owns a maze and a roster of agents, advancing them in lockstep.
pub struct TrainingArena {
    maze: GridMaze,
    config: EpisodeConfig,
    agents: SlotMap<AgentId, Slot>,
    tick: Tick,
}

impl TrainingArena {
    #[must_use]
    pub fn new(maze: GridMaze, config: EpisodeConfig) -> Self {
        Self {
            maze,
            config,
            agents: SlotMap::with_key(),
            tick: Tick::default(),
        }
    }

    /// Add an agent at `tile` facing `heading`.
    pub fn spawn_agent(
        &mut self,
        tile: TilePos,
        heading: Direction,
        policy: Box<dyn PolicyRunner>,
    ) -> Result<AgentId, ArenaError> {
        if !self
            .maze
            .kind_at(tile)
            .is_some_and(TileKind::is_walkable)
        {
            return Err(ArenaError::BlockedSpawn(tile.x, tile.y));
        }
        Ok(self.agents.insert(Slot {
            navigator: Navigator::new(self.config),
            policy,
            tile,
            heading,
            score: 0,
            fitness: 0.0,
            alive: true,
            pending: None,
        }))
    }

    /// Advance every live agent by one tick.
    pub fn tick(&mut self) -> ArenaTick {
        self.tick = self.tick.next();
        let Self { maze, agents, .. } = self;

        // Decide phase: the maze is read-only here, so agents are independent.
        let maze_view: &GridMaze = maze;
        let mut live: Vec<&mut Slot> = agents.values_mut().filter(|slot| slot.alive).collect();
        live.par_iter_mut().for_each(|slot| {
            let Slot {
                navigator,
                policy,
                tile,
                heading,
                score,
                fitness,
                alive,
                pending,
            } = &mut **slot;
            let (tile, heading, score) = (*tile, *heading, *score);
            let can_move =
                |direction: Direction| maze_view.walkable_neighbor(tile, direction).is_some();
            let mut sink = SlotSink { fitness, alive };
            let direction = navigator.decide(
                maze_view,
                TickInput {
                    tile,
                    heading,
                    score,
                    can_move: &can_move,
                },
                policy.as_mut(),
                &mut sink,
            );
            *pending = Some(direction);
        });

        // Apply phase: movement and pellet consumption, sequential.
        let mut pellets_eaten = 0;
        let mut kills = 0;
        for slot in agents.values_mut() {
            let Some(direction) = slot.pending.take() else {
                continue;
            };
            if !slot.alive {
                kills += 1;
                continue;
            }
            if let Some(next) = maze.walkable_neighbor(slot.tile, direction) {
                slot.tile = next;
                slot.heading = direction;
                if let Some(points) = maze
                    .kind_at(next)
                    .and_then(TileKind::score_value)
                {
                    slot.score += points;
                    pellets_eaten += 1;
                    maze.set_kind(next, TileKind::Empty);
                }
            }
        }

        ArenaTick {
            tick: self.tick,
            alive: self.agents.values().filter(|slot| slot.alive).count(),
            pellets_eaten,
            kills,
        }
    }

    #[must_use]
    pub fn maze(&self) -> &GridMaze {
        &self.maze
    }

    #[must_use]
    pub const fn current_tick(&self) -> Tick {
        self.tick
    }

    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_alive(&self, id: AgentId) -> bool {
        self.agents.get(id).is_some_and(|slot| slot.alive)
    }

    #[must_use]
    pub fn score(&self, id: AgentId) -> Option<i64> {
        self.agents.get(id).map(|slot| slot.score)
    }

    #[must_use]
    pub fn fitness(&self, id: AgentId) -> Option<f32> {
        self.agents.get(id).map(|slot| slot.fitness)
    }

    /// Current tile and heading of an agent.
    #[must_use]
    pub fn pose(&self, id: AgentId) -> Option<(TilePos, Direction)> {
        self.agents.get(id).map(|slot| (slot.tile, slot.heading))
    }

    /// Mutable access to an agent's decision loop, e.g. for reward shaping.
    pub fn navigator_mut(&mut self, id: AgentId) -> Option<&mut Navigator> {
        self.agents.get_mut(id).map(|slot| &mut slot.navigator)
    }

    /// Remove an agent, returning whether it existed.
    pub fn remove_agent(&mut self, id: AgentId) -> bool {
        self.agents.remove(id).is_some()
    }
}
