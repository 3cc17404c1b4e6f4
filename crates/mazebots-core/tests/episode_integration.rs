//! End-to-end decision-loop behavior against a host-style movement loop.

use mazebots_core::{
    Direction, EpisodeConfig, EpisodeSink, GridMaze, INPUT_SIZE, MazeView, Navigator,
    OUTPUT_SIZE, PolicyRunner, TickInput, TileKind, TilePos,
};

/// Minimal host: owns the maze, moves the agent along commanded directions,
/// and scores consumed pellets.
struct Host {
    maze: GridMaze,
    tile: TilePos,
    heading: Direction,
    score: i64,
}

impl Host {
    fn new(map: &str, tile: TilePos, heading: Direction) -> Self {
        Self {
            maze: GridMaze::parse(map).expect("maze"),
            tile,
            heading,
            score: 0,
        }
    }

    fn step(
        &mut self,
        navigator: &mut Navigator,
        policy: &mut dyn PolicyRunner,
        sink: &mut dyn EpisodeSink,
    ) -> Direction {
        let tile = self.tile;
        let maze = &self.maze;
        let can_move = |direction: Direction| maze.walkable_neighbor(tile, direction).is_some();
        let direction = navigator.decide(
            maze,
            TickInput {
                tile,
                heading: self.heading,
                score: self.score,
                can_move: &can_move,
            },
            policy,
            sink,
        );
        if let Some(next) = self.maze.walkable_neighbor(self.tile, direction) {
            self.tile = next;
            self.heading = direction;
            if let Some(points) = self.maze.kind_at(next).and_then(TileKind::score_value) {
                self.score += points;
                self.maze.set_kind(next, TileKind::Empty);
            }
        }
        direction
    }
}

/// Walks toward visible pellets, preferring open lanes, forward-most on ties.
struct GreedyRunner;

impl PolicyRunner for GreedyRunner {
    fn kind(&self) -> &'static str {
        "test.greedy"
    }

    fn evaluate(&mut self, inputs: &[f32; INPUT_SIZE]) -> [f32; OUTPUT_SIZE] {
        let mut outputs = [0.0; OUTPUT_SIZE];
        for (lane, output) in outputs.iter_mut().enumerate() {
            *output = inputs[lane] * (0.5 + inputs[lane + OUTPUT_SIZE]);
        }
        outputs
    }
}

/// Records the feature vector it was asked to evaluate.
struct SpyRunner {
    seen: Option<[f32; INPUT_SIZE]>,
}

impl PolicyRunner for SpyRunner {
    fn kind(&self) -> &'static str {
        "test.spy"
    }

    fn evaluate(&mut self, inputs: &[f32; INPUT_SIZE]) -> [f32; OUTPUT_SIZE] {
        self.seen = Some(*inputs);
        [1.0, 0.0, 0.0, 0.0]
    }
}

#[derive(Default)]
struct RecordingSink {
    fitness: Option<f32>,
    killed: bool,
}

impl EpisodeSink for RecordingSink {
    fn set_fitness(&mut self, fitness: f32) {
        self.fitness = Some(fitness);
    }

    fn kill(&mut self) {
        self.killed = true;
    }
}

#[test]
fn greedy_agent_clears_a_dead_end_corridor() {
    let mut host = Host::new(
        "#######\n\
         #.....#\n\
         #######",
        TilePos::new(1, 1),
        Direction::Right,
    );
    let mut navigator = Navigator::new(EpisodeConfig::default());
    let mut policy = GreedyRunner;
    let mut sink = RecordingSink::default();

    // Four ticks sweeping right, four more backtracking to the pellet the
    // agent started on.
    for _ in 0..8 {
        host.step(&mut navigator, &mut policy, &mut sink);
    }
    assert_eq!(host.score, 50);
    assert_eq!(host.maze.pellets_remaining(), 0);
    assert_eq!(host.tile, TilePos::new(1, 1));
    assert!(!sink.killed);
    assert_eq!(sink.fitness, Some(40.0), "fitness lags one tick behind the final pellet");
}

#[test]
fn feature_vector_order_is_mobility_then_proximity() {
    let mut host = Host::new(
        "#######\n\
         #.   .#\n\
         #######",
        TilePos::new(4, 1),
        Direction::Right,
    );
    let mut navigator = Navigator::new(EpisodeConfig::default());
    let mut policy = SpyRunner { seen: None };
    let mut sink = RecordingSink::default();

    host.step(&mut navigator, &mut policy, &mut sink);
    let seen = policy.seen.expect("policy must be consulted");

    // Heading right: forward and behind open, left/right walls.
    assert_eq!(&seen[..4], &[1.0, 0.0, 0.0, 1.0]);
    // Pellet one step forward, three steps behind; max distance 3.
    assert!((seen[4] - (1.0 - 1.0 / 3.0)).abs() < 1e-6);
    assert_eq!(&seen[5..], &[0.0, 0.0, 0.0]);
}

#[test]
fn pellet_free_episode_terminates_on_tick_601() {
    let mut host = Host::new(
        "#####\n\
         #   #\n\
         #####",
        TilePos::new(2, 1),
        Direction::Right,
    );
    let mut navigator = Navigator::new(EpisodeConfig::default());
    let mut policy = GreedyRunner;

    for tick in 1..=600 {
        let mut sink = RecordingSink::default();
        host.step(&mut navigator, &mut policy, &mut sink);
        assert!(!sink.killed, "tick {tick} must not terminate the episode");
    }

    let mut sink = RecordingSink::default();
    let direction = host.step(&mut navigator, &mut policy, &mut sink);
    assert!(sink.killed);
    assert_eq!(direction, EpisodeConfig::default().fallback_direction);
    assert_eq!(sink.fitness, None);
}

#[test]
fn eating_a_pellet_defers_the_stagnation_clock() {
    let mut host = Host::new(
        "#######\n\
         #    .#\n\
         #######",
        TilePos::new(1, 1),
        Direction::Right,
    );
    let config = EpisodeConfig {
        stagnation_limit: 10,
        ..EpisodeConfig::default()
    };
    let mut navigator = Navigator::new(config);
    let mut policy = GreedyRunner;
    let mut sink = RecordingSink::default();

    // Four ticks to reach the pellet; the counter is ticking the whole way.
    for _ in 0..4 {
        host.step(&mut navigator, &mut policy, &mut sink);
    }
    assert_eq!(host.score, 10);
    assert_eq!(navigator.ticks_since_score(), 4);

    // The score increase lands on the next decide call and resets the clock.
    host.step(&mut navigator, &mut policy, &mut sink);
    assert_eq!(navigator.ticks_since_score(), 0);
}
