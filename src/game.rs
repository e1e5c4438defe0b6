use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{EngineConfig, GridSize};
use crate::food::{Food, TileSampler};
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::{Position, Snake};

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake moved without eating.
    Continuing,
    /// The snake ate and grew by one segment.
    Ate,
    /// The head left the arena.
    WallCollision,
    /// The head ran into another body segment.
    SelfCollision,
    /// The snake grew to cover every tile; no room is left for food.
    ArenaFilled,
}

impl TickOutcome {
    /// Returns true for outcomes that end the episode.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::WallCollision | Self::SelfCollision | Self::ArenaFilled
        )
    }
}

/// Complete mutable state of one episode.
///
/// Only [`SimulationEngine`] mutates it; callers see it through
/// [`SimulationEngine::state`] or an owned [`Snapshot`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    /// Absent only after [`TickOutcome::ArenaFilled`].
    pub food: Option<Food>,
    /// Heading applied on the next tick.
    pub direction: Direction,
    /// Set once a direction change has been accepted in the current tick window.
    pub direction_locked: bool,
    pub score: u32,
    pub active: bool,
    /// Outcome of the most recent tick; `Continuing` right after a start.
    pub outcome: TickOutcome,
    pub tick_count: u64,
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub grid: GridSize,
    /// Segments from head to tail.
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub direction: Direction,
    pub score: u32,
    pub active: bool,
    pub outcome: TickOutcome,
}

impl Snapshot {
    /// Returns the head segment.
    #[must_use]
    pub fn head(&self) -> Position {
        self.snake[0]
    }
}

/// Owns a [`GameState`] and advances it one tick at a time.
///
/// `S` supplies candidate food tiles; any seeded [`rand::Rng`] gives
/// reproducible runs.
#[derive(Debug)]
pub struct SimulationEngine<S = StdRng> {
    config: EngineConfig,
    state: GameState,
    sampler: S,
}

impl SimulationEngine<StdRng> {
    /// Creates an engine whose food sequence is fixed by `seed`.
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Creates an engine seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy(config: EngineConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<S: TileSampler> SimulationEngine<S> {
    /// Creates an engine and starts its first episode.
    #[must_use]
    pub fn new(config: EngineConfig, mut sampler: S) -> Self {
        let state = initial_state(config, &mut sampler);
        log_start(config);

        Self {
            config,
            state,
            sampler,
        }
    }

    /// Resets the state in place for a new episode in the arena described by
    /// `config`.
    ///
    /// The snake spawns as a horizontal row with its head at the arena center,
    /// heading right; food is placed off the snake.
    pub fn start(&mut self, config: EngineConfig) -> &GameState {
        self.config = config;
        self.state = initial_state(config, &mut self.sampler);
        log_start(config);
        &self.state
    }

    /// Starts a new episode with the dimensions of the current one.
    pub fn restart(&mut self) -> &GameState {
        self.start(self.config)
    }

    /// Requests a new heading for the next tick.
    ///
    /// At most one change is accepted per tick window. Requests are ignored
    /// while the episode is over, after the window's change has been used, or
    /// when they repeat or reverse the current heading. Returns whether the
    /// request was accepted.
    pub fn apply_direction(&mut self, requested: Direction) -> bool {
        let state = &mut self.state;
        if !state.active || state.direction_locked {
            return false;
        }

        if requested == state.direction || !direction_change_is_valid(state.direction, requested)
        {
            return false;
        }

        log::debug!("direction {:?} -> {requested:?}", state.direction);
        state.direction = requested;
        state.direction_locked = true;
        true
    }

    /// Advances the simulation by one tile.
    ///
    /// Once an episode has ended this returns the terminal outcome again and
    /// leaves the state untouched. On a collision the fatal frame is kept:
    /// the head already sits in the colliding cell.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.active {
            return self.state.outcome;
        }

        let grid = self.config.grid();
        let state = &mut self.state;
        state.direction_locked = false;
        state.tick_count += 1;

        let next_head = state.snake.head().shifted(state.direction);
        let ate = state.food.is_some_and(|food| food.position == next_head);

        let mut outcome = if ate {
            state.snake.advance(next_head, true);
            state.score += 1;
            log::debug!(
                "ate at ({}, {}); score {} length {}",
                next_head.x,
                next_head.y,
                state.score,
                state.snake.len()
            );

            if state.snake.len() == grid.total_cells() {
                state.food = None;
                TickOutcome::ArenaFilled
            } else {
                state.food = Some(Food::spawn(&mut self.sampler, grid, &state.snake));
                TickOutcome::Ate
            }
        } else {
            state.snake.advance(next_head, false);
            TickOutcome::Continuing
        };

        if !next_head.is_within_bounds(grid) {
            outcome = TickOutcome::WallCollision;
        } else if state.snake.head_overlaps_body() {
            outcome = TickOutcome::SelfCollision;
        }

        if outcome.is_terminal() {
            state.active = false;
            log::info!(
                "episode over after {} ticks: {outcome:?}, score {}",
                state.tick_count,
                state.score
            );
        }

        state.outcome = outcome;
        outcome
    }

    /// Returns an owned copy of the state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.config.grid(),
            snake: self.state.snake.segments().copied().collect(),
            food: self.state.food.map(|food| food.position),
            direction: self.state.direction,
            score: self.state.score,
            active: self.state.active,
            outcome: self.state.outcome,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }
}

fn initial_state<S: TileSampler + ?Sized>(config: EngineConfig, sampler: &mut S) -> GameState {
    let grid = config.grid();
    let head = Position {
        x: i32::from(grid.width / 2),
        y: i32::from(grid.height / 2),
    };
    let snake = Snake::in_row(head, config.initial_length());
    let food = Food::spawn(sampler, grid, &snake);

    GameState {
        snake,
        food: Some(food),
        direction: Direction::Right,
        direction_locked: false,
        score: 0,
        active: true,
        outcome: TickOutcome::Continuing,
        tick_count: 0,
    }
}

fn log_start(config: EngineConfig) {
    let grid = config.grid();
    log::info!(
        "episode started: {}x{} arena, initial length {}",
        grid.width,
        grid.height,
        config.initial_length()
    );
}
