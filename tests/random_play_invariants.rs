use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use grid_snake::config::EngineConfig;
use grid_snake::game::{SimulationEngine, TickOutcome};
use grid_snake::input::Direction;

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Plays many seeded episodes with random steering and checks the state
/// after every tick.
fn play_and_check(width: u16, height: u16, length: u16, seed: u64, ticks: usize) {
    let config = EngineConfig::new(width, height, length).expect("valid config");
    let mut engine = SimulationEngine::with_seed(config, seed);
    let mut steering = StdRng::seed_from_u64(seed ^ 0x5eed);
    let total_cells = config.grid().total_cells();

    for _ in 0..ticks {
        if !engine.state().active {
            engine.restart();
        }

        for _ in 0..steering.gen_range(0..3) {
            engine.apply_direction(DIRECTIONS[steering.gen_range(0..DIRECTIONS.len())]);
        }

        let before = engine.snapshot();
        let outcome = engine.tick();
        let after = engine.snapshot();

        if outcome == TickOutcome::Ate || outcome == TickOutcome::ArenaFilled {
            assert_eq!(after.snake.len(), before.snake.len() + 1);
            assert_eq!(after.score, before.score + 1);
        } else {
            assert_eq!(after.snake.len(), before.snake.len());
            assert_eq!(after.score, before.score);
        }

        assert!(after.snake.len() <= total_cells);
        assert_eq!(after.active, !outcome.is_terminal());

        if let Some(food) = after.food {
            assert!(food.is_within_bounds(config.grid()));
            assert!(!after.snake.contains(&food), "food placed on the snake");
        } else {
            assert_eq!(outcome, TickOutcome::ArenaFilled);
        }

        if after.active {
            assert!(after.head().is_within_bounds(config.grid()));
        }
    }
}

#[test]
fn invariants_hold_on_the_default_arena() {
    for seed in 0..8 {
        play_and_check(26, 20, 5, seed, 2_000);
    }
}

#[test]
fn invariants_hold_on_a_cramped_arena() {
    for seed in 0..16 {
        play_and_check(4, 3, 2, seed, 1_000);
    }
}

#[test]
fn direction_never_reverses_within_one_tick() {
    let config = EngineConfig::new(12, 12, 4).expect("valid config");
    let mut engine = SimulationEngine::with_seed(config, 99);
    let mut steering = StdRng::seed_from_u64(1);

    for _ in 0..500 {
        if !engine.state().active {
            engine.restart();
        }

        let locked = engine.state().direction;
        for _ in 0..4 {
            engine.apply_direction(DIRECTIONS[steering.gen_range(0..DIRECTIONS.len())]);
        }
        assert_ne!(engine.state().direction, locked.opposite());

        engine.tick();
    }
}

#[test]
fn same_seed_replays_the_same_game() {
    let config = EngineConfig::new(16, 12, 3).expect("valid config");
    let mut first = SimulationEngine::with_seed(config, 2024);
    let mut second = SimulationEngine::with_seed(config, 2024);

    for step in 0..200 {
        let direction = DIRECTIONS[step % DIRECTIONS.len()];
        if step % 3 == 0 {
            first.apply_direction(direction);
            second.apply_direction(direction);
        }

        assert_eq!(first.tick(), second.tick());
        assert_eq!(first.snapshot(), second.snapshot());
    }
}
