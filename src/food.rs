use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Source of candidate food tiles.
///
/// Every [`Rng`] samples uniformly over the grid. [`ScriptedTiles`] replays a
/// fixed list so tests and replays can force food placement.
pub trait TileSampler {
    /// Returns a tile inside `grid`.
    fn sample_tile(&mut self, grid: GridSize) -> Position;
}

impl<R: Rng + ?Sized> TileSampler for R {
    fn sample_tile(&mut self, grid: GridSize) -> Position {
        Position {
            x: self.gen_range(0..i32::from(grid.width)),
            y: self.gen_range(0..i32::from(grid.height)),
        }
    }
}

/// Deterministic sampler cycling through a fixed list of tiles.
#[derive(Debug, Clone)]
pub struct ScriptedTiles {
    tiles: Vec<Position>,
    next: usize,
}

impl ScriptedTiles {
    /// Creates a sampler that yields `tiles` in order and then starts over.
    ///
    /// # Panics
    ///
    /// Panics when `tiles` is empty.
    #[must_use]
    pub fn new(tiles: impl IntoIterator<Item = Position>) -> Self {
        let tiles: Vec<Position> = tiles.into_iter().collect();
        assert!(!tiles.is_empty(), "ScriptedTiles needs at least one tile");

        Self { tiles, next: 0 }
    }
}

impl TileSampler for ScriptedTiles {
    fn sample_tile(&mut self, _grid: GridSize) -> Position {
        let tile = self.tiles[self.next % self.tiles.len()];
        self.next = self.next.wrapping_add(1);
        tile
    }
}

/// Food currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a tile the snake does not occupy.
    #[must_use]
    pub fn spawn<S: TileSampler + ?Sized>(sampler: &mut S, bounds: GridSize, snake: &Snake) -> Self {
        Self::at(spawn_position(sampler, bounds, snake))
    }
}

/// Rejection-samples tiles until one is not occupied by the snake.
///
/// There is no attempt cap: expected attempts stay low unless the board is
/// nearly full.
///
/// # Panics
///
/// Panics when the snake already covers every tile.
#[must_use]
pub fn spawn_position<S: TileSampler + ?Sized>(
    sampler: &mut S,
    bounds: GridSize,
    snake: &Snake,
) -> Position {
    assert!(
        snake.len() < bounds.total_cells(),
        "spawn_position: no free tiles on the board ({}x{})",
        bounds.width,
        bounds.height,
    );

    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        let candidate = sampler.sample_tile(bounds);
        debug_assert!(candidate.is_within_bounds(bounds));

        if !snake.occupies(candidate) {
            log::trace!(
                "food placed at ({}, {}) after {attempts} sample(s)",
                candidate.x,
                candidate.y
            );
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;

    use super::{spawn_position, Food, ScriptedTiles, TileSampler};
    use crate::snake::{Position, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(vec![
            Position { x: 2, y: 0 },
            Position { x: 1, y: 0 },
            Position { x: 0, y: 0 },
        ]);
        let bounds = GridSize {
            width: 8,
            height: 6,
        };

        for _ in 0..100 {
            let food_position = spawn_position(&mut rng, bounds, &snake);
            assert!(!snake.occupies(food_position));
            assert!(food_position.is_within_bounds(bounds));
        }
    }

    #[test]
    fn spawn_finds_the_single_free_tile() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::from_segments(vec![
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
            Position { x: 1, y: 1 },
        ]);
        let bounds = GridSize {
            width: 2,
            height: 2,
        };

        let food = Food::spawn(&mut rng, bounds, &snake);

        assert_eq!(food.position, Position { x: 0, y: 1 });
    }

    #[test]
    fn rejected_samples_fall_through_to_the_next_tile() {
        let snake = Snake::in_row(Position { x: 5, y: 5 }, 3);
        let mut tiles = ScriptedTiles::new([
            Position { x: 5, y: 5 },
            Position { x: 3, y: 5 },
            Position { x: 7, y: 1 },
        ]);

        let position = spawn_position(
            &mut tiles,
            GridSize {
                width: 10,
                height: 10,
            },
            &snake,
        );

        assert_eq!(position, Position { x: 7, y: 1 });
    }

    #[test]
    fn scripted_tiles_cycle() {
        let bounds = GridSize {
            width: 4,
            height: 4,
        };
        let mut tiles = ScriptedTiles::new([Position { x: 1, y: 1 }, Position { x: 2, y: 2 }]);

        assert_eq!(tiles.sample_tile(bounds), Position { x: 1, y: 1 });
        assert_eq!(tiles.sample_tile(bounds), Position { x: 2, y: 2 });
        assert_eq!(tiles.sample_tile(bounds), Position { x: 1, y: 1 });
    }

    #[test]
    #[should_panic(expected = "no free tiles")]
    fn spawn_on_a_full_board_panics() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = Snake::from_segments(vec![Position { x: 0, y: 0 }, Position { x: 1, y: 0 }]);

        let _ = spawn_position(
            &mut rng,
            GridSize {
                width: 2,
                height: 1,
            },
            &snake,
        );
    }
}
