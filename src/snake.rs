use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical tile coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring position one tile towards `direction`.
    ///
    /// The result is not clamped; a step off the edge yields an
    /// out-of-bounds position.
    #[must_use]
    pub fn shifted(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Ordered snake body, head first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a horizontal snake of `length` cells with the body trailing
    /// to the left of `head`.
    #[must_use]
    pub fn in_row(head: Position, length: u16) -> Self {
        debug_assert!(length >= 1);

        let body = (0..i32::from(length))
            .map(|offset| Position {
                x: head.x - offset,
                y: head.y,
            })
            .collect();

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Moves the head to `next_head`. The tail is kept when `grow` is set,
    /// otherwise it is dropped so the length stays constant.
    pub fn advance(&mut self, next_head: Position, grow: bool) {
        self.body.push_front(next_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn shifted_moves_one_tile_per_direction() {
        let origin = Position { x: 3, y: 3 };

        assert_eq!(origin.shifted(Direction::Up), Position { x: 3, y: 2 });
        assert_eq!(origin.shifted(Direction::Down), Position { x: 3, y: 4 });
        assert_eq!(origin.shifted(Direction::Left), Position { x: 2, y: 3 });
        assert_eq!(origin.shifted(Direction::Right), Position { x: 4, y: 3 });
    }

    #[test]
    fn bounds_check_excludes_the_far_edges() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert!(Position { x: 0, y: 0 }.is_within_bounds(bounds));
        assert!(Position { x: 9, y: 7 }.is_within_bounds(bounds));
        assert!(!Position { x: 10, y: 7 }.is_within_bounds(bounds));
        assert!(!Position { x: 9, y: 8 }.is_within_bounds(bounds));
        assert!(!Position { x: -1, y: 0 }.is_within_bounds(bounds));
    }

    #[test]
    fn row_snake_trails_left_of_head() {
        let snake = Snake::in_row(Position { x: 5, y: 5 }, 3);

        let segments: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
                Position { x: 3, y: 5 },
            ]
        );
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::in_row(Position { x: 5, y: 5 }, 3);

        snake.advance(Position { x: 6, y: 5 }, false);

        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 3);
        assert!(!snake.occupies(Position { x: 3, y: 5 }));
    }

    #[test]
    fn advance_with_growth_keeps_previous_tail() {
        let mut snake = Snake::in_row(Position { x: 5, y: 5 }, 3);

        snake.advance(Position { x: 6, y: 5 }, true);

        assert_eq!(snake.len(), 4);
        assert!(snake.occupies(Position { x: 3, y: 5 }));
    }

    #[test]
    fn head_overlap_ignores_the_head_itself() {
        let straight = Snake::in_row(Position { x: 5, y: 5 }, 4);
        assert!(!straight.head_overlaps_body());

        let folded = Snake::from_segments(vec![
            Position { x: 2, y: 2 },
            Position { x: 2, y: 3 },
            Position { x: 3, y: 3 },
            Position { x: 3, y: 2 },
            Position { x: 2, y: 2 },
        ]);
        assert!(folded.head_overlaps_body());
    }
}
