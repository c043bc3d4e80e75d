//! Module for containing the snake's body.
use std::collections::VecDeque;

use super::types::{Direction, Position};

/// Length of a freshly spawned snake.
pub const INITIAL_SNAKE_LENGTH: usize = 4;

/// Cells taken by the snake, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeBody {
    squares_taken: VecDeque<Position>,
}

impl SnakeBody {
    /// A straight snake with its head at `head`, trailing away from `direction`.
    #[must_use]
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let behind = direction.get_opposite();
        let mut squares_taken = VecDeque::with_capacity(length);
        let mut cell = head;
        for _ in 0..length {
            squares_taken.push_back(cell);
            cell = cell.step(behind);
        }
        Self { squares_taken }
    }

    /// # Panics
    ///
    /// Panics if the body is empty, which construction never allows.
    #[must_use]
    pub fn head(&self) -> Position {
        *self.squares_taken.front().expect("Snake body is never empty")
    }

    /// # Panics
    ///
    /// Panics if the body is empty, which construction never allows.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self.squares_taken.back().expect("Snake body is never empty")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.squares_taken.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squares_taken.is_empty()
    }

    /// Whether any cell, tail included, is at `pos`.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.squares_taken.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.squares_taken.iter()
    }

    /// Moves onto `new_head`, keeping the tail.
    pub fn grow(&mut self, new_head: Position) {
        self.squares_taken.push_front(new_head);
    }

    /// Moves onto `new_head` and gives up the tail cell, which is returned.
    pub fn slide(&mut self, new_head: Position) -> Option<Position> {
        self.squares_taken.push_front(new_head);
        self.squares_taken.pop_back()
    }
}
