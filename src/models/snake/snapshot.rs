//! Read-only view of a game handed to renderers between ticks.
use super::{
    snake_game::{GameOverReason, GameStatus},
    types::Position,
};

/// What a renderer should draw in a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Food,
    SnakeBody,
    SnakeHead,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub width: i32,
    pub height: i32,
    /// Snake cells, head first.
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub move_speed: u32,
    pub status: GameStatus,
    pub game_over_reason: Option<GameOverReason>,
}

impl BoardSnapshot {
    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    #[must_use]
    pub fn cell_at(&self, pos: Position) -> Cell {
        match self.snake.iter().position(|cell| *cell == pos) {
            Some(0) => Cell::SnakeHead,
            Some(_) => Cell::SnakeBody,
            None if self.food == pos => Cell::Food,
            None => Cell::Empty,
        }
    }

    /// Cells row by row, top row first.
    #[must_use]
    pub fn grid(&self) -> Vec<Vec<Cell>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.cell_at(Position::new(x, y)))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> BoardSnapshot {
        BoardSnapshot {
            width: 4,
            height: 2,
            snake: vec![Position::new(2, 0), Position::new(1, 0)],
            food: Position::new(3, 1),
            score: 0,
            move_speed: 8,
            status: GameStatus::Running,
            game_over_reason: None,
        }
    }

    #[test]
    fn cells_distinguish_head_body_food() {
        let snap = snapshot();
        assert_eq!(snap.cell_at(Position::new(2, 0)), Cell::SnakeHead);
        assert_eq!(snap.cell_at(Position::new(1, 0)), Cell::SnakeBody);
        assert_eq!(snap.cell_at(Position::new(3, 1)), Cell::Food);
        assert_eq!(snap.cell_at(Position::new(0, 1)), Cell::Empty);
        assert_eq!(snap.head(), Some(Position::new(2, 0)));
    }

    #[test]
    fn grid_is_row_major() {
        let grid = snapshot().grid();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].len(), 4);
        assert_eq!(grid[0][2], Cell::SnakeHead);
        assert_eq!(grid[1][3], Cell::Food);
    }
}
