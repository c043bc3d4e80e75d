use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{
    input_arbiter::InputArbiter,
    snake_body::{SnakeBody, INITIAL_SNAKE_LENGTH},
    snapshot::BoardSnapshot,
    speed_curve::SpeedCurve,
    types::{Direction, Position},
};

/// Default board width.
pub const BOARD_WIDTH: i32 = 26;
/// Default board height.
pub const BOARD_HEIGHT: i32 = 34;
/// Min board size along either axis. The fresh snake needs three cells behind the
/// center and at least one ahead of it.
pub const MIN_BOARD_SIZE: i32 = 6;
/// Max board size along either axis.
pub const MAX_BOARD_SIZE: i32 = 200;
/// How far ahead of the fresh snake the first food goes.
pub const FOOD_LEAD: i32 = 5;

type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeError {
    InvalidBoardSize { width: i32, height: i32 },
}

impl std::fmt::Display for SnakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnakeError::InvalidBoardSize { width, height } => write!(
                f,
                "board {width}x{height} is outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE} on some axis"
            ),
        }
    }
}

impl std::error::Error for SnakeError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    WallCollision,
    SelfCollision,
    /// The snake took the last free cell, so no food can be placed.
    BoardFilled,
}

/// What a call to [`GameSession::on_tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Only the tick counter moved, or nothing at all.
    Idle,
    Moved,
    Ate,
    GameOver(GameOverReason),
}

/// One player's game: board, snake, food, score and the pending input.
#[derive(Debug)]
pub struct GameSession<R = StdRng> {
    width: i32,
    height: i32,
    snake: SnakeBody,
    direction: Direction,
    last_direction: Direction,
    food: Position,
    score: u32,
    tick_count: u32,
    move_speed: u32,
    speed_curve: SpeedCurve,
    status: GameStatus,
    game_over_reason: Option<GameOverReason>,
    input: InputArbiter,
    rng: R,
}

impl GameSession<StdRng> {
    /// Creates a session whose food placement is seeded from the OS.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidBoardSize`] if either side is outside
    /// [`MIN_BOARD_SIZE`]..=[`MAX_BOARD_SIZE`].
    pub fn with_entropy(width: i32, height: i32, speed_curve: SpeedCurve) -> Result<Self> {
        Self::new(width, height, speed_curve, StdRng::from_entropy())
    }
}

impl<R: Rng> GameSession<R> {
    /// Creates a session and lays out a fresh game.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidBoardSize`] if either side is outside
    /// [`MIN_BOARD_SIZE`]..=[`MAX_BOARD_SIZE`].
    pub fn new(width: i32, height: i32, speed_curve: SpeedCurve, rng: R) -> Result<Self> {
        let valid = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(SnakeError::InvalidBoardSize { width, height });
        }
        let head = Position::new(width / 2, height / 2);
        let mut session = Self {
            width,
            height,
            snake: SnakeBody::new(head, Direction::Right, INITIAL_SNAKE_LENGTH),
            direction: Direction::Right,
            last_direction: Direction::Right,
            food: head,
            score: 0,
            tick_count: 0,
            move_speed: speed_curve.move_speed(0),
            speed_curve,
            status: GameStatus::Running,
            game_over_reason: None,
            input: InputArbiter::new(),
            rng,
        };
        session.restart();
        Ok(session)
    }

    /// Puts everything back to the starting layout. Pending input is discarded, but
    /// handles from [`Self::input`] stay connected.
    pub fn restart(&mut self) {
        let head = Position::new(self.width / 2, self.height / 2);
        self.snake = SnakeBody::new(head, Direction::Right, INITIAL_SNAKE_LENGTH);
        self.direction = Direction::Right;
        self.last_direction = Direction::Right;
        self.score = 0;
        self.tick_count = 0;
        self.move_speed = self.speed_curve.move_speed(0);
        self.status = GameStatus::Running;
        self.game_over_reason = None;
        self.input.reset();

        let lead = Position::new(head.x + FOOD_LEAD, head.y);
        self.food = if self.in_bounds(lead) && !self.snake.contains(lead) {
            lead
        } else {
            self.random_free_cell().unwrap_or(lead)
        };
        info!(
            "New game on {}x{} board, food at ({}, {})",
            self.width, self.height, self.food.x, self.food.y
        );
    }

    /// Advances the game by one clock pulse. The snake only moves once the tick
    /// counter reaches the current move speed.
    pub fn on_tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }
        self.tick_count += 1;
        if self.tick_count < self.move_speed {
            return TickOutcome::Idle;
        }
        self.tick_count = 0;

        if let Some(next) = self.input.drain_one(self.direction, self.last_direction) {
            debug!("New direction {next}, was {}", self.direction);
            self.direction = next;
        }

        let new_head = self.snake.head().step(self.direction);
        if let Some(reason) = self.check_collision(new_head) {
            info!(
                "Game over: {reason:?} at ({}, {}) with score {}",
                new_head.x, new_head.y, self.score
            );
            return self.end_game(reason);
        }
        self.last_direction = self.direction;

        if new_head != self.food {
            self.snake.slide(new_head);
            return TickOutcome::Moved;
        }

        self.snake.grow(new_head);
        self.score += 1;
        self.move_speed = self.speed_curve.move_speed(self.score);
        info!(
            "Ate food at ({}, {}). Score: {}",
            new_head.x, new_head.y, self.score
        );
        match self.random_free_cell() {
            Some(food) => {
                debug!("New food position ({}, {})", food.x, food.y);
                self.food = food;
                TickOutcome::Ate
            }
            None => {
                info!("Snake filled the board with score {}", self.score);
                self.end_game(GameOverReason::BoardFilled)
            }
        }
    }

    /// Flips between running and paused. A finished game stays finished.
    pub fn toggle_pause(&mut self) -> GameStatus {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::GameOver => GameStatus::GameOver,
        };
        debug!("Status is now {:?}", self.status);
        self.status
    }

    /// Queues a turn for a later tick. See [`InputArbiter::submit`].
    pub fn submit_direction(&self, direction: Direction) -> bool {
        self.input.submit(direction)
    }

    /// A handle onto this session's input queue for the key-event side.
    #[must_use]
    pub fn input(&self) -> InputArbiter {
        self.input.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.width,
            height: self.height,
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            score: self.score,
            move_speed: self.move_speed,
            status: self.status,
            game_over_reason: self.game_over_reason,
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    #[must_use]
    pub fn move_speed(&self) -> u32 {
        self.move_speed
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    fn end_game(&mut self, reason: GameOverReason) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);
        TickOutcome::GameOver(reason)
    }

    fn in_bounds(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    // The tail still counts even though a slide would vacate it this tick.
    fn check_collision(&self, pos: Position) -> Option<GameOverReason> {
        if !self.in_bounds(pos) {
            Some(GameOverReason::WallCollision)
        } else if self.snake.contains(pos) {
            Some(GameOverReason::SelfCollision)
        } else {
            None
        }
    }

    fn random_free_cell(&mut self) -> Option<Position> {
        let cells = usize::try_from(self.width * self.height).unwrap_or(usize::MAX);
        if self.snake.len() >= cells {
            return None;
        }
        loop {
            let pos = Position::new(
                self.rng.gen_range(0..self.width),
                self.rng.gen_range(0..self.height),
            );
            if !self.snake.contains(pos) {
                return Some(pos);
            }
        }
    }
}
