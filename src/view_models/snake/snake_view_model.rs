use std::time::Duration;

use iced::keyboard::{key::Named, Key};
use log::{debug, info, warn};

use crate::{
    app::Message,
    config::GameConfig,
    models::snake::{
        snake_game::{GameSession, SnakeError},
        snapshot::BoardSnapshot,
        types::Direction,
    },
    view_model::ViewModel,
    views::snake::snake_game_screen::SnakeGameMessage,
};

use super::session_runner::SessionHandle;

/// How often the screen pulls a fresh snapshot.
pub const MILLIS_BETWEEN_FRAMES: u64 = 16;

/// What a key press asks the game to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
}

#[derive(Debug)]
pub struct SnakeViewModel {
    config: GameConfig,
    session: SessionHandle,
    last_snapshot: BoardSnapshot,
}

impl SnakeViewModel {
    /// Starts a session for `config` on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the configured board cannot hold a game.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn new(config: GameConfig) -> Result<Self, SnakeError> {
        debug!("New SnakeViewModel config: {:#?}", config);
        let game = GameSession::with_entropy(config.width, config.height, config.speed_curve())?;
        let session = SessionHandle::spawn(game, config.tick_interval());
        let last_snapshot = session.snapshot();
        Ok(Self {
            config,
            session,
            last_snapshot,
        })
    }

    #[must_use]
    pub fn key_action(key: &Key) -> Option<KeyAction> {
        match key {
            Key::Named(code) => match code {
                Named::ArrowUp => Some(KeyAction::Turn(Direction::Up)),
                Named::ArrowDown => Some(KeyAction::Turn(Direction::Down)),
                Named::ArrowLeft => Some(KeyAction::Turn(Direction::Left)),
                Named::ArrowRight => Some(KeyAction::Turn(Direction::Right)),
                Named::Space => Some(KeyAction::TogglePause),
                Named::Escape => Some(KeyAction::Quit),
                _ => None,
            },
            Key::Character(c) => match c.as_str() {
                "w" | "W" | "k" | "K" => Some(KeyAction::Turn(Direction::Up)),
                "s" | "S" | "j" | "J" => Some(KeyAction::Turn(Direction::Down)),
                "a" | "A" | "h" | "H" => Some(KeyAction::Turn(Direction::Left)),
                "d" | "D" | "l" | "L" => Some(KeyAction::Turn(Direction::Right)),
                " " => Some(KeyAction::TogglePause),
                "r" | "R" => Some(KeyAction::Restart),
                "q" | "Q" => Some(KeyAction::Quit),
                _ => None,
            },
            Key::Unidentified => None,
        }
    }

    #[must_use]
    pub fn get_last_snapshot(&self) -> &BoardSnapshot {
        &self.last_snapshot
    }

    #[must_use]
    pub fn get_config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn get_time_between_frames(&self) -> Duration {
        Duration::from_millis(MILLIS_BETWEEN_FRAMES)
    }

    fn apply(&mut self, action: KeyAction) -> Option<Message> {
        match action {
            KeyAction::Turn(direction) => {
                self.session.submit(direction);
                None
            }
            KeyAction::TogglePause => {
                self.session.toggle_pause();
                None
            }
            KeyAction::Restart => {
                debug!("Restart requested");
                self.session.restart();
                None
            }
            KeyAction::Quit => {
                info!("Quit requested with score {}", self.last_snapshot.score);
                self.session.shutdown();
                Some(Message::Quit)
            }
        }
    }
}

impl ViewModel for SnakeViewModel {
    fn update(&mut self, message: Message) -> Option<Message> {
        let snake_message = match message {
            Message::Snake(snake_message) => snake_message,
            other => {
                warn!("Non-snake message sent to SnakeViewModel: {:#?}", other);
                return None;
            }
        };
        match snake_message {
            SnakeGameMessage::Key(key) => Self::key_action(&key).and_then(|action| self.apply(action)),
            SnakeGameMessage::Frame(_) => {
                self.last_snapshot = self.session.snapshot();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use iced::time::Instant;
    use tokio::time;

    use super::*;
    use crate::models::snake::{snake_game::GameStatus, types::Position};

    fn key(c: &str) -> Message {
        Message::Snake(SnakeGameMessage::Key(Key::Character(c.into())))
    }

    fn frame() -> Message {
        Message::Snake(SnakeGameMessage::Frame(Instant::now()))
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(
            SnakeViewModel::key_action(&Key::Named(Named::ArrowUp)),
            Some(KeyAction::Turn(Direction::Up))
        );
        assert_eq!(
            SnakeViewModel::key_action(&Key::Character("j".into())),
            Some(KeyAction::Turn(Direction::Down))
        );
        assert_eq!(
            SnakeViewModel::key_action(&Key::Character("h".into())),
            Some(KeyAction::Turn(Direction::Left))
        );
        assert_eq!(
            SnakeViewModel::key_action(&Key::Character("D".into())),
            Some(KeyAction::Turn(Direction::Right))
        );
        assert_eq!(
            SnakeViewModel::key_action(&Key::Named(Named::Space)),
            Some(KeyAction::TogglePause)
        );
        assert_eq!(
            SnakeViewModel::key_action(&Key::Character("r".into())),
            Some(KeyAction::Restart)
        );
        assert_eq!(
            SnakeViewModel::key_action(&Key::Named(Named::Escape)),
            Some(KeyAction::Quit)
        );
        assert_eq!(SnakeViewModel::key_action(&Key::Character("x".into())), None);
        assert_eq!(SnakeViewModel::key_action(&Key::Unidentified), None);
    }

    #[tokio::test(start_paused = true)]
    async fn frames_pick_up_session_state() {
        let mut view_model = SnakeViewModel::new(GameConfig::default()).expect("default config");
        let start = view_model.get_last_snapshot().clone();
        assert_eq!(start.head(), Some(Position::new(13, 17)));

        assert!(view_model.update(key("w")).is_none());
        time::sleep(Duration::from_millis(300)).await;
        assert_eq!(view_model.get_last_snapshot(), &start);

        assert!(view_model.update(frame()).is_none());
        let head = view_model.get_last_snapshot().head().expect("snake has a head");
        assert!(head.y < 17);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_and_quit() {
        let mut view_model = SnakeViewModel::new(GameConfig::default()).expect("default config");
        assert!(view_model.update(key(" ")).is_none());
        time::sleep(Duration::from_millis(1)).await;
        view_model.update(frame());
        assert_eq!(view_model.get_last_snapshot().status, GameStatus::Paused);

        assert!(matches!(view_model.update(key("q")), Some(Message::Quit)));
    }
}
