use iced::{Element, Subscription, Task};
use log::debug;

use crate::{
    config::GameConfig,
    models::snake::snake_game::SnakeError,
    view::View,
    views::snake::snake_game_screen::{SnakeGameMessage, SnakeGameScreen},
};

#[derive(Clone, Debug)]
pub enum Message {
    Snake(SnakeGameMessage),
    Quit,
}

/// Top-level application state handed to iced.
#[derive(Debug)]
pub struct State {
    screen: SnakeGameScreen,
}

impl State {
    /// Starts a game for `config`. Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the configured board cannot hold a game.
    pub fn new(config: GameConfig) -> Result<Self, SnakeError> {
        Ok(Self {
            screen: SnakeGameScreen::new(config)?,
        })
    }

    pub fn update(state: &mut State, message: Message) -> Task<Message> {
        if matches!(message, Message::Quit) {
            return iced::exit();
        }
        match state.screen.update(message) {
            Some(Message::Quit) => {
                debug!("Closing the application");
                iced::exit()
            }
            Some(next) => Task::done(next),
            None => Task::none(),
        }
    }

    #[must_use]
    pub fn view(state: &State) -> Element<Message> {
        state.screen.view()
    }

    #[must_use]
    pub fn subscription(state: &State) -> Subscription<Message> {
        state.screen.subscription()
    }
}
