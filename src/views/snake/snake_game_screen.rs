use iced::{
    keyboard::{self, Key},
    time::{self, Instant},
    widget::{column, container, text, Column, Row},
    Alignment, Border, Color, Element, Length, Size, Subscription,
};

use crate::{
    app::Message,
    config::GameConfig,
    models::snake::{
        snake_game::{GameOverReason, GameStatus, SnakeError},
        snapshot::{BoardSnapshot, Cell},
    },
    view::View,
    view_model::ViewModel,
    view_models::snake::snake_view_model::SnakeViewModel,
};

/// Side of one board cell in pixels.
pub const CELL_SIZE: u16 = 20;

#[derive(Clone, Debug)]
pub enum SnakeGameMessage {
    Key(Key),
    Frame(Instant),
}

#[derive(Debug)]
pub struct SnakeGameScreen {
    view_model: SnakeViewModel,
}

impl SnakeGameScreen {
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the configured board cannot hold a game.
    pub fn new(config: GameConfig) -> Result<Self, SnakeError> {
        Ok(Self {
            view_model: SnakeViewModel::new(config)?,
        })
    }

    /// Window size that fits the whole board plus the status line.
    #[must_use]
    pub fn window_size(config: &GameConfig) -> Size {
        let cell = f32::from(CELL_SIZE);
        // Board sides are capped well below f32's exact integer range.
        #[allow(clippy::cast_precision_loss)]
        let (width, height) = (config.width as f32, config.height as f32);
        Size::new(width * cell + 40.0, height * cell + 100.0)
    }

    fn status_line(snapshot: &BoardSnapshot) -> String {
        match snapshot.status {
            GameStatus::Running => format!(
                "Score: {} | Press 'space' to pause | Press 'r' to restart | Press 'q' to quit",
                snapshot.score
            ),
            GameStatus::Paused => format!(
                "Paused. Score: {} | Press 'space' to resume | Press 'q' to quit",
                snapshot.score
            ),
            GameStatus::GameOver => {
                let headline = match snapshot.game_over_reason {
                    Some(GameOverReason::BoardFilled) => "You filled the board!",
                    _ => "Game Over!",
                };
                format!(
                    "{headline} Score: {}\nPress 'r' to restart | Press 'q' to quit",
                    snapshot.score
                )
            }
        }
    }
}

impl View for SnakeGameScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        self.view_model.update(message)
    }

    fn view(&self) -> Element<Message> {
        let snapshot = self.view_model.get_last_snapshot();
        let mut grid_view = Column::new();

        let make_container = |color: Color| {
            container(text(" ").color(color)) // Empty text to preserve size
                .width(CELL_SIZE)
                .height(CELL_SIZE)
                .style(move |_: &_| container::Style {
                    border: Border {
                        color: Color::from_rgba(0.0, 0.0, 0.0, 0.1),
                        width: 1.0,
                        ..Default::default()
                    },
                    background: Some(color.into()),
                    ..container::Style::default()
                })
        };

        for grid_row in snapshot.grid() {
            let mut row = Row::new();
            for cell in grid_row {
                let rectangle = match cell {
                    Cell::Empty => make_container(Color::WHITE),
                    Cell::Food => make_container(Color::from_rgb(1.0, 0.0, 0.0)),
                    Cell::SnakeBody => make_container(Color::from_rgba(0.0, 0.6, 0.0, 0.8)),
                    Cell::SnakeHead => make_container(Color::from_rgb(0.0, 0.8, 0.0)),
                };
                row = row.push(rectangle);
            }
            grid_view = grid_view.push(row);
        }

        let content = column![grid_view, text(Self::status_line(snapshot))]
            .spacing(10)
            .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center)
            .align_y(iced::alignment::Vertical::Center)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let frames = time::every(self.view_model.get_time_between_frames())
            .map(SnakeGameMessage::Frame)
            .map(Message::Snake);
        let keyboard = keyboard::on_key_press(|key, _| {
            Some(Message::Snake(SnakeGameMessage::Key(key)))
        });
        Subscription::batch(vec![frames, keyboard])
    }
}
