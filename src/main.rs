use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use ticksnake::{app::State, config::GameConfig, views::snake::snake_game_screen::SnakeGameScreen};

fn main() -> ExitCode {
    let config = GameConfig::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Could not start the tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    // Sessions spawn their clock onto this runtime from the UI thread.
    let _guard = runtime.enter();

    let window_size = SnakeGameScreen::window_size(&config);
    info!(
        "Starting a {}x{} game, tick every {} ms",
        config.width, config.height, config.tick_ms
    );
    let state = match State::new(config) {
        Ok(state) => state,
        Err(e) => {
            error!("Could not start the game: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = iced::application("Snake", State::update, State::view)
        .window_size(window_size)
        .subscription(State::subscription)
        .run_with(move || (state, iced::Task::none()));
    if let Err(e) = result {
        error!("Window closed with an error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
