//! Background task that owns a [`GameSession`] and acts as its clock.
use std::time::Duration;

use log::{debug, error};
use rand::Rng;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::models::snake::{
    input_arbiter::InputArbiter,
    snake_game::{GameSession, TickOutcome},
    snapshot::BoardSnapshot,
    types::Direction,
};

/// How many lifecycle commands can wait for the session loop.
pub const COMMAND_BUFFER_SIZE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    TogglePause,
    Restart,
    Shutdown,
}

/// Handle onto a running session loop. Dropping it stops the loop.
#[derive(Debug)]
pub struct SessionHandle {
    input: InputArbiter,
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<BoardSnapshot>,
    main_handle: JoinHandle<()>,
}

impl SessionHandle {
    /// Moves `session` onto the current tokio runtime and ticks it every
    /// `tick_interval`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn<R>(session: GameSession<R>, tick_interval: Duration) -> Self
    where
        R: Rng + Send + 'static,
    {
        let input = session.input();
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER_SIZE);
        let (publisher, snapshots) = watch::channel(session.snapshot());
        let main_handle = tokio::spawn(main_loop(session, tick_interval, receiver, publisher));
        Self {
            input,
            commands,
            snapshots,
            main_handle,
        }
    }

    /// The producer side of the session's input queue.
    #[must_use]
    pub fn input(&self) -> InputArbiter {
        self.input.clone()
    }

    pub fn submit(&self, direction: Direction) -> bool {
        self.input.submit(direction)
    }

    pub fn toggle_pause(&self) {
        self.send(SessionCommand::TogglePause);
    }

    pub fn restart(&self) {
        self.send(SessionCommand::Restart);
    }

    pub fn shutdown(&self) {
        self.send(SessionCommand::Shutdown);
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.main_handle.is_finished()
    }

    fn send(&self, command: SessionCommand) {
        if let Err(e) = self.commands.try_send(command) {
            error!("Could not send {command:?} to the session loop: {e}");
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if self.main_handle.is_finished() {
            return;
        }
        debug!("Stopping session loop");
        self.main_handle.abort();
    }
}

async fn main_loop<R: Rng>(
    mut session: GameSession<R>,
    tick_interval: Duration,
    mut commands: mpsc::Receiver<SessionCommand>,
    publisher: watch::Sender<BoardSnapshot>,
) {
    let mut ticker = time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if session.on_tick() == TickOutcome::Idle {
                    continue;
                }
            }
            command = commands.recv() => match command {
                Some(SessionCommand::TogglePause) => {
                    session.toggle_pause();
                }
                Some(SessionCommand::Restart) => session.restart(),
                Some(SessionCommand::Shutdown) | None => {
                    debug!("Session loop shutting down");
                    break;
                }
            },
        }
        if publisher.send(session.snapshot()).is_err() {
            debug!("Nobody is watching the session anymore");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::models::snake::{
        snake_game::{GameStatus, BOARD_HEIGHT, BOARD_WIDTH},
        speed_curve::SpeedCurve,
        types::Position,
    };

    const TICK: Duration = Duration::from_millis(16);

    fn spawn() -> SessionHandle {
        let session = GameSession::new(
            BOARD_WIDTH,
            BOARD_HEIGHT,
            SpeedCurve::CLASSIC,
            StdRng::seed_from_u64(3),
        )
        .expect("valid board");
        SessionHandle::spawn(session, TICK)
    }

    #[tokio::test(start_paused = true)]
    async fn clock_moves_the_snake() {
        let handle = spawn();
        assert_eq!(handle.snapshot().head(), Some(Position::new(13, 17)));
        time::sleep(Duration::from_millis(300)).await;
        let snap = handle.snapshot();
        let head = snap.head().expect("snake has a head");
        assert!(head.x > 13);
        assert_eq!(head.y, 17);
        assert_eq!(snap.snake.len(), 4);
        assert_eq!(snap.status, GameStatus::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn input_turns_the_snake() {
        let handle = spawn();
        assert!(handle.submit(Direction::Up));
        time::sleep(Duration::from_millis(300)).await;
        let head = handle.snapshot().head().expect("snake has a head");
        assert!(head.y < 17);
        assert_eq!(head.x, 13);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_and_restart_commands() {
        let handle = spawn();
        handle.toggle_pause();
        time::sleep(Duration::from_millis(1)).await;
        let paused = handle.snapshot();
        assert_eq!(paused.status, GameStatus::Paused);

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(handle.snapshot(), paused);

        handle.restart();
        time::sleep(Duration::from_millis(1)).await;
        let fresh = handle.snapshot();
        assert_eq!(fresh.status, GameStatus::Running);
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.head(), Some(Position::new(13, 17)));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_ends_the_loop() {
        let handle = spawn();
        handle.shutdown();
        time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }
}
