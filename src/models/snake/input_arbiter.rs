//! Module for buffering direction changes between key events and game ticks.
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::{debug, warn};

use super::types::Direction;

/// Number of direction changes that can be pending at once.
pub const MAX_QUEUE_SIZE: usize = 5;

#[derive(Debug)]
struct PendingMoves {
    move_queue: VecDeque<Direction>,
    last_submitted: Option<Direction>,
}

/// Bounded queue of requested turns.
///
/// Cloning yields another handle onto the same queue, so the key-event side can hold
/// one while the tick side holds another. Neither side ever blocks on the other for
/// longer than a push or pop.
#[derive(Clone, Debug)]
pub struct InputArbiter {
    pending: Arc<Mutex<PendingMoves>>,
    capacity: usize,
}

impl InputArbiter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_QUEUE_SIZE)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "Input queue needs room for at least one move");
        Self {
            pending: Arc::new(Mutex::new(PendingMoves {
                move_queue: VecDeque::with_capacity(capacity),
                last_submitted: None,
            })),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PendingMoves> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a requested turn. Returns `false` if the request was dropped, either
    /// because it repeats the previous request or because the queue is full.
    pub fn submit(&self, direction: Direction) -> bool {
        let mut pending = self.lock();
        if pending.last_submitted == Some(direction) {
            debug!("Ignoring repeated {direction} request");
            return false;
        }
        if pending.move_queue.len() >= self.capacity {
            warn!("Input buffer full, dropping {direction}");
            return false;
        }
        pending.move_queue.push_back(direction);
        pending.last_submitted = Some(direction);
        debug!("Queued {direction}");
        true
    }

    /// Pops queued turns until one is legal against `current` and `previous`.
    ///
    /// A turn is dropped if it keeps going `current` or reverses `current` or
    /// `previous`. Returns `None` once the queue runs dry.
    pub fn drain_one(&self, current: Direction, previous: Direction) -> Option<Direction> {
        let mut pending = self.lock();
        while let Some(next) = pending.move_queue.pop_front() {
            if next == current || next.is_opposite(current) || next.is_opposite(previous) {
                debug!("Discarding {next} while heading {current}");
                continue;
            }
            return Some(next);
        }
        None
    }

    /// Drops every pending turn and forgets the last request.
    pub fn reset(&self) {
        let mut pending = self.lock();
        pending.move_queue.clear();
        pending.last_submitted = None;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().move_queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().move_queue.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InputArbiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn drops_newest_when_full() {
        let arbiter = InputArbiter::with_capacity(2);
        assert!(arbiter.submit(Direction::Up));
        assert!(arbiter.submit(Direction::Left));
        assert!(!arbiter.submit(Direction::Down));
        assert_eq!(arbiter.len(), 2);
        assert_eq!(
            arbiter.drain_one(Direction::Right, Direction::Right),
            Some(Direction::Up)
        );
        assert_eq!(
            arbiter.drain_one(Direction::Up, Direction::Up),
            Some(Direction::Left)
        );
        assert!(arbiter.is_empty());
    }

    #[test]
    fn repeated_request_is_filtered() {
        let arbiter = InputArbiter::new();
        assert!(arbiter.submit(Direction::Up));
        assert!(!arbiter.submit(Direction::Up));
        assert_eq!(arbiter.len(), 1);
    }

    #[test]
    fn drain_skips_reversals_and_repeats() {
        let arbiter = InputArbiter::new();
        arbiter.submit(Direction::Left);
        arbiter.submit(Direction::Right);
        arbiter.submit(Direction::Down);
        assert_eq!(
            arbiter.drain_one(Direction::Right, Direction::Right),
            Some(Direction::Down)
        );
        assert!(arbiter.is_empty());
    }

    #[test]
    fn drain_on_empty_queue_is_none() {
        let arbiter = InputArbiter::new();
        assert_eq!(arbiter.drain_one(Direction::Up, Direction::Up), None);
    }

    #[test]
    fn reversal_of_previous_is_rejected() {
        let arbiter = InputArbiter::new();
        arbiter.submit(Direction::Left);
        assert_eq!(arbiter.drain_one(Direction::Up, Direction::Right), None);
    }

    #[test]
    fn up_then_down_turns_up_only() {
        let arbiter = InputArbiter::new();
        arbiter.submit(Direction::Up);
        arbiter.submit(Direction::Down);
        let first = arbiter.drain_one(Direction::Right, Direction::Right);
        assert_eq!(first, Some(Direction::Up));
        assert_eq!(arbiter.drain_one(Direction::Up, Direction::Up), None);
    }

    #[test]
    fn reset_clears_queue_and_filter() {
        let arbiter = InputArbiter::new();
        arbiter.submit(Direction::Up);
        arbiter.reset();
        assert!(arbiter.is_empty());
        assert!(arbiter.submit(Direction::Up));
    }

    #[test]
    fn producer_on_another_thread() {
        let arbiter = InputArbiter::new();
        let producer = arbiter.clone();
        let handle = thread::spawn(move || {
            for dir in [Direction::Up, Direction::Left, Direction::Down] {
                producer.submit(dir);
            }
        });
        handle.join().expect("producer thread panicked");
        assert_eq!(arbiter.len(), 3);
        assert_eq!(arbiter.capacity(), MAX_QUEUE_SIZE);
    }
}
