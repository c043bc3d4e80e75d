//! How many ticks pass between moves as the score climbs.

/// Step function `max(floor, initial - score / divisor)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedCurve {
    pub initial: u32,
    pub divisor: u32,
    pub floor: u32,
}

impl SpeedCurve {
    /// Starts slow and speeds up every other apple.
    pub const CLASSIC: SpeedCurve = SpeedCurve::new(8, 2, 3);
    /// Starts fast and never speeds up.
    pub const RELAXED: SpeedCurve = SpeedCurve::new(4, 5, 4);
    /// Starts fast and speeds up once, after four apples.
    pub const BRISK: SpeedCurve = SpeedCurve::new(4, 4, 3);

    /// # Panics
    ///
    /// Panics if `divisor` is zero or `floor` is zero or above `initial`.
    #[must_use]
    pub const fn new(initial: u32, divisor: u32, floor: u32) -> Self {
        assert!(divisor > 0, "Speed divisor must be positive");
        assert!(floor > 0 && floor <= initial, "Speed floor must be in 1..=initial");
        Self {
            initial,
            divisor,
            floor,
        }
    }

    /// Ticks between moves at `score`.
    #[must_use]
    pub fn move_speed(&self, score: u32) -> u32 {
        self.initial
            .saturating_sub(score / self.divisor)
            .max(self.floor)
    }
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self::CLASSIC
    }
}
