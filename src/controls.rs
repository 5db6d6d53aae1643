//! Per-tick player input and horizontal auto-repeat
//!
//! The host fills a [`TickInput`] each frame from whatever device it reads.
//! Holding left or right moves once immediately, then again every time more
//! than the repeat interval has passed; that timing state lives in
//! [`AutoRepeat`], owned by the host per input device.

use std::time::Duration;

/// Horizontal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Left,
    Right,
}

impl Shift {
    pub fn dx(&self) -> i32 {
        match self {
            Shift::Left => -1,
            Shift::Right => 1,
        }
    }
}

/// Input gathered for one tick. Flags are "pressed this tick".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_ccw: bool,
    pub rotate_cw: bool,
    pub hard_drop: bool,
    pub soft_drop: bool,
    pub hold: bool,
    pub restart: bool,
    /// Direction currently held down, if any
    pub shift: Option<Shift>,
}

/// Auto-repeat state for a held direction
#[derive(Debug, Clone)]
pub struct AutoRepeat {
    interval: Duration,
    holding: bool,
    since_move: Duration,
}

impl AutoRepeat {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            holding: false,
            since_move: Duration::ZERO,
        }
    }

    /// Feed one tick of held state, returning the move to make this tick
    pub fn update(&mut self, held: Option<Shift>, dt: Duration) -> Option<Shift> {
        let Some(direction) = held else {
            self.holding = false;
            return None;
        };

        if !self.holding {
            self.holding = true;
            self.since_move = Duration::ZERO;
            return Some(direction);
        }

        self.since_move += dt;
        if self.since_move > self.interval {
            self.since_move = Duration::ZERO;
            Some(direction)
        } else {
            None
        }
    }

    /// Forget any held direction
    pub fn clear(&mut self) {
        self.holding = false;
        self.since_move = Duration::ZERO;
    }
}

impl Default for AutoRepeat {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_first_frame_moves_immediately() {
        let mut repeat = AutoRepeat::default();
        assert_eq!(repeat.update(Some(Shift::Left), FRAME), Some(Shift::Left));
        assert_eq!(repeat.update(Some(Shift::Left), FRAME), None);
    }

    #[test]
    fn test_repeats_after_interval() {
        let mut repeat = AutoRepeat::default();
        let mut moves = 0;
        // One second of holding at ~60 fps
        for _ in 0..62 {
            if repeat.update(Some(Shift::Right), FRAME).is_some() {
                moves += 1;
            }
        }
        // Initial move, then one every 7 frames (112ms > 100ms)
        assert_eq!(moves, 1 + 61 / 7);
    }

    #[test]
    fn test_release_resets() {
        let mut repeat = AutoRepeat::default();
        repeat.update(Some(Shift::Left), FRAME);
        assert_eq!(repeat.update(None, FRAME), None);
        assert_eq!(repeat.update(Some(Shift::Left), FRAME), Some(Shift::Left));
    }

    #[test]
    fn test_exact_interval_does_not_repeat() {
        let mut repeat = AutoRepeat::new(Duration::from_millis(100));
        repeat.update(Some(Shift::Left), Duration::ZERO);
        assert_eq!(
            repeat.update(Some(Shift::Left), Duration::from_millis(100)),
            None
        );
        assert_eq!(
            repeat.update(Some(Shift::Left), Duration::from_millis(1)),
            Some(Shift::Left)
        );
    }
}
