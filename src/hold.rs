//! Hold slot: one stored piece, swappable once per drop cycle

use crate::tetromino::TetrominoType;

#[derive(Debug, Clone, Default)]
pub struct HoldSlot {
    piece: Option<TetrominoType>,
    /// Set once a swap happens, cleared by the next normal spawn
    used: bool,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece(&self) -> Option<TetrominoType> {
        self.piece
    }

    pub fn can_swap(&self) -> bool {
        !self.used
    }

    /// Store `active` and hand back whatever was held before
    pub fn swap(&mut self, active: TetrominoType) -> Option<TetrominoType> {
        self.piece.replace(active)
    }

    pub fn mark_used(&mut self) {
        self.used = true;
    }

    /// A new drop cycle has started
    pub fn reset_cycle(&mut self) {
        self.used = false;
    }

    pub fn clear(&mut self) {
        self.piece = None;
        self.used = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_returns_previous() {
        let mut hold = HoldSlot::new();
        assert_eq!(hold.swap(TetrominoType::T), None);
        assert_eq!(hold.swap(TetrominoType::I), Some(TetrominoType::T));
        assert_eq!(hold.piece(), Some(TetrominoType::I));
    }

    #[test]
    fn test_cycle_flag() {
        let mut hold = HoldSlot::new();
        assert!(hold.can_swap());
        hold.mark_used();
        assert!(!hold.can_swap());
        hold.reset_cycle();
        assert!(hold.can_swap());
    }
}
