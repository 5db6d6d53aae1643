//! Active falling piece logic

use crate::field::Field;
use crate::srs::get_wall_kicks;
use crate::tetromino::{Point, Rotation, RotationDirection, TetrominoType};
use std::time::Duration;

/// The falling piece
#[derive(Debug, Clone)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current rotation state
    rotation: Rotation,
    /// Cell offsets relative to `position`, rotated in place
    offsets: [Point; 4],
    /// Anchor cell on the field
    position: Point,
    /// Time since the last gravity step
    step_time: Duration,
    /// Time spent without a successful move
    lock_time: Duration,
}

impl Piece {
    /// Create a piece in its spawn orientation at `position`.
    ///
    /// Placement is not checked here; the caller decides what an invalid
    /// spawn means.
    pub fn spawn(piece_type: TetrominoType, position: Point) -> Self {
        Self {
            piece_type,
            rotation: Rotation::North,
            offsets: piece_type.cells(),
            position,
            step_time: Duration::ZERO,
            lock_time: Duration::ZERO,
        }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn offsets(&self) -> [Point; 4] {
        self.offsets
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Absolute field cells of all 4 blocks
    pub fn cells(&self) -> [Point; 4] {
        self.cells_at(self.position)
    }

    fn cells_at(&self, (px, py): Point) -> [Point; 4] {
        self.offsets.map(|(dx, dy)| (px + dx, py + dy))
    }

    /// Translate by `(dx, dy)` if the target fits. Any successful move
    /// restarts the lock timer.
    pub fn try_move(&mut self, dx: i32, dy: i32, field: &Field) -> bool {
        let target = (self.position.0 + dx, self.position.1 + dy);
        if !field.can_place(&self.cells_at(target)) {
            return false;
        }
        self.position = target;
        self.lock_time = Duration::ZERO;
        true
    }

    /// Rotate a quarter turn, trying each wall kick in order.
    ///
    /// On failure rotation and offsets are restored and the piece stays
    /// where it was.
    pub fn rotate(&mut self, direction: RotationDirection, field: &Field) -> bool {
        let original_rotation = self.rotation;
        let original_offsets = self.offsets;

        self.rotation = self.rotation.turned(direction);
        let piece_type = self.piece_type;
        self.offsets = self
            .offsets
            .map(|cell| piece_type.rotate_offset(cell, direction));

        let kicks = get_wall_kicks(self.piece_type, self.rotation, direction);
        if kicks.iter().any(|&(dx, dy)| self.try_move(dx, dy, field)) {
            return true;
        }

        self.rotation = original_rotation;
        self.offsets = original_offsets;
        false
    }

    /// Move down as far as possible and return the distance dropped
    pub fn hard_drop(&mut self, field: &Field) -> u32 {
        let mut distance = 0;
        while self.try_move(0, -1, field) {
            distance += 1;
        }
        distance
    }

    pub fn can_move_down(&self, field: &Field) -> bool {
        let (x, y) = self.position;
        field.can_place(&self.cells_at((x, y - 1)))
    }

    /// Cells the piece would occupy after a hard drop (ghost piece)
    pub fn landing_cells(&self, field: &Field) -> [Point; 4] {
        let (x, mut y) = self.position;
        while field.can_place(&self.cells_at((x, y - 1))) {
            y -= 1;
        }
        self.cells_at((x, y))
    }

    /// Advance both timers by one tick
    pub fn advance(&mut self, dt: Duration) {
        self.step_time += dt;
        self.lock_time += dt;
    }

    /// Whether a gravity step is due
    pub fn step_due(&self, step_delay: Duration) -> bool {
        self.step_time >= step_delay
    }

    pub fn reset_step(&mut self) {
        self.step_time = Duration::ZERO;
    }

    pub fn lock_time(&self) -> Duration {
        self.lock_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::tests::fill_row;
    use proptest::prelude::*;

    const ORIGIN: Point = (0, 0);

    #[test]
    fn test_spawn_uses_catalog_cells() {
        let piece = Piece::spawn(TetrominoType::I, (-1, 8));
        assert_eq!(piece.rotation(), Rotation::North);
        assert_eq!(piece.cells(), [(-2, 9), (-1, 9), (0, 9), (1, 9)]);
        assert_eq!(piece.lock_time(), Duration::ZERO);
    }

    #[test]
    fn test_move_and_collide_with_wall() {
        let field = Field::new();
        let mut piece = Piece::spawn(TetrominoType::O, ORIGIN);
        // O spans columns 0..=1, so three steps reach the right wall
        for _ in 0..3 {
            assert!(piece.try_move(1, 0, &field));
        }
        assert!(!piece.try_move(1, 0, &field));
        assert_eq!(piece.position(), (3, 0));
    }

    #[test]
    fn test_successful_move_resets_lock_time() {
        let field = Field::new();
        let mut piece = Piece::spawn(TetrominoType::T, ORIGIN);
        piece.advance(Duration::from_millis(300));
        assert_eq!(piece.lock_time(), Duration::from_millis(300));
        assert!(piece.try_move(-1, 0, &field));
        assert_eq!(piece.lock_time(), Duration::ZERO);
    }

    #[test]
    fn test_failed_move_keeps_lock_time() {
        let field = Field::new();
        let mut piece = Piece::spawn(TetrominoType::T, (0, -10));
        piece.advance(Duration::from_millis(300));
        assert!(!piece.try_move(0, -1, &field));
        assert_eq!(piece.lock_time(), Duration::from_millis(300));
    }

    #[test]
    fn test_o_rotation_keeps_offsets() {
        let field = Field::new();
        let mut piece = Piece::spawn(TetrominoType::O, ORIGIN);
        assert!(piece.rotate(RotationDirection::Clockwise, &field));
        assert_eq!(piece.offsets(), TetrominoType::O.cells());
        assert_eq!(piece.rotation(), Rotation::East);
    }

    #[test]
    fn test_rotation_kicks_off_left_wall() {
        let field = Field::new();
        // Vertical I hugging the left wall
        let mut piece = Piece::spawn(TetrominoType::I, (0, 0));
        assert!(piece.rotate(RotationDirection::CounterClockwise, &field));
        while piece.try_move(-1, 0, &field) {}
        let left = piece.cells().iter().map(|c| c.0).min();
        assert_eq!(left, Some(-5));

        // Turning back to horizontal needs a kick to the right
        assert!(piece.rotate(RotationDirection::Clockwise, &field));
        assert!(field.can_place(&piece.cells()));
        assert_eq!(piece.rotation(), Rotation::North);
    }

    #[test]
    fn test_rotation_takes_first_fitting_kick() {
        let field = Field::new();
        let mut piece = Piece::spawn(TetrominoType::I, (0, 0));
        assert!(piece.rotate(RotationDirection::CounterClockwise, &field));
        while piece.try_move(-1, 0, &field) {}
        let (x, y) = piece.position();

        // (0, 0) and (-2, 0) leave the field, (1, 0) is the first fit
        assert!(piece.rotate(RotationDirection::Clockwise, &field));
        assert_eq!(piece.position(), (x + 1, y));
        assert_eq!(piece.cells(), [(-5, 1), (-4, 1), (-3, 1), (-2, 1)]);
    }

    #[test]
    fn test_successful_rotation_resets_lock_time() {
        let field = Field::new();
        let mut piece = Piece::spawn(TetrominoType::T, ORIGIN);
        piece.advance(Duration::from_millis(400));
        assert!(piece.rotate(RotationDirection::Clockwise, &field));
        assert_eq!(piece.lock_time(), Duration::ZERO);
    }

    #[test]
    fn test_blocked_rotation_is_reverted() {
        let mut field = Field::new();
        let mut piece = Piece::spawn(TetrominoType::T, (0, 0));
        // Fill everything but the piece itself so every kick collides
        let boxed: Vec<Point> = (-5..5)
            .flat_map(|x| (-10..10).map(move |y| (x, y)))
            .filter(|c| !piece.cells().contains(c))
            .collect();
        field.commit(&boxed, TetrominoType::Z);
        assert!(field.can_place(&piece.cells()));

        let before = (piece.offsets(), piece.position(), piece.rotation());
        assert!(!piece.rotate(RotationDirection::Clockwise, &field));
        assert_eq!((piece.offsets(), piece.position(), piece.rotation()), before);
    }

    #[test]
    fn test_hard_drop_reaches_floor() {
        let field = Field::new();
        let mut piece = Piece::spawn(TetrominoType::I, (-1, 8));
        assert_eq!(piece.hard_drop(&field), 19);
        assert!(piece.cells().iter().all(|&(_, y)| y == -10));
        assert!(!piece.can_move_down(&field));
    }

    #[test]
    fn test_landing_cells_match_hard_drop() {
        let mut field = Field::new();
        fill_row(&mut field, -10);
        let mut piece = Piece::spawn(TetrominoType::L, (0, 5));
        let ghost = piece.landing_cells(&field);
        piece.hard_drop(&field);
        assert_eq!(ghost, piece.cells());
    }

    #[test]
    fn test_step_due_after_delay() {
        let mut piece = Piece::spawn(TetrominoType::S, ORIGIN);
        let delay = Duration::from_secs(1);
        piece.advance(Duration::from_millis(999));
        assert!(!piece.step_due(delay));
        piece.advance(Duration::from_millis(1));
        assert!(piece.step_due(delay));
        piece.reset_step();
        assert!(!piece.step_due(delay));
    }

    fn any_shape() -> impl Strategy<Value = TetrominoType> {
        prop::sample::select(TetrominoType::all().to_vec())
    }

    proptest! {
        #[test]
        fn four_turns_restore_the_piece(
            shape in any_shape(),
            clockwise in any::<bool>(),
        ) {
            let field = Field::new();
            let direction = if clockwise {
                RotationDirection::Clockwise
            } else {
                RotationDirection::CounterClockwise
            };
            let mut piece = Piece::spawn(shape, ORIGIN);
            for _ in 0..4 {
                prop_assert!(piece.rotate(direction, &field));
            }
            prop_assert_eq!(piece.offsets(), shape.cells());
            prop_assert_eq!(piece.rotation(), Rotation::North);
            prop_assert_eq!(piece.position(), ORIGIN);
        }
    }
}
