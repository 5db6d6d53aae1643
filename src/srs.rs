//! Wall kick data
//!
//! When a rotation would collide, these translations are tried in order and
//! the first one that fits wins. Each shape family has 8 rows of 5 kicks;
//! the row is picked from the rotation state just entered and the direction
//! of the turn (see [`wall_kick_index`]).

use crate::tetromino::{Point, Rotation, RotationDirection, TetrominoType};

/// Number of kick rows per table (4 rotation states x 2 directions)
pub const KICK_ROWS: usize = 8;
/// Number of candidate translations per row
pub const KICKS_PER_ROW: usize = 5;

type KickTable = [[Point; KICKS_PER_ROW]; KICK_ROWS];

/// Kicks for the I piece, `(dx, dy)` with y up
const I_KICKS: KickTable = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Kicks shared by J, L, O, S, T and Z
const JLOSTZ_KICKS: KickTable = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// Row of the kick table for a turn that has just entered `to`.
///
/// `2 * to`, one less for counter-clockwise turns, wrapped into `0..8`.
pub fn wall_kick_index(to: Rotation, direction: RotationDirection) -> usize {
    let mut index = to.index() as i32 * 2;
    if direction == RotationDirection::CounterClockwise {
        index -= 1;
    }
    index.rem_euclid(KICK_ROWS as i32) as usize
}

/// Get the kick candidates for a turn that has just entered `to`
pub fn get_wall_kicks(
    piece_type: TetrominoType,
    to: Rotation,
    direction: RotationDirection,
) -> &'static [Point; KICKS_PER_ROW] {
    let table = match piece_type {
        TetrominoType::I => &I_KICKS,
        _ => &JLOSTZ_KICKS,
    };
    &table[wall_kick_index(to, direction)]
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn test_first_kick_is_identity() {
        for piece in TetrominoType::all() {
            for to in ROTATIONS {
                for dir in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
                    let kicks = get_wall_kicks(piece, to, dir);
                    assert_eq!(kicks[0], (0, 0));
                }
            }
        }
    }

    #[test]
    fn test_index_covers_every_row_once() {
        let mut seen = [false; KICK_ROWS];
        for to in ROTATIONS {
            for dir in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
                let index = wall_kick_index(to, dir);
                assert!(!seen[index], "row {} used twice", index);
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_ccw_into_north_wraps_to_last_row() {
        assert_eq!(
            wall_kick_index(Rotation::North, RotationDirection::CounterClockwise),
            7
        );
        assert_eq!(wall_kick_index(Rotation::East, RotationDirection::Clockwise), 2);
    }
}
