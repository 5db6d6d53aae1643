//! Tetromino definitions and shapes
//!
//! All 7 tetrominoes with their spawn cells and the rotation transform
//! applied to those cells. Wall kick tables live in [`crate::srs`].

use ratatui::style::Color;

/// A cell coordinate `(x, y)`: column, then row. Row increases upward.
pub type Point = (i32, i32);

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Yellow,
            TetrominoType::T => Color::Magenta,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Rgb(255, 165, 0), // Orange
        }
    }

    /// Get all tetromino types, in catalog order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// Cell offsets in the spawn orientation, relative to the piece anchor.
    //
    // I:  ....    J:  J...    L:  ..L.    O:  .OO.
    //     IIII        JJJ.        LLL.        .OO.
    //
    // S:  .SS.    T:  .T..    Z:  ZZ..
    //     SS..        TTT.        .ZZ.
    pub fn cells(&self) -> [Point; 4] {
        match self {
            TetrominoType::I => [(-1, 1), (0, 1), (1, 1), (2, 1)],
            TetrominoType::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
            TetrominoType::L => [(1, 1), (-1, 0), (0, 0), (1, 0)],
            TetrominoType::O => [(0, 1), (1, 1), (0, 0), (1, 0)],
            TetrominoType::S => [(0, 1), (1, 1), (-1, 0), (0, 0)],
            TetrominoType::T => [(0, 1), (-1, 0), (0, 0), (1, 0)],
            TetrominoType::Z => [(-1, 1), (0, 1), (0, 0), (1, 0)],
        }
    }

    /// Rotate a single cell offset a quarter turn in `direction`.
    ///
    /// Clockwise maps `(x, y)` to `(y, -x)`. The I piece turns about the
    /// half-cell point `(0.5, 0.5)` so its 4x4 box stays put; the O piece
    /// is returned untouched.
    pub fn rotate_offset(&self, (x, y): Point, direction: RotationDirection) -> Point {
        let d = direction.sign();
        match self {
            TetrominoType::O => (x, y),
            TetrominoType::I => {
                // Work in doubled coordinates so the half-cell centre is exact.
                let (cx, cy) = (2 * x - 1, 2 * y - 1);
                ((cy * d + 1) / 2, (-cx * d + 1) / 2)
            }
            _ => (y * d, -x * d),
        }
    }
}

/// Rotation states, indexed 0..4 clockwise from the spawn orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Rotation {
    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn turned(&self, direction: RotationDirection) -> Rotation {
        match direction {
            RotationDirection::Clockwise => self.cw(),
            RotationDirection::CounterClockwise => self.ccw(),
        }
    }

    /// Rotation index in `0..4`
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// `+1` for clockwise, `-1` for counter-clockwise
    pub fn sign(&self) -> i32 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }
}
