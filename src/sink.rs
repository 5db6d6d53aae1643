//! Output boundary between the rules core and whatever draws it.
//!
//! The session calls these hooks as its visible state changes; it never
//! reads anything back. Every method has an empty default body.

use crate::tetromino::{Point, TetrominoType};

/// Which piece a batch of tiles belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceRole {
    /// The falling piece, in absolute field cells
    Active,
    /// The next-piece preview, in spawn offsets
    Next,
    /// The held piece, in spawn offsets
    Hold,
}

pub trait RenderSink {
    fn draw_cells(&mut self, _role: PieceRole, _cells: &[Point], _piece: TetrominoType) {}

    fn clear_cells(&mut self, _role: PieceRole, _cells: &[Point]) {}

    fn on_score_changed(&mut self, _total: u64) {}

    fn on_game_over(&mut self) {}

    fn on_restart(&mut self) {}
}

/// Sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {}
