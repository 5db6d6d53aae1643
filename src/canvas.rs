//! Render sink that keeps the tiles the terminal UI draws from

use blockfall::{PieceRole, Point, RenderSink, TetrominoType};
use std::collections::HashMap;

/// Mirror of the session's visible pieces, score and game-over banner
#[derive(Debug, Default)]
pub struct TileCanvas {
    layers: HashMap<PieceRole, HashMap<Point, TetrominoType>>,
    score: u64,
    game_over: bool,
}

impl TileCanvas {
    /// Piece shown at `cell` for one role
    pub fn tile(&self, role: PieceRole, cell: Point) -> Option<TetrominoType> {
        self.layers.get(&role)?.get(&cell).copied()
    }

    /// All tiles of one role, in no particular order
    pub fn tiles(&self, role: PieceRole) -> Vec<(Point, TetrominoType)> {
        self.layers
            .get(&role)
            .map(|layer| layer.iter().map(|(&cell, &piece)| (cell, piece)).collect())
            .unwrap_or_default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }
}

impl RenderSink for TileCanvas {
    fn draw_cells(&mut self, role: PieceRole, cells: &[Point], piece: TetrominoType) {
        let layer = self.layers.entry(role).or_default();
        for &cell in cells {
            layer.insert(cell, piece);
        }
    }

    fn clear_cells(&mut self, role: PieceRole, cells: &[Point]) {
        if let Some(layer) = self.layers.get_mut(&role) {
            for cell in cells {
                layer.remove(cell);
            }
        }
    }

    fn on_score_changed(&mut self, total: u64) {
        self.score = total;
    }

    fn on_game_over(&mut self) {
        self.game_over = true;
    }

    fn on_restart(&mut self) {
        self.game_over = false;
    }
}
