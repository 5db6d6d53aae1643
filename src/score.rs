//! Scoring: a fixed reward per line-clear count

/// Points for clearing `lines` rows with a single piece
pub fn line_clear_points(lines: usize) -> u64 {
    match lines {
        1 => 100,
        2 => 200,
        3 => 500,
        4 => 1000,
        _ => 0,
    }
}

/// Running totals for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Pieces locked onto the field
    pub pieces: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a locked piece and the rows it cleared.
    /// Returns the points awarded.
    pub fn add_lock(&mut self, lines_cleared: usize) -> u64 {
        let awarded = line_clear_points(lines_cleared);
        self.points += awarded;
        self.lines += lines_cleared as u32;
        self.pieces += 1;
        awarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(2), 200);
        assert_eq!(line_clear_points(3), 500);
        assert_eq!(line_clear_points(4), 1000);
        assert_eq!(line_clear_points(5), 0);
    }

    #[test]
    fn test_totals_accumulate() {
        let mut score = Score::new();
        assert_eq!(score.add_lock(0), 0);
        assert_eq!(score.add_lock(4), 1000);
        assert_eq!(score.add_lock(1), 100);
        assert_eq!(score.points, 1100);
        assert_eq!(score.lines, 5);
        assert_eq!(score.pieces, 3);
    }
}
