//! Playing field: occupancy grid, bounds and line clearing

use crate::tetromino::{Point, TetrominoType};

/// Field dimensions
pub const FIELD_WIDTH: usize = 10;
pub const FIELD_HEIGHT: usize = 20;

/// Rectangle of valid cells, centred on the origin.
///
/// Columns span `x_min..x_max`, rows span `y_min..y_max` (upper bounds
/// exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Bounds {
    fn centered(width: usize, height: usize) -> Self {
        let (width, height) = (width as i32, height as i32);
        Self {
            x_min: -width / 2,
            x_max: -width / 2 + width,
            y_min: -height / 2,
            y_max: -height / 2 + height,
        }
    }

    pub fn contains(&self, (x, y): Point) -> bool {
        x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max
    }
}

/// A cell on the field - either empty or filled by a locked piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(TetrominoType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The playing field. Only locked blocks are stored here.
#[derive(Debug, Clone)]
pub struct Field {
    bounds: Bounds,
    /// Grid stored as [row][col], row 0 is `y_min`
    cells: [[Cell; FIELD_WIDTH]; FIELD_HEIGHT],
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Field {
    /// Create a new empty field
    pub fn new() -> Self {
        Self {
            bounds: Bounds::centered(FIELD_WIDTH, FIELD_HEIGHT),
            cells: [[Cell::Empty; FIELD_WIDTH]; FIELD_HEIGHT],
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Grid indices for a cell, or `None` outside the bounds
    fn index(&self, (x, y): Point) -> Option<(usize, usize)> {
        if !self.bounds.contains((x, y)) {
            return None;
        }
        Some(((y - self.bounds.y_min) as usize, (x - self.bounds.x_min) as usize))
    }

    pub fn is_inside_bounds(&self, cell: Point) -> bool {
        self.bounds.contains(cell)
    }

    /// Whether a locked block sits at `cell`
    pub fn is_occupied(&self, cell: Point) -> bool {
        self.get(cell).is_some_and(|c| c.is_filled())
    }

    /// Get the cell at a position, `None` if out of bounds
    pub fn get(&self, cell: Point) -> Option<Cell> {
        self.index(cell).map(|(row, col)| self.cells[row][col])
    }

    /// Check that every cell is inside the field and empty
    pub fn can_place(&self, cells: &[Point]) -> bool {
        cells
            .iter()
            .all(|&cell| self.is_inside_bounds(cell) && !self.is_occupied(cell))
    }

    /// Write locked blocks into the grid.
    ///
    /// Callers validate with [`Field::can_place`] first; cells outside the
    /// field are dropped.
    pub fn commit(&mut self, cells: &[Point], piece_type: TetrominoType) {
        for &cell in cells {
            if let Some((row, col)) = self.index(cell) {
                self.cells[row][col] = Cell::Filled(piece_type);
            }
        }
    }

    /// Clear completed rows bottom-up and return how many were removed.
    ///
    /// After a clear the same row index is checked again, since the row
    /// above has just moved into it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = 0;

        while row < FIELD_HEIGHT {
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
            } else {
                row += 1;
            }
        }

        cleared
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Drop every row above `row` by one, leaving the top row empty
    fn remove_row(&mut self, row: usize) {
        self.cells[row] = [Cell::Empty; FIELD_WIDTH];
        for r in row..FIELD_HEIGHT - 1 {
            self.cells[r] = self.cells[r + 1];
        }
        self.cells[FIELD_HEIGHT - 1] = [Cell::Empty; FIELD_WIDTH];
    }

    /// Remove every locked block
    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; FIELD_WIDTH]; FIELD_HEIGHT];
    }

    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Number of locked blocks
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_filled()).count())
            .sum()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Fill row `y` completely
    pub(crate) fn fill_row(field: &mut Field, y: i32) {
        let b = field.bounds();
        let cells: Vec<Point> = (b.x_min..b.x_max).map(|x| (x, y)).collect();
        field.commit(&cells, TetrominoType::I);
    }

    #[test]
    fn test_bounds_are_centered() {
        let field = Field::new();
        assert_eq!(
            field.bounds(),
            Bounds {
                x_min: -5,
                x_max: 5,
                y_min: -10,
                y_max: 10
            }
        );
        assert!(field.is_inside_bounds((-5, -10)));
        assert!(field.is_inside_bounds((4, 9)));
        assert!(!field.is_inside_bounds((5, 0)));
        assert!(!field.is_inside_bounds((0, 10)));
        assert!(!field.is_inside_bounds((-6, 0)));
    }

    #[test]
    fn test_commit_and_query() {
        let mut field = Field::new();
        field.commit(&[(0, 0), (1, 0)], TetrominoType::T);
        assert!(field.is_occupied((0, 0)));
        assert_eq!(field.get((1, 0)), Some(Cell::Filled(TetrominoType::T)));
        assert!(!field.is_occupied((2, 0)));
        assert!(!field.can_place(&[(2, 0), (1, 0)]));
        assert!(field.can_place(&[(2, 0), (3, 0)]));
    }

    #[test]
    fn test_commit_ignores_cells_outside() {
        let mut field = Field::new();
        field.commit(&[(0, 10), (9, 0)], TetrominoType::Z);
        assert!(field.is_empty());
    }

    #[test]
    fn test_clear_single_line() {
        let mut field = Field::new();
        fill_row(&mut field, -10);
        field.commit(&[(-5, -9)], TetrominoType::S);
        field.commit(&[(2, 9)], TetrominoType::L);

        assert_eq!(field.clear_full_rows(), 1);
        // Everything above shifted down one row
        assert_eq!(field.get((-5, -10)), Some(Cell::Filled(TetrominoType::S)));
        assert_eq!(field.get((2, 8)), Some(Cell::Filled(TetrominoType::L)));
        // Top row is empty
        assert!((-5..5).all(|x| !field.is_occupied((x, 9))));
        assert_eq!(field.filled_count(), 2);
    }

    #[test]
    fn test_clear_four_lines() {
        let mut field = Field::new();
        for y in -10..-6 {
            fill_row(&mut field, y);
        }
        field.commit(&[(0, -6)], TetrominoType::O);

        assert_eq!(field.clear_full_rows(), 4);
        assert_eq!(field.filled_count(), 1);
        assert!(field.is_occupied((0, -10)));
    }

    #[test]
    fn test_clear_separated_lines() {
        let mut field = Field::new();
        fill_row(&mut field, -10);
        field.commit(&[(3, -9)], TetrominoType::J);
        fill_row(&mut field, -8);
        field.commit(&[(-1, -7)], TetrominoType::T);

        assert_eq!(field.clear_full_rows(), 2);
        assert_eq!(field.get((3, -10)), Some(Cell::Filled(TetrominoType::J)));
        assert_eq!(field.get((-1, -9)), Some(Cell::Filled(TetrominoType::T)));
        assert_eq!(field.filled_count(), 2);
    }

    #[test]
    fn test_full_top_row_clears() {
        let mut field = Field::new();
        fill_row(&mut field, 9);
        assert_eq!(field.clear_full_rows(), 1);
        assert!(field.is_empty());
    }

    #[test]
    fn test_clear_empties_field() {
        let mut field = Field::new();
        fill_row(&mut field, 0);
        field.clear();
        assert!(field.is_empty());
    }

    proptest! {
        #[test]
        fn can_place_accepts_free_cells_inside(
            cells in prop::collection::vec((-5i32..5, -10i32..10), 1..6),
            blocked in prop::collection::vec((-5i32..5, -10i32..10), 0..20),
        ) {
            let mut field = Field::new();
            field.commit(&blocked, TetrominoType::T);
            let expected = cells.iter().all(|c| !blocked.contains(c));
            prop_assert_eq!(field.can_place(&cells), expected);
        }

        #[test]
        fn can_place_rejects_any_cell_outside(
            inside in prop::collection::vec((-5i32..5, -10i32..10), 0..4),
            x in -20i32..20,
            y in -30i32..30,
        ) {
            prop_assume!(!(-5..5).contains(&x) || !(-10..10).contains(&y));
            let field = Field::new();
            let mut cells = inside;
            cells.push((x, y));
            prop_assert!(!field.can_place(&cells));
        }
    }
}
