use crate::catalog::EMPTY;
use crate::piece::{Matrix, Point};

pub const DEFAULT_COLUMNS: usize = 10;
pub const DEFAULT_ROWS: usize = 20;

/// Points for clearing `lines` rows in one lock.
pub fn line_clear_points(lines: usize) -> u32 {
    match lines {
        0 => 0,
        1 => 40,
        2 => 100,
        3 => 300,
        4 => 1200,
        n => n as u32 * 100,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    columns: usize,
    rows: usize,
    cells: Vec<Vec<u8>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS)
    }
}

impl Board {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![vec![EMPTY; columns]; rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, x: usize, y: usize) -> u8 {
        self.cells[y][x]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y]
    }

    pub fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(EMPTY);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|r| r.iter().all(|&c| c == EMPTY))
    }

    /// True when any occupied matrix cell would land left, right or below the
    /// board, or on a locked cell. Rows above the top are never checked
    /// against contents.
    pub fn is_colliding(&self, matrix: &Matrix, offset: Point) -> bool {
        matrix.filled().any(|(p, _)| {
            let x = offset.x + p.x;
            let y = offset.y + p.y;
            if x < 0 || x >= self.columns as i32 || y >= self.rows as i32 {
                return true;
            }
            y >= 0 && self.cells[y as usize][x as usize] != EMPTY
        })
    }

    /// Writes `id` under every occupied matrix cell that lies on the board.
    pub fn merge(&mut self, matrix: &Matrix, offset: Point, id: u8) {
        for (p, _) in matrix.filled() {
            let x = offset.x + p.x;
            let y = offset.y + p.y;
            if (0..self.columns as i32).contains(&x) && (0..self.rows as i32).contains(&y) {
                self.cells[y as usize][x as usize] = id;
            }
        }
    }

    /// Removes full rows, pulling everything above down, and returns how many
    /// were removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.rows;
        while y > 0 {
            let idx = y - 1;
            if self.cells[idx].iter().all(|&c| c != EMPTY) {
                cleared += 1;
                self.cells.remove(idx);
                self.cells.insert(0, vec![EMPTY; self.columns]);
                // the row above now sits at idx; check it again
            } else {
                y -= 1;
            }
        }
        cleared
    }

    #[cfg(test)]
    pub(crate) fn set_cell(&mut self, x: usize, y: usize, value: u8) {
        self.cells[y][x] = value;
    }

    #[cfg(test)]
    pub(crate) fn fill_row_except(&mut self, y: usize, holes: &[usize], value: u8) {
        for x in 0..self.columns {
            self.cells[y][x] = if holes.contains(&x) { EMPTY } else { value };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PieceKind;
    use crate::piece::Piece;

    fn o_matrix() -> Matrix {
        Piece::new(PieceKind::O).matrix
    }

    #[test]
    fn collision_against_walls_and_floor() {
        let board = Board::default();
        let o = o_matrix();
        assert!(!board.is_colliding(&o, Point::new(0, 0)));
        assert!(!board.is_colliding(&o, Point::new(8, 18)));
        assert!(board.is_colliding(&o, Point::new(-1, 0)));
        assert!(board.is_colliding(&o, Point::new(9, 0)));
        assert!(board.is_colliding(&o, Point::new(0, 19)));
    }

    #[test]
    fn rows_above_board_are_free() {
        let mut board = Board::default();
        board.fill_row_except(0, &[], 2);
        let o = o_matrix();
        assert!(!board.is_colliding(&o, Point::new(4, -2)));
        assert!(board.is_colliding(&o, Point::new(4, -1)));
        // side bounds still apply above the board
        assert!(board.is_colliding(&o, Point::new(-1, -5)));
    }

    #[test]
    fn empty_matrix_cells_never_collide() {
        let mut board = Board::default();
        board.set_cell(0, 0, 3);
        let i = Piece::new(PieceKind::I).matrix;
        // column 0 of the I box is empty, so x=-1 keeps the bar at column 0
        assert!(!board.is_colliding(&i, Point::new(-1, 5)));
        assert!(board.is_colliding(&i, Point::new(-1, -3)));
    }

    #[test]
    fn merge_skips_cells_above_board() {
        let mut board = Board::default();
        board.merge(&o_matrix(), Point::new(3, -1), 4);
        assert_eq!(board.cell(3, 0), 4);
        assert_eq!(board.cell(4, 0), 4);
        assert_eq!(board.row(1).iter().filter(|&&c| c != EMPTY).count(), 0);
        assert_eq!(board.rows(), DEFAULT_ROWS);
    }

    #[test]
    fn clears_single_bottom_row() {
        let mut board = Board::default();
        board.fill_row_except(19, &[], 1);
        board.fill_row_except(18, &[5], 2);
        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.rows(), DEFAULT_ROWS);
        assert!(board.row(0).iter().all(|&c| c == EMPTY));
        assert_eq!(board.cell(0, 19), 2);
        assert_eq!(board.cell(5, 19), EMPTY);
    }

    #[test]
    fn adjacent_full_rows_are_both_counted() {
        let mut board = Board::default();
        board.fill_row_except(19, &[], 1);
        board.fill_row_except(18, &[], 1);
        board.set_cell(7, 17, 6);
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.cell(7, 19), 6);
        assert_eq!(board.row(18).iter().filter(|&&c| c != EMPTY).count(), 0);
    }

    #[test]
    fn separated_full_rows_keep_middle_row() {
        let mut board = Board::default();
        board.fill_row_except(19, &[], 1);
        board.fill_row_except(18, &[0], 3);
        board.fill_row_except(17, &[], 1);
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.cell(0, 19), EMPTY);
        assert_eq!(board.cell(1, 19), 3);
        assert!(board.row(18).iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn no_full_rows_is_noop() {
        let mut board = Board::default();
        board.fill_row_except(19, &[9], 1);
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn score_table_with_fallback() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 40);
        assert_eq!(line_clear_points(2), 100);
        assert_eq!(line_clear_points(3), 300);
        assert_eq!(line_clear_points(4), 1200);
        assert_eq!(line_clear_points(5), 500);
        assert_eq!(line_clear_points(6), 600);
    }
}
