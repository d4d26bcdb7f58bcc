use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::catalog::{PieceKind, EMPTY};

pub const MAX_MATRIX: usize = 4;

#[derive(Clone, Copy, Serialize, Deserialize, Tsify, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Square shape grid of at most 4x4; cells outside `size` stay empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Matrix {
    size: usize,
    cells: [[u8; MAX_MATRIX]; MAX_MATRIX],
}

impl Matrix {
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let size = rows.len();
        assert!(size <= MAX_MATRIX, "shape larger than {MAX_MATRIX}x{MAX_MATRIX}");
        let mut cells = [[EMPTY; MAX_MATRIX]; MAX_MATRIX];
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "shape rows must be square");
            cells[y][..size].copy_from_slice(row);
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.size && y < self.size {
            self.cells[y][x]
        } else {
            EMPTY
        }
    }

    /// Offsets of the occupied cells, row by row.
    pub fn filled(&self) -> impl Iterator<Item = (Point, u8)> + '_ {
        (0..self.size).flat_map(move |y| {
            (0..self.size).filter_map(move |x| {
                let v = self.cells[y][x];
                (v != EMPTY).then(|| (Point::new(x as i32, y as i32), v))
            })
        })
    }

    /// Clockwise quarter turn: source (y, x) lands on (x, N-1-y).
    pub fn rotated_cw(&self) -> Matrix {
        let n = self.size;
        let mut cells = [[EMPTY; MAX_MATRIX]; MAX_MATRIX];
        for y in 0..n {
            for x in 0..n {
                cells[x][n - 1 - y] = self.cells[y][x];
            }
        }
        Matrix { size: n, cells }
    }

    /// Number of all-empty rows above the first occupied one.
    pub fn leading_empty_rows(&self) -> usize {
        (0..self.size)
            .take_while(|&y| self.cells[y][..self.size].iter().all(|&c| c == EMPTY))
            .count()
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.size)
            .map(|y| self.cells[y][..self.size].to_vec())
            .collect()
    }
}

/// Independent instance of a catalog shape; rotating it never touches the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub matrix: Matrix,
}

impl Piece {
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            matrix: kind.definition().matrix(),
        }
    }

    pub fn id(&self) -> u8 {
        self.kind.id()
    }

    pub fn color(&self) -> &'static str {
        self.kind.definition().color
    }
}
