use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::piece::Matrix;

pub const EMPTY: u8 = 0;

#[derive(Clone, Copy, Serialize, Deserialize, Tsify, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub fn all() -> [PieceKind; 7] {
        [
            PieceKind::I,
            PieceKind::J,
            PieceKind::L,
            PieceKind::O,
            PieceKind::S,
            PieceKind::T,
            PieceKind::Z,
        ]
    }

    pub fn id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// `None` for 0 ("no piece") and anything above 7.
    pub fn from_id(id: u8) -> Option<PieceKind> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn definition(self) -> &'static PieceDef {
        &CATALOG[self.id() as usize - 1]
    }
}

/// Immutable catalog entry. Rows are listed top first.
#[derive(Debug)]
pub struct PieceDef {
    pub kind: PieceKind,
    pub color: &'static str,
    pub rows: &'static [&'static [u8]],
}

impl PieceDef {
    pub fn id(&self) -> u8 {
        self.kind.id()
    }

    pub fn matrix(&self) -> Matrix {
        Matrix::from_rows(self.rows)
    }
}

static CATALOG: [PieceDef; 7] = [
    PieceDef {
        kind: PieceKind::I,
        color: "#00FFFF",
        rows: &[&[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]],
    },
    PieceDef {
        kind: PieceKind::J,
        color: "#0000FF",
        rows: &[&[2, 0, 0], &[2, 2, 2], &[0, 0, 0]],
    },
    PieceDef {
        kind: PieceKind::L,
        color: "#FF7F00",
        rows: &[&[0, 0, 3], &[3, 3, 3], &[0, 0, 0]],
    },
    PieceDef {
        kind: PieceKind::O,
        color: "#FFFF00",
        rows: &[&[4, 4], &[4, 4]],
    },
    PieceDef {
        kind: PieceKind::S,
        color: "#00FF00",
        rows: &[&[0, 5, 5], &[5, 5, 0], &[0, 0, 0]],
    },
    PieceDef {
        kind: PieceKind::T,
        color: "#800080",
        rows: &[&[0, 6, 0], &[6, 6, 6], &[0, 0, 0]],
    },
    PieceDef {
        kind: PieceKind::Z,
        color: "#FF0000",
        rows: &[&[7, 7, 0], &[0, 7, 7], &[0, 0, 0]],
    },
];

/// Display colour for a board cell value; empty and unknown cells have none.
pub fn color_for_cell(cell: u8) -> Option<&'static str> {
    PieceKind::from_id(cell).map(|k| k.definition().color)
}
