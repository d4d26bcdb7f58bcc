use serde::Serialize;
use tsify::Tsify;

use crate::catalog::EMPTY;
use crate::piece::{Piece, Point};
use crate::session::{Scheduler, Session};

#[derive(Serialize, Tsify, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PieceView {
    pub id: u8,
    pub color: String,
    pub matrix: Vec<Vec<u8>>,
    /// Absolute board coordinates of the occupied cells; may include rows above 0.
    pub cells: Vec<Point>,
    pub x: i32,
    pub y: i32,
}

impl PieceView {
    fn new(piece: &Piece, at: Point) -> Self {
        Self {
            id: piece.id(),
            color: piece.color().to_string(),
            matrix: piece.matrix.to_rows(),
            cells: piece
                .matrix
                .filled()
                .map(|(p, _)| Point::new(at.x + p.x, at.y + p.y))
                .collect(),
            x: at.x,
            y: at.y,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Serialize, Tsify, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrameView {
    pub columns: usize,
    pub rows: usize,
    /// Row-major, top row first.
    pub field: Vec<u8>,
    pub active: Option<PieceView>,
    pub ghost: Option<Point>,
    pub next: Option<PieceView>,
    pub score: u32,
    pub playing: bool,
    pub game_over: bool,
}

impl<S: Scheduler> Session<S> {
    pub fn snapshot(&self) -> FrameView {
        let board = self.board();
        let mut field = Vec::with_capacity(board.columns() * board.rows());
        for y in 0..board.rows() {
            field.extend_from_slice(board.row(y));
        }
        FrameView {
            columns: board.columns(),
            rows: board.rows(),
            field,
            active: self
                .active_piece()
                .map(|p| PieceView::new(p, self.position())),
            ghost: self.ghost_position(),
            next: self
                .pending_piece()
                .map(|p| PieceView::new(p, Point::new(0, 0))),
            score: self.score(),
            playing: self.is_active(),
            game_over: self.is_game_over(),
        }
    }
}

impl FrameView {
    /// Plain-text board: `.` empty, `#` locked, `@` falling piece.
    pub fn render_ascii(&self) -> String {
        let mut grid: Vec<Vec<char>> = self
            .field
            .chunks(self.columns.max(1))
            .map(|row| {
                row.iter()
                    .map(|&c| if c == EMPTY { '.' } else { '#' })
                    .collect()
            })
            .collect();
        if let Some(active) = &self.active {
            for p in &active.cells {
                if (0..self.columns as i32).contains(&p.x) && (0..self.rows as i32).contains(&p.y) {
                    grid[p.y as usize][p.x as usize] = '@';
                }
            }
        }
        let mut out = String::new();
        for row in grid {
            out.push('|');
            out.extend(row);
            out.push_str("|\n");
        }
        out.push('+');
        out.push_str(&"-".repeat(self.columns));
        out.push_str("+\n");
        out.push_str(&format!("score: {}", self.score));
        if self.game_over {
            out.push_str("  GAME OVER");
        }
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::PieceKind;
    use crate::generator::RandomizerKind;
    use crate::input::Input;
    use crate::piece::Point;
    use crate::session::Session;
    use crate::settings::GameSettings;

    fn o_session() -> Session {
        Session::with_settings(GameSettings {
            randomizer: RandomizerKind::SinglePiece { piece: PieceKind::O },
            ..GameSettings::default()
        })
    }

    #[test]
    fn snapshot_before_start_shows_next_only() {
        let view = o_session().snapshot();
        assert_eq!(view.field.len(), 200);
        assert!(view.active.is_none());
        assert_eq!(view.next.as_ref().map(|n| n.id), Some(4));
        assert!(!view.playing);
        assert!(!view.game_over);
    }

    #[test]
    fn snapshot_exposes_active_piece_and_ghost() {
        let mut s = o_session();
        s.start(0.0);
        let view = s.snapshot();
        let active = view.active.expect("active piece");
        assert_eq!((active.x, active.y), (4, 0));
        assert_eq!(active.color, "#FFFF00");
        assert_eq!(
            active.cells,
            vec![Point::new(4, 0), Point::new(5, 0), Point::new(4, 1), Point::new(5, 1)]
        );
        assert_eq!(view.ghost, Some(Point::new(4, 18)));
        assert!(view.playing);
    }

    #[test]
    fn ascii_render_marks_locked_and_falling_cells() {
        let mut s = o_session();
        s.start(0.0);
        s.handle_input(Input::HardDrop);
        let text = s.snapshot().render_ascii();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "|....@@....|");
        assert_eq!(lines[19], "|....##....|");
        assert_eq!(lines[20], "+----------+");
        assert_eq!(lines[21], "score: 0");
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let mut s = o_session();
        s.start(0.0);
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["gameOver"], serde_json::json!(false));
        assert_eq!(json["active"]["matrix"], serde_json::json!([[4, 4], [4, 4]]));
    }
}
