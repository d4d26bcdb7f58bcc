use crate::board::Board;
use crate::generator::PieceGenerator;
use crate::piece::{Piece, Point};

/// Offsets tried in order when rotating: in place first, then left 1,
/// right 1, left 2, right 2.
const ROTATION_TRIALS: [(i32, i32); 5] = [(0, 0), (-1, 0), (1, 0), (-2, 0), (2, 0)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockOutcome {
    pub lines: usize,
    pub topped_out: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropResult {
    Idle,
    Fell,
    Locked(LockOutcome),
}

/// Owns the falling piece and its position; the board is lent per call.
pub struct Controller {
    generator: PieceGenerator,
    active: Option<Piece>,
    pos: Point,
}

impl Controller {
    pub fn new(generator: PieceGenerator) -> Self {
        Self {
            generator,
            active: None,
            pos: Point::new(0, 0),
        }
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn pending(&self) -> Option<&Piece> {
        self.generator.pending()
    }

    pub fn ensure_pending(&mut self) {
        self.generator.ensure_pending();
    }

    pub fn discard_active(&mut self) {
        self.active = None;
    }

    /// Promotes the pending piece and centres it with its first occupied row
    /// on row 0. Returns false (and drops the piece) when it does not fit.
    pub fn spawn(&mut self, board: &Board) -> bool {
        let piece = self.generator.advance();
        let width = piece.matrix.size() as i32;
        let pos = Point::new(
            board.columns() as i32 / 2 - width / 2,
            -(piece.matrix.leading_empty_rows() as i32),
        );
        if board.is_colliding(&piece.matrix, pos) {
            self.active = None;
            return false;
        }
        self.active = Some(piece);
        self.pos = pos;
        true
    }

    pub fn shift(&mut self, board: &Board, dx: i32) -> bool {
        let Some(piece) = self.active.as_ref() else {
            return false;
        };
        let test = Point::new(self.pos.x + dx, self.pos.y);
        if board.is_colliding(&piece.matrix, test) {
            return false;
        }
        self.pos = test;
        true
    }

    pub fn rotate(&mut self, board: &Board) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let rotated = piece.matrix.rotated_cw();
        for (dx, dy) in ROTATION_TRIALS {
            let test = Point::new(self.pos.x + dx, self.pos.y + dy);
            if !board.is_colliding(&rotated, test) {
                piece.matrix = rotated;
                self.pos = test;
                return true;
            }
        }
        false
    }

    /// One row down, or lock in place if that row is taken.
    pub fn soft_drop(&mut self, board: &mut Board) -> DropResult {
        let Some(piece) = self.active.as_ref() else {
            return DropResult::Idle;
        };
        let below = Point::new(self.pos.x, self.pos.y + 1);
        if board.is_colliding(&piece.matrix, below) {
            return DropResult::Locked(self.lock(board));
        }
        self.pos = below;
        DropResult::Fell
    }

    pub fn hard_drop(&mut self, board: &mut Board) -> Option<LockOutcome> {
        let piece = self.active.as_ref()?;
        // the floor guarantees this stops within rows + matrix size steps
        while !board.is_colliding(&piece.matrix, Point::new(self.pos.x, self.pos.y + 1)) {
            self.pos.y += 1;
        }
        Some(self.lock(board))
    }

    /// Ghost position: where a hard drop would come to rest.
    pub fn landing_position(&self, board: &Board) -> Option<Point> {
        let piece = self.active.as_ref()?;
        let mut pos = self.pos;
        while !board.is_colliding(&piece.matrix, Point::new(pos.x, pos.y + 1)) {
            pos.y += 1;
        }
        Some(pos)
    }

    fn lock(&mut self, board: &mut Board) -> LockOutcome {
        if let Some(piece) = self.active.take() {
            board.merge(&piece.matrix, self.pos, piece.id());
        }
        let lines = board.clear_full_rows();
        let topped_out = !self.spawn(board);
        LockOutcome { lines, topped_out }
    }

    #[cfg(test)]
    pub(crate) fn set_active_for_test(&mut self, piece: Piece, pos: Point) {
        self.active = Some(piece);
        self.pos = pos;
    }
}
