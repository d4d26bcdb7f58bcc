use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog::PieceKind;
use crate::piece::Piece;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum RandomizerKind {
    Uniform { seed: Option<u64> },
    SinglePiece { piece: PieceKind },
}

impl Default for RandomizerKind {
    fn default() -> Self {
        RandomizerKind::Uniform { seed: None }
    }
}

pub trait Randomizer {
    fn next(&mut self) -> PieceKind;
}

/// Independent uniform draw per call; no bag.
pub struct Uniform {
    rng: StdRng,
}

impl Uniform {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Randomizer for Uniform {
    fn next(&mut self) -> PieceKind {
        PieceKind::all()[self.rng.gen_range(0..7)]
    }
}

struct SinglePiece {
    piece: PieceKind,
}

impl Randomizer for SinglePiece {
    fn next(&mut self) -> PieceKind {
        self.piece
    }
}

pub fn randomizer_from_kind(kind: &RandomizerKind) -> Box<dyn Randomizer> {
    match *kind {
        RandomizerKind::Uniform { seed } => Box::new(Uniform::new(seed)),
        RandomizerKind::SinglePiece { piece } => Box::new(SinglePiece { piece }),
    }
}

/// Draws pieces and holds the one-piece lookahead.
pub struct PieceGenerator {
    randomizer: Box<dyn Randomizer>,
    pending: Option<Piece>,
}

impl PieceGenerator {
    pub fn new(kind: &RandomizerKind) -> Self {
        Self::with_randomizer(randomizer_from_kind(kind))
    }

    pub fn with_randomizer(randomizer: Box<dyn Randomizer>) -> Self {
        Self {
            randomizer,
            pending: None,
        }
    }

    /// Fresh, independent piece.
    pub fn next(&mut self) -> Piece {
        Piece::new(self.randomizer.next())
    }

    pub fn pending(&self) -> Option<&Piece> {
        self.pending.as_ref()
    }

    pub fn ensure_pending(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.next());
        }
    }

    /// Hands out the pending piece (drawing one if the slot is empty) and
    /// refills the slot.
    pub fn advance(&mut self) -> Piece {
        let current = match self.pending.take() {
            Some(p) => p,
            None => self.next(),
        };
        self.pending = Some(self.next());
        current
    }
}
