use serde::{Deserialize, Serialize};

use crate::board::{DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::generator::RandomizerKind;
use crate::input::ControlBindings;
use crate::piece::MAX_MATRIX;

pub const DROP_INTERVAL_MS: f64 = 1000.0;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct GameSettings {
    pub columns: usize,
    pub rows: usize,
    pub drop_interval_ms: f64,
    pub randomizer: RandomizerKind,
    pub controls: ControlBindings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            drop_interval_ms: DROP_INTERVAL_MS,
            randomizer: RandomizerKind::default(),
            controls: ControlBindings::default(),
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.columns < MAX_MATRIX || self.rows < MAX_MATRIX {
            return Err(format!(
                "board must be at least {MAX_MATRIX}x{MAX_MATRIX}, got {}x{}",
                self.columns, self.rows
            ));
        }
        if !self.drop_interval_ms.is_finite() || self.drop_interval_ms <= 0.0 {
            return Err(format!(
                "drop interval must be a positive number of milliseconds, got {}",
                self.drop_interval_ms
            ));
        }
        Ok(())
    }
}
