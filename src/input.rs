use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

/// Discrete player commands forwarded by the presentation layer.
#[derive(Clone, Copy, Serialize, Deserialize, Tsify, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Input {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Start,
}

impl FromStr for Input {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Input::MoveLeft),
            "right" | "r" => Ok(Input::MoveRight),
            "down" | "d" | "soft" => Ok(Input::SoftDrop),
            "rotate" | "u" | "up" => Ok(Input::Rotate),
            "drop" | "hard" | "space" => Ok(Input::HardDrop),
            "start" => Ok(Input::Start),
            other => Err(format!("unknown input `{other}`")),
        }
    }
}

/// Key codes (as reported by `KeyboardEvent.code`) for each input.
/// ArrowDown is the one-row soft drop and Space the hard drop.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ControlBindings {
    pub move_left: String,
    pub move_right: String,
    pub soft_drop: String,
    pub hard_drop: String,
    pub rotate: String,
    pub start: String,
}

impl Default for ControlBindings {
    fn default() -> Self {
        Self {
            move_left: "ArrowLeft".to_string(),
            move_right: "ArrowRight".to_string(),
            soft_drop: "ArrowDown".to_string(),
            hard_drop: "Space".to_string(),
            rotate: "ArrowUp".to_string(),
            start: "Enter".to_string(),
        }
    }
}

impl ControlBindings {
    pub fn resolve(&self, code: &str) -> Option<Input> {
        [
            (&self.move_left, Input::MoveLeft),
            (&self.move_right, Input::MoveRight),
            (&self.soft_drop, Input::SoftDrop),
            (&self.hard_drop, Input::HardDrop),
            (&self.rotate, Input::Rotate),
            (&self.start, Input::Start),
        ]
        .into_iter()
        .find(|(key, _)| key.as_str() == code)
        .map(|(_, input)| input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_map_arrows_and_space() {
        let keys = ControlBindings::default();
        assert_eq!(keys.resolve("ArrowLeft"), Some(Input::MoveLeft));
        assert_eq!(keys.resolve("ArrowRight"), Some(Input::MoveRight));
        assert_eq!(keys.resolve("ArrowDown"), Some(Input::SoftDrop));
        assert_eq!(keys.resolve("ArrowUp"), Some(Input::Rotate));
        assert_eq!(keys.resolve("Space"), Some(Input::HardDrop));
        assert_eq!(keys.resolve("KeyQ"), None);
    }

    #[test]
    fn script_tokens_parse() {
        assert_eq!("left".parse::<Input>(), Ok(Input::MoveLeft));
        assert_eq!(" Drop ".parse::<Input>(), Ok(Input::HardDrop));
        assert_eq!("down".parse::<Input>(), Ok(Input::SoftDrop));
        assert!("jump".parse::<Input>().is_err());
    }

    #[test]
    fn inputs_use_camel_case_on_the_wire() {
        let json = serde_json::to_string(&Input::HardDrop).unwrap();
        assert_eq!(json, "\"hardDrop\"");
        let back: Input = serde_json::from_str("\"moveLeft\"").unwrap();
        assert_eq!(back, Input::MoveLeft);
    }
}
