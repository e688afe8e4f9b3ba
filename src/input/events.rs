use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Input events that can be handled by the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Key pressed (including auto-repeat)
    KeyPress { key: KeyCode },
    /// Single click, in surface pixels
    Click { position: Point },
    /// Pointer moved over the surface
    MouseMove { position: Point },
    /// Container resized
    Resize { width: f64, height: f64 },
}

/// Keyboard key codes the viewer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Plus,
    Minus,
    Other,
}

impl KeyCode {
    /// Maps a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "+" | "=" => KeyCode::Plus,
            "-" | "_" => KeyCode::Minus,
            _ => KeyCode::Other,
        }
    }
}

impl InputEvent {
    /// Gets the pointer position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::Click { position } | InputEvent::MouseMove { position } => Some(*position),
            _ => None,
        }
    }

    /// Checks if this is a keyboard event
    pub fn is_keyboard_event(&self) -> bool {
        matches!(self, InputEvent::KeyPress { .. })
    }
}
