//! Pointer input delivered by the platform layer.

use crate::furniture::FurnitureId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in floor-plan view coordinates (pixels from the canvas origin).
///
/// `Up` and `Leave` are delivered for the whole document, not just the
/// canvas, so a drag released outside the canvas still ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
    /// The pointer left the document.
    Leave,
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerTarget {
    /// A placed furniture item.
    Item(FurnitureId),
    /// Empty floor or anything else on the canvas.
    Background,
}

impl PointerTarget {
    pub fn item(&self) -> Option<&str> {
        match self {
            PointerTarget::Item(id) => Some(id),
            PointerTarget::Background => None,
        }
    }
}
