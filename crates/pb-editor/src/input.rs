//! Input abstraction layer.
//!
//! Normalizes the host's pointer and drag-and-drop events into a single
//! `InputEvent` enum. Coordinates are always canvas-relative (origin at
//! the canvas top-left), so hosts subtract the canvas offset first.

/// A normalized input event from the interaction surface.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { x: f32, y: f32 },

    /// Pointer moved.
    PointerMove { x: f32, y: f32 },

    /// Pointer released.
    PointerUp { x: f32, y: f32 },

    /// Pointer left the canvas surface entirely.
    PointerLeave,

    /// A palette template was dropped on the canvas.
    Drop { tag: String, x: f32, y: f32 },
}

impl InputEvent {
    pub fn from_pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn from_drop(tag: &str, x: f32, y: f32) -> Self {
        Self::Drop {
            tag: tag.to_string(),
            x,
            y,
        }
    }

    /// Extract position if this event carries one.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::Drop { x, y, .. } => Some((*x, *y)),
            Self::PointerLeave => None,
        }
    }
}
