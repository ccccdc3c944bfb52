//! Pointer and keyboard input delivered to sidebar widgets.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// An input event routed to a widget tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer moved
    MouseMove {
        /// Pointer position
        position: Point,
    },
    /// Pointer button went down
    MouseDown {
        /// Pointer position
        position: Point,
        /// Which button
        button: MouseButton,
    },
    /// Pointer button came up
    MouseUp {
        /// Pointer position
        position: Point,
        /// Which button
        button: MouseButton,
    },
    /// Key went down
    KeyDown {
        /// Which key
        key: Key,
    },
    /// Key came up
    KeyUp {
        /// Which key
        key: Key,
    },
    /// Pointer entered the widget
    MouseEnter,
    /// Pointer left the widget
    MouseLeave,
}

impl Event {
    /// Pointer position for button and move events.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::MouseMove { position }
            | Self::MouseDown { position, .. }
            | Self::MouseUp { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button
    Left,
    /// Secondary button
    Right,
}

/// Keys the sidebar reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// Space bar
    Space,
    /// Escape
    Escape,
}
