//! Input model: tool mode, mouse buttons, and the drag state machine.
//!
//! `Tool` captures the user's intent at the time of a pointer event.
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. There is at most one drag session at a time; it is created on
//! a pointer-down that hits an anchor or handle and discarded on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::curve::HandleKind;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Drag anchors and handles; clicking the curve inserts an anchor (default).
    #[default]
    Add,
    /// Clicking an interior anchor removes it.
    Delete,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// The part of an anchor a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// The anchor position itself (handles follow).
    Anchor,
    /// One of its handles.
    Handle(HandleKind),
}

/// Transient state of an active drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Index of the anchor being dragged (or owning the dragged handle).
    pub anchor_index: usize,
    /// What part of it moves.
    pub target: DragTarget,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A pointer-down grabbed an anchor or handle and the button is still held.
    Dragging(DragSession),
}

impl InputState {
    /// The active drag session, if any.
    #[must_use]
    pub fn session(&self) -> Option<DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(*session),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }
}
