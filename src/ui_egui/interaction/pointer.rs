//! Pointer events as the gesture engines see them, and the scoped
//! touch-scroll lock they hold while a gesture is active.

use egui::{PointerButton, Pos2};
use std::cell::Cell;
use std::rc::Rc;

/// Identifies one pointer for the lifetime of a gesture. The mouse is
/// always [`MOUSE_POINTER`]; touches use egui's touch ids.
pub type PointerId = u64;

pub const MOUSE_POINTER: PointerId = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerDown {
    pub id: PointerId,
    pub kind: PointerKind,
    pub button: PointerButton,
    pub pos: Pos2,
}

impl PointerDown {
    pub fn mouse(pos: Pos2) -> Self {
        Self {
            id: MOUSE_POINTER,
            kind: PointerKind::Mouse,
            button: PointerButton::Primary,
            pos,
        }
    }

    pub fn touch(id: PointerId, pos: Pos2) -> Self {
        Self {
            id,
            kind: PointerKind::Touch,
            button: PointerButton::Primary,
            pos,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}

/// Shared flag that disables native touch scrolling of the grid while any
/// guard is alive. The shell reads [`ScrollLock::is_locked`] when it builds
/// the scroll area.
#[derive(Clone, Debug, Default)]
pub struct ScrollLock(Rc<Cell<usize>>);

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        self.0.set(self.0.get() + 1);
        ScrollLockGuard(Rc::clone(&self.0))
    }

    pub fn is_locked(&self) -> bool {
        self.0.get() > 0
    }
}

/// Releases its hold on the lock when dropped, on every exit path.
#[derive(Debug)]
pub struct ScrollLockGuard(Rc<Cell<usize>>);

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}
