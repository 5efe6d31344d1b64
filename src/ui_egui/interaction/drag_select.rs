//! Drag-to-select over the slot grid.
//!
//! A drag may only start on the slot that already has keyboard focus. While
//! it runs, every change of the slot under the pointer (from a move or from
//! an auto-scroll frame) produces a [`SelectionChange`] spanning the anchor
//! and that slot. Changes are returned synchronously from the call that
//! caused them, so they reach the caller in event order.

use egui::Pos2;
use std::collections::BTreeSet;

use super::auto_scroll::AutoScroller;
use super::hit_test::{HitTest, ScrollViewport};
use super::pointer::{PointerDown, PointerId, PointerKind, ScrollLock, ScrollLockGuard};
use super::range::build_range;
use crate::models::settings::AutoScrollSettings;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionChange {
    pub selection: BTreeSet<usize>,
    pub anchor: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragState {
    pub anchor: usize,
    pub current: usize,
    pub pointer_id: PointerId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEnd {
    Released { anchor: usize, last: usize },
    Cancelled,
}

pub struct DragSelectEngine {
    state: Option<DragState>,
    auto_scroll: AutoScroller,
    scroll_lock: ScrollLock,
    touch_guard: Option<ScrollLockGuard>,
    suppress_click: bool,
}

impl DragSelectEngine {
    pub fn new(settings: AutoScrollSettings, scroll_lock: ScrollLock) -> Self {
        Self {
            state: None,
            auto_scroll: AutoScroller::new(settings),
            scroll_lock,
            touch_guard: None,
            suppress_click: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    /// Whether the auto-scroller wants another frame.
    pub fn needs_frames(&self) -> bool {
        self.auto_scroll.is_armed()
    }

    /// True from a real drag's release until the next [`begin_frame`],
    /// so the click that follows the release can be ignored.
    ///
    /// [`begin_frame`]: DragSelectEngine::begin_frame
    pub fn click_suppressed(&self) -> bool {
        self.suppress_click
    }

    pub fn begin_frame(&mut self) {
        self.suppress_click = false;
    }

    pub fn pointer_down(
        &mut self,
        event: PointerDown,
        focused_slot: usize,
        surface: &impl HitTest,
    ) -> Option<SelectionChange> {
        if self.state.is_some() || !event.is_primary() {
            return None;
        }
        let slot = surface.locate(event.pos)?;
        if slot != focused_slot {
            return None;
        }

        self.state = Some(DragState {
            anchor: slot,
            current: slot,
            pointer_id: event.id,
        });
        if event.kind == PointerKind::Touch {
            self.touch_guard = Some(self.scroll_lock.acquire());
        }
        self.auto_scroll.arm(event.pos.y);
        log::debug!("Drag select started at slot {}", slot);

        Some(SelectionChange {
            selection: BTreeSet::from([slot]),
            anchor: slot,
        })
    }

    pub fn pointer_move(
        &mut self,
        pointer_id: PointerId,
        pos: Pos2,
        surface: &impl HitTest,
    ) -> Option<SelectionChange> {
        if self.state?.pointer_id != pointer_id {
            return None;
        }
        self.auto_scroll.set_pointer_y(pos.y);
        let slot = surface.locate(pos)?;
        self.advance_to(slot)
    }

    /// One animation frame while dragging: scroll near the edges and pick up
    /// any row that scrolled under the pointer.
    pub fn tick<V: ScrollViewport + ?Sized>(
        &mut self,
        viewport: Option<&mut V>,
    ) -> Option<SelectionChange> {
        self.state?;
        let slot = self.auto_scroll.tick(viewport)?;
        self.advance_to(slot)
    }

    pub fn pointer_up(&mut self, pointer_id: PointerId) -> Option<DragEnd> {
        let state = self.state.filter(|s| s.pointer_id == pointer_id)?;
        if state.current != state.anchor {
            self.suppress_click = true;
        }
        self.finish();
        log::debug!("Drag select released at slot {}", state.current);
        Some(DragEnd::Released {
            anchor: state.anchor,
            last: state.current,
        })
    }

    pub fn pointer_cancel(&mut self, pointer_id: PointerId) -> Option<DragEnd> {
        self.state.filter(|s| s.pointer_id == pointer_id)?;
        self.cancel()
    }

    /// Abort the gesture (Escape or an interrupted pointer). Selections
    /// already emitted stand; nothing further is emitted.
    pub fn cancel(&mut self) -> Option<DragEnd> {
        self.state?;
        self.finish();
        log::debug!("Drag select cancelled");
        Some(DragEnd::Cancelled)
    }

    fn advance_to(&mut self, slot: usize) -> Option<SelectionChange> {
        let state = self.state.as_mut()?;
        if slot == state.current {
            return None;
        }
        state.current = slot;
        Some(SelectionChange {
            selection: build_range(state.anchor, slot),
            anchor: state.anchor,
        })
    }

    fn finish(&mut self) {
        self.state = None;
        self.auto_scroll.disarm();
        self.touch_guard = None;
    }
}
