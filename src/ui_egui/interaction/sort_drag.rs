//! Drag-to-reorder for short lists (the category list).
//!
//! The dragged row is drawn as a floating proxy that follows the pointer.
//! On release the visual drag ends at once, but the drag/over indices stay
//! set as a preview of the new order until the reorder mutation settles,
//! so the list does not flash back to its old order meanwhile.

use egui::{Pos2, Rect, Vec2};

use super::hit_test::{HitTest, TaggedRects};
use super::pointer::{PointerDown, PointerId, PointerKind, ScrollLock, ScrollLockGuard};

/// Floating copy of the dragged row.
#[derive(Clone, Debug, PartialEq)]
pub struct DragProxy {
    pub rect: Rect,
    /// Rank-dependent hint shown in the proxy (the shortcut the item will
    /// have at the hovered position).
    pub label: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SortDragState {
    pub drag_index: Option<usize>,
    pub over_index: Option<usize>,
    pub is_dragging: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
}

pub struct SortDragEngine {
    item_count: usize,
    label_for: Option<fn(usize) -> Option<String>>,
    state: SortDragState,
    pointer_id: Option<PointerId>,
    grab_offset: Vec2,
    proxy: Option<DragProxy>,
    scroll_lock: ScrollLock,
    touch_guard: Option<ScrollLockGuard>,
    pending_ticket: Option<u64>,
}

impl SortDragEngine {
    pub fn new(scroll_lock: ScrollLock) -> Self {
        Self {
            item_count: 0,
            label_for: None,
            state: SortDragState::default(),
            pointer_id: None,
            grab_offset: Vec2::ZERO,
            proxy: None,
            scroll_lock,
            touch_guard: None,
            pending_ticket: None,
        }
    }

    pub fn with_labels(mut self, label_for: fn(usize) -> Option<String>) -> Self {
        self.label_for = Some(label_for);
        self
    }

    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
    }

    pub fn state(&self) -> SortDragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    pub fn proxy(&self) -> Option<&DragProxy> {
        self.proxy.as_ref()
    }

    /// Start dragging the row at `index`, whose on-screen rectangle is
    /// `origin`. Returns whether a drag started.
    pub fn pointer_down(
        &mut self,
        index: usize,
        event: PointerDown,
        origin: Rect,
        rects: &mut TaggedRects,
    ) -> bool {
        if self.state.is_dragging || !event.is_primary() || index >= self.item_count {
            return false;
        }

        self.grab_offset = event.pos - origin.min;
        self.proxy = Some(DragProxy {
            rect: origin,
            label: self.label(index),
        });
        rects.set_overlay(origin);

        self.state = SortDragState {
            drag_index: Some(index),
            over_index: Some(index),
            is_dragging: true,
        };
        self.pointer_id = Some(event.id);
        self.pending_ticket = None;
        if event.kind == PointerKind::Touch {
            self.touch_guard = Some(self.scroll_lock.acquire());
        }
        log::debug!("Sort drag started at index {}", index);
        true
    }

    /// Follow the pointer. Returns the newly hovered index when it changed.
    pub fn pointer_move(
        &mut self,
        pointer_id: PointerId,
        pos: Pos2,
        rects: &mut TaggedRects,
    ) -> Option<usize> {
        if !self.state.is_dragging || self.pointer_id != Some(pointer_id) {
            return None;
        }

        if let Some(proxy) = self.proxy.as_mut() {
            proxy.rect = Rect::from_min_size(pos - self.grab_offset, proxy.rect.size());
            rects.move_overlay(proxy.rect);
        }

        let index = {
            let probe = rects.pass_through();
            probe.locate(pos)
        }?;
        if index >= self.item_count || self.state.over_index == Some(index) {
            return None;
        }

        self.state.over_index = Some(index);
        // Keep the old label when the new rank has none.
        if let Some(label) = self.label(index) {
            if let Some(proxy) = self.proxy.as_mut() {
                proxy.label = Some(label);
            }
        }
        Some(index)
    }

    /// End the visual drag. The indices remain as a preview; when they
    /// differ a reorder is returned and the caller should report its ticket
    /// through [`await_settle`] and later [`settle`]. Otherwise the
    /// preview clears immediately.
    ///
    /// [`await_settle`]: SortDragEngine::await_settle
    /// [`settle`]: SortDragEngine::settle
    pub fn pointer_up(
        &mut self,
        pointer_id: PointerId,
        rects: &mut TaggedRects,
    ) -> Option<ReorderRequest> {
        if !self.state.is_dragging || self.pointer_id != Some(pointer_id) {
            return None;
        }
        self.end_visual_drag(rects);

        match (self.state.drag_index, self.state.over_index) {
            (Some(from), Some(to)) if from != to => {
                log::debug!("Sort drag dropped {} at {}", from, to);
                Some(ReorderRequest { from, to })
            }
            _ => {
                self.clear_preview();
                None
            }
        }
    }

    pub fn pointer_cancel(
        &mut self,
        pointer_id: PointerId,
        rects: &mut TaggedRects,
    ) -> Option<ReorderRequest> {
        self.pointer_up(pointer_id, rects)
    }

    /// Abort without reordering (Escape). Also drops a dropped preview that
    /// was never tied to a mutation ticket.
    pub fn cancel(&mut self, rects: &mut TaggedRects) {
        if self.state.is_dragging {
            self.end_visual_drag(rects);
            self.clear_preview();
        } else if self.pending_ticket.is_none() {
            self.clear_preview();
        }
    }

    /// Associate the in-flight reorder with its mutation ticket.
    pub fn await_settle(&mut self, ticket: u64) {
        self.pending_ticket = Some(ticket);
    }

    /// The reorder mutation finished (either way). Clears the preview when
    /// `ticket` is the one being awaited; returns whether it was.
    pub fn settle(&mut self, ticket: u64) -> bool {
        if self.pending_ticket != Some(ticket) {
            return false;
        }
        self.clear_preview();
        true
    }

    /// Item order to display: identity, or the preview while a drop is
    /// pending.
    pub fn display_order(&self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        if let (Some(from), Some(to)) = (self.state.drag_index, self.state.over_index) {
            splice_move(&mut order, from, to);
        }
        order
    }

    fn label(&self, index: usize) -> Option<String> {
        self.label_for.and_then(|label_for| label_for(index))
    }

    fn end_visual_drag(&mut self, rects: &mut TaggedRects) {
        self.state.is_dragging = false;
        self.pointer_id = None;
        self.proxy = None;
        self.touch_guard = None;
        rects.clear_overlay();
    }

    fn clear_preview(&mut self) {
        self.state.drag_index = None;
        self.state.over_index = None;
        self.pending_ticket = None;
    }
}

/// Remove the item at `from` and reinsert it at `to` in the remaining
/// sequence. Out-of-range `from` leaves the items untouched; `to` is
/// clamped to the end.
pub fn splice_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}
