//! Slot-grid interaction engine: hit testing, range selection, drag
//! gestures and the keyboard controller. Nothing here draws; the views feed
//! it pointer and key events and render its state.

pub mod auto_scroll;
pub mod controller;
pub mod drag_select;
pub mod pointer;
pub mod range;
pub mod shortcuts;
pub mod sort_drag;

pub use controller::{GridInteractionController, GridKey, KeyOutcome};
pub use hit_test::{HitTest, ScrollViewport, SlotGridGeometry, TaggedRects};
pub use pointer::{PointerDown, PointerId, PointerKind, ScrollLock, MOUSE_POINTER};
pub use range::build_range;
pub use sort_drag::{splice_move, SortDragEngine};
