// Properties of selection, keyboard focus and list reordering that must
// hold for any input sequence

use crate::fixtures::{self, dates, grid};
use egui::Modifiers;
use proptest::prelude::*;
use slotlog::models::slot::LAST_SLOT;
use slotlog::services::slot::queue::SlotCommand;
use slotlog::ui_egui::interaction::controller::scroll_offset_for_slot;
use slotlog::ui_egui::interaction::{build_range, splice_move, GridKey, PointerDown, MOUSE_POINTER};

#[derive(Debug, Clone, Copy)]
enum Press {
    Up,
    Down,
    ShiftUp,
    ShiftDown,
    Escape,
}

fn press() -> impl Strategy<Value = Press> {
    prop_oneof![
        Just(Press::Up),
        Just(Press::Down),
        Just(Press::ShiftUp),
        Just(Press::ShiftDown),
        Just(Press::Escape),
    ]
}

proptest! {
    /// Property: dragging from the focused slot selects exactly the
    /// contiguous range between the start and the slot under the pointer
    #[test]
    fn prop_drag_selects_contiguous_range(start in 0usize..10, path in prop::collection::vec(0usize..10, 1..8)) {
        let mut controller = fixtures::controller(dates::monday(), vec![1, 2, 3]);
        controller.on_data_loaded(&[]);
        controller.handle_click(start);

        let geometry = grid::geometry(0.0);
        prop_assert!(controller.pointer_down(PointerDown::mouse(grid::slot_center(start, 0.0)), &geometry));

        for &slot in &path {
            controller.pointer_move(MOUSE_POINTER, grid::slot_center(slot, 0.0), &geometry);
            prop_assert_eq!(controller.selection(), &build_range(start, slot));
            prop_assert_eq!(controller.anchor(), Some(start));
        }
    }

    /// Property: arrow keys never move focus off the grid, and a shift
    /// selection is always the range from its anchor to the focus
    #[test]
    fn prop_keyboard_focus_stays_in_bounds(presses in prop::collection::vec(press(), 1..120)) {
        let mut controller = fixtures::controller(dates::monday(), vec![1]);
        controller.on_data_loaded(&[]);
        let mut sink: Vec<SlotCommand> = Vec::new();

        for press in presses {
            let (key, modifiers) = match press {
                Press::Up => (GridKey::ArrowUp, Modifiers::NONE),
                Press::Down => (GridKey::ArrowDown, Modifiers::NONE),
                Press::ShiftUp => (GridKey::ArrowUp, Modifiers::SHIFT),
                Press::ShiftDown => (GridKey::ArrowDown, Modifiers::SHIFT),
                Press::Escape => (GridKey::Escape, Modifiers::NONE),
            };
            controller.handle_key(key, modifiers, false, &mut sink);

            prop_assert!(controller.focused_slot() <= LAST_SLOT);
            if matches!(press, Press::ShiftUp | Press::ShiftDown) {
                let anchor = controller.anchor().unwrap();
                prop_assert_eq!(
                    controller.selection(),
                    &build_range(anchor, controller.focused_slot())
                );
                if controller.selection().len() > 1 {
                    prop_assert_eq!(controller.editor_slot(), None);
                }
            }
        }
        prop_assert!(sink.is_empty());
    }

    /// Property: moving an item keeps every item and lands it at `to`
    #[test]
    fn prop_splice_move_lands_at_target(len in 1usize..20, from_seed in 0usize..100, to_seed in 0usize..100) {
        let from = from_seed % len;
        let to = to_seed % len;
        let mut items: Vec<usize> = (0..len).collect();
        splice_move(&mut items, from, to);

        prop_assert_eq!(items[to], from);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..len).collect::<Vec<_>>());
    }

    /// Property: the offset chosen to reveal a slot leaves its whole row
    /// inside the viewport
    #[test]
    fn prop_scroll_request_reveals_slot(slot in 0usize..=LAST_SLOT, viewport in 100.0f32..900.0) {
        let offset = scroll_offset_for_slot(slot, grid::ROW, viewport, 0.0);
        let top = slot as f32 * grid::ROW;
        prop_assert!(offset >= 0.0);
        prop_assert!(top >= offset - 0.01);
        prop_assert!(top + grid::ROW <= offset + viewport + 0.01);
    }
}
