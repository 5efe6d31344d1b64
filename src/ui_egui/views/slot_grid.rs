//! The day's slot grid.
//!
//! Rows are uniform, so after the scroll area is laid out the grid is
//! described by a [`SlotGridGeometry`] and all pointer routing for
//! drag-select works against that instead of per-row widget responses.

use super::palette::{category_color, contrast_text, with_alpha, SlotGridPalette};
use crate::models::category::Category;
use crate::models::settings::GridSettings;
use crate::models::slot::{slot_index_to_time, SLOTS_PER_DAY};
use crate::ui_egui::interaction::controller::scroll_offset_for_slot;
use crate::ui_egui::interaction::{
    GridInteractionController, PointerDown, PointerKind, ScrollLock, SlotGridGeometry,
    MOUSE_POINTER,
};
use egui::{Align2, FontId, PointerButton, Pos2, Rect, Sense, Stroke, Vec2};
use std::collections::HashMap;

const TIME_COLUMN_WIDTH: f32 = 72.0;

/// Draw the grid and route this frame's pointer input to the controller.
/// `scroll_override` carries an offset to apply on the next layout, set
/// either here (auto-scroll) or by a scroll request from the controller.
pub fn render_slot_grid(
    ui: &mut egui::Ui,
    controller: &mut GridInteractionController,
    categories: &[Category],
    grid: &GridSettings,
    scroll_lock: &ScrollLock,
    scroll_override: &mut Option<f32>,
) {
    let row_height = grid.row_height;
    if let Some(slot) = controller.take_scroll_request() {
        *scroll_override = Some(scroll_offset_for_slot(
            slot,
            row_height,
            ui.available_height(),
            grid.editor_bottom_inset,
        ));
    }

    let lookup: HashMap<i64, &Category> = categories
        .iter()
        .filter_map(|category| category.id.map(|id| (id, category)))
        .collect();
    let palette = SlotGridPalette::from_visuals(ui.visuals());

    let touching = ui.input(|i| i.any_touches());
    let mut area = egui::ScrollArea::vertical()
        .id_source("slot_grid")
        .auto_shrink([false, false])
        .drag_to_scroll(touching && !scroll_lock.is_locked() && !controller.is_dragging());
    if let Some(offset) = scroll_override.take() {
        area = area.vertical_scroll_offset(offset);
    }

    let output = area.show(ui, |ui| {
        ui.spacing_mut().item_spacing = Vec2::ZERO;
        let mut clicked = None;
        for slot in 0..SLOTS_PER_DAY {
            let size = Vec2::new(ui.available_width(), row_height);
            let (rect, response) = ui.allocate_exact_size(size, Sense::click());
            if ui.is_rect_visible(rect) {
                paint_row(ui, rect, slot, controller, &lookup, &palette);
            }
            if response.clicked() {
                clicked = Some(slot);
            }
        }
        clicked
    });

    let mut geometry =
        SlotGridGeometry::new(output.inner_rect, row_height).with_scroll_offset(output.state.offset.y);
    let laid_out_offset = geometry.scroll_offset;
    route_pointer(ui, controller, &mut geometry);
    if (geometry.scroll_offset - laid_out_offset).abs() > f32::EPSILON {
        *scroll_override = Some(geometry.scroll_offset);
    }

    if let Some(slot) = output.inner {
        if ui.input(|i| i.modifiers.shift) {
            controller.handle_shift_click(slot);
        } else {
            controller.handle_click(slot);
        }
    }
}

fn route_pointer(
    ui: &egui::Ui,
    controller: &mut GridInteractionController,
    geometry: &mut SlotGridGeometry,
) {
    let (pressed, origin, latest, released, any_down, touching) = ui.input(|i| {
        let pressed = [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle]
            .into_iter()
            .find(|button| i.pointer.button_pressed(*button));
        (
            pressed,
            i.pointer.press_origin(),
            i.pointer.latest_pos(),
            i.pointer.any_released(),
            i.pointer.any_down(),
            i.any_touches(),
        )
    });

    if let (Some(button), Some(pos)) = (pressed, origin) {
        // Popups and side panels above the grid keep their own presses.
        if ui.rect_contains_pointer(geometry.viewport) {
            let kind = if touching {
                PointerKind::Touch
            } else {
                PointerKind::Mouse
            };
            controller.pointer_down(
                PointerDown {
                    id: MOUSE_POINTER,
                    kind,
                    button,
                    pos,
                },
                &*geometry,
            );
        }
    }

    if !controller.is_dragging() {
        return;
    }

    if let Some(pos) = latest {
        controller.pointer_move(MOUSE_POINTER, pos, &*geometry);
    }
    controller.tick(Some(geometry));

    if released {
        controller.pointer_up(MOUSE_POINTER);
    } else if !any_down {
        // Pointer left the window or the touch was taken away.
        controller.pointer_cancel(MOUSE_POINTER);
    }
}

fn paint_row(
    ui: &egui::Ui,
    rect: Rect,
    slot: usize,
    controller: &GridInteractionController,
    lookup: &HashMap<i64, &Category>,
    palette: &SlotGridPalette,
) {
    let painter = ui.painter();
    let entry = controller.slot(slot);
    let category = entry.and_then(|entry| lookup.get(&entry.category_id).copied());

    let time_rect = Rect::from_min_max(rect.min, Pos2::new(rect.left() + TIME_COLUMN_WIDTH, rect.bottom()));
    let cell_rect = Rect::from_min_max(Pos2::new(time_rect.right(), rect.top()), rect.max);

    let (fill, text_color) = match category {
        Some(category) => {
            let color = category_color(category);
            (color, contrast_text(color))
        }
        None => (palette.empty_bg, palette.note_text),
    };
    painter.rect_filled(cell_rect, 0.0, fill);

    if controller.selection().contains(&slot) {
        painter.rect_filled(cell_rect, 0.0, palette.selection);
    }

    let divider = if slot % 2 == 0 {
        palette.hour_line
    } else {
        palette.half_hour_line
    };
    painter.hline(rect.x_range(), rect.top(), Stroke::new(1.0, divider));

    let time_color = if slot % 2 == 0 {
        palette.time_text
    } else {
        with_alpha(palette.time_text, 140)
    };
    painter.text(
        Pos2::new(time_rect.right() - 8.0, time_rect.center().y),
        Align2::RIGHT_CENTER,
        slot_index_to_time(slot),
        FontId::proportional(12.0),
        time_color,
    );

    if let Some(category) = category {
        let mut label = category.name.clone();
        if let Some(note) = entry.and_then(|entry| entry.note.as_deref()) {
            if !note.is_empty() {
                label = format!("{}  ·  {}", label, note);
            }
        }
        let galley = painter.layout_no_wrap(label, FontId::proportional(13.0), text_color);
        let text_pos = Pos2::new(cell_rect.left() + 10.0, cell_rect.center().y - galley.size().y / 2.0);
        painter.with_clip_rect(cell_rect).galley(text_pos, galley, text_color);
    }

    if controller.editor_slot() == Some(slot) {
        let marker = Rect::from_min_max(cell_rect.min, Pos2::new(cell_rect.left() + 4.0, cell_rect.bottom()));
        painter.rect_filled(marker, 0.0, palette.editor_marker);
    }

    if controller.focused_slot() == slot {
        painter.rect_stroke(cell_rect.shrink(1.0), 2.0, Stroke::new(2.0, palette.focus_ring));
    }
}
