//! Category management: rename, recolor, archive, add and drag to reorder.
//!
//! The view only reports what the user asked for as [`CategoryAction`]s;
//! the app applies them.

use super::palette::{category_color, parse_hex_color, with_alpha};
use crate::models::category::{Category, CATEGORY_PALETTE};
use crate::ui_egui::interaction::shortcuts::category_shortcut_label;
use crate::ui_egui::interaction::sort_drag::ReorderRequest;
use crate::ui_egui::interaction::{
    PointerDown, PointerKind, ScrollLock, SortDragEngine, TaggedRects, MOUSE_POINTER,
};
use egui::{Color32, CursorIcon, RichText, Sense, Stroke};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryAction {
    Rename { id: i64, name: String },
    Recolor { id: i64, color: String },
    Archive(i64),
    /// Up/down buttons; indexes into the active list.
    Move { from: usize, to: usize },
    /// Dropped after a drag.
    Reorder(ReorderRequest),
    Add { name: String, color: String },
    ResetDefaults,
}

/// Text buffers that outlive a frame.
#[derive(Debug, Default)]
pub struct CategoryDrafts {
    names: HashMap<i64, String>,
    new_name: String,
    confirm_reset: bool,
}

impl CategoryDrafts {
    /// Forget rename buffers for categories that are gone or already saved.
    fn retain_known(&mut self, categories: &[Category]) {
        self.names.retain(|id, name| {
            categories
                .iter()
                .any(|c| c.id == Some(*id) && c.name != name.trim())
        });
    }
}

pub fn render_category_list(
    ui: &mut egui::Ui,
    categories: &[Category],
    sort: &mut SortDragEngine,
    rects: &mut TaggedRects,
    drafts: &mut CategoryDrafts,
    scroll_lock: &ScrollLock,
) -> Vec<CategoryAction> {
    let mut actions = Vec::new();
    let busy = sort.state().drag_index.is_some();

    ui.heading("Categories");
    ui.label(RichText::new("Drag ☰ to reorder. The first 36 get keyboard shortcuts.").weak());
    ui.add_space(6.0);

    rects.clear_rows();
    let order = sort.display_order(categories.len());
    let over = sort.state().over_index;

    egui::ScrollArea::vertical()
        .id_source("category_list")
        .auto_shrink([false, true])
        .max_height((ui.available_height() - 120.0).max(120.0))
        .drag_to_scroll(list_drag_scrolls(sort, scroll_lock))
        .show(ui, |ui| {
            for (position, &item) in order.iter().enumerate() {
                let Some(category) = categories.get(item) else {
                    continue;
                };
                let row = ui.horizontal(|ui| {
                    render_row(ui, position, category, categories.len(), busy, drafts, &mut actions)
                });
                let row_rect = row.response.rect;
                rects.insert(position, row_rect);

                if sort.is_dragging() && over == Some(position) {
                    ui.painter().rect_filled(
                        row_rect,
                        4.0,
                        with_alpha(ui.visuals().selection.bg_fill, 60),
                    );
                }

                if row.inner.drag_started() && !busy {
                    let touching = ui.input(|i| i.any_touches());
                    if let Some(pos) = ui.input(|i| i.pointer.press_origin()) {
                        let kind = if touching {
                            PointerKind::Touch
                        } else {
                            PointerKind::Mouse
                        };
                        let event = PointerDown {
                            kind,
                            ..PointerDown::mouse(pos)
                        };
                        sort.pointer_down(position, event, row_rect, rects);
                    }
                }
            }
        });

    if sort.is_dragging() {
        route_drag(ui, sort, rects, &mut actions);
    }
    if let (Some(proxy), Some(from)) = (sort.proxy(), sort.state().drag_index) {
        if let Some(category) = categories.get(from) {
            render_proxy(ui.ctx(), proxy.rect, proxy.label.as_deref(), category);
        }
    }

    ui.separator();
    render_add_row(ui, categories.len(), drafts, &mut actions);
    ui.add_space(6.0);
    render_reset(ui, drafts, &mut actions);

    drafts.retain_known(categories);
    actions
}

/// One row; returns the grip's response.
fn render_row(
    ui: &mut egui::Ui,
    position: usize,
    category: &Category,
    count: usize,
    busy: bool,
    drafts: &mut CategoryDrafts,
    actions: &mut Vec<CategoryAction>,
) -> egui::Response {
    let grip = ui
        .add(egui::Label::new(RichText::new("☰").size(16.0)).sense(Sense::drag()))
        .on_hover_cursor(CursorIcon::Grab);

    let shortcut = category_shortcut_label(position).unwrap_or_else(|| " ".to_string());
    ui.label(RichText::new(shortcut).monospace().weak());

    let Some(id) = category.id else {
        ui.label(&category.name);
        return grip;
    };

    let color = category_color(category);
    ui.menu_button(RichText::new("⬛").color(color), |ui| {
        ui.horizontal_wrapped(|ui| {
            for hex in CATEGORY_PALETTE {
                let swatch = parse_hex_color(hex).unwrap_or(Color32::GRAY);
                let selected = category.color.eq_ignore_ascii_case(hex);
                if ui
                    .add(egui::Button::new(RichText::new("⬛").color(swatch)).selected(selected))
                    .on_hover_text(hex)
                    .clicked()
                {
                    actions.push(CategoryAction::Recolor {
                        id,
                        color: hex.to_string(),
                    });
                    ui.close_menu();
                }
            }
        });
    });

    let name = drafts
        .names
        .entry(id)
        .or_insert_with(|| category.name.clone());
    let edit = ui.add(egui::TextEdit::singleline(name).desired_width(180.0));
    if edit.lost_focus() {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            *name = category.name.clone();
        } else if trimmed != category.name {
            actions.push(CategoryAction::Rename {
                id,
                name: trimmed.to_string(),
            });
        }
    }

    ui.add_enabled_ui(!busy, |ui| {
        if ui
            .add_enabled(position > 0, egui::Button::new("⬆").small())
            .on_hover_text("Move up")
            .clicked()
        {
            actions.push(CategoryAction::Move {
                from: position,
                to: position - 1,
            });
        }
        if ui
            .add_enabled(position + 1 < count, egui::Button::new("⬇").small())
            .on_hover_text("Move down")
            .clicked()
        {
            actions.push(CategoryAction::Move {
                from: position,
                to: position + 1,
            });
        }
        if ui.small_button("Archive").clicked() {
            actions.push(CategoryAction::Archive(id));
        }
    });

    grip
}

/// Touch-drag scrolling stays off while a row is being dragged.
fn list_drag_scrolls(sort: &SortDragEngine, scroll_lock: &ScrollLock) -> bool {
    !scroll_lock.is_locked() && !sort.is_dragging()
}

fn route_drag(
    ui: &egui::Ui,
    sort: &mut SortDragEngine,
    rects: &mut TaggedRects,
    actions: &mut Vec<CategoryAction>,
) {
    let (latest, released, any_down) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.any_released(),
            i.pointer.any_down(),
        )
    });

    if let Some(pos) = latest {
        sort.pointer_move(MOUSE_POINTER, pos, rects);
    }
    let dropped = if released {
        sort.pointer_up(MOUSE_POINTER, rects)
    } else if !any_down {
        sort.pointer_cancel(MOUSE_POINTER, rects)
    } else {
        None
    };
    if let Some(request) = dropped {
        actions.push(CategoryAction::Reorder(request));
    }
}

fn render_proxy(ctx: &egui::Context, rect: egui::Rect, label: Option<&str>, category: &Category) {
    egui::Area::new(egui::Id::new("category_drag_proxy"))
        .fixed_pos(rect.min)
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .stroke(Stroke::new(1.0, category_color(category)))
                .show(ui, |ui| {
                    ui.set_min_width(rect.width() - 16.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("☰").size(16.0));
                        if let Some(label) = label {
                            ui.label(RichText::new(label).monospace().strong());
                        }
                        ui.label(RichText::new("⬛").color(category_color(category)));
                        ui.label(&category.name);
                    });
                });
        });
}

fn render_add_row(
    ui: &mut egui::Ui,
    count: usize,
    drafts: &mut CategoryDrafts,
    actions: &mut Vec<CategoryAction>,
) {
    ui.horizontal(|ui| {
        let edit = ui.add(
            egui::TextEdit::singleline(&mut drafts.new_name)
                .hint_text("New category")
                .desired_width(180.0),
        );
        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let name = drafts.new_name.trim().to_string();
        if (ui.add_enabled(!name.is_empty(), egui::Button::new("Add")).clicked() || submitted)
            && !name.is_empty()
        {
            let color = CATEGORY_PALETTE[count % CATEGORY_PALETTE.len()].to_string();
            actions.push(CategoryAction::Add { name, color });
            drafts.new_name.clear();
        }
    });
}

fn render_reset(ui: &mut egui::Ui, drafts: &mut CategoryDrafts, actions: &mut Vec<CategoryAction>) {
    if !drafts.confirm_reset {
        if ui.button("Reset to defaults…").clicked() {
            drafts.confirm_reset = true;
        }
        return;
    }

    ui.horizontal(|ui| {
        ui.label(RichText::new("Replace every category with the default set?").color(ui.visuals().warn_fg_color));
        if ui.button("Reset").clicked() {
            actions.push(CategoryAction::ResetDefaults);
            drafts.confirm_reset = false;
        }
        if ui.button("Cancel").clicked() {
            drafts.confirm_reset = false;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id: Some(id),
            ..Category::new(name, "#2D5F3E", id)
        }
    }

    #[test]
    fn test_touch_row_drag_stops_list_scrolling() {
        let lock = ScrollLock::new();
        let mut sort = SortDragEngine::new(lock.clone());
        sort.set_item_count(2);
        let mut rects = TaggedRects::new();
        let row = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 30.0));
        rects.insert(0, row);
        assert!(list_drag_scrolls(&sort, &lock));

        assert!(sort.pointer_down(0, PointerDown::touch(4, row.center()), row, &mut rects));
        assert!(lock.is_locked());
        assert!(!list_drag_scrolls(&sort, &lock));

        sort.pointer_cancel(4, &mut rects);
        assert!(list_drag_scrolls(&sort, &lock));
    }

    #[test]
    fn test_drafts_drop_saved_and_missing_names() {
        let mut drafts = CategoryDrafts::default();
        drafts.names.insert(1, "Work".to_string());
        drafts.names.insert(2, "Deep work".to_string());
        drafts.names.insert(9, "Gone".to_string());

        drafts.retain_known(&[category(1, "Work"), category(2, "Work")]);

        assert!(!drafts.names.contains_key(&1));
        assert_eq!(drafts.names.get(&2).map(String::as_str), Some("Deep work"));
        assert!(!drafts.names.contains_key(&9));
    }
}
