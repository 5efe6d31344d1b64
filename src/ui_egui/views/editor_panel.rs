//! Slot editor side panel and the bulk-edit bar shown for multi-slot
//! selections.

use super::palette::category_color;
use crate::models::category::Category;
use crate::models::slot::slot_index_to_time_range;
use crate::services::slot::queue::CommandSink;
use crate::ui_egui::interaction::shortcuts::category_shortcut_label;
use crate::ui_egui::interaction::GridInteractionController;
use egui::{Color32, RichText, Sense, Vec2};

pub fn render_slot_editor(
    ui: &mut egui::Ui,
    controller: &mut GridInteractionController,
    categories: &[Category],
    sink: &mut dyn CommandSink,
) {
    let Some(slot) = controller.editor_slot() else {
        return;
    };
    let assigned = controller.slot(slot).map(|entry| entry.category_id);

    ui.horizontal(|ui| {
        ui.heading(slot_index_to_time_range(slot));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("✕").on_hover_text("Close (Esc)").clicked() {
                controller.close_editor();
            }
        });
    });
    ui.separator();

    ui.label(RichText::new("Category").strong());
    for (rank, category) in categories.iter().enumerate() {
        let Some(id) = category.id else {
            continue;
        };
        if category_button(ui, rank, category, assigned == Some(id)).clicked() {
            controller.select_category(id, sink);
        }
    }
    if categories.is_empty() {
        ui.label(RichText::new("No categories yet").weak());
    }

    ui.add_space(8.0);
    ui.label(RichText::new("Note").strong());
    let mut draft = controller.note_draft().to_owned();
    let response = ui.add(
        egui::TextEdit::singleline(&mut draft)
            .hint_text("What were you doing?")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        controller.set_note_draft(draft);
    }
    if response.lost_focus() {
        controller.commit_note(sink);
    }

    if assigned.is_some() {
        ui.add_space(8.0);
        if ui.button("Clear slot").clicked() {
            controller.clear_editor_slot(sink);
        }
    }
}

pub fn render_multi_select_bar(
    ui: &mut egui::Ui,
    controller: &mut GridInteractionController,
    categories: &[Category],
    sink: &mut dyn CommandSink,
) {
    let Some(selection) = controller.multi_selection() else {
        return;
    };

    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(format!("{} slots selected", selection.len())).strong());
        ui.separator();
        for (rank, category) in categories.iter().enumerate() {
            let Some(id) = category.id else {
                continue;
            };
            if category_button(ui, rank, category, false).clicked() {
                controller.bulk_assign_selection(id, sink);
            }
        }
        ui.separator();
        if ui.button("Clear").clicked() {
            controller.bulk_clear_selection(sink);
        }
        if ui.small_button("✕").on_hover_text("Deselect (Esc)").clicked() {
            controller.clear_selection();
        }
    });
}

fn category_button(ui: &mut egui::Ui, rank: usize, category: &Category, selected: bool) -> egui::Response {
    ui.horizontal(|ui| {
        swatch(ui, category_color(category));
        let text = match category_shortcut_label(rank) {
            Some(key) => format!("{}  {}", key, category.name),
            None => category.name.clone(),
        };
        ui.add(egui::Button::new(text).selected(selected))
    })
    .inner
}

fn swatch(ui: &mut egui::Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
    ui.painter().rect_filled(rect, 3.0, color);
}
