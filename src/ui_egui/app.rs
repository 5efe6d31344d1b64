mod categories;
mod context;
mod lifecycle;
mod navigation;
mod planning;
mod shortcuts;
mod state;
mod toast;

use self::context::AppContext;
use self::state::{AppState, ViewType};
use self::toast::ToastManager;
use crate::models::settings::AppConfig;
use crate::services::slot::queue::MutationOutcome;
use crate::ui_egui::interaction::{
    GridInteractionController, ScrollLock, SortDragEngine, TaggedRects,
};
use crate::ui_egui::views::{category_list, editor_panel, slot_grid};

pub struct SlotLogApp {
    /// Database handle for reads and the mutation queue for writes
    context: AppContext,
    config: AppConfig,
    state: AppState,
    controller: GridInteractionController,
    sort: SortDragEngine,
    category_rects: TaggedRects,
    scroll_lock: ScrollLock,
    toasts: ToastManager,
}

impl eframe::App for SlotLogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_update(ctx);
    }
}

impl SlotLogApp {
    fn handle_update(&mut self, ctx: &egui::Context) {
        self.poll_mutations();
        if self.state.needs_reload && !self.context.has_pending() {
            self.reload();
        }

        self.controller.begin_frame();
        self.handle_keyboard(ctx);
        if self.controller.take_grid_focus_request() {
            release_text_focus(ctx);
        }

        self.render_top_bar(ctx);
        match self.state.view {
            ViewType::Log => self.render_log_view(ctx),
            ViewType::Categories => self.render_categories_view(ctx),
            ViewType::Planning => self.render_planning_view(ctx),
        }

        self.toasts.render(ctx, ctx.style().visuals.dark_mode);

        if self.controller.needs_frames() || self.sort.is_dragging() {
            ctx.request_repaint();
        } else if self.context.has_pending() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }

    fn poll_mutations(&mut self) {
        for outcome in self.context.drain_outcomes() {
            self.on_mutation_settled(outcome);
        }
    }

    fn on_mutation_settled(&mut self, outcome: MutationOutcome) {
        if let Some(notice) = settle_outcome(&mut self.sort, &outcome) {
            self.toasts.error(notice);
        }
        self.state.needs_reload = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.state.view, ViewType::Log, "Log");
                ui.selectable_value(&mut self.state.view, ViewType::Categories, "Categories");
                if ui
                    .selectable_label(self.state.view == ViewType::Planning, "Planning")
                    .clicked()
                    && self.state.view != ViewType::Planning
                {
                    self.open_planning();
                }
                ui.separator();
                if self.state.view == ViewType::Log {
                    self.render_date_navigator(ui);
                }
            });
        });
    }

    fn render_log_view(&mut self, ctx: &egui::Context) {
        let categories = self.state.categories.clone();

        if self.controller.multi_selection().is_some() {
            egui::TopBottomPanel::bottom("multi_select_bar").show(ctx, |ui| {
                editor_panel::render_multi_select_bar(
                    ui,
                    &mut self.controller,
                    &categories,
                    &mut self.context,
                );
            });
        }

        if self.controller.editor_slot().is_some() {
            egui::SidePanel::right("slot_editor")
                .resizable(false)
                .min_width(240.0)
                .show(ctx, |ui| {
                    editor_panel::render_slot_editor(
                        ui,
                        &mut self.controller,
                        &categories,
                        &mut self.context,
                    );
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            slot_grid::render_slot_grid(
                ui,
                &mut self.controller,
                &categories,
                &self.config.grid,
                &self.scroll_lock,
                &mut self.state.grid_scroll,
            );
        });
    }

    fn render_categories_view(&mut self, ctx: &egui::Context) {
        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                category_list::render_category_list(
                    ui,
                    &self.state.categories,
                    &mut self.sort,
                    &mut self.category_rects,
                    &mut self.state.category_drafts,
                    &self.scroll_lock,
                )
            })
            .inner;
        self.apply_category_actions(actions);
    }
}

/// Release a reorder preview waiting on this outcome, whether it succeeded
/// or not, and describe a failure for the user.
fn settle_outcome(sort: &mut SortDragEngine, outcome: &MutationOutcome) -> Option<String> {
    sort.settle(outcome.ticket);
    outcome
        .result
        .as_ref()
        .err()
        .map(|err| format!("Couldn't {}: {}", outcome.command.describe(), err))
}

fn release_text_focus(ctx: &egui::Context) {
    ctx.memory_mut(|mem| {
        if let Some(id) = mem.focused() {
            mem.surrender_focus(id);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::slot::queue::SlotCommand;
    use crate::ui_egui::interaction::{PointerDown, MOUSE_POINTER};
    use egui::{pos2, vec2, Rect};

    fn row(i: usize) -> Rect {
        Rect::from_min_size(pos2(0.0, i as f32 * 30.0), vec2(200.0, 30.0))
    }

    fn dropped_preview(ticket: u64) -> SortDragEngine {
        let mut rects = TaggedRects::new();
        for i in 0..3 {
            rects.insert(i, row(i));
        }
        let mut sort = SortDragEngine::new(ScrollLock::new());
        sort.set_item_count(3);
        sort.pointer_down(0, PointerDown::mouse(row(0).center()), row(0), &mut rects);
        sort.pointer_move(MOUSE_POINTER, row(2).center(), &mut rects);
        sort.pointer_up(MOUSE_POINTER, &mut rects);
        sort.await_settle(ticket);
        sort
    }

    fn reorder_outcome(ticket: u64, result: Result<(), String>) -> MutationOutcome {
        MutationOutcome {
            ticket,
            command: SlotCommand::ReorderCategories {
                ordered_ids: vec![2, 3, 1],
            },
            result,
        }
    }

    #[test]
    fn test_failed_reorder_still_clears_preview() {
        let mut sort = dropped_preview(5);
        assert_eq!(sort.display_order(3), vec![1, 2, 0]);

        let notice = settle_outcome(&mut sort, &reorder_outcome(5, Err("database is locked".into())));

        assert_eq!(sort.display_order(3), vec![0, 1, 2]);
        assert_eq!(
            notice.as_deref(),
            Some("Couldn't reorder categories: database is locked")
        );
    }

    #[test]
    fn test_other_outcomes_leave_preview() {
        let mut sort = dropped_preview(5);
        assert_eq!(settle_outcome(&mut sort, &reorder_outcome(4, Ok(()))), None);
        assert_eq!(sort.display_order(3), vec![1, 2, 0]);
    }
}
