use super::SlotLogApp;
use crate::models::category::Category;
use crate::services::slot::queue::{CommandSink, SlotCommand};
use crate::ui_egui::interaction::splice_move;
use crate::ui_egui::views::category_list::CategoryAction;

impl SlotLogApp {
    pub(super) fn apply_category_actions(&mut self, actions: Vec<CategoryAction>) {
        for action in actions {
            self.apply_category_action(action);
        }
    }

    fn apply_category_action(&mut self, action: CategoryAction) {
        match action {
            CategoryAction::Rename { id, name } => {
                let result = self.context.category_service().update(id, Some(&name), None);
                self.report(result, "rename category");
            }
            CategoryAction::Recolor { id, color } => {
                let result = self.context.category_service().update(id, None, Some(&color));
                self.report(result, "change color");
            }
            CategoryAction::Archive(id) => {
                let result = self.context.category_service().archive(id);
                if self.report(result, "archive category") {
                    self.toasts.info("Category archived");
                }
            }
            CategoryAction::Add { name, color } => {
                let service = self.context.category_service();
                let result = service
                    .next_sort_order()
                    .and_then(|order| service.create(Category::new(name, color, order)));
                if let Ok(category) = &result {
                    self.toasts.success(format!("Added {}", category.name));
                }
                self.report(result, "add category");
            }
            CategoryAction::ResetDefaults => {
                let result = self.context.category_service().reseed();
                if self.report(result, "reset categories") {
                    self.toasts.info("Categories reset to defaults");
                }
            }
            CategoryAction::Move { from, to } => {
                if self.submit_reorder(from, to).is_some() {
                    // No drag preview covers button moves; show the new order now.
                    splice_move(&mut self.state.categories, from, to);
                    self.sort.set_item_count(self.state.categories.len());
                }
            }
            CategoryAction::Reorder(request) => {
                match self.submit_reorder(request.from, request.to) {
                    Some(ticket) => self.sort.await_settle(ticket),
                    None => self.sort.cancel(&mut self.category_rects),
                }
            }
        }
    }

    /// Queue a reorder of the active list. Returns the ticket, or `None`
    /// when the indexes do not fit the list.
    fn submit_reorder(&mut self, from: usize, to: usize) -> Option<u64> {
        let mut ordered_ids: Vec<i64> = self.state.categories.iter().filter_map(|c| c.id).collect();
        if from >= ordered_ids.len() || to >= ordered_ids.len() || from == to {
            return None;
        }
        splice_move(&mut ordered_ids, from, to);
        let ticket = CommandSink::submit(
            &mut self.context,
            SlotCommand::ReorderCategories { ordered_ids },
        );
        self.state.needs_reload = true;
        Some(ticket)
    }

    /// Log and toast a failed write; mark the cached list stale either way.
    fn report<T>(&mut self, result: anyhow::Result<T>, what: &str) -> bool {
        self.state.needs_reload = true;
        match result {
            Ok(_) => true,
            Err(err) => {
                log::error!("Failed to {}: {:#}", what, err);
                self.toasts.error(format!("Couldn't {}: {}", what, err));
                false
            }
        }
    }
}
