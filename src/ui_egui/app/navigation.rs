use super::SlotLogApp;
use crate::utils::date;
use chrono::NaiveDate;
use egui_extras::DatePickerButton;

impl SlotLogApp {
    pub(super) fn navigate_previous(&mut self) {
        self.go_to_date(date::prev_day(self.state.current_date));
    }

    pub(super) fn navigate_next(&mut self) {
        self.go_to_date(date::next_day(self.state.current_date));
    }

    pub(super) fn jump_to_today(&mut self) {
        self.go_to_date(date::today());
    }

    pub(super) fn go_to_date(&mut self, target: NaiveDate) {
        if target == self.controller.date() {
            return;
        }
        log::debug!("Showing {}", target);
        self.state.current_date = target;
        self.controller.set_date(target);
        self.state.needs_reload = true;
    }

    pub(super) fn render_date_navigator(&mut self, ui: &mut egui::Ui) {
        if ui.button("◀").on_hover_text("Previous day (←)").clicked() {
            self.navigate_previous();
        }

        let mut picked = self.state.current_date;
        ui.add(
            DatePickerButton::new(&mut picked)
                .id_source("log_date_picker")
                .calendar_week(false),
        );
        if picked != self.state.current_date {
            self.go_to_date(picked);
        }

        if ui.button("▶").on_hover_text("Next day (→)").clicked() {
            self.navigate_next();
        }

        let is_today = date::is_today(self.state.current_date);
        if ui.add_enabled(!is_today, egui::Button::new("Today")).clicked() {
            self.jump_to_today();
        }

        ui.label(date::format_display_date(self.state.current_date));
    }
}
