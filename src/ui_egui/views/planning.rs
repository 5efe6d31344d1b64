//! Weekly planning: one goal slider per active category, with last week's
//! actual hours alongside.

use super::palette::category_color;
use crate::models::category::Category;
use crate::models::goal::{WeekPlan, WEEK_HOURS};
use crate::utils::date;
use chrono::NaiveDate;
use egui::RichText;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum PlanningAction {
    PreviousWeek,
    NextWeek,
    ThisWeek,
    SetGoal { category_id: i64, hours: f64 },
}

/// Slider positions while a drag is in progress.
#[derive(Debug, Default)]
pub struct GoalDrafts {
    hours: HashMap<i64, f64>,
}

impl GoalDrafts {
    pub fn clear(&mut self) {
        self.hours.clear();
    }

    fn value(&self, plan: &WeekPlan, category_id: i64) -> f64 {
        self.hours
            .get(&category_id)
            .copied()
            .unwrap_or_else(|| plan.goal_for(category_id))
    }
}

/// "Mar 10 – Mar 16, 2025"
pub fn week_label(week_start: NaiveDate) -> String {
    format!(
        "{} – {}",
        week_start.format("%b %-d"),
        date::week_end(week_start).format("%b %-d, %Y")
    )
}

pub fn render_planning(
    ui: &mut egui::Ui,
    categories: &[Category],
    plan: Option<&WeekPlan>,
    week_start: NaiveDate,
    drafts: &mut GoalDrafts,
) -> Vec<PlanningAction> {
    let mut actions = Vec::new();

    ui.heading("Planning");
    ui.label(RichText::new("Set how many hours you want to spend on each category this week.").weak());
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        if ui.button("◀").on_hover_text("Previous week").clicked() {
            actions.push(PlanningAction::PreviousWeek);
        }
        ui.label(RichText::new(week_label(week_start)).strong());
        if ui.button("▶").on_hover_text("Next week").clicked() {
            actions.push(PlanningAction::NextWeek);
        }
        let current = week_start == date::week_start(date::today());
        if ui.add_enabled(!current, egui::Button::new("This week")).clicked() {
            actions.push(PlanningAction::ThisWeek);
        }
    });
    ui.separator();

    let Some(plan) = plan else {
        ui.label(RichText::new("Couldn't load this week.").weak());
        return actions;
    };

    if plan.previous_days_logged > 0 {
        ui.label(
            RichText::new(format!(
                "Last week: {} of 7 days logged",
                plan.previous_days_logged
            ))
            .weak(),
        );
    }

    let mut ids = Vec::new();
    egui::ScrollArea::vertical()
        .id_source("planning_goals")
        .auto_shrink([false, true])
        .max_height((ui.available_height() - 40.0).max(120.0))
        .show(ui, |ui| {
            egui::Grid::new("planning_goal_grid")
                .num_columns(4)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for category in categories {
                        let Some(id) = category.id else {
                            continue;
                        };
                        ids.push(id);
                        render_goal_row(ui, category, id, plan, drafts, &mut actions);
                        ui.end_row();
                    }
                });
        });

    ui.separator();
    let total: f64 = ids.iter().map(|id| drafts.value(plan, *id)).sum();
    let text = RichText::new(format!(
        "Total: {:.1}h / {}h ({:.1}h/d)",
        total,
        WEEK_HOURS,
        total / 7.0
    ))
    .monospace();
    if total > WEEK_HOURS {
        ui.label(text.color(ui.visuals().error_fg_color));
    } else {
        ui.label(text);
    }

    actions
}

fn render_goal_row(
    ui: &mut egui::Ui,
    category: &Category,
    id: i64,
    plan: &WeekPlan,
    drafts: &mut GoalDrafts,
    actions: &mut Vec<PlanningAction>,
) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("⬛").color(category_color(category)));
        ui.label(&category.name);
    });

    let mut hours = drafts.value(plan, id);
    let response = ui.add(
        egui::Slider::new(&mut hours, 0.0..=WEEK_HOURS)
            .step_by(0.5)
            .suffix("h"),
    );
    if response.changed() {
        drafts.hours.insert(id, hours);
    }
    // Save when the drag ends, or straight away for keyboard and typed edits.
    if response.drag_stopped() || (response.changed() && !response.dragged()) {
        drafts.hours.remove(&id);
        actions.push(PlanningAction::SetGoal {
            category_id: id,
            hours,
        });
    }

    ui.label(RichText::new(format!("{:.1}h/d", hours / 7.0)).weak().monospace());
    ui.label(RichText::new(format!("Last: {:.1}h", plan.previous_for(id))).weak().monospace());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_label_spans_monday_to_sunday() {
        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(week_label(monday), "Mar 10 – Mar 16, 2025");
    }

    #[test]
    fn test_drafts_override_plan_until_cleared() {
        let plan = WeekPlan {
            goals: HashMap::from([(1, 10.0)]),
            ..WeekPlan::default()
        };
        let mut drafts = GoalDrafts::default();
        drafts.hours.insert(1, 14.5);

        assert_eq!(drafts.value(&plan, 1), 14.5);
        drafts.clear();
        assert_eq!(drafts.value(&plan, 1), 10.0);
    }
}
