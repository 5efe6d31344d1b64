use super::state::ViewType;
use super::SlotLogApp;
use crate::ui_egui::views::planning::{self, PlanningAction};
use crate::utils::date;
use chrono::{Duration, NaiveDate};

impl SlotLogApp {
    /// Switch to the planning view on the week of the day being logged.
    pub(super) fn open_planning(&mut self) {
        self.state.view = ViewType::Planning;
        self.load_week_plan(date::week_start(self.state.current_date));
    }

    /// Load a week's plan, seeding empty weeks from the one before.
    pub(super) fn load_week_plan(&mut self, week_start: NaiveDate) {
        self.state.planning_week = week_start;
        self.state.goal_drafts.clear();

        match self.context.goal_service().load_plan(week_start) {
            Ok(plan) => {
                if plan.seeded > 0 {
                    self.toasts.info(format!(
                        "Goals for {} started from last week",
                        planning::week_label(week_start)
                    ));
                }
                self.state.week_plan = Some(plan);
            }
            Err(err) => {
                log::error!("Failed to load goals for week of {}: {:#}", week_start, err);
                self.toasts.error("Couldn't load weekly goals");
                self.state.week_plan = None;
            }
        }
    }

    pub(super) fn render_planning_view(&mut self, ctx: &egui::Context) {
        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                planning::render_planning(
                    ui,
                    &self.state.categories,
                    self.state.week_plan.as_ref(),
                    self.state.planning_week,
                    &mut self.state.goal_drafts,
                )
            })
            .inner;

        for action in actions {
            self.apply_planning_action(action);
        }
    }

    fn apply_planning_action(&mut self, action: PlanningAction) {
        let week = self.state.planning_week;
        match action {
            PlanningAction::PreviousWeek => self.load_week_plan(week - Duration::days(7)),
            PlanningAction::NextWeek => self.load_week_plan(week + Duration::days(7)),
            PlanningAction::ThisWeek => self.load_week_plan(date::week_start(date::today())),
            PlanningAction::SetGoal { category_id, hours } => {
                match self.context.goal_service().upsert(week, category_id, hours) {
                    Ok(_) => {
                        if let Some(plan) = self.state.week_plan.as_mut() {
                            plan.goals.insert(category_id, hours);
                        }
                    }
                    Err(err) => {
                        log::error!("Failed to save goal for category {}: {:#}", category_id, err);
                        self.toasts.error(format!("Couldn't save goal: {}", err));
                    }
                }
            }
        }
    }
}
