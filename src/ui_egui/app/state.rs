use crate::models::category::Category;
use crate::models::goal::WeekPlan;
use crate::ui_egui::views::category_list::CategoryDrafts;
use crate::ui_egui::views::planning::GoalDrafts;
use crate::utils::date;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    Log,
    Categories,
    Planning,
}

pub struct AppState {
    pub view: ViewType,
    /// Day shown in the log view; bound to the date picker
    pub current_date: NaiveDate,
    /// Active categories in sort order
    pub categories: Vec<Category>,
    /// Storage changed underneath the cached rows
    pub needs_reload: bool,
    /// Scroll offset to apply to the slot grid on the next frame
    pub grid_scroll: Option<f32>,
    pub category_drafts: CategoryDrafts,
    /// Monday of the week shown in the planning view
    pub planning_week: NaiveDate,
    /// Loaded on entering the planning view; `None` until then or on failure
    pub week_plan: Option<WeekPlan>,
    pub goal_drafts: GoalDrafts,
}

impl AppState {
    pub fn new(current_date: NaiveDate) -> Self {
        Self {
            view: ViewType::Log,
            current_date,
            categories: Vec::new(),
            needs_reload: true,
            grid_scroll: None,
            category_drafts: CategoryDrafts::default(),
            planning_week: date::week_start(current_date),
            week_plan: None,
            goal_drafts: GoalDrafts::default(),
        }
    }
}
