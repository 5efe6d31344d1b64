// Weekly goal model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Target hours for one category over the week starting on `week_start`
/// (always a Monday).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyGoal {
    pub id: Option<i64>,
    pub week_start: NaiveDate,
    pub category_id: i64,
    pub goal_hours: f64,
}

impl WeeklyGoal {
    pub fn new(week_start: NaiveDate, category_id: i64, goal_hours: f64) -> Self {
        Self {
            id: None,
            week_start,
            category_id,
            goal_hours,
        }
    }
}

/// Slot count and hours for one category over a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category_id: i64,
    pub total_slots: u32,
    pub total_hours: f64,
}

/// Hours in a week; the ceiling for a single goal.
pub const WEEK_HOURS: f64 = 168.0;

/// Everything the planning view shows for one week: this week's goals and
/// what was actually logged the week before.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekPlan {
    pub week_start: NaiveDate,
    /// Goal hours by category id
    pub goals: HashMap<i64, f64>,
    /// Hours logged in the previous week by category id
    pub previous_actuals: HashMap<i64, f64>,
    /// Days of the previous week with at least one logged slot
    pub previous_days_logged: usize,
    /// Goals created from the previous week when the plan was loaded
    pub seeded: usize,
}

impl WeekPlan {
    /// Goal for a category, falling back to last week's actual hours.
    pub fn goal_for(&self, category_id: i64) -> f64 {
        self.goals
            .get(&category_id)
            .or_else(|| self.previous_actuals.get(&category_id))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn previous_for(&self, category_id: i64) -> f64 {
        self.previous_actuals.get(&category_id).copied().unwrap_or(0.0)
    }

    pub fn total_goal_hours(&self, category_ids: &[i64]) -> f64 {
        category_ids.iter().map(|id| self.goal_for(*id)).sum()
    }
}
