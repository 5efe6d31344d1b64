//! Weekly goal service: target hours per category per week.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeSet, HashMap};
use rusqlite::{params, Connection};

use crate::models::goal::{WeekPlan, WeeklyGoal, WEEK_HOURS};
use crate::services::slot::SlotService;

pub struct WeeklyGoalService<'a> {
    conn: &'a Connection,
}

impl<'a> WeeklyGoalService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get_by_week(&self, week_start: NaiveDate) -> Result<Vec<WeeklyGoal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, week_start, category_id, goal_hours FROM weekly_goals
             WHERE week_start = ?1 ORDER BY category_id",
        )?;
        let goals = stmt.query_map(params![week_start], |row| {
            Ok(WeeklyGoal {
                id: Some(row.get(0)?),
                week_start: row.get(1)?,
                category_id: row.get(2)?,
                goal_hours: row.get(3)?,
            })
        })?;
        goals
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to load goals for week of {}", week_start))
    }

    /// Set the goal for one category in one week; returns the goal id.
    pub fn upsert(&self, week_start: NaiveDate, category_id: i64, goal_hours: f64) -> Result<i64> {
        if !goal_hours.is_finite() || !(0.0..=WEEK_HOURS).contains(&goal_hours) {
            anyhow::bail!("Goal hours must be between 0 and {}", WEEK_HOURS);
        }

        self.conn
            .execute(
                "INSERT INTO weekly_goals (week_start, category_id, goal_hours)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(week_start, category_id)
                 DO UPDATE SET goal_hours = excluded.goal_hours",
                params![week_start, category_id, goal_hours],
            )
            .context("Failed to save weekly goal")?;

        let id = self
            .conn
            .query_row(
                "SELECT id FROM weekly_goals WHERE week_start = ?1 AND category_id = ?2",
                params![week_start, category_id],
                |row| row.get(0),
            )
            .context("Saved goal not found")?;
        Ok(id)
    }

    /// Create goals for `week_start` from the hours actually logged in the
    /// week starting `previous_week_start`. Does nothing if the week already
    /// has goals. Returns the number of goals created.
    pub fn seed_from_previous_week(
        &self,
        week_start: NaiveDate,
        previous_week_start: NaiveDate,
    ) -> Result<usize> {
        if !self.get_by_week(week_start)?.is_empty() {
            return Ok(0);
        }

        let previous_end = previous_week_start + Duration::days(6);
        let actuals =
            SlotService::new(self.conn).category_summary(previous_week_start, previous_end)?;

        for summary in &actuals {
            self.upsert(week_start, summary.category_id, summary.total_hours)?;
        }

        log::info!(
            "Seeded {} weekly goals for {} from week of {}",
            actuals.len(),
            week_start,
            previous_week_start
        );
        Ok(actuals.len())
    }

    /// Load the plan for the week starting `week_start`, seeding its goals
    /// from the previous week first if it has none.
    pub fn load_plan(&self, week_start: NaiveDate) -> Result<WeekPlan> {
        let previous_start = week_start - Duration::days(7);
        let previous_end = previous_start + Duration::days(6);
        let seeded = self.seed_from_previous_week(week_start, previous_start)?;

        let goals: HashMap<i64, f64> = self
            .get_by_week(week_start)?
            .into_iter()
            .map(|goal| (goal.category_id, goal.goal_hours))
            .collect();

        let slots = SlotService::new(self.conn);
        let previous_actuals = slots
            .category_summary(previous_start, previous_end)?
            .into_iter()
            .map(|summary| (summary.category_id, summary.total_hours))
            .collect();
        let previous_days_logged = slots
            .get_by_date_range(previous_start, previous_end)?
            .iter()
            .map(|slot| slot.date)
            .collect::<BTreeSet<_>>()
            .len();

        Ok(WeekPlan {
            week_start,
            goals,
            previous_actuals,
            previous_days_logged,
            seeded,
        })
    }
}
