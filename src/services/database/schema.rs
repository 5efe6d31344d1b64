use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_categories_table(conn)?;
    create_time_slots_table(conn)?;
    run_migrations(conn)?;
    create_weekly_goals_table(conn)?;
    Ok(())
}

fn create_categories_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            is_archived INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create categories table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_categories_sort_order ON categories(sort_order)",
        [],
    )
    .context("Failed to create categories sort index")?;

    Ok(())
}

fn create_time_slots_table(conn: &Connection) -> Result<()> {
    // Slots reference categories loosely: archiving or reseeding categories
    // must never delete logged time.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS time_slots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            slot_index INTEGER NOT NULL CHECK (slot_index >= 0 AND slot_index < 48),
            category_id INTEGER NOT NULL,
            note TEXT,
            UNIQUE(date, slot_index)
        )",
        [],
    )
    .context("Failed to create time_slots table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_time_slots_date ON time_slots(date)",
        [],
    )
    .context("Failed to create time_slots date index")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_time_slots_category ON time_slots(category_id)",
        [],
    )
    .context("Failed to create time_slots category index")?;

    Ok(())
}

fn run_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "categories",
        "is_archived",
        "ALTER TABLE categories ADD COLUMN is_archived INTEGER NOT NULL DEFAULT 0",
    )?;

    migrations::ensure_column(
        conn,
        "time_slots",
        "note",
        "ALTER TABLE time_slots ADD COLUMN note TEXT",
    )?;

    Ok(())
}

fn create_weekly_goals_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS weekly_goals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            week_start TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            goal_hours REAL NOT NULL DEFAULT 0,
            UNIQUE(week_start, category_id)
        )",
        [],
    )
    .context("Failed to create weekly_goals table")?;

    Ok(())
}
