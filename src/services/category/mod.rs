//! Category service for CRUD operations on slot categories.
//!
//! Categories are never hard-deleted from the UI; archiving hides them from
//! the picker while keeping historical slots intact.

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, Row};

use crate::models::category::{default_categories, Category};

const SELECT_COLUMNS: &str = "SELECT id, name, color, sort_order, is_archived FROM categories";

fn row_to_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        color: row.get(2)?,
        sort_order: row.get(3)?,
        is_archived: row.get::<_, i32>(4)? != 0,
    })
}

/// Service for managing categories.
pub struct CategoryService<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Populate the default categories if the table is empty.
    pub fn seed_defaults(&self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
            .context("Failed to count categories")?;

        if count == 0 {
            log::info!("Seeding default categories");
            for category in default_categories() {
                self.create(category)?;
            }
        }

        Ok(())
    }

    /// Delete every category and recreate the defaults. Logged slots keep
    /// their (now dangling) category ids.
    pub fn reseed(&self) -> Result<()> {
        log::warn!("Reseeding categories; existing categories will be removed");
        self.conn
            .execute("DELETE FROM categories", [])
            .context("Failed to clear categories")?;
        self.seed_defaults()
    }

    /// Create a new category.
    pub fn create(&self, category: Category) -> Result<Category> {
        category.validate()?;

        self.conn
            .execute(
                "INSERT INTO categories (name, color, sort_order, is_archived)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    category.name.trim(),
                    category.color,
                    category.sort_order,
                    category.is_archived as i32,
                ],
            )
            .context("Failed to insert category")?;

        let id = self.conn.last_insert_rowid();
        self.get_by_id(id)
    }

    /// Get a category by ID.
    pub fn get_by_id(&self, id: i64) -> Result<Category> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                row_to_category,
            )
            .with_context(|| format!("Category {} not found", id))
    }

    /// Active categories in sort order. Index in this list is the
    /// category's shortcut position.
    pub fn list(&self) -> Result<Vec<Category>> {
        self.query_list(&format!(
            "{} WHERE is_archived = 0 ORDER BY sort_order ASC, id ASC",
            SELECT_COLUMNS
        ))
    }

    /// All categories including archived ones, in sort order.
    pub fn list_all(&self) -> Result<Vec<Category>> {
        self.query_list(&format!("{} ORDER BY sort_order ASC, id ASC", SELECT_COLUMNS))
    }

    fn query_list(&self, sql: &str) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(sql)?;
        let categories = stmt.query_map([], row_to_category)?;
        categories
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to fetch categories")
    }

    /// Rename and/or recolor a category. `None` leaves a field untouched.
    pub fn update(&self, id: i64, name: Option<&str>, color: Option<&str>) -> Result<()> {
        let mut category = self.get_by_id(id)?;
        if let Some(name) = name {
            category.name = name.trim().to_string();
        }
        if let Some(color) = color {
            category.color = color.to_string();
        }
        category.validate()?;

        self.conn
            .execute(
                "UPDATE categories SET name = ?1, color = ?2 WHERE id = ?3",
                params![category.name, category.color, id],
            )
            .context("Failed to update category")?;

        Ok(())
    }

    /// Hide a category from pickers and shortcuts.
    pub fn archive(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE categories SET is_archived = 1 WHERE id = ?1",
                params![id],
            )
            .context("Failed to archive category")?;

        if changed == 0 {
            return Err(anyhow!("Category {} not found", id));
        }
        Ok(())
    }

    /// Assign sequential sort orders matching the position in `ordered_ids`.
    pub fn reorder(&self, ordered_ids: &[i64]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (position, id) in ordered_ids.iter().enumerate() {
            tx.execute(
                "UPDATE categories SET sort_order = ?1 WHERE id = ?2",
                params![position as i64, id],
            )
            .with_context(|| format!("Failed to reorder category {}", id))?;
        }
        tx.commit().context("Failed to commit category order")?;
        Ok(())
    }

    /// Sort order for a category appended to the end of the list.
    pub fn next_sort_order(&self) -> Result<i64> {
        let next: i64 = self
            .conn
            .query_row(
                "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM categories",
                [],
                |row| row.get(0),
            )
            .context("Failed to compute next sort order")?;
        Ok(next)
    }
}
