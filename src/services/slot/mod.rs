//! Slot service: reads and writes for logged half-hour slots.
//!
//! Every write is keyed by `(date, slot_index)`, which is unique, so
//! assigning a slot twice updates it in place.

pub mod gateway;
pub mod queue;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::goal::CategorySummary;
use crate::models::slot::TimeSlot;

const SELECT_COLUMNS: &str = "SELECT id, date, slot_index, category_id, note FROM time_slots";

fn row_to_slot(row: &Row<'_>) -> rusqlite::Result<TimeSlot> {
    Ok(TimeSlot {
        id: row.get(0)?,
        date: row.get(1)?,
        slot_index: row.get::<_, i64>(2)? as usize,
        category_id: row.get(3)?,
        note: row.get(4)?,
    })
}

fn normalize_note(note: Option<&str>) -> Option<&str> {
    note.filter(|n| !n.is_empty())
}

pub struct SlotService<'a> {
    conn: &'a Connection,
}

impl<'a> SlotService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All logged slots for one day, ordered by slot index.
    pub fn get_by_date(&self, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE date = ?1 ORDER BY slot_index", SELECT_COLUMNS))?;
        let slots = stmt.query_map(params![date], row_to_slot)?;
        slots
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to load slots for {}", date))
    }

    /// Logged slots between two dates, both inclusive.
    pub fn get_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<TimeSlot>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE date >= ?1 AND date <= ?2 ORDER BY date, slot_index",
            SELECT_COLUMNS
        ))?;
        let slots = stmt.query_map(params![start, end], row_to_slot)?;
        slots
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to load slots for {}..{}", start, end))
    }

    /// Slot count and hours per category between two dates, both inclusive.
    pub fn category_summary(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CategorySummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT category_id, COUNT(*) FROM time_slots
             WHERE date >= ?1 AND date <= ?2
             GROUP BY category_id ORDER BY category_id",
        )?;
        let rows = stmt.query_map(params![start, end], |row| {
            let total_slots: u32 = row.get(1)?;
            Ok(CategorySummary {
                category_id: row.get(0)?,
                total_slots,
                total_hours: total_slots as f64 * 0.5,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to summarize slots")
    }

    pub fn find(&self, date: NaiveDate, slot_index: usize) -> Result<Option<TimeSlot>> {
        self.conn
            .query_row(
                &format!("{} WHERE date = ?1 AND slot_index = ?2", SELECT_COLUMNS),
                params![date, slot_index as i64],
                row_to_slot,
            )
            .optional()
            .context("Failed to look up slot")
    }

    /// Insert or update one slot; the note is replaced as given.
    pub fn upsert(
        &self,
        date: NaiveDate,
        slot_index: usize,
        category_id: i64,
        note: Option<&str>,
    ) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO time_slots (date, slot_index, category_id, note)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(date, slot_index)
                 DO UPDATE SET category_id = excluded.category_id, note = excluded.note",
                params![date, slot_index as i64, category_id, normalize_note(note)],
            )
            .with_context(|| format!("Failed to upsert slot {} on {}", slot_index, date))?;

        let id: i64 = self
            .conn
            .query_row(
                "SELECT id FROM time_slots WHERE date = ?1 AND slot_index = ?2",
                params![date, slot_index as i64],
                |row| row.get(0),
            )
            .context("Upserted slot not found")?;
        Ok(id)
    }

    /// Assign one category to many slots, keeping existing notes.
    pub fn bulk_assign(&self, date: NaiveDate, slot_indexes: &[usize], category_id: i64) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for &slot_index in slot_indexes {
            tx.execute(
                "INSERT INTO time_slots (date, slot_index, category_id)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(date, slot_index)
                 DO UPDATE SET category_id = excluded.category_id",
                params![date, slot_index as i64, category_id],
            )
            .with_context(|| format!("Failed to assign slot {} on {}", slot_index, date))?;
        }
        tx.commit().context("Failed to commit bulk assignment")?;
        Ok(())
    }

    /// Remove one slot. Removing an empty slot is a no-op.
    pub fn remove(&self, date: NaiveDate, slot_index: usize) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM time_slots WHERE date = ?1 AND slot_index = ?2",
                params![date, slot_index as i64],
            )
            .with_context(|| format!("Failed to remove slot {} on {}", slot_index, date))?;
        Ok(())
    }

    pub fn bulk_remove(&self, date: NaiveDate, slot_indexes: &[usize]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for &slot_index in slot_indexes {
            tx.execute(
                "DELETE FROM time_slots WHERE date = ?1 AND slot_index = ?2",
                params![date, slot_index as i64],
            )
            .with_context(|| format!("Failed to remove slot {} on {}", slot_index, date))?;
        }
        tx.commit().context("Failed to commit bulk removal")?;
        Ok(())
    }

    pub fn update_note(&self, slot_id: i64, note: &str) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE time_slots SET note = ?1 WHERE id = ?2",
                params![normalize_note(Some(note)), slot_id],
            )
            .with_context(|| format!("Failed to update note for slot {}", slot_id))?;

        if changed == 0 {
            return Err(anyhow!("Slot {} not found", slot_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;
    use pretty_assertions::assert_eq;

    fn setup() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_upsert_is_idempotent_per_slot() {
        let db = setup();
        let service = SlotService::new(db.connection());

        let first = service.upsert(day(3), 10, 1, Some("standup")).unwrap();
        let second = service.upsert(day(3), 10, 2, None).unwrap();

        assert_eq!(first, second);
        let slots = service.get_by_date(day(3)).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].category_id, 2);
        assert_eq!(slots[0].note, None);
    }

    #[test]
    fn test_bulk_assign_keeps_notes() {
        let db = setup();
        let service = SlotService::new(db.connection());
        service.upsert(day(3), 4, 1, Some("gym")).unwrap();

        service.bulk_assign(day(3), &[2, 3, 4], 7).unwrap();

        let slots = service.get_by_date(day(3)).unwrap();
        let indexes: Vec<usize> = slots.iter().map(|s| s.slot_index).collect();
        assert_eq!(indexes, vec![2, 3, 4]);
        assert!(slots.iter().all(|s| s.category_id == 7));
        assert_eq!(slots[2].note.as_deref(), Some("gym"));
    }

    #[test]
    fn test_remove_missing_slot_is_noop() {
        let db = setup();
        let service = SlotService::new(db.connection());
        assert!(service.remove(day(3), 5).is_ok());
    }

    #[test]
    fn test_bulk_remove_only_touches_listed_slots() {
        let db = setup();
        let service = SlotService::new(db.connection());
        service.bulk_assign(day(3), &[0, 1, 2, 3], 1).unwrap();

        service.bulk_remove(day(3), &[1, 2]).unwrap();

        let remaining: Vec<usize> = service
            .get_by_date(day(3))
            .unwrap()
            .iter()
            .map(|s| s.slot_index)
            .collect();
        assert_eq!(remaining, vec![0, 3]);
    }

    #[test]
    fn test_update_note_empty_clears() {
        let db = setup();
        let service = SlotService::new(db.connection());
        let id = service.upsert(day(3), 1, 1, None).unwrap();

        service.update_note(id, "reading").unwrap();
        assert_eq!(service.find(day(3), 1).unwrap().unwrap().note.as_deref(), Some("reading"));

        service.update_note(id, "").unwrap();
        assert_eq!(service.find(day(3), 1).unwrap().unwrap().note, None);
    }

    #[test]
    fn test_update_note_missing_slot_fails() {
        let db = setup();
        let service = SlotService::new(db.connection());
        assert!(service.update_note(42, "lost").is_err());
    }

    #[test]
    fn test_range_and_summary() {
        let db = setup();
        let service = SlotService::new(db.connection());
        service.bulk_assign(day(3), &[0, 1, 2], 1).unwrap();
        service.bulk_assign(day(4), &[0], 2).unwrap();
        service.bulk_assign(day(9), &[0], 1).unwrap();

        assert_eq!(service.get_by_date_range(day(3), day(4)).unwrap().len(), 4);

        let summary = service.category_summary(day(3), day(4)).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].category_id, 1);
        assert_eq!(summary[0].total_slots, 3);
        assert_eq!(summary[0].total_hours, 1.5);
        assert_eq!(summary[1].total_hours, 0.5);
    }
}
