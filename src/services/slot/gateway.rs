//! Mutation boundary between the slot grid and storage.

use anyhow::Result;
use chrono::NaiveDate;

use super::SlotService;
use crate::services::category::CategoryService;
use crate::services::database::Database;

/// Write operations the slot grid needs from storage.
pub trait SlotMutationGateway {
    /// Assign a category (and note) to one slot; returns the slot id.
    fn upsert_slot(
        &self,
        date: NaiveDate,
        slot_index: usize,
        category_id: i64,
        note: Option<&str>,
    ) -> Result<i64>;
    fn remove_slot(&self, date: NaiveDate, slot_index: usize) -> Result<()>;
    fn bulk_assign(&self, date: NaiveDate, slot_indexes: &[usize], category_id: i64) -> Result<()>;
    fn bulk_remove(&self, date: NaiveDate, slot_indexes: &[usize]) -> Result<()>;
    fn update_note(&self, slot_id: i64, note: &str) -> Result<()>;
    /// Persist a new category order; position in the slice becomes the sort order.
    fn reorder_categories(&self, ordered_ids: &[i64]) -> Result<()>;
}

/// Gateway backed by its own SQLite connection.
pub struct SqliteGateway {
    db: Database,
}

impl SqliteGateway {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open a second connection to an existing database file.
    pub fn open(path: &str) -> Result<Self> {
        let db = Database::new(path)?;
        db.initialize_schema()?;
        Ok(Self::new(db))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn slots(&self) -> SlotService<'_> {
        SlotService::new(self.db.connection())
    }
}

impl SlotMutationGateway for SqliteGateway {
    fn upsert_slot(
        &self,
        date: NaiveDate,
        slot_index: usize,
        category_id: i64,
        note: Option<&str>,
    ) -> Result<i64> {
        self.slots().upsert(date, slot_index, category_id, note)
    }

    fn remove_slot(&self, date: NaiveDate, slot_index: usize) -> Result<()> {
        self.slots().remove(date, slot_index)
    }

    fn bulk_assign(&self, date: NaiveDate, slot_indexes: &[usize], category_id: i64) -> Result<()> {
        self.slots().bulk_assign(date, slot_indexes, category_id)
    }

    fn bulk_remove(&self, date: NaiveDate, slot_indexes: &[usize]) -> Result<()> {
        self.slots().bulk_remove(date, slot_indexes)
    }

    fn update_note(&self, slot_id: i64, note: &str) -> Result<()> {
        self.slots().update_note(slot_id, note)
    }

    fn reorder_categories(&self, ordered_ids: &[i64]) -> Result<()> {
        CategoryService::new(self.db.connection()).reorder(ordered_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::Category;

    #[test]
    fn test_sqlite_gateway_round_trip() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        let gateway = SqliteGateway::new(db);
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

        let id = gateway.upsert_slot(date, 3, 1, Some("focus")).unwrap();
        gateway.update_note(id, "deep focus").unwrap();
        gateway.bulk_assign(date, &[4, 5], 2).unwrap();
        gateway.remove_slot(date, 4).unwrap();

        let slots = SlotService::new(gateway.database().connection())
            .get_by_date(date)
            .unwrap();
        let summary: Vec<(usize, i64)> = slots.iter().map(|s| (s.slot_index, s.category_id)).collect();
        assert_eq!(summary, vec![(3, 1), (5, 2)]);
        assert_eq!(slots[0].note.as_deref(), Some("deep focus"));

        gateway.bulk_remove(date, &[3, 5]).unwrap();
        assert!(SlotService::new(gateway.database().connection())
            .get_by_date(date)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_sqlite_gateway_reorders_categories() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        let gateway = SqliteGateway::new(db);
        let categories = CategoryService::new(gateway.database().connection());
        let a = categories.create(Category::new("A", "#111111", 0)).unwrap();
        let b = categories.create(Category::new("B", "#222222", 1)).unwrap();

        gateway
            .reorder_categories(&[b.id.unwrap(), a.id.unwrap()])
            .unwrap();

        let order: Vec<String> = categories.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(order, vec!["B", "A"]);
    }
}
