// Test fixtures - reusable test data
// Provides consistent storage and grid setups across all test files

#![allow(dead_code)]

use chrono::NaiveDate;
use egui::{pos2, vec2, Pos2, Rect};
use slotlog::models::settings::AutoScrollSettings;
use slotlog::services::category::CategoryService;
use slotlog::services::database::Database;
use slotlog::ui_egui::interaction::{GridInteractionController, ScrollLock, SlotGridGeometry};
use tempfile::TempDir;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, March 3 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    /// The Monday before [`monday`]
    pub fn previous_monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 24).unwrap()
    }
}

/// A seeded database file in a temporary directory. Keep the `TempDir`
/// alive for as long as the file is used.
pub struct TempStore {
    pub dir: TempDir,
    pub path: String,
    pub db: Database,
}

impl TempStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir
            .path()
            .join("slotlog.db")
            .to_str()
            .expect("Temp path is not UTF-8")
            .to_string();
        let db = Database::new(&path).expect("Failed to open database");
        db.initialize_schema().expect("Failed to initialize schema");
        CategoryService::new(db.connection())
            .seed_defaults()
            .expect("Failed to seed categories");
        Self { dir, path, db }
    }

    /// Ids of the active categories in shortcut order.
    pub fn category_ids(&self) -> Vec<i64> {
        CategoryService::new(self.db.connection())
            .list()
            .expect("Failed to list categories")
            .iter()
            .filter_map(|c| c.id)
            .collect()
    }
}

/// Grid layout shared by the pointer tests: 20pt rows in a 200pt viewport
/// at the top-left of the window.
pub mod grid {
    use super::*;

    pub const ROW: f32 = 20.0;

    pub fn viewport() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(300.0, 200.0))
    }

    pub fn geometry(scroll_offset: f32) -> SlotGridGeometry {
        SlotGridGeometry::new(viewport(), ROW).with_scroll_offset(scroll_offset)
    }

    /// Screen position of the middle of `slot` at `scroll_offset`.
    pub fn slot_center(slot: usize, scroll_offset: f32) -> Pos2 {
        pos2(150.0, slot as f32 * ROW - scroll_offset + ROW / 2.0)
    }
}

pub fn controller(date: NaiveDate, categories: Vec<i64>) -> GridInteractionController {
    let settings = AutoScrollSettings {
        threshold: 40.0,
        speed: 10.0,
        min_intensity: 0.2,
    };
    let mut controller = GridInteractionController::new(date, settings, ScrollLock::new());
    controller.set_categories(categories);
    controller
}
