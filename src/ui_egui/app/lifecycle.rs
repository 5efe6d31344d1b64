use super::context::AppContext;
use super::state::AppState;
use super::toast::ToastManager;
use super::SlotLogApp;
use crate::models::settings::AppConfig;
use crate::services::database::Database;
use crate::services::slot::gateway::SqliteGateway;
use crate::services::slot::queue::MutationQueue;
use crate::ui_egui::interaction::shortcuts::category_shortcut_label;
use crate::ui_egui::interaction::{GridInteractionController, ScrollLock, SortDragEngine, TaggedRects};
use crate::utils::date;
use anyhow::{Context, Result};
use std::path::Path;

impl SlotLogApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, db_path: &Path) -> Result<Self> {
        let path = db_path
            .to_str()
            .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?
            .to_string();

        let database = Database::new(&path)?;
        database.initialize_schema()?;
        let categories = crate::services::category::CategoryService::new(database.connection());
        categories.seed_defaults()?;
        log::info!("Opened database at {}", path);

        let worker_path = path.clone();
        let queue = MutationQueue::spawn(move || SqliteGateway::open(&worker_path))?;

        let scroll_lock = ScrollLock::new();
        let today = date::today();
        let controller =
            GridInteractionController::new(today, config.auto_scroll.clone(), scroll_lock.clone());
        let sort = SortDragEngine::new(scroll_lock.clone()).with_labels(category_shortcut_label);

        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut app = Self {
            context: AppContext::new(database, queue),
            config,
            state: AppState::new(today),
            controller,
            sort,
            category_rects: TaggedRects::new(),
            scroll_lock,
            toasts: ToastManager::new(),
        };
        app.reload();
        Ok(app)
    }

    /// Re-read categories and the current day's slots.
    pub(super) fn reload(&mut self) {
        self.state.needs_reload = false;

        match self.context.category_service().list() {
            Ok(categories) => {
                self.controller
                    .set_categories(categories.iter().filter_map(|c| c.id).collect());
                self.sort.set_item_count(categories.len());
                self.state.categories = categories;
            }
            Err(err) => {
                log::error!("Failed to load categories: {:#}", err);
                self.toasts.error("Couldn't load categories");
            }
        }

        let date = self.controller.date();
        match self.context.slot_service().get_by_date(date) {
            Ok(slots) => self.controller.on_data_loaded(&slots),
            Err(err) => {
                log::error!("Failed to load slots for {}: {:#}", date, err);
                self.toasts.error(format!("Couldn't load {}", date::format_display_date(date)));
            }
        }
    }
}
