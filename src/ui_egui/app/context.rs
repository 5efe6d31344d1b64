use std::collections::HashSet;

use crate::services::category::CategoryService;
use crate::services::database::Database;
use crate::services::goal::WeeklyGoalService;
use crate::services::slot::queue::{CommandSink, MutationOutcome, MutationQueue, SlotCommand};
use crate::services::slot::SlotService;

/// Shared access point for storage: a read connection owned by the UI
/// thread and the queue that applies writes on the worker.
pub struct AppContext {
    database: Database,
    queue: MutationQueue,
    /// Tickets submitted but not yet reported back by the worker
    pending: HashSet<u64>,
}

impl AppContext {
    pub fn new(database: Database, queue: MutationQueue) -> Self {
        Self {
            database,
            queue,
            pending: HashSet::new(),
        }
    }

    pub fn category_service(&self) -> CategoryService<'_> {
        CategoryService::new(self.database.connection())
    }

    pub fn slot_service(&self) -> SlotService<'_> {
        SlotService::new(self.database.connection())
    }

    pub fn goal_service(&self) -> WeeklyGoalService<'_> {
        WeeklyGoalService::new(self.database.connection())
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn drain_outcomes(&mut self) -> Vec<MutationOutcome> {
        let outcomes = self.queue.drain_outcomes();
        for outcome in &outcomes {
            self.pending.remove(&outcome.ticket);
        }
        outcomes
    }
}

impl CommandSink for AppContext {
    fn submit(&mut self, command: SlotCommand) -> u64 {
        let ticket = self.queue.submit(command);
        self.pending.insert(ticket);
        ticket
    }
}
