//! Fire-and-forget mutation queue.
//!
//! The grid never waits on storage. Commands are handed to a single worker
//! thread that owns its own connection and applies them strictly in
//! submission order, so the last write for a slot always wins. Outcomes flow
//! back over a channel; failures are reported, never retried or rolled back.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::gateway::SlotMutationGateway;

/// One storage write requested by the interaction layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotCommand {
    Upsert {
        date: NaiveDate,
        slot_index: usize,
        category_id: i64,
        note: Option<String>,
    },
    Remove {
        date: NaiveDate,
        slot_index: usize,
    },
    /// Slot indexes are kept in ascending order.
    BulkAssign {
        date: NaiveDate,
        slot_indexes: Vec<usize>,
        category_id: i64,
    },
    BulkRemove {
        date: NaiveDate,
        slot_indexes: Vec<usize>,
    },
    UpdateNote {
        slot_id: i64,
        note: String,
    },
    ReorderCategories {
        ordered_ids: Vec<i64>,
    },
}

impl SlotCommand {
    pub fn apply<G: SlotMutationGateway + ?Sized>(&self, gateway: &G) -> Result<()> {
        match self {
            SlotCommand::Upsert {
                date,
                slot_index,
                category_id,
                note,
            } => gateway
                .upsert_slot(*date, *slot_index, *category_id, note.as_deref())
                .map(|_| ()),
            SlotCommand::Remove { date, slot_index } => gateway.remove_slot(*date, *slot_index),
            SlotCommand::BulkAssign {
                date,
                slot_indexes,
                category_id,
            } => gateway.bulk_assign(*date, slot_indexes, *category_id),
            SlotCommand::BulkRemove { date, slot_indexes } => {
                gateway.bulk_remove(*date, slot_indexes)
            }
            SlotCommand::UpdateNote { slot_id, note } => gateway.update_note(*slot_id, note),
            SlotCommand::ReorderCategories { ordered_ids } => {
                gateway.reorder_categories(ordered_ids)
            }
        }
    }

    /// Short user-facing description, used in error notices.
    pub fn describe(&self) -> String {
        match self {
            SlotCommand::Upsert { slot_index, .. } => format!("assign slot {}", slot_index),
            SlotCommand::Remove { slot_index, .. } => format!("clear slot {}", slot_index),
            SlotCommand::BulkAssign { slot_indexes, .. } => {
                format!("assign {} slots", slot_indexes.len())
            }
            SlotCommand::BulkRemove { slot_indexes, .. } => {
                format!("clear {} slots", slot_indexes.len())
            }
            SlotCommand::UpdateNote { .. } => "save note".to_string(),
            SlotCommand::ReorderCategories { .. } => "reorder categories".to_string(),
        }
    }
}

/// Anything that accepts commands. Returns a ticket identifying the
/// submission.
#[cfg_attr(test, mockall::automock)]
pub trait CommandSink {
    fn submit(&mut self, command: SlotCommand) -> u64;
}

impl CommandSink for Vec<SlotCommand> {
    fn submit(&mut self, command: SlotCommand) -> u64 {
        self.push(command);
        self.len() as u64
    }
}

/// Result of one applied command.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub ticket: u64,
    pub command: SlotCommand,
    pub result: Result<(), String>,
}

struct Job {
    ticket: u64,
    command: SlotCommand,
}

pub struct MutationQueue {
    sender: Option<Sender<Job>>,
    outcomes: Receiver<MutationOutcome>,
    worker: Option<JoinHandle<()>>,
    next_ticket: u64,
}

impl MutationQueue {
    /// Start the worker. `open_gateway` runs on the worker thread, so the
    /// gateway itself never crosses threads.
    pub fn spawn<G, F>(open_gateway: F) -> Result<Self>
    where
        G: SlotMutationGateway,
        F: FnOnce() -> Result<G> + Send + 'static,
    {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (outcome_tx, outcome_rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("slot-mutations".to_string())
            .spawn(move || {
                let gateway = match open_gateway() {
                    Ok(gateway) => Some(gateway),
                    Err(err) => {
                        log::error!("Mutation worker could not open storage: {:#}", err);
                        None
                    }
                };

                for job in job_rx {
                    let result = match &gateway {
                        Some(gateway) => job.command.apply(gateway).map_err(|e| format!("{:#}", e)),
                        None => Err("storage is unavailable".to_string()),
                    };

                    if let Err(err) = &result {
                        log::error!("Failed to {}: {}", job.command.describe(), err);
                    }

                    let outcome = MutationOutcome {
                        ticket: job.ticket,
                        command: job.command,
                        result,
                    };
                    if outcome_tx.send(outcome).is_err() {
                        break;
                    }
                }
                log::debug!("Mutation worker stopped");
            })
            .context("Failed to start mutation worker")?;

        Ok(Self {
            sender: Some(job_tx),
            outcomes: outcome_rx,
            worker: Some(worker),
            next_ticket: 1,
        })
    }

    /// Outcomes that arrived since the last call, in completion order.
    pub fn drain_outcomes(&self) -> Vec<MutationOutcome> {
        self.outcomes.try_iter().collect()
    }

    /// Block until the next outcome arrives or the timeout elapses.
    pub fn wait_outcome(&self, timeout: Duration) -> Option<MutationOutcome> {
        self.outcomes.recv_timeout(timeout).ok()
    }
}

impl CommandSink for MutationQueue {
    fn submit(&mut self, command: SlotCommand) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        log::debug!("Queueing #{}: {:?}", ticket, command);
        if let Some(sender) = &self.sender {
            if sender.send(Job { ticket, command }).is_err() {
                log::error!("Mutation worker is gone; dropped command #{}", ticket);
            }
        }
        ticket
    }
}

impl Drop for MutationQueue {
    fn drop(&mut self) {
        // Closing the channel lets the worker finish pending jobs and exit.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Mutation worker panicked");
            }
        }
    }
}
