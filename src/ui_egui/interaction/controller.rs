//! Keyboard, click and drag state for one day's slot grid.
//!
//! Owns focus, the range selection and its anchor, the open editor and the
//! drag-select engine. Assignments are turned into [`SlotCommand`]s and
//! handed to a [`CommandSink`]; local state moves on immediately and is
//! never rolled back when a command later fails.

use chrono::NaiveDate;
use egui::{Key, Modifiers, Pos2};
use std::collections::{BTreeMap, BTreeSet};

use super::drag_select::{DragEnd, DragSelectEngine, SelectionChange};
use super::hit_test::{HitTest, ScrollViewport};
use super::pointer::{PointerDown, PointerId, ScrollLock};
use super::range::build_range;
use super::shortcuts::category_index_from_char;
use crate::models::settings::AutoScrollSettings;
use crate::models::slot::{TimeSlot, LAST_SLOT, SLOTS_PER_DAY};
use crate::services::slot::queue::{CommandSink, SlotCommand};

/// Keys the grid reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridKey {
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Char(char),
    Other,
}

impl From<Key> for GridKey {
    fn from(key: Key) -> Self {
        match key {
            Key::Escape => GridKey::Escape,
            Key::ArrowUp => GridKey::ArrowUp,
            Key::ArrowDown => GridKey::ArrowDown,
            Key::ArrowLeft => GridKey::ArrowLeft,
            Key::ArrowRight => GridKey::ArrowRight,
            Key::Enter => GridKey::Enter,
            Key::Space => GridKey::Space,
            other => {
                let mut chars = other.name().chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => GridKey::Char(c.to_ascii_lowercase()),
                    _ => GridKey::Other,
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Handled,
    /// Escape inside a text field: the shell should drop text focus.
    BlurTextField,
}

/// The controller's local view of one slot. `id` is `None` for slots
/// assigned locally whose row has not been reloaded yet.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotEntry {
    pub id: Option<i64>,
    pub category_id: i64,
    pub note: Option<String>,
}

impl From<&TimeSlot> for SlotEntry {
    fn from(slot: &TimeSlot) -> Self {
        Self {
            id: Some(slot.id),
            category_id: slot.category_id,
            note: slot.note.clone(),
        }
    }
}

pub struct GridInteractionController {
    date: NaiveDate,
    focused: usize,
    selection: BTreeSet<usize>,
    anchor: Option<usize>,
    editor: Option<usize>,
    note_draft: String,
    slots: BTreeMap<usize, SlotEntry>,
    categories: Vec<i64>,
    initialized_for: Option<NaiveDate>,
    scroll_request: Option<usize>,
    grid_focus_requested: bool,
    drag: DragSelectEngine,
}

impl GridInteractionController {
    pub fn new(date: NaiveDate, settings: AutoScrollSettings, scroll_lock: ScrollLock) -> Self {
        Self {
            date,
            focused: 0,
            selection: BTreeSet::new(),
            anchor: None,
            editor: None,
            note_draft: String::new(),
            slots: BTreeMap::new(),
            categories: Vec::new(),
            initialized_for: None,
            scroll_request: None,
            grid_focus_requested: false,
            drag: DragSelectEngine::new(settings, scroll_lock),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn focused_slot(&self) -> usize {
        self.focused
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn editor_slot(&self) -> Option<usize> {
        self.editor
    }

    pub fn note_draft(&self) -> &str {
        &self.note_draft
    }

    pub fn slot(&self, index: usize) -> Option<&SlotEntry> {
        self.slots.get(&index)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Whether a drag wants animation frames for auto-scroll.
    pub fn needs_frames(&self) -> bool {
        self.drag.needs_frames()
    }

    /// Slots selected for bulk operations; only offered for two or more.
    pub fn multi_selection(&self) -> Option<Vec<usize>> {
        (self.selection.len() >= 2).then(|| self.selection.iter().copied().collect())
    }

    /// Slot the shell should scroll into view, taken once.
    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.scroll_request.take()
    }

    /// Whether the grid should regain keyboard focus, taken once.
    pub fn take_grid_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.grid_focus_requested)
    }

    /// Switch day. Selection, anchor and editor belong to the old day.
    pub fn set_date(&mut self, date: NaiveDate) {
        if date == self.date {
            return;
        }
        self.drag.cancel();
        self.date = date;
        self.focused = 0;
        self.selection.clear();
        self.anchor = None;
        self.editor = None;
        self.note_draft.clear();
        self.slots.clear();
    }

    /// Category ids in shortcut order.
    pub fn set_categories(&mut self, ids: Vec<i64>) {
        self.categories = ids;
    }

    /// Fresh slot rows for the current date. The first load for a date
    /// opens the editor at the earliest empty slot.
    pub fn on_data_loaded(&mut self, slots: &[TimeSlot]) {
        let date = self.date;
        self.slots = slots
            .iter()
            .filter(|slot| slot.date == date)
            .map(|slot| (slot.slot_index, SlotEntry::from(slot)))
            .collect();

        if self.initialized_for == Some(self.date) {
            return;
        }
        self.initialized_for = Some(self.date);

        let first_empty = (0..SLOTS_PER_DAY)
            .find(|index| !self.slots.contains_key(index))
            .unwrap_or(0);
        log::debug!("Grid for {} opens at slot {}", self.date, first_empty);
        self.open_editor(first_empty);
        self.scroll_request = Some(first_empty);
        self.grid_focus_requested = true;
    }

    pub fn handle_key(
        &mut self,
        key: GridKey,
        modifiers: Modifiers,
        text_field_focused: bool,
        sink: &mut dyn CommandSink,
    ) -> KeyOutcome {
        if key == GridKey::Escape {
            self.drag.cancel();
        }

        if text_field_focused {
            return if key == GridKey::Escape {
                KeyOutcome::BlurTextField
            } else {
                KeyOutcome::Ignored
            };
        }

        if key == GridKey::Escape {
            if self.editor.is_some() {
                self.close_editor();
            } else if !self.selection.is_empty() {
                self.clear_selection();
            }
            return KeyOutcome::Handled;
        }

        if modifiers.ctrl || modifiers.alt || modifiers.command || modifiers.mac_cmd {
            return KeyOutcome::Ignored;
        }

        match key {
            GridKey::ArrowUp => {
                self.move_focus(-1, modifiers.shift);
                KeyOutcome::Handled
            }
            GridKey::ArrowDown => {
                self.move_focus(1, modifiers.shift);
                KeyOutcome::Handled
            }
            GridKey::Enter | GridKey::Space => {
                self.open_editor(self.focused);
                KeyOutcome::Handled
            }
            // Shift turns a digit into a symbol, so it is not a shortcut.
            GridKey::Char(c) if modifiers.shift && c.is_ascii_digit() => KeyOutcome::Ignored,
            GridKey::Char(c) => {
                let category_id = category_index_from_char(c)
                    .and_then(|index| self.categories.get(index).copied());
                match category_id {
                    Some(category_id) => {
                        self.apply_shortcut(category_id, sink);
                        KeyOutcome::Handled
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Plain click. Returns false when the click is the tail of a drag.
    pub fn handle_click(&mut self, slot: usize) -> bool {
        if self.drag.click_suppressed() {
            return false;
        }
        self.selection.clear();
        self.anchor = Some(slot);
        self.open_editor(slot);
        true
    }

    pub fn handle_shift_click(&mut self, slot: usize) {
        match self.anchor {
            None => {
                self.anchor = Some(slot);
                self.selection = BTreeSet::from([slot]);
            }
            Some(anchor) => {
                self.focused = slot;
                self.set_selection(build_range(anchor, slot));
            }
        }
        self.release_stale_editor();
    }

    /// Pick a category in the open editor: assign it with the current note,
    /// then move on to the next slot.
    pub fn select_category(&mut self, category_id: i64, sink: &mut dyn CommandSink) -> bool {
        let Some(slot) = self.editor else {
            return false;
        };
        let note = (!self.note_draft.is_empty()).then(|| self.note_draft.clone());
        self.submit(
            sink,
            SlotCommand::Upsert {
                date: self.date,
                slot_index: slot,
                category_id,
                note,
            },
        );
        self.advance_from(slot);
        true
    }

    pub fn set_note_draft(&mut self, note: impl Into<String>) {
        self.note_draft = note.into();
    }

    /// Save the note draft if it differs from the stored note. Only slots
    /// that already exist in storage carry notes.
    pub fn commit_note(&mut self, sink: &mut dyn CommandSink) -> bool {
        let Some(slot) = self.editor else {
            return false;
        };
        let Some(entry) = self.slots.get(&slot) else {
            return false;
        };
        let Some(slot_id) = entry.id else {
            return false;
        };
        if entry.note.as_deref().unwrap_or("") == self.note_draft {
            return false;
        }
        self.submit(
            sink,
            SlotCommand::UpdateNote {
                slot_id,
                note: self.note_draft.clone(),
            },
        );
        true
    }

    pub fn clear_editor_slot(&mut self, sink: &mut dyn CommandSink) -> bool {
        let Some(slot) = self.editor else {
            return false;
        };
        self.submit(
            sink,
            SlotCommand::Remove {
                date: self.date,
                slot_index: slot,
            },
        );
        self.close_editor();
        true
    }

    pub fn bulk_assign_selection(&mut self, category_id: i64, sink: &mut dyn CommandSink) -> bool {
        let Some(slot_indexes) = self.multi_selection() else {
            return false;
        };
        self.submit(
            sink,
            SlotCommand::BulkAssign {
                date: self.date,
                slot_indexes,
                category_id,
            },
        );
        self.clear_selection();
        true
    }

    pub fn bulk_clear_selection(&mut self, sink: &mut dyn CommandSink) -> bool {
        let Some(slot_indexes) = self.multi_selection() else {
            return false;
        };
        self.submit(
            sink,
            SlotCommand::BulkRemove {
                date: self.date,
                slot_indexes,
            },
        );
        self.clear_selection();
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.anchor = None;
    }

    pub fn open_editor(&mut self, slot: usize) {
        let slot = slot.min(LAST_SLOT);
        self.note_draft = self
            .slots
            .get(&slot)
            .and_then(|entry| entry.note.clone())
            .unwrap_or_default();
        self.focused = slot;
        self.editor = Some(slot);
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
        self.grid_focus_requested = true;
    }

    // Pointer routing. Each call applies any selection change synchronously.

    pub fn begin_frame(&mut self) {
        self.drag.begin_frame();
    }

    pub fn pointer_down(&mut self, event: PointerDown, surface: &impl HitTest) -> bool {
        let change = self.drag.pointer_down(event, self.focused, surface);
        self.apply_selection_change(change)
    }

    pub fn pointer_move(&mut self, pointer_id: PointerId, pos: Pos2, surface: &impl HitTest) -> bool {
        let change = self.drag.pointer_move(pointer_id, pos, surface);
        self.apply_selection_change(change)
    }

    pub fn tick<V: ScrollViewport + ?Sized>(&mut self, viewport: Option<&mut V>) -> bool {
        let change = self.drag.tick(viewport);
        self.apply_selection_change(change)
    }

    pub fn pointer_up(&mut self, pointer_id: PointerId) -> Option<DragEnd> {
        self.drag.pointer_up(pointer_id)
    }

    pub fn pointer_cancel(&mut self, pointer_id: PointerId) -> Option<DragEnd> {
        self.drag.pointer_cancel(pointer_id)
    }

    fn apply_selection_change(&mut self, change: Option<SelectionChange>) -> bool {
        let Some(change) = change else {
            return false;
        };
        self.anchor = Some(change.anchor);
        self.set_selection(change.selection);
        true
    }

    fn set_selection(&mut self, selection: BTreeSet<usize>) {
        if selection.len() > 1 {
            self.editor = None;
        }
        self.selection = selection;
    }

    fn release_stale_editor(&mut self) {
        if self.editor.is_some_and(|slot| slot != self.focused) {
            self.editor = None;
        }
    }

    fn move_focus(&mut self, delta: i64, extend: bool) {
        let previous = self.focused;
        let next = (previous as i64 + delta).clamp(0, LAST_SLOT as i64) as usize;
        self.focused = next;
        self.scroll_request = Some(next);

        if extend {
            let anchor = *self.anchor.get_or_insert(previous);
            self.set_selection(build_range(anchor, next));
            self.release_stale_editor();
        } else {
            self.open_editor(next);
        }
    }

    /// A shortcut replaces the whole slot: category set, note cleared. Over
    /// a selection that is one upsert per slot, in slot order.
    fn apply_shortcut(&mut self, category_id: i64, sink: &mut dyn CommandSink) {
        if !self.selection.is_empty() {
            let slot_indexes: Vec<usize> = self.selection.iter().copied().collect();
            for slot_index in slot_indexes {
                self.submit(
                    sink,
                    SlotCommand::Upsert {
                        date: self.date,
                        slot_index,
                        category_id,
                        note: None,
                    },
                );
            }
            self.clear_selection();
            return;
        }

        let slot = self.focused;
        self.submit(
            sink,
            SlotCommand::Upsert {
                date: self.date,
                slot_index: slot,
                category_id,
                note: None,
            },
        );
        self.advance_from(slot);
    }

    fn advance_from(&mut self, slot: usize) {
        let next = (slot + 1).min(LAST_SLOT);
        self.open_editor(next);
        self.scroll_request = Some(next);
    }

    fn submit(&mut self, sink: &mut dyn CommandSink, command: SlotCommand) -> u64 {
        self.apply_locally(&command);
        sink.submit(command)
    }

    /// Mirror a command in the local slot map so the grid shows it before
    /// storage is reloaded.
    fn apply_locally(&mut self, command: &SlotCommand) {
        match command {
            SlotCommand::Upsert {
                slot_index,
                category_id,
                note,
                ..
            } => {
                let id = self.slots.get(slot_index).and_then(|entry| entry.id);
                self.slots.insert(
                    *slot_index,
                    SlotEntry {
                        id,
                        category_id: *category_id,
                        note: note.clone(),
                    },
                );
            }
            SlotCommand::BulkAssign {
                slot_indexes,
                category_id,
                ..
            } => {
                for index in slot_indexes {
                    let entry = self.slots.entry(*index).or_insert(SlotEntry {
                        id: None,
                        category_id: *category_id,
                        note: None,
                    });
                    entry.category_id = *category_id;
                }
            }
            SlotCommand::Remove { slot_index, .. } => {
                self.slots.remove(slot_index);
            }
            SlotCommand::BulkRemove { slot_indexes, .. } => {
                for index in slot_indexes {
                    self.slots.remove(index);
                }
            }
            SlotCommand::UpdateNote { slot_id, note } => {
                if let Some(entry) = self.slots.values_mut().find(|e| e.id == Some(*slot_id)) {
                    entry.note = (!note.is_empty()).then(|| note.clone());
                }
            }
            SlotCommand::ReorderCategories { .. } => {}
        }
    }
}

/// Scroll offset that brings `slot` into view: centred in the viewport,
/// or resting just above a panel docked over the bottom `bottom_inset`
/// points.
pub fn scroll_offset_for_slot(
    slot: usize,
    row_height: f32,
    viewport_height: f32,
    bottom_inset: f32,
) -> f32 {
    let row_top = slot as f32 * row_height;
    let offset = if bottom_inset > 0.0 {
        row_top - (viewport_height - bottom_inset) + row_height
    } else {
        row_top - viewport_height / 2.0 + row_height / 2.0
    };
    offset.max(0.0)
}
