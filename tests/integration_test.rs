// Integration tests: the grid controller driving the mutation queue
// against a real SQLite file

mod fixtures;

use egui::Modifiers;
use fixtures::{dates, grid, TempStore};
use pretty_assertions::assert_eq;
use slotlog::models::settings::AppConfig;
use slotlog::services::category::CategoryService;
use slotlog::services::goal::WeeklyGoalService;
use slotlog::services::settings::ConfigService;
use slotlog::services::slot::gateway::SqliteGateway;
use slotlog::services::slot::queue::{CommandSink, MutationOutcome, MutationQueue, SlotCommand};
use slotlog::services::slot::SlotService;
use slotlog::ui_egui::interaction::drag_select::DragEnd;
use slotlog::ui_egui::interaction::{GridKey, KeyOutcome, PointerDown, MOUSE_POINTER};
use std::time::Duration;

fn spawn_queue(store: &TempStore) -> MutationQueue {
    let path = store.path.clone();
    MutationQueue::spawn(move || SqliteGateway::open(&path)).expect("Failed to start queue")
}

/// Wait for `count` outcomes, failing the test on a timeout.
fn wait_for(queue: &MutationQueue, count: usize) -> Vec<MutationOutcome> {
    (0..count)
        .map(|_| {
            queue
                .wait_outcome(Duration::from_secs(5))
                .expect("Mutation did not finish in time")
        })
        .collect()
}

#[test]
fn test_queue_applies_in_submission_order() {
    let store = TempStore::new();
    let ids = store.category_ids();
    let date = dates::monday();
    let mut queue = spawn_queue(&store);

    let first = queue.submit(SlotCommand::Upsert {
        date,
        slot_index: 10,
        category_id: ids[0],
        note: Some("draft".to_string()),
    });
    queue.submit(SlotCommand::Remove { date, slot_index: 10 });
    let last = queue.submit(SlotCommand::Upsert {
        date,
        slot_index: 10,
        category_id: ids[1],
        note: None,
    });

    let outcomes = wait_for(&queue, 3);
    let tickets: Vec<u64> = outcomes.iter().map(|o| o.ticket).collect();
    assert_eq!(tickets, vec![first, first + 1, last]);
    assert!(outcomes.iter().all(|o| o.result.is_ok()));

    let slots = SlotService::new(store.db.connection())
        .get_by_date(date)
        .unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].slot_index, 10);
    assert_eq!(slots[0].category_id, ids[1]);
    assert_eq!(slots[0].note, None);
}

#[test]
fn test_drag_select_then_shortcut_assigns_range() {
    let store = TempStore::new();
    let ids = store.category_ids();
    let date = dates::monday();
    let mut queue = spawn_queue(&store);

    let mut controller = fixtures::controller(date, ids.clone());
    controller.on_data_loaded(&[]);
    assert!(controller.handle_click(2));

    let geometry = grid::geometry(0.0);
    controller.begin_frame();
    assert!(controller.pointer_down(
        PointerDown::mouse(grid::slot_center(2, 0.0)),
        &geometry
    ));
    assert!(controller.pointer_move(MOUSE_POINTER, grid::slot_center(5, 0.0), &geometry));
    assert_eq!(
        controller.pointer_up(MOUSE_POINTER),
        Some(DragEnd::Released { anchor: 2, last: 5 })
    );
    // The release click that follows a real drag is swallowed.
    assert!(!controller.handle_click(5));

    controller.begin_frame();
    let outcome = controller.handle_key(GridKey::Char('3'), Modifiers::NONE, false, &mut queue);
    assert_eq!(outcome, KeyOutcome::Handled);
    assert!(controller.selection().is_empty());

    let outcomes = wait_for(&queue, 4);
    let assigned: Vec<usize> = outcomes
        .iter()
        .map(|outcome| match &outcome.command {
            SlotCommand::Upsert {
                slot_index,
                category_id,
                note,
                ..
            } => {
                assert_eq!(*category_id, ids[3]);
                assert_eq!(*note, None);
                *slot_index
            }
            other => panic!("unexpected command {:?}", other),
        })
        .collect();
    assert_eq!(assigned, vec![2, 3, 4, 5]);
    assert!(outcomes.iter().all(|o| o.result.is_ok()));

    let slots = SlotService::new(store.db.connection())
        .get_by_date(date)
        .unwrap();
    let logged: Vec<(usize, i64)> = slots.iter().map(|s| (s.slot_index, s.category_id)).collect();
    assert_eq!(logged, vec![(2, ids[3]), (3, ids[3]), (4, ids[3]), (5, ids[3])]);
}

#[test]
fn test_editor_flow_saves_category_and_note() {
    let store = TempStore::new();
    let ids = store.category_ids();
    let date = dates::monday();
    let mut queue = spawn_queue(&store);

    let mut controller = fixtures::controller(date, ids.clone());
    controller.on_data_loaded(&[]);
    assert_eq!(controller.editor_slot(), Some(0));

    controller.set_note_draft("standup");
    assert!(controller.select_category(ids[2], &mut queue));
    assert_eq!(controller.editor_slot(), Some(1));
    wait_for(&queue, 1);

    // Reload the way the app does once the queue is idle.
    let slots = SlotService::new(store.db.connection())
        .get_by_date(date)
        .unwrap();
    controller.on_data_loaded(&slots);
    assert_eq!(controller.editor_slot(), Some(1), "reload must not re-open at a new slot");

    controller.handle_click(0);
    assert_eq!(controller.note_draft(), "standup");
    controller.set_note_draft("standup and planning");
    assert!(controller.commit_note(&mut queue));
    wait_for(&queue, 1);

    let slot = SlotService::new(store.db.connection())
        .find(date, 0)
        .unwrap()
        .expect("slot 0 was logged");
    assert_eq!(slot.category_id, ids[2]);
    assert_eq!(slot.note.as_deref(), Some("standup and planning"));
}

#[test]
fn test_failed_command_is_reported_not_retried() {
    let store = TempStore::new();
    let mut queue = spawn_queue(&store);

    let ticket = queue.submit(SlotCommand::UpdateNote {
        slot_id: 9999,
        note: "orphan".to_string(),
    });

    let outcomes = wait_for(&queue, 1);
    assert_eq!(outcomes[0].ticket, ticket);
    assert!(outcomes[0].result.is_err());
    assert!(queue.wait_outcome(Duration::from_millis(100)).is_none());
}

#[test]
fn test_category_reorder_through_queue() {
    let store = TempStore::new();
    let mut ids = store.category_ids();
    let mut queue = spawn_queue(&store);

    slotlog::ui_egui::interaction::splice_move(&mut ids, 0, 3);
    queue.submit(SlotCommand::ReorderCategories {
        ordered_ids: ids.clone(),
    });
    assert!(wait_for(&queue, 1)[0].result.is_ok());

    assert_eq!(store.category_ids(), ids);
}

#[test]
fn test_archived_category_loses_shortcut_but_keeps_slots() {
    let store = TempStore::new();
    let ids = store.category_ids();
    let date = dates::monday();
    let slots = SlotService::new(store.db.connection());
    slots.upsert(date, 4, ids[0], None).unwrap();

    CategoryService::new(store.db.connection())
        .archive(ids[0])
        .unwrap();

    let active = store.category_ids();
    assert_eq!(active[0], ids[1]);
    assert_eq!(slots.get_by_date(date).unwrap()[0].category_id, ids[0]);
}

#[test]
fn test_goals_seeded_from_logged_week() {
    let store = TempStore::new();
    let ids = store.category_ids();
    let slots = SlotService::new(store.db.connection());
    // Three half-hours of the first category in the previous week.
    slots
        .bulk_assign(dates::previous_monday(), &[18, 19, 20], ids[0])
        .unwrap();

    let goals = WeeklyGoalService::new(store.db.connection());
    let created = goals
        .seed_from_previous_week(dates::monday(), dates::previous_monday())
        .unwrap();
    assert_eq!(created, 1);

    let week = goals.get_by_week(dates::monday()).unwrap();
    assert_eq!(week.len(), 1);
    assert_eq!(week[0].category_id, ids[0]);
    assert!((week[0].goal_hours - 1.5).abs() < f64::EPSILON);
}

#[test]
fn test_shortcut_clears_stored_note() {
    let store = TempStore::new();
    let ids = store.category_ids();
    let date = dates::monday();
    SlotService::new(store.db.connection())
        .upsert(date, 0, ids[0], Some("standup"))
        .unwrap();
    let mut queue = spawn_queue(&store);

    let mut controller = fixtures::controller(date, ids.clone());
    let slots = SlotService::new(store.db.connection()).get_by_date(date).unwrap();
    controller.on_data_loaded(&slots);
    controller.handle_click(0);

    controller.handle_key(GridKey::Char('1'), Modifiers::NONE, false, &mut queue);
    assert!(wait_for(&queue, 1)[0].result.is_ok());

    let slot = SlotService::new(store.db.connection())
        .find(date, 0)
        .unwrap()
        .expect("slot 0 stays logged");
    assert_eq!(slot.category_id, ids[1]);
    assert_eq!(slot.note, None);
}

#[test]
fn test_week_plan_seeds_then_keeps_edited_goals() {
    let store = TempStore::new();
    let ids = store.category_ids();
    SlotService::new(store.db.connection())
        .bulk_assign(dates::previous_monday(), &[18, 19, 20, 21], ids[1])
        .unwrap();

    let goals = WeeklyGoalService::new(store.db.connection());
    let plan = goals.load_plan(dates::monday()).unwrap();
    assert_eq!(plan.seeded, 1);
    assert_eq!(plan.goal_for(ids[1]), 2.0);
    assert_eq!(plan.previous_for(ids[1]), 2.0);
    assert_eq!(plan.goal_for(ids[0]), 0.0);
    assert_eq!(plan.previous_days_logged, 1);

    goals.upsert(dates::monday(), ids[0], 10.5).unwrap();
    let plan = goals.load_plan(dates::monday()).unwrap();
    assert_eq!(plan.seeded, 0);
    assert_eq!(plan.total_goal_hours(&ids), 12.5);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.grid.row_height = 32.0;
    config.auto_scroll.speed = 6.0;
    config.database_path = Some(dir.path().join("data").join("log.db"));
    ConfigService::save_to(&config, &path).unwrap();

    let loaded = ConfigService::load_from(&path).unwrap();
    assert_eq!(loaded, config);

    let db_path = ConfigService::resolve_database_path(&loaded).unwrap();
    assert!(db_path.parent().unwrap().exists());
}
