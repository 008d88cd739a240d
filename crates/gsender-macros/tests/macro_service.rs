use gsender_core::{AppEvent, EventBus, EventCategory, EventFilter, MacroEvent};
use gsender_macros::{Column, MacroMove, MacroPatch, MacroService, NewMacro, Paging};
use gsender_store::{keys, ConfigStore};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;

fn service() -> (MacroService, Arc<ConfigStore>) {
    let store = Arc::new(ConfigStore::in_memory());
    (MacroService::new(store.clone()), store)
}

fn create(service: &MacroService, name: &str) -> gsender_macros::MacroRecord {
    service.create(NewMacro::new(name, "G0 X0 Y0")).unwrap()
}

#[test]
fn test_create_balances_columns() {
    let (service, _) = service();
    let a = create(&service, "A");
    let b = create(&service, "B");
    let c = create(&service, "C");

    assert_eq!((a.column, a.row_index), (Column::Column1, 0));
    assert_eq!((b.column, b.row_index), (Column::Column2, 0));
    assert_eq!((c.column, c.row_index), (Column::Column1, 1));
    assert_eq!(a.description, "");
}

#[test]
fn test_create_rejects_blank_fields_without_persisting() {
    let (service, store) = service();

    let err = service.create(NewMacro::new("   ", "G0")).unwrap_err();
    assert!(err.is_bad_request());
    assert!(err.to_string().contains("\"name\""));

    let err = service.create(NewMacro::new("Home", "")).unwrap_err();
    assert!(err.to_string().contains("\"content\""));

    assert!(!store.has(keys::MACROS));
}

#[test]
fn test_read_update_delete() {
    let (service, _) = service();
    let record = service
        .create(NewMacro::new("Probe Z", "G38.2 Z-10 F100").with_description("touch plate"))
        .unwrap();

    let read = service.read(&record.id).unwrap();
    assert_eq!(read, record);

    let updated = service
        .update(
            &record.id,
            MacroPatch {
                content: Some(String::new()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.content, "");
    assert_eq!(updated.name, "Probe Z");
    assert_eq!(updated.description, "touch plate");
    assert!(updated.mtime > record.mtime);

    service.delete(&record.id).unwrap();
    assert!(service.read(&record.id).unwrap_err().is_not_found());
    assert!(service.delete(&record.id).unwrap_err().is_not_found());
}

#[test]
fn test_delete_unknown_leaves_list_unchanged() {
    let (service, _) = service();
    create(&service, "A");
    create(&service, "B");

    assert!(service.delete("missing").is_err());
    assert_eq!(service.list(None).unwrap().records.len(), 2);
}

#[test]
fn test_list_pages_in_insertion_order() {
    let (service, _) = service();
    let names: Vec<String> = (0..25).map(|i| format!("M{i:02}")).collect();
    for name in &names {
        create(&service, name);
    }

    let listing = service
        .list(Some(Paging {
            page: 3,
            page_length: 10,
        }))
        .unwrap();
    let pagination = listing.pagination.unwrap();
    assert_eq!(pagination.page, 3);
    assert_eq!(pagination.total_records, 25);
    let listed: Vec<&str> = listing.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(listed, names[20..].iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn test_list_migrates_legacy_records_once() {
    let store = Arc::new(ConfigStore::in_memory());
    store
        .set(
            keys::MACROS,
            &json!([
                {"name": "Home", "content": "$H"},
                {"name": "Zero", "content": "G10 L20 P1 X0"},
                {"id": "keep", "mtime": 3, "name": "Park", "content": "G53 G0 Z0",
                 "description": "park", "column": "column2", "rowIndex": 5}
            ]),
        )
        .unwrap();

    let changes = Arc::new(Mutex::new(0));
    let counter = changes.clone();
    store.events().subscribe(EventFilter::Categories(vec![EventCategory::Config]), move |_| {
        *counter.lock() += 1;
    });

    let service = MacroService::new(store.clone());
    let records = service.list(None).unwrap().records;

    assert_eq!(records[0].column, Column::Column1);
    assert_eq!(records[1].column, Column::Column2);
    assert_eq!(records[1].row_index, 0);
    assert_eq!(records[0].description, " ");
    assert_eq!(records[2].id, "keep");
    assert_eq!(records[2].row_index, 5);

    // Write-back is silent and stable.
    assert_eq!(*changes.lock(), 0);
    let stored = store.get_value(keys::MACROS).unwrap();
    assert_eq!(stored[0]["id"], json!(records[0].id));

    let again = service.list(None).unwrap().records;
    assert_eq!(again, records);
}

#[test]
fn test_unreadable_entry_survives_writes() {
    let store = Arc::new(ConfigStore::in_memory());
    store
        .set(
            keys::MACROS,
            &json!([
                {"id": "m1", "mtime": 1, "name": "Home", "content": "$H",
                 "description": "", "column": "column1", "rowIndex": 0},
                {"name": ["not", "a", "name"]}
            ]),
        )
        .unwrap();

    let service = MacroService::new(store.clone());
    assert_eq!(service.list(None).unwrap().records.len(), 1);
    let record = create(&service, "Zero");
    service.update(&record.id, MacroPatch::default()).unwrap();

    let stored = store.get_value(keys::MACROS).unwrap();
    let stored = stored.as_array().unwrap();
    assert_eq!(stored.len(), 3);
    assert!(stored.contains(&json!({"name": ["not", "a", "name"]})));
}

#[test]
fn test_concurrent_writers_do_not_lose_records() {
    let (service, _) = service();
    std::thread::scope(|scope| {
        for thread in 0..8 {
            let service = &service;
            scope.spawn(move || {
                for n in 0..25 {
                    create(service, &format!("M{thread}-{n}"));
                }
            });
        }
    });

    let records = service.list(None).unwrap().records;
    assert_eq!(records.len(), 200);
    let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), 200);

    // Interleaved deletes and moves go through the same lock.
    let victims: Vec<String> = records.iter().step_by(2).map(|r| r.id.clone()).collect();
    let mover = records[1].id.clone();
    std::thread::scope(|scope| {
        for chunk in victims.chunks(25) {
            let service = &service;
            scope.spawn(move || {
                for id in chunk {
                    service.delete(id).unwrap();
                }
            });
        }
        let service = &service;
        let mover = mover.clone();
        scope.spawn(move || {
            for index in 0..10 {
                service
                    .reorder(MacroMove {
                        id: mover.clone(),
                        column: Column::Column2,
                        index,
                    })
                    .unwrap();
            }
        });
    });

    let remaining = service.list(None).unwrap().records;
    assert_eq!(remaining.len(), 100);
    assert!(remaining.iter().any(|r| r.id == mover));
}

#[test]
fn test_reorder_moves_and_renumbers() {
    let (service, _) = service();
    let a = create(&service, "A");
    let b = create(&service, "B");
    let c = create(&service, "C");

    let reordered = service
        .reorder(MacroMove {
            id: c.id.clone(),
            column: Column::Column2,
            index: 0,
        })
        .unwrap();

    let column2: Vec<&str> = reordered
        .iter()
        .filter(|r| r.column == Column::Column2)
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(column2, vec!["C", "B"]);

    let stored = service.read(&a.id).unwrap();
    assert_eq!(stored.mtime, a.mtime);
    let moved = service.read(&b.id).unwrap();
    assert_eq!(moved.row_index, 1);
    assert!(moved.mtime > b.mtime);
}

#[test]
fn test_mutations_publish_macro_events() {
    let bus = Arc::new(EventBus::new());
    let store = Arc::new(ConfigStore::in_memory().with_event_bus(bus.clone()));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    bus.subscribe(EventFilter::Categories(vec![EventCategory::Macro]), move |event| {
        sink.lock().push(event.clone());
    });

    let service = MacroService::new(store);
    let record = create(&service, "A");
    service.update(&record.id, MacroPatch::default()).unwrap();
    service.delete(&record.id).unwrap();

    let seen = seen.lock();
    assert_eq!(
        *seen,
        vec![
            AppEvent::Macro(MacroEvent::Created { id: record.id.clone() }),
            AppEvent::Macro(MacroEvent::Updated { id: record.id.clone() }),
            AppEvent::Macro(MacroEvent::Deleted { id: record.id.clone() }),
        ]
    );
}

#[test]
fn test_save_failure_is_internal_with_payload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sender_rc.json");
    let store = Arc::new(ConfigStore::open(&path).unwrap());
    std::fs::create_dir(&path).unwrap();

    let service = MacroService::new(store);
    let err = service.create(NewMacro::new("A", "G0")).unwrap_err();
    match err {
        gsender_core::Error::Internal { payload, .. } => {
            let payload = payload.unwrap();
            assert_eq!(payload[0]["name"], json!("A"));
        }
        other => panic!("expected internal error, got {other:?}"),
    }
}
