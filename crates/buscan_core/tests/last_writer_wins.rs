use buscan_core::{Bus, DocumentStore, FleetService, JsonFileStore, MemoryStore, Route};
use tempfile::tempdir;

#[test]
fn interleaved_load_save_keeps_only_second_writer() {
    let store = MemoryStore::new();
    let service = FleetService::new(&store);
    service.create_bus("101", 40, None).unwrap();

    let mut view_a = store.load().unwrap();
    let mut view_b = store.load().unwrap();

    view_a.buses.insert("A-1".to_string(), Bus::new(30, "AVAILABLE"));
    view_b
        .routes
        .insert("B-Route".to_string(), Route::new(vec!["Stop".to_string()]));

    store.save(&view_a).unwrap();
    store.save(&view_b).unwrap();

    let persisted = store.load().unwrap();
    assert_eq!(persisted, view_b);
    assert!(!persisted.buses.contains_key("A-1"));
    assert!(persisted.routes.contains_key("B-Route"));
}

#[test]
fn two_services_on_one_file_do_not_merge_stale_views() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    let dialog_a = FleetService::new(JsonFileStore::new(&path));
    let dialog_b = FleetService::new(JsonFileStore::new(&path));

    dialog_a.create_bus("101", 40, None).unwrap();
    let stale = dialog_b.load_document().unwrap();
    dialog_a.create_bus("102", 40, None).unwrap();

    // A caller writing back an old snapshot silently drops bus 102.
    dialog_b.store().save(&stale).unwrap();

    let numbers: Vec<String> = dialog_a
        .list_buses()
        .unwrap()
        .into_iter()
        .map(|(number, _)| number)
        .collect();
    assert_eq!(numbers, vec!["101"]);
}

#[test]
fn every_operation_reloads_instead_of_caching() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    let dialog_a = FleetService::new(JsonFileStore::new(&path));
    let dialog_b = FleetService::new(JsonFileStore::new(&path));

    dialog_a.create_bus("101", 40, None).unwrap();
    dialog_b.create_bus("102", 40, None).unwrap();

    assert_eq!(dialog_a.list_buses().unwrap().len(), 2);
    assert!(dialog_b.get_bus("101").unwrap().is_some());
}
