use buscan_core::{
    Bus, Document, DocumentStore, FleetService, JsonFileStore, MemoryStore, Route, StoreError,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_file_loads_as_empty_document() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("data.json"));

    let document = store.load().unwrap();
    assert!(document.is_empty());
    assert!(!store.path().exists());
}

#[test]
fn empty_memory_store_loads_as_empty_document() {
    let store = MemoryStore::new();
    assert_eq!(store.load().unwrap(), Document::default());
}

#[test]
fn save_then_load_roundtrip_on_disk() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("data.json"));

    let mut document = Document::default();
    document.routes.insert(
        "Centro".to_string(),
        Route::new(vec!["Plaza".to_string(), "Mercado".to_string()]),
    );
    let mut bus = Bus::new(40, "AVAILABLE");
    bus.route = Some("Centro".to_string());
    document.buses.insert("101".to_string(), bus);
    store.save(&document).unwrap();

    assert_eq!(store.load().unwrap(), document);

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["buses"]["101"]["route"], "Centro");
    assert_eq!(raw["routes"]["Centro"]["stops"][1], "Mercado");
    assert!(raw["fleet"].as_object().unwrap().is_empty());
}

#[test]
fn save_leaves_no_temp_files_behind() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("data.json"));
    let service = FleetService::new(&store);

    service.create_bus("1", 10, None).unwrap();
    service.create_bus("2", 10, None).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("data.json")]);
}

#[test]
fn unparsable_file_is_reported_as_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, "{ \"buses\": { \"101\": ").unwrap();
    let store = JsonFileStore::new(&path);

    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { ref path, .. } if path.ends_with("data.json")));

    let service = FleetService::new(&store);
    let err = service.create_bus("102", 40, None).unwrap_err();
    assert!(err.is_storage_corrupt());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{ \"buses\": { \"101\": "
    );
}

#[test]
fn wrong_value_types_are_reported_as_corrupt() {
    let store = MemoryStore::with_content(r#"{ "buses": { "101": { "capacity": -4, "state": "AVAILABLE" } } }"#);
    let err = store.load().unwrap_err();
    assert!(err.is_corrupt());
}

#[test]
fn save_into_missing_directory_fails_without_creating_it() {
    let dir = tempdir().unwrap();
    let missing_parent = dir.path().join("missing");
    let store = JsonFileStore::new(missing_parent.join("data.json"));

    let err = store.save(&Document::default()).unwrap_err();
    assert!(err.is_write_failure());
    assert!(matches!(err, StoreError::Write { .. }));
    assert!(!missing_parent.exists());
}

#[test]
fn save_onto_directory_is_write_failure_and_spares_sibling_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    let store = JsonFileStore::new(&path);
    let service = FleetService::new(&store);
    service.create_bus("101", 40, None).unwrap();
    let before = fs::read(&path).unwrap();

    // A file cannot be renamed over a non-empty directory.
    let blocked = JsonFileStore::new(dir.path());
    let err = blocked.save(&Document::default()).unwrap_err();
    assert!(err.is_write_failure());

    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(store.load().unwrap().buses.len(), 1);
}

#[cfg(unix)]
#[test]
fn failed_save_keeps_previous_file_content() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("fleet");
    fs::create_dir(&data_dir).unwrap();
    let path = data_dir.join("data.json");
    let store = JsonFileStore::new(&path);
    let service = FleetService::new(&store);
    service.create_bus("101", 40, None).unwrap();
    let before = fs::read(&path).unwrap();

    fs::set_permissions(&data_dir, fs::Permissions::from_mode(0o555)).unwrap();
    // Permission bits do not bind a privileged user.
    if fs::File::create(data_dir.join("writable-check")).is_ok() {
        fs::set_permissions(&data_dir, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = service.create_bus("102", 40, None);
    let after = fs::read(&path).unwrap();
    fs::set_permissions(&data_dir, fs::Permissions::from_mode(0o755)).unwrap();

    let err = result.unwrap_err();
    assert!(err.is_storage_write());
    assert_eq!(after, before);
    assert_eq!(store.load().unwrap().buses.len(), 1);
}

#[test]
fn noop_delete_keeps_file_byte_identical() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    let store = JsonFileStore::new(&path);
    let service = FleetService::new(&store);
    service.create_bus("101", 40, None).unwrap();
    let before = fs::read(&path).unwrap();

    assert!(!service.delete_bus("999").unwrap());
    assert!(!service.delete_route("Nada").unwrap());
    assert!(!service.delete_fleet_item("Nada").unwrap());

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn legacy_data_file_is_readable_and_rewritten_with_current_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(
        &path,
        r#"{
  "buses": { "7": { "numero": "7", "capacidad": 30, "estado": "AVAILABLE", "pasajeros": 3, "ruta": "Sur" } },
  "rutas": { "Sur": { "nombre": "Sur", "paradas": ["Terminal", "Puerto"] } },
  "flota": { "Midi": { "cantidad": 2, "capacidad": 25, "ruta": "" } }
}"#,
    )
    .unwrap();
    let store = JsonFileStore::new(&path);
    let service = FleetService::new(&store);

    assert_eq!(
        service.route_stops("Sur").unwrap(),
        Some(vec!["Terminal".to_string(), "Puerto".to_string()])
    );
    service.create_bus("8", 30, Some("Sur")).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.get("rutas").is_none());
    assert_eq!(raw["routes"]["Sur"]["stops"][0], "Terminal");
    assert_eq!(raw["buses"]["7"]["passengers"], 3);
    assert!(raw["fleet"]["Midi"]["route"].is_null());
}
