//! Tests for canvas persistence and import/export.
mod common;
use common::*;
use promptgraph::prelude::*;
use promptgraph::store::{Backend, STORAGE_KEY};

fn settled_chain() -> CanvasState {
    let mut state = chain_state();
    state.csv_blocks.push(people_block("people"));
    state.blocks = settle(&state, &Evaluator::default()).unwrap();
    state
}

#[test]
fn test_memory_store_round_trip() {
    let mut store = MemoryStore::new(MemoryBackend::new());
    assert_eq!(store.load(), None);

    let state = settled_chain();
    store.save(&state);
    assert_eq!(store.backend().len(), 1);
    assert_eq!(store.load(), Some(state));

    store.clear();
    assert_eq!(store.load(), None);
    assert!(store.backend().is_empty());
}

#[test]
fn test_quota_failure_is_swallowed() {
    let mut store = MemoryStore::new(MemoryBackend::with_quota(64));
    store.save(&settled_chain());
    assert_eq!(store.load(), None);
}

#[test]
fn test_quota_error_reports_sizes() {
    let mut backend = MemoryBackend::with_quota(10);
    let err = backend.set("k", "0123456789").unwrap_err();
    assert!(matches!(err, StoreError::QuotaExceeded { needed: 11, quota: 10 }));
}

#[test]
fn test_undecodable_blob_loads_as_absent() {
    let mut backend = MemoryBackend::new();
    backend.set(STORAGE_KEY, "{ not json").unwrap();
    assert_eq!(MemoryStore::new(backend).load(), None);

    let mut backend = MemoryBackend::new();
    backend.set(STORAGE_KEY, "").unwrap();
    assert_eq!(MemoryStore::new(backend).load(), None);
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::with_key(FileBackend::new(dir.path().join("nested")), "canvas");
    assert_eq!(store.load(), None);

    let state = settled_chain();
    store.save(&state);
    assert!(dir.path().join("nested").join("canvas.json").exists());
    assert_eq!(store.load(), Some(state));

    store.clear();
    assert!(!store.backend().path_for("canvas").exists());
    // Clearing an absent key is not an error.
    store.clear();
    assert_eq!(store.load(), None);
}

#[test]
fn test_file_store_write_failure_is_swallowed() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    std::fs::write(&blocker, "a file, not a directory").unwrap();

    let mut store = FileStore::new(FileBackend::new(&blocker));
    store.save(&settled_chain());
    assert_eq!(store.load(), None);
}

#[test]
fn test_serialized_field_names() {
    let state = settled_chain();
    let json: serde_json::Value = serde_json::from_str(&export_text(&state)).unwrap();

    let squares = &json["blocks"][1];
    assert_eq!(squares["functionName"], "square_numbers");
    assert_eq!(squares["isConnected"], true);
    assert_eq!(squares["connectedInput"], "[2,4]");
    assert_eq!(squares["testCases"][0]["useConnectedInput"], true);
    assert_eq!(squares["testCases"][0]["actualOutput"], "[4,16]");
    assert_eq!(json["connections"][0]["sourceBlockId"], "evens");
    assert_eq!(json["csvBlocks"][0]["fileName"], "people.csv");
    assert_eq!(json["zoom"], 1.0);

    // Unset optional fields are omitted.
    let evens = &json["blocks"][0];
    assert!(evens.get("isConnected").is_none());
    assert!(evens.get("connectedInput").is_none());
}

#[test]
fn test_export_is_pretty_and_importable() {
    let state = settled_chain();
    let text = export_text(&state);
    assert!(text.contains("\n  \"blocks\": ["));
    assert_eq!(import_text(&text).unwrap(), state);
}

#[test]
fn test_import_fills_defaults() {
    let text = r#"{
        "blocks": [{"id": "b1", "prompt": "double"}],
        "connections": []
    }"#;
    let state = import_text(text).unwrap();
    assert_eq!(state.zoom, 1.0);
    assert!(state.csv_blocks.is_empty());
    let block = &state.blocks[0];
    assert_eq!(block.function_name, "new_function");
    assert!(!block.has_code());
    assert!(block.test_cases.is_empty());
}

#[test]
fn test_import_rejects_invalid_shapes() {
    assert!(matches!(import_text("nope"), Err(ImportError::Json(_))));
    assert!(matches!(
        import_text(r#"{"connections": []}"#),
        Err(ImportError::MissingBlocks)
    ));
    assert!(matches!(
        import_text(r#"{"blocks": {}, "connections": []}"#),
        Err(ImportError::MissingBlocks)
    ));
    assert!(matches!(
        import_text(r#"{"blocks": []}"#),
        Err(ImportError::MissingConnections)
    ));
    assert!(matches!(
        import_text(r#"{"blocks": [{"prompt": "no id"}], "connections": []}"#),
        Err(ImportError::Malformed(_))
    ));

    let err = import_text(r#"{"blocks": []}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid canvas state: missing connections array"
    );
}
