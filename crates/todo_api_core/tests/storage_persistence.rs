use todo_api_core::{
    BlobStore, ClientConfig, CreateTodoData, MemoryBlobStore, SqliteBlobStore, StorageData,
    TodoApiClient, UpdateTodoData,
};

const KEY: &str = "todo_app_data";

fn config() -> ClientConfig {
    ClientConfig::default().without_latency()
}

#[test]
fn state_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.db");

    {
        let client = TodoApiClient::open(&path, &config()).unwrap();
        client.create_todo(&CreateTodoData::new("first"));
        client.create_todo(&CreateTodoData::new("second"));
        client.delete_todo(2);
    }

    let reopened = TodoApiClient::open(&path, &config()).unwrap();
    let all = reopened.get_all_todos();
    assert_eq!(all.data.len(), 1);
    assert_eq!(all.data[0].title, "first");

    let next = reopened.create_todo(&CreateTodoData::new("third")).data.unwrap();
    assert_eq!(next.id, 3);
}

#[test]
fn construction_initializes_missing_key_and_keeps_existing_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("init.db");

    let client = TodoApiClient::open(&path, &config()).unwrap();
    let raw = SqliteBlobStore::open(&path).unwrap().get(KEY).unwrap();
    assert!(raw.is_some(), "default document should be written on construction");
    client.create_todo(&CreateTodoData::new("kept"));
    drop(client);

    let reopened = TodoApiClient::open(&path, &config()).unwrap();
    let stats = reopened.get_storage_stats().data.unwrap();
    assert_eq!(stats.total_todos, 1);
    assert_eq!(stats.next_id, 2);
}

#[test]
fn persisted_blob_has_document_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shape.db");
    {
        let client = TodoApiClient::open(&path, &config()).unwrap();
        client.create_todo(&CreateTodoData::new("shape"));
    }

    let blob = SqliteBlobStore::open(&path).unwrap();
    let raw = blob.get(KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["nextId"], 2);
    assert!(json["lastUpdated"].is_string());
    assert_eq!(json["todos"][0]["title"], "shape");
    assert_eq!(json["todos"][0]["completed"], false);
}

#[test]
fn custom_storage_key_is_isolated_from_default_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keys.db");
    let custom = config().with_storage_key("work_todos").unwrap();

    {
        let work = TodoApiClient::open(&path, &custom).unwrap();
        work.create_todo(&CreateTodoData::new("work item"));
    }

    let home = TodoApiClient::open(&path, &config()).unwrap();
    assert!(home.get_all_todos().data.is_empty());
    let work = TodoApiClient::open(&path, &custom).unwrap();
    assert_eq!(work.get_all_todos().data.len(), 1);
}

#[test]
fn corrupt_document_is_replaced_by_default() {
    let blob = MemoryBlobStore::new().with_value(KEY, "{\"todos\": [oops");
    let client = TodoApiClient::new(blob, &config()).unwrap();

    let all = client.get_all_todos();
    assert!(all.success);
    assert!(all.data.is_empty());

    let created = client.create_todo(&CreateTodoData::new("fresh")).data.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(client.get_all_todos().data.len(), 1);
}

#[test]
fn document_with_duplicate_ids_is_treated_as_corrupt() {
    let raw = r#"{
        "todos": [
            {"id": 1, "title": "a", "description": "", "completed": false, "priority": "low",
             "createdAt": "2024-01-01T00:00:00.000Z", "updatedAt": "2024-01-01T00:00:00.000Z"},
            {"id": 1, "title": "b", "description": "", "completed": false, "priority": "low",
             "createdAt": "2024-01-01T00:00:00.000Z", "updatedAt": "2024-01-01T00:00:00.000Z"}
        ],
        "nextId": 2,
        "lastUpdated": "2024-01-01T00:00:00.000Z"
    }"#;
    let client = TodoApiClient::new(MemoryBlobStore::new().with_value(KEY, raw), &config()).unwrap();

    assert!(client.get_all_todos().data.is_empty());
}

#[test]
fn document_written_by_original_client_is_readable() {
    let raw = r#"{"todos":[{"id":4,"title":"legacy","description":"from browser","completed":true,"priority":"high","createdAt":"2024-03-01T10:00:00.000Z","updatedAt":"2024-03-02T10:00:00.000Z"}],"nextId":5,"lastUpdated":"2024-03-02T10:00:00.000Z"}"#;
    let client = TodoApiClient::new(MemoryBlobStore::new().with_value(KEY, raw), &config()).unwrap();

    let todo = client.get_todo_by_id(4).data.unwrap();
    assert_eq!(todo.title, "legacy");
    assert!(todo.completed);
    assert_eq!(client.create_todo(&CreateTodoData::new("new")).data.unwrap().id, 5);
}

#[test]
fn quota_rejection_keeps_previous_state_and_counter() {
    let default_size = StorageData::default().to_json().unwrap().len();
    let client =
        TodoApiClient::in_memory(&config().with_capacity(Some(default_size + 200))).unwrap();

    let small = client.create_todo(&CreateTodoData::new("ok"));
    assert!(small.success);

    let big = client.create_todo(&CreateTodoData::new("x".repeat(500)));
    assert!(!big.success);
    assert_eq!(big.message, "Failed to save todo");
    assert!(big.data.is_none());

    let stats = client.get_storage_stats().data.unwrap();
    assert_eq!(stats.total_todos, 1);
    assert_eq!(stats.next_id, 2);

    let update = client.update_todo(1, &UpdateTodoData::default().with_description("y".repeat(500)));
    assert!(!update.success);
    assert_eq!(update.message, "Failed to update todo");
    assert_eq!(client.get_todo_by_id(1).data.unwrap().description, "");
}

#[test]
fn quota_applies_to_sqlite_backed_clients() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quota.db");
    let default_size = StorageData::default().to_json().unwrap().len();
    let client =
        TodoApiClient::open(&path, &config().with_capacity(Some(default_size + 50))).unwrap();

    let response = client.create_todo(&CreateTodoData::new("z".repeat(200)));
    assert!(!response.success);
    assert!(client.get_all_todos().data.is_empty());
}

#[test]
fn stats_storage_size_matches_serialized_document() {
    let client = TodoApiClient::in_memory(&config()).unwrap();
    client.create_todo(&CreateTodoData::new("measure me"));

    let stats = client.get_storage_stats().data.unwrap();
    assert!(stats.storage_size > StorageData::default().to_json().unwrap().len());
}

#[test]
fn client_config_quota_overrides_store_quota() {
    let default_size = StorageData::default().to_json().unwrap().len();
    let unlimited = MemoryBlobStore::new().with_capacity(None);
    let client =
        TodoApiClient::new(unlimited, &config().with_capacity(Some(default_size + 50))).unwrap();

    let response = client.create_todo(&CreateTodoData::new("q".repeat(200)));
    assert!(!response.success);
    assert_eq!(response.message, "Failed to save todo");
    assert!(client.get_all_todos().data.is_empty());

    let relaxed = MemoryBlobStore::new().with_capacity(Some(1));
    let client = TodoApiClient::new(relaxed, &config().with_capacity(None)).unwrap();
    assert!(client.create_todo(&CreateTodoData::new("fits")).success);
}
