//! End-to-end tests for the tool pipeline: dispatcher → schema validation →
//! handlers → allow-list, against real temporary directory trees.

use std::fs;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use fsgate::allowlist::AllowList;
use fsgate::dispatch::{Dispatcher, ToolRequest, ToolResponse};

fn dispatcher_for(dirs: &[&TempDir]) -> Dispatcher {
    let allow = AllowList::new(
        dirs.iter()
            .map(|d| d.path().to_string_lossy().into_owned()),
    )
    .unwrap();
    Dispatcher::new(Arc::new(allow))
}

fn call(dispatcher: &Dispatcher, name: &str, arguments: Value) -> ToolResponse {
    dispatcher.dispatch(&ToolRequest {
        name: name.to_string(),
        arguments,
    })
}

fn payload(response: ToolResponse) -> Value {
    match response {
        ToolResponse::Success { payload } => payload,
        ToolResponse::Failure { kind, message } => {
            panic!("expected success, got {kind}: {message}")
        }
    }
}

fn failure_kind(response: ToolResponse) -> String {
    match response {
        ToolResponse::Success { payload } => panic!("expected failure, got {payload}"),
        ToolResponse::Failure { kind, .. } => kind,
    }
}

#[test]
fn test_write_then_read_roundtrip() {
    let dir = TempDir::new().unwrap();
    let d = dispatcher_for(&[&dir]);
    let path = dir.path().join("notes.txt");
    let path = path.to_str().unwrap();
    let content = "line one\nline two\n";

    let written = payload(call(
        &d,
        "write_file",
        json!({ "path": path, "content": content }),
    ));
    assert_eq!(written["operation"], "write");
    assert_eq!(written["success"], true);
    assert_eq!(written["path"], path);

    let read = payload(call(&d, "read_file", json!({ "path": path })));
    assert_eq!(read["content"], content);
    assert_eq!(read["path"], path);
}

#[test]
fn test_append_concatenates() {
    let dir = TempDir::new().unwrap();
    let d = dispatcher_for(&[&dir]);
    let path = dir.path().join("log.txt");
    let path = path.to_str().unwrap();

    payload(call(
        &d,
        "write_file",
        json!({ "path": path, "content": "first", "append": false }),
    ));
    let appended = payload(call(
        &d,
        "write_file",
        json!({ "path": path, "content": "second", "append": true }),
    ));
    assert_eq!(appended["operation"], "append");

    let read = payload(call(&d, "read_file", json!({ "path": path })));
    assert_eq!(read["content"], "firstsecond");
}

#[test]
fn test_write_empty_content_is_valid() {
    let dir = TempDir::new().unwrap();
    let d = dispatcher_for(&[&dir]);
    let path = dir.path().join("empty.txt");
    let path = path.to_str().unwrap();

    payload(call(&d, "write_file", json!({ "path": path, "content": "" })));

    let read = payload(call(&d, "read_file", json!({ "path": path })));
    assert_eq!(read["content"], "");
}

#[test]
fn test_write_missing_content_is_validation_failure() {
    let dir = TempDir::new().unwrap();
    let d = dispatcher_for(&[&dir]);
    let path = dir.path().join("nope.txt");

    let kind = failure_kind(call(
        &d,
        "write_file",
        json!({ "path": path.to_str().unwrap() }),
    ));
    assert_eq!(kind, "validation");
    assert!(!path.exists());
}

#[test]
fn test_write_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let d = dispatcher_for(&[&dir]);
    let path = dir.path().join("a").join("b").join("c.txt");
    let path = path.to_str().unwrap();

    payload(call(
        &d,
        "write_file",
        json!({ "path": path, "content": "nested" }),
    ));

    let read = payload(call(&d, "read_file", json!({ "path": path })));
    assert_eq!(read["content"], "nested");
}

#[test]
fn test_read_missing_file_is_io_failure() {
    let dir = TempDir::new().unwrap();
    let d = dispatcher_for(&[&dir]);
    let path = dir.path().join("absent.txt");

    let kind = failure_kind(call(&d, "read_file", json!({ "path": path.to_str().unwrap() })));
    assert_eq!(kind, "io");
}

#[test]
fn test_outside_allowlist_is_permission_never_io() {
    let dir = TempDir::new().unwrap();
    let d = dispatcher_for(&[&dir]);

    // The path does not exist anywhere; denial must still be permission.
    for (tool, args) in [
        ("read_file", json!({ "path": "/no/such/place/f.txt" })),
        (
            "write_file",
            json!({ "path": "/no/such/place/f.txt", "content": "x" }),
        ),
        ("list_directory", json!({ "path": "/no/such/place" })),
        (
            "search_files",
            json!({ "path": "/no/such/place", "pattern": "x" }),
        ),
    ] {
        let kind = failure_kind(call(&d, tool, args));
        assert_eq!(kind, "permission", "tool {tool}");
    }
}

#[test]
fn test_dotdot_escape_from_write_is_denied() {
    let outer = TempDir::new().unwrap();
    let inner = TempDir::new_in(outer.path()).unwrap();
    let d = dispatcher_for(&[&inner]);

    let escape = format!("{}/../escape.txt", inner.path().display());
    let kind = failure_kind(call(
        &d,
        "write_file",
        json!({ "path": escape, "content": "x" }),
    ));
    assert_eq!(kind, "permission");
    assert!(!outer.path().join("escape.txt").exists());
}

#[test]
fn test_empty_path_is_validation_failure() {
    let dir = TempDir::new().unwrap();
    let d = dispatcher_for(&[&dir]);

    let kind = failure_kind(call(&d, "read_file", json!({ "path": "" })));
    assert_eq!(kind, "validation");
}

#[test]
fn test_wrong_parameter_type_is_validation_failure() {
    let dir = TempDir::new().unwrap();
    let d = dispatcher_for(&[&dir]);

    let kind = failure_kind(call(&d, "read_file", json!({ "path": 42 })));
    assert_eq!(kind, "validation");
}

#[test]
fn test_unknown_tool() {
    let dir = TempDir::new().unwrap();
    let d = dispatcher_for(&[&dir]);

    let kind = failure_kind(call(&d, "fs.format_disk", json!({})));
    assert_eq!(kind, "unknown_tool");
}

#[test]
fn test_list_partitions_directories_before_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::write(dir.path().join("b.txt"), "b").unwrap();
    fs::create_dir(dir.path().join("c")).unwrap();

    let d = dispatcher_for(&[&dir]);
    let listed = payload(call(
        &d,
        "list_directory",
        json!({ "path": dir.path().to_str().unwrap() }),
    ));

    let contents = listed["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0]["name"], "c");
    assert_eq!(contents[0]["type"], "directory");

    let mut file_names: Vec<_> = contents[1..]
        .iter()
        .map(|e| {
            assert_eq!(e["type"], "file");
            e["name"].as_str().unwrap().to_string()
        })
        .collect();
    file_names.sort();
    assert_eq!(file_names, vec!["a.txt", "b.txt"]);
}

#[test]
fn test_list_on_file_is_io_failure() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "x").unwrap();

    let d = dispatcher_for(&[&dir]);
    let kind = failure_kind(call(
        &d,
        "list_directory",
        json!({ "path": file.to_str().unwrap() }),
    ));
    assert_eq!(kind, "io");
}

#[test]
fn test_search_finds_matches_in_preorder() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.log"), "").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("error.log"), "").unwrap();
    fs::write(dir.path().join("sub").join("readme.md"), "").unwrap();

    let d = dispatcher_for(&[&dir]);
    let found = payload(call(
        &d,
        "search_files",
        json!({ "path": dir.path().to_str().unwrap(), "pattern": "log" }),
    ));

    assert_eq!(found["pattern"], "log");
    let canonical = fs::canonicalize(dir.path()).unwrap();
    let matches: Vec<_> = found["matches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m.as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        matches,
        vec![
            canonical.join("app.log").to_string_lossy().into_owned(),
            canonical
                .join("sub")
                .join("error.log")
                .to_string_lossy()
                .into_owned(),
        ]
    );
}

#[test]
fn test_search_non_recursive_scans_top_level_only() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("top.log"), "").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("nested.log"), "").unwrap();

    let d = dispatcher_for(&[&dir]);
    let found = payload(call(
        &d,
        "search_files",
        json!({
            "path": dir.path().to_str().unwrap(),
            "pattern": "log",
            "recursive": false
        }),
    ));

    let matches = found["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].as_str().unwrap().ends_with("top.log"));
}

#[test]
fn test_search_pattern_is_substring_not_glob() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("data.log"), "").unwrap();
    fs::write(dir.path().join("catalog"), "").unwrap();

    let d = dispatcher_for(&[&dir]);
    let found = payload(call(
        &d,
        "search_files",
        json!({ "path": dir.path().to_str().unwrap(), "pattern": "*.log" }),
    ));
    // A glob would match data.log; a literal substring matches nothing.
    assert!(found["matches"].as_array().unwrap().is_empty());

    let found = payload(call(
        &d,
        "search_files",
        json!({ "path": dir.path().to_str().unwrap(), "pattern": "log" }),
    ));
    // Substring containment matches both names.
    assert_eq!(found["matches"].as_array().unwrap().len(), 2);
}

#[test]
fn test_list_allowed_directories_is_stable_across_operations() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let d = dispatcher_for(&[&a, &b]);

    let expected = json!({
        "allowedDirectories": [
            fs::canonicalize(a.path()).unwrap().to_string_lossy(),
            fs::canonicalize(b.path()).unwrap().to_string_lossy(),
        ]
    });

    let before = payload(call(&d, "list_allowed_directories", json!({})));
    assert_eq!(before, expected);

    payload(call(
        &d,
        "write_file",
        json!({ "path": a.path().join("f.txt").to_str().unwrap(), "content": "x" }),
    ));
    failure_kind(call(&d, "read_file", json!({ "path": "/outside/f.txt" })));

    let after = payload(call(&d, "list_allowed_directories", json!({})));
    assert_eq!(after, expected);
}

#[test]
fn test_list_and_search_are_idempotent() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("one.txt"), "").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("two.txt"), "").unwrap();

    let d = dispatcher_for(&[&dir]);
    let list_args = json!({ "path": dir.path().to_str().unwrap() });
    let search_args = json!({ "path": dir.path().to_str().unwrap(), "pattern": "txt" });

    let first_list = payload(call(&d, "list_directory", list_args.clone()));
    let second_list = payload(call(&d, "list_directory", list_args));
    assert_eq!(first_list, second_list);

    let first_search = payload(call(&d, "search_files", search_args.clone()));
    let second_search = payload(call(&d, "search_files", search_args));
    assert_eq!(first_search, second_search);
}

#[test]
fn test_empty_allowlist_denies_every_operation() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("f.txt"), "x").unwrap();
    let d = Dispatcher::new(Arc::new(AllowList::new(Vec::<String>::new()).unwrap()));

    let path = dir.path().join("f.txt");
    let kind = failure_kind(call(&d, "read_file", json!({ "path": path.to_str().unwrap() })));
    assert_eq!(kind, "permission");

    // Introspection still works: it takes no path.
    let allowed = payload(call(&d, "list_allowed_directories", json!({})));
    assert!(allowed["allowedDirectories"].as_array().unwrap().is_empty());
}

#[test]
fn test_second_root_is_reachable() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let d = dispatcher_for(&[&a, &b]);

    let path = b.path().join("other.txt");
    payload(call(
        &d,
        "write_file",
        json!({ "path": path.to_str().unwrap(), "content": "roots" }),
    ));
    let read = payload(call(&d, "read_file", json!({ "path": path.to_str().unwrap() })));
    assert_eq!(read["content"], "roots");
}
