mod common;

use std::fs;

use assert_fs::{prelude::*, TempDir};
use kakeibo_core::{
    config::SETTINGS_KEY,
    storage::{JsonFileStorage, KeyValueStore, MemoryStorage},
    Kakeibo, KakeiboError, Settings,
};

fn custom_settings() -> Settings {
    Settings {
        app_name: "Household".into(),
        api_url: "https://script.example.com/exec".into(),
        auth_token: "secret".into(),
        str_income_items: "Salary, Bonus".into(),
        str_outgo_items: "Food,, Rent ,".into(),
        str_tag_items: String::new(),
    }
}

#[test]
fn saved_settings_are_restored_by_a_new_session() {
    let storage = MemoryStorage::new();
    let mut first = Kakeibo::new(storage.clone());
    first.save_settings(custom_settings()).unwrap();

    let mut second = Kakeibo::new(storage);
    second.load_settings().unwrap();

    assert_eq!(second.settings(), &custom_settings());
    assert_eq!(second.title(), "Household");
    assert_eq!(second.income_items(), vec!["Salary", "Bonus"]);
    assert_eq!(second.outgo_items(), vec!["Food", "Rent"]);
    assert!(second.tag_items().is_empty());
}

#[test]
fn settings_round_trip_through_the_storage_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("local_storage.json");

    let mut first = Kakeibo::new(JsonFileStorage::new(file.path().to_path_buf()));
    first.save_settings(custom_settings()).unwrap();
    file.assert(predicates::str::contains("\"settings\""));

    let mut second = Kakeibo::new(JsonFileStorage::new(file.path().to_path_buf()));
    second.load_settings().unwrap();
    assert_eq!(second.settings().api_url, "https://script.example.com/exec");
}

#[test]
fn partial_blob_only_overrides_present_keys() {
    let storage = MemoryStorage::new();
    storage
        .set_item(SETTINGS_KEY, r#"{"appName":"Mine","apiUrl":null,"theme":"dark"}"#)
        .unwrap();

    let mut app = Kakeibo::new(storage);
    app.load_settings().unwrap();

    let expected = Settings {
        app_name: "Mine".into(),
        ..Settings::default()
    };
    assert_eq!(app.settings(), &expected);
    assert_eq!(app.title(), "Mine");
}

#[test]
fn loading_with_nothing_stored_keeps_defaults_and_sets_title() {
    let mut app = Kakeibo::new(MemoryStorage::new());
    app.load_settings().unwrap();

    assert_eq!(app.settings(), &Settings::default());
    assert_eq!(app.title(), "GAS 家計簿");
}

#[test]
fn unreadable_blob_falls_back_to_defaults() {
    let storage = MemoryStorage::new();
    let mut app = Kakeibo::new(storage.clone());
    app.save_settings(custom_settings()).unwrap();
    storage.set_item(SETTINGS_KEY, "{not json").unwrap();

    let err = app.load_settings().unwrap_err();

    assert!(matches!(err, KakeiboError::Parse(_)));
    assert_eq!(app.settings(), &Settings::default());
    assert_eq!(app.title(), "GAS 家計簿");
}

#[test]
fn corrupt_storage_file_is_reported_and_left_untouched() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("local_storage.json");
    file.write_str("[1, 2").unwrap();

    let mut app = Kakeibo::new(JsonFileStorage::new(file.path().to_path_buf()));
    let err = app.save_settings(custom_settings()).unwrap_err();

    assert!(matches!(err, KakeiboError::Storage(_)));
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "[1, 2");
}

#[test]
fn failed_write_preserves_the_previous_file() {
    let base = common::temp_base();
    let path = base.join("local_storage.json");
    let mut app = Kakeibo::new(JsonFileStorage::new(path.clone()));
    app.save_settings(custom_settings()).unwrap();
    let original = fs::read_to_string(&path).unwrap();

    // A directory where the temporary sibling should go makes the write fail.
    fs::create_dir_all(base.join("local_storage.json.tmp")).unwrap();
    let mut changed = custom_settings();
    changed.app_name = "Changed".into();
    assert!(app.save_settings(changed).is_err());

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn wrongly_typed_field_does_not_reset_the_rest() {
    let storage = MemoryStorage::new();
    storage
        .set_item(
            SETTINGS_KEY,
            r#"{"appName":123,"apiUrl":"https://script.example.com/exec"}"#,
        )
        .unwrap();

    let mut app = Kakeibo::new(storage);
    app.load_settings().unwrap();

    assert_eq!(app.settings().api_url, "https://script.example.com/exec");
    assert_eq!(app.settings().app_name, "GAS 家計簿");
}
