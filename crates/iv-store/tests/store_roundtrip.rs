use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use iv_core::{FanSpeed, Mode, SignalAttrs, SignalProfile};
use iv_store::{SignalStore, StoreError};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn attrs(power_on: bool, mode: Mode, temperature: i32, fan: FanSpeed) -> SignalAttrs {
    SignalAttrs {
        power_on,
        mode,
        temperature,
        fan_speed: fan,
    }
}

#[test]
fn put_then_get_exact_round_trips_payload() {
    let store = SignalStore::new(unique_temp_dir("iv_store_roundtrip")).expect("create store");

    let profile = SignalProfile::new(
        attrs(true, Mode::Cool, 25, FanSpeed::Level(3)),
        vec![350, 175, 350, 175],
    );
    let location = store.put(&profile).expect("put failed");
    assert!(location.ends_with("power_on/mode_cool/temp_25/fan_3.json"));

    let loaded = store.get_exact(&profile.attrs).expect("get failed");
    assert_eq!(loaded, profile);
}

#[test]
fn put_with_same_tuple_overwrites() {
    let store = SignalStore::new(unique_temp_dir("iv_store_overwrite")).expect("create store");
    let key = attrs(true, Mode::Heat, 22, FanSpeed::auto());

    store
        .put(&SignalProfile::new(key.clone(), vec![100, 200]))
        .expect("first put failed");
    store
        .put(&SignalProfile::new(key.clone(), vec![300, 400, 500]))
        .expect("second put failed");

    let loaded = store.get_exact(&key).expect("get failed");
    assert_eq!(loaded.pulses, vec![300, 400, 500]);
}

#[test]
fn get_exact_of_unknown_tuple_is_not_found() {
    let store = SignalStore::new(unique_temp_dir("iv_store_missing")).expect("create store");
    let result = store.get_exact(&attrs(false, Mode::Cool, 18, FanSpeed::Level(1)));
    assert!(matches!(result, Err(StoreError::NotFound { .. })));
}

#[test]
fn delete_removes_record_and_reports_missing() {
    let store = SignalStore::new(unique_temp_dir("iv_store_delete")).expect("create store");
    let key = attrs(true, Mode::Cool, 25, FanSpeed::Level(2));

    store
        .put(&SignalProfile::new(key.clone(), vec![100]))
        .expect("put failed");
    store.delete(&key).expect("delete failed");

    assert!(matches!(
        store.get_exact(&key),
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        store.delete(&key),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn delete_of_missing_tuple_leaves_other_records_alone() {
    let store = SignalStore::new(unique_temp_dir("iv_store_delete_miss")).expect("create store");
    let kept = attrs(true, Mode::Cool, 25, FanSpeed::Level(2));
    store
        .put(&SignalProfile::new(kept.clone(), vec![100]))
        .expect("put failed");

    let missing = attrs(false, Mode::Heat, 30, FanSpeed::Level(5));
    assert!(store.delete(&missing).is_err());
    assert!(store.get_exact(&kept).is_ok());
}

#[test]
fn empty_pulse_sequences_are_rejected() {
    let store = SignalStore::new(unique_temp_dir("iv_store_empty")).expect("create store");
    let profile = SignalProfile::new(attrs(true, Mode::Cool, 25, FanSpeed::Level(3)), vec![]);
    assert!(matches!(store.put(&profile), Err(StoreError::EmptyPulses)));
    assert!(store.get_exact(&profile.attrs).is_err());
}

#[test]
fn put_leaves_no_temp_files_behind() {
    let root = unique_temp_dir("iv_store_tmpfiles");
    let store = SignalStore::new(root.clone()).expect("create store");
    let key = attrs(true, Mode::Cool, 21, FanSpeed::Level(1));
    store
        .put(&SignalProfile::new(key.clone(), vec![42, 42]))
        .expect("put failed");

    let leaf_dir = store.path_for(&key);
    let leaf_dir = leaf_dir.parent().expect("leaf has parent");
    let leftovers: Vec<_> = fs::read_dir(leaf_dir)
        .expect("read leaf dir")
        .flatten()
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
