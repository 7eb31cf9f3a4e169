//! parks.json読み書きテスト
//!
//! ラウンドトリップとアトミック保存、不正ファイルの扱いを検証

use parks_update_rust::catalog::{Catalog, ParkEntry};
use parks_update_rust::error::ParksUpdateError;
use tempfile::tempdir;

fn entry(code: &str, name: &str) -> ParkEntry {
    ParkEntry::new(code, name, "State Park", String::new())
}

/// ファイルが無い場合は空カタログ
#[test]
fn test_load_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let catalog = Catalog::load(&dir.path().join("parks.json")).unwrap();
    assert!(catalog.is_empty());
}

/// 保存と再読み込みで全フィールドが保たれる
#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("parks.json");

    let mut catalog = Catalog {
        firstname: "Foo".into(),
        lastname: "Bar".into(),
        parks: Vec::new(),
    };
    let mut park = entry("536", "Butano State Park");
    park.coordinates = "37.2,-122.3".into();
    park.visited = true;
    park.photos.landscape1.guest.share = "https://photos.example.com/x".into();
    catalog.parks.push(park);

    catalog.save(&path).unwrap();

    let loaded = Catalog::load(&path).unwrap();
    assert_eq!(loaded.firstname, "Foo");
    assert_eq!(loaded.parks.len(), 1);
    assert_eq!(loaded.parks[0].coordinates, "37.2,-122.3");
    assert!(loaded.parks[0].visited);
    assert_eq!(
        loaded.parks[0].photos.landscape1.guest.share,
        "https://photos.example.com/x"
    );
}

/// 保存時に名称順へソートされる
#[test]
fn test_save_sorts_by_name() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("parks.json");

    let mut catalog = Catalog::default();
    catalog.parks.push(entry("2", "Beta Beach"));
    catalog.parks.push(entry("1", "Alpha Park"));
    catalog.save(&path).unwrap();

    let loaded = Catalog::load(&path).unwrap();
    assert_eq!(loaded.parks[0].name, "Alpha Park");
    assert_eq!(loaded.parks[1].name, "Beta Beach");
}

/// 一時ファイルが残らない
#[test]
fn test_save_leaves_no_tmp_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("parks.json");

    let mut catalog = Catalog::default();
    catalog.parks.push(entry("1", "Alpha Park"));
    catalog.save(&path).unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["parks.json"]);
}

/// 壊れたparks.jsonは致命的エラー（空扱いにしない）
#[test]
fn test_load_corrupted_file_is_fatal() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("parks.json");
    std::fs::write(&path, "{ invalid json }").unwrap();

    let result = Catalog::load(&path);
    assert!(matches!(result, Err(ParksUpdateError::InvalidCatalog(_))));
}

/// 削除候補フラグは保存されない
#[test]
fn test_pending_removal_not_persisted() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("parks.json");

    let mut catalog = Catalog::default();
    let mut park = entry("1", "Alpha Park");
    park.pending_removal = true;
    catalog.parks.push(park);
    catalog.save(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("pending_removal"));

    let loaded = Catalog::load(&path).unwrap();
    assert!(!loaded.parks[0].pending_removal);
}

/// 写真構造は元のスキーマ（type/photos/encrypt/guest）で出力される
#[test]
fn test_serialized_schema_matches_site() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("parks.json");

    let mut catalog = Catalog::default();
    catalog.parks.push(entry("1", "Alpha Park"));
    catalog.save(&path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let park = &value["parks"][0];
    assert_eq!(park["type"], "State Park");
    assert!(park["photos"]["sign"]["encrypt"]["share"].is_string());
    assert!(park["photos"]["landscape3"]["guest"]["photo"].is_string());
}
