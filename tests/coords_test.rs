//! 座標解決テスト
//!
//! キャッシュ優先・即時保存・skip / skip-all・再プロンプトの動作を検証

use parks_update_rust::coords::{CoordResolver, CoordsCache};
use parks_update_rust::prompt::{CoordAnswer, ScriptedPrompter};
use std::path::PathBuf;
use tempfile::tempdir;

fn cache_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("coords.json")
}

/// キャッシュヒット時はプロンプトを出さない
#[test]
fn test_cache_hit_skips_prompt() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut cache = CoordsCache::default();
    cache.insert("536".into(), "37.2,-122.3".into());

    let mut resolver = CoordResolver::new(cache, cache_path(&dir));
    let mut prompter = ScriptedPrompter::decline_all();

    let coords = resolver
        .resolve(&mut prompter, "536", "Butano State Park")
        .unwrap();
    assert_eq!(coords, "37.2,-122.3");
    assert!(prompter.log.is_empty());
}

/// 受理した座標は即座にcoords.jsonへ書かれる
#[test]
fn test_accepted_coords_persisted_immediately() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = cache_path(&dir);
    let mut resolver = CoordResolver::new(CoordsCache::default(), path.clone());
    let mut prompter = ScriptedPrompter::new(
        vec![],
        vec![CoordAnswer::Coord("36.30952528162378,-121.88637073076984".into())],
    );

    let coords = resolver
        .resolve(&mut prompter, "577", "Point Lobos State Natural Reserve")
        .unwrap();
    assert_eq!(coords, "36.30952528162378,-121.88637073076984");

    // resolveの戻りを待たずにファイルが更新されている
    let reloaded = CoordsCache::load(&path).unwrap();
    assert_eq!(
        reloaded.get("577"),
        Some(&"36.30952528162378,-121.88637073076984".to_string())
    );
}

/// 不正な入力は妥当な座標が入るまで再プロンプトされる
#[test]
fn test_invalid_input_reprompts() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut resolver = CoordResolver::new(CoordsCache::default(), cache_path(&dir));
    let mut prompter = ScriptedPrompter::new(
        vec![],
        vec![
            CoordAnswer::Coord("not-coords".into()),
            CoordAnswer::Coord("99,0".into()), // 緯度範囲外
            CoordAnswer::Coord("36.3,-121.8".into()),
        ],
    );

    let coords = resolver.resolve(&mut prompter, "1", "Alpha Park").unwrap();
    assert_eq!(coords, "36.3,-121.8");
    assert_eq!(prompter.log.len(), 3);
    // 2回目以降は訂正メッセージになる
    assert!(prompter.log[1].contains("座標が不正です"));
}

/// skipは空文字を返しキャッシュには書かない
#[test]
fn test_skip_returns_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = cache_path(&dir);
    let mut resolver = CoordResolver::new(CoordsCache::default(), path.clone());
    let mut prompter = ScriptedPrompter::new(vec![], vec![CoordAnswer::Skip]);

    let coords = resolver.resolve(&mut prompter, "1", "Alpha Park").unwrap();
    assert_eq!(coords, "");
    assert!(!path.exists());
}

/// skip-all以降は一切プロンプトが出ない
#[test]
fn test_skip_all_disables_prompting() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut resolver = CoordResolver::new(CoordsCache::default(), cache_path(&dir));
    let mut prompter = ScriptedPrompter::new(vec![], vec![CoordAnswer::SkipAll]);

    assert_eq!(resolver.resolve(&mut prompter, "1", "Alpha Park").unwrap(), "");
    assert_eq!(resolver.resolve(&mut prompter, "2", "Beta Beach").unwrap(), "");
    assert_eq!(resolver.resolve(&mut prompter, "3", "Gamma Cove").unwrap(), "");
    // プロンプトは最初の1回だけ
    assert_eq!(prompter.log.len(), 1);
}

/// 無効化されたリゾルバはキャッシュも引かず空文字を返す
#[test]
fn test_disabled_resolver() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut cache = CoordsCache::default();
    cache.insert("1".into(), "36.3,-121.8".into());

    let mut resolver = CoordResolver::disabled(cache, cache_path(&dir));
    let mut prompter = ScriptedPrompter::decline_all();

    assert_eq!(resolver.resolve(&mut prompter, "1", "Alpha Park").unwrap(), "");
    assert!(prompter.log.is_empty());
}

/// 既存のcoords.jsonに追記しても他のエントリが消えない
#[test]
fn test_cache_append_preserves_existing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = cache_path(&dir);

    let mut cache = CoordsCache::default();
    cache.insert("1".into(), "36.3,-121.8".into());
    cache.save(&path).unwrap();

    let loaded = CoordsCache::load(&path).unwrap();
    let mut resolver = CoordResolver::new(loaded, path.clone());
    let mut prompter =
        ScriptedPrompter::new(vec![], vec![CoordAnswer::Coord("38.1,-122.9".into())]);
    resolver.resolve(&mut prompter, "2", "Beta Beach").unwrap();

    let reloaded = CoordsCache::load(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.get("1"), Some(&"36.3,-121.8".to_string()));
    assert_eq!(reloaded.get("2"), Some(&"38.1,-122.9".to_string()));
}
