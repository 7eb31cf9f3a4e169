//! 公園レコードの正規化と一意性検証
//!
//! スクレイピング結果の名称からマークアップ由来のノイズを除去し、
//! 公園種別を固定リストに照らして分類する。分類できない種別は
//! "Other" に落とす。正規化後のバッチはコード・名称とも一意で
//! なければならず、重複があればバッチごと破棄する。

use super::{RawRecord, ScrapedPark};
use crate::error::{ParksUpdateError, Result};
use regex::Regex;

/// カリフォルニア州立公園の種別リスト。名称に含まれる種別で分類する
pub const PARK_TYPES: &[&str] = &[
    "State Park",
    "State Historic Park",
    "State Beach",
    "State Recreation Area",
    "State Natural Reserve",
    "State Vehicular Recreation Area",
];

lazy_static::lazy_static! {
    // 英数字・ダイアクリティカルマーク付き文字・空白〜ピリオドの記号以外を除去
    static ref NAME_NOISE_RE: Regex = Regex::new(r"[^a-zA-ZÀ-ÿ0-9 -.]+").unwrap();
}

/// 名称からノイズを除去してトリムする
pub fn clean_name(raw: &str) -> String {
    NAME_NOISE_RE.replace_all(raw, "").trim().to_string()
}

/// 名称に含まれる種別で分類する。該当なしは "Other"
pub fn classify(name: &str) -> String {
    PARK_TYPES
        .iter()
        .find(|t| name.contains(*t))
        .unwrap_or(&"Other")
        .to_string()
}

/// 生レコードを正規化済みレコードに変換する
pub fn normalize_records(records: &[RawRecord]) -> Vec<ScrapedPark> {
    records
        .iter()
        .map(|r| {
            let name = clean_name(&r.name);
            let park_type = classify(&name);
            ScrapedPark {
                code: r.code.clone(),
                name,
                park_type,
            }
        })
        .collect()
}

/// バッチ内のコードと名称が全て一意であることを検証する
///
/// 重複が1件でもあればバッチ全体を不採用にする。このチェックは
/// カタログへの変更が始まる前に必ず実行する。
pub fn verify_unique(parks: &[ScrapedPark]) -> Result<()> {
    for (i, a) in parks.iter().enumerate() {
        for b in parks.iter().skip(i + 1) {
            if a.code == b.code {
                return Err(ParksUpdateError::DuplicateCode(a.code.clone()));
            }
            if a.name == b.name {
                return Err(ParksUpdateError::DuplicateName(a.name.clone()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park(code: &str, name: &str) -> ScrapedPark {
        ScrapedPark {
            code: code.into(),
            name: name.into(),
            park_type: "Other".into(),
        }
    }

    #[test]
    fn test_clean_name_strips_noise() {
        assert_eq!(clean_name("  Butano State Park\n"), "Butano State Park");
        assert_eq!(clean_name("Año Nuevo State Park"), "Año Nuevo State Park");
        assert_eq!(clean_name("Park™"), "Park");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("Butano State Park"), "State Park");
        assert_eq!(classify("Carmel River State Beach"), "State Beach");
        assert_eq!(
            classify("Point Lobos State Natural Reserve"),
            "State Natural Reserve"
        );
        assert_eq!(classify("Angel Island"), "Other");
    }

    #[test]
    fn test_classify_prefers_first_listed_type() {
        // "State Historic Park" は "State Park" を含まないため誤判定しない
        assert_eq!(
            classify("Monterey State Historic Park"),
            "State Historic Park"
        );
    }

    #[test]
    fn test_verify_unique_ok() {
        let parks = vec![park("1", "Alpha Park"), park("2", "Beta Beach")];
        assert!(verify_unique(&parks).is_ok());
    }

    #[test]
    fn test_verify_unique_duplicate_code() {
        let parks = vec![park("1", "Alpha Park"), park("1", "Beta Beach")];
        let err = verify_unique(&parks).unwrap_err();
        assert!(matches!(err, ParksUpdateError::DuplicateCode(code) if code == "1"));
    }

    #[test]
    fn test_verify_unique_duplicate_name() {
        let parks = vec![park("1", "Alpha Park"), park("2", "Alpha Park")];
        let err = verify_unique(&parks).unwrap_err();
        assert!(matches!(err, ParksUpdateError::DuplicateName(name) if name == "Alpha Park"));
    }
}
