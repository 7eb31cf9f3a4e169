//! 公園名の上書き（overrides.json）
//!
//! サイト表記が長すぎる公園などに短い別名を与えるための
//! 任意ファイル。コードと名称の両方が一致した行だけ適用する。
//! ファイルが無ければ上書きなしで続行する。

use super::ScrapedPark;
use crate::error::{ParksUpdateError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Overrides {
    overrides: Vec<OverrideRule>,
}

/// 1件分の上書きルール
#[derive(Debug, Clone, Deserialize)]
struct OverrideRule {
    code: String,
    name: String,
    /// 置き換え後の名称
    alias: String,
    /// 置き換え後の種別（省略時は元のまま）
    #[serde(rename = "type")]
    park_type: Option<String>,
}

impl Overrides {
    /// overrides.jsonを読み込む。ファイルが無ければNone（上書き無効）
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let overrides: Overrides = serde_json::from_str(&content)
            .map_err(|e| ParksUpdateError::Config(format!("overrides.jsonが不正です: {}", e)))?;
        Ok(Some(overrides))
    }

    /// コードと名称の両方が一致するルールがあれば適用する
    pub fn apply(&self, park: ScrapedPark) -> ScrapedPark {
        let matched = self
            .overrides
            .iter()
            .find(|r| r.code == park.code && r.name == park.name);

        match matched {
            Some(rule) => ScrapedPark {
                code: park.code,
                name: rule.alias.clone(),
                park_type: rule.park_type.clone().unwrap_or(park.park_type),
            },
            None => park,
        }
    }
}
