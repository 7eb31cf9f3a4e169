//! 座標解決モジュール
//!
//! 新規公園の座標をcoords.jsonのキャッシュから引き、無ければ
//! 操作者に入力を求める。答えてもらった座標はその場でcoords.jsonに
//! 書き戻す。途中で実行を打ち切っても入力済みの座標は失われない。

use crate::error::{ParksUpdateError, Result};
use crate::prompt::{CoordAnswer, Prompter};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

lazy_static::lazy_static! {
    // 緯度 [-90,90]、経度 [-180,180]、符号・小数点以下は任意
    static ref COORDS_RE: Regex = Regex::new(
        r"^[-+]?([1-8]?\d(\.\d+)?|90(\.0+)?),[-+]?(180(\.0+)?|((1[0-7]\d)|([1-9]?\d))(\.\d+)?)$"
    ).unwrap();
}

/// 座標文字列が "緯度,経度" 形式として妥当か
pub fn is_valid_coords(input: &str) -> bool {
    COORDS_RE.is_match(input)
}

/// coords.json（公園コード → 座標文字列）
///
/// BTreeMapで保持し、出力順を安定させる。
#[derive(Debug, Clone, Default)]
pub struct CoordsCache {
    entries: BTreeMap<String, String>,
}

impl CoordsCache {
    /// coords.jsonを読み込む。ファイルが無ければ空のキャッシュ
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| ParksUpdateError::InvalidCoordsCache(e.to_string()))?;
        Ok(Self { entries })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&String> {
        self.entries.get(code)
    }

    pub fn insert(&mut self, code: String, coords: String) {
        self.entries.insert(code, coords);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 1回の同期を通じて使う座標リゾルバ
///
/// skip-allの状態は実行単位でここに持つ。プロセス全体の状態にはしない。
pub struct CoordResolver {
    cache: CoordsCache,
    cache_path: PathBuf,
    /// falseになったら以降は一切プロンプトを出さない
    prompting: bool,
    /// skip-allコマンドの案内を一度だけ表示するためのフラグ
    notice_shown: bool,
}

impl CoordResolver {
    pub fn new(cache: CoordsCache, cache_path: PathBuf) -> Self {
        Self {
            cache,
            cache_path,
            prompting: true,
            notice_shown: false,
        }
    }

    /// 最初からプロンプトを無効にしたリゾルバ（--skip-coords用）
    pub fn disabled(cache: CoordsCache, cache_path: PathBuf) -> Self {
        let mut resolver = Self::new(cache, cache_path);
        resolver.prompting = false;
        resolver
    }

    /// 公園の座標を解決する
    ///
    /// キャッシュ優先。キャッシュミス時は妥当な座標が入力されるまで
    /// 再プロンプトし、受理した座標は即座にcoords.jsonへ保存する。
    /// skipで空文字、skip-allで以降の呼び出しも全て空文字を返す。
    pub fn resolve(
        &mut self,
        prompter: &mut dyn Prompter,
        code: &str,
        name: &str,
    ) -> Result<String> {
        if !self.prompting {
            return Ok(String::new());
        }

        if let Some(coords) = self.cache.get(code) {
            return Ok(coords.clone());
        }

        if !self.notice_shown {
            println!(
                "座標の入力を行います。プロンプトで \"skip-all\" と入力すると以降の座標入力を全てスキップします"
            );
            self.notice_shown = true;
        }

        let park_label = format!("{} ({})", name, code);
        let mut first_prompt = true;

        loop {
            let message = if first_prompt {
                format!(
                    "{} の座標が未設定です。座標を入力するか \"skip\" でスキップ",
                    park_label
                )
            } else {
                "座標が不正です。有効例: \"36.30952528162378,-121.88637073076984\"。座標を入力するか \"skip\" でスキップ".to_string()
            };

            match prompter.ask_coordinate(&message)? {
                CoordAnswer::Coord(input) if is_valid_coords(&input) => {
                    println!("coords.jsonに {} の座標を追記します", park_label);
                    self.cache.insert(code.to_string(), input.clone());
                    self.cache.save(&self.cache_path)?;
                    return Ok(input);
                }
                CoordAnswer::Coord(_) => {
                    first_prompt = false;
                }
                CoordAnswer::Skip => return Ok(String::new()),
                CoordAnswer::SkipAll => {
                    self.prompting = false;
                    return Ok(String::new());
                }
            }
        }
    }
}
