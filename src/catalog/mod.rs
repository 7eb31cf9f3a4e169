//! 公園カタログ（parks.json）モジュール
//!
//! parks.jsonの読み込み・保存と、保存前に必ず成立させる不変条件
//! （コード・名称の一意性、名称順ソート）を扱う。
//! 保存は一時ファイル経由のアトミック置換で行い、途中失敗で
//! 壊れたparks.jsonが残らないようにする。

use crate::error::{ParksUpdateError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// parks.json全体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub parks: Vec<ParkEntry>,
}

/// 公園1件分のエントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkEntry {
    /// 公式サイトのページID（安定キー）
    pub code: String,
    /// 公園名
    pub name: String,
    /// 公園種別（固定リスト外は "Other"）
    #[serde(rename = "type")]
    pub park_type: String,
    /// "緯度,経度" 形式。空文字は未設定
    pub coordinates: String,
    /// 訪問済みフラグ（手動管理、同期では変更しない）
    pub visited: bool,
    /// オーバーレイ表示フラグ（手動管理、同期では変更しない）
    pub overlay: bool,
    /// 写真リンク（photosサブコマンドが管理、同期では変更しない）
    pub photos: ParkPhotos,
    /// 同期1回の間だけ使う削除候補フラグ。保存されない
    #[serde(skip)]
    pub pending_removal: bool,
}

/// 写真スロット一式（サイン写真 + 風景写真3枚）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParkPhotos {
    pub sign: PhotoSlot,
    pub landscape1: PhotoSlot,
    pub landscape2: PhotoSlot,
    pub landscape3: PhotoSlot,
}

/// 1スロット分の公開用・ゲスト用リンク
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoSlot {
    pub encrypt: PhotoLinks,
    pub guest: PhotoLinks,
}

/// 共有リンクと直リンクのペア
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoLinks {
    /// Google Photos共有アルバムのリンク（手動で貼る）
    pub share: String,
    /// 共有ページから取得した直リンク
    pub photo: String,
}

impl ParkEntry {
    /// 新規エントリを作成する。訪問情報・写真は初期値
    pub fn new(code: &str, name: &str, park_type: &str, coordinates: String) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            park_type: park_type.to_string(),
            coordinates,
            visited: false,
            overlay: false,
            photos: ParkPhotos::default(),
            pending_removal: false,
        }
    }
}

impl Catalog {
    /// parks.jsonを読み込む
    ///
    /// ファイルが無い場合は空のカタログを返す（初回実行）。
    /// パースに失敗した場合は致命的エラー（上書きせず中断する）。
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ParksUpdateError::InvalidCatalog(e.to_string()))
    }

    /// parks.jsonを保存する
    ///
    /// 名称順にソートしてから一時ファイルに書き、renameで置換する。
    /// 書き込み失敗時に元ファイルはそのまま残る。
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.sort();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// 名称の辞書順（大文字小文字区別、安定）でソート
    pub fn sort(&mut self) {
        self.parks.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn find_by_code(&self, code: &str) -> Option<usize> {
        self.parks.iter().position(|p| p.code == code)
    }

    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.parks.iter().position(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.parks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parks.len()
    }

    /// 不変条件のチェック。違反内容のリストを返す（空なら正常）
    pub fn verify(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (i, a) in self.parks.iter().enumerate() {
            for b in self.parks.iter().skip(i + 1) {
                if a.code == b.code {
                    issues.push(format!("コード重複: {} ({})", a.code, a.name));
                }
                if a.name == b.name {
                    issues.push(format!("名称重複: {} ({})", a.name, a.code));
                }
            }
        }

        for pair in self.parks.windows(2) {
            if pair[0].name > pair[1].name {
                issues.push(format!(
                    "ソート順違反: \"{}\" が \"{}\" より前にあります",
                    pair[0].name, pair[1].name
                ));
            }
        }

        issues
    }
}
