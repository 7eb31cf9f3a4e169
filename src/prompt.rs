//! 対話式プロンプトモジュール
//!
//! 同期処理の途中で操作者の判断を仰ぐ箇所（名称変更・コード変更・
//! 削除の承認、座標入力）をトレイトに切り出し、テストでは
//! スクリプト化した回答を注入できるようにする。

use crate::error::{ParksUpdateError, Result};
use dialoguer::Input;

/// 座標プロンプトへの回答
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordAnswer {
    /// 座標文字列の入力
    Coord(String),
    /// この公園をスキップ
    Skip,
    /// 残りの座標入力を全てスキップ
    SkipAll,
}

/// 操作者への問い合わせ窓口
pub trait Prompter {
    /// Y/N確認。y/yes（大文字小文字不問）のみ承認、それ以外は拒否
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// 座標入力。skip / skip-all を特別扱いする
    fn ask_coordinate(&mut self, message: &str) -> Result<CoordAnswer>;
}

/// 標準入力から回答を受け取る実装
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        let input: String = Input::new()
            .with_prompt(format!("{} (Y/N)", message))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ParksUpdateError::Prompt(e.to_string()))?;

        Ok(is_affirmative(&input))
    }

    fn ask_coordinate(&mut self, message: &str) -> Result<CoordAnswer> {
        let input: String = Input::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ParksUpdateError::Prompt(e.to_string()))?;

        Ok(parse_coord_answer(&input))
    }
}

/// y/yesのみ承認とみなす
fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

fn parse_coord_answer(input: &str) -> CoordAnswer {
    let trimmed = input.trim();
    match trimmed.to_lowercase().as_str() {
        "s" | "skip" => CoordAnswer::Skip,
        "skip-all" => CoordAnswer::SkipAll,
        _ => CoordAnswer::Coord(trimmed.to_string()),
    }
}

/// テスト用: あらかじめ決めた回答を順に返す実装
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    confirms: Vec<bool>,
    coords: Vec<CoordAnswer>,
    /// 実際に表示されたメッセージ（検証用）
    pub log: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(confirms: Vec<bool>, coords: Vec<CoordAnswer>) -> Self {
        Self {
            confirms,
            coords,
            log: Vec::new(),
        }
    }

    /// 全プロンプトを拒否・スキップで返す（無変更の回答セット）
    pub fn decline_all() -> Self {
        Self::default()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.log.push(message.to_string());
        if self.confirms.is_empty() {
            return Ok(false);
        }
        Ok(self.confirms.remove(0))
    }

    fn ask_coordinate(&mut self, message: &str) -> Result<CoordAnswer> {
        self.log.push(message.to_string());
        if self.coords.is_empty() {
            return Ok(CoordAnswer::Skip);
        }
        Ok(self.coords.remove(0))
    }
}
