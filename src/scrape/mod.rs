//! 公園リスト取得モジュール
//!
//! 公式サイトのリストページ（または保存済みHTML）から公園の
//! `{code, name, type}` を抽出する。公式サイトのHTML構造が
//! 変わると動かなくなる点は既知の運用リスク。

pub mod normalize;
pub mod overrides;

use crate::error::{ParksUpdateError, Result};
use scraper::{Html, Selector};
use std::time::Duration;

/// 正規化前のスクレイピング結果1件
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub code: String,
    pub name: String,
}

/// 正規化済みの公園レコード（同期処理への入力）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedPark {
    pub code: String,
    pub name: String,
    pub park_type: String,
}

/// リストページを取得する
pub fn fetch_listing(url: &str, timeout_seconds: u64) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    Ok(body)
}

fn selector(pattern: &str) -> Result<Selector> {
    Selector::parse(pattern)
        .map_err(|e| ParksUpdateError::ListingParse(format!("セレクタ {} が不正: {}", pattern, e)))
}

/// リストページのHTMLから公園レコードを抽出する
///
/// `ul.results-area` 内の各 `li` について、リンクの `page_id=` 以降を
/// コード、liのテキストを名称として拾う。1件も取れない場合は
/// ページ構造が変わったとみなして致命的エラー。
pub fn parse_listing(html: &str) -> Result<Vec<RawRecord>> {
    let document = Html::parse_document(html);
    let list_selector = selector("ul.results-area")?;
    let item_selector = selector("li")?;
    let link_selector = selector("a")?;

    let mut records = Vec::new();

    for results_list in document.select(&list_selector) {
        for item in results_list.select(&item_selector) {
            let link = item.select(&link_selector).next().ok_or_else(|| {
                ParksUpdateError::ListingParse("リンクの無いリスト項目があります".into())
            })?;
            let href = link.value().attr("href").ok_or_else(|| {
                ParksUpdateError::ListingParse("hrefの無いリンクがあります".into())
            })?;
            let code = href
                .split_once("page_id=")
                .map(|(_, id)| id.to_string())
                .ok_or_else(|| {
                    ParksUpdateError::ListingParse(format!("page_idの無いリンク: {}", href))
                })?;
            let name = item.text().collect::<String>();
            records.push(RawRecord { code, name });
        }
    }

    if records.is_empty() {
        return Err(ParksUpdateError::ListingParse(
            "ul.results-area から公園が1件も取得できませんでした".into(),
        ));
    }

    Ok(records)
}
