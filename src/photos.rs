//! 写真リンク取得モジュール
//!
//! parks.jsonに手動で貼られたGoogle Photos共有アルバムのリンクから
//! 直リンクを取得して `photo` プロパティに埋める。共有ページの
//! `og:image` メタタグに直リンクが入っている。リクエストの間隔を
//! 空けるのはボット判定を避けるため。同期処理とは独立したバッチ。

use crate::catalog::Catalog;
use crate::error::{ParksUpdateError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use scraper::{Html, Selector};
use std::time::Duration;

/// 共有ページのHTMLから直リンクを取り出す
///
/// `og:image` のcontentのうち最初の "=" より前がサイズ指定なしの
/// 直リンクになる。
pub fn extract_direct_link(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[property="og:image"]"#)
        .map_err(|e| ParksUpdateError::PhotoParse(format!("セレクタが不正: {}", e)))?;

    let content = document
        .select(&selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .ok_or_else(|| {
            ParksUpdateError::PhotoParse("og:imageメタタグが見つかりません".into())
        })?;

    let link = content.split('=').next().unwrap_or(content);
    Ok(link.to_string())
}

fn get_direct_link(client: &reqwest::blocking::Client, url: &str) -> Result<String> {
    let body = client.get(url).send()?.error_for_status()?.text()?;
    extract_direct_link(&body)
}

/// share設定済みかつphoto未取得のスロット数を数える
fn count_pending(catalog: &Catalog) -> u64 {
    catalog
        .parks
        .iter()
        .flat_map(|p| {
            [
                &p.photos.sign,
                &p.photos.landscape1,
                &p.photos.landscape2,
                &p.photos.landscape3,
            ]
        })
        .flat_map(|slot| [&slot.encrypt, &slot.guest])
        .filter(|links| !links.share.is_empty() && links.photo.is_empty())
        .count() as u64
}

/// 未取得の直リンクを全て取得してカタログに書き込む
///
/// 取得した件数を返す。保存は呼び出し側が行う。
pub fn enrich(catalog: &mut Catalog, sleep_seconds: u64, timeout_seconds: u64) -> Result<usize> {
    let pending = count_pending(catalog);
    if pending == 0 {
        println!("取得対象の写真リンクはありません");
        return Ok(0);
    }

    println!("リクエスト間隔: {}秒", sleep_seconds);
    let bar = ProgressBar::new(pending);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?;

    let mut updated = 0;

    for park in catalog.parks.iter_mut() {
        let name = park.name.clone();
        let slots = [
            ("sign", &mut park.photos.sign),
            ("landscape1", &mut park.photos.landscape1),
            ("landscape2", &mut park.photos.landscape2),
            ("landscape3", &mut park.photos.landscape3),
        ];

        for (slot_name, slot) in slots {
            for (kind, links) in [("encrypt", &mut slot.encrypt), ("guest", &mut slot.guest)] {
                if links.share.is_empty() || !links.photo.is_empty() {
                    continue;
                }
                bar.set_message(format!("{} {} {}", name, slot_name, kind));
                links.photo = get_direct_link(&client, &links.share)?;
                updated += 1;
                bar.inc(1);
                // ボット判定を避けるための待機
                std::thread::sleep(Duration::from_secs(sleep_seconds));
            }
        }
    }

    bar.finish_and_clear();
    Ok(updated)
}
