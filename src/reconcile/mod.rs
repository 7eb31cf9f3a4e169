//! カタログ同期モジュール
//!
//! スクレイピング済みバッチを既存のparks.jsonへマージする中核処理。
//! 公園1件ごとにコード一致・名称一致の組み合わせで4通りの結果
//! （変更なし・名称変更・コード変更・新規）に分類し、既存データと
//! 食い違う場合は操作者の承認を取ってから反映する。バッチに
//! 含まれない既存公園は削除候補として操作者に確認する。
//!
//! ## 不変条件
//! - コード・名称はカタログ全体で一意
//! - visited / overlay / photos は同期で変更しない
//! - 削除候補フラグは実行終了時に必ず消える
//! - 同一バッチ + 全拒否回答での再実行はカタログを変えない

use crate::catalog::{Catalog, ParkEntry};
use crate::coords::CoordResolver;
use crate::error::{ParksUpdateError, Result};
use crate::prompt::Prompter;
use crate::scrape::ScrapedPark;
use crate::sign;
use std::path::Path;

/// バッチ1件に対する照合結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// コード・名称とも同じエントリに一致
    Unchanged { index: usize },
    /// コードのみ一致。公式サイト側で名称が変わった
    Renamed { index: usize, new_name: String },
    /// 名称のみ一致。公式サイト側でコードが変わった
    Recoded { index: usize, new_code: String },
    /// コード一致と名称一致が別エントリを指す。自動解決しない
    Ambiguous {
        code_index: usize,
        name_index: usize,
    },
    /// どちらにも一致しない新規公園
    Created,
}

/// 同期1回分の実行結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: usize,
    pub unchanged: usize,
    pub renamed: usize,
    pub recoded: usize,
    pub removed: usize,
    /// 操作者が拒否した変更・削除の件数
    pub declined: usize,
    /// 保留した曖昧一致の件数
    pub ambiguous: usize,
}

impl std::fmt::Display for ReconcileSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "新規{} 変更なし{} 名称変更{} コード変更{} 削除{} 拒否{} 保留{}",
            self.created,
            self.unchanged,
            self.renamed,
            self.recoded,
            self.removed,
            self.declined,
            self.ambiguous
        )
    }
}

/// バッチ1件を既存カタログに照合する
///
/// 照合は常にカタログ全体に対して行う（処理中に縮む集合ではない）。
pub fn classify_match(catalog: &Catalog, park: &ScrapedPark) -> MatchOutcome {
    let by_code = catalog.find_by_code(&park.code);
    let by_name = catalog.find_by_name(&park.name);

    match (by_code, by_name) {
        (Some(c), Some(n)) if c == n => MatchOutcome::Unchanged { index: c },
        (Some(c), Some(n)) => MatchOutcome::Ambiguous {
            code_index: c,
            name_index: n,
        },
        (Some(c), None) => MatchOutcome::Renamed {
            index: c,
            new_name: park.name.clone(),
        },
        (None, Some(n)) => MatchOutcome::Recoded {
            index: n,
            new_code: park.code.clone(),
        },
        (None, None) => MatchOutcome::Created,
    }
}

/// 同期処理の実行コンテキスト
pub struct Reconciler<'a> {
    pub prompter: &'a mut dyn Prompter,
    pub coords: &'a mut CoordResolver,
    pub parks_dir: &'a Path,
    pub overlay_dir: &'a Path,
}

impl Reconciler<'_> {
    /// バッチをカタログへマージする
    ///
    /// カタログはメモリ上でのみ変更される。保存は呼び出し側が
    /// 全工程完了後に一度だけ行う。
    pub fn run(
        &mut self,
        catalog: &mut Catalog,
        batch: &[ScrapedPark],
    ) -> Result<ReconcileSummary> {
        let mut summary = ReconcileSummary::default();

        // 初回構築: 既存SVGを全消去してから全件作成する
        if catalog.is_empty() {
            println!("parks.jsonが空のため初回構築を行います");
            println!("SVGディレクトリをクリアします");
            sign::clear_directory(self.parks_dir)?;
            sign::clear_directory(self.overlay_dir)?;

            for park in batch {
                let entry = self.create_entry(park)?;
                catalog.parks.push(entry);
                summary.created += 1;
            }
            catalog.sort();
            return Ok(summary);
        }

        // マークフェーズ: 全既存エントリを削除候補にする
        for park in catalog.parks.iter_mut() {
            park.pending_removal = true;
        }

        // 照合フェーズ
        for park in batch {
            match classify_match(catalog, park) {
                MatchOutcome::Unchanged { index } => {
                    // 名称に合わせてSVGを作り直す（冪等なので無条件でよい）
                    sign::generate(&park.code, &park.name, self.parks_dir, self.overlay_dir)?;
                    catalog.parks[index].pending_removal = false;
                    summary.unchanged += 1;
                }
                MatchOutcome::Renamed { index, new_name } => {
                    let entry = &catalog.parks[index];
                    let accepted = self.prompter.confirm(&format!(
                        "公園 \"{} ({})\" の名称が公式サイトでは \"{}\" になっています。変更を適用しますか",
                        entry.name, entry.code, new_name
                    ))?;
                    if accepted {
                        println!("名称を変更します");
                        catalog.parks[index].name = new_name.clone();
                        sign::generate(&park.code, &new_name, self.parks_dir, self.overlay_dir)?;
                        summary.renamed += 1;
                    } else {
                        println!("現在の名称を維持します");
                        summary.declined += 1;
                    }
                    catalog.parks[index].pending_removal = false;
                }
                MatchOutcome::Recoded { index, new_code } => {
                    let entry = &catalog.parks[index];
                    let accepted = self.prompter.confirm(&format!(
                        "公園 \"{} ({})\" のコードが公式サイトでは ({}) になっています。変更を適用しますか",
                        entry.name, entry.code, new_code
                    ))?;
                    if accepted {
                        println!("コードを変更します");
                        let old_code = catalog.parks[index].code.clone();
                        sign::delete(&old_code, self.parks_dir, self.overlay_dir);
                        catalog.parks[index].code = new_code.clone();
                        sign::generate(&new_code, &park.name, self.parks_dir, self.overlay_dir)?;
                        summary.recoded += 1;
                    } else {
                        println!("現在のコードを維持します");
                        summary.declined += 1;
                    }
                    catalog.parks[index].pending_removal = false;
                }
                MatchOutcome::Ambiguous {
                    code_index,
                    name_index,
                } => {
                    let by_code = &catalog.parks[code_index];
                    let by_name = &catalog.parks[name_index];
                    println!(
                        "⚠ 公式サイトの \"{} ({})\" がコードで \"{} ({})\"、名称で \"{} ({})\" と部分一致しています",
                        park.name, park.code, by_code.name, by_code.code, by_name.name, by_name.code
                    );
                    println!("  自動では解決できません。overrides.jsonか手動修正での解決が必要です");
                    let proceed = self
                        .prompter
                        .confirm("このレコードを保留して同期を続行しますか")?;
                    if !proceed {
                        return Err(ParksUpdateError::Aborted(format!(
                            "曖昧一致 \"{} ({})\"",
                            park.name, park.code
                        )));
                    }
                    // コード一致側は実在が確認できたので削除候補から外す。
                    // 名称一致側は自分のレコードで別途一致しうるため触らない
                    catalog.parks[code_index].pending_removal = false;
                    summary.ambiguous += 1;
                }
                MatchOutcome::Created => {
                    let entry = self.create_entry(park)?;
                    catalog.parks.push(entry);
                    summary.created += 1;
                }
            }
        }

        // 削除フェーズ: バッチに現れなかったエントリを1件ずつ確認する
        let mut removed_indices = Vec::new();
        for (index, park) in catalog.parks.iter().enumerate() {
            if !park.pending_removal {
                continue;
            }
            let accepted = self.prompter.confirm(&format!(
                "{} は公式サイトに存在しません。parks.jsonとSVGから削除しますか",
                park.name
            ))?;
            if accepted {
                sign::delete(&park.code, self.parks_dir, self.overlay_dir);
                removed_indices.push(index);
                summary.removed += 1;
            } else {
                summary.declined += 1;
            }
        }
        for index in removed_indices.into_iter().rev() {
            catalog.parks.remove(index);
        }

        // 削除候補フラグは保存対象外だが、実行終了時に必ず畳んでおく
        for park in catalog.parks.iter_mut() {
            park.pending_removal = false;
        }

        catalog.sort();
        Ok(summary)
    }

    /// 新規エントリを作成する
    ///
    /// 座標解決とSVG生成は作成時に必ず行う。初回構築と照合フェーズの
    /// 新規作成で同じ経路を通る。
    fn create_entry(&mut self, park: &ScrapedPark) -> Result<ParkEntry> {
        let coordinates = self
            .coords
            .resolve(&mut *self.prompter, &park.code, &park.name)?;
        sign::generate(&park.code, &park.name, self.parks_dir, self.overlay_dir)?;
        Ok(ParkEntry::new(
            &park.code,
            &park.name,
            &park.park_type,
            coordinates,
        ))
    }
}
