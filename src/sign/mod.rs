//! サイン・オーバーレイSVG生成モジュール
//!
//! 公園名をワードラップして、サイト表示用のサインSVGと
//! オーバーレイSVGを `{code}.svg` として2つのディレクトリに出力する。
//! 同じ入力からは必ず同じSVGが生成される（再生成で差分が出ない）。

use crate::error::{ParksUpdateError, Result};
use std::path::Path;

// 寸法設定（写真のアスペクト比3:4に合わせた値）
const WIDTH: f64 = 975.0;
const HEIGHT: f64 = 1300.0;
const MARGIN: f64 = 50.0;
const INNER_WIDTH: f64 = WIDTH - 2.0 * MARGIN;
const INNER_HEIGHT: f64 = HEIGHT - 2.0 * MARGIN;
/// サインの行の高さ
const LINE_HEIGHT: f64 = 150.0;
/// オーバーレイの行の高さ
const LINE_HEIGHT_SMALL: f64 = 120.0;

// 配色
const PARKS_YELLOW: &str = "#FCC917";
const PARKS_BROWN: &str = "#592626";

const FONT_FAMILY: &str = "Formata";

/// Formataの平均字幅のフォントサイズ比。折り返し位置の推定にのみ使う
/// （描画自体はtext-anchorで中央揃えするため、推定誤差は表示に出ない）
const CHAR_WIDTH_RATIO: f64 = 0.56;

/// フォントサイズ段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Large,
    Medium,
    Small,
}

impl FontSize {
    fn px(self) -> f64 {
        match self {
            FontSize::Large => 125.0,
            FontSize::Medium => 100.0,
            FontSize::Small => 90.0,
        }
    }

    /// サインでのベースライン調整量
    fn sign_offset(self) -> f64 {
        match self {
            FontSize::Large => 30.0,
            FontSize::Medium => 40.0,
            FontSize::Small => 46.0,
        }
    }

    /// オーバーレイでのベースライン調整量（smallのみ使用）
    fn overlay_offset(self) -> f64 {
        29.0
    }
}

/// 1行分のレイアウト情報
#[derive(Debug, Clone)]
struct Line {
    text: String,
    size: FontSize,
}

/// テキスト幅の推定値（px）
fn text_width(text: &str, size: FontSize) -> f64 {
    text.chars().count() as f64 * size.px() * CHAR_WIDTH_RATIO
}

/// 行に収まる最大のフォントサイズを決める。smallでも収まらなければエラー
fn fit_line(text: &str, label: &str) -> Result<Line> {
    for size in [FontSize::Large, FontSize::Medium, FontSize::Small] {
        if text_width(text, size) <= INNER_WIDTH {
            return Ok(Line {
                text: text.to_string(),
                size,
            });
        }
    }
    Err(ParksUpdateError::SignLayout(format!(
        "{}: \"{}\" が1行に収まりません。名称の調整が必要です",
        label, text
    )))
}

/// 指定サイズで行を作る。収まらなければエラー
fn fixed_line(text: &str, size: FontSize, label: &str) -> Result<Line> {
    if text_width(text, size) > INNER_WIDTH {
        return Err(ParksUpdateError::SignLayout(format!(
            "{}: \"{}\" が1行に収まりません。名称の調整が必要です",
            label, text
        )));
    }
    Ok(Line {
        text: text.to_string(),
        size,
    })
}

/// 公園名を単語単位で貪欲に折り返す
///
/// `measure_size` の幅で折り返し位置を判定し、確定した各行は
/// `fit` で実際のサイズを与える。sign.pyのアルゴリズムと同じ。
fn wrap_words(
    name: &str,
    measure_size: FontSize,
    fit: impl Fn(&str) -> Result<Line>,
) -> Result<Vec<Line>> {
    let words: Vec<&str> = name.split_whitespace().collect();
    let mut lines = Vec::new();

    if words.len() <= 1 {
        lines.push(fit(name.trim())?);
        return Ok(lines);
    }

    let mut current = words[0].to_string();
    for word in &words[1..] {
        let joined = format!("{} {}", current, word);
        if text_width(&joined, measure_size) > INNER_WIDTH {
            lines.push(fit(&current)?);
            current = word.to_string();
        } else {
            current = joined;
        }
    }
    lines.push(fit(&current)?);

    Ok(lines)
}

/// SVGテキスト用のエスケープ
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn text_element(text: &str, y: f64, size: FontSize) -> String {
    format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>\n",
        WIDTH / 2.0,
        y,
        FONT_FAMILY,
        size.px(),
        PARKS_BROWN,
        escape_xml(text)
    )
}

fn svg_open() -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
        WIDTH, HEIGHT, WIDTH, HEIGHT
    )
}

/// サインSVGを生成して `{directory}/{code}.svg` に書き込む
pub fn create_sign_svg(code: &str, name: &str, directory: &Path) -> Result<()> {
    let label = format!("{} ({})", name, code);
    let lines = wrap_words(name, FontSize::Large, |text| fit_line(text, &label))?;

    let total_height = lines.len() as f64 * LINE_HEIGHT;
    if total_height > INNER_HEIGHT {
        return Err(ParksUpdateError::SignLayout(format!(
            "{} の名称がサインSVGの高さに収まりません",
            label
        )));
    }
    if lines.len() > 4 {
        println!("⚠ {} のサインが4行を超えています。名称の短縮を検討してください", label);
    }

    let start_height = (INNER_HEIGHT - total_height) / 2.0 + MARGIN;
    let mut svg = svg_open();
    for (i, line) in lines.iter().enumerate() {
        let y = start_height + LINE_HEIGHT * (i as f64 + 1.0) - line.size.sign_offset();
        svg.push_str(&text_element(&line.text, y, line.size));
    }
    svg.push_str("</svg>\n");

    write_svg(directory, code, &svg)
}

/// オーバーレイSVGを生成して `{directory}/{code}.svg` に書き込む
///
/// 行数分の黄色い帯を背景に敷き、smallサイズ固定で名称を描く。
pub fn create_overlay_svg(code: &str, name: &str, directory: &Path) -> Result<()> {
    let label = format!("{} ({})", name, code);
    let lines = wrap_words(name, FontSize::Small, |text| {
        fixed_line(text, FontSize::Small, &label)
    })?;

    let band_height = lines.len() as f64 * LINE_HEIGHT_SMALL;
    if band_height > INNER_HEIGHT {
        return Err(ParksUpdateError::SignLayout(format!(
            "{} の名称がオーバーレイSVGの高さに収まりません",
            label
        )));
    }
    if lines.len() > 4 {
        println!(
            "⚠ {} のオーバーレイが4行を超えています。名称の短縮を検討してください",
            label
        );
    }

    let mut svg = svg_open();
    svg.push_str(&format!(
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
        MARGIN, MARGIN, INNER_WIDTH, band_height, PARKS_YELLOW
    ));
    for (i, line) in lines.iter().enumerate() {
        let y = MARGIN + LINE_HEIGHT_SMALL * (i as f64 + 1.0) - line.size.overlay_offset();
        svg.push_str(&text_element(&line.text, y, line.size));
    }
    svg.push_str("</svg>\n");

    write_svg(directory, code, &svg)
}

fn write_svg(directory: &Path, code: &str, svg: &str) -> Result<()> {
    std::fs::create_dir_all(directory)?;
    std::fs::write(directory.join(format!("{}.svg", code)), svg)?;
    Ok(())
}

/// 両ディレクトリのSVGを生成する（エントリ作成・名称変更時に呼ぶ）
pub fn generate(code: &str, name: &str, parks_dir: &Path, overlay_dir: &Path) -> Result<()> {
    create_sign_svg(code, name, parks_dir)?;
    create_overlay_svg(code, name, overlay_dir)?;
    Ok(())
}

/// コードに対応するSVGを両ディレクトリから削除する
///
/// ファイルが無いのは正常。削除失敗は警告のみで処理は続行する
/// （残骸SVGはカタログの正しさに影響しない）。
pub fn delete(code: &str, parks_dir: &Path, overlay_dir: &Path) {
    for dir in [parks_dir, overlay_dir] {
        let path = dir.join(format!("{}.svg", code));
        if path.is_file() {
            if let Err(e) = std::fs::remove_file(&path) {
                println!("⚠ {} の削除に失敗: {}", path.display(), e);
            }
        }
    }
}

/// ディレクトリの中身を全て削除する（初回構築時のリセット用）
///
/// 個々の削除失敗は警告のみ。
pub fn clear_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    for entry in walkdir::WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let target = entry.path();
        let result = if target.is_dir() {
            std::fs::remove_dir_all(target)
        } else {
            std::fs::remove_file(target)
        };
        if let Err(e) = result {
            println!("⚠ {} の削除に失敗: {}", target.display(), e);
        }
    }

    Ok(())
}
