use clap::Parser;
use parks_update_rust::{catalog, cli, config, coords, error, photos, prompt, reconcile, scrape, sign};

use catalog::Catalog;
use cli::{Cli, Commands};
use config::Config;
use coords::{CoordResolver, CoordsCache};
use error::{ParksUpdateError, Result};
use prompt::ConsolePrompter;
use reconcile::Reconciler;
use scrape::overrides::Overrides;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Sync {
            html,
            skip_coords,
            no_overrides,
        } => {
            println!("🌲 parks-update - カタログ同期\n");

            // 1. 公園リスト取得
            println!("[1/4] 公園リストを取得中...");
            let body = match html {
                Some(path) => {
                    if !path.exists() {
                        return Err(ParksUpdateError::FileNotFound(path.display().to_string()));
                    }
                    std::fs::read_to_string(&path)?
                }
                None => {
                    println!("取得元: {}", config.parks_url);
                    scrape::fetch_listing(&config.parks_url, config.timeout_seconds)?
                }
            };
            let raw = scrape::parse_listing(&body)?;
            println!("✔ {}件の公園を検出\n", raw.len());

            // 2. 正規化と一意性検証
            println!("[2/4] レコードを正規化中...");
            let mut batch = scrape::normalize::normalize_records(&raw);
            if !no_overrides {
                match Overrides::load(&config.overrides_json_path())? {
                    Some(overrides) => {
                        batch = batch.into_iter().map(|p| overrides.apply(p)).collect();
                    }
                    None => println!("overrides.jsonが無いため名称上書きをスキップします"),
                }
            }
            scrape::normalize::verify_unique(&batch)?;
            println!("✔ コード・名称の一意性を確認\n");

            if cli.verbose {
                for park in &batch {
                    println!("  {} ({}) [{}]", park.name, park.code, park.park_type);
                }
            }

            // 3. カタログへマージ
            println!("[3/4] parks.jsonとマージ中...");
            let parks_json_path = config.parks_json_path();
            let mut catalog = Catalog::load(&parks_json_path)?;
            let cache = CoordsCache::load(&config.coords_json_path())?;
            let mut resolver = if skip_coords {
                CoordResolver::disabled(cache, config.coords_json_path())
            } else {
                CoordResolver::new(cache, config.coords_json_path())
            };
            let mut prompter = ConsolePrompter;
            let mut reconciler = Reconciler {
                prompter: &mut prompter,
                coords: &mut resolver,
                parks_dir: &config.parks_images_dir,
                overlay_dir: &config.overlay_images_dir,
            };
            let summary = reconciler.run(&mut catalog, &batch)?;
            println!("✔ マージ完了: {}\n", summary);

            // 4. 保存
            println!("[4/4] parks.jsonを保存中...");
            catalog.save(&parks_json_path)?;
            println!("✔ 保存しました: {}", parks_json_path.display());

            println!("\n✅ 同期完了");
        }

        Commands::Sign { code, name } => {
            println!("🪧 parks-update - SVG生成\n");

            if let (Some(code), Some(name)) = (code, name) {
                // 1件のみ生成
                sign::generate(
                    &code,
                    &name,
                    &config.parks_images_dir,
                    &config.overlay_images_dir,
                )?;
                println!("✔ {} ({}) のSVGを生成しました", name, code);
            } else {
                // parks.jsonから全件再生成
                let parks_json_path = config.parks_json_path();
                if !parks_json_path.exists() {
                    return Err(ParksUpdateError::FileNotFound(
                        parks_json_path.display().to_string(),
                    ));
                }
                let catalog = Catalog::load(&parks_json_path)?;

                use prompt::Prompter;
                let mut prompter = ConsolePrompter;
                if !prompter.confirm("既存のSVGを全て削除して再生成しますか")? {
                    println!("中止しました");
                    return Ok(());
                }

                sign::clear_directory(&config.parks_images_dir)?;
                sign::clear_directory(&config.overlay_images_dir)?;

                for park in &catalog.parks {
                    sign::generate(
                        &park.code,
                        &park.name,
                        &config.parks_images_dir,
                        &config.overlay_images_dir,
                    )?;
                    if cli.verbose {
                        println!("  {} ({})", park.name, park.code);
                    }
                }
                println!("✔ {}件のSVGを再生成しました", catalog.len());
            }

            println!("\n✅ SVG生成完了");
        }

        Commands::Photos => {
            println!("📷 parks-update - 写真リンク取得\n");

            let parks_json_path = config.parks_json_path();
            if !parks_json_path.exists() {
                return Err(ParksUpdateError::FileNotFound(
                    parks_json_path.display().to_string(),
                ));
            }
            let mut catalog = Catalog::load(&parks_json_path)?;

            let updated = photos::enrich(
                &mut catalog,
                config.photo_sleep_seconds,
                config.timeout_seconds,
            )?;

            if updated > 0 {
                catalog.save(&parks_json_path)?;
                println!("✔ {}件の直リンクを取得し保存しました", updated);
            }

            println!("\n✅ 写真リンク取得完了");
        }

        Commands::Check => {
            println!("🔎 parks-update - カタログ検査\n");

            let parks_json_path = config.parks_json_path();
            if !parks_json_path.exists() {
                return Err(ParksUpdateError::FileNotFound(
                    parks_json_path.display().to_string(),
                ));
            }
            let catalog = Catalog::load(&parks_json_path)?;
            let issues = catalog.verify();

            if issues.is_empty() {
                println!("✔ {}件のエントリに問題はありません", catalog.len());
            } else {
                for issue in &issues {
                    println!("⚠ {}", issue);
                }
                return Err(ParksUpdateError::InvalidCatalog(format!(
                    "{}件の不変条件違反",
                    issues.len()
                )));
            }
        }

        Commands::Config { show, init } => {
            if init {
                config.save()?;
                println!("✔ 設定ファイルを作成しました: {}", Config::config_path()?.display());
            }

            if show || !init {
                println!("設定:");
                println!("  リストURL: {}", config.parks_url);
                println!("  assets: {}", config.assets_dir.display());
                println!("  サインSVG: {}", config.parks_images_dir.display());
                println!("  オーバーレイSVG: {}", config.overlay_images_dir.display());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  写真取得間隔: {}秒", config.photo_sleep_seconds);
            }
        }
    }

    Ok(())
}
