use crate::error::{ParksUpdateError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 公園リストページのURL
    pub parks_url: String,
    /// parks.json / coords.json / overrides.json を置くディレクトリ
    pub assets_dir: PathBuf,
    /// サインSVGの出力ディレクトリ
    pub parks_images_dir: PathBuf,
    /// オーバーレイSVGの出力ディレクトリ
    pub overlay_images_dir: PathBuf,
    /// HTTPリクエストのタイムアウト（秒）
    pub timeout_seconds: u64,
    /// 写真リンク取得のリクエスト間隔（秒）
    pub photo_sleep_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ParksUpdateError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("parks-update").join("config.json"))
    }

    pub fn parks_json_path(&self) -> PathBuf {
        self.assets_dir.join("parks.json")
    }

    pub fn coords_json_path(&self) -> PathBuf {
        self.assets_dir.join("coords.json")
    }

    pub fn overrides_json_path(&self) -> PathBuf {
        self.assets_dir.join("overrides.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parks_url: "https://www.parks.ca.gov/?page_id=21805".into(),
            assets_dir: PathBuf::from("./assets"),
            parks_images_dir: PathBuf::from("../images/parks"),
            overlay_images_dir: PathBuf::from("../images/overlay"),
            timeout_seconds: 15,
            photo_sleep_seconds: 60,
        }
    }
}
