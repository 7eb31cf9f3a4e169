use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParksUpdateError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("parks.jsonが不正です: {0}")]
    InvalidCatalog(String),

    #[error("coords.jsonが不正です: {0}")]
    InvalidCoordsCache(String),

    #[error("公園リストにコード({0})の重複があります")]
    DuplicateCode(String),

    #[error("公園リストに名称({0})の重複があります")]
    DuplicateName(String),

    #[error("HTTPリクエストに失敗: {0}")]
    Http(#[from] reqwest::Error),

    #[error("公園リストページの解析に失敗: {0}")]
    ListingParse(String),

    #[error("SVGレイアウトエラー: {0}")]
    SignLayout(String),

    #[error("写真共有ページの解析に失敗: {0}")]
    PhotoParse(String),

    #[error("プロンプト入力エラー: {0}")]
    Prompt(String),

    #[error("操作者の指示により中断しました: {0}")]
    Aborted(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ParksUpdateError>;
