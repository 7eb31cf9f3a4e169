use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parks-update")]
#[command(about = "カリフォルニア州立公園訪問カタログの更新・SVG生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 公式サイトの公園リストとparks.jsonを同期
    Sync {
        /// 保存済みHTMLファイルを入力にする（省略時は公式サイトから取得）
        #[arg(long)]
        html: Option<PathBuf>,

        /// 座標入力プロンプトを出さない
        #[arg(long)]
        skip_coords: bool,

        /// overrides.jsonによる名称上書きを無効化
        #[arg(long)]
        no_overrides: bool,
    },

    /// サイン・オーバーレイSVGを再生成
    Sign {
        /// 公園コード。--nameと併用で1件だけ生成
        #[arg(short, long, requires = "name")]
        code: Option<String>,

        /// 公園名。--codeと併用で1件だけ生成
        #[arg(short, long, requires = "code")]
        name: Option<String>,
    },

    /// 共有アルバムリンクから写真の直リンクを取得
    Photos,

    /// parks.jsonの不変条件（一意性・ソート順）を検査
    Check,

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト設定ファイルを作成
        #[arg(long)]
        init: bool,
    },
}
