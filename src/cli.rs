use crate::config::{SafeMode, DEFAULT_ENDPOINT};
use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;

/// 透過 SerpAPI (Google Reverse Image) 批次反向搜尋圖片
#[derive(Parser, Debug)]
#[command(name = "serpapi-image-scan", version)]
pub struct Cli {
    /// 圖片資料夾
    #[arg(long = "dir", default_value = "photos")]
    pub directory: PathBuf,

    /// 圖片公開的網址前綴，例如 https://example.com/photos/
    #[arg(long)]
    pub base_url: String,

    /// 輸出的 CSV 檔案
    #[arg(long, default_value = "serpapi-matches.csv")]
    pub out: PathBuf,

    /// 存放 SerpAPI key 的環境變數名稱
    #[arg(long, default_value = "SERPAPI_KEY")]
    pub env_var: String,

    /// 每張圖片最多記錄幾筆結果
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    pub max_results: i64,

    /// 每次請求之間等待的秒數
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub sleep: f64,

    /// Google 結果的國家代碼
    #[arg(long = "gl", default_value = "us")]
    pub locale: String,

    /// Google 結果的語言代碼
    #[arg(long = "hl", default_value = "en")]
    pub language: String,

    /// SafeSearch 模式
    #[arg(long, value_enum, default_value_t = SafeMode::Active)]
    pub safe: SafeMode,

    /// 強制取得新結果（不使用 SerpAPI 快取）
    #[arg(long)]
    pub no_cache: bool,

    /// 搜尋 API 端點
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// 顯示除錯訊息
    #[arg(short, long)]
    pub verbose: bool,
}
