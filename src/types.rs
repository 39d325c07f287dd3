use serde::Serialize;
use serde_json::Value;

/// 沒有任何結果時寫入的狀態文字
pub const NO_RESULTS: &str = "NO_RESULTS";

/// CSV 標頭（欄位順序固定）
pub const REPORT_HEADER: [&str; 6] = [
    "filename",
    "image_url",
    "result_rank",
    "result_title",
    "result_link",
    "result_source",
];

/// 報表中的一列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRow {
    /// 檔案名稱
    pub filename: String,
    /// 公開的圖片網址
    pub image_url: String,
    /// 名次（從 1 開始；sentinel 列為空）
    pub result_rank: Option<usize>,
    /// 標題，或 `NO_RESULTS` / `ERROR: ...`
    pub result_title: String,
    pub result_link: String,
    pub result_source: String,
}

impl MatchRow {
    /// 建立 sentinel 列（沒有名次、連結與來源）
    pub fn sentinel(filename: &str, image_url: &str, status: String) -> Self {
        Self {
            filename: filename.to_string(),
            image_url: image_url.to_string(),
            result_rank: None,
            result_title: status,
            result_link: String::new(),
            result_source: String::new(),
        }
    }
}

/// API 回傳的單筆結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResultItem {
    pub title: String,
    pub link: String,
    pub source: String,
}

impl SearchResultItem {
    /// 從 JSON 取出欄位，缺少或不是字串時用空字串
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            title: field("title"),
            link: field("link"),
            source: field("source"),
        }
    }
}

/// 單張圖片的處理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// 寫入的結果筆數
    Matched(usize),
    NoResults,
    /// 失敗訊息
    Failed(String),
}
