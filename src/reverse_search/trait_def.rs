use crate::fetcher::{FetchError, JsonObject};

/// 反向搜尋服務 Trait
#[async_trait::async_trait]
pub trait ReverseSearchService: Send + Sync {
    /// 服務名稱
    fn name(&self) -> &str;

    /// 用公開網址搜尋單張圖片，回傳原始 JSON
    async fn search(&self, image_url: &str) -> Result<JsonObject, FetchError>;
}
