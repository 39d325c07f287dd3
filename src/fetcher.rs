use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, Url};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// 請求逾時（秒）
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// 解析後的 JSON 回應
pub type JsonObject = Map<String, Value>;

/// 單次請求失敗，呼叫端一律當成同一種狀況處理
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("invalid JSON response: {0}")]
    Decode(String),
}

/// 把整條 error chain 串成一行
fn describe(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // 錯誤訊息會寫進報表，URL 裡有 api_key，先拿掉
        let e = e.without_url();
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(describe(&e))
        } else {
            Self::Request(describe(&e))
        }
    }
}

/// HTTP 實作（不重試）
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// 建立新的 HTTP Fetcher
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// GET 一次並把回應解析成 JSON 物件
    pub async fn fetch_json(&self, url: &Url) -> Result<JsonObject, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.json::<JsonObject>().await?)
    }
}
