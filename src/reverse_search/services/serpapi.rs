use crate::config::SearchOptions;
use crate::fetcher::{FetchError, HttpFetcher, JsonObject, REQUEST_TIMEOUT_SECS};
use crate::reverse_search::trait_def::ReverseSearchService;
use anyhow::Result;
use reqwest::Url;
use std::time::Duration;

/// SerpAPI 的引擎識別字
pub const ENGINE: &str = "google_reverse_image";

/// 組出搜尋請求網址
///
/// `no_cache` 只有在要求時才加上，關閉時完全不送這個參數。
pub fn search_request_url(image_url: &str, options: &SearchOptions) -> Url {
    let mut url = options.endpoint.clone();
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("engine", ENGINE)
            .append_pair("image_url", image_url)
            .append_pair("api_key", &options.api_key)
            .append_pair("gl", &options.locale)
            .append_pair("hl", &options.language)
            .append_pair("safe", options.safe.as_str());

        if options.no_cache {
            query.append_pair("no_cache", "true");
        }
    }
    url
}

/// 記錄用：把 api_key 換成 ***
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "api_key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}

/// Google Reverse Image (SerpAPI)
pub struct SerpApiService {
    fetcher: HttpFetcher,
    options: SearchOptions,
}

impl SerpApiService {
    pub fn new(options: SearchOptions) -> Result<Self> {
        Ok(Self {
            fetcher: HttpFetcher::new(Duration::from_secs(REQUEST_TIMEOUT_SECS))?,
            options,
        })
    }
}

#[async_trait::async_trait]
impl ReverseSearchService for SerpApiService {
    fn name(&self) -> &str {
        "serpapi"
    }

    async fn search(&self, image_url: &str) -> Result<JsonObject, FetchError> {
        let url = search_request_url(image_url, &self.options);
        log::debug!("GET {}", redacted(&url));
        self.fetcher.fetch_json(&url).await
    }
}
