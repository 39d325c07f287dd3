use crate::cli::Cli;
use clap::ValueEnum;
use reqwest::Url;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// SerpAPI 搜尋端點
pub const DEFAULT_ENDPOINT: &str = "https://serpapi.com/search";

/// 啟動前就會中止程式的錯誤
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing API key. Set ${var}.")]
    MissingApiKey { var: String },

    #[error("Folder not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },
}

/// SafeSearch 模式
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SafeMode {
    #[default]
    Active,
    Off,
}

impl SafeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for SafeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 送給搜尋 API 的參數
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub endpoint: Url,
    pub api_key: String,
    /// gl
    pub locale: String,
    /// hl
    pub language: String,
    pub safe: SafeMode,
    pub no_cache: bool,
}

/// 整次執行的設定（解析一次後不再改變）
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub directory: PathBuf,
    pub base_url: String,
    pub out: PathBuf,
    /// 每張圖片最多幾筆；0 代表只寫 sentinel 列
    pub max_results: usize,
    pub delay: Duration,
    pub search: SearchOptions,
}

impl ScanConfig {
    /// 由命令列參數建立設定
    ///
    /// `lookup` 負責讀取環境變數，讓內部元件不直接碰環境。
    pub fn from_cli<F>(cli: Cli, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(&cli.env_var)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                var: cli.env_var.clone(),
            })?;

        if !cli.directory.is_dir() {
            return Err(ConfigError::DirectoryNotFound {
                path: cli.directory,
            });
        }

        Ok(Self {
            directory: cli.directory,
            base_url: cli.base_url,
            out: cli.out,
            max_results: usize::try_from(cli.max_results.max(0)).unwrap_or(usize::MAX),
            delay: delay_from_secs(cli.sleep),
            search: SearchOptions {
                endpoint: cli.endpoint,
                api_key,
                locale: cli.locale,
                language: cli.language,
                safe: cli.safe,
                no_cache: cli.no_cache,
            },
        })
    }
}

/// 非正數或非有限值都視為不等待；超出 `Duration` 範圍時取最大值
fn delay_from_secs(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}
