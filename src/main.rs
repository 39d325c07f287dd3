mod cli;
mod config;
mod fetcher;
mod file_manager;
mod reverse_search;
mod types;
#[cfg(test)]
mod test_helpers;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::ScanConfig;
use reverse_search::{ReverseSearchEngine, SerpApiService};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // API key 只在這裡讀一次環境變數
    let result = run(cli, |name| env::var(name).ok()).await;
    if let Err(e) = &result {
        eprintln!("{e:#}");
    }

    ExitCode::from(exit_status(&result))
}

/// 0：跑完（個別圖片失敗也算）；1：啟動前的錯誤
fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

async fn run<F>(cli: Cli, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let config = ScanConfig::from_cli(cli, lookup)?;

    log::debug!(
        "max_results={} delay={:?} gl={} hl={} safe={} no_cache={}",
        config.max_results,
        config.delay,
        config.search.locale,
        config.search.language,
        config.search.safe,
        config.search.no_cache
    );

    let service = Arc::new(SerpApiService::new(config.search.clone())?);
    let engine = ReverseSearchEngine::new(config, service);

    let summary = engine.run().await?;
    summary.print_report();

    println!("Done. Wrote {}", summary.output.display());
    Ok(())
}
