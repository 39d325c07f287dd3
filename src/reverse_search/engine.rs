use crate::config::ScanConfig;
use crate::file_manager::{self, ReportWriter};
use crate::types::{ImageOutcome, MatchRow};
use super::{trait_def::ReverseSearchService, utils};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;

/// 一次執行的統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub images: usize,
    pub matched_images: usize,
    pub match_rows: usize,
    pub no_results: usize,
    pub errors: usize,
    pub rows_written: usize,
    pub output: PathBuf,
}

impl RunSummary {
    fn record(&mut self, outcome: &ImageOutcome) {
        self.images += 1;
        match outcome {
            ImageOutcome::Matched(n) => {
                self.matched_images += 1;
                self.match_rows += n;
            }
            ImageOutcome::NoResults => self.no_results += 1,
            ImageOutcome::Failed(_) => self.errors += 1,
        }
    }

    pub fn print_report(&self) {
        println!("\n╔══════════════════════════════════╗");
        println!("║       📊 反向搜尋統計           ║");
        println!("╠══════════════════════════════════╣");
        println!("║ 圖片總數: {:>20} ║", self.images);
        println!("║ 有結果:   {:>20} ║", self.matched_images);
        println!("║ 結果筆數: {:>20} ║", self.match_rows);
        println!("║ 無結果:   {:>20} ║", self.no_results);
        println!("║ 失敗:     {:>20} ║", self.errors);
        println!("║ 寫入列數: {:>20} ║", self.rows_written);
        println!("╚══════════════════════════════════╝");
    }
}

/// 主搜尋引擎：一張一張依序搜尋，每張之後固定等待
pub struct ReverseSearchEngine {
    service: Arc<dyn ReverseSearchService>,
    config: ScanConfig,
}

impl ReverseSearchEngine {
    pub fn new(config: ScanConfig, service: Arc<dyn ReverseSearchService>) -> Self {
        Self { service, config }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let images = file_manager::list_images(&self.config.directory)?;
        log::info!(
            "found {} image(s) in {}, searching with {}",
            images.len(),
            self.config.directory.display(),
            self.service.name()
        );

        let mut report = ReportWriter::create(&self.config.out)?;
        let mut summary = RunSummary {
            output: self.config.out.clone(),
            ..RunSummary::default()
        };

        let pb = ProgressBar::new(images.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        for name in &images {
            pb.set_message(name.clone());

            let (outcome, rows) = self.process_image(name).await;
            report.write_rows(&rows)?;
            summary.record(&outcome);

            let status = status_line(name, &outcome);
            pb.suspend(|| println!("{status}"));
            pb.inc(1);

            if !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }
        }

        pb.finish_and_clear();
        summary.rows_written = report.rows_written();
        report.finish()?;

        Ok(summary)
    }

    /// 搜尋單張圖片並攤平成列（失敗也會回傳一列）
    async fn process_image(&self, name: &str) -> (ImageOutcome, Vec<MatchRow>) {
        let image_url = utils::image_url(&self.config.base_url, name);
        let response = self.service.search(&image_url).await;

        if let Err(e) = &response {
            log::debug!("search failed for {name}: {e}");
        }

        utils::flatten_response(name, &image_url, &response, self.config.max_results)
    }
}

/// 每張圖片的進度訊息
fn status_line(name: &str, outcome: &ImageOutcome) -> String {
    match outcome {
        ImageOutcome::Matched(n) => format!("OK: {name} ({n} results)"),
        ImageOutcome::NoResults => format!("NO_RESULTS: {name}"),
        ImageOutcome::Failed(message) => format!("ERROR: {name}: {message}"),
    }
}
