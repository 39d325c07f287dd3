use crate::config::ConfigError;
use crate::types::{MatchRow, REPORT_HEADER};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 支援的圖片副檔名（不分大小寫）
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// 檢查副檔名
pub fn is_supported_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// 列出資料夾內的圖片檔名（只看第一層，依檔名排序）
///
/// 只收一般檔案；目錄與 symlink 都略過。
pub fn list_images(dir: &Path) -> Result<Vec<String>, ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut names = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            log::warn!("skipping non UTF-8 filename: {}", entry.path().display());
            continue;
        };

        if is_supported_image(name) {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

/// CSV 報表寫入器
///
/// 每張圖片處理完就 flush，中途當掉也不會遺失已完成的列。
pub struct ReportWriter {
    writer: csv::Writer<BufWriter<File>>,
    path: PathBuf,
    rows_written: usize,
}

impl ReportWriter {
    /// 建立（或覆蓋）報表並寫入標頭
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        writer
            .write_record(REPORT_HEADER)
            .context("failed to write CSV header")?;
        writer.flush().context("failed to flush CSV header")?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows_written: 0,
        })
    }

    /// 寫入一張圖片的所有列並 flush
    pub fn write_rows(&mut self, rows: &[MatchRow]) -> Result<()> {
        for row in rows {
            self.writer
                .serialize(row)
                .with_context(|| format!("failed to write row for {}", row.filename))?;
        }
        self.writer
            .flush()
            .with_context(|| format!("failed to flush {}", self.path.display()))?;

        self.rows_written += rows.len();
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// 結束寫入
    pub fn finish(mut self) -> Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("failed to flush {}", self.path.display()))
    }
}
