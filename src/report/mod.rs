// src/report/mod.rs

//! Report generation.
//!
//! A completed run is persisted as a set of artifacts under the output
//! folder:
//!
//! ```text
//! output/
//! ├── Laporan_Riset_Lengkap.md               # master markdown report
//! ├── Database_Sumber_Riset_Komprehensif/    # workbook (one CSV per sheet)
//! │   ├── Data_Utama.csv
//! │   ├── Statistik_Ringkasan.csv
//! │   ├── Ringkasan_Data_Ekstrak.csv
//! │   └── Top_10_Sumber.csv
//! ├── Database_Sumber_Riset.csv              # flat mirror of Data_Utama
//! ├── Ringkasan_Statistik.csv                # flat mirror of the stats sheet
//! ├── metadata_komprehensif.json
//! └── ringkasan_penelitian.txt
//! ```
//!
//! All writes are atomic (temp file then rename), so a crash mid-run never
//! leaves a truncated artifact behind.

pub mod markdown;
pub mod metadata;
pub mod workbook;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::{Config, RunRequest, RunStats, Source};

pub const MASTER_REPORT_FILE: &str = "Laporan_Riset_Lengkap.md";
pub const WORKBOOK_DIR: &str = "Database_Sumber_Riset_Komprehensif";
pub const MAIN_CSV_FILE: &str = "Database_Sumber_Riset.csv";
pub const STATS_CSV_FILE: &str = "Ringkasan_Statistik.csv";
pub const METADATA_FILE: &str = "metadata_komprehensif.json";
pub const SUMMARY_FILE: &str = "ringkasan_penelitian.txt";

/// Writes run artifacts to an output folder.
pub struct ReportWriter {
    root: PathBuf,
}

impl ReportWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write every artifact for a completed run. Returns the paths written,
    /// relative to the output folder.
    pub async fn write_all(
        &self,
        config: &Config,
        request: &RunRequest,
        sources: &[Source],
        stats: &RunStats,
    ) -> Result<Vec<String>> {
        let mut written = Vec::new();

        let report = markdown::render(request, sources, stats);
        self.write_bytes(MASTER_REPORT_FILE, report.as_bytes()).await?;
        written.push(MASTER_REPORT_FILE.to_string());
        log::info!("Comprehensive master report generated: {}", MASTER_REPORT_FILE);

        for (sheet, bytes) in workbook::sheets(sources)? {
            let key = format!("{WORKBOOK_DIR}/{sheet}");
            self.write_bytes(&key, &bytes).await?;
            written.push(key);
        }

        self.write_bytes(MAIN_CSV_FILE, &workbook::main_sheet(sources)?)
            .await?;
        written.push(MAIN_CSV_FILE.to_string());

        self.write_bytes(STATS_CSV_FILE, &workbook::stats_sheet(sources)?)
            .await?;
        written.push(STATS_CSV_FILE.to_string());
        log::info!("Data export completed under {}", self.root.display());

        let meta = metadata::build(config, request, sources, stats);
        self.write_json(METADATA_FILE, &meta).await?;
        written.push(METADATA_FILE.to_string());

        let summary = metadata::render_summary(request, sources, stats);
        self.write_bytes(SUMMARY_FILE, summary.as_bytes()).await?;
        written.push(SUMMARY_FILE.to_string());
        log::info!("Metadata saved to {}", METADATA_FILE);

        Ok(written)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }
}

/// Bucket sources by relevance score: high (>= 4.0), medium (2.0-3.9),
/// low (below 2.0).
pub(crate) fn quality_buckets(sources: &[Source]) -> (usize, usize, usize) {
    let high = sources.iter().filter(|s| s.relevance_score >= 4.0).count();
    let medium = sources
        .iter()
        .filter(|s| s.relevance_score >= 2.0 && s.relevance_score < 4.0)
        .count();
    let low = sources.iter().filter(|s| s.relevance_score < 2.0).count();
    (high, medium, low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, FileType};
    use tempfile::TempDir;

    fn sample_sources() -> Vec<Source> {
        let mut first = Source::from_candidate(Candidate {
            title: "Transformasi digital pendidikan vokasi".to_string(),
            author: "Kemendikbud".to_string(),
            year: 2024,
            url: "https://www.kemdikbud.go.id/laporan".to_string(),
            file_type: FileType::Report,
            source_name: "Kemendikbud".to_string(),
            citations: None,
        });
        first.relevance_score = 4.2;
        first.summary = "Ringkasan pertama tentang pendidikan vokasi.".to_string();
        first.content = "a".repeat(120);

        let mut second = Source::from_candidate(Candidate {
            title: "Digital skills for vocational graduates".to_string(),
            author: "World Bank".to_string(),
            year: 2023,
            url: "https://worldbank.org/doc".to_string(),
            file_type: FileType::Article,
            source_name: "World Bank".to_string(),
            citations: Some(42),
        });
        second.relevance_score = 2.5;
        second.summary = "Second summary.".to_string();
        second.content = "b".repeat(80);

        vec![first, second]
    }

    #[test]
    fn quality_buckets_partition_all_sources() {
        let sources = sample_sources();
        let (high, medium, low) = quality_buckets(&sources);
        assert_eq!(high, 1);
        assert_eq!(medium, 1);
        assert_eq!(low, 0);
        assert_eq!(high + medium + low, sources.len());
    }

    #[tokio::test]
    async fn write_all_produces_contract_filenames() {
        let tmp = TempDir::new().unwrap();
        let writer = ReportWriter::new(tmp.path());
        let sources = sample_sources();
        let scores: Vec<f64> = sources.iter().map(|s| s.relevance_score).collect();
        let (average_score, max_score, min_score) = RunStats::score_summary(&scores);
        let stats = RunStats {
            source_count: sources.len(),
            candidate_count: 5,
            unique_count: 3,
            average_score,
            max_score,
            min_score,
            ..RunStats::default()
        };

        let written = writer
            .write_all(&Config::default(), &RunRequest::default(), &sources, &stats)
            .await
            .unwrap();

        for key in [
            MASTER_REPORT_FILE,
            MAIN_CSV_FILE,
            STATS_CSV_FILE,
            METADATA_FILE,
            SUMMARY_FILE,
        ] {
            assert!(written.iter().any(|w| w == key), "missing {key}");
            assert!(tmp.path().join(key).exists(), "file not written: {key}");
        }
        assert!(tmp.path().join(WORKBOOK_DIR).join("Data_Utama.csv").exists());
        assert!(tmp.path().join(WORKBOOK_DIR).join("Top_10_Sumber.csv").exists());

        // No temp files left behind.
        let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn write_all_handles_empty_run() {
        let tmp = TempDir::new().unwrap();
        let writer = ReportWriter::new(tmp.path());
        let stats = RunStats::default();

        let written = writer
            .write_all(&Config::default(), &RunRequest::default(), &[], &stats)
            .await
            .unwrap();
        assert!(written.iter().any(|w| w == METADATA_FILE));

        let report = std::fs::read_to_string(tmp.path().join(MASTER_REPORT_FILE)).unwrap();
        assert!(report.contains("**Jumlah Sumber**: 0"));
    }
}
