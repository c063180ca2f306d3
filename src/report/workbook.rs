// src/report/workbook.rs

//! Tabular exports.
//!
//! The workbook is a directory with one CSV per sheet. The main sheet and
//! the statistics sheet are additionally mirrored as flat CSV files at the
//! output root. Sheets are rendered into byte buffers so the writer layer
//! can persist them atomically.

use csv::Writer;

use crate::error::{AppError, Result};
use crate::models::{Metric, Source};
use crate::report::markdown::{compile_aggregate, dedup_preserving};

pub const SHEET_MAIN: &str = "Data_Utama.csv";
pub const SHEET_STATS: &str = "Statistik_Ringkasan.csv";
pub const SHEET_EXTRACT: &str = "Ringkasan_Data_Ekstrak.csv";
pub const SHEET_TOP: &str = "Top_10_Sumber.csv";

const TOP_SOURCES: usize = 10;
const LIST_SAMPLE: usize = 3;

/// Render every workbook sheet. The empty extract sheet is skipped, the
/// others are always present.
pub fn sheets(sources: &[Source]) -> Result<Vec<(&'static str, Vec<u8>)>> {
    let mut out = vec![
        (SHEET_MAIN, main_sheet(sources)?),
        (SHEET_STATS, stats_sheet(sources)?),
    ];
    if sources.iter().any(|s| !s.extracted_data.is_empty()) {
        out.push((SHEET_EXTRACT, extract_sheet(sources)?));
    }
    out.push((SHEET_TOP, top_sheet(sources)?));
    Ok(out)
}

/// Main data sheet: one row per source, with a dynamic column per metric
/// that appears anywhere in the collection.
pub fn main_sheet(sources: &[Source]) -> Result<Vec<u8>> {
    let metrics = present_metrics(sources);
    let mut writer = Writer::from_writer(Vec::new());

    let mut header = vec![
        "No".to_string(),
        "Judul".to_string(),
        "Penulis/Institusi".to_string(),
        "Tahun_Publikasi".to_string(),
        "URL".to_string(),
        "Tipe_Dokumen".to_string(),
        "Skor_Relevansi".to_string(),
        "Ringkasan".to_string(),
        "Panjang_Konten".to_string(),
        "Data_Percentages".to_string(),
        "Data_Numbers".to_string(),
        "Data_Years_Mentioned".to_string(),
        "Data_Growth_Indicators".to_string(),
    ];
    header.extend(metrics.iter().map(metric_column));
    writer.write_record(&header)?;

    for (i, source) in sources.iter().enumerate() {
        let data = &source.extracted_data;
        let mut row = vec![
            (i + 1).to_string(),
            source.title.clone(),
            source.author.clone(),
            source.year.to_string(),
            source.url.clone(),
            source.file_type.to_string(),
            format!("{:.2}", source.relevance_score),
            source.summary.clone(),
            source.content.chars().count().to_string(),
            sample(&data.percentages),
            sample(&data.numbers),
            sample(&data.years_mentioned),
            sample(&data.growth_indicators),
        ];
        for metric in &metrics {
            row.push(data.metrics.get(metric).cloned().unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    finish(writer)
}

/// Summary statistics sheet: Metrik/Nilai pairs.
pub fn stats_sheet(sources: &[Source]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["Metrik", "Nilai"])?;

    let scores: Vec<f64> = sources.iter().map(|s| s.relevance_score).collect();
    let (avg, max, min) = crate::models::RunStats::score_summary(&scores);
    let high_quality = sources.iter().filter(|s| s.relevance_score >= 4.0).count();
    let by_category = |category: &str| {
        sources
            .iter()
            .filter(|s| s.author_category() == category)
            .count()
    };

    let rows: [(&str, String); 8] = [
        ("Total Sumber", sources.len().to_string()),
        ("Rata-rata Skor Relevansi", format!("{avg:.2}")),
        ("Skor Tertinggi", format!("{max:.2}")),
        ("Skor Terendah", format!("{min:.2}")),
        (
            "Sumber Kualitas Tinggi (>=4.0)",
            high_quality.to_string(),
        ),
        ("Sumber Akademik", by_category("academic").to_string()),
        ("Sumber Pemerintah", by_category("government").to_string()),
        (
            "Sumber Internasional",
            by_category("international").to_string(),
        ),
    ];
    for (metrik, nilai) in rows {
        writer.write_record([metrik, nilai.as_str()])?;
    }

    finish(writer)
}

/// Extraction summary: per data group, how many values were collected and a
/// sample of the distinct ones.
pub fn extract_sheet(sources: &[Source]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["Metrik", "Jumlah_Entries", "Unique_Values", "Sample_Values"])?;

    for (metric, values) in compile_aggregate(sources) {
        if values.is_empty() {
            continue;
        }
        let unique = dedup_preserving(&values, values.len());
        let sample = unique
            .iter()
            .take(5)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        writer.write_record([
            metric.clone(),
            values.len().to_string(),
            unique.len().to_string(),
            sample,
        ])?;
    }

    finish(writer)
}

/// Ten highest-scoring sources. Input is already score-ordered, so this is
/// a prefix.
pub fn top_sheet(sources: &[Source]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["No", "Judul", "Penulis/Institusi", "Skor_Relevansi", "URL"])?;

    for (i, source) in sources.iter().take(TOP_SOURCES).enumerate() {
        writer.write_record([
            (i + 1).to_string(),
            source.title.clone(),
            source.author.clone(),
            format!("{:.2}", source.relevance_score),
            source.url.clone(),
        ])?;
    }

    finish(writer)
}

/// Metrics appearing in at least one source, in extraction order.
fn present_metrics(sources: &[Source]) -> Vec<Metric> {
    Metric::ALL
        .into_iter()
        .filter(|m| sources.iter().any(|s| s.extracted_data.metrics.contains_key(m)))
        .collect()
}

fn metric_column(metric: &Metric) -> String {
    format!("Data_{}", metric.label().replace(' ', "_"))
}

fn sample(values: &[String]) -> String {
    values
        .iter()
        .take(LIST_SAMPLE)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

fn finish(writer: Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| AppError::report("csv", e.to_string()))
}
