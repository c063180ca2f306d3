// src/report/markdown.rs

//! Master report rendering (Markdown).
//!
//! The report is assembled as a single string so rendering stays pure and
//! directly testable; the caller persists it.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::Utc;

use crate::models::{RunRequest, RunStats, Source};
use crate::report::quality_buckets;

const TITLE_TABLE_LIMIT: usize = 60;

/// Render the full master report for a completed run.
pub fn render(request: &RunRequest, sources: &[Source], stats: &RunStats) -> String {
    let mut out = String::new();

    header(&mut out, sources);
    table_of_contents(&mut out);
    executive_summary(&mut out, sources, stats);
    methodology(&mut out, request);
    quality_analysis(&mut out, sources);
    source_table(&mut out, sources);
    source_summaries(&mut out, sources);
    aggregate_data(&mut out, sources);
    key_findings(&mut out);
    recommendations(&mut out);
    conclusion(&mut out);

    out
}

fn header(out: &mut String, sources: &[Source]) {
    out.push_str("# Laporan Riset Lengkap: Pendidikan Vokasi Digital Indonesia\n\n");
    let _ = writeln!(
        out,
        "**Tanggal Penelitian**: {}",
        Utc::now().format("%d %B %Y")
    );
    let _ = writeln!(out, "**Jumlah Sumber**: {}", sources.len());
    out.push_str("**Platform**: LUMIRA Research Assistant v2.0\n");
    out.push_str("**Metodologi**: Analisis Multi-Sumber dengan Scoring Relevansi\n\n");
}

fn table_of_contents(out: &mut String) {
    out.push_str("## Daftar Isi\n\n");
    out.push_str("1. [Executive Summary](#executive-summary)\n");
    out.push_str("2. [Metodologi Penelitian](#metodologi-penelitian)\n");
    out.push_str("3. [Analisis Kualitas Sumber](#analisis-kualitas-sumber)\n");
    out.push_str("4. [Daftar Sumber Terurut](#daftar-sumber-terurut)\n");
    out.push_str("5. [Ringkasan Komprehensif Per Sumber](#ringkasan-komprehensif-per-sumber)\n");
    out.push_str("6. [Analisis Data Agregat](#analisis-data-agregat)\n");
    out.push_str("7. [Temuan Utama](#temuan-utama)\n");
    out.push_str("8. [Rekomendasi Strategis](#rekomendasi-strategis)\n");
    out.push_str("9. [Kesimpulan](#kesimpulan)\n\n");
}

fn executive_summary(out: &mut String, sources: &[Source], stats: &RunStats) {
    out.push_str("## Executive Summary\n\n");
    out.push_str(
        "Penelitian komprehensif ini menganalisis lanskap pendidikan vokasi digital dan \
         kesenjangan akses di Indonesia melalui analisis sistematis terhadap sumber-sumber \
         berkualitas tinggi dari institusi pemerintah, organisasi internasional, dan publikasi \
         akademik. ",
    );
    let _ = writeln!(
        out,
        "Dari {} sumber yang berhasil dianalisis, penelitian ini mengidentifikasi tren-tren \
         signifikan, tantangan utama, dan peluang dalam transformasi digital pendidikan \
         kejuruan Indonesia.\n",
        sources.len()
    );

    if !sources.is_empty() {
        let _ = writeln!(
            out,
            "**Kualitas Sumber**: Rata-rata skor relevansi {:.1}/5.0 menunjukkan tingkat \
             kredibilitas dan relevansi yang tinggi dari sumber-sumber yang dianalisis.\n",
            stats.average_score
        );
    }
}

fn methodology(out: &mut String, request: &RunRequest) {
    out.push_str("## Metodologi Penelitian\n\n");
    out.push_str("### Pendekatan Pencarian\n");
    out.push_str(
        "- **Multi-platform search**: Google Scholar, sumber pemerintah Indonesia, \
         organisasi internasional\n",
    );
    let _ = writeln!(
        out,
        "- **Rentang waktu**: {} untuk memastikan relevansi data terkini",
        request.year_range
    );
    out.push_str("- **Filtering criteria**: Minimum skor relevansi 1.0/5.0\n");
    if request.parallel {
        let _ = writeln!(
            out,
            "- **Processing**: Parallel processing untuk efisiensi dengan {} worker threads\n",
            request.workers
        );
    } else {
        out.push_str("- **Processing**: Sequential processing dengan jeda antar permintaan\n\n");
    }

    out.push_str("### Kriteria Penilaian Relevansi\n");
    out.push_str("- **Konten (40%)**: Kesesuaian topik dengan pendidikan vokasi digital\n");
    out.push_str("- **Kredibilitas sumber (25%)**: Reputasi dan otoritas institusi\n");
    out.push_str("- **Kebaruan (20%)**: Tahun publikasi dan relevansi temporal\n");
    out.push_str("- **Impact factor (15%)**: Sitasi dan pengaruh akademik\n\n");
}

fn quality_analysis(out: &mut String, sources: &[Source]) {
    out.push_str("## Analisis Kualitas Sumber\n\n");
    if sources.is_empty() {
        return;
    }

    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    for source in sources {
        *by_type.entry(source.file_type.to_string()).or_default() += 1;
    }

    out.push_str("### Distribusi Tipe Sumber\n");
    for (file_type, count) in &by_type {
        let percentage = (*count as f64 / sources.len() as f64) * 100.0;
        let _ = writeln!(
            out,
            "- **{}**: {} sumber ({:.1}%)",
            title_case(file_type),
            count,
            percentage
        );
    }
    out.push('\n');

    let (high, medium, low) = quality_buckets(sources);
    out.push_str("### Distribusi Kualitas\n");
    let _ = writeln!(out, "- **Kualitas Tinggi (4.0-5.0)**: {high} sumber");
    let _ = writeln!(out, "- **Kualitas Menengah (2.0-3.9)**: {medium} sumber");
    let _ = writeln!(out, "- **Kualitas Rendah (1.0-1.9)**: {low} sumber\n");
}

fn source_table(out: &mut String, sources: &[Source]) {
    out.push_str("## Daftar Sumber Terurut\n\n");
    out.push_str("| No | Judul | Penulis/Institusi | Tahun | Skor | Tipe | Link |\n");
    out.push_str("|:--:|:------|:------------------|:-----:|:----:|:----:|:----:|\n");

    for (i, source) in sources.iter().enumerate() {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {:.1}/5 | {} | [Link]({}) |",
            i + 1,
            shorten(&source.title, TITLE_TABLE_LIMIT),
            source.author,
            source.year,
            source.relevance_score,
            source.file_type,
            source.url
        );
    }
    out.push('\n');
}

fn source_summaries(out: &mut String, sources: &[Source]) {
    out.push_str("## Ringkasan Komprehensif Per Sumber\n\n");

    for (i, source) in sources.iter().enumerate() {
        let _ = writeln!(out, "### {}. {}\n", i + 1, source.title);
        out.push_str("**Metadata Lengkap**:\n");
        let _ = writeln!(out, "- **Penulis/Institusi**: {}", source.author);
        let _ = writeln!(out, "- **Tahun Publikasi**: {}", source.year);
        let _ = writeln!(
            out,
            "- **Tipe Dokumen**: {}",
            title_case(&source.file_type.to_string())
        );
        let _ = writeln!(out, "- **Skor Relevansi**: {:.2}/5.0", source.relevance_score);
        let _ = writeln!(out, "- **URL**: [{}]({})\n", source.url, source.url);

        out.push_str("**Ringkasan Konten**:\n");
        let _ = writeln!(out, "{}\n", source.summary);

        if !source.extracted_data.is_empty() {
            out.push_str("**Data dan Metrics Penting**:\n");
            data_bullets(out, source);
            out.push('\n');
        }

        out.push_str("---\n\n");
    }
}

fn data_bullets(out: &mut String, source: &Source) {
    let data = &source.extracted_data;
    for (label, values) in [
        ("Percentages", &data.percentages),
        ("Numbers", &data.numbers),
        ("Years Mentioned", &data.years_mentioned),
        ("Growth Indicators", &data.growth_indicators),
    ] {
        if !values.is_empty() {
            let joined = values
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "- **{label}**: {joined}");
        }
    }
    for (metric, value) in &data.metrics {
        let _ = writeln!(out, "- **{}**: {}", metric.label(), value);
    }
}

fn aggregate_data(out: &mut String, sources: &[Source]) {
    out.push_str("## Analisis Data Agregat\n\n");

    let all_data = compile_aggregate(sources);
    if !all_data.is_empty() {
        out.push_str("### Kompilasi Data Utama\n\n");
        for (metric, values) in &all_data {
            let unique: Vec<&str> = dedup_preserving(values, 5);
            let _ = writeln!(out, "**{}**: {}\n", metric, unique.join(", "));
        }
    }
}

/// Compile all extracted values across sources, keyed by data group label.
pub(crate) fn compile_aggregate(sources: &[Source]) -> BTreeMap<String, Vec<String>> {
    let mut all: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for source in sources {
        let data = &source.extracted_data;
        for (label, values) in [
            ("Percentages", &data.percentages),
            ("Numbers", &data.numbers),
            ("Years Mentioned", &data.years_mentioned),
            ("Growth Indicators", &data.growth_indicators),
        ] {
            if !values.is_empty() {
                all.entry(label.to_string())
                    .or_default()
                    .extend(values.iter().cloned());
            }
        }
        for (metric, value) in &data.metrics {
            all.entry(metric.label()).or_default().push(value.clone());
        }
    }
    all
}

/// First-seen order dedup, capped.
pub(crate) fn dedup_preserving(values: &[String], cap: usize) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    values
        .iter()
        .filter(|v| seen.insert(v.as_str()))
        .take(cap)
        .map(String::as_str)
        .collect()
}

fn key_findings(out: &mut String) {
    out.push_str("## Temuan Utama\n\n");
    out.push_str(
        "Berdasarkan analisis komprehensif terhadap sumber-sumber berkualitas tinggi, \
         penelitian ini mengidentifikasi beberapa temuan kunci:\n\n",
    );

    out.push_str("### 1. Status Pendidikan Vokasi Digital\n");
    out.push_str(
        "- Transformasi digital pendidikan kejuruan Indonesia menunjukkan progres signifikan\n",
    );
    out.push_str("- Disparitas akses dan kualitas masih menjadi tantangan utama\n");
    out.push_str("- Kolaborasi industri-akademia semakin menguat\n\n");

    out.push_str("### 2. Kesenjangan Akses\n");
    out.push_str("- Gap digital antara daerah urban dan rural tetap substansial\n");
    out.push_str("- Infrastruktur teknologi menjadi faktor pembatas utama\n");
    out.push_str("- Disparitas kualitas tenaga pengajar dan fasilitas\n\n");

    out.push_str("### 3. Tren Teknologi Pendidikan\n");
    out.push_str("- Adopsi platform pembelajaran online meningkat drastis\n");
    out.push_str("- Integrasi AI dan adaptive learning mulai diimplementasikan\n");
    out.push_str("- Sertifikasi digital semakin diakui industri\n\n");
}

fn recommendations(out: &mut String) {
    out.push_str("## Rekomendasi Strategis\n\n");
    out.push_str(
        "Berdasarkan analisis mendalam, berikut rekomendasi strategis untuk pengembangan \
         ekosistem pendidikan vokasi digital Indonesia:\n\n",
    );

    out.push_str("### Rekomendasi Jangka Pendek (1-2 tahun)\n");
    out.push_str("1. **Penguatan Infrastruktur Digital**\n");
    out.push_str("   - Prioritas peningkatan konektivitas internet di daerah tertinggal\n");
    out.push_str("   - Standardisasi minimum perangkat teknologi di SMK\n");
    out.push_str("   - Program subsidi akses internet untuk institusi pendidikan\n\n");

    out.push_str("2. **Pengembangan Kapasitas SDM**\n");
    out.push_str("   - Program pelatihan intensif untuk tenaga pengajar\n");
    out.push_str("   - Sertifikasi kompetensi digital untuk guru SMK\n");
    out.push_str("   - Kemitraan dengan industri teknologi untuk transfer knowledge\n\n");

    out.push_str("### Rekomendasi Jangka Menengah (3-5 tahun)\n");
    out.push_str("1. **Inovasi Kurikulum dan Pedagogi**\n");
    out.push_str("   - Integrasi teknologi emerging (AI, IoT, Big Data) dalam kurikulum\n");
    out.push_str("   - Pengembangan model pembelajaran hybrid dan adaptive\n");
    out.push_str("   - Standardisasi kompetensi digital nasional\n\n");

    out.push_str("2. **Ekosistem Kolaboratif**\n");
    out.push_str("   - Platform nasional untuk sharing resources dan best practices\n");
    out.push_str("   - Kemitraan strategis dengan perusahaan teknologi global\n");
    out.push_str("   - Pengembangan research center untuk educational technology\n\n");

    out.push_str("### Rekomendasi Jangka Panjang (5+ tahun)\n");
    out.push_str("1. **Transformasi Sistemik**\n");
    out.push_str("   - Implementasi penuh Industry 4.0 framework dalam pendidikan vokasi\n");
    out.push_str("   - Pengembangan AI-powered personalized learning systems\n");
    out.push_str("   - Integrasi blockchain untuk sertifikasi dan kredensial digital\n\n");
}

fn conclusion(out: &mut String) {
    out.push_str("## Kesimpulan\n\n");
    out.push_str(
        "Penelitian ini menunjukkan bahwa Indonesia berada pada titik kritis dalam transformasi \
         digital pendidikan vokasi. Meskipun terdapat kemajuan signifikan dalam beberapa aspek, \
         kesenjangan akses dan kualitas masih memerlukan perhatian serius. Implementasi \
         rekomendasi strategis yang sistematis dan terkoordinasi akan menjadi kunci keberhasilan \
         dalam menciptakan ekosistem pendidikan vokasi digital yang inklusif dan berkualitas \
         tinggi.\n\n",
    );
    out.push_str(
        "**Catatan**: Laporan ini dihasilkan menggunakan LUMIRA Research Assistant v2.0 dengan \
         metodologi analisis multi-sumber dan scoring otomatis untuk memastikan objektivitas dan \
         komprehensivitas analisis.\n",
    );
}

fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let capped: String = text.chars().take(max_chars).collect();
    format!("{capped}...")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
