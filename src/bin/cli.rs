//! LUMIRA Research Assistant CLI
//!
//! Local execution entry point: runs the full research pipeline and writes
//! the report artifacts to the output folder.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lumira::{
    error::{AppError, Result},
    models::{Config, Language, RunRequest},
    pipeline,
    report::ReportWriter,
};

/// LUMIRA - Research Assistant for Indonesian vocational education
#[derive(Parser, Debug)]
#[command(
    name = "lumira",
    version,
    about = "Multi-source research collection and reporting"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "lumira.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full research pipeline: discover, process, report
    Run {
        /// Research topic
        #[arg(long, default_value = "akses pendidikan vokasi di Indonesia")]
        topic: String,

        /// Publication year range, as YYYY-YYYY
        #[arg(long, default_value = "2021-2025")]
        year_range: String,

        /// Output folder for report artifacts
        #[arg(long, default_value = "Riset Vokasi Indonesia LUMIRA")]
        output_folder: PathBuf,

        /// Maximum number of sources to retain
        #[arg(long, default_value_t = 25)]
        max_sources: usize,

        /// Summary language: id or en
        #[arg(long, default_value = "id")]
        lang: String,

        /// Process candidates one at a time instead of on a worker pool
        #[arg(long)]
        sequential: bool,

        /// Worker count for parallel processing
        #[arg(long, default_value_t = 4)]
        workers: usize,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn parse_language(lang: &str) -> Result<Language> {
    match lang {
        "id" => Ok(Language::Id),
        "en" => Ok(Language::En),
        other => Err(AppError::config(format!(
            "Unsupported language '{other}' (expected 'id' or 'en')"
        ))),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("LUMIRA Research Assistant starting...");

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Run {
            topic,
            year_range,
            output_folder,
            max_sources,
            lang,
            sequential,
            workers,
        } => {
            config.validate()?;
            let request = RunRequest {
                topic,
                year_range,
                max_sources,
                language: parse_language(&lang)?,
                parallel: !sequential,
                workers,
            };

            println!("LUMIRA Research Assistant v2.0");
            println!("{}", "=".repeat(60));
            println!("Topik Penelitian: {}", request.topic);
            println!("Rentang Tahun: {}", request.year_range);
            println!("Folder Output: {}", output_folder.display());
            println!("Target Sumber: {}", request.max_sources);
            println!(
                "Mode Pemrosesan: {}",
                if request.parallel { "Paralel" } else { "Sequential" }
            );
            if request.parallel {
                println!("Worker Threads: {}", request.workers);
            }
            println!("{}", "=".repeat(60));

            let (sources, stats) = pipeline::run_research(&config, &request).await?;

            if sources.is_empty() {
                println!("PERINGATAN: Tidak ada sumber yang berhasil dikumpulkan.");
                println!("Kemungkinan penyebab:");
                println!("- Koneksi internet bermasalah");
                println!("- Sumber target sedang tidak dapat diakses");
                println!("- Topik pencarian terlalu spesifik");
                println!("\nCoba dengan topik yang lebih umum atau periksa koneksi internet.");
                return Ok(());
            }

            let writer = ReportWriter::new(&output_folder);
            let written = writer.write_all(&config, &request, &sources, &stats).await?;

            let elapsed = (stats.end_time - stats.start_time).num_seconds();
            println!("\n{}", "=".repeat(60));
            println!("PENELITIAN SELESAI");
            println!("{}", "=".repeat(60));
            println!("Total waktu pemrosesan: {elapsed} detik");
            println!("Folder hasil: {}", output_folder.display());
            println!("Jumlah sumber dianalisis: {}", sources.len());
            println!("Rata-rata skor relevansi: {:.2}/5.0", stats.average_score);

            println!("\nTOP 5 SUMBER PALING RELEVAN:");
            println!("{}", "-".repeat(60));
            for (i, source) in sources.iter().take(5).enumerate() {
                let title: String = if source.title.chars().count() > 55 {
                    format!("{}...", source.title.chars().take(55).collect::<String>())
                } else {
                    source.title.clone()
                };
                println!("{}. {}", i + 1, title);
                println!(
                    "   Skor: {:.2}/5.0 | {} ({})",
                    source.relevance_score, source.author, source.year
                );
                println!();
            }

            println!("FILE OUTPUT:");
            for file in &written {
                println!("- {file}");
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK (HTTP, search limits, scoring, and keywords)");

            log::info!("All validations passed!");
        }
    }

    log::info!("Done!");

    Ok(())
}
