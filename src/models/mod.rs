//! Data models for the research pipeline.

pub mod config;
pub mod run;
pub mod source;

pub use config::{Config, HttpConfig, KeywordConfig, ScoringConfig, SearchConfig};
pub use run::{RunRequest, RunStats};
pub use source::{Candidate, ExtractedData, FileType, Language, Metric, Source};
