//! Pipeline stages for a research run.
//!
//! - `research::run_research`: full topic -> ranked sources orchestration
//! - `process::SourceProcessor`: bounded-pool candidate processing

pub mod dedup;
pub mod extract;
pub mod process;
pub mod registry;
pub mod research;
pub mod score;
pub mod summarize;

pub use dedup::filter_candidates;
pub use extract::DataPointExtractor;
pub use process::SourceProcessor;
pub use registry::UrlRegistry;
pub use research::{rank_sources, run_research};
pub use score::RelevanceScorer;
pub use summarize::Summarizer;
