//! Mixdesk Analysis
//!
//! The analysis pass for one uploaded audio version, plus the collaborator
//! implementations it runs with.
//!
//! This crate provides:
//! - `AudioAnalyzer`: skip-if-populated, fetch once, decode once, measure,
//!   parse and write one record
//! - `HttpFetcher` / `FileFetcher` / `SourceFetcher`: raw byte sources
//! - `SymphoniaDecoder`: planar `f32` decoding
//! - `MemoryStore`: in-memory `MetadataStore`
//!
//! # Example
//!
//! ```rust,no_run
//! use mixdesk_analysis::{
//!     AnalysisRequest, AudioAnalyzer, FetchOptions, MemoryStore, SourceFetcher, SymphoniaDecoder,
//! };
//! use mixdesk_core::CancellationToken;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = AudioAnalyzer::new(
//!     SourceFetcher::new(&FetchOptions::default())?,
//!     SymphoniaDecoder::new(),
//!     MemoryStore::new(),
//! );
//!
//! let request = AnalysisRequest::new("version-1", "https://cdn.example.com/mix.wav");
//! let outcome = analyzer.analyze_version(&request, &CancellationToken::new()).await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod decode;
mod error;
mod fetch;
mod store;

pub use analyzer::{
    analyze_bytes, AnalysisOutcome, AnalysisRequest, AudioAnalyzer, ANALYSIS_VERSION,
};
pub use decode::SymphoniaDecoder;
pub use error::{AnalysisError, Result};
pub use fetch::{is_remote, FetchOptions, FileFetcher, HttpFetcher, SourceFetcher};
pub use store::MemoryStore;
