//! Subcommand implementations
//!
//! Each command returns its result; `main` prints it.

use crate::config::AnalyzerConfig;
use crate::error::Result;
use mixdesk_analysis::{
    AnalysisError, AnalysisOutcome, AnalysisRequest, AudioAnalyzer, FileFetcher, MemoryStore,
    SourceFetcher, SymphoniaDecoder,
};
use mixdesk_core::{
    AudioDecoder, AudioFetcher, AudioHeaderMeta, AudioMetadataRecord, CancellationToken,
    FileFormat,
};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Analyze one source (URL or local path) and return the record
///
/// Uses a fresh in-memory store, so the pipeline always runs.
pub async fn analyze(
    config: &AnalyzerConfig,
    source: &str,
    file_name: Option<&str>,
    version_id: &str,
    cancel: &CancellationToken,
) -> Result<AudioMetadataRecord> {
    let fetcher = SourceFetcher::new(&config.fetch_options())?;
    let analyzer = AudioAnalyzer::new(fetcher, SymphoniaDecoder::new(), MemoryStore::new());

    let mut request = AnalysisRequest::new(version_id, source);
    if let Some(name) = file_name {
        request = request.with_file_name(name);
    }

    match analyzer.analyze_version(&request, cancel).await? {
        AnalysisOutcome::Analyzed(record) => Ok(record),
        // An empty store has nothing populated
        AnalysisOutcome::Skipped => Err(AnalysisError::Store(format!(
            "Version {} unexpectedly already analyzed",
            version_id
        ))
        .into()),
    }
}

/// Header fields of one file, as printed by `header`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderReport {
    pub bit_depth: Option<u16>,
    pub file_format: FileFormat,
    /// `None` for unrecognized formats
    pub mime_type: Option<&'static str>,
}

impl From<AudioHeaderMeta> for HeaderReport {
    fn from(meta: AudioHeaderMeta) -> Self {
        Self {
            mime_type: meta.file_format.mime_type(),
            bit_depth: meta.bit_depth,
            file_format: meta.file_format,
        }
    }
}

/// Read the container header of a local file
pub async fn header(path: &Path) -> Result<HeaderReport> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path.file_name().and_then(|name| name.to_str());

    let meta = mixdesk_header::parse(&bytes, file_name);
    debug!(path = %path.display(), bit_depth = ?meta.bit_depth, format = %meta.file_format, "Header read");
    Ok(HeaderReport::from(meta))
}

/// Integrated loudness of a local file in LUFS (`-inf` for silence)
pub async fn loudness(path: &Path, cancel: &CancellationToken) -> Result<f64> {
    let source = path.to_string_lossy();
    let bytes = FileFetcher::new()
        .fetch(&source, cancel)
        .await
        .map_err(AnalysisError::fetch)?;

    let file_name = path.file_name().and_then(|name| name.to_str());
    let samples = SymphoniaDecoder::new()
        .decode(bytes, file_name, cancel)
        .await
        .map_err(AnalysisError::decode)?;

    let token = cancel.clone();
    let lufs = tokio::task::spawn_blocking(move || {
        mixdesk_loudness::measure_with_cancel(&samples, &token)
    })
    .await
    .map_err(AnalysisError::from)?
    .map_err(AnalysisError::from)?;

    Ok(lufs)
}

/// Render a loudness value for display
pub fn format_lufs(lufs: f64) -> String {
    if lufs.is_finite() {
        format!("{:.2} LUFS", lufs)
    } else {
        "-inf LUFS".to_string()
    }
}
