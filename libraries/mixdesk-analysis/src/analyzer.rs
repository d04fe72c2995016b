//! Analysis pipeline for one audio version
//!
//! Fetches the raw bytes once and decodes them once, then runs loudness
//! measurement and header parsing over the shared results and writes a
//! single metadata record. A cancelled run never writes.

use crate::error::{AnalysisError, Result};
use mixdesk_core::{
    AudioDecoder, AudioFetcher, AudioMetadataRecord, AudioVersionId, CancellationToken,
    MetadataStore, SampleBuffer,
};
use tracing::{debug, info, warn};

/// Version of the analysis algorithm, stamped into logs
pub const ANALYSIS_VERSION: &str = "1.0.0-bs1770";

/// One audio version to analyze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub version_id: AudioVersionId,
    /// URL or path handed to the fetcher
    pub source: String,
    /// Original file name, used for the extension fallback and decoder hint
    pub file_name: Option<String>,
}

impl AnalysisRequest {
    pub fn new(version_id: impl Into<AudioVersionId>, source: impl Into<String>) -> Self {
        Self {
            version_id: version_id.into(),
            source: source.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Explicit file name, else the last path segment of the source
    pub fn file_name(&self) -> Option<&str> {
        self.file_name
            .as_deref()
            .or_else(|| file_name_from_source(&self.source))
    }
}

/// Last path segment of a URL or path, without query or fragment
fn file_name_from_source(source: &str) -> Option<&str> {
    let path = source.split(['?', '#']).next().unwrap_or(source);
    path.rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.is_empty())
}

/// What `analyze_version` did
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The store already had every field; nothing was fetched
    Skipped,
    /// The record that was written
    Analyzed(AudioMetadataRecord),
}

/// Measure loudness and parse the header of one asset, then merge
///
/// Sample rate comes from the decoded buffer, bit depth and format from
/// the header, loudness from the meter. Deterministic for identical input.
///
/// # Errors
/// Returns `AnalysisError::Cancelled` once the token fires
pub fn analyze_bytes(
    bytes: &[u8],
    samples: &SampleBuffer,
    file_name: Option<&str>,
    cancel: &CancellationToken,
) -> Result<AudioMetadataRecord> {
    let report = mixdesk_loudness::LoudnessMeter::new(samples.sample_rate().as_hz())
        .analyze_with_cancel(samples, cancel)?;
    let header = mixdesk_header::parse(bytes, file_name);

    debug!(
        lufs = report.integrated_lufs,
        blocks = report.block_count,
        gated_blocks = report.gated_block_count,
        bit_depth = ?header.bit_depth,
        format = %header.file_format,
        "Analysis merged"
    );

    Ok(AudioMetadataRecord::new(
        report.integrated_lufs,
        samples.sample_rate().as_hz(),
        header,
    ))
}

/// Runs the fetch, decode, measure and persist pipeline
pub struct AudioAnalyzer<F, D, S> {
    fetcher: F,
    decoder: D,
    store: S,
}

impl<F, D, S> AudioAnalyzer<F, D, S>
where
    F: AudioFetcher,
    D: AudioDecoder,
    S: MetadataStore,
{
    pub fn new(fetcher: F, decoder: D, store: S) -> Self {
        Self {
            fetcher,
            decoder,
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Analyze one version unless its metadata is already populated
    ///
    /// # Errors
    /// - `Cancelled` if the token fired; nothing was written
    /// - `Fetch` / `Decode` if the asset could not be read
    /// - `Store` if the metadata store failed
    pub async fn analyze_version(
        &self,
        request: &AnalysisRequest,
        cancel: &CancellationToken,
    ) -> Result<AnalysisOutcome> {
        let id = &request.version_id;

        if cancel.is_cancelled() {
            debug!(version_id = %id, "Analysis cancelled before start");
            return Err(AnalysisError::Cancelled);
        }

        if let Some(stored) = self.store.load(id).await.map_err(AnalysisError::store)? {
            if stored.is_populated() {
                debug!(version_id = %id, "Metadata already populated, skipping analysis");
                return Ok(AnalysisOutcome::Skipped);
            }
        }

        let result = self.run(request, cancel).await;

        match &result {
            Ok(record) => info!(
                version_id = %id,
                analysis_version = ANALYSIS_VERSION,
                lufs = ?record.measured_lufs,
                sample_rate = record.sample_rate,
                bit_depth = ?record.bit_depth,
                format = %record.file_format,
                "Audio analyzed"
            ),
            Err(e) if e.is_cancelled() => debug!(version_id = %id, "Analysis cancelled"),
            Err(e) => warn!(version_id = %id, error = %e, "Analysis failed"),
        }

        result.map(AnalysisOutcome::Analyzed)
    }

    async fn run(
        &self,
        request: &AnalysisRequest,
        cancel: &CancellationToken,
    ) -> Result<AudioMetadataRecord> {
        let file_name = request.file_name();

        let bytes = self
            .fetcher
            .fetch(&request.source, cancel)
            .await
            .map_err(AnalysisError::fetch)?;

        let samples = self
            .decoder
            .decode(bytes.clone(), file_name, cancel)
            .await
            .map_err(AnalysisError::decode)?;

        let name = file_name.map(str::to_owned);
        let token = cancel.clone();
        let record = tokio::task::spawn_blocking(move || {
            analyze_bytes(&bytes, &samples, name.as_deref(), &token)
        })
        .await??;

        // The token may have fired after measurement finished
        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }

        self.store
            .update(&request.version_id, &record)
            .await
            .map_err(AnalysisError::store)?;

        Ok(record)
    }
}
