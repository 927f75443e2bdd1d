use thiserror::Error;

/// Shared error type for the sf2ranges tools.
#[derive(Debug, Error)]
pub enum Sf2RangesError {
    #[error("{0} could not be opened!")]
    SoundFontFileOpenFailed(String),

    #[error("Failed to analyze SF2 file! {0}")]
    SoundFontAnalysisFailed(String),

    #[error("Invalid glob pattern! {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Failed to serialize the JSON report! {0}")]
    ReportSerializationFailed(#[from] serde_json::Error),

    #[error("{0}")]
    IoError(#[from] std::io::Error),
}
