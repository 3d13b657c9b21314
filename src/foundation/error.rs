use std::path::PathBuf;

/// Result alias used across the crate.
pub type PlaceheatResult<T> = Result<T, PlaceheatError>;

/// Errors raised by the conversion stages.
///
/// Every variant's display string starts with the stage that failed.
#[derive(thiserror::Error, Debug)]
pub enum PlaceheatError {
    /// The HTTP request could not be completed (or returned a non-2xx status when checked).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The local input file could not be opened.
    #[error("open error: '{}': {source}", .path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A CSV row was malformed or a coordinate column was not a base-10 integer.
    #[error("parse error: line {line}: field {field}: {reason} (record: {record:?})")]
    Parse {
        /// 1-based line number reported by the CSV reader.
        line: u64,
        /// `"x"`, `"y"` or `"record"` for reader-level failures.
        field: &'static str,
        /// Raw row content, fields re-joined with commas.
        record: String,
        /// Human readable cause.
        reason: String,
    },

    /// The density renderer rejected its inputs.
    #[error("render error: {0}")]
    Render(String),

    /// The output could not be encoded or written.
    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlaceheatError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn parse(
        line: u64,
        field: &'static str,
        record: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Parse {
            line,
            field,
            record: record.into(),
            reason: reason.into(),
        }
    }

    /// Short stage name; the CLI leads its diagnostic with it.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Fetch(_) | Self::Open { .. } => "source",
            Self::Parse { .. } => "parse",
            Self::Render(_) => "render",
            Self::Encode(_) => "encode",
            Self::Other(_) => "other",
        }
    }
}
