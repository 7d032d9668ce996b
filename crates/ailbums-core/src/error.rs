use thiserror::Error;

/// Longest slice of a server error body kept on a `Status` error.
const MAX_DETAIL_LEN: usize = 200;

/// Why a single submission failed. Any of these aborts the whole batch.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("analysis server unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("request to analysis server failed: {0}")]
    Transport(String),

    #[error("analysis server returned HTTP {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("malformed analysis response: {0}")]
    Malformed(String),

    #[error("cannot read image {name}: {source}")]
    Asset {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl SubmissionError {
    pub fn status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let detail = if body.is_empty() {
            None
        } else {
            Some(body.chars().take(MAX_DETAIL_LEN).collect())
        };
        SubmissionError::Status { status, detail }
    }

    /// Maps a reqwest failure onto the taxonomy above.
    pub fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            SubmissionError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            SubmissionError::status(status.as_u16(), "")
        } else if err.is_connect() || err.is_timeout() {
            SubmissionError::Unreachable {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            SubmissionError::Transport(err.to_string())
        }
    }

    /// True when the backend could not be talked to at all.
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(
            self,
            SubmissionError::Unreachable { .. } | SubmissionError::Transport(_)
        )
    }

    /// Human-readable cause shown to the user as the batch error message.
    pub fn user_message(&self, asset_name: &str) -> String {
        match self {
            SubmissionError::Unreachable { .. } | SubmissionError::Transport(_) => format!(
                "Failed to process image {}: {}. Please ensure the backend server is running.",
                asset_name, self
            ),
            SubmissionError::Status { status, detail } => match detail {
                Some(detail) => format!(
                    "Failed to process image {}: the analysis server returned an error (HTTP {}): {}",
                    asset_name, status, detail
                ),
                None => format!(
                    "Failed to process image {}: the analysis server returned an error (HTTP {}).",
                    asset_name, status
                ),
            },
            SubmissionError::Malformed(reason) => format!(
                "Failed to process image {}: the analysis server sent a bad response ({}).",
                asset_name, reason
            ),
            SubmissionError::Asset { source, .. } => format!(
                "Failed to process image {}: the file could not be read ({}).",
                asset_name, source
            ),
        }
    }
}

/// Precondition violations of a batch run. The running batch is never touched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    #[error("no images selected")]
    EmptyBatch,

    #[error("a batch is already running")]
    AlreadyRunning,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("selection is locked while a batch is running")]
    BatchRunning,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment configuration: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid analysis endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
