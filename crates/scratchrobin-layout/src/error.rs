#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] scratchrobin_graph::Error),
    #[error("invalid layout options: {0}")]
    Options(#[from] serde_json::Error),
    #[error(transparent)]
    External(#[from] ExternalError),
}

/// Failures of the external layout tool. Only surfaced when `strict_external` is set; otherwise
/// the Graphviz engine falls back to the layered layout.
#[derive(Debug, thiserror::Error)]
pub enum ExternalError {
    #[error("layout tool `{program}` was not found on PATH")]
    Unavailable { program: String },
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` did not finish within {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },
    #[error("`{program}` exited with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("unusable output from `{program}`: {reason}")]
    Output { program: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
