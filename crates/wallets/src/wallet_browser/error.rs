use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum BrowserWalletError {
    #[error("{operation} rejected: {reason}")]
    Rejected { operation: &'static str, reason: String },

    #[error("Browser wallet returned an error for {method} (code {code:?}): {message}")]
    Provider { method: String, code: Option<i64>, message: String },

    #[error("{operation} timed out after {timeout:?}, is the wallet page still open?")]
    Timeout { operation: String, timeout: Duration },

    #[error("Unexpected response to {method}: {source}")]
    InvalidResponse {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Browser wallet server is not running")]
    NotRunning,

    #[error("Server error: {0}")]
    ServerError(#[from] std::io::Error),
}
