use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// An EIP-1193 request waiting for the page to forward it to `window.ethereum`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BrowserRequest {
    pub id: Uuid,
    pub method: String,
    pub params: Value,
}

/// The page's answer to a [BrowserRequest].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BrowserResponse {
    pub id: Uuid,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    /// EIP-1193 error code, `4001` when the user rejected the request.
    #[serde(default)]
    pub code: Option<i64>,
}

/// Sent by the page once it loaded and looked for an injected wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PageHello {
    pub installed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub(crate) enum BrowserApiResponse<T = ()> {
    Ok(T),
    Error { message: String },
}

impl BrowserApiResponse {
    pub fn ok() -> Self {
        Self::Ok(())
    }
}

impl<T> BrowserApiResponse<T> {
    pub fn with_data(data: T) -> Self {
        Self::Ok(data)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}
