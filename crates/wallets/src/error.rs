use alloy_primitives::{TxHash, hex::FromHexError};
use alloy_provider::PendingTransactionError;
use alloy_signer_local::LocalSignerError;
use alloy_transport::TransportError;

#[cfg(feature = "browser")]
use crate::wallet_browser::error::BrowserWalletError;

#[derive(Debug, thiserror::Error)]
pub enum PrivateKeyError {
    #[error("Failed to create wallet from private key. Private key is invalid hex: {0}")]
    InvalidHex(#[from] FromHexError),
    #[error(
        "Failed to create wallet from private key. Invalid private key. But env var {0} exists. Is the `$` anchor missing?"
    )]
    ExistsAsEnvVar(String),
}

/// Errors returned by a [`WalletProvider`](crate::WalletProvider).
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// The user declined the request in their wallet.
    #[error("{operation} rejected: {reason}")]
    Rejected { operation: &'static str, reason: String },
    /// The wallet has not authorized any account yet.
    #[error("no account has been authorized")]
    NotAuthorized,
    /// The transaction was mined but its execution failed.
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Pending(#[from] PendingTransactionError),
    #[error(transparent)]
    Local(#[from] LocalSignerError),
    #[error("Failed to decrypt keystore: incorrect password")]
    IncorrectKeystorePassword,
    #[cfg(feature = "browser")]
    #[error(transparent)]
    Browser(#[from] BrowserWalletError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("nft-mint was not built with support for {0} wallets")]
    Unsupported(&'static str),
}

impl WalletError {
    pub fn browser_unsupported() -> Self {
        Self::Unsupported("browser")
    }

    /// Whether the user, rather than the wallet or the network, stopped the request.
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Rejected { .. } => true,
            #[cfg(feature = "browser")]
            Self::Browser(BrowserWalletError::Rejected { .. }) => true,
            _ => false,
        }
    }
}
