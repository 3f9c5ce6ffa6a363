use alloy_primitives::TxHash;
use mint_wallets::WalletError;
use std::time::Duration;

/// Why a mint attempt did not end with a mined transaction.
#[derive(Debug, thiserror::Error)]
pub enum MintError {
    #[error("Ethereum object does not exist")]
    ProviderMissing,
    #[error("connect a wallet before minting")]
    NotConnected,
    #[error("switch your wallet to {network} before minting")]
    WrongNetwork { network: String },
    #[error("a mint is already in progress")]
    AlreadyMining,
    #[error("transaction {hash} was not mined within {}s", timeout.as_secs())]
    Timeout { hash: TxHash, timeout: Duration },
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl MintError {
    /// Whether the user declined the transaction in their wallet.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Wallet(err) if err.is_rejection())
    }
}
