use alloy_primitives::{Address, TxHash};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use std::fmt;

use crate::error::WalletError;

/// The capabilities the minting app needs from a wallet, modelled on the
/// [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193) methods a browser wallet exposes.
#[async_trait]
pub trait WalletProvider: fmt::Debug + Send + Sync {
    /// Accounts the wallet has already authorized. Never prompts (`eth_accounts`).
    async fn accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Asks the user to authorize their accounts (`eth_requestAccounts`).
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// The active chain id exactly as the wallet reports it, e.g. `0x13881` (`eth_chainId`).
    async fn chain_id(&self) -> Result<String, WalletError>;

    /// Signs and broadcasts `tx`, returning its hash once the wallet accepted it.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, WalletError>;

    /// Waits until the transaction is mined and succeeded.
    ///
    /// Waits for as long as it takes; callers bound it themselves.
    async fn confirm(&self, hash: TxHash) -> Result<TxHash, WalletError>;
}
