use std::time::Duration;

use alloy_primitives::{Address, TxHash, U64};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::{
    error::WalletError,
    provider::WalletProvider,
    wallet_browser::{error::BrowserWalletError, server::BrowserWalletServer},
};

/// The wallet injected in the user's browser, reached through a [BrowserWalletServer].
#[derive(Debug, Clone)]
pub struct BrowserWallet {
    server: BrowserWalletServer,
    poll_interval: Duration,
}

/// The part of `eth_getTransactionReceipt` the wallet needs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptStatus {
    transaction_hash: TxHash,
    /// Absent on pre-Byzantium receipts.
    #[serde(default)]
    status: Option<U64>,
}

impl BrowserWallet {
    pub fn new(server: BrowserWalletServer, poll_interval: Duration) -> Self {
        Self { server, poll_interval }
    }

    pub fn server(&self) -> &BrowserWalletServer {
        &self.server
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, BrowserWalletError> {
        let value = self.server.request(method, params).await?;
        serde_json::from_value(value).map_err(|source| BrowserWalletError::InvalidResponse {
            method: method.to_string(),
            source,
        })
    }
}

#[async_trait]
impl WalletProvider for BrowserWallet {
    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.call("eth_accounts", json!([])).await?)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.call("eth_requestAccounts", json!([])).await?)
    }

    async fn chain_id(&self) -> Result<String, WalletError> {
        Ok(self.call("eth_chainId", json!([])).await?)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, WalletError> {
        Ok(self.call("eth_sendTransaction", json!([tx])).await?)
    }

    async fn confirm(&self, hash: TxHash) -> Result<TxHash, WalletError> {
        loop {
            let receipt: Option<ReceiptStatus> =
                self.call("eth_getTransactionReceipt", json!([hash])).await?;
            if let Some(receipt) = receipt {
                if receipt.status.is_some_and(|status| status.is_zero()) {
                    return Err(WalletError::Reverted(hash));
                }
                return Ok(receipt.transaction_hash);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
