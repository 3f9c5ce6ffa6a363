use alloy_network::{EthereumWallet, ReceiptResponse};
use alloy_primitives::{Address, TxHash};
use alloy_provider::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use eyre::WrapErr;
use parking_lot::Mutex;
use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use crate::{error::WalletError, provider::WalletProvider};

/// A signer held by the terminal rather than by a wallet extension.
#[derive(Clone, Debug)]
pub enum LocalSigner {
    /// Ready to sign; its account counts as authorized.
    Unlocked(PrivateKeySigner),
    /// Encrypted keystore waiting for its password.
    Keystore(PathBuf),
}

impl LocalSigner {
    pub fn address(&self) -> Option<Address> {
        match self {
            Self::Unlocked(signer) => Some(signer.address()),
            Self::Keystore(_) => None,
        }
    }
}

/// Wallet backed by a JSON-RPC node and a [LocalSigner].
///
/// Unlocking a keystore plays the part of the extension's authorization popup: until then the
/// wallet reports no accounts.
pub struct RpcWallet {
    url: Url,
    reader: DynProvider,
    signer: Mutex<LocalSigner>,
}

impl fmt::Debug for RpcWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcWallet")
            .field("url", &self.url.as_str())
            .field("signer", &*self.signer.lock())
            .finish_non_exhaustive()
    }
}

impl RpcWallet {
    pub fn new(rpc_url: &str, signer: LocalSigner, poll_interval: Duration) -> eyre::Result<Self> {
        let url: Url = rpc_url.parse().wrap_err_with(|| format!("invalid RPC URL `{rpc_url}`"))?;
        let reader = ProviderBuilder::new().connect_http(url.clone()).erased();
        reader.client().set_poll_interval(poll_interval);
        Ok(Self { url, reader, signer: Mutex::new(signer) })
    }

    fn unlock(path: &Path) -> Result<PrivateKeySigner, WalletError> {
        let password =
            rpassword::prompt_password(format!("Enter password for keystore {}: ", path.display()))
                .map_err(|err| WalletError::Rejected {
                    operation: "Authorization",
                    reason: err.to_string(),
                })?;
        if password.is_empty() {
            return Err(WalletError::Rejected {
                operation: "Authorization",
                reason: "no password entered".to_string(),
            });
        }
        PrivateKeySigner::decrypt_keystore(path, password)
            .map_err(|_| WalletError::IncorrectKeystorePassword)
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.signer.lock().address().into_iter().collect())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let mut signer = self.signer.lock();
        if let LocalSigner::Keystore(path) = &*signer {
            let unlocked = Self::unlock(path)?;
            debug!(address = %unlocked.address(), "unlocked keystore");
            *signer = LocalSigner::Unlocked(unlocked);
        }
        Ok(signer.address().into_iter().collect())
    }

    async fn chain_id(&self) -> Result<String, WalletError> {
        let id = self.reader.get_chain_id().await?;
        Ok(format!("{id:#x}"))
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, WalletError> {
        let signer = match &*self.signer.lock() {
            LocalSigner::Unlocked(signer) => signer.clone(),
            LocalSigner::Keystore(_) => return Err(WalletError::NotAuthorized),
        };
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new().wallet(wallet).connect_http(self.url.clone());
        let pending = provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }

    async fn confirm(&self, hash: TxHash) -> Result<TxHash, WalletError> {
        let receipt =
            PendingTransactionBuilder::new(self.reader.root().clone(), hash).get_receipt().await?;
        if !receipt.status() {
            return Err(WalletError::Reverted(hash));
        }
        Ok(receipt.transaction_hash())
    }
}
