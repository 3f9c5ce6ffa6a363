//! Typed handle on the NFT collection contract.

use alloy_primitives::{Address, Bytes, TxHash, TxKind, U256};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::{SolCall, sol};
use mint_config::{InvalidConfigError, MintConfig};
use mint_wallets::WalletProvider;
use std::{sync::Arc, time::Duration};

use crate::error::MintError;

sol! {
    /// The part of the collection's interface used for minting.
    interface INFTCollectible {
        function mintNFTs(uint256 _count) external payable;
    }
}

/// The collection contract, bound to its address, price and mint quantity.
#[derive(Clone, Debug)]
pub struct NftContract {
    address: Address,
    price: U256,
    quantity: u64,
    provider: Option<Arc<dyn WalletProvider>>,
}

impl NftContract {
    pub fn new(
        address: Address,
        price: U256,
        quantity: u64,
        provider: Option<Arc<dyn WalletProvider>>,
    ) -> Self {
        Self { address, price, quantity, provider }
    }

    pub fn from_config(
        config: &MintConfig,
        provider: Option<Arc<dyn WalletProvider>>,
    ) -> Result<Self, InvalidConfigError> {
        let price = config.mint_price_wei()?;
        Ok(Self::new(config.contract_address, price, config.mint_quantity, provider))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Price paid per mint, in wei.
    pub fn price(&self) -> U256 {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// ABI-encoded `mintNFTs(quantity)`.
    pub fn calldata(&self) -> Bytes {
        INFTCollectible::mintNFTsCall { _count: U256::from(self.quantity) }.abi_encode().into()
    }

    /// The payable mint transaction sent from `from`.
    ///
    /// The calldata is set as both `input` and `data`, as some wallets only read the latter.
    pub fn transaction(&self, from: Address) -> TransactionRequest {
        TransactionRequest {
            from: Some(from),
            to: Some(TxKind::Call(self.address)),
            value: Some(self.price),
            input: TransactionInput::both(self.calldata()),
            ..Default::default()
        }
    }

    /// Submits the mint transaction. Resolves once the wallet broadcast it.
    pub async fn mint(&self, from: Address) -> Result<PendingMint, MintError> {
        let Some(provider) = &self.provider else {
            warn!("Ethereum object does not exist");
            return Err(MintError::ProviderMissing);
        };
        let hash = provider.send_transaction(self.transaction(from)).await?;
        Ok(PendingMint { hash, provider: provider.clone() })
    }
}

/// A broadcast mint transaction that may not be mined yet.
#[derive(Debug)]
#[must_use = "a mint is complete only once confirmed"]
pub struct PendingMint {
    hash: TxHash,
    provider: Arc<dyn WalletProvider>,
}

impl PendingMint {
    pub fn tx_hash(&self) -> TxHash {
        self.hash
    }

    /// Waits until the transaction is mined, for at most `timeout` if given.
    pub async fn confirm(self, timeout: Option<Duration>) -> Result<TxHash, MintError> {
        let wait = self.provider.confirm(self.hash);
        let Some(timeout) = timeout else {
            return Ok(wait.await?);
        };
        match tokio::time::timeout(timeout, wait).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(MintError::Timeout { hash: self.hash, timeout }),
        }
    }
}
