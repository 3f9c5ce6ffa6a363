use alloy_primitives::TxHash;
use mint_config::{InvalidConfigError, MintConfig};
use mint_wallets::WalletProvider;
use std::sync::Arc;

use crate::{
    connection::{ConnectionState, Notice},
    contract::NftContract,
    error::MintError,
    flow::MintFlow,
    view::{Screen, ViewModel, render},
};

/// The minting app: a wallet connection, the collection contract and the mint state machine.
#[derive(Debug)]
pub struct App {
    config: MintConfig,
    connection: ConnectionState,
    contract: NftContract,
    flow: MintFlow,
}

impl App {
    /// Creates the app. `provider` is `None` when no wallet is available.
    pub fn new(
        config: MintConfig,
        provider: Option<Arc<dyn WalletProvider>>,
    ) -> Result<Self, InvalidConfigError> {
        config.validate()?;
        let contract = NftContract::from_config(&config, provider.clone())?;
        let connection = ConnectionState::new(&config, provider);
        let flow = MintFlow::new(config.confirmation_timeout());
        Ok(Self { config, connection, contract, flow })
    }

    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn contract(&self) -> &NftContract {
        &self.contract
    }

    pub fn flow(&self) -> &MintFlow {
        &self.flow
    }

    /// Startup checks: picks up an already authorized account, then checks the network.
    ///
    /// Never prompts the user.
    pub async fn load(&mut self) -> Vec<Notice> {
        self.connection.check_existing_account().await;
        self.connection.check_network().await.into_iter().collect()
    }

    /// Asks the wallet to authorize an account.
    pub async fn connect(&mut self) -> Vec<Notice> {
        self.connection.request_account().await.into_iter().collect()
    }

    /// Mints with the connected account and waits until the transaction is mined.
    ///
    /// Refused without touching the mint status unless minting is currently offered.
    pub async fn mint(&mut self) -> Result<TxHash, MintError> {
        let Some(from) = self.connection.account() else {
            return Err(MintError::NotConnected);
        };
        if !self.connection.network_match() {
            return Err(MintError::WrongNetwork { network: self.config.network_name.clone() });
        }
        self.flow.run(&self.contract, from).await
    }

    pub fn view_model(&self) -> ViewModel {
        ViewModel {
            account: self.connection.account(),
            network_match: self.connection.network_match(),
            status: self.flow.status(),
            tx_hash: self.flow.tx_hash(),
            contract_address: self.contract.address(),
            marketplace_url: self.config.marketplace_url.clone(),
            price: self.config.mint_price.clone(),
            currency: self.config.native_currency.clone(),
        }
    }

    pub fn screen(&self) -> Screen {
        render(&self.view_model())
    }
}
