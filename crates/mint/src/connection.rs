//! The connected account and whether the wallet is on the required network.

use alloy_primitives::Address;
use mint_config::MintConfig;
use mint_wallets::WalletProvider;
use std::{fmt, sync::Arc};

/// A message the user has to acknowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// No wallet is available.
    InstallWallet { url: String },
    /// The wallet is connected to another network.
    SwitchNetwork { network: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstallWallet { url } => {
                write!(f, "MetaMask is not installed. Please install it to use this app: {url}")
            }
            Self::SwitchNetwork { network } => write!(f, "Switch your network to {network}."),
        }
    }
}

/// Tracks the authorized account and the network check.
///
/// The account is never cleared and a failed network check is never undone: both last for the
/// session.
#[derive(Clone, Debug)]
pub struct ConnectionState {
    provider: Option<Arc<dyn WalletProvider>>,
    required_chain_id: String,
    network_name: String,
    install_url: String,
    account: Option<Address>,
    network_match: bool,
}

impl ConnectionState {
    pub fn new(config: &MintConfig, provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self {
            provider,
            required_chain_id: config.required_chain_id.clone(),
            network_name: config.network_name.clone(),
            install_url: config.wallet_install_url.clone(),
            account: None,
            network_match: true,
        }
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn network_match(&self) -> bool {
        self.network_match
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Whether minting can be offered.
    pub fn is_ready(&self) -> bool {
        self.account.is_some() && self.network_match
    }

    /// Picks up an account the wallet already authorized, without prompting the user.
    pub async fn check_existing_account(&mut self) {
        let Some(provider) = self.provider.clone() else {
            warn!("Make sure you have MetaMask installed!");
            return;
        };
        debug!("Wallet exists! We're ready to go!");

        match provider.accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(&account) => {
                    info!(%account, "Found an authorized account");
                    self.account = Some(account);
                }
                None => info!("No authorized account found"),
            },
            Err(err) => error!(%err, "failed to query authorized accounts"),
        }
    }

    /// Asks the wallet to authorize an account.
    ///
    /// A declined or failed request is logged and leaves the state untouched.
    pub async fn request_account(&mut self) -> Option<Notice> {
        let Some(provider) = self.provider.clone() else {
            return Some(Notice::InstallWallet { url: self.install_url.clone() });
        };

        match provider.request_accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(&account) => {
                    info!(%account, "Found an account!");
                    self.account = Some(account);
                }
                None => warn!("wallet authorized no account"),
            },
            Err(err) if err.is_rejection() => info!(%err, "authorization declined"),
            Err(err) => error!(%err, "failed to request accounts"),
        }
        None
    }

    /// Compares the wallet's chain id with the required one.
    ///
    /// The ids are compared as exact strings, so `0x13881` and `0x013881` differ.
    pub async fn check_network(&mut self) -> Option<Notice> {
        let Some(provider) = self.provider.clone() else {
            return Some(Notice::InstallWallet { url: self.install_url.clone() });
        };

        match provider.chain_id().await {
            Ok(chain_id) if chain_id == self.required_chain_id => {
                debug!(%chain_id, "wallet is on the required network");
                None
            }
            Ok(chain_id) => {
                warn!(%chain_id, required = %self.required_chain_id, "wrong network");
                self.network_match = false;
                Some(Notice::SwitchNetwork { network: self.network_name.clone() })
            }
            Err(err) => {
                error!(%err, "failed to query chain id");
                None
            }
        }
    }
}
