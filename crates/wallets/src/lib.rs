//! # mint-wallets
//!
//! Wallets the nft-mint app can connect to.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod error;
pub use error::{PrivateKeyError, WalletError};

pub mod opts;
pub use opts::WalletOpts;

pub mod provider;
pub use provider::WalletProvider;

pub mod rpc;
pub use rpc::{LocalSigner, RpcWallet};

pub mod utils;

#[cfg(feature = "browser")]
pub mod wallet_browser;
#[cfg(feature = "browser")]
pub use wallet_browser::{server::BrowserWalletServer, wallet::BrowserWallet};

#[cfg(feature = "mock")]
pub mod mock;
