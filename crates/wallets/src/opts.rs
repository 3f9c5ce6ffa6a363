use crate::{
    provider::WalletProvider,
    rpc::RpcWallet,
    utils::{create_keystore_signer, create_private_key_signer},
};
use clap::Parser;
use eyre::Result;
use mint_config::MintConfig;
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};

/// The wallet options can either be:
/// 1. A private key (cleartext in CLI)
/// 2. An encrypted keystore, unlocked by its password or on the first connection
/// 3. The wallet injected in a browser, reached through a local bridge page
///
/// Without any of them there is no wallet at all and the app asks the user to install one.
#[derive(Clone, Debug, Default, Serialize, Parser)]
#[command(next_help_heading = "Wallet options", about = None, long_about = None)]
pub struct WalletOpts {
    /// Use the provided private key.
    #[arg(long, value_name = "RAW_PRIVATE_KEY", env = "NFT_MINT_PRIVATE_KEY")]
    #[serde(skip)]
    pub private_key: Option<String>,

    /// Use the keystore at the specified path.
    #[arg(long, value_name = "PATH", conflicts_with = "private_key")]
    pub keystore: Option<PathBuf>,

    /// The keystore password.
    ///
    /// Without it, the password is prompted for when connecting the wallet.
    #[arg(long, requires = "keystore", value_name = "PASSWORD")]
    #[serde(skip)]
    pub password: Option<String>,

    /// The keystore password file path.
    #[arg(long, requires = "keystore", conflicts_with = "password", value_name = "PASSWORD_FILE")]
    pub password_file: Option<PathBuf>,

    /// Use the wallet injected in your browser, such as MetaMask.
    #[arg(long, conflicts_with_all = ["private_key", "keystore"])]
    pub browser: bool,

    /// Port of the local browser bridge. Overrides `browser.port`.
    #[arg(long, requires = "browser", value_name = "PORT")]
    pub browser_port: Option<u16>,
}

impl WalletOpts {
    /// Whether any wallet source was given.
    pub fn is_configured(&self) -> bool {
        self.private_key.is_some() || self.keystore.is_some() || self.browser
    }

    /// Builds the wallet described by these options.
    ///
    /// Returns `None` when no wallet is available: no source was given, or the bridge page found
    /// no injected wallet.
    pub async fn provider(&self, config: &MintConfig) -> Result<Option<Arc<dyn WalletProvider>>> {
        if self.browser {
            return self.browser_provider(config).await;
        }

        let signer = if let Some(private_key) = &self.private_key {
            create_private_key_signer(private_key)?
        } else if let Some(keystore) = &self.keystore {
            create_keystore_signer(
                keystore,
                self.password.as_deref(),
                self.password_file.as_deref(),
            )?
        } else {
            debug!("no wallet configured");
            return Ok(None);
        };

        let wallet = RpcWallet::new(&config.rpc_url, signer, config.poll_interval())?;
        trace!(?wallet, "created rpc wallet");
        Ok(Some(Arc::new(wallet)))
    }

    #[cfg(feature = "browser")]
    async fn browser_provider(
        &self,
        config: &MintConfig,
    ) -> Result<Option<Arc<dyn WalletProvider>>> {
        use crate::wallet_browser::{server::BrowserWalletServer, wallet::BrowserWallet};

        let port = self.browser_port.unwrap_or(config.browser.port);
        let mut server = BrowserWalletServer::new(port, config.browser_timeout());
        server.start().await?;

        println!("Open {} in the browser that has your wallet installed.", server.url());
        if !server.wait_for_page().await? {
            server.stop().await?;
            return Ok(None);
        }
        info!(url = %server.url(), "browser wallet connected");
        Ok(Some(Arc::new(BrowserWallet::new(server, config.poll_interval()))))
    }

    #[cfg(not(feature = "browser"))]
    async fn browser_provider(
        &self,
        _config: &MintConfig,
    ) -> Result<Option<Arc<dyn WalletProvider>>> {
        Err(crate::error::WalletError::browser_unsupported().into())
    }
}
