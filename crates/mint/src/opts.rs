use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use mint_config::{
    CLI_PROVIDER_NAME, MintConfig,
    figment::{
        self, Metadata, Profile, Provider,
        providers::Serialized,
        value::{Dict, Map},
    },
};
use mint_wallets::WalletOpts;
use serde::Serialize;
use std::path::PathBuf;

/// Connect a wallet and mint an NFT from the collection.
#[derive(Debug, Parser)]
#[command(name = "nft-mint", version)]
pub struct NftMint {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub wallet: WalletOpts,

    #[command(subcommand)]
    pub cmd: Option<NftMintSubcommand>,
}

#[derive(Debug, Subcommand)]
pub enum NftMintSubcommand {
    /// Show the app and act on its primary action until you quit (default).
    #[command(visible_alias = "i")]
    Interactive,

    /// Print the connection state without prompting the wallet.
    #[command(visible_alias = "s")]
    Status,

    /// Connect if needed, mint once and wait for the transaction to be mined.
    #[command(visible_alias = "m")]
    Mint,

    /// Print the collection and network settings.
    Info,
}

/// Options that override the config file.
#[derive(Clone, Debug, Default, Serialize, Parser)]
#[command(next_help_heading = "Config options")]
pub struct ConfigArgs {
    /// Path to the config file.
    ///
    /// Defaults to `nft-mint.toml` in the current directory.
    #[arg(long, short, value_name = "FILE")]
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// The RPC endpoint used with `--private-key` or `--keystore`.
    #[arg(long, short, visible_alias = "rpc", value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    /// Seconds to wait for the mint transaction to be mined.
    #[arg(long, value_name = "SECONDS")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_timeout: Option<u64>,
}

impl ConfigArgs {
    /// Loads the config: defaults, the config file, the environment, then these arguments.
    pub fn load_config(&self) -> Result<MintConfig> {
        let figment = match &self.config {
            Some(path) => {
                if !path.is_file() {
                    eyre::bail!("config file {} does not exist", path.display());
                }
                MintConfig::figment_with_file(path)
            }
            None => MintConfig::figment(),
        };
        let config = MintConfig::try_from(figment.merge(self))?;
        config.validate().wrap_err("invalid nft-mint config")?;
        Ok(config)
    }
}

impl Provider for ConfigArgs {
    fn metadata(&self) -> Metadata {
        Metadata::named(CLI_PROVIDER_NAME)
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        NftMint::command().debug_assert();
    }

    #[test]
    fn defaults_to_interactive() {
        let args = NftMint::parse_from(["nft-mint"]);
        assert!(args.cmd.is_none());
        assert!(!args.wallet.is_configured());
    }

    #[test]
    fn parses_mint_with_browser() {
        let args = NftMint::parse_from(["nft-mint", "--browser", "--browser-port", "0", "mint"]);
        assert!(matches!(args.cmd, Some(NftMintSubcommand::Mint)));
        assert!(args.wallet.browser);
    }

    #[test]
    fn args_override_config() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("nft-mint.toml", "rpc_url = \"http://from-file:8545\"\n")?;
            let args = ConfigArgs {
                confirmation_timeout: Some(120),
                ..Default::default()
            };
            let config = args.load_config().unwrap();
            assert_eq!(config.rpc_url, "http://from-file:8545");
            assert_eq!(config.confirmation_timeout, Some(120));

            let args = ConfigArgs {
                rpc_url: Some("http://localhost:8545".to_string()),
                ..Default::default()
            };
            assert_eq!(args.load_config().unwrap().rpc_url, "http://localhost:8545");
            Ok(())
        });
    }

    #[test]
    fn missing_config_file() {
        let args = ConfigArgs { config: Some("does-not-exist.toml".into()), ..Default::default() };
        assert!(args.load_config().is_err());
    }
}
