//! # mint-config
//!
//! nft-mint configuration.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::{Address, U256, address, utils::parse_ether};
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

pub mod error;
pub use error::{CLI_PROVIDER_NAME, ExtractConfigError, InvalidConfigError, MintConfigError};

// reexport so cli types can implement `figment::Provider` to merge their arguments
pub use figment;

/// Default name of the config file, looked up from the current directory upwards.
pub const CONFIG_FILE_NAME: &str = "nft-mint.toml";

/// Prefix of environment variables that override config values.
pub const ENV_PREFIX: &str = "NFT_MINT_";

/// nft-mint configuration.
///
/// # Defaults
///
/// The defaults point at the Rinkeby Squirrels collection deployed on Polygon Mumbai.
/// [`MintConfig::load`] starts with the defaults and merges, in order, `nft-mint.toml` (or the
/// file passed explicitly) and `NFT_MINT_*` environment variables. Nested keys use a double
/// underscore, e.g. `NFT_MINT_BROWSER__PORT`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintConfig {
    /// Address of the deployed collection contract.
    pub contract_address: Address,
    /// Chain id the wallet must report, compared verbatim against `eth_chainId`.
    pub required_chain_id: String,
    /// Human readable name of the required network, used in notices.
    pub network_name: String,
    /// Price of one mint, in ether.
    pub mint_price: String,
    /// Number of tokens minted per transaction.
    pub mint_quantity: u64,
    /// Symbol of the network's native currency.
    pub native_currency: String,
    /// Marketplace listing of the collection.
    pub marketplace_url: String,
    /// Where users without a wallet are sent.
    pub wallet_install_url: String,
    /// JSON-RPC endpoint used by local signers.
    pub rpc_url: String,
    /// Seconds to wait for the mint to be mined. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_timeout: Option<u64>,
    /// Milliseconds between receipt polls.
    pub poll_interval: u64,
    /// Browser wallet bridge settings.
    pub browser: BrowserConfig,
}

/// Settings of the local browser wallet bridge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Port to listen on; 0 picks a free one.
    pub port: u16,
    /// Seconds to wait for the page to answer a relayed request.
    pub timeout: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self { port: 9545, timeout: 300 }
    }
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            contract_address: address!("0x50566cbc02082868bc48c047fc16446582237875"),
            required_chain_id: "0x13881".to_string(),
            network_name: "Polygon Testnet".to_string(),
            mint_price: "0.01".to_string(),
            mint_quantity: 1,
            native_currency: "MATIC".to_string(),
            marketplace_url: "https://testnets.opensea.io/collection/rinkeby-squirrels".to_string(),
            wallet_install_url: "https://metamask.io/download.html".to_string(),
            rpc_url: "https://rpc-mumbai.maticvigil.com".to_string(),
            confirmation_timeout: None,
            poll_interval: 4_000,
            browser: BrowserConfig::default(),
        }
    }
}

impl MintConfig {
    /// Returns the default figment: defaults, then `nft-mint.toml`, then the environment.
    pub fn figment() -> Figment {
        Self::figment_with_file(Path::new(CONFIG_FILE_NAME))
    }

    /// Same as [`MintConfig::figment`] but reads the given file instead of `nft-mint.toml`.
    pub fn figment_with_file(path: &Path) -> Figment {
        Figment::from(Self::default())
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads the config from the default figment.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment())
    }

    /// Attempts to extract a `MintConfig` from `provider`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mint_config::MintConfig;
    ///
    /// let figment = MintConfig::figment().merge(("rpc_url", "http://localhost:8545"));
    /// let config = MintConfig::try_from(figment).unwrap();
    /// assert_eq!(config.rpc_url, "http://localhost:8545");
    /// ```
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        trace!("load config with provider: {:?}", provider.metadata());
        Figment::from(provider).extract::<Self>().map_err(ExtractConfigError::new)
    }

    /// Checks the values that deserialize fine but are unusable.
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        self.mint_price_wei()?;
        if self.mint_quantity == 0 {
            return Err(InvalidConfigError::ZeroQuantity);
        }
        let id = &self.required_chain_id;
        let valid_hex = id.strip_prefix("0x").is_some_and(|digits| {
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
        });
        if !valid_hex {
            return Err(InvalidConfigError::ChainId(id.clone()));
        }
        Ok(())
    }

    /// The mint price converted to wei.
    pub fn mint_price_wei(&self) -> Result<U256, InvalidConfigError> {
        parse_ether(&self.mint_price).map_err(|source| InvalidConfigError::MintPrice {
            value: self.mint_price.clone(),
            source,
        })
    }

    /// The confirmation timeout, if one is configured.
    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout.map(Duration::from_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval)
    }

    pub fn browser_timeout(&self) -> Duration {
        Duration::from_secs(self.browser.timeout)
    }
}

impl Provider for MintConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("nft-mint defaults")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figment_is_default() {
        figment::Jail::expect_with(|_| {
            let config = MintConfig::load().unwrap();
            assert_eq!(config, MintConfig::default());
            config.validate().unwrap();
            Ok(())
        });
    }

    #[test]
    fn default_price_is_one_hundredth_ether() {
        let config = MintConfig::default();
        assert_eq!(config.mint_price_wei().unwrap(), U256::from(10_000_000_000_000_000u64));
    }

    #[test]
    fn toml_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"
                required_chain_id = "0x1"
                mint_price = "0.5"
                confirmation_timeout = 60

                [browser]
                port = 0
            "#,
            )?;
            let config = MintConfig::load().unwrap();
            assert_eq!(config.required_chain_id, "0x1");
            assert_eq!(config.mint_price, "0.5");
            assert_eq!(config.confirmation_timeout(), Some(Duration::from_secs(60)));
            assert_eq!(config.browser.port, 0);
            assert_eq!(config.browser.timeout, BrowserConfig::default().timeout);
            assert_eq!(config.contract_address, MintConfig::default().contract_address);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, r#"rpc_url = "http://from-file:8545""#)?;
            jail.set_env("NFT_MINT_RPC_URL", "http://from-env:8545");
            jail.set_env("NFT_MINT_BROWSER__TIMEOUT", "5");
            let config = MintConfig::load().unwrap();
            assert_eq!(config.rpc_url, "http://from-env:8545");
            assert_eq!(config.browser_timeout(), Duration::from_secs(5));
            Ok(())
        });
    }

    #[test]
    fn explicit_file_is_used() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "mint_quantity = 3")?;
            let config = MintConfig::try_from(MintConfig::figment_with_file(Path::new(
                "custom.toml",
            )))
            .unwrap();
            assert_eq!(config.mint_quantity, 3);
            Ok(())
        });
    }

    #[test]
    fn reports_toml_errors() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, "mint_quantity = \"many\"")?;
            let err = MintConfig::load().unwrap_err();
            let msg = err.to_string();
            assert!(msg.starts_with(error::FAILED_TO_EXTRACT_CONFIG_MSG), "{msg}");
            assert!(msg.contains("mint_quantity"), "{msg}");
            match &err.errors()[..] {
                [MintConfigError::File { file, .. }] => assert!(file.ends_with(CONFIG_FILE_NAME)),
                other => panic!("expected a file error, got {other:?}"),
            }
            Ok(())
        });
    }

    #[test]
    fn names_the_failing_env_var() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("NFT_MINT_BROWSER__PORT", "eighty");
            let err = MintConfig::load().unwrap_err();
            match &err.errors()[..] {
                [MintConfigError::Env { var, .. }] => assert_eq!(var, "NFT_MINT_BROWSER__PORT"),
                other => panic!("expected an env error, got {other:?}"),
            }
            assert!(err.to_string().contains("environment variable `NFT_MINT_BROWSER__PORT`"));
            Ok(())
        });
    }

    #[test]
    fn names_the_failing_flag() {
        struct Flags;

        impl Provider for Flags {
            fn metadata(&self) -> Metadata {
                Metadata::named(CLI_PROVIDER_NAME)
            }

            fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
                Serialized::default("confirmation_timeout", "soon").data()
            }
        }

        figment::Jail::expect_with(|_| {
            let err = MintConfig::try_from(MintConfig::figment().merge(Flags)).unwrap_err();
            match &err.errors()[..] {
                [MintConfigError::Flag { flag, .. }] => assert_eq!(flag, "--confirmation-timeout"),
                other => panic!("expected a flag error, got {other:?}"),
            }
            Ok(())
        });
    }

    #[test]
    fn rejects_unusable_values() {
        let config = MintConfig { mint_price: "ten".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(InvalidConfigError::MintPrice { .. })));

        let config = MintConfig { mint_quantity: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(InvalidConfigError::ZeroQuantity)));

        let config = MintConfig { required_chain_id: "80001".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(InvalidConfigError::ChainId(_))));
    }
}
