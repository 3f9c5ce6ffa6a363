use eyre::EyreHandler;
use itertools::Itertools;
use mint_config::{CONFIG_FILE_NAME, ExtractConfigError, InvalidConfigError};
use mint_wallets::WalletError;
use std::{error::Error, fmt};

use crate::error::MintError;

/// Environment variable that switches to the verbose `color-eyre` report.
pub const DEBUG_ENV: &str = "NFT_MINT_DEBUG";

/// Renders errors for people at the terminal: the causes on one line each, plus what to do next
/// when the failure is something the user can fix.
#[derive(Default)]
pub struct MintReport {
    verbose: Option<Box<dyn EyreHandler>>,
}

impl MintReport {
    /// Delegate `{:?}` to `verbose` instead, e.g. the `color-eyre` handler.
    pub fn verbose(verbose: Box<dyn EyreHandler>) -> Self {
        Self { verbose: Some(verbose) }
    }
}

/// The error and its sources, with a message dropped when the previous one already contains it.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes: Vec<String> =
        eyre::Chain::new(error).map(|cause| cause.to_string().trim().to_string()).collect();
    // `mint failed: insufficient funds; insufficient funds` -> `mint failed: insufficient funds`
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}

/// What the user can do about `error`, if anything.
pub fn hint(error: &(dyn Error + 'static)) -> Option<String> {
    eyre::Chain::new(error).find_map(|cause| {
        if let Some(err) = cause.downcast_ref::<MintError>() {
            return match err {
                MintError::ProviderMissing => {
                    Some("pass `--browser`, `--keystore` or `--private-key`".to_string())
                }
                MintError::NotConnected => Some("run `nft-mint` and connect a wallet".to_string()),
                MintError::WrongNetwork { network } => {
                    Some(format!("switch your wallet to {network} and try again"))
                }
                MintError::Timeout { hash, .. } => Some(format!(
                    "the transaction may still be mined, look up {hash} before minting again"
                )),
                MintError::Wallet(err) => wallet_hint(err),
                MintError::AlreadyMining => None,
            };
        }
        if let Some(err) = cause.downcast_ref::<WalletError>() {
            return wallet_hint(err);
        }
        if cause.is::<ExtractConfigError>() || cause.is::<InvalidConfigError>() {
            return Some(format!("fix {CONFIG_FILE_NAME} or the NFT_MINT_* environment"));
        }
        None
    })
}

fn wallet_hint(error: &WalletError) -> Option<String> {
    match error {
        WalletError::Reverted(_) => {
            Some("the contract refused the mint, check the price and supply".to_string())
        }
        _ => None,
    }
}

impl EyreHandler for MintReport {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        dedup_chain(error).into_iter().format("; ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(verbose) = &self.verbose {
            return verbose.debug(error, f);
        }
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let causes = dedup_chain(error);
        let Some((error_msg, sources)) = causes.split_first() else { return Ok(()) };
        write!(f, "{error_msg}")?;
        for source in sources {
            write!(f, "\n  caused by: {source}")?;
        }
        if let Some(hint) = hint(error) {
            write!(f, "\n\nhint: {hint}")?;
        }
        Ok(())
    }

    fn track_caller(&mut self, location: &'static std::panic::Location<'static>) {
        if let Some(verbose) = &mut self.verbose {
            verbose.track_caller(location);
        }
    }
}

/// Installs the error report and panic hooks.
///
/// Reports use [`MintReport`] unless `NFT_MINT_DEBUG` is set, in which case the `color-eyre`
/// report with its backtrace sections is used. Panics always go through `color-eyre`.
pub fn install() {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section("This is a bug in nft-mint, please report it.")
        .into_hooks();
    panic_hook.install();
    let eyre_hook = eyre_hook.into_eyre_hook();
    let verbose = std::env::var_os(DEBUG_ENV).is_some();
    let installed = eyre::set_hook(Box::new(move |e| -> Box<dyn EyreHandler> {
        if verbose {
            Box::new(MintReport::verbose(eyre_hook(e)))
        } else {
            Box::<MintReport>::default()
        }
    }));
    if let Err(err) = installed {
        debug!(%err, "error report hook already installed");
    }
}
