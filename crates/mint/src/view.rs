//! Rendering of the app state.

use alloy_primitives::{Address, TxHash};
use std::fmt;
use yansi::Paint;

use crate::flow::MintStatus;

/// Everything the screen depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub account: Option<Address>,
    pub network_match: bool,
    pub status: MintStatus,
    pub tx_hash: Option<TxHash>,
    pub contract_address: Address,
    pub marketplace_url: String,
    /// Mint price as configured, e.g. `0.01`.
    pub price: String,
    pub currency: String,
}

/// The primary action offered to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Connect,
    Mint,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Self::Connect => "Connect Wallet",
            Self::Mint => "Mint NFT",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Transient status text below the action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusLine {
    Loading,
    Failed { price: String, currency: String },
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("Now Loading....."),
            Self::Failed { price, currency } => write!(
                f,
                "Transaction failed. Make sure you have at least {price} {currency} in your \
                 wallet and try again."
            ),
        }
    }
}

/// A rendered screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    /// `None` while a mint is in flight.
    pub action: Option<Action>,
    pub status: Option<StatusLine>,
    pub tx_hash: Option<TxHash>,
    pub account: Option<Address>,
    pub marketplace_url: String,
    pub contract_address: Address,
}

/// Renders `model`.
///
/// Minting is offered only with an account on the required network; otherwise the user is asked
/// to connect.
pub fn render(model: &ViewModel) -> Screen {
    let ready = model.account.is_some() && model.network_match;
    let action = match (ready, model.status) {
        (false, _) => Some(Action::Connect),
        (true, MintStatus::Mining) => None,
        (true, _) => Some(Action::Mint),
    };
    let status = match model.status {
        MintStatus::Mining => Some(StatusLine::Loading),
        MintStatus::Error => Some(StatusLine::Failed {
            price: model.price.clone(),
            currency: model.currency.clone(),
        }),
        MintStatus::None | MintStatus::Success => None,
    };
    Screen {
        action,
        status,
        tx_hash: model.tx_hash,
        account: model.account,
        marketplace_url: model.marketplace_url.clone(),
        contract_address: model.contract_address,
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", "View Collection on".bold(), self.marketplace_url.underline())?;
        writeln!(f)?;
        match self.account {
            Some(account) => writeln!(f, "Account: {}", account.cyan())?,
            None => writeln!(f, "{}", "No wallet connected".dim())?,
        }
        if let Some(action) = self.action {
            writeln!(f, "[ {} ]", action.label().green().bold())?;
        }
        match &self.status {
            Some(status @ StatusLine::Loading) => writeln!(f, "{}", status.yellow())?,
            Some(status @ StatusLine::Failed { .. }) => writeln!(f, "{}", status.red())?,
            None => {}
        }
        if let Some(hash) = self.tx_hash {
            writeln!(f, "Your previous txn-hash is \"{hash}\"")?;
        }
        writeln!(f)?;
        write!(f, "{} {}", "Contract:".dim(), self.contract_address)
    }
}
