//! The mint state machine.

use alloy_primitives::{Address, TxHash};
use std::time::Duration;

use crate::{contract::NftContract, error::MintError};

/// Outcome of the latest mint attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MintStatus {
    /// No attempt yet.
    #[default]
    None,
    /// Submitted, waiting to be mined.
    Mining,
    Success,
    Error,
}

/// Drives one mint attempt at a time: `None -> Mining -> Success | Error`.
///
/// The hash of the last successful mint survives failed attempts.
#[derive(Clone, Debug, Default)]
pub struct MintFlow {
    status: MintStatus,
    tx_hash: Option<TxHash>,
    confirmation_timeout: Option<Duration>,
}

impl MintFlow {
    /// A flow whose confirmation wait gives up after `confirmation_timeout`, if set.
    pub fn new(confirmation_timeout: Option<Duration>) -> Self {
        Self { confirmation_timeout, ..Default::default() }
    }

    pub fn status(&self) -> MintStatus {
        self.status
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        self.tx_hash
    }

    pub fn is_mining(&self) -> bool {
        self.status == MintStatus::Mining
    }

    /// Enters `Mining`. Fails if an attempt is already in flight.
    pub fn begin(&mut self) -> Result<(), MintError> {
        if self.is_mining() {
            return Err(MintError::AlreadyMining);
        }
        self.status = MintStatus::Mining;
        Ok(())
    }

    /// Completes the attempt in flight.
    pub fn finish(&mut self, outcome: &Result<TxHash, MintError>) {
        debug_assert!(self.is_mining(), "no mint in flight");
        match outcome {
            Ok(hash) => {
                self.status = MintStatus::Success;
                self.tx_hash = Some(*hash);
            }
            Err(_) => self.status = MintStatus::Error,
        }
    }

    /// Mints through `contract` from `from` and waits for the transaction to be mined.
    ///
    /// If the returned future is dropped before completing, the attempt ends in `Error`.
    pub async fn run(&mut self, contract: &NftContract, from: Address) -> Result<TxHash, MintError> {
        self.begin()?;
        let attempt = Attempt(self);
        info!("Initialize payment");

        let timeout = attempt.0.confirmation_timeout;
        let outcome = async {
            let pending = contract.mint(from).await?;
            info!(hash = %pending.tx_hash(), "Mining... please wait");
            pending.confirm(timeout).await
        }
        .await;

        match &outcome {
            Ok(hash) => info!("Mined, see transaction: {hash}"),
            Err(err) => error!(%err, "mint failed"),
        }
        attempt.0.finish(&outcome);
        outcome
    }
}

/// The attempt in flight; fails it when dropped unfinished.
struct Attempt<'a>(&'a mut MintFlow);

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if self.0.is_mining() {
            warn!("mint abandoned before completing");
            self.0.status = MintStatus::Error;
        }
    }
}
