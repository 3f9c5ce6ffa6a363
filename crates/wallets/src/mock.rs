//! A scripted [WalletProvider] for tests.

use alloy_primitives::{Address, TxHash};
use alloy_rpc_types::TransactionRequest;
use alloy_transport::TransportErrorKind;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::{error::WalletError, provider::WalletProvider};

/// How the mock answers `confirm`.
#[derive(Clone, Debug, Default)]
pub enum Confirmation {
    /// The transaction was mined and succeeded.
    #[default]
    Mined,
    /// The transaction was mined and reverted.
    Reverted,
    /// The node failed while waiting.
    Fails(String),
    /// The transaction is never mined.
    Never,
}

/// Why the mock refuses to authorize.
#[derive(Clone, Debug)]
enum Refusal {
    Declined(String),
    Fails(String),
}

#[derive(Debug)]
struct Script {
    accounts: Vec<Address>,
    authorize: Result<Vec<Address>, Refusal>,
    chain_id: Result<String, String>,
    send: Result<TxHash, String>,
    confirmation: Confirmation,
}

/// A wallet whose every answer is set up front. Records the calls it receives.
///
/// By default it has no authorized account, authorizes nothing, reports chain `0x13881` and
/// mines whatever it is sent.
#[derive(Clone, Debug)]
pub struct MockWallet {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
    sent: Arc<Mutex<Vec<TransactionRequest>>>,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWallet {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                accounts: Vec::new(),
                authorize: Ok(Vec::new()),
                chain_id: Ok("0x13881".to_string()),
                send: Ok(TxHash::with_last_byte(1)),
                confirmation: Confirmation::Mined,
            })),
            calls: Default::default(),
            sent: Default::default(),
        }
    }

    /// Accounts reported by `eth_accounts`.
    pub fn with_accounts(self, accounts: Vec<Address>) -> Self {
        self.script.lock().accounts = accounts;
        self
    }

    /// Accounts granted by `eth_requestAccounts`; they become authorized afterwards.
    pub fn authorizing(self, accounts: Vec<Address>) -> Self {
        self.script.lock().authorize = Ok(accounts);
        self
    }

    /// Makes `eth_requestAccounts` fail as if the user closed the popup.
    pub fn declining(self, reason: &str) -> Self {
        self.script.lock().authorize = Err(Refusal::Declined(reason.to_string()));
        self
    }

    /// Makes `eth_requestAccounts` fail on the node side.
    pub fn failing_authorization(self, message: &str) -> Self {
        self.script.lock().authorize = Err(Refusal::Fails(message.to_string()));
        self
    }

    pub fn with_chain_id(self, chain_id: &str) -> Self {
        self.script.lock().chain_id = Ok(chain_id.to_string());
        self
    }

    /// Makes `eth_chainId` fail.
    pub fn failing_chain_id(self, message: &str) -> Self {
        self.script.lock().chain_id = Err(message.to_string());
        self
    }

    pub fn with_tx_hash(self, hash: TxHash) -> Self {
        self.script.lock().send = Ok(hash);
        self
    }

    /// Makes `eth_sendTransaction` fail as if the user rejected it.
    pub fn rejecting_transactions(self, reason: &str) -> Self {
        self.script.lock().send = Err(reason.to_string());
        self
    }

    pub fn with_confirmation(self, confirmation: Confirmation) -> Self {
        self.script.lock().confirmation = confirmation;
        self
    }

    /// Names of the provider methods called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    /// Transactions handed to `send_transaction`.
    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.record("accounts");
        Ok(self.script.lock().accounts.clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.record("request_accounts");
        let mut script = self.script.lock();
        match script.authorize.clone() {
            Ok(accounts) => {
                script.accounts = accounts.clone();
                Ok(accounts)
            }
            Err(Refusal::Declined(reason)) => {
                Err(WalletError::Rejected { operation: "Authorization", reason })
            }
            Err(Refusal::Fails(message)) => Err(node_error(&message)),
        }
    }

    async fn chain_id(&self) -> Result<String, WalletError> {
        self.record("chain_id");
        self.script.lock().chain_id.clone().map_err(|message| node_error(&message))
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, WalletError> {
        self.record("send_transaction");
        self.sent.lock().push(tx);
        self.script
            .lock()
            .send
            .clone()
            .map_err(|reason| WalletError::Rejected { operation: "Transaction", reason })
    }

    async fn confirm(&self, hash: TxHash) -> Result<TxHash, WalletError> {
        self.record("confirm");
        let confirmation = self.script.lock().confirmation.clone();
        match confirmation {
            Confirmation::Mined => Ok(hash),
            Confirmation::Reverted => Err(WalletError::Reverted(hash)),
            Confirmation::Fails(message) => Err(node_error(&message)),
            Confirmation::Never => std::future::pending().await,
        }
    }
}

fn node_error(message: &str) -> WalletError {
    TransportErrorKind::custom_str(message).into()
}
