use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use serde_json::Value;
use tokio::{net::TcpListener, sync::oneshot};
use uuid::Uuid;

use crate::wallet_browser::{
    error::BrowserWalletError, router::build_router, state::BrowserWalletState,
    types::BrowserRequest,
};

/// EIP-1193 code for "the user rejected the request".
const USER_REJECTED: i64 = 4001;

/// How often queued requests and the page handshake are checked.
const CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Local HTTP server bridging the terminal to the wallet injected in the user's browser.
///
/// The served page polls `/api/request`, hands each request to `window.ethereum.request` and posts
/// the outcome to `/api/response`.
#[derive(Debug, Clone)]
pub struct BrowserWalletServer {
    port: u16,
    timeout: Duration,
    state: Arc<BrowserWalletState>,
    shutdown: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl BrowserWalletServer {
    /// Create a server for `port` (0 picks a free one).
    ///
    /// `timeout` bounds the page handshake and the requests that do not prompt the user.
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self {
            port,
            timeout,
            state: Arc::new(BrowserWalletState::new()),
            shutdown: Arc::new(Mutex::new(None)),
        }
    }

    /// The port the server listens on, once started.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Address of the bridge page.
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    pub fn session_token(&self) -> &str {
        self.state.session_token()
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.lock().is_some()
    }

    /// Whether the page found an injected wallet. `None` until the page loaded.
    pub fn is_installed(&self) -> Option<bool> {
        self.state.hello().map(|hello| hello.installed)
    }

    /// Bind and serve in the background.
    pub async fn start(&mut self) -> Result<(), BrowserWalletError> {
        let listener = TcpListener::bind(("127.0.0.1", self.port)).await?;
        self.port = listener.local_addr()?.port();

        let router = build_router(self.state.clone()).await;
        let (tx, rx) = oneshot::channel::<()>();
        *self.shutdown.lock() = Some(tx);

        tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            if let Err(err) = axum::serve(listener, router).with_graceful_shutdown(shutdown).await
            {
                error!(%err, "browser wallet server stopped");
            }
        });

        debug!(port = self.port, "browser wallet server listening");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), BrowserWalletError> {
        if let Some(tx) = self.shutdown.lock().take() {
            let _ = tx.send(());
        }
        Ok(())
    }

    /// Waits until the page loaded and reports whether it found an injected wallet.
    pub async fn wait_for_page(&self) -> Result<bool, BrowserWalletError> {
        let wait = async {
            loop {
                if let Some(installed) = self.is_installed() {
                    return installed;
                }
                tokio::time::sleep(CHECK_INTERVAL).await;
            }
        };
        tokio::time::timeout(self.timeout, wait).await.map_err(|_| BrowserWalletError::Timeout {
            operation: "Loading the wallet page".to_string(),
            timeout: self.timeout,
        })
    }

    /// Relays one EIP-1193 request to the page and waits for the wallet's answer.
    ///
    /// Authorization and transaction requests wait for as long as the user takes.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, BrowserWalletError> {
        if !self.is_running() {
            return Err(BrowserWalletError::NotRunning);
        }

        let id = Uuid::new_v4();
        trace!(%id, method, "queueing wallet request");
        self.state.add_request(BrowserRequest { id, method: method.to_string(), params });

        let wait = async {
            loop {
                if let Some(response) = self.state.get_response(&id) {
                    return response;
                }
                tokio::time::sleep(CHECK_INTERVAL).await;
            }
        };
        let response = if prompts_user(method) {
            // the user may approve at any time
            wait.await
        } else {
            match tokio::time::timeout(self.timeout, wait).await {
                Ok(response) => response,
                Err(_) => {
                    self.state.discard(&id);
                    return Err(BrowserWalletError::Timeout {
                        operation: method.to_string(),
                        timeout: self.timeout,
                    });
                }
            }
        };

        match response.error {
            Some(reason) if response.code == Some(USER_REJECTED) => {
                Err(BrowserWalletError::Rejected { operation: operation_name(method), reason })
            }
            Some(message) => Err(BrowserWalletError::Provider {
                method: method.to_string(),
                code: response.code,
                message,
            }),
            None => Ok(response.result.unwrap_or(Value::Null)),
        }
    }
}

/// Methods answered only once the user acted in their wallet.
fn prompts_user(method: &str) -> bool {
    matches!(method, "eth_requestAccounts" | "eth_sendTransaction")
}

fn operation_name(method: &str) -> &'static str {
    match method {
        "eth_requestAccounts" => "Authorization",
        "eth_sendTransaction" => "Transaction",
        _ => "Request",
    }
}
