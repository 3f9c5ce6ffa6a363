use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::wallet_browser::{
    queue::RequestQueue,
    types::{BrowserRequest, BrowserResponse, PageHello},
};

#[derive(Debug, Clone)]
pub(crate) struct BrowserWalletState {
    /// Token the page must echo in `X-Session-Token`, embedded in the served page.
    session_token: Arc<str>,
    /// What the page reported about `window.ethereum`, once it loaded.
    hello: Arc<Mutex<Option<PageHello>>>,
    /// Request/response queue for relayed EIP-1193 calls.
    requests: Arc<Mutex<RequestQueue<BrowserRequest, BrowserResponse>>>,
}

impl Default for BrowserWalletState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserWalletState {
    /// Create a new browser wallet state with a fresh session token.
    pub fn new() -> Self {
        Self {
            session_token: Uuid::new_v4().simple().to_string().into(),
            hello: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(RequestQueue::new())),
        }
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    /// Get what the page reported, if it loaded.
    pub fn hello(&self) -> Option<PageHello> {
        *self.hello.lock()
    }

    pub fn set_hello(&self, hello: PageHello) {
        *self.hello.lock() = Some(hello);
    }

    /// Queue a request for the page.
    pub fn add_request(&self, request: BrowserRequest) {
        self.requests.lock().add_request(request.id, request);
    }

    /// Check if a request is still waiting for its response.
    pub fn has_request(&self, id: &Uuid) -> bool {
        self.requests.lock().has_request(id)
    }

    /// Read the next request.
    pub fn read_next_request(&self) -> Option<BrowserRequest> {
        self.requests.lock().read_request().cloned()
    }

    /// Forget a request nobody waits for anymore, along with any answer that raced in.
    pub fn discard(&self, id: &Uuid) {
        self.requests.lock().discard(id);
    }

    /// Store the page's response and retire its request.
    pub fn add_response(&self, response: BrowserResponse) {
        let id = response.id;
        let mut requests = self.requests.lock();
        requests.add_response(id, response);
        requests.remove_request(&id);
    }

    /// Get a response, removing it from the queue.
    pub fn get_response(&self, id: &Uuid) -> Option<BrowserResponse> {
        self.requests.lock().get_response(id)
    }
}
