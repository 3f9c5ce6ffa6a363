use std::collections::{HashMap, VecDeque};

use uuid::Uuid;

/// FIFO of requests for the page, plus the responses it posted back keyed by request id.
#[derive(Debug)]
pub(crate) struct RequestQueue<Req, Resp> {
    requests: VecDeque<(Uuid, Req)>,
    responses: HashMap<Uuid, Resp>,
}

impl<Req, Resp> Default for RequestQueue<Req, Resp> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Resp> RequestQueue<Req, Resp> {
    pub fn new() -> Self {
        Self { requests: VecDeque::new(), responses: HashMap::new() }
    }

    pub fn add_request(&mut self, id: Uuid, request: Req) {
        self.requests.push_back((id, request));
    }

    pub fn has_request(&self, id: &Uuid) -> bool {
        self.requests.iter().any(|(req_id, _)| req_id == id)
    }

    /// The oldest request still waiting for a response. It stays queued until answered.
    pub fn read_request(&self) -> Option<&Req> {
        self.requests.front().map(|(_, req)| req)
    }

    pub fn remove_request(&mut self, id: &Uuid) {
        self.requests.retain(|(req_id, _)| req_id != id);
    }

    pub fn add_response(&mut self, id: Uuid, response: Resp) {
        self.responses.insert(id, response);
    }

    /// Drops the request for `id` and its response, if one was posted.
    pub fn discard(&mut self, id: &Uuid) {
        self.remove_request(id);
        self.responses.remove(id);
    }

    /// Takes the response for `id`, if the page posted one.
    pub fn get_response(&mut self, id: &Uuid) -> Option<Resp> {
        self.responses.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_served_in_order() {
        let mut queue = RequestQueue::<&str, &str>::new();
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
        queue.add_request(first, "eth_accounts");
        queue.add_request(second, "eth_chainId");

        assert_eq!(queue.read_request(), Some(&"eth_accounts"));
        // reading does not consume
        assert_eq!(queue.read_request(), Some(&"eth_accounts"));

        queue.remove_request(&first);
        assert!(!queue.has_request(&first));
        assert_eq!(queue.read_request(), Some(&"eth_chainId"));
    }

    #[test]
    fn responses_are_taken_once() {
        let mut queue = RequestQueue::<(), &str>::new();
        let id = Uuid::new_v4();
        queue.add_response(id, "0x13881");
        assert_eq!(queue.get_response(&id), Some("0x13881"));
        assert_eq!(queue.get_response(&id), None);
    }

    #[test]
    fn discard_drops_late_response() {
        let mut queue = RequestQueue::<&str, &str>::new();
        let id = Uuid::new_v4();
        queue.add_request(id, "eth_chainId");
        queue.add_response(id, "0x13881");

        queue.discard(&id);
        assert!(!queue.has_request(&id));
        assert_eq!(queue.get_response(&id), None);
        assert!(queue.responses.is_empty());
    }
}
