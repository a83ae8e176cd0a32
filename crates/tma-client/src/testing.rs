//! Scripted transport for tests in this and downstream crates.
//!
//! Replies are consumed in call order. A gated reply parks the call until
//! the returned sender fires, which lets tests interleave overlapping
//! request chains deterministically.

use crate::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use tokio::sync::oneshot;

type Reply = Result<ApiResponse, TransportError>;

enum Step {
    Reply(Reply),
    Gated(oneshot::Receiver<()>, Reply),
}

#[derive(Default)]
pub struct ScriptedTransport {
    script: RefCell<VecDeque<Step>>,
    sent: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push(Step::Reply(Ok(ApiResponse::new(status, body.to_string()))))
    }

    pub fn reply_text(&self, status: u16, body: &str) -> &Self {
        self.push(Step::Reply(Ok(ApiResponse::new(status, body))))
    }

    pub fn fail(&self, err: TransportError) -> &Self {
        self.push(Step::Reply(Err(err)))
    }

    /// Queues a reply that is held back until the returned sender fires
    /// (or is dropped).
    pub fn reply_json_gated(&self, status: u16, body: serde_json::Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Step::Gated(
            rx,
            Ok(ApiResponse::new(status, body.to_string())),
        ));
        tx
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }

    pub fn sent_paths(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .map(|request| match request.url.find("/api/v1") {
                Some(idx) => request.url[idx + "/api/v1".len()..].to_owned(),
                None => request.url.clone(),
            })
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }

    fn push(&self, step: Step) -> &Self {
        self.script.borrow_mut().push_back(step);
        self
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        let step = self.script.borrow_mut().pop_front();
        match step {
            Some(Step::Reply(reply)) => reply,
            Some(Step::Gated(gate, reply)) => {
                let _ = gate.await;
                reply
            }
            None => Err(TransportError::NoResponse("script exhausted".to_owned())),
        }
    }
}
