//! Shared test helpers: a scriptable in-memory transport
#![allow(dead_code)]

use async_trait::async_trait;
use patholab_data::transport::{Transport, TransportError};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type Scripted = Result<Value, TransportError>;

/// Transport stub replaying scripted responses and recording every request
pub struct MockTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn returning(value: Value) -> Self {
        Self::scripted(vec![Ok(value)])
    }

    pub fn failing(error: TransportError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    pub fn scripted(responses: Vec<Scripted>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Delay every response, so tests can overlap concurrent callers
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<(String, Vec<(String, String)>)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get_json(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Value, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), params.to_vec()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut responses = self.responses.lock().unwrap();
        // Replay the final scripted response once the queue runs dry
        if responses.len() > 1 {
            responses.pop_front().unwrap()
        } else {
            responses
                .front()
                .cloned()
                .unwrap_or_else(|| Ok(Value::Array(Vec::new())))
        }
    }
}

/// Query parameter lookup over a recorded request
pub fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
