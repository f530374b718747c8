//! In-memory transport for tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::utils::http::Transport;

/// A canned reply for one call.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Replies are queued per URL and served in order; the last one repeats.
#[derive(Default)]
pub struct FakeTransport {
    routes: RefCell<HashMap<String, VecDeque<Reply>>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, url: &str, body: Value) -> &Self {
        self.push_reply(url, Reply::Json(body))
    }

    pub fn push_status(&self, url: &str, status: u16) -> &Self {
        self.push_reply(url, Reply::Status(status))
    }

    fn push_reply(&self, url: &str, reply: Reply) -> &Self {
        self.routes
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, url: &str) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.url == url)
            .cloned()
            .collect()
    }

    fn reply(&self, call: Call) -> Result<Value> {
        let url = call.url.clone();
        self.calls.borrow_mut().push(call);

        let mut routes = self.routes.borrow_mut();
        let queue = routes.get_mut(&url);
        let reply = match queue {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Status(status)) => Err(AppError::Status { url, status }),
            None => Err(AppError::Status { url, status: 404 }),
        }
    }
}

impl Transport for FakeTransport {
    fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value> {
        self.reply(Call {
            method: "GET",
            url: url.to_string(),
            query: query.to_vec(),
            body: None,
        })
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        self.reply(Call {
            method: "POST",
            url: url.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        })
    }
}
