//! In-memory transport that replays canned responses.
//!
//! Clone the transport before handing it to a [`Session`](crate::Session);
//! both handles share the same script and request log.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use sheetwire_core::error::{Error, Result};

use crate::request::{Request, Response};
use crate::transport::Transport;

#[derive(Debug, Default)]
struct Script {
    responses: VecDeque<Response>,
    requests: Vec<Request>,
}

/// Returns queued responses in order and records every request it sees.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a response with a raw body
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.lock().responses.push_back(Response::new(status, body));
        self
    }

    /// Queue a response with a JSON body
    pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
        self.respond(status, body.to_string())
    }

    /// Every request sent so far
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<Request> {
        self.lock().requests.last().cloned()
    }

    /// Responses not consumed yet
    pub fn remaining(&self) -> usize {
        self.lock().responses.len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        let mut script = self.lock();
        script.requests.push(request.clone());
        script.responses.pop_front().ok_or_else(|| {
            Error::transport(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                format!("no scripted response for {} {}", request.method.as_str(), request.url),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;

    #[test]
    fn test_replays_in_order() {
        let transport = ScriptedTransport::new()
            .respond(200, "first")
            .respond_json(201, serde_json::json!({"ok": true}));
        let session = Session::new(transport.clone());

        assert_eq!(session.send(Request::get("a")).unwrap().body, "first");
        let second = session.send(Request::post("b")).unwrap();
        assert_eq!(second.status, 201);
        assert_eq!(second.body, r#"{"ok":true}"#);

        assert_eq!(transport.requests().len(), 2);
        assert_eq!(transport.last_request().unwrap().url, "b");
        assert_eq!(transport.remaining(), 0);

        assert!(matches!(
            session.send(Request::get("c")),
            Err(Error::Transport(_))
        ));
    }
}
