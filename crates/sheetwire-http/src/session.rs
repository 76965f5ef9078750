//! HTTP session: a transport plus headers that persist across requests.

use std::collections::BTreeMap;
use std::fmt;

use sheetwire_core::error::Result;

use crate::config::ClientConfig;
use crate::request::{Request, Response};
use crate::transport::{ReqwestTransport, Transport};

/// A transport together with default headers.
///
/// The authorization header is stored here after login and then added to
/// every request. Headers set on an individual request take precedence.
pub struct Session {
    transport: Box<dyn Transport>,
    headers: BTreeMap<String, String>,
}

impl Session {
    /// Create a session over any transport
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Box::new(transport),
            headers: BTreeMap::new(),
        }
    }

    /// Create a session over a reqwest transport configured from `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(ReqwestTransport::new(config)?))
    }

    /// Set a header sent with every request
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Current value of a session header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Stop sending a header
    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    }

    /// Send a request and return the response regardless of status
    pub fn send(&self, mut request: Request) -> Result<Response> {
        for (name, value) in &self.headers {
            if request.header_value(name).is_none() {
                request.headers.push((name.clone(), value.clone()));
            }
        }

        tracing::debug!("{} {}", request.method.as_str(), request.url);
        let response = self.transport.send(&request)?;
        tracing::debug!(
            "{} {} -> {}",
            request.method.as_str(),
            request.url,
            response.status
        );

        Ok(response)
    }

    /// Send a request and turn a non-2xx status into an API error
    pub fn send_checked(&self, request: Request) -> Result<Response> {
        let response = self.send(request)?;
        if !response.is_success() {
            tracing::warn!(
                "Request failed with status {}: {}",
                response.status,
                response.body.trim()
            );
        }
        response.error_for_status()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Header values carry credentials; only list the names.
        f.debug_struct("Session")
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Echo {
        seen: Rc<RefCell<Vec<Request>>>,
        status: u16,
    }

    impl Transport for Echo {
        fn send(&self, request: &Request) -> Result<Response> {
            self.seen.borrow_mut().push(request.clone());
            Ok(Response::new(self.status, "body"))
        }
    }

    fn make_session(status: u16) -> (Session, Rc<RefCell<Vec<Request>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let session = Session::new(Echo {
            seen: Rc::clone(&seen),
            status,
        });
        (session, seen)
    }

    #[test]
    fn test_session_headers_are_merged() {
        let (mut session, seen) = make_session(200);
        session.set_header("Authorization", "Bearer abc");
        session.set_header("X-Extra", "1");

        session
            .send(Request::get("https://example.org").header("x-extra", "2"))
            .unwrap();

        let sent = &seen.borrow()[0];
        assert_eq!(sent.header_value("authorization"), Some("Bearer abc"));
        assert_eq!(sent.header_value("X-Extra"), Some("2"));
        assert_eq!(sent.headers.len(), 2);
    }

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let (mut session, _) = make_session(200);
        session.set_header("authorization", "old");
        session.set_header("Authorization", "new");
        assert_eq!(session.header("AUTHORIZATION"), Some("new"));

        session.remove_header("authorization");
        assert_eq!(session.header("Authorization"), None);
    }

    #[test]
    fn test_send_checked() {
        let (session, _) = make_session(200);
        assert!(session.send_checked(Request::get("u")).is_ok());

        let (session, _) = make_session(500);
        assert!(session.send(Request::get("u")).is_ok());
        assert_eq!(
            session.send_checked(Request::get("u")).unwrap_err().status_code(),
            Some(500)
        );
    }

    #[test]
    fn test_debug_hides_header_values() {
        let (mut session, _) = make_session(200);
        session.set_header("Authorization", "Bearer secret");
        let debug = format!("{session:?}");
        assert!(debug.contains("Authorization"));
        assert!(!debug.contains("secret"));
    }
}
