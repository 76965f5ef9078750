//! Sending requests over the network.
//!
//! [`Transport`] is the seam between the protocol adapters and the wire. The
//! production implementation wraps a blocking reqwest client; tests swap in a
//! scripted transport.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use sheetwire_core::error::{Error, Result};

use crate::config::ClientConfig;
use crate::request::{Body, Method, Request, Response};

/// Executes one request and returns the response, whatever its status.
///
/// Non-2xx statuses are not errors at this layer; callers decide, since the
/// legacy login interprets a 403 body itself.
pub trait Transport {
    fn send(&self, request: &Request) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }
}

/// A transport backed by `reqwest::blocking::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport using the timeout from `config`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(Error::transport)?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            Body::Empty => builder,
            Body::Form(pairs) => builder.form(pairs),
            Body::Json(value) => builder.json(value),
            Body::Text { content_type, text } => builder
                .header(CONTENT_TYPE, content_type.as_str())
                .body(text.clone()),
        };

        let response = builder.send().map_err(Error::transport)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(Error::transport)?;

        Ok(Response { status, body })
    }
}

/// Join path segments onto a base URL, percent-encoding each segment.
///
/// ```
/// use sheetwire_http::join_url;
///
/// let url = join_url("https://example.org/v4/spreadsheets", &["abc", "values", "'My sheet'!A1"]).unwrap();
/// assert_eq!(url, "https://example.org/v4/spreadsheets/abc/values/'My%20sheet'!A1");
/// ```
pub fn join_url(base: &str, segments: &[&str]) -> Result<String> {
    let mut url = reqwest::Url::parse(base)
        .map_err(|e| Error::InvalidInput(format!("invalid base URL '{base}': {e}")))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| Error::InvalidInput(format!("URL '{base}' cannot take a path")))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url.to_string())
}
