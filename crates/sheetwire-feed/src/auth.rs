//! ClientLogin password authentication for the legacy protocol.

use sheetwire_core::error::{Error, Result};
use sheetwire_http::{ClientConfig, Request, Response};

/// Service name the spreadsheet feeds are registered under
pub const SERVICE: &str = "wise";
const ACCOUNT_TYPE: &str = "HOSTED_OR_GOOGLE";

/// Email and password pair used to log in.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Build the login form POST
pub fn login_request(config: &ClientConfig, credentials: &Credentials) -> Request {
    Request::post(&config.auth_url).form([
        ("Email", credentials.email.as_str()),
        ("Passwd", credentials.password.as_str()),
        ("accountType", ACCOUNT_TYPE),
        ("service", SERVICE),
        ("source", config.source.as_str()),
    ])
}

/// Find the `Auth=` line of a login response body
pub fn extract_auth_token(body: &str) -> Option<&str> {
    body.lines()
        .find_map(|line| line.strip_prefix("Auth="))
        .map(str::trim_end)
}

/// Turn a login response into the `Authorization` header value.
pub fn authorization_header(response: &Response) -> Result<String> {
    match response.status {
        200 => extract_auth_token(&response.body)
            .map(|token| format!("GoogleLogin auth={token}"))
            .ok_or_else(|| Error::Authentication("Login response carries no Auth token".into())),
        403 if response.body.trim() == "Error=BadAuthentication" => Err(Error::Authentication(
            "Incorrect username or password".into(),
        )),
        code => Err(Error::Authentication(format!(
            "Unable to authenticate. {code} code"
        ))),
    }
}
