// ABOUTME: Client configuration (server, token, HTTP settings) and the fluent ClientBuilder.
// ABOUTME: Also reads DIFFBOT_TOKEN / DIFFBOT_SERVER for environment-driven setup.

use std::time::Duration;

use crate::client::Client;
use crate::error::Error;
use crate::transport::DEFAULT_SERVER;

pub const TOKEN_ENV: &str = "DIFFBOT_TOKEN";
pub const SERVER_ENV: &str = "DIFFBOT_SERVER";

/// Configuration options for the client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub server: String,
    pub token: String,
    /// Local HTTP timeout for a whole round trip.
    pub timeout: Duration,
    pub user_agent: String,
    pub http_client: Option<reqwest::blocking::Client>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            token: String::new(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("diffbot-client/", env!("CARGO_PKG_VERSION")).to_string(),
            http_client: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: ClientOptions,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: ClientOptions::default(),
        }
    }

    /// Start from `DIFFBOT_TOKEN` and, if set, `DIFFBOT_SERVER`.
    pub fn from_env() -> Result<Self, Error> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| Error::config(format!("{TOKEN_ENV} not set")))?;
        let mut builder = Self::new().token(token);
        if let Ok(server) = std::env::var(SERVER_ENV) {
            builder = builder.server(server);
        }
        Ok(builder)
    }

    /// Set the API root, e.g. `http://api.diffbot.com/v2`.
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.opts.server = server.into();
        self
    }

    /// Set the developer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.opts.token = token.into();
        self
    }

    /// Set the local HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header sent to the service itself.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Use a custom HTTP client. Timeout and user agent settings are then ignored.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, Error> {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_api() {
        let opts = ClientOptions::default();
        assert_eq!(opts.server, "http://api.diffbot.com/v2");
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert!(opts.user_agent.starts_with("diffbot-client/"));
        assert!(opts.token.is_empty());
    }

    #[test]
    fn builder_overrides() {
        let client = ClientBuilder::new()
            .server("http://localhost:9000/v3/")
            .token("abc")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.server(), "http://localhost:9000/v3");
        assert_eq!(client.token(), "abc");
    }
}
