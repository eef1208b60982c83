// ABOUTME: The Client struct: typed entry points for each extraction endpoint plus raw access.
// ABOUTME: Each call is one blocking request followed by decoding into the endpoint's result type.

use std::time::Duration;

use bytes::Bytes;

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::frontpage::Frontpage;
use crate::models::{Article, Classification, Extraction, Image, Product};
use crate::options::{ClientBuilder, ClientOptions};
use crate::params::RequestOptions;
use crate::transport::{send, Call, Markup};

/// Client for the extraction API. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct Client {
    server: String,
    token: String,
    timeout: Duration,
    http: reqwest::blocking::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client from `DIFFBOT_TOKEN` and optional `DIFFBOT_SERVER`.
    pub fn from_env() -> Result<Self, Error> {
        ClientBuilder::from_env()?.build()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: ClientOptions) -> Result<Self, Error> {
        if opts.token.is_empty() {
            return Err(Error::config("token is required"));
        }
        let http = match opts.http_client {
            Some(client) => client,
            None => reqwest::blocking::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?,
        };
        Ok(Self {
            server: opts.server.trim_end_matches('/').to_string(),
            token: opts.token,
            timeout: opts.timeout,
            http,
        })
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Call any endpoint and return the raw 200 body.
    ///
    /// With `markup` the content is POSTed for analysis; otherwise the service
    /// fetches `url` itself.
    pub fn fetch(
        &self,
        endpoint: &Endpoint,
        url: &str,
        opts: Option<&RequestOptions>,
        markup: Option<&Markup>,
    ) -> Result<Bytes, Error> {
        send(
            &self.http,
            Call {
                server: &self.server,
                endpoint: endpoint.as_str(),
                token: &self.token,
                url,
                opts,
                markup,
                timeout: self.timeout,
            },
        )
    }

    /// Fetch `url` through the endpoint that produces `T` and decode the result.
    pub fn extract<T: Extraction>(
        &self,
        url: &str,
        opts: Option<&RequestOptions>,
    ) -> Result<T, Error> {
        self.extract_inner(url, opts, None)
    }

    /// Like [`Client::extract`] but analyzes posted markup instead of fetching.
    pub fn extract_markup<T: Extraction>(
        &self,
        url: &str,
        markup: &Markup,
        opts: Option<&RequestOptions>,
    ) -> Result<T, Error> {
        self.extract_inner(url, opts, Some(markup))
    }

    fn extract_inner<T: Extraction>(
        &self,
        url: &str,
        opts: Option<&RequestOptions>,
        markup: Option<&Markup>,
    ) -> Result<T, Error> {
        let endpoint = T::ENDPOINT;
        let body = self.fetch(&endpoint, url, opts, markup)?;
        T::decode(&body).map_err(|e| {
            tracing::debug!(endpoint = endpoint.as_str(), error = %e, "response did not decode");
            Error::decode(endpoint.as_str(), e)
        })
    }

    /// Clean article text from a news or blog page.
    pub fn article(&self, url: &str, opts: Option<&RequestOptions>) -> Result<Article, Error> {
        self.extract(url, opts)
    }

    /// Product details from a shopping page.
    pub fn product(&self, url: &str, opts: Option<&RequestOptions>) -> Result<Product, Error> {
        self.extract(url, opts)
    }

    /// The primary image(s) of a page.
    pub fn image(&self, url: &str, opts: Option<&RequestOptions>) -> Result<Image, Error> {
        self.extract(url, opts)
    }

    /// Individual items from a multi-item "homepage".
    pub fn frontpage(
        &self,
        url: &str,
        opts: Option<&RequestOptions>,
    ) -> Result<Frontpage, Error> {
        self.extract(url, opts)
    }

    /// The predicted page type with per-category probabilities.
    pub fn classify(
        &self,
        url: &str,
        opts: Option<&RequestOptions>,
    ) -> Result<Classification, Error> {
        self.extract(url, opts)
    }
}
