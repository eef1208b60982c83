// ABOUTME: Builds request URLs and performs the single blocking HTTP round trip per call.
// ABOUTME: Returns the body on 200; any other status is turned into an ApiError.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::error::{ApiError, Error};
use crate::params::{encode_query, query_escape, RequestOptions};

/// Default API root.
pub const DEFAULT_SERVER: &str = "http://api.diffbot.com/v2";

/// Time left for the response to travel back after the server-side timeout.
const DEADLINE_SLACK: Duration = Duration::from_secs(5);

/// Content type of posted markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupType {
    #[default]
    Html,
    Plain,
}

impl MarkupType {
    pub fn mime(&self) -> &'static str {
        match self {
            MarkupType::Html => "text/html",
            MarkupType::Plain => "text/plain",
        }
    }
}

impl fmt::Display for MarkupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mime())
    }
}

/// Page content posted for analysis instead of letting the service fetch the URL.
///
/// The target URL is still sent and is used to resolve relative links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub content_type: MarkupType,
    pub body: String,
}

impl Markup {
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            content_type: MarkupType::Html,
            body: body.into(),
        }
    }

    pub fn plain(body: impl Into<String>) -> Self {
        Self {
            content_type: MarkupType::Plain,
            body: body.into(),
        }
    }
}

/// Build `<server>/<endpoint>?token=..&url=..` plus the endpoint's option suffix.
pub fn request_url(
    server: &str,
    endpoint: &str,
    token: &str,
    url: &str,
    opts: Option<&RequestOptions>,
) -> String {
    format!(
        "{}/{}?token={}&url={}{}",
        server.trim_end_matches('/'),
        endpoint,
        token,
        query_escape(url),
        encode_query(endpoint, opts)
    )
}

/// Local deadline for a call whose server-side timeout would outlast `local`.
///
/// `None` keeps the HTTP client's own deadline.
pub fn extended_deadline(local: Duration, opts: Option<&RequestOptions>) -> Option<Duration> {
    let server = opts?.timeout.filter(|t| !t.is_zero())?;
    let needed = server + DEADLINE_SLACK;
    (needed > local).then_some(needed)
}

/// One call against the service.
#[derive(Debug, Clone, Copy)]
pub struct Call<'a> {
    pub server: &'a str,
    pub endpoint: &'a str,
    pub token: &'a str,
    pub url: &'a str,
    pub opts: Option<&'a RequestOptions>,
    pub markup: Option<&'a Markup>,
    /// Deadline the HTTP client was built with.
    pub timeout: Duration,
}

/// Send the call and return the raw body of a 200 response.
pub fn send(http: &reqwest::blocking::Client, call: Call<'_>) -> Result<Bytes, Error> {
    let target = request_url(call.server, call.endpoint, call.token, call.url, call.opts);

    let mut request = match call.markup {
        Some(markup) => http
            .post(&target)
            .header(CONTENT_TYPE, markup.content_type.mime())
            .body(markup.body.clone()),
        None => http.get(&target),
    };
    if let Some(deadline) = extended_deadline(call.timeout, call.opts) {
        request = request.timeout(deadline);
    }
    if let Some(opts) = call.opts {
        for (name, value) in opts.forward.to_pairs() {
            request = request.header(name, value);
        }
    }

    let method = if call.markup.is_some() { "POST" } else { "GET" };
    tracing::debug!(endpoint = call.endpoint, url = call.url, method, "sending request");

    let response = request
        .send()
        .map_err(|e| Error::transport(call.endpoint, e))?;
    let status = response.status();
    let body = response
        .bytes()
        .map_err(|e| Error::transport(call.endpoint, e))?;

    tracing::debug!(
        endpoint = call.endpoint,
        status = status.as_u16(),
        bytes = body.len(),
        "received response"
    );

    if status != StatusCode::OK {
        let text = String::from_utf8_lossy(&body);
        return Err(Error::api(
            call.endpoint,
            ApiError::from_response(status, &text),
        ));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn request_url_escapes_target_and_appends_options() {
        let opts = RequestOptions::new()
            .with_fields("meta")
            .with_timeout(Duration::from_millis(1500));
        let url = request_url(
            "http://api.diffbot.com/v2/",
            "article",
            "tok",
            "http://example.com/a b?x=1&y=2",
            Some(&opts),
        );
        assert_eq!(
            url,
            "http://api.diffbot.com/v2/article?token=tok&url=http%3A%2F%2Fexample.com%2Fa+b%3Fx%3D1%26y%3D2&fields=meta&timeout=1500"
        );
    }

    #[test]
    fn request_url_without_options() {
        assert_eq!(
            request_url(DEFAULT_SERVER, "frontpage", "t", "http://x.com", None),
            "http://api.diffbot.com/v2/frontpage?token=t&url=http%3A%2F%2Fx.com"
        );
    }

    #[test]
    fn long_server_timeouts_extend_the_local_deadline() {
        let local = Duration::from_secs(30);
        let short = RequestOptions::new().with_timeout(Duration::from_secs(10));
        let long = RequestOptions::new().with_timeout(Duration::from_secs(60));

        assert_eq!(extended_deadline(local, None), None);
        assert_eq!(extended_deadline(local, Some(&RequestOptions::new())), None);
        assert_eq!(extended_deadline(local, Some(&short)), None);
        assert_eq!(
            extended_deadline(local, Some(&long)),
            Some(Duration::from_secs(65))
        );
    }

    #[test]
    fn markup_constructors_pick_content_type() {
        assert_eq!(Markup::html("<p>x</p>").content_type.mime(), "text/html");
        assert_eq!(Markup::plain("x").content_type.to_string(), "text/plain");
    }
}
