// ABOUTME: Per-request options and their translation into an endpoint-specific query suffix.
// ABOUTME: A static table lists, per endpoint, which options are honored and how each is serialized.

use std::time::Duration;

use url::form_urlencoded;

use crate::endpoint::Endpoint;

/// Header overrides forwarded to the target site in place of the service defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardHeaders {
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub cookie: Option<String>,
}

impl ForwardHeaders {
    /// Header name/value pairs for every override that is set.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("X-Forward-User-Agent", self.user_agent.as_deref()),
            ("X-Forward-Referer", self.referer.as_deref()),
            ("X-Forward-Cookie", self.cookie.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.user_agent.is_none() && self.referer.is_none() && self.cookie.is_none()
    }
}

/// Optional parameters for a single API call.
///
/// Only the options that the target endpoint recognizes end up in the query
/// string; everything else is ignored for that call. Unset strings (`None` or
/// empty) and a zero timeout are never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub fields: Option<String>,
    pub timeout: Option<Duration>,
    pub callback: Option<String>,
    pub frontpage_all: Option<String>,
    pub classifier_mode: Option<String>,
    pub classifier_stats: Option<String>,
    pub bulk_notify_email: Option<String>,
    pub bulk_notify_webhook: Option<String>,
    pub bulk_repeat: Option<String>,
    pub bulk_max_rounds: Option<String>,
    pub bulk_page_process_pattern: Option<String>,
    pub crawl_max_to_crawl: Option<String>,
    pub crawl_max_to_process: Option<String>,
    pub crawl_restrict_domain: Option<String>,
    pub crawl_notify_email: Option<String>,
    pub crawl_notify_webhook: Option<String>,
    pub crawl_delay: Option<String>,
    pub crawl_repeat: Option<String>,
    pub crawl_only_process_if_new: Option<String>,
    pub crawl_max_rounds: Option<String>,
    pub batch_method: Option<String>,
    pub batch_relative_url: Option<String>,
    pub forward: ForwardHeaders,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the response fields, e.g. `meta,querystring,images(*)`.
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Server-side processing timeout, sent in milliseconds.
    ///
    /// When it outlasts the client's local timeout, that call waits this long
    /// plus a few seconds instead.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// JSONP callback name.
    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    /// Ask the frontpage API to return non-core items as well.
    pub fn with_frontpage_all(mut self, all: impl Into<String>) -> Self {
        self.frontpage_all = Some(all.into());
        self
    }

    pub fn with_classifier_mode(mut self, mode: impl Into<String>) -> Self {
        self.classifier_mode = Some(mode.into());
        self
    }

    pub fn with_classifier_stats(mut self, stats: impl Into<String>) -> Self {
        self.classifier_stats = Some(stats.into());
        self
    }

    pub fn with_batch_method(mut self, method: impl Into<String>) -> Self {
        self.batch_method = Some(method.into());
        self
    }

    pub fn with_batch_relative_url(mut self, relative_url: impl Into<String>) -> Self {
        self.batch_relative_url = Some(relative_url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.forward.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.forward.referer = Some(referer.into());
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.forward.cookie = Some(cookie.into());
        self
    }

    /// Query-string suffix for `endpoint`, starting with `&` when non-empty.
    ///
    /// Returns an empty string when `endpoint` is empty.
    pub fn query_suffix(&self, endpoint: &str) -> String {
        if endpoint.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        for param in params_for(&Endpoint::from(endpoint)) {
            let Some(value) = (param.value)(self) else {
                continue;
            };
            out.push('&');
            out.push_str(param.name);
            out.push('=');
            if param.escape {
                out.push_str(&query_escape(&value));
            } else {
                out.push_str(&value);
            }
        }
        out
    }
}

/// Query suffix for optional options; `None` encodes to an empty string.
pub fn encode_query(endpoint: &str, opts: Option<&RequestOptions>) -> String {
    opts.map(|o| o.query_suffix(endpoint)).unwrap_or_default()
}

/// Escape a value for a query string: form encoding, with `*` escaped and `~` left as is.
pub fn query_escape(value: &str) -> String {
    let escaped: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    escaped.replace('*', "%2A").replace("%7E", "~")
}

/// One serializable query parameter.
struct Param {
    name: &'static str,
    escape: bool,
    value: fn(&RequestOptions) -> Option<String>,
}

fn set(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

macro_rules! text_param {
    ($id:ident, $wire:literal, $field:ident) => {
        text_param!($id, $wire, $field, false);
    };
    ($id:ident, $wire:literal, $field:ident, $escape:expr) => {
        const $id: Param = Param {
            name: $wire,
            escape: $escape,
            value: |o| set(&o.$field),
        };
    };
}

const TIMEOUT: Param = Param {
    name: "timeout",
    escape: false,
    value: |o| {
        o.timeout
            .filter(|t| !t.is_zero())
            .map(|t| t.as_millis().to_string())
    },
};

text_param!(FIELDS, "fields", fields);
text_param!(CALLBACK, "callback", callback, true);
text_param!(FRONTPAGE_ALL, "all", frontpage_all);
text_param!(CLASSIFIER_MODE, "mode", classifier_mode);
text_param!(CLASSIFIER_STATS, "stats", classifier_stats);
text_param!(BULK_NOTIFY_EMAIL, "notifyEmail", bulk_notify_email);
text_param!(BULK_NOTIFY_WEBHOOK, "notifyWebHook", bulk_notify_webhook);
text_param!(BULK_REPEAT, "repeat", bulk_repeat);
text_param!(BULK_MAX_ROUNDS, "maxRounds", bulk_max_rounds);
text_param!(BULK_PAGE_PROCESS_PATTERN, "pageProcessPattern", bulk_page_process_pattern);
text_param!(CRAWL_MAX_TO_CRAWL, "maxToCrawl", crawl_max_to_crawl);
text_param!(CRAWL_MAX_TO_PROCESS, "maxToProcess", crawl_max_to_process);
text_param!(CRAWL_RESTRICT_DOMAIN, "restrictDomain", crawl_restrict_domain);
text_param!(CRAWL_NOTIFY_EMAIL, "notifyEmail", crawl_notify_email);
text_param!(CRAWL_NOTIFY_WEBHOOK, "notifyWebHook", crawl_notify_webhook);
text_param!(CRAWL_DELAY, "crawlDelay", crawl_delay);
text_param!(CRAWL_REPEAT, "repeat", crawl_repeat);
text_param!(CRAWL_ONLY_PROCESS_IF_NEW, "onlyProcessIfNew", crawl_only_process_if_new);
text_param!(CRAWL_MAX_ROUNDS, "maxRounds", crawl_max_rounds);
text_param!(BATCH_METHOD, "method", batch_method);
text_param!(BATCH_RELATIVE_URL, "relative_url", batch_relative_url, true);

const EXTRACT_PARAMS: &[Param] = &[FIELDS, TIMEOUT, CALLBACK];
const FRONTPAGE_PARAMS: &[Param] = &[TIMEOUT, FRONTPAGE_ALL];
const ANALYZE_PARAMS: &[Param] = &[CLASSIFIER_MODE, FIELDS, CLASSIFIER_STATS];
const BULK_PARAMS: &[Param] = &[
    BULK_NOTIFY_EMAIL,
    BULK_NOTIFY_WEBHOOK,
    BULK_REPEAT,
    BULK_MAX_ROUNDS,
    BULK_PAGE_PROCESS_PATTERN,
];
const CRAWL_PARAMS: &[Param] = &[
    CRAWL_MAX_TO_CRAWL,
    CRAWL_MAX_TO_PROCESS,
    CRAWL_RESTRICT_DOMAIN,
    CRAWL_NOTIFY_EMAIL,
    CRAWL_NOTIFY_WEBHOOK,
    CRAWL_DELAY,
    CRAWL_REPEAT,
    CRAWL_ONLY_PROCESS_IF_NEW,
    CRAWL_MAX_ROUNDS,
];
const BATCH_PARAMS: &[Param] = &[TIMEOUT, BATCH_METHOD, BATCH_RELATIVE_URL];
const CUSTOM_PARAMS: &[Param] = &[TIMEOUT, CALLBACK];

fn params_for(endpoint: &Endpoint) -> &'static [Param] {
    match endpoint {
        Endpoint::Article | Endpoint::Image | Endpoint::Product => EXTRACT_PARAMS,
        Endpoint::Frontpage => FRONTPAGE_PARAMS,
        Endpoint::Analyze => ANALYZE_PARAMS,
        Endpoint::Bulk => BULK_PARAMS,
        Endpoint::Crawl => CRAWL_PARAMS,
        Endpoint::Batch => BATCH_PARAMS,
        Endpoint::Custom(_) => CUSTOM_PARAMS,
    }
}
