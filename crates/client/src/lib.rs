// ABOUTME: Main library entry point for the extraction API client.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, RequestOptions, result types, and errors.

//! Blocking client for the Diffbot extraction APIs.
//!
//! Each call sends one request and decodes the JSON response into a typed
//! result: [`Article`], [`Product`], [`Image`], [`Frontpage`] or
//! [`Classification`]. Failures come back as an [`Error`] that tells a
//! transport problem, an API error payload and an undecodable body apart.
//!
//! # Example
//!
//! ```no_run
//! use diffbot_client::{Client, Error, RequestOptions};
//!
//! fn main() -> Result<(), Error> {
//!     let client = Client::builder().token("0123456789abcdef").build()?;
//!     let opts = RequestOptions::new().with_fields("meta,tags");
//!     let article = client.article("http://blog.diffbot.com/", Some(&opts))?;
//!     println!("{}", article.title);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dml;
pub mod endpoint;
pub mod error;
pub mod frontpage;
pub mod models;
pub mod options;
pub mod params;
pub mod transport;

pub use crate::client::Client;
pub use crate::dml::{parse_dml, DmlElement, DmlNode};
pub use crate::endpoint::Endpoint;
pub use crate::error::{ApiError, DecodeError, Error, ErrorCode};
pub use crate::frontpage::{Frontpage, FrontpageItem, ItemKind};
pub use crate::models::{
    Article, ArticleImage, ArticleVideo, Classification, ClassificationStats, Extraction, Image,
    ImageRecord, Meta, Product, ProductMedia, ProductRecord,
};
pub use crate::options::{ClientBuilder, ClientOptions};
pub use crate::params::{encode_query, ForwardHeaders, RequestOptions};
pub use crate::transport::{request_url, Markup, MarkupType, DEFAULT_SERVER};
