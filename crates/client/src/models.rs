// ABOUTME: Typed results for the JSON extraction endpoints: article, product, image, and classifier.
// ABOUTME: Absent fields decode to empty values; optional containers are skipped when serializing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::DecodeError;

/// Page metadata returned when requested through `fields`.
pub type Meta = BTreeMap<String, Value>;

/// A result type that one endpoint decodes into.
pub trait Extraction: Sized {
    const ENDPOINT: Endpoint;

    /// Decode a raw 200 response body.
    fn decode(body: &[u8]) -> Result<Self, DecodeError>;
}

macro_rules! json_result {
    ($ty:ident, $endpoint:expr) => {
        impl $ty {
            /// Decode from the endpoint's JSON response.
            pub fn from_json(data: &[u8]) -> Result<Self, DecodeError> {
                Ok(serde_json::from_slice(data)?)
            }
        }

        impl Extraction for $ty {
            const ENDPOINT: Endpoint = $endpoint;

            fn decode(body: &[u8]) -> Result<Self, DecodeError> {
                Self::from_json(body)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&s)
            }
        }
    };
}

/// Reads a JSON `null` as the field's empty value, like an absent key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// Clean article text and its surrounding page data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resolved_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(
        rename = "querystring",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default",
    )]
    pub query_string: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub links: Vec<String>,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub html: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(rename = "numPages", deserialize_with = "null_as_default")]
    pub num_pages: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(
        rename = "humanLanguage",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default",
    )]
    pub human_language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<ArticleImage>,
    #[serde(deserialize_with = "null_as_default")]
    pub videos: Vec<ArticleVideo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArticleImage {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pixel_height: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub pixel_width: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(deserialize_with = "null_as_default")]
    pub primary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArticleVideo {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pixel_height: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub pixel_width: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub primary: String,
}

impl Article {
    /// The media item flagged as primary, if any.
    pub fn primary_image(&self) -> Option<&ArticleImage> {
        self.images.iter().find(|img| img.primary == "true")
    }
}

json_result!(Article, Endpoint::Article);

/// Products found on a shopping page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resolved_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(
        rename = "querystring",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default",
    )]
    pub query_string: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub links: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub breadcrumb: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub products: Vec<ProductRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(deserialize_with = "null_as_default")]
    pub media: Vec<ProductMedia>,
    #[serde(deserialize_with = "null_as_default")]
    pub offer_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub regular_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub save_amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub shipping_amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub upc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prefix_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_origin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub isbn: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub sku: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub mpn: String,
}

/// An image or video attached to a product.
///
/// `height` and `width` are taken as sent. The service documents them as
/// display dimensions, but observed responses carry pixel dimensions here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductMedia {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub height: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub width: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(deserialize_with = "null_as_default")]
    pub primary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub xpath: String,
}

json_result!(Product, Endpoint::Product);

/// The primary images of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "nextPage", deserialize_with = "null_as_default")]
    pub next_page: String,
    #[serde(rename = "albumUrl", deserialize_with = "null_as_default")]
    pub album_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resolved_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(
        rename = "querystring",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default",
    )]
    pub query_string: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub links: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<ImageRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub anchor_url: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub mime: String,
    #[serde(deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub attr_alt: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub attr_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    // Some responses label the pixel dimensions plain `height`/`width`.
    #[serde(alias = "height", deserialize_with = "null_as_default")]
    pub pixel_height: i64,
    #[serde(alias = "width", deserialize_with = "null_as_default")]
    pub pixel_width: i64,
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub display_height: i64,
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub display_width: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub meta: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub faces: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub ocr: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub colors: String,
    #[serde(deserialize_with = "null_as_default")]
    pub xpath: String,
}

json_result!(Image, Endpoint::Image);

/// The page type predicted by the classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classification {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub resolved_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(
        rename = "querystring",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default",
    )]
    pub query_string: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub links: Vec<String>,
    #[serde(
        rename = "humanLanguage",
        alias = "human_language",
        deserialize_with = "null_as_default",
    )]
    pub human_language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stats: ClassificationStats,
}

/// Probability per page category, keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationStats {
    #[serde(deserialize_with = "null_as_default")]
    pub types: BTreeMap<String, f64>,
}

impl Classification {
    /// Probability assigned to `category`, zero when the category is absent.
    pub fn probability(&self, category: &str) -> f64 {
        self.stats.types.get(category).copied().unwrap_or(0.0)
    }

    /// The category with the highest probability.
    pub fn most_likely(&self) -> Option<(&str, f64)> {
        self.stats
            .types
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(name, p)| (name.as_str(), *p))
    }
}

json_result!(Classification, Endpoint::Analyze);
