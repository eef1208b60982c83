// ABOUTME: Frontpage record and the walk that reinterprets a labeled tree into it.
// ABOUTME: Info children fill page fields, item children become items; unknown tags are skipped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dml::{parse_dml, DmlElement};
use crate::endpoint::Endpoint;
use crate::error::DecodeError;
use crate::models::{null_as_default, Extraction};

/// The items found on a multi-item "homepage".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Frontpage {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "sourceURL", deserialize_with = "null_as_default")]
    pub source_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(deserialize_with = "null_as_default")]
    pub num_items: i64,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub items: Vec<FrontpageItem>,
}

/// One element of a frontpage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontpageItem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub xroot: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pub_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    /// Item type tag as sent, e.g. `STORY`.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub img: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text_summary: String,
    /// Spam score in [0, 1].
    #[serde(deserialize_with = "null_as_default")]
    pub sp: f64,
    /// Static rank in [1, 5].
    #[serde(deserialize_with = "null_as_default")]
    pub sr: f64,
    /// Fraction changed since the previous crawl, in [0, 1].
    #[serde(deserialize_with = "null_as_default")]
    pub fresh: f64,
}

/// Item type tags the service assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Image,
    Link,
    Story,
    Chunk,
    Other,
}

impl FrontpageItem {
    pub fn kind(&self) -> ItemKind {
        match self.kind.to_ascii_lowercase().as_str() {
            "image" => ItemKind::Image,
            "link" => ItemKind::Link,
            "story" => ItemKind::Story,
            "chunk" => ItemKind::Chunk,
            _ => ItemKind::Other,
        }
    }
}

fn parse_f64(s: Option<String>) -> f64 {
    s.and_then(|v| v.trim().parse().ok())
        .filter(|v: &f64| v.is_finite())
        .unwrap_or(0.0)
}

fn parse_i64(s: Option<String>) -> i64 {
    s.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

impl Frontpage {
    /// Decode the endpoint's JSON tree and walk it into a record.
    pub fn from_json(data: &[u8]) -> Result<Self, DecodeError> {
        let root = parse_dml(data)?;
        Self::from_dml(&root)
    }

    /// Walk a decoded tree. The root must be tagged `dml`.
    pub fn from_dml(root: &DmlElement) -> Result<Self, DecodeError> {
        if root.tag_name != crate::dml::ROOT_TAG {
            return Err(DecodeError::InvalidRoot {
                found: root.tag_name.clone(),
            });
        }

        let mut page = Frontpage {
            id: parse_i64(root.attr("id")),
            ..Default::default()
        };
        for node in root.elements() {
            match node.tag_name.as_str() {
                "info" => page.apply_info(node),
                "item" => page.items.push(parse_item(node)),
                _ => {}
            }
        }
        Ok(page)
    }

    fn apply_info(&mut self, info: &DmlElement) {
        for field in info.elements() {
            let Some(text) = field.first_text() else {
                continue;
            };
            match field.tag_name.as_str() {
                "title" => self.title = text.to_string(),
                "sourceURL" => self.source_url = text.to_string(),
                "icon" => self.icon = text.to_string(),
                "numItems" => {
                    if let Ok(n) = text.trim().parse() {
                        self.num_items = n;
                    }
                }
                _ => {}
            }
        }
    }
}

fn parse_item(node: &DmlElement) -> FrontpageItem {
    let mut item = FrontpageItem {
        id: parse_i64(node.attr("id")),
        kind: node.attr("type").unwrap_or_default(),
        xroot: node.attr("xroot").unwrap_or_default(),
        sp: parse_f64(node.attr("sp")),
        sr: parse_f64(node.attr("sr")),
        fresh: parse_f64(node.attr("fresh")),
        ..Default::default()
    };
    for field in node.elements() {
        let Some(text) = field.first_text() else {
            continue;
        };
        let slot = match field.tag_name.as_str() {
            "title" => &mut item.title,
            "link" => &mut item.link,
            "pubDate" => &mut item.pub_date,
            "textSummary" => &mut item.text_summary,
            "description" => &mut item.description,
            "img" => &mut item.img,
            _ => continue,
        };
        *slot = text.to_string();
    }
    item
}

impl Extraction for Frontpage {
    const ENDPOINT: Endpoint = Endpoint::Frontpage;

    fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        Self::from_json(body)
    }
}

impl fmt::Display for Frontpage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}
