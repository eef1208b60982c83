// ABOUTME: Generic labeled tree used on the wire by the frontpage endpoint.
// ABOUTME: Nodes are either leaf text or a tagged element with attributes and ordered children.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;
use crate::models::null_as_default;

/// Tag the tree root must carry.
pub const ROOT_TAG: &str = "dml";

/// A child of an element: nested element or leaf text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DmlNode {
    Text(String),
    Element(DmlElement),
}

impl DmlNode {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DmlNode::Text(s) => Some(s),
            DmlNode::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&DmlElement> {
        match self {
            DmlNode::Element(e) => Some(e),
            DmlNode::Text(_) => None,
        }
    }
}

/// A tagged element. Every key besides `tagName` and `childNodes` is an attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DmlElement {
    #[serde(rename = "tagName")]
    pub tag_name: String,
    #[serde(
        rename = "childNodes",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub child_nodes: Vec<DmlNode>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl DmlElement {
    /// Attribute value as text. Numbers and booleans are rendered; other shapes are ignored.
    pub fn attr(&self, name: &str) -> Option<String> {
        match self.attributes.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// The first leaf text among the children.
    pub fn first_text(&self) -> Option<&str> {
        self.child_nodes.iter().find_map(DmlNode::as_text)
    }

    /// Child elements in document order, skipping leaf text.
    pub fn elements(&self) -> impl Iterator<Item = &DmlElement> {
        self.child_nodes.iter().filter_map(DmlNode::as_element)
    }
}

/// Decode a frontpage response into its tree, rejecting roots not tagged `dml`.
pub fn parse_dml(data: &[u8]) -> Result<DmlElement, DecodeError> {
    let root: DmlElement = serde_json::from_slice(data)?;
    if root.tag_name != ROOT_TAG {
        return Err(DecodeError::InvalidRoot {
            found: root.tag_name,
        });
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_nested_children_and_attributes() {
        let root = parse_dml(
            br#"{"tagName":"dml","id":"42","childNodes":[
                {"tagName":"info","childNodes":[{"tagName":"title","childNodes":["Home"]}]},
                "stray text",
                {"tagName":"item","sp":"0.500","commentCount":"3","childNodes":[]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(root.attr("id").as_deref(), Some("42"));
        assert_eq!(root.child_nodes.len(), 3);
        assert_eq!(root.first_text(), Some("stray text"));

        let tags: Vec<&str> = root.elements().map(|e| e.tag_name.as_str()).collect();
        assert_eq!(tags, vec!["info", "item"]);

        let info = root.elements().next().unwrap();
        let title = info.elements().next().unwrap();
        assert_eq!(title.first_text(), Some("Home"));

        let item = root.elements().nth(1).unwrap();
        assert_eq!(item.attr("sp").as_deref(), Some("0.500"));
        assert_eq!(item.attr("missing"), None);
    }

    #[test]
    fn numeric_attributes_render_as_text() {
        let root = parse_dml(br#"{"tagName":"dml","id":180194704,"flag":true}"#).unwrap();
        assert_eq!(root.attr("id").as_deref(), Some("180194704"));
        assert_eq!(root.attr("flag").as_deref(), Some("true"));
    }

    #[test]
    fn null_child_list_decodes_as_empty() {
        let root = parse_dml(
            br#"{"tagName":"dml","childNodes":[{"tagName":"item","id":"1","childNodes":null}]}"#,
        )
        .unwrap();
        let item = root.elements().next().unwrap();
        assert!(item.child_nodes.is_empty());
        assert_eq!(item.attr("id").as_deref(), Some("1"));
    }

    #[test]
    fn rejects_other_root_tags() {
        let err = parse_dml(br#"{"tagName":"html","childNodes":[]}"#).unwrap_err();
        match err {
            DecodeError::InvalidRoot { found } => assert_eq!(found, "html"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_dml(b"{\"tagName\":"),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(parse_dml(b"\"dml\""), Err(DecodeError::Json(_))));
    }
}
