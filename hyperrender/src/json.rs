//! Adapter from JSON-shaped virtual nodes.
//!
//! View layers that serialize their trees (or tests that write them by hand)
//! use one of several historical field layouts. All of them are accepted and
//! normalized into [`Node`] here, before rendering starts:
//!
//! | layout  | element                                  | text node               |
//! |---------|------------------------------------------|-------------------------|
//! | v1      | `{ nodeName, attributes, children }`     | plain scalar            |
//! | v2.0.0  | `{ name, props, children, type: 1 }`     | `{ type: 3, name }`     |
//! | v2.0.6  | `{ type, props, children, tag: 1 }`      | `{ tag: 3, type }`      |
//!
//! Arrays become fragments, scalars become text. An object with no
//! attribute field is treated as a scalar and renders through its string
//! form.
//!
//! ```rust
//! use hyperrender::{json::from_json, render_to_string};
//!
//! let node = from_json(&serde_json::json!({
//!     "nodeName": "div",
//!     "attributes": { "class": ["a", { "b": true }] },
//!     "children": ["hi", 0, null],
//! }))
//! .unwrap();
//! assert_eq!(render_to_string(node).unwrap(), r#"<div class="a b">hi0</div>"#);
//! ```

use crate::error::{RenderError, Result};
use crate::node::{Element, Node};
use crate::value::{Map, Value};
use compact_str::CompactString;
use serde_json::Value as Json;

const TEXT_NODE: u64 = 3;
const LAZY_NODE: u64 = 2;

/// Normalize a JSON virtual node into a [`Node`].
///
/// Fails with [`RenderError::MalformedNode`] when an element's `children`
/// is missing or not an array, when its attribute field is not an object, or
/// for lazy nodes (which need a view function JSON cannot carry).
pub fn from_json<S, A>(json: &Json) -> Result<Node<S, A>> {
    match json {
        Json::Array(items) => Ok(Node::Fragment(
            items.iter().map(from_json).collect::<Result<_>>()?,
        )),
        Json::Object(obj) => {
            if kind(obj, "tag") == Some(TEXT_NODE) {
                return Ok(Node::Text(text_of(obj.get("type"))));
            }
            if kind(obj, "type") == Some(TEXT_NODE) {
                return Ok(Node::Text(text_of(obj.get("name"))));
            }
            if kind(obj, "type") == Some(LAZY_NODE) && obj.contains_key("lazy") {
                return Err(malformed("", "lazy nodes need a view function"));
            }

            let attrs = ["props", "attributes"]
                .iter()
                .filter_map(|key| obj.get(*key))
                .find(|v| !is_falsy(v));
            let Some(attrs) = attrs else {
                return Ok(Node::Text(value_from_json(json)));
            };

            let tag = ["name", "type", "nodeName"]
                .iter()
                .filter_map(|key| obj.get(*key).and_then(Json::as_str))
                .find(|s| !s.is_empty())
                .unwrap_or_default();

            let Json::Object(attrs) = attrs else {
                return Err(malformed(tag, "attributes must be an object"));
            };
            let Some(Json::Array(children)) = obj.get("children") else {
                return Err(malformed(tag, "children is not a sequence"));
            };

            Ok(Node::Element(Element {
                tag: tag.into(),
                attrs: attrs
                    .iter()
                    .map(|(k, v)| (CompactString::from(k.as_str()), value_from_json(v)))
                    .collect(),
                children: children.iter().map(from_json).collect::<Result<_>>()?,
            }))
        }
        scalar => Ok(Node::Text(value_from_json(scalar))),
    }
}

/// Convert plain JSON data into a [`Value`].
pub fn value_from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        Json::String(s) => Value::String(s.as_str().into()),
        Json::Array(items) => Value::List(items.iter().map(value_from_json).collect()),
        Json::Object(obj) => Value::Map(
            obj.iter()
                .map(|(k, v)| (CompactString::from(k.as_str()), value_from_json(v)))
                .collect::<Map>(),
        ),
    }
}

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        value_from_json(json)
    }
}

fn kind(obj: &serde_json::Map<String, Json>, key: &str) -> Option<u64> {
    obj.get(key).and_then(Json::as_u64)
}

fn text_of(json: Option<&Json>) -> Value {
    json.map(value_from_json).unwrap_or_default()
}

fn is_falsy(json: &Json) -> bool {
    match json {
        Json::Null => true,
        Json::Bool(b) => !b,
        Json::String(s) => s.is_empty(),
        Json::Number(n) => n.as_f64() == Some(0.0),
        Json::Array(_) | Json::Object(_) => false,
    }
}

fn malformed(tag: &str, reason: &str) -> RenderError {
    RenderError::MalformedNode {
        tag: tag.into(),
        reason: reason.to_string(),
    }
}
