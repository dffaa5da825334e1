use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Kind, SchemaNode};

/// Adapter over a JSON dump of a validation library's internal schema node.
///
/// The layout read here:
///
/// ```text
/// {
///   "_type": "object",
///   "_flags": { "presence": "required" },
///   "_valids": { "_set": ["a", "b"] },
///   "_inner": {
///     "children": [{ "key": "name", "schema": { ... } }],
///     "items": [{ ... }]
///   },
///   "_tests": [{ "name": "description", "arg": { "default": "..." } }],
///   "_description": "...",
///   "_examples": ["..."]
/// }
/// ```
///
/// Nested children and items are split off into adapters of their own when the
/// node is constructed, so the tree is walked once. Anything that does not
/// have the expected shape is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct JoiSchema {
    node: Value,
    children: Vec<(String, JoiSchema)>,
    items: Option<Box<JoiSchema>>,
}

impl JoiSchema {
    pub fn new(node: Value) -> Self {
        Self::from(node)
    }

    /// The node with its nested children and items detached.
    pub fn raw(&self) -> &Value {
        &self.node
    }

    fn tests(&self) -> &[Value] {
        self.node
            .get("_tests")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl From<Value> for JoiSchema {
    fn from(mut node: Value) -> Self {
        let children = detach(&mut node, "children")
            .and_then(|children| match children {
                Value::Array(list) => Some(list),
                _ => None,
            })
            .unwrap_or_default()
            .into_iter()
            .filter_map(|mut child| {
                let key = child.get("key")?.as_str()?.to_string();
                let schema = child.get_mut("schema").map(Value::take)?;
                Some((key, JoiSchema::from(schema)))
            })
            .collect();

        let items = detach(&mut node, "items")
            .and_then(|items| match items {
                Value::Array(list) => list.into_iter().next(),
                _ => None,
            })
            .map(|item| Box::new(JoiSchema::from(item)));

        Self {
            node,
            children,
            items,
        }
    }
}

fn detach(node: &mut Value, key: &str) -> Option<Value> {
    node.get_mut("_inner")
        .and_then(Value::as_object_mut)
        .and_then(|inner| inner.shift_remove(key))
}

impl From<JoiSchema> for Value {
    fn from(schema: JoiSchema) -> Self {
        let JoiSchema {
            mut node,
            children,
            items,
        } = schema;

        let mut inner = serde_json::Map::new();
        if !children.is_empty() {
            let list = children
                .into_iter()
                .map(|(key, child)| serde_json::json!({ "key": key, "schema": Value::from(child) }))
                .collect();
            inner.insert("children".into(), Value::Array(list));
        }
        if let Some(item) = items {
            inner.insert("items".into(), Value::Array(vec![Value::from(*item)]));
        }

        if let Value::Object(map) = &mut node {
            match map.get_mut("_inner") {
                Some(Value::Object(existing)) => {
                    for (k, v) in inner {
                        existing.insert(k, v);
                    }
                }
                _ if !inner.is_empty() => {
                    map.insert("_inner".into(), Value::Object(inner));
                }
                _ => {}
            }
        }
        node
    }
}

impl SchemaNode for JoiSchema {
    fn kind(&self) -> Kind {
        self.node
            .get("_type")
            .and_then(Value::as_str)
            .map(Kind::parse)
            .unwrap_or_default()
    }

    fn required(&self) -> bool {
        self.node
            .pointer("/_flags/presence")
            .and_then(Value::as_str)
            == Some("required")
    }

    fn allowed_values(&self) -> &[Value] {
        self.node
            .pointer("/_valids/_set")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn annotation_arg(&self, name: &str, param: &str) -> Option<&Value> {
        let from_tests = self
            .tests()
            .iter()
            .find(|test| test.get("name").and_then(Value::as_str) == Some(name))
            .and_then(|test| test.get("arg"))
            .and_then(|arg| arg.get(param));
        if from_tests.is_some() || param != "default" {
            return from_tests;
        }

        // The library's own metadata slots.
        match name {
            "description" => self.node.get("_description"),
            "example" => self.node.pointer("/_examples/0"),
            _ => None,
        }
    }

    fn fields(&self) -> Vec<(&str, &Self)> {
        self.children
            .iter()
            .map(|(key, child)| (key.as_str(), child))
            .collect()
    }

    fn item_schema(&self) -> Option<&Self> {
        self.items.as_deref()
    }
}
