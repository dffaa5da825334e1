//! The schema-to-documentation compiler.
//!
//! [`Spec::build`] walks a [`SchemaNode`] tree post-order and produces a
//! [`Spec`] per node. Each `Spec` carries its resolved metadata plus the
//! OpenAPI 2.0 fragment for the [`Placement`] it was compiled for. Parent
//! fragments embed the fragments of their already-built children.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use valdoc_core::schema::{Kind, SchemaNode};

use crate::naming;

/// Where a field appears in an HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Query,
    Path,
    Header,
    Body,
    Response,
    /// No concrete parameter location: nested properties and standalone
    /// introspection.
    Nested,
}

impl Placement {
    /// Value of the `in` field of a parameter object, if this is one.
    pub fn as_parameter_location(&self) -> Option<&'static str> {
        match self {
            Placement::Query => Some("query"),
            Placement::Path => Some("path"),
            Placement::Header => Some("header"),
            Placement::Body => Some("body"),
            Placement::Response | Placement::Nested => None,
        }
    }
}

/// The context a node is compiled in. Not stored in the result.
#[derive(Debug, Clone, Copy)]
pub struct Location<'a> {
    pub group_tag: &'a str,
    pub field_key: Option<&'a str>,
    pub placement: Placement,
    /// Content types a `Response` placement documents examples for.
    pub content_types: &'a [String],
}

impl<'a> Location<'a> {
    pub fn new(group_tag: &'a str) -> Self {
        Self {
            group_tag,
            field_key: None,
            placement: Placement::Nested,
            content_types: &[],
        }
    }

    pub fn key(mut self, field_key: &'a str) -> Self {
        self.field_key = Some(field_key);
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn content_types(mut self, content_types: &'a [String]) -> Self {
        self.content_types = content_types;
        self
    }

    /// Context for a child node: same group tag, placement not propagated.
    fn child(&self, field_key: Option<&'a str>) -> Self {
        Self {
            group_tag: self.group_tag,
            field_key,
            placement: Placement::Nested,
            content_types: &[],
        }
    }
}

/// Raised when there is nothing to compile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    #[error("no schema to compile for {group_tag}{}", key_suffix(.field_key))]
    MissingSchema {
        group_tag: String,
        field_key: Option<String>,
    },
}

fn key_suffix(field_key: &Option<String>) -> String {
    field_key.as_deref().map(|k| format!(".{k}")).unwrap_or_default()
}

/// Children of a compiled node.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Object(IndexMap<String, Spec>),
    /// The item Spec, absent when the array declares no item schema.
    Array(Option<Box<Spec>>),
    Scalar,
}

/// A compiled documentation node.
#[derive(Debug, Clone, PartialEq)]
pub struct Spec {
    kind: Kind,
    required: bool,
    description: String,
    examples: Vec<Value>,
    shape: Shape,
    fragment: Value,
}

impl Spec {
    /// Compile an optional schema. Having no schema at all is the only
    /// failure the compiler reports.
    pub fn compile<S: SchemaNode>(schema: Option<&S>, at: &Location<'_>) -> Result<Self, SpecError> {
        match schema {
            Some(schema) => Ok(Self::build(schema, at)),
            None => Err(SpecError::MissingSchema {
                group_tag: at.group_tag.to_string(),
                field_key: at.field_key.map(str::to_string),
            }),
        }
    }

    /// Compile a schema node and, recursively, everything below it.
    pub fn build<S: SchemaNode>(schema: &S, at: &Location<'_>) -> Self {
        let kind = schema.kind();
        let required = schema.required() || at.placement == Placement::Path;
        let description = describe(schema, at);

        let shape = match kind {
            Kind::Object => Shape::Object(
                schema
                    .fields()
                    .into_iter()
                    .map(|(key, field)| (key.to_string(), Spec::build(field, &at.child(Some(key)))))
                    .collect(),
            ),
            Kind::Array => Shape::Array(
                schema
                    .item_schema()
                    .map(|item| Box::new(Spec::build(item, &at.child(None)))),
            ),
            _ => Shape::Scalar,
        };

        let examples = match &shape {
            Shape::Object(children) => {
                let example: Map<String, Value> = children
                    .iter()
                    .map(|(key, child)| (key.clone(), child.first_example().clone()))
                    .collect();
                vec![Value::Object(example)]
            }
            Shape::Array(item) => {
                let example: Vec<Value> = item.iter().map(|i| i.first_example().clone()).collect();
                vec![Value::Array(example)]
            }
            Shape::Scalar => scalar_examples(schema, &kind),
        };

        let mut spec = Spec {
            kind,
            required,
            description,
            examples,
            shape,
            fragment: Value::Null,
        };
        spec.fragment = spec.render(at);
        spec
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Never empty.
    pub fn examples(&self) -> &[Value] {
        &self.examples
    }

    pub fn first_example(&self) -> &Value {
        static NULL: Value = Value::Null;
        self.examples.first().unwrap_or(&NULL)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn children(&self) -> Option<&IndexMap<String, Spec>> {
        match &self.shape {
            Shape::Object(children) => Some(children),
            _ => None,
        }
    }

    pub fn item(&self) -> Option<&Spec> {
        match &self.shape {
            Shape::Array(item) => item.as_deref(),
            _ => None,
        }
    }

    /// The OpenAPI object for the placement this Spec was compiled for.
    pub fn fragment(&self) -> &Value {
        &self.fragment
    }

    pub fn into_fragment(self) -> Value {
        self.fragment
    }

    fn render(&self, at: &Location<'_>) -> Value {
        match at.placement {
            Placement::Response => {
                let examples: Map<String, Value> = at
                    .content_types
                    .iter()
                    .map(|ct| (ct.clone(), self.first_example().clone()))
                    .collect();
                json!({
                    "description": self.description,
                    "examples": examples,
                })
            }
            Placement::Body => {
                let mut schema = Map::new();
                schema.insert("type".into(), json!(self.kind.as_str()));
                self.insert_children(&mut schema);
                json!({
                    "description": self.description,
                    "required": self.required,
                    "in": "body",
                    "name": "body",
                    "schema": schema,
                })
            }
            Placement::Query | Placement::Path | Placement::Header => {
                let mut param = Map::new();
                param.insert("description".into(), json!(self.description));
                param.insert("required".into(), json!(self.required));
                param.insert("in".into(), json!(at.placement.as_parameter_location()));
                param.insert("name".into(), json!(at.field_key.unwrap_or_default()));
                param.insert("type".into(), json!(self.kind.as_str()));
                if let Shape::Array(item) = &self.shape {
                    let item_kind = item.as_ref().map_or("string", |i| i.kind.as_str());
                    param.insert("items".into(), json!({ "type": item_kind }));
                }
                Value::Object(param)
            }
            Placement::Nested => {
                let mut node = Map::new();
                node.insert("description".into(), json!(self.description));
                node.insert("required".into(), json!(self.required));
                node.insert("type".into(), json!(self.kind.as_str()));
                self.insert_children(&mut node);
                Value::Object(node)
            }
        }
    }

    /// `properties` for objects, `items` for arrays.
    fn insert_children(&self, node: &mut Map<String, Value>) {
        match &self.shape {
            Shape::Object(children) => {
                let properties: Map<String, Value> = children
                    .iter()
                    .map(|(key, child)| (key.clone(), child.fragment.clone()))
                    .collect();
                node.insert("properties".into(), Value::Object(properties));
            }
            Shape::Array(item) => {
                let items = match item {
                    Some(item) => item.fragment.clone(),
                    None => json!({ "type": "object" }),
                };
                node.insert("items".into(), items);
            }
            Shape::Scalar => {}
        }
    }
}

/// Explicit `description` annotation, else a sentence built from the group
/// tag and the field key.
fn describe<S: SchemaNode>(schema: &S, at: &Location<'_>) -> String {
    match schema.annotation("description") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => {
            let source = match at.field_key {
                Some(key) => format!("{} {}", at.group_tag, key),
                None => at.group_tag.to_string(),
            };
            naming::sentence(&source)
        }
        Some(other) => other.to_string(),
    }
}

/// `[example] ++ allowed values`, de-duplicated in order, without nulls and
/// empty strings; `"some-<kind>"` when nothing is left.
fn scalar_examples<S: SchemaNode>(schema: &S, kind: &Kind) -> Vec<Value> {
    let mut examples: Vec<Value> = Vec::new();
    let candidates = schema
        .annotation("example")
        .into_iter()
        .chain(schema.allowed_values());
    for candidate in candidates {
        let blank = candidate.is_null() || candidate.as_str() == Some("");
        if !blank && !examples.contains(candidate) {
            examples.push(candidate.clone());
        }
    }
    if examples.is_empty() {
        examples.push(Value::String(format!("some-{kind}")));
    }
    examples
}
