use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Kind, SchemaNode};

/// A validation contract declared directly in Rust.
///
/// ```
/// use valdoc_core::schema::{Schema, SchemaNode};
///
/// let user = Schema::object()
///     .key("email", Schema::string().required().example("a@b.com"))
///     .key("roles", Schema::array().items(Schema::string().valid(["admin", "user"])))
///     .description("A registered user");
///
/// assert_eq!(user.fields().len(), 2);
/// ```
///
/// The same shape deserializes from a compact YAML/JSON form:
///
/// ```yaml
/// type: object
/// keys:
///   email: { type: string, required: true, example: a@b.com }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<Kind>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    valid: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    example: Option<Value>,
    /// Free-form annotations: name -> argument bag.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    meta: IndexMap<String, Map<String, Value>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    keys: IndexMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<Schema>>,
}

impl Schema {
    /// A node with no type tag at all. Reads as `object`.
    pub fn untyped() -> Self {
        Self::default()
    }

    pub fn of(kind: impl Into<Kind>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn object() -> Self {
        Self::of(Kind::Object)
    }

    pub fn array() -> Self {
        Self::of(Kind::Array)
    }

    pub fn string() -> Self {
        Self::of(Kind::String)
    }

    pub fn number() -> Self {
        Self::of(Kind::Number)
    }

    pub fn boolean() -> Self {
        Self::of(Kind::Boolean)
    }

    pub fn any() -> Self {
        Self::of(Kind::Any)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Append allowed literal values. Duplicates are dropped.
    pub fn valid<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for value in values {
            let value = value.into();
            if !self.valid.contains(&value) {
                self.valid.push(value);
            }
        }
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(Value::String(text.into()));
        self
    }

    pub fn example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    /// Attach an arbitrary named annotation with a single `default` argument.
    pub fn annotate(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut bag = Map::new();
        bag.insert("default".into(), value.into());
        self.meta.insert(name.into(), bag);
        self
    }

    /// Declare a nested field. Re-declaring a key replaces it in place.
    pub fn key(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.keys.insert(name.into(), schema);
        self
    }

    pub fn items(mut self, schema: Schema) -> Self {
        self.items = Some(Box::new(schema));
        self
    }
}

impl SchemaNode for Schema {
    fn kind(&self) -> Kind {
        self.kind.clone().unwrap_or_default()
    }

    fn required(&self) -> bool {
        self.required
    }

    fn allowed_values(&self) -> &[Value] {
        &self.valid
    }

    fn annotation_arg(&self, name: &str, param: &str) -> Option<&Value> {
        if let Some(bag) = self.meta.get(name) {
            return bag.get(param);
        }
        if param != "default" {
            return None;
        }
        match name {
            "description" => self.description.as_ref(),
            "example" => self.example.as_ref(),
            _ => None,
        }
    }

    fn fields(&self) -> Vec<(&str, &Self)> {
        self.keys
            .iter()
            .map(|(key, schema)| (key.as_str(), schema))
            .collect()
    }

    fn item_schema(&self) -> Option<&Self> {
        self.items.as_deref()
    }
}
