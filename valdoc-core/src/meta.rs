use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::schema::JoiSchema;

// ── Route descriptors ───────────────────────────────────────────────────────

/// One route of the host application, as handed over by its route table.
///
/// `S` is the schema representation; routes loaded from files use
/// [`JoiSchema`], routes declared in Rust usually use
/// [`Schema`](crate::schema::Schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize",
    deserialize = "S: Deserialize<'de>"
))]
pub struct RouteDescriptor<S = JoiSchema> {
    pub path: String,
    pub method: MethodSpec,
    #[serde(default)]
    pub handler: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub validate: Validate<S>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseContract<S>>,
}

/// Declared HTTP method(s) of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodSpec {
    /// A single method, or `"*"` for a catch-all.
    One(String),
    Many(Vec<String>),
}

impl MethodSpec {
    pub const WILDCARD: &'static str = "*";

    /// Whether this is the catch-all method.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, MethodSpec::One(m) if m.trim() == Self::WILDCARD)
    }
}

impl From<&str> for MethodSpec {
    fn from(method: &str) -> Self {
        MethodSpec::One(method.to_string())
    }
}

impl From<Vec<&str>> for MethodSpec {
    fn from(methods: Vec<&str>) -> Self {
        MethodSpec::Many(methods.into_iter().map(str::to_string).collect())
    }
}

/// Validation contracts of a route's request, one schema per location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize",
    deserialize = "S: Deserialize<'de>"
))]
pub struct Validate<S = JoiSchema> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<S>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<S>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<S>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<S>,
}

impl<S> Default for Validate<S> {
    fn default() -> Self {
        Self {
            query: None,
            headers: None,
            payload: None,
            params: None,
        }
    }
}

/// Response contract of a route.
///
/// `schema` documents the default `200` response; `status` adds per-code
/// schemas (`201: {...}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize",
    deserialize = "S: Deserialize<'de>"
))]
pub struct ResponseContract<S = JoiSchema> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<S>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub status: IndexMap<u16, S>,
}

impl<S> Default for ResponseContract<S> {
    fn default() -> Self {
        Self {
            schema: None,
            status: IndexMap::new(),
        }
    }
}

impl<S> RouteDescriptor<S> {
    pub fn new(method: impl Into<MethodSpec>, path: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.into(),
            handler: String::new(),
            description: None,
            validate: Validate::default(),
            response: None,
        }
    }

    pub fn with_handler(mut self, handler: &str) -> Self {
        self.handler = handler.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_query(mut self, schema: S) -> Self {
        self.validate.query = Some(schema);
        self
    }

    pub fn with_params(mut self, schema: S) -> Self {
        self.validate.params = Some(schema);
        self
    }

    pub fn with_headers(mut self, schema: S) -> Self {
        self.validate.headers = Some(schema);
        self
    }

    pub fn with_payload(mut self, schema: S) -> Self {
        self.validate.payload = Some(schema);
        self
    }

    /// Declare the schema of the default `200` response.
    pub fn with_response(mut self, schema: S) -> Self {
        self.response.get_or_insert_with(ResponseContract::default).schema = Some(schema);
        self
    }

    /// Declare the schema of a specific response status.
    pub fn with_status(mut self, status: u16, schema: S) -> Self {
        self.response
            .get_or_insert_with(ResponseContract::default)
            .status
            .insert(status, schema);
        self
    }
}

// ── Route table ─────────────────────────────────────────────────────────────

/// An ordered list of route descriptors read from a file.
///
/// Both a bare list and a document with a top-level `routes:` key are accepted.
/// Response status codes are map keys: write them unquoted in YAML.
#[derive(Debug, Clone)]
pub struct RouteTable<S = JoiSchema> {
    pub routes: Vec<RouteDescriptor<S>>,
}

impl<S> RouteTable<S>
where
    S: for<'de> Deserialize<'de>,
{
    /// Read a route table from disk. `.json` files are parsed as JSON,
    /// everything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let table = if is_json(path) {
            Self::parse_json(&content).map_err(|e| LoadError::json(path, e))?
        } else {
            Self::parse_yaml(&content).map_err(|e| LoadError::yaml(path, e))?
        };
        tracing::debug!(path = %path.display(), routes = table.routes.len(), "loaded route table");
        Ok(table)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, LoadError> {
        Self::parse_yaml(content).map_err(|e| LoadError::yaml(Path::new(LoadError::INLINE), e))
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Self::parse_json(content).map_err(|e| LoadError::json(Path::new(LoadError::INLINE), e))
    }

    fn parse_json(content: &str) -> Result<Self, serde_json::Error> {
        let mut doc: serde_json::Value = serde_json::from_str(content)?;
        let wrapped = doc.get_mut("routes").map(serde_json::Value::take);
        let routes = serde_json::from_value(wrapped.unwrap_or(doc))?;
        Ok(Self { routes })
    }

    fn parse_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut doc: serde_yaml::Value = serde_yaml::from_str(content)?;
        let wrapped = doc
            .get_mut("routes")
            .map(|routes| std::mem::replace(routes, serde_yaml::Value::Null));
        let routes = serde_yaml::from_value(wrapped.unwrap_or(doc))?;
        Ok(Self { routes })
    }
}

impl<S> RouteTable<S> {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
