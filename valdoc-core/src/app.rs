use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Package metadata of the documented application, as found in a
/// `package.json`-style manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: Author,
    pub license: String,
}

/// `author` is either a plain string or a `{ name, email, url }` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Person {
        #[serde(default)]
        name: String,
    },
}

impl Default for Author {
    fn default() -> Self {
        Author::Name(String::new())
    }
}

impl Author {
    pub fn name(&self) -> &str {
        match self {
            Author::Name(name) | Author::Person { name } => name,
        }
    }
}

impl AppMetadata {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_author(mut self, author: &str) -> Self {
        self.author = Author::Name(author.to_string());
        self
    }

    pub fn with_license(mut self, license: &str) -> Self {
        self.license = license.to_string();
        self
    }

    /// Read metadata from a `package.json`. Unknown keys are ignored and
    /// missing ones default to empty strings.
    pub fn from_package_json(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_json_str(&content).map_err(|e| match e {
            LoadError::Json { source, .. } => LoadError::json(path, source),
            other => other,
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        serde_json::from_str(content)
            .map_err(|e| LoadError::json(Path::new(LoadError::INLINE), e))
    }
}
