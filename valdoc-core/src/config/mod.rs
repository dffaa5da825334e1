mod loader;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O or YAML parsing error occurred while loading config files.
    #[error("Config load error: {0}")]
    Load(String),
}

/// Settings for the generated document envelope and output location.
///
/// Resolution order (lowest to highest priority):
/// 1. built-in defaults
/// 2. `valdoc.yaml` (base)
/// 3. `valdoc-{profile}.yaml` (profile override)
/// 4. `.env` / `.env.{profile}` files (loaded into the process environment)
/// 5. environment variables: `VALDOC_HOST`, `VALDOC_BASE_PATH`,
///    `VALDOC_SCHEMES` (comma separated), `VALDOC_OUTPUT`
///
/// `.env` files never overwrite already-set environment variables.
///
/// Profile is determined by: `VALDOC_PROFILE` env var > argument > default `"dev"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocConfig {
    pub host: String,
    pub base_path: String,
    pub schemes: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub terms_of_service: String,
    /// Where `valdoc generate` writes the document.
    pub output: PathBuf,
    #[serde(skip)]
    profile: String,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            host: "petstore.swagger.io".to_string(),
            base_path: "/".to_string(),
            schemes: vec!["http".to_string()],
            consumes: vec!["application/json".to_string()],
            produces: vec!["application/json".to_string()],
            terms_of_service: "http://swagger.io/terms/".to_string(),
            output: PathBuf::from("./swagger.json"),
            profile: DocConfig::DEFAULT_PROFILE.to_string(),
        }
    }
}

impl DocConfig {
    pub const DEFAULT_PROFILE: &'static str = "dev";
    pub const BASE_FILE: &'static str = "valdoc.yaml";

    /// Load configuration for the given profile from the current working
    /// directory, then overlay environment variables.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from(Path::new(Self::BASE_FILE), profile)
    }

    /// Load configuration from an explicit base file. The profile override is
    /// looked up next to it (`<stem>-{profile}.yaml`). Missing files are not
    /// an error.
    pub fn load_from(base: &Path, profile: &str) -> Result<Self, ConfigError> {
        let active_profile =
            std::env::var("VALDOC_PROFILE").unwrap_or_else(|_| profile.to_string());

        // 1. Base and profile files, profile keys win
        let mut doc = loader::read_yaml_file(base)?;
        let profile_path = loader::profile_path(base, &active_profile);
        loader::overlay(&mut doc, loader::read_yaml_file(&profile_path)?);

        let mut config = loader::into_config(doc)?;
        config.profile = active_profile;

        // 2. .env files (do NOT overwrite existing env vars)
        let _ = dotenvy::dotenv();
        let _ = dotenvy::from_filename(format!(".env.{}", config.profile));

        // 3. Environment overlay
        config.apply_env();

        tracing::debug!(profile = %config.profile, host = %config.host, "loaded configuration");
        Ok(config)
    }

    /// Create a config from a YAML string (useful for testing). Environment
    /// variables are not consulted.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let doc = loader::parse_yaml(yaml)?;
        let mut config = loader::into_config(doc)?;
        config.profile = profile.to_string();
        Ok(config)
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.to_string();
        self
    }

    pub fn with_produces(mut self, produces: &[&str]) -> Self {
        self.produces = produces.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("VALDOC_HOST") {
            self.host = host;
        }
        if let Ok(base_path) = std::env::var("VALDOC_BASE_PATH") {
            self.base_path = base_path;
        }
        if let Ok(schemes) = std::env::var("VALDOC_SCHEMES") {
            self.schemes = schemes
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Ok(output) = std::env::var("VALDOC_OUTPUT") {
            self.output = PathBuf::from(output);
        }
    }
}
