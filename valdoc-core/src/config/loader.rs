use std::path::{Path, PathBuf};

use super::{ConfigError, DocConfig};

/// Load and parse a YAML file. A missing file reads as an empty mapping.
pub(crate) fn read_yaml_file(path: &Path) -> Result<serde_yaml::Value, ConfigError> {
    if !path.exists() {
        return Ok(empty());
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Load(e.to_string()))?;
    parse_yaml(&content)
}

/// Parse a YAML string. An empty document reads as an empty mapping.
pub(crate) fn parse_yaml(content: &str) -> Result<serde_yaml::Value, ConfigError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    Ok(match yaml {
        serde_yaml::Value::Null => empty(),
        other => other,
    })
}

/// `valdoc.yaml` -> `valdoc-{profile}.yaml`, in the same directory.
pub(crate) fn profile_path(base: &Path, profile: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "valdoc".to_string());
    let ext = base
        .extension()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "yaml".to_string());
    base.with_file_name(format!("{stem}-{profile}.{ext}"))
}

/// Merge `top` into `base`, key by key. Nested mappings merge recursively;
/// any other value replaces what was there.
pub(crate) fn overlay(base: &mut serde_yaml::Value, top: serde_yaml::Value) {
    match (base, top) {
        (serde_yaml::Value::Mapping(base_map), serde_yaml::Value::Mapping(top_map)) => {
            for (k, v) in top_map {
                match base_map.get_mut(&k) {
                    Some(existing) => overlay(existing, v),
                    None => {
                        base_map.insert(k, v);
                    }
                }
            }
        }
        (slot, top) => *slot = top,
    }
}

pub(crate) fn into_config(doc: serde_yaml::Value) -> Result<DocConfig, ConfigError> {
    serde_yaml::from_value(doc).map_err(|e| ConfigError::Load(e.to_string()))
}

fn empty() -> serde_yaml::Value {
    serde_yaml::Value::Mapping(serde_yaml::Mapping::new())
}
