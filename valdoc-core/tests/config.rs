use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use valdoc_core::DocConfig;

struct EnvGuard {
    keys: Vec<&'static str>,
}

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        EnvGuard {
            keys: vars.iter().map(|(key, _)| *key).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            std::env::remove_var(key);
        }
    }
}

// ── Defaults ────────────────────────────────────────────────────────

#[test]
fn defaults() {
    let config = DocConfig::default();
    assert_eq!(config.host, "petstore.swagger.io");
    assert_eq!(config.base_path, "/");
    assert_eq!(config.schemes, vec!["http"]);
    assert_eq!(config.consumes, vec!["application/json"]);
    assert_eq!(config.produces, vec!["application/json"]);
    assert_eq!(config.terms_of_service, "http://swagger.io/terms/");
    assert_eq!(config.output, PathBuf::from("./swagger.json"));
    assert_eq!(config.profile(), "dev");
}

#[test]
fn builders_override_fields() {
    let config = DocConfig::default()
        .with_host("api.example.com")
        .with_base_path("/v2")
        .with_produces(&["application/xml"])
        .with_output("docs/openapi.json");
    assert_eq!(config.host, "api.example.com");
    assert_eq!(config.base_path, "/v2");
    assert_eq!(config.produces, vec!["application/xml"]);
    assert_eq!(config.output, PathBuf::from("docs/openapi.json"));
}

// ── YAML ────────────────────────────────────────────────────────────

#[test]
fn from_yaml_partial_keeps_defaults() {
    let config = DocConfig::from_yaml_str("host: api.example.com\n", "test").unwrap();
    assert_eq!(config.host, "api.example.com");
    assert_eq!(config.base_path, "/");
    assert_eq!(config.profile(), "test");
}

#[test]
fn from_yaml_lists() {
    let yaml = r#"
schemes: [http, https]
produces:
  - application/json
  - text/plain
"#;
    let config = DocConfig::from_yaml_str(yaml, "test").unwrap();
    assert_eq!(config.schemes, vec!["http", "https"]);
    assert_eq!(config.produces, vec!["application/json", "text/plain"]);
}

#[test]
fn from_yaml_empty_document() {
    let config = DocConfig::from_yaml_str("", "test").unwrap();
    assert_eq!(config.host, DocConfig::default().host);
}

#[test]
fn from_yaml_wrong_type_is_error() {
    assert!(DocConfig::from_yaml_str("schemes: 42\n", "test").is_err());
}

#[test]
fn from_yaml_invalid_syntax_is_error() {
    let err = DocConfig::from_yaml_str("host: [unclosed\n", "test").unwrap_err();
    assert!(err.to_string().starts_with("Config load error"));
}

// ── Files and profiles ──────────────────────────────────────────────

#[test]
#[serial]
fn load_from_missing_files_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = DocConfig::load_from(&tmp.path().join("valdoc.yaml"), "dev").unwrap();
    assert_eq!(config.host, "petstore.swagger.io");
    assert_eq!(config.profile(), "dev");
}

#[test]
#[serial]
fn load_from_profile_overrides_base() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("valdoc.yaml");
    fs::write(&base, "host: base.example.com\nbase_path: /api\n").unwrap();
    fs::write(tmp.path().join("valdoc-prod.yaml"), "host: prod.example.com\n").unwrap();

    let config = DocConfig::load_from(&base, "prod").unwrap();
    assert_eq!(config.host, "prod.example.com");
    assert_eq!(config.base_path, "/api");
    assert_eq!(config.profile(), "prod");
}

#[test]
#[serial]
fn load_from_ignores_other_profiles() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("valdoc.yaml");
    fs::write(&base, "host: base.example.com\n").unwrap();
    fs::write(tmp.path().join("valdoc-prod.yaml"), "host: prod.example.com\n").unwrap();

    let config = DocConfig::load_from(&base, "dev").unwrap();
    assert_eq!(config.host, "base.example.com");
}

#[test]
#[serial]
fn profile_env_var_wins_over_argument() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("valdoc.yaml");
    fs::write(tmp.path().join("valdoc-staging.yaml"), "host: staging.example.com\n").unwrap();

    let _env = EnvGuard::set(&[("VALDOC_PROFILE", "staging")]);
    let config = DocConfig::load_from(&base, "dev").unwrap();
    assert_eq!(config.profile(), "staging");
    assert_eq!(config.host, "staging.example.com");
}

#[test]
#[serial]
fn env_overlay_wins_over_files() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("valdoc.yaml");
    fs::write(&base, "host: file.example.com\nschemes: [http]\n").unwrap();

    let _env = EnvGuard::set(&[
        ("VALDOC_HOST", "env.example.com"),
        ("VALDOC_SCHEMES", "https, wss,"),
        ("VALDOC_OUTPUT", "out/api.json"),
    ]);
    let config = DocConfig::load_from(&base, "dev").unwrap();
    assert_eq!(config.host, "env.example.com");
    assert_eq!(config.schemes, vec!["https", "wss"]);
    assert_eq!(config.output, PathBuf::from("out/api.json"));
}

#[test]
#[serial]
fn load_from_invalid_file_is_error() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("valdoc.yaml");
    fs::write(&base, "host: [unclosed\n").unwrap();
    assert!(DocConfig::load_from(&base, "dev").is_err());
}
