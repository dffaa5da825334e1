use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use valdoc_cli::commands::generate::{self, GenerateOptions};

struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    fn new(path: &Path) -> Self {
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(path).unwrap();
        CwdGuard { original }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

const ROUTES: &str = r#"
- path: /api/v1/users
  method: GET
  handler: listUsers
  validate:
    query:
      _type: object
      _inner:
        children:
          - key: page
            schema: { _type: number, _flags: { presence: required } }
- path: /ping
  method: "*"
"#;

const PACKAGE: &str = r#"{
    "name": "users-api",
    "version": "3.0.0",
    "description": "User directory",
    "author": "Sam",
    "license": "MIT"
}"#;

fn options(dir: &Path) -> GenerateOptions {
    GenerateOptions {
        routes: dir.join("routes.yaml"),
        package: Some(dir.join("package.json")),
        config: Some(dir.join("valdoc.yaml")),
        profile: "dev".to_string(),
        out: None,
    }
}

fn setup() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("routes.yaml"), ROUTES).unwrap();
    fs::write(tmp.path().join("package.json"), PACKAGE).unwrap();
    tmp
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ── generate ────────────────────────────────────────────────────────

#[test]
#[serial]
fn generate_writes_document_to_out() {
    let tmp = setup();
    let out = tmp.path().join("docs/nested/swagger.json");
    let opts = GenerateOptions {
        out: Some(out.clone()),
        ..options(tmp.path())
    };

    let written = generate::run(&opts).unwrap();
    assert!(written.is_absolute());
    assert!(out.exists());

    let doc = read_json(&out);
    assert_eq!(doc["swagger"], "2.0");
    assert_eq!(doc["info"]["title"], "users-api");
    assert_eq!(doc["info"]["version"], "3.0.0");
    assert_eq!(doc["info"]["contact"]["name"], "Sam");
    assert_eq!(doc["paths"]["/api/v1/users"]["get"]["tags"][0], "users");
    assert!(doc["paths"].get("/ping").is_none());
}

#[test]
#[serial]
fn generate_uses_config_envelope_and_output() {
    let tmp = setup();
    fs::write(
        tmp.path().join("valdoc.yaml"),
        "host: api.example.com\nbase_path: /v1\noutput: build/api.json\n",
    )
    .unwrap();
    fs::write(tmp.path().join("valdoc-prod.yaml"), "schemes: [https]\n").unwrap();

    let _cwd = CwdGuard::new(tmp.path());
    let opts = GenerateOptions {
        profile: "prod".to_string(),
        ..options(tmp.path())
    };
    generate::run(&opts).unwrap();

    let doc = read_json(&tmp.path().join("build/api.json"));
    assert_eq!(doc["host"], "api.example.com");
    assert_eq!(doc["basePath"], "/v1");
    assert_eq!(doc["schemes"], serde_json::json!(["https"]));
}

#[test]
#[serial]
fn generate_reads_package_json_from_cwd() {
    let tmp = setup();
    let _cwd = CwdGuard::new(tmp.path());
    let opts = GenerateOptions {
        package: None,
        out: Some(PathBuf::from("swagger.json")),
        ..options(tmp.path())
    };

    generate::run(&opts).unwrap();
    let doc = read_json(&tmp.path().join("swagger.json"));
    assert_eq!(doc["info"]["title"], "users-api");
}

#[test]
#[serial]
fn generate_without_package_leaves_info_empty() {
    let tmp = setup();
    fs::remove_file(tmp.path().join("package.json")).unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    let opts = GenerateOptions {
        package: None,
        out: Some(PathBuf::from("swagger.json")),
        ..options(tmp.path())
    };

    generate::run(&opts).unwrap();
    let doc = read_json(&tmp.path().join("swagger.json"));
    assert_eq!(doc["info"]["title"], "");
    assert_eq!(doc["info"]["termsOfService"], "http://swagger.io/terms/");
}

#[test]
#[serial]
fn generate_missing_routes_file_fails() {
    let tmp = setup();
    let opts = GenerateOptions {
        routes: tmp.path().join("missing.yaml"),
        out: Some(tmp.path().join("swagger.json")),
        ..options(tmp.path())
    };

    let err = generate::run(&opts).unwrap_err();
    assert!(format!("{err:#}").contains("missing.yaml"));
    assert!(!tmp.path().join("swagger.json").exists());
}

#[test]
#[serial]
fn generate_invalid_package_fails() {
    let tmp = setup();
    fs::write(tmp.path().join("package.json"), "{ broken").unwrap();
    let opts = GenerateOptions {
        out: Some(tmp.path().join("swagger.json")),
        ..options(tmp.path())
    };

    let err = generate::run(&opts).unwrap_err();
    assert!(err.to_string().contains("package metadata"));
}

#[test]
#[serial]
fn generate_is_deterministic() {
    let tmp = setup();
    let first = tmp.path().join("a.json");
    let second = tmp.path().join("b.json");

    generate::run(&GenerateOptions {
        out: Some(first.clone()),
        ..options(tmp.path())
    })
    .unwrap();
    generate::run(&GenerateOptions {
        out: Some(second.clone()),
        ..options(tmp.path())
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(first).unwrap(),
        fs::read_to_string(second).unwrap()
    );
}
