use anyhow::Context;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use valdoc_core::{AppMetadata, DocConfig, JoiSchema, RouteTable};

/// Manifest read when `--package` is not given.
const DEFAULT_PACKAGE: &str = "package.json";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub routes: PathBuf,
    pub package: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub profile: String,
    pub out: Option<PathBuf>,
}

/// Assemble the document and write it. Returns the absolute path written.
///
/// Without `--package`, `./package.json` is used when present; otherwise the
/// `info` block is left with empty strings.
pub fn run(options: &GenerateOptions) -> anyhow::Result<PathBuf> {
    let config = match &options.config {
        Some(base) => DocConfig::load_from(base, &options.profile),
        None => DocConfig::load(&options.profile),
    }
    .context("failed to load configuration")?;

    let table: RouteTable<JoiSchema> = RouteTable::from_path(&options.routes)
        .with_context(|| format!("failed to load routes from {}", options.routes.display()))?;

    let metadata = load_metadata(options.package.as_deref())?;

    let doc = valdoc_openapi::assemble(&table.routes, &metadata, &config);

    let out = options.out.clone().unwrap_or_else(|| config.output.clone());
    write_document(&out, &doc)?;

    let written = fs::canonicalize(&out).unwrap_or(out);
    tracing::info!(path = %written.display(), routes = table.len(), "wrote document");
    println!(
        "{} Swagger docs saved to {}",
        "✓".green(),
        written.display().to_string().cyan()
    );

    Ok(written)
}

fn load_metadata(package: Option<&Path>) -> anyhow::Result<AppMetadata> {
    let path = match package {
        Some(path) => path,
        None if Path::new(DEFAULT_PACKAGE).exists() => Path::new(DEFAULT_PACKAGE),
        None => {
            tracing::warn!("no package.json found, document info will be empty");
            return Ok(AppMetadata::default());
        }
    };
    AppMetadata::from_package_json(path)
        .with_context(|| format!("failed to load package metadata from {}", path.display()))
}

fn write_document(out: &Path, doc: &serde_json::Value) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut json = serde_json::to_string_pretty(doc)?;
    json.push('\n');
    fs::write(out, json).with_context(|| format!("failed to write {}", out.display()))?;
    Ok(())
}
