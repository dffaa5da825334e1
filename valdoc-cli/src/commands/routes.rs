use anyhow::Context;
use colored::Colorize;
use std::path::Path;
use valdoc_core::{JoiSchema, RouteDescriptor, RouteTable};
use valdoc_openapi::classify;

/// One documented operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRow {
    pub method: String,
    pub path: String,
    pub tag: String,
    pub description: String,
}

pub fn run(routes_path: &Path) -> anyhow::Result<()> {
    let table: RouteTable<JoiSchema> = RouteTable::from_path(routes_path)
        .with_context(|| format!("failed to load routes from {}", routes_path.display()))?;

    let rows = collect_rows(&table.routes);

    if rows.is_empty() {
        println!("{}", "No documented routes.".dimmed());
        return Ok(());
    }

    println!("{}", "Documented routes:".bold());
    println!();
    println!(
        "  {:<8} {:<35} {:<15} {}",
        "METHOD".dimmed(),
        "PATH".dimmed(),
        "TAG".dimmed(),
        "DESCRIPTION".dimmed()
    );
    println!("  {}", "-".repeat(80).dimmed());

    for row in &rows {
        let method_colored = match row.method.as_str() {
            "GET" => row.method.green(),
            "POST" => row.method.blue(),
            "PUT" => row.method.yellow(),
            "DELETE" => row.method.red(),
            "PATCH" => row.method.magenta(),
            _ => row.method.normal(),
        };
        println!(
            "  {:<8} {:<35} {:<15} {}",
            method_colored, row.path, row.tag, row.description,
        );
    }

    println!();
    println!("  {} operations total", rows.len());

    Ok(())
}

/// One row per documented method, in table order. Catch-all routes produce
/// no rows.
pub fn collect_rows<S>(routes: &[RouteDescriptor<S>]) -> Vec<RouteRow> {
    let mut rows = Vec::new();
    for route in routes {
        let tag = classify::group_tag(&route.path);
        let description = classify::operation_description(route);
        for method in classify::methods_of(&route.method) {
            rows.push(RouteRow {
                method: method.to_uppercase(),
                path: route.path.clone(),
                tag: tag.clone(),
                description: description.clone(),
            });
        }
    }
    rows
}
