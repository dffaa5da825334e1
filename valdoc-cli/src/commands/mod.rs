//! Command implementations for the `valdoc` CLI.
//!
//! Each submodule corresponds to a top-level CLI command.

/// Document generation: `valdoc generate`.
///
/// Loads the route table, package metadata and configuration, assembles the
/// Swagger document and writes it as pretty-printed JSON.
pub mod generate;

/// Route listing: `valdoc routes`.
///
/// Prints one row per documented operation with its group tag and
/// description.
pub mod routes;
