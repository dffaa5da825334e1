//! # valdoc-cli
//!
//! Command-line front end for generating Swagger 2.0 documents from a route
//! table.
//!
//! This crate provides the `valdoc` binary with the following commands:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `valdoc generate --routes <file>` | Assemble the document and write it to disk |
//! | `valdoc routes --routes <file>` | List the routes that would be documented |
//!
//! Configuration is read from `valdoc.yaml` and its profile overrides (see
//! [`valdoc_core::DocConfig`]).

pub mod commands;
pub mod logging;
