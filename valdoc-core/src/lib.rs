pub mod app;
pub mod config;
pub mod error;
pub mod meta;
pub mod schema;

pub use app::{AppMetadata, Author};
pub use config::{ConfigError, DocConfig};
pub use error::LoadError;
pub use meta::{MethodSpec, ResponseContract, RouteDescriptor, RouteTable, Validate};
pub use schema::{JoiSchema, Kind, Schema, SchemaNode};
