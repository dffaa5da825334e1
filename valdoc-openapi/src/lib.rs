//! Swagger 2.0 documentation compiled from validation schemas.
//!
//! ```
//! use valdoc_core::{AppMetadata, DocConfig, RouteDescriptor, Schema};
//! use valdoc_openapi::assemble;
//!
//! let routes = vec![RouteDescriptor::new("GET", "/api/v1/users")
//!     .with_query(Schema::object().key("page", Schema::number().required()))];
//!
//! let doc = assemble(&routes, &AppMetadata::new("users", "1.0.0"), &DocConfig::default());
//! assert_eq!(doc["paths"]["/api/v1/users"]["get"]["tags"][0], "users");
//! ```

mod builder;
pub mod classify;
pub mod naming;
pub mod spec;
pub mod tags;

pub use builder::{assemble, SWAGGER_VERSION};
pub use classify::{group_tag, methods_of, DEFAULT_TAG};
pub use spec::{Location, Placement, Shape, Spec, SpecError};
pub use tags::TagRegistry;
