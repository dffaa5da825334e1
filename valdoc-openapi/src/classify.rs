//! Route grouping and method normalization.

use std::sync::OnceLock;

use regex::Regex;
use valdoc_core::meta::{MethodSpec, RouteDescriptor};

use crate::naming;

/// Tag used when a path yields no usable segment.
pub const DEFAULT_TAG: &str = "default";

static VERSIONED_API: OnceLock<Regex> = OnceLock::new();
static PARENT_SEGMENT: OnceLock<Regex> = OnceLock::new();

fn versioned_api() -> &'static Regex {
    VERSIONED_API.get_or_init(|| Regex::new(r"/api/v\d/([^/]+)").expect("valid pattern"))
}

fn parent_segment() -> &'static Regex {
    PARENT_SEGMENT.get_or_init(|| Regex::new(r"([^/]+)/[^/]+/?$").expect("valid pattern"))
}

/// Derive the documentation group of a route path.
///
/// - `/api/v1/users/{id}` -> `users` (segment after a versioned API prefix)
/// - `/widgets/create` -> `widgets` (segment before the last one)
/// - `/ping` -> `default`
///
/// The tag also seeds synthesized field descriptions, so changing these rules
/// changes generated text.
pub fn group_tag(path: &str) -> String {
    versioned_api()
        .captures(path)
        .or_else(|| parent_segment().captures(path))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|tag| !tag.is_empty())
        .unwrap_or_else(|| DEFAULT_TAG.to_string())
}

/// Documented methods of a route: lower-cased, de-duplicated, in declaration
/// order. Catch-all (`*`) entries are not documented.
pub fn methods_of(method: &MethodSpec) -> Vec<String> {
    let declared: Vec<&str> = match method {
        MethodSpec::One(m) => vec![m.as_str()],
        MethodSpec::Many(list) => list.iter().map(String::as_str).collect(),
    };

    let mut methods: Vec<String> = Vec::new();
    for m in declared {
        let m = m.trim();
        if m.is_empty() || m == MethodSpec::WILDCARD {
            continue;
        }
        let m = m.to_lowercase();
        if !methods.contains(&m) {
            methods.push(m);
        }
    }
    methods
}

/// Operation description: the route's own description, else a sentence made
/// from the handler name (`UserController.find` -> `User controller find`).
pub fn operation_description<S>(route: &RouteDescriptor<S>) -> String {
    match &route.description {
        Some(description) => description.clone(),
        None => naming::sentence(&route.handler),
    }
}

/// Description of a group tag in the document's `tags` list.
pub fn tag_description(tag: &str) -> String {
    format!("{} endpoints", naming::upper_first(tag))
}
