use serde_json::{json, Map, Value};
use valdoc_core::meta::RouteDescriptor;
use valdoc_core::schema::{Kind, SchemaNode};
use valdoc_core::{AppMetadata, DocConfig};

use crate::classify;
use crate::naming;
use crate::spec::{Location, Placement, Spec};
use crate::tags::TagRegistry;

/// Swagger version emitted in every document.
pub const SWAGGER_VERSION: &str = "2.0";

/// Header whose allowed values declare what an operation produces.
const CONTENT_TYPE_HEADER: &str = "content-type";

/// Build a Swagger 2.0 JSON document from route descriptors, package
/// metadata and the envelope configuration.
///
/// Catch-all (`*`) routes are skipped. Routes sharing a path are merged into
/// one path item; a method declared twice on the same path keeps the last
/// declaration.
pub fn assemble<S: SchemaNode>(
    routes: &[RouteDescriptor<S>],
    metadata: &AppMetadata,
    config: &DocConfig,
) -> Value {
    let mut paths: Map<String, Value> = Map::new();
    let mut tags = TagRegistry::new();

    for route in routes {
        let methods = classify::methods_of(&route.method);
        if methods.is_empty() {
            tracing::debug!(path = %route.path, "skipping route without documentable methods");
            continue;
        }

        let tag = classify::group_tag(&route.path);
        tags.register_group(&tag);

        for method in methods {
            let operation = build_operation(route, &tag, config);
            tracing::debug!(method = %method, path = %route.path, tag = %tag, "documented operation");

            let path_entry = paths
                .entry(route.path.clone())
                .or_insert_with(|| json!({}));

            if let Some(obj) = path_entry.as_object_mut() {
                obj.insert(method, operation);
            }
        }
    }

    tracing::info!(paths = paths.len(), tags = tags.len(), "assembled OpenAPI document");

    json!({
        "swagger": SWAGGER_VERSION,
        "info": build_info(metadata, config),
        "host": config.host,
        "basePath": config.base_path,
        "schemes": config.schemes,
        "consumes": config.consumes,
        "produces": config.produces,
        "paths": paths,
        "tags": tags.into_tags(),
    })
}

fn build_info(metadata: &AppMetadata, config: &DocConfig) -> Value {
    json!({
        "version": metadata.version,
        "title": metadata.name,
        "description": metadata.description,
        "termsOfService": config.terms_of_service,
        "contact": { "name": metadata.author.name() },
        "license": { "name": metadata.license },
    })
}

fn build_operation<S: SchemaNode>(route: &RouteDescriptor<S>, tag: &str, config: &DocConfig) -> Value {
    let produces = produced_content_types(route, config);

    let mut operation: Map<String, Value> = Map::new();
    operation.insert("tags".into(), json!([tag]));
    operation.insert("description".into(), json!(classify::operation_description(route)));
    operation.insert("produces".into(), json!(produces));

    let parameters = build_parameters(route, tag);
    if !parameters.is_empty() {
        operation.insert("parameters".into(), Value::Array(parameters));
    }

    operation.insert("responses".into(), build_responses(route, tag, &produces));
    Value::Object(operation)
}

/// Query, path and header fields become one parameter each; the payload
/// becomes a single `body` parameter.
fn build_parameters<S: SchemaNode>(route: &RouteDescriptor<S>, tag: &str) -> Vec<Value> {
    let validate = &route.validate;
    let mut parameters = Vec::new();

    for (root, placement) in [
        (validate.query.as_ref(), Placement::Query),
        (validate.params.as_ref(), Placement::Path),
        (validate.headers.as_ref(), Placement::Header),
    ] {
        let Some(root) = root else { continue };
        if root.kind() != Kind::Object {
            tracing::debug!(path = %route.path, ?placement, kind = %root.kind(), "ignoring non-object parameter schema");
            continue;
        }
        for (key, field) in root.fields() {
            let at = Location::new(tag).key(key).placement(placement);
            parameters.push(Spec::build(field, &at).into_fragment());
        }
    }

    if let Some(payload) = validate.payload.as_ref() {
        let at = Location::new(tag).placement(Placement::Body);
        parameters.push(Spec::build(payload, &at).into_fragment());
    }

    parameters
}

/// One response per declared success status, or a bare `200` when the route
/// declares none.
fn build_responses<S: SchemaNode>(route: &RouteDescriptor<S>, tag: &str, produces: &[String]) -> Value {
    let mut responses: Map<String, Value> = Map::new();
    let at = Location::new(tag)
        .placement(Placement::Response)
        .content_types(produces);

    if let Some(contract) = route.response.as_ref() {
        if let Some(schema) = contract.schema.as_ref() {
            responses.insert("200".into(), Spec::build(schema, &at).into_fragment());
        }
        for (status, schema) in &contract.status {
            if !(200..300).contains(status) {
                tracing::debug!(path = %route.path, status, "skipping non-success response status");
                continue;
            }
            responses.insert(status.to_string(), Spec::build(schema, &at).into_fragment());
        }
    }

    if responses.is_empty() {
        responses.insert(
            "200".into(),
            json!({
                "description": naming::sentence(tag),
                "schema": { "type": "object" },
            }),
        );
    }

    Value::Object(responses)
}

/// Allowed values of the route's `content-type` header, else the configured
/// global `produces`.
fn produced_content_types<S: SchemaNode>(route: &RouteDescriptor<S>, config: &DocConfig) -> Vec<String> {
    let declared: Vec<String> = route
        .validate
        .headers
        .as_ref()
        .and_then(|headers| {
            headers
                .fields()
                .into_iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(CONTENT_TYPE_HEADER))
                .map(|(_, field)| field)
        })
        .map(|field| {
            field
                .allowed_values()
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if declared.is_empty() {
        config.produces.clone()
    } else {
        declared
    }
}
