use serde_json::json;
use valdoc_core::{AppMetadata, DocConfig, JoiSchema, RouteTable};
use valdoc_openapi::assemble;

// ── Route tables built from validation-library dumps ───────────────────────

const ROUTES_YAML: &str = r#"
routes:
  - path: /api/v1/users
    method: GET
    handler: listUsers
    validate:
      query:
        _type: object
        _inner:
          children:
            - key: page
              schema:
                _type: number
                _flags: { presence: required }
            - key: sort
              schema:
                _type: string
                _valids: { _set: [asc, desc] }
  - path: /api/v1/users/{id}
    method: [GET, DELETE]
    handler: userById
    validate:
      params:
        _type: object
        _inner:
          children:
            - key: id
              schema: { _type: string }
  - path: /widgets/create
    method: POST
    description: Create a widget
    validate:
      payload:
        _type: object
        _inner:
          children:
            - key: name
              schema:
                _type: string
                _tests:
                  - name: example
                    arg: { default: gizmo }
            - key: parts
              schema:
                _type: array
                _inner:
                  items:
                    - _type: string
    response:
      status:
        201:
          _type: object
          _inner:
            children:
              - key: id
                schema: { _type: number }
  - path: /internal/{rest}
    method: "*"
"#;

fn document() -> serde_json::Value {
    let table: RouteTable<JoiSchema> = RouteTable::from_yaml_str(ROUTES_YAML).unwrap();
    assemble(
        &table.routes,
        &AppMetadata::new("Widgets", "2.1.0"),
        &DocConfig::default(),
    )
}

#[test]
fn table_loads_every_route() {
    let table: RouteTable<JoiSchema> = RouteTable::from_yaml_str(ROUTES_YAML).unwrap();
    assert_eq!(table.len(), 4);
    assert!(table.routes[3].method.is_wildcard());
}

#[test]
fn wildcard_route_is_not_documented() {
    let doc = document();
    let paths = doc["paths"].as_object().unwrap();
    assert_eq!(
        paths.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["/api/v1/users", "/api/v1/users/{id}", "/widgets/create"]
    );
}

#[test]
fn query_parameters_from_dump() {
    let doc = document();
    let params = doc["paths"]["/api/v1/users"]["get"]["parameters"].as_array().unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(
        params[0],
        json!({
            "description": "Users page",
            "required": true,
            "in": "query",
            "name": "page",
            "type": "number"
        })
    );
    assert_eq!(params[1]["required"], false);
    assert_eq!(params[1]["name"], "sort");
}

#[test]
fn handler_name_becomes_description() {
    let doc = document();
    assert_eq!(doc["paths"]["/api/v1/users"]["get"]["description"], "List users");
}

#[test]
fn method_list_yields_one_operation_each() {
    let doc = document();
    let item = doc["paths"]["/api/v1/users/{id}"].as_object().unwrap();
    assert_eq!(item.keys().map(String::as_str).collect::<Vec<_>>(), vec!["get", "delete"]);
    assert_eq!(item["delete"]["parameters"][0]["in"], "path");
    assert_eq!(item["delete"]["parameters"][0]["required"], true);
}

#[test]
fn payload_from_dump_becomes_body() {
    let doc = document();
    let op = &doc["paths"]["/widgets/create"]["post"];
    assert_eq!(op["tags"], json!(["widgets"]));
    assert_eq!(op["description"], "Create a widget");

    let body = &op["parameters"][0];
    assert_eq!(body["in"], "body");
    assert_eq!(body["schema"]["properties"]["name"]["type"], "string");
    assert_eq!(body["schema"]["properties"]["parts"]["items"]["type"], "string");
}

#[test]
fn status_response_from_dump() {
    let doc = document();
    let responses = doc["paths"]["/widgets/create"]["post"]["responses"].as_object().unwrap();
    assert_eq!(responses.keys().map(String::as_str).collect::<Vec<_>>(), vec!["201"]);
    assert_eq!(
        responses["201"]["examples"],
        json!({ "application/json": { "id": "some-number" } })
    );
}

#[test]
fn tags_from_table() {
    let doc = document();
    assert_eq!(
        doc["tags"],
        json!([
            { "name": "users", "description": "Users endpoints" },
            { "name": "widgets", "description": "Widgets endpoints" }
        ])
    );
}
