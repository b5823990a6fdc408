use mnoag_core::ParseError;
use mnoag_core::parse;
use mnoag_core::parse::response::ResponseOrRef;

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const BOOKS: &str = include_str!("fixtures/books.yaml");

#[test]
fn parse_petstore_yaml() {
    let spec = parse::from_yaml(PETSTORE).expect("should parse petstore");
    assert_eq!(spec.openapi, "3.0.3");
    assert_eq!(spec.info.title, "Petstore");
    assert_eq!(spec.paths.len(), 6);
    assert_eq!(spec.tags.len(), 3);

    let components = spec.components.as_ref().expect("should have components");
    assert_eq!(components.schemas.len(), 4);

    let find = spec.paths["/pet/findByStatus"]
        .get
        .as_ref()
        .expect("should have GET");
    match &find.responses["200"] {
        ResponseOrRef::Response(r) => {
            assert!(r.content.contains_key("application/json"));
            assert!(r.content.contains_key("application/xml"));
        }
        _ => panic!("expected inline response"),
    }
}

#[test]
fn parse_security_schemes() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let schemes = &spec.components.as_ref().unwrap().security_schemes;

    let oauth = &schemes["petstore_auth"];
    let (flow, implicit) = oauth.first_flow().expect("should have a flow");
    assert_eq!(flow, "implicit");
    assert_eq!(implicit.scopes.len(), 2);
    assert!(!oauth.is_http("bearer"));

    let api_key = &schemes["api_key"];
    assert_eq!(api_key.location.as_ref().map(|l| l.as_str()), Some("header"));
    assert!(api_key.first_flow().is_none());
}

#[test]
fn parse_bearer_and_server_variables() {
    let yaml = r#"
openapi: 3.1.0
info:
  title: Test
  version: "1"
servers:
  - url: https://{region}.example.com/{base}
    variables:
      region:
        default: eu
        enum: [eu, us]
      base:
        default: v2
paths: {}
components:
  securitySchemes:
    token:
      type: http
      scheme: Bearer
      bearerFormat: JWT
"#;
    let spec = parse::from_yaml(yaml).unwrap();
    assert_eq!(spec.servers[0].resolved_url(), "https://eu.example.com/v2");
    let token = &spec.components.as_ref().unwrap().security_schemes["token"];
    assert!(token.is_http("bearer"));
    assert!(!token.is_http("basic"));
}

#[test]
fn load_detects_json() {
    let json = r#"{"openapi": "3.0.0", "info": {"title": "Json", "version": "1"}, "paths": {}}"#;
    let spec = parse::load(json).unwrap();
    assert_eq!(spec.info.title, "Json");

    let spec = parse::load(BOOKS).unwrap();
    assert_eq!(spec.info.title, "Library");
}

#[test]
fn parse_invalid_version() {
    let yaml = r#"
openapi: "2.0.0"
info:
  title: Test
  version: "1"
paths: {}
"#;
    let err = parse::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedVersion(v) if v == "2.0.0"));
}
