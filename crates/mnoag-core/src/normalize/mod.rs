//! Idempotent clean-up of the parsed document before anything is lowered.

mod schema;

use std::collections::HashSet;
use std::hash::Hash;

use crate::config::GeneratorOptions;
use crate::context::Context;
use crate::parse::operation::{HttpMethod, PathItem};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::refs::RefIndex;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::{HeaderOrRef, Response, ResponseOrRef};
use crate::parse::schema::SchemaOrRef;
use crate::parse::spec::OpenApiSpec;
use crate::settings::GlobalSettings;

pub const SIMPLIFY_ONE_OF_ANY_OF: &str = "SIMPLIFY_ONE_OF_ANY_OF";
pub const REMOVE_ANYOF_ONEOF_AND_KEEP_PROPERTIES_ONLY: &str =
    "REMOVE_ANYOF_ONEOF_AND_KEEP_PROPERTIES_ONLY";
pub const SET_TAGS_FOR_ALL_OPERATIONS: &str = "SET_TAGS_FOR_ALL_OPERATIONS";

/// `openapiNormalizer` switches understood by the normalizer.
#[derive(Debug, Clone, Default)]
pub(crate) struct Switches {
    simplify_one_of_any_of: bool,
    keep_properties_only: bool,
    tag_for_all_operations: Option<String>,
}

impl Switches {
    fn read(ctx: &Context) -> Self {
        let mut switches = Self::default();
        for (key, value) in &ctx.options.openapi_normalizer {
            let enabled = value.eq_ignore_ascii_case("true");
            match key.as_str() {
                SIMPLIFY_ONE_OF_ANY_OF => switches.simplify_one_of_any_of = enabled,
                REMOVE_ANYOF_ONEOF_AND_KEEP_PROPERTIES_ONLY => {
                    switches.keep_properties_only = enabled
                }
                SET_TAGS_FOR_ALL_OPERATIONS if !value.is_empty() => {
                    switches.tag_for_all_operations = Some(value.clone())
                }
                GlobalSettings::DIVIDE_OPERATIONS_BY_CONTENT_TYPE => {}
                other => ctx.warn_once(&format!("normalizer:{other}"), || {
                    format!("ignoring unknown openapiNormalizer switch '{other}'")
                }),
            }
        }
        switches
    }
}

/// Sort the mapping tables whose order carries no meaning and drop
/// duplicate reserved words.
pub fn normalize_options(options: &mut GeneratorOptions) {
    options.schema_mapping.sort_keys();
    options.name_mapping.sort_keys();
    options.parameter_name_mapping.sort_keys();
    options.enum_name_mapping.sort_keys();
    options.model_name_mapping.sort_keys();
    options.inline_schema_name_mapping.sort_keys();
    options.inline_schema_option.sort_keys();
    options.openapi_normalizer.sort_keys();
    dedupe(&mut options.reserved_words_augment, |word| word.clone());
}

/// Normalize the document in place. Running it twice is a no-op.
pub fn normalize(spec: &mut OpenApiSpec, ctx: &Context) {
    let switches = Switches::read(ctx);

    sort_document(spec);
    dedupe(&mut spec.tags, |tag| tag.name.clone());
    dedupe(&mut spec.servers, |server| server.url.clone());
    if let Some(security) = &mut spec.security {
        dedupe_by_eq(security);
    }

    inline_component_refs(spec);
    let index = RefIndex::new(spec.components.as_ref());
    for item in spec.paths.values_mut().chain(spec.webhooks.values_mut()) {
        normalize_path_item(item, index, &switches);
    }

    if let Some(components) = &mut spec.components {
        for entry in components.schemas.values_mut() {
            schema::normalize_node(entry, &switches);
        }
        for param in components.parameters.values_mut() {
            if let ParameterOrRef::Parameter(param) = param {
                normalize_parameter_schemas(param, &switches);
            }
        }
        for body in components.request_bodies.values_mut() {
            if let RequestBodyOrRef::RequestBody(body) = body {
                for media in body.content.values_mut() {
                    normalize_optional(&mut media.schema, &switches);
                }
            }
        }
        for response in components.responses.values_mut() {
            if let ResponseOrRef::Response(response) = response {
                normalize_response_schemas(response, &switches);
            }
        }
        for header in components.headers.values_mut() {
            if let HeaderOrRef::Header(header) = header {
                normalize_optional(&mut header.schema, &switches);
            }
        }
    }

    spec.webhooks
        .retain(|_, item| item.operations().next().is_some());
    if spec.components.as_ref().is_some_and(|c| c.is_empty()) {
        spec.components = None;
    }
}

fn sort_document(spec: &mut OpenApiSpec) {
    spec.paths.sort_keys();
    spec.webhooks.sort_keys();
    if let Some(c) = &mut spec.components {
        c.schemas.sort_keys();
        c.responses.sort_keys();
        c.parameters.sort_keys();
        c.examples.sort_keys();
        c.request_bodies.sort_keys();
        c.headers.sort_keys();
        c.security_schemes.sort_keys();
        c.links.sort_keys();
        c.callbacks.sort_keys();
    }
}

/// Replace `$ref` responses and headers inside `components.responses` with
/// copies of their targets so later lookups see one level only.
fn inline_component_refs(spec: &mut OpenApiSpec) {
    let Some(snapshot) = spec.components.clone() else {
        return;
    };
    let index = RefIndex::new(Some(&snapshot));
    if let Some(components) = &mut spec.components {
        for response in components.responses.values_mut() {
            inline_response(response, index);
        }
    }
}

fn normalize_path_item(item: &mut PathItem, index: RefIndex<'_>, switches: &Switches) {
    let shared = std::mem::take(&mut item.parameters);
    for method in HttpMethod::ALL {
        let Some(op) = item.operation_mut(method) else {
            continue;
        };
        for param in &shared {
            let key = param_key(param, index);
            if !op.parameters.iter().any(|p| param_key(p, index) == key) {
                op.parameters.push(param.clone());
            }
        }
        dedupe(&mut op.parameters, |p| param_key(p, index));
        if let Some(security) = &mut op.security {
            dedupe_by_eq(security);
        }
        dedupe(&mut op.tags, String::clone);
        if let Some(tag) = &switches.tag_for_all_operations {
            op.tags = vec![tag.clone()];
        }

        for param in &mut op.parameters {
            if let ParameterOrRef::Parameter(param) = param {
                normalize_parameter_schemas(param, switches);
            }
        }
        if let Some(RequestBodyOrRef::RequestBody(body)) = &mut op.request_body {
            for media in body.content.values_mut() {
                normalize_optional(&mut media.schema, switches);
            }
        }
        for response in op.responses.values_mut() {
            inline_response(response, index);
            if let ResponseOrRef::Response(response) = response {
                normalize_response_schemas(response, switches);
            }
        }
    }
}

/// Identity of a parameter: `(name, in)` when it resolves, the ref path
/// otherwise.
fn param_key(param: &ParameterOrRef, index: RefIndex<'_>) -> (String, Option<ParameterLocation>) {
    match index.parameter(param) {
        Ok(p) => (p.name.clone(), Some(p.location)),
        Err(_) => match param {
            ParameterOrRef::Ref { ref_path } => (ref_path.clone(), None),
            ParameterOrRef::Parameter(p) => (p.name.clone(), Some(p.location)),
        },
    }
}

fn inline_response(response: &mut ResponseOrRef, index: RefIndex<'_>) {
    if let ResponseOrRef::Ref {
        ref_path,
        description,
    } = response
    {
        match index.response(ref_path) {
            Ok(target) => {
                let mut copy = target.clone();
                if let Some(description) = description.take() {
                    copy.description = description;
                }
                *response = ResponseOrRef::Response(copy);
            }
            Err(err) => {
                log::warn!("keeping unresolved response reference: {err}");
                return;
            }
        }
    }
    if let ResponseOrRef::Response(response) = response {
        for header in response.headers.values_mut() {
            if let HeaderOrRef::Ref { ref_path } = header {
                match index.header(ref_path) {
                    Ok(target) => *header = HeaderOrRef::Header(target.clone()),
                    Err(err) => log::warn!("keeping unresolved header reference: {err}"),
                }
            }
        }
    }
}

fn normalize_parameter_schemas(param: &mut Parameter, switches: &Switches) {
    normalize_optional(&mut param.schema, switches);
    for media in param.content.values_mut() {
        normalize_optional(&mut media.schema, switches);
    }
}

fn normalize_response_schemas(response: &mut Response, switches: &Switches) {
    for media in response.content.values_mut() {
        normalize_optional(&mut media.schema, switches);
    }
    for header in response.headers.values_mut() {
        if let HeaderOrRef::Header(header) = header {
            normalize_optional(&mut header.schema, switches);
        }
    }
}

fn normalize_optional(schema: &mut Option<SchemaOrRef>, switches: &Switches) {
    if let Some(schema) = schema {
        schema::normalize_node(schema, switches);
    }
}

/// Keep the first element of every key.
pub(crate) fn dedupe<T, K: Eq + Hash>(items: &mut Vec<T>, key: impl Fn(&T) -> K) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(key(item)));
}

fn dedupe_by_eq<T: PartialEq>(items: &mut Vec<T>) {
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        if !kept.contains(&item) {
            kept.push(item);
        }
    }
    *items = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const DOC: &str = r##"
openapi: 3.0.3
info: { title: Store, version: "1" }
servers:
  - url: http://a
  - url: http://a
tags:
  - name: pet
  - name: pet
paths:
  /z:
    get:
      responses:
        "200": { $ref: "#/components/responses/Ok" }
  /a/{id}:
    parameters:
      - { name: id, in: path, required: true, schema: { type: string } }
      - { name: trace, in: header, schema: { type: string } }
    get:
      tags: [pet, pet]
      parameters:
        - { name: id, in: path, required: true, schema: { type: integer } }
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                allOf:
                  - $ref: "#/components/schemas/Pet"
components:
  responses:
    Ok:
      description: fine
      headers:
        X-Rate: { $ref: "#/components/headers/Rate" }
  headers:
    Rate:
      schema: { type: integer }
  schemas:
    Pet:
      type: object
      properties:
        extra: {}
    Animal:
      type: object
"##;

    fn ctx(normalizer: &[(&str, &str)]) -> Context {
        let mut options = GeneratorOptions::default();
        for (key, value) in normalizer {
            options
                .openapi_normalizer
                .insert(key.to_string(), value.to_string());
        }
        Context::new(options).unwrap()
    }

    fn normalized(normalizer: &[(&str, &str)]) -> OpenApiSpec {
        let mut spec = parse::from_yaml(DOC).unwrap();
        normalize(&mut spec, &ctx(normalizer));
        spec
    }

    #[test]
    fn test_sorts_and_dedupes() {
        let spec = normalized(&[]);
        assert_eq!(spec.paths.keys().collect::<Vec<_>>(), vec!["/a/{id}", "/z"]);
        let components = spec.components.as_ref().unwrap();
        assert_eq!(
            components.schemas.keys().collect::<Vec<_>>(),
            vec!["Animal", "Pet"]
        );
        assert_eq!(spec.tags.len(), 1);
        assert_eq!(spec.servers.len(), 1);
        let op = spec.paths["/a/{id}"].get.as_ref().unwrap();
        assert_eq!(op.tags, vec!["pet".to_string()]);
    }

    #[test]
    fn test_path_parameters_merge_into_operations() {
        let spec = normalized(&[]);
        let item = &spec.paths["/a/{id}"];
        assert!(item.parameters.is_empty());
        let params = &item.get.as_ref().unwrap().parameters;
        assert_eq!(params.len(), 2);
        let ParameterOrRef::Parameter(id) = &params[0] else {
            panic!("expected inline parameter");
        };
        // the operation's own declaration wins
        assert_eq!(
            id.schema.as_ref().unwrap().as_schema().unwrap().primary_type(),
            Some(crate::parse::schema::SchemaType::Integer)
        );
    }

    #[test]
    fn test_response_refs_are_inlined() {
        let spec = normalized(&[]);
        let op = spec.paths["/z"].get.as_ref().unwrap();
        let ResponseOrRef::Response(response) = &op.responses["200"] else {
            panic!("expected inlined response");
        };
        assert_eq!(response.description, "fine");
        assert!(matches!(response.headers["X-Rate"], HeaderOrRef::Header(_)));
    }

    #[test]
    fn test_nested_all_of_collapses_to_ref() {
        let spec = normalized(&[]);
        let op = spec.paths["/a/{id}"].get.as_ref().unwrap();
        let ResponseOrRef::Response(response) = &op.responses["200"] else {
            panic!("expected response");
        };
        let schema = response.content["application/json"].schema.as_ref().unwrap();
        assert_eq!(schema.ref_path(), Some("#/components/schemas/Pet"));
    }

    #[test]
    fn test_empty_property_schema_becomes_object() {
        let spec = normalized(&[]);
        let pet = spec.components.as_ref().unwrap().schemas["Pet"]
            .as_schema()
            .unwrap();
        assert!(
            pet.properties["extra"]
                .as_schema()
                .unwrap()
                .is_type(crate::parse::schema::SchemaType::Object)
        );
    }

    #[test]
    fn test_set_tags_for_all_operations() {
        let spec = normalized(&[(SET_TAGS_FOR_ALL_OPERATIONS, "store")]);
        for item in spec.paths.values() {
            for (_, op) in item.operations() {
                assert_eq!(op.tags, vec!["store".to_string()]);
            }
        }
    }

    #[test]
    fn test_unknown_switch_is_ignored() {
        let spec = normalized(&[("SOMETHING_NEW", "true")]);
        assert_eq!(spec.paths.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let once = normalized(&[(SIMPLIFY_ONE_OF_ANY_OF, "true")]);
        let mut twice = once.clone();
        normalize(&mut twice, &ctx(&[(SIMPLIFY_ONE_OF_ANY_OF, "true")]));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_options_sorts_tables() {
        let mut options = GeneratorOptions::default();
        options.name_mapping.insert("b".into(), "x".into());
        options.name_mapping.insert("a".into(), "y".into());
        options.type_mapping.insert("z".into(), "Z".into());
        options.type_mapping.insert("y".into(), "Y".into());
        options.reserved_words_augment = vec!["Foo".into(), "Foo".into()];
        normalize_options(&mut options);
        assert_eq!(options.name_mapping.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(options.type_mapping.keys().collect::<Vec<_>>(), vec!["z", "y"]);
        assert_eq!(options.reserved_words_augment, vec!["Foo".to_string()]);
    }
}
