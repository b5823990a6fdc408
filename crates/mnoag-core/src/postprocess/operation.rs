use std::collections::{BTreeSet, HashSet};

use super::{ANNOTATIONS_OPERATION, refers_to_deprecated, take_annotations};
use crate::config::{MappedLocation, ParameterMapping};
use crate::context::Context;
use crate::defaults::{ExampleInput, ExampleRenderer};
use crate::dialect::{FLUX, HTTP_RESPONSE, MONO};
use crate::error::LowerError;
use crate::lower::annotations::{annotate_parameter, annotate_property};
use crate::lower::operation::DEFAULT_BODY_NAME;
use crate::naming::pluralize;
use crate::parse::media_type::{
    ANY_MEDIA_TYPE, APPLICATION_JSON, FORM_URLENCODED, MULTIPART_FORM_DATA,
};
use crate::tir::{Model, Operation, Parameter, ParameterFacets, Property, Response, Stage};

/// Body allowance, `*/*` handling, form/multipart reclassification and
/// implicit headers.
pub(super) fn normalize(ctx: &Context, op: &mut Operation) -> Result<(), LowerError> {
    op.advance(Stage::Raw, Stage::Normalized)?;
    op.facets.method_allows_body = matches!(
        op.http_method.as_str(),
        "PUT" | "POST" | "PATCH" | "OPTIONS" | "DELETE"
    );
    op.summary = stripped(op.summary.take());
    op.description = stripped(op.description.take());

    if op.facets.content_type.as_deref() == Some(ANY_MEDIA_TYPE) {
        op.facets.content_type = Some(APPLICATION_JSON.to_string());
    }
    op.consumes.retain(|m| m != ANY_MEDIA_TYPE);
    op.produces.retain(|m| m != ANY_MEDIA_TYPE);
    op.facets.only_default_consume_or_empty = only_default(&op.consumes);
    op.facets.only_default_produce_or_empty = only_default(&op.produces);

    match op.facets.content_type.as_deref() {
        Some(FORM_URLENCODED) => {
            for param in op.all_params.iter_mut().filter(|p| p.is_body_param) {
                param.is_body_param = false;
                param.is_form_param = true;
            }
        }
        Some(MULTIPART_FORM_DATA) => {
            for param in op.all_params.iter_mut().filter(|p| p.is_form_param) {
                param.is_form_param = false;
                param.is_body_param = true;
                param.is_part = true;
            }
        }
        _ => {}
    }

    let (implicit, kept): (Vec<Parameter>, Vec<Parameter>) =
        op.all_params.drain(..).partition(|p| {
            p.is_header_param && (ctx.options.implicit_headers || ctx.is_implicit_header(&p.base_name))
        });
    op.all_params = kept;
    op.implicit_headers_params = implicit;
    project(op);
    Ok(())
}

/// Replace parameters matched by a parameter mapping, then pluralize array
/// bodies.
pub(super) fn map_parameters(ctx: &Context, op: &mut Operation) -> Result<(), LowerError> {
    op.advance(Stage::Normalized, Stage::ParamsMapped)?;
    for mapping in &ctx.options.parameter_mappings {
        let before = op.all_params.len();
        op.all_params.retain(|p| !matches_mapping(mapping, p));
        if op.all_params.len() == before {
            continue;
        }
        if let Some(mapped_type) = &mapping.mapped_type {
            let param = mapped_parameter(ctx, mapping, mapped_type, &mut op.imports)?;
            op.all_params.push(param);
        }
    }

    if ctx.options.plural {
        for param in op.all_params.iter_mut().filter(|p| needs_plural(p)) {
            param.param_name = pluralize(&param.param_name);
        }
    }
    project(op);
    Ok(())
}

/// Drop response headers claimed by a response-body mapping and wrap the
/// return type in the mapped body type.
pub(super) fn map_response_body(ctx: &Context, op: &mut Operation) -> Result<(), LowerError> {
    op.advance(Stage::ParamsMapped, Stage::BodyMapped)?;
    op.facets.original_return_type = op.return_type.clone();
    for mapping in &ctx.options.response_body_mappings {
        let is_array = op.is_array;
        let Some(i) = op
            .response_headers
            .iter()
            .position(|h| mapping.does_match(&h.base_name, is_array))
        else {
            continue;
        };
        op.response_headers.remove(i);
        if let Some(body_type) = &mapping.mapped_body_type {
            wrap_return(ctx, op, body_type, mapping.is_list_wrapper);
            if mapping.is_validated
                && let Some(prop) = op.return_property.as_mut()
            {
                prop.facets.with_valid = true;
            }
        }
    }
    Ok(())
}

/// `HttpResponse` where required, then `Mono`, or `Flux` for arrays.
pub(super) fn wrap(ctx: &Context, op: &mut Operation) -> Result<(), LowerError> {
    op.advance(Stage::BodyMapped, Stage::Wrapped)?;
    let options = &ctx.options;
    let needs_http_response = options.generate_http_response_always
        || (options.generate_http_response_where_required
            && (op.responses.iter().any(Response::is_non_ok_success)
                || !op.response_headers.is_empty()));
    if needs_http_response {
        wrap_return(ctx, op, HTTP_RESPONSE, false);
    }
    if options.reactive {
        let returns_array = op.return_property.as_ref().is_some_and(|p| p.is_array);
        if options.flux_for_arrays && returns_array {
            wrap_return(ctx, op, FLUX, true);
            op.facets.is_return_flux = true;
        } else {
            wrap_return(ctx, op, MONO, false);
        }
    }
    Ok(())
}

/// Generic annotations, `@Valid`, date format patterns, deprecated model
/// references and extra operation annotations.
pub(super) fn annotate(
    ctx: &Context,
    op: &mut Operation,
    deprecated: &HashSet<String>,
) -> Result<(), LowerError> {
    op.advance(Stage::Wrapped, Stage::AnnotationsApplied)?;
    for param in op
        .all_params
        .iter_mut()
        .chain(op.implicit_headers_params.iter_mut())
    {
        annotate_parameter(ctx, param);
        param.facets.with_valid = ctx.options.bean_validation && !param.is_container && param.is_model;
        if (param.flags.is_date || param.flags.is_date_time)
            && let Some(pattern) = param.constraints.pattern.take()
        {
            param.format_pattern = Some(pattern);
        }
        if parameter_refers_to_deprecated(param, deprecated) {
            param.is_deprecated = true;
        }
    }
    if let Some(prop) = op.return_property.as_mut() {
        annotate_property(ctx, prop);
    }
    op.facets.annotations.operation = take_annotations(&mut op.vendor_extensions, ANNOTATIONS_OPERATION);
    op.facets.swagger = ctx.swagger;
    project(op);
    Ok(())
}

/// Parameter examples, and the return example unless disabled.
pub(super) fn freeze(
    ctx: &Context,
    op: &mut Operation,
    examples: &ExampleRenderer<'_>,
    models: &[Model],
) -> Result<(), LowerError> {
    op.advance(Stage::AnnotationsApplied, Stage::Frozen)?;
    for param in op
        .all_params
        .iter_mut()
        .chain(op.implicit_headers_params.iter_mut())
    {
        let groovy = examples.parameter_example(param, true);
        let example = examples.parameter_example(param, false);
        param.facets.groovy_example = Some(groovy);
        param.example = Some(example);
    }

    if !ctx.options.skip_operation_example
        && let Some(return_type) = op.facets.original_return_type.as_deref()
    {
        let (example, groovy) = match models.iter().find(|m| m.classname == return_type) {
            Some(model) => {
                let allowable: Vec<String> =
                    model.enum_vars.iter().map(|v| v.raw_value.clone()).collect();
                let input = ExampleInput {
                    default_value: model.default_value.as_deref(),
                    example: None,
                    data_type: &model.classname,
                    is_model: true,
                    allowable_values: &allowable,
                    items_type: None,
                    items_example: None,
                    is_property: false,
                };
                (examples.example(&input, false), examples.example(&input, true))
            }
            None => {
                let input = ExampleInput {
                    default_value: None,
                    example: None,
                    data_type: return_type,
                    is_model: false,
                    allowable_values: &[],
                    items_type: op.return_base_type.as_deref(),
                    items_example: None,
                    is_property: false,
                };
                (examples.example(&input, false), examples.example(&input, true))
            }
        };
        op.facets.example = Some(example);
        op.facets.groovy_example = Some(groovy);
    }
    project(op);
    Ok(())
}

/// Rebuild the per-location lists and the derived views of `all_params`.
/// The parameter-count flags only count parameters that are neither body
/// nor form, and are stamped on every parameter as well.
fn project(op: &mut Operation) {
    let plain = op.all_params.iter().filter(|p| p.is_plain()).count();
    op.facets.has_not_body_param = plain > 0;
    op.facets.has_multiple_params = plain > 1;
    for param in &mut op.all_params {
        param.facets.has_not_body_param = plain > 0;
        param.facets.has_multiple_params = plain > 1;
    }
    op.rebuild_param_lists();
    op.swagger_params = op.all_params.iter().filter(|p| p.is_plain()).cloned().collect();
    op.original_params = op.all_params.clone();
}

fn stripped(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

fn only_default(media_types: &[String]) -> bool {
    media_types.is_empty() || (media_types.len() == 1 && media_types[0] == APPLICATION_JSON)
}

fn mapped_location(param: &Parameter) -> Option<MappedLocation> {
    if param.is_body_param {
        return Some(MappedLocation::Body);
    }
    if param.is_form_param {
        return Some(MappedLocation::Form);
    }
    match param.location.as_deref()? {
        "query" => Some(MappedLocation::Query),
        "header" => Some(MappedLocation::Header),
        "path" => Some(MappedLocation::Path),
        "cookie" => Some(MappedLocation::Cookie),
        _ => None,
    }
}

fn matches_mapping(mapping: &ParameterMapping, param: &Parameter) -> bool {
    mapped_location(param)
        .is_some_and(|location| mapping.does_match(&param.base_name, location, &param.data_type))
}

fn mapped_parameter(
    ctx: &Context,
    mapping: &ParameterMapping,
    mapped_type: &str,
    imports: &mut BTreeSet<String>,
) -> Result<Parameter, LowerError> {
    let data_type = ctx.make_sure_imported(mapped_type, imports);
    let param_name = match &mapping.mapped_name {
        Some(name) => name.clone(),
        None => ctx.names.to_param_name(&data_type)?,
    };
    Ok(Parameter {
        real_name: param_name.clone(),
        base_name: param_name.clone(),
        param_name,
        required: true,
        datatype_with_enum: data_type.clone(),
        base_type: data_type.clone(),
        is_model: mapping.is_validated,
        facets: ParameterFacets {
            mapped: true,
            with_valid: mapping.is_validated,
            type_with_generic_annotations: data_type.clone(),
            type_with_enum_with_generic_annotations: data_type.clone(),
            ..Default::default()
        },
        data_type,
        ..Default::default()
    })
}

/// Unnamed array bodies of inline item types read better in the plural.
fn needs_plural(param: &Parameter) -> bool {
    param.is_body_param
        && param.is_array
        && param.ref_name.is_none()
        && !param.facets.mapped
        && param.param_name != DEFAULT_BODY_NAME
}

fn parameter_refers_to_deprecated(param: &Parameter, deprecated: &HashSet<String>) -> bool {
    match param.items.as_deref() {
        Some(items) => refers_to_deprecated(items, deprecated),
        None => param.is_model && deprecated.contains(&param.data_type),
    }
}

/// Wrap the return property in `wrapper`. A list wrapper replaces the list
/// itself: `List<T>` becomes `Wrapper<T>`. No return type wraps the
/// dialect's void type.
fn wrap_return(ctx: &Context, op: &mut Operation, wrapper: &str, is_list_wrapper: bool) {
    let wrapper = ctx.make_sure_imported(wrapper, &mut op.imports);
    let inner = match op.return_property.take() {
        Some(mut prop) => {
            if is_list_wrapper
                && prop.is_array
                && let Some(items) = prop.items.take()
            {
                *items
            } else {
                prop
            }
        }
        None => void_property(ctx),
    };

    let wrapped = Property {
        name: inner.name.clone(),
        base_name: inner.base_name.clone(),
        data_type: format!("{wrapper}<{}>", inner.data_type),
        datatype_with_enum: format!("{wrapper}<{}>", inner.datatype_with_enum),
        base_type: wrapper.clone(),
        container_type: Some(wrapper.clone()),
        is_container: true,
        required: true,
        items: Some(Box::new(inner)),
        ..Default::default()
    };
    op.return_type = Some(wrapped.data_type.clone());
    op.return_container = Some(wrapper);
    op.is_array = wrapped.is_array;
    op.is_map = wrapped.is_map;
    op.return_property = Some(wrapped);
}

fn void_property(ctx: &Context) -> Property {
    let void = ctx.dialect.void_type().to_string();
    Property {
        name: "response".to_string(),
        base_name: "response".to_string(),
        datatype_with_enum: void.clone(),
        base_type: void.clone(),
        data_type: void,
        is_nullable: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratorOptions, ResponseBodyMapping};
    use crate::lower::operation::tests::lower;

    const PETS: &str = r##"
openapi: 3.0.3
info: { title: Pets, version: "1" }
paths:
  /pets:
    get:
      operationId: listPets
      summary: "  List pets.  "
      x-annotations-operation: Secured
      parameters:
        - name: X-Trace
          in: header
          schema: { type: string }
        - name: page
          in: query
          schema: { type: integer }
        - name: since
          in: query
          schema: { type: string, format: date, pattern: "yyyy-MM-dd" }
      responses:
        "200":
          description: ok
          headers:
            X-Total-Count:
              schema: { type: integer }
          content:
            "*/*":
              schema:
                type: array
                items: { $ref: "#/components/schemas/Pet" }
    post:
      operationId: addPets
      requestBody:
        content:
          application/json:
            schema:
              type: array
              items: { $ref: "#/components/schemas/Pet" }
      responses:
        "201":
          description: created
  /pets/{id}/photo:
    put:
      operationId: uploadPhoto
      parameters:
        - name: id
          in: path
          required: true
          schema: { type: integer, format: int64 }
      requestBody:
        content:
          multipart/form-data:
            schema:
              type: object
              properties:
                file: { type: string, format: binary }
                note: { type: string }
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema: { $ref: "#/components/schemas/Pet" }
components:
  schemas:
    Pet:
      type: object
      required: [name]
      properties:
        name: { type: string }
"##;

    fn processed(options: GeneratorOptions) -> Vec<Operation> {
        let ctx = Context::new(options.clone()).unwrap();
        let mut ops = lower(PETS, options).unwrap();
        for op in ops.iter_mut() {
            normalize(&ctx, op).unwrap();
            map_parameters(&ctx, op).unwrap();
            map_response_body(&ctx, op).unwrap();
            wrap(&ctx, op).unwrap();
            annotate(&ctx, op, &HashSet::new()).unwrap();
            freeze(&ctx, op, &ExampleRenderer::new(&ctx, &Default::default()), &[]).unwrap();
        }
        ops
    }

    fn operation<'o>(ops: &'o [Operation], nickname: &str) -> &'o Operation {
        ops.iter().find(|op| op.nickname == nickname).unwrap()
    }

    #[test]
    fn test_stages_run_in_order() {
        let ctx = Context::new(GeneratorOptions::java_server()).unwrap();
        let mut ops = lower(PETS, GeneratorOptions::java_server()).unwrap();
        let err = wrap(&ctx, &mut ops[0]).unwrap_err();
        assert!(matches!(err, LowerError::Consistency(_)));
        normalize(&ctx, &mut ops[0]).unwrap();
        assert_eq!(ops[0].stage, Stage::Normalized);
    }

    #[test]
    fn test_normalized_surface() {
        let ops = processed(GeneratorOptions::java_server());
        let list = operation(&ops, "listPets");
        assert_eq!(list.summary.as_deref(), Some("List pets."));
        assert!(list.produces.is_empty());
        assert!(list.facets.only_default_produce_or_empty);
        assert!(!list.facets.method_allows_body);
        assert_eq!(list.facets.annotations.operation, vec!["@Secured"]);
        assert!(!list.vendor_extensions.contains_key(ANNOTATIONS_OPERATION));
        assert_eq!(list.stage, Stage::Frozen);

        let since = list.query_params.iter().find(|p| p.base_name == "since").unwrap();
        assert_eq!(since.format_pattern.as_deref(), Some("yyyy-MM-dd"));
        assert_eq!(since.constraints.pattern, None);
        assert_eq!(list.swagger_params.len(), 3);
        assert!(list.facets.has_not_body_param);
        assert!(list.facets.has_multiple_params);
    }

    #[test]
    fn test_envelopes() {
        let ops = processed(GeneratorOptions::java_server());
        let list = operation(&ops, "listPets");
        assert_eq!(list.return_type.as_deref(), Some("Mono<HttpResponse<List<Pet>>>"));
        assert_eq!(list.facets.original_return_type.as_deref(), Some("List<Pet>"));
        assert!(list.imports.contains("HttpResponse"));
        assert!(list.imports.contains("Mono"));

        let add = operation(&ops, "addPets");
        assert_eq!(add.return_type.as_deref(), Some("Mono<HttpResponse<Void>>"));

        let upload = operation(&ops, "uploadPhoto");
        assert_eq!(upload.return_type.as_deref(), Some("Mono<Pet>"));
        assert!(upload.facets.method_allows_body);
    }

    #[test]
    fn test_flux_for_arrays() {
        let mut options = GeneratorOptions::java_client();
        options.flux_for_arrays = true;
        options.generate_http_response_where_required = false;
        let ops = processed(options);
        let list = operation(&ops, "listPets");
        assert_eq!(list.return_type.as_deref(), Some("Flux<Pet>"));
        assert!(list.facets.is_return_flux);
        assert!(!list.is_array);
    }

    #[test]
    fn test_multipart_parts_become_body_params() {
        let ops = processed(GeneratorOptions::java_server());
        let upload = operation(&ops, "uploadPhoto");
        assert!(upload.form_params.is_empty());
        assert_eq!(upload.body_params.len(), 2);
        assert!(upload.body_params.iter().all(|p| p.is_part));
    }

    #[test]
    fn test_param_count_flags_skip_body_and_form() {
        let ops = processed(GeneratorOptions::java_server());
        let upload = operation(&ops, "uploadPhoto");
        assert_eq!(upload.swagger_params.len(), 1);
        assert!(upload.facets.has_not_body_param);
        assert!(!upload.facets.has_multiple_params);
        assert!(upload.all_params.iter().all(|p| p.facets.has_not_body_param));
        assert!(upload.all_params.iter().all(|p| !p.facets.has_multiple_params));

        let add = operation(&ops, "addPets");
        assert!(add.swagger_params.is_empty());
        assert!(!add.facets.has_not_body_param);
        assert!(!add.facets.has_multiple_params);
        assert!(!add.body_param.as_ref().unwrap().facets.has_not_body_param);
    }

    #[test]
    fn test_plural_array_body() {
        let ops = processed(GeneratorOptions::java_server());
        let add = operation(&ops, "addPets");
        assert_eq!(add.body_param.as_ref().unwrap().param_name, "pets");

        let mut options = GeneratorOptions::java_server();
        options.plural = false;
        let ops = processed(options);
        let add = operation(&ops, "addPets");
        assert_eq!(add.body_param.as_ref().unwrap().param_name, "pet");
    }

    #[test]
    fn test_implicit_headers() {
        let mut options = GeneratorOptions::java_server();
        options.implicit_headers_regex = Some("^X-".into());
        let ops = processed(options);
        let list = operation(&ops, "listPets");
        assert_eq!(list.implicit_headers_params[0].base_name, "X-Trace");
        assert!(list.header_params.is_empty());
        assert_eq!(list.original_params.len(), 2);
    }

    #[test]
    fn test_parameter_mapping() {
        let mut options = GeneratorOptions::java_server();
        options.parameter_mappings = vec![ParameterMapping {
            name: Some("page".into()),
            location: Some(MappedLocation::Query),
            mapped_type: Some("io.micronaut.data.model.Pageable".into()),
            ..Default::default()
        }];
        let ops = processed(options);
        let list = operation(&ops, "listPets");
        let mapped = list.all_params.last().unwrap();
        assert_eq!(mapped.data_type, "Pageable");
        assert_eq!(mapped.param_name, "pageable");
        assert!(mapped.facets.mapped);
        assert!(list.imports.contains("Pageable"));
        assert!(list.query_params.iter().all(|p| p.base_name != "page"));
    }

    #[test]
    fn test_response_body_mapping() {
        let mut options = GeneratorOptions::java_server();
        options.generate_http_response_where_required = false;
        options.response_body_mappings = vec![ResponseBodyMapping {
            header_name: "X-Total-Count".into(),
            mapped_body_type: Some("io.micronaut.data.model.Page".into()),
            is_list_wrapper: true,
            is_validated: false,
        }];
        let ops = processed(options);
        let list = operation(&ops, "listPets");
        assert!(list.response_headers.is_empty());
        assert_eq!(list.return_type.as_deref(), Some("Mono<Page<Pet>>"));
    }
}
