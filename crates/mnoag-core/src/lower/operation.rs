//! Paths to [`Operation`]s: parameters, request bodies, responses and
//! security requirements.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use serde_json::Value;

use super::model::ModelLowering;
use crate::context::Context;
use crate::defaults::{DefaultSite, value_text};
use crate::error::LowerError;
use crate::naming::{camelize, lower_first, operation_id_for};
use crate::parse::media_type::{FORM_URLENCODED, MediaType, is_form_media_type};
use crate::parse::operation::{HttpMethod, Operation as ParsedOperation, PathItem};
use crate::parse::parameter::{Parameter as ParsedParameter, ParameterLocation};
use crate::parse::refs::{RefIndex, parse_ref_name};
use crate::parse::request_body::RequestBody;
use crate::parse::response::{HeaderOrRef, Response as ParsedResponse, ResponseOrRef};
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};
use crate::parse::security::SecuritySchemeType;
use crate::parse::spec::OpenApiSpec;
use crate::tir::{AuthMethod, Operation, Parameter, Property, Response};
use crate::types::{ModelIndex, TypeResolver, TypedBearer};

/// Name of a request body that neither names itself nor references a model.
pub const DEFAULT_BODY_NAME: &str = "body";
pub const DEFAULT_TAG: &str = "default";
const JSON: &str = "application/json";
const BODY_NAME_EXTENSION: &str = "x-codegen-request-body-name";

/// Media types of a request body that lower to the same signature.
struct BodyVariant<'b> {
    media_types: Vec<&'b str>,
    media: &'b MediaType,
}

pub struct OperationLowering<'a> {
    ctx: &'a Context,
    spec: &'a OpenApiSpec,
    index: RefIndex<'a>,
    models: &'a ModelIndex,
    properties: ModelLowering<'a>,
    types: TypeResolver<'a>,
}

impl<'a> OperationLowering<'a> {
    pub fn new(ctx: &'a Context, spec: &'a OpenApiSpec, models: &'a ModelIndex) -> Self {
        let components = spec.components.as_ref();
        let index = RefIndex::new(components);
        Self {
            ctx,
            spec,
            index,
            models,
            properties: ModelLowering::new(ctx, components, models).with_binary_as_file(true),
            types: TypeResolver::new(ctx, index, models).with_binary_as_file(true),
        }
    }

    /// Lower every operation of every path, in document order.
    pub fn lower_all(&self) -> Result<Vec<Operation>, LowerError> {
        let mut operations = Vec::new();
        for (path, item) in &self.spec.paths {
            for (method, op) in item.operations() {
                operations.extend(self.lower_operation(path, item, method, op)?);
            }
        }
        log::debug!("lowered {} operations", operations.len());
        Ok(operations)
    }

    /// One operation, or one per body variant when operations are divided
    /// by content type.
    fn lower_operation(
        &self,
        path: &str,
        item: &'a PathItem,
        method: HttpMethod,
        op: &'a ParsedOperation,
    ) -> Result<Vec<Operation>, LowerError> {
        let nickname = self.nickname(path, method, op);
        let body = op
            .request_body
            .as_ref()
            .map(|body| self.index.request_body(body))
            .transpose()?;
        let Some(body) = body.filter(|b| !b.content.is_empty()) else {
            return Ok(vec![self.build(path, item, method, op, nickname, None)?]);
        };

        let variants = self.body_variants(&nickname, body);
        let mut operations = Vec::with_capacity(variants.len());
        for (i, variant) in variants.iter().enumerate() {
            let nickname = if i == 0 {
                nickname.clone()
            } else {
                format!("{nickname}{}", media_suffix(variant.media_types[0]))
            };
            operations.push(self.build(path, item, method, op, nickname, Some((body, variant)))?);
        }
        Ok(operations)
    }

    fn build(
        &self,
        path: &str,
        item: &'a PathItem,
        method: HttpMethod,
        op: &'a ParsedOperation,
        nickname: String,
        body: Option<(&'a RequestBody, &BodyVariant<'a>)>,
    ) -> Result<Operation, LowerError> {
        let options = &self.ctx.options;
        let mut imports = BTreeSet::new();

        let mut params = Vec::new();
        for param in self.declared_parameters(item, op)? {
            params.push(self.parameter(&nickname, param, &mut imports)?);
        }

        let mut consumes = Vec::new();
        let mut body_params = Vec::new();
        if let Some((body, variant)) = body {
            consumes = variant.media_types.iter().map(|m| m.to_string()).collect();
            let media_type = variant.media_types[0];
            if is_form_media_type(media_type) {
                body_params = self.form_parameters(variant.media, &mut imports)?;
            } else {
                body_params.push(self.body_parameter(op, body, media_type, variant.media, &mut imports)?);
            }
        }
        let has_form = body_params.iter().any(|p| p.is_form_param);
        let has_body = !body_params.is_empty();

        let mut all_params = if options.prepend_form_or_body_parameters {
            body_params.into_iter().chain(params).collect::<Vec<_>>()
        } else {
            params.into_iter().chain(body_params).collect::<Vec<_>>()
        };
        if options.ensure_unique_params {
            ensure_unique(&mut all_params);
        }
        if options.sort_params_by_required_flag {
            all_params.sort_by_key(|p| !p.required);
        }

        let mut responses = Vec::with_capacity(op.responses.len());
        let mut produces: Vec<String> = Vec::new();
        for (code, response) in &op.responses {
            let (response, description) = self.deref_response(response)?;
            for media_type in response.content.keys() {
                if !produces.contains(media_type) {
                    produces.push(media_type.clone());
                }
            }
            responses.push(self.response(code, response, description, &mut imports)?);
        }

        let mut operation = Operation {
            http_method: method.as_str().to_string(),
            path: path.to_string(),
            operation_id: nickname.clone(),
            nickname,
            tags: if op.tags.is_empty() {
                vec![DEFAULT_TAG.to_string()]
            } else {
                op.tags.clone()
            },
            summary: op.summary.clone(),
            description: op.description.clone(),
            deprecated: op.deprecated.unwrap_or(false),
            consumes,
            produces,
            all_params,
            responses,
            auth_methods: self.auth_methods(op),
            vendor_extensions: x_extensions(&op.extensions),
            ..Default::default()
        };

        operation.facets.content_type = match operation.consumes.first() {
            Some(first) => Some(first.clone()),
            None if has_form => Some(FORM_URLENCODED.to_string()),
            None if has_body => Some(JSON.to_string()),
            None => None,
        };
        operation.facets.accepts = Some(if operation.produces.is_empty() {
            JSON.to_string()
        } else {
            operation.produces.join(", ")
        });

        let method_response = op
            .responses
            .keys()
            .position(|code| code.starts_with('2'))
            .or_else(|| op.responses.keys().position(|code| code == "default"));
        if let Some(i) = method_response {
            operation.response_headers = operation.responses[i].headers.clone();
            let (_, response) = op
                .responses
                .get_index(i)
                .ok_or_else(|| LowerError::Consistency(format!("response {i} vanished")))?;
            let (response, _) = self.deref_response(response)?;
            self.return_type(&mut operation, response, &mut imports)?;
        }

        operation.imports = imports;
        operation.rebuild_param_lists();
        Ok(operation)
    }

    /// Nickname from the operation id, with the configured prefix removed.
    /// Reserved or digit-led results are prefixed with `call`.
    fn nickname(&self, path: &str, method: HttpMethod, op: &ParsedOperation) -> String {
        let raw = match op.operation_id.as_deref().filter(|id| !id.trim().is_empty()) {
            Some(id) => self.remove_prefix(id),
            None => {
                let generated = operation_id_for(path, method.as_str());
                log::warn!("empty operationId for {} {path}, using {generated}", method.as_str());
                generated
            }
        };
        let sanitized: String = raw
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        let nickname = camelize(&sanitized, true);
        if self.ctx.names.is_reserved(&nickname) || nickname.starts_with(|c: char| c.is_ascii_digit()) {
            let renamed = camelize(&format!("call_{nickname}"), true);
            log::warn!("{nickname} cannot be used as method name, renamed to {renamed}");
            return renamed;
        }
        nickname
    }

    fn remove_prefix(&self, operation_id: &str) -> String {
        let options = &self.ctx.options;
        let delimiter = options.remove_operation_id_prefix_delimiter.as_str();
        if !options.remove_operation_id_prefix || delimiter.is_empty() {
            return operation_id.to_string();
        }
        let parts: Vec<&str> = operation_id.split(delimiter).collect();
        let count = options.remove_operation_id_prefix_count;
        if parts.len() > count {
            parts[count..].join(delimiter)
        } else {
            operation_id.to_string()
        }
    }

    /// Group body media types. Without division every media type shares the
    /// first one's schema.
    fn body_variants<'b>(&self, nickname: &str, body: &'b RequestBody) -> Vec<BodyVariant<'b>> {
        let divide = self.ctx.settings.divide_operations_by_content_type;
        let mut variants: Vec<BodyVariant<'b>> = Vec::new();
        for (media_type, media) in &body.content {
            let existing = if divide {
                variants.iter_mut().find(|v| v.media.schema == media.schema)
            } else {
                variants.first_mut()
            };
            match existing {
                Some(variant) => {
                    if variant.media.schema != media.schema {
                        self.ctx.warn_once(&format!("request-body:{nickname}"), || {
                            format!(
                                "request body of '{nickname}' has different schemas per media type, \
                                 using the one of {}",
                                variant.media_types[0]
                            )
                        });
                    }
                    variant.media_types.push(media_type);
                }
                None => variants.push(BodyVariant {
                    media_types: vec![media_type],
                    media,
                }),
            }
        }
        variants
    }

    /// Path-level parameters overlaid by the operation's own, matched by
    /// name and location.
    fn declared_parameters(
        &self,
        item: &'a PathItem,
        op: &'a ParsedOperation,
    ) -> Result<Vec<&'a ParsedParameter>, LowerError> {
        let mut declared: Vec<&'a ParsedParameter> = Vec::new();
        for param in item.parameters.iter().chain(&op.parameters) {
            let param = self.index.parameter(param)?;
            match declared
                .iter()
                .position(|d| d.name == param.name && d.location == param.location)
            {
                Some(i) => declared[i] = param,
                None => declared.push(param),
            }
        }
        Ok(declared)
    }

    fn parameter(
        &self,
        nickname: &str,
        param: &ParsedParameter,
        imports: &mut BTreeSet<String>,
    ) -> Result<Parameter, LowerError> {
        let fallback = string_schema();
        let schema = match (&param.schema, param.content.first()) {
            (Some(schema), _) => schema,
            (None, Some((_, media))) => {
                if param.content.len() > 1 {
                    self.ctx.warn_once(&format!("parameter-content:{nickname}:{}", param.name), || {
                        format!(
                            "parameter '{}' of '{nickname}' declares {} media types, using the first",
                            param.name,
                            param.content.len()
                        )
                    });
                }
                media.schema.as_ref().unwrap_or(&fallback)
            }
            (None, None) => &fallback,
        };

        let required = param.required || param.location == ParameterLocation::Path;
        let prop = self.properties.property(
            &param.name,
            schema,
            required,
            DefaultSite::Parameter,
            imports,
        )?;
        let mut out = parameter_from(prop, self.ctx.names.to_param_name(&param.name)?);
        out.location = Some(param.location.as_str().to_string());
        match param.location {
            ParameterLocation::Query => out.is_query_param = true,
            ParameterLocation::Header => out.is_header_param = true,
            ParameterLocation::Path => out.is_path_param = true,
            ParameterLocation::Cookie => out.is_cookie_param = true,
        }
        if param.description.is_some() {
            out.description = param.description.clone();
        }
        out.is_deprecated = out.is_deprecated || param.deprecated.unwrap_or(false);
        out.is_explode = param.explode.unwrap_or_else(|| match param.style.as_deref() {
            Some(style) => style == "form",
            None => matches!(param.location, ParameterLocation::Query | ParameterLocation::Cookie),
        });
        if let Some(example) = &param.example {
            out.example = Some(value_text(example));
        }
        out.ref_name = component_name(schema);
        out.vendor_extensions.extend(x_extensions(&param.extensions));
        Ok(out)
    }

    fn body_parameter(
        &self,
        op: &ParsedOperation,
        body: &RequestBody,
        media_type: &str,
        media: &MediaType,
        imports: &mut BTreeSet<String>,
    ) -> Result<Parameter, LowerError> {
        let fallback = SchemaOrRef::from(Schema::default());
        let schema = media.schema.as_ref().unwrap_or(&fallback);
        let base_name = op
            .extensions
            .get(BODY_NAME_EXTENSION)
            .or_else(|| body.extensions.get(BODY_NAME_EXTENSION))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.default_body_name(schema));

        let prop = self.properties.property(
            &base_name,
            schema,
            body.required,
            DefaultSite::Parameter,
            imports,
        )?;
        let mut param = parameter_from(prop, self.ctx.names.to_param_name(&base_name)?);
        param.is_body_param = true;
        if body.description.is_some() {
            param.description = body.description.clone();
        }
        param.content_type = Some(media_type.to_string());
        param.ref_name = component_name(schema);
        param.vendor_extensions.extend(x_extensions(&body.extensions));
        Ok(param)
    }

    /// `Pet` bodies are named `pet`, arrays of `Book` are named `book`.
    fn default_body_name(&self, schema: &SchemaOrRef) -> String {
        let model_ref = match schema {
            SchemaOrRef::Ref { ref_path } => Some(ref_path.as_str()),
            SchemaOrRef::Schema(s) if s.is_array() => {
                s.items.as_deref().and_then(SchemaOrRef::ref_path)
            }
            SchemaOrRef::Schema(_) => None,
        };
        model_ref
            .and_then(|r| parse_ref_name(r, "schemas").ok())
            .and_then(|key| self.models.classname(key))
            .map(lower_first)
            .unwrap_or_else(|| DEFAULT_BODY_NAME.to_string())
    }

    /// One form parameter per property of a form body.
    fn form_parameters(
        &self,
        media: &MediaType,
        imports: &mut BTreeSet<String>,
    ) -> Result<Vec<Parameter>, LowerError> {
        let Some(schema) = media.schema.as_ref() else {
            return Ok(Vec::new());
        };
        let (_, schema) = self.index.deref_schema(schema)?;
        let mut params = Vec::with_capacity(schema.properties.len());
        for (name, prop_schema) in &schema.properties {
            let required = schema.required.iter().any(|r| r == name);
            let prop = self.properties.property(
                name,
                prop_schema,
                required,
                DefaultSite::Parameter,
                imports,
            )?;
            let mut param = parameter_from(prop, self.ctx.names.to_param_name(name)?);
            param.is_form_param = true;
            param.content_type = media.encoding.get(name).and_then(|e| e.content_type.clone());
            params.push(param);
        }
        Ok(params)
    }

    fn deref_response(
        &self,
        response: &'a ResponseOrRef,
    ) -> Result<(&'a ParsedResponse, Option<&'a str>), LowerError> {
        match response {
            ResponseOrRef::Response(r) => Ok((r, None)),
            ResponseOrRef::Ref {
                ref_path,
                description,
            } => Ok((self.index.response(ref_path)?, description.as_deref())),
        }
    }

    fn response(
        &self,
        code: &str,
        response: &'a ParsedResponse,
        description: Option<&str>,
        imports: &mut BTreeSet<String>,
    ) -> Result<Response, LowerError> {
        let mut out = Response {
            code: code.to_string(),
            message: description.unwrap_or(&response.description).to_string(),
            is_default: code == "default",
            is2xx: code.starts_with('2'),
            vendor_extensions: x_extensions(&response.extensions),
            ..Default::default()
        };
        if let Some(schema) = response_schema(response) {
            let ty = self.types.resolve(schema)?;
            TypedBearer::Response(&mut out).apply(&ty);
            imports.extend(ty.imports.iter().cloned());
            out.schema = serde_json::to_value(schema).ok();
        }
        for (name, header) in &response.headers {
            out.headers.push(self.header(name, header, imports)?);
        }
        Ok(out)
    }

    fn header(
        &self,
        name: &str,
        header: &'a HeaderOrRef,
        imports: &mut BTreeSet<String>,
    ) -> Result<Property, LowerError> {
        let header = match header {
            HeaderOrRef::Header(h) => h,
            HeaderOrRef::Ref { ref_path } => self.index.header(ref_path)?,
        };
        let fallback = string_schema();
        let schema = header.schema.as_ref().unwrap_or(&fallback);
        let mut prop =
            self.properties
                .property(name, schema, header.required, DefaultSite::Property, imports)?;
        if header.description.is_some() {
            prop.description = header.description.clone();
        }
        prop.deprecated = prop.deprecated || header.deprecated.unwrap_or(false);
        if let Some(example) = &header.example {
            prop.example = Some(value_text(example));
        }
        prop.vendor_extensions.extend(x_extensions(&header.extensions));
        Ok(prop)
    }

    /// Return type of the method response. Binary payloads become the
    /// dialect's response file type.
    fn return_type(
        &self,
        operation: &mut Operation,
        response: &'a ParsedResponse,
        imports: &mut BTreeSet<String>,
    ) -> Result<(), LowerError> {
        let Some(schema) = response_schema(response) else {
            return Ok(());
        };
        let mut prop =
            self.properties
                .property("response", schema, true, DefaultSite::Property, imports)?;
        if prop.flags.is_file || prop.flags.is_binary {
            let file = self
                .ctx
                .make_sure_imported(self.ctx.mapped_type("responseFile")?, imports);
            prop.data_type = file.clone();
            prop.datatype_with_enum = file.clone();
            prop.base_type = file;
            prop.is_container = false;
            prop.is_array = false;
            prop.items = None;
            operation.is_response_file = true;
        }
        operation.return_type = Some(prop.data_type.clone());
        operation.return_base_type = Some(prop.most_inner_items().base_type.clone());
        operation.return_container = prop.container_type.clone();
        operation.is_array = prop.is_array;
        operation.is_map = prop.is_map;
        operation.return_property = Some(prop);
        Ok(())
    }

    fn auth_methods(&self, op: &ParsedOperation) -> Vec<AuthMethod> {
        let Some(schemes) = self.spec.components.as_ref().map(|c| &c.security_schemes) else {
            return Vec::new();
        };
        let requirements = op.security.as_ref().or(self.spec.security.as_ref());
        let mut methods: Vec<AuthMethod> = Vec::new();
        for requirement in requirements.into_iter().flatten() {
            for (name, scopes) in requirement {
                let Some(scheme) = schemes.get(name) else {
                    self.ctx.warn_once(&format!("security-scheme:{name}"), || {
                        format!("security scheme '{name}' is not defined")
                    });
                    continue;
                };
                if let Some(method) = methods.iter_mut().find(|m| &m.name == name) {
                    for scope in scopes {
                        if !method.scopes.contains(scope) {
                            method.scopes.push(scope.clone());
                        }
                    }
                    continue;
                }
                let flow = scheme.first_flow();
                methods.push(AuthMethod {
                    name: name.clone(),
                    scheme_type: scheme.scheme_type.as_str().to_string(),
                    scheme: scheme.scheme.clone(),
                    key_param_name: scheme.name.clone(),
                    key_in: scheme.location.as_ref().map(|l| l.as_str().to_string()),
                    bearer_format: scheme.bearer_format.clone(),
                    flow: flow.map(|(name, _)| name.to_string()),
                    authorization_url: flow.and_then(|(_, f)| f.authorization_url.clone()),
                    token_url: flow.and_then(|(_, f)| f.token_url.clone()),
                    is_api_key: scheme.scheme_type == SecuritySchemeType::ApiKey,
                    is_basic_basic: scheme.is_http("basic"),
                    is_basic_bearer: scheme.is_http("bearer"),
                    is_oauth: scheme.scheme_type == SecuritySchemeType::OAuth2,
                    is_open_id_connect: scheme.scheme_type == SecuritySchemeType::OpenIdConnect,
                    scopes: scopes.clone(),
                });
            }
        }
        methods
    }
}

fn string_schema() -> SchemaOrRef {
    Schema::of_type(SchemaType::String).into()
}

fn response_schema(response: &ParsedResponse) -> Option<&SchemaOrRef> {
    response.content.values().find_map(|m| m.schema.as_ref())
}

fn component_name(schema: &SchemaOrRef) -> Option<String> {
    schema
        .ref_path()
        .and_then(|r| parse_ref_name(r, "schemas").ok())
        .map(str::to_string)
}

fn x_extensions(extensions: &IndexMap<String, Value>) -> IndexMap<String, Value> {
    extensions
        .iter()
        .filter(|(key, _)| key.starts_with("x-"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// `application/vnd.api+json` → `VndApiJson`.
fn media_suffix(media_type: &str) -> String {
    let base = media_type.split(';').next().unwrap_or(media_type);
    let subtype = base.rsplit('/').next().unwrap_or(base);
    let cleaned: String = subtype
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    camelize(&cleaned, false)
}

/// Move a lowered property onto a parameter.
fn parameter_from(prop: Property, param_name: String) -> Parameter {
    let allowable_values = prop.enum_vars.iter().map(|v| v.raw_value.clone()).collect();
    let mut param = Parameter {
        param_name,
        real_name: prop.base_name.clone(),
        base_name: prop.base_name,
        description: prop.description,
        required: prop.required,
        is_enum: prop.is_enum,
        is_nullable: prop.is_nullable,
        is_deprecated: prop.deprecated,
        items: prop.items,
        default_value: prop.default_value,
        example: prop.example,
        constraints: prop.constraints,
        format_pattern: prop.format_pattern,
        allowable_values,
        enum_vars: prop.enum_vars,
        vendor_extensions: prop.vendor_extensions,
        ..Default::default()
    };
    param.data_type = prop.data_type;
    param.datatype_with_enum = prop.datatype_with_enum;
    param.base_type = prop.base_type;
    param.container_type = prop.container_type;
    param.flags = prop.flags;
    param.is_container = prop.is_container;
    param.is_array = prop.is_array;
    param.is_map = prop.is_map;
    param.unique_items = prop.unique_items;
    param.is_model = prop.is_model;
    param.is_enum_ref = prop.is_enum_ref;
    param.facets.default_value_init = prop.default_value_init;
    param
}

/// Rename repeated parameter names: `id`, `id2`, `id3`.
fn ensure_unique(params: &mut [Parameter]) {
    let mut seen: HashSet<String> = HashSet::new();
    for param in params.iter_mut() {
        while !seen.insert(param.param_name.clone()) {
            param.param_name = next_name(&param.param_name);
        }
    }
}

fn next_name(name: &str) -> String {
    let stem = name.trim_end_matches(|c: char| c.is_ascii_digit());
    match name[stem.len()..].parse::<u64>() {
        Ok(n) => format!("{stem}{}", n + 1),
        Err(_) => format!("{name}2"),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::GeneratorOptions;
    use crate::parse;

    pub(crate) fn lower(doc: &str, options: GeneratorOptions) -> Result<Vec<Operation>, LowerError> {
        let ctx = Context::new(options)?;
        let mut spec = parse::from_yaml(doc)?;
        crate::normalize::normalize(&mut spec, &ctx);
        crate::inline::resolve_inline_models(&mut spec, &ctx);
        let models = ModelIndex::build(&ctx, spec.components.as_ref())?;
        OperationLowering::new(&ctx, &spec, &models).lower_all()
    }

    fn operation<'o>(ops: &'o [Operation], nickname: &str) -> &'o Operation {
        ops.iter()
            .find(|op| op.nickname == nickname)
            .unwrap_or_else(|| panic!("no operation {nickname}"))
    }

    fn param_names(params: &[Parameter]) -> Vec<&str> {
        params.iter().map(|p| p.param_name.as_str()).collect()
    }

    const PETS: &str = r##"
openapi: 3.0.3
info: { title: Pets, version: "1" }
security:
  - api_key: []
paths:
  /pet/findByStatus:
    get:
      tags: [pet]
      operationId: findPetsByStatus
      parameters:
        - name: status
          in: query
          required: false
          schema:
            type: array
            items:
              type: string
              enum: [available, pending, sold]
              default: available
            default: [available]
      responses:
        "200":
          description: ok
          headers:
            X-Rate-Limit:
              description: calls per hour
              schema: { type: integer, format: int32 }
          content:
            application/json:
              schema:
                type: array
                items: { $ref: "#/components/schemas/Pet" }
            application/xml:
              schema:
                type: array
                items: { $ref: "#/components/schemas/Pet" }
        "400":
          description: invalid status
  /pet:
    post:
      tags: [pet]
      operationId: addPet
      security:
        - petstore_auth: [write:pets]
        - petstore_auth: [read:pets]
      requestBody:
        required: true
        content:
          application/json:
            schema: { $ref: "#/components/schemas/Pet" }
      responses:
        "201":
          description: created
  /pet/{petId}:
    parameters:
      - name: petId
        in: path
        required: true
        schema: { type: integer, format: int64 }
    post:
      tags: [pet]
      operationId: updatePetWithForm
      parameters:
        - name: api_key
          in: header
          schema: { type: string }
      requestBody:
        content:
          application/x-www-form-urlencoded:
            schema:
              type: object
              properties:
                name: { type: string }
                status: { type: string }
      responses:
        "405":
          description: invalid input
  /pet/{petId}/image:
    get:
      operationId: downloadImage
      parameters:
        - name: petId
          in: path
          required: true
          schema: { type: integer, format: int64 }
      responses:
        "200":
          description: image
          content:
            image/png:
              schema: { type: string, format: binary }
components:
  securitySchemes:
    api_key:
      type: apiKey
      name: api_key
      in: header
    petstore_auth:
      type: oauth2
      flows:
        implicit:
          authorizationUrl: https://example.com/oauth
          scopes:
            write:pets: modify pets
            read:pets: read pets
  schemas:
    Pet:
      type: object
      required: [name]
      properties:
        id: { type: integer, format: int64 }
        name: { type: string }
"##;

    #[test]
    fn test_find_by_status() {
        let ops = lower(PETS, GeneratorOptions::java_server()).unwrap();
        let op = operation(&ops, "findPetsByStatus");
        assert_eq!(op.http_method, "GET");
        assert!(op.consumes.is_empty());
        assert_eq!(op.produces, vec!["application/json", "application/xml"]);
        assert_eq!(op.facets.accepts.as_deref(), Some("application/json, application/xml"));
        assert_eq!(op.facets.content_type, None);

        let status = &op.query_params[0];
        assert_eq!(status.param_name, "status");
        assert_eq!(status.datatype_with_enum, "List<StatusEnum>");
        assert_eq!(status.default_value.as_deref(), Some("[\"available\"]"));
        assert_eq!(status.allowable_values, vec!["available", "pending", "sold"]);
        assert!(status.is_explode);

        assert_eq!(op.return_type.as_deref(), Some("List<Pet>"));
        assert_eq!(op.return_base_type.as_deref(), Some("Pet"));
        assert_eq!(op.return_container.as_deref(), Some("List"));
        assert!(op.is_array);
        assert_eq!(op.response_headers[0].name, "xrateLimit");
        assert_eq!(op.responses.len(), 2);
        assert!(op.responses[0].is2xx);
        assert!(!op.responses[1].is2xx);
        assert_eq!(op.auth_methods[0].name, "api_key");
        assert_eq!(op.auth_methods[0].key_in.as_deref(), Some("header"));
        assert!(op.auth_methods[0].is_api_key);
    }

    #[test]
    fn test_model_body_and_scopes() {
        let ops = lower(PETS, GeneratorOptions::java_client()).unwrap();
        let op = operation(&ops, "addPet");
        let body = op.body_param.as_ref().unwrap();
        assert_eq!(body.param_name, "pet");
        assert_eq!(body.ref_name.as_deref(), Some("Pet"));
        assert!(body.is_model);
        assert!(body.required);
        assert_eq!(op.consumes, vec!["application/json"]);
        assert_eq!(op.facets.content_type.as_deref(), Some("application/json"));
        assert_eq!(op.return_type, None);
        assert_eq!(op.auth_methods.len(), 1);
        let auth = &op.auth_methods[0];
        assert_eq!(auth.scopes, vec!["write:pets", "read:pets"]);
        assert!(auth.is_oauth && !auth.is_api_key);
        assert_eq!(auth.flow.as_deref(), Some("implicit"));
        assert_eq!(auth.authorization_url.as_deref(), Some("https://example.com/oauth"));
    }

    #[test]
    fn test_form_and_path_level_params() {
        let ops = lower(PETS, GeneratorOptions::java_server()).unwrap();
        let op = operation(&ops, "updatePetWithForm");
        assert_eq!(param_names(&op.all_params), vec!["petId", "apiKey", "name", "status"]);
        assert_eq!(param_names(&op.form_params), vec!["name", "status"]);
        assert!(op.body_params.is_empty());
        assert_eq!(
            op.facets.content_type.as_deref(),
            Some("application/x-www-form-urlencoded")
        );
        assert!(op.path_params[0].required);
        assert_eq!(op.path_params[0].data_type, "Long");
    }

    #[test]
    fn test_binary_response_is_file() {
        let server = lower(PETS, GeneratorOptions::java_server()).unwrap();
        let op = operation(&server, "downloadImage");
        assert!(op.is_response_file);
        assert_eq!(op.return_type.as_deref(), Some("FileCustomizableResponseType"));
        assert_eq!(op.tags, vec![DEFAULT_TAG]);

        let client = lower(PETS, GeneratorOptions::java_client()).unwrap();
        let op = operation(&client, "downloadImage");
        assert_eq!(op.return_type.as_deref(), Some("InputStream"));
    }

    const NAMES: &str = r##"
openapi: 3.0.3
info: { title: Names, version: "1" }
paths:
  /items/{id}:
    delete:
      operationId: return
      parameters:
        - name: id
          in: path
          required: true
          schema: { type: string }
        - name: id
          in: query
          schema: { type: string }
        - name: id2
          in: header
          schema: { type: string }
      responses:
        "204":
          description: gone
  /items:
    get:
      operationId: items_v2_list
      responses:
        "200":
          description: ok
    put:
      responses:
        "200":
          description: ok
    post:
      operationId: 1upload
      requestBody:
        content:
          text/plain:
            schema: { type: string }
      responses:
        "200":
          description: ok
"##;

    #[test]
    fn test_reserved_and_generated_nicknames() {
        let ops = lower(NAMES, GeneratorOptions::java_server()).unwrap();
        assert!(ops.iter().any(|op| op.nickname == "callReturn"));
        assert!(ops.iter().any(|op| op.nickname == "call1upload"));
        assert!(ops.iter().any(|op| op.nickname == "itemsPut"));

        let upload = operation(&ops, "call1upload");
        assert_eq!(upload.body_param.as_ref().unwrap().param_name, DEFAULT_BODY_NAME);
    }

    #[test]
    fn test_unique_param_names() {
        let ops = lower(NAMES, GeneratorOptions::java_server()).unwrap();
        let op = operation(&ops, "callReturn");
        assert_eq!(param_names(&op.all_params), vec!["id", "id2", "id3"]);
    }

    #[test]
    fn test_remove_operation_id_prefix() {
        let mut options = GeneratorOptions::java_server();
        options.remove_operation_id_prefix = true;
        options.remove_operation_id_prefix_delimiter = "_".into();
        options.remove_operation_id_prefix_count = 2;
        let ops = lower(NAMES, options).unwrap();
        assert!(ops.iter().any(|op| op.nickname == "list"));
    }

    #[test]
    fn test_next_name() {
        assert_eq!(next_name("id"), "id2");
        assert_eq!(next_name("id2"), "id3");
        assert_eq!(next_name("v10"), "v11");
    }

    #[test]
    fn test_media_suffix() {
        assert_eq!(media_suffix("application/xml"), "Xml");
        assert_eq!(media_suffix("application/vnd.api+json; charset=utf-8"), "VndApiJson");
    }
}
