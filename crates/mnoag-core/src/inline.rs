//! Hoists anonymous object, composed and enum schemas into named components
//! so that every class the renderer emits has a component key.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::config::{RESOLVE_INLINE_ENUMS, SKIP_SCHEMA_REUSE};
use crate::context::Context;
use crate::naming::{camelize, operation_id_for};
use crate::parse::media_type::{MediaType, is_form_media_type};
use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::parameter::ParameterOrRef;
use crate::parse::refs::schema_ref;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::ResponseOrRef;
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef};
use crate::parse::spec::OpenApiSpec;

/// Where an inline schema sits, which decides whether it is hoisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Site {
    /// A property of a model: objects, composed schemas and scalar enums.
    Property,
    /// Array items, map values, bodies, responses and parameters: objects
    /// and composed schemas only.
    Nested,
}

pub struct InlineModelResolver<'a> {
    name_mapping: &'a IndexMap<String, String>,
    resolve_enums: bool,
    reuse: bool,
    used_names: HashSet<String>,
    hoisted: IndexMap<String, SchemaOrRef>,
}

impl<'a> InlineModelResolver<'a> {
    pub fn new(ctx: &'a Context, spec: &OpenApiSpec) -> Self {
        let used_names = spec
            .components
            .iter()
            .flat_map(|c| c.schemas.keys().cloned())
            .collect();
        Self {
            name_mapping: &ctx.options.inline_schema_name_mapping,
            resolve_enums: ctx.options.inline_option(RESOLVE_INLINE_ENUMS),
            reuse: !ctx.options.inline_option(SKIP_SCHEMA_REUSE),
            used_names,
            hoisted: IndexMap::new(),
        }
    }

    /// Walk component schemas, then operations, replacing every hoisted
    /// schema with a `$ref` and appending the new components.
    pub fn flatten(mut self, spec: &mut OpenApiSpec) {
        if let Some(components) = &mut spec.components {
            for (key, schema) in components.schemas.iter_mut() {
                if let SchemaOrRef::Schema(schema) = schema {
                    self.walk_model(key, schema);
                }
            }
            for (key, body) in components.request_bodies.iter_mut() {
                if let RequestBodyOrRef::RequestBody(body) = body {
                    self.walk_content(&format!("{key}_request"), &mut body.content);
                }
            }
        }

        for (path, item) in spec.paths.iter_mut() {
            for method in HttpMethod::ALL {
                let Some(op) = item.operation_mut(method) else {
                    continue;
                };
                let op_name = op
                    .operation_id
                    .clone()
                    .unwrap_or_else(|| operation_id_for(path, method.as_str()));
                self.walk_operation(&op_name, op);
            }
        }

        if self.hoisted.is_empty() {
            return;
        }
        log::debug!("hoisted {} inline schemas", self.hoisted.len());
        spec.components
            .get_or_insert_with(Default::default)
            .schemas
            .extend(self.hoisted);
    }

    /// Visit the children of a named schema.
    fn walk_model(&mut self, name: &str, schema: &mut Schema) {
        for (prop_name, prop) in schema.properties.iter_mut() {
            self.visit(&format!("{name}_{prop_name}"), prop, Site::Property);
        }
        for member in schema.all_of.iter_mut() {
            if let SchemaOrRef::Schema(member) = member {
                self.walk_model(name, member);
            }
        }
        for member in schema.one_of.iter_mut() {
            self.visit(&format!("{name}_OneOf"), member, Site::Nested);
        }
        for member in schema.any_of.iter_mut() {
            self.visit(&format!("{name}_AnyOf"), member, Site::Nested);
        }
        self.walk_containers(name, schema);
    }

    fn walk_containers(&mut self, base: &str, schema: &mut Schema) {
        if schema.is_array() {
            if let Some(items) = schema.items.as_deref_mut() {
                self.visit(&format!("{base}_Inner"), items, Site::Nested);
            }
        } else if let Some(AdditionalProperties::Schema(value)) = &mut schema.additional_properties
        {
            self.visit(&format!("{base}_Value"), value, Site::Nested);
        }
    }

    fn walk_operation(&mut self, op_name: &str, op: &mut Operation) {
        for param in op.parameters.iter_mut() {
            let ParameterOrRef::Parameter(param) = param else {
                continue;
            };
            let base = format!("{op_name}_{}_Parameter", param.name);
            if let Some(schema) = &mut param.schema {
                self.visit(&base, schema, Site::Nested);
            }
            for media in param.content.values_mut() {
                if let Some(schema) = &mut media.schema {
                    self.visit(&base, schema, Site::Nested);
                }
            }
        }
        if let Some(RequestBodyOrRef::RequestBody(body)) = &mut op.request_body {
            self.walk_content(&format!("{op_name}_Request"), &mut body.content);
        }
        for (code, response) in op.responses.iter_mut() {
            if let ResponseOrRef::Response(response) = response {
                let base = format!("{op_name}_Response_{code}");
                for media in response.content.values_mut() {
                    if let Some(schema) = &mut media.schema {
                        self.visit(&base, schema, Site::Nested);
                    }
                }
            }
        }
    }

    /// Form bodies stay inline: their properties become form parameters.
    fn walk_content(&mut self, base: &str, content: &mut IndexMap<String, MediaType>) {
        for (media_type, media) in content.iter_mut() {
            let Some(schema) = &mut media.schema else {
                continue;
            };
            if is_form_media_type(media_type) {
                if let SchemaOrRef::Schema(schema) = schema {
                    self.walk_model(base, schema);
                }
            } else {
                self.visit(base, schema, Site::Nested);
            }
        }
    }

    fn visit(&mut self, base: &str, node: &mut SchemaOrRef, site: Site) {
        let SchemaOrRef::Schema(schema) = node else {
            return;
        };
        if !self.should_hoist(schema, site) {
            self.walk_containers(base, schema);
            return;
        }

        let candidate = self.candidate_name(base);
        let mut hoisted = std::mem::take(schema.as_mut());
        self.walk_model(&candidate, &mut hoisted);
        let name = self.register(candidate, hoisted);
        *node = SchemaOrRef::reference(schema_ref(&name));
    }

    fn should_hoist(&self, schema: &Schema, site: Site) -> bool {
        if schema.is_map() {
            return false;
        }
        let single_ref_alias = matches!(schema.all_of.as_slice(), [single] if single.ref_path().is_some())
            && schema.properties.is_empty()
            && schema.one_of.is_empty()
            && schema.any_of.is_empty();
        if schema.is_object_like() && !single_ref_alias {
            return true;
        }
        site == Site::Property && self.resolve_enums && schema.is_enum() && !schema.is_array()
    }

    /// The mapped or derived name, with a numeric suffix when taken.
    fn candidate_name(&self, base: &str) -> String {
        let derived = camelize(base, false);
        let name = self
            .name_mapping
            .get(&derived)
            .cloned()
            .unwrap_or(derived);
        if !self.used_names.contains(&name) {
            return name;
        }
        (1..)
            .map(|i| format!("{name}{i}"))
            .find(|candidate| !self.used_names.contains(candidate))
            .unwrap_or(name)
    }

    /// Store a hoisted schema, or return the name of an identical one.
    fn register(&mut self, name: String, schema: Schema) -> String {
        let schema = SchemaOrRef::Schema(Box::new(schema));
        if self.reuse
            && let Some((existing, _)) = self.hoisted.iter().find(|(_, s)| **s == schema)
        {
            return existing.clone();
        }
        self.used_names.insert(name.clone());
        self.hoisted.insert(name.clone(), schema);
        name
    }
}

/// Run the resolver over a normalized document.
pub fn resolve_inline_models(spec: &mut OpenApiSpec, ctx: &Context) {
    InlineModelResolver::new(ctx, spec).flatten(spec);
}
