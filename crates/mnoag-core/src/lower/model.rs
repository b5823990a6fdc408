//! Component schemas to [`Model`]s: properties, enums, discriminators,
//! `oneOf` interfaces and the fold over `allOf` parent chains.

use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;
use serde_json::{Number, Value};

use super::annotations::annotate_property;
use crate::config::GeneratorLanguage;
use crate::context::Context;
use crate::defaults::{DefaultRenderer, DefaultSite, enum_value_type, value_text};
use crate::dialect::{NumberKind, Scalar, escape_text};
use crate::error::LowerError;
use crate::naming::{camelize, lower_first, underscore};
use crate::parse::components::Components;
use crate::parse::refs::{RefIndex, parse_ref_name, schema_ref};
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType};
use crate::tir::{Constraints, Discriminator, EnumVar, MappedModel, Model, Property};
use crate::types::{ModelIndex, TypeDescriptor, TypeResolver, TypedBearer, primitive_override};

const DROPPED_IMPORTS: &[&str] = &["ApiModel", "ApiModelProperty"];

/// Own properties of a schema, including those of its inline `allOf`
/// members, with the union of their `required` lists.
#[derive(Default)]
struct Shape<'s> {
    properties: IndexMap<&'s str, &'s SchemaOrRef>,
    required: HashSet<&'s str>,
}

impl<'s> Shape<'s> {
    fn add(&mut self, schema: &'s Schema) {
        for (name, prop) in &schema.properties {
            self.properties.entry(name.as_str()).or_insert(prop);
        }
        self.required.extend(schema.required.iter().map(String::as_str));
        for member in &schema.all_of {
            if let SchemaOrRef::Schema(member) = member {
                self.add(member);
            }
        }
    }

    fn of(schema: &'s Schema) -> Self {
        let mut shape = Self::default();
        shape.add(schema);
        shape
    }
}

/// A model before the parent fold.
struct Lowered {
    model: Model,
    parent_key: Option<String>,
}

pub struct ModelLowering<'a> {
    ctx: &'a Context,
    index: RefIndex<'a>,
    models: &'a ModelIndex,
    types: TypeResolver<'a>,
    defaults: DefaultRenderer<'a>,
    /// Component key to the keys that reference it from `allOf`.
    children: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> ModelLowering<'a> {
    pub fn new(ctx: &'a Context, components: Option<&'a Components>, models: &'a ModelIndex) -> Self {
        let index = RefIndex::new(components);
        let mut children: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for (key, schema) in components.into_iter().flat_map(|c| c.schemas.iter()) {
            let Some(schema) = schema.as_schema() else {
                continue;
            };
            for ref_path in schema.all_of.iter().filter_map(SchemaOrRef::ref_path) {
                if let Ok(parent) = parse_ref_name(ref_path, "schemas") {
                    children.entry(parent).or_default().push(key.as_str());
                }
            }
        }
        Self {
            ctx,
            index,
            models,
            types: TypeResolver::new(ctx, index, models).with_binary_as_file(false),
            defaults: DefaultRenderer::new(ctx, index),
            children,
        }
    }

    /// Resolve `binary` schemas to the file type. Operation parameters and
    /// responses use this; model fields keep byte streams.
    pub fn with_binary_as_file(mut self, binary_as_file: bool) -> Self {
        self.types = self.types.with_binary_as_file(binary_as_file);
        self
    }

    /// Lower every component that needs a class, then link `oneOf`
    /// interfaces and fold parent chains.
    pub fn lower_all(&self) -> Result<Vec<Model>, LowerError> {
        let mut lowered = Vec::with_capacity(self.models.len());
        for key in self.models.keys() {
            let (_, schema) = self.index.schema(&schema_ref(key))?;
            lowered.push(self.lower_model(key, schema)?);
        }
        log::debug!("lowered {} models", lowered.len());
        link_one_of_interfaces(self.ctx, &mut lowered);
        fold_parents(self.ctx, &mut lowered)?;
        Ok(lowered.into_iter().map(|l| l.model).collect())
    }

    fn lower_model(&self, key: &str, schema: &'a Schema) -> Result<Lowered, LowerError> {
        let ctx = self.ctx;
        let classname = self
            .models
            .classname(key)
            .ok_or_else(|| LowerError::Consistency(format!("schema '{key}' has no class")))?
            .to_string();
        let mut model = Model {
            name: key.to_string(),
            class_var_name: lower_first(&classname),
            data_type: classname.clone(),
            classname,
            description: schema.description.clone(),
            title: schema.title.clone(),
            is_nullable: schema.is_nullable(),
            deprecated: schema.is_deprecated(),
            vendor_extensions: vendor_extensions(schema),
            ..Default::default()
        };
        model.facets.is_server = ctx.is_server();
        model.facets.generated_annotation = ctx.options.generated_annotation;
        model.facets.visitable = ctx.options.visitable;
        model.facets.use_enum_case_insensitive = ctx.options.use_enum_case_insensitive;

        if schema.is_enum() {
            self.lower_enum(&mut model, schema)?;
            return Ok(Lowered {
                model,
                parent_key: None,
            });
        }

        let parent_key = self.parent_key(schema)?;
        let mut shape = Shape::of(schema);
        for ref_path in schema.all_of.iter().filter_map(SchemaOrRef::ref_path) {
            let (target_key, target) = self.index.schema(ref_path)?;
            if parent_key.as_deref() != Some(target_key) {
                shape.add(target);
            }
        }

        model.is_one_of_interface = schema.extension_bool("x-is-one-of-interface")
            || (ctx.options.use_one_of_interfaces && !schema.one_of.is_empty());
        if model.is_one_of_interface {
            model
                .vendor_extensions
                .insert("x-is-one-of-interface".into(), Value::Bool(true));
        }
        model.one_of = self.member_types(&schema.one_of)?;
        model.any_of = self.member_types(&schema.any_of)?;

        for (base_name, prop_schema) in &shape.properties {
            let required = shape.required.contains(base_name);
            let prop = self.property(
                base_name,
                prop_schema,
                required,
                DefaultSite::Property,
                &mut model.imports,
            )?;
            model.vars.push(prop);
        }

        if let Some(discriminator) = &schema.discriminator {
            let discriminator =
                self.discriminator(key, schema, &discriminator.property_name, &discriminator.mapping)?;
            for var in &mut model.vars {
                if var.base_name == discriminator.property_base_name {
                    var.is_discriminator = true;
                }
            }
            model.facets.has_mapped_models = discriminator.has_mapped_models;
            model.facets.has_multiple_mapped_models = discriminator.has_multiple_mapped_models;
            model.discriminator = Some(discriminator);
        }

        model.facets.additional_type_annotations = if model.is_one_of_interface {
            ctx.options.additional_one_of_type_annotations.clone()
        } else {
            ctx.options.additional_model_type_annotations.clone()
        };
        model
            .imports
            .retain(|import| !DROPPED_IMPORTS.contains(&import.as_str()));
        let own = model.classname.clone();
        model.imports.remove(&own);
        Ok(Lowered { model, parent_key })
    }

    fn lower_enum(&self, model: &mut Model, schema: &Schema) -> Result<(), LowerError> {
        let ctx = self.ctx;
        let ty = self.types.resolve_schema(schema)?;
        TypedBearer::Model(model).apply(&ty);
        let value_type = primitive_override(schema, ctx.dialect.as_ref())
            .map(|over| over.data_type)
            .unwrap_or_else(|| enum_value_type(ctx, schema));
        model.is_enum = true;
        model.enum_vars = self.enum_vars(schema, &value_type);
        model.default_value = schema
            .default_value
            .as_ref()
            .and_then(|default| ctx.names.to_enum_var_name(Some(&value_text(default)), &value_type));
        model.enum_data_type = Some(value_type);
        model.imports.insert("Function".to_string());
        model.facets.additional_type_annotations = ctx.options.additional_enum_type_annotations.clone();
        Ok(())
    }

    /// The `allOf` reference a model extends: the only model reference, or
    /// the one carrying a discriminator.
    fn parent_key(&self, schema: &Schema) -> Result<Option<String>, LowerError> {
        let mut candidates = Vec::new();
        for ref_path in schema.all_of.iter().filter_map(SchemaOrRef::ref_path) {
            let (key, target) = self.index.schema(ref_path)?;
            if self.models.get(key).is_some_and(|entry| !entry.is_enum) {
                candidates.push((key, target.discriminator.is_some()));
            }
        }
        let parent = match candidates.as_slice() {
            [(key, _)] => Some(*key),
            many => many
                .iter()
                .find(|(_, has_discriminator)| *has_discriminator)
                .map(|(key, _)| *key),
        };
        Ok(parent.map(str::to_string))
    }

    fn member_types(&self, members: &[SchemaOrRef]) -> Result<Vec<String>, LowerError> {
        members
            .iter()
            .map(|member| self.types.resolve(member).map(|ty| ty.data_type))
            .collect()
    }

    /// Constants of an enum schema. Values without a legal constant name
    /// are skipped.
    pub(crate) fn enum_vars(&self, schema: &Schema, value_type: &str) -> Vec<EnumVar> {
        let ctx = self.ctx;
        let dialect = ctx.dialect.as_ref();
        let java = dialect.language() == GeneratorLanguage::Java;
        let scalar = primitive_override(schema, dialect).map(|over| over.scalar);
        let deprecated: Vec<String> = match schema.extension("x-deprecated") {
            Some(Value::Array(values)) => values.iter().map(value_text).collect(),
            Some(single) => vec![value_text(single)],
            None => Vec::new(),
        };
        let is_string = value_type == "String";

        let mut seen = HashSet::new();
        let mut vars = Vec::new();
        for value in schema.enum_values.iter().filter(|v| !v.is_null()) {
            let raw = value_text(value);
            let Some(name) = ctx.names.to_enum_var_name(Some(&raw), value_type) else {
                ctx.warn_once(&format!("enum-var:{raw}"), || {
                    format!("enum value '{raw}' has no constant name, skipping it")
                });
                continue;
            };
            if !seen.insert(name.clone()) {
                continue;
            }
            let literal = match scalar {
                Some(Scalar::Char) => format!("'{}'", escape_text(&raw)),
                Some(Scalar::Short) if java => format!("(short) {raw}"),
                Some(Scalar::Byte) if java => format!("(byte) {raw}"),
                _ if is_string => dialect.string_literal(&raw),
                _ => match NumberKind::of_type(value_type) {
                    Some(kind) => dialect.number_literal(&raw, kind),
                    None => raw.clone(),
                },
            };
            vars.push(EnumVar {
                name,
                value: literal,
                deprecated: deprecated.contains(&raw),
                raw_value: raw,
                is_string,
            });
        }
        vars
    }

    fn discriminator(
        &self,
        key: &str,
        schema: &'a Schema,
        property_base_name: &str,
        explicit: &IndexMap<String, String>,
    ) -> Result<Discriminator, LowerError> {
        let names = &self.ctx.names;
        let property_name = names.to_var_name(property_base_name)?;
        let mut result = Discriminator {
            property_base_name: property_base_name.to_string(),
            property_getter: names.getter(&property_name),
            property_name,
            ..Default::default()
        };

        let mut mapped_keys: Vec<&str> = Vec::new();
        for (value, target) in explicit {
            let target_key = if target.starts_with('#') {
                parse_ref_name(target, "schemas").ok()
            } else {
                Some(target.as_str())
            };
            match target_key.and_then(|k| self.models.classname(k).map(|c| (k, c))) {
                Some((target_key, classname)) => {
                    result.mapping.insert(value.clone(), classname.to_string());
                    result.mapped_models.push(MappedModel {
                        mapping_name: value.clone(),
                        model_name: classname.to_string(),
                    });
                    mapped_keys.push(target_key);
                }
                None => self.ctx.warn_once(&format!("discriminator:{key}:{target}"), || {
                    format!("discriminator of '{key}' maps '{value}' to missing schema '{target}'")
                }),
            }
        }

        let mut implicit: Vec<&str> = schema
            .one_of
            .iter()
            .filter_map(SchemaOrRef::ref_path)
            .filter_map(|r| parse_ref_name(r, "schemas").ok())
            .collect();
        implicit.extend(self.descendants(key));
        for implicit_key in implicit {
            let Some(classname) = self.models.classname(implicit_key) else {
                self.ctx.warn_once(&format!("discriminator:{key}:{implicit_key}"), || {
                    format!("discriminator of '{key}' refers to '{implicit_key}', which has no model")
                });
                continue;
            };
            if result.mapped_models.iter().any(|m| m.model_name == classname) {
                continue;
            }
            result.mapped_models.push(MappedModel {
                mapping_name: implicit_key.to_string(),
                model_name: classname.to_string(),
            });
            mapped_keys.push(implicit_key);
        }

        result.property_type = Some(self.discriminator_type(schema, property_base_name, &mapped_keys)?);
        result.has_mapped_models = !result.mapped_models.is_empty();
        result.has_multiple_mapped_models = result.mapped_models.len() > 1;
        Ok(result)
    }

    /// Every schema that extends `key`, directly or transitively.
    fn descendants(&self, key: &str) -> Vec<&'a str> {
        let mut found: Vec<&'a str> = Vec::new();
        let mut queue: Vec<&str> = vec![key];
        while let Some(current) = queue.pop() {
            for child in self.children.get(current).into_iter().flatten() {
                if *child != key && !found.contains(child) {
                    found.push(child);
                    queue.push(child);
                }
            }
        }
        found
    }

    /// Type of the discriminator property, taken from the first mapped
    /// schema that declares it.
    fn discriminator_type(
        &self,
        schema: &'a Schema,
        property: &str,
        mapped_keys: &[&str],
    ) -> Result<String, LowerError> {
        for mapped in mapped_keys {
            let (_, target) = self.index.schema(&schema_ref(mapped))?;
            if let Some(prop) = Shape::of(target).properties.get(property) {
                return Ok(self.types.resolve(prop)?.data_type);
            }
        }
        if let Some(prop) = Shape::of(schema).properties.get(property) {
            return Ok(self.types.resolve(prop)?.data_type);
        }
        Ok(self.ctx.mapped_type("string")?.to_string())
    }

    /// Lower one property, array item, map value or header. Imports of the
    /// resolved type are added to `imports`.
    pub(crate) fn property(
        &self,
        base_name: &str,
        schema: &SchemaOrRef,
        required: bool,
        site: DefaultSite,
        imports: &mut BTreeSet<String>,
    ) -> Result<Property, LowerError> {
        let ctx = self.ctx;
        let names = &ctx.names;
        let name = names.to_var_name(base_name)?;
        let mut ty = self.types.resolve(schema)?;
        let inline_enum = ty.most_inner_items().is_inline_enum;
        if inline_enum {
            ty.set_enum_name(&enum_name(&name));
        }
        imports.extend(ty.imports.iter().cloned());

        let (_, target) = self.index.deref_schema(schema)?;
        let described = if ty.is_model || ty.is_enum_ref {
            schema.as_schema()
        } else {
            Some(target)
        };

        let unescaped = names.normalize_dialect_specific(&name);
        let mut prop = Property {
            base_name: base_name.to_string(),
            real_name: base_name.to_string(),
            name_in_camel_case: camelize(&unescaped, false),
            name_in_snake_case: underscore(&unescaped),
            getter: names.getter(&name),
            setter: names.setter(&name),
            name,
            required,
            ..Default::default()
        };
        TypedBearer::Property(&mut prop).apply(&ty);
        prop.is_enum = inline_enum && ty.items.is_none();
        if let Some(source) = described {
            describe(&mut prop, source);
        }
        if let Some(items) = ty.items.as_deref() {
            let items = self.items_property(&prop.name, base_name, target, items)?;
            prop.items = Some(Box::new(items));
        }
        if inline_enum {
            prop.enum_vars = match prop.items.as_deref() {
                Some(items) => items.most_inner_items().enum_vars.clone(),
                None => self.enum_vars(target, &enum_value_type(ctx, target)),
            };
        }

        let defaults = self.defaults.render(schema, &ty, prop.is_nullable, site)?;
        prop.default_value = defaults.default;
        prop.default_value_init = defaults.init;

        prop.facets.in_required_args_constructor = !prop.is_read_only || ctx.is_server();
        prop.facets.is_server = ctx.is_server();
        prop.facets.lombok = ctx.options.lombok;
        prop.facets.default_value_is_not_null =
            prop.default_value.as_deref().is_some_and(|d| d != "null");
        prop.facets.with_valid = ctx.options.bean_validation
            && ((!prop.is_container && prop.is_model) || (prop.is_array && prop.refers_to_model()));
        annotate_property(ctx, &mut prop);
        Ok(prop)
    }

    fn items_property(
        &self,
        name: &str,
        base_name: &str,
        container: &Schema,
        ty: &TypeDescriptor,
    ) -> Result<Property, LowerError> {
        let items_schema = if container.is_array() {
            container.items.as_deref()
        } else {
            match &container.additional_properties {
                Some(AdditionalProperties::Schema(value)) => Some(&**value),
                _ => None,
            }
        };

        let mut prop = Property {
            name: name.to_string(),
            base_name: base_name.to_string(),
            real_name: base_name.to_string(),
            ..Default::default()
        };
        TypedBearer::Property(&mut prop).apply(ty);
        prop.is_enum = ty.is_inline_enum;

        let Some(items_schema) = items_schema else {
            return Ok(prop);
        };
        let (_, items) = self.index.deref_schema(items_schema)?;
        if !ty.is_model && !ty.is_enum_ref {
            describe(&mut prop, items);
            if ty.is_inline_enum {
                prop.enum_vars = self.enum_vars(items, &enum_value_type(self.ctx, items));
            }
        }
        if let Some(inner) = ty.items.as_deref() {
            let inner = self.items_property(name, base_name, items, inner)?;
            prop.items = Some(Box::new(inner));
        }
        Ok(prop)
    }
}

/// `status` → `StatusEnum`.
fn enum_name(var_name: &str) -> String {
    format!("{}Enum", camelize(&var_name.replace('`', ""), false))
}

pub(crate) fn vendor_extensions(schema: &Schema) -> IndexMap<String, Value> {
    schema
        .extensions
        .iter()
        .filter(|(key, _)| key.starts_with("x-"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Copy documentation, flags and validation keywords from a schema.
fn describe(prop: &mut Property, schema: &Schema) {
    prop.description = schema.description.clone();
    prop.title = schema.title.clone();
    prop.is_nullable = schema.is_nullable();
    prop.is_read_only = schema.is_read_only();
    prop.is_write_only = schema.write_only == Some(true);
    prop.deprecated = schema.is_deprecated();
    prop.example = schema.example.as_ref().map(value_text);
    prop.constraints = constraints(schema);
    prop.vendor_extensions = vendor_extensions(schema);
    if prop.flags.is_date || prop.flags.is_date_time {
        prop.format_pattern = prop.constraints.pattern.take();
    }
}

pub(crate) fn constraints(schema: &Schema) -> Constraints {
    let integral = schema.is_type(SchemaType::Integer);
    let bound = |inclusive: &Option<Number>, exclusive: &Option<Value>| {
        let value = inclusive.as_ref().or(match exclusive {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        })?;
        Some(bound_text(value, integral))
    };
    Constraints {
        pattern: schema.pattern.clone(),
        min_length: schema.min_length,
        max_length: schema.max_length,
        minimum: bound(&schema.minimum, &schema.exclusive_minimum),
        maximum: bound(&schema.maximum, &schema.exclusive_maximum),
        exclusive_minimum: schema.exclusive_minimum(),
        exclusive_maximum: schema.exclusive_maximum(),
        min_items: schema.min_items,
        max_items: schema.max_items,
    }
}

/// Integers keep their exact text; whole floats lose the fraction.
fn bound_text(value: &Number, integral: bool) -> String {
    if value.is_u64() || value.is_i64() {
        return value.to_string();
    }
    match value.as_f64() {
        Some(v) if integral => format!("{}", v.trunc()),
        Some(v) => format!("{v}"),
        None => value.to_string(),
    }
}

/// Record `x-implements` on every member of a `oneOf` interface and turn
/// its discriminator property into a required, non-null override.
fn link_one_of_interfaces(ctx: &Context, lowered: &mut [Lowered]) {
    let interfaces: Vec<(String, Vec<String>, Option<Discriminator>)> = lowered
        .iter()
        .map(|l| &l.model)
        .filter(|m| m.is_one_of_interface)
        .map(|m| {
            let mut members = m.one_of.clone();
            for mapped in m.discriminator.iter().flat_map(|d| &d.mapped_models) {
                if !members.contains(&mapped.model_name) {
                    members.push(mapped.model_name.clone());
                }
            }
            (m.classname.clone(), members, m.discriminator.clone())
        })
        .collect();

    for (interface, members, discriminator) in &interfaces {
        for model in lowered.iter_mut().map(|l| &mut l.model) {
            if model.classname == *interface || !members.contains(&model.classname) {
                continue;
            }
            if !model.facets.x_implements.contains(interface) {
                model.facets.x_implements.push(interface.clone());
                model.interfaces.push(interface.clone());
            }
            let Some(discriminator) = discriminator else {
                continue;
            };
            for var in model
                .vars
                .iter_mut()
                .filter(|v| v.base_name == discriminator.property_base_name)
            {
                mark_discriminator(ctx, var, discriminator);
            }
        }
    }

    for model in lowered.iter_mut().map(|l| &mut l.model) {
        if model.facets.x_implements.is_empty() {
            continue;
        }
        let implements = model.facets.x_implements.clone();
        model.vendor_extensions.insert(
            "x-implements".into(),
            Value::Array(implements.iter().cloned().map(Value::String).collect()),
        );
        for var in &mut model.vars {
            var.facets.x_implements = implements.clone();
        }
    }
}

fn mark_discriminator(ctx: &Context, var: &mut Property, discriminator: &Discriminator) {
    var.is_discriminator = true;
    var.is_overridden = true;
    var.required = true;
    var.is_nullable = false;
    var.is_read_only = false;
    var.facets.in_required_args_constructor = true;
    if ctx.dialect.language() == GeneratorLanguage::Kotlin
        && let Some(property_type) = &discriminator.property_type
    {
        var.facets.type_with_enum_with_generic_annotations = property_type.clone();
    }
}

/// What a child reads from its already folded parent.
struct ParentView {
    key: String,
    classname: String,
    all_vars: Vec<Property>,
    required_vars_without_discriminator: Vec<Property>,
    required_args: Vec<Property>,
    inherited_args: Vec<Property>,
}

/// Fold parent chains over the arena of lowered models, parents first.
fn fold_parents(ctx: &Context, lowered: &mut [Lowered]) -> Result<(), LowerError> {
    let position: HashMap<String, usize> = lowered
        .iter()
        .enumerate()
        .map(|(i, l)| (l.model.name.clone(), i))
        .collect();
    let mut parents: Vec<Option<usize>> = lowered
        .iter()
        .map(|l| l.parent_key.as_ref().and_then(|k| position.get(k).copied()))
        .collect();

    let mut lifted = vec![false; lowered.len()];
    for i in 0..lowered.len() {
        let Some(p) = parents[i] else {
            continue;
        };
        if !lowered[p].model.is_one_of_interface {
            continue;
        }
        let interface = lowered[p].model.classname.clone();
        let interface_vars = lowered[p].model.vars.clone();
        let discriminator = lowered[p].model.discriminator.clone();
        let model = &mut lowered[i].model;
        for mut var in interface_vars {
            if model.var(&var.name).is_some() {
                continue;
            }
            if let Some(discriminator) = &discriminator
                && discriminator.property_name == var.name
            {
                var.is_discriminator = true;
                var.is_overridden = true;
            }
            model.vars.push(var);
        }
        if !model.facets.x_implements.contains(&interface) {
            model.facets.x_implements.push(interface.clone());
            model.interfaces.push(interface);
        }
        parents[i] = None;
        lifted[i] = true;
    }

    let order = parent_first_order(&parents, lowered)?;
    let mut inherited_args: Vec<Vec<Property>> = vec![Vec::new(); lowered.len()];
    for i in order {
        let parent = parents[i].map(|p| {
            let m = &lowered[p].model;
            ParentView {
                key: m.name.clone(),
                classname: m.classname.clone(),
                all_vars: m.all_vars.clone(),
                required_vars_without_discriminator: m.required_vars_without_discriminator.clone(),
                required_args: m.required_args.clone(),
                inherited_args: inherited_args[p].clone(),
            }
        });
        let own_args = fold_one(ctx, &mut lowered[i].model, parent.as_ref(), lifted[i]);
        let mut inherited = parent.map(|p| p.inherited_args).unwrap_or_default();
        for arg in own_args {
            if !contains(&inherited, &arg) {
                inherited.push(arg);
            }
        }
        inherited_args[i] = inherited;
    }
    Ok(())
}

/// Indices ordered so every parent precedes its children. A cycle in the
/// chain is a consistency error.
fn parent_first_order(parents: &[Option<usize>], lowered: &[Lowered]) -> Result<Vec<usize>, LowerError> {
    let mut depth: Vec<Option<usize>> = vec![None; parents.len()];
    for start in 0..parents.len() {
        let mut chain = Vec::new();
        let mut current = Some(start);
        let mut base = 0;
        while let Some(i) = current {
            if let Some(d) = depth[i] {
                base = d + 1;
                break;
            }
            if chain.contains(&i) {
                return Err(LowerError::Consistency(format!(
                    "inheritance cycle through '{}'",
                    lowered[i].model.classname
                )));
            }
            chain.push(i);
            current = parents[i];
        }
        for (offset, &i) in chain.iter().rev().enumerate() {
            depth[i] = Some(base + offset);
        }
    }
    let mut order: Vec<usize> = (0..parents.len()).collect();
    order.sort_by_key(|&i| depth[i]);
    Ok(order)
}

fn contains(props: &[Property], prop: &Property) -> bool {
    props.iter().any(|p| p.name == prop.name)
}

/// Derive the variable lists of one model from its own vars and its
/// parent. Returns the model's own constructor arguments.
fn fold_one(
    ctx: &Context,
    model: &mut Model,
    parent: Option<&ParentView>,
    lifted_from_interface: bool,
) -> Vec<Property> {
    let mut all_vars = parent.map(|p| p.all_vars.clone()).unwrap_or_default();
    for var in &model.vars {
        match all_vars.iter().position(|v| v.name == var.name) {
            Some(pos) => all_vars[pos] = var.clone(),
            None => all_vars.push(var.clone()),
        }
    }
    model.all_vars = all_vars;
    model.parent_vars = parent.map(|p| p.all_vars.clone()).unwrap_or_default();

    let filtered = |pred: &dyn Fn(&Property) -> bool| -> Vec<Property> {
        model.vars.iter().filter(|v| pred(v)).cloned().collect()
    };
    model.required_vars = filtered(&|v| v.required);
    model.optional_vars = filtered(&|v| !v.required);
    model.read_only_vars = filtered(&|v| v.is_read_only);
    model.read_write_vars = filtered(&|v| !v.is_read_only);

    let inherited_discriminator = |v: &Property| {
        parent.is_some_and(|p| {
            p.all_vars
                .iter()
                .any(|pv| pv.required && pv.name == v.name && pv.is_discriminator)
        })
    };
    let own_required: Vec<Property> = model
        .required_vars
        .iter()
        .filter(|v| lifted_from_interface || !(v.is_discriminator || inherited_discriminator(v)))
        .cloned()
        .collect();

    let mut without_discriminator = own_required.clone();
    if let Some(p) = parent {
        for v in &p.required_vars_without_discriminator {
            if !contains(&without_discriminator, v) {
                without_discriminator.push(v.clone());
            }
        }
    }
    model.required_parent_vars_without_discriminator = parent
        .map(|p| {
            p.required_vars_without_discriminator
                .iter()
                .cloned()
                .map(|mut v| {
                    v.facets.is_server_or_not_read_only = Some(!v.is_read_only || ctx.is_server());
                    v
                })
                .collect()
        })
        .unwrap_or_default();

    let own_args: Vec<Property> = own_required
        .into_iter()
        .filter(|v| v.facets.in_required_args_constructor)
        .collect();
    let mut required_args = own_args.clone();
    if let Some(p) = parent {
        for v in &p.inherited_args {
            if !contains(&required_args, v) {
                required_args.push(v.clone());
            }
        }
    }
    model.required_args = required_args;
    model.parent_required_args = parent.map(|p| p.required_args.clone()).unwrap_or_default();

    if let Some(p) = parent {
        model.parent = Some(p.classname.clone());
        model.parent_schema = Some(p.key.clone());
        model.imports.insert(p.classname.clone());
    }

    model.facets.has_own_vars = !model.vars.is_empty();
    model.facets.with_multiple_vars = model.vars.len() > 1;
    model.facets.with_required_vars = !model.required_vars.is_empty();
    model.facets.are_required_vars_and_read_only_vars =
        !without_discriminator.is_empty() && !model.read_only_vars.is_empty();
    model.has_vars = !without_discriminator.is_empty() || !model.vars.is_empty();
    model.required_vars_without_discriminator = without_discriminator;

    ctx.record_constructor(
        &model.classname,
        model.required_args.iter().map(|v| v.name.clone()).collect(),
    );
    own_args
}
