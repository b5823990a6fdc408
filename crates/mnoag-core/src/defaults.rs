//! Initializer, default and example expressions in the target language.

use chrono::{DateTime, Local, NaiveDate};
use indexmap::IndexMap;
use serde_json::Value;

use crate::config::GeneratorLanguage;
use crate::context::Context;
use crate::dialect::{NumberKind, escape_text};
use crate::error::LowerError;
use crate::parse::refs::RefIndex;
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};
use crate::tir::{Parameter, Property};
use crate::types::TypeDescriptor;

/// `init` is the expression assigned to the field, `default` the literal's
/// plain form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultPair {
    pub init: Option<String>,
    pub default: Option<String>,
}

impl DefaultPair {
    fn new(init: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            init: Some(init.into()),
            default: Some(default.into()),
        }
    }

    fn init_only(init: String) -> Self {
        Self {
            init: Some(init),
            default: None,
        }
    }
}

/// Where a default is rendered. Parameters keep array defaults as JSON and
/// only wrap referenced enums in `fromValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSite {
    Property,
    Parameter,
}

/// Plain text of a JSON value: strings unquoted, everything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Type used to name the constants of an enum schema.
pub fn enum_value_type(ctx: &Context, schema: &Schema) -> String {
    let format = schema.format.as_deref().unwrap_or_default();
    let key = match schema.primary_type() {
        Some(SchemaType::Integer) if format == "int64" => "long",
        Some(SchemaType::Integer) => "integer",
        Some(SchemaType::Number) => match format {
            "float" => "float",
            "double" => "double",
            _ => "number",
        },
        Some(SchemaType::Boolean) => "boolean",
        _ => "string",
    };
    ctx.mapped_type(key)
        .map(str::to_string)
        .unwrap_or_else(|_| "String".to_string())
}

pub struct DefaultRenderer<'a> {
    ctx: &'a Context,
    index: RefIndex<'a>,
}

impl<'a> DefaultRenderer<'a> {
    pub fn new(ctx: &'a Context, index: RefIndex<'a>) -> Self {
        Self { ctx, index }
    }

    /// Render the default of `schema`, already resolved to `ty`. Inline enum
    /// names must be attached to `ty` before calling.
    pub fn render(
        &self,
        schema: &SchemaOrRef,
        ty: &TypeDescriptor,
        nullable: bool,
        site: DefaultSite,
    ) -> Result<DefaultPair, LowerError> {
        let (_, schema) = self.index.deref_schema(schema)?;
        if ty.is_array {
            return self.array(schema, ty, nullable, site);
        }
        if ty.is_map {
            if nullable || self.ctx.options.container_default_to_null {
                return Ok(DefaultPair::default());
            }
            return Ok(DefaultPair::init_only(self.ctx.dialect.empty_map_init()));
        }
        let Some(default) = &schema.default_value else {
            return Ok(DefaultPair::default());
        };
        if ty.is_enum_ref || schema.is_enum() {
            // `allOf: [$ref]` next to a `default` names the enum it belongs to.
            let enum_schema = match schema.all_of.iter().find_map(SchemaOrRef::ref_path) {
                Some(ref_path) if !schema.is_enum() => self.index.schema(ref_path)?.1,
                _ => schema,
            };
            return Ok(self.enum_default(enum_schema, ty, default, site));
        }
        Ok(self.scalar(ty, default))
    }

    fn array(
        &self,
        schema: &Schema,
        ty: &TypeDescriptor,
        nullable: bool,
        site: DefaultSite,
    ) -> Result<DefaultPair, LowerError> {
        let dialect = self.ctx.dialect.as_ref();
        let empty = DefaultPair::init_only(dialect.collection_init(ty.unique_items, None));
        let Some(default) = &schema.default_value else {
            if nullable || self.ctx.options.container_default_to_null {
                return Ok(DefaultPair::default());
            }
            return Ok(empty);
        };
        let raw_values: Vec<&Value> = match default {
            Value::Array(values) if values.is_empty() => return Ok(empty),
            Value::Array(values) => values.iter().collect(),
            single => vec![single],
        };
        let Some(items) = ty.items.as_deref() else {
            return Ok(empty);
        };

        let rendered: Vec<String> = if items.is_enum_ref || items.is_inline_enum {
            let value_type = match schema.items.as_deref() {
                Some(items_schema) => {
                    let (_, items_schema) = self.index.deref_schema(items_schema)?;
                    enum_value_type(self.ctx, items_schema)
                }
                None => items.data_type.clone(),
            };
            raw_values
                .iter()
                .map(|value| {
                    let text = value_text(value);
                    match self.ctx.names.to_enum_var_name(Some(&text), &value_type) {
                        Some(var) => format!("{}.{var}", items.datatype_with_enum),
                        None => "null".to_string(),
                    }
                })
                .collect()
        } else if items.flags.is_string || items.data_type == "String" {
            raw_values
                .iter()
                .map(|value| dialect.string_literal(&value_text(value)))
                .collect()
        } else if let Some(kind) = NumberKind::of_type(&items.data_type) {
            raw_values
                .iter()
                .map(|value| dialect.number_literal(&value_text(value), kind))
                .collect()
        } else {
            raw_values.iter().map(|value| value_text(value)).collect()
        };

        let joined = rendered.join(", ");
        let init = dialect.collection_init(ty.unique_items, Some(&joined));
        let default = match site {
            DefaultSite::Property => joined,
            DefaultSite::Parameter => {
                Value::Array(raw_values.into_iter().cloned().collect()).to_string()
            }
        };
        Ok(DefaultPair::new(init, default))
    }

    fn enum_default(
        &self,
        schema: &Schema,
        ty: &TypeDescriptor,
        default: &Value,
        site: DefaultSite,
    ) -> DefaultPair {
        let raw = value_text(default);
        let literal = if default.is_string() {
            self.ctx.dialect.string_literal(&raw)
        } else {
            raw.clone()
        };
        match site {
            DefaultSite::Parameter if ty.is_enum_ref => {
                DefaultPair::new(format!("{}.fromValue({literal})", ty.data_type), raw)
            }
            DefaultSite::Parameter => DefaultPair::new(literal, raw),
            DefaultSite::Property => {
                let value_type = enum_value_type(self.ctx, schema);
                let known = schema.enum_values.contains(default);
                let var = self.ctx.names.to_enum_var_name(Some(&raw), &value_type);
                let init = match var {
                    Some(var) if known => format!("{}.{var}", ty.datatype_with_enum),
                    _ => format!("{}.fromValue({literal})", ty.datatype_with_enum),
                };
                DefaultPair::new(init, raw)
            }
        }
    }

    fn scalar(&self, ty: &TypeDescriptor, default: &Value) -> DefaultPair {
        let dialect = self.ctx.dialect.as_ref();
        let raw = value_text(default);
        let flags = &ty.flags;
        let kotlin = dialect.language() == GeneratorLanguage::Kotlin;

        if flags.is_char {
            let ch = raw.chars().next().map(String::from).unwrap_or_default();
            return DefaultPair::new(format!("'{}'", escape_text(&ch)), ch);
        }
        if flags.is_boolean {
            return DefaultPair::new(raw.clone(), raw);
        }
        if let Some(kind) = NumberKind::of_type(&ty.data_type) {
            return DefaultPair::new(dialect.number_literal(&raw, kind), raw);
        }
        if flags.is_uri {
            return DefaultPair::new(dialect.uri_literal(&raw), raw);
        }
        if flags.is_uuid {
            return DefaultPair::new(dialect.uuid_literal(&raw), raw);
        }
        if flags.is_date {
            if kotlin {
                return DefaultPair::default();
            }
            return match parse_local_date(&raw) {
                Some(date) => {
                    let iso = date.format("%Y-%m-%d").to_string();
                    DefaultPair::new(dialect.local_date_literal(&iso), iso)
                }
                None => {
                    self.warn_unparsable(&raw, "date");
                    DefaultPair::default()
                }
            };
        }
        if flags.is_date_time {
            if kotlin {
                return DefaultPair::default();
            }
            return match DateTime::parse_from_rfc3339(&raw) {
                Ok(parsed) => {
                    let local = parsed.with_timezone(&Local).to_rfc3339();
                    DefaultPair::new(dialect.date_time_literal(&local), raw)
                }
                Err(_) => {
                    self.warn_unparsable(&raw, "date-time");
                    DefaultPair::default()
                }
            };
        }
        if flags.is_string || ty.data_type == "String" {
            return DefaultPair::new(dialect.string_literal(&raw), escape_text(&raw));
        }
        DefaultPair::default()
    }

    fn warn_unparsable(&self, raw: &str, kind: &str) {
        self.ctx.warn_once(&format!("default:{kind}:{raw}"), || {
            format!("ignoring default '{raw}': not a valid {kind}")
        });
    }
}

/// Read a `date` default. Date-time strings are moved to the local zone
/// first.
fn parse_local_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}

/// What an example is rendered from.
#[derive(Debug, Clone, Default)]
pub struct ExampleInput<'a> {
    pub default_value: Option<&'a str>,
    pub example: Option<&'a str>,
    pub data_type: &'a str,
    pub is_model: bool,
    pub allowable_values: &'a [String],
    pub items_type: Option<&'a str>,
    pub items_example: Option<&'a str>,
    /// Property examples qualify model names with their package.
    pub is_property: bool,
}

/// Renders example expressions for tests and documentation. `groovy`
/// selects the Spock flavour.
pub struct ExampleRenderer<'a> {
    ctx: &'a Context,
    required_vars: &'a IndexMap<String, Vec<Property>>,
}

const MAX_EXAMPLE_DEPTH: usize = 4;

impl<'a> ExampleRenderer<'a> {
    /// `required_vars` maps model class names to their required properties.
    pub fn new(ctx: &'a Context, required_vars: &'a IndexMap<String, Vec<Property>>) -> Self {
        Self { ctx, required_vars }
    }

    pub fn example(&self, input: &ExampleInput<'_>, groovy: bool) -> String {
        self.render(input, groovy, 0)
    }

    pub fn property_example(&self, prop: &Property, groovy: bool) -> String {
        self.property_at(prop, groovy, 0)
    }

    pub fn parameter_example(&self, param: &Parameter, groovy: bool) -> String {
        let input = ExampleInput {
            default_value: param.default_value.as_deref(),
            example: param.example.as_deref(),
            data_type: &param.data_type,
            is_model: param.is_model,
            allowable_values: &param.allowable_values,
            items_type: param.items.as_deref().map(|i| i.data_type.as_str()),
            items_example: param
                .items
                .as_deref()
                .and_then(|i| i.default_value.as_deref()),
            is_property: false,
        };
        self.render(&input, groovy, 0)
    }

    fn property_at(&self, prop: &Property, groovy: bool, depth: usize) -> String {
        let allowable: Vec<String> = prop.enum_vars.iter().map(|v| v.raw_value.clone()).collect();
        let input = ExampleInput {
            default_value: prop.default_value.as_deref(),
            example: prop.example.as_deref(),
            data_type: &prop.data_type,
            is_model: prop.is_model,
            allowable_values: &allowable,
            items_type: prop.items.as_deref().map(|i| i.data_type.as_str()),
            items_example: prop
                .items
                .as_deref()
                .and_then(|i| i.default_value.as_deref()),
            is_property: true,
        };
        self.render(&input, groovy, depth)
    }

    fn render(&self, input: &ExampleInput<'_>, groovy: bool, depth: usize) -> String {
        let dialect = self.ctx.dialect.as_ref();
        let example = input.default_value.or(input.example);
        let data_type = input.data_type;
        let container = data_type.split('<').next().unwrap_or(data_type);

        let mut value: Option<String> = match data_type {
            "String" => Some(quote(example.unwrap_or("example"), groovy)),
            "File" | "java.io.File" => None,
            "Integer" | "Int" | "Short" => Some(example.unwrap_or("56").to_string()),
            "Long" => Some(append_suffix(example.unwrap_or("56"), 'L')),
            "Float" => Some(append_suffix(example.unwrap_or("3.4"), 'F')),
            "Double" => Some(append_suffix(example.unwrap_or("3.4"), 'D')),
            "Boolean" => Some(example.unwrap_or("false").to_string()),
            other => match dialect.scalar_example(other) {
                Some(fixed) => Some(fixed.to_string()),
                None => self.complex(input, example, groovy, depth),
            },
        };

        match container {
            "List" => {
                let inner = match input.items_type {
                    Some("String") => quote(input.items_example.unwrap_or("example"), groovy),
                    _ => input.items_example.unwrap_or_default().to_string(),
                };
                value = Some(if groovy {
                    format!("[{inner}]")
                } else {
                    dialect.list_example(&inner, input.items_type)
                });
            }
            "Set" => {
                value = Some(if groovy {
                    "[].asSet()".to_string()
                } else {
                    dialect.set_example()
                });
            }
            "Map" => {
                value = Some(if groovy {
                    "[:]".to_string()
                } else {
                    dialect.map_example()
                });
            }
            _ => {}
        }
        value.unwrap_or_else(|| "null".to_string())
    }

    /// Enums and models.
    fn complex(
        &self,
        input: &ExampleInput<'_>,
        example: Option<&str>,
        groovy: bool,
        depth: usize,
    ) -> Option<String> {
        if let Some(first) = input.allowable_values.first() {
            let value = example
                .filter(|e| input.allowable_values.iter().any(|v| v == e))
                .unwrap_or(first);
            return Some(format!(
                "{}.fromValue(\"{}\")",
                self.type_reference(input),
                escape_text(value)
            ));
        }
        if !input.is_model {
            return example.map(str::to_string);
        }
        let required = self.required_vars.get(input.data_type)?;
        let dialect = self.ctx.dialect.as_ref();
        if !self.ctx.options.required_properties_in_constructor {
            return Some(dialect.instantiate(input.data_type, ""));
        }
        if depth >= MAX_EXAMPLE_DEPTH {
            return Some("null".to_string());
        }
        let args: Vec<String> = required
            .iter()
            .map(|prop| self.property_at(prop, groovy, depth + 1))
            .collect();
        Some(dialect.instantiate(&self.type_reference(input), &args.join(", ")))
    }

    fn type_reference(&self, input: &ExampleInput<'_>) -> String {
        if input.is_property {
            self.ctx.qualified_model_name(input.data_type)
        } else {
            input.data_type.to_string()
        }
    }
}

fn quote(raw: &str, groovy: bool) -> String {
    if groovy {
        format!("'{}'", escape_text(raw).replace('\'', "\""))
    } else {
        format!("\"{}\"", escape_text(raw))
    }
}

fn append_suffix(raw: &str, suffix: char) -> String {
    if raw
        .chars()
        .last()
        .is_some_and(|c| c.eq_ignore_ascii_case(&suffix))
    {
        raw.to_string()
    } else {
        format!("{raw}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorOptions;
    use crate::parse::components::Components;
    use crate::parse::refs::schema_ref;
    use crate::tir::EnumVar;
    use crate::types::{ModelIndex, TypeResolver};

    fn ctx(options: GeneratorOptions) -> Context {
        Context::new(options).unwrap()
    }

    fn render(
        ctx: &Context,
        components: Option<&Components>,
        schema: SchemaOrRef,
        nullable: bool,
        site: DefaultSite,
    ) -> DefaultPair {
        let models = ModelIndex::build(ctx, components).unwrap();
        let index = RefIndex::new(components);
        let mut ty = TypeResolver::new(ctx, index, &models)
            .with_binary_as_file(false)
            .resolve(&schema)
            .unwrap();
        if ty.most_inner_items().is_inline_enum {
            ty.set_enum_name("StatusEnum");
        }
        DefaultRenderer::new(ctx, index)
            .render(&schema, &ty, nullable, site)
            .unwrap()
    }

    fn status_components() -> Components {
        let mut c = Components::default();
        let mut status = Schema::of_type(SchemaType::String);
        status.enum_values = vec!["available".into(), "sold".into()];
        c.schemas.insert("PetStatus".into(), status.into());
        c
    }

    fn status_array(default: Option<Value>) -> Schema {
        Schema {
            items: Some(Box::new(SchemaOrRef::reference(schema_ref("PetStatus")))),
            default_value: default,
            ..Schema::of_type(SchemaType::Array)
        }
    }

    #[test]
    fn test_array_without_default() {
        let ctx = ctx(GeneratorOptions::default());
        let c = status_components();
        let pair = render(&ctx, Some(&c), status_array(None).into(), false, DefaultSite::Property);
        assert_eq!(pair.init.as_deref(), Some("new ArrayList<>()"));
        assert_eq!(pair.default, None);

        let pair = render(&ctx, Some(&c), status_array(None).into(), true, DefaultSite::Property);
        assert_eq!(pair, DefaultPair::default());

        let mut options = GeneratorOptions::default();
        options.container_default_to_null = true;
        let ctx = Context::new(options).unwrap();
        let pair = render(&ctx, Some(&c), status_array(None).into(), false, DefaultSite::Property);
        assert_eq!(pair, DefaultPair::default());
    }

    #[test]
    fn test_enum_array_default() {
        let ctx = ctx(GeneratorOptions::default());
        let c = status_components();
        let schema = status_array(Some(serde_json::json!(["available"])));
        let pair = render(&ctx, Some(&c), schema.clone().into(), false, DefaultSite::Property);
        assert_eq!(
            pair.init.as_deref(),
            Some("new ArrayList<>(Arrays.asList(PetStatus.AVAILABLE))")
        );
        assert_eq!(pair.default.as_deref(), Some("PetStatus.AVAILABLE"));

        let pair = render(&ctx, Some(&c), schema.into(), false, DefaultSite::Parameter);
        assert_eq!(pair.default.as_deref(), Some(r#"["available"]"#));
    }

    #[test]
    fn test_kotlin_array_default() {
        let ctx = ctx(GeneratorOptions::kotlin_server());
        let schema = Schema {
            items: Some(Box::new(Schema::of_type(SchemaType::String).into())),
            default_value: Some(serde_json::json!(["a", "b"])),
            ..Schema::of_type(SchemaType::Array)
        };
        let pair = render(&ctx, None, schema.into(), false, DefaultSite::Property);
        assert_eq!(pair.init.as_deref(), Some(r#"arrayListOf("a", "b")"#));
    }

    #[test]
    fn test_numeric_array_items_get_suffixes() {
        let ctx = ctx(GeneratorOptions::default());
        let schema = Schema {
            items: Some(Box::new(
                Schema {
                    format: Some("int64".into()),
                    ..Schema::of_type(SchemaType::Integer)
                }
                .into(),
            )),
            default_value: Some(serde_json::json!([1, 2])),
            unique_items: Some(true),
            ..Schema::of_type(SchemaType::Array)
        };
        let pair = render(&ctx, None, schema.into(), false, DefaultSite::Property);
        assert_eq!(
            pair.init.as_deref(),
            Some("new LinkedHashSet<>(Arrays.asList(1L, 2L))")
        );
        assert_eq!(pair.default.as_deref(), Some("1L, 2L"));
    }

    #[test]
    fn test_scalar_defaults() {
        let ctx = ctx(GeneratorOptions::default());
        let with_default = |schema_type, format: Option<&str>, default: Value| -> SchemaOrRef {
            Schema {
                format: format.map(str::to_string),
                default_value: Some(default),
                ..Schema::of_type(schema_type)
            }
            .into()
        };

        let pair = render(
            &ctx,
            None,
            with_default(SchemaType::Integer, Some("int64"), 5.into()),
            false,
            DefaultSite::Property,
        );
        assert_eq!(pair, DefaultPair::new("5L", "5"));

        let pair = render(
            &ctx,
            None,
            with_default(SchemaType::Number, Some("float"), 1.5.into()),
            false,
            DefaultSite::Property,
        );
        assert_eq!(pair.init.as_deref(), Some("1.5F"));

        let pair = render(
            &ctx,
            None,
            with_default(SchemaType::Number, None, 2.into()),
            false,
            DefaultSite::Property,
        );
        assert_eq!(pair.init.as_deref(), Some("new BigDecimal(\"2\")"));

        let pair = render(
            &ctx,
            None,
            with_default(SchemaType::String, None, "say \"hi\"".into()),
            false,
            DefaultSite::Property,
        );
        assert_eq!(pair.init.as_deref(), Some(r#""say \"hi\"""#));

        let pair = render(
            &ctx,
            None,
            with_default(SchemaType::String, Some("uri"), "http://x".into()),
            false,
            DefaultSite::Property,
        );
        assert_eq!(pair.init.as_deref(), Some("URI.create(\"http://x\")"));

        let pair = render(
            &ctx,
            None,
            with_default(SchemaType::String, Some("date"), "2024-01-02".into()),
            false,
            DefaultSite::Property,
        );
        assert_eq!(pair, DefaultPair::new("LocalDate.parse(\"2024-01-02\")", "2024-01-02"));

        let pair = render(
            &ctx,
            None,
            with_default(
                SchemaType::String,
                Some("date-time"),
                "2024-01-02T10:00:00Z".into(),
            ),
            false,
            DefaultSite::Property,
        );
        assert!(pair.init.unwrap().starts_with("OffsetDateTime.parse(\""));
        assert_eq!(pair.default.as_deref(), Some("2024-01-02T10:00:00Z"));

        let pair = render(
            &ctx,
            None,
            with_default(SchemaType::String, Some("date"), "soon".into()),
            false,
            DefaultSite::Property,
        );
        assert_eq!(pair, DefaultPair::default());
    }

    #[test]
    fn test_kotlin_dates_have_no_default() {
        let ctx = ctx(GeneratorOptions::kotlin_server());
        let schema = Schema {
            format: Some("date".into()),
            default_value: Some("2024-01-02".into()),
            ..Schema::of_type(SchemaType::String)
        };
        assert_eq!(
            render(&ctx, None, schema.into(), false, DefaultSite::Property),
            DefaultPair::default()
        );
    }

    #[test]
    fn test_inline_enum_defaults() {
        let ctx = ctx(GeneratorOptions::default());
        let mut schema = Schema::of_type(SchemaType::String);
        schema.enum_values = vec!["available".into(), "sold".into()];
        schema.default_value = Some("sold".into());
        let pair = render(&ctx, None, schema.clone().into(), false, DefaultSite::Property);
        assert_eq!(pair, DefaultPair::new("StatusEnum.SOLD", "sold"));

        let pair = render(&ctx, None, schema.into(), false, DefaultSite::Parameter);
        assert_eq!(pair, DefaultPair::new("\"sold\"", "sold"));
    }

    #[test]
    fn test_enum_ref_parameter_default() {
        let ctx = ctx(GeneratorOptions::default());
        let mut c = status_components();
        if let Some(SchemaOrRef::Schema(status)) = c.schemas.get_mut("PetStatus") {
            status.default_value = Some("sold".into());
        }
        let pair = render(
            &ctx,
            Some(&c),
            SchemaOrRef::reference(schema_ref("PetStatus")),
            false,
            DefaultSite::Parameter,
        );
        assert_eq!(
            pair.init.as_deref(),
            Some("PetStatus.fromValue(\"sold\")")
        );
    }

    #[test]
    fn test_map_default() {
        let ctx = ctx(GeneratorOptions::default());
        let schema = Schema {
            additional_properties: Some(crate::parse::schema::AdditionalProperties::Bool(true)),
            ..Schema::of_type(SchemaType::Object)
        };
        let pair = render(&ctx, None, schema.clone().into(), false, DefaultSite::Property);
        assert_eq!(pair.init.as_deref(), Some("new HashMap<>()"));
        let pair = render(&ctx, None, schema.into(), true, DefaultSite::Property);
        assert_eq!(pair, DefaultPair::default());
    }

    fn prop(name: &str, data_type: &str) -> Property {
        Property {
            name: name.into(),
            data_type: data_type.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_scalar_and_container_examples() {
        let ctx = ctx(GeneratorOptions::default());
        let models = IndexMap::new();
        let renderer = ExampleRenderer::new(&ctx, &models);
        let example = |data_type, example, items_type| {
            let input = ExampleInput {
                data_type,
                example,
                items_type,
                ..Default::default()
            };
            (renderer.example(&input, false), renderer.example(&input, true))
        };

        assert_eq!(example("String", None, None).0, "\"example\"");
        assert_eq!(example("String", Some("it's"), None).1, "'it\"s'");
        assert_eq!(example("Long", Some("7"), None).0, "7L");
        assert_eq!(example("Double", None, None).0, "3.4D");
        assert_eq!(example("File", None, None).0, "null");
        assert_eq!(
            example("List<String>", None, Some("String")),
            ("List.of(\"example\")".to_string(), "['example']".to_string())
        );
        assert_eq!(
            example("Set<Integer>", None, Some("Integer")),
            ("new HashSet<>()".to_string(), "[].asSet()".to_string())
        );
        assert_eq!(example("Map<String, Integer>", None, None).1, "[:]");
    }

    #[test]
    fn test_enum_and_model_examples() {
        let ctx = ctx(GeneratorOptions::default());
        let mut models = IndexMap::new();
        models.insert(
            "Pet".to_string(),
            vec![prop("name", "String"), prop("category", "Category")],
        );
        models.insert("Category".to_string(), vec![]);
        let renderer = ExampleRenderer::new(&ctx, &models);

        let mut status = prop("status", "StatusEnum");
        status.enum_vars = vec![EnumVar {
            raw_value: "available".into(),
            ..Default::default()
        }];
        assert_eq!(
            renderer.property_example(&status, false),
            "org.openapitools.model.StatusEnum.fromValue(\"available\")"
        );

        let pet = Parameter {
            param_name: "pet".into(),
            data_type: "Pet".into(),
            is_model: true,
            ..Default::default()
        };
        let mut category = prop("category", "Category");
        category.is_model = true;
        models.get_mut("Pet").unwrap()[1] = category;
        let renderer = ExampleRenderer::new(&ctx, &models);
        assert_eq!(
            renderer.parameter_example(&pet, false),
            "new Pet(\"example\", new org.openapitools.model.Category())"
        );

        let unknown = Parameter {
            data_type: "Other".into(),
            is_model: true,
            ..Default::default()
        };
        assert_eq!(renderer.parameter_example(&unknown, false), "null");
    }

    #[test]
    fn test_kotlin_examples() {
        let ctx = ctx(GeneratorOptions::kotlin_server());
        let models = IndexMap::new();
        let renderer = ExampleRenderer::new(&ctx, &models);
        let input = ExampleInput {
            data_type: "List<Int>",
            items_type: Some("Int"),
            ..Default::default()
        };
        assert_eq!(renderer.example(&input, false), "listOf<Int>()");
        let input = ExampleInput {
            data_type: "Map<String, Int>",
            ..Default::default()
        };
        assert_eq!(renderer.example(&input, false), "HashMap<Any, Any>()");
    }
}
