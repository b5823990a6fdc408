use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::context::{Context, split_qualified};
use crate::dialect::{Dialect, Scalar};
use crate::error::LowerError;
use crate::parse::components::Components;
use crate::parse::refs::{RefIndex, parse_ref_name};
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType};
use crate::tir::{Model, Parameter, Property, Response, TypeFlags};

/// Resolved type of one schema node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeDescriptor {
    pub data_type: String,
    /// Same as `data_type` until an inline enum name is attached.
    pub datatype_with_enum: String,
    pub base_type: String,
    pub boxed_type: String,
    pub open_api_type: String,
    pub flags: TypeFlags,
    /// `List`, `Set` or `Map` for containers.
    pub container_type: Option<String>,
    pub is_container: bool,
    pub is_array: bool,
    pub is_map: bool,
    pub unique_items: bool,
    pub is_model: bool,
    pub is_enum_ref: bool,
    pub is_inline_enum: bool,
    pub is_one_of: bool,
    pub items: Option<Box<TypeDescriptor>>,
    pub key_type: Option<String>,
    pub complex_type: Option<String>,
    pub imports: BTreeSet<String>,
}

impl TypeDescriptor {
    fn named(name: &str, open_api_type: &str) -> Self {
        Self {
            data_type: name.to_string(),
            datatype_with_enum: name.to_string(),
            base_type: name.to_string(),
            boxed_type: name.to_string(),
            open_api_type: open_api_type.to_string(),
            ..Default::default()
        }
    }

    /// Recompute the container spelling from the items.
    pub fn rewrap(&mut self) {
        let (Some(container), Some(items)) = (&self.container_type, &self.items) else {
            return;
        };
        if self.is_map {
            let key = self.key_type.as_deref().unwrap_or("String");
            self.data_type = format!("{container}<{key}, {}>", items.data_type);
            self.datatype_with_enum = format!("{container}<{key}, {}>", items.datatype_with_enum);
        } else {
            self.data_type = format!("{container}<{}>", items.data_type);
            self.datatype_with_enum = format!("{container}<{}>", items.datatype_with_enum);
        }
        self.boxed_type = self.data_type.clone();
    }

    /// Attach the name of an inline enum to the innermost item.
    pub fn set_enum_name(&mut self, enum_name: &str) {
        match &mut self.items {
            Some(items) => {
                items.set_enum_name(enum_name);
                self.rewrap();
            }
            None => self.datatype_with_enum = enum_name.to_string(),
        }
    }

    pub fn most_inner_items(&self) -> &TypeDescriptor {
        let mut current = self;
        while let Some(items) = &current.items {
            current = items;
        }
        current
    }
}

/// Scalar override selected by `x-type`/`x-format` or an integer format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveOverride {
    pub data_type: String,
    pub base_type: String,
    pub is_primitive: bool,
    pub scalar: Scalar,
}

/// Read `x-type`/`x-format` (falling back to `type`/`format`) and pick a
/// scalar from the extended palette.
pub fn primitive_override(schema: &Schema, dialect: &dyn Dialect) -> Option<PrimitiveOverride> {
    let schema_type = schema
        .extension_str("x-type")
        .or_else(|| schema.primary_type().map(|t| t.as_str()))
        .unwrap_or("object");
    let format = schema
        .extension_str("x-format")
        .or(schema.format.as_deref())
        .unwrap_or("object");

    let boxed_only = |scalar| {
        let name = dialect.scalar(scalar);
        PrimitiveOverride {
            data_type: name.boxed.to_string(),
            base_type: name.boxed.to_string(),
            is_primitive: false,
            scalar,
        }
    };

    if schema_type == "integer" {
        return match format {
            "int8" | "byte" => Some(boxed_only(Scalar::Byte)),
            "int16" | "short" => Some(boxed_only(Scalar::Short)),
            _ => None,
        };
    }
    let scalar = Scalar::from_x_type(schema_type)?;
    let name = dialect.scalar(scalar);
    Some(PrimitiveOverride {
        data_type: name.boxed.to_string(),
        base_type: name.primitive.unwrap_or(name.boxed).to_string(),
        is_primitive: name.primitive.is_some(),
        scalar,
    })
}

fn scalar_flags(scalar: Scalar, flags: &mut TypeFlags) {
    match scalar {
        Scalar::Char => flags.is_char = true,
        Scalar::Byte => {
            flags.is_byte = true;
            flags.is_integer = true;
        }
        Scalar::Short => flags.is_short = true,
        Scalar::Int => flags.is_integer = true,
        Scalar::Long => flags.is_long = true,
        Scalar::Float => flags.is_float = true,
        Scalar::Double => flags.is_double = true,
    }
    if scalar != Scalar::Char {
        flags.is_numeric = true;
        flags.is_number = true;
    }
}

/// Flags implied by a `typeMapping` key.
fn flags_for_key(key: &str) -> TypeFlags {
    let mut flags = TypeFlags::default();
    match key {
        "integer" => {
            flags.is_integer = true;
            flags.is_numeric = true;
        }
        "long" => {
            flags.is_long = true;
            flags.is_numeric = true;
        }
        "number" | "decimal" => {
            flags.is_number = true;
            flags.is_decimal = true;
            flags.is_numeric = true;
        }
        "float" => {
            flags.is_float = true;
            flags.is_numeric = true;
        }
        "double" => {
            flags.is_double = true;
            flags.is_numeric = true;
        }
        "boolean" => flags.is_boolean = true,
        "string" => flags.is_string = true,
        "date" => flags.is_date = true,
        "DateTime" => flags.is_date_time = true,
        "UUID" => flags.is_uuid = true,
        "URI" => flags.is_uri = true,
        "ByteArray" => flags.is_byte_array = true,
        "binary" | "file" | "responseFile" => {
            flags.is_binary = true;
            flags.is_file = true;
        }
        "object" => flags.is_free_form_object = true,
        "AnyType" => flags.is_any_type = true,
        _ => {}
    }
    flags
}

/// One component schema that lowers to its own class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub classname: String,
    pub is_enum: bool,
}

/// Component key to class name, for every schema that produces a model.
#[derive(Debug, Clone, Default)]
pub struct ModelIndex {
    entries: IndexMap<String, ModelEntry>,
}

impl ModelIndex {
    pub fn build(ctx: &Context, components: Option<&Components>) -> Result<Self, LowerError> {
        let mut entries = IndexMap::new();
        let Some(components) = components else {
            return Ok(Self { entries });
        };
        for (key, schema) in &components.schemas {
            if ctx.options.schema_mapping.contains_key(key) {
                continue;
            }
            let Some(schema) = schema.as_schema() else {
                continue;
            };
            if !Self::needs_model(schema) {
                continue;
            }
            entries.insert(
                key.clone(),
                ModelEntry {
                    classname: ctx.model_name(key)?,
                    is_enum: schema.is_enum(),
                },
            );
        }
        Ok(Self { entries })
    }

    /// Objects with properties, enums, composed schemas and discriminators
    /// get a class; aliases and free-form objects do not.
    pub fn needs_model(schema: &Schema) -> bool {
        schema.is_enum() || schema.is_object_like()
    }

    pub fn get(&self, key: &str) -> Option<&ModelEntry> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn classname(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.classname.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps schema nodes to [`TypeDescriptor`]s.
#[derive(Clone, Copy)]
pub struct TypeResolver<'a> {
    ctx: &'a Context,
    index: RefIndex<'a>,
    models: &'a ModelIndex,
    binary_as_file: bool,
}

impl<'a> TypeResolver<'a> {
    pub fn new(ctx: &'a Context, index: RefIndex<'a>, models: &'a ModelIndex) -> Self {
        Self {
            ctx,
            index,
            models,
            binary_as_file: true,
        }
    }

    /// Model fields carry `binary` strings as byte arrays; bodies and
    /// responses carry them as files.
    pub fn with_binary_as_file(mut self, binary_as_file: bool) -> Self {
        self.binary_as_file = binary_as_file;
        self
    }

    pub fn index(&self) -> RefIndex<'a> {
        self.index
    }

    pub fn resolve(&self, schema: &SchemaOrRef) -> Result<TypeDescriptor, LowerError> {
        match schema {
            SchemaOrRef::Ref { ref_path } => self.resolve_ref(ref_path),
            SchemaOrRef::Schema(schema) => self.resolve_schema(schema),
        }
    }

    fn resolve_ref(&self, ref_path: &str) -> Result<TypeDescriptor, LowerError> {
        let name = parse_ref_name(ref_path, "schemas")?;
        if let Some(ty) = self.named_component(name) {
            return Ok(ty);
        }
        let (target_name, target) = self.index.schema(ref_path)?;
        if let Some(ty) = self.named_component(target_name) {
            return Ok(ty);
        }
        self.resolve_schema(target)
    }

    /// Components that resolve by name: schema mappings and models.
    fn named_component(&self, key: &str) -> Option<TypeDescriptor> {
        if let Some(mapped) = self.ctx.options.schema_mapping.get(key) {
            let simple = split_qualified(mapped).map(|(s, _)| s).unwrap_or(mapped);
            let mut ty = TypeDescriptor::named(simple, "object");
            ty.complex_type = Some(simple.to_string());
            ty.imports.insert(simple.to_string());
            return Some(ty);
        }
        let entry = self.models.get(key)?;
        let mut ty = TypeDescriptor::named(&entry.classname, "object");
        ty.is_model = !entry.is_enum;
        ty.is_enum_ref = entry.is_enum;
        ty.complex_type = Some(entry.classname.clone());
        ty.imports.insert(entry.classname.clone());
        Some(ty)
    }

    pub fn resolve_schema(&self, schema: &Schema) -> Result<TypeDescriptor, LowerError> {
        let mut ty = self.resolve_inner(schema)?;
        if let Some(over) = primitive_override(schema, self.ctx.dialect.as_ref()) {
            ty.data_type = over.data_type.clone();
            ty.datatype_with_enum = over.data_type.clone();
            ty.boxed_type = over.data_type;
            ty.base_type = over.base_type;
            ty.flags = TypeFlags {
                is_primitive: over.is_primitive,
                ..TypeFlags::default()
            };
            scalar_flags(over.scalar, &mut ty.flags);
            ty.imports.clear();
        } else if let Some(x_type) = schema.extension_str("x-type") {
            self.ctx.warn_once(&format!("x-type:{x_type}"), || {
                format!("unknown x-type '{x_type}', using the schema type")
            });
        }
        ty.is_inline_enum = schema.is_enum() && ty.items.is_none();
        Ok(ty)
    }

    fn resolve_inner(&self, schema: &Schema) -> Result<TypeDescriptor, LowerError> {
        if let [single] = schema.all_of.as_slice()
            && schema.properties.is_empty()
            && single.ref_path().is_some()
        {
            return self.resolve(single);
        }
        if !schema.one_of.is_empty() || !schema.any_of.is_empty() {
            let mut ty = self.mapped("AnyType", "object")?;
            ty.is_one_of = !schema.one_of.is_empty();
            return Ok(ty);
        }
        if schema.is_composed() {
            return self.mapped("object", "object");
        }
        if schema.is_array() {
            return self.array(schema);
        }
        if schema.is_map() || (schema.is_type(SchemaType::Object) && schema.properties.is_empty()) {
            return self.map_or_free_form(schema);
        }

        let format = schema.format.as_deref().unwrap_or_default();
        match schema.primary_type() {
            Some(SchemaType::Integer) => {
                let key = if format == "int64" { "long" } else { "integer" };
                self.mapped(key, "integer")
            }
            Some(SchemaType::Number) => {
                let key = match format {
                    "float" => "float",
                    "double" => "double",
                    _ => "number",
                };
                self.mapped(key, "number")
            }
            Some(SchemaType::Boolean) => self.mapped("boolean", "boolean"),
            Some(SchemaType::String) => self.string(format),
            Some(SchemaType::Object) => self.mapped("object", "object"),
            Some(SchemaType::Null) | None => {
                if !schema.properties.is_empty() {
                    self.mapped("object", "object")
                } else {
                    self.mapped("AnyType", "object")
                }
            }
            Some(SchemaType::Array) => self.array(schema),
        }
    }

    fn string(&self, format: &str) -> Result<TypeDescriptor, LowerError> {
        match format {
            "date" => self.mapped("date", "string"),
            "date-time" => self.mapped("DateTime", "string"),
            "uuid" => self.mapped("UUID", "string"),
            "uri" | "url" => self.mapped("URI", "string"),
            "byte" => self.mapped("ByteArray", "string"),
            "binary" if self.binary_as_file => self.mapped("file", "string"),
            "binary" => self.mapped("ByteArray", "string"),
            "email" => {
                let mut ty = self.mapped("string", "string")?;
                ty.flags.is_email = true;
                Ok(ty)
            }
            _ => self.mapped("string", "string"),
        }
    }

    fn array(&self, schema: &Schema) -> Result<TypeDescriptor, LowerError> {
        let items = match &schema.items {
            Some(items) => self.resolve(items)?,
            None => self.mapped("AnyType", "object")?,
        };
        let unique = schema.unique_items == Some(true) || schema.extension_bool("x-set");
        let container = self.ctx.mapped_type(if unique { "set" } else { "array" })?;
        let mut ty = TypeDescriptor {
            open_api_type: "array".to_string(),
            container_type: Some(container.to_string()),
            is_container: true,
            is_array: true,
            unique_items: unique,
            base_type: items.base_type.clone(),
            complex_type: items.complex_type.clone(),
            ..Default::default()
        };
        ty.imports.insert(container.to_string());
        ty.imports.extend(items.imports.iter().cloned());
        ty.items = Some(Box::new(items));
        ty.rewrap();
        Ok(ty)
    }

    fn map_or_free_form(&self, schema: &Schema) -> Result<TypeDescriptor, LowerError> {
        let value = match &schema.additional_properties {
            Some(AdditionalProperties::Schema(value)) => self.resolve(value)?,
            Some(AdditionalProperties::Bool(true)) => self.mapped("AnyType", "object")?,
            _ => return self.mapped("object", "object"),
        };
        let container = self.ctx.mapped_type("map")?;
        let mut ty = TypeDescriptor {
            open_api_type: "object".to_string(),
            container_type: Some(container.to_string()),
            is_container: true,
            is_map: true,
            key_type: Some(self.ctx.mapped_type("string")?.to_string()),
            base_type: value.base_type.clone(),
            complex_type: value.complex_type.clone(),
            ..Default::default()
        };
        ty.imports.insert(container.to_string());
        ty.imports.extend(value.imports.iter().cloned());
        ty.items = Some(Box::new(value));
        ty.rewrap();
        Ok(ty)
    }

    fn mapped(&self, key: &str, open_api_type: &str) -> Result<TypeDescriptor, LowerError> {
        let name = self.ctx.mapped_type(key)?;
        let simple = split_qualified(name).map(|(s, _)| s).unwrap_or(name);
        let mut ty = TypeDescriptor::named(simple, open_api_type);
        ty.flags = flags_for_key(key);
        self.ctx.make_sure_imported(name, &mut ty.imports);
        Ok(ty)
    }
}

/// The TIR entities that carry a resolved type.
pub enum TypedBearer<'a> {
    Model(&'a mut Model),
    Property(&'a mut Property),
    Parameter(&'a mut Parameter),
    Response(&'a mut Response),
}

impl TypedBearer<'_> {
    /// Copy a resolved type onto the entity.
    pub fn apply(self, ty: &TypeDescriptor) {
        match self {
            Self::Model(model) => {
                model.data_type = ty.data_type.clone();
                model.flags = ty.flags.clone();
            }
            Self::Property(prop) => {
                prop.data_type = ty.data_type.clone();
                prop.datatype_with_enum = ty.datatype_with_enum.clone();
                prop.base_type = ty.base_type.clone();
                prop.open_api_type = ty.open_api_type.clone();
                prop.complex_type = ty.complex_type.clone();
                prop.container_type = ty.container_type.clone();
                prop.flags = ty.flags.clone();
                prop.is_container = ty.is_container;
                prop.is_array = ty.is_array;
                prop.is_map = ty.is_map;
                prop.unique_items = ty.unique_items;
                prop.is_model = ty.is_model;
                prop.is_enum_ref = ty.is_enum_ref;
            }
            Self::Parameter(param) => {
                param.data_type = ty.data_type.clone();
                param.datatype_with_enum = ty.datatype_with_enum.clone();
                param.base_type = ty.base_type.clone();
                param.container_type = ty.container_type.clone();
                param.flags = ty.flags.clone();
                param.is_container = ty.is_container;
                param.is_array = ty.is_array;
                param.is_map = ty.is_map;
                param.unique_items = ty.unique_items;
                param.is_model = ty.is_model;
                param.is_enum_ref = ty.is_enum_ref;
            }
            Self::Response(resp) => {
                resp.data_type = Some(ty.data_type.clone());
                resp.base_type = Some(ty.base_type.clone());
                resp.container_type = ty.container_type.clone();
                resp.flags = ty.flags.clone();
                resp.is_array = ty.is_array;
                resp.is_map = ty.is_map;
                resp.is_model = ty.is_model;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorOptions;
    use crate::parse::refs::schema_ref;
    use crate::parse::schema::TypeSet;

    fn ctx(options: GeneratorOptions) -> Context {
        Context::new(options).unwrap()
    }

    fn string_schema(format: Option<&str>) -> Schema {
        Schema {
            format: format.map(str::to_string),
            ..Schema::of_type(SchemaType::String)
        }
    }

    fn components() -> Components {
        let mut c = Components::default();
        let mut pet = Schema::of_type(SchemaType::Object);
        pet.properties
            .insert("id".into(), Schema::of_type(SchemaType::Integer).into());
        c.schemas.insert("Pet".into(), pet.into());
        let mut status = Schema::of_type(SchemaType::String);
        status.enum_values = vec!["a".into(), "b".into()];
        c.schemas.insert("Status".into(), status.into());
        c.schemas
            .insert("Name".into(), Schema::of_type(SchemaType::String).into());
        c.schemas
            .insert("Animal".into(), SchemaOrRef::reference(schema_ref("Pet")));
        c
    }

    #[test]
    fn test_scalars() {
        let ctx = ctx(GeneratorOptions::default());
        let models = ModelIndex::default();
        let resolver = TypeResolver::new(&ctx, RefIndex::new(None), &models);

        let ty = resolver
            .resolve_schema(&Schema {
                format: Some("int64".into()),
                ..Schema::of_type(SchemaType::Integer)
            })
            .unwrap();
        assert_eq!(ty.data_type, "Long");
        assert!(ty.flags.is_long);

        let ty = resolver.resolve_schema(&string_schema(Some("date-time"))).unwrap();
        assert_eq!(ty.data_type, "ZonedDateTime");
        assert!(ty.imports.contains("ZonedDateTime"));

        let ty = resolver.resolve_schema(&string_schema(Some("uuid"))).unwrap();
        assert!(ty.flags.is_uuid);

        let ty = resolver.resolve_schema(&string_schema(Some("binary"))).unwrap();
        assert_eq!(ty.data_type, "CompletedFileUpload");
        let ty = resolver
            .with_binary_as_file(false)
            .resolve_schema(&string_schema(Some("binary")))
            .unwrap();
        assert_eq!(ty.data_type, "byte[]");
    }

    #[test]
    fn test_x_type_primitives() {
        let ctx = ctx(GeneratorOptions::default());
        let models = ModelIndex::default();
        let resolver = TypeResolver::new(&ctx, RefIndex::new(None), &models);

        let mut schema = Schema::of_type(SchemaType::Integer);
        schema.extensions.insert("x-type".into(), "long".into());
        let ty = resolver.resolve_schema(&schema).unwrap();
        assert_eq!(ty.data_type, "Long");
        assert_eq!(ty.base_type, "long");
        assert!(ty.flags.is_primitive);

        let mut schema = Schema::of_type(SchemaType::String);
        schema.extensions.insert("x-type".into(), "Character".into());
        let ty = resolver.resolve_schema(&schema).unwrap();
        assert_eq!(ty.data_type, "Character");
        assert_eq!(ty.base_type, "char");

        let schema = Schema {
            format: Some("int8".into()),
            ..Schema::of_type(SchemaType::Integer)
        };
        let ty = resolver.resolve_schema(&schema).unwrap();
        assert_eq!(ty.data_type, "Byte");
        assert_eq!(ty.base_type, "Byte");
        assert!(!ty.flags.is_primitive);
    }

    #[test]
    fn test_kotlin_has_no_primitives() {
        let ctx = ctx(GeneratorOptions::kotlin_server());
        let models = ModelIndex::default();
        let resolver = TypeResolver::new(&ctx, RefIndex::new(None), &models);
        let mut schema = Schema::of_type(SchemaType::Integer);
        schema.extensions.insert("x-type".into(), "int".into());
        let ty = resolver.resolve_schema(&schema).unwrap();
        assert_eq!(ty.data_type, "Int");
        assert!(!ty.flags.is_primitive);
    }

    #[test]
    fn test_refs_and_containers() {
        let ctx = ctx(GeneratorOptions::default());
        let c = components();
        let models = ModelIndex::build(&ctx, Some(&c)).unwrap();
        assert!(models.get("Name").is_none());
        let resolver = TypeResolver::new(&ctx, RefIndex::new(Some(&c)), &models);

        let ty = resolver.resolve(&SchemaOrRef::reference(schema_ref("Pet"))).unwrap();
        assert_eq!(ty.data_type, "Pet");
        assert!(ty.is_model);

        let ty = resolver.resolve(&SchemaOrRef::reference(schema_ref("Animal"))).unwrap();
        assert_eq!(ty.data_type, "Pet");

        let ty = resolver.resolve(&SchemaOrRef::reference(schema_ref("Name"))).unwrap();
        assert_eq!(ty.data_type, "String");

        let ty = resolver.resolve(&SchemaOrRef::reference(schema_ref("Status"))).unwrap();
        assert!(ty.is_enum_ref);

        let array = Schema {
            items: Some(Box::new(SchemaOrRef::reference(schema_ref("Pet")))),
            ..Schema::of_type(SchemaType::Array)
        };
        let ty = resolver.resolve_schema(&array).unwrap();
        assert_eq!(ty.data_type, "List<Pet>");
        assert_eq!(ty.base_type, "Pet");
        assert!(ty.imports.contains("List") && ty.imports.contains("Pet"));

        let set = Schema {
            unique_items: Some(true),
            ..array.clone()
        };
        assert_eq!(resolver.resolve_schema(&set).unwrap().data_type, "Set<Pet>");

        let map = Schema {
            additional_properties: Some(AdditionalProperties::Schema(Box::new(
                Schema::of_type(SchemaType::Integer).into(),
            ))),
            ..Schema::of_type(SchemaType::Object)
        };
        assert_eq!(
            resolver.resolve_schema(&map).unwrap().data_type,
            "Map<String, Integer>"
        );

        let nullable_string = Schema {
            schema_type: Some(TypeSet::Multiple(vec![SchemaType::String, SchemaType::Null])),
            ..Default::default()
        };
        assert_eq!(
            resolver.resolve_schema(&nullable_string).unwrap().data_type,
            "String"
        );
    }

    #[test]
    fn test_missing_ref_is_resolution_error() {
        let ctx = ctx(GeneratorOptions::default());
        let models = ModelIndex::default();
        let resolver = TypeResolver::new(&ctx, RefIndex::new(None), &models);
        assert!(matches!(
            resolver.resolve(&SchemaOrRef::reference(schema_ref("Missing"))),
            Err(LowerError::SchemaResolution(_))
        ));
    }

    #[test]
    fn test_schema_mapping_wins() {
        let mut options = GeneratorOptions::default();
        options
            .schema_mapping
            .insert("Pet".into(), "com.example.ExternalPet".into());
        let ctx = ctx(options);
        let c = components();
        let models = ModelIndex::build(&ctx, Some(&c)).unwrap();
        assert!(models.get("Pet").is_none());
        let resolver = TypeResolver::new(&ctx, RefIndex::new(Some(&c)), &models);
        let ty = resolver.resolve(&SchemaOrRef::reference(schema_ref("Pet"))).unwrap();
        assert_eq!(ty.data_type, "ExternalPet");
        assert_eq!(ctx.import_mapping()["ExternalPet"], "com.example.ExternalPet");
    }

    #[test]
    fn test_inline_enum_name() {
        let ctx = ctx(GeneratorOptions::default());
        let models = ModelIndex::default();
        let resolver = TypeResolver::new(&ctx, RefIndex::new(None), &models);
        let mut item = Schema::of_type(SchemaType::String);
        item.enum_values = vec!["available".into()];
        let array = Schema {
            items: Some(Box::new(item.into())),
            ..Schema::of_type(SchemaType::Array)
        };
        let mut ty = resolver.resolve_schema(&array).unwrap();
        assert!(ty.most_inner_items().is_inline_enum);
        ty.set_enum_name("StatusEnum");
        assert_eq!(ty.data_type, "List<String>");
        assert_eq!(ty.datatype_with_enum, "List<StatusEnum>");
    }
}
