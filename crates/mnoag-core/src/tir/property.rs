use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::facets::{Constraints, EnumVar, ExtraAnnotations, TypeFlags};

/// A model field, an array item, a map value or a response header.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    pub base_name: String,
    pub real_name: String,
    pub name_in_camel_case: String,
    pub name_in_snake_case: String,
    pub getter: String,
    pub setter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub data_type: String,
    pub datatype_with_enum: String,
    pub base_type: String,
    pub open_api_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complex_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_type: Option<String>,
    #[serde(flatten)]
    pub flags: TypeFlags,

    pub is_container: bool,
    pub is_array: bool,
    pub is_map: bool,
    pub unique_items: bool,
    pub is_model: bool,
    /// An inline enum, lowered to a nested enum type.
    pub is_enum: bool,
    /// A reference to an enum model.
    pub is_enum_ref: bool,
    pub is_nullable: bool,
    pub required: bool,
    pub is_read_only: bool,
    pub is_write_only: bool,
    pub is_discriminator: bool,
    pub is_overridden: bool,
    pub deprecated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value_init: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(flatten)]
    pub constraints: Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_pattern: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_vars: Vec<EnumVar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,

    pub facets: PropertyFacets,
    pub vendor_extensions: IndexMap<String, Value>,
}

/// Renderer flags of a property.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFacets {
    pub in_required_args_constructor: bool,
    pub is_server: bool,
    pub lombok: bool,
    pub default_value_is_not_null: bool,
    pub with_valid: bool,
    /// Declared type with type-use validation annotations on its arguments.
    pub type_with_generic_annotations: String,
    pub type_with_enum_with_generic_annotations: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_server_or_not_read_only: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x_implements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groovy_example: Option<String>,
    pub annotations: ExtraAnnotations,
}

impl Property {
    /// The innermost item of nested containers.
    pub fn most_inner_items(&self) -> &Property {
        let mut current = self;
        while let Some(items) = &current.items {
            current = items;
        }
        current
    }

    /// Whether this property, or any container item inside it, is a model.
    pub fn refers_to_model(&self) -> bool {
        self.most_inner_items().is_model
    }
}
