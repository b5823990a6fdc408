use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::facets::{EnumVar, ExtraAnnotations, TypeFlags};
use super::property::Property;

/// A class, enum or `oneOf` interface lowered from one component schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Component key.
    pub name: String,
    pub classname: String,
    pub class_var_name: String,
    pub data_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub flags: TypeFlags,

    pub is_enum: bool,
    pub is_one_of_interface: bool,
    pub is_nullable: bool,
    pub deprecated: bool,

    /// Classname of the `allOf` parent, after interface erasure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_schema: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<String>,

    pub vars: Vec<Property>,
    pub all_vars: Vec<Property>,
    pub parent_vars: Vec<Property>,
    pub required_vars: Vec<Property>,
    pub optional_vars: Vec<Property>,
    pub read_only_vars: Vec<Property>,
    pub read_write_vars: Vec<Property>,
    pub required_vars_without_discriminator: Vec<Property>,
    pub required_parent_vars_without_discriminator: Vec<Property>,
    /// Constructor arguments: own required vars, then the parent's.
    pub required_args: Vec<Property>,
    /// Arguments of the `super(..)` call.
    pub parent_required_args: Vec<Property>,
    pub has_vars: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_vars: Vec<EnumVar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    pub imports: BTreeSet<String>,
    pub facets: ModelFacets,
    pub vendor_extensions: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelFacets {
    pub has_own_vars: bool,
    pub with_multiple_vars: bool,
    pub with_required_vars: bool,
    pub are_required_vars_and_read_only_vars: bool,
    pub is_server: bool,
    pub generated_annotation: bool,
    pub visitable: bool,
    pub use_enum_case_insensitive: bool,
    pub has_mapped_models: bool,
    pub has_multiple_mapped_models: bool,
    pub serial_id: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x_implements: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_type_annotations: Vec<String>,
    pub annotations: ExtraAnnotations,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// Property name as written in the document.
    pub property_base_name: String,
    /// Property name after identifier normalization.
    pub property_name: String,
    pub property_getter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    pub mapping: IndexMap<String, String>,
    pub mapped_models: Vec<MappedModel>,
    pub has_mapped_models: bool,
    pub has_multiple_mapped_models: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedModel {
    pub mapping_name: String,
    pub model_name: String,
}

impl Model {
    pub fn var(&self, name: &str) -> Option<&Property> {
        self.vars.iter().find(|v| v.name == name)
    }
}
