use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::facets::{Constraints, EnumVar, TypeFlags};
use super::property::Property;

/// An operation parameter: path, query, header, cookie, body or form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub param_name: String,
    pub real_name: String,
    pub base_name: String,
    /// Location keyword; absent for body, form and mapped parameters.
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub required: bool,
    pub is_body_param: bool,
    pub is_form_param: bool,
    pub is_part: bool,
    pub is_header_param: bool,
    pub is_path_param: bool,
    pub is_query_param: bool,
    pub is_cookie_param: bool,

    pub data_type: String,
    pub datatype_with_enum: String,
    pub base_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_type: Option<String>,
    #[serde(flatten)]
    pub flags: TypeFlags,
    pub is_container: bool,
    pub is_array: bool,
    pub is_map: bool,
    pub unique_items: bool,
    pub is_model: bool,
    pub is_enum: bool,
    pub is_enum_ref: bool,
    pub is_nullable: bool,
    pub is_deprecated: bool,
    pub is_explode: bool,
    /// Component name when the schema was a `$ref`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    /// Media type of a body parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(flatten)]
    pub constraints: Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_pattern: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowable_values: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_vars: Vec<EnumVar>,

    pub facets: ParameterFacets,
    pub vendor_extensions: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterFacets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value_init: Option<String>,
    pub with_valid: bool,
    pub type_with_generic_annotations: String,
    pub type_with_enum_with_generic_annotations: String,
    /// Introduced by a parameter mapping rather than the document.
    pub mapped: bool,
    pub has_not_body_param: bool,
    pub has_multiple_params: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groovy_example: Option<String>,
}

impl Parameter {
    /// Neither body nor form: a parameter bound from the request line or headers.
    pub fn is_plain(&self) -> bool {
        !self.is_body_param && !self.is_form_param
    }
}
