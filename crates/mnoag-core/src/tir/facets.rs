use serde::Serialize;

/// Scalar classification shared by every typed TIR entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeFlags {
    pub is_primitive: bool,
    pub is_numeric: bool,
    pub is_number: bool,
    pub is_integer: bool,
    pub is_short: bool,
    pub is_long: bool,
    pub is_float: bool,
    pub is_double: bool,
    pub is_decimal: bool,
    pub is_string: bool,
    pub is_boolean: bool,
    pub is_date: bool,
    pub is_date_time: bool,
    pub is_uuid: bool,
    pub is_uri: bool,
    pub is_binary: bool,
    pub is_byte_array: bool,
    pub is_file: bool,
    pub is_char: bool,
    pub is_byte: bool,
    pub is_email: bool,
    pub is_any_type: bool,
    pub is_free_form_object: bool,
}

/// Validation keywords carried over from the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<String>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
}

/// One constant of an enum model or an inline enum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumVar {
    pub name: String,
    /// The constant's initializer in the target language.
    pub value: String,
    /// The value as written in the document.
    pub raw_value: String,
    pub is_string: bool,
    pub deprecated: bool,
}

/// User-supplied annotations from `x-annotations-*`, normalized to lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraAnnotations {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub setter: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub operation: Vec<String>,
}

/// Swagger annotation flavour flags, resolved once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerFlags {
    pub generate_swagger_annotations: bool,
    pub generate_swagger1_annotations: bool,
    pub generate_swagger2_annotations: bool,
}
