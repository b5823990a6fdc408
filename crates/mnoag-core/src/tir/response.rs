use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::facets::TypeFlags;
use super::property::Property;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Numeric status, `default`, or a range such as `2XX`.
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_type: Option<String>,
    #[serde(flatten)]
    pub flags: TypeFlags,
    pub is_default: bool,
    pub is_array: bool,
    pub is_map: bool,
    pub is_model: bool,
    pub is2xx: bool,
    /// The response schema as written, for renderers that need it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    pub headers: Vec<Property>,
    pub vendor_extensions: IndexMap<String, Value>,
}

impl Response {
    /// A 2xx code other than 200, which needs an explicit status.
    pub fn is_non_ok_success(&self) -> bool {
        self.is2xx && self.code != "200"
    }
}
