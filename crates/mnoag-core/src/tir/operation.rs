use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::facets::{ExtraAnnotations, SwaggerFlags};
use super::parameter::Parameter;
use super::property::Property;
use super::response::Response;
use crate::error::LowerError;

/// Post-processing stages an operation passes through, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    #[default]
    Raw,
    Normalized,
    ParamsMapped,
    BodyMapped,
    Wrapped,
    AnnotationsApplied,
    Frozen,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Raw => "raw",
            Self::Normalized => "normalized",
            Self::ParamsMapped => "params-mapped",
            Self::BodyMapped => "body-mapped",
            Self::Wrapped => "wrapped",
            Self::AnnotationsApplied => "annotations-applied",
            Self::Frozen => "frozen",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub http_method: String,
    pub path: String,
    pub operation_id: String,
    /// Method name in the generated interface.
    pub nickname: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deprecated: bool,

    pub consumes: Vec<String>,
    pub produces: Vec<String>,

    pub all_params: Vec<Parameter>,
    /// Parameters that are neither body nor form.
    pub swagger_params: Vec<Parameter>,
    /// Parameters as declared, excluding implicit headers.
    pub original_params: Vec<Parameter>,
    pub implicit_headers_params: Vec<Parameter>,
    pub body_params: Vec<Parameter>,
    pub form_params: Vec<Parameter>,
    pub header_params: Vec<Parameter>,
    pub path_params: Vec<Parameter>,
    pub query_params: Vec<Parameter>,
    pub cookie_params: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_param: Option<Parameter>,
    pub has_params: bool,

    pub responses: Vec<Response>,
    pub response_headers: Vec<Property>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_property: Option<Property>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_base_type: Option<String>,
    pub is_array: bool,
    pub is_map: bool,
    pub is_response_file: bool,

    pub auth_methods: Vec<AuthMethod>,
    pub imports: BTreeSet<String>,
    pub facets: OperationFacets,
    pub vendor_extensions: IndexMap<String, Value>,

    #[serde(skip)]
    pub stage: Stage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationFacets {
    pub method_allows_body: bool,
    pub only_default_consume_or_empty: bool,
    pub only_default_produce_or_empty: bool,
    pub has_not_body_param: bool,
    pub has_multiple_params: bool,
    pub is_return_flux: bool,
    /// Return type before envelopes were applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_return_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groovy_example: Option<String>,
    #[serde(flatten)]
    pub swagger: SwaggerFlags,
    pub annotations: ExtraAnnotations,
}

/// A security scheme the operation accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthMethod {
    pub name: String,
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_param_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
    /// Name of the first declared OAuth2 flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    pub is_api_key: bool,
    pub is_basic_basic: bool,
    pub is_basic_bearer: bool,
    pub is_oauth: bool,
    pub is_open_id_connect: bool,
    pub scopes: Vec<String>,
}

impl Operation {
    /// Move from `from` to the next stage, failing when a pass runs out of
    /// order.
    pub fn advance(&mut self, from: Stage, to: Stage) -> Result<(), LowerError> {
        if self.stage != from {
            return Err(LowerError::Consistency(format!(
                "operation '{}' is {}, expected {} before {}",
                self.operation_id, self.stage, from, to
            )));
        }
        self.stage = to;
        Ok(())
    }

    /// Recompute the location buckets from `all_params`.
    pub fn rebuild_param_lists(&mut self) {
        self.body_params = self.filtered(|p| p.is_body_param);
        self.form_params = self.filtered(|p| p.is_form_param);
        self.header_params = self.filtered(|p| p.is_header_param);
        self.path_params = self.filtered(|p| p.is_path_param);
        self.query_params = self.filtered(|p| p.is_query_param);
        self.cookie_params = self.filtered(|p| p.is_cookie_param);
        self.body_param = self.body_params.first().cloned();
        self.has_params = !self.all_params.is_empty();
    }

    fn filtered(&self, pred: impl Fn(&Parameter) -> bool) -> Vec<Parameter> {
        self.all_params.iter().filter(|p| pred(p)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_enforced() {
        let mut op = Operation {
            operation_id: "getPet".into(),
            ..Default::default()
        };
        op.advance(Stage::Raw, Stage::Normalized).unwrap();
        let err = op.advance(Stage::BodyMapped, Stage::Wrapped).unwrap_err();
        assert!(matches!(err, LowerError::Consistency(_)));
        assert_eq!(op.stage, Stage::Normalized);
    }

    #[test]
    fn test_rebuild_param_lists() {
        let mut op = Operation::default();
        op.all_params = vec![
            Parameter {
                param_name: "id".into(),
                is_path_param: true,
                ..Default::default()
            },
            Parameter {
                param_name: "pet".into(),
                is_body_param: true,
                ..Default::default()
            },
        ];
        op.rebuild_param_lists();
        assert_eq!(op.path_params.len(), 1);
        assert_eq!(op.body_param.as_ref().unwrap().param_name, "pet");
        assert!(op.has_params);
    }
}
