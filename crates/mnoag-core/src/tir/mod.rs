pub mod facets;
pub mod model;
pub mod operation;
pub mod options;
pub mod parameter;
pub mod property;
pub mod response;

use indexmap::IndexMap;
use serde::Serialize;

use crate::settings::GlobalSettings;

pub use facets::{Constraints, EnumVar, ExtraAnnotations, SwaggerFlags, TypeFlags};
pub use model::{Discriminator, MappedModel, Model, ModelFacets};
pub use operation::{AuthMethod, Operation, OperationFacets, Stage};
pub use options::TirOptions;
pub use parameter::{Parameter, ParameterFacets};
pub use property::{Property, PropertyFacets};
pub use response::Response;

/// The frozen, template-ready lowering of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tir {
    pub info: TirInfo,
    pub servers: Vec<TirServer>,
    pub models: Vec<Model>,
    pub operations: Vec<Operation>,
    pub groups: Vec<OperationGroup>,
    /// Simple type name to fully-qualified name, for every import in use.
    pub import_mapping: IndexMap<String, String>,
    pub options: TirOptions,
    pub settings: GlobalSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TirInfo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TirServer {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations generated into one API interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationGroup {
    pub tag: String,
    pub classname: String,
    pub class_var_name: String,
    pub operation_indices: Vec<usize>,
}

impl Tir {
    pub fn model(&self, classname: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.classname == classname)
    }

    pub fn operation(&self, operation_id: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.operation_id == operation_id || op.nickname == operation_id)
    }

    pub fn group(&self, classname: &str) -> Option<&OperationGroup> {
        self.groups.iter().find(|g| g.classname == classname)
    }
}
