use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),

    #[error("missing required field: {0}")]
    MissingField(String),
}

/// Fatal failures of the lowering pipeline. Anything recoverable is logged
/// instead of being returned.
#[derive(Debug, Error)]
pub enum LowerError {
    #[error("invalid value '{value}' for option '{option}'")]
    Configuration { option: String, value: String },

    #[error("unresolvable reference: {0}")]
    SchemaResolution(String),

    #[error("cannot resolve a type for {context}: {detail}")]
    TypeResolution { context: String, detail: String },

    #[error("cannot derive a legal identifier from '{0}'")]
    Identifier(String),

    #[error("inconsistent lowering state: {0}")]
    Consistency(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl LowerError {
    pub fn configuration(option: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Configuration {
            option: option.into(),
            value: value.into(),
        }
    }

    pub fn type_resolution(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::TypeResolution {
            context: context.into(),
            detail: detail.into(),
        }
    }
}

/// Failures while reading an options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read options {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse options {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml_ng::Error,
    },
}
