//! Lowers OpenAPI 3.x documents into a typed intermediate representation
//! ready for Micronaut Java and Kotlin templates.

pub mod config;
pub mod context;
pub mod defaults;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod inline;
pub mod lower;
pub mod naming;
pub mod normalize;
pub mod parse;
pub mod postprocess;
pub mod settings;
pub mod tir;
pub mod types;

pub use config::{GeneratorLanguage, GeneratorOptions, GeneratorTarget};
pub use error::{ConfigError, LowerError, ParseError};
pub use generator::Generator;
pub use tir::Tir;
