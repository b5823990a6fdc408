//! Passes over lowered models and operations. Every operation walks the
//! stages `Raw → Normalized → ParamsMapped → BodyMapped → Wrapped →
//! AnnotationsApplied → Frozen` in order.

mod model;
mod operation;

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::context::Context;
use crate::defaults::ExampleRenderer;
use crate::error::LowerError;
use crate::tir::{Model, Operation, Property};

pub const ANNOTATIONS_CLASS: &str = "x-annotations-class";
pub const ANNOTATIONS_FIELD: &str = "x-annotations-field";
pub const ANNOTATIONS_SETTER: &str = "x-annotations-setter";
pub const ANNOTATIONS_OPERATION: &str = "x-annotations-operation";

/// Run the model passes, then take every operation to `Frozen`.
pub fn post_process(
    ctx: &Context,
    models: &mut [Model],
    operations: &mut [Operation],
) -> Result<(), LowerError> {
    let deprecated: HashSet<String> = models
        .iter()
        .filter(|m| m.deprecated)
        .map(|m| m.classname.clone())
        .collect();
    model::process_models(ctx, models, &deprecated);

    let required_vars: IndexMap<String, Vec<Property>> = models
        .iter()
        .map(|m| (m.classname.clone(), m.required_vars.clone()))
        .collect();
    let examples = ExampleRenderer::new(ctx, &required_vars);

    for op in operations.iter_mut() {
        operation::normalize(ctx, op)?;
        operation::map_parameters(ctx, op)?;
        operation::map_response_body(ctx, op)?;
        operation::wrap(ctx, op)?;
        operation::annotate(ctx, op, &deprecated)?;
        operation::freeze(ctx, op, &examples, models)?;
    }
    log::debug!(
        "post-processed {} models and {} operations",
        models.len(),
        operations.len()
    );
    Ok(())
}

/// Remove an `x-annotations-*` extension and return its annotations. The
/// value may be a single string or a list of strings.
fn take_annotations(extensions: &mut IndexMap<String, Value>, key: &str) -> Vec<String> {
    match extensions.shift_remove(key) {
        None => Vec::new(),
        Some(Value::String(text)) => annotation(&text).into_iter().collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(annotation)
            .collect(),
        Some(other) => {
            log::warn!("ignoring {key}: expected a string or a list, got {other}");
            Vec::new()
        }
    }
}

fn annotation(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else if text.starts_with('@') {
        Some(text.to_string())
    } else {
        Some(format!("@{text}"))
    }
}

/// Whether a property's innermost type is a deprecated model.
fn refers_to_deprecated(prop: &Property, deprecated: &HashSet<String>) -> bool {
    let inner = prop.most_inner_items();
    inner.is_model && deprecated.contains(&inner.data_type)
}
