//! Operations to API interfaces, one per sanitized tag.

use std::collections::BTreeMap;

use crate::context::Context;
use crate::tir::{Operation, OperationGroup};

/// Group operations by tag. With first-tag generation every operation lands
/// in exactly one group. Groups are ordered by class name.
pub fn group_operations(ctx: &Context, operations: &[Operation]) -> Vec<OperationGroup> {
    let first_only = ctx.options.operation_only_for_first_tag();
    let mut groups: BTreeMap<String, OperationGroup> = BTreeMap::new();

    for (index, op) in operations.iter().enumerate() {
        let tags = if first_only {
            &op.tags[..op.tags.len().min(1)]
        } else {
            &op.tags[..]
        };
        for tag in tags {
            let tag = ctx.names.sanitize_tag(tag);
            let classname = ctx.names.to_api_name(tag);
            let group = groups.entry(classname.clone()).or_insert_with(|| OperationGroup {
                tag: tag.to_string(),
                class_var_name: ctx.names.to_api_var_name(tag),
                classname: classname.clone(),
                operation_indices: Vec::new(),
            });
            if group.tag != tag {
                ctx.warn_once(&format!("tag:{classname}"), || {
                    format!("tags '{}' and '{tag}' both map to {classname}", group.tag)
                });
            }
            if !group.operation_indices.contains(&index) {
                group.operation_indices.push(index);
            }
        }
    }

    log::debug!("grouped {} operations into {} APIs", operations.len(), groups.len());
    groups.into_values().collect()
}
