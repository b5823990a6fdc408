use serde_json::Value;

use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType, TypeSet};

use super::{Switches, dedupe};

/// Normalize a schema tree bottom-up. A node that only aliases another
/// schema is replaced by the `$ref`, component entries included.
pub(super) fn normalize_node(node: &mut SchemaOrRef, switches: &Switches) {
    let SchemaOrRef::Schema(schema) = node else {
        return;
    };
    normalize_children(schema, switches);
    normalize_schema(schema, switches);
    if let Some(replacement) = collapse(schema, switches) {
        *node = replacement;
    }
}

fn normalize_children(schema: &mut Schema, switches: &Switches) {
    for property in schema.properties.values_mut() {
        normalize_node(property, switches);
    }
    if let Some(items) = schema.items.as_deref_mut() {
        normalize_node(items, switches);
    }
    if let Some(AdditionalProperties::Schema(value)) = &mut schema.additional_properties {
        normalize_node(value, switches);
    }
    if let Some(not) = schema.not.as_deref_mut() {
        normalize_node(not, switches);
    }
    for member in schema
        .all_of
        .iter_mut()
        .chain(schema.one_of.iter_mut())
        .chain(schema.any_of.iter_mut())
    {
        normalize_node(member, switches);
    }
}

fn normalize_schema(schema: &mut Schema, switches: &Switches) {
    if matches!(&schema.schema_type, Some(TypeSet::Multiple(types)) if types.is_empty()) {
        schema.schema_type = None;
    }
    dedupe(&mut schema.required, |name| name.clone());
    dedupe_members(&mut schema.all_of);
    dedupe_members(&mut schema.one_of);
    dedupe_members(&mut schema.any_of);

    if switches.keep_properties_only && !schema.properties.is_empty() {
        schema.one_of.clear();
        schema.any_of.clear();
    }
    if switches.simplify_one_of_any_of {
        let before = schema.one_of.len() + schema.any_of.len();
        schema.one_of.retain(|m| !is_null_schema(m));
        schema.any_of.retain(|m| !is_null_schema(m));
        if schema.one_of.len() + schema.any_of.len() < before {
            schema.nullable = Some(true);
        }
    }

    if schema.all_of.len() > 1 {
        order_all_of(schema);
        merge_inline_members(schema);
    }
    lift_single_inline_member(schema);

    if schema.is_empty() {
        schema.schema_type = Some(TypeSet::Single(SchemaType::Object));
    }
}

/// Refs first, then inline members. Inline members lose a description the
/// parent already has and a default equal to the parent's.
fn order_all_of(schema: &mut Schema) {
    let (refs, mut inline): (Vec<SchemaOrRef>, Vec<SchemaOrRef>) = schema
        .all_of
        .drain(..)
        .partition(|m| m.ref_path().is_some());
    for member in inline.iter_mut().filter_map(SchemaOrRef::as_schema_mut) {
        if schema.description.is_some() {
            member.description = None;
        }
        if member.default_value.is_some() && member.default_value == schema.default_value {
            member.default_value = None;
        }
    }
    schema.all_of = refs;
    schema.all_of.append(&mut inline);
}

/// Fold the inline members of `allOf` into one. Objects merge recursively
/// with the later member winning, lists concatenate without duplicates.
fn merge_inline_members(schema: &mut Schema) {
    let Some(first) = schema.all_of.iter().position(|m| m.ref_path().is_none()) else {
        return;
    };
    if schema.all_of.len() - first < 2 {
        return;
    }
    let values: Result<Vec<Value>, _> = schema.all_of[first..]
        .iter()
        .map(serde_json::to_value)
        .collect();
    let values = match values {
        Ok(values) => values,
        Err(err) => {
            log::warn!("cannot merge allOf members: {err}");
            return;
        }
    };
    let mut merged = Value::Object(serde_json::Map::new());
    for value in values {
        merge_values(&mut merged, value);
    }
    match serde_json::from_value::<SchemaOrRef>(merged) {
        Ok(member) => {
            schema.all_of.truncate(first);
            schema.all_of.push(member);
        }
        Err(err) => log::warn!("cannot merge allOf members: {err}"),
    }
}

pub(super) fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(source)) => {
            for value in source {
                if !target.contains(&value) {
                    target.push(value);
                }
            }
        }
        (target, source) => *target = source,
    }
}

/// Move documentation and flags from the only inline `allOf` member to the
/// parent where the parent lacks them, and drop the member once empty.
fn lift_single_inline_member(schema: &mut Schema) {
    let mut inline = schema
        .all_of
        .iter()
        .enumerate()
        .filter(|(_, m)| m.ref_path().is_none())
        .map(|(i, _)| i);
    let (Some(index), None) = (inline.next(), inline.next()) else {
        return;
    };
    let Some(member) = schema.all_of[index].as_schema_mut() else {
        return;
    };

    macro_rules! lift {
        ($($field:ident),*) => {
            $(
                if schema.$field.is_none() {
                    schema.$field = member.$field.take();
                }
            )*
        };
    }
    lift!(
        title,
        description,
        deprecated,
        nullable,
        default_value,
        example,
        examples,
        external_docs,
        read_only,
        additional_properties,
        not
    );
    if schema.required.is_empty() {
        schema.required = std::mem::take(&mut member.required);
    }
    if schema.one_of.is_empty() {
        schema.one_of = std::mem::take(&mut member.one_of);
    }
    if schema.any_of.is_empty() {
        schema.any_of = std::mem::take(&mut member.any_of);
    }

    if member.is_empty() {
        schema.all_of.remove(index);
    }
}

/// Whole-node replacements: an `allOf` of one ref with nothing else
/// becomes the ref, and a lone `oneOf`/`anyOf` member replaces its parent
/// under `SIMPLIFY_ONE_OF_ANY_OF`.
fn collapse(schema: &mut Schema, switches: &Switches) -> Option<SchemaOrRef> {
    if schema.all_of.len() == 1 && schema.all_of[0].ref_path().is_some() {
        let rest = Schema {
            all_of: Vec::new(),
            schema_type: None,
            ..(*schema).clone()
        };
        if rest.is_empty() {
            return schema.all_of.pop();
        }
    }

    if switches.simplify_one_of_any_of {
        for any_of in [false, true] {
            let list = if any_of {
                &mut schema.any_of
            } else {
                &mut schema.one_of
            };
            if list.len() == 1 {
                let member = list.remove(0);
                let rest = Schema {
                    description: None,
                    nullable: None,
                    ..(*schema).clone()
                };
                if rest.is_empty() && schema.nullable != Some(true) {
                    return Some(member);
                }
                if rest.is_empty()
                    && let SchemaOrRef::Schema(mut inner) = member
                {
                    inner.nullable = Some(true);
                    if inner.description.is_none() {
                        inner.description = schema.description.take();
                    }
                    return Some(SchemaOrRef::Schema(inner));
                }
                schema.all_of.push(member);
            }
        }
    }
    None
}

fn dedupe_members(members: &mut Vec<SchemaOrRef>) {
    let mut kept: Vec<SchemaOrRef> = Vec::with_capacity(members.len());
    for member in members.drain(..) {
        if !kept.contains(&member) {
            kept.push(member);
        }
    }
    *members = kept;
}

fn is_null_schema(member: &SchemaOrRef) -> bool {
    let Some(schema) = member.as_schema() else {
        return false;
    };
    match &schema.schema_type {
        Some(TypeSet::Single(SchemaType::Null)) => true,
        Some(TypeSet::Multiple(types)) => {
            !types.is_empty() && types.iter().all(|t| *t == SchemaType::Null)
        }
        _ => false,
    }
}
