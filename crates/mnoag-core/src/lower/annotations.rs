//! Type-use validation annotations on the type arguments of containers,
//! e.g. `List<@Pattern(regexp="[a-z]+") @NotNull String>`.

use crate::context::Context;
use crate::dialect::escape_text;
use crate::tir::{Parameter, Property};

/// Declared type of a container with annotated arguments. Scalars keep
/// their plain type.
pub fn generic_type(
    ctx: &Context,
    container_type: Option<&str>,
    is_map: bool,
    items: Option<&Property>,
    plain: &str,
    with_enum: bool,
) -> String {
    let (Some(container), Some(items)) = (container_type, items) else {
        return plain.to_string();
    };
    let argument = annotated_argument(ctx, items, with_enum);
    if is_map {
        format!("{container}<String, {argument}>")
    } else {
        format!("{container}<{argument}>")
    }
}

fn annotated_argument(ctx: &Context, prop: &Property, with_enum: bool) -> String {
    let inner = if prop.is_container {
        generic_type(
            ctx,
            prop.container_type.as_deref(),
            prop.is_map,
            prop.items.as_deref(),
            &prop.data_type,
            with_enum,
        )
    } else if with_enum {
        prop.datatype_with_enum.clone()
    } else {
        prop.data_type.clone()
    };

    let marker = if prop.is_nullable {
        ctx.dialect.nullable_marker()
    } else {
        ""
    };
    let annotations = if ctx.options.bean_validation {
        validation_annotations(ctx, prop)
    } else {
        Vec::new()
    };
    if annotations.is_empty() {
        format!("{inner}{marker}")
    } else {
        format!("{} {inner}{marker}", annotations.join(" "))
    }
}

fn validation_annotations(ctx: &Context, prop: &Property) -> Vec<String> {
    let mut annotations = Vec::new();
    let c = &prop.constraints;

    if let Some(pattern) = &c.pattern {
        annotations.push(format!("@Pattern(regexp=\"{}\")", escape_text(pattern)));
    }
    let (min, max) = if prop.is_container {
        (c.min_items, c.max_items)
    } else {
        (c.min_length, c.max_length)
    };
    match (min, max) {
        (Some(min), Some(max)) => annotations.push(format!("@Size(min={min}, max={max})")),
        (Some(min), None) => annotations.push(format!("@Size(min={min})")),
        (None, Some(max)) => annotations.push(format!("@Size(max={max})")),
        (None, None) => {}
    }
    if prop.flags.is_email {
        annotations.push("@Email".to_string());
    }

    let integral = prop.flags.is_integer || prop.flags.is_long || prop.flags.is_short;
    if let Some(minimum) = &c.minimum {
        annotations.push(bound("Min", minimum, integral, c.exclusive_minimum));
    }
    if let Some(maximum) = &c.maximum {
        annotations.push(bound("Max", maximum, integral, c.exclusive_maximum));
    }

    if prop.is_model {
        annotations.push("@Valid".to_string());
    }
    if !prop.is_nullable
        && let Some(not_null) = ctx.dialect.not_null_annotation()
    {
        annotations.push(not_null.to_string());
    }
    annotations
}

fn bound(kind: &str, value: &str, integral: bool, exclusive: bool) -> String {
    if integral && !exclusive {
        let suffix = if value.parse::<i32>().is_err() { "L" } else { "" };
        return format!("@{kind}({value}{suffix})");
    }
    if exclusive {
        format!("@Decimal{kind}(value=\"{value}\", inclusive=false)")
    } else {
        format!("@Decimal{kind}(\"{value}\")")
    }
}

/// Fill both generic-annotation facets of a property.
pub fn annotate_property(ctx: &Context, prop: &mut Property) {
    prop.facets.type_with_generic_annotations = generic_type(
        ctx,
        prop.container_type.as_deref(),
        prop.is_map,
        prop.items.as_deref(),
        &prop.data_type,
        false,
    );
    prop.facets.type_with_enum_with_generic_annotations = generic_type(
        ctx,
        prop.container_type.as_deref(),
        prop.is_map,
        prop.items.as_deref(),
        &prop.datatype_with_enum,
        true,
    );
}

/// Fill both generic-annotation facets of a parameter.
pub fn annotate_parameter(ctx: &Context, param: &mut Parameter) {
    param.facets.type_with_generic_annotations = generic_type(
        ctx,
        param.container_type.as_deref(),
        param.is_map,
        param.items.as_deref(),
        &param.data_type,
        false,
    );
    param.facets.type_with_enum_with_generic_annotations = generic_type(
        ctx,
        param.container_type.as_deref(),
        param.is_map,
        param.items.as_deref(),
        &param.datatype_with_enum,
        true,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorOptions;
    use crate::tir::Constraints;

    fn string_item(pattern: Option<&str>, max_length: Option<u64>) -> Property {
        Property {
            data_type: "String".into(),
            datatype_with_enum: "String".into(),
            constraints: Constraints {
                pattern: pattern.map(str::to_string),
                max_length,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn list_of(items: Property) -> Property {
        Property {
            data_type: format!("List<{}>", items.data_type),
            datatype_with_enum: format!("List<{}>", items.datatype_with_enum),
            container_type: Some("List".into()),
            is_container: true,
            is_array: true,
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    #[test]
    fn test_primitive_list_annotations() {
        let ctx = Context::new(GeneratorOptions::java_server()).unwrap();
        let mut prop = list_of(string_item(Some("[a-zA-Z ]+"), Some(10)));
        annotate_property(&ctx, &mut prop);
        insta::assert_snapshot!(
            prop.facets.type_with_generic_annotations,
            @r#"List<@Pattern(regexp="[a-zA-Z ]+") @Size(max=10) @NotNull String>"#
        );
    }

    #[test]
    fn test_nested_containers_and_models() {
        let ctx = Context::new(GeneratorOptions::java_server()).unwrap();
        let model = Property {
            data_type: "Pet".into(),
            datatype_with_enum: "Pet".into(),
            is_model: true,
            ..Default::default()
        };
        let mut inner = list_of(model);
        inner.constraints.min_items = Some(1);
        let mut prop = list_of(inner);
        annotate_property(&ctx, &mut prop);
        assert_eq!(
            prop.facets.type_with_generic_annotations,
            "List<@Size(min=1) @NotNull List<@Valid @NotNull Pet>>"
        );
    }

    #[test]
    fn test_without_bean_validation_and_kotlin_nullability() {
        let mut options = GeneratorOptions::kotlin_server();
        options.bean_validation = false;
        let ctx = Context::new(options).unwrap();
        let mut item = string_item(Some("x"), None);
        item.is_nullable = true;
        let mut prop = list_of(item);
        annotate_property(&ctx, &mut prop);
        assert_eq!(prop.facets.type_with_generic_annotations, "List<String?>");
    }

    #[test]
    fn test_numeric_bounds() {
        assert_eq!(bound("Min", "1", true, false), "@Min(1)");
        assert_eq!(bound("Max", "10000000000", true, false), "@Max(10000000000L)");
        assert_eq!(bound("Min", "1.5", false, false), "@DecimalMin(\"1.5\")");
        assert_eq!(
            bound("Max", "2", false, true),
            "@DecimalMax(value=\"2\", inclusive=false)"
        );
    }

    #[test]
    fn test_scalars_keep_plain_type() {
        let ctx = Context::new(GeneratorOptions::default()).unwrap();
        let mut prop = string_item(Some("x"), None);
        annotate_property(&ctx, &mut prop);
        assert_eq!(prop.facets.type_with_generic_annotations, "String");
    }
}
