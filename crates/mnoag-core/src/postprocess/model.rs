use std::collections::HashSet;

use indexmap::IndexMap;

use super::{ANNOTATIONS_CLASS, ANNOTATIONS_FIELD, ANNOTATIONS_SETTER, refers_to_deprecated, take_annotations};
use crate::config::TestFramework;
use crate::context::Context;
use crate::defaults::ExampleRenderer;
use crate::tir::{Model, Property};

/// Serial ids, extra annotations, deprecated references and Spock examples.
pub(super) fn process_models(ctx: &Context, models: &mut [Model], deprecated: &HashSet<String>) {
    let groovy = ctx.options.test_framework == TestFramework::Spock;
    let required_vars: IndexMap<String, Vec<Property>> = if groovy {
        models
            .iter()
            .map(|m| (m.classname.clone(), m.required_vars.clone()))
            .collect()
    } else {
        IndexMap::new()
    };
    let examples = ExampleRenderer::new(ctx, &required_vars);

    for model in models.iter_mut() {
        model.facets.serial_id = ctx.next_serial_id();
        model.facets.annotations.class =
            take_annotations(&mut model.vendor_extensions, ANNOTATIONS_CLASS);
        for prop in properties_mut(model) {
            prop.facets.annotations.field =
                take_annotations(&mut prop.vendor_extensions, ANNOTATIONS_FIELD);
            prop.facets.annotations.setter =
                take_annotations(&mut prop.vendor_extensions, ANNOTATIONS_SETTER);
            if refers_to_deprecated(prop, deprecated) {
                prop.deprecated = true;
            }
            if groovy {
                prop.facets.groovy_example = Some(examples.property_example(prop, true));
            }
        }
    }
}

/// Every property list of a model. The lists hold copies, so each copy is
/// visited.
fn properties_mut(model: &mut Model) -> impl Iterator<Item = &mut Property> {
    model
        .vars
        .iter_mut()
        .chain(model.all_vars.iter_mut())
        .chain(model.parent_vars.iter_mut())
        .chain(model.required_vars.iter_mut())
        .chain(model.optional_vars.iter_mut())
        .chain(model.read_only_vars.iter_mut())
        .chain(model.read_write_vars.iter_mut())
        .chain(model.required_vars_without_discriminator.iter_mut())
        .chain(model.required_parent_vars_without_discriminator.iter_mut())
        .chain(model.required_args.iter_mut())
        .chain(model.parent_required_args.iter_mut())
}
