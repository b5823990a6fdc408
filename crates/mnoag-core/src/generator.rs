use crate::config::GeneratorOptions;
use crate::context::Context;
use crate::error::LowerError;
use crate::inline;
use crate::lower::{ModelLowering, OperationLowering, group_operations};
use crate::normalize;
use crate::parse::{self, spec::OpenApiSpec};
use crate::postprocess::post_process;
use crate::tir::{Tir, TirInfo, TirOptions, TirServer};
use crate::types::ModelIndex;

/// Lowers OpenAPI documents for one set of options.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Parse a JSON or YAML document and lower it.
    pub fn lower_str(&self, input: &str) -> Result<Tir, LowerError> {
        let spec = parse::load(input)?;
        self.lower(&spec)
    }

    /// Run the whole pipeline. The document is left untouched: the
    /// normalizer and the inline-model resolver work on a copy.
    pub fn lower(&self, spec: &OpenApiSpec) -> Result<Tir, LowerError> {
        let ctx = Context::new(self.options.clone())?;
        let mut spec = spec.clone();
        normalize::normalize(&mut spec, &ctx);
        inline::resolve_inline_models(&mut spec, &ctx);

        let index = ModelIndex::build(&ctx, spec.components.as_ref())?;
        let mut models = ModelLowering::new(&ctx, spec.components.as_ref(), &index).lower_all()?;
        let mut operations = OperationLowering::new(&ctx, &spec, &index).lower_all()?;
        post_process(&ctx, &mut models, &mut operations)?;
        let groups = group_operations(&ctx, &operations);

        log::info!(
            "lowered '{}': {} models, {} operations in {} groups",
            spec.info.title,
            models.len(),
            operations.len(),
            groups.len()
        );
        Ok(Tir {
            info: TirInfo {
                title: spec.info.title.clone(),
                description: spec.info.description.clone(),
                version: spec.info.version.clone(),
            },
            servers: spec
                .servers
                .iter()
                .map(|s| TirServer {
                    url: s.resolved_url(),
                    description: s.description.clone(),
                })
                .collect(),
            models,
            operations,
            groups,
            import_mapping: ctx.import_mapping(),
            options: TirOptions::new(&ctx.options, ctx.swagger),
            settings: ctx.settings.clone(),
        })
    }
}
