use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;
use regex::Regex;

use crate::config::{GeneratorOptions, SwaggerAnnotations};
use crate::dialect::{self, Dialect};
use crate::error::LowerError;
use crate::naming::NameService;
use crate::normalize;
use crate::settings::{self, GlobalSettings};
use crate::tir::SwaggerFlags;

/// Everything a lowering run reads or caches, passed explicitly to every
/// pass. Built once per [`crate::Generator::lower`] call.
#[derive(Debug)]
pub struct Context {
    pub options: GeneratorOptions,
    pub dialect: Box<dyn Dialect>,
    pub names: NameService,
    /// Dialect defaults overlaid by the caller's `typeMapping`.
    pub type_mapping: IndexMap<String, String>,
    pub settings: GlobalSettings,
    pub swagger: SwaggerFlags,
    import_mapping: RefCell<IndexMap<String, String>>,
    implicit_headers_regex: Option<Regex>,
    warned: RefCell<HashSet<String>>,
    serial_counter: Cell<i64>,
    model_names: RefCell<HashMap<String, String>>,
    creator_constructors: RefCell<HashMap<String, Vec<String>>>,
}

impl Context {
    pub fn new(mut options: GeneratorOptions) -> Result<Self, LowerError> {
        options.validate()?;
        normalize::normalize_options(&mut options);

        let dialect = dialect::for_language(options.language);
        let mut type_mapping = dialect.default_type_mapping(&options);
        for (key, value) in &options.type_mapping {
            type_mapping.insert(key.clone(), value.clone());
        }
        let mut import_mapping = dialect.default_import_mapping();
        for (key, value) in &options.import_mapping {
            import_mapping.insert(key.clone(), value.clone());
        }
        for qualified in options.schema_mapping.values() {
            if let Some((simple, _)) = split_qualified(qualified) {
                import_mapping
                    .entry(simple.to_string())
                    .or_insert_with(|| qualified.clone());
            }
        }

        let implicit_headers_regex = options
            .implicit_headers_regex
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern)
                    .map_err(|_| LowerError::configuration("implicitHeadersRegex", pattern))
            })
            .transpose()?;

        let swagger = match options.swagger_annotations() {
            SwaggerAnnotations::False => SwaggerFlags::default(),
            SwaggerAnnotations::Swagger1 => SwaggerFlags {
                generate_swagger_annotations: true,
                generate_swagger1_annotations: true,
                generate_swagger2_annotations: false,
            },
            SwaggerAnnotations::Swagger2 => SwaggerFlags {
                generate_swagger_annotations: true,
                generate_swagger1_annotations: false,
                generate_swagger2_annotations: true,
            },
        };

        Ok(Self {
            settings: GlobalSettings::from_switches(&options.openapi_normalizer),
            names: NameService::new(&options),
            dialect,
            type_mapping,
            swagger,
            import_mapping: RefCell::new(import_mapping),
            implicit_headers_regex,
            warned: RefCell::new(HashSet::new()),
            serial_counter: Cell::new(0),
            model_names: RefCell::new(HashMap::new()),
            creator_constructors: RefCell::new(HashMap::new()),
            options,
        })
    }

    pub fn is_server(&self) -> bool {
        self.options.is_server()
    }

    /// Log a warning the first time `key` is seen in this run.
    pub fn warn_once(&self, key: &str, message: impl FnOnce() -> String) {
        if self.warned.borrow_mut().insert(key.to_string()) {
            log::warn!("{}", message());
        }
    }

    /// Mapped type name for a `typeMapping` key.
    pub fn mapped_type(&self, key: &str) -> Result<&str, LowerError> {
        self.type_mapping
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| LowerError::type_resolution(key, "no type mapping"))
    }

    /// Class name of a component schema, cached per run.
    pub fn model_name(&self, schema_key: &str) -> Result<String, LowerError> {
        if let Some(name) = self.model_names.borrow().get(schema_key) {
            return Ok(name.clone());
        }
        let name = self.names.to_model_name(schema_key)?;
        self.model_names
            .borrow_mut()
            .insert(schema_key.to_string(), name.clone());
        Ok(name)
    }

    /// Reduce a possibly fully-qualified type to its simple name, record the
    /// qualified form in the import mapping and add the simple name to
    /// `imports`.
    pub fn make_sure_imported(&self, type_name: &str, imports: &mut BTreeSet<String>) -> String {
        match split_qualified(type_name) {
            Some((simple, _)) => {
                self.import_mapping
                    .borrow_mut()
                    .entry(simple.to_string())
                    .or_insert_with(|| type_name.to_string());
                imports.insert(simple.to_string());
                simple.to_string()
            }
            None => {
                if self.needs_import(type_name) {
                    imports.insert(type_name.to_string());
                }
                type_name.to_string()
            }
        }
    }

    /// Whether a simple type name has to be imported by generated code.
    pub fn needs_import(&self, type_name: &str) -> bool {
        !type_name.is_empty()
            && !type_name.contains(['<', '[', ' '])
            && !self.dialect.builtin_types().contains(&type_name)
    }

    pub fn import_mapping(&self) -> IndexMap<String, String> {
        self.import_mapping.borrow().clone()
    }

    /// Qualify a simple model name with the import mapping or the model
    /// package.
    pub fn qualified_model_name(&self, simple: &str) -> String {
        self.import_mapping
            .borrow()
            .get(simple)
            .cloned()
            .unwrap_or_else(|| format!("{}.{simple}", self.options.model_package))
    }

    pub fn is_implicit_header(&self, name: &str) -> bool {
        self.implicit_headers_regex
            .as_ref()
            .is_some_and(|re| re.is_match(name))
    }

    pub fn next_serial_id(&self) -> i64 {
        let mut counter = self.serial_counter.get();
        let id = settings::next_serial_id(&mut counter);
        self.serial_counter.set(counter);
        id
    }

    /// Remember the constructor argument names of a model.
    pub fn record_constructor(&self, classname: &str, args: Vec<String>) {
        self.creator_constructors
            .borrow_mut()
            .insert(classname.to_string(), args);
    }

    pub fn constructor_args(&self, classname: &str) -> Option<Vec<String>> {
        self.creator_constructors.borrow().get(classname).cloned()
    }
}

/// Split `io.example.Page` into `("Page", "io.example")`. `None` for simple
/// names.
pub fn split_qualified(type_name: &str) -> Option<(&str, &str)> {
    let start = type_name.find(|c: char| c.is_ascii_uppercase())?;
    if start == 0 || !type_name[..start].ends_with('.') {
        return None;
    }
    Some((&type_name[start..], type_name[..start].trim_end_matches('.')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_args_are_per_context() {
        let ctx = Context::new(GeneratorOptions::java_server()).unwrap();
        ctx.record_constructor("BookInfo", vec!["name".into()]);
        assert_eq!(ctx.constructor_args("BookInfo"), Some(vec!["name".to_string()]));
        let fresh = Context::new(GeneratorOptions::java_server()).unwrap();
        assert_eq!(fresh.constructor_args("BookInfo"), None);
    }

    #[test]
    fn test_split_qualified() {
        assert_eq!(
            split_qualified("io.micronaut.data.model.Pageable"),
            Some(("Pageable", "io.micronaut.data.model"))
        );
        assert_eq!(split_qualified("Pageable"), None);
        assert_eq!(split_qualified("List<Pet>"), None);
    }

    #[test]
    fn test_make_sure_imported_records_mapping() {
        let ctx = Context::new(GeneratorOptions::default()).unwrap();
        let mut imports = BTreeSet::new();
        let simple = ctx.make_sure_imported("io.micronaut.data.model.Pageable", &mut imports);
        assert_eq!(simple, "Pageable");
        assert!(imports.contains("Pageable"));
        assert_eq!(
            ctx.import_mapping()["Pageable"],
            "io.micronaut.data.model.Pageable"
        );

        let simple = ctx.make_sure_imported("String", &mut imports);
        assert_eq!(simple, "String");
        assert!(!imports.contains("String"));
    }

    #[test]
    fn test_type_mapping_overlay() {
        let mut options = GeneratorOptions::default();
        options
            .type_mapping
            .insert("DateTime".into(), "Instant".into());
        let ctx = Context::new(options).unwrap();
        assert_eq!(ctx.mapped_type("DateTime").unwrap(), "Instant");
        assert_eq!(ctx.mapped_type("integer").unwrap(), "Integer");
        assert!(ctx.mapped_type("nope").is_err());
    }

    #[test]
    fn test_invalid_implicit_header_regex() {
        let mut options = GeneratorOptions::default();
        options.implicit_headers_regex = Some("(".into());
        assert!(matches!(
            Context::new(options),
            Err(LowerError::Configuration { .. })
        ));
    }

    #[test]
    fn test_model_name_cache() {
        let ctx = Context::new(GeneratorOptions::default()).unwrap();
        assert_eq!(ctx.model_name("pet").unwrap(), "Pet");
        assert_eq!(ctx.model_name("pet").unwrap(), "Pet");
    }
}
