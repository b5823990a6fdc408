use serde::Serialize;

use super::facets::SwaggerFlags;
use crate::config::{
    DateTimeFormat, GeneratorLanguage, GeneratorOptions, GeneratorTarget, SerializationLibrary,
    TestFramework,
};

/// The options templates read directly, with derived switches resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TirOptions {
    pub language: GeneratorLanguage,
    pub target: GeneratorTarget,
    pub invoker_package: String,
    pub api_package: String,
    pub model_package: String,
    pub artifact_id: String,
    pub application_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub use_jakarta_ee: bool,
    /// `jakarta` or `javax`.
    pub javax_package: &'static str,
    pub use_optional: bool,
    pub use_bean_validation: bool,
    pub lombok: bool,
    pub use_auth: bool,
    pub reactive: bool,
    pub flux_for_arrays: bool,
    pub plural: bool,
    pub visitable: bool,
    pub generated_annotation: bool,
    pub use_one_of_interfaces: bool,
    pub use_enum_case_insensitive: bool,
    pub required_properties_in_constructor: bool,
    pub generate_http_response_always: bool,
    pub generate_http_response_where_required: bool,
    pub generate_operation_only_for_first_tag: bool,

    pub serialization_library: SerializationLibrary,
    pub jackson: bool,
    pub micronaut_serde_jackson: bool,

    pub date_library: DateTimeFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_format: Option<String>,

    pub test_framework: TestFramework,
    pub is_test_junit: bool,
    pub is_test_spock: bool,
    pub is_test_kotest: bool,

    #[serde(flatten)]
    pub swagger: SwaggerFlags,
}

impl TirOptions {
    pub fn new(options: &GeneratorOptions, swagger: SwaggerFlags) -> Self {
        let serde_jackson =
            options.serialization_library == SerializationLibrary::MicronautSerdeJackson;
        Self {
            language: options.language,
            target: options.target,
            invoker_package: options.invoker_package.clone(),
            api_package: options.api_package.clone(),
            model_package: options.model_package.clone(),
            artifact_id: options.artifact_id.clone(),
            application_name: options.application_name.clone(),
            title: options.title.clone(),
            use_jakarta_ee: options.use_jakarta_ee,
            javax_package: if options.use_jakarta_ee { "jakarta" } else { "javax" },
            use_optional: options.optional,
            use_bean_validation: options.bean_validation,
            lombok: options.lombok,
            use_auth: options.use_auth,
            reactive: options.reactive,
            flux_for_arrays: options.flux_for_arrays,
            plural: options.plural,
            visitable: options.visitable,
            generated_annotation: options.generated_annotation,
            use_one_of_interfaces: options.use_one_of_interfaces,
            use_enum_case_insensitive: options.use_enum_case_insensitive,
            required_properties_in_constructor: options.required_properties_in_constructor,
            generate_http_response_always: options.generate_http_response_always,
            generate_http_response_where_required: options.generate_http_response_where_required,
            generate_operation_only_for_first_tag: options.operation_only_for_first_tag(),
            serialization_library: options.serialization_library,
            jackson: true,
            micronaut_serde_jackson: serde_jackson,
            date_library: options.date_time_format,
            date_format: options.date_format.clone(),
            date_time_format: options.date_time_pattern.clone(),
            test_framework: options.test_framework,
            is_test_junit: options.test_framework == TestFramework::Junit5,
            is_test_spock: options.test_framework == TestFramework::Spock,
            is_test_kotest: options.test_framework == TestFramework::Kotest,
            swagger,
        }
    }
}

impl Default for TirOptions {
    fn default() -> Self {
        Self::new(&GeneratorOptions::default(), SwaggerFlags::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javax_package_and_serialization_flags() {
        let mut options = GeneratorOptions::java_server();
        let view = TirOptions::new(&options, SwaggerFlags::default());
        assert_eq!(view.javax_package, "jakarta");
        assert!(view.jackson);
        assert!(view.micronaut_serde_jackson);
        assert!(view.is_test_junit);

        options.use_jakarta_ee = false;
        options.serialization_library = SerializationLibrary::Jackson;
        options.date_time_pattern = Some("yyyy-MM-dd'T'HH:mm".into());
        let view = TirOptions::new(&options, SwaggerFlags::default());
        assert_eq!(view.javax_package, "javax");
        assert!(!view.micronaut_serde_jackson);

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["javaxPackage"], "javax");
        assert_eq!(value["dateTimeFormat"], "yyyy-MM-dd'T'HH:mm");
        assert_eq!(value["dateLibrary"], "ZONED_DATETIME");
        assert_eq!(value["serializationLibrary"], "jackson");
        assert_eq!(value["generateSwaggerAnnotations"], false);
    }
}
