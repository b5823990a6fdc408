use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LowerError};
use crate::parse::parameter::ParameterLocation;

/// Every switch, mapping table and ordered list that steers the lowering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub language: GeneratorLanguage,
    pub target: GeneratorTarget,

    pub bean_validation: bool,
    pub optional: bool,
    pub reactive: bool,
    pub flux_for_arrays: bool,
    pub generate_http_response_always: bool,
    pub generate_http_response_where_required: bool,
    /// `None` picks the target default: swagger2 for servers, off for clients.
    pub generate_swagger_annotations: Option<SwaggerAnnotations>,
    pub use_one_of_interfaces: bool,
    pub use_enum_case_insensitive: bool,
    pub required_properties_in_constructor: bool,
    /// `None` picks the target default: on for servers, off for clients.
    pub generate_operation_only_for_first_tag: Option<bool>,
    pub implicit_headers: bool,
    pub use_jakarta_ee: bool,
    pub sort_params_by_required_flag: bool,
    pub skip_operation_example: bool,
    /// Accepted for compatibility; the lowering does not consult it.
    pub skip_sorting_operations: bool,
    pub ensure_unique_params: bool,
    pub allow_unicode_identifiers: bool,
    pub prepend_form_or_body_parameters: bool,
    pub generated_annotation: bool,
    pub plural: bool,
    pub visitable: bool,
    pub container_default_to_null: bool,
    pub remove_operation_id_prefix: bool,
    pub lombok: bool,
    /// Read by server templates to emit `@Secured` from `x-roles`.
    pub use_auth: bool,

    pub test_framework: TestFramework,
    pub serialization_library: SerializationLibrary,
    #[serde(alias = "dateLibrary")]
    pub date_time_format: DateTimeFormat,

    pub api_package: String,
    pub model_package: String,
    pub invoker_package: String,
    pub artifact_id: String,
    pub application_name: String,
    /// Client service name.
    pub title: Option<String>,
    pub date_format: Option<String>,
    pub date_time_pattern: Option<String>,
    pub api_name_prefix: String,
    pub api_name_suffix: String,
    pub model_name_prefix: String,
    pub model_name_suffix: String,
    pub implicit_headers_regex: Option<String>,
    pub remove_operation_id_prefix_delimiter: String,
    pub remove_operation_id_prefix_count: usize,

    pub schema_mapping: IndexMap<String, String>,
    pub import_mapping: IndexMap<String, String>,
    pub name_mapping: IndexMap<String, String>,
    pub parameter_name_mapping: IndexMap<String, String>,
    pub enum_name_mapping: IndexMap<String, String>,
    pub model_name_mapping: IndexMap<String, String>,
    pub type_mapping: IndexMap<String, String>,
    pub inline_schema_name_mapping: IndexMap<String, String>,
    pub inline_schema_option: IndexMap<String, String>,
    pub openapi_normalizer: IndexMap<String, String>,

    pub parameter_mappings: Vec<ParameterMapping>,
    pub response_body_mappings: Vec<ResponseBodyMapping>,

    pub reserved_words_augment: Vec<String>,
    pub additional_model_type_annotations: Vec<String>,
    pub additional_enum_type_annotations: Vec<String>,
    pub additional_one_of_type_annotations: Vec<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        let mut inline_schema_option = IndexMap::new();
        inline_schema_option.insert(RESOLVE_INLINE_ENUMS.to_string(), "true".to_string());
        Self {
            language: GeneratorLanguage::Java,
            target: GeneratorTarget::Server,
            bean_validation: true,
            optional: false,
            reactive: true,
            flux_for_arrays: false,
            generate_http_response_always: false,
            generate_http_response_where_required: true,
            generate_swagger_annotations: None,
            use_one_of_interfaces: true,
            use_enum_case_insensitive: false,
            required_properties_in_constructor: true,
            generate_operation_only_for_first_tag: None,
            implicit_headers: false,
            use_jakarta_ee: true,
            sort_params_by_required_flag: true,
            skip_operation_example: false,
            skip_sorting_operations: false,
            ensure_unique_params: true,
            allow_unicode_identifiers: false,
            prepend_form_or_body_parameters: false,
            generated_annotation: true,
            plural: true,
            visitable: false,
            container_default_to_null: false,
            remove_operation_id_prefix: false,
            lombok: false,
            use_auth: false,
            test_framework: TestFramework::Junit5,
            serialization_library: SerializationLibrary::MicronautSerdeJackson,
            date_time_format: DateTimeFormat::ZonedDatetime,
            api_package: "org.openapitools.api".to_string(),
            model_package: "org.openapitools.model".to_string(),
            invoker_package: "org.openapitools".to_string(),
            artifact_id: "openapi-micronaut".to_string(),
            application_name: "openapi-micronaut".to_string(),
            title: None,
            date_format: None,
            date_time_pattern: None,
            api_name_prefix: String::new(),
            api_name_suffix: "Api".to_string(),
            model_name_prefix: String::new(),
            model_name_suffix: String::new(),
            implicit_headers_regex: None,
            remove_operation_id_prefix_delimiter: "_".to_string(),
            remove_operation_id_prefix_count: 1,
            schema_mapping: IndexMap::new(),
            import_mapping: IndexMap::new(),
            name_mapping: IndexMap::new(),
            parameter_name_mapping: IndexMap::new(),
            enum_name_mapping: IndexMap::new(),
            model_name_mapping: IndexMap::new(),
            type_mapping: IndexMap::new(),
            inline_schema_name_mapping: IndexMap::new(),
            inline_schema_option,
            openapi_normalizer: IndexMap::new(),
            parameter_mappings: Vec::new(),
            response_body_mappings: Vec::new(),
            reserved_words_augment: Vec::new(),
            additional_model_type_annotations: Vec::new(),
            additional_enum_type_annotations: Vec::new(),
            additional_one_of_type_annotations: Vec::new(),
        }
    }
}

/// Inline-schema option keys understood by the inline-model resolver.
pub const RESOLVE_INLINE_ENUMS: &str = "RESOLVE_INLINE_ENUMS";
pub const SKIP_SCHEMA_REUSE: &str = "SKIP_SCHEMA_REUSE";

impl GeneratorOptions {
    pub fn java_server() -> Self {
        Self::default()
    }

    pub fn java_client() -> Self {
        Self {
            target: GeneratorTarget::Client,
            ..Self::default()
        }
    }

    pub fn kotlin_server() -> Self {
        Self {
            language: GeneratorLanguage::Kotlin,
            test_framework: TestFramework::Kotest,
            ..Self::default()
        }
    }

    pub fn kotlin_client() -> Self {
        Self {
            language: GeneratorLanguage::Kotlin,
            target: GeneratorTarget::Client,
            test_framework: TestFramework::Kotest,
            ..Self::default()
        }
    }

    pub fn is_server(&self) -> bool {
        self.target == GeneratorTarget::Server
    }

    pub fn operation_only_for_first_tag(&self) -> bool {
        self.generate_operation_only_for_first_tag
            .unwrap_or_else(|| self.is_server())
    }

    pub fn swagger_annotations(&self) -> SwaggerAnnotations {
        self.generate_swagger_annotations.unwrap_or(match self.target {
            GeneratorTarget::Server => SwaggerAnnotations::Swagger2,
            GeneratorTarget::Client => SwaggerAnnotations::False,
        })
    }

    /// Read a boolean-valued entry of `inlineSchemaOption`.
    pub fn inline_option(&self, key: &str) -> bool {
        self.inline_schema_option
            .get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Apply one string-keyed option, the way build plugins pass them.
    ///
    /// Unknown keys are ignored with a warning. Values that do not parse
    /// for the option's type are configuration errors.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<(), LowerError> {
        let flag = || parse_bool(key, value);
        match key {
            "language" => self.language = value.parse()?,
            "target" => self.target = value.parse()?,
            "testFramework" | "test" => self.test_framework = value.parse()?,
            "serializationLibrary" => self.serialization_library = value.parse()?,
            "dateLibrary" => self.date_time_format = value.parse()?,
            "dateTimeFormat" => match value.parse::<DateTimeFormat>() {
                Ok(library) => self.date_time_format = library,
                Err(_) => self.date_time_pattern = Some(value.to_string()),
            },
            "generateSwaggerAnnotations" => {
                self.generate_swagger_annotations = Some(value.parse()?)
            }
            "useBeanValidation" | "beanValidation" => self.bean_validation = flag()?,
            "useOptional" | "optional" => self.optional = flag()?,
            "reactive" => self.reactive = flag()?,
            "fluxForArrays" => self.flux_for_arrays = flag()?,
            "generateHttpResponseAlways" => self.generate_http_response_always = flag()?,
            "generateHttpResponseWhereRequired" => {
                self.generate_http_response_where_required = flag()?
            }
            "useOneOfInterfaces" => self.use_one_of_interfaces = flag()?,
            "useEnumCaseInsensitive" => self.use_enum_case_insensitive = flag()?,
            "requiredPropertiesInConstructor" => {
                self.required_properties_in_constructor = flag()?
            }
            "generateOperationOnlyForFirstTag" => {
                self.generate_operation_only_for_first_tag = Some(flag()?)
            }
            "implicitHeaders" => self.implicit_headers = flag()?,
            "useJakartaEe" => self.use_jakarta_ee = flag()?,
            "sortParamsByRequiredFlag" => self.sort_params_by_required_flag = flag()?,
            "skipOperationExample" => self.skip_operation_example = flag()?,
            "skipSortingOperations" => self.skip_sorting_operations = flag()?,
            "ensureUniqueParams" => self.ensure_unique_params = flag()?,
            "allowUnicodeIdentifiers" => self.allow_unicode_identifiers = flag()?,
            "prependFormOrBodyParameters" => self.prepend_form_or_body_parameters = flag()?,
            "generatedAnnotation" => self.generated_annotation = flag()?,
            "plural" => self.plural = flag()?,
            "visitable" => self.visitable = flag()?,
            "containerDefaultToNull" => self.container_default_to_null = flag()?,
            "removeOperationIdPrefix" => self.remove_operation_id_prefix = flag()?,
            "lombok" => self.lombok = flag()?,
            "useAuth" => self.use_auth = flag()?,
            "title" => self.title = Some(value.to_string()),
            "removeOperationIdPrefixDelimiter" => {
                self.remove_operation_id_prefix_delimiter = value.to_string()
            }
            "removeOperationIdPrefixCount" => {
                self.remove_operation_id_prefix_count = value
                    .parse()
                    .map_err(|_| LowerError::configuration(key, value))?
            }
            "apiPackage" => self.api_package = value.to_string(),
            "modelPackage" => self.model_package = value.to_string(),
            "invokerPackage" => self.invoker_package = value.to_string(),
            "artifactId" => self.artifact_id = value.to_string(),
            "applicationName" => self.application_name = value.to_string(),
            "dateFormat" => self.date_format = Some(value.to_string()),
            "dateTimePattern" => self.date_time_pattern = Some(value.to_string()),
            "apiNamePrefix" => self.api_name_prefix = value.to_string(),
            "apiNameSuffix" => self.api_name_suffix = value.to_string(),
            "modelNamePrefix" => self.model_name_prefix = value.to_string(),
            "modelNameSuffix" => self.model_name_suffix = value.to_string(),
            "implicitHeadersRegex" => self.implicit_headers_regex = Some(value.to_string()),
            other => log::warn!("ignoring unknown option '{other}'"),
        }
        Ok(())
    }

    /// Fail on option values that only become invalid in combination.
    pub fn validate(&self) -> Result<(), LowerError> {
        if let Some(pattern) = &self.implicit_headers_regex {
            regex::Regex::new(pattern)
                .map_err(|_| LowerError::configuration("implicitHeadersRegex", pattern))?;
        }
        if self.language == GeneratorLanguage::Kotlin && self.test_framework == TestFramework::Spock
        {
            return Err(LowerError::configuration(
                "testFramework",
                self.test_framework.to_string(),
            ));
        }
        if self.language == GeneratorLanguage::Java && self.test_framework == TestFramework::Kotest
        {
            return Err(LowerError::configuration(
                "testFramework",
                self.test_framework.to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, LowerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(LowerError::configuration(key, value)),
    }
}

/// Declares a closed option enumeration: serde names, `FromStr` that fails
/// with a configuration error naming the option, and `Display`.
macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $option:literal {
            $($variant:ident => $text:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl FromStr for $name {
            type Err = LowerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text $(| $alias)* => Ok(Self::$variant),)+
                    other => Err(LowerError::configuration($option, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($text),)+
                }
            }
        }
    };
}

option_enum! {
    /// Output dialect.
    GeneratorLanguage, "language" {
        Java => "java" | "JAVA",
        Kotlin => "kotlin" | "KOTLIN",
    }
}

option_enum! {
    /// Whether controllers or declarative clients are generated.
    GeneratorTarget, "target" {
        Server => "server" | "SERVER",
        Client => "client" | "CLIENT",
    }
}

option_enum! {
    /// Test skeleton flavour.
    TestFramework, "testFramework" {
        Junit5 => "junit5" | "junit" | "JUNIT5",
        Spock => "spock" | "SPOCK",
        Kotest => "kotest" | "KOTEST",
    }
}

option_enum! {
    SerializationLibrary, "serializationLibrary" {
        Jackson => "jackson" | "JACKSON",
        MicronautSerdeJackson => "micronaut_serde_jackson" | "MICRONAUT_SERDE_JACKSON",
    }
}

option_enum! {
    /// Target type of `date-time` strings.
    DateTimeFormat, "dateTimeFormat" {
        OffsetDatetime => "OFFSET_DATETIME" | "offset_datetime",
        ZonedDatetime => "ZONED_DATETIME" | "zoned_datetime",
        LocalDatetime => "LOCAL_DATETIME" | "local_datetime",
    }
}

option_enum! {
    SwaggerAnnotations, "generateSwaggerAnnotations" {
        False => "false",
        Swagger1 => "swagger1",
        Swagger2 => "swagger2" | "true",
    }
}

impl DateTimeFormat {
    /// The simple type name `date-time` strings lower to.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::OffsetDatetime => "OffsetDateTime",
            Self::ZonedDatetime => "ZonedDateTime",
            Self::LocalDatetime => "LocalDateTime",
        }
    }
}

/// Location selector of a parameter mapping. Extends the document's
/// parameter locations with the two body kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MappedLocation {
    Query,
    Header,
    Path,
    Cookie,
    Body,
    Form,
}

impl From<ParameterLocation> for MappedLocation {
    fn from(location: ParameterLocation) -> Self {
        match location {
            ParameterLocation::Query => Self::Query,
            ParameterLocation::Header => Self::Header,
            ParameterLocation::Path => Self::Path,
            ParameterLocation::Cookie => Self::Cookie,
        }
    }
}

/// Replaces matching parameters by a single parameter of a custom type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterMapping {
    pub name: Option<String>,
    pub location: Option<MappedLocation>,
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    pub mapped_type: Option<String>,
    pub mapped_name: Option<String>,
    pub is_validated: bool,
}

impl ParameterMapping {
    /// Every selector that is present must equal the parameter's value.
    pub fn does_match(&self, base_name: &str, location: MappedLocation, data_type: &str) -> bool {
        if self.name.as_deref().is_some_and(|n| n != base_name) {
            return false;
        }
        if self.location.is_some_and(|l| l != location) {
            return false;
        }
        if self.data_type.as_deref().is_some_and(|t| t != data_type) {
            return false;
        }
        true
    }
}

/// Wraps the return type when the response declares a given header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseBodyMapping {
    pub header_name: String,
    pub mapped_body_type: Option<String>,
    pub is_list_wrapper: bool,
    pub is_validated: bool,
}

impl ResponseBodyMapping {
    pub fn does_match(&self, header: &str, is_array: bool) -> bool {
        self.header_name.eq_ignore_ascii_case(header) && self.is_list_wrapper == is_array
    }
}

/// Default options file name.
pub const OPTIONS_FILE_NAME: &str = "mnoag.yaml";

/// Load options from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_options(path: &Path) -> Result<Option<GeneratorOptions>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let options: GeneratorOptions =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(options))
}

/// Generate the default options file content.
pub fn default_options_content() -> &'static str {
    r#"# mnoag lowering options
language: java            # java | kotlin
target: server            # server | client
testFramework: junit5     # junit5 | spock | kotest
serializationLibrary: micronaut_serde_jackson   # jackson | micronaut_serde_jackson
dateLibrary: ZONED_DATETIME                      # OFFSET_DATETIME | ZONED_DATETIME | LOCAL_DATETIME

beanValidation: true
reactive: true
fluxForArrays: false
generateHttpResponseAlways: false
generateHttpResponseWhereRequired: true
useOneOfInterfaces: true
requiredPropertiesInConstructor: true
plural: true
lombok: false
useAuth: false
# dateTimePattern: "yyyy-MM-dd'T'HH:mm:ss"
# generateOperationOnlyForFirstTag: true   # defaults to true for servers
# generateSwaggerAnnotations: swagger2     # false | swagger1 | swagger2

apiPackage: org.openapitools.api
modelPackage: org.openapitools.model
apiNameSuffix: Api

typeMapping: {}
importMapping: {}
schemaMapping: {}
inlineSchemaOption:
  RESOLVE_INLINE_ENUMS: "true"

parameterMappings: []
  # - name: X-Page
  #   location: HEADER
  #   mappedType: io.micronaut.data.model.Pageable
  #   mappedName: pageable
responseBodyMappings: []
  # - headerName: X-Total-Count
  #   mappedBodyType: Page
  #   isListWrapper: true
"#
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_options() {
        let options = GeneratorOptions::default();
        assert!(options.bean_validation);
        assert!(options.reactive);
        assert!(!options.flux_for_arrays);
        assert!(options.generate_http_response_where_required);
        assert!(options.use_one_of_interfaces);
        assert!(options.plural);
        assert!(options.inline_option(RESOLVE_INLINE_ENUMS));
        assert!(options.operation_only_for_first_tag());
        assert_eq!(options.swagger_annotations(), SwaggerAnnotations::Swagger2);
        assert_eq!(options.date_time_format.type_name(), "ZonedDateTime");
    }

    #[test]
    fn test_client_defaults_differ() {
        let options = GeneratorOptions::java_client();
        assert!(!options.operation_only_for_first_tag());
        assert_eq!(options.swagger_annotations(), SwaggerAnnotations::False);
    }

    #[test]
    fn test_parse_options_yaml() {
        let yaml = r#"
language: kotlin
target: client
fluxForArrays: true
testFramework: kotest
dateTimeFormat: OFFSET_DATETIME
typeMapping:
  DateTime: Instant
parameterMappings:
  - name: X-Page
    location: HEADER
    mappedType: io.micronaut.data.model.Pageable
    mappedName: pageable
    isValidated: true
responseBodyMappings:
  - headerName: X-Total-Count
    mappedBodyType: Page
    isListWrapper: true
"#;
        let options: GeneratorOptions = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(options.language, GeneratorLanguage::Kotlin);
        assert_eq!(options.target, GeneratorTarget::Client);
        assert!(options.flux_for_arrays);
        assert_eq!(options.test_framework, TestFramework::Kotest);
        assert_eq!(options.date_time_format, DateTimeFormat::OffsetDatetime);
        assert_eq!(options.type_mapping["DateTime"], "Instant");
        assert_eq!(options.parameter_mappings.len(), 1);
        assert_eq!(
            options.parameter_mappings[0].location,
            Some(MappedLocation::Header)
        );
        assert!(options.response_body_mappings[0].is_list_wrapper);
        // Defaults applied
        assert!(options.reactive);
    }

    #[test]
    fn test_unknown_enum_value_is_configuration_error() {
        let mut options = GeneratorOptions::default();
        let err = options.set_option("testFramework", "mocha").unwrap_err();
        assert!(matches!(
            err,
            LowerError::Configuration { ref option, ref value }
                if option == "testFramework" && value == "mocha"
        ));
        assert!(options.set_option("serializationLibrary", "gson").is_err());
        assert!(options.set_option("generateSwaggerAnnotations", "swagger3").is_err());
    }

    #[test]
    fn test_set_option_flags() {
        let mut options = GeneratorOptions::default();
        options.set_option("reactive", "false").unwrap();
        options.set_option("generateOperationOnlyForFirstTag", "false").unwrap();
        options.set_option("dateTimeFormat", "LOCAL_DATETIME").unwrap();
        assert!(!options.reactive);
        assert!(!options.operation_only_for_first_tag());
        assert_eq!(options.date_time_format, DateTimeFormat::LocalDatetime);
        assert!(options.set_option("plural", "maybe").is_err());
    }

    #[test]
    fn test_date_time_format_takes_a_pattern() {
        let mut options = GeneratorOptions::default();
        options
            .set_option("dateTimeFormat", "yyyy-MM-dd'T'HH:mm")
            .unwrap();
        assert_eq!(options.date_time_pattern.as_deref(), Some("yyyy-MM-dd'T'HH:mm"));
        assert_eq!(options.date_time_format, DateTimeFormat::ZonedDatetime);

        options.set_option("dateLibrary", "OFFSET_DATETIME").unwrap();
        assert_eq!(options.date_time_format, DateTimeFormat::OffsetDatetime);
        assert!(options.set_option("dateLibrary", "yyyy").is_err());
    }

    #[test]
    fn test_lombok_auth_and_title() {
        let mut options = GeneratorOptions::java_client();
        assert!(!options.lombok);
        assert!(!options.use_auth);
        options.set_option("lombok", "true").unwrap();
        options.set_option("useAuth", "true").unwrap();
        options.set_option("title", "Pet client").unwrap();
        assert!(options.lombok);
        assert!(options.use_auth);
        assert_eq!(options.title.as_deref(), Some("Pet client"));
    }

    #[test]
    fn test_validate_rejects_bad_regex_and_framework() {
        let mut options = GeneratorOptions {
            implicit_headers_regex: Some("(".to_string()),
            ..Default::default()
        };
        assert!(options.validate().is_err());
        options.implicit_headers_regex = None;
        options.test_framework = TestFramework::Kotest;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_parameter_mapping_selectors() {
        let mapping = ParameterMapping {
            name: Some("X-Page".into()),
            location: Some(MappedLocation::Header),
            ..Default::default()
        };
        assert!(mapping.does_match("X-Page", MappedLocation::Header, "Integer"));
        assert!(!mapping.does_match("X-Page", MappedLocation::Query, "Integer"));
        assert!(!mapping.does_match("page", MappedLocation::Header, "Integer"));
    }

    #[test]
    fn test_load_options_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "reactive: false\napiNameSuffix: Controller").unwrap();
        let options = load_options(file.path()).unwrap().unwrap();
        assert!(!options.reactive);
        assert_eq!(options.api_name_suffix, "Controller");

        let missing = load_options(Path::new("/nonexistent/mnoag.yaml")).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_default_options_content_parses() {
        let options: GeneratorOptions =
            serde_yaml_ng::from_str(default_options_content()).unwrap();
        assert_eq!(options.language, GeneratorLanguage::Java);
        assert!(options.inline_option(RESOLVE_INLINE_ENUMS));
    }
}
