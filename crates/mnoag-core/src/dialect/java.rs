use indexmap::IndexMap;

use super::{
    Dialect, FRAMEWORK_RESERVED_WORDS, NumberKind, Scalar, ScalarName, common_import_mapping,
    escape_text, file_types,
};
use crate::config::{GeneratorLanguage, GeneratorOptions};

const KEYWORDS: &[&str] = &[
    // generated client locals
    "localVarPath",
    "localVarQueryParams",
    "localVarCollectionQueryParams",
    "localVarHeaderParams",
    "localVarCookieParams",
    "localVarFormParams",
    "localVarPostBody",
    "localVarAccepts",
    "localVarAccept",
    "localVarContentTypes",
    "localVarContentType",
    "localVarAuthNames",
    "localReturnType",
    "ApiClient",
    "ApiException",
    "ApiResponse",
    "Configuration",
    "StringUtil",
    // language
    "abstract",
    "continue",
    "for",
    "new",
    "switch",
    "assert",
    "default",
    "if",
    "package",
    "synchronized",
    "boolean",
    "do",
    "goto",
    "private",
    "this",
    "break",
    "double",
    "implements",
    "protected",
    "throw",
    "byte",
    "else",
    "import",
    "public",
    "throws",
    "case",
    "enum",
    "instanceof",
    "return",
    "transient",
    "catch",
    "extends",
    "int",
    "short",
    "try",
    "char",
    "final",
    "interface",
    "static",
    "void",
    "class",
    "finally",
    "long",
    "strictfp",
    "volatile",
    "const",
    "float",
    "native",
    "super",
    "while",
    "null",
    "record",
    "var",
    "yield",
    // capitalised forms of the types generated code refers to
    "Object",
    "List",
    "File",
    "OffsetDateTime",
    "LocalDate",
    "LocalTime",
];

const BUILTIN_TYPES: &[&str] = &[
    "String",
    "boolean",
    "Boolean",
    "Double",
    "double",
    "Integer",
    "int",
    "Long",
    "long",
    "Float",
    "float",
    "Object",
    "byte[]",
    "Character",
    "char",
    "Byte",
    "byte",
    "Short",
    "short",
    "Void",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Java;

impl Dialect for Java {
    fn language(&self) -> GeneratorLanguage {
        GeneratorLanguage::Java
    }

    fn reserved_words(&self) -> Vec<&'static str> {
        KEYWORDS
            .iter()
            .chain(FRAMEWORK_RESERVED_WORDS)
            .copied()
            .collect()
    }

    fn default_type_mapping(&self, options: &GeneratorOptions) -> IndexMap<String, String> {
        let (file, response_file) = file_types(options);
        let date_time = options.date_time_format.type_name();
        [
            ("integer", "Integer"),
            ("long", "Long"),
            ("number", "BigDecimal"),
            ("decimal", "BigDecimal"),
            ("float", "Float"),
            ("double", "Double"),
            ("boolean", "Boolean"),
            ("string", "String"),
            ("char", "Character"),
            ("byte", "Byte"),
            ("date", "LocalDate"),
            ("DateTime", date_time),
            ("UUID", "UUID"),
            ("URI", "URI"),
            ("ByteArray", "byte[]"),
            ("binary", file),
            ("file", file),
            ("responseFile", response_file),
            ("object", "Object"),
            ("AnyType", "Object"),
            ("array", "List"),
            ("set", "Set"),
            ("map", "Map"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn default_import_mapping(&self) -> IndexMap<String, String> {
        let mut mapping = common_import_mapping();
        for (simple, qualified) in [
            ("List", "java.util.List"),
            ("Set", "java.util.Set"),
            ("Map", "java.util.Map"),
            ("ArrayList", "java.util.ArrayList"),
            ("LinkedHashSet", "java.util.LinkedHashSet"),
            ("HashMap", "java.util.HashMap"),
            ("HashSet", "java.util.HashSet"),
            ("Arrays", "java.util.Arrays"),
            ("Function", "java.util.function.Function"),
        ] {
            mapping.insert(simple.to_string(), qualified.to_string());
        }
        mapping
    }

    fn builtin_types(&self) -> &'static [&'static str] {
        BUILTIN_TYPES
    }

    fn scalar(&self, scalar: Scalar) -> ScalarName {
        let (boxed, primitive) = match scalar {
            Scalar::Char => ("Character", "char"),
            Scalar::Byte => ("Byte", "byte"),
            Scalar::Short => ("Short", "short"),
            Scalar::Int => ("Integer", "int"),
            Scalar::Long => ("Long", "long"),
            Scalar::Float => ("Float", "float"),
            Scalar::Double => ("Double", "double"),
        };
        ScalarName {
            boxed,
            primitive: Some(primitive),
        }
    }

    fn supports_primitives(&self) -> bool {
        true
    }

    fn escape_reserved_word(&self, word: &str) -> String {
        format!("_{word}")
    }

    fn unescape(&self, name: &str, is_reserved: &dyn Fn(&str) -> bool) -> String {
        match name.strip_prefix('_') {
            Some(rest) if is_reserved(rest) => rest.to_string(),
            _ => name.to_string(),
        }
    }

    fn void_type(&self) -> &'static str {
        "Void"
    }

    fn not_null_annotation(&self) -> Option<&'static str> {
        Some("@NotNull")
    }

    fn nullable_marker(&self) -> &'static str {
        ""
    }

    fn field_annotation_prefix(&self) -> &'static str {
        ""
    }

    fn instantiate(&self, type_name: &str, args: &str) -> String {
        format!("new {type_name}({args})")
    }

    fn collection_init(&self, is_set: bool, values: Option<&str>) -> String {
        let container = if is_set { "LinkedHashSet" } else { "ArrayList" };
        match values {
            Some(values) if !values.is_empty() => {
                format!("new {container}<>(Arrays.asList({values}))")
            }
            _ => format!("new {container}<>()"),
        }
    }

    fn empty_map_init(&self) -> String {
        "new HashMap<>()".to_string()
    }

    fn number_literal(&self, raw: &str, kind: NumberKind) -> String {
        match kind {
            NumberKind::Int => raw.to_string(),
            NumberKind::Long => format!("{raw}L"),
            NumberKind::Float => format!("{raw}F"),
            NumberKind::Double => format!("{raw}D"),
            NumberKind::BigDecimal => format!("new BigDecimal(\"{raw}\")"),
            NumberKind::BigInteger => format!("new BigInteger(\"{raw}\")"),
        }
    }

    fn uri_literal(&self, raw: &str) -> String {
        format!("URI.create(\"{}\")", escape_text(raw))
    }

    fn uuid_literal(&self, raw: &str) -> String {
        format!("UUID.fromString(\"{raw}\")")
    }

    fn local_date_literal(&self, iso: &str) -> String {
        format!("LocalDate.parse(\"{iso}\")")
    }

    fn date_time_literal(&self, iso: &str) -> String {
        format!(
            "OffsetDateTime.parse(\"{iso}\", java.time.format.DateTimeFormatter.ISO_ZONED_DATE_TIME.withZone(java.time.ZoneId.systemDefault()))"
        )
    }

    fn list_example(&self, inner: &str, _items_type: Option<&str>) -> String {
        format!("List.of({inner})")
    }

    fn set_example(&self) -> String {
        "new HashSet<>()".to_string()
    }

    fn map_example(&self) -> String {
        "new HashMap<>()".to_string()
    }

    fn scalar_example(&self, data_type: &str) -> Option<&'static str> {
        match data_type {
            "Integer" | "Short" => Some("56"),
            "Long" => Some("56L"),
            "Float" => Some("3.4F"),
            "Double" => Some("3.4D"),
            "Boolean" => Some("false"),
            "BigDecimal" => Some("new BigDecimal(\"78\")"),
            "OffsetDateTime" => Some(
                "OffsetDateTime.of(2001, 2, 3, 12, 0, 0, 0, java.time.ZoneOffset.of(\"+02:00\"))",
            ),
            "LocalDate" => Some("LocalDate.of(2001, 2, 3)"),
            "LocalDateTime" => Some("LocalDateTime.of(2001, 2, 3, 4, 5)"),
            "MultipartBody" => Some("MultipartBody.builder().build()"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words_use_capitalised_types() {
        let words = Java.reserved_words();
        assert!(words.contains(&"while"));
        assert!(words.contains(&"List"));
        assert!(words.contains(&"application"));
        assert!(!words.contains(&"list"));
        assert!(!words.contains(&"localdate"));
    }

    #[test]
    fn test_literals() {
        assert_eq!(Java.number_literal("5", NumberKind::Long), "5L");
        assert_eq!(
            Java.number_literal("1.5", NumberKind::BigDecimal),
            "new BigDecimal(\"1.5\")"
        );
        assert_eq!(
            Java.collection_init(false, Some("\"a\", \"b\"")),
            "new ArrayList<>(Arrays.asList(\"a\", \"b\"))"
        );
        assert_eq!(Java.collection_init(true, None), "new LinkedHashSet<>()");
    }

    #[test]
    fn test_file_mapping_depends_on_target() {
        let server = Java.default_type_mapping(&GeneratorOptions::java_server());
        let client = Java.default_type_mapping(&GeneratorOptions::java_client());
        assert_eq!(server["file"], "CompletedFileUpload");
        assert_eq!(client["file"], "File");
        assert_eq!(server["DateTime"], "ZonedDateTime");
    }

    #[test]
    fn test_unescape_only_reserved() {
        let reserved = |w: &str| w == "for";
        assert_eq!(Java.unescape("_for", &reserved), "for");
        assert_eq!(Java.unescape("_links", &reserved), "_links");
    }
}
