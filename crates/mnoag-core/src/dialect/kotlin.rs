use indexmap::IndexMap;

use super::{
    Dialect, FRAMEWORK_RESERVED_WORDS, NumberKind, Scalar, ScalarName, common_import_mapping,
    escape_text, file_types,
};
use crate::config::{GeneratorLanguage, GeneratorOptions};

const KEYWORDS: &[&str] = &[
    "ApiResponse",
    "abstract",
    "actual",
    "annotation",
    "as",
    "break",
    "class",
    "companion",
    "const",
    "constructor",
    "continue",
    "crossinline",
    "data",
    "delegate",
    "do",
    "dynamic",
    "else",
    "enum",
    "expect",
    "external",
    "false",
    "field",
    "final",
    "finally",
    "for",
    "fun",
    "if",
    "import",
    "in",
    "infix",
    "init",
    "inline",
    "inner",
    "interface",
    "internal",
    "is",
    "it",
    "lateinit",
    "noinline",
    "null",
    "object",
    "open",
    "operator",
    "out",
    "override",
    "package",
    "param",
    "private",
    "property",
    "protected",
    "public",
    "receiver",
    "reified",
    "return",
    "sealed",
    "setparam",
    "super",
    "suspend",
    "tailrec",
    "this",
    "throw",
    "true",
    "try",
    "typealias",
    "typeof",
    "val",
    "value",
    "var",
    "vararg",
    "when",
    "where",
    "while",
];

const BUILTIN_TYPES: &[&str] = &[
    "String",
    "Boolean",
    "Char",
    "Byte",
    "Short",
    "Int",
    "Long",
    "Float",
    "Double",
    "ByteArray",
    "Any",
    "Unit",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Kotlin;

impl Dialect for Kotlin {
    fn language(&self) -> GeneratorLanguage {
        GeneratorLanguage::Kotlin
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
            ("integer", "Int"),
            ("long", "Long"),
            ("number", "BigDecimal"),
            ("decimal", "BigDecimal"),
            ("float", "Float"),
            ("double", "Double"),
            ("boolean", "Boolean"),
            ("string", "String"),
            ("char", "Char"),
            ("byte", "Byte"),
            ("date", "LocalDate"),
            ("DateTime", date_time),
            ("UUID", "UUID"),
            ("URI", "URI"),
            ("ByteArray", "ByteArray"),
            ("binary", file),
            ("file", file),
            ("responseFile", response_file),
            ("object", "Any"),
            ("AnyType", "Any"),
            ("array", "List"),
            ("set", "Set"),
            ("map", "Map"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn default_import_mapping(&self) -> IndexMap<String, String> {
        common_import_mapping()
    }

    fn builtin_types(&self) -> &'static [&'static str] {
        BUILTIN_TYPES
    }

    fn scalar(&self, scalar: Scalar) -> ScalarName {
        let boxed = match scalar {
            Scalar::Char => "Char",
            Scalar::Byte => "Byte",
            Scalar::Short => "Short",
            Scalar::Int => "Int",
            Scalar::Long => "Long",
            Scalar::Float => "Float",
            Scalar::Double => "Double",
        };
        ScalarName {
            boxed,
            primitive: None,
        }
    }

    fn supports_primitives(&self) -> bool {
        false
    }

    fn escape_reserved_word(&self, word: &str) -> String {
        format!("`{word}`")
    }

    fn unescape(&self, name: &str, _is_reserved: &dyn Fn(&str) -> bool) -> String {
        name.replace('`', "")
    }

    fn void_type(&self) -> &'static str {
        "Unit"
    }

    fn not_null_annotation(&self) -> Option<&'static str> {
        None
    }

    fn nullable_marker(&self) -> &'static str {
        "?"
    }

    fn field_annotation_prefix(&self) -> &'static str {
        "field:"
    }

    fn instantiate(&self, type_name: &str, args: &str) -> String {
        format!("{type_name}({args})")
    }

    fn collection_init(&self, is_set: bool, values: Option<&str>) -> String {
        let factory = if is_set { "setOf" } else { "arrayListOf" };
        format!("{factory}({})", values.unwrap_or_default())
    }

    fn empty_map_init(&self) -> String {
        "HashMap()".to_string()
    }

    fn number_literal(&self, raw: &str, kind: NumberKind) -> String {
        match kind {
            NumberKind::Int => raw.to_string(),
            NumberKind::Long => format!("{raw}L"),
            NumberKind::Float => format!("{raw}F"),
            NumberKind::Double if raw.contains('.') => raw.to_string(),
            NumberKind::Double => format!("{raw}.0"),
            NumberKind::BigDecimal => format!("BigDecimal(\"{raw}\")"),
            NumberKind::BigInteger => format!("BigInteger(\"{raw}\")"),
        }
    }

    fn uri_literal(&self, raw: &str) -> String {
        format!("java.net.URI.create(\"{}\")", escape_text(raw))
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

    fn list_example(&self, inner: &str, items_type: Option<&str>) -> String {
        if inner.is_empty() {
            format!("listOf<{}>()", items_type.unwrap_or("Any"))
        } else {
            format!("listOf({inner})")
        }
    }

    fn set_example(&self) -> String {
        "HashSet<Any>()".to_string()
    }

    fn map_example(&self) -> String {
        "HashMap<Any, Any>()".to_string()
    }

    fn scalar_example(&self, data_type: &str) -> Option<&'static str> {
        match data_type {
            "Int" | "Short" => Some("56"),
            "Long" => Some("56L"),
            "Float" => Some("3.4F"),
            "Double" => Some("3.4D"),
            "Boolean" => Some("false"),
            "BigDecimal" => Some("BigDecimal(\"78\")"),
            "ByteArray" => Some("ByteArray(10)"),
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
    fn test_escape_with_backticks() {
        assert_eq!(Kotlin.escape_reserved_word("value"), "`value`");
        assert_eq!(Kotlin.unescape("`value`", &|_| true), "value");
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(Kotlin.number_literal("2", NumberKind::Double), "2.0");
        assert_eq!(Kotlin.number_literal("2.5", NumberKind::Double), "2.5");
        assert_eq!(Kotlin.number_literal("7", NumberKind::Long), "7L");
    }

    #[test]
    fn test_collections() {
        assert_eq!(Kotlin.collection_init(false, None), "arrayListOf()");
        assert_eq!(Kotlin.collection_init(true, Some("1, 2")), "setOf(1, 2)");
        assert_eq!(Kotlin.list_example("", Some("Int")), "listOf<Int>()");
    }

    #[test]
    fn test_no_primitives() {
        assert!(!Kotlin.supports_primitives());
        assert_eq!(Kotlin.scalar(Scalar::Int).primitive, None);
        assert_eq!(Kotlin.scalar(Scalar::Int).boxed, "Int");
    }
}
