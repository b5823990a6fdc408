mod java;
mod kotlin;

use std::fmt;

use indexmap::IndexMap;

use crate::config::{GeneratorLanguage, GeneratorOptions};

pub use java::Java;
pub use kotlin::Kotlin;

/// Reserved words every dialect adds on top of its language keywords.
pub const FRAMEWORK_RESERVED_WORDS: &[&str] = &[
    "Client",
    "Format",
    "QueryValue",
    "QueryParam",
    "PathVariable",
    "Header",
    "Cookie",
    "Authorization",
    "Body",
    "application",
];

pub const MONO: &str = "reactor.core.publisher.Mono";
pub const FLUX: &str = "reactor.core.publisher.Flux";
pub const HTTP_RESPONSE: &str = "io.micronaut.http.HttpResponse";

/// Scalars the `x-type` extension can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Scalar {
    /// Parse an `x-type` value. `None` for names outside the palette.
    pub fn from_x_type(value: &str) -> Option<Self> {
        match value {
            "char" | "Character" => Some(Self::Char),
            "byte" => Some(Self::Byte),
            "short" => Some(Self::Short),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            _ => None,
        }
    }
}

/// Boxed and unboxed spelling of a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarName {
    pub boxed: &'static str,
    pub primitive: Option<&'static str>,
}

/// Kinds of numeric literal that carry a dialect-specific suffix or wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Int,
    Long,
    Float,
    Double,
    BigDecimal,
    BigInteger,
}

impl NumberKind {
    /// Classify a resolved data type name.
    pub fn of_type(data_type: &str) -> Option<Self> {
        match data_type {
            "Integer" | "Int" | "Short" | "Byte" | "int" | "short" | "byte" => Some(Self::Int),
            "Long" | "long" => Some(Self::Long),
            "Float" | "float" => Some(Self::Float),
            "Double" | "double" => Some(Self::Double),
            "BigDecimal" => Some(Self::BigDecimal),
            "BigInteger" => Some(Self::BigInteger),
            _ => None,
        }
    }
}

/// Everything that differs between the generated languages: names of
/// built-in types, keywords, literal syntax and identifier escaping.
pub trait Dialect: fmt::Debug + Send + Sync {
    fn language(&self) -> GeneratorLanguage;

    /// Keywords plus framework words. Membership is case-sensitive.
    fn reserved_words(&self) -> Vec<&'static str>;

    /// Default `typeMapping`, before the caller's overlay.
    fn default_type_mapping(&self, options: &GeneratorOptions) -> IndexMap<String, String>;

    /// Default simple-name to fully-qualified-name table.
    fn default_import_mapping(&self) -> IndexMap<String, String>;

    /// Types that never need an import and never denote a model.
    fn builtin_types(&self) -> &'static [&'static str];

    fn scalar(&self, scalar: Scalar) -> ScalarName;

    fn supports_primitives(&self) -> bool;

    fn escape_reserved_word(&self, word: &str) -> String;

    /// Undo [`Dialect::escape_reserved_word`] for names that were escaped.
    fn unescape(&self, name: &str, is_reserved: &dyn Fn(&str) -> bool) -> String;

    /// `Void` for Java, `Unit` for Kotlin.
    fn void_type(&self) -> &'static str;

    /// Type-use annotation for non-null container items, if the language
    /// expresses nullness with annotations.
    fn not_null_annotation(&self) -> Option<&'static str>;

    /// Suffix that marks a nullable type argument.
    fn nullable_marker(&self) -> &'static str;

    /// Use-site target for annotations placed on properties.
    fn field_annotation_prefix(&self) -> &'static str;

    /// `new T(args)` or `T(args)`.
    fn instantiate(&self, type_name: &str, args: &str) -> String;

    /// Mutable collection initialised with `values`, or empty.
    fn collection_init(&self, is_set: bool, values: Option<&str>) -> String;

    fn empty_map_init(&self) -> String;

    fn number_literal(&self, raw: &str, kind: NumberKind) -> String;

    fn string_literal(&self, raw: &str) -> String {
        format!("\"{}\"", escape_text(raw))
    }

    fn uri_literal(&self, raw: &str) -> String;

    fn uuid_literal(&self, raw: &str) -> String;

    fn local_date_literal(&self, iso: &str) -> String;

    fn date_time_literal(&self, iso: &str) -> String;

    /// Example for a `List` of a single item example.
    fn list_example(&self, inner: &str, items_type: Option<&str>) -> String;

    fn set_example(&self) -> String;

    fn map_example(&self) -> String;

    /// Example values of built-in types, keyed by data type.
    fn scalar_example(&self, data_type: &str) -> Option<&'static str>;
}

/// Escape a raw value for use inside a double-quoted literal.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Build the dialect for a language.
pub fn for_language(language: GeneratorLanguage) -> Box<dyn Dialect> {
    match language {
        GeneratorLanguage::Java => Box::new(Java),
        GeneratorLanguage::Kotlin => Box::new(Kotlin),
    }
}

/// Entries shared by both languages' import tables.
fn common_import_mapping() -> IndexMap<String, String> {
    [
        ("BigDecimal", "java.math.BigDecimal"),
        ("BigInteger", "java.math.BigInteger"),
        ("UUID", "java.util.UUID"),
        ("URI", "java.net.URI"),
        ("File", "java.io.File"),
        ("InputStream", "java.io.InputStream"),
        ("DateTime", "java.time.Instant"),
        ("Instant", "java.time.Instant"),
        ("LocalDateTime", "java.time.LocalDateTime"),
        ("OffsetDateTime", "java.time.OffsetDateTime"),
        ("ZonedDateTime", "java.time.ZonedDateTime"),
        ("LocalDate", "java.time.LocalDate"),
        ("LocalTime", "java.time.LocalTime"),
        ("CompletedFileUpload", "io.micronaut.http.multipart.CompletedFileUpload"),
        (
            "FileCustomizableResponseType",
            "io.micronaut.http.server.types.files.FileCustomizableResponseType",
        ),
        ("HttpResponse", HTTP_RESPONSE),
        ("Mono", MONO),
        ("Flux", FLUX),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn file_types(options: &GeneratorOptions) -> (&'static str, &'static str) {
    if options.is_server() {
        ("CompletedFileUpload", "FileCustomizableResponseType")
    } else {
        ("File", "InputStream")
    }
}
