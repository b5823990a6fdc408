use std::collections::HashSet;
use std::sync::LazyLock;

use heck::{ToShoutySnakeCase, ToSnakeCase};
use indexmap::IndexMap;
use regex::Regex;

use crate::config::GeneratorOptions;
use crate::dialect::{self, Dialect};
use crate::error::LowerError;

/// Enum values made only of punctuation map to a spelled-out name.
const SYMBOL_NAMES: &[(&str, &str)] = &[
    ("$", "Dollar"),
    ("^", "Caret"),
    ("|", "Pipe"),
    ("=", "Equal"),
    ("*", "Star"),
    ("-", "Minus"),
    ("&", "Ampersand"),
    ("%", "Percent"),
    ("#", "Hash"),
    ("@", "At"),
    ("!", "Exclamation"),
    ("+", "Plus"),
    (":", "Colon"),
    (";", "Semicolon"),
    (">", "Greater_Than"),
    ("<", "Less_Than"),
    (".", "Period"),
    ("_", "Underscore"),
    ("?", "Question_Mark"),
    (",", "Comma"),
    ("'", "Quote"),
    ("\"", "Double_Quote"),
    ("/", "Slash"),
    ("\\", "Back_Slash"),
    ("(", "Left_Parenthesis"),
    (")", "Right_Parenthesis"),
    ("{", "Left_Curly_Bracket"),
    ("}", "Right_Curly_Bracket"),
    ("[", "Left_Square_Bracket"),
    ("]", "Right_Square_Bracket"),
    ("~", "Tilde"),
    ("`", "Backtick"),
    ("<=", "Less_Than_Or_Equal_To"),
    (">=", "Greater_Than_Or_Equal_To"),
    ("!=", "Not_Equal"),
    ("<>", "Not_Equal"),
    ("~=", "Tilde_Equal"),
];

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("valid pattern"));

/// Data types whose enum constants are spelled `NUMBER_<value>`.
const NUMERIC_ENUM_TYPES: &[&str] = &[
    "Int",
    "Integer",
    "Byte",
    "Short",
    "Long",
    "Float",
    "Double",
    "BigDecimal",
    "BigInteger",
];

/// Canonicalizes identifiers for one dialect and one set of mapping tables.
#[derive(Debug)]
pub struct NameService {
    dialect: Box<dyn Dialect>,
    reserved: HashSet<String>,
    name_mapping: IndexMap<String, String>,
    parameter_name_mapping: IndexMap<String, String>,
    model_name_mapping: IndexMap<String, String>,
    enum_name_mapping: IndexMap<String, String>,
    model_name_prefix: String,
    model_name_suffix: String,
    api_name_prefix: String,
    api_name_suffix: String,
    allow_unicode: bool,
}

impl NameService {
    pub fn new(options: &GeneratorOptions) -> Self {
        let dialect = dialect::for_language(options.language);
        let reserved = dialect
            .reserved_words()
            .into_iter()
            .map(str::to_string)
            .chain(options.reserved_words_augment.iter().cloned())
            .collect();
        Self {
            dialect,
            reserved,
            name_mapping: options.name_mapping.clone(),
            parameter_name_mapping: options.parameter_name_mapping.clone(),
            model_name_mapping: options.model_name_mapping.clone(),
            enum_name_mapping: options.enum_name_mapping.clone(),
            model_name_prefix: options.model_name_prefix.clone(),
            model_name_suffix: options.model_name_suffix.clone(),
            api_name_prefix: options.api_name_prefix.clone(),
            api_name_suffix: options.api_name_suffix.clone(),
            allow_unicode: options.allow_unicode_identifiers,
        }
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.contains(word)
    }

    pub fn escape_reserved_word(&self, word: &str) -> String {
        self.dialect.escape_reserved_word(word)
    }

    /// Strip the escaping the dialect applies to reserved words.
    pub fn normalize_dialect_specific(&self, name: &str) -> String {
        self.dialect.unescape(name, &|w| self.is_reserved(w))
    }

    /// Tags pass through untouched; grouping sanitizes them exactly once.
    pub fn sanitize_tag<'a>(&self, tag: &'a str) -> &'a str {
        tag
    }

    /// Property name for a schema key. Idempotent.
    pub fn to_var_name(&self, name: &str) -> Result<String, LowerError> {
        if let Some(mapped) = self.name_mapping.get(name) {
            return Ok(mapped.clone());
        }
        let unescaped = self.normalize_dialect_specific(name);
        let sanitized = self.sanitize(&unescaped);
        if sanitized.is_empty() || sanitized.chars().all(|c| c == '_') {
            return Err(LowerError::Identifier(name.to_string()));
        }

        let starts_with_digit = sanitized.starts_with(|c: char| c.is_ascii_digit());
        if !starts_with_digit
            && sanitized
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        {
            return Ok(self.escape_if_reserved(sanitized));
        }

        let body_start = sanitized.len() - sanitized.trim_start_matches('_').len();
        let (prefix, body) = sanitized.split_at(body_start);
        let mut body = fix_lower_upper_start(&camelize(body, true));
        if prefix.is_empty() && body.starts_with(|c: char| c.is_ascii_digit()) {
            body.insert(0, '_');
        }
        Ok(self.escape_if_reserved(format!("{prefix}{body}")))
    }

    pub fn to_param_name(&self, name: &str) -> Result<String, LowerError> {
        if let Some(mapped) = self.parameter_name_mapping.get(name) {
            return Ok(mapped.clone());
        }
        self.to_var_name(name)
    }

    /// Class name for a schema key.
    pub fn to_model_name(&self, name: &str) -> Result<String, LowerError> {
        if let Some(mapped) = self.model_name_mapping.get(name) {
            return Ok(mapped.clone());
        }
        let unescaped = self.normalize_dialect_specific(name);
        let mut decorated = self.sanitize(&unescaped.replace('.', "_"));
        if !self.model_name_prefix.is_empty() {
            decorated = format!("{}_{decorated}", self.model_name_prefix);
        }
        if !self.model_name_suffix.is_empty() {
            decorated = format!("{decorated}_{}", self.model_name_suffix);
        }
        let camelized = camelize(&decorated, false);
        if camelized.is_empty() {
            return Err(LowerError::Identifier(name.to_string()));
        }
        if self.is_reserved(&camelized) {
            let renamed = format!("Model{camelized}");
            log::warn!("{camelized} (reserved word) cannot be used as model name, renamed to {renamed}");
            return Ok(renamed);
        }
        if camelized.starts_with(|c: char| c.is_ascii_digit()) {
            let renamed = format!("Model{camelized}");
            log::warn!("{name} (model name starts with number) renamed to {renamed}");
            return Ok(renamed);
        }
        Ok(camelized)
    }

    /// Interface name for a tag.
    pub fn to_api_name(&self, name: &str) -> String {
        let sanitized = self.sanitize(name);
        let stripped = sanitized.trim_start_matches(|c: char| c.is_ascii_digit() || c == '_');
        let mut base = camelize(stripped, false);
        if base.is_empty() {
            base = "Default".to_string();
        }
        let mut api_name = format!("{}{base}", self.api_name_prefix);
        if !api_name.ends_with(&self.api_name_suffix) {
            api_name.push_str(&self.api_name_suffix);
        }
        api_name
    }

    pub fn to_api_var_name(&self, name: &str) -> String {
        let api_name = self.to_api_name(name);
        self.escape_if_reserved(lower_first(&api_name))
    }

    /// Constant name of an enum value. `None` when the value is absent or
    /// normalizes to nothing.
    pub fn to_enum_var_name(&self, value: Option<&str>, data_type: &str) -> Option<String> {
        let value = value?;
        if let Some(mapped) = self.enum_name_mapping.get(value) {
            return Some(mapped.clone());
        }
        if value.is_empty() {
            return Some("EMPTY".to_string());
        }
        if let Some((_, symbol)) = SYMBOL_NAMES.iter().find(|(s, _)| *s == value) {
            return Some(symbol.to_uppercase());
        }
        if value == " " {
            return Some("SPACE".to_string());
        }
        if NUMERIC_ENUM_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(data_type))
        {
            let name = format!("NUMBER_{value}")
                .replace('-', "MINUS_")
                .replace('+', "PLUS_")
                .replace('.', "_DOT_");
            return Some(name);
        }

        let replaced = NON_WORD.replace_all(value, "_");
        let mut var = replaced.to_shouty_snake_case();
        if var.is_empty() || var.chars().all(|c| c == '_') {
            return None;
        }
        if var.starts_with(|c: char| c.is_ascii_digit()) {
            var.insert(0, '_');
        }
        self.to_var_name(&var).ok()
    }

    /// Capitalization used after `get`/`set`. A leading underscore run is
    /// kept and the character after it is lower-cased.
    pub fn getter_and_setter_capitalize(&self, name: &str) -> String {
        let name = name.replace('`', "");
        let trimmed = name.trim_start_matches('_');
        let prefix = &name[..name.len() - trimmed.len()];
        if prefix.is_empty() {
            upper_first(trimmed)
        } else {
            format!("{prefix}{}", lower_first(trimmed))
        }
    }

    pub fn getter(&self, name: &str) -> String {
        format!("get{}", self.getter_and_setter_capitalize(name))
    }

    pub fn setter(&self, name: &str) -> String {
        format!("set{}", self.getter_and_setter_capitalize(name))
    }

    fn escape_if_reserved(&self, name: String) -> String {
        if self.is_reserved(&name) {
            self.escape_reserved_word(&name)
        } else {
            name
        }
    }

    fn sanitize(&self, name: &str) -> String {
        name.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c
                } else if self.allow_unicode && c.is_alphanumeric() {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

/// Join the `_`/`-`/space/`.` separated parts of a word, upper-casing the
/// first letter of each part and keeping the rest as written.
pub fn camelize(word: &str, lower_first_letter: bool) -> String {
    let mut out = String::with_capacity(word.len());
    for part in word.split(['_', '-', ' ', '.']).filter(|p| !p.is_empty()) {
        out.push_str(&upper_first(part));
    }
    if lower_first_letter {
        lower_first(&out)
    } else {
        out
    }
}

/// `petId` → `pet_id`.
pub fn underscore(word: &str) -> String {
    word.to_snake_case()
}

/// Naive English plural used for array body parameter names.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_ascii_lowercase();
    if lower.ends_with('s') && !lower.ends_with("ss") {
        return word.to_string();
    }
    if lower.ends_with('y')
        && !matches!(
            lower.chars().rev().nth(1),
            Some('a' | 'e' | 'i' | 'o' | 'u')
        )
    {
        return format!("{}ies", &word[..word.len() - 1]);
    }
    if ["ss", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Operation id derived from the path segments and the method, used when the
/// document declares none.
pub fn operation_id_for(path: &str, method: &str) -> String {
    let mut parts: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_start_matches('{').trim_end_matches('}').to_string())
        .collect();
    parts.push(method.to_ascii_lowercase());
    let joined = parts
        .join("_")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>();
    camelize(&joined, true)
}

pub(crate) fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `eTemperature` → `etemperature`: a lower-case letter followed by an
/// upper-case one does not round-trip through bean introspection.
fn fix_lower_upper_start(name: &str) -> String {
    let mut chars: Vec<char> = name.chars().collect();
    if chars.len() >= 2 && chars[0].is_lowercase() && chars[1].is_uppercase() {
        chars[1] = chars[1].to_lowercase().next().unwrap_or(chars[1]);
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorOptions;

    fn java() -> NameService {
        NameService::new(&GeneratorOptions::java_server())
    }

    fn kotlin() -> NameService {
        NameService::new(&GeneratorOptions::kotlin_server())
    }

    #[test]
    fn test_var_names() {
        let names = java();
        assert_eq!(names.to_var_name("pet_id").unwrap(), "petId");
        assert_eq!(names.to_var_name("PetId").unwrap(), "petId");
        assert_eq!(names.to_var_name("eTemperature").unwrap(), "etemperature");
        assert_eq!(names.to_var_name("X-Rate-Limit").unwrap(), "xrateLimit");
        assert_eq!(names.to_var_name("1st").unwrap(), "_1st");
        assert_eq!(names.to_var_name("UPPER_CASE").unwrap(), "UPPER_CASE");
        assert_eq!(names.to_var_name("_links").unwrap(), "_links");
        assert_eq!(names.to_var_name("__private_data").unwrap(), "__privateData");
    }

    #[test]
    fn test_reserved_words_are_escaped() {
        let names = java();
        assert_eq!(names.to_var_name("while").unwrap(), "_while");
        assert_eq!(names.to_var_name("for").unwrap(), "_for");
        assert_eq!(names.to_var_name("List").unwrap(), "list");
        assert!(names.is_reserved("Body"));
        assert!(!names.is_reserved("body"));
    }

    #[test]
    fn test_var_name_is_idempotent() {
        let names = java();
        for raw in [
            "while",
            "for",
            "pet_id",
            "eTemperature",
            "_links",
            "1st",
            "X-Rate-Limit",
            "UPPER_CASE",
            "some.dotted.name",
            "__default",
        ] {
            let once = names.to_var_name(raw).unwrap();
            let twice = names.to_var_name(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {raw}");
            assert!(!names.is_reserved(&once), "{once} is reserved");
        }
    }

    #[test]
    fn test_kotlin_escapes_with_backticks() {
        let names = kotlin();
        assert_eq!(names.to_var_name("value").unwrap(), "`value`");
        assert_eq!(names.to_var_name("`value`").unwrap(), "`value`");
        assert_eq!(names.normalize_dialect_specific("`value`"), "value");
    }

    #[test]
    fn test_getter_and_setter_for_escaped_names() {
        let names = java();
        let name = names.to_var_name("for").unwrap();
        assert_eq!(names.getter(&name), "get_for");
        assert_eq!(names.setter(&name), "set_for");
        assert_eq!(names.getter("petId"), "getPetId");
    }

    #[test]
    fn test_empty_name_is_identifier_error() {
        assert!(matches!(
            java().to_var_name(""),
            Err(LowerError::Identifier(_))
        ));
    }

    #[test]
    fn test_model_names() {
        let names = java();
        assert_eq!(names.to_model_name("pet").unwrap(), "Pet");
        assert_eq!(names.to_model_name("PetDTO").unwrap(), "PetDTO");
        assert_eq!(names.to_model_name("200_response").unwrap(), "Model200Response");
        assert_eq!(names.to_model_name("Client").unwrap(), "ModelClient");
        assert_eq!(names.to_model_name("book-info").unwrap(), "BookInfo");
    }

    #[test]
    fn test_model_name_mapping_and_affixes() {
        let mut options = GeneratorOptions::default();
        options.model_name_prefix = "Api".into();
        options.model_name_suffix = "Dto".into();
        options
            .model_name_mapping
            .insert("legacy".into(), "Modern".into());
        let names = NameService::new(&options);
        assert_eq!(names.to_model_name("pet").unwrap(), "ApiPetDto");
        assert_eq!(names.to_model_name("legacy").unwrap(), "Modern");
    }

    #[test]
    fn test_api_names() {
        let names = java();
        assert_eq!(names.to_api_name("pet"), "PetApi");
        assert_eq!(names.to_api_name("user-admin"), "UserAdminApi");
        assert_eq!(names.to_api_name("PetApi"), "PetApi");
        assert_eq!(names.to_api_name(""), "DefaultApi");
        assert_eq!(names.to_api_var_name("pet"), "petApi");
    }

    #[test]
    fn test_enum_var_names() {
        let names = java();
        assert_eq!(names.to_enum_var_name(None, "String"), None);
        assert_eq!(names.to_enum_var_name(Some(""), "String").as_deref(), Some("EMPTY"));
        assert_eq!(names.to_enum_var_name(Some(" "), "String").as_deref(), Some("SPACE"));
        assert_eq!(names.to_enum_var_name(Some("$"), "String").as_deref(), Some("DOLLAR"));
        assert_eq!(
            names.to_enum_var_name(Some(">="), "String").as_deref(),
            Some("GREATER_THAN_OR_EQUAL_TO")
        );
        assert_eq!(
            names.to_enum_var_name(Some("available"), "String").as_deref(),
            Some("AVAILABLE")
        );
        assert_eq!(
            names.to_enum_var_name(Some("sold out"), "String").as_deref(),
            Some("SOLD_OUT")
        );
        assert_eq!(
            names.to_enum_var_name(Some("camelCase"), "String").as_deref(),
            Some("CAMEL_CASE")
        );
        assert_eq!(
            names.to_enum_var_name(Some("1st"), "String").as_deref(),
            Some("_1ST")
        );
        assert_eq!(
            names.to_enum_var_name(Some("-1.5"), "Double").as_deref(),
            Some("NUMBER_MINUS_1_DOT_5")
        );
        assert_eq!(names.to_enum_var_name(Some("???"), "String"), None);
    }

    #[test]
    fn test_enum_name_mapping() {
        let mut options = GeneratorOptions::default();
        options.enum_name_mapping.insert("a+".into(), "A_PLUS".into());
        let names = NameService::new(&options);
        assert_eq!(
            names.to_enum_var_name(Some("a+"), "String").as_deref(),
            Some("A_PLUS")
        );
    }

    #[test]
    fn test_helpers() {
        assert_eq!(camelize("direct_albums", false), "DirectAlbums");
        assert_eq!(underscore("petId"), "pet_id");
        assert_eq!(pluralize("book"), "books");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("pets"), "pets");
        assert_eq!(
            operation_id_for("/artists/{artistId}/direct-albums", "GET"),
            "artistsArtistIdDirectAlbumsGet"
        );
    }
}
