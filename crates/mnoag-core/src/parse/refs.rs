use std::collections::HashSet;

use super::components::Components;
use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::response::{Header, HeaderOrRef, Response, ResponseOrRef};
use super::schema::{Schema, SchemaOrRef};
use crate::error::LowerError;

pub const SCHEMAS_PREFIX: &str = "#/components/schemas/";

/// Build a `#/components/schemas/<name>` reference.
pub fn schema_ref(name: &str) -> String {
    format!("{SCHEMAS_PREFIX}{name}")
}

/// The component name a `$ref` points at, whatever its section.
pub fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
pub fn parse_ref_name<'a>(ref_path: &'a str, expected_section: &str) -> Result<&'a str, LowerError> {
    let stripped = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| LowerError::SchemaResolution(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| LowerError::SchemaResolution(ref_path.to_string()))?;
    if section != expected_section {
        return Err(LowerError::SchemaResolution(format!(
            "expected section '{expected_section}', got '{section}' in {ref_path}"
        )));
    }
    Ok(name)
}

/// Read-only view over `components` that follows `$ref` chains.
///
/// Lookups never clone: callers receive borrows into the document, plus the
/// component name the chain ended on when one exists.
#[derive(Debug, Clone, Copy)]
pub struct RefIndex<'a> {
    components: Option<&'a Components>,
}

impl<'a> RefIndex<'a> {
    pub fn new(components: Option<&'a Components>) -> Self {
        Self { components }
    }

    /// Follow a schema reference to the first inline schema, returning the
    /// name of the last component visited alongside it.
    pub fn schema(&self, ref_path: &str) -> Result<(&'a str, &'a Schema), LowerError> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = ref_path;
        loop {
            if !visited.insert(current) {
                return Err(LowerError::SchemaResolution(format!(
                    "circular reference chain at {current}"
                )));
            }
            let name = parse_ref_name(current, "schemas")?;
            let (key, target) = self
                .components
                .and_then(|c| c.schemas.get_key_value(name))
                .ok_or_else(|| LowerError::SchemaResolution(current.to_string()))?;
            match target {
                SchemaOrRef::Schema(schema) => return Ok((key.as_str(), schema)),
                SchemaOrRef::Ref { ref_path } => current = ref_path,
            }
        }
    }

    /// Resolve a schema-or-ref to an inline schema. The name is `None` for
    /// schemas that were inline to begin with.
    pub fn deref_schema<'b>(
        &self,
        schema_or_ref: &'b SchemaOrRef,
    ) -> Result<(Option<&'a str>, &'b Schema), LowerError>
    where
        'a: 'b,
    {
        match schema_or_ref {
            SchemaOrRef::Schema(schema) => Ok((None, schema)),
            SchemaOrRef::Ref { ref_path } => {
                let (name, schema) = self.schema(ref_path)?;
                Ok((Some(name), schema))
            }
        }
    }

    pub fn parameter<'b>(&self, param: &'b ParameterOrRef) -> Result<&'b Parameter, LowerError>
    where
        'a: 'b,
    {
        match param {
            ParameterOrRef::Parameter(p) => Ok(p),
            ParameterOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "parameters")?;
                match self.components.and_then(|c| c.parameters.get(name)) {
                    Some(ParameterOrRef::Parameter(p)) => Ok(p),
                    Some(nested @ ParameterOrRef::Ref { .. }) => self.parameter(nested),
                    None => Err(LowerError::SchemaResolution(ref_path.clone())),
                }
            }
        }
    }

    pub fn request_body<'b>(
        &self,
        body: &'b RequestBodyOrRef,
    ) -> Result<&'b RequestBody, LowerError>
    where
        'a: 'b,
    {
        match body {
            RequestBodyOrRef::RequestBody(b) => Ok(b),
            RequestBodyOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "requestBodies")?;
                match self.components.and_then(|c| c.request_bodies.get(name)) {
                    Some(RequestBodyOrRef::RequestBody(b)) => Ok(b),
                    Some(nested @ RequestBodyOrRef::Ref { .. }) => self.request_body(nested),
                    None => Err(LowerError::SchemaResolution(ref_path.clone())),
                }
            }
        }
    }

    pub fn response(&self, ref_path: &str) -> Result<&'a Response, LowerError> {
        let name = parse_ref_name(ref_path, "responses")?;
        match self.components.and_then(|c| c.responses.get(name)) {
            Some(ResponseOrRef::Response(r)) => Ok(r),
            Some(ResponseOrRef::Ref { ref_path: inner, .. }) if inner != ref_path => {
                self.response(inner)
            }
            _ => Err(LowerError::SchemaResolution(ref_path.to_string())),
        }
    }

    pub fn header(&self, ref_path: &str) -> Result<&'a Header, LowerError> {
        let name = parse_ref_name(ref_path, "headers")?;
        match self.components.and_then(|c| c.headers.get(name)) {
            Some(HeaderOrRef::Header(h)) => Ok(h),
            Some(HeaderOrRef::Ref { ref_path: inner }) if inner != ref_path => self.header(inner),
            _ => Err(LowerError::SchemaResolution(ref_path.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::schema::SchemaType;

    fn components() -> Components {
        let mut c = Components::default();
        c.schemas
            .insert("Pet".into(), Schema::of_type(SchemaType::Object).into());
        c.schemas
            .insert("Animal".into(), SchemaOrRef::reference(schema_ref("Pet")));
        c.schemas
            .insert("Loop".into(), SchemaOrRef::reference(schema_ref("Loop")));
        c
    }

    #[test]
    fn test_parse_ref_name() {
        assert_eq!(
            parse_ref_name("#/components/schemas/Pet", "schemas").unwrap(),
            "Pet"
        );
        assert!(parse_ref_name("#/components/responses/Pet", "schemas").is_err());
        assert!(parse_ref_name("Pet.yaml", "schemas").is_err());
    }

    #[test]
    fn test_follows_alias_chain() {
        let c = components();
        let index = RefIndex::new(Some(&c));
        let (name, schema) = index.schema(&schema_ref("Animal")).unwrap();
        assert_eq!(name, "Pet");
        assert!(schema.is_type(SchemaType::Object));
    }

    #[test]
    fn test_cycle_is_an_error() {
        let c = components();
        let index = RefIndex::new(Some(&c));
        assert!(matches!(
            index.schema(&schema_ref("Loop")),
            Err(LowerError::SchemaResolution(_))
        ));
    }

    #[test]
    fn test_missing_target() {
        let index = RefIndex::new(None);
        assert!(index.schema(&schema_ref("Nope")).is_err());
    }
}
