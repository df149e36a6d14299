//! @ai:module:intent Accumulate the metadata of one API operation from its directives
//! @ai:module:layer domain
//! @ai:module:public_api Operation, Parameter, ParamLocation, Response, SchemaKind, Schema
//! @ai:module:depends_on directive, registry, error

use crate::directive::{parse_line, Directive, ParamDirective, ResponseDirective};
use crate::error::Result;
use crate::registry::{definition_ref, resolve_reference, TypeRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Swagger 2.0 schema object, restricted to what directives can express
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    pub fn primitive(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Default::default()
        }
    }

    /// @ai:intent Schema pointing at `#/definitions/<type_ref>`
    pub fn definition(type_ref: &str) -> Self {
        Self {
            reference: Some(definition_ref(type_ref)),
            ..Default::default()
        }
    }

    pub fn array_of(items: Schema) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }
}

/// @ai:intent Where a parameter is carried in the request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Query,
    Path,
    Body,
}

/// @ai:intent A single operation parameter in Swagger 2.0 shape
/// @ai:invariant `simple_type` is set for query/path, `schema` for body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    pub description: String,
    pub required: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub simple_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Parameter {
    /// @ai:intent Declared type: the primitive for query/path, `object` for body
    pub fn schema_type(&self) -> &str {
        self.simple_type
            .as_deref()
            .or_else(|| self.schema.as_ref()?.schema_type.as_deref())
            .unwrap_or_default()
    }

    /// @ai:intent Referenced `namespace.TypeName`, body parameters only
    pub fn type_ref(&self) -> Option<&str> {
        self.schema
            .as_ref()?
            .reference
            .as_deref()?
            .strip_prefix(crate::registry::DEFINITIONS_PREFIX)
    }
}

/// @ai:intent Bracketed schema kind of a response directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    Object,
    Array,
    Primitive(String),
}

impl SchemaKind {
    /// @ai:example ("{object}") -> Object
    /// @ai:example ("{string}") -> Primitive("string")
    pub fn parse(token: &str) -> Self {
        match token.trim_matches(['{', '}']) {
            "object" => SchemaKind::Object,
            "array" => SchemaKind::Array,
            other => SchemaKind::Primitive(other.to_string()),
        }
    }

    /// @ai:intent Whether this kind dereferences its type into the registry
    pub fn is_reference(&self) -> bool {
        matches!(self, SchemaKind::Object | SchemaKind::Array)
    }
}

/// @ai:intent One documented response of an operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    pub description: String,
    pub schema: Schema,
}

/// @ai:intent Metadata of one documented handler
///
/// Field policies: `http_method`, `path`, `summary` and `description` are
/// last-write-wins; `consumes`, `produces` and `parameters` accumulate in
/// source order; `responses` overwrite per status code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operation {
    #[serde(skip)]
    pub http_method: String,
    #[serde(skip)]
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub consumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub produces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,
    pub responses: BTreeMap<u32, Response>,
}

impl Default for Operation {
    fn default() -> Self {
        Self {
            http_method: "GET".to_string(),
            path: String::new(),
            summary: String::new(),
            description: String::new(),
            consumes: Vec::new(),
            produces: Vec::new(),
            parameters: Vec::new(),
            responses: BTreeMap::new(),
        }
    }
}

impl Operation {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Whether a router directive has given this operation a path
    pub fn is_routed(&self) -> bool {
        !self.path.is_empty()
    }

    /// @ai:intent Parse one raw comment line and apply it
    /// @ai:post on error the operation is unchanged
    /// @ai:edge_cases unrecognized keywords and blank lines are no-ops
    pub fn parse_comment(
        &mut self,
        comment: &str,
        registry: Option<&mut dyn TypeRegistry>,
    ) -> Result<()> {
        let directive = parse_line(comment)?;
        self.apply(directive, registry)
    }

    /// @ai:intent Apply a parsed directive, resolving type references through `registry`
    /// @ai:post on error the operation is unchanged
    pub fn apply(
        &mut self,
        directive: Directive,
        registry: Option<&mut dyn TypeRegistry>,
    ) -> Result<()> {
        match directive {
            Directive::Router { path, method } => {
                self.path = path;
                self.http_method = method;
            }
            Directive::Summary(summary) => self.summary = summary,
            Directive::Description(description) => self.description = description,
            Directive::Param(param) => {
                let parameter = build_parameter(param, registry)?;
                self.parameters.push(parameter);
            }
            Directive::Response(response) => {
                let code = response.status_code;
                let response = build_response(response, registry)?;
                self.responses.insert(code, response);
            }
            Directive::Accept(mut media) => self.consumes.append(&mut media),
            Directive::Produce(mut media) => self.produces.append(&mut media),
            Directive::Unrecognized(_) => {}
        }
        Ok(())
    }
}

fn build_parameter(
    param: ParamDirective,
    registry: Option<&mut dyn TypeRegistry>,
) -> Result<Parameter> {
    let mut parameter = Parameter {
        name: param.name,
        location: param.location,
        description: param.description,
        required: param.required,
        simple_type: None,
        schema: None,
    };

    match param.location {
        ParamLocation::Query | ParamLocation::Path => {
            parameter.simple_type = Some(param.schema_type);
        }
        ParamLocation::Body => {
            let mut schema = Schema::primitive("object");
            if crate::registry::split_qualified(&param.schema_type).is_some() {
                if let Some(registry) = registry {
                    resolve_reference(registry, &param.schema_type)?;
                }
                schema.reference = Some(definition_ref(&param.schema_type));
            }
            parameter.schema = Some(schema);
        }
    }

    Ok(parameter)
}

fn build_response(
    response: ResponseDirective,
    registry: Option<&mut dyn TypeRegistry>,
) -> Result<Response> {
    if response.kind.is_reference() {
        if let Some(registry) = registry {
            resolve_reference(registry, &response.type_ref)?;
        }
    }

    let schema = match &response.kind {
        SchemaKind::Object => Schema::definition(&response.type_ref),
        SchemaKind::Array => Schema::array_of(Schema::definition(&response.type_ref)),
        SchemaKind::Primitive(name) => Schema::primitive(name),
    };

    Ok(Response {
        description: response.description,
        schema,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::registry::{ParserContext, TypeDefinition};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::Cell;

    fn context() -> ParserContext {
        let mut ctx = ParserContext::new();
        ctx.define("model", "User", json!({"type": "object"}));
        ctx.define("model", "Pet", json!({"type": "object"}));
        ctx
    }

    /// Registry that counts lookups and knows nothing.
    #[derive(Default)]
    struct CountingRegistry {
        lookups: Cell<usize>,
    }

    impl TypeRegistry for CountingRegistry {
        fn lookup(&self, _namespace: &str, _type_name: &str) -> Option<&TypeDefinition> {
            self.lookups.set(self.lookups.get() + 1);
            None
        }

        fn register(&mut self, _reference: &str, _definition: TypeDefinition) {}
    }

    #[test]
    fn test_defaults() {
        let op = Operation::new();
        assert_eq!(op.http_method, "GET");
        assert!(op.path.is_empty());
        assert!(!op.is_routed());
    }

    #[test]
    fn test_router_comment() {
        let mut op = Operation::new();
        op.parse_comment("// @Router /pets/{id} [delete]", None).unwrap();
        assert_eq!(op.path, "/pets/{id}");
        assert_eq!(op.http_method, "DELETE");
        assert!(op.is_routed());
    }

    #[test]
    fn test_path_param() {
        let mut op = Operation::new();
        op.parse_comment(r#"@Param id path int true "user id""#, None)
            .unwrap();

        let param = &op.parameters[0];
        assert_eq!(param.name, "id");
        assert_eq!(param.location, ParamLocation::Path);
        assert!(param.required);
        assert_eq!(param.schema_type(), "int");
        assert_eq!(param.description, "user id");
        assert_eq!(param.type_ref(), None);
    }

    #[test]
    fn test_query_and_path_params_never_consult_registry() {
        for location in ["query", "path"] {
            let mut registry = CountingRegistry::default();
            let mut op = Operation::new();
            op.parse_comment(
                &format!(r#"@Param filter {} model.Filter false "filter""#, location),
                Some(&mut registry),
            )
            .unwrap();

            assert_eq!(registry.lookups.get(), 0, "{}", location);
            assert_eq!(op.parameters[0].schema_type(), "model.Filter");
        }
    }

    #[test]
    fn test_body_param_with_reference() {
        let mut ctx = context();
        let mut op = Operation::new();
        op.parse_comment(
            r#"@Param user body model.User required "new user""#,
            Some(&mut ctx),
        )
        .unwrap();

        let param = &op.parameters[0];
        assert_eq!(param.schema_type(), "object");
        assert_eq!(param.type_ref(), Some("model.User"));
        assert!(ctx.registered.contains_key("model.User"));
    }

    #[test]
    fn test_body_param_unknown_reference_leaves_parameters() {
        let mut ctx = context();
        let mut op = Operation::new();
        let err = op
            .parse_comment(
                r#"@Param order body model.Order true "order""#,
                Some(&mut ctx),
            )
            .unwrap_err();

        assert!(matches!(err, Error::UnresolvedType(ref r) if r == "model.Order"));
        assert!(op.parameters.is_empty());
        assert!(ctx.registered.is_empty());
    }

    #[test]
    fn test_body_param_unqualified_type() {
        let mut ctx = context();
        let mut op = Operation::new();
        op.parse_comment(r#"@Param raw body string true "raw body""#, Some(&mut ctx))
            .unwrap();

        let param = &op.parameters[0];
        assert_eq!(param.schema_type(), "object");
        assert_eq!(param.type_ref(), None);
    }

    #[test]
    fn test_object_response() {
        let mut ctx = context();
        let mut op = Operation::new();
        op.parse_comment(r#"@Success 200 {object} model.User "ok""#, Some(&mut ctx))
            .unwrap();

        let response = &op.responses[&200];
        assert_eq!(response.description, "ok");
        assert_eq!(response.schema, Schema::definition("model.User"));
        assert_eq!(
            response.schema.reference.as_deref(),
            Some("#/definitions/model.User")
        );
        assert!(ctx.registered.contains_key("model.User"));
    }

    #[test]
    fn test_array_response_nests_reference() {
        let mut ctx = context();
        let mut op = Operation::new();
        op.parse_comment(r#"@Success 200 {array} model.Pet "pets""#, Some(&mut ctx))
            .unwrap();

        let schema = &op.responses[&200].schema;
        assert_eq!(schema.schema_type.as_deref(), Some("array"));
        assert_eq!(schema.reference, None);
        assert_eq!(
            schema.items.as_ref().unwrap().reference.as_deref(),
            Some("#/definitions/model.Pet")
        );
    }

    #[test]
    fn test_primitive_response_skips_resolution() {
        let mut registry = CountingRegistry::default();
        let mut op = Operation::new();
        op.parse_comment(
            r#"@Failure 400 {string} model.Missing "bad request""#,
            Some(&mut registry),
        )
        .unwrap();

        assert_eq!(registry.lookups.get(), 0);
        assert_eq!(op.responses[&400].schema, Schema::primitive("string"));
    }

    #[test]
    fn test_response_without_registry_skips_resolution() {
        let mut op = Operation::new();
        op.parse_comment(r#"@Success 200 {object} model.Unknown "ok""#, None)
            .unwrap();
        assert_eq!(
            op.responses[&200].schema,
            Schema::definition("model.Unknown")
        );
    }

    #[test]
    fn test_response_unknown_reference_fails() {
        let mut ctx = context();
        let mut op = Operation::new();
        let err = op
            .parse_comment(r#"@Success 200 {object} model.Order "ok""#, Some(&mut ctx))
            .unwrap_err();

        assert!(matches!(err, Error::UnresolvedType(_)));
        assert!(op.responses.is_empty());
    }

    #[test]
    fn test_response_overwrites_same_code() {
        let mut op = Operation::new();
        op.parse_comment(r#"@Success 200 {string} string "first""#, None)
            .unwrap();
        op.parse_comment(r#"@Success 200 {string} string "second""#, None)
            .unwrap();

        assert_eq!(op.responses.len(), 1);
        assert_eq!(op.responses[&200].description, "second");
    }

    #[test]
    fn test_scalar_fields_last_write_wins() {
        let mut op = Operation::new();
        op.parse_comment("@Summary first", None).unwrap();
        op.parse_comment("@Summary Second Summary", None).unwrap();
        op.parse_comment("@Description Long text", None).unwrap();

        assert_eq!(op.summary, "Second Summary");
        assert_eq!(op.description, "Long text");
    }

    #[test]
    fn test_media_types_accumulate() {
        let mut op = Operation::new();
        op.parse_comment("@Accept json", None).unwrap();
        op.parse_comment("@Consume xml,json", None).unwrap();
        op.parse_comment("@Produce html", None).unwrap();

        assert_eq!(
            op.consumes,
            vec!["application/json", "text/xml", "application/json"]
        );
        assert_eq!(op.produces, vec!["text/html"]);
    }

    #[test]
    fn test_malformed_line_does_not_affect_siblings() {
        let mut op = Operation::new();
        op.parse_comment(r#"@Param id path int true "id""#, None)
            .unwrap();
        assert!(op.parse_comment("@Param broken", None).is_err());
        op.parse_comment(r#"@Param q query string false "query""#, None)
            .unwrap();

        let names: Vec<_> = op.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "q"]);
    }

    #[test]
    fn test_serializes_swagger_shape() {
        let mut ctx = context();
        let mut op = Operation::new();
        op.parse_comment("@Summary Get user", None).unwrap();
        op.parse_comment(r#"@Param id path int true "user id""#, None)
            .unwrap();
        op.parse_comment(r#"@Param user body model.User true "user""#, Some(&mut ctx))
            .unwrap();
        op.parse_comment(r#"@Success 200 {object} model.User "ok""#, Some(&mut ctx))
            .unwrap();

        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(
            value,
            json!({
                "summary": "Get user",
                "parameters": [
                    {"name": "id", "in": "path", "description": "user id", "required": true, "type": "int"},
                    {"name": "user", "in": "body", "description": "user", "required": true,
                     "schema": {"type": "object", "$ref": "#/definitions/model.User"}}
                ],
                "responses": {
                    "200": {"description": "ok", "schema": {"$ref": "#/definitions/model.User"}}
                }
            })
        );
    }
}
