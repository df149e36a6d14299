//! @ai:module:intent Resolve namespace-qualified type references against a type registry
//! @ai:module:layer domain
//! @ai:module:public_api TypeRegistry, TypeDefinition, ParserContext, resolve_reference, definition_ref
//! @ai:module:depends_on error

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Structural description of a type, emitted verbatim under `definitions`.
pub type TypeDefinition = serde_json::Value;

/// Prefix used for every schema reference into the definitions section.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// @ai:intent Lookup and registration surface the directive handlers need
pub trait TypeRegistry {
    /// @ai:intent Find the definition of `type_name` inside `namespace`
    fn lookup(&self, namespace: &str, type_name: &str) -> Option<&TypeDefinition>;

    /// @ai:intent Record that `reference` must be emitted in the definitions section
    /// @ai:post registering an already known reference is a no-op
    fn register(&mut self, reference: &str, definition: TypeDefinition);
}

/// @ai:intent In-memory registry of known types and the types queued for emission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserContext {
    pub type_definitions: HashMap<String, HashMap<String, TypeDefinition>>,
    pub registered: BTreeMap<String, TypeDefinition>,
}

impl ParserContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Build a context from `namespace -> type name -> definition` maps
    pub fn with_definitions(
        type_definitions: HashMap<String, HashMap<String, TypeDefinition>>,
    ) -> Self {
        Self {
            type_definitions,
            registered: BTreeMap::new(),
        }
    }

    /// @ai:intent Add a single known type
    pub fn define(&mut self, namespace: &str, type_name: &str, definition: TypeDefinition) {
        self.type_definitions
            .entry(namespace.to_string())
            .or_default()
            .insert(type_name.to_string(), definition);
    }

    /// @ai:intent Load type definitions from a JSON file
    /// @ai:pre path holds a JSON object of objects
    /// @ai:effects fs:read
    pub fn load_types(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let type_definitions = serde_json::from_str(&content).map_err(|e| Error::TypesFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::with_definitions(type_definitions))
    }

    /// @ai:intent Number of known types across all namespaces
    pub fn type_count(&self) -> usize {
        self.type_definitions.values().map(HashMap::len).sum()
    }
}

impl TypeRegistry for ParserContext {
    fn lookup(&self, namespace: &str, type_name: &str) -> Option<&TypeDefinition> {
        self.type_definitions.get(namespace)?.get(type_name)
    }

    fn register(&mut self, reference: &str, definition: TypeDefinition) {
        if !self.registered.contains_key(reference) {
            tracing::debug!("Registering definition {}", reference);
            self.registered.insert(reference.to_string(), definition);
        }
    }
}

/// @ai:intent Split a `namespace.TypeName` token into its two segments
/// @ai:example ("model.User") -> Some(("model", "User"))
/// @ai:example ("User") -> None
/// @ai:example ("a.b.c") -> None
/// @ai:effects pure
pub fn split_qualified(reference: &str) -> Option<(&str, &str)> {
    let (namespace, type_name) = reference.split_once('.')?;
    if namespace.is_empty() || type_name.is_empty() || type_name.contains('.') {
        return None;
    }
    Some((namespace, type_name))
}

/// @ai:intent Resolve a qualified reference and queue it for emission
/// @ai:post Ok(true) when the reference was qualified and registered, Ok(false) when unqualified
/// @ai:edge_cases unqualified tokens are accepted without any lookup
pub fn resolve_reference(registry: &mut dyn TypeRegistry, reference: &str) -> Result<bool> {
    let Some((namespace, type_name)) = split_qualified(reference) else {
        return Ok(false);
    };

    let definition = registry
        .lookup(namespace, type_name)
        .cloned()
        .ok_or_else(|| Error::UnresolvedType(reference.to_string()))?;
    registry.register(reference, definition);

    Ok(true)
}

/// @ai:intent Schema reference path for a type reference
/// @ai:example ("model.User") -> "#/definitions/model.User"
/// @ai:effects pure
pub fn definition_ref(reference: &str) -> String {
    format!("{}{}", DEFINITIONS_PREFIX, reference)
}
