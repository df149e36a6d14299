//! @ai:module:intent Assemble compiled operations into a Swagger 2.0 document
//! @ai:module:layer application
//! @ai:module:public_api ApiDocument, Info
//! @ai:module:depends_on operation, registry, config

use crate::config::InfoConfig;
use crate::operation::Operation;
use crate::registry::TypeDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent The document's info section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&InfoConfig> for Info {
    fn from(config: &InfoConfig) -> Self {
        Self {
            title: config.title.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
        }
    }
}

/// @ai:intent Aggregated API description: paths, methods, operations and definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDocument {
    pub swagger: String,
    pub info: Info,
    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub definitions: BTreeMap<String, TypeDefinition>,
}

impl ApiDocument {
    pub fn new(info: Info) -> Self {
        Self {
            swagger: "2.0".to_string(),
            info,
            base_path: None,
            paths: BTreeMap::new(),
            definitions: BTreeMap::new(),
        }
    }

    /// @ai:intent Build a document from operations and the registered definitions
    /// @ai:post unrouted operations are dropped
    pub fn build(
        info: Info,
        operations: impl IntoIterator<Item = Operation>,
        definitions: &BTreeMap<String, TypeDefinition>,
    ) -> Self {
        let mut document = Self::new(info);
        for operation in operations {
            document.add_operation(operation);
        }
        document.definitions = definitions.clone();
        document
    }

    /// @ai:intent Insert an operation under its path and lower-cased method
    /// @ai:post returns true if an operation for the same route was replaced
    pub fn add_operation(&mut self, operation: Operation) -> bool {
        if !operation.is_routed() {
            tracing::debug!("Dropping operation without a path");
            return false;
        }

        let path = operation.path.clone();
        let method = operation.http_method.to_lowercase();
        let replaced = self
            .paths
            .entry(path.clone())
            .or_default()
            .insert(method.clone(), operation)
            .is_some();

        if replaced {
            tracing::warn!(
                "Duplicate route {} {}, keeping the later one",
                method.to_uppercase(),
                path
            );
        }
        replaced
    }

    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths.get(path)?.get(&method.to_lowercase())
    }

    pub fn operation_count(&self) -> usize {
        self.paths.values().map(BTreeMap::len).sum()
    }
}
