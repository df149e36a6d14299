//! @ai:module:intent swagdoc library for compiling handler doc comments into API descriptions
//! @ai:module:layer infrastructure
//! @ai:module:public_api directive, grammar, media_type, operation, registry, source, scanner, document, config, output, language, error
//! @ai:module:stateless true
//!
//! # swagdoc
//!
//! Compiles annotations such as `@Router`, `@Param` and `@Success` found in
//! handler doc comments into a Swagger 2.0 description.
//!
//! ## Example
//!
//! ```rust
//! use swagdoc_parser::{Operation, ParserContext};
//! use serde_json::json;
//!
//! let mut ctx = ParserContext::new();
//! ctx.define("model", "User", json!({"type": "object"}));
//!
//! let mut op = Operation::new();
//! for line in [
//!     "// @Summary Get a user",
//!     "// @Param id path int true \"user id\"",
//!     "// @Success 200 {object} model.User \"ok\"",
//!     "// @Router /users/{id} [get]",
//! ] {
//!     op.parse_comment(line, Some(&mut ctx)).unwrap();
//! }
//!
//! assert_eq!(op.http_method, "GET");
//! assert!(ctx.registered.contains_key("model.User"));
//! ```

pub mod config;
pub mod directive;
pub mod document;
pub mod error;
pub mod grammar;
pub mod language;
pub mod media_type;
pub mod operation;
pub mod output;
pub mod registry;
pub mod scanner;
pub mod source;

pub use config::{InfoConfig, ScanConfig, SwagdocConfig};
pub use directive::{parse_line, Directive, DirectiveKind, ParamDirective, ResponseDirective};
pub use document::{ApiDocument, Info};
pub use error::{Error, Result};
pub use language::{detect_language, Language};
pub use operation::{Operation, ParamLocation, Parameter, Response, Schema, SchemaKind};
pub use output::{format_document, format_scan_result, to_json, OutputFormat};
pub use registry::{resolve_reference, ParserContext, TypeDefinition, TypeRegistry};
pub use scanner::{scan_directory, scan_file, scan_path, Diagnostic, ScanResult};
