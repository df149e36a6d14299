//! @ai:module:intent Describe the handler source languages swagdoc can scan
//! @ai:module:layer domain
//! @ai:module:public_api Language, CommentStyle, detect_language
//! @ai:module:stateless true

use std::path::Path;

/// @ai:intent A source language that carries handler doc comments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Go,
    Rust,
    TypeScript,
    JavaScript,
    Java,
}

/// @ai:intent How comment lines are written in a language
#[derive(Debug, Clone)]
pub struct CommentStyle {
    pub line_prefixes: &'static [&'static str],
    pub block_start: Option<&'static str>,
    pub block_end: Option<&'static str>,
    pub block_line_prefix: Option<&'static str>,
}

const ALL_LANGUAGES: [Language; 5] = [
    Language::Go,
    Language::Rust,
    Language::TypeScript,
    Language::JavaScript,
    Language::Java,
];

impl Language {
    /// @ai:intent Get the comment style for this language
    /// @ai:effects pure
    pub fn comment_style(&self) -> CommentStyle {
        match self {
            // Longest prefixes first so `///` is not read as `//` plus a slash.
            Language::Rust => CommentStyle {
                line_prefixes: &["///", "//!", "//"],
                block_start: Some("/*"),
                block_end: Some("*/"),
                block_line_prefix: Some("*"),
            },
            Language::Go
            | Language::TypeScript
            | Language::JavaScript
            | Language::Java => CommentStyle {
                line_prefixes: &["//"],
                block_start: Some("/*"),
                block_end: Some("*/"),
                block_line_prefix: Some("*"),
            },
        }
    }

    /// @ai:intent Regex matching a handler function definition, name in the first matching group
    /// @ai:effects pure
    pub fn function_pattern(&self) -> &'static str {
        match self {
            Language::Go => r"^\s*func\s+(?:\([^)]*\)\s*)?(\w+)",
            Language::Rust => r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?fn\s+(\w+)",
            Language::TypeScript | Language::JavaScript => {
                r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?(?:function\s+(\w+)|(?:const|let)\s+(\w+)\s*=)"
            }
            Language::Java => {
                r"^\s*(?:public|private|protected)?\s*(?:static\s+)?(?:[\w<>\[\],]+\s+)+(\w+)\s*\("
            }
        }
    }

    /// @ai:intent Prefixes of attribute lines allowed between a doc comment and its function
    /// @ai:effects pure
    pub fn attribute_prefixes(&self) -> &'static [&'static str] {
        match self {
            Language::Go => &[],
            Language::Rust => &["#["],
            Language::TypeScript | Language::JavaScript | Language::Java => &["@"],
        }
    }

    /// @ai:intent Check whether a trimmed line is an attribute line
    /// @ai:effects pure
    pub fn is_attribute_line(&self, line: &str) -> bool {
        self.attribute_prefixes()
            .iter()
            .any(|prefix| line.starts_with(prefix))
    }

    /// @ai:intent Get file extensions for this language
    /// @ai:effects pure
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Go => &["go"],
            Language::Rust => &["rs"],
            Language::TypeScript => &["ts", "tsx"],
            Language::JavaScript => &["js", "jsx", "mjs"],
            Language::Java => &["java"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rust",
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Java => "java",
        }
    }

    /// @ai:intent Look up a language by its name as used in configuration
    /// @ai:example ("go") -> Some(Go)
    /// @ai:effects pure
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        ALL_LANGUAGES.into_iter().find(|lang| lang.name() == name)
    }
}

/// @ai:intent Detect the language from a file path
/// @ai:example ("handler.go") -> Some(Go)
/// @ai:example ("notes.txt") -> None
/// @ai:effects pure
pub fn detect_language(path: &Path) -> Option<Language> {
    let ext = path.extension()?.to_str()?;
    ALL_LANGUAGES
        .into_iter()
        .find(|lang| lang.extensions().contains(&ext))
}
