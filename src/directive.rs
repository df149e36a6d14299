//! @ai:module:intent Dispatch comment lines to the grammar of their leading directive keyword
//! @ai:module:layer domain
//! @ai:module:public_api Directive, DirectiveKind, ParamDirective, ResponseDirective, parse_line
//! @ai:module:depends_on grammar, media_type, error
//! @ai:module:stateless true

use crate::error::Result;
use crate::grammar::{parse_param, parse_response, parse_router};
use crate::media_type::parse_media_types;
use crate::operation::{ParamLocation, SchemaKind};

/// @ai:intent Parsed arguments of an `@Param` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDirective {
    pub name: String,
    pub location: ParamLocation,
    pub schema_type: String,
    pub required: bool,
    pub description: String,
}

/// @ai:intent Parsed arguments of an `@Success` or `@Failure` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDirective {
    pub status_code: u32,
    pub kind: SchemaKind,
    pub type_ref: String,
    pub description: String,
}

/// @ai:intent Typed result of parsing one comment line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Router { path: String, method: String },
    Summary(String),
    Description(String),
    Param(ParamDirective),
    Response(ResponseDirective),
    Accept(Vec<String>),
    Produce(Vec<String>),
    /// Prose or an unknown keyword; carries the keyword as written (empty for blank lines).
    Unrecognized(String),
}

/// @ai:intent Directive keywords understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Router,
    Summary,
    Description,
    Response,
    Param,
    Accept,
    Produce,
}

const KEYWORDS: &[(&str, DirectiveKind)] = &[
    ("@router", DirectiveKind::Router),
    ("@summary", DirectiveKind::Summary),
    ("@description", DirectiveKind::Description),
    ("@success", DirectiveKind::Response),
    ("@failure", DirectiveKind::Response),
    ("@param", DirectiveKind::Param),
    ("@accept", DirectiveKind::Accept),
    ("@consume", DirectiveKind::Accept),
    ("@produce", DirectiveKind::Produce),
];

impl DirectiveKind {
    /// @ai:intent Case-insensitive keyword lookup
    /// @ai:example ("@Success") -> Some(Response)
    /// @ai:example ("@Tags") -> None
    /// @ai:effects pure
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, kind)| *kind)
    }

    /// @ai:intent Run the grammar for this kind on the directive arguments
    /// @ai:effects pure
    pub fn parse(self, args: &str) -> Result<Directive> {
        Ok(match self {
            DirectiveKind::Router => {
                let (path, method) = parse_router(args)?;
                Directive::Router { path, method }
            }
            DirectiveKind::Summary => Directive::Summary(args.to_string()),
            DirectiveKind::Description => Directive::Description(args.to_string()),
            DirectiveKind::Response => Directive::Response(parse_response(args)?),
            DirectiveKind::Param => Directive::Param(parse_param(args)?),
            DirectiveKind::Accept => Directive::Accept(parse_media_types(args)),
            DirectiveKind::Produce => Directive::Produce(parse_media_types(args)),
        })
    }
}

/// @ai:intent Strip comment markers and surrounding whitespace from a raw line
/// @ai:example ("// @Summary x ") -> "@Summary x"
/// @ai:effects pure
pub fn strip_comment(line: &str) -> &str {
    line.trim().trim_start_matches('/').trim()
}

/// @ai:intent Parse one raw comment line into a typed directive
/// @ai:post blank lines and unknown keywords yield Directive::Unrecognized
/// @ai:effects pure
pub fn parse_line(line: &str) -> Result<Directive> {
    let line = strip_comment(line);
    let Some(keyword) = line.split_whitespace().next() else {
        return Ok(Directive::Unrecognized(String::new()));
    };

    match DirectiveKind::from_keyword(keyword) {
        Some(kind) => kind.parse(line[keyword.len()..].trim()),
        None => Ok(Directive::Unrecognized(keyword.to_string())),
    }
}
