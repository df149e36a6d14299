//! @ai:module:intent Micro-grammars for the router, param and response directives
//! @ai:module:layer domain
//! @ai:module:public_api parse_router, parse_param, parse_response
//! @ai:module:depends_on directive, operation, error
//! @ai:module:stateless true

use crate::directive::{ParamDirective, ResponseDirective};
use crate::error::{Error, Result};
use crate::operation::{ParamLocation, SchemaKind};
use once_cell::sync::Lazy;
use regex::Regex;

static ROUTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w./\-{}]+)[^\[]+\[([^\]]+)").expect("Invalid regex"));

static PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([-\w]+)\s+(\w+)\s+([\S.]+)\s+(\w+)\s+"([^"]+)""#).expect("Invalid regex")
});

static RESPONSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+\s+([\w{}]+)\s+([\w\-./]+)").expect("Invalid regex"));

static QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("Invalid regex"));

/// @ai:intent Parse `<path> ... [<method>]` into a verbatim path and upper-cased method
/// @ai:example ("/pets/{id} [delete]") -> ("/pets/{id}", "DELETE")
/// @ai:effects pure
pub fn parse_router(args: &str) -> Result<(String, String)> {
    let captures = ROUTER_RE.captures(args).ok_or_else(|| Error::MalformedDirective {
        directive: "router",
        text: args.to_string(),
    })?;

    let path = captures[1].to_string();
    let method = captures[2].trim().to_uppercase();
    Ok((path, method))
}

/// @ai:intent Parse `<name> <location> <type> <required> "<description>"`
/// @ai:pre args is the directive text after the keyword
/// @ai:post Header and Form locations yield the fatal UnsupportedParamLocation error
/// @ai:edge_cases required is false unless the token is `true` or `required`
/// @ai:effects pure
pub fn parse_param(args: &str) -> Result<ParamDirective> {
    let malformed = || Error::MalformedDirective {
        directive: "param",
        text: args.to_string(),
    };
    let captures = PARAM_RE.captures(args).ok_or_else(malformed)?;

    let location = match &captures[2] {
        "query" => ParamLocation::Query,
        "path" => ParamLocation::Path,
        "body" => ParamLocation::Body,
        unsupported @ ("Header" | "Form") => {
            return Err(Error::UnsupportedParamLocation {
                location: unsupported.to_string(),
                text: args.to_string(),
            })
        }
        _ => return Err(malformed()),
    };

    let required = matches!(
        captures[4].to_lowercase().as_str(),
        "true" | "required"
    );

    Ok(ParamDirective {
        name: captures[1].to_string(),
        location,
        schema_type: captures[3].to_string(),
        required,
        description: captures[5].to_string(),
    })
}

/// @ai:intent Parse `<code> {<kind>} <type> ... "<description>"`
/// @ai:post description is the first quoted run after the type token, empty if none
/// @ai:edge_cases a non-integer status code is reported as InvalidStatusCode
/// @ai:effects pure
pub fn parse_response(args: &str) -> Result<ResponseDirective> {
    let code = args.split_whitespace().next().ok_or_else(|| Error::MalformedDirective {
        directive: "response",
        text: args.to_string(),
    })?;
    let status_code = code.parse::<u32>().map_err(|_| Error::InvalidStatusCode {
        text: args.to_string(),
    })?;

    let captures = RESPONSE_RE.captures(args).ok_or_else(|| Error::MalformedDirective {
        directive: "response",
        text: args.to_string(),
    })?;
    let rest = &args[captures.get(0).map_or(args.len(), |m| m.end())..];

    let description = QUOTED_RE
        .captures(rest)
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    Ok(ResponseDirective {
        status_code,
        kind: SchemaKind::parse(&captures[1]),
        type_ref: captures[2].to_string(),
        description,
    })
}
