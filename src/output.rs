//! @ai:module:intent Format scan results and documents for the terminal or as JSON
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_document, format_scan_result, to_json
//! @ai:module:depends_on document, scanner
//! @ai:module:stateless true

use crate::document::ApiDocument;
use crate::scanner::ScanResult;
use colored::Colorize;
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a document: JSON as-is, text as a route listing
/// @ai:effects pure
pub fn format_document(document: &ApiDocument, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(document, false),
        OutputFormat::JsonPretty => to_json(document, true),
        OutputFormat::Text => format_document_text(document),
    }
}

fn format_document_text(document: &ApiDocument) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n\n",
        document.info.title.bold(),
        document.info.version.dimmed()
    ));

    for (path, methods) in &document.paths {
        for (method, operation) in methods {
            let codes: Vec<String> = operation.responses.keys().map(|c| c.to_string()).collect();
            output.push_str(&format!(
                "  {:<7} {} {}\n",
                method.to_uppercase().green().bold(),
                path.cyan(),
                operation.summary
            ));
            if !codes.is_empty() {
                output.push_str(&format!("          responses: {}\n", codes.join(", ").dimmed()));
            }
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "{} operations, {} definitions\n",
        document.operation_count(),
        document.definitions.len()
    ));

    output
}

/// @ai:intent Format the diagnostics of a scan
/// @ai:effects pure
pub fn format_scan_result(result: &ScanResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(result, false),
        OutputFormat::JsonPretty => to_json(result, true),
        OutputFormat::Text => format_scan_result_text(result),
    }
}

fn format_scan_result_text(result: &ScanResult) -> String {
    let mut output = String::new();

    for diagnostic in &result.diagnostics {
        let location = format!(
            "{}:{}",
            diagnostic.location.file.display(),
            diagnostic.location.line
        );
        output.push_str(&format!(
            "{} {} - {}\n",
            "SKIP".yellow().bold(),
            location.dimmed(),
            diagnostic.message
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Scanned {} files, {} documented handlers, {} operations\n",
        result.files_scanned,
        result.handlers_documented,
        result.operations.len()
    ));

    if result.passed() {
        output.push_str(&format!("{} All directives compiled\n", "OK".green().bold()));
    } else {
        output.push_str(&format!(
            "{} directives skipped\n",
            result.diagnostics.len().to_string().yellow().bold()
        ));
    }

    output
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}
