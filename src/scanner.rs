//! @ai:module:intent Walk handler sources and compile their doc comments into operations
//! @ai:module:layer application
//! @ai:module:public_api scan_path, scan_file, scan_directory, scan_source, ScanResult, ScannedOperation, Diagnostic, Location
//! @ai:module:depends_on source, operation, registry, config, error

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::operation::Operation;
use crate::registry::TypeRegistry;
use crate::source::{parse_file, ParsedSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent A position in a scanned source file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

impl Location {
    pub fn new(file: PathBuf, line: usize) -> Self {
        Self { file, line }
    }
}

/// @ai:intent A directive line that was skipped, or a file that could not be read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub location: Location,
    pub message: String,
}

/// @ai:intent An operation together with the handler it was compiled from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedOperation {
    pub handler: String,
    pub location: Location,
    pub method: String,
    pub path: String,
    pub operation: Operation,
}

/// @ai:intent Outcome of scanning one file or a whole tree
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanResult {
    pub files_scanned: usize,
    pub handlers_documented: usize,
    pub operations: Vec<ScannedOperation>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanResult {
    /// @ai:intent Check whether every directive compiled
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn merge(&mut self, other: ScanResult) {
        self.files_scanned += other.files_scanned;
        self.handlers_documented += other.handlers_documented;
        self.operations.extend(other.operations);
        self.diagnostics.extend(other.diagnostics);
    }

    /// @ai:intent Consume the result, keeping only the compiled operations
    pub fn into_operations(self) -> Vec<Operation> {
        self.operations.into_iter().map(|s| s.operation).collect()
    }
}

/// @ai:intent Compile every documented handler of an already split source
/// @ai:pre without a registry, type references are attached unresolved
/// @ai:post Err only for fatal directive errors, every other failure becomes a diagnostic
/// @ai:effects log
pub fn scan_source(
    path: &Path,
    parsed: &ParsedSource,
    mut registry: Option<&mut dyn TypeRegistry>,
) -> Result<ScanResult> {
    let mut result = ScanResult {
        files_scanned: 1,
        ..Default::default()
    };

    for handler in &parsed.handlers {
        let Some(block) = parsed.block_for(handler) else {
            continue;
        };
        result.handlers_documented += 1;

        let mut operation = Operation::new();
        for line in &block.lines {
            match operation.parse_comment(&line.content, registry.as_mut().map(|r| &mut **r as &mut dyn TypeRegistry)) {
                Ok(()) => {}
                Err(e) if e.is_fatal() => {
                    tracing::error!("{}:{}: {}", path.display(), line.line_number, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("{}:{}: {}", path.display(), line.line_number, e);
                    result.diagnostics.push(Diagnostic {
                        location: Location::new(path.to_path_buf(), line.line_number),
                        message: e.to_string(),
                    });
                }
            }
        }

        if operation.is_routed() {
            result.operations.push(ScannedOperation {
                handler: handler.name.clone(),
                location: Location::new(path.to_path_buf(), handler.line),
                method: operation.http_method.clone(),
                path: operation.path.clone(),
                operation,
            });
        } else {
            tracing::debug!(
                "{}:{}: `{}` has no @Router directive",
                path.display(),
                handler.line,
                handler.name
            );
        }
    }

    Ok(result)
}

/// @ai:intent Scan a single source file
/// @ai:effects fs:read
pub fn scan_file(path: &Path, registry: Option<&mut dyn TypeRegistry>) -> Result<ScanResult> {
    let parsed = parse_file(path)?;
    scan_source(path, &parsed, registry)
}

/// @ai:intent Scan all supported, non-excluded files below `root`
/// @ai:post unreadable files are reported as diagnostics, fatal directive errors abort
/// @ai:effects fs:read
pub fn scan_directory(
    root: &Path,
    config: &ScanConfig,
    mut registry: Option<&mut dyn TypeRegistry>,
) -> Result<ScanResult> {
    let mut result = ScanResult::default();

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !config.is_excluded(e.path()))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && config.accepts_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();

    for file_path in files {
        tracing::debug!("Scanning {}", file_path.display());

        match scan_file(&file_path, registry.as_mut().map(|r| &mut **r as &mut dyn TypeRegistry)) {
            Ok(file_result) => result.merge(file_result),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                result.files_scanned += 1;
                result.diagnostics.push(Diagnostic {
                    location: Location::new(file_path, 0),
                    message: format!("Failed to read file: {}", e),
                });
            }
        }
    }

    tracing::info!(
        "Scanned {} files, {} documented handlers, {} operations",
        result.files_scanned,
        result.handlers_documented,
        result.operations.len()
    );

    Ok(result)
}

/// @ai:intent Scan a file or a directory depending on what `path` is
/// @ai:effects fs:read
pub fn scan_path(
    path: &Path,
    config: &ScanConfig,
    registry: Option<&mut dyn TypeRegistry>,
) -> Result<ScanResult> {
    if path.is_file() {
        scan_file(path, registry)
    } else if path.is_dir() {
        scan_directory(path, config, registry)
    } else {
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )))
    }
}
