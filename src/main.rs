//! @ai:module:intent CLI entry point for swagdoc
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on scanner, document, config, output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use swagdoc_parser::{
    output, scanner, ApiDocument, Info, OutputFormat, ParserContext, ScanResult, SwagdocConfig,
    TypeRegistry,
};

#[derive(Parser)]
#[command(name = "swagdoc")]
#[command(author, version, about = "Compile handler doc-comment annotations into Swagger 2.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan handlers and emit the API document
    Scan {
        /// File or directory to scan (overrides scan.search_dir)
        path: Option<PathBuf>,

        /// Configuration file (defaults to ./swagdoc.toml when present)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// JSON file with type definitions (overrides scan.types_file)
        #[arg(long, short)]
        types: Option<PathBuf>,

        /// Write the document to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "json-pretty")]
        format: Format,

        /// Fail with exit code 1 if any directive was skipped
        #[arg(long, default_value = "false")]
        strict: bool,
    },

    /// Report directives that fail to compile
    Check {
        /// File or directory to check (overrides scan.search_dir)
        path: Option<PathBuf>,

        /// Configuration file (defaults to ./swagdoc.toml when present)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// JSON file with type definitions (overrides scan.types_file)
        #[arg(long, short)]
        types: Option<PathBuf>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Write a default configuration file
    Init {
        /// Where to write the configuration
        #[arg(long, short, default_value = "swagdoc.toml")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

/// @ai:intent Load configuration and types, then scan with CLI overrides applied
/// @ai:post the context is None when no types file is configured, references then stay unresolved
/// @ai:effects fs:read
fn scan(
    path: Option<PathBuf>,
    config: Option<&Path>,
    types: Option<PathBuf>,
) -> swagdoc_parser::Result<(SwagdocConfig, Option<ParserContext>, ScanResult)> {
    let mut config = SwagdocConfig::discover(config)?;
    if let Some(path) = path {
        config.scan.search_dir = path;
    }
    if let Some(types) = types {
        config.scan.types_file = Some(types);
    }

    let mut ctx = config
        .scan
        .types_file
        .as_deref()
        .map(ParserContext::load_types)
        .transpose()?;
    match &ctx {
        Some(ctx) => tracing::debug!("Loaded {} type definitions", ctx.type_count()),
        None => tracing::debug!("No types file, type references are not resolved"),
    }

    let registry = ctx.as_mut().map(|c| c as &mut dyn TypeRegistry);
    let result = scanner::scan_path(&config.scan.search_dir, &config.scan, registry)?;
    Ok((config, ctx, result))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "swagdoc=info"
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            ),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            path,
            config,
            types,
            output: destination,
            format,
            strict,
        } => match scan(path, config.as_deref(), types) {
            Ok((config, ctx, result)) => {
                let passed = result.passed();
                let registered = ctx.map(|c| c.registered).unwrap_or_default();
                let mut document = ApiDocument::build(
                    Info::from(&config.info),
                    result.into_operations(),
                    &registered,
                );
                document.base_path = config.info.base_path.clone();

                let rendered = output::format_document(&document, format.into());
                match destination {
                    Some(file) => {
                        if let Err(e) = std::fs::write(&file, rendered) {
                            eprintln!("Error: failed to write {}: {}", file.display(), e);
                            return ExitCode::from(2);
                        }
                        tracing::info!("Wrote {}", file.display());
                    }
                    None => println!("{}", rendered),
                }

                if strict && !passed {
                    ExitCode::from(1)
                } else {
                    ExitCode::SUCCESS
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },

        Commands::Check {
            path,
            config,
            types,
            format,
        } => match scan(path, config.as_deref(), types) {
            Ok((_, _, result)) => {
                println!("{}", output::format_scan_result(&result, format.into()));

                if result.passed() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },

        Commands::Init { output } => {
            if output.exists() {
                eprintln!("Error: {} already exists", output.display());
                return ExitCode::from(2);
            }

            match SwagdocConfig::default().save(&output) {
                Ok(()) => {
                    println!("Wrote {}", output.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }
    }
}
