//! Component Compiler CLI
//!
//! Commands: formats, compile
//! Writes the compile manifest as JSON to stdout or to --manifest.
//! Exits with status 1 as soon as one input fails.

use clap::{Parser, Subcommand};
use log::{error, info};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use component_compiler::{
    fanout::OutputRequest,
    generators::{JsonDescriptionGenerator, SvgPreviewGenerator},
    builtin_generators, CompileResult, CompileRunner, DirectoryResourceProvider, NoResources,
    Manifest, PreviewOptions, ResourceProvider,
};

#[derive(Parser)]
#[command(name = "component-compiler")]
#[command(about = "Component Compiler - previews and artifacts from component descriptions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every generator step
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List available output formats
    Formats,

    /// Compile component descriptions
    Compile {
        /// Description files, or directories of *.xml descriptions
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write an SVG preview (to --svg=PATH, a file or directory)
        #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
        svg: Option<Option<PathBuf>>,

        /// Write a JSON dump (to --json=PATH, a file or directory)
        #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
        json: Option<Option<PathBuf>>,

        /// JSON file with preview options
        #[arg(long, value_name = "FILE")]
        preview_config: Option<PathBuf>,

        /// Directory generators may load resources from
        #[arg(long, value_name = "DIR")]
        resources: Option<PathBuf>,

        /// Write the manifest here instead of stdout
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Preview width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Preview height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Configuration to preview
        #[arg(long)]
        configuration: Option<String>,
    },
}

#[derive(Serialize)]
struct FormatEntry<'a> {
    format: &'a str,
    extension: &'a str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Commands::Formats => {
            let generators = builtin_generators();
            let formats: Vec<_> = generators
                .iter()
                .map(|g| FormatEntry {
                    format: component_compiler::generators::format_label(g.file_extension()),
                    extension: g.file_extension(),
                })
                .collect();

            match serde_json::to_string_pretty(&formats) {
                Ok(text) => {
                    println!("{}", text);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("Failed to serialize formats: {}", e);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Compile {
            inputs,
            svg,
            json,
            preview_config,
            resources,
            manifest,
            width,
            height,
            configuration,
        } => {
            let mut options = match preview_config {
                Some(path) => match PreviewOptions::load(&path) {
                    Ok(o) => o,
                    Err(e) => {
                        error!("{}", e);
                        return ExitCode::FAILURE;
                    }
                },
                None => PreviewOptions::default(),
            };
            if let Some(width) = width {
                options.width = width;
            }
            if let Some(height) = height {
                options.height = height;
            }
            if configuration.is_some() {
                options.configuration = configuration;
            }

            let svg_generator = SvgPreviewGenerator;
            let json_generator = JsonDescriptionGenerator;
            let mut requests = vec![];
            if let Some(destination) = svg {
                requests.push(OutputRequest::new(&svg_generator, destination));
            }
            if let Some(destination) = json {
                requests.push(OutputRequest::new(&json_generator, destination));
            }
            if requests.is_empty() {
                error!("No output format selected, use --svg or --json");
                return ExitCode::from(2);
            }

            let files = match expand_inputs(&inputs) {
                Ok(f) => f,
                Err(e) => {
                    error!("Failed to list inputs: {}", e);
                    return ExitCode::FAILURE;
                }
            };

            let provider: Box<dyn ResourceProvider> = match resources {
                Some(dir) => Box::new(DirectoryResourceProvider::new(dir)),
                None => Box::new(NoResources),
            };
            let runner = CompileRunner::new(provider);

            let mut results: Vec<CompileResult> = vec![];
            for file in &files {
                match runner.compile_one(file, &options, &requests) {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        error!("{}", e);
                        return ExitCode::FAILURE;
                    }
                }
            }

            write_manifest(&results, manifest.as_deref())
        }
    }
}

/// Files are taken as given; directories contribute their `*.xml` files.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = vec![];
    for input in inputs {
        if input.is_dir() {
            let mut found = vec![];
            for entry in fs::read_dir(input)? {
                let path = entry?.path();
                if path.is_file() && path.extension().is_some_and(|e| e == "xml") {
                    found.push(path);
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn write_manifest(results: &[CompileResult], destination: Option<&Path>) -> ExitCode {
    let text = match serde_json::to_string_pretty(&Manifest::new(results)) {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to serialize manifest: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match destination {
        Some(path) => match fs::write(path, text) {
            Ok(()) => {
                info!("Manifest written to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to write manifest {}: {}", path.display(), e);
                ExitCode::FAILURE
            }
        },
        None => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
    }
}
