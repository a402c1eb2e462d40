//! Minimal CLI: JSON samples | OpenAPI specs → TypeScript declarations
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use typegen::{EnumsMap, GeneratedTypes};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate TypeScript declarations from JSON samples or OpenAPI/Swagger documents
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// log generation details to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer interfaces and enums from JSON samples
    Json(JsonOut),
    /// emit one type alias per schema of an OpenAPI/Swagger document
    Openapi(OpenApiOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct JsonOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// top-level type name
    #[arg(long, default_value = "Root")]
    root_type: String,

    /// JSON file with explicit enums ({"Name": ["A", "B"]}); defaults to the
    /// sample's own "enums" key, then to discovery
    #[arg(long)]
    enums: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct OpenApiOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// print the generation report as JSON instead of code
    #[arg(long)]
    json: bool,
}

/// One parsed input document and where it came from.
#[derive(Debug)]
struct Document {
    label: String,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        init_tracing(self.verbose);
        match &self.cmd {
            Command::Json(target) => target.run(),
            Command::Openapi(target) => target.run(),
        }
    }
}

impl JsonOut {
    fn run(&self) -> Result<()> {
        let explicit = self.enums.as_deref().map(load_enums).transpose()?;
        let mut documents = Vec::new();
        for source_path in resolve_file_path_patterns(&self.input_settings.input)? {
            documents.extend(self.load_documents(&source_path)?);
        }

        // each document gets its own generation context
        let root_type = self.root_type.as_str();
        let outputs: Vec<String> = documents
            .par_iter()
            .map(|doc| {
                let from_key = typegen::enums_from_sample(&doc.value);
                let enums = explicit.as_ref().or(from_key.as_ref());
                typegen::generate_interfaces(&doc.value, root_type, enums)
            })
            .collect();

        let rendered = if documents.len() == 1 {
            outputs.concat()
        } else {
            documents
                .iter()
                .zip(&outputs)
                .map(|(doc, code)| format!("// {}\n{code}", doc.label))
                .collect::<Vec<_>>()
                .join("\n\n")
        };
        eprintln!("{} {} document(s)", "generated".green().bold(), documents.len());
        write_output(self.input_settings.out.as_deref(), &rendered)
    }

    fn load_documents(&self, source_path: &Path) -> Result<Vec<Document>> {
        let source_path_str = source_path.to_string_lossy().to_string();
        let bytes = std::fs::read(source_path)
            .with_context(|| format!("failed to read source file {source_path_str}"))?;

        let mut documents = Vec::new();
        if self.ndjson {
            let source = std::str::from_utf8(&bytes)
                .with_context(|| format!("NDJSON source file is not UTF-8 ({source_path_str})"))?;
            for (line_no, line) in source.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
                let label = format!("{source_path_str}:{}", line_no + 1);
                let value = typegen::parse_sample_text(line)
                    .with_context(|| format!("failed to parse JSON ({label})"))?;
                documents.push(Document { label, value });
            }
        } else {
            let value = typegen::parse_sample_slice(&bytes)
                .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
            documents.push(Document { label: source_path_str, value });
        }

        match self.json_pointer.as_deref() {
            None => Ok(documents),
            Some(pointer) => documents
                .into_iter()
                .map(|doc| match doc.value.pointer(pointer) {
                    Some(value) => Ok(Document { value: value.clone(), label: doc.label }),
                    None => bail!("JSON pointer {pointer} matched nothing in {}", doc.label),
                })
                .collect(),
        }
    }
}

impl OpenApiOut {
    fn run(&self) -> Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input_settings.input)?;
        let mut reports: Vec<(String, GeneratedTypes)> = Vec::new();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read spec file {source_path_str}"))?;
            let spec = typegen::parse_openapi_text(source.trim())
                .with_context(|| format!("failed to parse spec ({source_path_str})"))?;
            let report = typegen::generate_types_from_schemas(&spec);
            eprintln!(
                "{} {source_path_str}: {} schemas, {} paths (v{})",
                "parsed".green().bold(),
                report.schema_count,
                report.path_count,
                spec.version,
            );
            reports.push((source_path_str, report));
        }

        let rendered = if self.json {
            let only: Vec<&GeneratedTypes> = reports.iter().map(|(_, r)| r).collect();
            match only.as_slice() {
                [single] => serde_json::to_string_pretty(single)?,
                many => serde_json::to_string_pretty(many)?,
            }
        } else if reports.len() == 1 {
            reports.remove(0).1.code
        } else {
            reports
                .iter()
                .map(|(label, r)| format!("// {label}\n{}", r.code))
                .collect::<Vec<_>>()
                .join("\n\n")
        };
        write_output(self.input_settings.out.as_deref(), &rendered)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    if tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        eprintln!("{} tracing subscriber already initialized", "warning:".yellow());
    }
}

fn load_enums(path: &Path) -> Result<EnumsMap> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read enums file {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("enums file {} must map names to string arrays", path.display()))
}

fn write_output(out: Option<&Path>, rendered: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // explicit glob that matched nothing is an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }
    Ok(out)
}
