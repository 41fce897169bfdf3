//! `dmmf-gen`: CLI driver for the DMMF-to-TypeScript generator.
//!
//! # Subcommands
//!
//! ```text
//! dmmf-gen generate --schema schema.dmmf.json --config project.yaml --out dist
//! dmmf-gen check --schema schema.dmmf.json
//! ```

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use codegen_analyzer::analyze_schema;
use codegen_engine::{ErrorEscalationPolicy, GenerationContext};
use codegen_pipeline::{default_phases, run_pipeline, validate_and_normalize, PhaseHookRegistry, RawConfig};
use dmmf_core::ParsedSchema;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dmmf-gen", version, about = "Generate TypeScript DTOs, validators, services, controllers, routes, SDK, and OpenAPI spec from a Prisma DMMF document")]
struct Cli {
    /// Enable verbose (debug-level) logging regardless of `RUST_LOG`.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full generation pipeline and write the resulting file tree.
    Generate(GenerateArgs),

    /// Parse and validate a schema without generating anything.
    ///
    /// Reports every validation error found in one pass; never aborts on
    /// the first one, so a schema author sees the full picture.
    Check(CheckArgs),
}

#[derive(Parser)]
struct GenerateArgs {
    /// Path to the DMMF JSON document (`prisma generate` output, or
    /// `npx prisma-dmmf` equivalent).
    #[arg(short, long)]
    schema: PathBuf,

    /// Path to the project config (JSON or YAML).
    #[arg(short, long)]
    config: PathBuf,

    /// Directory the generated file tree is written under.
    #[arg(short, long, default_value = "generated")]
    out: PathBuf,

    /// Abort the whole run on the first warning, not just the first error.
    #[arg(long)]
    strict: bool,
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the DMMF JSON document.
    #[arg(short, long)]
    schema: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "dmmf_gen=debug,codegen_pipeline=debug" } else { "dmmf_gen=info,codegen_pipeline=info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_target(false)
        .try_init();

    match &cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Check(args) => run_check(args),
    }
}

fn load_schema(path: &Path) -> Result<ParsedSchema> {
    let raw_json = fs::read_to_string(path).with_context(|| format!("failed to read schema: {}", path.display()))?;
    let document: dmmf_core::RawDocument =
        serde_json::from_str(&raw_json).with_context(|| format!("failed to deserialize DMMF document: {}", path.display()))?;
    dmmf_core::parse(document).with_context(|| format!("failed to parse DMMF document: {}", path.display()))
}

fn load_raw_config(path: &Path) -> Result<RawConfig> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read config: {}", path.display()))?;
    match path.extension().and_then(std::ffi::OsStr::to_str) {
        Some("json") => serde_json::from_str(&content).with_context(|| format!("failed to parse config: {}", path.display())),
        _ => serde_yaml_ng::from_str(&content).with_context(|| format!("failed to parse config: {}", path.display())),
    }
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    eprintln!("Loading schema: {}", args.schema.display());
    let schema = load_schema(&args.schema)?;

    eprintln!("Loading config: {}", args.config.display());
    let raw_config = load_raw_config(&args.config)?;
    let config = validate_and_normalize(&raw_config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::anyhow!("config rejected:\n  {}", messages.join("\n  "))
    })?;

    let mut analysis = analyze_schema(&schema);
    for plugin in config.enabled_plugins() {
        if let Some(model) = plugin.config().get("model").and_then(serde_json::Value::as_str) {
            analysis.annotate_service(model, plugin.name());
        }
    }

    let policy = if args.strict { ErrorEscalationPolicy::strict() } else { ErrorEscalationPolicy::default_policy() };
    let mut context = GenerationContext::new(std::sync::Arc::new(schema), std::sync::Arc::new(analysis), policy);

    let phases = default_phases(&config);
    let hooks = PhaseHookRegistry::new();

    eprintln!("Running {} phases...", phases.len());
    run_pipeline(&mut context, &config, &phases, &hooks).context("generation failed")?;

    write_output(&args.out, &context)?;

    let diagnostic_count = context.diagnostics().diagnostics().len();
    eprintln!(
        "Generated {} files into {} ({diagnostic_count} diagnostic(s))",
        context.files().len(),
        args.out.display(),
    );
    Ok(())
}

fn write_output(out_dir: &Path, context: &GenerationContext) -> Result<()> {
    for file in context.files().files() {
        let path = out_dir.join(file.path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, file.contents()).with_context(|| format!("failed to write: {}", path.display()))?;
    }
    Ok(())
}

fn run_check(args: &CheckArgs) -> Result<()> {
    eprintln!("Loading schema: {}", args.schema.display());
    let schema = load_schema(&args.schema)?;

    match dmmf_core::validate_detailed(&schema) {
        Ok(()) => {
            println!("OK: {} model(s), {} enum(s), no validation errors", schema.models().len(), schema.enums().len());
            Ok(())
        }
        Err(failure) => {
            println!("FAILED: {} validation error(s)", failure.errors.len());
            for error in &failure.errors {
                println!("  - {error}");
            }
            bail!("schema validation failed");
        }
    }
}
