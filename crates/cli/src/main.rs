use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use indexmap::IndexMap;
use serde_json::Value;
use tapwire_engine::ProviderRegistry;
use tapwire_types::PostBody;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{CliConfig, OutputFormat, default_config_path, load_config_from_path};
use render::ProviderSummary;

#[derive(Debug, Parser)]
#[command(name = "tapwire", version, about = "Decode captured analytics collector requests")]
struct Cli {
    /// Configuration file (defaults to $TAPWIRE_CONFIG_PATH or the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode a request into grouped fields
    Decode(DecodeArgs),
    /// Print the key of the provider that recognizes a URL
    Match {
        /// Full request URL
        url: String,
    },
    /// List registered providers with their groups, keys and column mappings
    Providers {
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Debug, Args)]
struct DecodeArgs {
    /// Full request URL
    url: String,

    /// Raw POST body text
    #[arg(long, conflicts_with_all = ["body_file", "form"])]
    body: Option<String>,

    /// Read the raw POST body from a file ("-" for stdin)
    #[arg(long, value_name = "PATH", conflicts_with = "form")]
    body_file: Option<PathBuf>,

    /// Form field of a pre-decoded body; repeatable
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_form_pair)]
    form: Vec<(String, String)>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Also print hidden bookkeeping fields
    #[arg(long)]
    show_hidden: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = load_config_from_path(&config_path)?;
    init_tracing(&config);
    debug!(path = %config_path.display(), "configuration loaded");

    let registry = ProviderRegistry::with_builtin_providers();
    match cli.command {
        Command::Decode(args) => run_decode(&registry, &config, args),
        Command::Match { url } => run_match(&registry, &url),
        Command::Providers { format } => run_providers(&registry, format.unwrap_or(config.format)),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(config: &CliConfig) {
    let fallback = config.log_filter.as_deref().unwrap_or("warn");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_decode(registry: &ProviderRegistry, config: &CliConfig, args: DecodeArgs) -> Result<()> {
    let body = read_body(&args)?;
    let Some(parsed) = registry.parse(&args.url, body.as_ref())? else {
        bail!("no provider recognizes {}", args.url);
    };
    let provider = registry
        .find_by_key(&parsed.provider.key)
        .context("matched provider disappeared from registry")?;

    let show_hidden = args.show_hidden || config.show_hidden;
    let output = match args.format.unwrap_or(config.format) {
        OutputFormat::Table => render::request_table(&parsed, provider.groups(), show_hidden),
        OutputFormat::Json => render::request_json(&parsed, show_hidden)?,
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn run_match(registry: &ProviderRegistry, url: &str) -> Result<()> {
    match registry.find(url) {
        Some(provider) => {
            println!("{}", provider.descriptor().key);
            Ok(())
        }
        None => bail!("no provider recognizes {url}"),
    }
}

fn run_providers(registry: &ProviderRegistry, format: OutputFormat) -> Result<()> {
    let summaries: Vec<ProviderSummary<'_>> = registry.providers().map(ProviderSummary::of).collect();
    let output = match format {
        OutputFormat::Table => render::providers_table(&summaries),
        OutputFormat::Json => render::providers_json(&summaries)?,
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn read_body(args: &DecodeArgs) -> Result<Option<PostBody>> {
    if let Some(text) = &args.body {
        return Ok(Some(PostBody::Raw(text.clone())));
    }
    if let Some(path) = &args.body_file {
        return read_body_file(path).map(|text| Some(PostBody::Raw(text)));
    }
    if !args.form.is_empty() {
        let fields: IndexMap<String, Value> = args
            .form
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        return Ok(Some(PostBody::Form(fields)));
    }
    Ok(None)
}

fn read_body_file(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("reading body from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading body file {}", path.display()))
}

fn parse_form_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty form key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
