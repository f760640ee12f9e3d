#![doc = include_str!("../README.md")]
#![deny(clippy::all)]

use std::{ffi::OsString, io::Write, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use simlink::{ModelInfo, ModelRegistry, TableTypeMapper};

mod render;

#[derive(Parser, Debug)]
#[command(name = "simlink-ls", bin_name = "simlink-ls")]
#[command(about = "Inspect the signals and parameters of a generated model")]
pub struct Cli {
    /// JSON dump of the model's metadata tables
    #[arg(value_name = "MAP_JSON")]
    pub map: PathBuf,

    /// Model to query, defaults to the root model
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Extra host type mapping, can be specified multiple times
    #[arg(long = "type", value_name = "NATIVE=HOST", value_parser = parse_type_mapping, global = true)]
    pub types: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the loaded models (root and referenced)
    Models,
    /// Count the entries of the model
    Summary,
    /// List the entries of the model
    List {
        /// Only list entries of this kind
        #[arg(long, value_enum)]
        kind: Option<EntryKindArg>,
    },
    /// Show the type of a block's signal
    Signal {
        #[arg(value_name = "BLOCK")]
        block: String,
        #[arg(value_name = "SIGNAL")]
        name: String,
    },
    /// Show the type of a block parameter
    BlockParam {
        #[arg(value_name = "BLOCK")]
        block: String,
        #[arg(value_name = "PARAM")]
        name: String,
    },
    /// Show the type of a model parameter
    Param {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable tables
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EntryKindArg {
    Params,
    BlockParams,
    Signals,
}

fn parse_type_mapping(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((native, host)) if !native.is_empty() && !host.is_empty() => {
            Ok((native.to_string(), host.to_string()))
        }
        _ => Err(format!("expected NATIVE=HOST, got '{s}'")),
    }
}

pub fn entrypoint() -> anyhow::Result<()> {
    entrypoint_from(std::env::args_os())
}

pub fn entrypoint_from<I, T>(args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?
        .set_palette("b1;3;2;4;6".to_string())
        .start()?;

    let cli = Cli::parse_from(args);
    run(&cli, &mut std::io::stdout().lock())
}

/// Load the map named on the command line into a fresh registry.
pub fn load(cli: &Cli) -> anyhow::Result<ModelRegistry> {
    let json = std::fs::read_to_string(&cli.map)
        .with_context(|| format!("Failed to read {}", cli.map.display()))?;

    let mut mapper = TableTypeMapper::new();
    for (native, host) in &cli.types {
        mapper.register(native, host);
    }

    let mut registry = ModelRegistry::new();
    registry
        .load_json(&json, &mapper)
        .with_context(|| format!("Failed to load model map {}", cli.map.display()))?;
    Ok(registry)
}

fn select_model<'a>(cli: &Cli, registry: &'a ModelRegistry) -> anyhow::Result<&'a ModelInfo> {
    let name = match &cli.model {
        Some(name) => name.as_str(),
        None => registry
            .root_models()
            .first()
            .copied()
            .context("Model map contains no models")?,
    };
    log::debug!("Querying model '{name}'");
    Ok(registry.model(name)?)
}

pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let registry = load(cli)?;
    let model = || select_model(cli, &registry);

    match &cli.command {
        Command::Models => render::models(&registry, cli.format, out),
        Command::Summary => render::summary(model()?, cli.format, out),
        Command::List { kind } => render::list(model()?, *kind, cli.format, out),
        Command::Signal { block, name } => {
            render::entry(model()?.lookup_signal(block, name)?, cli.format, out)
        }
        Command::BlockParam { block, name } => {
            render::entry(model()?.lookup_block_param(block, name)?, cli.format, out)
        }
        Command::Param { name } => {
            render::entry(model()?.lookup_model_param(name)?, cli.format, out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_type_mapping_accepts_pairs() {
        assert_eq!(
            parse_type_mapping("GearMode=int32"),
            Ok(("GearMode".to_string(), "int32".to_string()))
        );
        assert!(parse_type_mapping("GearMode").is_err());
        assert!(parse_type_mapping("=int32").is_err());
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "simlink-ls",
            "map.json",
            "signal",
            "Gain1",
            "Out1",
            "--model",
            "Plant",
            "--format",
            "json",
        ])
        .expect("parse");
        assert_eq!(cli.model.as_deref(), Some("Plant"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Signal { .. }));
    }
}
