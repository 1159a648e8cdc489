use crate::{presets, ConfigSchema, Preset};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Generate SeaORM models and queries from a live database schema")]
pub struct Cli {
    #[arg(global = true, short = 'v', long, help = "Show debug messages")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, PartialEq, Eq, Debug)]
pub enum Commands {
    #[command(about = "Generate model and query files", display_order = 10)]
    Generate(GenerateArgs),
    #[command(about = "Print service, version, git branch, commit and build time", display_order = 20)]
    Version,
}

#[derive(Args, PartialEq, Eq, Debug, Default)]
pub struct GenerateArgs {
    #[arg(long, value_enum, help = "Start from a built-in configuration")]
    pub preset: Option<PresetName>,

    #[arg(short = 'c', long, help = "YAML file holding the database connection")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, help = "Layout of the config file")]
    pub schema: Option<ConfigSchema>,

    #[arg(
        short = 't',
        long = "table",
        value_name = "TABLE=Type",
        value_parser = parse_table_map,
        help = "Map a table to a type name, repeat for every table (replaces the preset's tables)"
    )]
    pub tables: Vec<(String, String)>,

    #[arg(long, help = "Model output directory")]
    pub model_dir: Option<PathBuf>,

    #[arg(long, help = "Query output directory")]
    pub query_dir: Option<PathBuf>,

    #[arg(long, help = "Skip running rustfmt over the generated files")]
    pub no_format: bool,

    #[arg(long, help = "Emit a MockDatabase test module in every query file")]
    pub with_unit_test: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PresetName {
    User,
    Db,
}

impl PresetName {
    pub fn preset(self) -> Preset {
        match self {
            Self::User => presets::USER,
            Self::Db => presets::DB,
        }
    }
}

fn parse_table_map(s: &str) -> Result<(String, String), String> {
    let (table, type_name) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `TABLE=Type`, got `{s}`"))?;
    let (table, type_name) = (table.trim(), type_name.trim());
    if table.is_empty() || type_name.is_empty() {
        return Err(format!("expected `TABLE=Type`, got `{s}`"));
    }
    Ok((table.to_owned(), type_name.to_owned()))
}
