use clap::Parser;
use weeniefab_clap_blocks::lookup::LookupSourceConfig;
use weeniefab_lookup::{LookupEntry, LookupRegistry, SourceError};

use crate::commands::common::Format;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("unable to format output: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Parser)]
pub(crate) struct Config {
    #[clap(subcommand)]
    command: SubCommand,
}

#[derive(Debug, clap::Subcommand)]
enum SubCommand {
    /// Print the canonical key of every loaded table
    Keys(KeysConfig),

    /// Print the entries of one table
    Get(GetConfig),
}

#[derive(Debug, Parser)]
struct KeysConfig {
    #[clap(flatten)]
    source: LookupSourceConfig,

    /// Also print the column header each table was read from
    #[clap(long = "names", action)]
    names: bool,
}

#[derive(Debug, Parser)]
struct GetConfig {
    #[clap(flatten)]
    source: LookupSourceConfig,

    /// Table key, e.g. `Damage_Type`, `damage type` or `Table 3 - Damage Type`
    key: String,

    /// The format in which to output the entries
    #[clap(value_enum, long = "format", default_value_t = Format::Pretty)]
    output_format: Format,
}

pub(crate) fn command(config: Config) -> Result<()> {
    match config.command {
        SubCommand::Keys(config) => {
            let registry = config.source.registry()?;
            print!("{}", render_keys(&registry, config.names));
        }
        SubCommand::Get(config) => {
            let registry = config.source.registry()?;
            let entries = registry.get(&config.key);
            print!("{}", render_entries(entries, config.output_format)?);
        }
    }
    Ok(())
}

fn render_keys(registry: &LookupRegistry, names: bool) -> String {
    let mut out = String::new();
    for key in registry.keys() {
        out.push_str(key);
        if names {
            if let Some(table) = registry.table(key) {
                out.push('\t');
                out.push_str(table.name());
            }
        }
        out.push('\n');
    }
    out
}

fn render_entries(entries: &[LookupEntry], format: Format) -> Result<String> {
    Ok(match format {
        Format::Pretty => entries.iter().map(|e| format!("{e}\n")).collect(),
        Format::Json => format!("{}\n", serde_json::to_string_pretty(entries)?),
    })
}
