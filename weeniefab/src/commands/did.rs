use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use observability_deps::tracing::debug;
use weeniefab_catalog::{
    ArchiveIndex, Connectivity, DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_TAKE, DidCatalogService,
    DidOption,
};
use weeniefab_clap_blocks::store::StoreDsnConfig;
use weeniefab_id::{DidType, ParseDidError, parse_did};

use crate::commands::common::{ArchiveIdsError, Format, load_archive_ids};

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error(transparent)]
    Store(#[from] weeniefab_clap_blocks::store::Error),

    #[error(transparent)]
    ArchiveIds(#[from] ArchiveIdsError),

    #[error(transparent)]
    Parse(#[from] ParseDidError),

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
    /// List the distinct values the world database holds for a did type
    List(ListConfig),

    /// Search the values of a did type by hex, decimal or label text
    Search(SearchConfig),

    /// Parse an identifier typed as decimal or `0x` hex
    Parse(ParseConfig),
}

#[derive(Debug, Parser)]
struct CatalogConfig {
    #[clap(flatten)]
    store: StoreDsnConfig,

    /// Newline separated ids present in the content archive, decimal or `0x` hex
    #[clap(long = "archive-ids", env = "WEENIEFAB_ARCHIVE_IDS", action)]
    archive_ids: Option<PathBuf>,

    /// The did property type to read
    #[clap(short = 't', long = "type", action)]
    did_type: u32,

    /// The format in which to output the values
    #[clap(value_enum, long = "format", default_value_t = Format::Pretty)]
    output_format: Format,
}

impl CatalogConfig {
    fn service(&self) -> Result<DidCatalogService> {
        let store = self.store.get_store()?;
        let service = DidCatalogService::new(store, Arc::new(Connectivity::new()));

        Ok(match &self.archive_ids {
            Some(path) => {
                let ids = load_archive_ids(path)?;
                debug!(path = %path.display(), ids = ids.len(), "loaded archive ids");
                service.with_archive(Arc::new(ids) as Arc<dyn ArchiveIndex>)
            }
            None => service,
        })
    }

    fn did_type(&self) -> DidType {
        DidType::new(self.did_type)
    }
}

#[derive(Debug, Parser)]
struct ListConfig {
    #[clap(flatten)]
    catalog: CatalogConfig,

    /// Maximum number of values to read
    #[clap(long = "limit", default_value_t = DEFAULT_LIST_LIMIT, action)]
    limit: u32,
}

#[derive(Debug, Parser)]
struct SearchConfig {
    #[clap(flatten)]
    catalog: CatalogConfig,

    /// Maximum number of matches to print
    #[clap(long = "take", default_value_t = DEFAULT_SEARCH_TAKE, action)]
    take: usize,

    /// `0x` prefixed text matches the hex form, digits match the decimal form, anything else
    /// matches the label
    #[clap(allow_hyphen_values = true)]
    query: String,
}

#[derive(Debug, Parser)]
struct ParseConfig {
    /// Identifier text, e.g. `42` or `0x2A`
    #[clap(allow_hyphen_values = true)]
    text: String,
}

pub(crate) async fn command(config: Config) -> Result<()> {
    match config.command {
        SubCommand::List(config) => {
            let service = config.catalog.service()?;
            let options = service
                .list_values(config.catalog.did_type(), config.limit)
                .await;
            print!("{}", render_options(&options, config.catalog.output_format)?);
        }
        SubCommand::Search(config) => {
            let service = config.catalog.service()?;
            let options = service
                .search_values(config.catalog.did_type(), &config.query, config.take)
                .await;
            print!("{}", render_options(&options, config.catalog.output_format)?);
        }
        SubCommand::Parse(config) => {
            let did = parse_did(&config.text)?;
            println!("{did} ({})", did.to_hex());
        }
    }
    Ok(())
}

fn render_options(options: &[DidOption], format: Format) -> Result<String> {
    Ok(match format {
        Format::Pretty => options
            .iter()
            .map(|option| {
                if option.exists_in_archive {
                    format!("{option}\tarchive\n")
                } else {
                    format!("{option}\n")
                }
            })
            .collect(),
        Format::Json => format!("{}\n", serde_json::to_string_pretty(options)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use weeniefab_id::Did;

    #[test]
    fn pretty_marks_archive_presence() {
        let options = [
            DidOption::new(Did::new(10), false),
            DidOption::new(Did::new(11), true),
        ];
        assert_eq!(
            render_options(&options, Format::Pretty).unwrap(),
            "10 (0x0000000A)\n11 (0x0000000B)\tarchive\n"
        );
        assert_eq!(render_options(&[], Format::Pretty).unwrap(), "");
    }

    #[test]
    fn json_output() {
        let options = [DidOption::new(Did::new(42), true)];
        let json: serde_json::Value =
            serde_json::from_str(&render_options(&options, Format::Json).unwrap()).unwrap();
        assert_eq!(json[0]["hex"], "0x0000002A");
        assert_eq!(json[0]["exists_in_archive"], true);
    }
}
