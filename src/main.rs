use clap::Parser;
use log::warn;

use lbsearch::alfred::{self, Item};
use lbsearch::cache::{Cache, CacheConfig};
use lbsearch::letterboxd::{self, SearchKind, RESULT_LIMIT};

/// Letterboxd search tool for Alfred.
///
/// Prints results in Alfred's Script Filter JSON format; every failure mode
/// is reported as a regular (invalid) item, since the workflow has no
/// channel for exit codes or stderr.
#[derive(Parser)]
#[command(version, about)]
struct Opts {
    /// Search type (films or people)
    search_type: String,
    /// Search query; multiple words are joined with spaces
    query: Vec<String>,
    /// Disable the response cache
    #[arg(long)]
    no_cache: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let query = opts.query.join(" ");
    if query.trim().is_empty() {
        return alfred::output(&[]);
    }

    let kind = match opts.search_type.parse::<SearchKind>() {
        Ok(kind) => kind,
        Err(_) => {
            return alfred::output(&[Item::error(format!(
                "Unsupported search type: {}",
                opts.search_type
            ))]);
        }
    };

    let cache = if opts.no_cache {
        None
    } else {
        match Cache::open(CacheConfig::from_env()) {
            Ok(cache) => Some(cache),
            Err(e) => {
                warn!("Failed to open the response cache, searching uncached: {e:#}");
                None
            }
        }
    };

    let items = match letterboxd::search(kind, &query, RESULT_LIMIT, cache.as_ref()).await {
        Ok(items) => items,
        Err(e) => vec![Item::error(format!("Search failed: {e:#}"))],
    };
    alfred::output(&items)?;

    // Expired entries are swept only after the result has been emitted.
    if let Some(cache) = &cache {
        cache.prune();
    }
    Ok(())
}
