pub mod parser;
pub mod schema;

use anyhow::Context;
use log::{debug, info};
use strum::{Display, EnumString};
use url::Url;

use crate::alfred::{AsItem, Item};
use crate::cache::{Cache, CacheKey};
use crate::client::Client;

use self::parser::film::FilmScanner;
use self::parser::person::PersonScanner;
use self::parser::{scan, Scanner};

pub const ORIGIN: &str = "https://letterboxd.com";
pub const RESULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SearchKind {
    Films,
    People,
}

impl SearchKind {
    fn path_segment(self) -> &'static str {
        match self {
            SearchKind::Films => "films",
            SearchKind::People => "cast-crew",
        }
    }

    /// The search endpoint for `query`: the query is lowercased and encoded
    /// the way the site's own search form does it (spaces become `+`).
    pub fn search_url(self, query: &str) -> anyhow::Result<Url> {
        let encoded = urlencoding::encode(&query.to_lowercase()).replace("%20", "+");
        Url::parse(&format!(
            "{ORIGIN}/s/search/{}/{encoded}/",
            self.path_segment()
        ))
        .with_context(|| format!("Invalid search URL for query {query:?}"))
    }
}

/// Runs one search end to end: cache lookup, fetch, extraction, rendering,
/// cache store. Returns the items to emit; zero extracted records become a
/// single informational item.
pub async fn search(
    kind: SearchKind,
    query: &str,
    limit: usize,
    cache: Option<&Cache>,
) -> anyhow::Result<Vec<Item>> {
    let key = CacheKey::from(format!("{kind}:{query}:{limit}"));
    if let Some(cache) = cache {
        if let Some(items) = cache.get(&key) {
            info!("Serving {key} from cache");
            return Ok(items);
        }
    }

    let client = Client::new()?;
    let html = client.fetch(kind.search_url(query)?).await?;
    let items = match kind {
        SearchKind::Films => scan_items::<FilmScanner>(&html, limit),
        SearchKind::People => scan_items::<PersonScanner>(&html, limit),
    };
    debug!("Extracted {} result item(s)", items.len());

    if items.is_empty() {
        // The no-results message is never cached.
        return Ok(vec![Item::message(
            "No results found",
            format!("No {kind} results for \"{query}\""),
        )]);
    }

    if let Some(cache) = cache {
        cache.set(&key, &items)?;
    }
    Ok(items)
}

fn scan_items<S>(html: &str, limit: usize) -> Vec<Item>
where
    S: Scanner,
    S::Record: AsItem,
{
    scan::<S>(html).iter().take(limit).map(AsItem::as_item).collect()
}
