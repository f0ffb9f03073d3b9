//! File-based response cache with TTL eviction.
//!
//! One file per key, named by a hash of the key; the file's modification
//! time is the sole expiry signal. Read faults of any kind are treated as a
//! miss, write faults propagate.

use std::env;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use derive_more::{AsRef, Display, From};
use fs_err as fs;
use log::debug;
use sha2::{Digest, Sha256};

use crate::alfred::Item;

pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Directory override set by Alfred for the running workflow.
const CACHE_DIR_ENV: &str = "alfred_workflow_cache";

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub dir: Option<PathBuf>,
    pub ttl: Duration,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            dir: env::var_os(CACHE_DIR_ENV).map(PathBuf::from),
            ttl: DEFAULT_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display, From, AsRef)]
#[as_ref(forward)]
pub struct CacheKey(String);

#[derive(Debug)]
pub struct Cache {
    dir: PathBuf,
    ttl: Duration,
}

impl Cache {
    pub fn open(config: CacheConfig) -> anyhow::Result<Self> {
        let dir = config
            .dir
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("lbsearch")))
            .unwrap_or_else(|| env::temp_dir().join("lbsearch"));
        fs::create_dir_all(&dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700))?;
        }
        Ok(Self {
            dir,
            ttl: config.ttl,
        })
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        let digest = Sha256::digest(key.0.as_bytes());
        self.dir.join(format!("{digest:x}.json"))
    }

    fn age(path: &Path) -> Option<Duration> {
        let modified = fs::metadata(path).ok()?.modified().ok()?;
        // A modification time in the future counts as fresh.
        Some(modified.elapsed().unwrap_or_default())
    }

    /// Returns the cached items for `key`, or `None` on a miss. An entry
    /// older than the TTL is deleted here and reported as a miss.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<Item>> {
        let path = self.entry_path(key);
        let age = Self::age(&path)?;
        if age > self.ttl {
            debug!("Cache entry for {key} has expired; removing");
            let _ = fs::remove_file(&path);
            return None;
        }
        let file = fs::File::open(&path).ok()?;
        serde_json::from_reader(BufReader::new(file)).ok()
    }

    /// Stores `items` under `key`, fully overwriting any previous entry.
    pub fn set(&self, key: &CacheKey, items: &[Item]) -> anyhow::Result<()> {
        let path = self.entry_path(key);
        serde_json::to_writer(BufWriter::new(fs::File::create(&path)?), items)
            .with_context(|| format!("While writing cache entry for {key}"))
    }

    /// Best-effort sweep removing every expired entry. Never fails.
    pub fn prune(&self) {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") || !path.is_file() {
                continue;
            }
            if let Some(age) = Self::age(&path) {
                if age > self.ttl {
                    debug!("Pruning expired cache entry {path:?}");
                    let _ = fs::remove_file(&path);
                }
            }
        }
    }
}
