use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::read::MultiGzDecoder;
use tracing::{debug, info};

use crate::input::{SourceError, SourceFormat, parse_table, read_source_bytes};
use crate::model::table::RawTable;
use crate::pipeline::stage1_normalize::{NormalizeError, NormalizeOutput, normalize_with_report};

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, SourceError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn hash_bytes(data: &[u8]) -> u64 {
    let mut hasher = Fnv64::new();
    hasher.update(data);
    hasher.finish()
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// A loaded score sheet together with its canonical records.
#[derive(Debug)]
pub struct LoadedSource {
    pub path: PathBuf,
    pub content_hash: u64,
    pub table: RawTable,
    pub normalized: NormalizeOutput,
}

/// Memoizes loaded sources by content hash so an unchanged sheet is parsed
/// and normalized once, however many players are selected from it.
#[derive(Debug, Default)]
pub struct SourceCache {
    entries: HashMap<u64, Arc<LoadedSource>>,
    hits: usize,
    misses: usize,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<Arc<LoadedSource>, CacheError> {
        let bytes = read_source_bytes(path)?;
        let content_hash = hash_bytes(&bytes);
        if let Some(hit) = self.entries.get(&content_hash) {
            self.hits += 1;
            debug!(
                "source cache hit: path={}, hash={:016x}",
                path.display(),
                content_hash
            );
            return Ok(Arc::clone(hit));
        }

        self.misses += 1;
        let table = parse_table(&bytes, SourceFormat::from_path(path))?;
        let normalized = normalize_with_report(&table)?;
        info!(
            "loaded {}: rows={}, players={}, records={}, dropped={}",
            path.display(),
            table.n_rows(),
            table.player_columns().len(),
            normalized.records.len(),
            normalized.dropped.len()
        );
        let loaded = Arc::new(LoadedSource {
            path: path.to_path_buf(),
            content_hash,
            table,
            normalized,
        });
        self.entries.insert(content_hash, Arc::clone(&loaded));
        Ok(loaded)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

struct Fnv64 {
    hash: u64,
}

impl Fnv64 {
    fn new() -> Self {
        Self {
            hash: 0xcbf29ce484222325,
        }
    }

    fn update(&mut self, data: &[u8]) {
        let mut h = self.hash;
        for &b in data {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.hash = h;
    }

    fn finish(&self) -> u64 {
        self.hash
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/cache.rs"]
mod tests;
