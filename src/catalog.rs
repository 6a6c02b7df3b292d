//! Album catalog built from the device inventory.
//!
//! The catalog is rebuilt for every album request and handed to the resolver
//! by value; nothing is cached between requests.

use std::collections::{HashMap, HashSet};

use log::{info, warn};

use crate::backends::{CatalogRecord, DeviceBackend};
use crate::config::CatalogConfig;
use crate::error::DeviceError;

/// Lower-cases `album`, drops everything outside `[0-9a-z ]`, and collapses
/// runs of spaces. Removed characters do not leave a gap: "Joshua-Tree"
/// becomes "joshuatree".
pub fn normalize_album_key(album: &str) -> String {
    let filtered: String = album
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized album name to id, plus id to artist.
///
/// Keys iterate in first-insertion order. Re-inserting a key overwrites its id
/// but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    albums: Vec<(String, String)>,
    key_positions: HashMap<String, usize>,
    artists: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an album under an already-normalized key.
    pub fn insert(&mut self, key: String, id: String, artist: String) {
        self.artists.insert(id.clone(), artist);
        match self.key_positions.get(&key) {
            Some(&position) => self.albums[position].1 = id,
            None => {
                self.key_positions.insert(key.clone(), self.albums.len());
                self.albums.push((key, id));
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn album_id(&self, key: &str) -> Option<&str> {
        self.key_positions
            .get(key)
            .map(|&position| self.albums[position].1.as_str())
    }

    pub fn artist(&self, id: &str) -> Option<&str> {
        self.artists.get(id).map(String::as_str)
    }

    /// `(key, id)` pairs in insertion order.
    pub fn albums(&self) -> impl Iterator<Item = (&str, &str)> {
        self.albums
            .iter()
            .map(|(key, id)| (key.as_str(), id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}

/// Counters collected while paging the inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogLoadReport {
    pub pages_fetched: usize,
    pub records_seen: usize,
    pub albums_accepted: usize,
    pub out_of_range: usize,
    pub malformed: usize,
    pub duplicate_ids: usize,
    pub empty_keys: usize,
}

/// Pages through the device inventory and builds a complete catalog.
///
/// Paging stops after the first page holding fewer than `page_size` records.
/// A catalog that ends exactly on a page boundary costs one extra, empty
/// fetch. A full page that adds no unseen ids also ends paging, and running
/// past `max_pages` fails the load.
pub fn load_catalog(
    backend: &dyn DeviceBackend,
    config: &CatalogConfig,
) -> Result<(Catalog, CatalogLoadReport), DeviceError> {
    let page_size = config.page_size.max(1);
    let album_ids = config.album_id_min..config.album_id_max;
    let mut catalog = Catalog::new();
    let mut report = CatalogLoadReport::default();
    let mut seen_ids: HashSet<i64> = HashSet::new();
    let mut offset = 0usize;

    loop {
        if report.pages_fetched >= config.max_pages {
            return Err(DeviceError::CatalogTooLarge {
                max_pages: config.max_pages,
                page_size,
            });
        }
        let page = backend.fetch_catalog_page(offset, page_size)?;
        report.pages_fetched += 1;
        report.records_seen += page.raw_len;
        report.malformed += page.malformed;

        let mut new_ids = 0usize;
        for CatalogRecord { id, album, artist } in page.records {
            if !seen_ids.insert(id) {
                report.duplicate_ids += 1;
                continue;
            }
            new_ids += 1;
            if !album_ids.contains(&id) {
                report.out_of_range += 1;
                continue;
            }
            let key = normalize_album_key(&album);
            if key.is_empty() {
                report.empty_keys += 1;
                continue;
            }
            catalog.insert(key, id.to_string(), artist);
            report.albums_accepted += 1;
        }

        offset = offset.saturating_add(page.raw_len);
        if page.raw_len < page_size {
            break;
        }
        if new_ids == 0 && page.malformed < page.raw_len {
            warn!(
                "Inventory page at offset {} repeated earlier records. Stopping catalog load.",
                offset - page.raw_len
            );
            break;
        }
    }

    if report.malformed > 0 {
        warn!("Skipped {} malformed inventory records", report.malformed);
    }
    info!(
        "Loaded {} albums ({} records across {} pages, {} out of range, {} duplicates, {} unnamed)",
        catalog.len(),
        report.records_seen,
        report.pages_fetched,
        report.out_of_range,
        report.duplicate_ids,
        report.empty_keys
    );
    Ok((catalog, report))
}
