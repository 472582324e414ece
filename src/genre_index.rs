//! The genre index: saved tracks keyed by id, each carrying its artist's genres.
//!
//! The index is always built from scratch by [`GenreIndexBuilder`]; it is never
//! patched in place after a build.

use std::collections::{BTreeSet, HashMap};

use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::clients::{
    catalog::CatalogClient,
    entities::{ArtistGenres, TrackRecord},
    errors::{Error, Result},
};

/// Genre list given to tracks whose artist has no genre data.
///
/// Keeps every record's genre list non-empty. Searching for `"none"` finds
/// these tracks, and callers rely on that.
pub const NO_GENRE: &str = "none";

/// Saved-tracks endpoint hard limit.
pub const SAVED_TRACKS_PAGE_SIZE: u32 = 50;

/// Artist batch lookup hard limit.
pub const ARTIST_LOOKUP_CHUNK_SIZE: usize = 50;

/// Track records keyed by track id, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreIndex {
    records: Vec<TrackRecord>,
    positions: HashMap<String, usize>,
}

impl GenreIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record. A record with an id already present replaces the old
    /// one but keeps its position.
    pub fn insert(&mut self, record: TrackRecord) {
        match self.positions.get(&record.id) {
            Some(&pos) => {
                debug!("Track {} seen twice, keeping the latest copy", record.id);
                self.records[pos] = record;
            }
            None => {
                self.positions.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&TrackRecord> {
        self.positions.get(id).map(|&pos| &self.records[pos])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackRecord> {
        self.records.iter()
    }

    /// All track ids, in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    /// Distinct non-empty artist ids, sorted.
    pub fn artist_ids(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !r.artist_id.is_empty())
            .map(|r| r.artist_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// True when every record has at least one genre.
    pub fn is_complete(&self) -> bool {
        self.records.iter().all(|r| !r.genres.is_empty())
    }

    // Fans artist genres out to every track by that artist
    fn apply_artist_genres(&mut self, lookups: impl IntoIterator<Item = ArtistGenres>) {
        let by_artist: HashMap<String, Vec<String>> =
            lookups.into_iter().map(|a| (a.id, a.genres)).collect();

        for record in &mut self.records {
            let genres = by_artist.get(&record.artist_id).cloned().unwrap_or_default();
            record.genres = if genres.is_empty() {
                vec![NO_GENRE.to_string()]
            } else {
                genres
            };
        }
    }
}

impl FromIterator<TrackRecord> for GenreIndex {
    fn from_iter<I: IntoIterator<Item = TrackRecord>>(iter: I) -> Self {
        let mut index = GenreIndex::new();
        for record in iter {
            index.insert(record);
        }
        index
    }
}

// Serialized as a flat list of records, the id lives inside each record
impl Serialize for GenreIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.records)
    }
}

impl<'de> Deserialize<'de> for GenreIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let records = Vec::<TrackRecord>::deserialize(deserializer)?;
        Ok(records.into_iter().collect())
    }
}

/// Builds a [`GenreIndex`] from a catalog: pages through saved tracks, then
/// looks up genres for each distinct artist in fixed-size batches.
pub struct GenreIndexBuilder<'a, C> {
    client: &'a C,
    page_size: u32,
    chunk_size: usize,
    concurrency: usize,
}

impl<'a, C: CatalogClient> GenreIndexBuilder<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            page_size: SAVED_TRACKS_PAGE_SIZE,
            chunk_size: ARTIST_LOOKUP_CHUNK_SIZE,
            concurrency: 1,
        }
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Number of artist lookups allowed in flight at once.
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn build(&self) -> Result<GenreIndex> {
        info!("Building genre index from saved tracks ...");
        let mut index = self.fetch_saved_tracks().await?;
        if index.is_empty() {
            return Err(Error::NoTracks);
        }

        let artist_ids = index.artist_ids();
        debug!(
            "Looking up genres for {} artists in chunks of {}",
            artist_ids.len(),
            self.chunk_size
        );

        let client = self.client;
        let lookups: Vec<Vec<ArtistGenres>> = stream::iter(artist_ids.chunks(self.chunk_size))
            .map(|chunk| async move { client.artist_genres(chunk).await })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        index.apply_artist_genres(lookups.into_iter().flatten());

        info!(
            "Genre index built: {} tracks, {} artists",
            index.len(),
            artist_ids.len()
        );
        Ok(index)
    }

    // Keeps requesting pages until one comes back empty
    async fn fetch_saved_tracks(&self) -> Result<GenreIndex> {
        let mut index = GenreIndex::new();
        let mut offset = 0;
        loop {
            let page = self.client.saved_tracks_page(self.page_size, offset).await?;
            if page.is_empty() {
                break;
            }
            offset += self.page_size;

            for track in page {
                match TrackRecord::from_catalog(track) {
                    Some(record) => index.insert(record),
                    None => debug!("Skipping saved track without an id"),
                }
            }
        }
        debug!("Fetched {} saved tracks", index.len());
        Ok(index)
    }
}
