//! In-memory catalog used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::clients::{
    catalog::CatalogClient,
    entities::{Album, Artist, ArtistGenres, CatalogTrack},
    errors::{Error, Result},
};

/// Everything the code under test asked the catalog for.
#[derive(Debug, Clone, Default)]
pub struct Calls {
    pub page_offsets: Vec<u32>,
    pub artist_lookups: Vec<Vec<String>>,
    pub created: Vec<CreatedPlaylist>,
    pub appended: Vec<(String, Vec<String>)>,
    pub append_attempts: usize,
    pub removed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPlaylist {
    pub owner: String,
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Default)]
pub struct MockCatalog {
    pub pages: Vec<Vec<CatalogTrack>>,
    pub genres: HashMap<String, Vec<String>>,
    pub fail_artist_lookup: bool,
    pub fail_create: bool,
    // zero-based append attempts that fail
    pub failing_appends: Vec<usize>,
    pub calls: Mutex<Calls>,
}

pub fn catalog_track(id: &str, artist_id: &str) -> CatalogTrack {
    CatalogTrack {
        id: Some(id.to_string()),
        name: format!("Track {id}"),
        artists: vec![Artist {
            id: (!artist_id.is_empty()).then(|| artist_id.to_string()),
            name: format!("Artist {artist_id}"),
        }],
        album: Album {
            id: Some(format!("album-{id}")),
            name: format!("Album {id}"),
        },
    }
}

impl MockCatalog {
    /// `tracks` saved tracks spread round-robin over `artists` artists, in
    /// pages of 50. Artist `artist-N` has the single genre `genre-artist-N`.
    pub fn library(tracks: usize, artists: usize) -> Self {
        let all: Vec<CatalogTrack> = (0..tracks)
            .map(|i| catalog_track(&format!("track-{i}"), &format!("artist-{}", i % artists)))
            .collect();
        let mut catalog = MockCatalog {
            pages: all.chunks(50).map(<[CatalogTrack]>::to_vec).collect(),
            ..Default::default()
        };
        for n in 0..artists {
            let id = format!("artist-{n}");
            let genre = format!("genre-{id}");
            catalog.genres.insert(id, vec![genre]);
        }
        catalog
    }

    pub fn set_genres(&mut self, artist_id: &str, genres: &[&str]) {
        self.genres.insert(
            artist_id.to_string(),
            genres.iter().map(ToString::to_string).collect(),
        );
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }
}

impl CatalogClient for MockCatalog {
    async fn saved_tracks_page(&self, limit: u32, offset: u32) -> Result<Vec<CatalogTrack>> {
        self.calls.lock().unwrap().page_offsets.push(offset);
        let page = (offset / limit) as usize;
        Ok(self.pages.get(page).cloned().unwrap_or_default())
    }

    async fn artist_genres(&self, artist_ids: &[String]) -> Result<Vec<ArtistGenres>> {
        self.calls
            .lock()
            .unwrap()
            .artist_lookups
            .push(artist_ids.to_vec());
        if self.fail_artist_lookup {
            return Err(Error::UnexpectedResponse("status 500".into()));
        }
        Ok(artist_ids
            .iter()
            .filter_map(|id| {
                self.genres.get(id).map(|genres| ArtistGenres {
                    id: id.clone(),
                    genres: genres.clone(),
                })
            })
            .collect())
    }

    async fn current_user_id(&self) -> Result<String> {
        Ok("listener".to_string())
    }

    async fn create_playlist(
        &self,
        owner: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<String> {
        if self.fail_create {
            return Err(Error::UnexpectedResponse("status 403".into()));
        }
        let mut calls = self.calls.lock().unwrap();
        calls.created.push(CreatedPlaylist {
            owner: owner.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            public,
        });
        Ok(format!("playlist-{}", calls.created.len()))
    }

    async fn append_to_playlist(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let mut calls = self.calls.lock().unwrap();
        let attempt = calls.append_attempts;
        calls.append_attempts += 1;
        if self.failing_appends.contains(&attempt) {
            return Err(Error::UnexpectedResponse("status 502".into()));
        }
        calls.appended.push((playlist_id.to_string(), uris.to_vec()));
        Ok(())
    }

    async fn remove_playlist(&self, playlist_id: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .removed
            .push(playlist_id.to_string());
        Ok(())
    }
}
