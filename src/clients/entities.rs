use serde::{Deserialize, Serialize};

/// Artist as it appears on a saved track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: Option<String>,
    pub name: String,
}

/// Album as it appears on a saved track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: Option<String>,
    pub name: String,
}

/// One item of a saved-tracks page, before genre enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTrack {
    // local files carry no id
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<Artist>,
    pub album: Album,
}

/// Genres the catalog knows for one artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistGenres {
    pub id: String,
    pub genres: Vec<String>,
}

/// A saved track enriched with its primary artist's genres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub artist_id: String,
    pub album: String,
    pub album_id: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl TrackRecord {
    /// Builds a record from a catalog track, keeping only the first artist.
    ///
    /// Returns `None` for tracks without an id. Genres are left empty until the
    /// artist lookup fills them in.
    pub fn from_catalog(track: CatalogTrack) -> Option<Self> {
        let id = track.id?;
        let (artist, artist_id) = track
            .artists
            .into_iter()
            .next()
            .map(|a| (a.name, a.id.unwrap_or_default()))
            .unwrap_or_default();

        Some(TrackRecord {
            id,
            name: track.name,
            artist,
            artist_id,
            album: track.album.name,
            album_id: track.album.id.unwrap_or_default(),
            genres: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(id: &str, name: &str) -> Artist {
        Artist {
            id: Some(id.to_string()),
            name: name.to_string(),
        }
    }

    #[test]
    fn record_takes_first_artist() {
        let track = CatalogTrack {
            id: Some("t1".to_string()),
            name: "Get Lucky".to_string(),
            artists: vec![artist("a1", "Daft Punk"), artist("a2", "Pharrell Williams")],
            album: Album {
                id: Some("al1".to_string()),
                name: "Random Access Memories".to_string(),
            },
        };

        let record = TrackRecord::from_catalog(track).unwrap();
        assert_eq!(record.id, "t1");
        assert_eq!(record.artist, "Daft Punk");
        assert_eq!(record.artist_id, "a1");
        assert_eq!(record.album, "Random Access Memories");
        assert_eq!(record.album_id, "al1");
        assert!(record.genres.is_empty());
    }

    #[test]
    fn track_without_id_is_skipped() {
        let track = CatalogTrack {
            id: None,
            name: "local file".to_string(),
            artists: vec![],
            album: Album {
                id: None,
                name: String::new(),
            },
        };
        assert!(TrackRecord::from_catalog(track).is_none());
    }

    #[test]
    fn track_without_artists_has_empty_artist_fields() {
        let track = CatalogTrack {
            id: Some("t2".to_string()),
            name: "Untitled".to_string(),
            artists: vec![],
            album: Album {
                id: None,
                name: "Demos".to_string(),
            },
        };
        let record = TrackRecord::from_catalog(track).unwrap();
        assert_eq!(record.artist, "");
        assert_eq!(record.artist_id, "");
        assert_eq!(record.album_id, "");
    }
}
