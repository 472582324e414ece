//! Searches over a built [`GenreIndex`].
//!
//! Genre search is case-sensitive while field search ignores case. Keep it
//! that way: `Rock` and `rock` are distinct genres in the listing, and
//! searches for either must stay distinct too.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::clients::entities::TrackRecord;
use crate::genre_index::GenreIndex;

/// Scalar track fields that can be searched with [`search_by_field`].
///
/// `genres` is deliberately absent: it is a list, use [`search_by_genre`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackField {
    Name,
    Artist,
    ArtistId,
    Album,
    AlbumId,
}

impl TrackField {
    pub const ALL: [TrackField; 5] = [
        TrackField::Name,
        TrackField::Artist,
        TrackField::ArtistId,
        TrackField::Album,
        TrackField::AlbumId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackField::Name => "name",
            TrackField::Artist => "artist",
            TrackField::ArtistId => "artist_id",
            TrackField::Album => "album",
            TrackField::AlbumId => "album_id",
        }
    }

    pub fn value<'r>(&self, record: &'r TrackRecord) -> &'r str {
        match self {
            TrackField::Name => &record.name,
            TrackField::Artist => &record.artist,
            TrackField::ArtistId => &record.artist_id,
            TrackField::Album => &record.album,
            TrackField::AlbumId => &record.album_id,
        }
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown field name given to [`TrackField::from_str`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown field {0:?}, expected one of: name, artist, artist_id, album, album_id")]
pub struct ParseFieldError(pub String);

impl FromStr for TrackField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}

/// Ids of tracks with a genre containing `term`, case-sensitively.
///
/// `None` or an empty term means no filter and returns every id.
pub fn search_by_genre(index: &GenreIndex, term: Option<&str>) -> Vec<String> {
    let Some(term) = term.filter(|t| !t.is_empty()) else {
        return index.ids();
    };
    index
        .iter()
        .filter(|record| record.genres.iter().any(|genre| genre.contains(term)))
        .map(|record| record.id.clone())
        .collect()
}

/// Ids of tracks whose `field` contains `term`, ignoring case.
pub fn search_by_field(index: &GenreIndex, field: TrackField, term: &str) -> Vec<String> {
    let term = term.to_lowercase();
    index
        .iter()
        .filter(|record| field.value(record).to_lowercase().contains(&term))
        .map(|record| record.id.clone())
        .collect()
}

/// Every genre present in the index, deduplicated and in plain string order
/// (uppercase sorts before lowercase).
pub fn list_genres(index: &GenreIndex) -> Vec<String> {
    index
        .iter()
        .flat_map(|record| record.genres.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, artist: &str, genres: &[&str]) -> TrackRecord {
        TrackRecord {
            id: id.to_string(),
            name: format!("Song {id}"),
            artist: artist.to_string(),
            artist_id: format!("{}-id", artist.to_lowercase().replace(' ', "-")),
            album: "Discovery".to_string(),
            album_id: "2noRn2Aes5aoNVsU6iWThc".to_string(),
            genres: genres.iter().map(ToString::to_string).collect(),
        }
    }

    fn sample_index() -> GenreIndex {
        vec![
            record("1", "The Strokes", &["garage rock", "modern rock"]),
            record("2", "Daft Punk", &["filter house", "french house"]),
            record("3", "Muse", &["Rock"]),
            record("4", "Burial", &["none"]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn genre_search_is_case_sensitive_substring() {
        let index = sample_index();
        assert_eq!(search_by_genre(&index, Some("rock")), vec!["1"]);
        assert_eq!(search_by_genre(&index, Some("Rock")), vec!["3"]);
        assert_eq!(search_by_genre(&index, Some("house")), vec!["2"]);
        assert!(search_by_genre(&index, Some("jazz")).is_empty());
    }

    #[test]
    fn absent_or_empty_genre_term_returns_all() {
        let index = sample_index();
        assert_eq!(search_by_genre(&index, None), vec!["1", "2", "3", "4"]);
        assert_eq!(search_by_genre(&index, Some("")), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn sentinel_genre_is_searchable() {
        let index = sample_index();
        assert_eq!(search_by_genre(&index, Some("none")), vec!["4"]);
    }

    #[test]
    fn field_search_ignores_case() {
        let index = sample_index();
        assert_eq!(search_by_field(&index, TrackField::Artist, "Daft"), vec!["2"]);
        assert_eq!(search_by_field(&index, TrackField::Artist, "daft punk"), vec!["2"]);
        assert_eq!(search_by_field(&index, TrackField::ArtistId, "MUSE"), vec!["3"]);
        assert_eq!(search_by_field(&index, TrackField::Album, "disc").len(), 4);
        assert!(search_by_field(&index, TrackField::Name, "missing").is_empty());
    }

    #[test]
    fn list_genres_is_sorted_and_unique() {
        let index: GenreIndex = vec![
            record("1", "a", &["rock"]),
            record("2", "b", &["Rock", "pop"]),
            record("3", "c", &["pop"]),
        ]
        .into_iter()
        .collect();
        assert_eq!(list_genres(&index), vec!["Rock", "pop", "rock"]);
    }

    #[test]
    fn field_names_parse() {
        for field in TrackField::ALL {
            assert_eq!(field.as_str().parse::<TrackField>(), Ok(field));
        }
        assert_eq!(
            "genres".parse::<TrackField>(),
            Err(ParseFieldError("genres".to_string()))
        );
        assert!("Name".parse::<TrackField>().is_err());
    }
}
