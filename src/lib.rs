//! Genrefy - search Spotify liked tracks by genre
//!
//! This library builds a local index of your Spotify liked tracks enriched with
//! artist genres, searches it, and turns search results into new playlists.

/// Client modules for interacting with the remote catalog and local storage
pub mod clients;
/// Genre index and its builder
pub mod genre_index;
/// Playlist creation from search results
pub mod playlist;
/// Genre and field searches over the index
pub mod query;
