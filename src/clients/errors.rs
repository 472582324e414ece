use rspotify::ClientError;
use rspotify::model::IdError;
use thiserror::Error;

/// Every failure genrefy can surface to the user.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Spotify error: {0}")]
    SpotifyError(#[from] ClientError),

    #[error("Invalid Spotify id: {0}")]
    InvalidId(#[from] IdError),

    #[error("Catalog API unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Index serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No tracks were retrieved from the library")]
    NoTracks,

    #[error("No tracks to add to the playlist")]
    NothingToAdd,

    // Earlier chunks stay in the playlist unless `rolled_back` is set
    #[error(
        "Could not add items to playlist {playlist_id} after {committed_chunks} committed chunk(s) ({added} items, rolled back: {rolled_back}): {source}"
    )]
    PlaylistAppend {
        playlist_id: String,
        committed_chunks: usize,
        added: usize,
        rolled_back: bool,
        source: Box<Error>,
    },
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
