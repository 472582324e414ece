/// Remote catalog abstraction
pub mod catalog;
/// Data entities for tracks and artists
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// On-disk cache of the genre index
pub mod local_storage;
/// Spotify API client
pub mod spotify;

#[cfg(test)]
pub(crate) mod mock;

pub use catalog::CatalogClient;
pub use local_storage::IndexStore;
pub use spotify::SpotifyClient;
