use crate::clients::{
    entities::{ArtistGenres, CatalogTrack},
    errors::Result,
};

/// Remote music catalog the index builder and playlist materializer talk to.
///
/// `SpotifyClient` is the production implementation. Calls are made one at a
/// time by the playlist code, so implementations don't need interior locking
/// for ordering.
#[allow(async_fn_in_trait)]
pub trait CatalogClient {
    /// One page of the user's saved tracks. An empty page means the end of the library.
    async fn saved_tracks_page(&self, limit: u32, offset: u32) -> Result<Vec<CatalogTrack>>;

    /// Genres for a batch of artists. Unknown ids may be absent from the result.
    async fn artist_genres(&self, artist_ids: &[String]) -> Result<Vec<ArtistGenres>>;

    /// Id of the authenticated user, used as playlist owner.
    async fn current_user_id(&self) -> Result<String>;

    /// Creates an empty playlist and returns its id.
    async fn create_playlist(
        &self,
        owner: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<String>;

    /// Appends track URIs to the end of a playlist.
    async fn append_to_playlist(&self, playlist_id: &str, uris: &[String]) -> Result<()>;

    /// Removes a playlist from the user's library.
    async fn remove_playlist(&self, playlist_id: &str) -> Result<()>;
}
