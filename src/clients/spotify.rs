use std::path::PathBuf;

use log::debug;

use crate::clients::{
    catalog::CatalogClient,
    entities::{Album, Artist, ArtistGenres, CatalogTrack},
    errors::{Error, Result},
};
use rspotify::{
    AuthCodeSpotify, Config, Credentials, OAuth,
    model::{ArtistId, PlayableId, PlaylistId, SavedTrack, TrackId, UserId},
    prelude::*,
    scopes,
};

impl From<SavedTrack> for CatalogTrack {
    fn from(f: SavedTrack) -> CatalogTrack {
        CatalogTrack {
            id: f.track.id.map(|id| id.id().to_string()),
            name: f.track.name,
            artists: f
                .track
                .artists
                .into_iter()
                .map(|a| Artist {
                    id: a.id.map(|id| id.id().to_string()),
                    name: a.name,
                })
                .collect(),
            album: Album {
                id: f.track.album.id.map(|id| id.id().to_string()),
                name: f.track.album.name,
            },
        }
    }
}

pub struct SpotifyClient {
    pub spotify: AuthCodeSpotify,
}

impl SpotifyClient {
    pub fn new(spotify: AuthCodeSpotify) -> Self {
        SpotifyClient { spotify }
    }

    // Authorize the Spotify client via CLI prompt and OAuth flow
    // A cached token is reused when still valid.
    pub async fn authorize_client(&self) -> Result<()> {
        debug!("Starting Spotify authorization ...");
        let url = self.spotify.get_authorize_url(false)?;
        // This function requires the `cli` feature enabled.
        self.spotify.prompt_for_token(&url).await?;
        let user = self.spotify.me().await?;
        debug!("Authenticated as user: {:?}", user.display_name);
        Ok(())
    }

    // Create a SpotifyClient from explicit credentials
    pub fn with_credentials(creds: Credentials, oauth: OAuth, token_cache: PathBuf) -> Self {
        let spotify = AuthCodeSpotify::with_config(
            creds,
            oauth,
            Config {
                token_cached: true,
                cache_path: token_cache,
                ..Default::default()
            },
        );
        Self { spotify }
    }

    // Create a SpotifyClient from environment variables or raise a configuration error
    pub fn try_default() -> Result<Self> {
        let creds = Credentials::from_env()
        .ok_or_else(|| Error::ConfigurationError("Missing Spotify credentials in environment variables (RSPOTIFY_CLIENT_ID, RSPOTIFY_CLIENT_SECRET).".into()))?;
        let oauth = OAuth::from_env(scopes!(
            "user-library-read",
            "playlist-modify-private",
            "playlist-modify-public"
        ))
        .ok_or_else(|| Error::ConfigurationError("Missing Spotify OAuth configuration in environment variables (RSPOTIFY_REDIRECT_URI).".into()))?;

        let cache_path = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
            .join(".genrefy_token_cache");

        Ok(Self::with_credentials(creds, oauth, cache_path))
    }
}

impl CatalogClient for SpotifyClient {
    async fn saved_tracks_page(&self, limit: u32, offset: u32) -> Result<Vec<CatalogTrack>> {
        let page = self
            .spotify
            .current_user_saved_tracks_manual(None, Some(limit), Some(offset))
            .await?;
        debug!(
            "Fetched {} saved tracks at offset {offset} (total {})",
            page.items.len(),
            page.total
        );
        Ok(page.items.into_iter().map(CatalogTrack::from).collect())
    }

    async fn artist_genres(&self, artist_ids: &[String]) -> Result<Vec<ArtistGenres>> {
        let ids = artist_ids
            .iter()
            .map(|id| ArtistId::from_id(id.as_str()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let artists = self.spotify.artists(ids).await?;
        Ok(artists
            .into_iter()
            .map(|a| ArtistGenres {
                id: a.id.id().to_string(),
                genres: a.genres,
            })
            .collect())
    }

    async fn current_user_id(&self) -> Result<String> {
        let user = self.spotify.me().await?;
        Ok(user.id.id().to_string())
    }

    async fn create_playlist(
        &self,
        owner: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<String> {
        let user_id = UserId::from_id(owner)?;
        let playlist = self
            .spotify
            .user_playlist_create(user_id, name, Some(public), Some(false), Some(description))
            .await?;
        debug!("Created playlist {name:?} with id {}", playlist.id.id());
        Ok(playlist.id.id().to_string())
    }

    async fn append_to_playlist(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let playlist_id = PlaylistId::from_id(playlist_id)?;
        let items = uris
            .iter()
            .map(|uri| TrackId::from_uri(uri.as_str()).map(PlayableId::Track))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.spotify
            .playlist_add_items(playlist_id, items, None)
            .await?;
        Ok(())
    }

    async fn remove_playlist(&self, playlist_id: &str) -> Result<()> {
        let playlist_id = PlaylistId::from_id(playlist_id)?;
        self.spotify.playlist_unfollow(playlist_id).await?;
        Ok(())
    }
}
