use genrefy::clients::{
    CatalogClient, IndexStore, SpotifyClient,
    entities::TrackRecord,
    errors::Result,
};
use genrefy::genre_index::{GenreIndex, GenreIndexBuilder};
use genrefy::playlist::{AppendFailurePolicy, PlaylistMaterializer, PlaylistOutcome};
use log::{debug, info};
use std::cell::Cell;
use std::path::PathBuf;

// Configuration for the App struct
pub struct Config {
    pub spotify: SpotifyClient,
    pub store: IndexStore,
    pub lookup_concurrency: usize,
    pub append_policy: AppendFailurePolicy,
}

pub struct ConfigBuilder {
    spotify: Option<SpotifyClient>,
    cache_path: Option<PathBuf>,
    lookup_concurrency: Option<usize>,
    append_policy: Option<AppendFailurePolicy>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            spotify: None,
            cache_path: None,
            lookup_concurrency: None, // Artist lookups in flight at once. Default is 1.
            append_policy: None,
        }
    }

    pub fn cache_path(mut self, path: Option<PathBuf>) -> Self {
        self.cache_path = path;
        self
    }

    pub fn lookup_concurrency(mut self, concurrency: usize) -> Self {
        self.lookup_concurrency = Some(concurrency);
        self
    }

    pub fn append_policy(mut self, policy: AppendFailurePolicy) -> Self {
        self.append_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<Config> {
        let spotify = match self.spotify {
            Some(s) => s,
            None => SpotifyClient::try_default()?,
        };
        let store = match self.cache_path {
            Some(path) => IndexStore::new(path),
            None => IndexStore::try_default(),
        };
        Ok(Config {
            spotify,
            store,
            lookup_concurrency: self.lookup_concurrency.unwrap_or(1),
            append_policy: self.append_policy.unwrap_or_default(),
        })
    }
}

// Ties the Spotify client, the index cache and the playlist materializer together
pub struct App {
    config: Config,
    authorized: Cell<bool>,
}

impl App {
    pub fn new(config: Config) -> Self {
        App {
            config,
            authorized: Cell::new(false),
        }
    }

    pub async fn authorize(&self) -> Result<()> {
        if self.authorized.get() {
            return Ok(());
        }
        info!("Authorizing Spotify client ...");
        // CLI prompt may be shown if no cached token is available
        self.config.spotify.authorize_client().await?;
        self.authorized.set(true);
        Ok(())
    }

    pub async fn index(&self, force_refresh: bool) -> Result<GenreIndex> {
        if !force_refresh
            && let Some(index) = self.config.store.load().await
        {
            return Ok(index);
        }

        // Only talk to Spotify when the cache can't be used
        self.authorize().await?;
        let builder = GenreIndexBuilder::new(&self.config.spotify)
            .concurrency(self.config.lookup_concurrency);
        self.config
            .store
            .load_or_build(&builder, force_refresh)
            .await
    }

    pub async fn create_playlist(
        &self,
        ids: &[String],
        name: Option<&str>,
        description: &str,
    ) -> Result<PlaylistOutcome> {
        self.authorize().await?;
        let owner = self.config.spotify.current_user_id().await?;
        debug!("Creating playlist for user {owner}");
        PlaylistMaterializer::new(&self.config.spotify, owner)
            .policy(self.config.append_policy)
            .create_playlist(ids, name, description)
            .await
    }
}

pub fn tracks<'a>(index: &'a GenreIndex, ids: &'a [String]) -> impl Iterator<Item = &'a TrackRecord> {
    ids.iter().filter_map(|id| index.get(id))
}
