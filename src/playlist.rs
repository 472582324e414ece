//! Turns a list of track ids into a new private playlist.

use log::{debug, info, warn};

use crate::clients::{
    catalog::CatalogClient,
    errors::{Error, Result},
};

/// Playlist item-append endpoint hard limit.
pub const PLAYLIST_APPEND_CHUNK_SIZE: usize = 100;

/// Format used for playlists created without a name, e.g. `19-Oct-2026_142501`.
pub const DEFAULT_NAME_FORMAT: &str = "%d-%b-%Y_%H%M%S";

const TRACK_URI_PREFIX: &str = "spotify:track:";

/// What to do when appending a chunk of tracks fails.
///
/// Chunks already appended are never undone, except by `Rollback` removing
/// the whole playlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppendFailurePolicy {
    /// Stop at the first failed chunk and report what was committed.
    #[default]
    Stop,
    /// Stop at the first failed chunk and remove the new playlist.
    Rollback,
    /// Try every chunk, report failed ones in the outcome.
    Continue,
}

/// Result of a successful (or best-effort) playlist creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistOutcome {
    pub playlist_id: String,
    pub name: String,
    pub added: usize,
    /// Items from chunks that failed under [`AppendFailurePolicy::Continue`].
    pub skipped: usize,
    /// Zero-based indexes of failed chunks.
    pub failed_chunks: Vec<usize>,
}

impl PlaylistOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_chunks.is_empty()
    }
}

pub fn track_uri(id: &str) -> String {
    format!("{TRACK_URI_PREFIX}{id}")
}

pub fn default_playlist_name() -> String {
    chrono::Local::now().format(DEFAULT_NAME_FORMAT).to_string()
}

pub struct PlaylistMaterializer<'a, C> {
    client: &'a C,
    owner: String,
    chunk_size: usize,
    policy: AppendFailurePolicy,
}

impl<'a, C: CatalogClient> PlaylistMaterializer<'a, C> {
    pub fn new(client: &'a C, owner: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            chunk_size: PLAYLIST_APPEND_CHUNK_SIZE,
            policy: AppendFailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn policy(mut self, policy: AppendFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Creates a private playlist named `name` (or a timestamp) holding `ids`.
    ///
    /// Nothing is appended if creation fails. Chunks are appended one after
    /// another, so the playlist keeps the order of `ids`.
    pub async fn create_playlist(
        &self,
        ids: &[String],
        name: Option<&str>,
        description: &str,
    ) -> Result<PlaylistOutcome> {
        if ids.is_empty() {
            return Err(Error::NothingToAdd);
        }

        let name = name
            .filter(|n| !n.is_empty())
            .map_or_else(default_playlist_name, ToString::to_string);

        let playlist_id = self
            .client
            .create_playlist(&self.owner, &name, description, false)
            .await?;
        info!("Created playlist '{name}' ({playlist_id})");

        let uris: Vec<String> = ids.iter().map(|id| track_uri(id)).collect();
        let mut outcome = PlaylistOutcome {
            playlist_id,
            name,
            added: 0,
            skipped: 0,
            failed_chunks: Vec::new(),
        };
        let mut committed_chunks = 0;

        for (n, chunk) in uris.chunks(self.chunk_size).enumerate() {
            match self
                .client
                .append_to_playlist(&outcome.playlist_id, chunk)
                .await
            {
                Ok(()) => {
                    debug!("Appended chunk {n} ({} items)", chunk.len());
                    committed_chunks += 1;
                    outcome.added += chunk.len();
                }
                Err(e) if self.policy == AppendFailurePolicy::Continue => {
                    warn!("Could not add chunk {n} to playlist: {e}");
                    outcome.skipped += chunk.len();
                    outcome.failed_chunks.push(n);
                }
                Err(e) => {
                    let rolled_back = self.policy == AppendFailurePolicy::Rollback
                        && self.roll_back(&outcome.playlist_id).await;
                    return Err(Error::PlaylistAppend {
                        playlist_id: outcome.playlist_id,
                        committed_chunks,
                        added: outcome.added,
                        rolled_back,
                        source: Box::new(e),
                    });
                }
            }
        }

        Ok(outcome)
    }

    async fn roll_back(&self, playlist_id: &str) -> bool {
        match self.client.remove_playlist(playlist_id).await {
            Ok(()) => {
                info!("Removed partially filled playlist {playlist_id}");
                true
            }
            Err(e) => {
                warn!("Could not remove playlist {playlist_id}: {e}");
                false
            }
        }
    }
}
