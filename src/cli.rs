use clap::{Args, Parser, Subcommand, ValueEnum};
use genrefy::clients::errors::Result;
use genrefy::genre_index::GenreIndex;
use genrefy::playlist::AppendFailurePolicy;
use genrefy::query::{self, TrackField};
use log::info;
use std::path::PathBuf;

use crate::app::{self, App, ConfigBuilder};

#[derive(Parser)]
#[command(name = "genrefy")]
#[command(version, about = "Search Spotify liked songs by genre", long_about = None)]
struct Cli {
    /// Rebuild the genre index from Spotify instead of using the cache
    #[arg(short, long, global = true)]
    force_refresh: bool,

    /// Location of the cached genre index
    #[arg(long, global = true, value_name = "PATH")]
    cache: Option<PathBuf>,

    /// Artist genre lookups allowed in flight at once
    #[arg(long, global = true, default_value_t = 1, value_name = "N")]
    lookup_concurrency: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search genres for a term (case-sensitive); without a term every track is listed
    Search {
        term: Option<String>,
        #[command(flatten)]
        playlist: PlaylistArgs,
    },
    /// Search a single track field for a term (case-insensitive)
    Find {
        field: TrackField,
        term: String,
        #[command(flatten)]
        playlist: PlaylistArgs,
    },
    /// List the fields `find` can search
    Fields,
    /// List unique genres present in liked songs
    Genres,
    /// Rebuild the cached genre index
    Refresh,
}

#[derive(Args)]
struct PlaylistArgs {
    /// Create a private playlist from the results, named after the current time if no name is given
    #[arg(short = 'p', long = "playlist", value_name = "NAME", num_args = 0..=1, default_missing_value = "")]
    name: Option<String>,

    /// Description of the created playlist
    #[arg(short, long, default_value = "", requires = "name")]
    description: String,

    /// What to do when adding a batch of tracks fails
    #[arg(long, value_enum, default_value_t = OnAppendFailure::Stop)]
    on_append_failure: OnAppendFailure,
}

#[derive(Clone, Copy, ValueEnum)]
enum OnAppendFailure {
    Stop,
    Rollback,
    Continue,
}

impl From<OnAppendFailure> for AppendFailurePolicy {
    fn from(value: OnAppendFailure) -> Self {
        match value {
            OnAppendFailure::Stop => AppendFailurePolicy::Stop,
            OnAppendFailure::Rollback => AppendFailurePolicy::Rollback,
            OnAppendFailure::Continue => AppendFailurePolicy::Continue,
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Fields = cli.command {
        for field in TrackField::ALL {
            println!("{field}");
        }
        return Ok(());
    }

    let policy = match &cli.command {
        Commands::Search { playlist, .. } | Commands::Find { playlist, .. } => {
            playlist.on_append_failure.into()
        }
        _ => AppendFailurePolicy::default(),
    };

    info!("Building config ...");
    let config = ConfigBuilder::new()
        .cache_path(cli.cache)
        .lookup_concurrency(cli.lookup_concurrency)
        .append_policy(policy)
        .build()?;
    let app = App::new(config);

    let force_refresh = cli.force_refresh || matches!(cli.command, Commands::Refresh);
    let index = app.index(force_refresh).await?;

    match &cli.command {
        Commands::Search { term, playlist } => {
            let ids = query::search_by_genre(&index, term.as_deref());
            show_or_materialize(&app, &index, &ids, playlist).await?;
        }
        Commands::Find {
            field,
            term,
            playlist,
        } => {
            let ids = query::search_by_field(&index, *field, term);
            show_or_materialize(&app, &index, &ids, playlist).await?;
        }
        Commands::Genres => {
            for genre in query::list_genres(&index) {
                println!("{genre}");
            }
        }
        Commands::Refresh => {
            println!("Indexed {} liked songs", index.len());
        }
        Commands::Fields => {}
    }
    Ok(())
}

async fn show_or_materialize(
    app: &App,
    index: &GenreIndex,
    ids: &[String],
    playlist: &PlaylistArgs,
) -> Result<()> {
    let Some(name) = &playlist.name else {
        pretty_print(index, ids);
        println!("\nFound {} songs", ids.len());
        return Ok(());
    };

    let outcome = app
        .create_playlist(ids, Some(name.as_str()), &playlist.description)
        .await?;
    println!(
        "Added {} items to playlist '{}'",
        outcome.added, outcome.name
    );
    if !outcome.is_complete() {
        println!(
            "Skipped {} items in {} failed batch(es)",
            outcome.skipped,
            outcome.failed_chunks.len()
        );
    }
    Ok(())
}

fn pretty_print(index: &GenreIndex, ids: &[String]) {
    for track in app::tracks(index, ids) {
        println!("{}", track.name);
        println!("\tartist: {}", track.artist);
        println!("\talbum: {}", track.album);
        println!("\tgenres: {}", track.genres.join(", "));
    }
}
