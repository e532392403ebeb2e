mod cache;
mod library;
mod server;

pub use cache::CacheSubcommand;
pub use library::{IndexesSubcommand, SearchSubcommand};

use clap::Subcommand;
use sonic_service::module::{MusicServiceModule, MusicServices};
use sonic_service::MusicService;
use std::sync::Arc;

/// State shared by every subcommand of one invocation.
pub struct Session {
    module: MusicServiceModule,
    offline: bool,
    refresh: bool,
}

impl Session {
    pub fn new(module: MusicServiceModule, offline: bool, refresh: bool) -> Self {
        Self {
            module,
            offline,
            refresh,
        }
    }

    pub fn module(&self) -> &MusicServiceModule {
        &self.module
    }

    pub fn services(&self) -> MusicServices {
        self.module.compose()
    }

    /// The binding matching `--offline`.
    pub fn service(&self) -> Arc<dyn MusicService> {
        self.services().select(self.offline)
    }

    pub fn refresh(&self) -> bool {
        self.refresh
    }
}

#[derive(Subcommand, Debug)]
pub enum SonicSubcommand {
    /// Print the cache identity of the selected server
    Identity,
    /// Print the client configuration of the selected server
    Config,
    /// Check that the server is reachable
    Ping,
    /// List music folders
    Folders,
    /// List artists
    Indexes(IndexesSubcommand),
    /// List the content of a directory
    Dir { id: String },
    /// List the songs of an album
    Album { id: String },
    /// Search artists, albums and songs
    Search(SearchSubcommand),
    /// List playlists, or the songs of one playlist
    Playlists { id: Option<String> },
    /// List genres
    Genres,
    /// Print the url a song can be streamed from
    Stream {
        id: String,
        #[clap(long = "max-bit-rate")]
        max_bit_rate: Option<u32>,
    },
    /// Print the url of a cover art image
    Cover {
        id: String,
        /// Scale the image to this many pixels
        #[clap(long)]
        size: Option<u32>,
    },
    /// Inspect or drop the cache of the selected server
    #[clap(subcommand)]
    Cache(CacheSubcommand),
}

impl SonicSubcommand {
    pub async fn handle(self, session: &Session) -> anyhow::Result<()> {
        match self {
            SonicSubcommand::Identity => server::identity(session),
            SonicSubcommand::Config => server::config(session),
            SonicSubcommand::Ping => server::ping(session).await,
            SonicSubcommand::Folders => library::folders(session).await,
            SonicSubcommand::Indexes(me) => library::indexes(me, session).await,
            SonicSubcommand::Dir { id } => library::directory(&id, session).await,
            SonicSubcommand::Album { id } => library::album(&id, session).await,
            SonicSubcommand::Search(me) => library::search(me, session).await,
            SonicSubcommand::Playlists { id: None } => library::playlists(session).await,
            SonicSubcommand::Playlists { id: Some(id) } => library::playlist(&id, session).await,
            SonicSubcommand::Genres => library::genres(session).await,
            SonicSubcommand::Stream { id, max_bit_rate } => {
                library::stream(&id, max_bit_rate, session)
            }
            SonicSubcommand::Cover { id, size } => library::cover(&id, size, session),
            SonicSubcommand::Cache(me) => me.handle(session),
        }
    }
}
