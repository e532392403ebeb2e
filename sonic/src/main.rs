mod config;
mod subcommands;

use clap::Parser;
use sonic_service::module::MusicServiceModule;
use std::sync::Arc;
use subcommands::{Session, SonicSubcommand};

#[derive(Parser, Debug)]
#[clap(name = "sonic", version)]
#[clap(about = "Browse a Subsonic-compatible music server, online or from cache")]
struct SonicArgs {
    /// Answer from the local cache only
    #[clap(long, global = true)]
    offline: bool,

    /// Ignore cached entries and fetch everything again
    #[clap(long, global = true)]
    refresh: bool,

    /// Log requests and cache accesses
    #[clap(long, global = true)]
    debug: bool,

    #[clap(subcommand)]
    subcommand: SonicSubcommand,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = SonicArgs::parse();

    let settings = config::load_settings()?;
    let module = MusicServiceModule::new(
        Arc::new(settings),
        config::cache_root()?,
        cfg!(debug_assertions) || args.debug,
    );
    let session = Session::new(module, args.offline, args.refresh);
    args.subcommand.handle(&session).await
}
