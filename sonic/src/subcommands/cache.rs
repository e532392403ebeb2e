use super::Session;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// List cached keys
    #[clap(alias = "ls")]
    List,
    /// Remove one cached key
    Remove { key: String },
    /// Remove everything cached for the selected server
    Clear,
}

impl CacheSubcommand {
    pub fn handle(self, session: &Session) -> anyhow::Result<()> {
        let services = session.services();
        let store = services.store();
        match self {
            CacheSubcommand::List => {
                let mut keys = store.keys()?;
                keys.sort();
                for key in keys {
                    println!("{}", key);
                }
            }
            CacheSubcommand::Remove { key } => {
                if !store.remove(&key)? {
                    log::warn!("{} is not cached", key);
                }
            }
            CacheSubcommand::Clear => store.clear()?,
        }
        Ok(())
    }
}
