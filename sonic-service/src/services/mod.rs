pub use cached::CachedMusicService;
pub use offline::OfflineMusicService;
pub use rest::RestMusicService;

mod cached;
mod offline;
mod rest;
