//! Client side of the [`subsonic-api`].
//!
//! [`subsonic-api`]: http://www.subsonic.org/pages/api.jsp

mod client;
mod config;
mod error;
pub mod response;
mod version;

pub use client::SubsonicApiClient;
pub use config::ClientConfiguration;
pub use error::{ApiError, ErrorKind, SubsonicError};
pub use version::ApiVersion;

pub type Result<T> = std::result::Result<T, ApiError>;
