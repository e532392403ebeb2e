pub use common::*;

mod common;
mod entry;
pub mod module;
pub mod services;
