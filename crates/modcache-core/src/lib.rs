//! modcache-core: on-disk cache and edit tracking for mod catalog data.
//!
//! The cache stores game, mod, user and media records under one root
//! directory so a front end can render without the network. The edit module
//! turns local changes to a mod into the parameter sets a remote API expects.

pub mod cache;
pub mod config;
pub mod edit;
pub mod error;
pub mod models;
pub mod utils;

pub use cache::ModCache;
pub use config::Config;
pub use edit::{build_create_payload, build_update_payload, EditableMod, SyncPayload};
pub use error::{CacheError, CacheResult};
