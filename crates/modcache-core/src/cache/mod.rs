//! Local caching module for offline data access.
//!
//! `ModCache` stores catalog entities under a single root directory with a
//! fixed layout (see [`paths`]). Records are pretty-printed JSON; images and
//! archives are raw bytes. Image slots keep a `versionInfo.data` ledger so a
//! caller can tell whether the cached bytes still match the server's file.
//!
//! Cached data types include:
//! - Game profile
//! - Mod profiles, statistics, teams, modfiles and their archives
//! - Mod logos, gallery images, YouTube thumbnails
//! - User profiles and avatars

pub mod asset_store;
mod fs;
pub mod manager;
pub mod object_store;
pub mod paths;

pub use asset_store::{AssetStore, AssetVariant, AssetVersionLedger};
pub use fs::EntryLayout;
pub use manager::ModCache;
pub use object_store::{ObjectStore, Records};
pub use paths::{AssetSlot, EntityKind, Identity};
