//! Data models for catalog entities.
//!
//! - `ModObject` / `ModProfile`: raw and derived views of a mod
//! - `ModStatistics`, `Modfile`, `ModTeamMember`: per-mod records
//! - `UserProfile`, `GameProfile`: accounts and the game itself
//! - Media: logo/avatar/gallery size variants and URL locators

pub mod game;
pub mod media;
pub mod mod_profile;
pub mod modfile;
pub mod statistics;
pub mod team;
pub mod user;

pub use game::{GameProfile, GameTagOption};
pub use media::{AvatarLocator, AvatarSize, GalleryImageSize, ImageLocator, LogoLocator, LogoSize, ModMedia};
pub use mod_profile::{ModObject, ModProfile, ModStatus, ModTag, ModVisibility, RatingSummary};
pub use modfile::{DownloadLocator, FileHash, Modfile};
pub use statistics::ModStatistics;
pub use team::{ModTeamMember, TeamLevel};
pub use user::UserProfile;
