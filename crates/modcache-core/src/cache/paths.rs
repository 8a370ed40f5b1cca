//! Deterministic on-disk layout for cached entities and assets.
//!
//! ```text
//! <root>/
//! ├── game_profile.data
//! ├── mods/
//! │   └── <modId>/
//! │       ├── profile.data
//! │       ├── stats.data
//! │       ├── team.data
//! │       ├── binaries/<modfileId>.data | <modfileId>.zip
//! │       ├── logo/<size>.png, versionInfo.data
//! │       └── mod_media/
//! │           ├── images_<size>/<fileStem>.png
//! │           └── youTube/<youTubeId>.png
//! └── users/
//!     ├── <userId>/profile.data
//!     └── <userId>_avatar/<size>.png, versionInfo.data
//! ```
//!
//! Every function here returns a path relative to the cache root and touches
//! no filesystem state.

use std::path::{Path, PathBuf};

use crate::models::{AvatarSize, GalleryImageSize, LogoSize};

pub const GAME_PROFILE_FILE: &str = "game_profile.data";
pub const MODS_DIR: &str = "mods";
pub const USERS_DIR: &str = "users";
pub const PROFILE_FILE: &str = "profile.data";
pub const STATISTICS_FILE: &str = "stats.data";
pub const TEAM_FILE: &str = "team.data";
pub const BINARIES_DIR: &str = "binaries";
pub const LOGO_DIR: &str = "logo";
pub const MEDIA_DIR: &str = "mod_media";
pub const YOUTUBE_DIR: &str = "youTube";
pub const VERSION_INFO_FILE: &str = "versionInfo.data";

/// Category of a cached record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Profile,
    Statistics,
    FileRecord,
    Binary,
    Team,
    User,
}

/// Identity of a cached record. Built only through the kind-specific
/// constructors so that kinds needing a secondary id always carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    kind: EntityKind,
    primary_id: i64,
    secondary_id: Option<i64>,
}

impl Identity {
    pub fn mod_profile(mod_id: i64) -> Self {
        Self::new(EntityKind::Profile, mod_id, None)
    }

    pub fn mod_statistics(mod_id: i64) -> Self {
        Self::new(EntityKind::Statistics, mod_id, None)
    }

    pub fn modfile(mod_id: i64, modfile_id: i64) -> Self {
        Self::new(EntityKind::FileRecord, mod_id, Some(modfile_id))
    }

    pub fn modfile_archive(mod_id: i64, modfile_id: i64) -> Self {
        Self::new(EntityKind::Binary, mod_id, Some(modfile_id))
    }

    pub fn mod_team(mod_id: i64) -> Self {
        Self::new(EntityKind::Team, mod_id, None)
    }

    pub fn user_profile(user_id: i64) -> Self {
        Self::new(EntityKind::User, user_id, None)
    }

    fn new(kind: EntityKind, primary_id: i64, secondary_id: Option<i64>) -> Self {
        Self {
            kind,
            primary_id,
            secondary_id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn primary_id(&self) -> i64 {
        self.primary_id
    }

    pub fn secondary_id(&self) -> Option<i64> {
        self.secondary_id
    }

    pub fn relative_path(&self) -> PathBuf {
        let modfile_id = self.secondary_id.unwrap_or_default();
        match self.kind {
            EntityKind::Profile => mod_dir(self.primary_id).join(PROFILE_FILE),
            EntityKind::Statistics => mod_dir(self.primary_id).join(STATISTICS_FILE),
            EntityKind::Team => mod_dir(self.primary_id).join(TEAM_FILE),
            EntityKind::FileRecord => {
                binaries_dir(self.primary_id).join(format!("{}.data", modfile_id))
            }
            EntityKind::Binary => binaries_dir(self.primary_id).join(format!("{}.zip", modfile_id)),
            EntityKind::User => users_dir()
                .join(self.primary_id.to_string())
                .join(PROFILE_FILE),
        }
    }
}

/// A directory holding size variants of one image plus its version ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    ModLogo(i64),
    UserAvatar(i64),
}

impl AssetSlot {
    pub fn directory(&self) -> PathBuf {
        match self {
            AssetSlot::ModLogo(mod_id) => mod_dir(*mod_id).join(LOGO_DIR),
            AssetSlot::UserAvatar(user_id) => users_dir().join(format!("{}_avatar", user_id)),
        }
    }

    pub fn variant_path(&self, stem: &str) -> PathBuf {
        self.directory().join(format!("{}.png", stem))
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.directory().join(VERSION_INFO_FILE)
    }
}

pub fn game_profile() -> PathBuf {
    PathBuf::from(GAME_PROFILE_FILE)
}

pub fn mods_dir() -> PathBuf {
    PathBuf::from(MODS_DIR)
}

pub fn users_dir() -> PathBuf {
    PathBuf::from(USERS_DIR)
}

pub fn mod_dir(mod_id: i64) -> PathBuf {
    mods_dir().join(mod_id.to_string())
}

pub fn binaries_dir(mod_id: i64) -> PathBuf {
    mod_dir(mod_id).join(BINARIES_DIR)
}

pub fn mod_media_dir(mod_id: i64) -> PathBuf {
    mod_dir(mod_id).join(MEDIA_DIR)
}

pub fn mod_logo(mod_id: i64, size: LogoSize) -> PathBuf {
    AssetSlot::ModLogo(mod_id).variant_path(size.as_str())
}

pub fn user_avatar(user_id: i64, size: AvatarSize) -> PathBuf {
    AssetSlot::UserAvatar(user_id).variant_path(size.as_str())
}

/// Gallery images are keyed by the stem of their server file name, so
/// `shot.jpg` and `shot.png` share a slot; every cached image is PNG.
pub fn gallery_image(mod_id: i64, image_file_name: &str, size: GalleryImageSize) -> PathBuf {
    let stem = Path::new(image_file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    mod_media_dir(mod_id)
        .join(format!("images_{}", size.as_str()))
        .join(format!("{}.png", stem))
}

pub fn youtube_thumbnail(mod_id: i64, youtube_id: &str) -> PathBuf {
    mod_media_dir(mod_id)
        .join(YOUTUBE_DIR)
        .join(format!("{}.png", youtube_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_paths() {
        assert_eq!(
            Identity::mod_profile(42).relative_path(),
            PathBuf::from("mods/42/profile.data")
        );
        assert_eq!(
            Identity::mod_statistics(42).relative_path(),
            PathBuf::from("mods/42/stats.data")
        );
        assert_eq!(
            Identity::mod_team(42).relative_path(),
            PathBuf::from("mods/42/team.data")
        );
        assert_eq!(
            Identity::modfile(42, 9).relative_path(),
            PathBuf::from("mods/42/binaries/9.data")
        );
        assert_eq!(
            Identity::modfile_archive(42, 9).relative_path(),
            PathBuf::from("mods/42/binaries/9.zip")
        );
        assert_eq!(
            Identity::user_profile(5).relative_path(),
            PathBuf::from("users/5/profile.data")
        );
    }

    #[test]
    fn test_asset_paths() {
        assert_eq!(
            mod_logo(3, LogoSize::Thumb320x180),
            PathBuf::from("mods/3/logo/thumb_320x180.png")
        );
        assert_eq!(
            AssetSlot::ModLogo(3).ledger_path(),
            PathBuf::from("mods/3/logo/versionInfo.data")
        );
        assert_eq!(
            user_avatar(5, AvatarSize::Original),
            PathBuf::from("users/5_avatar/original.png")
        );
        assert_eq!(
            gallery_image(3, "screenshot.jpg", GalleryImageSize::Original),
            PathBuf::from("mods/3/mod_media/images_original/screenshot.png")
        );
        assert_eq!(
            youtube_thumbnail(3, "dQw4w9WgXcQ"),
            PathBuf::from("mods/3/mod_media/youTube/dQw4w9WgXcQ.png")
        );
        assert_eq!(game_profile(), PathBuf::from("game_profile.data"));
    }

    #[test]
    fn test_distinct_identities_never_collide() {
        let ids = [
            Identity::mod_profile(1),
            Identity::mod_statistics(1),
            Identity::mod_team(1),
            Identity::modfile(1, 1),
            Identity::modfile_archive(1, 1),
            Identity::user_profile(1),
            Identity::mod_profile(11),
            Identity::modfile(1, 11),
        ];
        let paths: std::collections::HashSet<_> = ids.iter().map(|i| i.relative_path()).collect();
        assert_eq!(paths.len(), ids.len());
    }

    #[test]
    fn test_avatar_dir_does_not_shadow_user_dir() {
        assert_ne!(
            AssetSlot::UserAvatar(5).directory(),
            Identity::user_profile(5).relative_path().parent().unwrap().to_path_buf()
        );
    }
}
