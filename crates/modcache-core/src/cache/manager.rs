use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::asset_store::{AssetStore, AssetVersionLedger};
use super::fs::EntryLayout;
use super::object_store::{ObjectStore, Records};
use super::paths::{self, AssetSlot, Identity};
use crate::config::Config;
use crate::error::{CacheError, CacheResult};
use crate::models::{
    AvatarSize, GalleryImageSize, GameProfile, LogoSize, ModProfile, ModStatistics,
    ModTeamMember, Modfile, UserProfile,
};

/// Typed access to every cached entity kind, rooted at one directory.
#[derive(Debug, Clone)]
pub struct ModCache {
    objects: ObjectStore,
    assets: AssetStore,
}

impl ModCache {
    /// Create a cache rooted at `cache_dir`, creating the directory if needed.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self {
            objects: ObjectStore::new(cache_dir.clone()),
            assets: AssetStore::new(cache_dir),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.cache_dir()?)
    }

    pub fn root(&self) -> &Path {
        self.objects.root()
    }

    /// When a record was last written, from the file's modification time.
    pub fn cached_at(&self, identity: Identity) -> Option<DateTime<Utc>> {
        let path = self.objects.resolve(identity.relative_path());
        let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
        Some(DateTime::<Utc>::from(modified))
    }

    fn save_all<T>(
        &self,
        kind: &str,
        items: &[T],
        mut save: impl FnMut(&T) -> CacheResult<()>,
    ) -> CacheResult<()> {
        let mut failed = 0;
        for item in items {
            if let Err(e) = save(item) {
                warn!(kind, error = %e, "Failed to cache item");
                failed += 1;
            }
        }
        if failed == 0 {
            Ok(())
        } else {
            Err(CacheError::PartialBatch {
                failed,
                total: items.len(),
            })
        }
    }

    fn save_record<T: Serialize + ?Sized>(&self, identity: Identity, record: &T) -> CacheResult<()> {
        debug!(?identity, "Caching record");
        self.objects.save(identity.relative_path(), record)
    }

    // ===== Game =====

    pub fn save_game_profile(&self, profile: &GameProfile) -> CacheResult<()> {
        self.objects.save(paths::game_profile(), profile)
    }

    pub fn load_game_profile(&self) -> Option<GameProfile> {
        self.objects.load(paths::game_profile())
    }

    pub fn delete_game_profile(&self) -> CacheResult<()> {
        self.objects.delete(paths::game_profile())
    }

    // ===== Mod Profiles =====

    pub fn save_mod_profile(&self, profile: &ModProfile) -> CacheResult<()> {
        self.save_record(Identity::mod_profile(profile.id()), profile)
    }

    pub fn save_mod_profiles(&self, profiles: &[ModProfile]) -> CacheResult<()> {
        self.save_all("mod_profile", profiles, |p| self.save_mod_profile(p))
    }

    pub fn load_mod_profile(&self, mod_id: i64) -> Option<ModProfile> {
        self.objects.load(Identity::mod_profile(mod_id).relative_path())
    }

    /// Cached mod profiles in directory-name order, starting after `offset`
    /// mod directories.
    pub fn iter_mod_profiles(&self, offset: usize) -> Records<ModProfile> {
        self.objects.enumerate(
            paths::mods_dir(),
            EntryLayout::Directory(paths::PROFILE_FILE),
            offset,
        )
    }

    /// Number of mod directories holding a profile file, whether or not
    /// each profile parses.
    pub fn count_mod_profiles(&self) -> usize {
        self.objects.count_entries(
            paths::mods_dir(),
            EntryLayout::Directory(paths::PROFILE_FILE),
        )
    }

    /// Remove everything cached for a mod.
    pub fn delete_mod(&self, mod_id: i64) -> CacheResult<()> {
        self.objects.delete_directory(paths::mod_dir(mod_id))
    }

    // ===== Statistics =====

    pub fn save_mod_statistics(&self, stats: &ModStatistics) -> CacheResult<()> {
        self.save_record(Identity::mod_statistics(stats.mod_id), stats)
    }

    pub fn save_mod_statistics_list(&self, stats: &[ModStatistics]) -> CacheResult<()> {
        self.save_all("mod_statistics", stats, |s| self.save_mod_statistics(s))
    }

    pub fn load_mod_statistics(&self, mod_id: i64) -> Option<ModStatistics> {
        self.objects.load(Identity::mod_statistics(mod_id).relative_path())
    }

    pub fn delete_mod_statistics(&self, mod_id: i64) -> CacheResult<()> {
        self.objects.delete(Identity::mod_statistics(mod_id).relative_path())
    }

    // ===== Modfiles =====

    pub fn save_modfile(&self, modfile: &Modfile) -> CacheResult<()> {
        self.save_record(Identity::modfile(modfile.mod_id, modfile.id), modfile)
    }

    pub fn save_modfiles(&self, modfiles: &[Modfile]) -> CacheResult<()> {
        self.save_all("modfile", modfiles, |m| self.save_modfile(m))
    }

    pub fn load_modfile(&self, mod_id: i64, modfile_id: i64) -> Option<Modfile> {
        self.objects
            .load(Identity::modfile(mod_id, modfile_id).relative_path())
    }

    /// Store archive bytes as given; an empty archive is stored as an empty file.
    pub fn save_modfile_archive(&self, mod_id: i64, modfile_id: i64, zip: &[u8]) -> CacheResult<()> {
        self.assets
            .save(Identity::modfile_archive(mod_id, modfile_id).relative_path(), zip)
    }

    pub fn load_modfile_archive(&self, mod_id: i64, modfile_id: i64) -> Option<Vec<u8>> {
        self.assets
            .load(Identity::modfile_archive(mod_id, modfile_id).relative_path())
    }

    /// Path of a cached archive, for callers that stream or extract it.
    pub fn modfile_archive_path(&self, mod_id: i64, modfile_id: i64) -> PathBuf {
        self.objects
            .resolve(Identity::modfile_archive(mod_id, modfile_id).relative_path())
    }

    /// Remove a modfile record and its archive. Both removals are attempted.
    pub fn delete_modfile_and_archive(&self, mod_id: i64, modfile_id: i64) -> CacheResult<()> {
        let record = self
            .objects
            .delete(Identity::modfile(mod_id, modfile_id).relative_path());
        let archive = self
            .assets
            .delete(Identity::modfile_archive(mod_id, modfile_id).relative_path());
        record.and(archive)
    }

    pub fn delete_all_modfiles(&self, mod_id: i64) -> CacheResult<()> {
        self.objects.delete_directory(paths::binaries_dir(mod_id))
    }

    // ===== Team =====

    pub fn save_mod_team(&self, mod_id: i64, team: &[ModTeamMember]) -> CacheResult<()> {
        self.save_record(Identity::mod_team(mod_id), team)
    }

    pub fn load_mod_team(&self, mod_id: i64) -> Option<Vec<ModTeamMember>> {
        self.objects.load(Identity::mod_team(mod_id).relative_path())
    }

    pub fn delete_mod_team(&self, mod_id: i64) -> CacheResult<()> {
        self.objects.delete(Identity::mod_team(mod_id).relative_path())
    }

    // ===== Logos =====

    pub fn save_mod_logo(
        &self,
        mod_id: i64,
        size: LogoSize,
        file_name: &str,
        png: &[u8],
    ) -> CacheResult<()> {
        self.assets
            .save_versioned(AssetSlot::ModLogo(mod_id), size, file_name, png)
    }

    /// Cached logo bytes; with `expected_file_name`, only if the cached copy
    /// came from that server file.
    pub fn load_mod_logo(
        &self,
        mod_id: i64,
        size: LogoSize,
        expected_file_name: Option<&str>,
    ) -> Option<Vec<u8>> {
        self.assets
            .load_versioned(AssetSlot::ModLogo(mod_id), size, expected_file_name)
    }

    pub fn load_mod_logo_versions(&self, mod_id: i64) -> Option<AssetVersionLedger<LogoSize>> {
        self.assets.load_ledger(AssetSlot::ModLogo(mod_id))
    }

    pub fn delete_mod_logos(&self, mod_id: i64) -> CacheResult<()> {
        self.assets.delete_slot(AssetSlot::ModLogo(mod_id))
    }

    // ===== Gallery & YouTube =====

    pub fn save_gallery_image(
        &self,
        mod_id: i64,
        image_file_name: &str,
        size: GalleryImageSize,
        png: &[u8],
    ) -> CacheResult<()> {
        debug_assert!(!image_file_name.is_empty());
        self.assets
            .save(paths::gallery_image(mod_id, image_file_name, size), png)
    }

    pub fn load_gallery_image(
        &self,
        mod_id: i64,
        image_file_name: &str,
        size: GalleryImageSize,
    ) -> Option<Vec<u8>> {
        self.assets
            .load(paths::gallery_image(mod_id, image_file_name, size))
    }

    pub fn delete_gallery_image(
        &self,
        mod_id: i64,
        image_file_name: &str,
        size: GalleryImageSize,
    ) -> CacheResult<()> {
        self.assets
            .delete(paths::gallery_image(mod_id, image_file_name, size))
    }

    pub fn save_youtube_thumbnail(&self, mod_id: i64, youtube_id: &str, png: &[u8]) -> CacheResult<()> {
        debug_assert!(!youtube_id.is_empty());
        self.assets
            .save(paths::youtube_thumbnail(mod_id, youtube_id), png)
    }

    pub fn load_youtube_thumbnail(&self, mod_id: i64, youtube_id: &str) -> Option<Vec<u8>> {
        self.assets.load(paths::youtube_thumbnail(mod_id, youtube_id))
    }

    pub fn delete_mod_media(&self, mod_id: i64) -> CacheResult<()> {
        self.assets.delete_directory(paths::mod_media_dir(mod_id))
    }

    // ===== Users =====

    pub fn save_user_profile(&self, profile: &UserProfile) -> CacheResult<()> {
        self.save_record(Identity::user_profile(profile.id), profile)
    }

    pub fn save_user_profiles(&self, profiles: &[UserProfile]) -> CacheResult<()> {
        self.save_all("user_profile", profiles, |p| self.save_user_profile(p))
    }

    pub fn load_user_profile(&self, user_id: i64) -> Option<UserProfile> {
        self.objects.load(Identity::user_profile(user_id).relative_path())
    }

    pub fn delete_user_profile(&self, user_id: i64) -> CacheResult<()> {
        self.objects
            .delete(Identity::user_profile(user_id).relative_path())
    }

    /// Cached user profiles, starting after `offset` of them. Avatar
    /// directories share the users root and are neither yielded nor counted
    /// toward the offset.
    pub fn iter_user_profiles(&self, offset: usize) -> Records<UserProfile> {
        self.objects.enumerate(
            paths::users_dir(),
            EntryLayout::Directory(paths::PROFILE_FILE),
            offset,
        )
    }

    // ===== Avatars =====

    pub fn save_user_avatar(
        &self,
        user_id: i64,
        size: AvatarSize,
        file_name: &str,
        png: &[u8],
    ) -> CacheResult<()> {
        self.assets
            .save_versioned(AssetSlot::UserAvatar(user_id), size, file_name, png)
    }

    pub fn load_user_avatar(
        &self,
        user_id: i64,
        size: AvatarSize,
        expected_file_name: Option<&str>,
    ) -> Option<Vec<u8>> {
        self.assets
            .load_versioned(AssetSlot::UserAvatar(user_id), size, expected_file_name)
    }

    pub fn delete_user_avatars(&self, user_id: i64) -> CacheResult<()> {
        self.assets.delete_slot(AssetSlot::UserAvatar(user_id))
    }
}

// ============================================================================
// Tests
// ============================================================================
