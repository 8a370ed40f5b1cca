use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::fs;
use super::object_store::ObjectStore;
use super::paths::AssetSlot;
use crate::error::{CacheError, CacheResult};
use crate::models::{AvatarSize, LogoSize};

/// A size variant that can live in an [`AssetSlot`].
pub trait AssetVariant: Copy + Ord + Serialize + DeserializeOwned {
    /// File stem of the variant inside its slot directory.
    fn stem(&self) -> &'static str;
}

impl AssetVariant for LogoSize {
    fn stem(&self) -> &'static str {
        self.as_str()
    }
}

impl AssetVariant for AvatarSize {
    fn stem(&self) -> &'static str {
        self.as_str()
    }
}

/// Source file name currently cached for each variant of a slot.
pub type AssetVersionLedger<V> = BTreeMap<V, String>;

/// Raw byte storage for images and archives, plus per-slot version ledgers.
#[derive(Debug, Clone)]
pub struct AssetStore {
    records: ObjectStore,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            records: ObjectStore::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        self.records.root()
    }

    pub fn save(&self, relative: impl AsRef<Path>, bytes: &[u8]) -> CacheResult<()> {
        fs::write_atomic(&self.records.resolve(relative), bytes)
    }

    pub fn try_load(&self, relative: impl AsRef<Path>) -> CacheResult<Vec<u8>> {
        fs::read_bytes(&self.records.resolve(relative))
    }

    pub fn load(&self, relative: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.try_load(relative) {
            Ok(bytes) => Some(bytes),
            Err(CacheError::NotFound(path)) => {
                debug!(path = %path.display(), "Asset cache miss");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to load cached asset");
                None
            }
        }
    }

    pub fn delete(&self, relative: impl AsRef<Path>) -> CacheResult<()> {
        fs::remove_file(&self.records.resolve(relative))
    }

    pub fn delete_directory(&self, relative: impl AsRef<Path>) -> CacheResult<()> {
        fs::remove_dir(&self.records.resolve(relative))
    }

    pub fn load_ledger<V: AssetVariant>(&self, slot: AssetSlot) -> Option<AssetVersionLedger<V>> {
        self.records.load(slot.ledger_path())
    }

    /// Store the bytes of `variant`, then record `source_file_name` as the
    /// version now cached. The ledger only moves once the new bytes are in
    /// place, so a failed write leaves the previous version's entry intact.
    pub fn save_versioned<V: AssetVariant>(
        &self,
        slot: AssetSlot,
        variant: V,
        source_file_name: &str,
        bytes: &[u8],
    ) -> CacheResult<()> {
        debug_assert!(!source_file_name.is_empty());

        self.save(slot.variant_path(variant.stem()), bytes)?;

        let mut ledger: AssetVersionLedger<V> = self.load_ledger(slot).unwrap_or_default();
        ledger.insert(variant, source_file_name.to_string());
        self.records.save(slot.ledger_path(), &ledger)
    }

    /// Load `variant` only if the ledger says it was cached from
    /// `expected_file_name` (compared case-insensitively).
    pub fn try_load_versioned<V: AssetVariant>(
        &self,
        slot: AssetSlot,
        variant: V,
        expected_file_name: &str,
    ) -> CacheResult<Vec<u8>> {
        let path = slot.variant_path(variant.stem());
        let cached = self
            .load_ledger::<V>(slot)
            .and_then(|mut ledger| ledger.remove(&variant));

        match cached {
            Some(ref name) if name.eq_ignore_ascii_case(expected_file_name) => self.try_load(path),
            _ => Err(CacheError::StaleVersion {
                path,
                expected: expected_file_name.to_string(),
                cached,
            }),
        }
    }

    /// Versioned load when `expected_file_name` is given; otherwise whatever
    /// bytes are stored for the variant.
    pub fn load_versioned<V: AssetVariant>(
        &self,
        slot: AssetSlot,
        variant: V,
        expected_file_name: Option<&str>,
    ) -> Option<Vec<u8>> {
        let Some(expected) = expected_file_name else {
            return self.load(slot.variant_path(variant.stem()));
        };

        match self.try_load_versioned(slot, variant, expected) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.is_miss() => {
                debug!(error = %e, "Versioned asset cache miss");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to load versioned asset");
                None
            }
        }
    }

    /// Remove every variant of a slot together with its ledger.
    pub fn delete_slot(&self, slot: AssetSlot) -> CacheResult<()> {
        self.delete_directory(slot.directory())
    }
}
