//! Edit sessions over a mod profile.
//!
//! An [`EditableMod`] holds the profile as it was when the session started
//! and a working copy the caller mutates. Dirtiness and diffs are always
//! recomputed from the two; nothing is cached between calls.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{ImageLocator, ModMedia, ModObject, ModProfile, ModStatus, ModTag, ModVisibility};

/// Scalar fields tracked for edits, in payload order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedField {
    Status,
    Visible,
    Name,
    NameId,
    Summary,
    Description,
    Homepage,
    Stock,
    MetadataBlob,
}

impl TrackedField {
    pub const ALL: [TrackedField; 9] = [
        TrackedField::Status,
        TrackedField::Visible,
        TrackedField::Name,
        TrackedField::NameId,
        TrackedField::Summary,
        TrackedField::Description,
        TrackedField::Homepage,
        TrackedField::Stock,
        TrackedField::MetadataBlob,
    ];

    /// Parameter name the server expects.
    pub fn key(&self) -> &'static str {
        match self {
            TrackedField::Status => "status",
            TrackedField::Visible => "visible",
            TrackedField::Name => "name",
            TrackedField::NameId => "name_id",
            TrackedField::Summary => "summary",
            TrackedField::Description => "description",
            TrackedField::Homepage => "homepage",
            TrackedField::Stock => "stock",
            TrackedField::MetadataBlob => "metadata_blob",
        }
    }

    /// Canonical string form of this field's value in `obj`.
    pub fn render(&self, obj: &ModObject) -> String {
        match self {
            TrackedField::Status => obj.status.to_string(),
            TrackedField::Visible => obj.visible.to_string(),
            TrackedField::Name => obj.name.clone(),
            TrackedField::NameId => obj.name_id.clone(),
            TrackedField::Summary => obj.summary.clone(),
            TrackedField::Description => obj.description.clone().unwrap_or_default(),
            TrackedField::Homepage => obj.homepage.clone().unwrap_or_default(),
            TrackedField::Stock => obj.stock.to_string(),
            TrackedField::MetadataBlob => obj.metadata_blob.clone().unwrap_or_default(),
        }
    }

    fn differs(&self, a: &ModObject, b: &ModObject) -> bool {
        match self {
            TrackedField::Status => a.status != b.status,
            TrackedField::Visible => a.visible != b.visible,
            TrackedField::Name => a.name != b.name,
            TrackedField::NameId => a.name_id != b.name_id,
            TrackedField::Summary => a.summary != b.summary,
            TrackedField::Description => a.description != b.description,
            TrackedField::Homepage => a.homepage != b.homepage,
            TrackedField::Stock => a.stock != b.stock,
            TrackedField::MetadataBlob => a.metadata_blob != b.metadata_blob,
        }
    }
}

/// One field of a sparse update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct FieldChange {
    pub field: String,
    pub value: String,
}

impl FieldChange {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Additions and removals for a multi-valued relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct CollectionDelta {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl CollectionDelta {
    /// Set difference in both directions, keeping first-seen order and
    /// dropping duplicates.
    pub fn between<'a>(
        original: impl IntoIterator<Item = &'a str>,
        working: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let original: Vec<&str> = original.into_iter().collect();
        let working: Vec<&str> = working.into_iter().collect();
        Self {
            added: subtract(&working, &original),
            removed: subtract(&original, &working),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

fn subtract(from: &[&str], remove: &[&str]) -> Vec<String> {
    let remove: HashSet<&str> = remove.iter().copied().collect();
    let mut seen = HashSet::new();
    from.iter()
        .filter(|item| !remove.contains(*item) && seen.insert(**item))
        .map(|item| item.to_string())
        .collect()
}

/// Per-category media changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct MediaDelta {
    pub youtube: CollectionDelta,
    pub sketchfab: CollectionDelta,
    pub images: CollectionDelta,
}

impl MediaDelta {
    pub fn is_empty(&self) -> bool {
        self.youtube.is_empty() && self.sketchfab.is_empty() && self.images.is_empty()
    }
}

/// Media to add to or remove from a mod, shaped for the media endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct MediaChanges {
    pub mod_id: i64,
    pub youtube: Vec<String>,
    pub sketchfab: Vec<String>,
    pub images: Vec<String>,
}

impl MediaChanges {
    pub fn is_empty(&self) -> bool {
        self.youtube.is_empty() && self.sketchfab.is_empty() && self.images.is_empty()
    }
}

/// A working copy of a mod paired with its original snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableMod {
    original: ModObject,
    working: ModObject,
    logo_path: Option<PathBuf>,
}

impl EditableMod {
    pub fn from_profile(profile: &ModProfile) -> Self {
        Self::from_object(profile.raw().clone())
    }

    pub fn from_object(object: ModObject) -> Self {
        Self {
            original: object.clone(),
            working: object,
            logo_path: None,
        }
    }

    /// Edit session for a mod that does not exist on the server yet.
    pub fn blank() -> Self {
        Self::from_object(ModObject::default())
    }

    pub fn id(&self) -> i64 {
        self.working.id
    }

    pub fn original(&self) -> &ModObject {
        &self.original
    }

    pub fn working(&self) -> &ModObject {
        &self.working
    }

    /// Mutable access for edits the setters don't cover.
    pub fn working_mut(&mut self) -> &mut ModObject {
        &mut self.working
    }

    /// Discard every change made to the working copy.
    pub fn revert(&mut self) {
        self.working = self.original.clone();
    }

    // --- Setters ---

    pub fn set_status(&mut self, status: ModStatus) {
        self.working.status = status.code();
    }

    pub fn set_visibility(&mut self, visibility: ModVisibility) {
        self.working.visible = visibility.code();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.working.name = name.into();
    }

    pub fn set_name_id(&mut self, name_id: impl Into<String>) {
        self.working.name_id = name_id.into();
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.working.summary = summary.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.working.description = description;
    }

    pub fn set_homepage(&mut self, homepage: Option<String>) {
        self.working.homepage = homepage;
    }

    pub fn set_stock(&mut self, stock: i64) {
        self.working.stock = stock;
    }

    pub fn set_metadata_blob(&mut self, metadata_blob: Option<String>) {
        self.working.metadata_blob = metadata_blob;
    }

    pub fn media_mut(&mut self) -> &mut ModMedia {
        &mut self.working.media
    }

    pub fn add_youtube_link(&mut self, link: impl Into<String>) {
        self.working.media.youtube.push(link.into());
    }

    pub fn remove_youtube_link(&mut self, link: &str) {
        self.working.media.youtube.retain(|l| l != link);
    }

    pub fn add_sketchfab_link(&mut self, link: impl Into<String>) {
        self.working.media.sketchfab.push(link.into());
    }

    pub fn remove_sketchfab_link(&mut self, link: &str) {
        self.working.media.sketchfab.retain(|l| l != link);
    }

    pub fn add_image(&mut self, image: ImageLocator) {
        self.working.media.images.push(image);
    }

    pub fn remove_image(&mut self, filename: &str) {
        self.working.media.images.retain(|i| i.filename != filename);
    }

    pub fn add_tag(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.working.tags.iter().any(|t| t.name == name) {
            self.working.tags.push(ModTag {
                name,
                date_added: 0,
            });
        }
    }

    pub fn remove_tag(&mut self, name: &str) {
        self.working.tags.retain(|t| t.name != name);
    }

    /// Stage a local image to upload as the logo when the mod is created.
    pub fn set_logo_path(&mut self, path: impl Into<PathBuf>) {
        self.logo_path = Some(path.into());
    }

    pub fn clear_logo_path(&mut self) {
        self.logo_path = None;
    }

    pub fn logo_path(&self) -> Option<&Path> {
        self.logo_path.as_deref()
    }

    // --- Diffing ---

    pub fn is_info_dirty(&self) -> bool {
        TrackedField::ALL
            .iter()
            .any(|f| f.differs(&self.working, &self.original))
    }

    pub fn is_media_dirty(&self) -> bool {
        self.working.media != self.original.media
    }

    pub fn is_dirty(&self) -> bool {
        self.is_info_dirty() || self.is_media_dirty() || !self.tag_delta().is_empty()
    }

    /// Changed scalar fields with their new values, in [`TrackedField::ALL`] order.
    pub fn diff_fields(&self) -> Vec<FieldChange> {
        TrackedField::ALL
            .iter()
            .filter(|f| f.differs(&self.working, &self.original))
            .map(|f| FieldChange::new(f.key(), f.render(&self.working)))
            .collect()
    }

    pub fn media_delta(&self) -> MediaDelta {
        let original = &self.original.media;
        let working = &self.working.media;
        MediaDelta {
            youtube: CollectionDelta::between(
                original.youtube.iter().map(String::as_str),
                working.youtube.iter().map(String::as_str),
            ),
            sketchfab: CollectionDelta::between(
                original.sketchfab.iter().map(String::as_str),
                working.sketchfab.iter().map(String::as_str),
            ),
            images: CollectionDelta::between(
                original.images.iter().map(|i| i.filename.as_str()),
                working.images.iter().map(|i| i.filename.as_str()),
            ),
        }
    }

    pub fn added_media(&self) -> MediaChanges {
        let delta = self.media_delta();
        MediaChanges {
            mod_id: self.id(),
            youtube: delta.youtube.added,
            sketchfab: delta.sketchfab.added,
            images: delta.images.added,
        }
    }

    pub fn removed_media(&self) -> MediaChanges {
        let delta = self.media_delta();
        MediaChanges {
            mod_id: self.id(),
            youtube: delta.youtube.removed,
            sketchfab: delta.sketchfab.removed,
            images: delta.images.removed,
        }
    }

    pub fn tag_delta(&self) -> CollectionDelta {
        CollectionDelta::between(
            self.original.tags.iter().map(|t| t.name.as_str()),
            self.working.tags.iter().map(|t| t.name.as_str()),
        )
    }
}

impl From<&ModProfile> for EditableMod {
    fn from(profile: &ModProfile) -> Self {
        Self::from_profile(profile)
    }
}

// ============================================================================
// Tests
// ============================================================================
