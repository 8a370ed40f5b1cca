//! Mod profiles.
//!
//! [`ModObject`] is the wire/disk shape of a mod and the only thing that gets
//! serialized. [`ModProfile`] wraps a `ModObject` and computes its derived
//! properties once, at construction, so a profile read back from disk is
//! indistinguishable from one built from a fresh API response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::{LogoLocator, ModMedia};
use super::modfile::Modfile;
use super::user::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModStatus {
    NotAccepted,
    Accepted,
    Archived,
    Deleted,
}

impl ModStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ModStatus::NotAccepted),
            1 => Some(ModStatus::Accepted),
            2 => Some(ModStatus::Archived),
            3 => Some(ModStatus::Deleted),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ModStatus::NotAccepted => 0,
            ModStatus::Accepted => 1,
            ModStatus::Archived => 2,
            ModStatus::Deleted => 3,
        }
    }
}

impl std::fmt::Display for ModStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModStatus::NotAccepted => write!(f, "Not Accepted"),
            ModStatus::Accepted => write!(f, "Accepted"),
            ModStatus::Archived => write!(f, "Archived"),
            ModStatus::Deleted => write!(f, "Deleted"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModVisibility {
    Hidden,
    Public,
}

impl ModVisibility {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ModVisibility::Hidden),
            1 => Some(ModVisibility::Public),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ModVisibility::Hidden => 0,
            ModVisibility::Public => 1,
        }
    }
}

impl std::fmt::Display for ModVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModVisibility::Hidden => write!(f, "Hidden"),
            ModVisibility::Public => write!(f, "Public"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModTag {
    pub name: String,
    #[serde(default)]
    pub date_added: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    #[serde(default)]
    pub total_ratings: i64,
    #[serde(default)]
    pub positive_ratings: i64,
    #[serde(default)]
    pub negative_ratings: i64,
    #[serde(default)]
    pub percentage_positive: i64,
    #[serde(default)]
    pub weighted_aggregate: f64,
    #[serde(default)]
    pub display_text: String,
}

/// Raw mod object exactly as the server sends it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModObject {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub game_id: i64,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub visible: i32,
    #[serde(default)]
    pub submitted_by: UserProfile,
    #[serde(default)]
    pub date_added: i64,
    #[serde(default)]
    pub date_updated: i64,
    #[serde(default)]
    pub date_live: i64,
    #[serde(default)]
    pub logo: LogoLocator,
    #[serde(alias = "homepage_url", default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata_blob: Option<String>,
    #[serde(default)]
    pub profile_url: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub modfile: Option<Modfile>,
    #[serde(default)]
    pub media: ModMedia,
    #[serde(default)]
    pub rating_summary: RatingSummary,
    #[serde(default)]
    pub tags: Vec<ModTag>,
}

impl ModObject {
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.name.clone()).collect()
    }
}

/// Read-only view of a cached mod with derived properties precomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ModObject", into = "ModObject")]
pub struct ModProfile {
    raw: ModObject,
    status: Option<ModStatus>,
    visibility: Option<ModVisibility>,
    date_added: Option<DateTime<Utc>>,
    date_updated: Option<DateTime<Utc>>,
    date_live: Option<DateTime<Utc>>,
    tag_names: Vec<String>,
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}

impl From<ModObject> for ModProfile {
    fn from(raw: ModObject) -> Self {
        Self {
            status: ModStatus::from_code(raw.status),
            visibility: ModVisibility::from_code(raw.visible),
            date_added: timestamp(raw.date_added),
            date_updated: timestamp(raw.date_updated),
            date_live: timestamp(raw.date_live),
            tag_names: raw.tag_names(),
            raw,
        }
    }
}

impl From<ModProfile> for ModObject {
    fn from(profile: ModProfile) -> Self {
        profile.raw
    }
}

impl ModProfile {
    pub fn raw(&self) -> &ModObject {
        &self.raw
    }

    pub fn into_raw(self) -> ModObject {
        self.raw
    }

    pub fn id(&self) -> i64 {
        self.raw.id
    }

    pub fn game_id(&self) -> i64 {
        self.raw.game_id
    }

    pub fn name(&self) -> &str {
        &self.raw.name
    }

    pub fn name_id(&self) -> &str {
        &self.raw.name_id
    }

    pub fn summary(&self) -> &str {
        &self.raw.summary
    }

    pub fn homepage(&self) -> Option<&str> {
        self.raw.homepage.as_deref()
    }

    pub fn status(&self) -> Option<ModStatus> {
        self.status
    }

    pub fn visibility(&self) -> Option<ModVisibility> {
        self.visibility
    }

    pub fn date_added(&self) -> Option<DateTime<Utc>> {
        self.date_added
    }

    pub fn date_updated(&self) -> Option<DateTime<Utc>> {
        self.date_updated
    }

    pub fn date_live(&self) -> Option<DateTime<Utc>> {
        self.date_live
    }

    pub fn submitted_by(&self) -> &UserProfile {
        &self.raw.submitted_by
    }

    pub fn logo(&self) -> &LogoLocator {
        &self.raw.logo
    }

    pub fn media(&self) -> &ModMedia {
        &self.raw.media
    }

    pub fn modfile(&self) -> Option<&Modfile> {
        self.raw.modfile.as_ref()
    }

    pub fn rating_summary(&self) -> &RatingSummary {
        &self.raw.rating_summary
    }

    pub fn tag_names(&self) -> &[String] {
        &self.tag_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ModObject {
        ModObject {
            id: 42,
            game_id: 7,
            status: 1,
            visible: 1,
            date_added: 1_546_300_800,
            name: "Foo".to_string(),
            name_id: "foo".to_string(),
            tags: vec![
                ModTag {
                    name: "Maps".to_string(),
                    date_added: 0,
                },
                ModTag {
                    name: "PvP".to_string(),
                    date_added: 0,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_derived_fields_computed_at_construction() {
        let profile = ModProfile::from(sample());
        assert_eq!(profile.status(), Some(ModStatus::Accepted));
        assert_eq!(profile.visibility(), Some(ModVisibility::Public));
        assert_eq!(profile.tag_names(), &["Maps".to_string(), "PvP".to_string()]);
        assert_eq!(
            profile.date_added().map(|d| d.to_rfc3339()),
            Some("2019-01-01T00:00:00+00:00".to_string())
        );
        assert_eq!(profile.date_live(), None);
    }

    #[test]
    fn test_serializes_as_raw_object() {
        let profile = ModProfile::from(sample());
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["name"], "Foo");
        assert!(json.get("tag_names").is_none());

        let back: ModProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
        assert_eq!(back.status(), Some(ModStatus::Accepted));
    }

    #[test]
    fn test_homepage_url_alias() {
        let raw: ModObject =
            serde_json::from_str(r#"{"id":1,"homepage_url":"https://example.com"}"#).unwrap();
        assert_eq!(raw.homepage.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_unknown_status_code() {
        let profile = ModProfile::from(ModObject {
            status: 99,
            ..Default::default()
        });
        assert_eq!(profile.status(), None);
    }

    #[test]
    fn test_status_code_round_trip() {
        for status in [
            ModStatus::NotAccepted,
            ModStatus::Accepted,
            ModStatus::Archived,
            ModStatus::Deleted,
        ] {
            assert_eq!(ModStatus::from_code(status.code()), Some(status));
        }
    }
}
