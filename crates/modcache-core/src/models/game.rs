use serde::{Deserialize, Serialize};

use super::media::LogoLocator;

/// A tag category defined by the game for its mods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTagOption {
    pub name: String,
    #[serde(rename = "type", default)]
    pub tag_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
}

/// Profile of the game whose catalog is being cached. Stored once at the
/// cache root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProfile {
    pub id: i64,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub logo: LogoLocator,
    #[serde(default)]
    pub profile_url: String,
    #[serde(default)]
    pub tag_options: Vec<GameTagOption>,
}
