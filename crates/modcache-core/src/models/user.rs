use serde::{Deserialize, Serialize};

use super::media::AvatarLocator;

/// A user account as returned by the catalog API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub name_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub date_online: i64,
    #[serde(default)]
    pub avatar: AvatarLocator,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub profile_url: String,
}
