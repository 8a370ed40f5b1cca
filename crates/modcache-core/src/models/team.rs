use serde::{Deserialize, Serialize};

use super::user::UserProfile;

/// Permission level of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamLevel {
    Moderator,
    Creator,
    Administrator,
}

impl TeamLevel {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(TeamLevel::Moderator),
            4 => Some(TeamLevel::Creator),
            8 => Some(TeamLevel::Administrator),
            _ => None,
        }
    }
}

impl std::fmt::Display for TeamLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamLevel::Moderator => write!(f, "Moderator"),
            TeamLevel::Creator => write!(f, "Creator"),
            TeamLevel::Administrator => write!(f, "Administrator"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModTeamMember {
    pub id: i64,
    #[serde(default)]
    pub user: UserProfile,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub date_added: i64,
    #[serde(default)]
    pub position: String,
}

impl ModTeamMember {
    pub fn level(&self) -> Option<TeamLevel> {
        TeamLevel::from_code(self.level)
    }
}
