use serde::{Deserialize, Serialize};

/// Download and rating statistics for a single mod.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModStatistics {
    pub mod_id: i64,
    #[serde(default)]
    pub popularity_rank_position: i64,
    #[serde(default)]
    pub popularity_rank_total_mods: i64,
    #[serde(default)]
    pub downloads_total: i64,
    #[serde(default)]
    pub subscribers_total: i64,
    #[serde(default)]
    pub ratings_total: i64,
    #[serde(default)]
    pub ratings_positive: i64,
    #[serde(default)]
    pub ratings_negative: i64,
    #[serde(default)]
    pub ratings_percentage_positive: i64,
    #[serde(default)]
    pub ratings_weighted_aggregate: f64,
    #[serde(default)]
    pub ratings_display_text: String,
    #[serde(default)]
    pub date_expires: i64,
}

impl ModStatistics {
    /// Server-provided expiry has passed; the caller should re-fetch.
    pub fn is_expired(&self, now_unix: i64) -> bool {
        self.date_expires > 0 && now_unix >= self.date_expires
    }
}
