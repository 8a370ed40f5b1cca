use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHash {
    #[serde(default)]
    pub md5: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLocator {
    #[serde(default)]
    pub binary_url: String,
    #[serde(default)]
    pub date_expires: i64,
}

/// A released build of a mod. The archive itself is cached separately as
/// `<id>.zip` next to this record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modfile {
    pub id: i64,
    pub mod_id: i64,
    #[serde(default)]
    pub date_added: i64,
    #[serde(default)]
    pub date_scanned: i64,
    #[serde(default)]
    pub virus_status: i32,
    #[serde(default)]
    pub virus_positive: i32,
    #[serde(default)]
    pub filesize: i64,
    #[serde(default)]
    pub filehash: FileHash,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub changelog: Option<String>,
    #[serde(default)]
    pub metadata_blob: Option<String>,
    #[serde(default)]
    pub download: DownloadLocator,
}
