use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::tracker::{EditableMod, FieldChange, TrackedField};

/// Key used for each tag in a create request.
pub const TAG_KEY: &str = "tags[]";
/// Key used for the logo upload in a create request.
pub const LOGO_KEY: &str = "logo";

/// A file to upload alongside the string values of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryAttachment {
    pub key: String,
    pub file_name: String,
    pub path: PathBuf,
}

/// String key/value pairs plus binary attachments for a create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub string_values: Vec<FieldChange>,
    pub binary_data: Vec<BinaryAttachment>,
}

impl SyncPayload {
    pub fn is_empty(&self) -> bool {
        self.string_values.is_empty() && self.binary_data.is_empty()
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.string_values
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.value.as_str())
    }

    pub fn values<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.string_values
            .iter()
            .filter(move |c| c.field == field)
            .map(|c| c.value.as_str())
    }
}

/// Full field set for creating a new mod: every tracked field, one
/// `tags[]` entry per tag, and the staged logo if its file exists.
pub fn build_create_payload(editable: &EditableMod) -> SyncPayload {
    let working = editable.working();

    let mut string_values: Vec<FieldChange> = TrackedField::ALL
        .iter()
        .map(|f| FieldChange::new(f.key(), f.render(working)))
        .collect();
    string_values.extend(
        working
            .tags
            .iter()
            .map(|tag| FieldChange::new(TAG_KEY, tag.name.clone())),
    );

    let mut binary_data = Vec::new();
    if let Some(path) = editable.logo_path() {
        if path.is_file() {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            binary_data.push(BinaryAttachment {
                key: LOGO_KEY.to_string(),
                file_name,
                path: path.to_path_buf(),
            });
        } else {
            warn!(path = %path.display(), "Logo file not found, omitting from payload");
        }
    }

    SyncPayload {
        string_values,
        binary_data,
    }
}

/// Sparse update containing only the fields that changed.
pub fn build_update_payload(editable: &EditableMod) -> SyncPayload {
    SyncPayload {
        string_values: editable.diff_fields(),
        binary_data: Vec::new(),
    }
}
