//! Local edit sessions for mod profiles and the request payloads derived
//! from them.

pub mod payload;
pub mod tracker;

pub use payload::{build_create_payload, build_update_payload, BinaryAttachment, SyncPayload};
pub use tracker::{
    CollectionDelta, EditableMod, FieldChange, MediaChanges, MediaDelta, TrackedField,
};
