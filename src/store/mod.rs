//! Content storage collaborators.
//!
//! The interceptor only needs [`ContentStore::find_one`]; the write pipeline
//! uses the rest. Two implementations ship with the crate:
//!
//! | Module   | Backing                                       |
//! |----------|-----------------------------------------------|
//! | `memory` | In-process map, used by tests and `JsonStore` |
//! | `json`   | JSON content export on disk                   |

mod json;
mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use crate::content::{ContentRecord, ContentType, FieldMap, RecordId};
use std::path::PathBuf;
use thiserror::Error;

/// Storage-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{content_type} `{id}` not found")]
    NotFound {
        content_type: ContentType,
        id: RecordId,
    },

    /// Backend could not be reached (includes read timeouts).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed content export `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("invalid record: {0}")]
    Invalid(String),
}

/// Minimal content repository contract.
pub trait ContentStore {
    /// Fetch one record, `Ok(None)` if it does not exist.
    fn find_one(
        &self,
        content_type: ContentType,
        id: &RecordId,
    ) -> Result<Option<ContentRecord>, StoreError>;

    /// Persist a new record and return it with its assigned id.
    fn create(
        &mut self,
        content_type: ContentType,
        fields: FieldMap,
    ) -> Result<ContentRecord, StoreError>;

    /// Merge `fields` into an existing record and return the stored result.
    fn update(
        &mut self,
        content_type: ContentType,
        id: &RecordId,
        fields: FieldMap,
    ) -> Result<ContentRecord, StoreError>;

    /// All records of a content type, in storage order.
    fn list(&self, content_type: ContentType) -> Result<Vec<ContentRecord>, StoreError>;
}
