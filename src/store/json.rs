//! JSON content export store.
//!
//! # File Format
//!
//! ```json
//! {
//!   "article": [
//!     { "id": 1, "title": "Dialing in espresso", "meta_description": "..." }
//!   ],
//!   "recipe": []
//! }
//! ```
//!
//! Top-level keys are content type identifiers. Every record carries an
//! `id` (number or non-empty string); all other keys are its fields.

use super::{ContentStore, MemoryStore, StoreError};
use crate::content::{ContentRecord, ContentType, FieldMap, RecordId};
use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key holding the record id inside each exported object.
const ID_KEY: &str = "id";

/// File-backed store: loads the whole export, writes it back on `save`.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    inner: MemoryStore,
    dirty: bool,
}

impl JsonStore {
    /// Empty store that will be written to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: MemoryStore::new(),
            dirty: false,
        }
    }

    /// Load an existing export.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let content =
            fs::read_to_string(&path).map_err(|err| StoreError::Io(path.clone(), err))?;
        let inner = Self::parse(&content).map_err(|err| match err {
            ParseError::Json(err) => StoreError::Json(path.clone(), err),
            ParseError::Invalid(msg) => {
                StoreError::Invalid(format!("{}: {msg}", path.display()))
            }
        })?;

        Ok(Self {
            path,
            inner,
            dirty: false,
        })
    }

    /// Load `path` if it exists, otherwise start empty.
    pub fn open_or_new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if path.exists() {
            Self::open(path)
        } else {
            Ok(Self::new(path))
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether any write happened since the last load/save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Write the export back to disk.
    ///
    /// Writes a sibling temp file first, then renames it over the target.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.to_value()?)
            .map_err(|err| StoreError::Json(self.path.clone(), err))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| StoreError::Io(parent.to_path_buf(), err))?;
        }

        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json + "\n").map_err(|err| StoreError::Io(tmp.clone(), err))?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            fs::remove_file(&tmp).ok();
            return Err(StoreError::Io(self.path.clone(), err));
        }

        self.dirty = false;
        Ok(())
    }

    /// [`save`](Self::save) only when something changed. Returns whether
    /// the file was written.
    pub fn save_if_dirty(&mut self) -> Result<bool, StoreError> {
        if !self.dirty {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn parse(content: &str) -> Result<MemoryStore, ParseError> {
        let export: BTreeMap<ContentType, Vec<FieldMap>> =
            serde_json::from_str(content).map_err(ParseError::Json)?;

        let mut store = MemoryStore::new();
        for (content_type, objects) in export {
            let mut seen = FxHashSet::default();
            for (index, mut fields) in objects.into_iter().enumerate() {
                let id = fields
                    .shift_remove(ID_KEY)
                    .as_ref()
                    .and_then(RecordId::from_value)
                    .ok_or_else(|| {
                        ParseError::Invalid(format!(
                            "{content_type} #{index} has no usable `{ID_KEY}`"
                        ))
                    })?;
                if !seen.insert(id.clone()) {
                    return Err(ParseError::Invalid(format!(
                        "{content_type} #{index} repeats `{ID_KEY}` {id}"
                    )));
                }
                store.insert(ContentRecord::new(content_type, id, fields));
            }
        }
        Ok(store)
    }

    fn to_value(&self) -> Result<Value, StoreError> {
        let mut export = Map::new();
        for content_type in ContentType::ALL {
            let records = self.inner.list(content_type)?;
            if records.is_empty() {
                continue;
            }
            let objects = records
                .into_iter()
                .map(|record| {
                    let mut object = Map::with_capacity(record.fields.len() + 1);
                    object.insert(ID_KEY.into(), record.id.to_value());
                    object.extend(record.fields);
                    Value::Object(object)
                })
                .collect();
            export.insert(content_type.name().into(), Value::Array(objects));
        }
        Ok(Value::Object(export))
    }
}

enum ParseError {
    Json(serde_json::Error),
    Invalid(String),
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

impl ContentStore for JsonStore {
    fn find_one(
        &self,
        content_type: ContentType,
        id: &RecordId,
    ) -> Result<Option<ContentRecord>, StoreError> {
        self.inner.find_one(content_type, id)
    }

    fn create(
        &mut self,
        content_type: ContentType,
        fields: FieldMap,
    ) -> Result<ContentRecord, StoreError> {
        let record = self.inner.create(content_type, fields)?;
        self.dirty = true;
        Ok(record)
    }

    fn update(
        &mut self,
        content_type: ContentType,
        id: &RecordId,
        fields: FieldMap,
    ) -> Result<ContentRecord, StoreError> {
        let record = self.inner.update(content_type, id, fields)?;
        self.dirty = true;
        Ok(record)
    }

    fn list(&self, content_type: ContentType) -> Result<Vec<ContentRecord>, StoreError> {
        self.inner.list(content_type)
    }
}
