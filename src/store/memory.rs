//! In-memory content store.

use super::{ContentStore, StoreError};
use crate::content::{ContentRecord, ContentType, FieldMap, RecordId};
use rustc_hash::FxHashMap;

/// Records grouped by content type, kept in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: FxHashMap<ContentType, Vec<ContentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record as-is, replacing any record with the same id.
    pub fn insert(&mut self, record: ContentRecord) {
        let bucket = self.records.entry(record.content_type).or_default();
        match bucket.iter().position(|r| r.id == record.id) {
            Some(idx) => bucket[idx] = record,
            None => bucket.push(record),
        }
    }

    /// Total number of records across all content types.
    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Next free numeric id for a content type.
    fn next_id(&self, content_type: ContentType) -> u64 {
        self.records
            .get(&content_type)
            .into_iter()
            .flatten()
            .filter_map(|r| match r.id {
                RecordId::Numeric(n) => Some(n),
                RecordId::Opaque(_) => None,
            })
            .max()
            .map_or(1, |n| n + 1)
    }
}

impl ContentStore for MemoryStore {
    fn find_one(
        &self,
        content_type: ContentType,
        id: &RecordId,
    ) -> Result<Option<ContentRecord>, StoreError> {
        Ok(self
            .records
            .get(&content_type)
            .and_then(|bucket| bucket.iter().find(|r| &r.id == id))
            .cloned())
    }

    fn create(
        &mut self,
        content_type: ContentType,
        fields: FieldMap,
    ) -> Result<ContentRecord, StoreError> {
        let record = ContentRecord::new(content_type, self.next_id(content_type), fields);
        self.records
            .entry(content_type)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn update(
        &mut self,
        content_type: ContentType,
        id: &RecordId,
        fields: FieldMap,
    ) -> Result<ContentRecord, StoreError> {
        let record = self
            .records
            .get_mut(&content_type)
            .and_then(|bucket| bucket.iter_mut().find(|r| &r.id == id))
            .ok_or_else(|| StoreError::NotFound {
                content_type,
                id: id.clone(),
            })?;

        for (name, value) in fields {
            record.fields.insert(name, value);
        }
        Ok(record.clone())
    }

    fn list(&self, content_type: ContentType) -> Result<Vec<ContentRecord>, StoreError> {
        Ok(self
            .records
            .get(&content_type)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> FieldMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store = MemoryStore::new();
        let a = store
            .create(ContentType::Recipe, fields(json!({ "title": "Aeropress" })))
            .unwrap();
        let b = store
            .create(ContentType::Recipe, fields(json!({ "title": "Chemex" })))
            .unwrap();
        let c = store
            .create(ContentType::Guide, fields(json!({ "title": "Grinding" })))
            .unwrap();

        assert_eq!(a.id, RecordId::Numeric(1));
        assert_eq!(b.id, RecordId::Numeric(2));
        // ids are per content type
        assert_eq!(c.id, RecordId::Numeric(1));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = MemoryStore::new();
        store.insert(ContentRecord::new(
            ContentType::Article,
            7u64,
            fields(json!({ "title": "Old", "publishedAt": "2024-01-01T00:00:00Z" })),
        ));

        let updated = store
            .update(
                ContentType::Article,
                &RecordId::Numeric(7),
                fields(json!({ "title": "New" })),
            )
            .unwrap();

        assert_eq!(updated.get_str("title"), Some("New"));
        assert_eq!(updated.get_str("publishedAt"), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_update_missing_record() {
        let mut store = MemoryStore::new();
        let err = store
            .update(ContentType::Product, &RecordId::Numeric(1), FieldMap::new())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(err.to_string(), "product `1` not found");
    }

    #[test]
    fn test_find_one_respects_content_type() {
        let mut store = MemoryStore::new();
        store.insert(ContentRecord::new(ContentType::Article, 1u64, FieldMap::new()));

        let id = RecordId::Numeric(1);
        assert!(store.find_one(ContentType::Article, &id).unwrap().is_some());
        assert!(store.find_one(ContentType::Recipe, &id).unwrap().is_none());
    }

    #[test]
    fn test_next_id_skips_opaque_ids() {
        let mut store = MemoryStore::new();
        store.insert(ContentRecord::new(ContentType::Guide, "intro", FieldMap::new()));
        store.insert(ContentRecord::new(ContentType::Guide, 4u64, FieldMap::new()));
        let created = store.create(ContentType::Guide, FieldMap::new()).unwrap();
        assert_eq!(created.id, RecordId::Numeric(5));
    }
}
