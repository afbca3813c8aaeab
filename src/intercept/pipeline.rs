//! Write pipeline: intercept, then persist.

use super::{InterceptReport, Interceptor};
use crate::content::{ContentRecord, ContentType, FieldMap, RecordId, UpdateOperation};
use crate::store::{ContentStore, StoreError};

/// Explicit write path for a content store.
///
/// Every create/update runs the interceptor as a pre-write stage; only the
/// persistence step can fail.
#[derive(Debug)]
pub struct WritePipeline<S> {
    store: S,
    interceptor: Interceptor,
}

impl<S: ContentStore> WritePipeline<S> {
    pub fn new(store: S, interceptor: Interceptor) -> Self {
        Self { store, interceptor }
    }

    pub fn interceptor(&self) -> &Interceptor {
        &self.interceptor
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Intercept and persist a new record.
    pub fn create(
        &mut self,
        content_type: ContentType,
        mut fields: FieldMap,
    ) -> Result<(ContentRecord, InterceptReport), StoreError> {
        let report = self.interceptor.before_create(content_type, &mut fields);
        let record = self.store.create(content_type, fields)?;
        Ok((record, report))
    }

    /// Intercept and persist an update to an existing record.
    pub fn update(
        &mut self,
        content_type: ContentType,
        id: RecordId,
        fields: FieldMap,
    ) -> Result<(ContentRecord, InterceptReport), StoreError> {
        let mut op = UpdateOperation::new(content_type, id, fields);
        let report = self.interceptor.before_update(&mut op, &self.store);
        let record = self.store.update(op.content_type, &op.id, op.fields)?;
        Ok((record, report))
    }
}
