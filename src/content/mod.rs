//! Content data model shared by the interceptor and the stores.
//!
//! | Module   | Purpose                                         |
//! |----------|-------------------------------------------------|
//! | `kind`   | `ContentType` enumeration                       |
//! | `record` | `RecordId`, `FieldMap`, records and update ops  |

mod kind;
mod record;

pub use kind::{ContentType, UnknownContentType};
pub use record::{ContentRecord, FieldMap, RecordId, UpdateOperation};
