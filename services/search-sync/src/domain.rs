// Domain layer modules
pub mod collection_kind;
pub mod document_payload;
pub mod event_classification;
pub mod search_record;
pub mod sync_outcome;

// Re-exports
pub use collection_kind::{CollectionKind, CollectionRegistry, DuplicateCollectionId};
pub use document_payload::{DocumentPayload, DOCUMENT_ID_FIELD};
pub use event_classification::{EventClassification, DEFAULT_COLLECTION_SEGMENT};
pub use search_record::{SearchRecord, PATH_PLACEHOLDER};
pub use sync_outcome::{SyncOutcome, SyncResponse};
