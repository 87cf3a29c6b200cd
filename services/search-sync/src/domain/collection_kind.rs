/// Collection kinds mirrored into the search index
///
/// Each Appwrite collection that is synchronized maps to exactly one kind.
/// The kind decides which search record variant is built.
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Note,
    Subject,
    Youtube,
    Quiz,
}

impl CollectionKind {
    /// All kinds, in the order their settings are read
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Note,
        CollectionKind::Subject,
        CollectionKind::Youtube,
        CollectionKind::Quiz,
    ];

    /// Value written to the record's `type` field
    pub fn type_tag(&self) -> &'static str {
        match self {
            CollectionKind::Note => "note",
            CollectionKind::Subject => "subject",
            CollectionKind::Youtube => "youtube",
            CollectionKind::Quiz => "quiz",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag())
    }
}

/// Error raised when two kinds are registered under the same collection id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("collection id '{collection_id}' is configured for both {existing} and {duplicate}")]
pub struct DuplicateCollectionId {
    pub collection_id: String,
    pub existing: CollectionKind,
    pub duplicate: CollectionKind,
}

/// Lookup table from Appwrite collection id to collection kind
///
/// Resolution is an exact key lookup, so registration order never matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionRegistry {
    kinds: HashMap<String, CollectionKind>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection id for a kind
    ///
    /// Blank ids are ignored so that unset settings never match an event.
    pub fn register(
        &mut self,
        collection_id: &str,
        kind: CollectionKind,
    ) -> Result<(), DuplicateCollectionId> {
        let collection_id = collection_id.trim();
        if collection_id.is_empty() {
            return Ok(());
        }

        if let Some(existing) = self.kinds.get(collection_id) {
            return Err(DuplicateCollectionId {
                collection_id: collection_id.to_string(),
                existing: *existing,
                duplicate: kind,
            });
        }

        self.kinds.insert(collection_id.to_string(), kind);
        Ok(())
    }

    /// Resolve the kind for a collection id taken from an event
    pub fn resolve(&self, collection_id: &str) -> Option<CollectionKind> {
        self.kinds.get(collection_id).copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
