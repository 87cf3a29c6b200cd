// Classification of Appwrite event-type strings
//
// Appwrite names document events as dot-delimited paths, e.g.
// `databases.<db>.collections.<collection>.documents.<doc>.create`.
// Only the action marker and the collection segment matter here.

/// Marker for deletions
pub const DELETE_MARKER: &str = ".delete";

/// Marker for creations
pub const CREATE_MARKER: &str = ".create";

/// Marker for updates
pub const UPDATE_MARKER: &str = ".update";

/// Default position of the collection id in the event-type string
pub const DEFAULT_COLLECTION_SEGMENT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventClassification {
    /// No event-type was supplied: not an Appwrite trigger
    Missing,

    /// The document was deleted
    Delete,

    /// The document was created or updated
    ///
    /// `collection_id` is empty when the event-type has no segment at the
    /// configured position.
    Upsert { collection_id: String },

    /// Event-type carries neither a delete nor a create/update marker
    Unrecognized(String),
}

impl EventClassification {
    /// Classify an event-type string
    ///
    /// Delete markers take precedence over create/update markers. Only an
    /// absent or empty header counts as missing; whitespace is a present
    /// (and unrecognized) event-type.
    pub fn classify(event_type: Option<&str>, collection_segment: usize) -> Self {
        let event_type = match event_type {
            Some(s) if !s.is_empty() => s,
            _ => return EventClassification::Missing,
        };

        if event_type.contains(DELETE_MARKER) {
            return EventClassification::Delete;
        }

        if event_type.contains(CREATE_MARKER) || event_type.contains(UPDATE_MARKER) {
            let collection_id = collection_id_at(event_type, collection_segment)
                .unwrap_or_default()
                .to_string();
            return EventClassification::Upsert { collection_id };
        }

        EventClassification::Unrecognized(event_type.to_string())
    }
}

/// Return the dot-delimited segment at `index`, if present
pub fn collection_id_at(event_type: &str, index: usize) -> Option<&str> {
    event_type.split('.').nth(index)
}
