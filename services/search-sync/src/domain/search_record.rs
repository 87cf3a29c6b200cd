/// Search records sent to the index
///
/// One variant per collection kind. Every variant carries `objectID`, the
/// Appwrite document id, which is the index's primary key for both upsert
/// and delete.
use serde::Serialize;

use super::collection_kind::CollectionKind;
use super::document_payload::DocumentPayload;

/// Substituted for any missing or blank value interpolated into a path
pub const PATH_PLACEHOLDER: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchRecord {
    Note {
        #[serde(rename = "objectID")]
        object_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        abbreviation: Option<String>,
        path: String,
    },

    Subject {
        #[serde(rename = "objectID")]
        object_id: String,
        /// Taken from the document's `name` field
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        abbreviation: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        path: String,
    },

    Youtube {
        #[serde(rename = "objectID")]
        object_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        abbreviation: Option<String>,
        path: String,
    },

    Quiz {
        #[serde(rename = "objectID")]
        object_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl SearchRecord {
    /// Build the record for `kind` from a document payload
    ///
    /// `object_id` is passed separately so callers resolve (and validate) the
    /// document id exactly once.
    pub fn build(kind: CollectionKind, object_id: &str, payload: &DocumentPayload) -> Self {
        let object_id = object_id.to_string();
        let semester = path_segment(payload.text("semester"));

        match kind {
            CollectionKind::Note => {
                let abbreviation = payload.text("abbreviation");
                let path = format!(
                    "/semester/{}/{}#note-{}",
                    semester,
                    path_segment(abbreviation.clone()),
                    object_id
                );
                SearchRecord::Note {
                    title: payload.text("title"),
                    description: payload.text("description"),
                    abbreviation,
                    path,
                    object_id,
                }
            }
            CollectionKind::Subject => {
                let path = format!("/semester/{}/#subject-{}", semester, object_id);
                SearchRecord::Subject {
                    title: payload.text("name"),
                    abbreviation: payload.text("abbreviation"),
                    code: payload.text("code"),
                    path,
                    object_id,
                }
            }
            CollectionKind::Youtube => {
                let abbreviation = payload.text("abbreviation");
                let path = format!(
                    "/semester/{}/{}#youtube-{}",
                    semester,
                    path_segment(abbreviation.clone()),
                    object_id
                );
                SearchRecord::Youtube {
                    title: payload.text("title"),
                    abbreviation,
                    path,
                    object_id,
                }
            }
            CollectionKind::Quiz => SearchRecord::Quiz {
                title: payload.text("title"),
                url: payload.text("url"),
                object_id,
            },
        }
    }

    pub fn object_id(&self) -> &str {
        match self {
            SearchRecord::Note { object_id, .. }
            | SearchRecord::Subject { object_id, .. }
            | SearchRecord::Youtube { object_id, .. }
            | SearchRecord::Quiz { object_id, .. } => object_id,
        }
    }

    pub fn kind(&self) -> CollectionKind {
        match self {
            SearchRecord::Note { .. } => CollectionKind::Note,
            SearchRecord::Subject { .. } => CollectionKind::Subject,
            SearchRecord::Youtube { .. } => CollectionKind::Youtube,
            SearchRecord::Quiz { .. } => CollectionKind::Quiz,
        }
    }
}

fn path_segment(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PATH_PLACEHOLDER.to_string(),
    }
}
