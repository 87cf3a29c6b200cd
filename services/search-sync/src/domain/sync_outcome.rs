/// Terminal outcomes of one sync invocation and their response shape
use serde::{Deserialize, Serialize};

use super::collection_kind::CollectionKind;

/// Every way an invocation can end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No event-type header: not triggered by Appwrite
    MissingEventType,
    /// Body is not a JSON object
    InvalidPayload,
    /// Body has no `$id`
    MissingDocumentId,
    Deleted { document_id: String },
    DeleteFailed { document_id: String, error: String },
    UnhandledCollection { collection_id: String },
    Synced { document_id: String, kind: CollectionKind },
    SyncFailed { document_id: String, error: String },
    UnhandledEventType { event_type: String },
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Deleted { .. } | SyncOutcome::Synced { .. })
    }

    /// HTTP status code for this outcome
    pub fn status_code(&self) -> u16 {
        match self {
            SyncOutcome::Deleted { .. } | SyncOutcome::Synced { .. } => 200,
            SyncOutcome::DeleteFailed { .. } | SyncOutcome::SyncFailed { .. } => 500,
            SyncOutcome::MissingEventType
            | SyncOutcome::InvalidPayload
            | SyncOutcome::MissingDocumentId
            | SyncOutcome::UnhandledCollection { .. }
            | SyncOutcome::UnhandledEventType { .. } => 400,
        }
    }

    /// JSON body for this outcome
    pub fn to_response(&self) -> SyncResponse {
        match self {
            SyncOutcome::MissingEventType => {
                SyncResponse::failure("Function was not triggered by an Appwrite event.")
            }
            SyncOutcome::InvalidPayload => {
                SyncResponse::failure("Request body is not a valid JSON object.")
            }
            SyncOutcome::MissingDocumentId => {
                SyncResponse::failure("Document payload is missing '$id'.")
            }
            SyncOutcome::Deleted { document_id } => {
                SyncResponse::success(format!("Document {} deleted.", document_id))
            }
            SyncOutcome::UnhandledCollection { collection_id } => SyncResponse::failure(format!(
                "Collection type '{}' not handled.",
                collection_id
            )),
            SyncOutcome::Synced { document_id, .. } => {
                SyncResponse::success(format!("Document {} synced.", document_id))
            }
            SyncOutcome::DeleteFailed { error, .. } | SyncOutcome::SyncFailed { error, .. } => {
                SyncResponse::error(error.clone())
            }
            SyncOutcome::UnhandledEventType { .. } => {
                SyncResponse::failure("Event type not handled.")
            }
        }
    }
}

/// `{ success, message?, error? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Handled failure described by a message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Downstream failure carrying the underlying error text
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }

    pub fn to_json(&self) -> String {
        // a struct of bool and strings always serializes
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"success":false}"#.to_string())
    }
}
