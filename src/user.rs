//! # Submission Payloads
//!
//! Requests/responses between the landing page and the backend.
//!
//! ## Contract
//!
//! To backend
//! - JSON `{name, number, email}`, all strings
//! - Browser input constraints gate format (10-digit phone, email type), the
//!   backend only checks presence
//!
//! From backend
//! - 200 `{"success": true, "user": {...}}` with the stored record and its id
//! - 400 `{"error": "Missing fields"}`
//! - 500 `{"error": "Server error"}`

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/users`. Absent keys deserialize to the empty
/// string so missing and empty collapse into one presence check.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub number: String,

    #[serde(default)]
    pub email: String,
}

impl SubmissionPayload {
    pub fn has_all_fields(&self) -> bool {
        !self.name.is_empty() && !self.number.is_empty() && !self.email.is_empty()
    }
}

/// The persisted user-contact document, id generated by the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub id: u64,
    pub name: String,
    pub number: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SubmissionResponse {
    pub success: bool,
    pub user: SubmissionRecord,
}
