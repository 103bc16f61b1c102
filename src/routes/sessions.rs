//! Therapy sessions: `/sessions`
//!
//! The creator is recorded as the patient. Both the patient and the
//! professional can list, read, edit and delete the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::{Session, UserId};
use crate::routes::crud::Writable;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(skip_deserializing)]
    pub patient_id: UserId,
    pub professional_id: UserId,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Parties are fixed once the session exists.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl Writable for Session {
    type Create = CreateSessionRequest;
    type Update = UpdateSessionRequest;

    fn assign_owner(input: &mut Self::Create, subject: UserId) {
        input.patient_id = subject;
    }
}
