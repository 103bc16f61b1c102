//! Emotional records: `/records`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::{EmotionalRecord, UserId};
use crate::routes::crud::Writable;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    #[serde(skip_deserializing)]
    pub user_id: UserId,
    pub emotion: String,
    pub intensity: Option<i32>,
    pub description: Option<String>,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRecordRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Option<i32>>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Writable for EmotionalRecord {
    type Create = CreateRecordRequest;
    type Update = UpdateRecordRequest;

    fn assign_owner(input: &mut Self::Create, subject: UserId) {
        input.user_id = subject;
    }
}
