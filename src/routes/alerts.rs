//! Alerts raised by or for a user: `/alerts`

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::{Alert, UserId};
use crate::routes::crud::Writable;

fn pending() -> String {
    "Pendiente".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAlertRequest {
    #[serde(skip_deserializing)]
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    #[serde(default = "pending")]
    pub status: String,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateAlertRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Writable for Alert {
    type Create = CreateAlertRequest;
    type Update = UpdateAlertRequest;

    // Existing clients expect 200 here.
    const CREATED: StatusCode = StatusCode::OK;

    fn assign_owner(input: &mut Self::Create, subject: UserId) {
        input.user_id = subject;
    }
}
