//! In-app notifications: `/notifications`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::{Notification, UserId};
use crate::routes::crud::Writable;

fn unread() -> String {
    "No leído".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNotificationRequest {
    #[serde(skip_deserializing)]
    pub user_id: UserId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default = "unread")]
    pub read_status: String,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateNotificationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_status: Option<String>,
}

impl Writable for Notification {
    type Create = CreateNotificationRequest;
    type Update = UpdateNotificationRequest;

    fn assign_owner(input: &mut Self::Create, subject: UserId) {
        input.user_id = subject;
    }
}
