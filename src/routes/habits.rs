//! Habit tracking: `/habits`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::{Habit, UserId};
use crate::routes::crud::Writable;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateHabitRequest {
    #[serde(skip_deserializing)]
    pub user_id: UserId,
    pub habit_type: String,
    pub description: Option<String>,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateHabitRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habit_type: Option<String>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Writable for Habit {
    type Create = CreateHabitRequest;
    type Update = UpdateHabitRequest;

    fn assign_owner(input: &mut Self::Create, subject: UserId) {
        input.user_id = subject;
    }
}
