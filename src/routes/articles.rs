//! Psychoeducation articles: `/articles`
//!
//! Any authenticated user can read them; only the author can change them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::{Article, UserId};
use crate::routes::crud::Writable;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateArticleRequest {
    #[serde(skip_deserializing)]
    pub professional_id: UserId,
    pub title: String,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateArticleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub media_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<Option<String>>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Writable for Article {
    type Create = CreateArticleRequest;
    type Update = UpdateArticleRequest;

    fn assign_owner(input: &mut Self::Create, subject: UserId) {
        input.professional_id = subject;
    }
}
