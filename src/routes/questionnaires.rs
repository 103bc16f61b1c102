//! Questionnaire answers: `/questionnaries`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::models::{Questionnaire, UserId};
use crate::routes::crud::Writable;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateQuestionnaireRequest {
    #[serde(skip_deserializing)]
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "empty_responses")]
    pub responses: Value,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn empty_responses() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateQuestionnaireRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Writable for Questionnaire {
    type Create = CreateQuestionnaireRequest;
    type Update = UpdateQuestionnaireRequest;

    fn assign_owner(input: &mut Self::Create, subject: UserId) {
        input.user_id = subject;
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{seed_user, send, TestApp};

    #[tokio::test]
    async fn responses_are_stored_verbatim() {
        let app = TestApp::new();
        let (_, token) = seed_user(&app, "ana@psy.test").await;
        let responses = json!({ "q1": 3, "q2": ["a", "c"], "notas": { "libre": "sí" } });

        let (status, created) = send(&app, "POST", "/questionnaries", Some(&token), Some(json!({
            "type": "GAD-7",
            "responses": responses,
        })))
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["responses"], responses);

        let id = created["questionnaire_id"].as_i64().unwrap();
        let (_, fetched) = send(&app, "GET", &format!("/questionnaries/{id}"), Some(&token), None).await;
        assert_eq!(fetched["responses"], responses);
        assert_eq!(fetched["type"], json!("GAD-7"));
    }
}
