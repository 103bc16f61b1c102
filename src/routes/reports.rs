//! Support reports: `POST /reports`

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::auth::models::AuthUser;
use crate::database::models::{SupportReport, UserId};
use crate::database::repository::{self, to_document};
use crate::database::{Store, StoreError};
use crate::error::{ApiError, ApiJson};
use crate::server::AppState;

/// Status of a freshly filed report.
pub const REPORT_SENT: &str = "enviado";

/// Folios drawn before a filing is given up.
const FOLIO_ATTEMPTS: usize = 3;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateReportRequest {
    #[serde(skip_deserializing)]
    pub user_id: UserId,
    pub reason: String,
    pub body: String,
    pub page: Option<String>,
    #[serde(skip_deserializing)]
    pub folio: String,
    #[serde(skip_deserializing)]
    pub status: String,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ReportReceipt {
    pub report_id: i32,
    pub folio: String,
}

/// `REP-` followed by six random digits.
pub fn generate_folio() -> String {
    format!("REP-{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

/// Insert `input` under a fresh folio, drawing again while the folio is taken.
async fn file_report(
    store: &dyn Store,
    mut input: CreateReportRequest,
    mut next_folio: impl FnMut() -> String,
) -> Result<SupportReport, ApiError> {
    for attempt in 1..=FOLIO_ATTEMPTS {
        input.folio = next_folio();
        match repository::insert::<SupportReport>(store, to_document(&input)?).await {
            Ok(report) => return Ok(report),
            Err(StoreError::Constraint(detail)) if detail.contains("folio") => {
                tracing::warn!("Folio {} already taken (attempt {}/{})", input.folio, attempt, FOLIO_ATTEMPTS);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(ApiError::internal("No free report folio"))
}

pub async fn create_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(mut input): ApiJson<CreateReportRequest>,
) -> Result<(StatusCode, Json<ReportReceipt>), ApiError> {
    input.user_id = user.id;
    input.status = REPORT_SENT.to_string();

    let report = file_report(state.store.as_ref(), input, generate_folio).await?;
    tracing::info!("User {} filed support report {}", user.id, report.folio);

    Ok((
        StatusCode::CREATED,
        Json(ReportReceipt {
            report_id: report.report_id,
            folio: report.folio,
        }),
    ))
}

pub fn create_report_routes() -> Router<AppState> {
    Router::new().route("/reports", post(create_report))
}
