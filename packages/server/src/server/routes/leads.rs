//! Lead job endpoints.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::LeadListId;
use crate::domains::leads::activities::{
    self, CreateLeadJob, LeadDetails, LeadJobAccepted, LeadJobSummary, RetryLeadJob,
};
use crate::domains::leads::FriendshipType;
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Body of `POST /api/leads`. Every field is optional at the wire level so
/// that missing input is reported as a validation error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateLeadBody {
    pub profile_url: String,
    pub count: Option<i64>,
    pub cookies: serde_json::Value,
    pub lead_name: Option<String>,
    pub user_id: Option<String>,
    pub friendship_type: Option<String>,
}

/// Body of `POST /api/leads/{id}/retry`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetryLeadBody {
    pub profile_url: String,
    pub count: Option<i64>,
    pub cookies: serde_json::Value,
    pub friendship_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClearErrorBody {
    pub lead_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeadsResponse {
    pub leads: Vec<LeadJobSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

fn parse_id(raw: Option<&str>) -> Result<LeadListId, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Lead ID is required"))?;
    LeadListId::parse(raw).map_err(|_| ApiError::bad_request("Invalid lead ID"))
}

/// `POST /api/leads` - start a new import.
pub async fn create_lead_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<CreateLeadBody>,
) -> Result<Json<LeadJobAccepted>, ApiError> {
    let input = CreateLeadJob::builder()
        .owner_id(body.user_id.unwrap_or_default())
        .profile(body.profile_url)
        .count(body.count.unwrap_or(0))
        .credentials(body.cookies)
        .lead_name(body.lead_name)
        .friendship_type(FriendshipType::from_input(body.friendship_type.as_deref()))
        .build();

    let started = activities::create_lead_job(input, &state.deps).await?;
    Ok(Json(started.accepted()))
}

/// `POST /api/leads/{id}/retry` - re-run an existing import, resuming from
/// its stored cursor.
pub async fn retry_lead_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RetryLeadBody>,
) -> Result<Json<LeadJobAccepted>, ApiError> {
    let id = parse_id(Some(&id))?;
    let input = RetryLeadJob::builder()
        .profile(body.profile_url)
        .count(body.count.unwrap_or(0))
        .credentials(body.cookies)
        .friendship_type(FriendshipType::from_input(body.friendship_type.as_deref()))
        .build();

    let started = activities::retry_lead_job(id, input, &state.deps).await?;
    Ok(Json(started.accepted()))
}

/// `GET /api/leads?userId=` - every list of an owner with its status.
pub async fn list_leads_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<LeadsResponse>, ApiError> {
    let owner_id = query.user_id.unwrap_or_default();
    let leads = activities::list_lead_jobs(&owner_id, &state.deps).await?;
    Ok(Json(LeadsResponse { leads }))
}

/// `GET /api/leads/{id}/status`
pub async fn lead_status_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LeadJobSummary>, ApiError> {
    let id = parse_id(Some(&id))?;
    Ok(Json(activities::poll_lead_job(id, &state.deps).await?))
}

/// `GET /api/leads/details?id=`
pub async fn lead_details_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<LeadDetails>, ApiError> {
    let id = parse_id(query.id.as_deref())?;
    Ok(Json(activities::get_lead_details(id, &state.deps).await?))
}

/// `POST /api/leads/clear-error`
pub async fn clear_error_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<ClearErrorBody>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = parse_id(body.lead_id.as_deref())?;
    activities::clear_lead_error(id, &state.deps).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// `DELETE /api/leads/delete?id=`
pub async fn delete_lead_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = parse_id(query.id.as_deref())?;
    activities::delete_lead_job(id, &state.deps).await?;
    Ok(Json(SuccessResponse { success: true }))
}
