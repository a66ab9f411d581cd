use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{error::ApiResult, extract::ApiJson, routes::users::UserResponse, state::AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub name: String,
}

/// Sign in by display name
/// 
/// Returns the existing user with that name (compared case-insensitively)
/// or creates one. Use the returned id in `Authorization: Basic base64(id:...)`.
#[utoipa::path(
    post,
    path = "/auth",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Resolved user", body = UserResponse),
        (status = 400, description = "Body is not valid JSON"),
        (status = 422, description = "Blank or missing name")
    ),
    tag = "auth"
)]
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SignInRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.chat.sign_in(&req.name).await?;
    Ok(Json(user.into()))
}
