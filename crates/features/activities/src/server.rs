//! HTTP surface of the activities slice.

use crate::{Activities, RosterError};
use axum::Json;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use roster_derive::{api_handler, api_model};
use roster_domain::activity::{Activity, Catalog};
use roster_domain::constants::ACTIVITIES_TAG;
use roster_kernel::server::{ApiError, ApiQuery, ApiState, ErrorBody};
use std::collections::HashMap;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub const NOT_FOUND: &str = "Activity not found";
pub const ALREADY_SIGNED_UP: &str = "Student is already signed up for this activity";
pub const ACTIVITY_FULL: &str = "Activity is full";
pub const NOT_REGISTERED: &str = "Student is not registered for this activity";

#[api_model]
/// Confirmation of a roster change
pub struct MessageResponse {
    /// e.g. `Signed up emma@mergington.edu for Chess Club`
    pub message: String,
}

#[api_model(deny_unknown_fields = false)]
/// Query string of signup and unregister
pub struct EmailQuery {
    pub email: String,
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::NotFound { .. } => Self::not_found(NOT_FOUND),
            RosterError::AlreadyRegistered { .. } => Self::bad_request(ALREADY_SIGNED_UP),
            RosterError::CapacityExceeded { .. } => Self::conflict(ACTIVITY_FULL),
            RosterError::NotRegistered { .. } => Self::bad_request(NOT_REGISTERED),
            other => Self::internal(other.to_string()),
        }
    }
}

impl FromRequestParts<ApiState> for Activities {
    type Rejection = ApiError;

    async fn from_request_parts(_: &mut Parts, state: &ApiState) -> Result<Self, Self::Rejection> {
        state.try_get_slice::<Self>().cloned().map_err(|err| ApiError::internal(err.to_string()))
    }
}

#[api_handler(
    get,
    path = "/activities",
    responses((
        status = OK,
        description = "Every activity with its roster, in catalog order",
        body = HashMap<String, Activity>,
    )),
    tag = ACTIVITIES_TAG,
)]
pub async fn list_activities(activities: Activities) -> Json<Catalog> {
    Json(activities.list_activities())
}

#[api_handler(
    post,
    path = "/activities/{activity_name}/signup",
    params(
        ("activity_name" = String, Path, description = "Activity name"),
        ("email" = String, Query, description = "Student email"),
    ),
    responses(
        (status = OK, description = "Student enrolled", body = MessageResponse),
        (status = BAD_REQUEST, description = "Already signed up", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown activity", body = ErrorBody),
        (status = CONFLICT, description = "Activity is full", body = ErrorBody),
        (status = UNPROCESSABLE_ENTITY, description = "Missing email", body = ErrorBody),
    ),
    tag = ACTIVITIES_TAG,
)]
pub async fn signup(
    activities: Activities,
    Path(activity_name): Path<String>,
    ApiQuery(EmailQuery { email }): ApiQuery<EmailQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let ack = activities.enroll(&activity_name, &email)?;
    Ok(Json(MessageResponse { message: ack.message() }))
}

#[api_handler(
    delete,
    path = "/activities/{activity_name}/unregister",
    params(
        ("activity_name" = String, Path, description = "Activity name"),
        ("email" = String, Query, description = "Student email"),
    ),
    responses(
        (status = OK, description = "Student removed", body = MessageResponse),
        (status = BAD_REQUEST, description = "Not registered", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown activity", body = ErrorBody),
        (status = UNPROCESSABLE_ENTITY, description = "Missing email", body = ErrorBody),
    ),
    tag = ACTIVITIES_TAG,
)]
pub async fn unregister(
    activities: Activities,
    Path(activity_name): Path<String>,
    ApiQuery(EmailQuery { email }): ApiQuery<EmailQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let ack = activities.unregister(&activity_name, &email)?;
    Ok(Json(MessageResponse { message: ack.message() }))
}

/// Roster routes, documented for OpenAPI.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_activities))
        .routes(routes!(signup))
        .routes(routes!(unregister))
}
