//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{state::AppState, update::update_from_json};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use lecture_tracker_core::{domain::Lecture, ports::PortError, summary::summarize_lecture};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use utoipa::{OpenApi, ToSchema};

pub const LECTURE_NOT_FOUND: &str = "Lecture not found";
pub const SUMMARY_FAILED: &str = "Failed to generate summary";
pub const STORE_FAILED: &str = "Failed to access lecture store";

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        list_lectures_handler,
        get_lecture_handler,
        update_lecture_handler,
        summarize_lecture_handler,
    ),
    components(
        schemas(
            HealthResponse,
            LectureResponse,
            UpdateLectureRequest,
            UpdateLectureResponse,
            SummaryResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Lecture Tracker API", description = "Lecture catalog, listening progress, notes and AI summaries.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
}

/// A lecture as exposed over HTTP.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LectureResponse {
    id: u64,
    chapter: i64,
    verse_range: String,
    location: String,
    date: String,
    title: String,
    filename: String,
    audio_url: String,
    listened: bool,
    bookmarked: bool,
    notes: String,
    summary: String,
}

impl From<Lecture> for LectureResponse {
    fn from(lecture: Lecture) -> Self {
        Self {
            id: lecture.id,
            chapter: lecture.chapter,
            verse_range: lecture.verse_range,
            location: lecture.location,
            date: lecture.date,
            title: lecture.title,
            filename: lecture.filename,
            audio_url: lecture.audio_url,
            listened: lecture.listened,
            bookmarked: lecture.bookmarked,
            notes: lecture.notes,
            summary: lecture.summary,
        }
    }
}

/// The fields a PATCH body may carry. Anything else, or a value of the wrong type, is ignored.
#[derive(ToSchema)]
pub struct UpdateLectureRequest {
    pub listened: Option<bool>,
    pub bookmarked: Option<bool>,
    pub notes: Option<String>,
    pub summary: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct UpdateLectureResponse {
    message: String,
    lecture: LectureResponse,
}

#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    summary: String,
}

/// The body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    error: String,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn error_reply(status: StatusCode, message: &str) -> ErrorReply {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn not_found() -> ErrorReply {
    error_reply(StatusCode::NOT_FOUND, LECTURE_NOT_FOUND)
}

/// Maps a port failure onto the fixed error bodies of the API.
fn port_error_reply(e: PortError) -> ErrorReply {
    match e {
        PortError::NotFound(_) => not_found(),
        PortError::Storage(msg) => {
            error!("Lecture store failure: {}", msg);
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, STORE_FAILED)
        }
        PortError::Provider(msg) => {
            error!("[AI Summary Error] {}", msg);
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, SUMMARY_FAILED)
        }
    }
}

/// `application/json` or any `+json` media type. Other bodies are not read at all.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Lecture ids are positive integers; any other path segment names no lecture.
fn parse_id(raw: &str) -> Result<u64, ErrorReply> {
    raw.parse::<u64>().map_err(|_| not_found())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// List every lecture in stored order.
#[utoipa::path(
    get,
    path = "/lectures",
    responses(
        (status = 200, description = "All lectures", body = [LectureResponse]),
        (status = 500, description = "Lecture store unavailable", body = ErrorResponse)
    )
)]
pub async fn list_lectures_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<LectureResponse>>, ErrorReply> {
    let lectures = app_state
        .store
        .list_lectures()
        .await
        .map_err(port_error_reply)?;
    Ok(Json(lectures.into_iter().map(LectureResponse::from).collect()))
}

/// Fetch a single lecture.
#[utoipa::path(
    get,
    path = "/lectures/{id}",
    params(("id" = u64, Path, description = "The lecture id.")),
    responses(
        (status = 200, description = "The lecture", body = LectureResponse),
        (status = 404, description = "No lecture with this id", body = ErrorResponse),
        (status = 500, description = "Lecture store unavailable", body = ErrorResponse)
    )
)]
pub async fn get_lecture_handler(
    State(app_state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<LectureResponse>, ErrorReply> {
    let id = parse_id(&raw_id)?;
    let lecture = app_state
        .store
        .find_lecture(id)
        .await
        .map_err(port_error_reply)?;
    Ok(Json(lecture.into()))
}

/// Update progress fields of a lecture.
///
/// The body is read permissively: an empty body or one without a JSON content
/// type changes nothing, and fields outside the whitelist or of the wrong type
/// are dropped without error.
#[utoipa::path(
    patch,
    path = "/lectures/{id}",
    params(("id" = u64, Path, description = "The lecture id.")),
    request_body = UpdateLectureRequest,
    responses(
        (status = 200, description = "Lecture updated", body = UpdateLectureResponse),
        (status = 400, description = "JSON content type with a malformed body", body = ErrorResponse),
        (status = 404, description = "No lecture with this id", body = ErrorResponse),
        (status = 500, description = "Lecture store unavailable", body = ErrorResponse)
    )
)]
pub async fn update_lecture_handler(
    State(app_state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UpdateLectureResponse>, ErrorReply> {
    let id = parse_id(&raw_id)?;

    let json = if !has_json_content_type(&headers) || body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&body).map_err(|e| {
            warn!("Rejected PATCH body for lecture {}: {}", id, e);
            error_reply(StatusCode::BAD_REQUEST, "Invalid JSON body")
        })?
    };
    let update = update_from_json(&json);
    if update.is_empty() {
        debug!("PATCH for lecture {} carries no recognised fields", id);
    }

    let lecture = app_state
        .store
        .update_lecture(id, &update)
        .await
        .map_err(port_error_reply)?;
    info!("Updated lecture {}", id);

    Ok(Json(UpdateLectureResponse {
        message: "Updated successfully".to_string(),
        lecture: lecture.into(),
    }))
}

/// Generate and store an AI summary for a lecture.
#[utoipa::path(
    post,
    path = "/lectures/{id}/summarize",
    params(("id" = u64, Path, description = "The lecture id.")),
    responses(
        (status = 200, description = "Summary generated and stored", body = SummaryResponse),
        (status = 404, description = "No lecture with this id", body = ErrorResponse),
        (status = 500, description = "Summary generation failed", body = ErrorResponse)
    )
)]
pub async fn summarize_lecture_handler(
    State(app_state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<SummaryResponse>, ErrorReply> {
    let id = parse_id(&raw_id)?;
    let summary = summarize_lecture(
        app_state.store.as_ref(),
        app_state.summary_provider.as_ref(),
        id,
    )
    .await
    .map_err(port_error_reply)?;
    info!("Stored summary for lecture {}", id);

    Ok(Json(SummaryResponse { summary }))
}
