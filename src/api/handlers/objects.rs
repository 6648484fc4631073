use axum::{
    Json,
    extract::{Multipart, Query, State},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;
use crate::api::error::ApiError;
use crate::services::relay::IncomingFile;

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Deserialize)]
pub struct PutObjectQuery {
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
}

#[derive(Deserialize)]
pub struct ObjectKeyQuery {
    pub filename: Option<String>,
}

#[utoipa::path(
    post,
    path = "/putObject",
    params(
        ("filePath" = Option<String>, Query, description = "Optional key prefix for the stored object")
    ),
    responses(
        (status = 200, description = "Object stored", body = MessageResponse),
        (status = 400, description = "Staging or remote failure", body = MessageResponse),
        (status = 409, description = "Key already exists and overwriting is disabled", body = MessageResponse)
    ),
    tag = "objects"
)]
pub async fn put_object(
    State(state): State<AppState>,
    Query(query): Query<PutObjectQuery>,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut file = None;

    // Take the first multipart field that carries a file.
    while let Some(field) = multipart.next_field().await.map_err(|err| {
        tracing::error!("failed to read multipart body: {}", err);
        ApiError::Failure
    })? {
        let Some(original_name) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(|err| {
            tracing::error!("failed to read upload payload: {}", err);
            ApiError::Failure
        })?;

        file = Some(IncomingFile {
            original_name,
            mime_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let Some(file) = file else {
        tracing::warn!("multipart body contained no file field");
        return Err(ApiError::Failure);
    };

    state
        .relay
        .upload(file, query.file_path.as_deref())
        .await?;

    Ok(MessageResponse::new("Success"))
}

#[utoipa::path(
    get,
    path = "/getObject",
    params(
        ("filename" = Option<String>, Query, description = "Remote object key")
    ),
    responses(
        (status = 200, description = "Object copied to local storage", body = MessageResponse),
        (status = 400, description = "Remote failure or unknown key", body = MessageResponse),
        (status = 404, description = "Missing filename parameter", body = MessageResponse)
    ),
    tag = "objects"
)]
pub async fn get_object(
    State(state): State<AppState>,
    Query(query): Query<ObjectKeyQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let filename = query
        .filename
        .ok_or(ApiError::MissingQuery("queryString not found"))?;

    state.relay.retrieve(&filename).await?;

    Ok(MessageResponse::new("Success"))
}

#[utoipa::path(
    delete,
    path = "/deleteObject",
    params(
        ("filename" = Option<String>, Query, description = "Remote object key")
    ),
    responses(
        (status = 200, description = "Object deleted (or never existed)", body = MessageResponse),
        (status = 400, description = "Remote failure", body = MessageResponse),
        (status = 404, description = "Missing filename parameter", body = MessageResponse)
    ),
    tag = "objects"
)]
pub async fn delete_object(
    State(state): State<AppState>,
    Query(query): Query<ObjectKeyQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let filename = query
        .filename
        .ok_or(ApiError::MissingQuery("query not found"))?;

    state.relay.delete(&filename).await?;

    Ok(MessageResponse::new("success"))
}
