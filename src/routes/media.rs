use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

use crate::{
    AppState,
    assets::{ARTWORK_KINDS, DOC_TYPES},
    entities::{artwork, caption, document},
    error::{ApiError, ApiResult},
    models::StatusPayload,
    uploads::{self, IncomingFile},
};

struct UploadForm {
    values: HashMap<String, String>,
    file: Option<IncomingFile>,
}

async fn read_form(mut multipart: Multipart) -> ApiResult<UploadForm> {
    let mut values = HashMap::new();
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let declared_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?.to_vec();
            file = Some(IncomingFile { filename, declared_type, data });
        } else {
            values.insert(name, field.text().await?);
        }
    }

    Ok(UploadForm { values, file })
}

pub async fn list_artworks(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<artwork::Model>>> {
    let rows = artwork::Entity::find()
        .filter(artwork::Column::TitleId.eq(id))
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn upload_artwork(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> ApiResult<Json<serde_json::Value>> {
    let form = read_form(multipart).await?;
    let kind = form
        .values
        .get("kind")
        .ok_or(ApiError::InvalidValue { field: "kind", allowed: ARTWORK_KINDS })?;
    let file = form.file.ok_or(ApiError::MissingFile)?;

    let key = uploads::upload_artwork(&state.db, state.store.as_ref(), id, kind, file).await?;
    Ok(Json(json!({ "key": key, "ok": true })))
}

pub async fn delete_artwork(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<serde_json::Value>> {
    uploads::delete_artwork(&state.db, state.store.as_ref(), id).await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn artwork_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<StatusPayload>,
) -> ApiResult<Json<serde_json::Value>> {
    uploads::set_artwork_status(&state.db, id, &payload.status, payload.notes.as_deref()).await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn list_captions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<caption::Model>>> {
    let rows = caption::Entity::find()
        .filter(caption::Column::TitleId.eq(id))
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn upload_caption(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> ApiResult<Json<serde_json::Value>> {
    let form = read_form(multipart).await?;
    let language = form
        .values
        .get("language")
        .ok_or_else(|| ApiError::BadRequest("language is required".to_string()))?;
    let kind = form
        .values
        .get("kind")
        .ok_or(ApiError::InvalidValue { field: "kind", allowed: crate::assets::CAPTION_KINDS })?;
    let file = form.file.ok_or(ApiError::MissingFile)?;

    let key =
        uploads::upload_caption(&state.db, state.store.as_ref(), id, language, kind, file).await?;
    Ok(Json(json!({ "key": key, "ok": true })))
}

pub async fn delete_caption(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<serde_json::Value>> {
    uploads::delete_caption(&state.db, state.store.as_ref(), id).await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<document::Model>>> {
    let rows = document::Entity::find()
        .filter(document::Column::TitleId.eq(id))
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> ApiResult<Json<serde_json::Value>> {
    let form = read_form(multipart).await?;
    let doc_type = form
        .values
        .get("doc_type")
        .ok_or(ApiError::InvalidValue { field: "doc_type", allowed: DOC_TYPES })?;
    let file = form.file.ok_or(ApiError::MissingFile)?;

    let key =
        uploads::upload_document(&state.db, state.store.as_ref(), id, doc_type, file).await?;
    Ok(Json(json!({ "key": key, "ok": true })))
}

pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<serde_json::Value>> {
    uploads::delete_document(&state.db, state.store.as_ref(), id).await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn document_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<StatusPayload>,
) -> ApiResult<Json<serde_json::Value>> {
    uploads::set_document_status(&state.db, id, &payload.status, payload.notes.as_deref()).await?;
    Ok(Json(json!({ "ok": true })))
}
