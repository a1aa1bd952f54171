use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use futures::stream;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    storage::ObjectBody,
};

pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> ApiResult<Response> {
    let obj = state.store.get(&key).await?.ok_or(ApiError::NotFound)?;

    let body = match obj.body {
        ObjectBody::Buffered(data) => Body::from(data),
        // Forwarded chunk by chunk; the blob is never held in memory whole.
        ObjectBody::Streamed(remote) => Body::from_stream(stream::unfold(
            remote,
            |mut remote| async move { remote.next().await.map(|chunk| (chunk, remote)) },
        )),
    };

    Ok((
        [
            (header::CONTENT_TYPE, obj.content_type),
            (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
        ],
        body,
    )
        .into_response())
}
