use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::{
    AppState,
    entities::{title, update},
    error::ApiResult,
    models::{UpdateRow, UpdatesQuery},
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UpdatesQuery>,
) -> ApiResult<Json<Vec<UpdateRow>>> {
    let limit = query.per_page.map(|p| u64::from(p).clamp(1, 100)).unwrap_or(10);

    let mut find = update::Entity::find()
        .find_also_related(title::Entity)
        .order_by_desc(update::Column::Id)
        .limit(limit);
    if let Some(title_id) = query.title_id {
        find = find.filter(update::Column::TitleId.eq(title_id));
    }

    let rows = find.all(&state.db).await?;
    let out = rows
        .into_iter()
        .map(|(event, title)| UpdateRow {
            id: event.id,
            title_id: event.title_id,
            event_type: event.event_type,
            info: event.info,
            created_at: event.created_at,
            title_name: title.map(|t| t.name),
        })
        .collect();

    Ok(Json(out))
}
