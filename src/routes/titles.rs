use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde_json::json;

use crate::{
    AppState, assets, audit,
    entities::{artwork, title, title_profile},
    error::{ApiError, ApiResult},
    models::{CreateTitle, ProfilePayload, TitleListQuery, TitleSummary, UsageResponse},
    readiness,
};

fn clamp_per_page(per_page: Option<u32>, default: u64) -> u64 {
    per_page.map(|p| u64::from(p).clamp(1, 100)).unwrap_or(default)
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TitleListQuery>,
) -> ApiResult<Json<Vec<TitleSummary>>> {
    let limit = clamp_per_page(query.per_page, 50);
    let status_filter = query.status.as_deref().filter(|s| !s.is_empty());

    let mut find = title::Entity::find().order_by_desc(title::Column::Id);
    if let Some(q) = query.q.as_deref().filter(|q| !q.trim().is_empty()) {
        find = find.filter(title::Column::Name.contains(q.trim()));
    }
    // The status filter depends on per-row recomputation, so the limit can
    // only move into SQL when it is absent.
    if status_filter.is_none() {
        find = find.limit(limit);
    }
    let rows = find.all(&state.db).await?;

    // Readiness is always recomputed; the stored status column is display-only.
    let mut out = Vec::new();
    for row in rows {
        let ready = readiness::for_title(&state.db, row.id).await?;
        let computed_status = ready.status_label();
        if let Some(wanted) = status_filter {
            if computed_status != wanted {
                continue;
            }
        }

        let poster_key = artwork::Entity::find()
            .filter(artwork::Column::TitleId.eq(row.id))
            .filter(artwork::Column::Kind.eq("poster"))
            .one(&state.db)
            .await?
            .and_then(|a| a.storage_key);

        out.push(TitleSummary {
            id: row.id,
            name: row.name,
            original_status: row.status,
            created_at: row.created_at,
            poster_key,
            ready_score: ready.score(),
            computed_status,
        });
        if out.len() as u64 >= limit {
            break;
        }
    }

    Ok(Json(out))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTitle>,
) -> ApiResult<Json<serde_json::Value>> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }

    let created = title::ActiveModel {
        name: Set(name.clone()),
        status: Set("incomplete".to_string()),
        created_at: Set(audit::now_sec()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    audit::record(&state.db, created.id, "created_title", Some(&name)).await?;
    Ok(Json(json!({ "id": created.id })))
}

pub async fn usage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<UsageResponse>> {
    let used_bytes = assets::title_usage_bytes(&state.db, id).await?;
    Ok(Json(UsageResponse {
        title_id: id,
        used_bytes,
        quota_bytes: assets::TITLE_QUOTA_BYTES,
    }))
}

// Profiles are created lazily on first read or write.
async fn ensure_profile(
    db: &sea_orm::DatabaseConnection,
    title_id: i32,
) -> Result<title_profile::Model, sea_orm::DbErr> {
    if let Some(profile) = title_profile::Entity::find_by_id(title_id).one(db).await? {
        return Ok(profile);
    }
    title_profile::ActiveModel { title_id: Set(title_id), ..Default::default() }.insert(db).await
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<title_profile::Model>> {
    Ok(Json(ensure_profile(&state.db, id).await?))
}

pub async fn put_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<ProfilePayload>,
) -> ApiResult<Json<serde_json::Value>> {
    let mut model: title_profile::ActiveModel = ensure_profile(&state.db, id).await?.into();
    model.sales_title = Set(payload.sales_title);
    model.synopsis = Set(payload.synopsis);
    model.genres = Set(payload.genres);
    model.keywords = Set(payload.keywords);
    model.format = Set(payload.format);
    model.spoken_language = Set(payload.spoken_language);
    model.dubbed_languages = Set(payload.dubbed_languages);
    model.caption_languages = Set(payload.caption_languages);
    model.origin_country = Set(payload.origin_country);
    model.runtime_minutes = Set(payload.runtime_minutes);
    model.release_date = Set(payload.release_date);
    model.rating_system = Set(payload.rating_system);
    model.rating = Set(payload.rating);
    model.production_company = Set(payload.production_company);
    model.website = Set(payload.website);
    model.update(&state.db).await?;

    Ok(Json(json!({ "ok": true })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sea_orm::{ActiveModelTrait, Set};

    use super::*;
    use crate::{config::Config, storage::MemoryStore};

    async fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            db: crate::db::test_db().await,
            store: Arc::new(MemoryStore::new()),
            config: Arc::new(Config {
                addr: "127.0.0.1:0".parse().unwrap(),
                database_url: String::new(),
                access_code: None,
                s3: None,
            }),
        })
    }

    async fn seed_title(state: &AppState, name: &str) -> i32 {
        title::ActiveModel {
            name: Set(name.to_string()),
            status: Set("incomplete".to_string()),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .unwrap()
        .id
    }

    async fn make_ready(state: &AppState, title_id: i32) {
        crate::entities::artwork::ActiveModel {
            title_id: Set(title_id),
            kind: Set("poster".to_string()),
            storage_key: Set(Some(format!("titles/{title_id}/artworks/poster-1"))),
            status: Set("uploaded".to_string()),
            size_bytes: Set(100),
            content_type: Set(Some("image/jpeg".to_string())),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .unwrap();

        crate::entities::caption::ActiveModel {
            title_id: Set(title_id),
            language: Set("en".to_string()),
            kind: Set("subtitles".to_string()),
            storage_key: Set(Some(format!("titles/{title_id}/captions/en-subtitles-1"))),
            status: Set("uploaded".to_string()),
            size_bytes: Set(10),
            content_type: Set(Some("text/vtt".to_string())),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .unwrap();

        crate::entities::document::ActiveModel {
            title_id: Set(title_id),
            doc_type: Set("chain_of_title".to_string()),
            storage_key: Set(Some(format!("titles/{title_id}/documents/chain_of_title-1"))),
            status: Set("uploaded".to_string()),
            size_bytes: Set(10),
            content_type: Set(Some("application/pdf".to_string())),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .unwrap();

        crate::entities::avail::ActiveModel {
            title_id: Set(title_id),
            license_type: Set("avod".to_string()),
            territories: Set("worldwide".to_string()),
            start_date: Set(None),
            end_date: Set(None),
            exclusive: Set(false),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn list_limits_and_orders_newest_first() {
        let state = test_state().await;
        let a = seed_title(&state, "Alpha").await;
        let b = seed_title(&state, "Beta").await;
        let c = seed_title(&state, "Gamma").await;
        assert!(a < b && b < c);

        let Json(out) = list(
            State(state.clone()),
            Query(TitleListQuery { q: None, status: None, per_page: Some(2) }),
        )
        .await
        .unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, c);
        assert_eq!(out[1].id, b);
    }

    #[tokio::test]
    async fn list_filters_on_computed_status_not_stored() {
        let state = test_state().await;
        let ready_id = seed_title(&state, "Done Deal").await;
        make_ready(&state, ready_id).await;
        seed_title(&state, "Half Baked").await;

        let Json(out) = list(
            State(state.clone()),
            Query(TitleListQuery { q: None, status: Some("ready".to_string()), per_page: None }),
        )
        .await
        .unwrap();

        // Both rows store "incomplete"; only the recomputed status matches.
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, ready_id);
        assert_eq!(out[0].original_status, "incomplete");
        assert_eq!(out[0].computed_status, "ready");
        assert_eq!(out[0].ready_score, 4);
        assert!(out[0].poster_key.is_some());
    }

    #[tokio::test]
    async fn list_matches_on_name_query() {
        let state = test_state().await;
        seed_title(&state, "Winter Light").await;
        seed_title(&state, "Summer Storm").await;

        let Json(out) = list(
            State(state.clone()),
            Query(TitleListQuery { q: Some("winter".to_string()), status: None, per_page: None }),
        )
        .await
        .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Winter Light");
    }
}
