use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::json;

use crate::{
    AppState,
    assets::{self, LICENSE_TYPES},
    entities::{avail, cast_member, crew_member, festival, license},
    error::{ApiError, ApiResult},
    models::{AvailPayload, CastPayload, CrewPayload, FestivalPayload, LicensePayload},
};

type Done = Json<serde_json::Value>;

fn ok() -> Done {
    Json(json!({ "ok": true }))
}

fn require_name(name: &str) -> ApiResult<String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    Ok(name)
}

// Avails

pub async fn list_avails(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<avail::Model>>> {
    let rows = avail::Entity::find()
        .filter(avail::Column::TitleId.eq(id))
        .order_by_desc(avail::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_avail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<AvailPayload>,
) -> ApiResult<Done> {
    assets::validate_choice("license_type", &payload.license_type, LICENSE_TYPES)?;
    avail::ActiveModel {
        title_id: Set(id),
        license_type: Set(payload.license_type),
        territories: Set(payload.territories),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        exclusive: Set(payload.exclusive),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok(ok())
}

pub async fn update_avail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<AvailPayload>,
) -> ApiResult<Done> {
    assets::validate_choice("license_type", &payload.license_type, LICENSE_TYPES)?;
    let row = avail::Entity::find_by_id(id).one(&state.db).await?.ok_or(ApiError::NotFound)?;
    let mut model: avail::ActiveModel = row.into();
    model.license_type = Set(payload.license_type);
    model.territories = Set(payload.territories);
    model.start_date = Set(payload.start_date);
    model.end_date = Set(payload.end_date);
    model.exclusive = Set(payload.exclusive);
    model.update(&state.db).await?;
    Ok(ok())
}

pub async fn delete_avail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Done> {
    let row = avail::Entity::find_by_id(id).one(&state.db).await?.ok_or(ApiError::NotFound)?;
    row.delete(&state.db).await?;
    Ok(ok())
}

// Cast

pub async fn list_cast(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<cast_member::Model>>> {
    let rows = cast_member::Entity::find()
        .filter(cast_member::Column::TitleId.eq(id))
        .order_by_desc(cast_member::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_cast(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CastPayload>,
) -> ApiResult<Done> {
    let name = require_name(&payload.name)?;
    cast_member::ActiveModel {
        title_id: Set(id),
        name: Set(name),
        role: Set(payload.role),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok(ok())
}

pub async fn update_cast(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CastPayload>,
) -> ApiResult<Done> {
    let name = require_name(&payload.name)?;
    let row =
        cast_member::Entity::find_by_id(id).one(&state.db).await?.ok_or(ApiError::NotFound)?;
    let mut model: cast_member::ActiveModel = row.into();
    model.name = Set(name);
    model.role = Set(payload.role);
    model.update(&state.db).await?;
    Ok(ok())
}

pub async fn delete_cast(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<Done> {
    let row =
        cast_member::Entity::find_by_id(id).one(&state.db).await?.ok_or(ApiError::NotFound)?;
    row.delete(&state.db).await?;
    Ok(ok())
}

// Crew

pub async fn list_crew(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<crew_member::Model>>> {
    let rows = crew_member::Entity::find()
        .filter(crew_member::Column::TitleId.eq(id))
        .order_by_desc(crew_member::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_crew(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CrewPayload>,
) -> ApiResult<Done> {
    let name = require_name(&payload.name)?;
    crew_member::ActiveModel {
        title_id: Set(id),
        name: Set(name),
        department: Set(payload.department),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok(ok())
}

pub async fn update_crew(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CrewPayload>,
) -> ApiResult<Done> {
    let name = require_name(&payload.name)?;
    let row =
        crew_member::Entity::find_by_id(id).one(&state.db).await?.ok_or(ApiError::NotFound)?;
    let mut model: crew_member::ActiveModel = row.into();
    model.name = Set(name);
    model.department = Set(payload.department);
    model.update(&state.db).await?;
    Ok(ok())
}

pub async fn delete_crew(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<Done> {
    let row =
        crew_member::Entity::find_by_id(id).one(&state.db).await?.ok_or(ApiError::NotFound)?;
    row.delete(&state.db).await?;
    Ok(ok())
}

// Festivals

pub async fn list_festivals(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<festival::Model>>> {
    let rows = festival::Entity::find()
        .filter(festival::Column::TitleId.eq(id))
        .order_by_desc(festival::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_festival(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<FestivalPayload>,
) -> ApiResult<Done> {
    let festival_name = require_name(&payload.festival_name)?;
    festival::ActiveModel {
        title_id: Set(id),
        festival_name: Set(festival_name),
        award: Set(payload.award),
        year: Set(payload.year),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok(ok())
}

pub async fn update_festival(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<FestivalPayload>,
) -> ApiResult<Done> {
    let festival_name = require_name(&payload.festival_name)?;
    let row = festival::Entity::find_by_id(id).one(&state.db).await?.ok_or(ApiError::NotFound)?;
    let mut model: festival::ActiveModel = row.into();
    model.festival_name = Set(festival_name);
    model.award = Set(payload.award);
    model.year = Set(payload.year);
    model.update(&state.db).await?;
    Ok(ok())
}

pub async fn delete_festival(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Done> {
    let row = festival::Entity::find_by_id(id).one(&state.db).await?.ok_or(ApiError::NotFound)?;
    row.delete(&state.db).await?;
    Ok(ok())
}

// Licenses

pub async fn list_licenses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<license::Model>>> {
    let rows = license::Entity::find()
        .filter(license::Column::TitleId.eq(id))
        .order_by_desc(license::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_license(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<LicensePayload>,
) -> ApiResult<Done> {
    license::ActiveModel {
        title_id: Set(id),
        channel: Set(payload.channel),
        rights_granted: Set(payload.rights_granted),
        revenue_terms: Set(payload.revenue_terms),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        agreement_url: Set(payload.agreement_url),
        status: Set(payload.status.unwrap_or_else(|| "draft".to_string())),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok(ok())
}

pub async fn update_license(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<LicensePayload>,
) -> ApiResult<Done> {
    let row = license::Entity::find_by_id(id).one(&state.db).await?.ok_or(ApiError::NotFound)?;
    let mut model: license::ActiveModel = row.into();
    model.channel = Set(payload.channel);
    model.rights_granted = Set(payload.rights_granted);
    model.revenue_terms = Set(payload.revenue_terms);
    model.start_date = Set(payload.start_date);
    model.end_date = Set(payload.end_date);
    model.agreement_url = Set(payload.agreement_url);
    // Status only changes when the caller sends one.
    if let Some(status) = payload.status {
        model.status = Set(status);
    }
    model.update(&state.db).await?;
    Ok(ok())
}

pub async fn delete_license(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Done> {
    let row = license::Entity::find_by_id(id).one(&state.db).await?.ok_or(ApiError::NotFound)?;
    row.delete(&state.db).await?;
    Ok(ok())
}
