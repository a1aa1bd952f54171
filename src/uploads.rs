use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
    sea_query::OnConflict,
};

use crate::{
    assets::{
        self, ARTWORK, ARTWORK_KINDS, ASSET_STATUSES, CAPTION, CAPTION_KINDS, DOC_TYPES, DOCUMENT,
    },
    audit,
    entities::{artwork, caption, document},
    error::{ApiError, ApiResult},
    storage::{self, ObjectStore},
};

pub struct IncomingFile {
    pub filename: String,
    pub declared_type: Option<String>,
    pub data: Vec<u8>,
}

fn check_title_id(title_id: i32) -> ApiResult<()> {
    if title_id <= 0 {
        return Err(ApiError::BadRequest("invalid title id".to_string()));
    }
    Ok(())
}

// Best effort: a failed trash relocation must not fail the request that
// triggered it. Primary writes are never swallowed.
async fn trash_old_blob(store: &dyn ObjectStore, key: &str) {
    if let Err(err) = storage::move_to_trash(store, key).await {
        tracing::warn!(%err, key, "failed to move old blob to trash");
    }
}

// Shared write sequence: put the new blob first, trash the old one, then
// upsert. A crash between steps leaves an orphaned blob, never a row pointing
// at nothing.
async fn stage_blob(
    store: &dyn ObjectStore,
    key: &str,
    file: IncomingFile,
    content_type: &str,
    prev_key: Option<&str>,
) -> ApiResult<()> {
    store.put(key, file.data, content_type).await?;
    if let Some(old) = prev_key {
        trash_old_blob(store, old).await;
    }
    Ok(())
}

pub async fn upload_artwork(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    title_id: i32,
    kind: &str,
    file: IncomingFile,
) -> ApiResult<String> {
    check_title_id(title_id)?;
    assets::validate_choice("kind", kind, ARTWORK_KINDS)?;
    let size = file.data.len() as i64;
    let content_type = ARTWORK.validate_upload(&file.filename, file.declared_type.as_deref(), size)?;

    let used = assets::title_usage_bytes(db, title_id).await?;
    let prev = artwork::Entity::find()
        .filter(artwork::Column::TitleId.eq(title_id))
        .filter(artwork::Column::Kind.eq(kind))
        .one(db)
        .await?;
    assets::check_quota(used, prev.as_ref().map(|p| p.size_bytes).unwrap_or(0), size)?;

    let key = assets::object_key(title_id, ARTWORK.path, kind);
    stage_blob(store, &key, file, &content_type, prev.as_ref().and_then(|p| p.storage_key.as_deref()))
        .await?;

    let model = artwork::ActiveModel {
        title_id: Set(title_id),
        kind: Set(kind.to_string()),
        storage_key: Set(Some(key.clone())),
        status: Set("uploaded".to_string()),
        size_bytes: Set(size),
        content_type: Set(Some(content_type)),
        created_at: Set(audit::now_sec()),
        ..Default::default()
    };
    artwork::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([artwork::Column::TitleId, artwork::Column::Kind])
                .update_columns([
                    artwork::Column::StorageKey,
                    artwork::Column::Status,
                    artwork::Column::SizeBytes,
                    artwork::Column::ContentType,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    audit::record(db, title_id, "artwork_uploaded", Some(kind)).await?;
    Ok(key)
}

pub async fn upload_caption(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    title_id: i32,
    language: &str,
    kind: &str,
    file: IncomingFile,
) -> ApiResult<String> {
    check_title_id(title_id)?;
    let language = assets::validate_language(language)?;
    assets::validate_choice("kind", kind, CAPTION_KINDS)?;
    let size = file.data.len() as i64;
    let content_type = CAPTION.validate_upload(&file.filename, file.declared_type.as_deref(), size)?;

    let used = assets::title_usage_bytes(db, title_id).await?;
    let prev = caption::Entity::find()
        .filter(caption::Column::TitleId.eq(title_id))
        .filter(caption::Column::Language.eq(&language))
        .filter(caption::Column::Kind.eq(kind))
        .one(db)
        .await?;
    assets::check_quota(used, prev.as_ref().map(|p| p.size_bytes).unwrap_or(0), size)?;

    let key = assets::object_key(title_id, CAPTION.path, &format!("{language}-{kind}"));
    stage_blob(store, &key, file, &content_type, prev.as_ref().and_then(|p| p.storage_key.as_deref()))
        .await?;

    let model = caption::ActiveModel {
        title_id: Set(title_id),
        language: Set(language.clone()),
        kind: Set(kind.to_string()),
        storage_key: Set(Some(key.clone())),
        status: Set("uploaded".to_string()),
        size_bytes: Set(size),
        content_type: Set(Some(content_type)),
        created_at: Set(audit::now_sec()),
        ..Default::default()
    };
    caption::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([
                caption::Column::TitleId,
                caption::Column::Language,
                caption::Column::Kind,
            ])
            .update_columns([
                caption::Column::StorageKey,
                caption::Column::Status,
                caption::Column::SizeBytes,
                caption::Column::ContentType,
            ])
            .to_owned(),
        )
        .exec(db)
        .await?;

    audit::record(db, title_id, "captions_uploaded", Some(&format!("{language}/{kind}"))).await?;
    Ok(key)
}

pub async fn upload_document(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    title_id: i32,
    doc_type: &str,
    file: IncomingFile,
) -> ApiResult<String> {
    check_title_id(title_id)?;
    assets::validate_choice("doc_type", doc_type, DOC_TYPES)?;
    let size = file.data.len() as i64;
    let content_type =
        DOCUMENT.validate_upload(&file.filename, file.declared_type.as_deref(), size)?;

    let used = assets::title_usage_bytes(db, title_id).await?;
    let prev = document::Entity::find()
        .filter(document::Column::TitleId.eq(title_id))
        .filter(document::Column::DocType.eq(doc_type))
        .one(db)
        .await?;
    assets::check_quota(used, prev.as_ref().map(|p| p.size_bytes).unwrap_or(0), size)?;

    let key = assets::object_key(title_id, DOCUMENT.path, doc_type);
    stage_blob(store, &key, file, &content_type, prev.as_ref().and_then(|p| p.storage_key.as_deref()))
        .await?;

    let model = document::ActiveModel {
        title_id: Set(title_id),
        doc_type: Set(doc_type.to_string()),
        storage_key: Set(Some(key.clone())),
        status: Set("uploaded".to_string()),
        size_bytes: Set(size),
        content_type: Set(Some(content_type)),
        created_at: Set(audit::now_sec()),
        ..Default::default()
    };
    document::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([document::Column::TitleId, document::Column::DocType])
                .update_columns([
                    document::Column::StorageKey,
                    document::Column::Status,
                    document::Column::SizeBytes,
                    document::Column::ContentType,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    audit::record(db, title_id, "documents_uploaded", Some(doc_type)).await?;
    Ok(key)
}

pub async fn delete_artwork(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    id: i32,
) -> ApiResult<()> {
    let row = artwork::Entity::find_by_id(id).one(db).await?.ok_or(ApiError::NotFound)?;
    if let Some(key) = &row.storage_key {
        trash_old_blob(store, key).await;
    }
    let title_id = row.title_id;
    let kind = row.kind.clone();
    row.delete(db).await?;
    audit::record(db, title_id, "artwork_deleted", Some(&kind)).await?;
    Ok(())
}

pub async fn delete_caption(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    id: i32,
) -> ApiResult<()> {
    let row = caption::Entity::find_by_id(id).one(db).await?.ok_or(ApiError::NotFound)?;
    if let Some(key) = &row.storage_key {
        trash_old_blob(store, key).await;
    }
    let title_id = row.title_id;
    let info = format!("{}/{}", row.language, row.kind);
    row.delete(db).await?;
    audit::record(db, title_id, "captions_deleted", Some(&info)).await?;
    Ok(())
}

pub async fn delete_document(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    id: i32,
) -> ApiResult<()> {
    let row = document::Entity::find_by_id(id).one(db).await?.ok_or(ApiError::NotFound)?;
    if let Some(key) = &row.storage_key {
        trash_old_blob(store, key).await;
    }
    let title_id = row.title_id;
    let doc_type = row.doc_type.clone();
    row.delete(db).await?;
    audit::record(db, title_id, "documents_deleted", Some(&doc_type)).await?;
    Ok(())
}

// Any status may move to any other; there is no transition machine.
pub async fn set_artwork_status(
    db: &DatabaseConnection,
    id: i32,
    status: &str,
    notes: Option<&str>,
) -> ApiResult<()> {
    assets::validate_choice("status", status, ASSET_STATUSES)?;
    let row = artwork::Entity::find_by_id(id).one(db).await?.ok_or(ApiError::NotFound)?;
    let title_id = row.title_id;
    let mut model: artwork::ActiveModel = row.into();
    model.status = Set(status.to_string());
    model.update(db).await?;

    let info = match notes {
        Some(notes) => format!("{status}: {notes}"),
        None => status.to_string(),
    };
    audit::record(db, title_id, "artwork_status_changed", Some(&info)).await?;
    Ok(())
}

pub async fn set_document_status(
    db: &DatabaseConnection,
    id: i32,
    status: &str,
    notes: Option<&str>,
) -> ApiResult<()> {
    assets::validate_choice("status", status, ASSET_STATUSES)?;
    let row = document::Entity::find_by_id(id).one(db).await?.ok_or(ApiError::NotFound)?;
    let title_id = row.title_id;
    let mut model: document::ActiveModel = row.into();
    model.status = Set(status.to_string());
    model.update(db).await?;

    let info = match notes {
        Some(notes) => format!("{status}: {notes}"),
        None => status.to_string(),
    };
    audit::record(db, title_id, "document_status_changed", Some(&info)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

    use super::*;
    use crate::{assets::TITLE_QUOTA_BYTES, storage::MemoryStore};

    fn jpeg(len: usize) -> IncomingFile {
        IncomingFile {
            filename: "poster.jpg".to_string(),
            declared_type: Some("image/jpeg".to_string()),
            data: vec![0xab; len],
        }
    }

    #[tokio::test]
    async fn demo_scenario_upload_and_replace() {
        let db = crate::db::test_db().await;
        let store = MemoryStore::new();

        // 1 MiB poster upload
        let key = upload_artwork(&db, &store, 1, "poster", jpeg(1_048_576)).await.unwrap();
        let rows = artwork::Entity::find()
            .filter(artwork::Column::TitleId.eq(1))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, "poster");
        assert_eq!(rows[0].status, "uploaded");
        assert_eq!(rows[0].size_bytes, 1_048_576);
        assert_eq!(rows[0].storage_key.as_deref(), Some(key.as_str()));
        assert_eq!(assets::title_usage_bytes(&db, 1).await.unwrap(), 1_048_576);

        // Replacing keeps the row count at 1 and the usage reflects only the
        // new size (replace nets out the old occupant).
        let key2 = upload_artwork(&db, &store, 1, "poster", jpeg(2_000_000)).await.unwrap();
        assert_ne!(key, key2);
        let rows = artwork::Entity::find()
            .filter(artwork::Column::TitleId.eq(1))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].size_bytes, 2_000_000);
        assert_eq!(assets::title_usage_bytes(&db, 1).await.unwrap(), 2_000_000);

        // The prior blob survives only under the trash namespace.
        assert!(store.get(&key).await.unwrap().is_none());
        assert!(store.get(&format!("trash/{key}")).await.unwrap().is_some());
        assert!(store.get(&key2).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn invalid_kind_writes_nothing() {
        let db = crate::db::test_db().await;
        let store = MemoryStore::new();

        let err = upload_artwork(&db, &store, 1, "thumbnail", jpeg(10)).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidValue { field: "kind", .. }));
        assert_eq!(artwork::Entity::find().count(&db).await.unwrap(), 0);
        assert!(store.get("titles/1/artworks/thumbnail").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn caption_kind_error_lists_allowed_values() {
        let db = crate::db::test_db().await;
        let store = MemoryStore::new();

        let file = IncomingFile {
            filename: "subs.vtt".to_string(),
            declared_type: Some("text/vtt".to_string()),
            data: b"WEBVTT".to_vec(),
        };
        let err = upload_caption(&db, &store, 1, "en", "forced", file).await.unwrap_err();
        match err {
            ApiError::InvalidValue { field, allowed } => {
                assert_eq!(field, "kind");
                assert_eq!(allowed, &["subtitles", "captions", "sdh"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(caption::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn oversized_upload_rejected_before_any_write() {
        let db = crate::db::test_db().await;
        let store = MemoryStore::new();

        let file = IncomingFile {
            filename: "subs.srt".to_string(),
            declared_type: None,
            data: vec![0; 2 * 1024 * 1024 + 1],
        };
        let err = upload_caption(&db, &store, 1, "en", "subtitles", file).await.unwrap_err();
        assert!(matches!(err, ApiError::TooLarge { .. }));
        assert_eq!(caption::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn quota_exceeded_leaves_no_row_and_no_blob() {
        let db = crate::db::test_db().await;
        let store = MemoryStore::new();

        // Fill the title close to quota with a seeded document row.
        use sea_orm::{ActiveModelTrait, Set};
        crate::entities::document::ActiveModel {
            title_id: Set(1),
            doc_type: Set("other".to_string()),
            storage_key: Set(Some("titles/1/documents/other-seed".to_string())),
            status: Set("uploaded".to_string()),
            size_bytes: Set(TITLE_QUOTA_BYTES - 100),
            content_type: Set(Some("application/pdf".to_string())),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let file = IncomingFile {
            filename: "contract.pdf".to_string(),
            declared_type: None,
            data: vec![0; 200],
        };
        let err = upload_document(&db, &store, 1, "chain_of_title", file).await.unwrap_err();
        match err {
            ApiError::QuotaExceeded { used_bytes, quota_bytes, remaining_bytes } => {
                assert_eq!(used_bytes, TITLE_QUOTA_BYTES - 100);
                assert_eq!(quota_bytes, TITLE_QUOTA_BYTES);
                assert_eq!(remaining_bytes, 100);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(document::Entity::find().count(&db).await.unwrap(), 1);

        // Exactly at the boundary is accepted.
        let file = IncomingFile {
            filename: "contract.pdf".to_string(),
            declared_type: None,
            data: vec![0; 100],
        };
        upload_document(&db, &store, 1, "chain_of_title", file).await.unwrap();
        assert_eq!(
            assets::title_usage_bytes(&db, 1).await.unwrap(),
            TITLE_QUOTA_BYTES
        );
    }

    #[tokio::test]
    async fn replacement_can_shrink_a_full_title() {
        let db = crate::db::test_db().await;
        let store = MemoryStore::new();

        upload_artwork(&db, &store, 1, "poster", jpeg(5000)).await.unwrap();

        use sea_orm::{ActiveModelTrait, Set};
        crate::entities::document::ActiveModel {
            title_id: Set(1),
            doc_type: Set("other".to_string()),
            storage_key: Set(Some("titles/1/documents/other-seed".to_string())),
            status: Set("uploaded".to_string()),
            size_bytes: Set(TITLE_QUOTA_BYTES - 5000),
            content_type: Set(Some("application/pdf".to_string())),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        // Title is at quota; a same-size poster replacement still goes through.
        upload_artwork(&db, &store, 1, "poster", jpeg(5000)).await.unwrap();
        // One byte more does not.
        let err = upload_artwork(&db, &store, 1, "poster", jpeg(5001)).await.unwrap_err();
        assert!(matches!(err, ApiError::QuotaExceeded { .. }));
    }

    #[tokio::test]
    async fn delete_missing_asset_is_not_found() {
        let db = crate::db::test_db().await;
        let store = MemoryStore::new();

        let err = delete_artwork(&db, &store, 42).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        let err = delete_caption(&db, &store, 42).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        let err = delete_document(&db, &store, 42).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn delete_trashes_blob_and_removes_row() {
        let db = crate::db::test_db().await;
        let store = MemoryStore::new();

        let key = upload_artwork(&db, &store, 1, "banner", jpeg(100)).await.unwrap();
        let row = artwork::Entity::find().one(&db).await.unwrap().unwrap();

        delete_artwork(&db, &store, row.id).await.unwrap();
        assert_eq!(artwork::Entity::find().count(&db).await.unwrap(), 0);
        assert!(store.get(&key).await.unwrap().is_none());
        assert!(store.get(&format!("trash/{key}")).await.unwrap().is_some());
        assert_eq!(assets::title_usage_bytes(&db, 1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn status_updates_validate_the_enumeration() {
        let db = crate::db::test_db().await;
        let store = MemoryStore::new();

        upload_artwork(&db, &store, 1, "poster", jpeg(100)).await.unwrap();
        let row = artwork::Entity::find().one(&db).await.unwrap().unwrap();

        set_artwork_status(&db, row.id, "approved", Some("looks good")).await.unwrap();
        let row = artwork::Entity::find_by_id(row.id).one(&db).await.unwrap().unwrap();
        assert_eq!(row.status, "approved");

        // Open set: approved can go straight back to rejected.
        set_artwork_status(&db, row.id, "rejected", None).await.unwrap();

        let err = set_artwork_status(&db, row.id, "archived", None).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidValue { field: "status", .. }));

        let err = set_document_status(&db, 99, "approved", None).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn uploads_append_event_log_rows() {
        let db = crate::db::test_db().await;
        let store = MemoryStore::new();

        upload_artwork(&db, &store, 1, "poster", jpeg(100)).await.unwrap();
        let file = IncomingFile {
            filename: "subs.vtt".to_string(),
            declared_type: None,
            data: b"WEBVTT".to_vec(),
        };
        upload_caption(&db, &store, 1, "EN", "subtitles", file).await.unwrap();

        let events = crate::entities::update::Entity::find().all(&db).await.unwrap();
        let kinds: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(kinds, vec!["artwork_uploaded", "captions_uploaded"]);
        assert_eq!(events[1].info.as_deref(), Some("en/subtitles"));
    }
}
