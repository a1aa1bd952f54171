use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::entities::{artwork, avail, caption, document};

// A title is deliverable once all four elements are present. Computed on
// demand; the stored titles.status column is display-only and never trusted
// for filtering.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Readiness {
    pub poster: bool,
    pub english_subtitles: bool,
    pub chain_of_title: bool,
    pub avail: bool,
}

impl Readiness {
    pub fn score(&self) -> u8 {
        [self.poster, self.english_subtitles, self.chain_of_title, self.avail]
            .iter()
            .filter(|b| **b)
            .count() as u8
    }

    pub fn is_ready(&self) -> bool {
        self.score() == 4
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_ready() { "ready" } else { "incomplete" }
    }
}

pub async fn for_title(
    db: &DatabaseConnection,
    title_id: i32,
) -> Result<Readiness, sea_orm::DbErr> {
    let poster = artwork::Entity::find()
        .filter(artwork::Column::TitleId.eq(title_id))
        .filter(artwork::Column::Kind.eq("poster"))
        .filter(artwork::Column::Status.ne("missing"))
        .filter(artwork::Column::StorageKey.is_not_null())
        .one(db)
        .await?
        .is_some();

    let english_subtitles = caption::Entity::find()
        .filter(caption::Column::TitleId.eq(title_id))
        .filter(caption::Column::Language.eq("en"))
        .filter(caption::Column::Kind.eq("subtitles"))
        .filter(caption::Column::Status.ne("missing"))
        .filter(caption::Column::StorageKey.is_not_null())
        .one(db)
        .await?
        .is_some();

    let chain_of_title = document::Entity::find()
        .filter(document::Column::TitleId.eq(title_id))
        .filter(document::Column::DocType.eq("chain_of_title"))
        .filter(document::Column::Status.ne("missing"))
        .filter(document::Column::StorageKey.is_not_null())
        .one(db)
        .await?
        .is_some();

    let avail = avail::Entity::find()
        .filter(avail::Column::TitleId.eq(title_id))
        .one(db)
        .await?
        .is_some();

    Ok(Readiness { poster, english_subtitles, chain_of_title, avail })
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};

    use super::*;

    async fn seed_ready_title(db: &DatabaseConnection) -> i32 {
        let title = crate::entities::title::ActiveModel {
            name: Set("Demo".to_string()),
            status: Set("incomplete".to_string()),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        crate::entities::artwork::ActiveModel {
            title_id: Set(title.id),
            kind: Set("poster".to_string()),
            storage_key: Set(Some("titles/1/artworks/poster-1".to_string())),
            status: Set("uploaded".to_string()),
            size_bytes: Set(100),
            content_type: Set(Some("image/jpeg".to_string())),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        crate::entities::caption::ActiveModel {
            title_id: Set(title.id),
            language: Set("en".to_string()),
            kind: Set("subtitles".to_string()),
            storage_key: Set(Some("titles/1/captions/en-subtitles-1".to_string())),
            status: Set("uploaded".to_string()),
            size_bytes: Set(10),
            content_type: Set(Some("text/vtt".to_string())),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        crate::entities::document::ActiveModel {
            title_id: Set(title.id),
            doc_type: Set("chain_of_title".to_string()),
            storage_key: Set(Some("titles/1/documents/chain_of_title-1".to_string())),
            status: Set("uploaded".to_string()),
            size_bytes: Set(10),
            content_type: Set(Some("application/pdf".to_string())),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        crate::entities::avail::ActiveModel {
            title_id: Set(title.id),
            license_type: Set("avod".to_string()),
            territories: Set("worldwide".to_string()),
            start_date: Set(Some("2025-01-01".to_string())),
            end_date: Set(None),
            exclusive: Set(false),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        title.id
    }

    #[tokio::test]
    async fn ready_requires_all_four_elements() {
        let db = crate::db::test_db().await;
        let id = seed_ready_title(&db).await;

        let r = for_title(&db, id).await.unwrap();
        assert!(r.is_ready());
        assert_eq!(r.score(), 4);
        assert_eq!(r.status_label(), "ready");
    }

    #[tokio::test]
    async fn removing_any_element_flips_readiness() {
        let db = crate::db::test_db().await;
        let id = seed_ready_title(&db).await;

        let poster = crate::entities::artwork::Entity::find().one(&db).await.unwrap().unwrap();
        poster.delete(&db).await.unwrap();
        let r = for_title(&db, id).await.unwrap();
        assert!(!r.is_ready());
        assert_eq!(r.score(), 3);
        assert_eq!(r.status_label(), "incomplete");
    }

    #[tokio::test]
    async fn non_poster_artwork_does_not_count() {
        let db = crate::db::test_db().await;
        let id = seed_ready_title(&db).await;

        let poster = crate::entities::artwork::Entity::find().one(&db).await.unwrap().unwrap();
        let mut m: crate::entities::artwork::ActiveModel = poster.into();
        m.kind = Set("banner".to_string());
        m.update(&db).await.unwrap();

        assert!(!for_title(&db, id).await.unwrap().poster);
    }

    #[tokio::test]
    async fn missing_status_does_not_count() {
        let db = crate::db::test_db().await;
        let id = seed_ready_title(&db).await;

        let doc = crate::entities::document::Entity::find().one(&db).await.unwrap().unwrap();
        let mut m: crate::entities::document::ActiveModel = doc.into();
        m.status = Set("missing".to_string());
        m.update(&db).await.unwrap();

        assert!(!for_title(&db, id).await.unwrap().chain_of_title);
    }

    #[tokio::test]
    async fn non_english_subtitles_do_not_count() {
        let db = crate::db::test_db().await;
        let id = seed_ready_title(&db).await;

        let cap = crate::entities::caption::Entity::find().one(&db).await.unwrap().unwrap();
        let mut m: crate::entities::caption::ActiveModel = cap.into();
        m.language = Set("fr".to_string());
        m.update(&db).await.unwrap();

        assert!(!for_title(&db, id).await.unwrap().english_subtitles);
    }
}
