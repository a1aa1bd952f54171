use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};

use crate::{
    entities::{artwork, caption, document},
    error::{ApiError, ApiResult},
};

pub const TITLE_QUOTA_BYTES: i64 = 200 * 1024 * 1024;

pub const ARTWORK_KINDS: &[&str] = &["poster", "landscape_16_9", "portrait_2_3", "banner"];
pub const CAPTION_KINDS: &[&str] = &["subtitles", "captions", "sdh"];
pub const DOC_TYPES: &[&str] = &[
    "chain_of_title",
    "certificate_of_origin",
    "copyright_report",
    "title_report",
    "eando_insurance",
    "music_cue_sheet",
    "music_license",
    "dialogue_list",
    "combined_continuity",
    "qc_report",
    "distribution_agreement",
    "talent_agreement",
    "tax_form",
    "press_kit",
    "delivery_schedule",
    "closed_caption_certificate",
    "other",
];
pub const ASSET_STATUSES: &[&str] = &["uploaded", "approved", "rejected"];
pub const LICENSE_TYPES: &[&str] = &["avod", "svod", "tvod"];

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub struct AssetClass {
    pub name: &'static str,
    pub path: &'static str,
    pub max_bytes: i64,
    pub allowed_content_types: &'static [&'static str],
    pub allowed_extensions: &'static [&'static str],
}

pub const ARTWORK: AssetClass = AssetClass {
    name: "artwork",
    path: "artworks",
    max_bytes: 10 * 1024 * 1024,
    allowed_content_types: &["image/jpeg", "image/png", "image/webp"],
    allowed_extensions: &[],
};

pub const CAPTION: AssetClass = AssetClass {
    name: "caption",
    path: "captions",
    max_bytes: 2 * 1024 * 1024,
    allowed_content_types: &["text/vtt", "text/plain"],
    allowed_extensions: &["vtt", "srt"],
};

pub const DOCUMENT: AssetClass = AssetClass {
    name: "document",
    path: "documents",
    max_bytes: 20 * 1024 * 1024,
    allowed_content_types: &["application/pdf", DOCX_MIME],
    allowed_extensions: &[],
};

// Extension wins over the declared MIME type so that e.g. an .srt sent as
// application/octet-stream still lands as text/plain.
pub fn content_type_for(filename: &str, declared: Option<&str>) -> String {
    let ext = filename.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" => "image/png".to_string(),
        "webp" => "image/webp".to_string(),
        "pdf" => "application/pdf".to_string(),
        "docx" => DOCX_MIME.to_string(),
        "srt" => "text/plain".to_string(),
        "vtt" => "text/vtt".to_string(),
        _ => declared.unwrap_or("application/octet-stream").to_string(),
    }
}

pub fn validate_choice(
    field: &'static str,
    value: &str,
    allowed: &'static [&'static str],
) -> ApiResult<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ApiError::InvalidValue { field, allowed })
    }
}

pub fn validate_language(language: &str) -> ApiResult<String> {
    let language = language.trim().to_ascii_lowercase();
    let valid = (2..=16).contains(&language.len())
        && language.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(language)
    } else {
        Err(ApiError::BadRequest("invalid language".to_string()))
    }
}

impl AssetClass {
    // Size first, then content type, matching the handler contract.
    pub fn validate_upload(
        &self,
        filename: &str,
        declared: Option<&str>,
        size: i64,
    ) -> ApiResult<String> {
        if size > self.max_bytes {
            return Err(ApiError::TooLarge { class: self.name, max_bytes: self.max_bytes });
        }

        if !self.allowed_extensions.is_empty() {
            let ext = filename.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
            if !self.allowed_extensions.contains(&ext.as_str()) {
                return Err(ApiError::UnsupportedType {
                    class: self.name,
                    content_type: format!(".{ext}"),
                    allowed: self.allowed_extensions,
                });
            }
        }

        let content_type = content_type_for(filename, declared);
        if !self.allowed_content_types.contains(&content_type.as_str()) {
            return Err(ApiError::UnsupportedType {
                class: self.name,
                content_type,
                allowed: self.allowed_content_types,
            });
        }

        Ok(content_type)
    }
}

// Replacement nets out the previous occupant before adding the new file, so
// used_bytes stays a live total across repeated replacements.
pub fn check_quota(used: i64, prev_size: i64, incoming: i64) -> ApiResult<()> {
    let committed = used.saturating_sub(prev_size);
    if committed + incoming > TITLE_QUOTA_BYTES {
        return Err(ApiError::QuotaExceeded {
            used_bytes: used,
            quota_bytes: TITLE_QUOTA_BYTES,
            remaining_bytes: (TITLE_QUOTA_BYTES - committed).max(0),
        });
    }
    Ok(())
}

pub fn object_key(title_id: i32, class_path: &str, slug: &str) -> String {
    let millis = jiff::Timestamp::now().as_millisecond();
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    format!("titles/{title_id}/{class_path}/{slug}-{millis}-{}", &nonce[..8])
}

// Live aggregate across all three asset tables; never stored.
pub async fn title_usage_bytes(
    db: &DatabaseConnection,
    title_id: i32,
) -> Result<i64, sea_orm::DbErr> {
    let artworks: Option<Option<i64>> = artwork::Entity::find()
        .select_only()
        .column_as(artwork::Column::SizeBytes.sum(), "total")
        .filter(artwork::Column::TitleId.eq(title_id))
        .into_tuple()
        .one(db)
        .await?;

    let captions: Option<Option<i64>> = caption::Entity::find()
        .select_only()
        .column_as(caption::Column::SizeBytes.sum(), "total")
        .filter(caption::Column::TitleId.eq(title_id))
        .into_tuple()
        .one(db)
        .await?;

    let documents: Option<Option<i64>> = document::Entity::find()
        .select_only()
        .column_as(document::Column::SizeBytes.sum(), "total")
        .filter(document::Column::TitleId.eq(title_id))
        .into_tuple()
        .one(db)
        .await?;

    Ok(artworks.flatten().unwrap_or(0)
        + captions.flatten().unwrap_or(0)
        + documents.flatten().unwrap_or(0))
}
