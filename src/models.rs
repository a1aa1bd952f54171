use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateTitle {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TitleSummary {
    pub id: i32,
    pub name: String,
    pub original_status: String,
    pub created_at: i64,
    pub poster_key: Option<String>,
    pub ready_score: u8,
    pub computed_status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub title_id: i32,
    pub used_bytes: i64,
    pub quota_bytes: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfilePayload {
    pub sales_title: Option<String>,
    pub synopsis: Option<String>,
    pub genres: Option<String>,
    pub keywords: Option<String>,
    pub format: Option<String>,
    pub spoken_language: Option<String>,
    pub dubbed_languages: Option<String>,
    pub caption_languages: Option<String>,
    pub origin_country: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub release_date: Option<String>,
    pub rating_system: Option<String>,
    pub rating: Option<String>,
    pub production_company: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvailPayload {
    pub license_type: String,
    pub territories: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub exclusive: bool,
}

#[derive(Debug, Deserialize)]
pub struct CastPayload {
    pub name: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CrewPayload {
    pub name: String,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FestivalPayload {
    pub festival_name: String,
    pub award: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LicensePayload {
    pub channel: Option<String>,
    pub rights_granted: Option<String>,
    pub revenue_terms: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub agreement_url: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatesQuery {
    pub per_page: Option<u32>,
    pub title_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct UpdateRow {
    pub id: i32,
    pub title_id: i32,
    pub event_type: String,
    pub info: Option<String>,
    pub created_at: i64,
    pub title_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub code: String,
}
