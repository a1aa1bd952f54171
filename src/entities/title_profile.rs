use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "title_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub title_id: i32,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
