use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::entities::update;

pub fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

// Append-only; rows are never updated or deleted.
pub async fn record(
    db: &DatabaseConnection,
    title_id: i32,
    event_type: &str,
    info: Option<&str>,
) -> Result<(), sea_orm::DbErr> {
    update::ActiveModel {
        title_id: Set(title_id),
        event_type: Set(event_type.to_string()),
        info: Set(info.map(str::to_string)),
        created_at: Set(now_sec()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(())
}
