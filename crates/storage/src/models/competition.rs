use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One meet attended by a gymnast. Dates are optional: imports keep going
/// when the upstream date string cannot be parsed, and the row stays
/// editable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Competition {
    pub competition_id: Uuid,
    pub user_id: Uuid,
    pub gymnast_id: Uuid,
    pub name: String,
    pub level: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub all_around_place: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
}
