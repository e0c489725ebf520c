use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One apparatus result within a competition. At most one row exists per
/// (competition_id, apparatus) pair; the unique index backs the importer's
/// upsert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Score {
    pub score_id: Uuid,
    pub competition_id: Uuid,
    pub apparatus: String,
    pub value: Option<Decimal>,
    pub place: Option<i32>,
    pub start_value: Option<Decimal>,
}
