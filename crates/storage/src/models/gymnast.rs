use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One gymnast profile owned by a user account. A user may track several
/// gymnasts; every competition is scoped to exactly one of them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Gymnast {
    pub gymnast_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
}
