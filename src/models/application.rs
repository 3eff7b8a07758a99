use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i64,
    pub written_username: String,
    pub written_phone: String,
    pub written_cover_letter: String,
    pub vacancy_id: Option<i64>,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub written_username: String,
    pub written_phone: String,
    pub written_cover_letter: String,
    pub vacancy_id: i64,
    pub user_id: Option<i64>,
}
