use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<i32>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    pub created_at: NaiveDateTime,
}
