use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/shows", get(list_shows))
}

#[derive(Debug, Deserialize)]
pub struct ShowsQuery {
    pub movie_id: Option<i64>,
}

// Плоская строка из join по shows/screens/theaters
#[derive(Debug, FromRow)]
struct ShowRow {
    id: i64,
    movie_id: i64,
    screen_id: i64,
    show_time: NaiveDateTime,
    price: f64,
    available_seats: i32,
    screen_name: String,
    total_seats: i32,
    theater_id: i64,
    theater_name: String,
    location: String,
}

// Ответ вложенный: show -> screen -> theater, чтобы клиенту
// не пришлось делать дополнительные запросы
#[derive(Debug, Serialize)]
pub struct ShowResponse {
    pub id: i64,
    pub movie_id: i64,
    pub show_time: NaiveDateTime,
    pub price: f64,
    pub available_seats: i32,
    pub screen: ScreenResponse,
}

#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub id: i64,
    pub name: String,
    pub total_seats: i32,
    pub theater: TheaterResponse,
}

#[derive(Debug, Serialize)]
pub struct TheaterResponse {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl From<ShowRow> for ShowResponse {
    fn from(row: ShowRow) -> Self {
        ShowResponse {
            id: row.id,
            movie_id: row.movie_id,
            show_time: row.show_time,
            price: row.price,
            available_seats: row.available_seats,
            screen: ScreenResponse {
                id: row.screen_id,
                name: row.screen_name,
                total_seats: row.total_seats,
                theater: TheaterResponse {
                    id: row.theater_id,
                    name: row.theater_name,
                    location: row.location,
                },
            },
        }
    }
}

// GET /api/shows?movie_id=
async fn list_shows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ShowsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let movie_id = params
        .movie_id
        .ok_or_else(|| ApiError::Validation("movie_id required".to_string()))?;

    let rows = sqlx::query_as::<_, ShowRow>(
        r#"
        SELECT
            s.id, s.movie_id, s.screen_id, s.show_time,
            s.price, s.available_seats,
            sc.name as screen_name, sc.total_seats,
            t.id as theater_id, t.name as theater_name, t.location
        FROM shows s
        JOIN screens sc ON s.screen_id = sc.id
        JOIN theaters t ON sc.theater_id = t.id
        WHERE s.movie_id = $1
        ORDER BY s.show_time ASC
        "#,
    )
    .bind(movie_id)
    .fetch_all(&state.db.pool)
    .await?;

    // Фильм без сеансов - это пустой список, а не 404
    let shows: Vec<ShowResponse> = rows.into_iter().map(ShowResponse::from).collect();

    Ok(Json(shows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_json_nests_screen_and_theater() {
        let row = ShowRow {
            id: 1,
            movie_id: 2,
            screen_id: 3,
            show_time: NaiveDateTime::parse_from_str("2026-08-26 14:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            price: 12.5,
            available_seats: 100,
            screen_name: "Screen A".into(),
            total_seats: 100,
            theater_id: 4,
            theater_name: "Cinema Plaza".into(),
            location: "Downtown".into(),
        };

        let v = serde_json::to_value(ShowResponse::from(row)).unwrap();
        assert_eq!(v["id"], 1);
        assert_eq!(v["movie_id"], 2);
        assert_eq!(v["price"], 12.5);
        assert_eq!(v["screen"]["id"], 3);
        assert_eq!(v["screen"]["name"], "Screen A");
        assert_eq!(v["screen"]["theater"]["id"], 4);
        assert_eq!(v["screen"]["theater"]["location"], "Downtown");
        // screen_id не дублируется на верхнем уровне
        assert!(v.get("screen_id").is_none());
    }
}
