use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Movie;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/movies", get(list_movies))
}

// GET /api/movies - все фильмы, новые первыми
async fn list_movies(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let movies = sqlx::query_as::<_, Movie>("SELECT * FROM movies ORDER BY created_at DESC")
        .fetch_all(&state.db.pool)
        .await?;

    Ok(Json(movies))
}
