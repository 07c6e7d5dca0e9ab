use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Seat;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/seats/{show_id}", get(list_seats))
}

// GET /api/seats/{show_id}
// seat_number - строка, сортировка лексическая: "A10" < "A2" < "B1"
async fn list_seats(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let seats =
        sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE show_id = $1 ORDER BY seat_number")
            .bind(show_id)
            .fetch_all(&state.db.pool)
            .await?;

    // Несуществующий сеанс - пустой список, как в остальных read-эндпоинтах
    Ok(Json(seats))
}

#[cfg(test)]
mod tests {
    // ORDER BY seat_number на VARCHAR дает лексический порядок;
    // фиксируем ожидание на стороне Rust тем же компаратором
    #[test]
    fn seat_labels_sort_lexically() {
        let mut labels = vec!["B1", "A2", "A10", "A1"];
        labels.sort();
        assert_eq!(labels, vec!["A1", "A10", "A2", "B1"]);
    }
}
