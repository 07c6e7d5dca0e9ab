use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Booking;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/bookings", post(create_booking))
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub show_id: Option<i64>,
    #[serde(default)]
    pub seat_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub id: i64,
    pub show_id: i64,
    pub total_price: f64,
    pub seat_ids: Vec<i64>,
}

fn total_price(price: f64, seat_count: usize) -> f64 {
    price * seat_count as f64
}

// POST /api/bookings
//
// Все записи идут в одной транзакции; каждое место захватывается
// условным UPDATE, занятое место откатывает всю бронь с 409.
async fn create_booking(
    State(state): State<Arc<AppState>>,
    user: crate::middleware::AuthUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let show_id = match req.show_id {
        Some(id) if id > 0 && !req.seat_ids.is_empty() => id,
        _ => {
            return Err(ApiError::Validation(
                "show_id and seat_ids required".to_string(),
            ))
        }
    };

    // 1. Цена сеанса; отсутствие сеанса - 404 до каких-либо записей
    let price = sqlx::query_scalar::<_, f64>("SELECT price FROM shows WHERE id = $1")
        .bind(show_id)
        .fetch_optional(&state.db.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Show not found".to_string()))?;

    let total = total_price(price, req.seat_ids.len());

    // Начинаем транзакцию
    let mut tx = state.db.pool.begin().await?;

    // 2. Строка брони
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (user_id, show_id, total_price)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, show_id, total_price, booking_date
        "#,
    )
    .bind(user.user_id)
    .bind(show_id)
    .bind(total)
    .fetch_one(&mut *tx)
    .await?;

    // 3. Захват мест: свободное -> занятое, ноль затронутых строк
    //    значит место уже занято или не существует
    for seat_id in &req.seat_ids {
        let claimed = sqlx::query(
            "UPDATE seats SET is_booked = TRUE WHERE id = $1 AND show_id = $2 AND is_booked = FALSE",
        )
        .bind(seat_id)
        .bind(show_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if claimed == 0 {
            tx.rollback().await?;
            return Err(ApiError::SeatTaken(format!(
                "Seat {} is not available",
                seat_id
            )));
        }

        sqlx::query("INSERT INTO booking_seats (booking_id, seat_id) VALUES ($1, $2)")
            .bind(booking.id)
            .bind(seat_id)
            .execute(&mut *tx)
            .await?;
    }

    // 4. Списываем инвентарь сеанса
    sqlx::query("UPDATE shows SET available_seats = available_seats - $1 WHERE id = $2")
        .bind(req.seat_ids.len() as i32)
        .bind(show_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        "booking {} created: user {} show {} seats {:?}",
        booking.id,
        user.user_id,
        show_id,
        req.seat_ids
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            id: booking.id,
            show_id: booking.show_id,
            total_price: booking.total_price,
            seat_ids: req.seat_ids,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_price_times_seat_count() {
        assert_eq!(total_price(12.50, 2), 25.00);
        assert_eq!(total_price(10.00, 3), 30.00);
        assert_eq!(total_price(12.50, 1), 12.50);
    }

    #[test]
    fn booking_response_shape() {
        let resp = CreateBookingResponse {
            id: 1,
            show_id: 5,
            total_price: 25.0,
            seat_ids: vec![1, 2],
        };
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["id"], 1);
        assert_eq!(v["show_id"], 5);
        assert_eq!(v["total_price"], 25.0);
        assert_eq!(v["seat_ids"], serde_json::json!([1, 2]));
    }

    #[test]
    fn request_defaults_empty_seat_ids() {
        let req: CreateBookingRequest = serde_json::from_str(r#"{"show_id": 5}"#).unwrap();
        assert_eq!(req.show_id, Some(5));
        assert!(req.seat_ids.is_empty());
    }
}
