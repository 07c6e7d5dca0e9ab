pub mod auth;
pub mod bookings;
pub mod health;
pub mod movies;
pub mod seats;
pub mod shows;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(auth::routes())
        .merge(movies::routes())
        .merge(shows::routes())
        .merge(seats::routes())
        .merge(bookings::routes())
        .merge(health::routes())
}
