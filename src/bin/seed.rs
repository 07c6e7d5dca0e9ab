// Заполнение каталога тестовыми данными: театры, залы, фильмы,
// сеансы и посадочные места. Повторный запуск ничего не делает.

use chrono::{Duration, Local};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_booking::{config::Config, database::Database};

const MOVIES: &[(&str, &str, &str, i32, f64)] = &[
    (
        "The Matrix",
        "A computer hacker learns about the true nature of reality.",
        "Sci-Fi",
        136,
        8.7,
    ),
    (
        "Inception",
        "A skilled thief leads a team to plant an idea in someone's mind.",
        "Sci-Fi",
        148,
        8.8,
    ),
    (
        "The Dark Knight",
        "When Batman faces a criminal mastermind, chaos ensues.",
        "Action",
        152,
        9.0,
    ),
    (
        "Interstellar",
        "A team of astronauts travel to a distant galaxy to ensure human survival.",
        "Sci-Fi",
        169,
        8.6,
    ),
    (
        "Pulp Fiction",
        "Multiple interconnected stories of Los Angeles mobsters.",
        "Drama",
        154,
        8.9,
    ),
];

const POSTER_URL: &str = "https://images.pexels.com/photos/7974/pexels-photo.jpg";

// Места нумеруются рядами по 10: A1..A10, B1..B10, ...
fn seat_label(index: i32) -> String {
    let row = char::from(b'A' + ((index - 1) / 10) as u8);
    let number = (index - 1) % 10 + 1;
    format!("{}{}", row, number)
}

#[tokio::main]
async fn main() -> Result<(), sqlx::Error> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = Database::new(&config.database.url(), config.database.pool_size)
        .await
        .expect("Failed to connect to database");
    db.run_migrations().await.expect("Failed to run migrations");

    let movie_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies")
        .fetch_one(&db.pool)
        .await?;
    if movie_count > 0 {
        info!("Database already seeded");
        return Ok(());
    }

    let mut tx = db.pool.begin().await?;

    let theater_ids = sqlx::query_scalar::<_, i64>(
        "INSERT INTO theaters (name, location) VALUES
         ('Cinema Plaza', 'Downtown'),
         ('Mega Screen', 'Mall Center')
         RETURNING id",
    )
    .fetch_all(&mut *tx)
    .await?;

    let screen_ids = sqlx::query_scalar::<_, i64>(
        "INSERT INTO screens (theater_id, name, total_seats) VALUES
         ($1, 'Screen A', 100),
         ($2, 'Screen B', 80)
         RETURNING id",
    )
    .bind(theater_ids[0])
    .bind(theater_ids[1])
    .fetch_all(&mut *tx)
    .await?;

    let mut movie_ids = Vec::with_capacity(MOVIES.len());
    for (title, description, genre, duration, rating) in MOVIES {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO movies (title, description, genre, duration, rating, poster_url)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(title)
        .bind(description)
        .bind(genre)
        .bind(duration)
        .bind(rating)
        .bind(POSTER_URL)
        .fetch_one(&mut *tx)
        .await?;
        movie_ids.push(id);
    }

    // По три временных слота на каждый из первых трех фильмов,
    // каждый слот идет на оба зала с разной ценой
    let now = Local::now().naive_local();
    let mut show_ids = Vec::new();
    for movie_id in &movie_ids[..3] {
        for i in 0..3i64 {
            let show_time = now + Duration::days(i) + Duration::hours(14 + (i % 2) * 6);
            for (screen_id, price, available) in
                [(screen_ids[0], 12.50, 100), (screen_ids[1], 10.00, 80)]
            {
                let id = sqlx::query_scalar::<_, i64>(
                    "INSERT INTO shows (movie_id, screen_id, show_time, price, available_seats)
                     VALUES ($1, $2, $3, $4, $5) RETURNING id",
                )
                .bind(movie_id)
                .bind(screen_id)
                .bind(show_time)
                .bind(price)
                .bind(available)
                .fetch_one(&mut *tx)
                .await?;
                show_ids.push(id);
            }
        }
    }

    for show_id in &show_ids {
        let total_seats = sqlx::query_scalar::<_, i32>(
            "SELECT s.total_seats FROM screens s
             JOIN shows sh ON s.id = sh.screen_id WHERE sh.id = $1",
        )
        .bind(show_id)
        .fetch_one(&mut *tx)
        .await?;

        for i in 1..=total_seats {
            sqlx::query("INSERT INTO seats (show_id, seat_number) VALUES ($1, $2)")
                .bind(show_id)
                .bind(seat_label(i))
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;

    info!(
        "Database seeded: {} movies, {} shows",
        movie_ids.len(),
        show_ids.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::seat_label;

    #[test]
    fn seat_labels_follow_row_grid() {
        assert_eq!(seat_label(1), "A1");
        assert_eq!(seat_label(10), "A10");
        assert_eq!(seat_label(11), "B1");
        assert_eq!(seat_label(25), "C5");
        assert_eq!(seat_label(100), "J10");
    }
}
