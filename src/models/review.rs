use sqlx::{FromRow, PgPool};
use tracing::Instrument;

pub const DEFAULT_STARS: i32 = 3;
pub const MIN_STARS: i32 = 1;
pub const MAX_STARS: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Review {
    pub id: i64,
    pub text: String,
    pub stars: i32,
    pub movie_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub text: String,
    pub stars: i32,
    pub movie_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewChanges {
    pub text: Option<String>,
    pub stars: Option<i32>,
    pub movie_id: Option<i64>,
}

impl From<NewReview> for ReviewChanges {
    fn from(review: NewReview) -> Self {
        ReviewChanges {
            text: Some(review.text),
            stars: Some(review.stars),
            movie_id: Some(review.movie_id),
        }
    }
}

const SELECT_REVIEWS: &str = "SELECT id, text, stars, movie_id FROM review";

pub async fn list_reviews(pool: &PgPool) -> Result<Vec<Review>, sqlx::Error> {
    let query_span = tracing::info_span!("Listing reviews");
    sqlx::query_as::<_, Review>(&format!("{} ORDER BY id", SELECT_REVIEWS))
        .fetch_all(pool)
        .instrument(query_span)
        .await
}

pub async fn list_reviews_for_movies(
    pool: &PgPool,
    movie_ids: &[i64],
) -> Result<Vec<Review>, sqlx::Error> {
    let query_span = tracing::info_span!("Listing reviews of movies", count = movie_ids.len());
    sqlx::query_as::<_, Review>(&format!(
        "{} WHERE movie_id = ANY($1) ORDER BY id",
        SELECT_REVIEWS
    ))
    .bind(movie_ids)
    .fetch_all(pool)
    .instrument(query_span)
    .await
}

pub async fn find_review(pool: &PgPool, id: i64) -> Result<Option<Review>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching review", %id);
    sqlx::query_as::<_, Review>(&format!("{} WHERE id = $1", SELECT_REVIEWS))
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
}

pub async fn review_exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let query_span = tracing::info_span!("Checking review", %id);
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM review WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .instrument(query_span)
        .await
}

pub async fn insert_review(pool: &PgPool, review: &NewReview) -> Result<Review, sqlx::Error> {
    let query_span = tracing::info_span!("Saving new review", ?review);
    sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO review (text, stars, movie_id)
        VALUES ($1, $2, $3)
        RETURNING id, text, stars, movie_id
        "#,
    )
    .bind(&review.text)
    .bind(review.stars)
    .bind(review.movie_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
}

pub async fn update_review(
    pool: &PgPool,
    id: i64,
    changes: &ReviewChanges,
) -> Result<Option<Review>, sqlx::Error> {
    let query_span = tracing::info_span!("Updating review", %id, ?changes);
    sqlx::query_as::<_, Review>(
        r#"
        UPDATE review SET
            text = COALESCE($1, text),
            stars = COALESCE($2, stars),
            movie_id = COALESCE($3, movie_id)
        WHERE id = $4
        RETURNING id, text, stars, movie_id
        "#,
    )
    .bind(changes.text.as_deref())
    .bind(changes.stars)
    .bind(changes.movie_id)
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

pub async fn delete_review(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let query_span = tracing::info_span!("Deleting review", %id);
    let result = sqlx::query("DELETE FROM review WHERE id = $1")
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await?;
    Ok(result.rows_affected())
}
