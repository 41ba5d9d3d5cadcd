use actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};
use sqlx::PgPool;

use super::ensure_movie_exists;
use crate::error::ApiError;
use crate::models;
use crate::serializers::{load_movies, ReviewRead, ReviewWrite};

pub async fn get_movie_reviews(
    connection: Data<PgPool>,
    path: Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let pool = connection.get_ref();
    let movie_id = path.into_inner();
    ensure_movie_exists(pool, movie_id).await?;
    let reviews: Vec<ReviewRead> = models::list_reviews_for_movies(pool, &[movie_id])
        .await?
        .into_iter()
        .map(ReviewRead::from)
        .collect();
    Ok(HttpResponse::Ok().json(reviews))
}

/// The movie comes from the path; a `movie` in the body is ignored.
pub async fn create_movie_review(
    connection: Data<PgPool>,
    path: Path<i64>,
    body: Json<ReviewWrite>,
) -> Result<HttpResponse, ApiError> {
    tracing::info!("Got request body: {:?}", body);
    let pool = connection.get_ref();
    let movie_id = path.into_inner();
    ensure_movie_exists(pool, movie_id).await?;
    let body = body.into_inner().without_movie();
    let errors = body.field_errors();
    let review = body.for_movie(movie_id, errors)?;
    let review = models::insert_review(pool, &review)
        .await
        .map_err(|err| ApiError::from_write(err, "movie"))?;
    tracing::info!("Review created successfully");
    Ok(HttpResponse::Created().json(ReviewRead::from(review)))
}

/// Every movie with its reviews and average rating.
pub async fn get_reviews_summary(connection: Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let movies = load_movies(connection.get_ref()).await?;
    Ok(HttpResponse::Ok().json(movies))
}
