use actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};
use sqlx::PgPool;

use super::{ensure_review_exists, REVIEW};
use crate::error::ApiError;
use crate::models::{self, ReviewChanges};
use crate::routes::movies::check_movie_reference;
use crate::serializers::{ReviewPatch, ReviewRead, ReviewWrite};

async fn apply_changes(
    pool: &PgPool,
    id: i64,
    changes: &ReviewChanges,
) -> Result<HttpResponse, ApiError> {
    let review = models::update_review(pool, id, changes)
        .await
        .map_err(|err| ApiError::from_write(err, "movie"))?
        .ok_or(ApiError::NotFound(REVIEW))?;
    tracing::info!("Review {} updated", id);
    Ok(HttpResponse::Ok().json(ReviewRead::from(review)))
}

/// PUT: text and movie are required, an absent rating is left as stored.
pub async fn replace_review(
    connection: Data<PgPool>,
    path: Path<i64>,
    body: Json<ReviewWrite>,
) -> Result<HttpResponse, ApiError> {
    let pool = connection.get_ref();
    let id = path.into_inner();
    ensure_review_exists(pool, id).await?;
    let body = body.into_inner();
    let mut errors = body.field_errors();
    if let (true, Some(movie_id)) = (errors.is_empty(), body.movie) {
        check_movie_reference(pool, movie_id, &mut errors).await?;
    }
    let changes = body.into_replacement(errors)?;
    apply_changes(pool, id, &changes).await
}

pub async fn patch_review(
    connection: Data<PgPool>,
    path: Path<i64>,
    body: Json<ReviewPatch>,
) -> Result<HttpResponse, ApiError> {
    let pool = connection.get_ref();
    let id = path.into_inner();
    ensure_review_exists(pool, id).await?;
    let body = body.into_inner();
    let mut errors = body.field_errors();
    if let (true, Some(movie_id)) = (errors.is_empty(), body.movie) {
        check_movie_reference(pool, movie_id, &mut errors).await?;
    }
    let changes = body.into_changes(errors)?;
    apply_changes(pool, id, &changes).await
}
