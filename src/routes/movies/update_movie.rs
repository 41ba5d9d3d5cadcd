use actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};
use sqlx::PgPool;

use super::{ensure_movie_exists, fetch_movie, MOVIE};
use crate::error::ApiError;
use crate::models::{self, MovieChanges};
use crate::routes::directors::check_director_reference;
use crate::serializers::{MoviePatch, MovieWrite};

async fn apply_changes(pool: &PgPool, id: i64, changes: &MovieChanges) -> Result<(), ApiError> {
    models::update_movie(pool, id, changes)
        .await
        .map_err(|err| ApiError::from_write(err, "director"))?
        .ok_or(ApiError::NotFound(MOVIE))?;
    Ok(())
}

/// PUT: the full write shape is required.
pub async fn replace_movie(
    connection: Data<PgPool>,
    path: Path<i64>,
    body: Json<MovieWrite>,
) -> Result<HttpResponse, ApiError> {
    let pool = connection.get_ref();
    let id = path.into_inner();
    ensure_movie_exists(pool, id).await?;
    let body = body.into_inner();
    let mut errors = body.field_errors();
    if let (true, Some(director_id)) = (errors.is_empty(), body.director) {
        check_director_reference(pool, director_id, &mut errors).await?;
    }
    let changes = MovieChanges::from(body.into_new_movie(errors)?);
    apply_changes(pool, id, &changes).await?;
    tracing::info!("Movie {} replaced", id);
    Ok(HttpResponse::Ok().json(fetch_movie(pool, id).await?))
}

pub async fn patch_movie(
    connection: Data<PgPool>,
    path: Path<i64>,
    body: Json<MoviePatch>,
) -> Result<HttpResponse, ApiError> {
    let pool = connection.get_ref();
    let id = path.into_inner();
    ensure_movie_exists(pool, id).await?;
    let body = body.into_inner();
    let mut errors = body.field_errors();
    if let (true, Some(director_id)) = (errors.is_empty(), body.director) {
        check_director_reference(pool, director_id, &mut errors).await?;
    }
    let changes = body.into_changes(errors)?;
    apply_changes(pool, id, &changes).await?;
    tracing::info!("Movie {} updated", id);
    Ok(HttpResponse::Ok().json(fetch_movie(pool, id).await?))
}
