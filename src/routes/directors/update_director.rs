use actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};
use sqlx::PgPool;

use super::{ensure_director_exists, fetch_director, DIRECTOR};
use crate::error::ApiError;
use crate::models;
use crate::serializers::{DirectorPatch, DirectorWrite};

/// PUT: the full write shape is required.
pub async fn replace_director(
    connection: Data<PgPool>,
    path: Path<i64>,
    body: Json<DirectorWrite>,
) -> Result<HttpResponse, ApiError> {
    let pool = connection.get_ref();
    let id = path.into_inner();
    ensure_director_exists(pool, id).await?;
    let name = body.into_inner().into_name()?;
    models::update_director(pool, id, Some(&name))
        .await?
        .ok_or(ApiError::NotFound(DIRECTOR))?;
    tracing::info!("Director {} replaced", id);
    Ok(HttpResponse::Ok().json(fetch_director(pool, id).await?))
}

pub async fn patch_director(
    connection: Data<PgPool>,
    path: Path<i64>,
    body: Json<DirectorPatch>,
) -> Result<HttpResponse, ApiError> {
    let pool = connection.get_ref();
    let id = path.into_inner();
    ensure_director_exists(pool, id).await?;
    body.field_errors().into_result()?;
    models::update_director(pool, id, body.name.as_deref())
        .await?
        .ok_or(ApiError::NotFound(DIRECTOR))?;
    tracing::info!("Director {} updated", id);
    Ok(HttpResponse::Ok().json(fetch_director(pool, id).await?))
}
