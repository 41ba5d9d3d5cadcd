use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;

use super::MOVIE;
use crate::error::ApiError;
use crate::models;

/// Movies that still have reviews cannot be deleted.
pub async fn delete_movie(
    connection: Data<PgPool>,
    path: Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let deleted = models::delete_movie(connection.get_ref(), id)
        .await
        .map_err(|err| ApiError::from_delete(err, "Cannot delete movie while reviews reference it"))?;
    if deleted == 0 {
        return Err(ApiError::NotFound(MOVIE));
    }
    tracing::info!("Movie {} deleted", id);
    Ok(HttpResponse::NoContent().finish())
}
