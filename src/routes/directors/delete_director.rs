use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;

use super::DIRECTOR;
use crate::error::ApiError;
use crate::models;

/// Directors that still have movies cannot be deleted.
pub async fn delete_director(
    connection: Data<PgPool>,
    path: Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let deleted = models::delete_director(connection.get_ref(), id)
        .await
        .map_err(|err| {
            ApiError::from_delete(err, "Cannot delete director while movies reference it")
        })?;
    if deleted == 0 {
        return Err(ApiError::NotFound(DIRECTOR));
    }
    tracing::info!("Director {} deleted", id);
    Ok(HttpResponse::NoContent().finish())
}
