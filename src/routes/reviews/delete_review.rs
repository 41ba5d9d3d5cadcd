use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;

use super::REVIEW;
use crate::error::ApiError;
use crate::models;

pub async fn delete_review(
    connection: Data<PgPool>,
    path: Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if models::delete_review(connection.get_ref(), id).await? == 0 {
        return Err(ApiError::NotFound(REVIEW));
    }
    tracing::info!("Review {} deleted", id);
    Ok(HttpResponse::NoContent().finish())
}
