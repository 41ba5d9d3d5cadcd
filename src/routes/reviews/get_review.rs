use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;

use super::REVIEW;
use crate::error::ApiError;
use crate::models;
use crate::serializers::ReviewRead;

pub async fn get_review(connection: Data<PgPool>, path: Path<i64>) -> Result<HttpResponse, ApiError> {
    let review = models::find_review(connection.get_ref(), path.into_inner())
        .await?
        .ok_or(ApiError::NotFound(REVIEW))?;
    Ok(HttpResponse::Ok().json(ReviewRead::from(review)))
}
