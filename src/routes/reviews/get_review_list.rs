use actix_web::{web::Data, HttpResponse};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models;
use crate::serializers::ReviewRead;

pub async fn get_review_list(connection: Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let reviews: Vec<ReviewRead> = models::list_reviews(connection.get_ref())
        .await?
        .into_iter()
        .map(ReviewRead::from)
        .collect();
    tracing::info!("Sending {} reviews", reviews.len());
    Ok(HttpResponse::Ok().json(reviews))
}
