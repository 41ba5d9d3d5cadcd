use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models;
use crate::routes::movies::check_movie_reference;
use crate::serializers::{ReviewRead, ReviewWrite};

pub async fn create_review(
    connection: Data<PgPool>,
    body: Json<ReviewWrite>,
) -> Result<HttpResponse, ApiError> {
    tracing::info!("Got request body: {:?}", body);
    let pool = connection.get_ref();
    let body = body.into_inner();
    let mut errors = body.field_errors();
    if let (true, Some(movie_id)) = (errors.is_empty(), body.movie) {
        check_movie_reference(pool, movie_id, &mut errors).await?;
    }
    let review = body.into_new_review(errors)?;
    let review = models::insert_review(pool, &review)
        .await
        .map_err(|err| ApiError::from_write(err, "movie"))?;
    tracing::info!("Review created successfully");
    Ok(HttpResponse::Created().json(ReviewRead::from(review)))
}
