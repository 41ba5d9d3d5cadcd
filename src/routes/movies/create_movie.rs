use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use sqlx::PgPool;

use super::fetch_movie;
use crate::error::ApiError;
use crate::models;
use crate::routes::directors::check_director_reference;
use crate::serializers::MovieWrite;

pub async fn create_movie(
    connection: Data<PgPool>,
    body: Json<MovieWrite>,
) -> Result<HttpResponse, ApiError> {
    tracing::info!("Got request body: {:?}", body);
    let pool = connection.get_ref();
    let body = body.into_inner();
    let mut errors = body.field_errors();
    if let (true, Some(director_id)) = (errors.is_empty(), body.director) {
        check_director_reference(pool, director_id, &mut errors).await?;
    }
    let movie = body.into_new_movie(errors)?;
    let id = models::insert_movie(pool, &movie)
        .await
        .map_err(|err| ApiError::from_write(err, "director"))?;
    tracing::info!("Movie created successfully");
    Ok(HttpResponse::Created().json(fetch_movie(pool, id).await?))
}
