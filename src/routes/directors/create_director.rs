use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use sqlx::PgPool;

use super::fetch_director;
use crate::error::ApiError;
use crate::models;
use crate::serializers::DirectorWrite;

pub async fn create_director(
    connection: Data<PgPool>,
    body: Json<DirectorWrite>,
) -> Result<HttpResponse, ApiError> {
    tracing::info!("Got request body: {:?}", body);
    let name = body.into_inner().into_name()?;
    let id = models::insert_director(connection.get_ref(), &name).await?;
    let director = fetch_director(connection.get_ref(), id).await?;
    tracing::info!("Director created successfully");
    Ok(HttpResponse::Created().json(director))
}
