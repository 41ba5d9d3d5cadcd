use actix_web::{web::Data, HttpResponse};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models;
use crate::serializers::DirectorRead;

pub async fn get_director_list(connection: Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let directors: Vec<DirectorRead> = models::list_directors(connection.get_ref())
        .await?
        .into_iter()
        .map(DirectorRead::from)
        .collect();
    tracing::info!("Sending {} directors", directors.len());
    Ok(HttpResponse::Ok().json(directors))
}
