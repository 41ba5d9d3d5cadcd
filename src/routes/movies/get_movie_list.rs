use actix_web::{web::Data, HttpResponse};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::serializers::load_movies;

pub async fn get_movie_list(connection: Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let movies = load_movies(connection.get_ref()).await?;
    tracing::info!("Sending {} movies", movies.len());
    Ok(HttpResponse::Ok().json(movies))
}
