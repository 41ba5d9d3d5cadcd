use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;

use super::fetch_movie;
use crate::error::ApiError;

pub async fn get_movie(connection: Data<PgPool>, path: Path<i64>) -> Result<HttpResponse, ApiError> {
    let movie = fetch_movie(connection.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(movie))
}
