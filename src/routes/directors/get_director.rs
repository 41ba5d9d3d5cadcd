use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use sqlx::PgPool;

use super::fetch_director;
use crate::error::ApiError;

pub async fn get_director(
    connection: Data<PgPool>,
    path: Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let director = fetch_director(connection.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(director))
}
