use actix_web::{web, Scope};
use sqlx::PgPool;

use super::{
    create_director, delete_director, get_director, get_director_list, patch_director,
    replace_director,
};
use crate::error::{invalid_reference, ApiError, FieldErrors};
use crate::models;
use crate::serializers::DirectorRead;

pub const DIRECTOR: &str = "Director";

pub fn director_source() -> Scope {
    web::scope("/directors")
        .service(
            web::resource("")
                .route(web::get().to(get_director_list))
                .route(web::post().to(create_director)),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_director))
                .route(web::put().to(replace_director))
                .route(web::patch().to(patch_director))
                .route(web::delete().to(delete_director)),
        )
}

pub async fn fetch_director(pool: &PgPool, id: i64) -> Result<DirectorRead, ApiError> {
    models::find_director(pool, id)
        .await?
        .map(DirectorRead::from)
        .ok_or(ApiError::NotFound(DIRECTOR))
}

pub async fn ensure_director_exists(pool: &PgPool, id: i64) -> Result<(), ApiError> {
    if models::director_exists(pool, id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound(DIRECTOR))
    }
}

/// Records an error on `director` when `id` does not name a stored director.
pub async fn check_director_reference(
    pool: &PgPool,
    id: i64,
    errors: &mut FieldErrors,
) -> Result<(), ApiError> {
    if !models::director_exists(pool, id).await? {
        tracing::info!("Director {} does not exist", id);
        errors.add("director", invalid_reference(id));
    }
    Ok(())
}
