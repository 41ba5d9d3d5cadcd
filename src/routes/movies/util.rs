use actix_web::{web, Scope};
use sqlx::PgPool;

use super::{
    create_movie, create_movie_review, delete_movie, get_movie, get_movie_list,
    get_movie_reviews, get_reviews_summary, patch_movie, replace_movie,
};
use crate::error::{invalid_reference, ApiError, FieldErrors};
use crate::models;
use crate::serializers::{load_movie, MovieRead};

pub const MOVIE: &str = "Movie";

pub fn movie_source() -> Scope {
    web::scope("/movies")
        .service(
            web::resource("")
                .route(web::get().to(get_movie_list))
                .route(web::post().to(create_movie)),
        )
        // Registered ahead of `/{id}` so it is never read as an id.
        .service(web::resource("/reviews").route(web::get().to(get_reviews_summary)))
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_movie))
                .route(web::put().to(replace_movie))
                .route(web::patch().to(patch_movie))
                .route(web::delete().to(delete_movie)),
        )
        .service(
            web::resource("/{movie_id}/reviews")
                .route(web::get().to(get_movie_reviews))
                .route(web::post().to(create_movie_review)),
        )
}

pub async fn fetch_movie(pool: &PgPool, id: i64) -> Result<MovieRead, ApiError> {
    load_movie(pool, id).await?.ok_or(ApiError::NotFound(MOVIE))
}

pub async fn ensure_movie_exists(pool: &PgPool, id: i64) -> Result<(), ApiError> {
    if models::movie_exists(pool, id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound(MOVIE))
    }
}

/// Records an error on `movie` when `id` does not name a stored movie.
pub async fn check_movie_reference(
    pool: &PgPool,
    id: i64,
    errors: &mut FieldErrors,
) -> Result<(), ApiError> {
    if !models::movie_exists(pool, id).await? {
        tracing::info!("Movie {} does not exist", id);
        errors.add("movie", invalid_reference(id));
    }
    Ok(())
}
