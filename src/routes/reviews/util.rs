use actix_web::{web, Scope};
use sqlx::PgPool;

use super::{
    create_review, delete_review, get_review, get_review_list, patch_review, replace_review,
};

use crate::error::ApiError;
use crate::models;

pub const REVIEW: &str = "Review";

pub async fn ensure_review_exists(pool: &PgPool, id: i64) -> Result<(), ApiError> {
    if models::review_exists(pool, id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound(REVIEW))
    }
}

pub fn review_source() -> Scope {
    web::scope("/reviews")
        .service(
            web::resource("")
                .route(web::get().to(get_review_list))
                .route(web::post().to(create_review)),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_review))
                .route(web::put().to(replace_review))
                .route(web::patch().to(patch_review))
                .route(web::delete().to(delete_review)),
        )
}
