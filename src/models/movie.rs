use sqlx::{FromRow, PgPool};
use tracing::Instrument;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Minutes.
    pub duration: i32,
    pub director_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub director_id: i64,
}

/// Partial update, `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub director_id: Option<i64>,
}

impl From<NewMovie> for MovieChanges {
    fn from(movie: NewMovie) -> Self {
        MovieChanges {
            title: Some(movie.title),
            description: Some(movie.description),
            duration: Some(movie.duration),
            director_id: Some(movie.director_id),
        }
    }
}

pub async fn list_movies(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
    let query_span = tracing::info_span!("Listing movies");
    sqlx::query_as::<_, Movie>(
        "SELECT id, title, description, duration, director_id FROM movie ORDER BY id",
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
}

pub async fn find_movie(pool: &PgPool, id: i64) -> Result<Option<Movie>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching movie", %id);
    sqlx::query_as::<_, Movie>(
        "SELECT id, title, description, duration, director_id FROM movie WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

pub async fn movie_exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let query_span = tracing::info_span!("Checking movie reference", %id);
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM movie WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .instrument(query_span)
        .await
}

pub async fn insert_movie(pool: &PgPool, movie: &NewMovie) -> Result<i64, sqlx::Error> {
    let query_span = tracing::info_span!("Saving new movie", ?movie);
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO movie (title, description, duration, director_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&movie.title)
    .bind(&movie.description)
    .bind(movie.duration)
    .bind(movie.director_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
}

/// Returns `None` when no movie has `id`.
pub async fn update_movie(
    pool: &PgPool,
    id: i64,
    changes: &MovieChanges,
) -> Result<Option<i64>, sqlx::Error> {
    let query_span = tracing::info_span!("Updating movie", %id, ?changes);
    sqlx::query_scalar::<_, i64>(
        r#"
        UPDATE movie SET
            title = COALESCE($1, title),
            description = COALESCE($2, description),
            duration = COALESCE($3, duration),
            director_id = COALESCE($4, director_id)
        WHERE id = $5
        RETURNING id
        "#,
    )
    .bind(changes.title.as_deref())
    .bind(changes.description.as_deref())
    .bind(changes.duration)
    .bind(changes.director_id)
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

/// Fails with a foreign-key violation while reviews still reference the movie.
pub async fn delete_movie(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let query_span = tracing::info_span!("Deleting movie", %id);
    let result = sqlx::query("DELETE FROM movie WHERE id = $1")
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await?;
    Ok(result.rows_affected())
}
