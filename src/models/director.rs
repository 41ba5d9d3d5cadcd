use sqlx::{FromRow, PgPool};
use tracing::Instrument;

/// A director together with the number of movies currently pointing at it.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DirectorWithMovieCount {
    pub id: i64,
    pub name: String,
    pub movies_count: i64,
}

const SELECT_DIRECTORS: &str = r#"
    SELECT d.id, d.name, COUNT(m.id) AS movies_count
    FROM director d
    LEFT JOIN movie m ON m.director_id = d.id
"#;

pub async fn list_directors(pool: &PgPool) -> Result<Vec<DirectorWithMovieCount>, sqlx::Error> {
    let query_span = tracing::info_span!("Listing directors with movie counts");
    sqlx::query_as::<_, DirectorWithMovieCount>(&format!(
        "{} GROUP BY d.id ORDER BY d.id",
        SELECT_DIRECTORS
    ))
    .fetch_all(pool)
    .instrument(query_span)
    .await
}

pub async fn find_director(
    pool: &PgPool,
    id: i64,
) -> Result<Option<DirectorWithMovieCount>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching director", %id);
    sqlx::query_as::<_, DirectorWithMovieCount>(&format!(
        "{} WHERE d.id = $1 GROUP BY d.id",
        SELECT_DIRECTORS
    ))
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

pub async fn director_exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let query_span = tracing::info_span!("Checking director reference", %id);
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM director WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .instrument(query_span)
        .await
}

pub async fn insert_director(pool: &PgPool, name: &str) -> Result<i64, sqlx::Error> {
    let query_span = tracing::info_span!("Saving new director", %name);
    sqlx::query_scalar::<_, i64>("INSERT INTO director (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .instrument(query_span)
        .await
}

/// `None` keeps the stored value. Returns `None` when no director has `id`.
pub async fn update_director(
    pool: &PgPool,
    id: i64,
    name: Option<&str>,
) -> Result<Option<i64>, sqlx::Error> {
    let query_span = tracing::info_span!("Updating director", %id);
    sqlx::query_scalar::<_, i64>(
        "UPDATE director SET name = COALESCE($1, name) WHERE id = $2 RETURNING id",
    )
    .bind(name)
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

/// Fails with a foreign-key violation while movies still reference the director.
pub async fn delete_director(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let query_span = tracing::info_span!("Deleting director", %id);
    let result = sqlx::query("DELETE FROM director WHERE id = $1")
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await?;
    Ok(result.rows_affected())
}
