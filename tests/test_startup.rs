use movie_catalog::configuration::{get_configuration, Settings};
use movie_catalog::startup::{run_migrations, run_server};
use serde::Deserialize;
use serde_json::Value;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use tokio::task;
use uuid::Uuid;

pub struct TestDatabaseSettings {
    pub db_name: String,
    pub maintenance_url: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub client: reqwest::Client,
    pub database_settings: TestDatabaseSettings,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let db_name = self.database_settings.db_name.clone();
        let connection_url = self.database_settings.maintenance_url.clone();
        task::spawn_blocking(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async move {
                let mut connection: PgConnection = PgConnection::connect(connection_url.as_str())
                    .await
                    .expect("Failed to connect to Postgres for cleanup");
                let terminate_sessions = format!(
                    r#"SELECT pg_terminate_backend(pg_stat_activity.pid)
                    FROM pg_stat_activity
                    WHERE pg_stat_activity.datname = '{}'
                    AND pid <> pg_backend_pid();"#,
                    db_name
                );
                connection
                    .execute(terminate_sessions.as_str())
                    .await
                    .expect("Failed to terminate other sessions.");
                connection
                    .execute(format!(r#"DROP DATABASE "{}""#, db_name).as_str())
                    .await
                    .expect("Failed to drop database.");
            });
        });
    }
}

pub async fn configure_database(config: &Settings, parent_db_name: &str) -> PgPool {
    let mut connection = PgConnection::connect(
        config
            .database
            .connection_string_for(parent_db_name)
            .as_str(),
    )
    .await
    .expect("Failed to connect to postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database.database_name).as_str())
        .await
        .expect("Failed to create database.");
    let connection_pool = PgPool::connect(config.database.connection_string().as_str())
        .await
        .expect("Failed to connect to postgres");
    run_migrations(&connection_pool)
        .await
        .expect("Failed to migrate the database");
    connection_pool
}

pub async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();
    let mut configuration =
        get_configuration("test_configuration").expect("Failed to read configuration file");
    let parent_db_name = configuration.database.database_name.clone();
    configuration.database.database_name = Uuid::new_v4().to_string();
    let connection_pool = configure_database(&configuration, &parent_db_name).await;
    let server = run_server(
        listener,
        connection_pool.clone(),
        configuration.frontend_url.clone(),
    )
    .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        db_pool: connection_pool,
        client: reqwest::Client::new(),
        database_settings: TestDatabaseSettings {
            maintenance_url: configuration
                .database
                .connection_string_for(&parent_db_name),
            db_name: configuration.database.database_name,
        },
    }
}

#[derive(Deserialize, Debug)]
#[allow(dead_code)]
pub struct Director {
    pub id: i64,
    pub name: String,
    pub movies_count: i64,
}

#[derive(Deserialize, Debug)]
#[allow(dead_code)]
pub struct Review {
    pub id: i64,
    pub text: String,
    pub stars: i32,
    pub movie: i64,
}

#[derive(Deserialize, Debug)]
#[allow(dead_code)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub director: i64,
    pub reviews: Vec<Review>,
    pub avg_rating: f64,
}

#[allow(dead_code)]
impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn create_director(&self, name: &str) -> Director {
        let res = self.post("/directors", &serde_json::json!({ "name": name })).await;
        assert_eq!(res.status().as_u16(), 201);
        res.json().await.expect("Failed to parse director")
    }

    pub async fn create_movie(&self, title: &str, director: i64) -> Movie {
        let res = self
            .post(
                "/movies",
                &serde_json::json!({
                    "title": title,
                    "description": "Shot on 16mm.",
                    "duration": 90,
                    "director": director
                }),
            )
            .await;
        assert_eq!(res.status().as_u16(), 201);
        res.json().await.expect("Failed to parse movie")
    }

    pub async fn create_review(&self, movie: i64, stars: i32) -> Review {
        let res = self
            .post(
                "/reviews",
                &serde_json::json!({ "text": "Worth it.", "stars": stars, "movie": movie }),
            )
            .await;
        assert_eq!(res.status().as_u16(), 201);
        res.json().await.expect("Failed to parse review")
    }
}
