use crate::routes;
use actix_web::{
    dev::Server,
    middleware::NormalizePath,
    web::Data,
    App, HttpServer,
};
use sqlx::{migrate::MigrateError, PgPool};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use actix_cors::Cors;
use actix_web::http::header;

fn configure_cors(frontend_url: &str) -> Cors {
    let mut cors = Cors::default();
    cors = if frontend_url == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(frontend_url)
    };
    cors.allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

pub async fn run_migrations(db_pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(db_pool).await
}

pub fn run_server(
    listener: TcpListener,
    db_pool: PgPool,
    frontend_url: String,
) -> Result<Server, std::io::Error> {
    let db_pool = Data::new(db_pool);

    let server = HttpServer::new(move || {
        let cors = configure_cors(frontend_url.as_str());

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(NormalizePath::trim())
            .app_data(db_pool.clone())
            .configure(routes::configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
