use dotenv::dotenv;
use movie_catalog::configuration::get_configuration;
use movie_catalog::startup;
use movie_catalog::telemetry::{get_subscriber, init_subscriber};
use sqlx::PgPool;
use std::io::{Error, ErrorKind};
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let subscriber = get_subscriber("movie_catalog", "info", std::io::stdout);
    init_subscriber(subscriber).map_err(|err| Error::new(ErrorKind::Other, err))?;

    let configuration = get_configuration("configuration").map_err(|err| {
        Error::new(
            ErrorKind::Other,
            format!(
                "Failed to read `configuration.json`. Please make sure it exists and is valid JSON: {}",
                err
            ),
        )
    })?;

    let connection_pool = PgPool::connect(configuration.database.connection_string().as_str())
        .await
        .map_err(|err| Error::new(ErrorKind::Other, format!("Failed to connect to database: {}", err)))?;
    startup::run_migrations(&connection_pool)
        .await
        .map_err(|err| Error::new(ErrorKind::Other, format!("Failed to migrate the database: {}", err)))?;

    let listener = TcpListener::bind(configuration.address())?;
    tracing::info!("Listening on {}", configuration.address());
    startup::run_server(listener, connection_pool, configuration.frontend_url)?.await
}
