use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application_host: String,
    pub application_port: u16,
    /// Origin allowed by CORS, `*` allows any origin.
    pub frontend_url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub user_name: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.user_name, self.password, self.host, self.port, self.database_name
        )
    }

    /// Same server, different database. Used to create and drop scratch databases.
    pub fn connection_string_for(&self, database_name: &str) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.user_name, self.password, self.host, self.port, database_name
        )
    }
}

impl Settings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.application_host, self.application_port)
    }
}

/// Reads `<filename>.json` from the working directory, then applies
/// `APP_`-prefixed environment overrides (`APP_DATABASE__HOST=db`).
pub fn get_configuration(filename: &str) -> Result<Settings, config::ConfigError> {
    let mut builder = Config::builder();
    builder = builder
        .add_source(File::new(filename, FileFormat::Json))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
    let config = builder.build()?;
    config.try_deserialize()
}
