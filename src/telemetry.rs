use thiserror::Error;
use tracing::subscriber::{set_global_default, SetGlobalDefaultError};
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::{log::SetLoggerError, LogTracer};
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to install the log bridge: {0}")]
    LogBridge(#[from] SetLoggerError),
    #[error("Failed to set the global subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Bunyan-formatted JSON subscriber. `RUST_LOG` wins over `env_filter` when set.
pub fn get_subscriber<Sink>(
    name: impl Into<String>,
    env_filter: impl Into<String>,
    sink: Sink,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter.into()));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> Result<(), TelemetryError> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}
