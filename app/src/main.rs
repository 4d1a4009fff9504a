mod config {
    pub mod app_config;
    pub mod collector_config;
    pub mod pipeline_config;
    pub mod serial_config;
}
mod inbound {
    pub mod serial;
}
mod outbound {
    pub mod http_collector;
}
mod serial_client;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::{app_config::AppConfig, pipeline_config::DispatchMode};
use inbound::serial::spawn_ingestion;
use internal::service::{
    dispatcher_service::{self, InlineDispatcher},
    shutdown::Shutdown,
};
use log::{info, warn};
use outbound::http_collector::HttpCollector;
use serial_client::SerialClient;
use tokio::{runtime::Handle, signal};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let conf = AppConfig::load(&config_path)?;
    info!("Relaying tank {} to {}", conf.collector.tank_name, conf.collector.url);

    let collector = Arc::new(HttpCollector::new(&conf.collector)?);
    let terminator = conf.serial.terminator.into();
    let serial = SerialClient {
        serial_config: conf.serial,
    };
    let port = serial.open()?;
    let shutdown = Shutdown::new();

    let mut ingestion = match conf.dispatch.mode {
        DispatchMode::Queued => {
            let (dispatcher, worker) = dispatcher_service::queued(
                &conf.collector.tank_name,
                collector,
                conf.dispatch.queue_capacity,
                conf.dispatch.max_in_flight,
            );
            tokio::spawn(worker.run());
            spawn_ingestion(port, terminator, dispatcher, conf.ingestion.strict, shutdown.clone())
        }
        DispatchMode::Inline => {
            let dispatcher = InlineDispatcher::new(&conf.collector.tank_name, collector, Handle::current());
            spawn_ingestion(port, terminator, dispatcher, conf.ingestion.strict, shutdown.clone())
        }
    };

    let joined = tokio::select! {
        joined = &mut ingestion => joined,
        interrupted = signal::ctrl_c() => {
            match interrupted {
                Ok(()) => info!("Interrupt received, shutting down"),
                Err(e) => warn!("Unable to listen for interrupt, shutting down: {e}"),
            }
            shutdown.trigger();
            ingestion.await
        }
    };

    // in-flight sends are abandoned with the runtime
    joined
        .context("Ingestion thread panicked")?
        .map(|_| ())
        .context("Ingestion failed")
}
