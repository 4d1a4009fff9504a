use std::io::Read;

use internal::{
    domain::{error::IngestionError, frame::Terminator},
    port::dispatcher::DispatcherDriverPort,
    service::{
        frame_reader::FrameReader,
        ingestion_service::{IngestionService, IngestionStats},
        shutdown::Shutdown,
    },
};
use log::{error, info};
use tokio::task::JoinHandle;

/// Runs the ingestion loop over the serial port on a dedicated blocking thread.
///
/// The port is owned by the thread and released when the loop returns, whatever the outcome.
pub fn spawn_ingestion<R, D>(
    port: R, terminator: Terminator, dispatcher: D, strict: bool, shutdown: Shutdown,
) -> JoinHandle<Result<IngestionStats, IngestionError>>
where
    R: Read + Send + 'static,
    D: DispatcherDriverPort + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let source = FrameReader::new(port, terminator);
        let mut service = IngestionService::new(source, dispatcher, shutdown).strict(strict);
        let result = service.run().inspect_err(|e| error!("{e}"));
        info!("Ingestion stopped: {}", service.stats());
        result
    })
}
