use std::sync::Arc;

use log::{debug, warn};
use tokio::{
    runtime::Handle,
    sync::{
        Semaphore,
        mpsc::{self, error::TrySendError},
    },
};

use crate::{
    domain::{envelope::Envelope, error::DispatchError, reading::Reading},
    port::{collector::CollectorDrivenPort, dispatcher::DispatcherDriverPort},
};

/// Builds a queued dispatcher and the worker that drains its queue.
///
/// The worker must be spawned on a runtime, the dispatcher can live on any thread.
pub fn queued<C>(
    tank_name: &str, collector: Arc<C>, queue_capacity: usize, max_in_flight: usize,
) -> (QueuedDispatcher, SendWorker<C>)
where
    C: CollectorDrivenPort + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::channel(queue_capacity.max(1));
    (
        QueuedDispatcher::new(tank_name, tx),
        SendWorker::new(collector, rx, max_in_flight),
    )
}

/// Decoupled dispatch: envelopes are pushed onto a bounded queue and dropped when it is full.
pub struct QueuedDispatcher {
    tank_name: Arc<str>,
    queue: mpsc::Sender<Envelope>,
}

impl QueuedDispatcher {
    pub fn new(tank_name: &str, queue: mpsc::Sender<Envelope>) -> Self {
        QueuedDispatcher {
            tank_name: Arc::from(tank_name),
            queue,
        }
    }
}

impl DispatcherDriverPort for QueuedDispatcher {
    fn dispatch(&self, reading: Reading) -> Result<(), DispatchError> {
        let envelope = Envelope::new(&self.tank_name, &reading);
        self.queue.try_send(envelope).map_err(|e| match e {
            TrySendError::Full(envelope) => DispatchError::QueueFull(envelope.measurement()),
            TrySendError::Closed(envelope) => DispatchError::Closed(envelope.measurement()),
        })
    }
}

/// Drains the send queue in FIFO order, one task per envelope, at most `max_in_flight` at once.
///
/// Tasks are spawned in queue order. With `max_in_flight > 1` on a multi-thread runtime the
/// requests themselves may leave in a different order; use `1` when strict ordering matters.
pub struct SendWorker<C> {
    collector: Arc<C>,
    queue: mpsc::Receiver<Envelope>,
    permits: Arc<Semaphore>,
}

impl<C> SendWorker<C>
where
    C: CollectorDrivenPort + Send + Sync + 'static,
{
    pub fn new(collector: Arc<C>, queue: mpsc::Receiver<Envelope>, max_in_flight: usize) -> Self {
        SendWorker {
            collector,
            queue,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    pub async fn run(mut self) {
        while let Some(envelope) = self.queue.recv().await {
            let Ok(permit) = Arc::clone(&self.permits).acquire_owned().await else {
                break;
            };
            let collector = Arc::clone(&self.collector);
            tokio::spawn(async move {
                let measurement = envelope.measurement();
                match collector.send(envelope).await {
                    Ok(()) => debug!("{measurement} envelope delivered"),
                    Err(e) => warn!("Unable to deliver {measurement} envelope: {e}"),
                }
                drop(permit);
            });
        }
        debug!("Send queue closed, worker stopped");
    }
}

/// Synchronous baseline: blocks the calling thread until the collector answered.
///
/// Must be called from outside the runtime (e.g. a `spawn_blocking` thread).
pub struct InlineDispatcher<C> {
    tank_name: Arc<str>,
    collector: Arc<C>,
    runtime: Handle,
}

impl<C: CollectorDrivenPort> InlineDispatcher<C> {
    pub fn new(tank_name: &str, collector: Arc<C>, runtime: Handle) -> Self {
        InlineDispatcher {
            tank_name: Arc::from(tank_name),
            collector,
            runtime,
        }
    }
}

impl<C: CollectorDrivenPort> DispatcherDriverPort for InlineDispatcher<C> {
    fn dispatch(&self, reading: Reading) -> Result<(), DispatchError> {
        let envelope = Envelope::new(&self.tank_name, &reading);
        let measurement = envelope.measurement();
        match self.runtime.block_on(self.collector.send(envelope)) {
            Ok(()) => debug!("{measurement} envelope delivered"),
            Err(e) => warn!("Unable to deliver {measurement} envelope: {e}"),
        }
        Ok(())
    }
}
