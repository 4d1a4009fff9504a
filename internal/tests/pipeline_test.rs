use std::{
    io::Cursor,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use internal::{
    domain::{
        envelope::Envelope,
        error::{IngestionError, SendError, StreamError},
        frame::Terminator,
    },
    port::collector::CollectorDrivenPort,
    service::{
        dispatcher_service, frame_reader::FrameReader, ingestion_service::IngestionService, shutdown::Shutdown,
    },
};
use tokio::sync::mpsc::{self, UnboundedSender};

struct RecordingCollector {
    delivered: UnboundedSender<Envelope>,
}

impl CollectorDrivenPort for RecordingCollector {
    async fn send(&self, envelope: Envelope) -> Result<(), SendError> {
        self.delivered.send(envelope).map_err(|e| SendError::Transport(e.to_string()))
    }
}

struct UnreachableCollector {
    attempts: AtomicUsize,
}

impl CollectorDrivenPort for UnreachableCollector {
    async fn send(&self, _envelope: Envelope) -> Result<(), SendError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SendError::Transport("connection refused".into()))
    }
}

#[tokio::test]
async fn should_relay_every_frame_of_a_raw_stream() {
    let (delivered_tx, mut delivered_rx) = mpsc::unbounded_channel();
    let collector = Arc::new(RecordingCollector {
        delivered: delivered_tx,
    });
    let (dispatcher, worker) = dispatcher_service::queued("reef-01", collector, 16, 1);
    tokio::spawn(worker.run());

    let source = FrameReader::new(
        Cursor::new(b"EC: 100,50,0.5,1.02\rTemp: 25\rPH: 6.8\r".to_vec()),
        Terminator::CarriageReturn,
    );
    let mut service = IngestionService::new(source, dispatcher, Shutdown::new());
    let err = service.run().unwrap_err();
    assert!(matches!(err, IngestionError::Stream(StreamError::Closed)));
    assert_eq!(service.stats().dispatched, 3);

    let conductivity = delivered_rx.recv().await.unwrap();
    let temp = delivered_rx.recv().await.unwrap();
    let ph = delivered_rx.recv().await.unwrap();

    assert_eq!(conductivity.measurement(), "conductivity");
    assert_eq!(conductivity.points[0].fields["conductivity"], 100.0);
    assert_eq!(conductivity.points[0].fields["tds"], 50.0);
    assert_eq!(conductivity.points[0].fields["salinity"], 0.5);
    assert_eq!(conductivity.points[0].fields["specific_gravity"], 1.02);

    assert_eq!(temp.measurement(), "temp");
    assert_eq!(temp.points[0].fields["celsius"], 25.0);
    assert_eq!(temp.points[0].fields["fahrenheit"], 77.0);

    assert_eq!(ph.measurement(), "ph");
    assert_eq!(ph.points[0].fields["ph"], 6.8);

    for envelope in [&conductivity, &temp, &ph] {
        assert_eq!(envelope.tags.tank_name, "reef-01");
    }
}

#[tokio::test]
async fn should_keep_ingesting_while_collector_is_unreachable() {
    let collector = Arc::new(UnreachableCollector {
        attempts: AtomicUsize::new(0),
    });
    let (dispatcher, worker) = dispatcher_service::queued("reef-01", Arc::clone(&collector), 64, 4);
    tokio::spawn(worker.run());

    let stream = "PH: 7.0\rTemp: 24.5\rEC: \rnoise\r".repeat(10);
    let source = FrameReader::new(Cursor::new(stream.into_bytes()), Terminator::CarriageReturn);
    let mut service = IngestionService::new(source, dispatcher, Shutdown::new());
    service.run().unwrap_err();

    let stats = service.stats();
    assert_eq!(stats.frames, 40);
    assert_eq!(stats.dispatched, 20);
    assert_eq!(stats.empty, 10);
    assert_eq!(stats.unrecognized, 10);

    tokio::time::timeout(Duration::from_secs(5), async {
        while collector.attempts.load(Ordering::SeqCst) < 20 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();
}
