use std::fmt::{Display, Formatter};

use log::{debug, trace, warn};

use crate::{
    domain::{
        error::{DecodeError, IngestionError},
        frame::LineRecord,
    },
    port::{dispatcher::DispatcherDriverPort, frame_source::FrameSourceDrivenPort},
    service::{
        record_decoder::{self, Decoded},
        shutdown::Shutdown,
    },
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    pub frames: u64,
    pub dispatched: u64,
    pub dropped: u64,
    pub empty: u64,
    pub unrecognized: u64,
    pub rejected: u64,
}

impl Display for IngestionStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frame(s), {} dispatched, {} dropped, {} empty, {} unrecognized, {} rejected",
            self.frames, self.dispatched, self.dropped, self.empty, self.unrecognized, self.rejected
        )
    }
}

/// Reads frames, decodes them and hands readings to the dispatcher until the
/// stream fails or shutdown is requested.
pub struct IngestionService<F: FrameSourceDrivenPort, D: DispatcherDriverPort> {
    source: F,
    dispatcher: D,
    shutdown: Shutdown,
    strict: bool,
    stats: IngestionStats,
}

impl<F: FrameSourceDrivenPort, D: DispatcherDriverPort> IngestionService<F, D> {
    pub fn new(source: F, dispatcher: D, shutdown: Shutdown) -> Self {
        IngestionService {
            source,
            dispatcher,
            shutdown,
            strict: false,
            stats: IngestionStats::default(),
        }
    }

    /// In strict mode the first undecodable frame stops ingestion.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn stats(&self) -> IngestionStats {
        self.stats
    }

    pub fn run(&mut self) -> Result<IngestionStats, IngestionError> {
        while !self.shutdown.is_triggered() {
            if let Some(line) = self.source.poll_line()? {
                self.process(&line)?;
            }
        }
        debug!("Shutdown requested, ingestion stopped");
        Ok(self.stats)
    }

    pub fn process(&mut self, line: &LineRecord) -> Result<(), DecodeError> {
        self.stats.frames += 1;
        match record_decoder::decode(line) {
            Ok(Decoded::Reading(reading)) => {
                debug!("Decoded {reading:?}");
                match self.dispatcher.dispatch(reading) {
                    Ok(()) => self.stats.dispatched += 1,
                    Err(e) => {
                        warn!("{e}");
                        self.stats.dropped += 1;
                    }
                }
            }
            Ok(Decoded::Empty(kind)) => {
                debug!("No {} value this cycle", kind.name());
                self.stats.empty += 1;
            }
            Ok(Decoded::Unrecognized) => {
                trace!("Ignoring unrecognized frame {line:?}");
                self.stats.unrecognized += 1;
            }
            Err(e) => {
                self.stats.rejected += 1;
                if self.strict {
                    return Err(e);
                }
                warn!("Skipping frame \"{line}\": {e}");
            }
        }
        Ok(())
    }
}
