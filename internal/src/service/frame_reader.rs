use std::io::{ErrorKind, Read};

use log::trace;

use crate::{
    domain::{
        error::StreamError,
        frame::{LineRecord, Terminator},
    },
    port::frame_source::FrameSourceDrivenPort,
};

const CHUNK_SIZE: usize = 64;

/// Splits a raw byte stream into terminator-delimited frames.
///
/// There is no maximum frame length: the device is trusted to terminate every
/// frame, so a stream that never sends the terminator keeps the reader waiting.
pub struct FrameReader<R: Read> {
    stream: R,
    terminator: Terminator,
    buffer: Vec<u8>,
}

impl<R: Read> FrameReader<R> {
    pub fn new(stream: R, terminator: Terminator) -> Self {
        FrameReader {
            stream,
            terminator,
            buffer: Vec::new(),
        }
    }

    /// Blocks until a complete frame is available.
    pub fn next_line(&mut self) -> Result<LineRecord, StreamError> {
        loop {
            if let Some(record) = self.poll_line()? {
                return Ok(record);
            }
        }
    }

    fn take_frame(&mut self) -> Option<LineRecord> {
        let terminator = self.terminator.byte();
        let end = self.buffer.iter().position(|b| *b == terminator)?;
        let frame: Vec<u8> = self.buffer.drain(..=end).collect();
        Some(LineRecord::from_raw(&frame))
    }
}

impl<R: Read> FrameSourceDrivenPort for FrameReader<R> {
    fn poll_line(&mut self) -> Result<Option<LineRecord>, StreamError> {
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            if let Some(record) = self.take_frame() {
                trace!("Frame received: {record}");
                return Ok(Some(record));
            }
            match self.stream.read(&mut chunk) {
                Ok(0) => return Err(StreamError::Closed),
                Ok(read) => self.buffer.extend_from_slice(&chunk[..read]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => return Ok(None),
                Err(e) => return Err(StreamError::Io(e)),
            }
        }
    }
}

/// Lazy, non-restartable sequence of frames. Ends once the stream is closed.
impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<LineRecord, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_line() {
            Err(StreamError::Closed) => None,
            other => Some(other),
        }
    }
}
