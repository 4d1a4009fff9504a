use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Byte stream closed")]
    Closed,
    #[error("Unable to read byte stream: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum DecodeError {
    #[error("{measurement} value is not valid UTF-8")]
    InvalidUtf8 { measurement: &'static str },
    #[error("{measurement} expects {expected} field(s), got {found}")]
    FieldCount {
        measurement: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{measurement} field `{field}` is not a number: {value:?}")]
    InvalidNumber {
        measurement: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("{measurement} field `{field}` is not finite: {value:?}")]
    NonFinite {
        measurement: &'static str,
        field: &'static str,
        value: String,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum SendError {
    #[error("Unable to serialize envelope: {0}")]
    Serialization(String),
    #[error("Collector unreachable: {0}")]
    Transport(String),
    #[error("Collector did not answer in time")]
    Timeout,
    #[error("Collector rejected the envelope with status {0}")]
    Status(u16),
}

#[derive(Error, Debug, PartialEq)]
pub enum DispatchError {
    #[error("Send queue is full, {0} envelope dropped")]
    QueueFull(&'static str),
    #[error("Send worker is gone, {0} envelope dropped")]
    Closed(&'static str),
}

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error("Frame rejected in strict mode: {0}")]
    Decode(#[from] DecodeError),
}
