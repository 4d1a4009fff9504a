use crate::domain::{error::StreamError, frame::LineRecord};

#[cfg_attr(test, mockall::automock)]
pub trait FrameSourceDrivenPort {
    /// Returns `Ok(None)` when no complete frame arrived within the source's poll period.
    fn poll_line(&mut self) -> Result<Option<LineRecord>, StreamError>;
}
