use crate::domain::{error::DispatchError, reading::Reading};

/// Hands a decoded reading over for delivery. Implementations never wait on the
/// network unless they are explicitly the synchronous variant.
#[cfg_attr(test, mockall::automock)]
pub trait DispatcherDriverPort {
    fn dispatch(&self, reading: Reading) -> Result<(), DispatchError>;
}
