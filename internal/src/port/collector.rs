use crate::domain::{envelope::Envelope, error::SendError};

pub trait CollectorDrivenPort {
    fn send(&self, envelope: Envelope) -> impl Future<Output = Result<(), SendError>> + Send;
}
