use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;
use std::sync::PoisonError;


/// Status taxonomy shared by every queue operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError
{
    #[error("Invalid queue argument")]
    Invalid,

    #[error("Queue lock could not be acquired")]
    LockFailure,

    #[error("Queue is full")]
    Full,

    #[error("Queue is empty")]
    Empty,

    #[error("Queue does not accept new data")]
    Closed,

    #[error("Out of memory")]
    OutOfMemory
}

impl<G> From<PoisonError<G>> for QueueError
{
    fn from(_: PoisonError<G>) -> Self
    {
        QueueError::LockFailure
    }
}

impl From<TryReserveError> for QueueError
{
    fn from(_: TryReserveError) -> Self
    {
        QueueError::OutOfMemory
    }
}

pub type QueueResult<T> = Result<T, QueueError>;


/// A rejected insertion. The caller keeps ownership of the payload.
pub struct PutError<E>
{
    error: QueueError,
    payload: E
}

impl<E> PutError<E>
{
    pub fn new(error: QueueError, payload: E) -> Self
    {
        Self
        {
            error: error,
            payload: payload
        }
    }

    pub fn error(&self) -> QueueError
    {
        self.error
    }

    pub fn payload(&self) -> &E
    {
        &self.payload
    }

    pub fn into_inner(self) -> E
    {
        self.payload
    }
}

impl<E> fmt::Debug for PutError<E>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("PutError").field("error", &self.error).finish_non_exhaustive()
    }
}

impl<E> fmt::Display for PutError<E>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "payload rejected: {}", self.error)
    }
}

impl<E> Error for PutError<E>
{
    fn source(&self) -> Option<&(dyn Error + 'static)>
    {
        Some(&self.error)
    }
}

impl<E> From<PutError<E>> for QueueError
{
    fn from(rejected: PutError<E>) -> Self
    {
        rejected.error
    }
}
