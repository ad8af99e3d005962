mod element_chain;
mod error;
mod queue_config;
mod sync_queue;

pub use error::PutError;
pub use error::QueueError;
pub use error::QueueResult;
pub use queue_config::Comparator;
pub use queue_config::QueueConfig;
pub use queue_config::SortOrder;
pub use sync_queue::SyncQueue;


/// Blocking producer/consumer view of a queue.
pub trait MpmcQueue<E> : Send + Sync
{
    fn put_wait(&self, payload: E) -> Result<(), PutError<E>>;
    fn get_wait(&self) -> QueueResult<E>;
    fn close(&self) -> QueueResult<()>;
    fn elements(&self) -> QueueResult<usize>;
    fn capacity(&self) -> usize;
}

impl<E: Send> MpmcQueue<E> for SyncQueue<E>
{
    fn put_wait(&self, payload: E) -> Result<(), PutError<E>>
    {
        SyncQueue::put_wait(self, payload)
    }

    fn get_wait(&self) -> QueueResult<E>
    {
        SyncQueue::get_wait(self)
    }

    fn close(&self) -> QueueResult<()>
    {
        self.set_accepting(false)
    }

    fn elements(&self) -> QueueResult<usize>
    {
        SyncQueue::elements(self)
    }

    fn capacity(&self) -> usize
    {
        SyncQueue::capacity(self)
    }
}
