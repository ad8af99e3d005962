use std::cmp::Ordering;


/// Total order over two payloads, shared by every thread touching the queue.
pub type Comparator<E> = Box<dyn Fn(&E, &E) -> Ordering + Send + Sync>;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder
{
    Ascending,
    Descending
}

impl SortOrder
{
    /// Whether a payload comparing as `ordering` against another one must be
    /// placed strictly before it.
    pub fn precedes(self, ordering: Ordering) -> bool
    {
        match self
        {
            SortOrder::Ascending => ordering == Ordering::Less,
            SortOrder::Descending => ordering == Ordering::Greater
        }
    }
}


/// Construction parameters of a queue.
///
/// A `capacity` of 0 means unbounded. An `order` puts the queue in sorted mode
/// and then requires a comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueConfig
{
    pub capacity: usize,
    pub order: Option<SortOrder>
}

impl QueueConfig
{
    pub fn unbounded() -> Self
    {
        Self::default()
    }

    pub fn bounded(capacity: usize) -> Self
    {
        Self
        {
            capacity: capacity,
            order: None
        }
    }

    pub fn sorted(mut self, order: SortOrder) -> Self
    {
        self.order = Some(order);
        self
    }

    pub fn is_bounded(&self) -> bool
    {
        self.capacity > 0
    }
}
