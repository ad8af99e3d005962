use super::element_chain::ElementChain;
use super::error::PutError;
use super::error::QueueError;
use super::error::QueueResult;
use super::queue_config::Comparator;
use super::queue_config::QueueConfig;
use super::queue_config::SortOrder;

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::sync::Condvar;
use std::sync::Mutex;
use std::sync::MutexGuard;
use crossbeam::utils::CachePadded;
use log::debug;
use log::trace;
use log::warn;


struct SyncQueueUnsync<E>
{
    elements: ElementChain<E>,
    accepting: bool
}

struct InsertionOrder<E>
{
    order: SortOrder,
    comparator: Comparator<E>
}

/// Thread-safe queue guarded by one mutex and two condition variables.
///
/// Depending on construction it is an unbounded FIFO, a bounded FIFO, or a
/// sorted queue (optionally bounded) that keeps its elements in comparator
/// order with equal keys in arrival order. Share it between threads with `Arc`.
///
/// Comparators, filters and destructors passed to the queue run while its lock
/// is held, except flush destructors, which run after the lock is released.
/// None of them may call back into the same queue.
pub struct SyncQueue<E>
{
    config: QueueConfig,
    insertionOrder: Option<InsertionOrder<E>>,

    mutex: CachePadded<Mutex<SyncQueueUnsync<E>>>,
    notEmptyCondition: CachePadded<Condvar>,
    notFullCondition: CachePadded<Condvar>
}

impl<E> SyncQueue<E>
{
    pub fn new() -> Self
    {
        Self::create(QueueConfig::unbounded(), None)
    }

    pub fn bounded(maxElements: usize) -> Self
    {
        Self::create(QueueConfig::bounded(maxElements), None)
    }

    pub fn sorted<C>(order: SortOrder, comparator: C) -> Self
        where C: Fn(&E, &E) -> Ordering + Send + Sync + 'static
    {
        Self::create(QueueConfig::unbounded().sorted(order), Some(InsertionOrder
            {
                order: order,
                comparator: Box::new(comparator)
            }))
    }

    pub fn bounded_sorted<C>(maxElements: usize, order: SortOrder, comparator: C) -> Self
        where C: Fn(&E, &E) -> Ordering + Send + Sync + 'static
    {
        Self::create(QueueConfig::bounded(maxElements).sorted(order), Some(InsertionOrder
            {
                order: order,
                comparator: Box::new(comparator)
            }))
    }

    /// Builds a queue from `config`. Sorted mode without a comparator is
    /// `Invalid`; a comparator without sorted mode is ignored.
    pub fn with_config(config: QueueConfig, comparator: Option<Comparator<E>>) -> QueueResult<Self>
    {
        let insertionOrder: Option<InsertionOrder<E>> = match (config.order, comparator)
        {
            (Some(order), Some(comparator)) => Some(InsertionOrder
                {
                    order: order,
                    comparator: comparator
                }),
            (Some(_), None) => return Err(QueueError::Invalid),
            (None, _) => None
        };
        Ok(Self::create(config, insertionOrder))
    }

    fn create(config: QueueConfig, insertionOrder: Option<InsertionOrder<E>>) -> Self
    {
        Self
        {
            config: config,
            insertionOrder: insertionOrder,
            mutex: CachePadded::new(Mutex::new(SyncQueueUnsync
                {
                    elements: ElementChain::new(),
                    accepting: true
                })),
            notEmptyCondition: CachePadded::new(Condvar::new()),
            notFullCondition: CachePadded::new(Condvar::new())
        }
    }

    /// Maximum number of elements, 0 when unbounded.
    pub fn capacity(&self) -> usize
    {
        self.config.capacity
    }

    /// Insertion order of a sorted queue, `None` for FIFO queues.
    pub fn order(&self) -> Option<SortOrder>
    {
        self.config.order
    }

    pub fn put(&self, payload: E) -> Result<(), PutError<E>>
    {
        let mut selfUnsync = match self.lock()
        {
            Ok(selfUnsync) => selfUnsync,
            Err(error) => return Err(PutError::new(error, payload))
        };

        if !selfUnsync.accepting
        {
            return Err(PutError::new(QueueError::Closed, payload));
        }
        if self.isFull(&selfUnsync)
        {
            return Err(PutError::new(QueueError::Full, payload));
        }

        self.insert(&mut selfUnsync, payload)
    }

    /// Like `put`, but waits for space on a full bounded queue. Fails with
    /// `Closed` if the queue stops accepting while waiting.
    pub fn put_wait(&self, payload: E) -> Result<(), PutError<E>>
    {
        let mut selfUnsync = match self.lock()
        {
            Ok(selfUnsync) => selfUnsync,
            Err(error) => return Err(PutError::new(error, payload))
        };

        while selfUnsync.accepting && self.isFull(&selfUnsync)
        {
            trace!("Queue full at {} elements, producer waiting", self.config.capacity);
            selfUnsync = match self.notFullCondition.wait(selfUnsync)
            {
                Ok(selfUnsync) => selfUnsync,
                Err(error) => return Err(PutError::new(error.into(), payload))
            };
        }

        if !selfUnsync.accepting
        {
            return Err(PutError::new(QueueError::Closed, payload));
        }

        self.insert(&mut selfUnsync, payload)
    }

    /// Admits `payload` into a full bounded sorted queue by evicting the
    /// current last element, provided `payload` sorts strictly before it.
    ///
    /// Returns the evicted payload, or `None` when there was room anyway.
    /// Fails with `Full` when the queue is full and either unsorted or
    /// `payload` would not sort ahead of the last element.
    pub fn put_evicting(&self, payload: E) -> Result<Option<E>, PutError<E>>
    {
        let mut selfUnsync = match self.lock()
        {
            Ok(selfUnsync) => selfUnsync,
            Err(error) => return Err(PutError::new(error, payload))
        };

        if !selfUnsync.accepting
        {
            return Err(PutError::new(QueueError::Closed, payload));
        }
        if !self.isFull(&selfUnsync)
        {
            self.insert(&mut selfUnsync, payload)?;
            return Ok(None);
        }

        let displacesLast: bool = match (&self.insertionOrder, selfUnsync.elements.back())
        {
            (Some(insertionOrder), Some(last)) =>
                insertionOrder.order.precedes((insertionOrder.comparator)(&payload, last)),
            _ => false
        };
        if !displacesLast
        {
            return Err(PutError::new(QueueError::Full, payload));
        }

        self.insert(&mut selfUnsync, payload)?;
        let evicted: Option<E> = selfUnsync.elements.pop_back();
        debug!("Full queue evicted its last element to admit a new one");
        Ok(evicted)
    }

    pub fn get(&self) -> QueueResult<E>
    {
        let mut selfUnsync = self.lock()?;

        let payload: E = selfUnsync.elements.pop_front().ok_or(QueueError::Empty)?;
        self.notifySpaceFreed();

        Ok(payload)
    }

    /// Like `get`, but waits for data on an empty queue. Elements still queued
    /// after the queue stopped accepting are handed out; once it is empty the
    /// call fails with `Closed`.
    pub fn get_wait(&self) -> QueueResult<E>
    {
        let mut selfUnsync = self.lock()?;

        while selfUnsync.elements.is_empty()
        {
            if !selfUnsync.accepting
            {
                return Err(QueueError::Closed);
            }
            trace!("Queue empty, consumer waiting");
            selfUnsync = self.notEmptyCondition.wait(selfUnsync)?;
        }

        let payload: E = selfUnsync.elements.pop_front().ok_or(QueueError::Empty)?;
        self.notifySpaceFreed();

        Ok(payload)
    }

    /// Removes the first element for which `compare(element, reference)` is
    /// `Equal`. Never blocks; fails with `Empty` when nothing matches.
    pub fn get_filtered<R, C>(&self, mut compare: C, reference: &R) -> QueueResult<E>
        where R: ?Sized,
              C: FnMut(&E, &R) -> Ordering
    {
        self.get_matching(|candidate| compare(candidate, reference) == Ordering::Equal)
    }

    /// Removes the first element satisfying `predicate`. Never blocks; fails
    /// with `Empty` when nothing matches, leaving the queue untouched.
    pub fn get_matching<P>(&self, predicate: P) -> QueueResult<E>
        where P: FnMut(&E) -> bool
    {
        let mut selfUnsync = self.lock()?;

        let payload: E = selfUnsync.elements.remove_first(predicate).ok_or(QueueError::Empty)?;
        self.notifySpaceFreed();

        Ok(payload)
    }

    /// Drops every element. Returns how many were removed.
    pub fn flush(&self) -> QueueResult<usize>
    {
        self.flush_complete(drop)
    }

    /// Removes every element and hands each payload to `destructor`.
    pub fn flush_complete<D>(&self, destructor: D) -> QueueResult<usize>
        where D: FnMut(E)
    {
        let detached: ElementChain<E> =
        {
            let mut selfUnsync = self.lock()?;
            self.detach(&mut selfUnsync)
        };

        Ok(Self::dispose(detached, destructor))
    }

    /// Replaces the whole content by `payload` in one critical section.
    pub fn flush_put(&self, payload: E) -> Result<usize, PutError<E>>
    {
        self.flush_complete_put(drop, payload)
    }

    /// Replaces the whole content by `payload` in one critical section, handing
    /// the removed payloads to `destructor`. A queue that does not accept new
    /// data is left untouched.
    pub fn flush_complete_put<D>(&self, destructor: D, payload: E) -> Result<usize, PutError<E>>
        where D: FnMut(E)
    {
        let detached: ElementChain<E> =
        {
            let mut selfUnsync = match self.lock()
            {
                Ok(selfUnsync) => selfUnsync,
                Err(error) => return Err(PutError::new(error, payload))
            };

            if !selfUnsync.accepting
            {
                return Err(PutError::new(QueueError::Closed, payload));
            }

            let detached: ElementChain<E> = self.detach(&mut selfUnsync);
            if let Err(rejected) = self.insert(&mut selfUnsync, payload)
            {
                selfUnsync.elements = detached;
                return Err(rejected);
            }
            detached
        };

        Ok(Self::dispose(detached, destructor))
    }

    pub fn destroy(self) -> QueueResult<usize>
    {
        self.destroy_complete(drop)
    }

    /// Tears the queue down, handing every remaining payload to `destructor`.
    pub fn destroy_complete<D>(self, destructor: D) -> QueueResult<usize>
        where D: FnMut(E)
    {
        let selfUnsync: SyncQueueUnsync<E> = CachePadded::into_inner(self.mutex).into_inner()?;
        debug!("Destroying queue with {} remaining elements", selfUnsync.elements.len());

        Ok(Self::dispose(selfUnsync.elements, destructor))
    }

    pub fn elements(&self) -> QueueResult<usize>
    {
        Ok(self.lock()?.elements.len())
    }

    pub fn empty(&self) -> QueueResult<bool>
    {
        Ok(self.lock()?.elements.is_empty())
    }

    /// Clearing the flag releases every blocked `put_wait` and `get_wait`.
    pub fn set_accepting(&self, accepting: bool) -> QueueResult<()>
    {
        {
            let mut selfUnsync = self.lock()?;
            selfUnsync.accepting = accepting;
        }

        if !accepting
        {
            debug!("Queue stopped accepting new data, waking all waiters");
            self.notEmptyCondition.notify_all();
            self.notFullCondition.notify_all();
        }

        Ok(())
    }

    pub fn accepting(&self) -> QueueResult<bool>
    {
        Ok(self.lock()?.accepting)
    }

    /// Stable merge sort of the current content by `compare`.
    ///
    /// On a sorted queue the queue's own order stays primary and `compare`
    /// only reorders runs of equal keys.
    pub fn sort<C>(&self, mut compare: C) -> QueueResult<()>
        where C: FnMut(&E, &E) -> Ordering
    {
        let mut selfUnsync = self.lock()?;
        match &self.insertionOrder
        {
            Some(insertionOrder) =>
            {
                selfUnsync.elements.sort_by(&mut |a: &E, b: &E|
                    {
                        let primary: Ordering = match insertionOrder.order
                        {
                            SortOrder::Ascending => (insertionOrder.comparator)(a, b),
                            SortOrder::Descending => (insertionOrder.comparator)(a, b).reverse()
                        };
                        primary.then_with(|| compare(a, b))
                    });
            }
            None =>
            {
                selfUnsync.elements.sort_by(&mut compare);
            }
        }
        debug!("Sorted {} queued elements", selfUnsync.elements.len());

        Ok(())
    }

    fn lock(&self) -> QueueResult<MutexGuard<'_, SyncQueueUnsync<E>>>
    {
        self.mutex.lock().map_err(|error|
            {
                warn!("Queue mutex is poisoned");
                error.into()
            })
    }

    fn isFull(&self, selfUnsync: &SyncQueueUnsync<E>) -> bool
    {
        self.config.is_bounded()  &&  selfUnsync.elements.len() >= self.config.capacity
    }

    fn insert(&self, selfUnsync: &mut SyncQueueUnsync<E>, payload: E) -> Result<(), PutError<E>>
    {
        match &self.insertionOrder
        {
            Some(insertionOrder) =>
            {
                selfUnsync.elements.insert_ordered(payload, |new, existing|
                    insertionOrder.order.precedes((insertionOrder.comparator)(new, existing)))?;
            }
            None =>
            {
                selfUnsync.elements.push_back(payload)?;
            }
        }

        self.notEmptyCondition.notify_one();
        Ok(())
    }

    fn detach(&self, selfUnsync: &mut SyncQueueUnsync<E>) -> ElementChain<E>
    {
        let detached: ElementChain<E> = mem::replace(&mut selfUnsync.elements, ElementChain::new());
        if !detached.is_empty()
        {
            debug!("Flushing {} queued elements", detached.len());
            if self.config.is_bounded()
            {
                self.notFullCondition.notify_all();
            }
        }
        detached
    }

    fn dispose<D>(detached: ElementChain<E>, mut destructor: D) -> usize
        where D: FnMut(E)
    {
        let mut disposed: usize = 0;
        for payload in detached
        {
            destructor(payload);
            disposed += 1;
        }
        disposed
    }

    fn notifySpaceFreed(&self)
    {
        if self.config.is_bounded()
        {
            self.notFullCondition.notify_one();
        }
    }
}

impl<E> Default for SyncQueue<E>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for SyncQueue<E>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let mut debug_struct = f.debug_struct("SyncQueue");
        debug_struct.field("capacity", &self.config.capacity).field("order", &self.order());
        match self.mutex.lock()
        {
            Ok(selfUnsync) =>
            {
                let elements: Vec<&E> = selfUnsync.elements.iter().collect();
                debug_struct.field("accepting", &selfUnsync.accepting).field("elements", &elements);
            }
            Err(_) =>
            {
                debug_struct.field("elements", &"<poisoned>");
            }
        }
        debug_struct.finish()
    }
}


#[cfg(test)]
mod tests
{
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn drain<E>(queue: &SyncQueue<E>) -> Vec<E>
    {
        let mut drained: Vec<E> = Vec::new();
        while let Ok(payload) = queue.get()
        {
            drained.push(payload);
        }
        drained
    }

    #[test]
    fn unbounded_queue_is_fifo()
    {
        let queue: SyncQueue<&str> = SyncQueue::new();
        for payload in ["p1", "p2", "p3", "p4"]
        {
            queue.put(payload).unwrap();
        }

        assert_eq!(queue.get().unwrap(), "p1");
        assert_eq!(queue.get().unwrap(), "p2");
        assert_eq!(queue.elements().unwrap(), 2);
        assert!(!queue.empty().unwrap());
        assert_eq!(queue.capacity(), 0);
        assert_eq!(queue.order(), None);
    }

    #[test]
    fn get_on_empty_queue_fails_with_empty()
    {
        let queue: SyncQueue<u8> = SyncQueue::new();

        assert_eq!(queue.get(), Err(QueueError::Empty));
        assert!(queue.empty().unwrap());
    }

    #[test]
    fn bounded_put_rejects_when_full()
    {
        let queue: SyncQueue<u32> = SyncQueue::bounded(2);
        queue.put(1).unwrap();
        queue.put(2).unwrap();

        let rejected: PutError<u32> = queue.put(3).unwrap_err();
        assert_eq!(rejected.error(), QueueError::Full);
        assert_eq!(rejected.into_inner(), 3);
        assert_eq!(queue.elements().unwrap(), 2);
    }

    #[test]
    fn sorted_descending_keeps_equal_keys_in_arrival_order()
    {
        let queue: SyncQueue<(u32, char)> = SyncQueue::sorted(SortOrder::Descending, |a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
        for payload in [(2, 'a'), (5, 'b'), (2, 'c'), (9, 'd'), (5, 'e')]
        {
            queue.put(payload).unwrap();
        }

        assert_eq!(drain(&queue), vec![(9, 'd'), (5, 'b'), (5, 'e'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn closed_queue_rejects_puts_but_keeps_content()
    {
        let queue: SyncQueue<u32> = SyncQueue::new();
        queue.put(1).unwrap();
        queue.set_accepting(false).unwrap();

        assert!(!queue.accepting().unwrap());
        assert_eq!(queue.put(2).unwrap_err().error(), QueueError::Closed);
        assert_eq!(queue.put_wait(3).unwrap_err().error(), QueueError::Closed);
        assert_eq!(queue.get_wait().unwrap(), 1);
        assert_eq!(queue.get_wait(), Err(QueueError::Closed));

        queue.set_accepting(true).unwrap();
        queue.put(4).unwrap();
        assert_eq!(queue.get_wait().unwrap(), 4);
    }

    #[test]
    fn get_filtered_removes_first_match_only()
    {
        let queue: SyncQueue<(u32, char)> = SyncQueue::new();
        for payload in [(1, 'a'), (2, 'b'), (1, 'c'), (3, 'd')]
        {
            queue.put(payload).unwrap();
        }

        let by_key = |candidate: &(u32, char), key: &u32| candidate.0.cmp(key);
        assert_eq!(queue.get_filtered(by_key, &1).unwrap(), (1, 'a'));
        assert_eq!(queue.get_filtered(by_key, &7), Err(QueueError::Empty));
        assert_eq!(drain(&queue), vec![(2, 'b'), (1, 'c'), (3, 'd')]);
    }

    #[test]
    fn get_matching_frees_bounded_capacity()
    {
        let queue: SyncQueue<u32> = SyncQueue::bounded(2);
        queue.put(10).unwrap();
        queue.put(20).unwrap();

        assert_eq!(queue.get_matching(|value| *value == 20).unwrap(), 20);
        queue.put(30).unwrap();
        assert_eq!(drain(&queue), vec![10, 30]);
    }

    #[test]
    fn flush_complete_hands_out_every_payload()
    {
        let queue: SyncQueue<u32> = SyncQueue::new();
        for payload in 0..5
        {
            queue.put(payload).unwrap();
        }

        let mut destroyed: Vec<u32> = Vec::new();
        assert_eq!(queue.flush_complete(|payload| destroyed.push(payload)).unwrap(), 5);
        assert_eq!(destroyed, vec![0, 1, 2, 3, 4]);
        assert!(queue.empty().unwrap());

        queue.put(42).unwrap();
        assert_eq!(queue.flush().unwrap(), 1);
        assert_eq!(queue.flush().unwrap(), 0);
    }

    #[test]
    fn flush_put_leaves_exactly_one_element()
    {
        let queue: SyncQueue<u32> = SyncQueue::bounded(3);
        for payload in 1..=3
        {
            queue.put(payload).unwrap();
        }

        let mut destroyed: Vec<u32> = Vec::new();
        assert_eq!(queue.flush_complete_put(|payload| destroyed.push(payload), 99).unwrap(), 3);
        assert_eq!(destroyed, vec![1, 2, 3]);
        assert_eq!(queue.flush_put(100).unwrap(), 1);
        assert_eq!(drain(&queue), vec![100]);
    }

    #[test]
    fn flush_put_on_closed_queue_changes_nothing()
    {
        let queue: SyncQueue<u32> = SyncQueue::new();
        queue.put(1).unwrap();
        queue.set_accepting(false).unwrap();

        let rejected: PutError<u32> = queue.flush_put(2).unwrap_err();
        assert_eq!(rejected.error(), QueueError::Closed);
        assert_eq!(queue.elements().unwrap(), 1);
    }

    #[test]
    fn destroy_complete_visits_each_payload_once()
    {
        let queue: SyncQueue<String> = SyncQueue::new();
        for name in ["a", "b", "c"]
        {
            queue.put(name.to_string()).unwrap();
        }

        let mut destroyed: Vec<String> = Vec::new();
        assert_eq!(queue.destroy_complete(|payload| destroyed.push(payload)).unwrap(), 3);
        destroyed.sort();
        assert_eq!(destroyed, vec!["a", "b", "c"]);
    }

    #[test]
    fn sort_reorders_fifo_queue()
    {
        let queue: SyncQueue<i32> = SyncQueue::new();
        for payload in [3, 2, 4, 1]
        {
            queue.put(payload).unwrap();
        }
        queue.sort(|a: &i32, b: &i32| a.cmp(b)).unwrap();
        queue.put(0).unwrap();
        assert_eq!(drain(&queue), vec![1, 2, 3, 4, 0]);
    }

    #[test]
    fn sort_on_sorted_queue_only_reorders_equal_keys()
    {
        let queue: SyncQueue<(u32, char)> = SyncQueue::sorted(SortOrder::Descending,
            |a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
        for payload in [(1, 'z'), (2, 'y'), (1, 'a'), (2, 'b'), (3, 'm')]
        {
            queue.put(payload).unwrap();
        }

        queue.sort(|a: &(u32, char), b: &(u32, char)| a.1.cmp(&b.1)).unwrap();
        queue.put((2, 'a')).unwrap();

        assert_eq!(drain(&queue), vec![(3, 'm'), (2, 'b'), (2, 'y'), (2, 'a'), (1, 'a'), (1, 'z')]);
    }

    #[test]
    fn constructors_report_their_configuration()
    {
        let ascending = |a: &u32, b: &u32| a.cmp(b);

        let queue: SyncQueue<u32> = SyncQueue::new();
        assert_eq!((queue.capacity(), queue.order()), (0, None));
        let queue: SyncQueue<u32> = SyncQueue::bounded(5);
        assert_eq!((queue.capacity(), queue.order()), (5, None));
        let queue: SyncQueue<u32> = SyncQueue::sorted(SortOrder::Descending, ascending);
        assert_eq!((queue.capacity(), queue.order()), (0, Some(SortOrder::Descending)));
        let queue: SyncQueue<u32> = SyncQueue::bounded_sorted(2, SortOrder::Ascending, ascending);
        assert_eq!((queue.capacity(), queue.order()), (2, Some(SortOrder::Ascending)));

        let unbounded: SyncQueue<u32> = SyncQueue::bounded(0);
        for payload in 0..100
        {
            unbounded.put(payload).unwrap();
        }
        assert_eq!(unbounded.elements().unwrap(), 100);
    }

    #[test]
    fn put_evicting_displaces_the_worst_element()
    {
        let queue: SyncQueue<u32> = SyncQueue::bounded_sorted(3, SortOrder::Ascending, |a: &u32, b: &u32| a.cmp(b));
        assert_eq!(queue.put_evicting(5).unwrap(), None);
        queue.put(1).unwrap();
        queue.put(9).unwrap();

        assert_eq!(queue.put_evicting(3).unwrap(), Some(9));
        assert_eq!(queue.put_evicting(5).unwrap_err().error(), QueueError::Full);
        assert_eq!(queue.put_evicting(7).unwrap_err().into_inner(), 7);
        assert_eq!(drain(&queue), vec![1, 3, 5]);
    }

    #[test]
    fn put_evicting_on_full_fifo_queue_is_full()
    {
        let queue: SyncQueue<u32> = SyncQueue::bounded(1);
        queue.put(8).unwrap();

        assert_eq!(queue.put_evicting(1).unwrap_err().error(), QueueError::Full);
    }

    #[test]
    fn with_config_requires_a_comparator_for_sorted_mode()
    {
        let config: QueueConfig = QueueConfig::bounded(2).sorted(SortOrder::Ascending);
        assert!(SyncQueue::<u32>::with_config(config, None).is_err());

        let comparator: Comparator<u32> = Box::new(|a: &u32, b: &u32| a.cmp(b));
        let queue: SyncQueue<u32> = SyncQueue::with_config(config, Some(comparator)).unwrap();
        assert_eq!(queue.capacity(), 2);
        assert_eq!(queue.order(), Some(SortOrder::Ascending));

        let fifo: SyncQueue<u32> = SyncQueue::with_config(QueueConfig::unbounded(), None).unwrap();
        assert_eq!(fifo.order(), None);
    }

    #[test]
    fn poisoned_queue_reports_lock_failure()
    {
        let queue: Arc<SyncQueue<u32>> = Arc::new(SyncQueue::new());
        queue.put(1).unwrap();

        let poisoner: Arc<SyncQueue<u32>> = queue.clone();
        let outcome = thread::spawn(move ||
            {
                let _ = poisoner.get_matching(|_| panic!("filter panicked"));
            }).join();
        assert!(outcome.is_err());

        assert_eq!(queue.get(), Err(QueueError::LockFailure));
        assert_eq!(queue.put(2).unwrap_err().error(), QueueError::LockFailure);
        assert_eq!(queue.elements(), Err(QueueError::LockFailure));
    }

    #[test]
    fn blocked_get_wakes_on_put()
    {
        let queue: Arc<SyncQueue<u32>> = Arc::new(SyncQueue::new());

        let consumer_queue: Arc<SyncQueue<u32>> = queue.clone();
        let consumer = thread::spawn(move || consumer_queue.get_wait());

        thread::sleep(Duration::from_millis(50));
        queue.put(7).unwrap();

        assert_eq!(consumer.join().unwrap(), Ok(7));
    }

    #[test]
    fn debug_lists_elements()
    {
        let queue: SyncQueue<u32> = SyncQueue::bounded(4);
        queue.put(1).unwrap();
        queue.put(2).unwrap();

        let rendered: String = format!("{:?}", queue);
        assert!(rendered.contains("capacity: 4"));
        assert!(rendered.contains("elements: [1, 2]"));
    }
}
