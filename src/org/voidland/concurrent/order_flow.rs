use super::VERBOSE;
use super::order_book::Order;
use super::order_book::Side;
use super::queue::MpmcQueue;
use super::queue::QueueError;

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;
use std::thread::JoinHandle;
use concurrent_queue::ConcurrentQueue;
use log::debug;
use log::info;
use log::warn;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowTally
{
    pub orders: usize,
    pub oid_sum: u64
}

impl FlowTally
{
    fn record(&mut self, order: &Order)
    {
        self.orders += 1;
        self.oid_sum += order.oid as u64;
    }

    fn merge(&mut self, other: FlowTally)
    {
        self.orders += other.orders;
        self.oid_sum += other.oid_sum;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowSummary
{
    pub produced: FlowTally,
    pub consumed: FlowTally,
    pub rejected: usize
}

impl FlowSummary
{
    pub fn is_lossless(&self) -> bool
    {
        self.produced == self.consumed  &&  self.rejected == 0
    }
}


/// Producers push generated orders through a shared queue with `put_wait`;
/// consumers take them with `get_wait` until the queue is closed and drained.
pub struct OrderFlow
{
    verbose: bool,

    producerCount: usize,
    consumerCount: usize,
    ordersPerProducer: usize,
    queue: Arc<dyn MpmcQueue<Order>>,

    rejected: AtomicUsize,
    consumerThreads: ConcurrentQueue<JoinHandle<FlowTally>>
}

impl OrderFlow
{
    pub fn new(producerCount: usize, consumerCount: usize, ordersPerProducer: usize, queue: Arc<dyn MpmcQueue<Order>>) -> Self
    {
        Self
        {
            verbose: *VERBOSE,
            producerCount: producerCount,
            consumerCount: consumerCount,
            ordersPerProducer: ordersPerProducer,
            queue: queue,
            rejected: AtomicUsize::new(0),
            consumerThreads: ConcurrentQueue::<JoinHandle<FlowTally>>::unbounded()
        }
    }

    /// Deterministic order number `index` of producer `producer`.
    pub fn generate_order(producer: usize, index: usize, ordersPerProducer: usize) -> Order
    {
        let oid: u32 = (producer * ordersPerProducer + index + 1) as u32;
        let side: Side = if oid % 2 == 0 { Side::Buy } else { Side::Sell };
        let price: f64 = ((oid as u64 * 7919) % 10_000) as f64 / 100.0;
        Order::new(oid, side, oid % 100 + 1, price)
    }

    pub fn run(self: &Arc<Self>) -> FlowSummary
    {
        let producerThreads: Vec<JoinHandle<FlowTally>> = self.startProducerThreads();
        self.startConsumerThreads();

        let mut produced: FlowTally = FlowTally::default();
        for producerThread in producerThreads
        {
            match producerThread.join()
            {
                Ok(tally) => produced.merge(tally),
                Err(_) => warn!("A producer thread panicked")
            }
        }

        if let Err(error) = self.queue.close()
        {
            warn!("Could not close the order queue: {}", error);
        }

        let mut consumed: FlowTally = FlowTally::default();
        while let Ok(consumerThread) = self.consumerThreads.pop()
        {
            match consumerThread.join()
            {
                Ok(tally) => consumed.merge(tally),
                Err(_) => warn!("A consumer thread panicked")
            }
        }

        let summary: FlowSummary = FlowSummary
        {
            produced: produced,
            consumed: consumed,
            rejected: self.rejected.load(Ordering::SeqCst)
        };
        info!("Produced {} orders, consumed {}, rejected {}", produced.orders, consumed.orders, summary.rejected);
        summary
    }

    fn startProducerThreads(self: &Arc<Self>) -> Vec<JoinHandle<FlowTally>>
    {
        let mut producerThreads: Vec<JoinHandle<FlowTally>> = Vec::with_capacity(self.producerCount);

        for producer in 0..self.producerCount
        {
            let self_: Arc<Self> = self.clone();
            producerThreads.push(thread::spawn(move ||
                {
                    let mut tally: FlowTally = FlowTally::default();
                    for index in 0..self_.ordersPerProducer
                    {
                        let order: Order = OrderFlow::generate_order(producer, index, self_.ordersPerProducer);
                        let accepted: Order = order.clone();
                        match self_.queue.put_wait(order)
                        {
                            Ok(()) =>
                            {
                                tally.record(&accepted);
                            }
                            Err(rejected) =>
                            {
                                debug!("Producer {} dropped order {}: {}", producer, rejected.payload().oid, rejected);
                                self_.rejected.fetch_add(1, Ordering::SeqCst);
                                if rejected.error() == QueueError::Closed
                                {
                                    break;
                                }
                            }
                        }
                    }
                    tally
                }));
        }

        producerThreads
    }

    fn startConsumerThreads(self: &Arc<Self>)
    {
        for consumer in 0..self.consumerCount
        {
            let _ = self.consumerThreads.push(self.startConsumerThread(consumer));
        }
    }

    fn startConsumerThread(self: &Arc<Self>, consumer: usize) -> JoinHandle<FlowTally>
    {
        let self_: Arc<Self> = self.clone();
        thread::spawn(move ||
            {
                let mut tally: FlowTally = FlowTally::default();
                loop
                {
                    match self_.queue.get_wait()
                    {
                        Ok(order) =>
                        {
                            if self_.verbose
                            {
                                eprintln!("consumer {}: {:?}", consumer, order);
                            }
                            tally.record(&order);
                        }
                        Err(QueueError::Closed) =>
                        {
                            break;
                        }
                        Err(error) =>
                        {
                            warn!("Consumer {} stopped: {}", consumer, error);
                            break;
                        }
                    }
                }
                debug!("Consumer {} took {} orders", consumer, tally.orders);
                tally
            })
    }
}


#[cfg(test)]
mod tests
{
    use super::*;
    use crate::org::voidland::concurrent::order_book::cmp_sell_orders;
    use crate::org::voidland::concurrent::queue::SortOrder;
    use crate::org::voidland::concurrent::queue::SyncQueue;

    #[test]
    fn generated_orders_have_distinct_oids()
    {
        let first: Order = OrderFlow::generate_order(0, 0, 10);
        let last: Order = OrderFlow::generate_order(2, 9, 10);

        assert_eq!(first.oid, 1);
        assert_eq!(last.oid, 30);
        assert_eq!(first.side, Side::Sell);
        assert_eq!(OrderFlow::generate_order(0, 1, 10).side, Side::Buy);
        assert!(first.price >= 0.0 && first.price < 100.0);
    }

    #[test]
    fn bounded_sorted_flow_loses_nothing()
    {
        let queue: Arc<dyn MpmcQueue<Order>> = Arc::new(SyncQueue::bounded_sorted(8, SortOrder::Ascending, cmp_sell_orders));
        let flow: Arc<OrderFlow> = Arc::new(OrderFlow::new(3, 2, 200, queue.clone()));

        let summary: FlowSummary = flow.run();

        assert!(summary.is_lossless(), "{:?}", summary);
        assert_eq!(summary.consumed.orders, 600);
        assert_eq!(summary.consumed.oid_sum, (1..=600u64).sum::<u64>());
        assert_eq!(queue.elements().unwrap(), 0);
    }

    #[test]
    fn unbounded_flow_with_single_consumer()
    {
        let queue: Arc<dyn MpmcQueue<Order>> = Arc::new(SyncQueue::new());
        let flow: Arc<OrderFlow> = Arc::new(OrderFlow::new(2, 1, 50, queue));

        let summary: FlowSummary = flow.run();

        assert!(summary.is_lossless());
        assert_eq!(summary.produced.orders, 100);
    }
}
