#![allow(non_snake_case)]

use voidland_queue::org::voidland::concurrent::order_book::Order;
use voidland_queue::org::voidland::concurrent::order_book::Side;
use voidland_queue::org::voidland::concurrent::order_book::cmp_sell_orders;
use voidland_queue::org::voidland::concurrent::order_flow::FlowSummary;
use voidland_queue::org::voidland::concurrent::order_flow::OrderFlow;
use voidland_queue::org::voidland::concurrent::queue::MpmcQueue;
use voidland_queue::org::voidland::concurrent::queue::QueueError;
use voidland_queue::org::voidland::concurrent::queue::SortOrder;
use voidland_queue::org::voidland::concurrent::queue::SyncQueue;
use voidland_queue::org::voidland::logging::init_logging;

use std::error::Error;
use std::sync::Arc;
use std::thread::available_parallelism;
use clap::Parser;
use clap::ValueEnum;
use log::info;


#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DemoMode
{
    Unsorted,
    Sorted,
    BoundedSorted,
    Merge,
    OrderBook
}

#[derive(Debug, Parser)]
#[command(name = "queue_demo", about = "Runs the synchronized queue through its modes")]
struct Args
{
    #[arg(value_enum, default_value_t = DemoMode::OrderBook)]
    mode: DemoMode,

    /// Producer threads for the order-book run (0: one per CPU)
    #[arg(long, default_value_t = 0)]
    producers: usize,

    /// Consumer threads for the order-book run (0: three per CPU)
    #[arg(long, default_value_t = 0)]
    consumers: usize,

    /// Orders generated by each producer
    #[arg(long, default_value_t = 10_000)]
    orders: usize,

    /// Queue capacity for the order-book run (0: unbounded)
    #[arg(long, default_value_t = 1000)]
    capacity: usize,

    /// Log specification, e.g. "debug" or "info, voidland_queue=trace"
    #[arg(long)]
    log_level: Option<String>
}


fn unsortedMode() -> Result<(), Box<dyn Error>>
{
    let queue: SyncQueue<String> = SyncQueue::new();
    for name in ["s1", "s2", "s3", "s4"]
    {
        queue.put(name.to_string())?;
    }

    println!("first element was {}", queue.get()?);
    println!("second element was {}", queue.get()?);

    let destroyed: usize = queue.destroy_complete(|name| println!("destroying {}", name))?;
    println!("{} elements left at destruction", destroyed);
    Ok(())
}

fn sortedMode() -> Result<(), Box<dyn Error>>
{
    let queue: SyncQueue<i32> = SyncQueue::sorted(SortOrder::Ascending, |a: &i32, b: &i32| a.cmp(b));
    for value in [10, 12, 1, 1]
    {
        queue.put(value)?;
    }

    for position in ["first", "second", "third", "fourth"]
    {
        println!("{} int {}", position, queue.get()?);
    }
    queue.destroy()?;
    Ok(())
}

fn boundedSortedMode() -> Result<(), Box<dyn Error>>
{
    let queue: SyncQueue<i32> = SyncQueue::bounded_sorted(3, SortOrder::Ascending, |a: &i32, b: &i32| a.cmp(b));
    for value in [1, 15, 3, 27, 9]
    {
        if let Err(rejected) = queue.put(value)
        {
            println!("{} was not admitted: {}", rejected.payload(), rejected.error());
        }
    }

    for position in ["first", "second", "third", "fourth", "fifth"]
    {
        match queue.get()
        {
            Ok(value) => println!("{} element was {}", position, value),
            Err(QueueError::Empty) => println!("{} element was none", position),
            Err(error) => return Err(error.into())
        }
    }
    queue.destroy()?;
    Ok(())
}

fn mergeMode() -> Result<(), Box<dyn Error>>
{
    let queue: SyncQueue<Order> = SyncQueue::new();
    for (oid, price) in [(1, 3.0), (2, 2.0), (3, 4.0), (4, 1.0)]
    {
        queue.put(Order::new(oid, Side::Sell, 1, price))?;
    }

    queue.sort(cmp_sell_orders)?;

    for position in ["first", "second", "third", "fourth"]
    {
        println!("{} price {:.2}", position, queue.get()?.price);
    }
    queue.destroy()?;
    Ok(())
}

fn orderBookMode(args: &Args) -> Result<(), Box<dyn Error>>
{
    let cpuCount: usize = available_parallelism()?.get();
    let producerCount: usize = if args.producers > 0 { args.producers } else { cpuCount };
    let consumerCount: usize = if args.consumers > 0 { args.consumers } else { cpuCount * 3 };

    let queue: Arc<dyn MpmcQueue<Order>> = Arc::new(SyncQueue::bounded_sorted(args.capacity, SortOrder::Ascending, cmp_sell_orders));
    info!("Order flow: {} producers, {} consumers, {} orders each, capacity {}",
        producerCount, consumerCount, args.orders, queue.capacity());

    let flow: Arc<OrderFlow> = Arc::new(OrderFlow::new(producerCount, consumerCount, args.orders, queue));
    let summary: FlowSummary = flow.run();

    if !summary.is_lossless()
    {
        return Err(format!("orders got lost or duplicated: {:?}", summary).into());
    }
    println!("{} orders passed through the queue", summary.consumed.orders);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>>
{
    let args: Args = Args::parse();
    init_logging(args.log_level.as_deref())?;

    match args.mode
    {
        DemoMode::Unsorted => unsortedMode(),
        DemoMode::Sorted => sortedMode(),
        DemoMode::BoundedSorted => boundedSortedMode(),
        DemoMode::Merge => mergeMode(),
        DemoMode::OrderBook => orderBookMode(&args)
    }
}
