use super::queue::PutError;
use super::queue::QueueResult;
use super::queue::SortOrder;
use super::queue::SyncQueue;

use std::cmp::Ordering;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side
{
    Buy,
    Sell
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order
{
    pub oid: u32,
    pub side: Side,
    pub qty: u32,
    pub price: f64
}

impl Order
{
    pub fn new(oid: u32, side: Side, qty: u32, price: f64) -> Self
    {
        Self
        {
            oid: oid,
            side: side,
            qty: qty,
            price: price
        }
    }
}

/// Cheapest ask first, older order first at the same price.
pub fn cmp_sell_orders(a: &Order, b: &Order) -> Ordering
{
    a.price.total_cmp(&b.price).then(a.oid.cmp(&b.oid))
}

/// Highest bid first, older order first at the same price.
pub fn cmp_buy_orders(a: &Order, b: &Order) -> Ordering
{
    b.price.total_cmp(&a.price).then(a.oid.cmp(&b.oid))
}


/// Two sorted queues, one per side, each holding its best order at the head.
pub struct OrderBook
{
    bids: SyncQueue<Order>,
    asks: SyncQueue<Order>
}

impl OrderBook
{
    /// `depth` bounds each side; 0 leaves both sides unbounded.
    pub fn new(depth: usize) -> Self
    {
        Self
        {
            bids: SyncQueue::bounded_sorted(depth, SortOrder::Ascending, cmp_buy_orders),
            asks: SyncQueue::bounded_sorted(depth, SortOrder::Ascending, cmp_sell_orders)
        }
    }

    pub fn submit(&self, order: Order) -> Result<(), PutError<Order>>
    {
        self.side(order.side).put(order)
    }

    pub fn cancel(&self, side: Side, oid: u32) -> QueueResult<Order>
    {
        self.side(side).get_filtered(|order: &Order, oid: &u32| order.oid.cmp(oid), &oid)
    }

    pub fn take_best(&self, side: Side) -> QueueResult<Order>
    {
        self.side(side).get()
    }

    pub fn depth(&self, side: Side) -> QueueResult<usize>
    {
        self.side(side).elements()
    }

    pub fn close(&self) -> QueueResult<()>
    {
        self.bids.set_accepting(false)?;
        self.asks.set_accepting(false)
    }

    fn side(&self, side: Side) -> &SyncQueue<Order>
    {
        match side
        {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks
        }
    }
}
