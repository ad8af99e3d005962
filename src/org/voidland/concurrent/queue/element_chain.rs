use super::error::PutError;
use super::error::QueueError;

use std::cmp::Ordering;
use std::mem;


const COMPACTION_MIN_SLOTS: usize = 64;

struct Element<E>
{
    payload: E,
    next: Option<usize>
}

enum Slot<E>
{
    Occupied(Element<E>),
    Vacant
}

/// Singly linked chain of elements kept in a slot buffer.
///
/// Links are slot indices, so splitting and relinking never moves a payload.
/// Vacated slots are recycled through `vacant` before the buffer grows. Once
/// more than half of a large buffer is vacant the live elements are copied into
/// a buffer of their own size.
pub(crate) struct ElementChain<E>
{
    slots: Vec<Slot<E>>,
    vacant: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    count: usize
}

impl<E> ElementChain<E>
{
    pub fn new() -> Self
    {
        Self
        {
            slots: Vec::new(),
            vacant: Vec::new(),
            head: None,
            tail: None,
            count: 0
        }
    }

    pub fn len(&self) -> usize
    {
        self.count
    }

    pub fn is_empty(&self) -> bool
    {
        self.head.is_none()
    }

    pub fn back(&self) -> Option<&E>
    {
        self.tail.map(|tail| &self.element(tail).payload)
    }

    pub fn push_back(&mut self, payload: E) -> Result<(), PutError<E>>
    {
        let tail: Option<usize> = self.tail;
        self.insertAfter(tail, payload)
    }

    /// Inserts `payload` in front of the first element it precedes, or at the
    /// end. Elements it does not precede keep their place ahead of it.
    pub fn insert_ordered<P>(&mut self, payload: E, mut precedes: P) -> Result<(), PutError<E>>
        where P: FnMut(&E, &E) -> bool
    {
        let mut previous: Option<usize> = None;
        let mut cursor: Option<usize> = self.head;
        while let Some(index) = cursor
        {
            let existing: &Element<E> = self.element(index);
            if precedes(&payload, &existing.payload)
            {
                break;
            }
            previous = cursor;
            cursor = existing.next;
        }

        self.insertAfter(previous, payload)
    }

    pub fn pop_front(&mut self) -> Option<E>
    {
        let head: usize = self.head?;
        Some(self.unlink(None, head))
    }

    pub fn pop_back(&mut self) -> Option<E>
    {
        let tail: usize = self.tail?;
        let mut previous: Option<usize> = None;
        let mut cursor: Option<usize> = self.head;
        while let Some(index) = cursor
        {
            if index == tail
            {
                break;
            }
            previous = cursor;
            cursor = self.element(index).next;
        }
        Some(self.unlink(previous, tail))
    }

    /// Removes the first element satisfying `matches`, leaving the rest in place.
    pub fn remove_first<M>(&mut self, mut matches: M) -> Option<E>
        where M: FnMut(&E) -> bool
    {
        let mut previous: Option<usize> = None;
        let mut cursor: Option<usize> = self.head;
        while let Some(index) = cursor
        {
            let candidate: &Element<E> = self.element(index);
            if matches(&candidate.payload)
            {
                return Some(self.unlink(previous, index));
            }
            previous = cursor;
            cursor = candidate.next;
        }
        None
    }

    /// Stable recursive merge sort. `compare(a, b) != Greater` keeps `a` first.
    pub fn sort_by<C>(&mut self, compare: &mut C)
        where C: FnMut(&E, &E) -> Ordering
    {
        if self.count < 2
        {
            return;
        }

        let head: Option<usize> = self.head;
        self.head = self.mergeSort(head, compare);

        let mut last: Option<usize> = None;
        let mut cursor: Option<usize> = self.head;
        while let Some(index) = cursor
        {
            last = cursor;
            cursor = self.element(index).next;
        }
        self.tail = last;
    }

    pub fn iter(&self) -> Iter<'_, E>
    {
        Iter
        {
            chain: self,
            cursor: self.head
        }
    }

    fn mergeSort<C>(&mut self, head: Option<usize>, compare: &mut C) -> Option<usize>
        where C: FnMut(&E, &E) -> Ordering
    {
        let front: usize = head?;
        if self.element(front).next.is_none()
        {
            return Some(front);
        }

        let back: Option<usize> = self.splitFrontBack(front);
        let front: Option<usize> = self.mergeSort(Some(front), compare);
        let back: Option<usize> = self.mergeSort(back, compare);
        self.merge(front, back, compare)
    }

    // Fast/slow split; on odd length the extra element stays in the front half.
    fn splitFrontBack(&mut self, source: usize) -> Option<usize>
    {
        let mut slow: usize = source;
        let mut fast: Option<usize> = self.element(source).next;
        while let Some(index) = fast
        {
            fast = self.element(index).next;
            if let Some(index) = fast
            {
                if let Some(next) = self.element(slow).next
                {
                    slow = next;
                }
                fast = self.element(index).next;
            }
        }

        self.elementMut(slow).next.take()
    }

    fn merge<C>(&mut self, mut front: Option<usize>, mut back: Option<usize>, compare: &mut C) -> Option<usize>
        where C: FnMut(&E, &E) -> Ordering
    {
        let mut mergedHead: Option<usize> = None;
        let mut mergedTail: Option<usize> = None;

        loop
        {
            let taken: usize = match (front, back)
            {
                (Some(a), Some(b)) =>
                {
                    if compare(&self.element(a).payload, &self.element(b).payload) != Ordering::Greater
                    {
                        front = self.element(a).next;
                        a
                    }
                    else
                    {
                        back = self.element(b).next;
                        b
                    }
                }
                (Some(rest), None) | (None, Some(rest)) =>
                {
                    self.attach(&mut mergedHead, mergedTail, rest);
                    break;
                }
                (None, None) =>
                {
                    break;
                }
            };

            self.attach(&mut mergedHead, mergedTail, taken);
            mergedTail = Some(taken);
        }

        mergedHead
    }

    fn attach(&mut self, mergedHead: &mut Option<usize>, mergedTail: Option<usize>, index: usize)
    {
        match mergedTail
        {
            Some(tail) =>
            {
                self.elementMut(tail).next = Some(index);
            }
            None =>
            {
                *mergedHead = Some(index);
            }
        }
    }

    fn insertAfter(&mut self, previous: Option<usize>, payload: E) -> Result<(), PutError<E>>
    {
        let next: Option<usize> = match previous
        {
            Some(previous) => self.element(previous).next,
            None => self.head
        };
        let index: usize = self.allocate(Element
            {
                payload: payload,
                next: next
            })?;

        match previous
        {
            Some(previous) => self.elementMut(previous).next = Some(index),
            None => self.head = Some(index)
        }
        if next.is_none()
        {
            self.tail = Some(index);
        }
        self.count += 1;

        Ok(())
    }

    fn unlink(&mut self, previous: Option<usize>, index: usize) -> E
    {
        let element: Element<E> = match mem::replace(&mut self.slots[index], Slot::Vacant)
        {
            Slot::Occupied(element) => element,
            Slot::Vacant => unreachable!("element chain links to vacant slot {}", index)
        };
        self.vacant.push(index);

        match previous
        {
            Some(previous) => self.elementMut(previous).next = element.next,
            None => self.head = element.next
        }
        if self.tail == Some(index)
        {
            self.tail = previous;
        }
        self.count -= 1;

        if self.count == 0
        {
            self.slots.clear();
            self.vacant.clear();
        }
        else if self.slots.len() >= COMPACTION_MIN_SLOTS  &&  self.vacant.len() * 2 > self.slots.len()
        {
            self.compact();
        }

        element.payload
    }

    fn allocate(&mut self, element: Element<E>) -> Result<usize, PutError<E>>
    {
        if let Some(index) = self.vacant.pop()
        {
            self.slots[index] = Slot::Occupied(element);
            return Ok(index);
        }

        if let Err(error) = self.slots.try_reserve(1)
        {
            return Err(PutError::new(QueueError::from(error), element.payload));
        }
        self.slots.push(Slot::Occupied(element));
        Ok(self.slots.len() - 1)
    }

    /// Moves the live elements, in chain order, into a buffer without vacant
    /// slots. Keeps the current buffer if the new one cannot be allocated.
    fn compact(&mut self)
    {
        let mut compacted: Vec<Slot<E>> = Vec::new();
        if compacted.try_reserve_exact(self.count).is_err()
        {
            return;
        }

        let mut cursor: Option<usize> = self.head;
        while let Some(index) = cursor
        {
            let mut element: Element<E> = match mem::replace(&mut self.slots[index], Slot::Vacant)
            {
                Slot::Occupied(element) => element,
                Slot::Vacant => unreachable!("element chain links to vacant slot {}", index)
            };
            cursor = element.next;
            element.next = cursor.map(|_| compacted.len() + 1);
            compacted.push(Slot::Occupied(element));
        }

        self.head = Some(0);
        self.tail = Some(compacted.len() - 1);
        self.slots = compacted;
        self.vacant = Vec::new();
    }

    fn element(&self, index: usize) -> &Element<E>
    {
        match &self.slots[index]
        {
            Slot::Occupied(element) => element,
            Slot::Vacant => unreachable!("element chain links to vacant slot {}", index)
        }
    }

    fn elementMut(&mut self, index: usize) -> &mut Element<E>
    {
        match &mut self.slots[index]
        {
            Slot::Occupied(element) => element,
            Slot::Vacant => unreachable!("element chain links to vacant slot {}", index)
        }
    }
}

impl<E> IntoIterator for ElementChain<E>
{
    type Item = E;
    type IntoIter = IntoPayloads<E>;

    fn into_iter(self) -> IntoPayloads<E>
    {
        IntoPayloads
        {
            chain: self
        }
    }
}


pub(crate) struct IntoPayloads<E>
{
    chain: ElementChain<E>
}

impl<E> Iterator for IntoPayloads<E>
{
    type Item = E;

    fn next(&mut self) -> Option<E>
    {
        self.chain.pop_front()
    }
}


pub(crate) struct Iter<'a, E>
{
    chain: &'a ElementChain<E>,
    cursor: Option<usize>
}

impl<'a, E> Iterator for Iter<'a, E>
{
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E>
    {
        let index: usize = self.cursor?;
        let element: &'a Element<E> = self.chain.element(index);
        self.cursor = element.next;
        Some(&element.payload)
    }
}
