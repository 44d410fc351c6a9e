use std::fmt;

use log::trace;

use crate::error::{Error, Result};

pub const DEFAULT_CAPACITY: usize = 2;

/// Undo/redo history stored in one buffer.
///
/// The undo stack grows from the left end of the buffer, the redo stack from
/// the right end. Only `push` reallocates: it doubles the buffer when the undo
/// stack is about to fill it and halves it (never below the initial capacity)
/// once the live content drops to a quarter.
///
/// There is no internal synchronization; share it behind a lock if needed.
#[derive(Debug)]
pub struct NavStack<E> {
    slots: Vec<Option<E>>,
    // undo entries are slots[..undo_len], top at undo_len - 1
    undo_len: usize,
    // redo entries are slots[redo_start..], top at redo_start
    redo_start: usize,
    initial_capacity: usize,
}

impl<E> NavStack<E> {
    pub fn new() -> NavStack<E> {
        NavStack::allocate(DEFAULT_CAPACITY)
    }

    /// Creates a stack with `capacity` slots. The capacity is also the floor
    /// the buffer never shrinks below.
    pub fn with_capacity(capacity: usize) -> Result<NavStack<E>> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(NavStack::allocate(capacity))
    }

    fn allocate(capacity: usize) -> NavStack<E> {
        NavStack {
            slots: empty_slots(capacity),
            undo_len: 0,
            redo_start: capacity,
            initial_capacity: capacity,
        }
    }

    /// Number of live entries on both stacks.
    pub fn size(&self) -> usize {
        self.undo_len + (self.capacity() - self.redo_start)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_len != 0
    }

    pub fn can_redo(&self) -> bool {
        self.redo_start != self.capacity()
    }

    /// True when there is nothing to undo and nothing to redo.
    pub fn is_empty(&self) -> bool {
        !self.can_undo() && !self.can_redo()
    }

    pub fn undo_top(&self) -> Option<&E> {
        if !self.can_undo() {
            return None;
        }

        self.slots[self.undo_len - 1].as_ref()
    }

    pub fn redo_top(&self) -> Option<&E> {
        if !self.can_redo() {
            return None;
        }

        self.slots[self.redo_start].as_ref()
    }

    /// Undo entries, oldest first.
    pub fn undo_stack(&self) -> impl Iterator<Item = &E> {
        self.slots[..self.undo_len].iter().filter_map(Option::as_ref)
    }

    /// Redo entries, next to be redone first.
    pub fn redo_stack(&self) -> impl Iterator<Item = &E> {
        self.slots[self.redo_start..].iter().filter_map(Option::as_ref)
    }

    /// Records a new entry. Any pending redo history is dropped first.
    pub fn push(&mut self, element: E) {
        self.discard_redo();

        // size() is the undo length from here on
        if self.size() + 1 >= self.capacity() {
            self.resize(self.capacity() * 2);
        } else {
            while self.size() <= self.capacity() / 4
                && self.initial_capacity <= self.capacity() / 2
            {
                self.resize(self.capacity() / 2);
            }
        }

        self.slots[self.undo_len] = Some(element);
        self.undo_len += 1;
    }

    /// Moves the undo top onto the redo stack and returns it.
    pub fn undo(&mut self) -> Option<&E> {
        if !self.can_undo() {
            return None;
        }

        self.undo_len -= 1;
        let element = self.slots[self.undo_len].take();

        self.redo_start -= 1;
        let slot = &mut self.slots[self.redo_start];
        *slot = element;
        slot.as_ref()
    }

    /// Moves the redo top back onto the undo stack and returns it.
    pub fn redo(&mut self) -> Option<&E> {
        if !self.can_redo() {
            return None;
        }

        let element = self.slots[self.redo_start].take();
        self.redo_start += 1;

        let index = self.undo_len;
        self.undo_len += 1;
        let slot = &mut self.slots[index];
        *slot = element;
        slot.as_ref()
    }

    fn discard_redo(&mut self) {
        let discarded = self.capacity() - self.redo_start;
        if discarded == 0 {
            return;
        }

        trace!("discarding {} redo entries", discarded);

        for slot in &mut self.slots[self.redo_start..] {
            *slot = None;
        }
        self.redo_start = self.capacity();
    }

    // Only the undo region survives, callers clear the redo region first.
    fn resize(&mut self, new_capacity: usize) {
        trace!(
            "resizing from {} to {} slots, keeping {} undo entries",
            self.capacity(),
            new_capacity,
            self.undo_len
        );

        let mut slots: Vec<Option<E>> = Vec::with_capacity(new_capacity);
        slots.extend(self.slots.drain(..self.undo_len));
        slots.resize_with(new_capacity, || None);

        self.slots = slots;
        self.redo_start = new_capacity;
    }
}

impl<E> Default for NavStack<E> {
    fn default() -> NavStack<E> {
        NavStack::new()
    }
}

fn empty_slots<E>(capacity: usize) -> Vec<Option<E>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

fn write_list<'a, E, I>(f: &mut fmt::Formatter, label: &str, items: I) -> fmt::Result
where
    E: fmt::Display + 'a,
    I: Iterator<Item = &'a E>,
{
    write!(f, "{}: [", label)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

impl<E: fmt::Display> fmt::Display for NavStack<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "buffer: [")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match slot {
                Some(element) => write!(f, "{}", element)?,
                None => write!(f, "_")?,
            }
        }
        writeln!(f, "]")?;

        write_list(f, "undo", self.undo_stack())?;
        writeln!(f)?;
        write_list(f, "redo", self.redo_stack())
    }
}
