//! Ring Buffer: Fixed-capacity circular storage with a sliding origin.
//!
//! Every index is taken relative to the logical origin and wrapped modulo
//! the capacity. Only [`RingBuffer::shift`] moves the origin; writes never
//! evict or grow anything.
//!
//! ```text
//!            origin
//!              v
//! storage: [ c  d  a  b ]     get(0) = a, get(1) = b, get(2) = c
//! ```

use crate::error::{Error, Result};

/// A fixed-size circular buffer.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Backing storage, always exactly `size` elements.
    data: Box<[T]>,
    /// Physical index of logical position 0.
    start: usize,
}

impl<T: Clone + Default> RingBuffer<T> {
    /// Create a ring of `size` default-initialized elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidArgument("ring buffer size must be positive"));
        }
        Ok(Self {
            data: vec![T::default(); size].into_boxed_slice(),
            start: 0,
        })
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Capacity of the ring. Never changes after construction.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Physical index for a logical offset from the origin.
    #[inline]
    fn physical(&self, i: usize) -> usize {
        (self.start + i % self.size()) % self.size()
    }

    /// Bulk overwrite starting at the current origin, wrapping.
    ///
    /// This does not move the origin. Passing more than `size` items wraps
    /// around and later items overwrite earlier ones.
    pub fn overwrite(&mut self, items: impl IntoIterator<Item = T>) {
        self.set(0, items);
    }

    /// Read the element at the origin and advance the origin by one.
    pub fn shift(&mut self) -> T {
        let item = self.data[self.start].clone();
        self.start = (self.start + 1) % self.size();
        item
    }

    /// Element at logical position `i`, wrapping.
    #[inline]
    pub fn get(&self, i: usize) -> &T {
        &self.data[self.physical(i)]
    }

    /// Write `items` starting at logical position `i`, wrapping.
    pub fn set(&mut self, i: usize, items: impl IntoIterator<Item = T>) {
        let mut pos = self.physical(i);
        for item in items {
            self.data[pos] = item;
            pos = (pos + 1) % self.size();
        }
    }

    /// Iterate over all elements in logical order, starting at the origin.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.size()).map(move |i| self.get(i))
    }
}
