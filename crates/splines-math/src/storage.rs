//! Node storage shared by every spline kind.
//!
//! A [`NodeBuffer`] holds the two parallel node arrays of a spline: the
//! abscissas `X` and the per-node data `Y`. Storage is either
//!
//! - **owned**: one arena allocated by the buffer, `X` in the first half and
//!   `Y` in the second, released when the buffer is cleared or dropped; or
//! - **borrowed**: two caller slices attached with
//!   [`NodeBuffer::reserve_external`]. The buffer writes into them but never
//!   frees them, and the lifetime `'a` keeps the caller's memory alive for as
//!   long as the spline uses it.
//!
//! # Example
//!
//! ```rust
//! use splines_math::storage::NodeBuffer;
//!
//! let mut xs = [0.0; 4];
//! let mut ys = [0.0; 4];
//!
//! let mut buffer = NodeBuffer::new();
//! buffer.reserve_external(4, &mut xs, &mut ys).unwrap();
//! buffer.push_back(0.0, 1.0).unwrap();
//! buffer.push_back(1.0, 2.0).unwrap();
//! assert!(buffer.is_borrowed());
//!
//! buffer.clear();
//! drop(buffer);
//! assert_eq!(xs[..2], [0.0, 1.0]);
//! ```

use log::{trace, warn};

use crate::error::{SplineError, SplineResult};

/// Smallest capacity an owned arena grows to on `push_back`.
const MIN_GROWTH: usize = 4;

#[derive(Debug, Default)]
enum Storage<'a> {
    #[default]
    Empty,
    /// `2 * capacity` values, `X` then `Y`.
    Owned(Vec<f64>),
    /// Caller slices, each exactly `capacity` long.
    Borrowed { x: &'a mut [f64], y: &'a mut [f64] },
}

/// Owned-or-borrowed storage for node abscissas and values.
#[derive(Debug, Default)]
pub struct NodeBuffer<'a> {
    storage: Storage<'a>,
    len: usize,
    capacity: usize,
}

impl<'a> NodeBuffer<'a> {
    /// Creates an empty buffer with no storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches caller-owned arrays with room for `n` nodes.
    ///
    /// Any owned arena is released first and the node count resets to zero.
    /// Only the first `n` entries of each slice are used.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::CapacityExceeded`] if either slice holds fewer
    /// than `n` values. The buffer is left untouched in that case.
    pub fn reserve_external(
        &mut self,
        n: usize,
        x: &'a mut [f64],
        y: &'a mut [f64],
    ) -> SplineResult<()> {
        let available = x.len().min(y.len());
        if available < n {
            return Err(SplineError::capacity_exceeded(n, available));
        }

        self.storage = Storage::Borrowed {
            x: &mut x[..n],
            y: &mut y[..n],
        };
        self.capacity = n;
        self.len = 0;
        Ok(())
    }

    /// Ensures room for `n` nodes and resets the node count to zero.
    ///
    /// Borrowed storage that is already large enough is kept. Otherwise the
    /// buffer switches to an owned arena, reusing the previous arena's
    /// allocation when it has room.
    pub fn reserve(&mut self, n: usize) {
        let keep_borrowed = self.is_borrowed() && n <= self.capacity;
        if !keep_borrowed {
            if let Storage::Owned(arena) = &mut self.storage {
                arena.clear();
                arena.resize(2 * n, 0.0);
            } else {
                if self.is_borrowed() {
                    warn!(
                        "releasing borrowed node buffer: capacity {} < requested {}",
                        self.capacity, n
                    );
                }
                self.storage = Storage::Owned(vec![0.0; 2 * n]);
            }
            self.capacity = n;
        }
        self.len = 0;
    }

    /// Releases owned storage (borrowed slices are only detached).
    pub fn clear(&mut self) {
        self.storage = Storage::Empty;
        self.len = 0;
        self.capacity = 0;
    }

    /// Appends one node, growing owned storage when full.
    ///
    /// # Errors
    ///
    /// - [`SplineError::InvalidInput`] if `x` is NaN or smaller than the last
    ///   node.
    /// - [`SplineError::CapacityExceeded`] if borrowed storage is full.
    pub fn push_back(&mut self, x: f64, y: f64) -> SplineResult<()> {
        if x.is_nan() {
            return Err(SplineError::invalid_input("node abscissa is NaN"));
        }
        if let Some(&last) = self.x_nodes().last() {
            if x < last {
                return Err(SplineError::invalid_input(format!(
                    "non monotone insert: {} after {}",
                    x, last
                )));
            }
        }
        if self.len == self.capacity {
            self.grow()?;
        }

        let len = self.len;
        let (xs, ys) = self.split_mut();
        xs[len] = x;
        ys[len] = y;
        self.len += 1;
        Ok(())
    }

    /// Removes the last node, if any.
    pub fn drop_back(&mut self) {
        self.len = self.len.saturating_sub(1);
    }

    fn grow(&mut self) -> SplineResult<()> {
        if self.is_borrowed() {
            return Err(SplineError::capacity_exceeded(self.len + 1, self.capacity));
        }

        let new_capacity = (2 * self.capacity).max(MIN_GROWTH);
        trace!("growing node buffer {} -> {}", self.capacity, new_capacity);

        let mut arena = vec![0.0; 2 * new_capacity];
        arena[..self.len].copy_from_slice(&self.xs()[..self.len]);
        arena[new_capacity..new_capacity + self.len].copy_from_slice(&self.ys()[..self.len]);
        self.storage = Storage::Owned(arena);
        self.capacity = new_capacity;
        Ok(())
    }

    /// Number of populated nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no node is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes the storage can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if the buffer allocated its storage itself.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// Returns true if the storage belongs to the caller.
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self.storage, Storage::Borrowed { .. })
    }

    /// Populated node abscissas.
    #[must_use]
    pub fn x_nodes(&self) -> &[f64] {
        &self.xs()[..self.len]
    }

    /// Full-capacity abscissa array.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        match &self.storage {
            Storage::Empty => &[],
            Storage::Owned(arena) => &arena[..self.capacity],
            Storage::Borrowed { x, .. } => &**x,
        }
    }

    /// Full-capacity value array.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        match &self.storage {
            Storage::Empty => &[],
            Storage::Owned(arena) => &arena[self.capacity..],
            Storage::Borrowed { y, .. } => &**y,
        }
    }

    /// Both full-capacity arrays, mutably.
    pub fn split_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        match &mut self.storage {
            Storage::Empty => (Default::default(), Default::default()),
            Storage::Owned(arena) => arena.split_at_mut(self.capacity),
            Storage::Borrowed { x, y } => (&mut **x, &mut **y),
        }
    }

    /// Sets the populated node count after a bulk write.
    pub(crate) fn set_len(&mut self, n: usize) {
        debug_assert!(n <= self.capacity);
        self.len = n.min(self.capacity);
    }
}
