//! A vector that can be reset to its default contents in constant time.
//! Every write stamps the entry with the current run, reads of entries from
//! an older run yield the default value.
//!
//! # Example
//!
//! ```
//! use road_astar::timestamped_vector::*;
//!
//! let mut distances: TimestampedVector<f64, u8> = TimestampedVector::with_size(4);
//!
//! distances.set(2, 17.5);
//! *distances.get_mut(3) = 4.0;
//! assert_eq!(*distances.get(2), 17.5);
//! assert_eq!(*distances.get(3), 4.0);
//! assert_eq!(*distances.get(0), f64::INFINITY);
//!
//! distances.reset();
//!
//! for i in 0..4 {
//!     assert!(!distances.is_set(i));
//!     assert_eq!(*distances.get(i), f64::INFINITY);
//! }
//!
//! // wrap the u8 stamp around, old entries must not come back to life
//! distances.set(1, 3.0);
//! for _ in 0..256 {
//!     distances.reset();
//! }
//! assert_eq!(*distances.get(1), f64::INFINITY);
//! ```

use num::{traits::ops::overflowing::OverflowingAdd, Integer, Unsigned};

use crate::types::DefaultReset;

#[derive(Clone, Debug)]
pub struct TimestampedVector<T, U = usize> {
    run: Vec<U>,
    run_count: U,
    vector: Vec<T>,
    default: T,
}

impl<T: DefaultReset, U: Unsigned + Integer + OverflowingAdd + Clone + Copy> TimestampedVector<T, U> {
    pub fn with_size(size: usize) -> Self {
        Self {
            run: vec![U::zero(); size],
            run_count: U::one(),
            vector: vec![T::DEFAULT; size],
            default: T::DEFAULT,
        }
    }

    /// Invalidates every entry.
    pub fn reset(&mut self) {
        let (new_count, overflowed) = self.run_count.overflowing_add(&U::one());

        if overflowed {
            // stamps from earlier cycles would collide with the restarted counter
            self.clean();
            self.run_count = U::one();
        } else {
            self.run_count = new_count;
        }
    }

    fn clean(&mut self) {
        for e in &mut self.vector {
            e.reset();
        }
        for r in &mut self.run {
            *r = U::zero();
        }
    }

    pub fn get(&self, i: usize) -> &T {
        if self.run[i] == self.run_count {
            &self.vector[i]
        } else {
            &self.default
        }
    }

    pub fn get_mut(&mut self, i: usize) -> &mut T {
        if self.run[i] != self.run_count {
            self.vector[i].reset();
            self.run[i] = self.run_count;
        }

        &mut self.vector[i]
    }

    pub fn set(&mut self, i: usize, e: T) {
        self.vector[i] = e;
        self.run[i] = self.run_count;
    }

    pub fn len(&self) -> usize {
        self.vector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }

    pub fn is_set(&self, i: usize) -> bool {
        self.run[i] == self.run_count
    }
}
