//! Raw byte views of plain numeric data for bulk reads and writes.
//! The graph codec moves whole slices of `Copy` records with one call instead of
//! serializing field by field.
//!
//! # Example
//!
//! ```
//! use road_astar::io::*;
//!
//! let successors: Vec<u64> = vec![3, 1, 4, 1, 5];
//! let mut buffer = Vec::new();
//! write_slice(&mut buffer, &successors).unwrap();
//! assert_eq!(buffer.len(), 5 * std::mem::size_of::<u64>());
//!
//! let restored: Vec<u64> = read_vec(&mut buffer.as_slice(), 5).unwrap();
//! assert_eq!(restored, successors);
//! ```

use std::io::{Read, Result, Write};
use std::mem;
use std::slice;

/// Types whose every bit pattern is a valid value and that contain no padding.
///
/// # Safety
///
/// Implementors must be `#[repr(C)]` (or primitives) built only from integer and float fields
/// without padding bytes.
pub unsafe trait Plain: Copy + Default {}

unsafe impl Plain for u64 {}
unsafe impl Plain for f64 {}

/// Accessing the data of an object as a slice of bytes.
pub trait DataBytes {
    fn data_bytes(&self) -> &[u8];
}

/// Mutable byte access so that serialized data can be read into a precreated object of the right size.
pub trait DataBytesMut {
    fn data_bytes_mut(&mut self) -> &mut [u8];
}

impl<T: Plain> DataBytes for [T] {
    fn data_bytes(&self) -> &[u8] {
        let num_bytes = mem::size_of_val(self);
        unsafe { slice::from_raw_parts(self.as_ptr() as *const u8, num_bytes) }
    }
}

impl<T: Plain> DataBytesMut for [T] {
    fn data_bytes_mut(&mut self) -> &mut [u8] {
        let num_bytes = mem::size_of_val(self);
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr() as *mut u8, num_bytes) }
    }
}

pub fn write_slice<W: Write, T: Plain>(writer: &mut W, data: &[T]) -> Result<()> {
    writer.write_all(data.data_bytes())
}

const READ_CHUNK_ELEMENTS: usize = 1 << 16;

/// Reads exactly `len` elements, a short read surfaces as `ErrorKind::UnexpectedEof`.
/// The vector grows chunk by chunk so a corrupt length fails on the read, not on the allocation.
pub fn read_vec<R: Read, T: Plain>(reader: &mut R, len: usize) -> Result<Vec<T>> {
    let mut object = Vec::with_capacity(len.min(READ_CHUNK_ELEMENTS));
    while object.len() < len {
        let start = object.len();
        object.resize(start + (len - start).min(READ_CHUNK_ELEMENTS), T::default());
        reader.read_exact(object[start..].data_bytes_mut())?;
    }
    Ok(object)
}

/// True if the reader has no bytes left.
pub fn is_exhausted<R: Read>(reader: &mut R) -> Result<bool> {
    let mut probe = [0u8; 1];
    loop {
        match reader.read(&mut probe) {
            Ok(n) => return Ok(n == 0),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
