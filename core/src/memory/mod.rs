//! Typed access to the module's linear memory
//!
//! A [`GuestMemory`] is a borrowed view of linear memory taken at the start
//! of a single bridge call. Memory can grow between calls, so views are never
//! stored; every entry point obtains a fresh one from
//! [`wasmtime::Memory::data_and_store_mut`].
//!
//! All multi-byte values are little-endian (the producer's native order) and
//! may be unaligned. The view is read-only; nothing is written back. Every
//! access is bounds-checked against the current memory size and fails with
//! [`BridgeError::OutOfBounds`].

#[cfg(test)]
mod tests;

use bytemuck::Pod;

use crate::error::{BridgeError, BridgeResult};

/// Read-only view of linear memory
#[derive(Clone, Copy)]
pub struct GuestMemory<'a> {
    data: &'a [u8],
}

impl<'a> GuestMemory<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Current memory size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    fn slice(&self, offset: u32, len: u64) -> BridgeResult<&'a [u8]> {
        let start = offset as u64;
        let end = start + len;
        if end > self.data.len() as u64 {
            return Err(BridgeError::OutOfBounds {
                offset: start,
                len,
                memory_size: self.data.len() as u64,
            });
        }
        Ok(&self.data[start as usize..end as usize])
    }

    /// Read one descriptor struct or scalar (unaligned)
    pub fn read_pod<T: Pod>(&self, offset: u32) -> BridgeResult<T> {
        let bytes = self.slice(offset, size_of::<T>() as u64)?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Read `count` consecutive structs starting at `ptr`.
    ///
    /// A zero count yields an empty vector without looking at `ptr`, so a
    /// null pointer with a zero count is accepted.
    pub fn read_array<T: Pod>(&self, ptr: u32, count: u32) -> BridgeResult<Vec<T>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let stride = size_of::<T>() as u64;
        let bytes = self.slice(ptr, stride * count as u64)?;
        Ok(bytes
            .chunks_exact(stride as usize)
            .map(bytemuck::pod_read_unaligned)
            .collect())
    }

    pub fn read_bytes(&self, ptr: u32, len: u32) -> BridgeResult<&'a [u8]> {
        self.slice(ptr, len as u64)
    }

    /// Read a NUL-terminated UTF-8 string
    pub fn read_cstr(&self, ptr: u32) -> BridgeResult<&'a str> {
        let tail = self.slice(ptr, 0).map(|_| &self.data[ptr as usize..])?;
        let Some(len) = tail.iter().position(|&b| b == 0) else {
            return Err(BridgeError::OutOfBounds {
                offset: ptr as u64,
                len: tail.len() as u64 + 1,
                memory_size: self.data.len() as u64,
            });
        };
        std::str::from_utf8(&tail[..len]).map_err(|_| BridgeError::InvalidUtf8 { ptr })
    }

    /// Read an optional label; a null pointer is no label
    pub fn read_label(&self, ptr: u32) -> BridgeResult<Option<String>> {
        if ptr == 0 {
            return Ok(None);
        }
        self.read_cstr(ptr).map(|s| Some(s.to_owned()))
    }
}
