//! Shared test utilities for unit tests

use bytemuck::Pod;

use crate::capabilities::{Capabilities, CapabilityResolver, SurfaceTarget};
use crate::config::GpuConfig;
use crate::memory::GuestMemory;

// ============================================================================
// Descriptor Writer
// ============================================================================

/// Filler for bytes the decoder must never look at
pub const GARBAGE: u8 = 0xCD;

/// First offset handed out; keeps every pointer non-null
const START_OFFSET: usize = 16;

/// Bump allocator laying out descriptors the way a wasm32 producer would.
///
/// The backing buffer starts filled with [`GARBAGE`], so any read outside
/// what a test wrote shows up as a wrong value rather than a zero.
pub struct DescriptorWriter {
    data: Vec<u8>,
    next: usize,
}

impl DescriptorWriter {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![GARBAGE; size],
            next: START_OFFSET,
        }
    }

    fn reserve(&mut self, len: usize, align: usize) -> u32 {
        let offset = self.next.next_multiple_of(align);
        assert!(offset + len <= self.data.len(), "descriptor writer out of space");
        self.next = offset + len;
        offset as u32
    }

    /// Place a struct and return its pointer
    pub fn push<T: Pod>(&mut self, value: &T) -> u32 {
        let ptr = self.reserve(size_of::<T>(), 8);
        self.write(ptr, value);
        ptr
    }

    /// Place consecutive structs and return the pointer to the first
    pub fn push_slice<T: Pod>(&mut self, values: &[T]) -> u32 {
        let bytes: &[u8] = bytemuck::cast_slice(values);
        let ptr = self.reserve(bytes.len().max(1), 8);
        self.data[ptr as usize..ptr as usize + bytes.len()].copy_from_slice(bytes);
        ptr
    }

    /// Place a NUL-terminated string
    pub fn push_str(&mut self, text: &str) -> u32 {
        let ptr = self.reserve(text.len() + 1, 1);
        let start = ptr as usize;
        self.data[start..start + text.len()].copy_from_slice(text.as_bytes());
        self.data[start + text.len()] = 0;
        ptr
    }

    /// Overwrite a struct placed earlier (for linking chains after the fact)
    pub fn write<T: Pod>(&mut self, ptr: u32, value: &T) {
        let bytes = bytemuck::bytes_of(value);
        let start = ptr as usize;
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
    }

    pub fn memory(&self) -> GuestMemory<'_> {
        GuestMemory::new(&self.data)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

// ============================================================================
// GPU Availability
// ============================================================================

/// Set `EASEL_REQUIRE_GPU=1` to turn skipped GPU tests into failures
pub fn require_gpu() -> bool {
    let Ok(raw) = std::env::var("EASEL_REQUIRE_GPU") else {
        return false;
    };
    let v = raw.trim();
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
}

pub fn skip_or_panic(test_name: &str, reason: &str) {
    if require_gpu() {
        panic!("EASEL_REQUIRE_GPU is enabled but {test_name} cannot run: {reason}");
    }
    eprintln!("skipping {test_name}: {reason}");
}

/// Negotiate a small headless target, or skip the calling test
pub fn headless_capabilities(test_name: &str) -> Option<Capabilities> {
    let target = SurfaceTarget::Headless {
        width: 64,
        height: 64,
    };
    match CapabilityResolver::new(GpuConfig::default()).negotiate_blocking(target) {
        Ok(caps) => Some(caps),
        Err(err) => {
            skip_or_panic(test_name, &err.to_string());
            None
        }
    }
}
