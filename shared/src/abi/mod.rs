//! Binary contract between the compiled module and the bridge.
//!
//! The producer is a `wasm32` target: pointers and `size_t` are 4 bytes,
//! `WGPUBool` is a `u32`, and 8-byte fields (`u64`, `f64`) are 8-byte
//! aligned. That alignment rule is why several structs below carry explicit
//! `_pad` fields: the producer's compiler inserts 4 bytes of padding before
//! (or after) every 8-byte member that would otherwise sit at a 4-mod-8
//! offset. Spelling the padding out keeps every struct `Pod` and makes the
//! layout identical on the 64-bit host.
//!
//! Every struct has its size and field offsets asserted at compile time with
//! [`assert_layout!`]. A mismatch here would silently corrupt every decoded
//! descriptor, so it must fail the build instead.

pub mod binding;
pub mod codes;
pub mod instance;
pub mod pass;
pub mod pipeline;
pub mod resource;

/// Pointer into the module's linear memory (0 = null)
pub type Ptr = u32;

/// Opaque object handle (0 = null)
pub type Handle = u32;

/// `WGPUBool`
pub type Bool32 = u32;

/// `WGPU_WHOLE_SIZE`: bind/set the remainder of a buffer
pub const WHOLE_SIZE: u64 = u64::MAX;

/// `WGPU_MIP_LEVEL_COUNT_UNDEFINED`
pub const MIP_LEVEL_COUNT_UNDEFINED: u32 = u32::MAX;

/// `WGPU_ARRAY_LAYER_COUNT_UNDEFINED`
pub const ARRAY_LAYER_COUNT_UNDEFINED: u32 = u32::MAX;

/// `WGPU_COPY_STRIDE_UNDEFINED`
pub const COPY_STRIDE_UNDEFINED: u32 = u32::MAX;

/// Compile-time size and field-offset assertions for a descriptor struct.
///
/// ```rust,ignore
/// assert_layout!(Extent3d, size = 12, {
///     width @ 0,
///     height @ 4,
///     depth_or_array_layers @ 8,
/// });
/// ```
#[macro_export]
macro_rules! assert_layout {
    ($ty:ty, size = $size:expr, { $($field:ident @ $offset:expr),* $(,)? }) => {
        const _: () = assert!(core::mem::size_of::<$ty>() == $size);
        $(
            const _: () = assert!(core::mem::offset_of!($ty, $field) == $offset);
        )*
    };
}

pub use binding::*;
pub use instance::*;
pub use pass::*;
pub use pipeline::*;
pub use resource::*;

#[cfg(not(target_endian = "little"))]
compile_error!("descriptor structs are read in the producer's little-endian byte order");
