//! Descriptor decoders
//!
//! Each decoder reads one producer descriptor out of linear memory and
//! returns an owned value holding translated wgpu types. Referenced objects
//! stay as raw [`Handle`](easel_shared::Handle)s; resolving them is the entry
//! point's job, so decoding never needs a GPU and can be tested against plain
//! byte buffers.
//!
//! Decoders read the fields of the supported feature set only. Extension
//! chains with unrecognized `sType`s, pipeline constants, shader hints, query
//! sets and timestamp writes are skipped with a log line.
//!
//! # Module Organization
//!
//! - [`instance`] - surface, adapter options, device, swap chain
//! - [`resource`] - shader modules, buffers, textures, views, samplers, uploads
//! - [`binding`] - bind group layouts, bind groups, pipeline layouts
//! - [`pipeline`] - render pipelines
//! - [`pass`] - render passes and the small structs used while recording

mod binding;
mod instance;
mod pass;
mod pipeline;
mod resource;


use easel_shared::Ptr;
use easel_shared::abi::ChainedStruct;

use crate::error::{BridgeError, BridgeResult};
use crate::memory::GuestMemory;

pub use binding::*;
pub use instance::*;
pub use pass::*;
pub use pipeline::*;
pub use resource::*;

/// Longest extension chain followed before assuming a cycle
const MAX_CHAIN_LENGTH: usize = 32;

/// Walk a `next_in_chain` list, returning `(pointer, sType)` for each link
pub fn walk_chain(mem: &GuestMemory<'_>, first: Ptr) -> BridgeResult<Vec<(Ptr, u32)>> {
    let mut links = Vec::new();
    let mut next = first;
    while next != 0 {
        if links.len() == MAX_CHAIN_LENGTH {
            return Err(BridgeError::ChainCycle { start: first });
        }
        let header: ChainedStruct = mem.read_pod(next)?;
        links.push((next, header.s_type));
        next = header.next;
    }
    Ok(links)
}

/// Find the first chained struct with the given `sType`.
///
/// Other links are skipped with a debug log.
pub fn find_chained(
    mem: &GuestMemory<'_>,
    first: Ptr,
    s_type: u32,
    context: &'static str,
) -> BridgeResult<Option<Ptr>> {
    let mut found = None;
    for (ptr, link_type) in walk_chain(mem, first)? {
        if link_type == s_type && found.is_none() {
            found = Some(ptr);
        } else {
            tracing::debug!("{}: ignoring chained struct sType {}", context, link_type);
        }
    }
    Ok(found)
}

/// Log extension chains on descriptors that define none
fn ignore_chain(next_in_chain: Ptr, context: &'static str) {
    if next_in_chain != 0 {
        tracing::debug!("{}: ignoring extension chain at {:#x}", context, next_in_chain);
    }
}

/// Label-only descriptors (command encoder, command buffer); a null
/// descriptor pointer is allowed
pub fn decode_label_descriptor(mem: &GuestMemory<'_>, ptr: Ptr) -> BridgeResult<Option<String>> {
    if ptr == 0 {
        return Ok(None);
    }
    let desc: easel_shared::abi::CommandEncoderDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "label descriptor");
    mem.read_label(desc.label)
}

/// Optional entry point name (null lets wgpu pick the only one)
fn entry_point(mem: &GuestMemory<'_>, ptr: Ptr) -> BridgeResult<Option<String>> {
    mem.read_label(ptr)
}

fn bool32(value: u32) -> bool {
    value != 0
}

/// `WGPU_WHOLE_SIZE` (and zero) mean "to the end of the buffer"
fn binding_size(size: u64) -> Option<std::num::NonZeroU64> {
    if size == easel_shared::abi::WHOLE_SIZE {
        return None;
    }
    std::num::NonZeroU64::new(size)
}
