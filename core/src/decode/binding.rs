//! Bind group layouts, bind groups and pipeline layouts

use easel_shared::abi::{
    BindGroupDescriptor, BindGroupEntry, BindGroupLayoutDescriptor, BindGroupLayoutEntry,
    PipelineLayoutDescriptor,
};
use easel_shared::{Handle, Ptr};

use super::{binding_size, bool32, ignore_chain};
use crate::error::{BridgeError, BridgeResult};
use crate::memory::GuestMemory;
use crate::translate;

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBindGroupLayout {
    pub label: Option<String>,
    pub entries: Vec<wgpu::BindGroupLayoutEntry>,
}

pub fn decode_bind_group_layout(
    mem: &GuestMemory<'_>,
    ptr: Ptr,
) -> BridgeResult<DecodedBindGroupLayout> {
    let desc: BindGroupLayoutDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "bind group layout descriptor");
    let entries = mem
        .read_array::<BindGroupLayoutEntry>(desc.entries, desc.entry_count)?
        .iter()
        .map(layout_entry)
        .collect::<BridgeResult<Vec<_>>>()?;
    Ok(DecodedBindGroupLayout {
        label: mem.read_label(desc.label)?,
        entries,
    })
}

/// Pick the one binding kind an entry declares.
///
/// The four discriminants are validated rather than defaulted: an
/// out-of-range value, no kind at all, or more than one kind rejects the
/// whole layout.
fn layout_entry(entry: &BindGroupLayoutEntry) -> BridgeResult<wgpu::BindGroupLayoutEntry> {
    let buffer = translate::try_buffer_binding_type(entry.buffer.ty)
        .ok_or_else(|| BridgeError::invalid("buffer binding type", entry.buffer.ty))?;
    let sampler = translate::try_sampler_binding_type(entry.sampler.ty)
        .ok_or_else(|| BridgeError::invalid("sampler binding type", entry.sampler.ty))?;
    let texture = translate::try_texture_sample_type(entry.texture.sample_type)
        .ok_or_else(|| BridgeError::invalid("texture sample type", entry.texture.sample_type))?;
    let storage = translate::try_storage_texture_access(entry.storage_texture.access)
        .ok_or_else(|| {
            BridgeError::invalid("storage texture access", entry.storage_texture.access)
        })?;

    let mut kinds: Vec<wgpu::BindingType> = Vec::with_capacity(1);
    if let Some(ty) = buffer {
        kinds.push(wgpu::BindingType::Buffer {
            ty,
            has_dynamic_offset: bool32(entry.buffer.has_dynamic_offset),
            min_binding_size: std::num::NonZeroU64::new(entry.buffer.min_binding_size),
        });
    }
    if let Some(ty) = sampler {
        kinds.push(wgpu::BindingType::Sampler(ty));
    }
    if let Some(sample_type) = texture {
        kinds.push(wgpu::BindingType::Texture {
            sample_type,
            view_dimension: translate::texture_view_dimension(entry.texture.view_dimension),
            multisampled: bool32(entry.texture.multisampled),
        });
    }
    if let Some(access) = storage {
        kinds.push(wgpu::BindingType::StorageTexture {
            access,
            // Storage formats are never substituted
            format: translate::texture_format(entry.storage_texture.format),
            view_dimension: translate::texture_view_dimension(
                entry.storage_texture.view_dimension,
            ),
        });
    }

    if kinds.len() != 1 {
        return Err(BridgeError::invalid(
            "number of binding kinds in layout entry",
            kinds.len() as u64,
        ));
    }
    let ty = kinds.remove(0);

    Ok(wgpu::BindGroupLayoutEntry {
        binding: entry.binding,
        visibility: translate::shader_stages(entry.visibility),
        ty,
        count: None,
    })
}

/// Resource bound at one bind group slot, with the handle still unresolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedResource {
    Buffer {
        buffer: Handle,
        offset: u64,
        size: Option<std::num::NonZeroU64>,
    },
    Sampler(Handle),
    TextureView(Handle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedBindGroupEntry {
    pub binding: u32,
    pub resource: DecodedResource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBindGroup {
    pub label: Option<String>,
    pub layout: Handle,
    pub entries: Vec<DecodedBindGroupEntry>,
}

pub fn decode_bind_group(mem: &GuestMemory<'_>, ptr: Ptr) -> BridgeResult<DecodedBindGroup> {
    let desc: BindGroupDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "bind group descriptor");
    let entries = mem
        .read_array::<BindGroupEntry>(desc.entries, desc.entry_count)?
        .iter()
        .map(group_entry)
        .collect::<BridgeResult<Vec<_>>>()?;
    Ok(DecodedBindGroup {
        label: mem.read_label(desc.label)?,
        layout: desc.layout,
        entries,
    })
}

/// Exactly one of buffer, sampler and texture view must be set
fn group_entry(entry: &BindGroupEntry) -> BridgeResult<DecodedBindGroupEntry> {
    let resource = match (entry.buffer, entry.sampler, entry.texture_view) {
        (buffer, 0, 0) if buffer != 0 => DecodedResource::Buffer {
            buffer,
            offset: entry.offset,
            size: binding_size(entry.size),
        },
        (0, sampler, 0) if sampler != 0 => DecodedResource::Sampler(sampler),
        (0, 0, view) if view != 0 => DecodedResource::TextureView(view),
        (buffer, sampler, view) => {
            let set = [buffer, sampler, view].iter().filter(|&&h| h != 0).count();
            return Err(BridgeError::invalid(
                "number of resources in bind group entry",
                set as u64,
            ));
        }
    };
    Ok(DecodedBindGroupEntry {
        binding: entry.binding,
        resource,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPipelineLayout {
    pub label: Option<String>,
    pub bind_group_layouts: Vec<Handle>,
}

pub fn decode_pipeline_layout(
    mem: &GuestMemory<'_>,
    ptr: Ptr,
) -> BridgeResult<DecodedPipelineLayout> {
    let desc: PipelineLayoutDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "pipeline layout descriptor");
    Ok(DecodedPipelineLayout {
        label: mem.read_label(desc.label)?,
        bind_group_layouts: mem
            .read_array(desc.bind_group_layouts, desc.bind_group_layout_count)?,
    })
}
