//! Bind group layouts, bind groups and pipeline layouts

use bytemuck::{Pod, Zeroable};

use super::{Bool32, Handle, Ptr};
use crate::assert_layout;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct BufferBindingLayout {
    pub next_in_chain: Ptr,
    pub ty: u32,
    pub has_dynamic_offset: Bool32,
    pub _pad: u32,
    pub min_binding_size: u64,
}

assert_layout!(BufferBindingLayout, size = 24, {
    next_in_chain @ 0,
    ty @ 4,
    has_dynamic_offset @ 8,
    min_binding_size @ 16,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SamplerBindingLayout {
    pub next_in_chain: Ptr,
    pub ty: u32,
}

assert_layout!(SamplerBindingLayout, size = 8, {
    next_in_chain @ 0,
    ty @ 4,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct TextureBindingLayout {
    pub next_in_chain: Ptr,
    pub sample_type: u32,
    pub view_dimension: u32,
    pub multisampled: Bool32,
}

assert_layout!(TextureBindingLayout, size = 16, {
    next_in_chain @ 0,
    sample_type @ 4,
    view_dimension @ 8,
    multisampled @ 12,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct StorageTextureBindingLayout {
    pub next_in_chain: Ptr,
    pub access: u32,
    pub format: u32,
    pub view_dimension: u32,
}

assert_layout!(StorageTextureBindingLayout, size = 16, {
    next_in_chain @ 0,
    access @ 4,
    format @ 8,
    view_dimension @ 12,
});

/// One entry of a bind group layout.
///
/// Exactly one of the four binding-layout members is expected to carry a
/// non-zero discriminant; the others are left zeroed (undefined) by the
/// producer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct BindGroupLayoutEntry {
    pub next_in_chain: Ptr,
    pub binding: u32,
    pub visibility: u32,
    pub _pad: u32,
    pub buffer: BufferBindingLayout,
    pub sampler: SamplerBindingLayout,
    pub texture: TextureBindingLayout,
    pub storage_texture: StorageTextureBindingLayout,
}

assert_layout!(BindGroupLayoutEntry, size = 80, {
    next_in_chain @ 0,
    binding @ 4,
    visibility @ 8,
    buffer @ 16,
    sampler @ 40,
    texture @ 48,
    storage_texture @ 64,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct BindGroupLayoutDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub entry_count: u32,
    pub entries: Ptr,
}

assert_layout!(BindGroupLayoutDescriptor, size = 16, {
    next_in_chain @ 0,
    label @ 4,
    entry_count @ 8,
    entries @ 12,
});

/// One resource of a bind group: a buffer range, a sampler, or a texture view
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct BindGroupEntry {
    pub next_in_chain: Ptr,
    pub binding: u32,
    pub buffer: Handle,
    pub _pad: u32,
    pub offset: u64,
    pub size: u64,
    pub sampler: Handle,
    pub texture_view: Handle,
}

assert_layout!(BindGroupEntry, size = 40, {
    next_in_chain @ 0,
    binding @ 4,
    buffer @ 8,
    offset @ 16,
    size @ 24,
    sampler @ 32,
    texture_view @ 36,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct BindGroupDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub layout: Handle,
    pub entry_count: u32,
    pub entries: Ptr,
}

assert_layout!(BindGroupDescriptor, size = 20, {
    next_in_chain @ 0,
    label @ 4,
    layout @ 8,
    entry_count @ 12,
    entries @ 16,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct PipelineLayoutDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub bind_group_layout_count: u32,
    pub bind_group_layouts: Ptr,
}

assert_layout!(PipelineLayoutDescriptor, size = 16, {
    next_in_chain @ 0,
    label @ 4,
    bind_group_layout_count @ 8,
    bind_group_layouts @ 12,
});
