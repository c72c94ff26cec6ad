//! Shader, buffer, texture and sampler descriptors, plus the copy structs
//! used by `wgpuQueueWriteTexture`

use bytemuck::{Pod, Zeroable};

use super::{Bool32, Handle, Ptr};
use crate::abi::ChainedStruct;
use crate::assert_layout;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ShaderModuleDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub hint_count: u32,
    pub hints: Ptr,
}

assert_layout!(ShaderModuleDescriptor, size = 16, {
    next_in_chain @ 0,
    label @ 4,
    hint_count @ 8,
    hints @ 12,
});

/// Chained onto [`ShaderModuleDescriptor`]; `code` is NUL-terminated WGSL
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ShaderModuleWgslDescriptor {
    pub chain: ChainedStruct,
    pub code: Ptr,
}

assert_layout!(ShaderModuleWgslDescriptor, size = 12, {
    chain @ 0,
    code @ 8,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct BufferDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub usage: u32,
    pub _pad0: u32,
    pub size: u64,
    pub mapped_at_creation: Bool32,
    pub _pad1: u32,
}

assert_layout!(BufferDescriptor, size = 32, {
    next_in_chain @ 0,
    label @ 4,
    usage @ 8,
    size @ 16,
    mapped_at_creation @ 24,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Extent3d {
    pub width: u32,
    pub height: u32,
    pub depth_or_array_layers: u32,
}

assert_layout!(Extent3d, size = 12, {
    width @ 0,
    height @ 4,
    depth_or_array_layers @ 8,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Origin3d {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

assert_layout!(Origin3d, size = 12, {
    x @ 0,
    y @ 4,
    z @ 8,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct TextureDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub usage: u32,
    pub dimension: u32,
    pub size: Extent3d,
    pub format: u32,
    pub mip_level_count: u32,
    pub sample_count: u32,
    pub view_format_count: u32,
    pub view_formats: Ptr,
}

assert_layout!(TextureDescriptor, size = 48, {
    next_in_chain @ 0,
    label @ 4,
    usage @ 8,
    dimension @ 12,
    size @ 16,
    format @ 28,
    mip_level_count @ 32,
    sample_count @ 36,
    view_format_count @ 40,
    view_formats @ 44,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct TextureViewDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub format: u32,
    pub dimension: u32,
    pub base_mip_level: u32,
    pub mip_level_count: u32,
    pub base_array_layer: u32,
    pub array_layer_count: u32,
    pub aspect: u32,
}

assert_layout!(TextureViewDescriptor, size = 36, {
    next_in_chain @ 0,
    label @ 4,
    format @ 8,
    dimension @ 12,
    base_mip_level @ 16,
    mip_level_count @ 20,
    base_array_layer @ 24,
    array_layer_count @ 28,
    aspect @ 32,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SamplerDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub address_mode_u: u32,
    pub address_mode_v: u32,
    pub address_mode_w: u32,
    pub mag_filter: u32,
    pub min_filter: u32,
    pub mipmap_filter: u32,
    pub lod_min_clamp: f32,
    pub lod_max_clamp: f32,
    pub compare: u32,
    pub max_anisotropy: u16,
    pub _pad: u16,
}

assert_layout!(SamplerDescriptor, size = 48, {
    next_in_chain @ 0,
    label @ 4,
    address_mode_u @ 8,
    address_mode_v @ 12,
    address_mode_w @ 16,
    mag_filter @ 20,
    min_filter @ 24,
    mipmap_filter @ 28,
    lod_min_clamp @ 32,
    lod_max_clamp @ 36,
    compare @ 40,
    max_anisotropy @ 44,
});

/// Destination of a texture upload
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ImageCopyTexture {
    pub next_in_chain: Ptr,
    pub texture: Handle,
    pub mip_level: u32,
    pub origin: Origin3d,
    pub aspect: u32,
}

assert_layout!(ImageCopyTexture, size = 28, {
    next_in_chain @ 0,
    texture @ 4,
    mip_level @ 8,
    origin @ 12,
    aspect @ 24,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct TextureDataLayout {
    pub next_in_chain: Ptr,
    pub _pad: u32,
    pub offset: u64,
    pub bytes_per_row: u32,
    pub rows_per_image: u32,
}

assert_layout!(TextureDataLayout, size = 24, {
    next_in_chain @ 0,
    offset @ 8,
    bytes_per_row @ 16,
    rows_per_image @ 20,
});
