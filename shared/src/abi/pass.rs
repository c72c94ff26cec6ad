//! Command encoding descriptors

use bytemuck::{Pod, Zeroable};

use super::{Bool32, Handle, Ptr};
use crate::assert_layout;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

assert_layout!(Color, size = 32, {
    r @ 0,
    g @ 8,
    b @ 16,
    a @ 24,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct CommandEncoderDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
}

assert_layout!(CommandEncoderDescriptor, size = 8, {
    next_in_chain @ 0,
    label @ 4,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct CommandBufferDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
}

assert_layout!(CommandBufferDescriptor, size = 8, {
    next_in_chain @ 0,
    label @ 4,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RenderPassColorAttachment {
    pub next_in_chain: Ptr,
    pub view: Handle,
    pub resolve_target: Handle,
    pub load_op: u32,
    pub store_op: u32,
    pub _pad: u32,
    pub clear_value: Color,
}

assert_layout!(RenderPassColorAttachment, size = 56, {
    next_in_chain @ 0,
    view @ 4,
    resolve_target @ 8,
    load_op @ 12,
    store_op @ 16,
    clear_value @ 24,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RenderPassDepthStencilAttachment {
    pub view: Handle,
    pub depth_load_op: u32,
    pub depth_store_op: u32,
    pub depth_clear_value: f32,
    pub depth_read_only: Bool32,
    pub stencil_load_op: u32,
    pub stencil_store_op: u32,
    pub stencil_clear_value: u32,
    pub stencil_read_only: Bool32,
}

assert_layout!(RenderPassDepthStencilAttachment, size = 36, {
    view @ 0,
    depth_load_op @ 4,
    depth_store_op @ 8,
    depth_clear_value @ 12,
    depth_read_only @ 16,
    stencil_load_op @ 20,
    stencil_store_op @ 24,
    stencil_clear_value @ 28,
    stencil_read_only @ 32,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RenderPassDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub color_attachment_count: u32,
    pub color_attachments: Ptr,
    pub depth_stencil_attachment: Ptr,
    pub occlusion_query_set: Handle,
    pub timestamp_writes: Ptr,
}

assert_layout!(RenderPassDescriptor, size = 28, {
    next_in_chain @ 0,
    label @ 4,
    color_attachment_count @ 8,
    color_attachments @ 12,
    depth_stencil_attachment @ 16,
    occlusion_query_set @ 20,
    timestamp_writes @ 24,
});
