//! Render pipeline descriptor and its nested states

use bytemuck::{Pod, Zeroable};

use super::{Bool32, Handle, Ptr};
use crate::assert_layout;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct VertexAttribute {
    pub format: u32,
    pub _pad0: u32,
    pub offset: u64,
    pub shader_location: u32,
    pub _pad1: u32,
}

assert_layout!(VertexAttribute, size = 24, {
    format @ 0,
    offset @ 8,
    shader_location @ 16,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct VertexBufferLayout {
    pub array_stride: u64,
    pub step_mode: u32,
    pub attribute_count: u32,
    pub attributes: Ptr,
    pub _pad: u32,
}

assert_layout!(VertexBufferLayout, size = 24, {
    array_stride @ 0,
    step_mode @ 8,
    attribute_count @ 12,
    attributes @ 16,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct VertexState {
    pub next_in_chain: Ptr,
    pub module: Handle,
    pub entry_point: Ptr,
    pub constant_count: u32,
    pub constants: Ptr,
    pub buffer_count: u32,
    pub buffers: Ptr,
}

assert_layout!(VertexState, size = 28, {
    next_in_chain @ 0,
    module @ 4,
    entry_point @ 8,
    constant_count @ 12,
    constants @ 16,
    buffer_count @ 20,
    buffers @ 24,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct PrimitiveState {
    pub next_in_chain: Ptr,
    pub topology: u32,
    pub strip_index_format: u32,
    pub front_face: u32,
    pub cull_mode: u32,
}

assert_layout!(PrimitiveState, size = 20, {
    next_in_chain @ 0,
    topology @ 4,
    strip_index_format @ 8,
    front_face @ 12,
    cull_mode @ 16,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct MultisampleState {
    pub next_in_chain: Ptr,
    pub count: u32,
    pub mask: u32,
    pub alpha_to_coverage_enabled: Bool32,
}

assert_layout!(MultisampleState, size = 16, {
    next_in_chain @ 0,
    count @ 4,
    mask @ 8,
    alpha_to_coverage_enabled @ 12,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct StencilFaceState {
    pub compare: u32,
    pub fail_op: u32,
    pub depth_fail_op: u32,
    pub pass_op: u32,
}

assert_layout!(StencilFaceState, size = 16, {
    compare @ 0,
    fail_op @ 4,
    depth_fail_op @ 8,
    pass_op @ 12,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DepthStencilState {
    pub next_in_chain: Ptr,
    pub format: u32,
    pub depth_write_enabled: Bool32,
    pub depth_compare: u32,
    pub stencil_front: StencilFaceState,
    pub stencil_back: StencilFaceState,
    pub stencil_read_mask: u32,
    pub stencil_write_mask: u32,
    pub depth_bias: i32,
    pub depth_bias_slope_scale: f32,
    pub depth_bias_clamp: f32,
}

assert_layout!(DepthStencilState, size = 68, {
    next_in_chain @ 0,
    format @ 4,
    depth_write_enabled @ 8,
    depth_compare @ 12,
    stencil_front @ 16,
    stencil_back @ 32,
    stencil_read_mask @ 48,
    stencil_write_mask @ 52,
    depth_bias @ 56,
    depth_bias_slope_scale @ 60,
    depth_bias_clamp @ 64,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct BlendComponent {
    pub operation: u32,
    pub src_factor: u32,
    pub dst_factor: u32,
}

assert_layout!(BlendComponent, size = 12, {
    operation @ 0,
    src_factor @ 4,
    dst_factor @ 8,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct BlendState {
    pub color: BlendComponent,
    pub alpha: BlendComponent,
}

assert_layout!(BlendState, size = 24, {
    color @ 0,
    alpha @ 12,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ColorTargetState {
    pub next_in_chain: Ptr,
    pub format: u32,
    /// Pointer to a [`BlendState`], 0 for no blending
    pub blend: Ptr,
    pub write_mask: u32,
}

assert_layout!(ColorTargetState, size = 16, {
    next_in_chain @ 0,
    format @ 4,
    blend @ 8,
    write_mask @ 12,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct FragmentState {
    pub next_in_chain: Ptr,
    pub module: Handle,
    pub entry_point: Ptr,
    pub constant_count: u32,
    pub constants: Ptr,
    pub target_count: u32,
    pub targets: Ptr,
}

assert_layout!(FragmentState, size = 28, {
    next_in_chain @ 0,
    module @ 4,
    entry_point @ 8,
    constant_count @ 12,
    constants @ 16,
    target_count @ 20,
    targets @ 24,
});

/// `vertex`, `primitive` and `multisample` are embedded by value;
/// `depth_stencil` and `fragment` are optional pointers.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RenderPipelineDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub layout: Handle,
    pub vertex: VertexState,
    pub primitive: PrimitiveState,
    pub depth_stencil: Ptr,
    pub multisample: MultisampleState,
    pub fragment: Ptr,
}

assert_layout!(RenderPipelineDescriptor, size = 84, {
    next_in_chain @ 0,
    label @ 4,
    layout @ 8,
    vertex @ 12,
    primitive @ 40,
    depth_stencil @ 60,
    multisample @ 64,
    fragment @ 80,
});
