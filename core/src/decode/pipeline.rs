//! Render pipeline descriptors
//!
//! The pipeline descriptor is the largest producer struct: vertex, primitive
//! and multisample state are embedded, while depth/stencil and fragment state
//! hang off pointers. Vertex buffer layouts and color targets are arrays.

use easel_shared::abi::codes::texture_format;
use easel_shared::abi::{
    BlendComponent, BlendState, ColorTargetState, DepthStencilState, FragmentState,
    MultisampleState, PrimitiveState, RenderPipelineDescriptor, StencilFaceState,
    VertexAttribute, VertexBufferLayout, VertexState,
};
use easel_shared::{Handle, Ptr};

use super::{bool32, entry_point, ignore_chain};
use crate::error::BridgeResult;
use crate::memory::GuestMemory;
use crate::translate;

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedVertexBufferLayout {
    pub array_stride: u64,
    pub step_mode: wgpu::VertexStepMode,
    pub attributes: Vec<wgpu::VertexAttribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedVertexState {
    pub module: Handle,
    pub entry_point: Option<String>,
    pub buffers: Vec<DecodedVertexBufferLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFragmentState {
    pub module: Handle,
    pub entry_point: Option<String>,
    /// `None` marks an unused color attachment slot
    pub targets: Vec<Option<wgpu::ColorTargetState>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRenderPipeline {
    pub label: Option<String>,
    /// `None` requests an automatic layout
    pub layout: Option<Handle>,
    pub vertex: DecodedVertexState,
    pub primitive: wgpu::PrimitiveState,
    pub depth_stencil: Option<wgpu::DepthStencilState>,
    pub multisample: wgpu::MultisampleState,
    pub fragment: Option<DecodedFragmentState>,
}

/// Decode a render pipeline.
///
/// `preferred` is the surface's preferred format, substituted into
/// presentable color targets (see [`translate::color_target_format`]).
pub fn decode_render_pipeline(
    mem: &GuestMemory<'_>,
    ptr: Ptr,
    preferred: wgpu::TextureFormat,
) -> BridgeResult<DecodedRenderPipeline> {
    let desc: RenderPipelineDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "render pipeline descriptor");

    let depth_stencil = match desc.depth_stencil {
        0 => None,
        ptr => Some(depth_stencil(&mem.read_pod(ptr)?)),
    };
    let fragment = match desc.fragment {
        0 => None,
        ptr => Some(fragment(mem, &mem.read_pod(ptr)?, preferred)?),
    };

    Ok(DecodedRenderPipeline {
        label: mem.read_label(desc.label)?,
        layout: (desc.layout != 0).then_some(desc.layout),
        vertex: vertex(mem, &desc.vertex)?,
        primitive: primitive(&desc.primitive),
        depth_stencil,
        multisample: multisample(&desc.multisample),
        fragment,
    })
}

fn warn_constants(stage: &'static str, count: u32) {
    if count != 0 {
        tracing::warn!("Ignoring {} pipeline constants on {} stage", count, stage);
    }
}

fn vertex(mem: &GuestMemory<'_>, state: &VertexState) -> BridgeResult<DecodedVertexState> {
    ignore_chain(state.next_in_chain, "vertex state");
    warn_constants("vertex", state.constant_count);

    let buffers = mem
        .read_array::<VertexBufferLayout>(state.buffers, state.buffer_count)?
        .iter()
        .map(|layout| vertex_buffer_layout(mem, layout))
        .collect::<BridgeResult<Vec<_>>>()?;

    Ok(DecodedVertexState {
        module: state.module,
        entry_point: entry_point(mem, state.entry_point)?,
        buffers,
    })
}

fn vertex_buffer_layout(
    mem: &GuestMemory<'_>,
    layout: &VertexBufferLayout,
) -> BridgeResult<DecodedVertexBufferLayout> {
    // An unused slot keeps later buffer indices in place
    let Some(step_mode) = translate::vertex_step_mode(layout.step_mode) else {
        return Ok(DecodedVertexBufferLayout {
            array_stride: 0,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Vec::new(),
        });
    };
    let attributes = mem
        .read_array::<VertexAttribute>(layout.attributes, layout.attribute_count)?
        .into_iter()
        .map(|attr| wgpu::VertexAttribute {
            format: translate::vertex_format(attr.format),
            offset: attr.offset,
            shader_location: attr.shader_location,
        })
        .collect();
    Ok(DecodedVertexBufferLayout {
        array_stride: layout.array_stride,
        step_mode,
        attributes,
    })
}

fn primitive(state: &PrimitiveState) -> wgpu::PrimitiveState {
    ignore_chain(state.next_in_chain, "primitive state");
    wgpu::PrimitiveState {
        topology: translate::primitive_topology(state.topology),
        strip_index_format: translate::strip_index_format(state.strip_index_format),
        front_face: translate::front_face(state.front_face),
        cull_mode: translate::cull_mode(state.cull_mode),
        unclipped_depth: false,
        polygon_mode: wgpu::PolygonMode::Fill,
        conservative: false,
    }
}

fn multisample(state: &MultisampleState) -> wgpu::MultisampleState {
    ignore_chain(state.next_in_chain, "multisample state");
    wgpu::MultisampleState {
        count: state.count.max(1),
        mask: state.mask as u64,
        alpha_to_coverage_enabled: bool32(state.alpha_to_coverage_enabled),
    }
}

fn stencil_face(face: &StencilFaceState) -> wgpu::StencilFaceState {
    wgpu::StencilFaceState {
        compare: translate::compare_function(face.compare),
        fail_op: translate::stencil_operation(face.fail_op),
        depth_fail_op: translate::stencil_operation(face.depth_fail_op),
        pass_op: translate::stencil_operation(face.pass_op),
    }
}

fn depth_stencil(state: &DepthStencilState) -> wgpu::DepthStencilState {
    ignore_chain(state.next_in_chain, "depth stencil state");
    wgpu::DepthStencilState {
        // Depth formats are never substituted
        format: translate::texture_format(state.format),
        depth_write_enabled: bool32(state.depth_write_enabled),
        depth_compare: translate::compare_function(state.depth_compare),
        stencil: wgpu::StencilState {
            front: stencil_face(&state.stencil_front),
            back: stencil_face(&state.stencil_back),
            read_mask: state.stencil_read_mask,
            write_mask: state.stencil_write_mask,
        },
        bias: wgpu::DepthBiasState {
            constant: state.depth_bias,
            slope_scale: state.depth_bias_slope_scale,
            clamp: state.depth_bias_clamp,
        },
    }
}

fn blend_component(component: &BlendComponent) -> wgpu::BlendComponent {
    wgpu::BlendComponent {
        src_factor: translate::blend_factor(component.src_factor),
        dst_factor: translate::blend_factor(component.dst_factor),
        operation: translate::blend_operation(component.operation),
    }
}

fn color_target(
    mem: &GuestMemory<'_>,
    target: &ColorTargetState,
    preferred: wgpu::TextureFormat,
) -> BridgeResult<Option<wgpu::ColorTargetState>> {
    ignore_chain(target.next_in_chain, "color target state");
    if target.format == texture_format::UNDEFINED {
        return Ok(None);
    }
    let blend = match target.blend {
        0 => None,
        ptr => {
            let state: BlendState = mem.read_pod(ptr)?;
            Some(wgpu::BlendState {
                color: blend_component(&state.color),
                alpha: blend_component(&state.alpha),
            })
        }
    };
    Ok(Some(wgpu::ColorTargetState {
        format: translate::color_target_format(target.format, preferred),
        blend,
        write_mask: translate::color_writes(target.write_mask),
    }))
}

fn fragment(
    mem: &GuestMemory<'_>,
    state: &FragmentState,
    preferred: wgpu::TextureFormat,
) -> BridgeResult<DecodedFragmentState> {
    ignore_chain(state.next_in_chain, "fragment state");
    warn_constants("fragment", state.constant_count);
    let targets = mem
        .read_array::<ColorTargetState>(state.targets, state.target_count)?
        .iter()
        .map(|target| color_target(mem, target, preferred))
        .collect::<BridgeResult<Vec<_>>>()?;
    Ok(DecodedFragmentState {
        module: state.module,
        entry_point: entry_point(mem, state.entry_point)?,
        targets,
    })
}
