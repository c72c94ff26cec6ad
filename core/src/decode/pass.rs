//! Render pass descriptors and the small structs read while recording

use easel_shared::abi::codes::{load_op, store_op};
use easel_shared::abi::{
    Color, RenderPassColorAttachment, RenderPassDepthStencilAttachment, RenderPassDescriptor,
};
use easel_shared::{Handle, Ptr};

use super::{bool32, ignore_chain};
use crate::error::BridgeResult;
use crate::memory::GuestMemory;
use crate::translate;

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedColorAttachment {
    pub view: Handle,
    pub resolve_target: Option<Handle>,
    pub ops: wgpu::Operations<wgpu::Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDepthStencilAttachment {
    pub view: Handle,
    pub depth_ops: Option<wgpu::Operations<f32>>,
    pub stencil_ops: Option<wgpu::Operations<u32>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRenderPass {
    pub label: Option<String>,
    /// `None` marks an unused attachment slot (view handle 0)
    pub color_attachments: Vec<Option<DecodedColorAttachment>>,
    pub depth_stencil: Option<DecodedDepthStencilAttachment>,
}

pub fn decode_render_pass(mem: &GuestMemory<'_>, ptr: Ptr) -> BridgeResult<DecodedRenderPass> {
    let desc: RenderPassDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "render pass descriptor");
    if desc.occlusion_query_set != 0 {
        tracing::warn!("Ignoring occlusion query set {}", desc.occlusion_query_set);
    }
    if desc.timestamp_writes != 0 {
        tracing::warn!("Ignoring render pass timestamp writes");
    }

    let color_attachments = mem
        .read_array::<RenderPassColorAttachment>(
            desc.color_attachments,
            desc.color_attachment_count,
        )?
        .iter()
        .map(color_attachment)
        .collect();
    let depth_stencil = match desc.depth_stencil_attachment {
        0 => None,
        ptr => Some(depth_stencil_attachment(&mem.read_pod(ptr)?)),
    };

    Ok(DecodedRenderPass {
        label: mem.read_label(desc.label)?,
        color_attachments,
        depth_stencil,
    })
}

fn color(value: &Color) -> wgpu::Color {
    wgpu::Color {
        r: value.r,
        g: value.g,
        b: value.b,
        a: value.a,
    }
}

fn color_attachment(attachment: &RenderPassColorAttachment) -> Option<DecodedColorAttachment> {
    ignore_chain(attachment.next_in_chain, "color attachment");
    if attachment.view == 0 {
        return None;
    }
    Some(DecodedColorAttachment {
        view: attachment.view,
        resolve_target: (attachment.resolve_target != 0).then_some(attachment.resolve_target),
        ops: wgpu::Operations {
            load: translate::load_op(attachment.load_op, color(&attachment.clear_value)),
            store: translate::store_op(attachment.store_op),
        },
    })
}

/// Operations for one aspect. Read-only aspects, and aspects that leave both
/// ops undefined, get none.
fn aspect_ops<V: std::fmt::Debug>(
    load: u32,
    store: u32,
    clear_value: V,
    read_only: u32,
) -> Option<wgpu::Operations<V>> {
    if bool32(read_only) || (load == load_op::UNDEFINED && store == store_op::UNDEFINED) {
        return None;
    }
    Some(wgpu::Operations {
        load: translate::load_op(load, clear_value),
        store: translate::store_op(store),
    })
}

fn depth_stencil_attachment(
    attachment: &RenderPassDepthStencilAttachment,
) -> DecodedDepthStencilAttachment {
    DecodedDepthStencilAttachment {
        view: attachment.view,
        depth_ops: aspect_ops(
            attachment.depth_load_op,
            attachment.depth_store_op,
            attachment.depth_clear_value,
            attachment.depth_read_only,
        ),
        stencil_ops: aspect_ops(
            attachment.stencil_load_op,
            attachment.stencil_store_op,
            attachment.stencil_clear_value,
            attachment.stencil_read_only,
        ),
    }
}

/// Blend constant for `wgpuRenderPassEncoderSetBlendConstant`
pub fn decode_color(mem: &GuestMemory<'_>, ptr: Ptr) -> BridgeResult<wgpu::Color> {
    Ok(color(&mem.read_pod(ptr)?))
}

/// Handle or offset lists passed as `(count, pointer)` pairs
pub fn decode_u32_array(mem: &GuestMemory<'_>, ptr: Ptr, count: u32) -> BridgeResult<Vec<u32>> {
    mem.read_array(ptr, count)
}
