//! Command recording and queue operations
//!
//! Render pass commands are recorded straight into the wgpu pass; wgpu
//! reports their validation errors when the pass ends or the encoder
//! finishes, so only those calls and queue operations run in an error scope.

use std::ops::Range;

use easel_shared::abi::WHOLE_SIZE;
use easel_shared::{Handle, Ptr};
use hashbrown::HashSet;
use wasmtime::Caller;

use super::{complete, no_gpu, with_memory};
use crate::decode;
use crate::error::{BridgeError, BridgeResult};
use crate::error_scope::guarded;
use crate::objects::{GpuObject, ObjectKind, ObjectTable, SurfaceInfo};
use crate::translate;
use crate::wasm::BridgeContext;

fn device(ctx: &BridgeContext) -> BridgeResult<wgpu::Device> {
    ctx.device().cloned().ok_or_else(no_gpu)
}

/// Byte range of a buffer binding; `WGPU_WHOLE_SIZE` (or zero) runs to the
/// end of the buffer. wgpu panics on out-of-range or empty slices, so those
/// are rejected here.
fn slice_range(buffer_size: u64, offset: u64, size: u64) -> BridgeResult<Range<u64>> {
    let end = if size == WHOLE_SIZE || size == 0 {
        buffer_size
    } else {
        offset
            .checked_add(size)
            .ok_or_else(|| BridgeError::invalid("buffer binding size", size))?
    };
    if end > buffer_size || offset >= end {
        return Err(BridgeError::invalid("buffer binding offset", offset));
    }
    Ok(offset..end)
}

/// `first..first + count`, rejecting ranges past `u32::MAX`
fn count_range(first: u32, count: u32, what: &'static str) -> BridgeResult<Range<u32>> {
    let end = first
        .checked_add(count)
        .ok_or_else(|| BridgeError::invalid(what, count))?;
    Ok(first..end)
}

pub(super) fn device_create_command_encoder(
    mut caller: Caller<'_, BridgeContext>,
    device: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let label = decode::decode_label_descriptor(mem, desc)?;
        let device = ctx.objects.device(device)?;
        let encoder = guarded(device, || {
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: label.as_deref(),
            })
        })?;
        Ok(ctx.objects.register(GpuObject::CommandEncoder(encoder)))
    });
    complete("wgpuDeviceCreateCommandEncoder", result)
}

pub(super) fn command_encoder_begin_render_pass(
    mut caller: Caller<'_, BridgeContext>,
    encoder: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let desc = decode::decode_render_pass(mem, desc)?;
        let device = device(ctx)?;

        // Views are cloned out so the encoder can be borrowed mutably below
        let mut colors = Vec::with_capacity(desc.color_attachments.len());
        for attachment in &desc.color_attachments {
            colors.push(match attachment {
                Some(attachment) => Some((
                    ctx.objects.texture_view(attachment.view)?.clone(),
                    attachment
                        .resolve_target
                        .map(|handle| ctx.objects.texture_view(handle).cloned())
                        .transpose()?,
                    attachment.ops,
                )),
                None => None,
            });
        }
        let depth_stencil = match &desc.depth_stencil {
            Some(attachment) => Some((
                ctx.objects.texture_view(attachment.view)?.clone(),
                attachment.depth_ops,
                attachment.stencil_ops,
            )),
            None => None,
        };

        let encoder = ctx.objects.command_encoder_mut(encoder)?;
        let pass = guarded(&device, || {
            let color_attachments: Vec<Option<wgpu::RenderPassColorAttachment<'_>>> = colors
                .iter()
                .map(|color| {
                    color.as_ref().map(|(view, resolve_target, ops)| {
                        wgpu::RenderPassColorAttachment {
                            view,
                            depth_slice: None,
                            resolve_target: resolve_target.as_ref(),
                            ops: *ops,
                        }
                    })
                })
                .collect();
            encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: desc.label.as_deref(),
                    color_attachments: &color_attachments,
                    depth_stencil_attachment: depth_stencil.as_ref().map(
                        |(view, depth_ops, stencil_ops)| wgpu::RenderPassDepthStencilAttachment {
                            view,
                            depth_ops: *depth_ops,
                            stencil_ops: *stencil_ops,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime()
        })?;
        Ok(ctx.objects.register(GpuObject::RenderPass(pass)))
    });
    complete("wgpuCommandEncoderBeginRenderPass", result)
}

pub(super) fn render_pass_set_pipeline(
    mut caller: Caller<'_, BridgeContext>,
    pass: Handle,
    pipeline: Handle,
) -> wasmtime::Result<()> {
    let objects = &mut caller.data_mut().objects;
    let result = objects.render_pipeline(pipeline).cloned().and_then(|pipeline| {
        objects.render_pass_mut(pass)?.set_pipeline(&pipeline);
        Ok(())
    });
    complete("wgpuRenderPassEncoderSetPipeline", result)
}

pub(super) fn render_pass_set_bind_group(
    mut caller: Caller<'_, BridgeContext>,
    pass: Handle,
    index: u32,
    group: Handle,
    dynamic_offset_count: u32,
    dynamic_offsets: Ptr,
) -> wasmtime::Result<()> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let offsets = decode::decode_u32_array(mem, dynamic_offsets, dynamic_offset_count)?;
        // Group 0 unbinds the slot
        let group = match group {
            0 => None,
            handle => Some(ctx.objects.bind_group(handle)?.clone()),
        };
        ctx.objects
            .render_pass_mut(pass)?
            .set_bind_group(index, group.as_ref(), &offsets);
        Ok(())
    });
    complete("wgpuRenderPassEncoderSetBindGroup", result)
}

pub(super) fn render_pass_set_vertex_buffer(
    mut caller: Caller<'_, BridgeContext>,
    pass: Handle,
    slot: u32,
    buffer: Handle,
    offset: u64,
    size: u64,
) -> wasmtime::Result<()> {
    let objects = &mut caller.data_mut().objects;
    let result = objects.buffer(buffer).cloned().and_then(|buffer| {
        let range = slice_range(buffer.size(), offset, size)?;
        objects
            .render_pass_mut(pass)?
            .set_vertex_buffer(slot, buffer.slice(range));
        Ok(())
    });
    complete("wgpuRenderPassEncoderSetVertexBuffer", result)
}

pub(super) fn render_pass_set_index_buffer(
    mut caller: Caller<'_, BridgeContext>,
    pass: Handle,
    buffer: Handle,
    format: u32,
    offset: u64,
    size: u64,
) -> wasmtime::Result<()> {
    let objects = &mut caller.data_mut().objects;
    let result = objects.buffer(buffer).cloned().and_then(|buffer| {
        let range = slice_range(buffer.size(), offset, size)?;
        objects
            .render_pass_mut(pass)?
            .set_index_buffer(buffer.slice(range), translate::index_format(format));
        Ok(())
    });
    complete("wgpuRenderPassEncoderSetIndexBuffer", result)
}

#[allow(clippy::too_many_arguments)]
pub(super) fn render_pass_set_viewport(
    mut caller: Caller<'_, BridgeContext>,
    pass: Handle,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    min_depth: f32,
    max_depth: f32,
) -> wasmtime::Result<()> {
    let result = caller
        .data_mut()
        .objects
        .render_pass_mut(pass)
        .map(|pass| pass.set_viewport(x, y, width, height, min_depth, max_depth));
    complete("wgpuRenderPassEncoderSetViewport", result)
}

pub(super) fn render_pass_set_scissor_rect(
    mut caller: Caller<'_, BridgeContext>,
    pass: Handle,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> wasmtime::Result<()> {
    let result = caller
        .data_mut()
        .objects
        .render_pass_mut(pass)
        .map(|pass| pass.set_scissor_rect(x, y, width, height));
    complete("wgpuRenderPassEncoderSetScissorRect", result)
}

pub(super) fn render_pass_set_blend_constant(
    mut caller: Caller<'_, BridgeContext>,
    pass: Handle,
    color: Ptr,
) -> wasmtime::Result<()> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let color = decode::decode_color(mem, color)?;
        ctx.objects.render_pass_mut(pass)?.set_blend_constant(color);
        Ok(())
    });
    complete("wgpuRenderPassEncoderSetBlendConstant", result)
}

pub(super) fn render_pass_draw(
    mut caller: Caller<'_, BridgeContext>,
    pass: Handle,
    vertex_count: u32,
    instance_count: u32,
    first_vertex: u32,
    first_instance: u32,
) -> wasmtime::Result<()> {
    let pass = caller.data_mut().objects.render_pass_mut(pass);
    let result = pass.and_then(|pass| {
        let vertices = count_range(first_vertex, vertex_count, "vertex count")?;
        let instances = count_range(first_instance, instance_count, "instance count")?;
        pass.draw(vertices, instances);
        Ok(())
    });
    complete("wgpuRenderPassEncoderDraw", result)
}

pub(super) fn render_pass_draw_indexed(
    mut caller: Caller<'_, BridgeContext>,
    pass: Handle,
    index_count: u32,
    instance_count: u32,
    first_index: u32,
    base_vertex: i32,
    first_instance: u32,
) -> wasmtime::Result<()> {
    let pass = caller.data_mut().objects.render_pass_mut(pass);
    let result = pass.and_then(|pass| {
        let indices = count_range(first_index, index_count, "index count")?;
        let instances = count_range(first_instance, instance_count, "instance count")?;
        pass.draw_indexed(indices, base_vertex, instances);
        Ok(())
    });
    complete("wgpuRenderPassEncoderDrawIndexed", result)
}

pub(super) fn render_pass_end(
    mut caller: Caller<'_, BridgeContext>,
    pass: Handle,
) -> wasmtime::Result<()> {
    let ctx = caller.data_mut();
    let result = ctx.objects.take_render_pass(pass).and_then(|pass| match ctx.device() {
        Some(device) => guarded(device, || drop(pass)),
        None => {
            drop(pass);
            Ok(())
        }
    });
    complete("wgpuRenderPassEncoderEnd", result)
}

pub(super) fn command_encoder_finish(
    mut caller: Caller<'_, BridgeContext>,
    encoder: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let label = decode::decode_label_descriptor(mem, desc)?;
        if let Some(label) = label {
            tracing::trace!("Finishing command buffer {:?}", label);
        }
        let device = device(ctx)?;
        let encoder = ctx.objects.take_command_encoder(encoder)?;
        let buffer = guarded(&device, || encoder.finish())?;
        Ok(ctx.objects.register(GpuObject::CommandBuffer(buffer)))
    });
    complete("wgpuCommandEncoderFinish", result)
}

/// Every handle must be a distinct live command buffer. Runs before any
/// buffer is consumed, so a rejected submission leaves all of them in place.
fn check_submission(objects: &ObjectTable, handles: &[Handle]) -> BridgeResult<()> {
    let mut seen = HashSet::with_capacity(handles.len());
    if let Some(&handle) = handles.iter().find(|&&handle| !seen.insert(handle)) {
        return Err(BridgeError::invalid("repeated command buffer handle", handle));
    }
    for &handle in handles {
        match objects.kind_of(handle) {
            Some(ObjectKind::CommandBuffer) => {}
            Some(found) => {
                return Err(BridgeError::WrongKind {
                    handle,
                    expected: ObjectKind::CommandBuffer,
                    found,
                });
            }
            None => {
                return Err(BridgeError::UnresolvedHandle {
                    kind: ObjectKind::CommandBuffer,
                    handle,
                });
            }
        }
    }
    Ok(())
}

pub(super) fn queue_submit(
    mut caller: Caller<'_, BridgeContext>,
    queue: Handle,
    count: u32,
    commands: Ptr,
) -> wasmtime::Result<()> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let handles = decode::decode_u32_array(mem, commands, count)?;
        let queue = ctx.objects.queue(queue)?.clone();
        let device = device(ctx)?;

        check_submission(&ctx.objects, &handles)?;
        let buffers = handles
            .iter()
            .map(|&handle| ctx.objects.take_command_buffer(handle))
            .collect::<BridgeResult<Vec<_>>>()?;
        guarded(&device, || {
            queue.submit(buffers);
        })
    });
    complete("wgpuQueueSubmit", result)
}

pub(super) fn queue_write_buffer(
    mut caller: Caller<'_, BridgeContext>,
    queue: Handle,
    buffer: Handle,
    offset: u64,
    data: Ptr,
    size: u32,
) -> wasmtime::Result<()> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let view = *mem;
        let bytes = view.read_bytes(data, size)?;
        let queue = ctx.objects.queue(queue)?;
        let buffer = ctx.objects.buffer(buffer)?;
        let end = offset.checked_add(u64::from(size));
        if end.is_none_or(|end| end > buffer.size()) {
            return Err(BridgeError::invalid("buffer write offset", offset));
        }
        let device = ctx.device().ok_or_else(no_gpu)?;
        guarded(device, || queue.write_buffer(buffer, offset, bytes))
    });
    complete("wgpuQueueWriteBuffer", result)
}

pub(super) fn queue_write_texture(
    mut caller: Caller<'_, BridgeContext>,
    queue: Handle,
    destination: Ptr,
    data: Ptr,
    size: u32,
    layout: Ptr,
    extent: Ptr,
) -> wasmtime::Result<()> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let view = *mem;
        let write = decode::decode_texture_write(&view, destination, layout, extent)?;
        let bytes = view.read_bytes(data, size)?;
        let queue = ctx.objects.queue(queue)?;
        let texture = ctx.objects.texture(write.texture)?;
        let device = ctx.device().ok_or_else(no_gpu)?;
        guarded(device, || {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture,
                    mip_level: write.mip_level,
                    origin: write.origin,
                    aspect: write.aspect,
                },
                bytes,
                write.layout,
                write.size,
            )
        })
    });
    complete("wgpuQueueWriteTexture", result)
}
