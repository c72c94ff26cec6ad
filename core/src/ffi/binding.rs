//! Bind group layouts, bind groups, pipeline layouts and render pipelines

use easel_shared::{Handle, Ptr};
use wasmtime::Caller;

use super::{complete, no_gpu, with_memory};
use crate::decode::{self, DecodedResource};
use crate::error::{BridgeError, BridgeResult};
use crate::error_scope::guarded;
use crate::objects::{GpuObject, ObjectTable};
use crate::wasm::BridgeContext;

pub(super) fn device_create_bind_group_layout(
    mut caller: Caller<'_, BridgeContext>,
    device: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let desc = decode::decode_bind_group_layout(mem, desc)?;
        let device = ctx.objects.device(device)?;
        let layout = guarded(device, || {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: desc.label.as_deref(),
                entries: &desc.entries,
            })
        })?;
        Ok(ctx.objects.register(GpuObject::BindGroupLayout(layout)))
    });
    complete("wgpuDeviceCreateBindGroupLayout", result)
}

pub(super) fn device_create_pipeline_layout(
    mut caller: Caller<'_, BridgeContext>,
    device: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let desc = decode::decode_pipeline_layout(mem, desc)?;
        let device = ctx.objects.device(device)?;
        let bind_group_layouts = desc
            .bind_group_layouts
            .iter()
            .map(|&handle| ctx.objects.bind_group_layout(handle))
            .collect::<BridgeResult<Vec<_>>>()?;
        let layout = guarded(device, || {
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: desc.label.as_deref(),
                bind_group_layouts: &bind_group_layouts,
                push_constant_ranges: &[],
            })
        })?;
        Ok(ctx.objects.register(GpuObject::PipelineLayout(layout)))
    });
    complete("wgpuDeviceCreatePipelineLayout", result)
}

fn binding_resource(
    objects: &ObjectTable,
    resource: DecodedResource,
) -> BridgeResult<wgpu::BindingResource<'_>> {
    Ok(match resource {
        DecodedResource::Buffer {
            buffer,
            offset,
            size,
        } => wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: objects.buffer(buffer)?,
            offset,
            size,
        }),
        DecodedResource::Sampler(sampler) => {
            wgpu::BindingResource::Sampler(objects.sampler(sampler)?)
        }
        DecodedResource::TextureView(view) => {
            wgpu::BindingResource::TextureView(objects.texture_view(view)?)
        }
    })
}

pub(super) fn device_create_bind_group(
    mut caller: Caller<'_, BridgeContext>,
    device: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let desc = decode::decode_bind_group(mem, desc)?;
        let device = ctx.objects.device(device)?;
        let layout = ctx.objects.bind_group_layout(desc.layout)?;
        let entries = desc
            .entries
            .iter()
            .map(|entry| {
                Ok(wgpu::BindGroupEntry {
                    binding: entry.binding,
                    resource: binding_resource(&ctx.objects, entry.resource)?,
                })
            })
            .collect::<BridgeResult<Vec<_>>>()?;
        let group = guarded(device, || {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: desc.label.as_deref(),
                layout,
                entries: &entries,
            })
        })?;
        Ok(ctx.objects.register(GpuObject::BindGroup(group)))
    });
    complete("wgpuDeviceCreateBindGroup", result)
}

pub(super) fn device_create_render_pipeline(
    mut caller: Caller<'_, BridgeContext>,
    device: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let preferred = ctx
            .gpu
            .as_ref()
            .map(|gpu| gpu.preferred_format)
            .ok_or_else(no_gpu)?;
        let desc = decode::decode_render_pipeline(mem, desc, preferred)?;
        let objects = &ctx.objects;
        let device = objects.device(device)?;

        // Layout 0 asks wgpu to derive one from the shaders
        let layout = desc
            .layout
            .map(|handle| objects.pipeline_layout(handle))
            .transpose()?;
        let vertex_module = objects.shader_module(desc.vertex.module)?;
        let vertex_buffers: Vec<wgpu::VertexBufferLayout<'_>> = desc
            .vertex
            .buffers
            .iter()
            .map(|buffer| wgpu::VertexBufferLayout {
                array_stride: buffer.array_stride,
                step_mode: buffer.step_mode,
                attributes: &buffer.attributes,
            })
            .collect();
        let fragment = desc
            .fragment
            .as_ref()
            .map(|fragment| {
                Ok::<_, BridgeError>(wgpu::FragmentState {
                    module: objects.shader_module(fragment.module)?,
                    entry_point: fragment.entry_point.as_deref(),
                    compilation_options: Default::default(),
                    targets: &fragment.targets,
                })
            })
            .transpose()?;

        let pipeline = guarded(device, || {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: desc.label.as_deref(),
                layout,
                vertex: wgpu::VertexState {
                    module: vertex_module,
                    entry_point: desc.vertex.entry_point.as_deref(),
                    compilation_options: Default::default(),
                    buffers: &vertex_buffers,
                },
                primitive: desc.primitive,
                depth_stencil: desc.depth_stencil.clone(),
                multisample: desc.multisample,
                fragment,
                multiview: None,
                cache: None,
            })
        })?;
        Ok(ctx.objects.register(GpuObject::RenderPipeline(pipeline)))
    });
    complete("wgpuDeviceCreateRenderPipeline", result)
}

pub(super) fn render_pipeline_get_bind_group_layout(
    mut caller: Caller<'_, BridgeContext>,
    pipeline: Handle,
    index: u32,
) -> wasmtime::Result<Handle> {
    let result = bind_group_layout_of(caller.data_mut(), pipeline, index);
    complete("wgpuRenderPipelineGetBindGroupLayout", result)
}

fn bind_group_layout_of(
    ctx: &mut BridgeContext,
    pipeline: Handle,
    index: u32,
) -> BridgeResult<Handle> {
    let pipeline = ctx.objects.render_pipeline(pipeline)?;
    let device = ctx.device().ok_or_else(no_gpu)?;
    let layout = guarded(device, || pipeline.get_bind_group_layout(index))?;
    Ok(ctx.objects.register(GpuObject::BindGroupLayout(layout)))
}
