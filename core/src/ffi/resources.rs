//! Shader module, buffer, texture, view and sampler creation

use easel_shared::{Handle, Ptr};
use wasmtime::Caller;

use super::{complete, no_gpu, with_memory};
use crate::decode;
use crate::error_scope::guarded;
use crate::objects::GpuObject;
use crate::wasm::BridgeContext;

pub(super) fn device_create_shader_module(
    mut caller: Caller<'_, BridgeContext>,
    device: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let desc = decode::decode_shader_module(mem, desc)?;
        let device = ctx.objects.device(device)?;
        let module = guarded(device, || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: desc.label.as_deref(),
                source: wgpu::ShaderSource::Wgsl(desc.wgsl.into()),
            })
        })?;
        Ok(ctx.objects.register(GpuObject::ShaderModule(module)))
    });
    complete("wgpuDeviceCreateShaderModule", result)
}

pub(super) fn device_create_buffer(
    mut caller: Caller<'_, BridgeContext>,
    device: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let desc = decode::decode_buffer(mem, desc)?;
        let device = ctx.objects.device(device)?;
        let buffer = guarded(device, || {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: desc.label.as_deref(),
                size: desc.size,
                usage: desc.usage,
                mapped_at_creation: desc.mapped_at_creation,
            });
            // No mapping entry points: the zero-filled mapping is handed
            // back right away
            if desc.mapped_at_creation {
                buffer.unmap();
            }
            buffer
        })?;
        Ok(ctx.objects.register(GpuObject::Buffer(buffer)))
    });
    complete("wgpuDeviceCreateBuffer", result)
}

pub(super) fn buffer_get_size(
    caller: Caller<'_, BridgeContext>,
    buffer: Handle,
) -> wasmtime::Result<u64> {
    let result = caller.data().objects.buffer(buffer).map(wgpu::Buffer::size);
    complete("wgpuBufferGetSize", result)
}

pub(super) fn device_create_texture(
    mut caller: Caller<'_, BridgeContext>,
    device: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let desc = decode::decode_texture(mem, desc)?;
        let device = ctx.objects.device(device)?;
        let texture = guarded(device, || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: desc.label.as_deref(),
                size: desc.size,
                mip_level_count: desc.mip_level_count,
                sample_count: desc.sample_count,
                dimension: desc.dimension,
                format: desc.format,
                usage: desc.usage,
                view_formats: &desc.view_formats,
            })
        })?;
        Ok(ctx.objects.register(GpuObject::Texture(texture)))
    });
    complete("wgpuDeviceCreateTexture", result)
}

pub(super) fn texture_create_view(
    mut caller: Caller<'_, BridgeContext>,
    texture: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let desc = decode::decode_texture_view(mem, desc)?;
        let texture = ctx.objects.texture(texture)?;
        let device = ctx.device().ok_or_else(no_gpu)?;
        let view = guarded(device, || {
            texture.create_view(&wgpu::TextureViewDescriptor {
                label: desc.label.as_deref(),
                format: desc.format,
                dimension: desc.dimension,
                aspect: desc.aspect,
                base_mip_level: desc.base_mip_level,
                mip_level_count: desc.mip_level_count,
                base_array_layer: desc.base_array_layer,
                array_layer_count: desc.array_layer_count,
                ..Default::default()
            })
        })?;
        Ok(ctx.objects.register(GpuObject::TextureView(view)))
    });
    complete("wgpuTextureCreateView", result)
}

pub(super) fn device_create_sampler(
    mut caller: Caller<'_, BridgeContext>,
    device: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let desc = decode::decode_sampler(mem, desc)?;
        let device = ctx.objects.device(device)?;
        let sampler = guarded(device, || {
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: desc.label.as_deref(),
                address_mode_u: desc.address_mode_u,
                address_mode_v: desc.address_mode_v,
                address_mode_w: desc.address_mode_w,
                mag_filter: desc.mag_filter,
                min_filter: desc.min_filter,
                mipmap_filter: desc.mipmap_filter,
                lod_min_clamp: desc.lod_min_clamp,
                lod_max_clamp: desc.lod_max_clamp,
                compare: desc.compare,
                anisotropy_clamp: desc.anisotropy_clamp,
                ..Default::default()
            })
        })?;
        Ok(ctx.objects.register(GpuObject::Sampler(sampler)))
    });
    complete("wgpuDeviceCreateSampler", result)
}
