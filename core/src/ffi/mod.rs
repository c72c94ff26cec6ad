//! Bridge host functions
//!
//! Every function is imported from `env` under its WebGPU C name (or an
//! `easel_` name for the system calls). Entry points decode their
//! descriptors, resolve handles, call wgpu inside an error scope and
//! register the result. Failures go through [`complete`]: recoverable ones
//! are logged and yield the null handle, fatal ones trap.
//!
//! # Module Organization
//!
//! - [`instance`] - instance, surface, adapter, device, queue, swap chain
//! - [`resources`] - shader modules, buffers, textures, samplers
//! - [`binding`] - bind group layouts, bind groups, pipeline layouts, pipelines
//! - [`commands`] - command encoders, render passes, queue operations
//! - [`release`] - one release function per object kind
//! - [`system`] - logging, main loop, canvas size

mod binding;
mod commands;
mod instance;
mod release;
mod resources;
mod system;

#[cfg(test)]
mod tests;

use anyhow::Result;
use wasmtime::{Caller, Linker};

use easel_shared::names::IMPORT_MODULE as ENV;

use crate::error::{BridgeError, BridgeResult};
use crate::main_loop::table_entry;
use crate::memory::GuestMemory;
use crate::wasm::BridgeContext;

/// Register every bridge import with the linker
pub fn register_bridge_ffi(linker: &mut Linker<BridgeContext>) -> Result<()> {
    // Instance and capabilities
    linker.func_wrap(ENV, "wgpuCreateInstance", instance::create_instance)?;
    linker.func_wrap(ENV, "wgpuInstanceCreateSurface", instance::instance_create_surface)?;
    linker.func_wrap(ENV, "wgpuInstanceRequestAdapter", instance::instance_request_adapter)?;
    linker.func_wrap(ENV, "wgpuAdapterRequestDevice", instance::adapter_request_device)?;
    linker.func_wrap(ENV, "wgpuDeviceGetQueue", instance::device_get_queue)?;
    linker.func_wrap(ENV, "wgpuSurfaceGetPreferredFormat", instance::surface_get_preferred_format)?;
    linker.func_wrap(ENV, "wgpuDeviceCreateSwapChain", instance::device_create_swap_chain)?;
    linker.func_wrap(
        ENV,
        "wgpuSwapChainGetCurrentTextureView",
        instance::swap_chain_get_current_texture_view,
    )?;
    linker.func_wrap(ENV, "wgpuSwapChainPresent", instance::swap_chain_present)?;

    // Resources
    linker.func_wrap(ENV, "wgpuDeviceCreateShaderModule", resources::device_create_shader_module)?;
    linker.func_wrap(ENV, "wgpuDeviceCreateBuffer", resources::device_create_buffer)?;
    linker.func_wrap(ENV, "wgpuBufferGetSize", resources::buffer_get_size)?;
    linker.func_wrap(ENV, "wgpuDeviceCreateTexture", resources::device_create_texture)?;
    linker.func_wrap(ENV, "wgpuTextureCreateView", resources::texture_create_view)?;
    linker.func_wrap(ENV, "wgpuDeviceCreateSampler", resources::device_create_sampler)?;

    // Binding and pipelines
    linker.func_wrap(
        ENV,
        "wgpuDeviceCreateBindGroupLayout",
        binding::device_create_bind_group_layout,
    )?;
    linker.func_wrap(
        ENV,
        "wgpuDeviceCreatePipelineLayout",
        binding::device_create_pipeline_layout,
    )?;
    linker.func_wrap(ENV, "wgpuDeviceCreateBindGroup", binding::device_create_bind_group)?;
    linker.func_wrap(
        ENV,
        "wgpuDeviceCreateRenderPipeline",
        binding::device_create_render_pipeline,
    )?;
    linker.func_wrap(
        ENV,
        "wgpuRenderPipelineGetBindGroupLayout",
        binding::render_pipeline_get_bind_group_layout,
    )?;

    // Commands
    linker.func_wrap(
        ENV,
        "wgpuDeviceCreateCommandEncoder",
        commands::device_create_command_encoder,
    )?;
    linker.func_wrap(
        ENV,
        "wgpuCommandEncoderBeginRenderPass",
        commands::command_encoder_begin_render_pass,
    )?;
    linker.func_wrap(ENV, "wgpuRenderPassEncoderSetPipeline", commands::render_pass_set_pipeline)?;
    linker.func_wrap(
        ENV,
        "wgpuRenderPassEncoderSetBindGroup",
        commands::render_pass_set_bind_group,
    )?;
    linker.func_wrap(
        ENV,
        "wgpuRenderPassEncoderSetVertexBuffer",
        commands::render_pass_set_vertex_buffer,
    )?;
    linker.func_wrap(
        ENV,
        "wgpuRenderPassEncoderSetIndexBuffer",
        commands::render_pass_set_index_buffer,
    )?;
    linker.func_wrap(ENV, "wgpuRenderPassEncoderSetViewport", commands::render_pass_set_viewport)?;
    linker.func_wrap(
        ENV,
        "wgpuRenderPassEncoderSetScissorRect",
        commands::render_pass_set_scissor_rect,
    )?;
    linker.func_wrap(
        ENV,
        "wgpuRenderPassEncoderSetBlendConstant",
        commands::render_pass_set_blend_constant,
    )?;
    linker.func_wrap(ENV, "wgpuRenderPassEncoderDraw", commands::render_pass_draw)?;
    linker.func_wrap(ENV, "wgpuRenderPassEncoderDrawIndexed", commands::render_pass_draw_indexed)?;
    linker.func_wrap(ENV, "wgpuRenderPassEncoderEnd", commands::render_pass_end)?;
    linker.func_wrap(ENV, "wgpuCommandEncoderFinish", commands::command_encoder_finish)?;
    linker.func_wrap(ENV, "wgpuQueueSubmit", commands::queue_submit)?;
    linker.func_wrap(ENV, "wgpuQueueWriteBuffer", commands::queue_write_buffer)?;
    linker.func_wrap(ENV, "wgpuQueueWriteTexture", commands::queue_write_texture)?;

    release::register(linker)?;

    // System
    linker.func_wrap(ENV, "easel_log", system::log_message)?;
    linker.func_wrap(ENV, "easel_set_main_loop", system::set_main_loop)?;
    linker.func_wrap(ENV, "easel_cancel_main_loop", system::cancel_main_loop)?;
    linker.func_wrap(ENV, "easel_canvas_width", system::canvas_width)?;
    linker.func_wrap(ENV, "easel_canvas_height", system::canvas_height)?;

    Ok(())
}

/// Run `op` against linear memory and the bridge state together
fn with_memory<R>(
    caller: &mut Caller<'_, BridgeContext>,
    op: impl FnOnce(&GuestMemory<'_>, &mut BridgeContext) -> BridgeResult<R>,
) -> BridgeResult<R> {
    let memory = caller.data().memory.ok_or(BridgeError::NoMemory)?;
    let (data, ctx) = memory.data_and_store_mut(caller);
    op(&GuestMemory::new(data), ctx)
}

fn no_gpu() -> BridgeError {
    BridgeError::Host("no GPU was negotiated for this session".to_string())
}

/// Turn a bridge result into what the module sees.
///
/// Recoverable errors log a warning naming the entry point and return the
/// default value (the null handle for creations). Fatal errors trap.
fn complete<T: Default>(entry: &'static str, result: BridgeResult<T>) -> wasmtime::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if err.is_fatal() => {
            tracing::error!("{}: {}", entry, err);
            Err(wasmtime::Error::new(err).context(entry))
        }
        Err(err) => {
            tracing::warn!("{}: {}", entry, err);
            Ok(T::default())
        }
    }
}

/// Call a completion callback stored in the module's function table.
///
/// A missing table or entry, or an entry of the wrong type, traps: the
/// module would otherwise wait forever for the result.
fn invoke_callback(
    caller: &mut Caller<'_, BridgeContext>,
    entry: &'static str,
    index: u32,
    args: (u32, u32, u32, u32),
) -> wasmtime::Result<()> {
    let table = caller.data().table.ok_or_else(|| {
        wasmtime::Error::msg(format!(
            "{}: callback {} given but the module exports no function table",
            entry, index
        ))
    })?;
    let func = table_entry(&mut *caller, table, index).ok_or_else(|| {
        wasmtime::Error::msg(format!("{}: no function at table index {}", entry, index))
    })?;
    let callback = func.typed::<(u32, u32, u32, u32), ()>(&*caller)?;
    callback.call(&mut *caller, args)
}
