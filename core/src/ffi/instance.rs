//! Instance, adapter, device and swap chain entry points
//!
//! Adapter and device were negotiated before the module started, so the
//! request calls only hand out handles and fire the completion callback
//! before returning.

use easel_shared::abi::codes::{request_adapter_status, request_device_status};
use easel_shared::{Handle, Ptr};
use wasmtime::Caller;

use super::{complete, invoke_callback, no_gpu, with_memory};
use crate::decode;
use crate::error::{BridgeError, BridgeResult};
use crate::error_scope::guarded;
use crate::objects::{GpuObject, ObjectKind, SwapChainInfo};
use crate::translate;
use crate::wasm::BridgeContext;

pub(super) fn create_instance(
    mut caller: Caller<'_, BridgeContext>,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        decode::decode_instance(mem, desc)?;
        match ctx.expose(ObjectKind::Instance) {
            0 => Err(no_gpu()),
            handle => Ok(handle),
        }
    });
    complete("wgpuCreateInstance", result)
}

pub(super) fn instance_create_surface(
    mut caller: Caller<'_, BridgeContext>,
    instance: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let surface = decode::decode_surface(mem, desc)?;
        ctx.objects.instance(instance)?;
        let handle = ctx.expose(ObjectKind::Surface);
        if handle == 0 {
            return Err(no_gpu());
        }
        tracing::debug!("Surface for canvas {:?}", surface.selector);
        ctx.describe_surface(handle, surface.selector);
        Ok(handle)
    });
    complete("wgpuInstanceCreateSurface", result)
}

pub(super) fn instance_request_adapter(
    mut caller: Caller<'_, BridgeContext>,
    instance: Handle,
    options: Ptr,
    callback: u32,
    userdata: u32,
) -> wasmtime::Result<()> {
    const ENTRY: &str = "wgpuInstanceRequestAdapter";
    let result = with_memory(&mut caller, |mem, ctx| {
        let options = decode::decode_adapter_options(mem, options)?;
        ctx.objects.instance(instance)?;
        if options.compatible_surface != 0 {
            ctx.objects.surface(options.compatible_surface)?;
        }
        if options.force_fallback_adapter {
            tracing::debug!("{}: fallback adapter requested, using the negotiated one", ENTRY);
        }
        Ok(ctx.expose(ObjectKind::Adapter))
    });

    let (status, adapter) = match result {
        Ok(0) => (request_adapter_status::UNAVAILABLE, 0),
        Ok(adapter) => (request_adapter_status::SUCCESS, adapter),
        Err(err) if err.is_fatal() => return complete(ENTRY, Err(err)),
        Err(err) => {
            tracing::warn!("{}: {}", ENTRY, err);
            (request_adapter_status::ERROR, 0)
        }
    };
    invoke_callback(&mut caller, ENTRY, callback, (status, adapter, 0, userdata))
}

pub(super) fn adapter_request_device(
    mut caller: Caller<'_, BridgeContext>,
    adapter: Handle,
    desc: Ptr,
    callback: u32,
    userdata: u32,
) -> wasmtime::Result<()> {
    const ENTRY: &str = "wgpuAdapterRequestDevice";
    let result = with_memory(&mut caller, |mem, ctx| {
        let desc = decode::decode_device_descriptor(mem, desc)?;
        ctx.objects.adapter(adapter)?;
        if !desc.required_features.is_empty() {
            tracing::warn!(
                "{}: optional features {:?} are not enabled on the negotiated device",
                ENTRY,
                desc.required_features
            );
        }
        if desc.has_required_limits {
            tracing::debug!("{}: ignoring required limits, using defaults", ENTRY);
        }
        match ctx.expose(ObjectKind::Device) {
            0 => Err(no_gpu()),
            handle => Ok(handle),
        }
    });

    let (status, device) = match result {
        Ok(device) => (request_device_status::SUCCESS, device),
        Err(err) if err.is_fatal() => return complete(ENTRY, Err(err)),
        Err(err) => {
            tracing::warn!("{}: {}", ENTRY, err);
            (request_device_status::ERROR, 0)
        }
    };
    invoke_callback(&mut caller, ENTRY, callback, (status, device, 0, userdata))
}

pub(super) fn device_get_queue(
    mut caller: Caller<'_, BridgeContext>,
    device: Handle,
) -> wasmtime::Result<Handle> {
    let ctx = caller.data_mut();
    let result = ctx
        .objects
        .device(device)
        .map(|_| ())
        .map(|()| ctx.expose(ObjectKind::Queue));
    complete("wgpuDeviceGetQueue", result)
}

pub(super) fn surface_get_preferred_format(
    caller: Caller<'_, BridgeContext>,
    surface: Handle,
    adapter: Handle,
) -> wasmtime::Result<u32> {
    let ctx = caller.data();
    let result = ctx
        .objects
        .surface(surface)
        .and_then(|_| ctx.objects.adapter(adapter))
        .and_then(|_| ctx.gpu.as_ref().ok_or_else(no_gpu))
        .map(|gpu| translate::texture_format_code(gpu.preferred_format));
    complete("wgpuSurfaceGetPreferredFormat", result)
}

pub(super) fn device_create_swap_chain(
    mut caller: Caller<'_, BridgeContext>,
    device: Handle,
    surface: Handle,
    desc: Ptr,
) -> wasmtime::Result<Handle> {
    let result = with_memory(&mut caller, |mem, ctx| {
        let desc = decode::decode_swap_chain(mem, desc)?;
        let device = ctx.objects.device(device)?.clone();
        ctx.objects.surface(surface)?;
        let presenter = ctx.presenter.as_mut().ok_or_else(no_gpu)?;

        let format = presenter.format();
        if desc.format_code != translate::texture_format_code(format) {
            tracing::debug!(
                "Swap chain format {} replaced by preferred {:?}",
                desc.format_code,
                format
            );
        }
        let info = SwapChainInfo {
            format,
            width: desc.width,
            height: desc.height,
            present_mode: desc.present_mode,
        };
        guarded(&device, || presenter.configure(&info))?;
        ctx.canvas = presenter.size();
        Ok(ctx.objects.register(GpuObject::SwapChain(info)))
    });
    complete("wgpuDeviceCreateSwapChain", result)
}

pub(super) fn swap_chain_get_current_texture_view(
    mut caller: Caller<'_, BridgeContext>,
    swap_chain: Handle,
) -> wasmtime::Result<Handle> {
    let result = current_texture_view(caller.data_mut(), swap_chain);
    complete("wgpuSwapChainGetCurrentTextureView", result)
}

fn current_texture_view(ctx: &mut BridgeContext, swap_chain: Handle) -> BridgeResult<Handle> {
    ctx.objects.swap_chain(swap_chain)?;
    let presenter = ctx.presenter.as_mut().ok_or_else(no_gpu)?;
    let view = presenter
        .current_view()
        .map_err(|e| BridgeError::Host(e.to_string()))?;
    Ok(ctx.objects.register(GpuObject::TextureView(view)))
}

pub(super) fn swap_chain_present(
    mut caller: Caller<'_, BridgeContext>,
    swap_chain: Handle,
) -> wasmtime::Result<()> {
    let ctx = caller.data_mut();
    let result = ctx.objects.swap_chain(swap_chain).map(|_| ());
    if result.is_ok()
        && let Some(presenter) = ctx.presenter.as_mut()
    {
        presenter.present();
    }
    complete("wgpuSwapChainPresent", result)
}
