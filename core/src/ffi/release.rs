//! Release entry points, one per object kind
//!
//! Releasing drops the registry's reference. Unknown and already released
//! handles are ignored; a live handle of another kind is left alone.

use anyhow::Result;
use easel_shared::Handle;
use easel_shared::names::IMPORT_MODULE as ENV;
use wasmtime::{Caller, Linker};

use super::complete;
use crate::objects::ObjectKind;
use crate::wasm::BridgeContext;

const RELEASES: &[(&str, ObjectKind)] = &[
    ("wgpuInstanceRelease", ObjectKind::Instance),
    ("wgpuAdapterRelease", ObjectKind::Adapter),
    ("wgpuDeviceRelease", ObjectKind::Device),
    ("wgpuQueueRelease", ObjectKind::Queue),
    ("wgpuSurfaceRelease", ObjectKind::Surface),
    ("wgpuSwapChainRelease", ObjectKind::SwapChain),
    ("wgpuBufferRelease", ObjectKind::Buffer),
    ("wgpuTextureRelease", ObjectKind::Texture),
    ("wgpuTextureViewRelease", ObjectKind::TextureView),
    ("wgpuSamplerRelease", ObjectKind::Sampler),
    ("wgpuShaderModuleRelease", ObjectKind::ShaderModule),
    ("wgpuBindGroupLayoutRelease", ObjectKind::BindGroupLayout),
    ("wgpuBindGroupRelease", ObjectKind::BindGroup),
    ("wgpuPipelineLayoutRelease", ObjectKind::PipelineLayout),
    ("wgpuRenderPipelineRelease", ObjectKind::RenderPipeline),
    ("wgpuCommandEncoderRelease", ObjectKind::CommandEncoder),
    ("wgpuRenderPassEncoderRelease", ObjectKind::RenderPassEncoder),
    ("wgpuCommandBufferRelease", ObjectKind::CommandBuffer),
];

pub(super) fn register(linker: &mut Linker<BridgeContext>) -> Result<()> {
    for &(entry, kind) in RELEASES {
        linker.func_wrap(
            ENV,
            entry,
            move |mut caller: Caller<'_, BridgeContext>, handle: Handle| {
                release(caller.data_mut(), entry, kind, handle)
            },
        )?;
    }
    Ok(())
}

fn release(
    ctx: &mut BridgeContext,
    entry: &'static str,
    kind: ObjectKind,
    handle: Handle,
) -> wasmtime::Result<()> {
    let result = ctx.objects.release_kind(handle, kind);
    if let Ok(true) = result {
        tracing::trace!("{}: released {}", entry, handle);
        // A frame acquired through the released swap chain is not presented
        if kind == ObjectKind::SwapChain
            && let Some(presenter) = ctx.presenter.as_mut()
        {
            presenter.discard();
        }
    }
    complete(entry, result.map(|_| ()))
}
