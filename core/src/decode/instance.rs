//! Instance, surface, adapter, device and swap chain descriptors

use easel_shared::abi::codes::s_type;
use easel_shared::abi::{
    DeviceDescriptor, InstanceDescriptor, RequestAdapterOptions, SurfaceDescriptor,
    SurfaceSourceCanvasSelector, SwapChainDescriptor,
};
use easel_shared::{Handle, Ptr};

use super::{bool32, find_chained, ignore_chain};
use crate::error::BridgeResult;
use crate::memory::GuestMemory;
use crate::translate;

/// Instance descriptors carry nothing the bridge uses; decoding only checks
/// that the pointer is readable.
pub fn decode_instance(mem: &GuestMemory<'_>, ptr: Ptr) -> BridgeResult<()> {
    if ptr != 0 {
        let desc: InstanceDescriptor = mem.read_pod(ptr)?;
        ignore_chain(desc.next_in_chain, "instance descriptor");
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedSurface {
    pub label: Option<String>,
    /// Canvas selector, informational on native hosts
    pub selector: Option<String>,
}

pub fn decode_surface(mem: &GuestMemory<'_>, ptr: Ptr) -> BridgeResult<DecodedSurface> {
    let desc: SurfaceDescriptor = mem.read_pod(ptr)?;
    let label = mem.read_label(desc.label)?;
    let selector = match find_chained(
        mem,
        desc.next_in_chain,
        s_type::SURFACE_DESCRIPTOR_FROM_CANVAS_HTML_SELECTOR,
        "surface descriptor",
    )? {
        Some(link) => {
            let source: SurfaceSourceCanvasSelector = mem.read_pod(link)?;
            mem.read_label(source.selector)?
        }
        None => None,
    };
    Ok(DecodedSurface { label, selector })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedAdapterOptions {
    pub compatible_surface: Handle,
    pub power_preference: wgpu::PowerPreference,
    pub force_fallback_adapter: bool,
}

impl Default for DecodedAdapterOptions {
    fn default() -> Self {
        Self {
            compatible_surface: 0,
            power_preference: wgpu::PowerPreference::None,
            force_fallback_adapter: false,
        }
    }
}

/// Adapter request options; a null pointer means defaults
pub fn decode_adapter_options(
    mem: &GuestMemory<'_>,
    ptr: Ptr,
) -> BridgeResult<DecodedAdapterOptions> {
    if ptr == 0 {
        return Ok(DecodedAdapterOptions::default());
    }
    let desc: RequestAdapterOptions = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "adapter options");
    Ok(DecodedAdapterOptions {
        compatible_surface: desc.compatible_surface,
        power_preference: translate::power_preference(desc.power_preference),
        force_fallback_adapter: bool32(desc.force_fallback_adapter),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedDeviceDescriptor {
    pub label: Option<String>,
    /// Raw `WGPUFeatureName` codes the module asked for
    pub required_features: Vec<u32>,
    pub has_required_limits: bool,
    pub has_device_lost_callback: bool,
}

/// Device request descriptor; a null pointer means defaults
pub fn decode_device_descriptor(
    mem: &GuestMemory<'_>,
    ptr: Ptr,
) -> BridgeResult<DecodedDeviceDescriptor> {
    if ptr == 0 {
        return Ok(DecodedDeviceDescriptor::default());
    }
    let desc: DeviceDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "device descriptor");
    Ok(DecodedDeviceDescriptor {
        label: mem.read_label(desc.label)?,
        required_features: mem.read_array(desc.required_features, desc.required_feature_count)?,
        has_required_limits: desc.required_limits != 0,
        has_device_lost_callback: desc.device_lost_callback != 0,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSwapChain {
    pub label: Option<String>,
    pub usage: wgpu::TextureUsages,
    /// Requested format code; the swap chain always uses the surface's
    /// preferred format
    pub format_code: u32,
    pub width: u32,
    pub height: u32,
    pub present_mode: wgpu::PresentMode,
}

pub fn decode_swap_chain(mem: &GuestMemory<'_>, ptr: Ptr) -> BridgeResult<DecodedSwapChain> {
    let desc: SwapChainDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "swap chain descriptor");
    Ok(DecodedSwapChain {
        label: mem.read_label(desc.label)?,
        usage: translate::texture_usages(desc.usage),
        format_code: desc.format,
        width: desc.width,
        height: desc.height,
        present_mode: translate::present_mode(desc.present_mode),
    })
}
