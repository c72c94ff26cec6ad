//! Instance, surface, adapter, device and swap-chain descriptors

use bytemuck::{Pod, Zeroable};

use super::{Bool32, Handle, Ptr};
use crate::assert_layout;

/// Header of every chained extension struct
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ChainedStruct {
    pub next: Ptr,
    pub s_type: u32,
}

assert_layout!(ChainedStruct, size = 8, {
    next @ 0,
    s_type @ 4,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct InstanceDescriptor {
    pub next_in_chain: Ptr,
}

assert_layout!(InstanceDescriptor, size = 4, {
    next_in_chain @ 0,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SurfaceDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
}

assert_layout!(SurfaceDescriptor, size = 8, {
    next_in_chain @ 0,
    label @ 4,
});

/// Chained onto [`SurfaceDescriptor`] with `s_type` = canvas selector
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SurfaceSourceCanvasSelector {
    pub chain: ChainedStruct,
    pub selector: Ptr,
}

assert_layout!(SurfaceSourceCanvasSelector, size = 12, {
    chain @ 0,
    selector @ 8,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RequestAdapterOptions {
    pub next_in_chain: Ptr,
    pub compatible_surface: Handle,
    pub power_preference: u32,
    pub backend_type: u32,
    pub force_fallback_adapter: Bool32,
}

assert_layout!(RequestAdapterOptions, size = 20, {
    next_in_chain @ 0,
    compatible_surface @ 4,
    power_preference @ 8,
    backend_type @ 12,
    force_fallback_adapter @ 16,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct QueueDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
}

assert_layout!(QueueDescriptor, size = 8, {
    next_in_chain @ 0,
    label @ 4,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct DeviceDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub required_feature_count: u32,
    pub required_features: Ptr,
    pub required_limits: Ptr,
    pub default_queue: QueueDescriptor,
    pub device_lost_callback: u32,
    pub device_lost_userdata: u32,
}

assert_layout!(DeviceDescriptor, size = 36, {
    next_in_chain @ 0,
    label @ 4,
    required_feature_count @ 8,
    required_features @ 12,
    required_limits @ 16,
    default_queue @ 20,
    device_lost_callback @ 28,
    device_lost_userdata @ 32,
});

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SwapChainDescriptor {
    pub next_in_chain: Ptr,
    pub label: Ptr,
    pub usage: u32,
    pub format: u32,
    pub width: u32,
    pub height: u32,
    pub present_mode: u32,
}

assert_layout!(SwapChainDescriptor, size = 28, {
    next_in_chain @ 0,
    label @ 4,
    usage @ 8,
    format @ 12,
    width @ 16,
    height @ 20,
    present_mode @ 24,
});
