//! Numeric enumeration codes used by the producer (webgpu.h numbering).
//!
//! These are the values the compiled module writes into descriptors and
//! passes as scalar arguments. The bridge translates them to host
//! identifiers; nothing on the host side should compare against raw numbers
//! without going through these constants.

/// `WGPUSType` values for chained structs
pub mod s_type {
    pub const INVALID: u32 = 0;
    pub const SURFACE_DESCRIPTOR_FROM_METAL_LAYER: u32 = 1;
    pub const SURFACE_DESCRIPTOR_FROM_WINDOWS_HWND: u32 = 2;
    pub const SURFACE_DESCRIPTOR_FROM_XLIB_WINDOW: u32 = 3;
    pub const SURFACE_DESCRIPTOR_FROM_CANVAS_HTML_SELECTOR: u32 = 4;
    pub const SHADER_MODULE_SPIRV_DESCRIPTOR: u32 = 5;
    pub const SHADER_MODULE_WGSL_DESCRIPTOR: u32 = 6;
}

/// `WGPUTextureFormat`
pub mod texture_format {
    pub const UNDEFINED: u32 = 0;
    pub const R8_UNORM: u32 = 1;
    pub const R8_SNORM: u32 = 2;
    pub const R8_UINT: u32 = 3;
    pub const R8_SINT: u32 = 4;
    pub const R16_UINT: u32 = 5;
    pub const R16_SINT: u32 = 6;
    pub const R16_FLOAT: u32 = 7;
    pub const RG8_UNORM: u32 = 8;
    pub const RG8_SNORM: u32 = 9;
    pub const RG8_UINT: u32 = 10;
    pub const RG8_SINT: u32 = 11;
    pub const R32_FLOAT: u32 = 12;
    pub const R32_UINT: u32 = 13;
    pub const R32_SINT: u32 = 14;
    pub const RG16_UINT: u32 = 15;
    pub const RG16_SINT: u32 = 16;
    pub const RG16_FLOAT: u32 = 17;
    pub const RGBA8_UNORM: u32 = 18;
    pub const RGBA8_UNORM_SRGB: u32 = 19;
    pub const RGBA8_SNORM: u32 = 20;
    pub const RGBA8_UINT: u32 = 21;
    pub const RGBA8_SINT: u32 = 22;
    pub const BGRA8_UNORM: u32 = 23;
    pub const BGRA8_UNORM_SRGB: u32 = 24;
    pub const RGB10A2_UNORM: u32 = 25;
    pub const RG11B10_UFLOAT: u32 = 26;
    pub const RGB9E5_UFLOAT: u32 = 27;
    pub const RG32_FLOAT: u32 = 28;
    pub const RG32_UINT: u32 = 29;
    pub const RG32_SINT: u32 = 30;
    pub const RGBA16_UINT: u32 = 31;
    pub const RGBA16_SINT: u32 = 32;
    pub const RGBA16_FLOAT: u32 = 33;
    pub const RGBA32_FLOAT: u32 = 34;
    pub const RGBA32_UINT: u32 = 35;
    pub const RGBA32_SINT: u32 = 36;
    pub const STENCIL8: u32 = 37;
    pub const DEPTH16_UNORM: u32 = 38;
    pub const DEPTH24_PLUS: u32 = 39;
    pub const DEPTH24_PLUS_STENCIL8: u32 = 40;
    pub const DEPTH32_FLOAT: u32 = 41;
    pub const DEPTH32_FLOAT_STENCIL8: u32 = 42;
}

/// `WGPUVertexFormat`
pub mod vertex_format {
    pub const UNDEFINED: u32 = 0;
    pub const UINT8X2: u32 = 1;
    pub const UINT8X4: u32 = 2;
    pub const SINT8X2: u32 = 3;
    pub const SINT8X4: u32 = 4;
    pub const UNORM8X2: u32 = 5;
    pub const UNORM8X4: u32 = 6;
    pub const SNORM8X2: u32 = 7;
    pub const SNORM8X4: u32 = 8;
    pub const UINT16X2: u32 = 9;
    pub const UINT16X4: u32 = 10;
    pub const SINT16X2: u32 = 11;
    pub const SINT16X4: u32 = 12;
    pub const UNORM16X2: u32 = 13;
    pub const UNORM16X4: u32 = 14;
    pub const SNORM16X2: u32 = 15;
    pub const SNORM16X4: u32 = 16;
    pub const FLOAT16X2: u32 = 17;
    pub const FLOAT16X4: u32 = 18;
    pub const FLOAT32: u32 = 19;
    pub const FLOAT32X2: u32 = 20;
    pub const FLOAT32X3: u32 = 21;
    pub const FLOAT32X4: u32 = 22;
    pub const UINT32: u32 = 23;
    pub const UINT32X2: u32 = 24;
    pub const UINT32X3: u32 = 25;
    pub const UINT32X4: u32 = 26;
    pub const SINT32: u32 = 27;
    pub const SINT32X2: u32 = 28;
    pub const SINT32X3: u32 = 29;
    pub const SINT32X4: u32 = 30;
}

/// `WGPUVertexStepMode`
pub mod vertex_step_mode {
    pub const VERTEX: u32 = 0;
    pub const INSTANCE: u32 = 1;
    pub const VERTEX_BUFFER_NOT_USED: u32 = 2;
}

/// `WGPUBlendFactor`
pub mod blend_factor {
    pub const ZERO: u32 = 0;
    pub const ONE: u32 = 1;
    pub const SRC: u32 = 2;
    pub const ONE_MINUS_SRC: u32 = 3;
    pub const SRC_ALPHA: u32 = 4;
    pub const ONE_MINUS_SRC_ALPHA: u32 = 5;
    pub const DST: u32 = 6;
    pub const ONE_MINUS_DST: u32 = 7;
    pub const DST_ALPHA: u32 = 8;
    pub const ONE_MINUS_DST_ALPHA: u32 = 9;
    pub const SRC_ALPHA_SATURATED: u32 = 10;
    pub const CONSTANT: u32 = 11;
    pub const ONE_MINUS_CONSTANT: u32 = 12;
}

/// `WGPUBlendOperation`
pub mod blend_operation {
    pub const ADD: u32 = 0;
    pub const SUBTRACT: u32 = 1;
    pub const REVERSE_SUBTRACT: u32 = 2;
    pub const MIN: u32 = 3;
    pub const MAX: u32 = 4;
}

/// `WGPUPrimitiveTopology`
pub mod primitive_topology {
    pub const POINT_LIST: u32 = 0;
    pub const LINE_LIST: u32 = 1;
    pub const LINE_STRIP: u32 = 2;
    pub const TRIANGLE_LIST: u32 = 3;
    pub const TRIANGLE_STRIP: u32 = 4;
}

/// `WGPUIndexFormat`
pub mod index_format {
    pub const UNDEFINED: u32 = 0;
    pub const UINT16: u32 = 1;
    pub const UINT32: u32 = 2;
}

/// `WGPUFrontFace`
pub mod front_face {
    pub const CCW: u32 = 0;
    pub const CW: u32 = 1;
}

/// `WGPUCullMode`
pub mod cull_mode {
    pub const NONE: u32 = 0;
    pub const FRONT: u32 = 1;
    pub const BACK: u32 = 2;
}

/// `WGPUCompareFunction`
pub mod compare_function {
    pub const UNDEFINED: u32 = 0;
    pub const NEVER: u32 = 1;
    pub const LESS: u32 = 2;
    pub const LESS_EQUAL: u32 = 3;
    pub const GREATER: u32 = 4;
    pub const GREATER_EQUAL: u32 = 5;
    pub const EQUAL: u32 = 6;
    pub const NOT_EQUAL: u32 = 7;
    pub const ALWAYS: u32 = 8;
}

/// `WGPUStencilOperation`
pub mod stencil_operation {
    pub const KEEP: u32 = 0;
    pub const ZERO: u32 = 1;
    pub const REPLACE: u32 = 2;
    pub const INVERT: u32 = 3;
    pub const INCREMENT_CLAMP: u32 = 4;
    pub const DECREMENT_CLAMP: u32 = 5;
    pub const INCREMENT_WRAP: u32 = 6;
    pub const DECREMENT_WRAP: u32 = 7;
}

/// `WGPUBufferBindingType`
pub mod buffer_binding_type {
    pub const UNDEFINED: u32 = 0;
    pub const UNIFORM: u32 = 1;
    pub const STORAGE: u32 = 2;
    pub const READ_ONLY_STORAGE: u32 = 3;
}

/// `WGPUSamplerBindingType`
pub mod sampler_binding_type {
    pub const UNDEFINED: u32 = 0;
    pub const FILTERING: u32 = 1;
    pub const NON_FILTERING: u32 = 2;
    pub const COMPARISON: u32 = 3;
}

/// `WGPUTextureSampleType`
pub mod texture_sample_type {
    pub const UNDEFINED: u32 = 0;
    pub const FLOAT: u32 = 1;
    pub const UNFILTERABLE_FLOAT: u32 = 2;
    pub const DEPTH: u32 = 3;
    pub const SINT: u32 = 4;
    pub const UINT: u32 = 5;
}

/// `WGPUTextureViewDimension`
pub mod texture_view_dimension {
    pub const UNDEFINED: u32 = 0;
    pub const D1: u32 = 1;
    pub const D2: u32 = 2;
    pub const D2_ARRAY: u32 = 3;
    pub const CUBE: u32 = 4;
    pub const CUBE_ARRAY: u32 = 5;
    pub const D3: u32 = 6;
}

/// `WGPUStorageTextureAccess`
pub mod storage_texture_access {
    pub const UNDEFINED: u32 = 0;
    pub const WRITE_ONLY: u32 = 1;
    pub const READ_ONLY: u32 = 2;
    pub const READ_WRITE: u32 = 3;
}

/// `WGPUTextureDimension`
pub mod texture_dimension {
    pub const D1: u32 = 0;
    pub const D2: u32 = 1;
    pub const D3: u32 = 2;
}

/// `WGPUTextureAspect`
pub mod texture_aspect {
    pub const ALL: u32 = 0;
    pub const STENCIL_ONLY: u32 = 1;
    pub const DEPTH_ONLY: u32 = 2;
}

/// `WGPUAddressMode`
pub mod address_mode {
    pub const REPEAT: u32 = 0;
    pub const MIRROR_REPEAT: u32 = 1;
    pub const CLAMP_TO_EDGE: u32 = 2;
}

/// `WGPUFilterMode` / `WGPUMipmapFilterMode` (same numbering)
pub mod filter_mode {
    pub const NEAREST: u32 = 0;
    pub const LINEAR: u32 = 1;
}

/// `WGPULoadOp`
pub mod load_op {
    pub const UNDEFINED: u32 = 0;
    pub const CLEAR: u32 = 1;
    pub const LOAD: u32 = 2;
}

/// `WGPUStoreOp`
pub mod store_op {
    pub const UNDEFINED: u32 = 0;
    pub const STORE: u32 = 1;
    pub const DISCARD: u32 = 2;
}

/// `WGPUPresentMode`
pub mod present_mode {
    pub const IMMEDIATE: u32 = 0;
    pub const MAILBOX: u32 = 1;
    pub const FIFO: u32 = 2;
}

/// `WGPUPowerPreference`
pub mod power_preference {
    pub const UNDEFINED: u32 = 0;
    pub const LOW_POWER: u32 = 1;
    pub const HIGH_PERFORMANCE: u32 = 2;
}

/// `WGPUBufferUsage` flags
pub mod buffer_usage {
    pub const NONE: u32 = 0x0000;
    pub const MAP_READ: u32 = 0x0001;
    pub const MAP_WRITE: u32 = 0x0002;
    pub const COPY_SRC: u32 = 0x0004;
    pub const COPY_DST: u32 = 0x0008;
    pub const INDEX: u32 = 0x0010;
    pub const VERTEX: u32 = 0x0020;
    pub const UNIFORM: u32 = 0x0040;
    pub const STORAGE: u32 = 0x0080;
    pub const INDIRECT: u32 = 0x0100;
    pub const QUERY_RESOLVE: u32 = 0x0200;
}

/// `WGPUTextureUsage` flags
pub mod texture_usage {
    pub const NONE: u32 = 0x00;
    pub const COPY_SRC: u32 = 0x01;
    pub const COPY_DST: u32 = 0x02;
    pub const TEXTURE_BINDING: u32 = 0x04;
    pub const STORAGE_BINDING: u32 = 0x08;
    pub const RENDER_ATTACHMENT: u32 = 0x10;
}

/// `WGPUShaderStage` flags
pub mod shader_stage {
    pub const NONE: u32 = 0x0;
    pub const VERTEX: u32 = 0x1;
    pub const FRAGMENT: u32 = 0x2;
    pub const COMPUTE: u32 = 0x4;
}

/// `WGPUColorWriteMask` flags
pub mod color_write_mask {
    pub const NONE: u32 = 0x0;
    pub const RED: u32 = 0x1;
    pub const GREEN: u32 = 0x2;
    pub const BLUE: u32 = 0x4;
    pub const ALPHA: u32 = 0x8;
    pub const ALL: u32 = 0xF;
}

/// `WGPURequestAdapterStatus`
pub mod request_adapter_status {
    pub const SUCCESS: u32 = 0;
    pub const UNAVAILABLE: u32 = 1;
    pub const ERROR: u32 = 2;
    pub const UNKNOWN: u32 = 3;
}

/// `WGPURequestDeviceStatus`
pub mod request_device_status {
    pub const SUCCESS: u32 = 0;
    pub const ERROR: u32 = 1;
    pub const UNKNOWN: u32 = 2;
}

/// Mouse buttons reported through `easel_on_mouse_button`
pub mod mouse_button {
    pub const LEFT: u32 = 0;
    pub const MIDDLE: u32 = 1;
    pub const RIGHT: u32 = 2;
    pub const BACK: u32 = 3;
    pub const FORWARD: u32 = 4;
}
