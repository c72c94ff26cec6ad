//! Producer enumeration codes to wgpu types.
//!
//! Every table is total: an unknown code logs a warning naming the table and
//! the code, then falls back to one fixed default. The only exceptions are
//! the resource-kind discriminants of bind group layout entries, where a
//! wrong guess would bind the wrong kind of resource; those go through the
//! `try_*` lookups and the decoder rejects the call instead.
//!
//! Flag sets are translated bit by bit. Unknown bits are dropped with a
//! warning.


use std::fmt::Debug;

use easel_shared::abi::codes::*;
use wgpu::{
    AddressMode, BlendFactor, BlendOperation, BufferBindingType, BufferUsages, ColorWrites,
    CompareFunction, Face, FilterMode, FrontFace, IndexFormat, LoadOp, PowerPreference,
    PresentMode, PrimitiveTopology, SamplerBindingType, ShaderStages, StencilOperation,
    StorageTextureAccess, StoreOp, TextureAspect, TextureDimension, TextureFormat,
    TextureSampleType, TextureUsages, TextureViewDimension, VertexFormat, VertexStepMode,
};

/// Resolve a table lookup, logging the miss and returning `default`
fn or_default<T: Debug>(table: &'static str, code: u32, mapped: Option<T>, default: T) -> T {
    mapped.unwrap_or_else(|| {
        tracing::warn!(
            "Unknown {} code {} ({:#x}), using {:?}",
            table,
            code,
            code,
            default
        );
        default
    })
}

/// Translate a flag set through a (producer bit, host flag) table
fn flags<F>(table: &'static str, bits: u32, empty: F, pairs: &[(u32, F)]) -> F
where
    F: Copy + std::ops::BitOr<Output = F>,
{
    let mut out = empty;
    let mut known = 0u32;
    for &(bit, flag) in pairs {
        known |= bit;
        if bits & bit != 0 {
            out = out | flag;
        }
    }
    let unknown = bits & !known;
    if unknown != 0 {
        tracing::warn!("Dropping unknown {} bits {:#x}", table, unknown);
    }
    out
}

// =============================================================================
// Formats
// =============================================================================

pub fn try_texture_format(code: u32) -> Option<TextureFormat> {
    use texture_format as c;
    Some(match code {
        c::R8_UNORM => TextureFormat::R8Unorm,
        c::R8_SNORM => TextureFormat::R8Snorm,
        c::R8_UINT => TextureFormat::R8Uint,
        c::R8_SINT => TextureFormat::R8Sint,
        c::R16_UINT => TextureFormat::R16Uint,
        c::R16_SINT => TextureFormat::R16Sint,
        c::R16_FLOAT => TextureFormat::R16Float,
        c::RG8_UNORM => TextureFormat::Rg8Unorm,
        c::RG8_SNORM => TextureFormat::Rg8Snorm,
        c::RG8_UINT => TextureFormat::Rg8Uint,
        c::RG8_SINT => TextureFormat::Rg8Sint,
        c::R32_FLOAT => TextureFormat::R32Float,
        c::R32_UINT => TextureFormat::R32Uint,
        c::R32_SINT => TextureFormat::R32Sint,
        c::RG16_UINT => TextureFormat::Rg16Uint,
        c::RG16_SINT => TextureFormat::Rg16Sint,
        c::RG16_FLOAT => TextureFormat::Rg16Float,
        c::RGBA8_UNORM => TextureFormat::Rgba8Unorm,
        c::RGBA8_UNORM_SRGB => TextureFormat::Rgba8UnormSrgb,
        c::RGBA8_SNORM => TextureFormat::Rgba8Snorm,
        c::RGBA8_UINT => TextureFormat::Rgba8Uint,
        c::RGBA8_SINT => TextureFormat::Rgba8Sint,
        c::BGRA8_UNORM => TextureFormat::Bgra8Unorm,
        c::BGRA8_UNORM_SRGB => TextureFormat::Bgra8UnormSrgb,
        c::RGB10A2_UNORM => TextureFormat::Rgb10a2Unorm,
        c::RG11B10_UFLOAT => TextureFormat::Rg11b10Ufloat,
        c::RGB9E5_UFLOAT => TextureFormat::Rgb9e5Ufloat,
        c::RG32_FLOAT => TextureFormat::Rg32Float,
        c::RG32_UINT => TextureFormat::Rg32Uint,
        c::RG32_SINT => TextureFormat::Rg32Sint,
        c::RGBA16_UINT => TextureFormat::Rgba16Uint,
        c::RGBA16_SINT => TextureFormat::Rgba16Sint,
        c::RGBA16_FLOAT => TextureFormat::Rgba16Float,
        c::RGBA32_FLOAT => TextureFormat::Rgba32Float,
        c::RGBA32_UINT => TextureFormat::Rgba32Uint,
        c::RGBA32_SINT => TextureFormat::Rgba32Sint,
        c::STENCIL8 => TextureFormat::Stencil8,
        c::DEPTH16_UNORM => TextureFormat::Depth16Unorm,
        c::DEPTH24_PLUS => TextureFormat::Depth24Plus,
        c::DEPTH24_PLUS_STENCIL8 => TextureFormat::Depth24PlusStencil8,
        c::DEPTH32_FLOAT => TextureFormat::Depth32Float,
        c::DEPTH32_FLOAT_STENCIL8 => TextureFormat::Depth32FloatStencil8,
        _ => return None,
    })
}

pub fn texture_format(code: u32) -> TextureFormat {
    or_default(
        "texture format",
        code,
        try_texture_format(code),
        TextureFormat::Rgba8Unorm,
    )
}

/// Host format back to the producer's numbering (0 when it has no code)
pub fn texture_format_code(format: TextureFormat) -> u32 {
    use texture_format as c;
    match format {
        TextureFormat::R8Unorm => c::R8_UNORM,
        TextureFormat::R8Snorm => c::R8_SNORM,
        TextureFormat::R8Uint => c::R8_UINT,
        TextureFormat::R8Sint => c::R8_SINT,
        TextureFormat::R16Uint => c::R16_UINT,
        TextureFormat::R16Sint => c::R16_SINT,
        TextureFormat::R16Float => c::R16_FLOAT,
        TextureFormat::Rg8Unorm => c::RG8_UNORM,
        TextureFormat::Rg8Snorm => c::RG8_SNORM,
        TextureFormat::Rg8Uint => c::RG8_UINT,
        TextureFormat::Rg8Sint => c::RG8_SINT,
        TextureFormat::R32Float => c::R32_FLOAT,
        TextureFormat::R32Uint => c::R32_UINT,
        TextureFormat::R32Sint => c::R32_SINT,
        TextureFormat::Rg16Uint => c::RG16_UINT,
        TextureFormat::Rg16Sint => c::RG16_SINT,
        TextureFormat::Rg16Float => c::RG16_FLOAT,
        TextureFormat::Rgba8Unorm => c::RGBA8_UNORM,
        TextureFormat::Rgba8UnormSrgb => c::RGBA8_UNORM_SRGB,
        TextureFormat::Rgba8Snorm => c::RGBA8_SNORM,
        TextureFormat::Rgba8Uint => c::RGBA8_UINT,
        TextureFormat::Rgba8Sint => c::RGBA8_SINT,
        TextureFormat::Bgra8Unorm => c::BGRA8_UNORM,
        TextureFormat::Bgra8UnormSrgb => c::BGRA8_UNORM_SRGB,
        TextureFormat::Rgb10a2Unorm => c::RGB10A2_UNORM,
        TextureFormat::Rg11b10Ufloat => c::RG11B10_UFLOAT,
        TextureFormat::Rgb9e5Ufloat => c::RGB9E5_UFLOAT,
        TextureFormat::Rg32Float => c::RG32_FLOAT,
        TextureFormat::Rg32Uint => c::RG32_UINT,
        TextureFormat::Rg32Sint => c::RG32_SINT,
        TextureFormat::Rgba16Uint => c::RGBA16_UINT,
        TextureFormat::Rgba16Sint => c::RGBA16_SINT,
        TextureFormat::Rgba16Float => c::RGBA16_FLOAT,
        TextureFormat::Rgba32Float => c::RGBA32_FLOAT,
        TextureFormat::Rgba32Uint => c::RGBA32_UINT,
        TextureFormat::Rgba32Sint => c::RGBA32_SINT,
        TextureFormat::Stencil8 => c::STENCIL8,
        TextureFormat::Depth16Unorm => c::DEPTH16_UNORM,
        TextureFormat::Depth24Plus => c::DEPTH24_PLUS,
        TextureFormat::Depth24PlusStencil8 => c::DEPTH24_PLUS_STENCIL8,
        TextureFormat::Depth32Float => c::DEPTH32_FLOAT,
        TextureFormat::Depth32FloatStencil8 => c::DEPTH32_FLOAT_STENCIL8,
        _ => c::UNDEFINED,
    }
}

/// 8-bit RGBA/BGRA formats a swap chain can present
pub fn is_presentable(format: TextureFormat) -> bool {
    matches!(
        format,
        TextureFormat::Rgba8Unorm
            | TextureFormat::Rgba8UnormSrgb
            | TextureFormat::Bgra8Unorm
            | TextureFormat::Bgra8UnormSrgb
    )
}

/// Format of a render pipeline color target.
///
/// Producers hard-code one presentable format for their color targets, but
/// the surface decides which one it actually renders to. A presentable
/// request is therefore replaced by the surface's `preferred` format; any
/// other format (HDR, integer, single channel) is an offscreen target and is
/// taken literally.
pub fn color_target_format(code: u32, preferred: TextureFormat) -> TextureFormat {
    let requested = texture_format(code);
    if is_presentable(requested) && requested != preferred {
        tracing::debug!(
            "Color target {:?} replaced by surface format {:?}",
            requested,
            preferred
        );
        return preferred;
    }
    requested
}

pub fn vertex_format(code: u32) -> VertexFormat {
    use vertex_format as c;
    let mapped = match code {
        c::UINT8X2 => Some(VertexFormat::Uint8x2),
        c::UINT8X4 => Some(VertexFormat::Uint8x4),
        c::SINT8X2 => Some(VertexFormat::Sint8x2),
        c::SINT8X4 => Some(VertexFormat::Sint8x4),
        c::UNORM8X2 => Some(VertexFormat::Unorm8x2),
        c::UNORM8X4 => Some(VertexFormat::Unorm8x4),
        c::SNORM8X2 => Some(VertexFormat::Snorm8x2),
        c::SNORM8X4 => Some(VertexFormat::Snorm8x4),
        c::UINT16X2 => Some(VertexFormat::Uint16x2),
        c::UINT16X4 => Some(VertexFormat::Uint16x4),
        c::SINT16X2 => Some(VertexFormat::Sint16x2),
        c::SINT16X4 => Some(VertexFormat::Sint16x4),
        c::UNORM16X2 => Some(VertexFormat::Unorm16x2),
        c::UNORM16X4 => Some(VertexFormat::Unorm16x4),
        c::SNORM16X2 => Some(VertexFormat::Snorm16x2),
        c::SNORM16X4 => Some(VertexFormat::Snorm16x4),
        c::FLOAT16X2 => Some(VertexFormat::Float16x2),
        c::FLOAT16X4 => Some(VertexFormat::Float16x4),
        c::FLOAT32 => Some(VertexFormat::Float32),
        c::FLOAT32X2 => Some(VertexFormat::Float32x2),
        c::FLOAT32X3 => Some(VertexFormat::Float32x3),
        c::FLOAT32X4 => Some(VertexFormat::Float32x4),
        c::UINT32 => Some(VertexFormat::Uint32),
        c::UINT32X2 => Some(VertexFormat::Uint32x2),
        c::UINT32X3 => Some(VertexFormat::Uint32x3),
        c::UINT32X4 => Some(VertexFormat::Uint32x4),
        c::SINT32 => Some(VertexFormat::Sint32),
        c::SINT32X2 => Some(VertexFormat::Sint32x2),
        c::SINT32X3 => Some(VertexFormat::Sint32x3),
        c::SINT32X4 => Some(VertexFormat::Sint32x4),
        _ => None,
    };
    or_default("vertex format", code, mapped, VertexFormat::Float32x4)
}

/// `None` marks a vertex buffer slot the pipeline does not use
pub fn vertex_step_mode(code: u32) -> Option<VertexStepMode> {
    match code {
        vertex_step_mode::VERTEX => Some(VertexStepMode::Vertex),
        vertex_step_mode::INSTANCE => Some(VertexStepMode::Instance),
        vertex_step_mode::VERTEX_BUFFER_NOT_USED => None,
        _ => Some(or_default(
            "vertex step mode",
            code,
            None,
            VertexStepMode::Vertex,
        )),
    }
}

pub fn index_format(code: u32) -> IndexFormat {
    let mapped = match code {
        index_format::UINT16 => Some(IndexFormat::Uint16),
        index_format::UINT32 => Some(IndexFormat::Uint32),
        _ => None,
    };
    or_default("index format", code, mapped, IndexFormat::Uint16)
}

/// Strip index format; undefined means "not a strip topology"
pub fn strip_index_format(code: u32) -> Option<IndexFormat> {
    match code {
        index_format::UNDEFINED => None,
        index_format::UINT16 => Some(IndexFormat::Uint16),
        index_format::UINT32 => Some(IndexFormat::Uint32),
        _ => or_default("strip index format", code, None, None),
    }
}

// =============================================================================
// Blending
// =============================================================================

pub fn blend_factor(code: u32) -> BlendFactor {
    use blend_factor as c;
    let mapped = match code {
        c::ZERO => Some(BlendFactor::Zero),
        c::ONE => Some(BlendFactor::One),
        c::SRC => Some(BlendFactor::Src),
        c::ONE_MINUS_SRC => Some(BlendFactor::OneMinusSrc),
        c::SRC_ALPHA => Some(BlendFactor::SrcAlpha),
        c::ONE_MINUS_SRC_ALPHA => Some(BlendFactor::OneMinusSrcAlpha),
        c::DST => Some(BlendFactor::Dst),
        c::ONE_MINUS_DST => Some(BlendFactor::OneMinusDst),
        c::DST_ALPHA => Some(BlendFactor::DstAlpha),
        c::ONE_MINUS_DST_ALPHA => Some(BlendFactor::OneMinusDstAlpha),
        c::SRC_ALPHA_SATURATED => Some(BlendFactor::SrcAlphaSaturated),
        c::CONSTANT => Some(BlendFactor::Constant),
        c::ONE_MINUS_CONSTANT => Some(BlendFactor::OneMinusConstant),
        _ => None,
    };
    or_default("blend factor", code, mapped, BlendFactor::One)
}

pub fn blend_operation(code: u32) -> BlendOperation {
    use blend_operation as c;
    let mapped = match code {
        c::ADD => Some(BlendOperation::Add),
        c::SUBTRACT => Some(BlendOperation::Subtract),
        c::REVERSE_SUBTRACT => Some(BlendOperation::ReverseSubtract),
        c::MIN => Some(BlendOperation::Min),
        c::MAX => Some(BlendOperation::Max),
        _ => None,
    };
    or_default("blend operation", code, mapped, BlendOperation::Add)
}

// =============================================================================
// Primitive state
// =============================================================================

pub fn primitive_topology(code: u32) -> PrimitiveTopology {
    use primitive_topology as c;
    let mapped = match code {
        c::POINT_LIST => Some(PrimitiveTopology::PointList),
        c::LINE_LIST => Some(PrimitiveTopology::LineList),
        c::LINE_STRIP => Some(PrimitiveTopology::LineStrip),
        c::TRIANGLE_LIST => Some(PrimitiveTopology::TriangleList),
        c::TRIANGLE_STRIP => Some(PrimitiveTopology::TriangleStrip),
        _ => None,
    };
    or_default(
        "primitive topology",
        code,
        mapped,
        PrimitiveTopology::TriangleList,
    )
}

pub fn front_face(code: u32) -> FrontFace {
    let mapped = match code {
        front_face::CCW => Some(FrontFace::Ccw),
        front_face::CW => Some(FrontFace::Cw),
        _ => None,
    };
    or_default("front face", code, mapped, FrontFace::Ccw)
}

pub fn cull_mode(code: u32) -> Option<Face> {
    match code {
        cull_mode::NONE => None,
        cull_mode::FRONT => Some(Face::Front),
        cull_mode::BACK => Some(Face::Back),
        _ => or_default("cull mode", code, None, None),
    }
}

pub fn compare_function(code: u32) -> CompareFunction {
    use compare_function as c;
    let mapped = match code {
        c::NEVER => Some(CompareFunction::Never),
        c::LESS => Some(CompareFunction::Less),
        c::LESS_EQUAL => Some(CompareFunction::LessEqual),
        c::GREATER => Some(CompareFunction::Greater),
        c::GREATER_EQUAL => Some(CompareFunction::GreaterEqual),
        c::EQUAL => Some(CompareFunction::Equal),
        c::NOT_EQUAL => Some(CompareFunction::NotEqual),
        c::ALWAYS => Some(CompareFunction::Always),
        _ => None,
    };
    or_default("compare function", code, mapped, CompareFunction::Always)
}

/// Compare function where undefined means "no comparison" (samplers)
pub fn optional_compare_function(code: u32) -> Option<CompareFunction> {
    match code {
        compare_function::UNDEFINED => None,
        _ => Some(compare_function(code)),
    }
}

pub fn stencil_operation(code: u32) -> StencilOperation {
    use stencil_operation as c;
    let mapped = match code {
        c::KEEP => Some(StencilOperation::Keep),
        c::ZERO => Some(StencilOperation::Zero),
        c::REPLACE => Some(StencilOperation::Replace),
        c::INVERT => Some(StencilOperation::Invert),
        c::INCREMENT_CLAMP => Some(StencilOperation::IncrementClamp),
        c::DECREMENT_CLAMP => Some(StencilOperation::DecrementClamp),
        c::INCREMENT_WRAP => Some(StencilOperation::IncrementWrap),
        c::DECREMENT_WRAP => Some(StencilOperation::DecrementWrap),
        _ => None,
    };
    or_default("stencil operation", code, mapped, StencilOperation::Keep)
}

// =============================================================================
// Binding kinds
// =============================================================================

/// `None` for an out-of-range code, `Some(None)` for undefined (the entry
/// is not a buffer binding)
pub fn try_buffer_binding_type(code: u32) -> Option<Option<BufferBindingType>> {
    use buffer_binding_type as c;
    Some(match code {
        c::UNDEFINED => None,
        c::UNIFORM => Some(BufferBindingType::Uniform),
        c::STORAGE => Some(BufferBindingType::Storage { read_only: false }),
        c::READ_ONLY_STORAGE => Some(BufferBindingType::Storage { read_only: true }),
        _ => return None,
    })
}

pub fn buffer_binding_type(code: u32) -> BufferBindingType {
    or_default(
        "buffer binding type",
        code,
        try_buffer_binding_type(code).flatten(),
        BufferBindingType::Uniform,
    )
}

pub fn try_sampler_binding_type(code: u32) -> Option<Option<SamplerBindingType>> {
    use sampler_binding_type as c;
    Some(match code {
        c::UNDEFINED => None,
        c::FILTERING => Some(SamplerBindingType::Filtering),
        c::NON_FILTERING => Some(SamplerBindingType::NonFiltering),
        c::COMPARISON => Some(SamplerBindingType::Comparison),
        _ => return None,
    })
}

pub fn sampler_binding_type(code: u32) -> SamplerBindingType {
    or_default(
        "sampler binding type",
        code,
        try_sampler_binding_type(code).flatten(),
        SamplerBindingType::Filtering,
    )
}

pub fn try_texture_sample_type(code: u32) -> Option<Option<TextureSampleType>> {
    use texture_sample_type as c;
    Some(match code {
        c::UNDEFINED => None,
        c::FLOAT => Some(TextureSampleType::Float { filterable: true }),
        c::UNFILTERABLE_FLOAT => Some(TextureSampleType::Float { filterable: false }),
        c::DEPTH => Some(TextureSampleType::Depth),
        c::SINT => Some(TextureSampleType::Sint),
        c::UINT => Some(TextureSampleType::Uint),
        _ => return None,
    })
}

pub fn texture_sample_type(code: u32) -> TextureSampleType {
    or_default(
        "texture sample type",
        code,
        try_texture_sample_type(code).flatten(),
        TextureSampleType::Float { filterable: true },
    )
}

pub fn try_storage_texture_access(code: u32) -> Option<Option<StorageTextureAccess>> {
    use storage_texture_access as c;
    Some(match code {
        c::UNDEFINED => None,
        c::WRITE_ONLY => Some(StorageTextureAccess::WriteOnly),
        c::READ_ONLY => Some(StorageTextureAccess::ReadOnly),
        c::READ_WRITE => Some(StorageTextureAccess::ReadWrite),
        _ => return None,
    })
}

pub fn storage_texture_access(code: u32) -> StorageTextureAccess {
    or_default(
        "storage texture access",
        code,
        try_storage_texture_access(code).flatten(),
        StorageTextureAccess::WriteOnly,
    )
}

// =============================================================================
// Textures and samplers
// =============================================================================

pub fn texture_view_dimension(code: u32) -> TextureViewDimension {
    use texture_view_dimension as c;
    let mapped = match code {
        c::D1 => Some(TextureViewDimension::D1),
        c::D2 => Some(TextureViewDimension::D2),
        c::D2_ARRAY => Some(TextureViewDimension::D2Array),
        c::CUBE => Some(TextureViewDimension::Cube),
        c::CUBE_ARRAY => Some(TextureViewDimension::CubeArray),
        c::D3 => Some(TextureViewDimension::D3),
        _ => None,
    };
    or_default(
        "texture view dimension",
        code,
        mapped,
        TextureViewDimension::D2,
    )
}

pub fn texture_dimension(code: u32) -> TextureDimension {
    let mapped = match code {
        texture_dimension::D1 => Some(TextureDimension::D1),
        texture_dimension::D2 => Some(TextureDimension::D2),
        texture_dimension::D3 => Some(TextureDimension::D3),
        _ => None,
    };
    or_default("texture dimension", code, mapped, TextureDimension::D2)
}

pub fn texture_aspect(code: u32) -> TextureAspect {
    let mapped = match code {
        texture_aspect::ALL => Some(TextureAspect::All),
        texture_aspect::STENCIL_ONLY => Some(TextureAspect::StencilOnly),
        texture_aspect::DEPTH_ONLY => Some(TextureAspect::DepthOnly),
        _ => None,
    };
    or_default("texture aspect", code, mapped, TextureAspect::All)
}

pub fn address_mode(code: u32) -> AddressMode {
    let mapped = match code {
        address_mode::REPEAT => Some(AddressMode::Repeat),
        address_mode::MIRROR_REPEAT => Some(AddressMode::MirrorRepeat),
        address_mode::CLAMP_TO_EDGE => Some(AddressMode::ClampToEdge),
        _ => None,
    };
    or_default("address mode", code, mapped, AddressMode::ClampToEdge)
}

pub fn filter_mode(code: u32) -> FilterMode {
    let mapped = match code {
        filter_mode::NEAREST => Some(FilterMode::Nearest),
        filter_mode::LINEAR => Some(FilterMode::Linear),
        _ => None,
    };
    or_default("filter mode", code, mapped, FilterMode::Nearest)
}

// =============================================================================
// Render passes and presentation
// =============================================================================

pub fn load_op<V: Debug>(code: u32, clear_value: V) -> LoadOp<V> {
    match code {
        load_op::LOAD => LoadOp::Load,
        load_op::UNDEFINED | load_op::CLEAR => LoadOp::Clear(clear_value),
        _ => {
            tracing::warn!("Unknown load op code {} ({:#x}), using Clear", code, code);
            LoadOp::Clear(clear_value)
        }
    }
}

pub fn store_op(code: u32) -> StoreOp {
    let mapped = match code {
        store_op::UNDEFINED | store_op::STORE => Some(StoreOp::Store),
        store_op::DISCARD => Some(StoreOp::Discard),
        _ => None,
    };
    or_default("store op", code, mapped, StoreOp::Store)
}

pub fn present_mode(code: u32) -> PresentMode {
    let mapped = match code {
        present_mode::IMMEDIATE => Some(PresentMode::Immediate),
        present_mode::MAILBOX => Some(PresentMode::Mailbox),
        present_mode::FIFO => Some(PresentMode::Fifo),
        _ => None,
    };
    or_default("present mode", code, mapped, PresentMode::Fifo)
}

pub fn power_preference(code: u32) -> PowerPreference {
    let mapped = match code {
        power_preference::UNDEFINED => Some(PowerPreference::None),
        power_preference::LOW_POWER => Some(PowerPreference::LowPower),
        power_preference::HIGH_PERFORMANCE => Some(PowerPreference::HighPerformance),
        _ => None,
    };
    or_default("power preference", code, mapped, PowerPreference::None)
}

// =============================================================================
// Flag sets
// =============================================================================

pub fn buffer_usages(bits: u32) -> BufferUsages {
    use buffer_usage as c;
    flags(
        "buffer usage",
        bits,
        BufferUsages::empty(),
        &[
            (c::MAP_READ, BufferUsages::MAP_READ),
            (c::MAP_WRITE, BufferUsages::MAP_WRITE),
            (c::COPY_SRC, BufferUsages::COPY_SRC),
            (c::COPY_DST, BufferUsages::COPY_DST),
            (c::INDEX, BufferUsages::INDEX),
            (c::VERTEX, BufferUsages::VERTEX),
            (c::UNIFORM, BufferUsages::UNIFORM),
            (c::STORAGE, BufferUsages::STORAGE),
            (c::INDIRECT, BufferUsages::INDIRECT),
            (c::QUERY_RESOLVE, BufferUsages::QUERY_RESOLVE),
        ],
    )
}

pub fn texture_usages(bits: u32) -> TextureUsages {
    use texture_usage as c;
    flags(
        "texture usage",
        bits,
        TextureUsages::empty(),
        &[
            (c::COPY_SRC, TextureUsages::COPY_SRC),
            (c::COPY_DST, TextureUsages::COPY_DST),
            (c::TEXTURE_BINDING, TextureUsages::TEXTURE_BINDING),
            (c::STORAGE_BINDING, TextureUsages::STORAGE_BINDING),
            (c::RENDER_ATTACHMENT, TextureUsages::RENDER_ATTACHMENT),
        ],
    )
}

pub fn shader_stages(bits: u32) -> ShaderStages {
    use shader_stage as c;
    flags(
        "shader stage",
        bits,
        ShaderStages::empty(),
        &[
            (c::VERTEX, ShaderStages::VERTEX),
            (c::FRAGMENT, ShaderStages::FRAGMENT),
            (c::COMPUTE, ShaderStages::COMPUTE),
        ],
    )
}

pub fn color_writes(bits: u32) -> ColorWrites {
    use color_write_mask as c;
    flags(
        "color write mask",
        bits,
        ColorWrites::empty(),
        &[
            (c::RED, ColorWrites::RED),
            (c::GREEN, ColorWrites::GREEN),
            (c::BLUE, ColorWrites::BLUE),
            (c::ALPHA, ColorWrites::ALPHA),
        ],
    )
}
