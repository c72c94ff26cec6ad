//! Shader module, buffer, texture, texture view and sampler descriptors,
//! plus the three structs of a texture upload

use easel_shared::abi::codes::{s_type, texture_format, texture_view_dimension};
use easel_shared::abi::{
    ARRAY_LAYER_COUNT_UNDEFINED, BufferDescriptor, COPY_STRIDE_UNDEFINED, Extent3d,
    ImageCopyTexture, MIP_LEVEL_COUNT_UNDEFINED, SamplerDescriptor, ShaderModuleDescriptor,
    ShaderModuleWgslDescriptor, TextureDataLayout, TextureDescriptor, TextureViewDescriptor,
};
use easel_shared::{Handle, Ptr};

use super::{bool32, ignore_chain, walk_chain};
use crate::error::{BridgeError, BridgeResult};
use crate::memory::GuestMemory;
use crate::translate;

// =============================================================================
// Shader modules
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedShaderModule {
    pub label: Option<String>,
    pub wgsl: String,
}

/// Shader module with WGSL source chained as sType 6.
///
/// SPIR-V input is not supported; a module carrying only SPIR-V fails with
/// an invalid-value error naming the sType.
pub fn decode_shader_module(
    mem: &GuestMemory<'_>,
    ptr: Ptr,
) -> BridgeResult<DecodedShaderModule> {
    let desc: ShaderModuleDescriptor = mem.read_pod(ptr)?;
    let label = mem.read_label(desc.label)?;
    if desc.hint_count != 0 {
        tracing::debug!("Ignoring {} shader compilation hints", desc.hint_count);
    }

    let mut wgsl = None;
    let mut other = None;
    for (link, link_type) in walk_chain(mem, desc.next_in_chain)? {
        match link_type {
            s_type::SHADER_MODULE_WGSL_DESCRIPTOR if wgsl.is_none() => {
                let source: ShaderModuleWgslDescriptor = mem.read_pod(link)?;
                wgsl = Some(mem.read_cstr(source.code)?.to_owned());
            }
            s_type::SHADER_MODULE_SPIRV_DESCRIPTOR => {
                tracing::warn!("SPIR-V shader source is not supported");
                other.get_or_insert(link_type);
            }
            _ => {
                other.get_or_insert(link_type);
            }
        }
    }

    match wgsl {
        Some(wgsl) => Ok(DecodedShaderModule { label, wgsl }),
        None => Err(BridgeError::invalid(
            "shader module source sType",
            other.unwrap_or(s_type::INVALID),
        )),
    }
}

// =============================================================================
// Buffers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBuffer {
    pub label: Option<String>,
    pub usage: wgpu::BufferUsages,
    pub size: u64,
    pub mapped_at_creation: bool,
}

pub fn decode_buffer(mem: &GuestMemory<'_>, ptr: Ptr) -> BridgeResult<DecodedBuffer> {
    let desc: BufferDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "buffer descriptor");
    Ok(DecodedBuffer {
        label: mem.read_label(desc.label)?,
        usage: translate::buffer_usages(desc.usage),
        size: desc.size,
        mapped_at_creation: bool32(desc.mapped_at_creation),
    })
}

// =============================================================================
// Textures
// =============================================================================

fn extent(size: Extent3d) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: size.width,
        height: size.height,
        depth_or_array_layers: size.depth_or_array_layers,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTexture {
    pub label: Option<String>,
    pub usage: wgpu::TextureUsages,
    pub dimension: wgpu::TextureDimension,
    pub size: wgpu::Extent3d,
    pub format: wgpu::TextureFormat,
    pub mip_level_count: u32,
    pub sample_count: u32,
    pub view_formats: Vec<wgpu::TextureFormat>,
}

pub fn decode_texture(mem: &GuestMemory<'_>, ptr: Ptr) -> BridgeResult<DecodedTexture> {
    let desc: TextureDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "texture descriptor");
    let view_formats = mem
        .read_array::<u32>(desc.view_formats, desc.view_format_count)?
        .into_iter()
        .map(translate::texture_format)
        .collect();
    Ok(DecodedTexture {
        label: mem.read_label(desc.label)?,
        usage: translate::texture_usages(desc.usage),
        dimension: translate::texture_dimension(desc.dimension),
        size: extent(desc.size),
        format: translate::texture_format(desc.format),
        mip_level_count: desc.mip_level_count.max(1),
        sample_count: desc.sample_count.max(1),
        view_formats,
    })
}

/// Texture view; `None` fields inherit from the texture
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTextureView {
    pub label: Option<String>,
    pub format: Option<wgpu::TextureFormat>,
    pub dimension: Option<wgpu::TextureViewDimension>,
    pub aspect: wgpu::TextureAspect,
    pub base_mip_level: u32,
    pub mip_level_count: Option<u32>,
    pub base_array_layer: u32,
    pub array_layer_count: Option<u32>,
}

impl Default for DecodedTextureView {
    fn default() -> Self {
        Self {
            label: None,
            format: None,
            dimension: None,
            aspect: wgpu::TextureAspect::All,
            base_mip_level: 0,
            mip_level_count: None,
            base_array_layer: 0,
            array_layer_count: None,
        }
    }
}

/// Zero and the undefined sentinel both mean "all remaining"
fn defined_count(count: u32, undefined: u32) -> Option<u32> {
    (count != 0 && count != undefined).then_some(count)
}

/// Texture view descriptor; a null pointer means the default view
pub fn decode_texture_view(
    mem: &GuestMemory<'_>,
    ptr: Ptr,
) -> BridgeResult<DecodedTextureView> {
    if ptr == 0 {
        return Ok(DecodedTextureView::default());
    }
    let desc: TextureViewDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "texture view descriptor");
    Ok(DecodedTextureView {
        label: mem.read_label(desc.label)?,
        format: (desc.format != texture_format::UNDEFINED)
            .then(|| translate::texture_format(desc.format)),
        dimension: (desc.dimension != texture_view_dimension::UNDEFINED)
            .then(|| translate::texture_view_dimension(desc.dimension)),
        aspect: translate::texture_aspect(desc.aspect),
        base_mip_level: desc.base_mip_level,
        mip_level_count: defined_count(desc.mip_level_count, MIP_LEVEL_COUNT_UNDEFINED),
        base_array_layer: desc.base_array_layer,
        array_layer_count: defined_count(desc.array_layer_count, ARRAY_LAYER_COUNT_UNDEFINED),
    })
}

// =============================================================================
// Samplers
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSampler {
    pub label: Option<String>,
    pub address_mode_u: wgpu::AddressMode,
    pub address_mode_v: wgpu::AddressMode,
    pub address_mode_w: wgpu::AddressMode,
    pub mag_filter: wgpu::FilterMode,
    pub min_filter: wgpu::FilterMode,
    pub mipmap_filter: wgpu::FilterMode,
    pub lod_min_clamp: f32,
    pub lod_max_clamp: f32,
    pub compare: Option<wgpu::CompareFunction>,
    pub anisotropy_clamp: u16,
}

impl Default for DecodedSampler {
    fn default() -> Self {
        Self {
            label: None,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            lod_min_clamp: 0.0,
            lod_max_clamp: 32.0,
            compare: None,
            anisotropy_clamp: 1,
        }
    }
}

/// Sampler descriptor; a null pointer means the default sampler
pub fn decode_sampler(mem: &GuestMemory<'_>, ptr: Ptr) -> BridgeResult<DecodedSampler> {
    if ptr == 0 {
        return Ok(DecodedSampler::default());
    }
    let desc: SamplerDescriptor = mem.read_pod(ptr)?;
    ignore_chain(desc.next_in_chain, "sampler descriptor");
    Ok(DecodedSampler {
        label: mem.read_label(desc.label)?,
        address_mode_u: translate::address_mode(desc.address_mode_u),
        address_mode_v: translate::address_mode(desc.address_mode_v),
        address_mode_w: translate::address_mode(desc.address_mode_w),
        mag_filter: translate::filter_mode(desc.mag_filter),
        min_filter: translate::filter_mode(desc.min_filter),
        mipmap_filter: translate::filter_mode(desc.mipmap_filter),
        lod_min_clamp: desc.lod_min_clamp,
        lod_max_clamp: desc.lod_max_clamp,
        compare: translate::optional_compare_function(desc.compare),
        anisotropy_clamp: desc.max_anisotropy.max(1),
    })
}

// =============================================================================
// Texture uploads
// =============================================================================

#[derive(Debug, Clone)]
pub struct DecodedTextureWrite {
    pub texture: Handle,
    pub mip_level: u32,
    pub origin: wgpu::Origin3d,
    pub aspect: wgpu::TextureAspect,
    pub layout: wgpu::TexelCopyBufferLayout,
    pub size: wgpu::Extent3d,
}

/// The destination, data layout and extent of `wgpuQueueWriteTexture`
pub fn decode_texture_write(
    mem: &GuestMemory<'_>,
    destination: Ptr,
    layout: Ptr,
    size: Ptr,
) -> BridgeResult<DecodedTextureWrite> {
    let dst: ImageCopyTexture = mem.read_pod(destination)?;
    ignore_chain(dst.next_in_chain, "image copy texture");
    let data: TextureDataLayout = mem.read_pod(layout)?;
    ignore_chain(data.next_in_chain, "texture data layout");
    let size: Extent3d = mem.read_pod(size)?;

    let stride = |value: u32| (value != COPY_STRIDE_UNDEFINED).then_some(value);
    Ok(DecodedTextureWrite {
        texture: dst.texture,
        mip_level: dst.mip_level,
        origin: wgpu::Origin3d {
            x: dst.origin.x,
            y: dst.origin.y,
            z: dst.origin.z,
        },
        aspect: translate::texture_aspect(dst.aspect),
        layout: wgpu::TexelCopyBufferLayout {
            offset: data.offset,
            bytes_per_row: stride(data.bytes_per_row),
            rows_per_image: stride(data.rows_per_image),
        },
        size: extent(size),
    })
}
