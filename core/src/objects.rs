//! Host objects owned by the handle registry

use std::fmt;

use easel_shared::Handle;

use crate::error::{BridgeError, BridgeResult};
use crate::handles::{Dispose, HandleRegistry};

/// Kind tag of a registered object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Instance,
    Adapter,
    Device,
    Queue,
    Surface,
    SwapChain,
    Buffer,
    Texture,
    TextureView,
    Sampler,
    ShaderModule,
    BindGroupLayout,
    BindGroup,
    PipelineLayout,
    RenderPipeline,
    CommandEncoder,
    RenderPassEncoder,
    CommandBuffer,
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Adapter => "adapter",
            Self::Device => "device",
            Self::Queue => "queue",
            Self::Surface => "surface",
            Self::SwapChain => "swap chain",
            Self::Buffer => "buffer",
            Self::Texture => "texture",
            Self::TextureView => "texture view",
            Self::Sampler => "sampler",
            Self::ShaderModule => "shader module",
            Self::BindGroupLayout => "bind group layout",
            Self::BindGroup => "bind group",
            Self::PipelineLayout => "pipeline layout",
            Self::RenderPipeline => "render pipeline",
            Self::CommandEncoder => "command encoder",
            Self::RenderPassEncoder => "render pass encoder",
            Self::CommandBuffer => "command buffer",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Surface as seen by the module. The wgpu surface itself belongs to the
/// presenter; this only records what the module asked for.
#[derive(Debug, Clone, Default)]
pub struct SurfaceInfo {
    pub selector: Option<String>,
}

/// Swap chain configuration as applied to the presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapChainInfo {
    pub format: wgpu::TextureFormat,
    pub width: u32,
    pub height: u32,
    pub present_mode: wgpu::PresentMode,
}

/// A registered object together with its kind
#[derive(Debug)]
pub enum GpuObject {
    Instance(wgpu::Instance),
    Adapter(wgpu::Adapter),
    Device(wgpu::Device),
    Queue(wgpu::Queue),
    Surface(SurfaceInfo),
    SwapChain(SwapChainInfo),
    Buffer(wgpu::Buffer),
    Texture(wgpu::Texture),
    TextureView(wgpu::TextureView),
    Sampler(wgpu::Sampler),
    ShaderModule(wgpu::ShaderModule),
    BindGroupLayout(wgpu::BindGroupLayout),
    BindGroup(wgpu::BindGroup),
    PipelineLayout(wgpu::PipelineLayout),
    RenderPipeline(wgpu::RenderPipeline),
    CommandEncoder(wgpu::CommandEncoder),
    RenderPass(wgpu::RenderPass<'static>),
    CommandBuffer(wgpu::CommandBuffer),
}

impl GpuObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Instance(_) => ObjectKind::Instance,
            Self::Adapter(_) => ObjectKind::Adapter,
            Self::Device(_) => ObjectKind::Device,
            Self::Queue(_) => ObjectKind::Queue,
            Self::Surface(_) => ObjectKind::Surface,
            Self::SwapChain(_) => ObjectKind::SwapChain,
            Self::Buffer(_) => ObjectKind::Buffer,
            Self::Texture(_) => ObjectKind::Texture,
            Self::TextureView(_) => ObjectKind::TextureView,
            Self::Sampler(_) => ObjectKind::Sampler,
            Self::ShaderModule(_) => ObjectKind::ShaderModule,
            Self::BindGroupLayout(_) => ObjectKind::BindGroupLayout,
            Self::BindGroup(_) => ObjectKind::BindGroup,
            Self::PipelineLayout(_) => ObjectKind::PipelineLayout,
            Self::RenderPipeline(_) => ObjectKind::RenderPipeline,
            Self::CommandEncoder(_) => ObjectKind::CommandEncoder,
            Self::RenderPass(_) => ObjectKind::RenderPassEncoder,
            Self::CommandBuffer(_) => ObjectKind::CommandBuffer,
        }
    }
}

impl Dispose for GpuObject {
    fn dispose(self) {
        match self {
            // Free GPU memory now instead of whenever the last clone drops
            Self::Buffer(buffer) => buffer.destroy(),
            Self::Texture(texture) => texture.destroy(),
            // Dropping an open pass ends it
            Self::RenderPass(pass) => drop(pass),
            other => drop(other),
        }
    }
}

pub type ObjectTable = HandleRegistry<GpuObject>;

fn mismatch(handle: Handle, expected: ObjectKind, found: Option<&GpuObject>) -> BridgeError {
    match found {
        Some(object) => BridgeError::WrongKind {
            handle,
            expected,
            found: object.kind(),
        },
        None => BridgeError::UnresolvedHandle {
            kind: expected,
            handle,
        },
    }
}

macro_rules! kind_of {
    (RenderPass) => {
        ObjectKind::RenderPassEncoder
    };
    ($variant:ident) => {
        ObjectKind::$variant
    };
}

macro_rules! typed_get {
    ($get:ident => $variant:ident($ty:ty)) => {
        pub fn $get(&self, handle: Handle) -> BridgeResult<&$ty> {
            match self.get(handle) {
                Some(GpuObject::$variant(object)) => Ok(object),
                other => Err(mismatch(handle, kind_of!($variant), other)),
            }
        }
    };
}

macro_rules! typed_get_mut {
    ($get:ident => $variant:ident($ty:ty)) => {
        pub fn $get(&mut self, handle: Handle) -> BridgeResult<&mut $ty> {
            match self.get_mut(handle) {
                Some(GpuObject::$variant(object)) => Ok(object),
                other => Err(mismatch(handle, kind_of!($variant), other.map(|o| &*o))),
            }
        }
    };
}

macro_rules! typed_take {
    ($take:ident => $variant:ident($ty:ty)) => {
        /// Remove a one-shot object; the handle becomes invalid
        pub fn $take(&mut self, handle: Handle) -> BridgeResult<$ty> {
            match self.get(handle) {
                Some(GpuObject::$variant(_)) => {}
                other => return Err(mismatch(handle, kind_of!($variant), other)),
            }
            match self.take(handle) {
                Some(GpuObject::$variant(object)) => Ok(object),
                other => Err(mismatch(handle, kind_of!($variant), other.as_ref())),
            }
        }
    };
}

impl HandleRegistry<GpuObject> {
    typed_get!(instance => Instance(wgpu::Instance));
    typed_get!(adapter => Adapter(wgpu::Adapter));
    typed_get!(device => Device(wgpu::Device));
    typed_get!(queue => Queue(wgpu::Queue));
    typed_get!(surface => Surface(SurfaceInfo));
    typed_get!(swap_chain => SwapChain(SwapChainInfo));
    typed_get!(buffer => Buffer(wgpu::Buffer));
    typed_get!(texture => Texture(wgpu::Texture));
    typed_get!(texture_view => TextureView(wgpu::TextureView));
    typed_get!(sampler => Sampler(wgpu::Sampler));
    typed_get!(shader_module => ShaderModule(wgpu::ShaderModule));
    typed_get!(bind_group_layout => BindGroupLayout(wgpu::BindGroupLayout));
    typed_get!(bind_group => BindGroup(wgpu::BindGroup));
    typed_get!(pipeline_layout => PipelineLayout(wgpu::PipelineLayout));
    typed_get!(render_pipeline => RenderPipeline(wgpu::RenderPipeline));

    typed_get_mut!(command_encoder_mut => CommandEncoder(wgpu::CommandEncoder));
    typed_get_mut!(render_pass_mut => RenderPass(wgpu::RenderPass<'static>));

    typed_take!(take_command_encoder => CommandEncoder(wgpu::CommandEncoder));
    typed_take!(take_render_pass => RenderPass(wgpu::RenderPass<'static>));
    typed_take!(take_command_buffer => CommandBuffer(wgpu::CommandBuffer));

    /// Kind of a live handle
    pub fn kind_of(&self, handle: Handle) -> Option<ObjectKind> {
        self.get(handle).map(GpuObject::kind)
    }

    /// Release a handle only if it holds an object of `expected` kind.
    ///
    /// Unknown and already-released handles are ignored. A live handle of
    /// another kind is left alone and reported.
    pub fn release_kind(&mut self, handle: Handle, expected: ObjectKind) -> BridgeResult<bool> {
        match self.kind_of(handle) {
            None => Ok(false),
            Some(found) if found != expected => Err(BridgeError::WrongKind {
                handle,
                expected,
                found,
            }),
            Some(_) => Ok(self.release(handle)),
        }
    }
}
