//! Store data shared by every bridge call

use easel_shared::Handle;
use wasmtime::{Memory, StoreLimits, StoreLimitsBuilder, Table};

use crate::capabilities::Capabilities;
use crate::main_loop::{MainLoop, MainLoopHost};
use crate::objects::{GpuObject, ObjectKind, ObjectTable, SurfaceInfo};
use crate::presenter::Presenter;

/// Handles under which the pre-negotiated objects were last handed out
#[derive(Debug, Default, Clone, Copy)]
struct KnownHandles {
    instance: Handle,
    surface: Handle,
    adapter: Handle,
    device: Handle,
    queue: Handle,
}

impl KnownHandles {
    fn slot(&mut self, kind: ObjectKind) -> Option<&mut Handle> {
        match kind {
            ObjectKind::Instance => Some(&mut self.instance),
            ObjectKind::Surface => Some(&mut self.surface),
            ObjectKind::Adapter => Some(&mut self.adapter),
            ObjectKind::Device => Some(&mut self.device),
            ObjectKind::Queue => Some(&mut self.queue),
            _ => None,
        }
    }
}

/// GPU objects resolved before the module started
pub struct GpuState {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub preferred_format: wgpu::TextureFormat,
    known: KnownHandles,
}

/// Everything a bridge call can reach through `Caller::data_mut`
pub struct BridgeContext {
    pub objects: ObjectTable,
    /// `None` only in tests that exercise calls needing no GPU
    pub gpu: Option<GpuState>,
    pub presenter: Option<Presenter>,
    pub main_loop: MainLoop,
    /// Canvas size in physical pixels
    pub canvas: (u32, u32),
    pub memory: Option<Memory>,
    pub table: Option<Table>,
    pub(crate) limits: StoreLimits,
}

impl BridgeContext {
    pub fn new(caps: Capabilities, vsync: bool, ram_limit: usize) -> Self {
        let Capabilities {
            instance,
            adapter,
            device,
            queue,
            target,
            preferred_format,
            size,
        } = caps;
        let presenter = Presenter::new(device.clone(), target, preferred_format, size, vsync);
        Self {
            objects: ObjectTable::new(),
            gpu: Some(GpuState {
                instance,
                adapter,
                device,
                queue,
                preferred_format,
                known: KnownHandles::default(),
            }),
            presenter: Some(presenter),
            main_loop: MainLoop::default(),
            canvas: size,
            memory: None,
            table: None,
            limits: limits(ram_limit),
        }
    }

    #[cfg(test)]
    pub(crate) fn without_gpu(ram_limit: usize) -> Self {
        Self {
            objects: ObjectTable::new(),
            gpu: None,
            presenter: None,
            main_loop: MainLoop::default(),
            canvas: (800, 600),
            memory: None,
            table: None,
            limits: limits(ram_limit),
        }
    }

    /// Hand out a pre-negotiated object.
    ///
    /// While the handle from an earlier call is still live it is returned
    /// again; after the module released it a fresh handle is registered.
    /// Returns 0 without a GPU or for kinds that are not pre-negotiated.
    pub fn expose(&mut self, kind: ObjectKind) -> Handle {
        let Some(gpu) = self.gpu.as_mut() else {
            return 0;
        };
        let object = match kind {
            ObjectKind::Instance => GpuObject::Instance(gpu.instance.clone()),
            ObjectKind::Surface => GpuObject::Surface(SurfaceInfo::default()),
            ObjectKind::Adapter => GpuObject::Adapter(gpu.adapter.clone()),
            ObjectKind::Device => GpuObject::Device(gpu.device.clone()),
            ObjectKind::Queue => GpuObject::Queue(gpu.queue.clone()),
            _ => return 0,
        };
        let Some(slot) = gpu.known.slot(kind) else {
            return 0;
        };
        if *slot != 0 && self.objects.kind_of(*slot) == Some(kind) {
            return *slot;
        }
        *slot = self.objects.register(object);
        *slot
    }

    /// Record the module's surface selector on an exposed surface
    pub fn describe_surface(&mut self, handle: Handle, selector: Option<String>) {
        if let Some(GpuObject::Surface(info)) = self.objects.get_mut(handle) {
            info.selector = selector;
        }
    }

    pub fn device(&self) -> Option<&wgpu::Device> {
        self.gpu.as_ref().map(|gpu| &gpu.device)
    }
}

impl MainLoopHost for BridgeContext {
    fn main_loop(&mut self) -> &mut MainLoop {
        &mut self.main_loop
    }
}

fn limits(ram_limit: usize) -> StoreLimits {
    StoreLimitsBuilder::new()
        .memory_size(ram_limit)
        .trap_on_grow_failure(false)
        .build()
}
