//! Adapter and device negotiation ahead of instantiation
//!
//! A module asks for its adapter and device through callback-style imports
//! and expects the callbacks to fire before the import returns. wgpu hands
//! these out asynchronously, so the whole negotiation runs here first,
//! driven to completion with `pollster`. The resulting [`Capabilities`] is
//! the only way to build a [`BridgeInstance`](crate::BridgeInstance), which
//! keeps the two phases ordered by construction.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use thiserror::Error;
use winit::window::Window;

use crate::config::GpuConfig;

/// What the bridge presents to
#[derive(Debug, Clone)]
pub enum SurfaceTarget {
    Window(Arc<Window>),
    /// Offscreen texture of the given size (tests, `--headless`)
    Headless { width: u32, height: u32 },
}

/// Negotiation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    Uninitialized,
    NegotiatingAdapter,
    NegotiatingDevice,
    Ready,
    Failed,
}

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("no suitable GPU adapter: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("GPU device request failed: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("presentation surface unavailable: {0}")]
    Surface(String),

    #[error("negotiation already ran (state {0:?})")]
    AlreadyNegotiated(ResolverState),
}

/// Where frames end up once negotiation is done
#[derive(Debug)]
pub enum PresentationTarget {
    Surface {
        surface: wgpu::Surface<'static>,
        alpha_mode: wgpu::CompositeAlphaMode,
        present_modes: Vec<wgpu::PresentMode>,
    },
    Offscreen,
}

/// Everything the bridge needs from the GPU, resolved up front
#[derive(Debug)]
pub struct Capabilities {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub target: PresentationTarget,
    /// Format swap chains are configured with and presentable color targets
    /// are rewritten to
    pub preferred_format: wgpu::TextureFormat,
    /// Initial canvas size in physical pixels
    pub size: (u32, u32),
}

pub struct CapabilityResolver {
    config: GpuConfig,
    state: ResolverState,
}

impl CapabilityResolver {
    pub fn new(config: GpuConfig) -> Self {
        Self {
            config,
            state: ResolverState::Uninitialized,
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    /// Run negotiation to completion on the current thread
    pub fn negotiate_blocking(
        &mut self,
        target: SurfaceTarget,
    ) -> Result<Capabilities, CapabilityError> {
        pollster::block_on(self.negotiate(target))
    }

    pub async fn negotiate(
        &mut self,
        target: SurfaceTarget,
    ) -> Result<Capabilities, CapabilityError> {
        if self.state != ResolverState::Uninitialized {
            return Err(CapabilityError::AlreadyNegotiated(self.state));
        }
        let result = self.run(target).await;
        self.state = match result {
            Ok(_) => ResolverState::Ready,
            Err(_) => ResolverState::Failed,
        };
        result
    }

    async fn run(&mut self, target: SurfaceTarget) -> Result<Capabilities, CapabilityError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let (surface, size) = match target {
            SurfaceTarget::Window(window) => {
                let inner = window.inner_size();
                let surface = instance
                    .create_surface(window)
                    .map_err(|e| CapabilityError::Surface(e.to_string()))?;
                (Some(surface), (inner.width.max(1), inner.height.max(1)))
            }
            SurfaceTarget::Headless { width, height } => (None, (width.max(1), height.max(1))),
        };

        self.state = ResolverState::NegotiatingAdapter;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: self.config.power_preference.to_wgpu(),
                compatible_surface: surface.as_ref(),
                force_fallback_adapter: false,
            })
            .await?;
        tracing::info!("Using GPU adapter: {:?}", adapter.get_info().name);

        self.state = ResolverState::NegotiatingDevice;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Easel Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
                experimental_features: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;
        install_loggers(&device);

        let (target, preferred_format) = match surface {
            Some(surface) => {
                let caps = surface.get_capabilities(&adapter);
                let format = caps.formats.first().copied().ok_or_else(|| {
                    CapabilityError::Surface("adapter reports no surface formats".to_string())
                })?;
                let alpha_mode = caps
                    .alpha_modes
                    .first()
                    .copied()
                    .unwrap_or(wgpu::CompositeAlphaMode::Auto);
                let target = PresentationTarget::Surface {
                    surface,
                    alpha_mode,
                    present_modes: caps.present_modes,
                };
                (target, format)
            }
            None => (
                PresentationTarget::Offscreen,
                self.config.headless_format.to_wgpu(),
            ),
        };

        tracing::info!(
            "GPU ready: {}x{}, preferred format {:?}",
            size.0,
            size.1,
            preferred_format
        );

        Ok(Capabilities {
            instance,
            adapter,
            device,
            queue,
            target,
            preferred_format,
            size,
        })
    }
}

/// Errors raised outside any error scope, and device loss, are only logged
fn install_loggers(device: &wgpu::Device) {
    let handler: Box<dyn wgpu::UncapturedErrorHandler> = Box::new(|err: wgpu::Error| {
        tracing::error!("Uncaptured GPU error: {}", err);
    });
    device.on_uncaptured_error(handler.into());
    device.set_device_lost_callback(|reason, message| {
        tracing::error!("GPU device lost ({:?}): {}", reason, message);
    });
}
