//! Swap chain emulation over a wgpu surface or an offscreen texture
//!
//! The module sees a swap chain object and asks it for the current texture
//! view every frame. The presenter acquires a frame on the first such request
//! and holds it until the frame is presented, either explicitly or at the end
//! of the tick.

use thiserror::Error;

use crate::capabilities::PresentationTarget;
use crate::objects::SwapChainInfo;

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("swap chain has not been configured")]
    NotConfigured,
    #[error("failed to acquire frame: {0}")]
    Acquire(#[from] wgpu::SurfaceError),
}

enum Backend {
    Surface {
        surface: wgpu::Surface<'static>,
        alpha_mode: wgpu::CompositeAlphaMode,
        present_modes: Vec<wgpu::PresentMode>,
        config: Option<wgpu::SurfaceConfiguration>,
    },
    Offscreen {
        texture: Option<wgpu::Texture>,
    },
}

enum Frame {
    Surface(wgpu::SurfaceTexture),
    Offscreen(wgpu::Texture),
}

impl Frame {
    fn texture(&self) -> &wgpu::Texture {
        match self {
            Self::Surface(frame) => &frame.texture,
            Self::Offscreen(texture) => texture,
        }
    }
}

pub struct Presenter {
    device: wgpu::Device,
    backend: Backend,
    format: wgpu::TextureFormat,
    size: (u32, u32),
    vsync: bool,
    frame: Option<Frame>,
    frames_presented: u64,
}

impl Presenter {
    pub fn new(
        device: wgpu::Device,
        target: PresentationTarget,
        format: wgpu::TextureFormat,
        size: (u32, u32),
        vsync: bool,
    ) -> Self {
        let backend = match target {
            PresentationTarget::Surface {
                surface,
                alpha_mode,
                present_modes,
            } => Backend::Surface {
                surface,
                alpha_mode,
                present_modes,
                config: None,
            },
            PresentationTarget::Offscreen => Backend::Offscreen { texture: None },
        };
        Self {
            device,
            backend,
            format,
            size,
            vsync,
            frame: None,
            frames_presented: 0,
        }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Apply a swap chain configuration. Any held frame is discarded.
    pub fn configure(&mut self, info: &SwapChainInfo) {
        self.discard();
        self.size = (info.width.max(1), info.height.max(1));
        let (width, height) = self.size;
        let format = self.format;
        let vsync = self.vsync;

        match &mut self.backend {
            Backend::Surface {
                surface,
                alpha_mode,
                present_modes,
                config,
            } => {
                let present_mode = choose_present_mode(info.present_mode, present_modes, vsync);
                let new_config = wgpu::SurfaceConfiguration {
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    format,
                    width,
                    height,
                    present_mode,
                    alpha_mode: *alpha_mode,
                    view_formats: vec![],
                    desired_maximum_frame_latency: 2,
                };
                surface.configure(&self.device, &new_config);
                *config = Some(new_config);
            }
            Backend::Offscreen { texture } => {
                *texture = Some(self.device.create_texture(&wgpu::TextureDescriptor {
                    label: Some("Offscreen Frame"),
                    size: wgpu::Extent3d {
                        width,
                        height,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                        | wgpu::TextureUsages::COPY_SRC
                        | wgpu::TextureUsages::TEXTURE_BINDING,
                    view_formats: &[],
                }));
            }
        }
        tracing::debug!("Swap chain configured: {}x{} {:?}", width, height, format);
    }

    /// Follow a canvas resize; an unconfigured presenter only records the size
    pub fn resize(&mut self, width: u32, height: u32) {
        let new_size = (width.max(1), height.max(1));
        if new_size == self.size {
            return;
        }
        let present_mode = match &self.backend {
            Backend::Surface {
                config: Some(config),
                ..
            } => Some(config.present_mode),
            Backend::Offscreen { texture: Some(_) } => Some(wgpu::PresentMode::Fifo),
            _ => None,
        };
        match present_mode {
            Some(present_mode) => self.configure(&SwapChainInfo {
                format: self.format,
                width: new_size.0,
                height: new_size.1,
                present_mode,
            }),
            None => self.size = new_size,
        }
    }

    /// View of the frame being drawn, acquiring one if none is held
    pub fn current_view(&mut self) -> Result<wgpu::TextureView, PresentError> {
        if self.frame.is_none() {
            self.frame = Some(self.acquire()?);
        }
        match &self.frame {
            Some(frame) => Ok(frame
                .texture()
                .create_view(&wgpu::TextureViewDescriptor::default())),
            None => Err(PresentError::NotConfigured),
        }
    }

    fn acquire(&mut self) -> Result<Frame, PresentError> {
        match &self.backend {
            Backend::Surface {
                surface,
                config: Some(config),
                ..
            } => match surface.get_current_texture() {
                Ok(frame) => Ok(Frame::Surface(frame)),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    // Reconfigure surface and try again
                    surface.configure(&self.device, config);
                    Ok(Frame::Surface(surface.get_current_texture()?))
                }
                Err(e) => Err(e.into()),
            },
            Backend::Offscreen {
                texture: Some(texture),
            } => Ok(Frame::Offscreen(texture.clone())),
            _ => Err(PresentError::NotConfigured),
        }
    }

    /// Present the held frame, if any
    pub fn present(&mut self) -> bool {
        let Some(frame) = self.frame.take() else {
            return false;
        };
        if let Frame::Surface(frame) = frame {
            frame.present();
        }
        self.frames_presented += 1;
        true
    }

    /// Drop the held frame without presenting it
    pub fn discard(&mut self) {
        self.frame = None;
    }
}

/// Requested mode if the surface supports it, FIFO otherwise.
/// With vsync disabled FIFO becomes `AutoNoVsync`.
fn choose_present_mode(
    requested: wgpu::PresentMode,
    supported: &[wgpu::PresentMode],
    vsync: bool,
) -> wgpu::PresentMode {
    let mode = if supported.contains(&requested) {
        requested
    } else {
        tracing::warn!("Present mode {:?} unsupported, using Fifo", requested);
        wgpu::PresentMode::Fifo
    };
    if !vsync && mode == wgpu::PresentMode::Fifo {
        wgpu::PresentMode::AutoNoVsync
    } else {
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_present_mode_supported() {
        let supported = [wgpu::PresentMode::Fifo, wgpu::PresentMode::Mailbox];
        assert_eq!(
            choose_present_mode(wgpu::PresentMode::Mailbox, &supported, true),
            wgpu::PresentMode::Mailbox
        );
    }

    #[test]
    fn test_choose_present_mode_falls_back_to_fifo() {
        let supported = [wgpu::PresentMode::Fifo];
        assert_eq!(
            choose_present_mode(wgpu::PresentMode::Immediate, &supported, true),
            wgpu::PresentMode::Fifo
        );
    }

    #[test]
    fn test_choose_present_mode_without_vsync() {
        let supported = [wgpu::PresentMode::Fifo];
        assert_eq!(
            choose_present_mode(wgpu::PresentMode::Fifo, &supported, false),
            wgpu::PresentMode::AutoNoVsync
        );
    }
}
