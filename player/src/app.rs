//! Windowed session driven by the winit event loop
//!
//! The window is created on the first `resumed`, then negotiation,
//! instantiation and the entry point run in that order. Each
//! `RedrawRequested` runs one tick while the module keeps a main loop
//! registered.

use std::sync::Arc;

use anyhow::{Context, Result};
use wasmtime::Module;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use easel_core::config::Config;
use easel_core::events::mouse_button_code;
use easel_core::wasm::{BridgeEngine, BridgeInstance};
use easel_core::{CapabilityResolver, Event, SurfaceTarget, TickOutcome};

struct PlayerApp {
    engine: BridgeEngine,
    module: Module,
    config: Config,
    window: Option<Arc<Window>>,
    bridge: Option<BridgeInstance>,
    /// First fatal error; reported once the event loop returns
    error: Option<anyhow::Error>,
}

impl PlayerApp {
    fn launch(&mut self, window: Arc<Window>) -> Result<()> {
        let caps = CapabilityResolver::new(self.config.gpu.clone())
            .negotiate_blocking(SurfaceTarget::Window(window.clone()))
            .context("GPU negotiation failed")?;
        tracing::info!(
            "Adapter: {} ({:?}), surface format {:?}",
            caps.adapter.get_info().name,
            caps.adapter.get_info().backend,
            caps.preferred_format
        );

        let mut bridge = BridgeInstance::new(&self.engine, &self.module, caps, &self.config)?;
        bridge.start()?;
        window.request_redraw();

        self.bridge = Some(bridge);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{:#}", error);
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn deliver(&mut self, event_loop: &ActiveEventLoop, event: Event) {
        let Some(bridge) = self.bridge.as_mut() else {
            return;
        };
        if let Err(e) = bridge.deliver_event(event) {
            self.fail(event_loop, e.into());
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(bridge) = self.bridge.as_mut() else {
            return;
        };
        match bridge.tick() {
            Ok(TickOutcome::Ran) | Ok(TickOutcome::Idle) => {}
            Err(e) => self.fail(event_loop, e.into()),
        }
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let result = event_loop
            .create_window(attributes)
            .context("Failed to create window")
            .and_then(|window| self.launch(Arc::new(window)));
        if let Err(e) = result {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.deliver(event_loop, Event::Quit);
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let Some(bridge) = self.bridge.as_mut() else {
                    return;
                };
                if let Err(e) = bridge.resize(size.width.max(1), size.height.max(1)) {
                    self.fail(event_loop, e.into());
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let event = Event::MouseMove {
                    x: position.x as f32,
                    y: position.y as f32,
                };
                self.deliver(event_loop, event);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = mouse_button_code(button) {
                    let event = Event::MouseButton {
                        button,
                        pressed: state.is_pressed(),
                    };
                    self.deliver(event_loop, event);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let animating = self
            .bridge
            .as_ref()
            .is_some_and(BridgeInstance::main_loop_active);
        match (&self.window, animating) {
            (Some(window), true) => {
                event_loop.set_control_flow(ControlFlow::Poll);
                window.request_redraw();
            }
            _ => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // GPU objects go before the surface's window
        self.bridge = None;
    }
}

/// Open a window and run the module until it quits or fails
pub fn run(engine: BridgeEngine, module: Module, config: Config) -> Result<()> {
    let event_loop = EventLoop::new()?;

    let mut app = PlayerApp {
        engine,
        module,
        config,
        window: None,
        bridge: None,
        error: None,
    };
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
