//! Host events delivered to the module's optional event exports

use thiserror::Error;
use wasmtime::{AsContextMut, Instance, TypedFunc, WasmParams};
use winit::event::MouseButton;

use easel_shared::abi::codes::mouse_button;
use easel_shared::names;

/// An input or window event the module may handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    MouseMove { x: f32, y: f32 },
    MouseButton { button: u32, pressed: bool },
    Resize { width: u32, height: u32 },
    Quit,
}

#[derive(Debug, Error)]
#[error("event handler {export} trapped: {error:#}")]
pub struct EventError {
    pub export: &'static str,
    pub error: wasmtime::Error,
}

/// Event exports found on the instance. Missing ones are `None`.
#[derive(Clone, Default)]
pub struct EventExports {
    mouse_move: Option<TypedFunc<(f32, f32), ()>>,
    mouse_button: Option<TypedFunc<(u32, u32), ()>>,
    resize: Option<TypedFunc<(u32, u32), ()>>,
    quit: Option<TypedFunc<(), ()>>,
}

fn lookup<P: WasmParams>(
    mut store: impl AsContextMut,
    instance: &Instance,
    name: &'static str,
) -> Option<TypedFunc<P, ()>> {
    let func = instance.get_func(&mut store, name)?;
    match func.typed::<P, ()>(&store) {
        Ok(typed) => Some(typed),
        Err(e) => {
            tracing::warn!("Ignoring export {} with unexpected signature: {}", name, e);
            None
        }
    }
}

impl EventExports {
    pub fn resolve(mut store: impl AsContextMut, instance: &Instance) -> Self {
        let exports = Self {
            mouse_move: lookup(&mut store, instance, names::ON_MOUSE_MOVE),
            mouse_button: lookup(&mut store, instance, names::ON_MOUSE_BUTTON),
            resize: lookup(&mut store, instance, names::ON_RESIZE),
            quit: lookup(&mut store, instance, names::ON_QUIT),
        };
        tracing::debug!("Event handlers exported: {}", exports.count());
        exports
    }

    /// Number of event exports present
    pub fn count(&self) -> usize {
        [
            self.mouse_move.is_some(),
            self.mouse_button.is_some(),
            self.resize.is_some(),
            self.quit.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Call the matching export. Returns whether a handler ran.
    pub fn deliver(&self, mut store: impl AsContextMut, event: Event) -> Result<bool, EventError> {
        let trap = |export: &'static str| move |error| EventError { export, error };
        match event {
            Event::MouseMove { x, y } => match &self.mouse_move {
                Some(func) => func
                    .call(&mut store, (x, y))
                    .map_err(trap(names::ON_MOUSE_MOVE))?,
                None => return Ok(false),
            },
            Event::MouseButton { button, pressed } => match &self.mouse_button {
                Some(func) => func
                    .call(&mut store, (button, u32::from(pressed)))
                    .map_err(trap(names::ON_MOUSE_BUTTON))?,
                None => return Ok(false),
            },
            Event::Resize { width, height } => match &self.resize {
                Some(func) => func
                    .call(&mut store, (width, height))
                    .map_err(trap(names::ON_RESIZE))?,
                None => return Ok(false),
            },
            Event::Quit => match &self.quit {
                Some(func) => func.call(&mut store, ()).map_err(trap(names::ON_QUIT))?,
                None => return Ok(false),
            },
        }
        Ok(true)
    }
}

/// Button number passed to `easel_on_mouse_button`; `None` for buttons the
/// module cannot name
pub fn mouse_button_code(button: MouseButton) -> Option<u32> {
    match button {
        MouseButton::Left => Some(mouse_button::LEFT),
        MouseButton::Middle => Some(mouse_button::MIDDLE),
        MouseButton::Right => Some(mouse_button::RIGHT),
        MouseButton::Back => Some(mouse_button::BACK),
        MouseButton::Forward => Some(mouse_button::FORWARD),
        MouseButton::Other(_) => None,
    }
}
