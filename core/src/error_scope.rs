//! Synchronous capture of wgpu errors around a single call
//!
//! wgpu reports validation failures through error scopes whose futures
//! resolve immediately on native backends, so they can be drained with
//! `pollster` before the entry point returns to the module.

use crate::error::{BridgeError, BridgeResult};

/// Run `op` inside validation and out-of-memory scopes.
///
/// The value `op` produced is returned only if neither scope caught an
/// error; a wgpu object created by a failing call is invalid and must not be
/// registered.
pub fn guarded<T>(device: &wgpu::Device, op: impl FnOnce() -> T) -> BridgeResult<T> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = op();
    let validation = pollster::block_on(device.pop_error_scope());
    let out_of_memory = pollster::block_on(device.pop_error_scope());

    match validation.or(out_of_memory) {
        Some(err) => Err(BridgeError::Host(err.to_string())),
        None => Ok(value),
    }
}

/// Validation scope spanning several calls (the first ticks of a session).
///
/// Errors are logged, never returned: the scope only adds diagnostics.
pub struct ValidationScope<'a> {
    device: &'a wgpu::Device,
    context: String,
}

impl<'a> ValidationScope<'a> {
    pub fn open(device: &'a wgpu::Device, context: impl Into<String>) -> Self {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        Self {
            device,
            context: context.into(),
        }
    }

    /// Pop the scope, returning the message of any captured error
    pub fn close(self) -> Option<String> {
        let captured = pollster::block_on(self.device.pop_error_scope()).map(|err| err.to_string());
        if let Some(message) = &captured {
            tracing::warn!("Validation error during {}: {}", self.context, message);
        }
        captured
    }
}
