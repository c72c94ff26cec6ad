//! Logging, main loop and canvas FFI functions

use easel_shared::Ptr;
use wasmtime::Caller;

use super::{complete, with_memory};
use crate::wasm::BridgeContext;

/// Log a message from WASM
pub(super) fn log_message(
    mut caller: Caller<'_, BridgeContext>,
    ptr: Ptr,
    len: u32,
) -> wasmtime::Result<()> {
    let result = with_memory(&mut caller, |mem, _| {
        let bytes = mem.read_bytes(ptr, len)?;
        tracing::info!("[MODULE] {}", String::from_utf8_lossy(bytes));
        Ok(())
    });
    complete("easel_log", result)
}

/// Register the per-frame callback (an index into the function table)
pub(super) fn set_main_loop(mut caller: Caller<'_, BridgeContext>, function_index: u32) {
    caller.data_mut().main_loop.set(function_index);
}

pub(super) fn cancel_main_loop(mut caller: Caller<'_, BridgeContext>) {
    caller.data_mut().main_loop.cancel();
}

/// Canvas width in physical pixels
pub(super) fn canvas_width(caller: Caller<'_, BridgeContext>) -> u32 {
    caller.data().canvas.0
}

/// Canvas height in physical pixels
pub(super) fn canvas_height(caller: Caller<'_, BridgeContext>) -> u32 {
    caller.data().canvas.1
}
