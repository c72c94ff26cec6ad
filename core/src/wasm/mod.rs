//! WASM runtime wrapper
//!
//! Provides abstractions over wasmtime for loading modules and running them
//! against the bridge imports.
//!
//! # Key Types
//!
//! - [`BridgeEngine`] - Shared WASM engine (one per application)
//! - [`BridgeInstance`] - Instantiated module with its store
//! - [`BridgeContext`] - Store data: handle registry, GPU state, presenter

mod context;
mod engine;
mod instance;


pub use context::{BridgeContext, GpuState};
pub use engine::BridgeEngine;
pub use instance::BridgeInstance;
