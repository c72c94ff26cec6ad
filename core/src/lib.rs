//! Easel Core - host-side WebGPU bridge
//!
//! This crate lets a compiled WebAssembly module drive a native GPU through
//! the standard `wgpu*` C API, imported from the `env` module.
//!
//! # Architecture
//!
//! - [`CapabilityResolver`] - Negotiates adapter, device and surface before the module runs
//! - [`BridgeInstance`] - Module instantiated against the bridge imports
//! - [`ObjectTable`] - Handle registry owning every GPU object the module sees
//! - [`decode`] / [`translate`] - Descriptor decoding and enum translation
//! - [`MainLoop`] - Per-frame callback registered by the module

pub mod analysis;
pub mod capabilities;
pub mod config;
pub mod decode;
pub mod error;
pub mod error_scope;
pub mod events;
pub mod ffi;
pub mod handles;
pub mod main_loop;
pub mod memory;
pub mod objects;
pub mod presenter;
#[cfg(test)]
pub mod test_utils;
pub mod translate;
pub mod wasm;

// Re-export the session types
pub use capabilities::{
    Capabilities, CapabilityError, CapabilityResolver, PresentationTarget, SurfaceTarget,
};
pub use config::Config;
pub use error::{BridgeError, BridgeResult};
pub use events::{Event, EventError};
pub use main_loop::{MainLoop, MainLoopError, TickOutcome};
pub use objects::{GpuObject, ObjectKind, ObjectTable};
pub use presenter::{PresentError, Presenter};
pub use wasm::{BridgeContext, BridgeEngine, BridgeInstance, GpuState};

// Re-export analysis types for pre-flight checks
pub use analysis::{AnalysisError, ContractProblem, ModuleReport, analyze_module};
