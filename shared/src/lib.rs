//! Shared types for the Easel WebGPU bridge.
//!
//! This crate describes what a compiled module and the host agree on: the
//! byte layout of every descriptor the module passes by pointer, the
//! numbering of every enumeration, and the names of imports and exports.
//! It is used by the host bridge and can be used by module-side tooling.

#![no_std]

pub mod abi;
pub mod names;

pub use abi::{Handle, Ptr};

/// The null handle
pub const NULL_HANDLE: Handle = 0;
