//! Errors raised while servicing a module's bridge call

use thiserror::Error;

use crate::objects::ObjectKind;

/// Failure of a single bridge call.
///
/// Most variants are recoverable: the call returns the null handle (or does
/// nothing) and the module keeps running. [`BridgeError::is_fatal`] marks the
/// ones that must trap instead, because continuing would act on garbage.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Read or write past the end of linear memory
    #[error("access of {len} bytes at {offset:#x} exceeds linear memory size {memory_size:#x}")]
    OutOfBounds {
        offset: u64,
        len: u64,
        memory_size: u64,
    },

    /// A field holds a value the descriptor layout does not allow
    #[error("invalid {what}: {value} ({value:#x})")]
    InvalidValue { what: &'static str, value: u64 },

    #[error("{kind} handle {handle} does not refer to a live object")]
    UnresolvedHandle { kind: ObjectKind, handle: u32 },

    #[error("handle {handle} is a {found}, expected a {expected}")]
    WrongKind {
        handle: u32,
        expected: ObjectKind,
        found: ObjectKind,
    },

    #[error("string at {ptr:#x} is not valid UTF-8")]
    InvalidUtf8 { ptr: u32 },

    /// The `next_in_chain` list loops or is unreasonably long
    #[error("extension chain starting at {start:#x} does not terminate")]
    ChainCycle { start: u32 },

    /// The GPU rejected the call (captured from an error scope)
    #[error("GPU error: {0}")]
    Host(String),

    /// The module does not export its linear memory
    #[error("module does not export linear memory")]
    NoMemory,
}

impl BridgeError {
    /// Whether the module must trap rather than receive a null result
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::NoMemory)
    }

    pub(crate) fn invalid(what: &'static str, value: impl Into<u64>) -> Self {
        Self::InvalidValue {
            what,
            value: value.into(),
        }
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
