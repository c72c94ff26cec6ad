//! Per-frame callback registered by the module
//!
//! The module registers its frame function by index into its exported
//! function table. The index is re-resolved on every tick, so a module that
//! rewrites its table entry gets the new function on the next frame.

#[cfg(test)]
mod tests;

use thiserror::Error;
use wasmtime::{AsContextMut, Func, Ref, Store, Table};

/// Main-loop registration state
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MainLoop {
    function_index: Option<u32>,
}

impl MainLoop {
    /// Register a table index, replacing any earlier registration
    pub fn set(&mut self, function_index: u32) {
        if let Some(previous) = self.function_index {
            tracing::debug!(
                "Main loop {} replaced by {}",
                previous,
                function_index
            );
        }
        self.function_index = Some(function_index);
    }

    pub fn cancel(&mut self) {
        self.function_index = None;
    }

    pub fn registered(&self) -> Option<u32> {
        self.function_index
    }

    pub fn is_active(&self) -> bool {
        self.function_index.is_some()
    }
}

/// Store data that carries a main-loop registration
pub trait MainLoopHost {
    fn main_loop(&mut self) -> &mut MainLoop;
}

impl MainLoopHost for MainLoop {
    fn main_loop(&mut self) -> &mut MainLoop {
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing registered; no table lookup happened
    Idle,
    /// The registered function ran to completion
    Ran,
}

#[derive(Debug, Error)]
pub enum MainLoopError {
    #[error("main loop registered but the module exports no function table")]
    NoTable,

    #[error("function table has no function at index {index}")]
    MissingEntry { index: u32 },

    #[error("function at table index {index} is not a () -> () function")]
    WrongSignature { index: u32 },

    #[error("main loop callback trapped: {0:#}")]
    Trap(wasmtime::Error),
}

/// Function stored at `index` of a funcref table, if any
pub(crate) fn table_entry(mut store: impl AsContextMut, table: Table, index: u32) -> Option<Func> {
    match table.get(&mut store, u64::from(index)) {
        Some(Ref::Func(Some(func))) => Some(func),
        _ => None,
    }
}

/// Run one frame of the registered main loop.
///
/// A registration that no longer resolves to a `() -> ()` function is
/// cleared before the error is returned.
pub fn run_tick<T: MainLoopHost>(
    store: &mut Store<T>,
    table: Option<Table>,
) -> Result<TickOutcome, MainLoopError> {
    let Some(index) = store.data_mut().main_loop().registered() else {
        return Ok(TickOutcome::Idle);
    };

    let resolved = table.ok_or(MainLoopError::NoTable).and_then(|table| {
        let func =
            table_entry(&mut *store, table, index).ok_or(MainLoopError::MissingEntry { index })?;
        func.typed::<(), ()>(&*store)
            .map_err(|_| MainLoopError::WrongSignature { index })
    });
    let func = match resolved {
        Ok(func) => func,
        Err(err) => {
            store.data_mut().main_loop().cancel();
            return Err(err);
        }
    };

    func.call(&mut *store, ()).map_err(MainLoopError::Trap)?;
    Ok(TickOutcome::Ran)
}
