//! An instantiated module wired to the bridge

use anyhow::{Context, Result};
use wasmtime::{Instance, Linker, Module, Store, TypedFunc};

use easel_shared::names;

use super::context::BridgeContext;
use super::engine::BridgeEngine;
use crate::capabilities::Capabilities;
use crate::config::Config;
use crate::error_scope::ValidationScope;
use crate::events::{Event, EventError, EventExports};
use crate::ffi::register_bridge_ffi;
use crate::main_loop::{self, MainLoopError, TickOutcome};

/// A module instantiated against the bridge imports
pub struct BridgeInstance {
    store: Store<BridgeContext>,
    instance: Instance,
    entry_name: String,
    entry_fn: Option<TypedFunc<(), ()>>,
    events: EventExports,
    validation_ticks: u32,
    ticks: u64,
}

impl BridgeInstance {
    /// Instantiate `module` on the GPU resolved in `caps`.
    ///
    /// Taking [`Capabilities`] by value keeps negotiation strictly before any
    /// module code runs.
    pub fn new(
        engine: &BridgeEngine,
        module: &Module,
        caps: Capabilities,
        config: &Config,
    ) -> Result<Self> {
        let context = BridgeContext::new(caps, config.window.vsync, config.runtime.ram_limit);
        Self::with_context(engine, module, context, config)
    }

    pub(crate) fn with_context(
        engine: &BridgeEngine,
        module: &Module,
        context: BridgeContext,
        config: &Config,
    ) -> Result<Self> {
        BridgeEngine::check_memory(module, config.runtime.ram_limit)?;

        let mut store = Store::new(engine.engine(), context);
        store.limiter(|ctx| &mut ctx.limits);

        let mut linker = Linker::new(engine.engine());
        register_bridge_ffi(&mut linker).context("Failed to register bridge imports")?;
        check_imports(&linker, &mut store, module)?;

        let instance = linker
            .instantiate(&mut store, module)
            .context("Failed to instantiate WASM module")?;

        let memory = instance.get_memory(&mut store, names::MEMORY_EXPORT);
        if memory.is_none() {
            tracing::warn!("Module does not export '{}'", names::MEMORY_EXPORT);
        }
        let table = instance.get_table(&mut store, names::FUNCTION_TABLE_EXPORT);
        {
            let ctx = store.data_mut();
            ctx.memory = memory;
            ctx.table = table;
        }

        let entry_name = config.runtime.entry_point.clone();
        let entry_fn = match instance.get_func(&mut store, &entry_name) {
            Some(func) => Some(
                func.typed::<(), ()>(&store).with_context(|| {
                    format!("Entry point '{}' must take no arguments", entry_name)
                })?,
            ),
            None => {
                tracing::warn!("Module has no '{}' export; nothing to start", entry_name);
                None
            }
        };
        let events = EventExports::resolve(&mut store, &instance);

        Ok(Self {
            store,
            instance,
            entry_name,
            entry_fn,
            events,
            validation_ticks: config.gpu.validation_ticks,
            ticks: 0,
        })
    }

    /// Call the entry point once
    pub fn start(&mut self) -> Result<()> {
        if let Some(entry) = &self.entry_fn {
            entry
                .call(&mut self.store, ())
                .with_context(|| format!("WASM {}() failed", self.entry_name))?;
        }
        self.present_frame();
        Ok(())
    }

    /// Run one animation frame: the main-loop callback, then present
    pub fn tick(&mut self) -> Result<TickOutcome, MainLoopError> {
        let device = if self.ticks < u64::from(self.validation_ticks) {
            self.store.data().device().cloned()
        } else {
            None
        };
        let scope = device
            .as_ref()
            .map(|device| ValidationScope::open(device, format!("tick {}", self.ticks)));

        let table = self.store.data().table;
        let result = main_loop::run_tick(&mut self.store, table);

        if let Some(scope) = scope {
            scope.close();
        }
        self.ticks += 1;

        match &result {
            Ok(_) => self.present_frame(),
            Err(_) => {
                if let Some(presenter) = self.store.data_mut().presenter.as_mut() {
                    presenter.discard();
                }
            }
        }
        result
    }

    /// Follow a canvas resize and tell the module about it
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EventError> {
        let ctx = self.store.data_mut();
        ctx.canvas = (width, height);
        if let Some(presenter) = ctx.presenter.as_mut() {
            presenter.resize(width, height);
        }
        self.deliver_event(Event::Resize { width, height })?;
        Ok(())
    }

    /// Forward an event to the module. Returns whether a handler ran.
    pub fn deliver_event(&mut self, event: Event) -> Result<bool, EventError> {
        self.events.deliver(&mut self.store, event)
    }

    fn present_frame(&mut self) {
        if let Some(presenter) = self.store.data_mut().presenter.as_mut() {
            presenter.present();
        }
    }

    pub fn context(&self) -> &BridgeContext {
        self.store.data()
    }

    pub fn context_mut(&mut self) -> &mut BridgeContext {
        self.store.data_mut()
    }

    pub fn store_mut(&mut self) -> &mut Store<BridgeContext> {
        &mut self.store
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn main_loop_active(&self) -> bool {
        self.store.data().main_loop.is_active()
    }
}

/// Fail with every import the bridge does not provide, not just the first
fn check_imports(
    linker: &Linker<BridgeContext>,
    store: &mut Store<BridgeContext>,
    module: &Module,
) -> Result<()> {
    let missing: Vec<String> = module
        .imports()
        .filter(|import| linker.get_by_import(&mut *store, import).is_none())
        .map(|import| format!("{}::{}", import.module(), import.name()))
        .collect();
    if !missing.is_empty() {
        anyhow::bail!(
            "Module imports {} function(s) the bridge does not provide: {}",
            missing.len(),
            missing.join(", ")
        );
    }
    Ok(())
}
