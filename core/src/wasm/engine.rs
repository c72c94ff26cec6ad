//! Module compilation and the memory checks that precede instantiation

use anyhow::{Context, Result, bail};
use wasmtime::{Engine, ExternType, MemoryType, Module};

use easel_shared::names::MEMORY_EXPORT;

/// Bytes per WebAssembly page
const WASM_PAGE_SIZE: u64 = 65536;

/// Compiles modules; one engine serves every instance in the process.
///
/// There is no `Default`: building the wasmtime engine can fail on an
/// unsupported host, so [`BridgeEngine::new`] reports that instead.
pub struct BridgeEngine {
    engine: Engine,
}

impl BridgeEngine {
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: Engine::default(),
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Compile a module from binary or text bytes
    pub fn load_module(&self, bytes: &[u8]) -> Result<Module> {
        Module::new(&self.engine, bytes).context("Failed to compile WASM module")
    }

    /// Check the exported linear memory against what the bridge can serve.
    ///
    /// Descriptor pointers are 32-bit offsets into one unshared memory, and
    /// its declared minimum must fit `ram_limit`. Modules without the export
    /// pass; they trap on their first descriptor read instead.
    pub fn check_memory(module: &Module, ram_limit: usize) -> Result<()> {
        let Some(ExternType::Memory(memory)) = module.get_export(MEMORY_EXPORT) else {
            return Ok(());
        };
        check_memory_type(&memory, ram_limit as u64)
    }
}

pub(super) fn check_memory_type(memory: &MemoryType, ram_limit: u64) -> Result<()> {
    if memory.is_64() {
        bail!("Exported memory is 64-bit; descriptor pointers must be 32-bit offsets");
    }
    if memory.is_shared() {
        bail!("Exported memory is shared; the bridge needs an unshared linear memory");
    }

    let min_pages = memory.minimum();
    let min_bytes = min_pages.saturating_mul(WASM_PAGE_SIZE);
    if min_bytes > ram_limit {
        bail!(
            "Exported memory starts at {} pages ({} bytes), over the {} byte RAM limit",
            min_pages,
            min_bytes,
            ram_limit
        );
    }

    match memory.maximum() {
        Some(max_pages) if max_pages.saturating_mul(WASM_PAGE_SIZE) > ram_limit => {
            tracing::debug!(
                "Memory maximum of {} pages is capped at {} bytes",
                max_pages,
                ram_limit
            );
        }
        None => tracing::debug!("Memory has no maximum; growth capped at {} bytes", ram_limit),
        Some(_) => {}
    }
    Ok(())
}
