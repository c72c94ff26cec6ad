//! Offscreen session: negotiate, start, run a fixed number of ticks

use anyhow::{Context, Result};
use wasmtime::Module;

use easel_core::config::Config;
use easel_core::wasm::{BridgeEngine, BridgeInstance};
use easel_core::{CapabilityResolver, SurfaceTarget, TickOutcome};

pub fn run(engine: &BridgeEngine, module: &Module, config: &Config, frames: u64) -> Result<()> {
    let target = SurfaceTarget::Headless {
        width: config.window.width,
        height: config.window.height,
    };
    let caps = CapabilityResolver::new(config.gpu.clone())
        .negotiate_blocking(target)
        .context("GPU negotiation failed")?;
    tracing::info!(
        "Headless target {}x{} ({:?})",
        caps.size.0,
        caps.size.1,
        caps.preferred_format
    );

    let mut bridge = BridgeInstance::new(engine, module, caps, config)?;
    bridge.start()?;

    for _ in 0..frames {
        match bridge.tick()? {
            TickOutcome::Ran => {}
            TickOutcome::Idle => {
                tracing::info!("No main loop registered after {} ticks", bridge.ticks());
                break;
            }
        }
    }

    let presented = bridge
        .context()
        .presenter
        .as_ref()
        .map_or(0, |presenter| presenter.frames_presented());
    tracing::info!(
        "Ran {} ticks, presented {} frames, issued {} handles",
        bridge.ticks(),
        presented,
        bridge.context().objects.high_water_mark()
    );
    Ok(())
}
