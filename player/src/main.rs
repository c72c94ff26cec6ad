//! Easel Player - runs a compiled WebGPU module
//!
//! # Usage
//!
//! ```bash
//! easel-player triangle.wasm
//! easel-player triangle.wasm --width 1280 --height 720 --power high
//! easel-player triangle.wasm --headless --frames 120
//! easel-player triangle.wasm --inspect
//! easel-player triangle.wasm --width 1280 --save-config
//! ```

mod app;
mod headless;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use easel_core::analyze_module;
use easel_core::config::{self, PowerPreference};
use easel_core::wasm::BridgeEngine;

use settings::Overrides;

#[derive(Parser)]
#[command(name = "easel-player")]
#[command(author, version, about = "Runs a WebAssembly module against a native WebGPU device")]
struct Args {
    /// Compiled module (.wasm)
    module: PathBuf,

    /// Render offscreen instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Ticks to run in headless mode
    #[arg(long, default_value = "60")]
    frames: u64,

    /// Canvas width in pixels (overrides the config file)
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (overrides the config file)
    #[arg(long)]
    height: Option<u32>,

    /// Adapter power preference
    #[arg(long, value_enum)]
    power: Option<Power>,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Store the resolved settings as the platform default config
    #[arg(long)]
    save_config: bool,

    /// Print the module's imports, exports and contract problems, then exit
    #[arg(long)]
    inspect: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Power {
    Low,
    High,
}

impl From<Power> for PowerPreference {
    fn from(power: Power) -> Self {
        match power {
            Power::Low => Self::Low,
            Power::High => Self::High,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if !args.module.exists() {
        anyhow::bail!("Module file not found: {}", args.module.display());
    }
    let bytes = std::fs::read(&args.module)
        .with_context(|| format!("Failed to read {}", args.module.display()))?;

    if args.inspect {
        return inspect(&bytes);
    }

    let config = settings::resolve(
        args.config.as_deref(),
        Overrides {
            width: args.width,
            height: args.height,
            power: args.power.map(PowerPreference::from),
        },
    )?;
    if args.save_config {
        config::save(&config)?;
        tracing::info!("Saved settings to {:?}", config::config_dir());
    }

    let report = analyze_module(&bytes).context("Failed to parse module")?;
    for problem in report.problems() {
        tracing::warn!("{}", problem);
    }

    let engine = BridgeEngine::new()?;
    let module = engine.load_module(&bytes)?;

    if args.headless {
        headless::run(&engine, &module, &config, args.frames)
    } else {
        app::run(engine, module, config)
    }
}

fn inspect(bytes: &[u8]) -> Result<()> {
    let report = analyze_module(bytes).context("Failed to parse module")?;

    println!("Imports ({}):", report.imports.len());
    for import in &report.imports {
        println!("  {}::{} [{}]", import.module, import.name, import.kind);
    }
    println!("Exports ({}):", report.exports.len());
    for export in &report.exports {
        println!("  {} [{}]", export.name, export.kind);
    }
    match report.memory_min_pages {
        Some(pages) => println!("Memory: {} pages ({} KiB)", pages, pages * 64),
        None => println!("Memory: none"),
    }
    println!("GPU entry points: {}", report.gpu_imports.len());
    println!("Main loop: {}", if report.uses_main_loop { "yes" } else { "no" });
    if !report.event_handlers.is_empty() {
        println!("Event handlers: {}", report.event_handlers.join(", "));
    }

    let problems = report.problems();
    if problems.is_empty() {
        println!("No contract problems");
    } else {
        println!("Problems:");
        for problem in &problems {
            println!("  - {}", problem);
        }
    }
    Ok(())
}
