//! Tests for capability negotiation

use super::*;
use crate::config::HeadlessFormat;
use crate::test_utils::{headless_capabilities, skip_or_panic};

#[test]
fn test_resolver_starts_uninitialized() {
    let resolver = CapabilityResolver::new(GpuConfig::default());
    assert_eq!(resolver.state(), ResolverState::Uninitialized);
}

#[test]
fn test_capability_error_messages() {
    let err = CapabilityError::Surface("no formats".to_string());
    assert_eq!(
        err.to_string(),
        "presentation surface unavailable: no formats"
    );
    let err = CapabilityError::AlreadyNegotiated(ResolverState::Ready);
    assert!(err.to_string().contains("Ready"));
}

// ============================================================================
// GPU Tests (skipped without an adapter)
// ============================================================================

#[test]
fn test_headless_negotiation_reaches_ready() {
    let config = GpuConfig {
        headless_format: HeadlessFormat::Rgba8unorm,
        ..Default::default()
    };
    let mut resolver = CapabilityResolver::new(config);
    let caps = match resolver.negotiate_blocking(SurfaceTarget::Headless {
        width: 32,
        height: 16,
    }) {
        Ok(caps) => caps,
        Err(err) => {
            assert_eq!(resolver.state(), ResolverState::Failed);
            skip_or_panic("test_headless_negotiation_reaches_ready", &err.to_string());
            return;
        }
    };

    assert_eq!(resolver.state(), ResolverState::Ready);
    assert_eq!(caps.preferred_format, wgpu::TextureFormat::Rgba8Unorm);
    assert_eq!(caps.size, (32, 16));
    assert!(matches!(caps.target, PresentationTarget::Offscreen));
}

#[test]
fn test_negotiation_runs_once() {
    let mut resolver = CapabilityResolver::new(GpuConfig::default());
    let first = resolver.negotiate_blocking(SurfaceTarget::Headless {
        width: 8,
        height: 8,
    });
    let state = resolver.state();
    assert!(matches!(
        state,
        ResolverState::Ready | ResolverState::Failed
    ));
    drop(first);

    let second = resolver.negotiate_blocking(SurfaceTarget::Headless {
        width: 8,
        height: 8,
    });
    assert!(matches!(
        second,
        Err(CapabilityError::AlreadyNegotiated(s)) if s == state
    ));
}

#[test]
fn test_headless_capabilities_default_format() {
    let Some(caps) = headless_capabilities("test_headless_capabilities_default_format")
    else {
        return;
    };
    assert_eq!(caps.size, (64, 64));
    assert_eq!(caps.preferred_format, wgpu::TextureFormat::Bgra8Unorm);
}
