//! Construction-time capability gate.
//!
//! A failed gate is local and silent: the document root is flagged for
//! CSS fallback styling and the caller simply does not build the scene.

use crate::api::config::Capabilities;
use crate::api::types::RootFlag;
use crate::error::CapabilityError;
use crate::host::Page;

/// Environment queries the gate needs. Implemented over the DOM by the bridge.
pub trait CapabilityProbe {
    /// The 3D engine library is loaded.
    fn engine_loaded(&self) -> bool;

    /// A hardware-accelerated context can be obtained from the target canvas.
    fn acquire_context(&self) -> bool;

    fn prefers_reduced_motion(&self) -> bool;

    fn viewport_width(&self) -> f32;
}

/// Check engine and context availability, flag the document root, and
/// sample the construction-time capabilities.
pub fn gate(
    probe: &impl CapabilityProbe,
    page: &mut impl Page,
) -> Result<Capabilities, CapabilityError> {
    let checked = if !probe.engine_loaded() {
        Err(CapabilityError::EngineMissing)
    } else if !probe.acquire_context() {
        Err(CapabilityError::ContextUnavailable)
    } else {
        Ok(())
    };

    if let Err(err) = checked {
        log::info!("solar scene disabled: {err}");
        page.set_root_flag(RootFlag::NoWebgl);
        return Err(err);
    }

    page.set_root_flag(RootFlag::WebglReady);
    let caps = Capabilities {
        reduced_motion: probe.prefers_reduced_motion(),
        viewport_width: probe.viewport_width(),
    };
    if caps.reduced_motion {
        page.set_root_flag(RootFlag::ReducedMotion);
    }
    Ok(caps)
}
