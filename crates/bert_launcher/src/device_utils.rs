//! Device Utilities - visible accelerator count for the `--world-size` default

use tracing::debug;

#[cfg(feature = "cuda")]
use nvml_wrapper::Nvml;

/// Returns the number of accelerator devices visible to this process.
/// Returns 0 if NVML cannot be initialized or the `cuda` feature is disabled.
pub fn visible_device_count() -> usize {
    #[cfg(feature = "cuda")]
    {
        match Nvml::init().and_then(|nvml| nvml.device_count()) {
            Ok(count) => {
                debug!("NVML reports {} visible device(s)", count);
                count as usize
            }
            Err(e) => {
                tracing::warn!("Failed to query device count through NVML: {}", e);
                0
            }
        }
    }

    #[cfg(not(feature = "cuda"))]
    {
        debug!("Device probe disabled (cuda feature not enabled).");
        0
    }
}

/// Default world size: every visible device, and at least one process.
pub fn default_world_size(device_count: usize) -> usize {
    device_count.max(1)
}
