use thiserror::Error;

use crate::ir::{Monitor, SizeKey};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ScaleError {
    #[error("container width must be a positive number, got {0}")]
    InvalidContainerWidth(f32),
}

/// Returns `X` of the `1:X` scale that makes the widest monitor fit.
///
/// A manual override is returned as is. Otherwise only enabled monitors
/// count, unless none is enabled, in which case all of them do. The result
/// is never below 1.
pub fn compute_ratio(
    monitors: &[Monitor],
    key: SizeKey,
    container_width: f32,
    manual_override: Option<u32>,
) -> Result<u32, ScaleError> {
    if let Some(ratio) = manual_override {
        return Ok(ratio);
    }
    if !container_width.is_finite() || container_width <= 0.0 {
        return Err(ScaleError::InvalidContainerWidth(container_width));
    }

    let any_enabled = monitors.iter().any(|monitor| monitor.enabled);
    let max_width = monitors
        .iter()
        .filter(|monitor| monitor.enabled || !any_enabled)
        .map(|monitor| monitor.width(key))
        .fold(0.0f32, f32::max);

    let ratio = (max_width / container_width).ceil();
    Ok(if ratio < 1.0 { 1 } else { ratio as u32 })
}
