//! Side-based routing of mapped values to actuators.
//!
//! The routing is fixed: the left hand drives volume, the right hand drives brightness,
//! an unresolved hand drives nothing. Every routed call is issued, even when the value
//! matches the previous frame's. Actuator failures are folded into the returned
//! `ControlOutcome`; they are never retried and never escalate to the frame loop.

use serde::Serialize;

use crate::actuate::{BrightnessControl, Control, VolumeControl};
use crate::handedness::Side;

/// Result of one actuation attempt.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlOutcome {
    pub control: Control,
    /// Mapped value for the control: volume percent before truncation, brightness fraction.
    pub value: f64,
    pub ok: bool,
    pub message: Option<String>,
}

impl ControlOutcome {
    /// Short action summary for the overlay, e.g. `Left→Volume 50%` or
    /// `Right→Brightness 52% ✓`.
    pub fn summary(&self) -> String {
        match self.control {
            Control::Volume => {
                let suffix = if self.ok { "" } else { " ✕" };
                format!("Left→Volume {:.0}%{}", self.value, suffix)
            }
            Control::Brightness => format!(
                "Right→Brightness {}% {}",
                (self.value * 100.0) as i64,
                if self.ok { "✓" } else { "✕" }
            ),
        }
    }
}

/// Owns one volume and one brightness actuator and routes detections to them.
pub struct ControlDispatcher<V, B> {
    volume: V,
    brightness: B,
}

impl<V: VolumeControl, B: BrightnessControl> ControlDispatcher<V, B> {
    pub fn new(volume: V, brightness: B) -> Self {
        Self { volume, brightness }
    }

    /// Route one detection's mapped values by side.
    ///
    /// Returns `None` for `Side::Unknown`: nothing was invoked.
    pub fn dispatch(&mut self, side: Side, volume: f64, brightness: f64) -> Option<ControlOutcome> {
        match side {
            Side::Left => {
                let percent = volume_percent(volume);
                let result = self.volume.set_volume(percent);
                Some(outcome(Control::Volume, volume, result, self.volume.name()))
            }
            Side::Right => {
                let result = self.brightness.set_brightness(brightness);
                Some(outcome(
                    Control::Brightness,
                    brightness,
                    result,
                    self.brightness.name(),
                ))
            }
            Side::Unknown => None,
        }
    }

    pub fn volume_control(&self) -> &V {
        &self.volume
    }

    pub fn brightness_control(&self) -> &B {
        &self.brightness
    }

    pub fn into_controls(self) -> (V, B) {
        (self.volume, self.brightness)
    }
}

/// Whole percent for the volume actuator; the fractional part is dropped.
fn volume_percent(volume: f64) -> u8 {
    if volume.is_nan() {
        return 0;
    }
    volume.clamp(0.0, 100.0) as u8
}

fn outcome(
    control: Control,
    value: f64,
    result: anyhow::Result<()>,
    actuator: &str,
) -> ControlOutcome {
    match result {
        Ok(()) => ControlOutcome {
            control,
            value,
            ok: true,
            message: None,
        },
        Err(err) => {
            log::warn!("{} actuation via {} failed: {:#}", control, actuator, err);
            ControlOutcome {
                control,
                value,
                ok: false,
                message: Some(format!("{:#}", err)),
            }
        }
    }
}
