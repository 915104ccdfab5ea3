use anyhow::Result;
use serde::Serialize;
use std::fmt;

/// The two system controls a gesture can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Control {
    Volume,
    Brightness,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Volume => f.write_str("Volume"),
            Control::Brightness => f.write_str("Brightness"),
        }
    }
}

/// Output volume actuator.
///
/// Calls are synchronous and may block for the duration of an external command.
/// A failure is reported through the returned `Result`, never by panicking.
pub trait VolumeControl {
    /// Actuator identifier for logs.
    fn name(&self) -> &'static str;

    /// Set output volume as a whole percentage, 0..=100.
    fn set_volume(&mut self, percent: u8) -> Result<()>;
}

/// Display brightness actuator.
pub trait BrightnessControl {
    /// Actuator identifier for logs.
    fn name(&self) -> &'static str;

    /// Set display brightness as a fraction, 0.0..=1.0.
    fn set_brightness(&mut self, level: f64) -> Result<()>;
}

impl<T: VolumeControl + ?Sized> VolumeControl for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn set_volume(&mut self, percent: u8) -> Result<()> {
        (**self).set_volume(percent)
    }
}

impl<T: BrightnessControl + ?Sized> BrightnessControl for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn set_brightness(&mut self, level: f64) -> Result<()> {
        (**self).set_brightness(level)
    }
}
