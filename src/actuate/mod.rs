//! System control actuators.
//!
//! - `VolumeControl` / `BrightnessControl`: the actuator seams the dispatcher drives.
//! - `CommandControl`: runs an OS command per actuation (macOS, Linux, or a custom template).
//! - `DryRunControl`: logs instead of actuating.
//!
//! Actuators are built once per run by `build_controls` and owned by the dispatcher.

mod backends;
mod control;

use anyhow::{anyhow, Result};
use std::str::FromStr;

pub use backends::{CommandControl, CommandTemplate, DryRunControl, DEFAULT_COMMAND_TIMEOUT};
pub use control::{BrightnessControl, Control, VolumeControl};

use crate::config::ActuatorSettings;

/// Which family of actuators to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActuatorBackend {
    /// `osascript` for volume, `brightness` CLI for the display.
    Macos,
    /// `pactl` for volume, `brightnessctl` for the display.
    Linux,
    /// Both commands come from configuration.
    Custom,
    DryRun,
}

impl ActuatorBackend {
    pub fn for_host() -> Self {
        if cfg!(target_os = "macos") {
            ActuatorBackend::Macos
        } else {
            ActuatorBackend::Linux
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActuatorBackend::Macos => "macos",
            ActuatorBackend::Linux => "linux",
            ActuatorBackend::Custom => "custom",
            ActuatorBackend::DryRun => "dry-run",
        }
    }
}

impl FromStr for ActuatorBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "macos" | "mac" => Ok(ActuatorBackend::Macos),
            "linux" => Ok(ActuatorBackend::Linux),
            "custom" => Ok(ActuatorBackend::Custom),
            "dry-run" | "dry_run" | "dryrun" | "none" => Ok(ActuatorBackend::DryRun),
            "auto" | "" => Ok(ActuatorBackend::for_host()),
            other => Err(anyhow!(
                "unknown actuator backend '{}' (expected macos|linux|custom|dry-run|auto)",
                other
            )),
        }
    }
}

pub type VolumeHandle = Box<dyn VolumeControl + Send>;
pub type BrightnessHandle = Box<dyn BrightnessControl + Send>;

/// Build the volume and brightness actuators for a run.
///
/// Custom command templates override the backend's defaults for either control.
pub fn build_controls(settings: &ActuatorSettings) -> Result<(VolumeHandle, BrightnessHandle)> {
    if settings.backend == ActuatorBackend::DryRun {
        return Ok((
            Box::new(DryRunControl::new()),
            Box::new(DryRunControl::new()),
        ));
    }

    let (default_volume, default_brightness) = match settings.backend {
        ActuatorBackend::Macos => (
            Some(CommandTemplate::macos_volume()),
            Some(CommandTemplate::macos_brightness()),
        ),
        ActuatorBackend::Linux => (
            Some(CommandTemplate::linux_volume()),
            Some(CommandTemplate::linux_brightness()),
        ),
        _ => (None, None),
    };

    let volume = match &settings.volume_command {
        Some(argv) => CommandTemplate::from_argv(argv)?,
        None => default_volume
            .ok_or_else(|| anyhow!("custom actuators require a volume_command"))?,
    };
    let brightness = match &settings.brightness_command {
        Some(argv) => CommandTemplate::from_argv(argv)?,
        None => default_brightness
            .ok_or_else(|| anyhow!("custom actuators require a brightness_command"))?,
    };

    log::info!(
        "actuators ({}): volume via {}, brightness via {}",
        settings.backend.as_str(),
        volume.program,
        brightness.program
    );

    Ok((
        Box::new(CommandControl::new(volume).with_timeout(settings.timeout)),
        Box::new(CommandControl::new(brightness).with_timeout(settings.timeout)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(backend: ActuatorBackend) -> ActuatorSettings {
        ActuatorSettings {
            backend,
            volume_command: None,
            brightness_command: None,
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    #[test]
    fn parses_backend_names() {
        assert_eq!("macos".parse::<ActuatorBackend>().unwrap(), ActuatorBackend::Macos);
        assert_eq!("Linux".parse::<ActuatorBackend>().unwrap(), ActuatorBackend::Linux);
        assert_eq!("dry_run".parse::<ActuatorBackend>().unwrap(), ActuatorBackend::DryRun);
        assert_eq!("auto".parse::<ActuatorBackend>().unwrap(), ActuatorBackend::for_host());
        assert!("windows".parse::<ActuatorBackend>().is_err());
    }

    #[test]
    fn custom_backend_requires_both_commands() {
        let mut cfg = settings(ActuatorBackend::Custom);
        assert!(build_controls(&cfg).is_err());

        cfg.volume_command = Some(vec!["amixer".into(), "{percent}%".into()]);
        assert!(build_controls(&cfg).is_err());

        cfg.brightness_command = Some(vec!["light".into(), "-S".into(), "{percent}".into()]);
        let (volume, brightness) = build_controls(&cfg).unwrap();
        assert_eq!(volume.name(), "command");
        assert_eq!(brightness.name(), "command");
    }

    #[test]
    fn dry_run_backend_builds_logging_controls() {
        let (volume, brightness) = build_controls(&settings(ActuatorBackend::DryRun)).unwrap();
        assert_eq!(volume.name(), "dry-run");
        assert_eq!(brightness.name(), "dry-run");
    }
}
