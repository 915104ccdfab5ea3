use anyhow::Result;

use crate::actuate::control::{BrightnessControl, VolumeControl};

/// Logs each actuation instead of touching the system. Always succeeds.
#[derive(Clone, Debug, Default)]
pub struct DryRunControl {
    calls: u64,
}

impl DryRunControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actuations seen so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl VolumeControl for DryRunControl {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    fn set_volume(&mut self, percent: u8) -> Result<()> {
        self.calls += 1;
        log::debug!("dry-run: volume -> {}%", percent);
        Ok(())
    }
}

impl BrightnessControl for DryRunControl {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    fn set_brightness(&mut self, level: f64) -> Result<()> {
        self.calls += 1;
        log::debug!("dry-run: brightness -> {:.3}", level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_counts_calls_and_succeeds() {
        let mut control = DryRunControl::new();
        assert!(control.set_volume(30).is_ok());
        assert!(control.set_brightness(0.4).is_ok());
        assert_eq!(control.calls(), 2);
    }
}
