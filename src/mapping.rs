//! Distance to control-range mapping.
//!
//! Both controls use clamped linear interpolation: inputs below `min_dist` map to
//! `min_out`, inputs above `max_dist` map to `max_out`, nothing is extrapolated.

use anyhow::{anyhow, Result};

pub const DEFAULT_MIN_DIST: f64 = 0.05;
pub const DEFAULT_MAX_DIST: f64 = 0.4;
pub const VOLUME_MIN: f64 = 0.0;
pub const VOLUME_MAX: f64 = 100.0;
/// Brightness never drops to zero so the display cannot go fully black.
pub const BRIGHTNESS_FLOOR: f64 = 0.05;
pub const BRIGHTNESS_MAX: f64 = 1.0;

/// Input and output bounds for one control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeMap {
    pub min_dist: f64,
    pub max_dist: f64,
    pub min_out: f64,
    pub max_out: f64,
}

impl RangeMap {
    pub const fn volume() -> Self {
        Self {
            min_dist: DEFAULT_MIN_DIST,
            max_dist: DEFAULT_MAX_DIST,
            min_out: VOLUME_MIN,
            max_out: VOLUME_MAX,
        }
    }

    pub const fn brightness() -> Self {
        Self {
            min_dist: DEFAULT_MIN_DIST,
            max_dist: DEFAULT_MAX_DIST,
            min_out: BRIGHTNESS_FLOOR,
            max_out: BRIGHTNESS_MAX,
        }
    }

    /// Map a distance into `[min_out, max_out]`.
    pub fn map(&self, d: f64) -> f64 {
        if d.is_nan() || d <= self.min_dist {
            return self.min_out;
        }
        if d >= self.max_dist {
            return self.max_out;
        }
        let t = (d - self.min_dist) / (self.max_dist - self.min_dist);
        (self.min_out + t * (self.max_out - self.min_out)).clamp(self.min_out, self.max_out)
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if !(self.min_dist.is_finite() && self.max_dist.is_finite()) {
            return Err(anyhow!("{} mapping distances must be finite", name));
        }
        if self.min_dist < 0.0 || self.max_dist <= self.min_dist {
            return Err(anyhow!(
                "{} mapping requires 0 <= min_dist < max_dist (got {} .. {})",
                name,
                self.min_dist,
                self.max_dist
            ));
        }
        if !(self.min_out.is_finite() && self.max_out.is_finite()) || self.max_out < self.min_out {
            return Err(anyhow!(
                "{} mapping requires min_out <= max_out (got {} .. {})",
                name,
                self.min_out,
                self.max_out
            ));
        }
        Ok(())
    }
}

/// Maps one pinch distance onto both controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeMapper {
    pub volume: RangeMap,
    pub brightness: RangeMap,
}

impl RangeMapper {
    pub fn new(volume: RangeMap, brightness: RangeMap) -> Self {
        Self { volume, brightness }
    }

    /// Volume percentage in the volume range.
    pub fn to_volume(&self, d: f64) -> f64 {
        self.volume.map(d)
    }

    /// Brightness fraction in the brightness range.
    pub fn to_brightness(&self, d: f64) -> f64 {
        self.brightness.map(d)
    }
}

impl Default for RangeMapper {
    fn default() -> Self {
        Self::new(RangeMap::volume(), RangeMap::brightness())
    }
}

/// `to_volume` with the default bounds (0.05..0.4 → 0..100).
pub fn to_volume(d: f64) -> f64 {
    RangeMap::volume().map(d)
}

/// `to_brightness` with the default bounds (0.05..0.4 → 0.05..1.0).
pub fn to_brightness(d: f64) -> f64 {
    RangeMap::brightness().map(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep() -> impl Iterator<Item = f64> {
        (0..=300).map(|i| i as f64 * 0.005)
    }

    #[test]
    fn volume_is_bounded_and_monotonic() {
        let mut prev = f64::MIN;
        for d in sweep() {
            let v = to_volume(d);
            assert!((0.0..=100.0).contains(&v), "d={} v={}", d, v);
            assert!(v >= prev, "not monotonic at d={}", d);
            prev = v;
        }
    }

    #[test]
    fn brightness_is_bounded_and_monotonic() {
        let mut prev = f64::MIN;
        for d in sweep() {
            let b = to_brightness(d);
            assert!((0.05..=1.0).contains(&b), "d={} b={}", d, b);
            assert!(b >= prev, "not monotonic at d={}", d);
            prev = b;
        }
    }

    #[test]
    fn clamps_outside_input_bounds() {
        assert_eq!(to_volume(0.0), 0.0);
        assert_eq!(to_volume(0.05), 0.0);
        assert_eq!(to_volume(0.4), 100.0);
        assert_eq!(to_volume(1.3), 100.0);
        assert_eq!(to_brightness(0.01), 0.05);
        assert_eq!(to_brightness(0.05), 0.05);
        assert_eq!(to_brightness(0.4), 1.0);
        assert_eq!(to_brightness(0.9), 1.0);
    }

    #[test]
    fn interpolates_linearly_inside_bounds() {
        assert!((to_volume(0.225) - 50.0).abs() < 1e-9);
        assert!((to_brightness(0.225) - 0.525).abs() < 1e-9);
        assert!((to_volume(0.12) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn nan_maps_to_the_floor() {
        assert_eq!(to_volume(f64::NAN), 0.0);
        assert_eq!(to_brightness(f64::NAN), 0.05);
    }

    #[test]
    fn custom_bounds_are_respected() {
        let mapper = RangeMapper::new(
            RangeMap {
                min_dist: 0.1,
                max_dist: 0.2,
                min_out: 20.0,
                max_out: 80.0,
            },
            RangeMap::brightness(),
        );
        assert_eq!(mapper.to_volume(0.0), 20.0);
        assert!((mapper.to_volume(0.15) - 50.0).abs() < 1e-9);
        assert_eq!(mapper.to_volume(0.5), 80.0);
    }

    #[test]
    fn validate_rejects_inverted_ranges() {
        assert!(RangeMap::volume().validate("volume").is_ok());
        let inverted = RangeMap {
            min_dist: 0.4,
            max_dist: 0.05,
            ..RangeMap::volume()
        };
        assert!(inverted.validate("volume").is_err());
        let outputs = RangeMap {
            min_out: 1.0,
            max_out: 0.5,
            ..RangeMap::brightness()
        };
        assert!(outputs.validate("brightness").is_err());
    }
}
