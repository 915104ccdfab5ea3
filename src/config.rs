use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::actuate::{ActuatorBackend, DEFAULT_COMMAND_TIMEOUT};
use crate::mapping::{RangeMap, RangeMapper};
use crate::source::BoundaryFilter;

const DEFAULT_MIRROR_VIEW: bool = true;
const DEFAULT_SOURCE_URI: &str = "stub://camera";
const DEFAULT_MIN_SCORE: f32 = 0.7;
const DEFAULT_MAX_HANDS: usize = 2;
const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Deserialize, Default)]
struct GestureConfigFile {
    mirror_view: Option<bool>,
    mapping: Option<MappingConfigFile>,
    source: Option<SourceConfigFile>,
    actuators: Option<ActuatorConfigFile>,
    health: Option<HealthConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct MappingConfigFile {
    volume: Option<RangeMapFile>,
    brightness: Option<RangeMapFile>,
}

#[derive(Debug, Deserialize, Default)]
struct RangeMapFile {
    min_dist: Option<f64>,
    max_dist: Option<f64>,
    min_out: Option<f64>,
    max_out: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct SourceConfigFile {
    uri: Option<String>,
    command: Option<Vec<String>>,
    min_score: Option<f32>,
    max_hands: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
struct ActuatorConfigFile {
    backend: Option<String>,
    volume_command: Option<Vec<String>>,
    brightness_command: Option<Vec<String>>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct HealthConfigFile {
    interval_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// The capture is flipped before detection; raw side labels are swapped to match.
    pub mirror_view: bool,
    pub mapper: RangeMapper,
    pub source: SourceSettings,
    pub actuators: ActuatorSettings,
    pub health_interval: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    pub uri: String,
    /// Landmarker argv for `exec://` sources.
    pub command: Option<Vec<String>>,
    pub min_score: f32,
    pub max_hands: usize,
}

impl SourceSettings {
    pub fn filter(&self) -> BoundaryFilter {
        BoundaryFilter {
            min_score: self.min_score,
            max_hands: self.max_hands,
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            uri: DEFAULT_SOURCE_URI.to_string(),
            command: None,
            min_score: DEFAULT_MIN_SCORE,
            max_hands: DEFAULT_MAX_HANDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorSettings {
    pub backend: ActuatorBackend,
    pub volume_command: Option<Vec<String>>,
    pub brightness_command: Option<Vec<String>>,
    pub timeout: Duration,
}

impl Default for ActuatorSettings {
    fn default() -> Self {
        Self {
            backend: ActuatorBackend::for_host(),
            volume_command: None,
            brightness_command: None,
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            mirror_view: DEFAULT_MIRROR_VIEW,
            mapper: RangeMapper::default(),
            source: SourceSettings::default(),
            actuators: ActuatorSettings::default(),
            health_interval: Duration::from_secs(DEFAULT_HEALTH_INTERVAL_SECS),
        }
    }
}

impl GestureConfig {
    /// Load from `$GESTURE_CONFIG` (if set), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("GESTURE_CONFIG").ok();
        Self::load_from(config_path.as_deref().map(Path::new))
    }

    /// Load from an explicit file (if any), then apply environment overrides.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file_cfg = match path {
            Some(path) => Some(read_config_file(path)?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default())?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: GestureConfigFile) -> Result<Self> {
        let mapping = file.mapping.unwrap_or_default();
        let mapper = RangeMapper::new(
            merge_range(RangeMap::volume(), mapping.volume),
            merge_range(RangeMap::brightness(), mapping.brightness),
        );

        let source_file = file.source.unwrap_or_default();
        let source = SourceSettings {
            uri: source_file
                .uri
                .unwrap_or_else(|| DEFAULT_SOURCE_URI.to_string()),
            command: source_file.command,
            min_score: source_file.min_score.unwrap_or(DEFAULT_MIN_SCORE),
            max_hands: source_file.max_hands.unwrap_or(DEFAULT_MAX_HANDS),
        };

        let actuator_file = file.actuators.unwrap_or_default();
        let backend = match actuator_file.backend.as_deref() {
            Some(name) => name.parse()?,
            None => ActuatorBackend::for_host(),
        };
        let actuators = ActuatorSettings {
            backend,
            volume_command: actuator_file.volume_command,
            brightness_command: actuator_file.brightness_command,
            timeout: actuator_file
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_COMMAND_TIMEOUT),
        };

        let health_interval = Duration::from_secs(
            file.health
                .and_then(|health| health.interval_secs)
                .unwrap_or(DEFAULT_HEALTH_INTERVAL_SECS),
        );

        Ok(Self {
            mirror_view: file.mirror_view.unwrap_or(DEFAULT_MIRROR_VIEW),
            mapper,
            source,
            actuators,
            health_interval,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(mirror) = std::env::var("GESTURE_MIRROR") {
            if !mirror.trim().is_empty() {
                self.mirror_view = parse_bool(&mirror)
                    .ok_or_else(|| anyhow!("GESTURE_MIRROR must be a boolean (got '{}')", mirror))?;
            }
        }
        if let Ok(uri) = std::env::var("GESTURE_SOURCE") {
            if !uri.trim().is_empty() {
                self.source.uri = uri;
            }
        }
        if let Ok(command) = std::env::var("GESTURE_LANDMARKER") {
            let argv = split_args(&command);
            if !argv.is_empty() {
                self.source.command = Some(argv);
            }
        }
        if let Ok(score) = std::env::var("GESTURE_MIN_SCORE") {
            self.source.min_score = score
                .trim()
                .parse()
                .map_err(|_| anyhow!("GESTURE_MIN_SCORE must be a number between 0 and 1"))?;
        }
        if let Ok(backend) = std::env::var("GESTURE_ACTUATORS") {
            if !backend.trim().is_empty() {
                self.actuators.backend = backend.parse()?;
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.mapper.volume.validate("volume")?;
        self.mapper.brightness.validate("brightness")?;

        let volume = &self.mapper.volume;
        if volume.min_out < 0.0 || volume.max_out > 100.0 {
            return Err(anyhow!("volume output range must stay within 0..100"));
        }
        let brightness = &self.mapper.brightness;
        if brightness.min_out < 0.0 || brightness.max_out > 1.0 {
            return Err(anyhow!("brightness output range must stay within 0.0..1.0"));
        }

        if !(0.0..=1.0).contains(&self.source.min_score) {
            return Err(anyhow!("source min_score must be between 0 and 1"));
        }
        if self.source.max_hands == 0 {
            return Err(anyhow!("source max_hands must be at least 1"));
        }
        if self.actuators.timeout.is_zero() {
            return Err(anyhow!("actuator timeout must be greater than zero"));
        }
        if self.health_interval.is_zero() {
            return Err(anyhow!("health interval must be greater than zero"));
        }
        Ok(())
    }
}

fn merge_range(defaults: RangeMap, file: Option<RangeMapFile>) -> RangeMap {
    let Some(file) = file else {
        return defaults;
    };
    RangeMap {
        min_dist: file.min_dist.unwrap_or(defaults.min_dist),
        max_dist: file.max_dist.unwrap_or(defaults.max_dist),
        min_out: file.min_out.unwrap_or(defaults.min_out),
        max_out: file.max_out.unwrap_or(defaults.max_out),
    }
}

fn read_config_file(path: &Path) -> Result<GestureConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let cfg = if is_toml {
        toml::from_str(&raw).map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?
    } else {
        serde_json::from_str(&raw)
            .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?
    };
    Ok(cfg)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn split_args(value: &str) -> Vec<String> {
    value.split_whitespace().map(|arg| arg.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let cfg = GestureConfig::from_file(GestureConfigFile::default()).unwrap();
        assert!(cfg.mirror_view);
        assert_eq!(cfg.mapper, RangeMapper::default());
        assert_eq!(cfg.mapper.volume.min_dist, 0.05);
        assert_eq!(cfg.mapper.volume.max_dist, 0.4);
        assert_eq!(cfg.mapper.brightness.min_out, 0.05);
        assert_eq!(cfg.source.uri, "stub://camera");
        assert_eq!(cfg.source.max_hands, 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_range_overrides_keep_other_bounds() {
        let file: GestureConfigFile =
            serde_json::from_str(r#"{"mapping":{"volume":{"max_dist":0.3}}}"#).unwrap();
        let cfg = GestureConfig::from_file(file).unwrap();
        assert_eq!(cfg.mapper.volume.max_dist, 0.3);
        assert_eq!(cfg.mapper.volume.min_dist, 0.05);
        assert_eq!(cfg.mapper.volume.max_out, 100.0);
        assert_eq!(cfg.mapper.brightness, RangeMap::brightness());
    }

    #[test]
    fn validate_rejects_out_of_range_outputs() {
        let file: GestureConfigFile =
            serde_json::from_str(r#"{"mapping":{"brightness":{"max_out":1.5}}}"#).unwrap();
        let cfg = GestureConfig::from_file(file).unwrap();
        assert!(cfg.validate().is_err());

        let file: GestureConfigFile =
            serde_json::from_str(r#"{"source":{"max_hands":0}}"#).unwrap();
        let cfg = GestureConfig::from_file(file).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let file: GestureConfigFile =
            serde_json::from_str(r#"{"actuators":{"backend":"winapi"}}"#).unwrap();
        assert!(GestureConfig::from_file(file).is_err());
    }

    #[test]
    fn parses_booleans_and_args() {
        assert_eq!(parse_bool("On"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(
            split_args("  python3  landmarker.py --camera 0 "),
            vec!["python3", "landmarker.py", "--camera", "0"]
        );
    }
}
