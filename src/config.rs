use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ColorbotConfig {
    pub capture: CaptureConfig,
    pub calibration: CalibrationConfig,
    pub engagement: EngagementConfig,
    pub health: HealthConfig,
    pub input: InputConfig,
    pub control: ControlConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Directory of frames replayed by the image sequence source
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Screen region (left, top, width, height)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<(u32, u32, u32, u32)>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CalibrationConfig {
    /// Player anchor in region-local pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<(i32, i32)>,

    /// Lower HSV bound (hue 0-179, saturation/value 0-255)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_lower: Option<(u8, u8, u8)>,

    /// Upper HSV bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_upper: Option<(u8, u8, u8)>,

    /// Sampled RGB target color, used when explicit bounds are absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rgb: Option<(u8, u8, u8)>,

    /// Relative tolerance applied to each HSV channel of `sample_rgb`
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EngagementConfig {
    /// Distance under which a stationary target may be attacked
    #[serde(default = "default_under_distance")]
    pub under_distance: f64,

    /// Maximum distance from a direction line to hold the attack modifier
    #[serde(default = "default_ctrl_hold_distance")]
    pub ctrl_hold_distance: f64,

    /// Length of each direction line
    #[serde(default = "default_line_length")]
    pub line_length: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HealthConfig {
    /// Sit down below this health
    #[serde(default = "default_low_threshold")]
    pub low_threshold: i32,

    /// Stand up above this health
    #[serde(default = "default_high_threshold")]
    pub high_threshold: i32,

    /// Address of the health value in the game process
    #[serde(default = "default_health_address")]
    pub address: u64,

    /// Name of the game process
    #[serde(default = "default_process_name")]
    pub process_name: String,

    /// Seconds after an attack during which sitting is suppressed
    #[serde(default = "default_recent_hold_secs")]
    pub recent_hold_secs: u64,

    /// Pause between releasing keys and sitting down, in milliseconds
    #[serde(default = "default_sit_grace_ms")]
    pub sit_grace_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InputConfig {
    /// How long a single key press is held, in milliseconds
    #[serde(default = "default_press_duration_ms")]
    pub press_duration_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ControlConfig {
    /// Sleep between ticks, in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Append-only event log file; empty disables it
    #[serde(default = "default_event_log")]
    pub event_log: String,
}

impl HealthConfig {
    pub fn recent_hold_window(&self) -> Duration {
        Duration::from_secs(self.recent_hold_secs)
    }

    pub fn sit_grace(&self) -> Duration {
        Duration::from_millis(self.sit_grace_ms)
    }
}

impl InputConfig {
    pub fn press_duration(&self) -> Duration {
        Duration::from_millis(self.press_duration_ms)
    }
}

impl ControlConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl LoggingConfig {
    pub fn event_log_path(&self) -> Option<&Path> {
        let path = self.event_log.trim();
        (!path.is_empty()).then(|| Path::new(path))
    }
}

impl ColorbotConfig {
    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            // Start with default values
            .set_default("capture.source_dir", default_source_dir())?
            .set_default("calibration.tolerance", default_tolerance() as f64)?
            .set_default("engagement.under_distance", default_under_distance())?
            .set_default(
                "engagement.ctrl_hold_distance",
                default_ctrl_hold_distance(),
            )?
            .set_default("engagement.line_length", default_line_length())?
            .set_default("health.low_threshold", default_low_threshold() as i64)?
            .set_default("health.high_threshold", default_high_threshold() as i64)?
            .set_default("health.address", default_health_address())?
            .set_default("health.process_name", default_process_name())?
            .set_default("health.recent_hold_secs", default_recent_hold_secs())?
            .set_default("health.sit_grace_ms", default_sit_grace_ms())?
            .set_default("input.press_duration_ms", default_press_duration_ms())?
            .set_default("control.tick_interval_ms", default_tick_interval_ms())?
            .set_default("logging.event_log", default_event_log())?
            // Add configuration file (optional)
            .add_source(File::with_name(&path_str).required(false))
            // Add environment variables, e.g. COLORBOT_HEALTH__LOW_THRESHOLD
            .add_source(
                Environment::with_prefix("COLORBOT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: ColorbotConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((_, _, width, height)) = self.capture.region {
            if width == 0 || height == 0 {
                return Err(ConfigError::Message(
                    "Capture region must have a non-zero size".to_string(),
                ));
            }
        }

        if !(0.0..=1.0).contains(&self.calibration.tolerance) {
            return Err(ConfigError::Message(
                "Calibration tolerance must be within 0.0 and 1.0".to_string(),
            ));
        }

        if self.engagement.under_distance <= 0.0
            || self.engagement.ctrl_hold_distance <= 0.0
            || self.engagement.line_length <= 0.0
        {
            return Err(ConfigError::Message(
                "Engagement distances must be greater than 0".to_string(),
            ));
        }

        if self.health.low_threshold >= self.health.high_threshold {
            return Err(ConfigError::Message(format!(
                "Health low threshold ({}) must be below high threshold ({})",
                self.health.low_threshold, self.health.high_threshold
            )));
        }

        if self.health.process_name.trim().is_empty() {
            return Err(ConfigError::Message(
                "Health process name must not be empty".to_string(),
            ));
        }

        if self.control.tick_interval_ms == 0 {
            return Err(ConfigError::Message(
                "Control tick interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ColorbotConfig {
    fn default() -> Self {
        Self {
            capture: CaptureConfig {
                source_dir: default_source_dir(),
                region: None,
            },
            calibration: CalibrationConfig {
                center: None,
                color_lower: None,
                color_upper: None,
                sample_rgb: None,
                tolerance: default_tolerance(),
            },
            engagement: EngagementConfig {
                under_distance: default_under_distance(),
                ctrl_hold_distance: default_ctrl_hold_distance(),
                line_length: default_line_length(),
            },
            health: HealthConfig {
                low_threshold: default_low_threshold(),
                high_threshold: default_high_threshold(),
                address: default_health_address(),
                process_name: default_process_name(),
                recent_hold_secs: default_recent_hold_secs(),
                sit_grace_ms: default_sit_grace_ms(),
            },
            input: InputConfig {
                press_duration_ms: default_press_duration_ms(),
            },
            control: ControlConfig {
                tick_interval_ms: default_tick_interval_ms(),
            },
            logging: LoggingConfig {
                event_log: default_event_log(),
            },
        }
    }
}

// Default value functions
fn default_source_dir() -> String {
    "./frames".to_string()
}
fn default_tolerance() -> f32 {
    0.05
}

fn default_under_distance() -> f64 {
    90.0
}
fn default_ctrl_hold_distance() -> f64 {
    50.0
}
fn default_line_length() -> f64 {
    250.0
}

fn default_low_threshold() -> i32 {
    150
}
fn default_high_threshold() -> i32 {
    280
}
fn default_health_address() -> u64 {
    0x028F_C400
}
fn default_process_name() -> String {
    "Endless.exe".to_string()
}
fn default_recent_hold_secs() -> u64 {
    3
}
fn default_sit_grace_ms() -> u64 {
    1000
}

fn default_press_duration_ms() -> u64 {
    50
}
fn default_tick_interval_ms() -> u64 {
    100
}
fn default_event_log() -> String {
    "colorbot.log".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ColorbotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engagement.under_distance, 90.0);
        assert_eq!(config.health.address, 0x028F_C400);
        assert_eq!(config.control.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.health.recent_hold_window(), Duration::from_secs(3));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ColorbotConfig::load_from_file(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ColorbotConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[capture]
region = [10, 20, 640, 480]

[calibration]
center = [320, 240]
color_lower = [0, 150, 150]
color_upper = [10, 255, 255]

[health]
low_threshold = 100
high_threshold = 200
"#
        )
        .unwrap();

        let config = ColorbotConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.capture.region, Some((10, 20, 640, 480)));
        assert_eq!(config.calibration.center, Some((320, 240)));
        assert_eq!(config.calibration.color_lower, Some((0, 150, 150)));
        assert_eq!(config.health.low_threshold, 100);
        assert_eq!(config.health.high_threshold, 200);
        // Untouched sections keep defaults
        assert_eq!(config.engagement.line_length, 250.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ColorbotConfig::default();

        config.health.low_threshold = 300;
        assert!(config.validate().is_err());
        config.health.low_threshold = 150;

        config.control.tick_interval_ms = 0;
        assert!(config.validate().is_err());
        config.control.tick_interval_ms = 100;

        config.capture.region = Some((0, 0, 0, 100));
        assert!(config.validate().is_err());
        config.capture.region = Some((0, 0, 100, 100));

        config.engagement.ctrl_hold_distance = 0.0;
        assert!(config.validate().is_err());
        config.engagement.ctrl_hold_distance = 50.0;

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_event_log_path() {
        let mut logging = LoggingConfig {
            event_log: "colorbot.log".to_string(),
        };
        assert_eq!(logging.event_log_path(), Some(Path::new("colorbot.log")));

        logging.event_log = "  ".to_string();
        assert_eq!(logging.event_log_path(), None);
    }

    #[test]
    fn test_default_config_serializes() {
        let rendered = toml::to_string_pretty(&ColorbotConfig::default()).unwrap();
        assert!(rendered.contains("[engagement]"));
        assert!(rendered.contains("under_distance = 90.0"));
        assert!(!rendered.contains("center"));
    }
}
