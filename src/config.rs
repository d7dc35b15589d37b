//! Heatmap Configuration
//!
//! One immutable structure carries every knob of the pipeline. Defaults match
//! the reference deployment; environment variables can override them.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// An 8-bit-per-channel colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Highest intensity level a count can be bucketed into.
pub const MAX_LEVEL: u8 = 5;

/// Level-to-colour lookup. Level 0 is always black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTable([Rgb; MAX_LEVEL as usize + 1]);

impl ColorTable {
    /// Greens, from a pale tint for light days to a deep shade for the busiest.
    pub const GREENS: ColorTable = ColorTable([
        Rgb::BLACK,
        Rgb::new(144, 238, 144),
        Rgb::new(0, 200, 0),
        Rgb::new(0, 128, 0),
        Rgb::new(0, 100, 0),
        Rgb::new(0, 64, 0),
    ]);

    /// Builds a table from the five non-zero level colours.
    pub const fn from_levels(levels: [Rgb; MAX_LEVEL as usize]) -> Self {
        ColorTable([
            Rgb::BLACK, levels[0], levels[1], levels[2], levels[3], levels[4],
        ])
    }

    /// Colour for `level`; anything above the top level uses the top colour.
    pub fn color(&self, level: u8) -> Rgb {
        self.0[level.min(MAX_LEVEL) as usize]
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::GREENS
    }
}

/// Configuration for the heatmap pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    /// Host running the AnkiConnect add-on
    pub anki_host: String,
    /// AnkiConnect port
    pub anki_port: u16,
    /// Trailing days shown on the grid
    pub window_days: usize,
    /// Display brightness in `[0, 1]`
    pub brightness: f32,
    /// Client-side bound on the history request
    pub request_timeout: Duration,
    /// Treat a non-null `error` field in the response as a failed fetch
    pub strict_api_errors: bool,
    pub colors: ColorTable,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            anki_host: "DESKTOP-028KM9I.local".to_string(),
            anki_port: 8765,
            window_days: 119,
            brightness: 1.0,
            request_timeout: Duration::from_secs(5),
            strict_api_errors: true,
            colors: ColorTable::GREENS,
        }
    }
}

impl HeatmapConfig {
    /// Dimmed preset for displays that sit next to a bed or monitor.
    pub fn dimmed() -> Self {
        Self {
            brightness: 0.1,
            ..Self::default()
        }
    }

    /// Default configuration overlaid with `HEATMAP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HEATMAP_ANKI_HOST") {
            config.anki_host = host;
        }
        if let Some(port) = parse_var(&lookup, "HEATMAP_ANKI_PORT")? {
            config.anki_port = port;
        }
        if let Some(days) = parse_var(&lookup, "HEATMAP_WINDOW_DAYS")? {
            config.window_days = days;
        }
        if let Some(brightness) = parse_var(&lookup, "HEATMAP_BRIGHTNESS")? {
            config.brightness = brightness;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "HEATMAP_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(strict) = parse_var(&lookup, "HEATMAP_STRICT_API_ERRORS")? {
            config.strict_api_errors = strict;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_days == 0 {
            return Err(ConfigError::OutOfRange {
                key: "HEATMAP_WINDOW_DAYS",
                reason: "window must cover at least one day".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.brightness) {
            return Err(ConfigError::OutOfRange {
                key: "HEATMAP_BRIGHTNESS",
                reason: format!("{} is outside [0, 1]", self.brightness),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::OutOfRange {
                key: "HEATMAP_TIMEOUT_SECS",
                reason: "timeout must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// AnkiConnect endpoint URL.
    pub fn anki_url(&self) -> String {
        format!("http://{}:{}", self.anki_host, self.anki_port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Parse { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_reference_deployment() {
        let config = HeatmapConfig::default();
        assert_eq!(config.window_days, 119);
        assert_eq!(config.brightness, 1.0);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.anki_url(), "http://DESKTOP-028KM9I.local:8765");
        assert_eq!(HeatmapConfig::dimmed().brightness, 0.1);
    }

    #[test]
    fn test_color_table_shape() {
        let table = ColorTable::default();
        assert_eq!(table.color(0), Rgb::BLACK);
        assert_eq!(table.color(1), Rgb::new(144, 238, 144));
        assert_eq!(table.color(5), Rgb::new(0, 64, 0));
        assert_eq!(table.color(9), table.color(5));

        let custom = ColorTable::from_levels([Rgb::new(1, 1, 1); 5]);
        assert_eq!(custom.color(0), Rgb::BLACK);
    }

    #[test]
    fn test_env_overrides() {
        let config = HeatmapConfig::from_lookup(lookup_from(&[
            ("HEATMAP_ANKI_HOST", "localhost"),
            ("HEATMAP_ANKI_PORT", "9000"),
            ("HEATMAP_WINDOW_DAYS", "14"),
            ("HEATMAP_BRIGHTNESS", "0.1"),
            ("HEATMAP_TIMEOUT_SECS", "2"),
            ("HEATMAP_STRICT_API_ERRORS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.anki_url(), "http://localhost:9000");
        assert_eq!(config.window_days, 14);
        assert_eq!(config.brightness, 0.1);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert!(!config.strict_api_errors);
    }

    #[test]
    fn test_env_rejects_bad_values() {
        let err = HeatmapConfig::from_lookup(lookup_from(&[("HEATMAP_WINDOW_DAYS", "lots")]));
        assert!(matches!(err, Err(ConfigError::Parse { key: "HEATMAP_WINDOW_DAYS", .. })));

        let err = HeatmapConfig::from_lookup(lookup_from(&[("HEATMAP_WINDOW_DAYS", "0")]));
        assert!(matches!(err, Err(ConfigError::OutOfRange { .. })));

        let err = HeatmapConfig::from_lookup(lookup_from(&[("HEATMAP_BRIGHTNESS", "1.5")]));
        assert!(matches!(err, Err(ConfigError::OutOfRange { key: "HEATMAP_BRIGHTNESS", .. })));
    }
}
