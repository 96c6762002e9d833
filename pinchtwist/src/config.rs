//! Engine configuration loaded from an s-expression plist.
//!
//! ```text
//! (:pinch-start 0.7 :pinch-release 0.3 :require-high-confidence t
//!  :max-twist-angle 90 :min-angle-to-twist 5 :min-delta 0.01
//!  :angle-deadband 1 :slider-sensitivity 1 :slider-deadzone 0.0025
//!  :keyboard-increment 0.5)
//! ```
//!
//! Missing keys keep their defaults.

use std::path::Path;

use lexpr::Value;
use tracing::debug;

use crate::error::ConfigError;
use crate::gesture::keyboard::KeyboardTwistConfig;
use crate::gesture::pinch_twist::PinchTwistConfig;
use crate::sexp::{get_bool, get_keyword};
use crate::ui::slider::SliderConfig;

/// Everything the replay engine needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub twist: PinchTwistConfig,
    pub slider: SliderConfig,
    pub keyboard: KeyboardTwistConfig,
}

impl AppConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loading config");
        Self::from_sexp(&text)
    }

    /// Parse and validate a config plist.
    pub fn from_sexp(text: &str) -> Result<Self, ConfigError> {
        let value = lexpr::from_str(text)?;
        let mut config = Self::default();

        let twist = &mut config.twist;
        read_f32(&value, "pinch-start", &mut twist.pinch_start_strength)?;
        read_f32(&value, "pinch-release", &mut twist.pinch_release_strength)?;
        if let Some(b) = get_bool(&value, "require-high-confidence") {
            twist.require_high_confidence = b;
        }
        read_f32(&value, "max-twist-angle", &mut twist.max_twist_angle_deg)?;
        read_f32(&value, "min-angle-to-twist", &mut twist.min_angle_to_twist_deg)?;
        read_f32(&value, "min-delta", &mut twist.min_delta_normalized_to_fire)?;
        read_f32(&value, "angle-deadband", &mut twist.angle_deadband_deg)?;

        read_f32(&value, "slider-sensitivity", &mut config.slider.sensitivity)?;
        read_f32(&value, "slider-deadzone", &mut config.slider.deadzone)?;
        read_f32(
            &value,
            "keyboard-increment",
            &mut config.keyboard.increment_per_second,
        )?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.twist.validate()?;

        let finite = [
            ("slider-sensitivity", self.slider.sensitivity),
            ("slider-deadzone", self.slider.deadzone),
            ("keyboard-increment", self.keyboard.increment_per_second),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        if self.slider.deadzone < 0.0 {
            return Err(ConfigError::Negative {
                field: "slider-deadzone",
                value: self.slider.deadzone,
            });
        }
        Ok(())
    }

    /// Effective configuration as one plist.
    pub fn config_sexp(&self) -> String {
        let twist = self.twist.to_sexp();
        let twist = twist.trim_end_matches(')');
        format!(
            "{} :slider-sensitivity {:.3} :slider-deadzone {:.4} :keyboard-increment {:.3})",
            twist,
            self.slider.sensitivity,
            self.slider.deadzone,
            self.keyboard.increment_per_second,
        )
    }
}

fn read_f32(value: &Value, key: &'static str, slot: &mut f32) -> Result<(), ConfigError> {
    if let Some(raw) = get_keyword(value, key) {
        *slot = raw
            .parse::<f32>()
            .map_err(|_| ConfigError::NotANumber { key, raw })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plist_is_default() {
        let config = AppConfig::from_sexp("()").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_sexp(
            "(:pinch-start 0.8 :require-high-confidence nil :max-twist-angle 45 :slider-sensitivity 2)",
        )
        .unwrap();
        assert_eq!(config.twist.pinch_start_strength, 0.8);
        assert!(!config.twist.require_high_confidence);
        assert_eq!(config.twist.max_twist_angle_deg, 45.0);
        assert_eq!(config.slider.sensitivity, 2.0);
        assert_eq!(config.twist.pinch_release_strength, 0.3);
    }

    #[test]
    fn test_invalid_relationship_rejected() {
        let err = AppConfig::from_sexp("(:pinch-start 0.2 :pinch-release 0.4)").unwrap_err();
        assert!(matches!(err, ConfigError::StartBelowRelease { .. }), "got {:?}", err);
    }

    #[test]
    fn test_not_a_number() {
        let err = AppConfig::from_sexp("(:min-delta :lots)").unwrap_err();
        assert!(matches!(err, ConfigError::NotANumber { key: "min-delta", .. }));
    }

    #[test]
    fn test_malformed() {
        let err = AppConfig::from_sexp("(:pinch-start 0.8").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/pinchtwist.sexp")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_config_sexp() {
        let sexp = AppConfig::default().config_sexp();
        assert!(sexp.starts_with("(:pinch-start 0.70"));
        assert!(sexp.ends_with(":keyboard-increment 0.500)"));
        // Output reads back as the same config.
        let back = AppConfig::from_sexp(&sexp).unwrap();
        assert_eq!(back, AppConfig::default());
    }
}
