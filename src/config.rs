//! Follower configuration, loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::channel::ChannelConfig;
use crate::control::{SpeedProfile, SteeringConfig};
use crate::error::ConfigError;
use crate::tracker::AcquisitionConfig;

/// Camera settings. Advisory: the frame source enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 20,
        }
    }
}

/// Which kind of target the follower chases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Fiducial marker
    Marker,
    /// Pedestrian silhouette
    Pedestrian,
    /// Body keypoints from a pose network
    Keypoint,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowerConfig {
    /// Camera stream address
    pub stream_url: String,
    pub frame: FrameConfig,
    pub acquisition: AcquisitionConfig,
    pub steering: SteeringConfig,
    pub channel: ChannelConfig,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            stream_url: "http://10.6.9.97:4747/video".to_string(),
            frame: FrameConfig::default(),
            acquisition: AcquisitionConfig::default(),
            steering: SteeringConfig::default(),
            channel: ChannelConfig::default(),
        }
    }
}

impl FollowerConfig {
    /// Tuned defaults for one kind of target.
    pub fn for_variant(variant: Variant) -> Self {
        let mut config = Self::default();
        match variant {
            Variant::Marker => {
                config.acquisition.redetect_after = 20;
                config.acquisition.min_confidence = None;
            }
            Variant::Pedestrian => {
                config.acquisition.redetect_after = 10;
                config.acquisition.min_confidence = Some(0.5);
            }
            Variant::Keypoint => {
                config.acquisition.redetect_after = 10;
                config.acquisition.min_confidence = Some(0.1);
                config.acquisition.oversize_ratio = 0.33;
                config.steering.profile = SpeedProfile::Constant { speed: 0.6 };
            }
        }
        config
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.as_ref().display(), e)))?;

        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(ConfigError::invalid(
                "frame",
                "Width and height must be greater than 0",
            ));
        }

        let ratio = self.acquisition.oversize_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::invalid(
                "acquisition.oversize_ratio",
                "Ratio must be in (0, 1]",
            ));
        }

        if let Some(confidence) = self.acquisition.min_confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(ConfigError::invalid(
                    "acquisition.min_confidence",
                    "Confidence must be between 0.0 and 1.0",
                ));
            }
        }

        if self.channel.enabled && self.channel.endpoint.is_empty() {
            return Err(ConfigError::invalid(
                "channel.endpoint",
                "An enabled channel needs an endpoint",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FollowerConfig::default();
        assert_eq!(config.frame.width, 640);
        assert_eq!(config.frame.height, 480);
        assert_eq!(config.acquisition.oversize_ratio, 1.0 / 3.0);
        assert_eq!(
            config.steering.profile,
            SpeedProfile::Proportional {
                base: 0.8,
                max: 0.3
            }
        );
        assert!(config.channel.enabled);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_toml() {
        let config = FollowerConfig::from_toml(
            r#"
            [acquisition]
            min_confidence = 0.5
            redetect_after = 10

            [steering.profile]
            kind = "constant"
            speed = 0.6

            [channel]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.acquisition.min_confidence, Some(0.5));
        assert_eq!(config.acquisition.redetect_after, 10);
        assert_eq!(config.acquisition.oversize_ratio, 1.0 / 3.0);
        assert_eq!(
            config.steering.profile,
            SpeedProfile::Constant { speed: 0.6 }
        );
        assert!(!config.channel.enabled);
        assert_eq!(config.frame.width, 640);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            FollowerConfig::from_toml("[frame]\nwidth = 0"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            FollowerConfig::from_toml("[acquisition]\nmin_confidence = 1.5"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            FollowerConfig::from_toml("[acquisition]\noversize_ratio = 0.0"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            FollowerConfig::from_toml("frame = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_variants() {
        let marker = FollowerConfig::for_variant(Variant::Marker);
        assert_eq!(marker.acquisition.min_confidence, None);
        assert_eq!(marker.acquisition.redetect_after, 20);
        assert!((marker.acquisition.oversize_ratio - 1.0 / 3.0).abs() < 1e-12);

        let pedestrian = FollowerConfig::for_variant(Variant::Pedestrian);
        assert_eq!(pedestrian.acquisition.min_confidence, Some(0.5));
        assert_eq!(pedestrian.acquisition.redetect_after, 10);

        let keypoint = FollowerConfig::for_variant(Variant::Keypoint);
        assert_eq!(keypoint.acquisition.min_confidence, Some(0.1));
        assert_eq!(keypoint.acquisition.oversize_ratio, 0.33);
        assert_eq!(
            keypoint.steering.profile,
            SpeedProfile::Constant { speed: 0.6 }
        );
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            FollowerConfig::from_file("/nonexistent/follower.toml"),
            Err(ConfigError::Read(_))
        ));
    }
}
