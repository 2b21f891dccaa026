//! Controller configuration loading and validation.
//!
//! The per-frame step never validates tunables; call [`ControllerConfig::validate`] once after
//! loading. `from_toml_str`/`from_file` do it for you.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision::ResolverConfig;
use crate::motion::MovementConfig;

/// Everything needed to build a [`PlatformerController`](crate::PlatformerController).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub movement: MovementConfig,
    pub resolver: ResolverConfig,
}

/// Errors that can occur when loading or validating a controller configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

impl ControllerConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded controller config from {}", path.display());
        Ok(config)
    }

    /// Reject tunables that would make the step divide by zero or produce non-finite motion.
    ///
    /// Ray counts below 2 are not rejected; the resolver raises them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        let r = &self.resolver;

        let finite: [(&'static str, f32); 23] = [
            ("movement.move_speed", m.move_speed),
            ("movement.accel_grounded", m.accel_grounded),
            ("movement.decel_grounded", m.decel_grounded),
            ("movement.accel_airborne", m.accel_airborne),
            ("movement.decel_airborne", m.decel_airborne),
            ("movement.max_jump_height", m.max_jump_height),
            ("movement.min_jump_height", m.min_jump_height),
            ("movement.time_to_jump_apex", m.time_to_jump_apex),
            ("movement.jump_grace_time", m.jump_grace_time),
            ("movement.jump_buffer_time", m.jump_buffer_time),
            ("movement.half_gravity_threshold", m.half_gravity_threshold),
            ("movement.wall_jump_toward.x", m.wall_jump_toward.x),
            ("movement.wall_jump_toward.y", m.wall_jump_toward.y),
            ("movement.wall_jump_neutral.x", m.wall_jump_neutral.x),
            ("movement.wall_jump_neutral.y", m.wall_jump_neutral.y),
            ("movement.wall_jump_away.x", m.wall_jump_away.x),
            ("movement.wall_jump_away.y", m.wall_jump_away.y),
            ("movement.wall_stick_time", m.wall_stick_time),
            ("movement.wall_slide_max_speed", m.wall_slide_max_speed),
            ("movement.terminal_velocity", m.terminal_velocity),
            ("resolver.skin_width", r.skin_width),
            ("resolver.upward_corner_correction", r.upward_corner_correction),
            ("resolver.corner_sweep_step", r.corner_sweep_step),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }

        let positive = [
            ("movement.accel_grounded", m.accel_grounded),
            ("movement.decel_grounded", m.decel_grounded),
            ("movement.accel_airborne", m.accel_airborne),
            ("movement.decel_airborne", m.decel_airborne),
            ("movement.time_to_jump_apex", m.time_to_jump_apex),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }

        let non_negative = [
            ("movement.min_jump_height", m.min_jump_height),
            ("resolver.skin_width", r.skin_width),
            ("resolver.upward_corner_correction", r.upward_corner_correction),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        if r.upward_corner_correction > 0.0 && r.corner_sweep_step <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "resolver.corner_sweep_step",
                reason: "must be greater than zero when corner correction is enabled",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionLayer, LayerMask};

    #[test]
    fn empty_document_yields_defaults() {
        let config = ControllerConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let text = r#"
            [movement]
            move_speed = 8.0
            wall_jump_away = { x = 20.0, y = 15.0 }

            [resolver]
            horizontal_ray_count = 6
            collision_mask = 1
        "#;
        let config = ControllerConfig::from_toml_str(text).expect("config parses");

        assert_eq!(config.movement.move_speed, 8.0);
        assert_eq!(config.movement.wall_jump_away.x, 20.0);
        assert_eq!(config.movement.max_jump_height, 4.5);
        assert_eq!(config.resolver.horizontal_ray_count, 6);
        assert_eq!(config.resolver.vertical_ray_count, 4);
        assert_eq!(
            config.resolver.collision_mask,
            LayerMask::of(&[CollisionLayer::Ground])
        );
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ControllerConfig::from_toml_str("[movement\nmove_speed = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_ramp_time_is_rejected() {
        let err = ControllerConfig::from_toml_str("[movement]\naccel_grounded = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "movement.accel_grounded",
                ..
            }
        ));
    }

    #[test]
    fn negative_skin_and_non_finite_values_are_rejected() {
        let mut config = ControllerConfig::default();
        config.resolver.skin_width = -0.01;
        assert!(config.validate().is_err());

        let mut config = ControllerConfig::default();
        config.movement.terminal_velocity = f32::INFINITY;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid `movement.terminal_velocity`: must be finite"
        );
    }

    #[test]
    fn low_ray_counts_are_accepted() {
        let mut config = ControllerConfig::default();
        config.resolver.horizontal_ray_count = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ControllerConfig::from_file(Path::new("/nonexistent/kinematic.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
