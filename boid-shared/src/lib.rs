#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use boid_core::{ConfigError, Flock, SimulationConfig};
use serde::{Deserialize, Serialize};

/// An sRGB colour
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Run settings as read from a settings file.
///
/// Every field has a default, so a file only needs the values it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    pub width: f64,
    pub height: f64,
    pub num_boids: usize,
    pub view_range_px: f64,
    /// Pixels per frame
    pub velocity: f64,
    pub align_weight: f64,
    pub cohesion_weight: f64,
    pub separation_weight: f64,
    pub smoothing_weight: f64,
    pub jitter_degrees: f64,
    /// Fixed seed for a reproducible run; drawn at startup when absent.
    pub seed: Option<u64>,
    pub frame_rate: u32,
    pub background_colour: Rgb,
    pub boid_colour: Rgb,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        let core = SimulationConfig::default();
        Self {
            width: core.width,
            height: core.height,
            num_boids: core.num_boids,
            view_range_px: core.view_range,
            velocity: core.velocity,
            align_weight: core.align_weight,
            cohesion_weight: core.cohesion_weight,
            separation_weight: core.separation_weight,
            smoothing_weight: core.smoothing_weight,
            jitter_degrees: core.jitter_degrees,
            seed: None,
            frame_rate: 24,
            background_colour: Rgb(0, 0, 64),
            boid_colour: Rgb(255, 255, 255),
        }
    }
}

impl SimulationSettings {
    pub fn to_config(&self) -> SimulationConfig {
        SimulationConfig {
            width: self.width,
            height: self.height,
            num_boids: self.num_boids,
            view_range: self.view_range_px,
            velocity: self.velocity,
            align_weight: self.align_weight,
            cohesion_weight: self.cohesion_weight,
            separation_weight: self.separation_weight,
            smoothing_weight: self.smoothing_weight,
            jitter_degrees: self.jitter_degrees,
        }
    }

    /// Check everything the core checks, plus the frame rate.
    pub fn validate(&self) -> Result<SimulationConfig, SettingsError> {
        let config = self.to_config();
        config.validate().map_err(SettingsError::Invalid)?;
        if self.frame_rate == 0 {
            return Err(SettingsError::ZeroFrameRate);
        }
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(SettingsError::Parse)
    }

    /// Read settings from a JSON file.
    #[cfg(feature = "std")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(SettingsError::Io)?;
        Self::from_json_str(&text)
    }
}

/// Errors raised while loading or checking settings.
#[derive(Debug)]
pub enum SettingsError {
    #[cfg(feature = "std")]
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(ConfigError),
    ZeroFrameRate,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "std")]
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "malformed settings: {}", e),
            SettingsError::Invalid(e) => write!(f, "invalid settings: {}", e),
            SettingsError::ZeroFrameRate => write!(f, "invalid settings: frame rate must be at least 1"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(e) => Some(e),
            SettingsError::ZeroFrameRate => None,
        }
    }
}

/// One boid as the renderer needs it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoidState {
    pub x: f64,
    pub y: f64,
    /// Degrees clockwise from +y
    pub bearing: f64,
}

/// Everything handed to the renderer for one frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub boids: Vec<BoidState>,
}

impl FrameSnapshot {
    pub fn capture(tick: u64, flock: &Flock) -> Self {
        let boids = flock
            .iter()
            .map(|boid| BoidState {
                x: boid.position.x,
                y: boid.position.y,
                bearing: boid.bearing_degrees(),
            })
            .collect();
        Self { tick, boids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boid_core::{Boid, Vector2D};

    #[test]
    fn test_defaults_match_core() {
        let settings = SimulationSettings::default();
        assert_eq!(settings.to_config(), SimulationConfig::default());
        assert_eq!(settings.frame_rate, 24);
        assert_eq!(settings.background_colour, Rgb(0, 0, 64));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = SimulationSettings::from_json_str(
            r#"{ "num_boids": 80, "seed": 7, "boid_colour": [255, 0, 0] }"#,
        )
        .unwrap();
        assert_eq!(settings.num_boids, 80);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.boid_colour, Rgb(255, 0, 0));
        assert_eq!(settings.width, 1024.0);
    }

    #[test]
    fn test_validate() {
        let settings = SimulationSettings {
            velocity: -3.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid(ConfigError::InvalidVelocity(_)))
        ));

        let settings = SimulationSettings {
            frame_rate: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::ZeroFrameRate)));

        assert!(SimulationSettings::default().validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = SimulationSettings::from_json_str("{ \"width\": \"wide\" }").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("malformed settings"));
    }

    #[test]
    fn test_frame_capture() {
        let flock = Flock::from(vec![
            Boid::new(Vector2D::new(1.0, 2.0), Vector2D::new(10.0, 0.0)),
            Boid::new(Vector2D::new(3.0, 4.0), Vector2D::new(0.0, -10.0)),
        ]);
        let frame = FrameSnapshot::capture(9, &flock);
        assert_eq!(frame.tick, 9);
        assert_eq!(frame.boids.len(), 2);
        assert_eq!(frame.boids[0].x, 1.0);
        assert!((frame.boids[0].bearing - 90.0).abs() < 1e-9);
        assert!((frame.boids[1].bearing - 180.0).abs() < 1e-9);

        let json = serde_json::to_string(&frame).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
    }
}
