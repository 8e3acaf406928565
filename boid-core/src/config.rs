use crate::error::ConfigError;

/// Configuration for a simulation run. Read-only once the run starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub width: f64,
    pub height: f64,
    pub num_boids: usize,
    /// Neighbor distance in pixels, inclusive.
    pub view_range: f64,
    /// Pixels travelled per tick by every boid.
    pub velocity: f64,
    pub align_weight: f64,
    pub cohesion_weight: f64,
    pub separation_weight: f64,
    /// Share of the freshly computed heading kept each tick, in (0, 1].
    pub smoothing_weight: f64,
    /// Largest turn, in degrees, an isolated boid makes per tick.
    pub jitter_degrees: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 576.0,
            num_boids: 30,
            view_range: 100.0,
            velocity: 10.0,
            align_weight: 0.4,
            cohesion_weight: 0.4,
            separation_weight: 0.2,
            smoothing_weight: 0.5,
            jitter_degrees: 5.0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::InvalidArena {
                width: self.width,
                height: self.height,
            });
        }
        if self.num_boids == 0 {
            return Err(ConfigError::NoBoids);
        }
        if !positive(self.velocity) {
            return Err(ConfigError::InvalidVelocity(self.velocity));
        }
        if !self.view_range.is_finite() || self.view_range < 0.0 {
            return Err(ConfigError::InvalidViewRange(self.view_range));
        }
        if !(self.smoothing_weight > 0.0 && self.smoothing_weight <= 1.0) {
            return Err(ConfigError::SmoothingOutOfRange(self.smoothing_weight));
        }
        if !self.jitter_degrees.is_finite() || self.jitter_degrees < 0.0 {
            return Err(ConfigError::InvalidJitter(self.jitter_degrees));
        }

        for (name, value) in [
            ("align weight", self.align_weight),
            ("cohesion weight", self.cohesion_weight),
            ("separation weight", self.separation_weight),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_empty_flock() {
        let config = SimulationConfig {
            num_boids: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoBoids));
    }

    #[test]
    fn test_rejects_bad_velocity() {
        for velocity in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SimulationConfig {
                velocity,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidVelocity(_))
            ));
        }
    }

    #[test]
    fn test_smoothing_bounds() {
        for smoothing_weight in [0.0, -0.1, 1.01, f64::NAN] {
            let config = SimulationConfig {
                smoothing_weight,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::SmoothingOutOfRange(_))
            ));
        }

        let config = SimulationConfig {
            smoothing_weight: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_arena_and_ranges() {
        let config = SimulationConfig {
            height: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidArena { .. })
        ));

        let config = SimulationConfig {
            view_range: -5.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidViewRange(-5.0)));

        let config = SimulationConfig {
            jitter_degrees: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidJitter(-1.0)));

        let config = SimulationConfig {
            cohesion_weight: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteWeight {
                name: "cohesion weight",
                ..
            })
        ));
    }
}
