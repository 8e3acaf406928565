//! Turns raw steering into the next heading.
//!
//! The combined (or jittered) heading is blended with the previous heading by
//! exponential smoothing and rescaled so every boid always moves exactly
//! `velocity` pixels per tick.

use rand::Rng;

use crate::config::SimulationConfig;
use crate::rules::Steering;
use crate::vector::{Vector2D, EPSILON};

/// Result of integrating one boid's heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingUpdate {
    pub heading: Vector2D,
    /// The smoothed vector cancelled out and the previous heading was kept.
    pub degenerate: bool,
}

/// Weighted sum of the three rule vectors.
pub fn combine(steering: &Steering, config: &SimulationConfig) -> Vector2D {
    steering.cohesion * config.cohesion_weight
        + steering.alignment * config.align_weight
        + steering.separation * config.separation_weight
}

/// Uniform turn angle in radians within `±max_degrees`.
///
/// Draws nothing from `rng` when the bound is zero.
pub fn sample_jitter<R: Rng + ?Sized>(max_degrees: f64, rng: &mut R) -> f64 {
    if max_degrees > 0.0 {
        rng.gen_range(-max_degrees..=max_degrees).to_radians()
    } else {
        0.0
    }
}

/// `weight * raw + (1 - weight) * previous`
pub fn smooth(raw: Vector2D, previous: Vector2D, weight: f64) -> Vector2D {
    raw * weight + previous * (1.0 - weight)
}

/// `heading` rescaled to `velocity`, or unchanged when it already has that
/// speed or has no direction to keep.
pub(crate) fn at_speed(heading: Vector2D, velocity: f64) -> Vector2D {
    if (heading.magnitude() - velocity).abs() <= EPSILON * velocity {
        return heading;
    }
    heading
        .normalize()
        .map(|direction| direction * velocity)
        .unwrap_or(heading)
}

/// Compute the boid's next heading.
///
/// With neighbors the raw heading is the weighted rule sum; without, it is the
/// previous heading turned by `jitter` radians.
pub fn next_heading(
    previous: Vector2D,
    steering: &Steering,
    has_neighbors: bool,
    jitter: f64,
    config: &SimulationConfig,
) -> HeadingUpdate {
    let raw = if has_neighbors {
        combine(steering, config)
    } else if jitter == 0.0 {
        // Keeps a lone boid with no jitter on an exactly straight line.
        return HeadingUpdate {
            heading: at_speed(previous, config.velocity),
            degenerate: false,
        };
    } else {
        previous.rotate(jitter)
    };

    let smoothed = smooth(raw, previous, config.smoothing_weight);

    // Degeneracy is judged relative to velocity.
    match (smoothed / config.velocity).normalize() {
        Ok(direction) => HeadingUpdate {
            heading: direction * config.velocity,
            degenerate: false,
        },
        Err(_) => HeadingUpdate {
            heading: at_speed(previous, config.velocity),
            degenerate: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config() -> SimulationConfig {
        SimulationConfig {
            velocity: 2.0,
            align_weight: 1.0,
            cohesion_weight: 0.5,
            separation_weight: 2.0,
            smoothing_weight: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_combine_weights_rules() {
        let steering = Steering {
            cohesion: Vector2D::new(2.0, 0.0),
            alignment: Vector2D::new(0.0, 1.0),
            separation: Vector2D::new(-1.0, 1.0),
        };
        assert_eq!(combine(&steering, &config()), Vector2D::new(-1.0, 3.0));
    }

    #[test]
    fn test_heading_is_rescaled_to_velocity() {
        let steering = Steering {
            cohesion: Vector2D::new(30.0, 40.0),
            ..Default::default()
        };
        let update = next_heading(Vector2D::new(2.0, 0.0), &steering, true, 0.0, &config());
        assert!(!update.degenerate);
        assert!((update.heading.magnitude() - 2.0).abs() < 1e-12);
        assert!((update.heading.x - 1.2).abs() < 1e-12);
        assert!((update.heading.y - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_smoothing_blends_with_previous() {
        let config = SimulationConfig {
            smoothing_weight: 0.5,
            ..config()
        };
        let steering = Steering {
            alignment: Vector2D::new(0.0, 2.0),
            ..Default::default()
        };
        // 0.5 * (0, 2) + 0.5 * (2, 0) = (1, 1)
        let update = next_heading(Vector2D::new(2.0, 0.0), &steering, true, 0.0, &config);
        assert!((update.heading.bearing_degrees() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancelled_heading_keeps_previous() {
        let previous = Vector2D::new(1.0, 0.0);
        let steering = Steering {
            alignment: Vector2D::new(-2.0, 0.0),
            ..Default::default()
        };
        let config = SimulationConfig {
            velocity: 1.0,
            smoothing_weight: 1.0 / 3.0,
            ..config()
        };

        let update = next_heading(previous, &steering, true, 0.0, &config);
        assert!(update.degenerate);
        assert_eq!(update.heading, previous);
    }

    #[test]
    fn test_isolated_boid_turns_by_jitter_only() {
        let previous = Vector2D::from_bearing(100.0) * 2.0;
        let steering = Steering {
            cohesion: Vector2D::new(500.0, 500.0),
            ..Default::default()
        };
        let config = SimulationConfig {
            smoothing_weight: 0.3,
            ..config()
        };

        let update = next_heading(previous, &steering, false, 4f64.to_radians(), &config);
        let turned = previous.angle_to(&update.heading).abs().to_degrees();
        assert!(turned <= 4.0 + 1e-9);
        assert!(turned > 0.0);

        let straight = next_heading(previous, &steering, false, 0.0, &config);
        assert!((straight.heading - previous).magnitude() < 1e-12);
    }

    #[test]
    fn test_kept_heading_is_held_at_velocity() {
        let config = SimulationConfig {
            velocity: 10.0,
            jitter_degrees: 0.0,
            ..config()
        };
        let slow = Vector2D::new(1.0, 0.0);

        let straight = next_heading(slow, &Steering::default(), false, 0.0, &config);
        assert_eq!(straight.heading, Vector2D::new(10.0, 0.0));

        let cancelled = Steering {
            alignment: Vector2D::new(-2.0, 0.0),
            ..Default::default()
        };
        let config = SimulationConfig {
            smoothing_weight: 2.0 / 3.0,
            ..config
        };
        // 2/3 * (-2, 0) + 1/3 * (4, 0) is zero.
        let update = next_heading(Vector2D::new(4.0, 0.0), &cancelled, true, 0.0, &config);
        assert!(update.degenerate);
        assert!((update.heading - Vector2D::new(10.0, 0.0)).magnitude() < 1e-12);
    }

    #[test]
    fn test_tiny_velocity_is_not_degenerate() {
        let config = SimulationConfig {
            velocity: 1e-10,
            smoothing_weight: 0.5,
            ..config()
        };
        let previous = Vector2D::from_bearing(45.0) * config.velocity;

        let update = next_heading(previous, &Steering::default(), false, 3f64.to_radians(), &config);
        assert!(!update.degenerate);
        assert!((update.heading.magnitude() - config.velocity).abs() <= 1e-9 * config.velocity);
        assert!(previous.angle_to(&update.heading).abs() > 0.0);
    }

    #[test]
    fn test_sample_jitter_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let angle = sample_jitter(5.0, &mut rng);
            assert!(angle.abs() <= 5f64.to_radians());
        }
        assert_eq!(sample_jitter(0.0, &mut rng), 0.0);
    }
}
