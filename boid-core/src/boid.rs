use alloc::vec::Vec;

use rand::Rng;

use crate::config::SimulationConfig;
use crate::vector::Vector2D;

/// A single boid entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    /// Per-tick displacement; its magnitude is the configured velocity.
    pub heading: Vector2D,
}

impl Boid {
    pub fn new(position: Vector2D, heading: Vector2D) -> Self {
        Self { position, heading }
    }

    /// Uniform position inside the arena, uniform direction, configured speed.
    pub fn random<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0.0..=config.width),
            rng.gen_range(0.0..=config.height),
        );
        let heading = Vector2D::from_bearing(rng.gen_range(0.0..360.0)) * config.velocity;
        Self::new(position, heading)
    }

    pub fn speed(&self) -> f64 {
        self.heading.magnitude()
    }

    /// Direction of travel in degrees clockwise from +y, for orienting sprites.
    pub fn bearing_degrees(&self) -> f64 {
        self.heading.bearing_degrees()
    }
}

/// Ordered collection of boids; a boid's identity is its index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flock {
    boids: Vec<Boid>,
}

impl Flock {
    pub fn new(boids: Vec<Boid>) -> Self {
        Self { boids }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boids: Vec::with_capacity(capacity),
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub(crate) fn boids_mut(&mut self) -> &mut Vec<Boid> {
        &mut self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Boid> {
        self.boids.iter()
    }

    pub fn into_inner(self) -> Vec<Boid> {
        self.boids
    }
}

impl From<Vec<Boid>> for Flock {
    fn from(boids: Vec<Boid>) -> Self {
        Self::new(boids)
    }
}

impl core::ops::Index<usize> for Flock {
    type Output = Boid;

    fn index(&self, index: usize) -> &Boid {
        &self.boids[index]
    }
}

impl<'a> IntoIterator for &'a Flock {
    type Item = &'a Boid;
    type IntoIter = core::slice::Iter<'a, Boid>;

    fn into_iter(self) -> Self::IntoIter {
        self.boids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_boid_creation() {
        let boid = Boid::new(Vector2D::new(10.0, 20.0), Vector2D::new(3.0, 4.0));
        assert_eq!(boid.position.x, 10.0);
        assert_eq!(boid.position.y, 20.0);
        assert_eq!(boid.speed(), 5.0);
    }

    #[test]
    fn test_random_boid_in_arena_at_speed() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let boid = Boid::random(&config, &mut rng);
            assert!((0.0..=config.width).contains(&boid.position.x));
            assert!((0.0..=config.height).contains(&boid.position.y));
            assert!((boid.speed() - config.velocity).abs() < 1e-9);
        }
    }

    #[test]
    fn test_flock_indexing() {
        let flock = Flock::from(alloc::vec![
            Boid::new(Vector2D::new(1.0, 1.0), Vector2D::new(1.0, 0.0)),
            Boid::new(Vector2D::new(2.0, 2.0), Vector2D::new(0.0, 1.0)),
        ]);
        assert_eq!(flock.len(), 2);
        assert_eq!(flock[1].position, Vector2D::new(2.0, 2.0));
        assert_eq!(flock.iter().count(), 2);
    }
}
