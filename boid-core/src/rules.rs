//! The three local flocking rules.
//!
//! Each rule takes the boid and an iterator over its neighbors and returns a
//! raw, unweighted steering vector. Every rule returns zero for an empty
//! neighbor set.

use crate::boid::Boid;
use crate::vector::{Vector2D, EPSILON};

/// Raw steering vectors for one boid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Steering {
    pub cohesion: Vector2D,
    pub alignment: Vector2D,
    pub separation: Vector2D,
}

impl Steering {
    /// Evaluate all three rules in a single pass over the neighbors.
    pub fn compute<'a, I>(boid: &Boid, neighbors: I) -> (Self, usize)
    where
        I: IntoIterator<Item = &'a Boid>,
    {
        let mut position_sum = Vector2D::zero();
        let mut heading_sum = Vector2D::zero();
        let mut separation = Vector2D::zero();
        let mut count = 0;

        for other in neighbors {
            position_sum += other.position;
            heading_sum += other.heading;
            separation += repulsion(boid, other);
            count += 1;
        }

        if count == 0 {
            return (Self::default(), 0);
        }

        let n = count as f64;
        let steering = Self {
            cohesion: position_sum / n - boid.position,
            alignment: heading_sum / n - boid.heading,
            separation,
        };
        (steering, count)
    }
}

/// Vector from the boid toward the mean position of its neighbors.
pub fn cohesion<'a, I>(boid: &Boid, neighbors: I) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in neighbors {
        sum += other.position;
        count += 1;
    }

    if count > 0 {
        sum / count as f64 - boid.position
    } else {
        Vector2D::zero()
    }
}

/// Mean neighbor heading minus the boid's own heading.
pub fn alignment<'a, I>(boid: &Boid, neighbors: I) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in neighbors {
        sum += other.heading;
        count += 1;
    }

    if count > 0 {
        sum / count as f64 - boid.heading
    } else {
        Vector2D::zero()
    }
}

/// Sum of unit vectors pointing away from each neighbor, each scaled by the
/// inverse of its distance.
pub fn separation<'a, I>(boid: &Boid, neighbors: I) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    neighbors.into_iter().map(|other| repulsion(boid, other)).sum()
}

/// `(self - other) / d²`, which has magnitude `1 / d`. A neighbor sitting on
/// top of the boid gives no usable direction and contributes nothing.
#[inline]
fn repulsion(boid: &Boid, other: &Boid) -> Vector2D {
    let diff = boid.position - other.position;
    let dist_sq = diff.magnitude_squared();
    if dist_sq > EPSILON * EPSILON {
        diff / dist_sq
    } else {
        Vector2D::zero()
    }
}
