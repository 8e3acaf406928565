use crate::vector::Vector2D;

const MIN_X_WALL: Vector2D = Vector2D::new(1.0, 0.0);
const MAX_X_WALL: Vector2D = Vector2D::new(-1.0, 0.0);
const MIN_Y_WALL: Vector2D = Vector2D::new(0.0, 1.0);
const MAX_Y_WALL: Vector2D = Vector2D::new(0.0, -1.0);

/// Which walls were hit while resolving a position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

impl Bounce {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Bounce off the arena walls.
///
/// Each axis is handled on its own: a boid outside `[0, width]` has its
/// heading reflected across that wall's inward normal and its coordinate
/// clamped onto the wall. Corners reflect both components. The heading is only
/// reflected while it still points out of the arena, so the speed is unchanged
/// and a boid resting on a wall is never turned back into it.
pub fn resolve_boundary(
    position: Vector2D,
    heading: Vector2D,
    width: f64,
    height: f64,
) -> (Vector2D, Vector2D) {
    let (position, heading, _) = resolve_boundary_with_bounce(position, heading, width, height);
    (position, heading)
}

pub fn resolve_boundary_with_bounce(
    mut position: Vector2D,
    mut heading: Vector2D,
    width: f64,
    height: f64,
) -> (Vector2D, Vector2D, Bounce) {
    let mut bounce = Bounce::default();

    let x_wall = if position.x < 0.0 {
        position.x = 0.0;
        Some(MIN_X_WALL)
    } else if position.x > width {
        position.x = width;
        Some(MAX_X_WALL)
    } else {
        None
    };
    if let Some(normal) = x_wall {
        bounce.x = true;
        if heading.dot(&normal) < 0.0 {
            heading = heading.reflect(&normal);
        }
    }

    let y_wall = if position.y < 0.0 {
        position.y = 0.0;
        Some(MIN_Y_WALL)
    } else if position.y > height {
        position.y = height;
        Some(MAX_Y_WALL)
    } else {
        None
    };
    if let Some(normal) = y_wall {
        bounce.y = true;
        if heading.dot(&normal) < 0.0 {
            heading = heading.reflect(&normal);
        }
    }

    (position, heading, bounce)
}
