use core::f64::consts::PI;

use crate::error::DegenerateVectorError;

/// Magnitudes at or below this are treated as zero.
pub const EPSILON: f64 = 1e-9;

#[inline]
pub(crate) fn sqrt(value: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrt(value)
    }
}

#[inline]
pub(crate) fn ceil(value: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        value.ceil()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::ceil(value)
    }
}

#[inline]
pub(crate) fn sin_cos(angle: f64) -> (f64, f64) {
    #[cfg(feature = "std")]
    {
        angle.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        (libm::sin(angle), libm::cos(angle))
    }
}

#[inline]
fn atan2(y: f64, x: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2(y, x)
    }
}

/// A 2D vector used for positions and headings
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector for a bearing measured in degrees clockwise from +y.
    pub fn from_bearing(degrees: f64) -> Self {
        let (sin, cos) = sin_cos(degrees.to_radians());
        Self { x: sin, y: cos }
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn magnitude(&self) -> f64 {
        sqrt(self.magnitude_squared())
    }

    pub fn distance_squared(&self, other: &Vector2D) -> f64 {
        (*other - *self).magnitude_squared()
    }

    pub fn distance(&self, other: &Vector2D) -> f64 {
        sqrt(self.distance_squared(other))
    }

    /// Unit vector in the same direction.
    ///
    /// Fails for vectors whose magnitude is at or below [`EPSILON`]; callers
    /// decide what to substitute.
    pub fn normalize(&self) -> Result<Self, DegenerateVectorError> {
        let mag = self.magnitude();
        if mag > EPSILON {
            Ok(Self {
                x: self.x / mag,
                y: self.y / mag,
            })
        } else {
            Err(DegenerateVectorError)
        }
    }

    pub fn normalize_or_zero(&self) -> Self {
        self.normalize().unwrap_or_else(|_| Self::zero())
    }

    /// Mirror across a surface with unit normal `normal`: `v - 2(v·n)n`.
    pub fn reflect(&self, normal: &Vector2D) -> Self {
        *self - *normal * (2.0 * self.dot(normal))
    }

    /// Rotate clockwise by `radians` (the bearing convention).
    pub fn rotate(&self, radians: f64) -> Self {
        let (sin, cos) = sin_cos(radians);
        Self {
            x: self.x * cos + self.y * sin,
            y: -self.x * sin + self.y * cos,
        }
    }

    /// Bearing in degrees clockwise from +y, in `[0, 360)`.
    pub fn bearing_degrees(&self) -> f64 {
        let degrees = atan2(self.x, self.y) * 180.0 / PI;
        let bearing = if degrees < 0.0 { degrees + 360.0 } else { degrees };
        // A tiny negative angle can round up to exactly 360.
        if bearing >= 360.0 {
            0.0
        } else {
            bearing
        }
    }

    /// Signed angle in radians from `self` to `other`.
    pub fn angle_to(&self, other: &Vector2D) -> f64 {
        let cross = self.x * other.y - self.y * other.x;
        atan2(cross, self.dot(other))
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f64> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::iter::Sum for Vector2D {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}
