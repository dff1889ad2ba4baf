//! Planar cities.

use rand::Rng;

/// An immutable point in the plane.
///
/// Two cities may share coordinates; equality is positional.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl City {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other`.
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        City::new(x, y)
    }
}

/// Generates `n` cities uniformly inside `[0, map_size)²`.
///
/// # Panics
/// Panics if `map_size` is not a positive finite number and `n > 0`.
pub fn random_cities<R: Rng>(n: usize, map_size: f64, rng: &mut R) -> Vec<City> {
    (0..n)
        .map(|_| {
            City::new(
                rng.random_range(0.0..map_size),
                rng.random_range(0.0..map_size),
            )
        })
        .collect()
}
