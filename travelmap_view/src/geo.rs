// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// A geographic position in decimal degrees.
///
/// Latitude grows northwards and longitude grows eastwards. No wrapping or
/// clamping is applied on construction; see [`LatLng::is_finite`] for the
/// sanity check used by consumers.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LatLng {
    /// Latitude in degrees, nominally `-90..=90`.
    pub lat: f64,
    /// Longitude in degrees, nominally `-180..=180`.
    pub lng: f64,
}

impl LatLng {
    /// Creates a position from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` if both components are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Axis-aligned geographic bounding box.
///
/// Bounds never wrap across the antimeridian: `west <= east` for every valid
/// box, matching the way slippy-map libraries report the visible extent of an
/// unwrapped view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    /// Southern edge (minimum latitude).
    pub south: f64,
    /// Western edge (minimum longitude).
    pub west: f64,
    /// Northern edge (maximum latitude).
    pub north: f64,
    /// Eastern edge (maximum longitude).
    pub east: f64,
}

impl GeoBounds {
    /// Creates bounds from two opposite corners in any order.
    ///
    /// A NaN coordinate in either corner makes both edges on that axis NaN,
    /// so the result is not [valid](Self::is_valid).
    #[must_use]
    pub fn new(a: LatLng, b: LatLng) -> Self {
        let (south, north) = ordered(a.lat, b.lat);
        let (west, east) = ordered(a.lng, b.lng);
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Creates zero-area bounds around a single position.
    #[must_use]
    pub fn from_point(p: LatLng) -> Self {
        Self {
            south: p.lat,
            west: p.lng,
            north: p.lat,
            east: p.lng,
        }
    }

    /// Returns the smallest bounds covering every position, or `None` for an
    /// empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::from_point(first);
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    /// Grows the bounds so that they include `p`.
    pub fn extend(&mut self, p: LatLng) {
        self.south = self.south.min(p.lat);
        self.west = self.west.min(p.lng);
        self.north = self.north.max(p.lat);
        self.east = self.east.max(p.lng);
    }

    /// Returns the south-west corner.
    #[must_use]
    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.south, self.west)
    }

    /// Returns the north-east corner.
    #[must_use]
    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.north, self.east)
    }

    /// Returns the midpoint of the box in degree space.
    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) * 0.5,
            (self.west + self.east) * 0.5,
        )
    }

    /// Returns `true` if every edge is finite and the box is not inverted.
    ///
    /// Zero-area boxes are valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.south.is_finite()
            && self.west.is_finite()
            && self.north.is_finite()
            && self.east.is_finite()
            && self.south <= self.north
            && self.west <= self.east
    }

    /// Returns `true` if `p` lies inside the box or on its edges.
    ///
    /// Always `false` for non-finite positions.
    #[must_use]
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }
}

/// `(min, max)` of two values, NaN if either is NaN.
fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a.is_nan() || b.is_nan() {
        (f64::NAN, f64::NAN)
    } else if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoBounds, LatLng};

    #[test]
    fn new_normalizes_corner_order() {
        let b = GeoBounds::new(LatLng::new(10.0, 20.0), LatLng::new(-5.0, -30.0));
        assert_eq!(b.south, -5.0);
        assert_eq!(b.west, -30.0);
        assert_eq!(b.north, 10.0);
        assert_eq!(b.east, 20.0);
        assert!(b.is_valid());
    }

    #[test]
    fn contains_is_inclusive_and_rejects_nan() {
        let b = GeoBounds::new(LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0));
        assert!(b.contains(LatLng::new(0.0, 0.0)));
        assert!(b.contains(LatLng::new(1.0, 1.0)));
        assert!(b.contains(LatLng::new(0.5, 0.5)));
        assert!(!b.contains(LatLng::new(1.000_001, 0.5)));
        assert!(!b.contains(LatLng::new(f64::NAN, 0.5)));
    }

    #[test]
    fn from_points_covers_all_and_handles_empty() {
        assert_eq!(GeoBounds::from_points(core::iter::empty()), None);

        let b = GeoBounds::from_points([
            LatLng::new(48.85, 2.35),
            LatLng::new(51.5, -0.12),
            LatLng::new(41.9, 12.5),
        ])
        .unwrap();
        assert_eq!(b.south, 41.9);
        assert_eq!(b.north, 51.5);
        assert_eq!(b.west, -0.12);
        assert_eq!(b.east, 12.5);
    }

    #[test]
    fn inverted_or_nan_bounds_are_invalid() {
        let inverted = GeoBounds {
            south: 10.0,
            west: 0.0,
            north: 5.0,
            east: 1.0,
        };
        assert!(!inverted.is_valid());

        let nan = GeoBounds {
            south: f64::NAN,
            west: 0.0,
            north: 5.0,
            east: 1.0,
        };
        assert!(!nan.is_valid());
    }

    #[test]
    fn one_nan_corner_poisons_new_bounds() {
        let b = GeoBounds::new(LatLng::new(f64::NAN, 20.0), LatLng::new(-5.0, -30.0));
        assert!(b.south.is_nan() && b.north.is_nan());
        assert_eq!((b.west, b.east), (-30.0, 20.0));
        assert!(!b.is_valid());
        assert!(!b.contains(LatLng::new(0.0, 0.0)));
    }
}
