//! Planar coordinate type used for telemetry positions.
//!
//! The simulated world is a grid measured in kilometres, so `GeoPoint` holds
//! grid-space latitude (y) and longitude (x) as `f64`.  Telemetry is rounded
//! to six decimals, which `f32` cannot carry for coordinates above ~10.

/// A position in the simulated world.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Point at fraction `t` of the way from `self` to `other`.
    ///
    /// `t` is clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        let t = t.clamp(0.0, 1.0);
        GeoPoint {
            lat: self.lat + t * (other.lat - self.lat),
            lon: self.lon + t * (other.lon - self.lon),
        }
    }

    /// Straight-line distance in grid units.
    pub fn distance(self, other: GeoPoint) -> f64 {
        (self.lat - other.lat).hypot(self.lon - other.lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── GridNode ──────────────────────────────────────────────────────────────────

/// An intersection addressed by integer grid coordinates.
///
/// Routes are sequences of `GridNode`s; adjacent entries are one edge
/// (one kilometre) apart.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct GridNode {
    pub x: i32,
    pub y: i32,
}

impl GridNode {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Telemetry position of this intersection: `lat = y`, `lon = x`.
    #[inline]
    pub fn point(self) -> GeoPoint {
        GeoPoint::new(self.y as f64, self.x as f64)
    }
}

impl std::fmt::Display for GridNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Round `value` to `places` decimal places (half away from zero).
#[inline]
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}
