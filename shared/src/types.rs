//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Geographic bounding box
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

/// Approximate bounding box of Guatemala used to place map anchors
pub const GUATEMALA_BBOX: BoundingBox = BoundingBox {
    north: 17.816,
    south: 13.733,
    west: -92.227,
    east: -88.226,
};

/// Static map position as percentages of the reference frame.
///
/// `x` grows eastward and `y` grows southward, both in `0..=100`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MapAnchor {
    pub x: f64,
    pub y: f64,
}

impl MapAnchor {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Project the anchor into latitude/longitude within [`GUATEMALA_BBOX`]
    pub fn to_lat_lng(&self) -> GpsCoordinates {
        self.project(&GUATEMALA_BBOX)
    }

    /// Project the anchor into latitude/longitude within an arbitrary box
    pub fn project(&self, bbox: &BoundingBox) -> GpsCoordinates {
        let longitude = bbox.west + (self.x / 100.0) * (bbox.east - bbox.west);
        let latitude = bbox.north - (self.y / 100.0) * (bbox.north - bbox.south);
        GpsCoordinates::new(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_corners_map_to_bbox_corners() {
        let top_left = MapAnchor::new(0.0, 0.0).to_lat_lng();
        assert!((top_left.latitude - GUATEMALA_BBOX.north).abs() < 1e-9);
        assert!((top_left.longitude - GUATEMALA_BBOX.west).abs() < 1e-9);

        let bottom_right = MapAnchor::new(100.0, 100.0).to_lat_lng();
        assert!((bottom_right.latitude - GUATEMALA_BBOX.south).abs() < 1e-9);
        assert!((bottom_right.longitude - GUATEMALA_BBOX.east).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_midpoint() {
        let mid = MapAnchor::new(50.0, 50.0).to_lat_lng();
        assert!((mid.latitude - 15.7745).abs() < 1e-6);
        assert!((mid.longitude - (-90.2265)).abs() < 1e-6);
    }
}
