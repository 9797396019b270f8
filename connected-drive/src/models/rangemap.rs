//! Range map polygons

use serde::Deserialize;

/// A map coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Car efficiency mode a range polygon was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PolylineType {
    #[serde(rename = "COMFORT")]
    Comfort,
    #[serde(rename = "ECO_PRO")]
    EcoPro,
    #[serde(rename = "ECO_PRO_PLUS")]
    EcoProPlus,
}

/// One range polygon and the mode it applies to.
#[derive(Debug, Clone, Deserialize)]
pub struct RangePolyline {
    #[serde(rename = "type")]
    pub polyline_type: PolylineType,
    pub polyline: Vec<Coordinate>,
}

/// Reachable-range polygons that can be projected on a map.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeMap {
    pub center: Coordinate,
    #[serde(rename = "rangemaps")]
    pub polylines: Vec<RangePolyline>,
    pub quality: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rangemap_decodes() {
        let json = r#"{
            "center": {"lat": 37.4, "lon": -122.1},
            "rangemaps": [
                {"type": "COMFORT", "polyline": [{"lat": 37.5, "lon": -122.0}]},
                {"type": "ECO_PRO_PLUS", "polyline": []}
            ],
            "quality": "AVERAGE"
        }"#;
        let map: RangeMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.polylines.len(), 2);
        assert_eq!(map.polylines[0].polyline_type, PolylineType::Comfort);
        assert_eq!(map.polylines[0].polyline[0].lat, 37.5);
        assert_eq!(map.quality, "AVERAGE");
    }
}
