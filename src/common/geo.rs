// src/common/geo.rs

use serde_json::{Value, json};

/// Ordem de eixos canônica em todo o sistema: x = longitude, y = latitude
/// (convenção GeoJSON). Vale tanto na escrita (`ST_MakePoint(lon, lat)`)
/// quanto na leitura (`ST_X` = lon, `ST_Y` = lat).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    // Geometria "Point" GeoJSON: coordinates = [lon, lat].
    pub fn to_geometry(&self) -> Value {
        json!({
            "type": "Point",
            "coordinates": [self.longitude, self.latitude],
        })
    }
}

/// Geometria "LineString" a partir de pontos já ordenados no tempo.
pub fn line_string(points: &[GeoPoint]) -> Value {
    let coordinates: Vec<Value> = points
        .iter()
        .map(|p| json!([p.longitude, p.latitude]))
        .collect();
    json!({
        "type": "LineString",
        "coordinates": coordinates,
    })
}

/// Uma Feature GeoJSON com geometria e propriedades arbitrárias.
pub fn feature(geometry: Value, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": properties,
    })
}

/// O envelope FeatureCollection que os endpoints geoespaciais respondem.
pub fn feature_collection(features: Vec<Value>) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_geometry_orders_lon_lat() {
        // lat 40.3, lon 21.8 (Kozani) -> coordinates [21.8, 40.3]
        let geom = GeoPoint::new(21.8, 40.3).to_geometry();
        assert_eq!(geom["type"], "Point");
        assert_eq!(geom["coordinates"][0], 21.8);
        assert_eq!(geom["coordinates"][1], 40.3);
    }

    #[test]
    fn line_string_preserves_input_order() {
        let geom = line_string(&[
            GeoPoint::new(21.0, 40.0),
            GeoPoint::new(21.1, 40.1),
            GeoPoint::new(21.2, 40.2),
        ]);
        assert_eq!(geom["type"], "LineString");
        assert_eq!(geom["coordinates"][0], json!([21.0, 40.0]));
        assert_eq!(geom["coordinates"][2], json!([21.2, 40.2]));
    }

    #[test]
    fn feature_collection_envelope() {
        let point = GeoPoint::new(1.0, 2.0);
        let doc = feature_collection(vec![feature(
            point.to_geometry(),
            json!({ "id": 9, "temperature": 21.5 }),
        )]);
        assert_eq!(doc["type"], "FeatureCollection");
        assert_eq!(doc["features"][0]["type"], "Feature");
        assert_eq!(doc["features"][0]["properties"]["id"], 9);
        assert_eq!(doc["features"][0]["geometry"]["coordinates"], json!([1.0, 2.0]));
    }
}
