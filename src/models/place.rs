use serde::{Deserialize, Serialize};

use super::lenient;

/// A geocoder suggestion candidate. Ephemeral: candidates live from one
/// debounce cycle to the next and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(deserialize_with = "lenient::string_from_any")]
    pub place_id: String,
    pub display_name: String,
    #[serde(deserialize_with = "lenient::f64_from_any")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient::f64_from_any")]
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nominatim_response_shape() {
        // Nominatim sends numeric place ids and string coordinates.
        let json = r#"{
            "place_id": 282983083,
            "display_name": "Phoenix Coffee, Larchmere Boulevard, Cleveland",
            "lat": "41.4847",
            "lon": "-81.5799",
            "class": "amenity"
        }"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.place_id, "282983083");
        assert_eq!(place.lat, 41.4847);
        assert_eq!(place.lon, -81.5799);
    }
}
