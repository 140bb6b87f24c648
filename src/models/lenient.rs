use serde::{Deserialize, Deserializer};

// The API accepts numeric fields as JSON numbers or numeric strings,
// and treats null/empty strings as absent. HTML forms and the original
// clients send both shapes interchangeably.

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Null(()),
}

pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(deserializer)? {
        RawNumber::Int(i) => Ok(Some(i)),
        // a fractional rating or sweetness is a caller mistake, not
        // something to truncate quietly
        RawNumber::Float(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
        RawNumber::Float(_) => Err(serde::de::Error::custom("expected a whole number")),
        RawNumber::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                s.parse().map(Some).map_err(serde::de::Error::custom)
            }
        }
        RawNumber::Null(()) => Ok(None),
    }
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(deserializer)? {
        RawNumber::Int(i) => Ok(Some(i as f64)),
        RawNumber::Float(f) => Ok(Some(f)),
        RawNumber::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                s.parse().map(Some).map_err(serde::de::Error::custom)
            }
        }
        RawNumber::Null(()) => Ok(None),
    }
}

/// Required coordinate fields from providers that serialize numbers as
/// strings (Nominatim does).
pub fn f64_from_any<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(deserializer)? {
        RawNumber::Int(i) => Ok(i as f64),
        RawNumber::Float(f) => Ok(f),
        RawNumber::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        RawNumber::Null(()) => Err(serde::de::Error::custom("expected a number, got null")),
    }
}

/// Provider-assigned identifiers are opaque; accept numbers or strings.
pub fn string_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(deserializer)? {
        RawNumber::Int(i) => Ok(i.to_string()),
        RawNumber::Float(f) => Ok(f.to_string()),
        RawNumber::Text(s) => Ok(s),
        RawNumber::Null(()) => Err(serde::de::Error::custom("expected an id, got null")),
    }
}
