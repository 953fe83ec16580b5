//! Lenient field deserializers.
//!
//! The datasets are exported from pandas, which stores integer columns that
//! contain nulls as floats and writes booleans as `True`/`False` in CSV.
//! These helpers accept those spellings for the typed record fields.

use serde::de::{Deserializer, Error};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Interpret as a non-negative integer. `Ok(None)` means "missing".
    fn to_u64(&self) -> Result<Option<u64>, String> {
        match self {
            Scalar::Unsigned(v) => Ok(Some(*v)),
            Scalar::Signed(v) => u64::try_from(*v)
                .map(Some)
                .map_err(|_| format!("negative value {v}")),
            Scalar::Float(v) if v.is_nan() => Ok(None),
            Scalar::Float(v) => float_to_u64(*v).map(Some),
            Scalar::Text(s) => {
                let s = s.trim();
                if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                    return Ok(None);
                }
                if let Ok(v) = s.parse::<u64>() {
                    return Ok(Some(v));
                }
                let v = s
                    .parse::<f64>()
                    .map_err(|_| format!("'{s}' is not a number"))?;
                float_to_u64(v).map(Some)
            }
            Scalar::Bool(b) => Err(format!("expected a number, got {b}")),
        }
    }

    fn to_flag(&self) -> Result<bool, String> {
        match self {
            Scalar::Bool(b) => Ok(*b),
            Scalar::Unsigned(v) => Ok(*v != 0),
            Scalar::Signed(v) => Ok(*v != 0),
            Scalar::Float(v) => Ok(*v != 0.0 && !v.is_nan()),
            Scalar::Text(s) => match s.trim() {
                "true" | "True" | "TRUE" | "1" => Ok(true),
                "false" | "False" | "FALSE" | "0" | "" => Ok(false),
                other => Err(format!("'{other}' is not a boolean")),
            },
        }
    }
}

fn float_to_u64(v: f64) -> Result<u64, String> {
    if v.fract() != 0.0 || v < 0.0 || v > u64::MAX as f64 {
        return Err(format!("{v} is not a non-negative integer"));
    }
    Ok(v as u64)
}

/// Required identifier.
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Scalar::deserialize(deserializer)?
        .to_u64()
        .map_err(D::Error::custom)?
        .ok_or_else(|| D::Error::custom("missing identifier"))
}

/// Optional identifier: null, NaN and empty text all mean absent.
pub fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<Scalar>::deserialize(deserializer)? {
        Some(scalar) => scalar.to_u64().map_err(D::Error::custom),
        None => Ok(None),
    }
}

/// Required count.
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Scalar::deserialize(deserializer)?
        .to_u64()
        .map_err(D::Error::custom)?
        .ok_or_else(|| D::Error::custom("missing count"))
}

/// Optional count: null, NaN and empty text read as `0`.
pub fn optional_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match Option::<Scalar>::deserialize(deserializer)? {
        Some(scalar) => Ok(scalar.to_u64().map_err(D::Error::custom)?.unwrap_or(0)),
        None => Ok(0),
    }
}

/// Boolean flag; null reads as `false`.
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Option::<Scalar>::deserialize(deserializer)? {
        Some(scalar) => scalar.to_flag().map_err(D::Error::custom),
        None => Ok(false),
    }
}
