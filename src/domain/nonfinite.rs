//! Serde helpers that keep non-finite floats through JSON.
//!
//! `serde_json` writes NaN and infinities as `null`, which does not read back
//! as `f64`. These helpers write them as the strings `"NaN"`, `"inf"` and
//! `"-inf"`. On read they accept numbers, those strings, and `null` (as NaN).
//!
//! Use with `#[serde(with = "crate::domain::nonfinite")]` on `f64` fields and
//! `#[serde(with = "crate::domain::nonfinite::vec")]` on `Vec<f64>` fields.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
    Null,
}

impl Repr {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) => s
                .parse::<f64>()
                .map_err(|_| E::custom(format!("'{s}' is not a number"))),
            Repr::Null => Ok(f64::NAN),
        }
    }
}

struct Lossless(f64);

impl Serialize for Lossless {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize(&self.0, serializer)
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_str(&value.to_string())
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Repr::deserialize(deserializer)?.into_f64()
}

pub mod vec {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Lossless, Repr};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for &v in values {
            seq.serialize_element(&Lossless(v))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        Vec::<Repr>::deserialize(deserializer)?
            .into_iter()
            .map(Repr::into_f64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "super")]
        value: f64,
        #[serde(with = "super::vec")]
        values: Vec<f64>,
    }

    #[test]
    fn non_finite_values_are_written_as_strings() {
        let h = Holder {
            value: f64::NAN,
            values: vec![1.5, f64::INFINITY, f64::NEG_INFINITY],
        };
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"{"value":"NaN","values":[1.5,"inf","-inf"]}"#);

        let back: Holder = serde_json::from_str(&json).unwrap();
        assert!(back.value.is_nan());
        assert_eq!(back.values[0], 1.5);
        assert_eq!(back.values[1], f64::INFINITY);
        assert_eq!(back.values[2], f64::NEG_INFINITY);
    }

    #[test]
    fn null_reads_as_nan_and_garbage_is_rejected() {
        let back: Holder = serde_json::from_str(r#"{"value":null,"values":[2]}"#).unwrap();
        assert!(back.value.is_nan());
        assert_eq!(back.values, vec![2.0]);

        assert!(serde_json::from_str::<Holder>(r#"{"value":"abc","values":[]}"#).is_err());
    }
}
