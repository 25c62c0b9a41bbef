//! `null` を欠落と同じに扱う serde helper
//!
//! Producers emit `"events": null` or `"expected_bid_wei": null` for empty
//! values. These decode to the field's zero value instead of failing the whole
//! envelope.

use serde::{Deserialize, Deserializer};

/// `#[serde(deserialize_with = "null_as_default")]`
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_as_default")]
        name: String,
        #[serde(deserialize_with = "null_as_default")]
        items: Vec<String>,
        #[serde(deserialize_with = "null_as_default")]
        count: u64,
    }

    #[test]
    fn null_and_missing_decode_to_zero_values() {
        let s: Sample = serde_json::from_str(r#"{"name": null, "items": null}"#).unwrap();
        assert_eq!(s.name, "");
        assert!(s.items.is_empty());
        assert_eq!(s.count, 0);
    }

    #[test]
    fn present_values_are_kept() {
        let s: Sample =
            serde_json::from_str(r#"{"name": "n", "items": ["a"], "count": 3}"#).unwrap();
        assert_eq!(s.name, "n");
        assert_eq!(s.items, vec!["a"]);
        assert_eq!(s.count, 3);
    }

    #[test]
    fn wrong_types_still_fail() {
        assert!(serde_json::from_str::<Sample>(r#"{"items": "a"}"#).is_err());
    }
}
