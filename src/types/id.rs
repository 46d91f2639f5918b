use serde::{Deserialize, Deserializer};

/// Identifiers are opaque: the server may key records by string or by integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Signed(id) => id.to_string(),
        RawId::Unsigned(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
    }

    #[test]
    fn test_string_and_numeric_ids() {
        let row: Row = serde_json::from_str(r#"{"id":"3fa85f64"}"#).unwrap();
        assert_eq!(row.id, "3fa85f64");

        let row: Row = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(row.id, "42");

        let row: Row = serde_json::from_str(r#"{"id":18446744073709551615}"#).unwrap();
        assert_eq!(row.id, "18446744073709551615");
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(serde_json::from_str::<Row>(r#"{"id":1.5}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"id":null}"#).is_err());
    }
}
