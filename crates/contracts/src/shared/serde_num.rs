//! Lenient numeric deserializers.
//!
//! Драйверы отдают DECIMAL/NUMBER то числом, то строкой, принимаем оба варианта.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

fn value_to_f64<E: de::Error>(v: Value) -> Result<Option<f64>, E> {
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| E::custom("number out of range")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| E::custom(format!("invalid numeric value: {}", s))),
        other => Err(E::custom(format!("expected number, got {}", other))),
    }
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    value_to_f64(v)
}

pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    match v {
        Value::Number(ref n) if n.is_i64() => Ok(n.as_i64()),
        Value::String(ref s) if s.trim().parse::<i64>().is_ok() => Ok(s.trim().parse().ok()),
        other => match value_to_f64::<D::Error>(other)? {
            None => Ok(None),
            Some(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
            Some(f) => Err(de::Error::custom(format!("expected integer, got {}", f))),
        },
    }
}

pub fn req_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_i64(deserializer)?.ok_or_else(|| de::Error::custom("expected integer, got null"))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::opt_f64")]
        rate: Option<f64>,
        #[serde(default, deserialize_with = "super::opt_i64")]
        id: Option<i64>,
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let p: Probe = serde_json::from_value(json!({"rate": "7.5", "id": "42"})).unwrap();
        assert_eq!(p.rate, Some(7.5));
        assert_eq!(p.id, Some(42));

        let p: Probe = serde_json::from_value(json!({"rate": 11, "id": 3.0})).unwrap();
        assert_eq!(p.rate, Some(11.0));
        assert_eq!(p.id, Some(3));

        let p: Probe = serde_json::from_value(json!({"rate": null})).unwrap();
        assert_eq!(p.rate, None);
        assert_eq!(p.id, None);
    }

    #[derive(Deserialize)]
    struct Keyed {
        #[serde(deserialize_with = "super::req_i64")]
        id: i64,
    }

    #[test]
    fn test_required_key() {
        let k: Keyed = serde_json::from_value(json!({"id": "1001"})).unwrap();
        assert_eq!(k.id, 1001);
        assert!(serde_json::from_value::<Keyed>(json!({"id": null})).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_value::<Probe>(json!({"rate": "abc"})).is_err());
        assert!(serde_json::from_value::<Probe>(json!({"id": 1.5})).is_err());
    }
}
