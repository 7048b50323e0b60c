use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::json::value::{Number, Value};

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Integer(n) => serializer.serialize_i64(*n),
            Number::Float(n) => serializer.serialize_f64(*n),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(values) => values.serialize(serializer),
            Value::Object(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod test_custom_serde {
    use crate::json::value::Map;

    use super::*;

    #[test]
    fn test_serializes_nested_values() {
        let mut inner = Map::new();
        inner.insert("z".to_string(), Value::String("last\\n".to_string()));
        let mut map = Map::new();
        map.insert("inner".to_string(), Value::Object(inner));
        map.insert(
            "list".to_string(),
            Value::Array(vec![
                Value::Number(Number::Integer(-3)),
                Value::Number(Number::Float(0.25)),
            ]),
        );
        let serialized = serde_json::to_string(&Value::Object(map)).unwrap();
        assert_eq!(serialized, r#"{"inner":{"z":"last\\n"},"list":[-3,0.25]}"#);
    }

    #[test]
    fn test_serializes_non_finite_floats_as_null() {
        let serialized = serde_json::to_string(&Value::Number(Number::Float(f64::INFINITY)));
        assert_eq!(serialized.unwrap(), "null");
    }
}
