use std::fmt;

use indexmap::IndexMap;

/// Object members in source order. Re-inserting a key keeps its first
/// position and replaces the value.
pub type Map = IndexMap<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(n) => *n as f64,
            Number::Float(n) => *n,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{:?}", n),
        }
    }
}

/// A decoded JSON value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(Number::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Member lookup; `None` for missing keys and non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String, String> {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        result.map_err(|e| format!("Couldn't serialize value: {}", e))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_json_string(false).map_err(|_| fmt::Error)?;
        write!(f, "{}", s)
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(Number::Integer(n)) => serde_json::Value::Number(n.into()),
            Value::Number(Number::Float(n)) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(values) => {
                serde_json::Value::Array(values.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod test_value {
    use super::*;

    fn sample() -> Value {
        let mut map = Map::new();
        map.insert("b".to_string(), Value::Number(Number::Integer(1)));
        map.insert("a".to_string(), Value::Array(vec![Value::Null, Value::Bool(true)]));
        map.insert("c".to_string(), Value::Number(Number::Float(1.5)));
        Value::Object(map)
    }

    #[test]
    fn test_value_accessors() {
        let value = sample();
        assert_eq!(value.get("b").and_then(Value::as_i64), Some(1));
        assert_eq!(value.get("c").and_then(Value::as_f64), Some(1.5));
        assert_eq!(value.get("c").and_then(Value::as_i64), None);
        assert_eq!(value.get("a").and_then(Value::as_array).map(Vec::len), Some(2));
        assert!(value.get("missing").is_none());
        assert!(Value::Null.is_null());
        assert_eq!(Value::String("x".into()).get("x"), None);
    }

    #[test]
    fn test_value_displays_as_json_in_source_order() {
        assert_eq!(sample().to_string(), r#"{"b":1,"a":[null,true],"c":1.5}"#);
    }

    #[test]
    fn test_value_converts_to_serde_json() {
        let converted: serde_json::Value = sample().into();
        let keys = converted
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(converted["c"], serde_json::json!(1.5));
    }

    #[test]
    fn test_number_displays() {
        assert_eq!(Number::Integer(10021).to_string(), "10021");
        assert_eq!(Number::Float(1000.0).to_string(), "1000.0");
    }
}
